//! CRC32-C (Castagnoli) constants.
//!
//! Polynomial: 0x1EDC6F41 (reflected: 0x82F63B78)
//! Used by: iSCSI, SCTP, Btrfs, ext4, RocksDB, LevelDB

/// CRC32-C polynomial in reflected (bit-reversed) form.
pub const POLYNOMIAL: u32 = 0x82F6_3B78;

/// Initial register value and final XOR mask.
pub const INIT: u32 = 0xFFFF_FFFF;

/// Slicing-by-8 lookup tables, 64-byte aligned.
pub static TABLES: super::Aligned64<[[u32; 256]; 8]> =
  super::Aligned64(super::tables::generate_slicing_tables_32(POLYNOMIAL));
