//! A one-shot cell for small `Copy` values, usable with or without `std`.
//!
//! Detection results, kernel choices and engine sets are all computed once
//! and then read on every call. [`InitOnce`] holds such a value behind a
//! single state byte:
//!
//! - `EMPTY`: nothing stored yet
//! - `WRITING`: one thread owns the slot and is filling it
//! - `READY`: the value is published and never changes again
//!
//! Readers that arrive while another thread is `WRITING` spin until `READY`.
//! On targets without byte atomics nothing can be published safely, so
//! [`InitOnce::get_or_init`] runs the initializer on every call there.

#[cfg(target_has_atomic = "8")]
use core::{
  cell::UnsafeCell,
  mem::MaybeUninit,
  sync::atomic::{AtomicU8, Ordering},
};

#[cfg(target_has_atomic = "8")]
const EMPTY: u8 = 0;
#[cfg(target_has_atomic = "8")]
const WRITING: u8 = 1;
#[cfg(target_has_atomic = "8")]
const READY: u8 = 2;

/// Write-once storage for a `Copy` value.
///
/// ```
/// use platform::InitOnce;
///
/// static ANSWER: InitOnce<u32> = InitOnce::new();
///
/// assert_eq!(ANSWER.get(), None);
/// assert_eq!(ANSWER.get_or_init(|| 42), 42);
/// assert_eq!(ANSWER.get_or_init(|| 7), 42);
/// assert_eq!(ANSWER.set(7), Err(7));
/// ```
#[cfg(target_has_atomic = "8")]
pub struct InitOnce<T> {
  state: AtomicU8,
  slot: UnsafeCell<MaybeUninit<T>>,
}

// SAFETY: the slot is written only by the thread that moved `state` from
// EMPTY to WRITING, and read only after READY is observed with Acquire.
#[cfg(target_has_atomic = "8")]
unsafe impl<T: Copy + Send + Sync> Sync for InitOnce<T> {}

#[cfg(target_has_atomic = "8")]
impl<T: Copy> InitOnce<T> {
  #[must_use]
  pub const fn new() -> Self {
    Self {
      state: AtomicU8::new(EMPTY),
      slot: UnsafeCell::new(MaybeUninit::uninit()),
    }
  }

  /// The stored value, or `None` until initialization has finished.
  #[inline]
  #[must_use]
  pub fn get(&self) -> Option<T> {
    if self.state.load(Ordering::Acquire) == READY {
      // SAFETY: READY is only stored (Release) after the slot was written.
      Some(unsafe { (*self.slot.get()).assume_init() })
    } else {
      None
    }
  }

  /// Return the stored value, running `init` first if the cell is empty.
  ///
  /// `init` runs at most once per cell. If it panics the cell goes back to
  /// empty and a later caller retries.
  #[inline]
  pub fn get_or_init(&self, init: impl FnOnce() -> T) -> T {
    if let Some(value) = self.get() {
      return value;
    }
    self.init_slow(init)
  }

  /// Store `value` if the cell has never been written.
  ///
  /// # Errors
  ///
  /// Returns `value` back when the cell is already initialized or another
  /// thread is initializing it.
  pub fn set(&self, value: T) -> Result<(), T> {
    match self.state.compare_exchange(EMPTY, WRITING, Ordering::Acquire, Ordering::Relaxed) {
      Ok(_) => {
        self.publish(value);
        Ok(())
      }
      Err(_) => Err(value),
    }
  }

  #[cold]
  fn init_slow(&self, init: impl FnOnce() -> T) -> T {
    loop {
      match self.state.compare_exchange(EMPTY, WRITING, Ordering::Acquire, Ordering::Acquire) {
        Ok(_) => {
          let reset = ResetOnUnwind(&self.state);
          let value = init();
          core::mem::forget(reset);
          self.publish(value);
          return value;
        }
        // SAFETY: READY observed with Acquire.
        Err(READY) => return unsafe { (*self.slot.get()).assume_init() },
        // Another thread is writing; if it unwinds the state drops back to
        // EMPTY and this caller takes over.
        Err(_) => core::hint::spin_loop(),
      }
    }
  }

  fn publish(&self, value: T) {
    // SAFETY: the caller won EMPTY -> WRITING; no other thread touches the
    // slot until READY is stored below.
    unsafe { (*self.slot.get()).write(value) };
    self.state.store(READY, Ordering::Release);
  }
}

/// Puts the state back to EMPTY if the initializer unwinds.
#[cfg(target_has_atomic = "8")]
struct ResetOnUnwind<'a>(&'a AtomicU8);

#[cfg(target_has_atomic = "8")]
impl Drop for ResetOnUnwind<'_> {
  fn drop(&mut self) {
    self.0.store(EMPTY, Ordering::Release);
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Targets without byte atomics
// ─────────────────────────────────────────────────────────────────────────────

/// Write-once storage for a `Copy` value.
///
/// This target has no byte atomics: nothing is stored and every
/// [`get_or_init`](Self::get_or_init) call runs its initializer.
#[cfg(not(target_has_atomic = "8"))]
pub struct InitOnce<T>(core::marker::PhantomData<T>);

#[cfg(not(target_has_atomic = "8"))]
impl<T: Copy> InitOnce<T> {
  #[must_use]
  pub const fn new() -> Self {
    Self(core::marker::PhantomData)
  }

  #[inline]
  #[must_use]
  pub fn get(&self) -> Option<T> {
    None
  }

  #[inline]
  pub fn get_or_init(&self, init: impl FnOnce() -> T) -> T {
    init()
  }

  /// # Errors
  ///
  /// Always returns `value` back.
  pub fn set(&self, value: T) -> Result<(), T> {
    Err(value)
  }
}

impl<T: Copy> Default for InitOnce<T> {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(all(test, target_has_atomic = "8"))]
mod tests {
  use core::sync::atomic::{AtomicUsize, Ordering};
  use std::{sync::Arc, thread, vec::Vec};

  use super::InitOnce;

  #[test]
  fn initializer_runs_once_across_threads() {
    let cell = Arc::new(InitOnce::<u64>::new());
    let runs = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..8)
      .map(|t| {
        let cell = Arc::clone(&cell);
        let runs = Arc::clone(&runs);
        thread::spawn(move || {
          (0..1000)
            .map(|_| {
              cell.get_or_init(|| {
                runs.fetch_add(1, Ordering::SeqCst);
                0xC0DE_0000 + t
              })
            })
            .last()
        })
      })
      .collect();

    let seen: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(runs.load(Ordering::SeqCst), 1);
    assert!(seen.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(seen[0], cell.get());
  }

  #[test]
  fn set_only_before_first_value() {
    let cell = InitOnce::<u8>::new();
    assert_eq!(cell.get(), None);
    assert_eq!(cell.set(3), Ok(()));
    assert_eq!(cell.get_or_init(|| 9), 3);
    assert_eq!(cell.set(4), Err(4));
    assert_eq!(cell.get(), Some(3));
  }

  #[test]
  #[cfg(panic = "unwind")]
  fn panicking_initializer_leaves_cell_empty() {
    let cell = InitOnce::<u32>::new();
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
      cell.get_or_init(|| panic!("boom"));
    }));
    assert!(result.is_err());
    assert_eq!(cell.get(), None);
    assert_eq!(cell.get_or_init(|| 11), 11);
  }
}
