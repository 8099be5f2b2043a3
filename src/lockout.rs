//! Interrupt lockout for timing-critical transmission.
//!
//! In safe mode the whole burst loop runs with interrupt delivery disabled, so no ISR
//! (system tick included) can stretch the gap between FIFO writes or bursts.
//! A scope guard inside the transmitter restores the previous interrupt state when it goes
//! out of scope, on every exit path.

use core::fmt::Debug;

/// Disables and restores interrupt delivery.
///
/// The transmitter is the only caller. It pairs every `enter` with one `exit` through a
/// scope guard, so the methods are never called out of order.
pub trait Lockout {
    /// Interrupt state captured on entry.
    type State: Debug;

    /// Disables interrupts and returns the state to restore.
    ///
    /// # Safety
    ///
    /// The returned state must be passed to [`exit`](Self::exit) exactly once, and nested
    /// lockouts must be exited in the reverse order they were entered.
    unsafe fn enter(&mut self) -> Self::State;

    /// Restores the state captured by the matching [`enter`](Self::enter).
    ///
    /// # Safety
    ///
    /// `state` must come from the most recent [`enter`](Self::enter) that has not been
    /// exited yet.
    unsafe fn exit(&mut self, state: Self::State);
}

/// Scoped interrupt lockout. Interrupts are disabled from [`new`](Self::new) until drop.
///
/// Only created inside a block of the burst loop and dropped at its end, which keeps
/// nested guards in LIFO order.
#[derive(Debug)]
pub(crate) struct LockoutGuard<'a, L: Lockout> {
    lockout: &'a mut L,
    state: Option<L::State>,
}

impl<'a, L: Lockout> LockoutGuard<'a, L> {
    pub(crate) fn new(lockout: &'a mut L) -> Self {
        // SAFETY: the state is handed back exactly once in `drop`, and guards live in
        // lexical scopes so they drop in reverse order of creation.
        let state = unsafe { lockout.enter() };
        debug!("interrupt lockout entered");
        Self {
            lockout,
            state: Some(state),
        }
    }
}

impl<L: Lockout> Drop for LockoutGuard<'_, L> {
    fn drop(&mut self) {
        if let Some(state) = self.state.take() {
            // SAFETY: `state` came from the `enter` in `new` and is taken only once.
            unsafe { self.lockout.exit(state) };
            debug!("interrupt lockout released");
        }
    }
}

/// [`Lockout`] backed by the global `critical-section` implementation of the target.
///
/// Entering the lockout outside the transmitter needs `unsafe`:
///
/// ```compile_fail,E0133
/// use plug433::lockout::{CriticalSectionLockout, Lockout};
///
/// let mut lockout = CriticalSectionLockout;
/// let _state = lockout.enter();
/// ```
#[cfg(feature = "safe-mode")]
#[derive(Debug, Default, Clone, Copy)]
pub struct CriticalSectionLockout;

#[cfg(feature = "safe-mode")]
impl Lockout for CriticalSectionLockout {
    type State = critical_section::RestoreState;

    unsafe fn enter(&mut self) -> Self::State {
        // SAFETY: the caller pairs this with one `exit` in LIFO order.
        unsafe { critical_section::acquire() }
    }

    unsafe fn exit(&mut self, state: Self::State) {
        // SAFETY: the caller passes the state of the innermost open `enter`.
        unsafe { critical_section::release(state) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Event, FakeLockout, new_log};

    #[test]
    fn test_guard_enters_and_exits_once() {
        let log = new_log();
        let mut lockout = FakeLockout::new(&log);
        {
            let _guard = LockoutGuard::new(&mut lockout);
            assert_eq!(*log.borrow(), [Event::LockoutEnter]);
        }
        assert_eq!(*log.borrow(), [Event::LockoutEnter, Event::LockoutExit]);
        assert_eq!(lockout.depth, 0);
    }

    #[test]
    fn test_guard_releases_on_early_return() {
        fn bail(lockout: &mut FakeLockout, fail: bool) -> Result<(), ()> {
            let _guard = LockoutGuard::new(lockout);
            if fail {
                return Err(());
            }
            Ok(())
        }

        let log = new_log();
        let mut lockout = FakeLockout::new(&log);
        assert!(bail(&mut lockout, true).is_err());
        assert_eq!(*log.borrow(), [Event::LockoutEnter, Event::LockoutExit]);
    }

    #[test]
    fn test_nested_guards_restore_in_reverse_order() {
        let log = new_log();
        let mut outer = FakeLockout::new(&log);
        let mut inner = FakeLockout::new(&log);
        {
            let _outer = LockoutGuard::new(&mut outer);
            {
                let _inner = LockoutGuard::new(&mut inner);
            }
            assert_eq!(
                *log.borrow(),
                [Event::LockoutEnter, Event::LockoutEnter, Event::LockoutExit]
            );
        }
        assert_eq!(log.borrow().len(), 4);
        assert_eq!(outer.depth, 0);
        assert_eq!(inner.depth, 0);
    }

    #[cfg(feature = "safe-mode")]
    #[test]
    fn test_critical_section_lockout_round_trip() {
        let mut lockout = CriticalSectionLockout;
        {
            let _guard = LockoutGuard::new(&mut lockout);
        }
        // A second acquisition succeeds once the first was released.
        let _guard = LockoutGuard::new(&mut lockout);
    }
}
