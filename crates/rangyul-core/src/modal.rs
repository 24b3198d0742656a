//! Modal Lifecycle
//!
//! Phase machine for overlay surfaces plus the page-wide scroll lock.

use thiserror::Error;

/// Visual lifecycle of one modal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalPhase {
    #[default]
    Closed,
    /// Visible flag set, waiting for the open transition to settle
    Opening,
    Open,
    /// Visible flag cleared, waiting for the close transition before unlocking
    Closing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ModalError {
    #[error("cannot move modal from {from:?} to {to:?}")]
    InvalidTransition { from: ModalPhase, to: ModalPhase },
}

/// Open/close state for a single modal, plus the anchor to return to once
/// it has fully closed
#[derive(Debug, Clone, Default)]
pub struct ModalState {
    phase: ModalPhase,
    return_anchor: Option<String>,
}

impl ModalState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    /// True while the overlay is on screen (including the settle phase)
    pub fn is_visible(&self) -> bool {
        matches!(self.phase, ModalPhase::Opening | ModalPhase::Open)
    }

    /// Escape only applies once the modal reports itself open
    pub fn accepts_escape(&self) -> bool {
        self.phase == ModalPhase::Open
    }

    /// Closed -> Opening, remembering where to scroll after the next close
    pub fn begin_open(&mut self, return_anchor: Option<String>) -> Result<(), ModalError> {
        self.transition(ModalPhase::Closed, ModalPhase::Opening)?;
        self.return_anchor = return_anchor;
        Ok(())
    }

    /// Opening -> Open
    pub fn finish_open(&mut self) -> Result<(), ModalError> {
        self.transition(ModalPhase::Opening, ModalPhase::Open)
    }

    /// Open -> Closing
    pub fn begin_close(&mut self) -> Result<(), ModalError> {
        self.transition(ModalPhase::Open, ModalPhase::Closing)
    }

    /// Closing -> Closed. Yields the return anchor of the session that just ended.
    pub fn finish_close(&mut self) -> Result<Option<String>, ModalError> {
        self.transition(ModalPhase::Closing, ModalPhase::Closed)?;
        Ok(self.return_anchor.take())
    }

    /// Closing -> Closed because the modal is being reopened. The old
    /// session's return anchor is discarded.
    pub fn interrupt_close(&mut self) -> Result<(), ModalError> {
        self.transition(ModalPhase::Closing, ModalPhase::Closed)?;
        self.return_anchor = None;
        Ok(())
    }

    fn transition(&mut self, from: ModalPhase, to: ModalPhase) -> Result<(), ModalError> {
        if self.phase != from {
            return Err(ModalError::InvalidTransition {
                from: self.phase,
                to,
            });
        }
        self.phase = to;
        Ok(())
    }
}

/// Count of surfaces currently holding the page scroll lock.
///
/// The page is locked while the count is non-zero. `acquire` and `release`
/// report the 0->1 and 1->0 edges so the caller only touches the DOM then.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollLock {
    holders: u32,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn holders(&self) -> u32 {
        self.holders
    }

    pub fn is_locked(&self) -> bool {
        self.holders > 0
    }

    /// Returns true when this call locked the page
    pub fn acquire(&mut self) -> bool {
        self.holders += 1;
        self.holders == 1
    }

    /// Returns true when this call unlocked the page. Extra releases are ignored.
    pub fn release(&mut self) -> bool {
        if self.holders == 0 {
            return false;
        }
        self.holders -= 1;
        self.holders == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_lifecycle() {
        let mut modal = ModalState::new();
        assert_eq!(modal.phase(), ModalPhase::Closed);
        modal.begin_open(Some("hotel-rangyul".into())).unwrap();
        assert!(modal.is_visible());
        assert!(!modal.accepts_escape());
        modal.finish_open().unwrap();
        assert!(modal.accepts_escape());
        modal.begin_close().unwrap();
        assert!(!modal.is_visible());
        assert_eq!(modal.finish_close().unwrap(), Some("hotel-rangyul".to_string()));
        assert_eq!(modal.phase(), ModalPhase::Closed);
    }

    #[test]
    fn test_open_only_from_closed() {
        let mut modal = ModalState::new();
        modal.begin_open(None).unwrap();
        let err = modal.begin_open(None).unwrap_err();
        assert_eq!(
            err,
            ModalError::InvalidTransition {
                from: ModalPhase::Opening,
                to: ModalPhase::Opening
            }
        );
    }

    #[test]
    fn test_close_from_closed_is_rejected() {
        let mut modal = ModalState::new();
        assert!(modal.begin_close().is_err());
        assert!(modal.finish_close().is_err());
    }

    #[test]
    fn test_close_only_from_open() {
        let mut modal = ModalState::new();
        modal.begin_open(None).unwrap();
        assert_eq!(
            modal.begin_close().unwrap_err(),
            ModalError::InvalidTransition {
                from: ModalPhase::Opening,
                to: ModalPhase::Closing
            }
        );
        assert_eq!(modal.phase(), ModalPhase::Opening);
    }

    #[test]
    fn test_reopen_during_close_drops_previous_anchor() {
        let mut modal = ModalState::new();
        modal.begin_open(Some("rangyul-resort".into())).unwrap();
        modal.finish_open().unwrap();
        modal.begin_close().unwrap();

        modal.interrupt_close().unwrap();
        modal.begin_open(None).unwrap();
        modal.finish_open().unwrap();
        modal.begin_close().unwrap();
        assert_eq!(modal.finish_close().unwrap(), None);
    }

    #[test]
    fn test_interrupt_requires_closing() {
        let mut modal = ModalState::new();
        assert!(modal.interrupt_close().is_err());
        modal.begin_open(None).unwrap();
        assert!(modal.interrupt_close().is_err());
    }

    #[test]
    fn test_single_modal_locks_and_unlocks() {
        let mut lock = ScrollLock::new();
        assert!(lock.acquire());
        assert!(lock.is_locked());
        assert!(lock.release());
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_overlapping_modals_keep_lock_until_last_close() {
        let mut lock = ScrollLock::new();
        assert!(lock.acquire());
        assert!(!lock.acquire());
        // first modal closes out of order
        assert!(!lock.release());
        assert!(lock.is_locked());
        assert!(lock.release());
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_extra_release_does_not_underflow() {
        let mut lock = ScrollLock::new();
        assert!(!lock.release());
        assert_eq!(lock.holders(), 0);
        assert!(lock.acquire());
    }
}
