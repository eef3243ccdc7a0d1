//! Capture state machine for the pointer tracker.
//!
//! ## State Transitions
//!
//! ```text
//! Idle     -> Dragging   (pointer down with an accepted button)
//! Dragging -> Dragging   (move, button change, partial release)
//! Dragging -> Idle       (release with no accepted button left, phantom move, detach)
//! ```
//!
//! There is no terminal state; a tracker is reused across drags.

/// Identifier of one drag session, unique per tracker.
pub type SessionId = u64;

/// Whether the tracker is currently capturing a drag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CapturePhase {
    /// No drag in progress
    #[default]
    Idle,

    /// A drag is in progress
    Dragging {
        /// Session the window listeners belong to
        session: SessionId,
        /// Last button mask seen during this session
        buttons: u16,
    },
}

impl CapturePhase {
    /// Returns true if a drag is in progress
    #[inline]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// Returns true if the state is Idle
    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Session id, if dragging
    pub fn session(&self) -> Option<SessionId> {
        match self {
            Self::Dragging { session, .. } => Some(*session),
            Self::Idle => None,
        }
    }

    /// Last button mask seen, if dragging
    pub fn buttons(&self) -> Option<u16> {
        match self {
            Self::Dragging { buttons, .. } => Some(*buttons),
            Self::Idle => None,
        }
    }

    /// Start a session
    pub fn start(&mut self, session: SessionId, buttons: u16) {
        *self = Self::Dragging { session, buttons };
    }

    /// Record the current button mask. No effect when idle.
    pub fn set_buttons(&mut self, mask: u16) {
        if let Self::Dragging { buttons, .. } = self {
            *buttons = mask;
        }
    }

    /// Reset to Idle state
    pub fn reset(&mut self) {
        *self = Self::Idle;
    }
}
