//! Clone/reset state of a block
//!
//! ```text
//! Idle --fill--> Filled --clone--> PendingClone --materialize--> Filled
//!   ^                                                              |
//!   +------------------------- reset -----------------------------+
//! ```
//!
//! A pending clone is materialized lazily: the next substitution, injection or
//! extraction appends the template copy first. The variant auto-tag uses
//! [`CloneState::take_first`] to know whether the copy being closed is the
//! first of its sequence.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClonePhase {
    /// Content equals the template
    #[default]
    Idle,
    /// Content has been edited
    Filled,
    /// Filled, and a template copy is owed before the next fill
    PendingClone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloneState {
    phase: ClonePhase,
    first_variant: bool,
}

impl Default for CloneState {
    fn default() -> Self {
        Self {
            phase: ClonePhase::Idle,
            first_variant: true,
        }
    }
}

impl CloneState {
    pub fn phase(&self) -> ClonePhase {
        self.phase
    }

    pub fn is_pending(&self) -> bool {
        self.phase == ClonePhase::PendingClone
    }

    /// Whether the next closed copy is the first of its sequence
    pub fn first_variant_pending(&self) -> bool {
        self.first_variant
    }

    /// Content was edited in place
    pub fn mark_filled(&mut self) {
        if self.phase == ClonePhase::Idle {
            self.phase = ClonePhase::Filled;
        }
    }

    /// A template copy is owed
    pub fn owe_clone(&mut self) {
        self.phase = ClonePhase::PendingClone;
    }

    /// Consume the first-variant flag when a copy is closed
    pub fn take_first(&mut self) -> bool {
        std::mem::replace(&mut self.first_variant, false)
    }

    /// A template copy has been appended
    pub fn materialized(&mut self) {
        self.phase = ClonePhase::Filled;
    }

    /// The sequence was injected; the next copy starts a new sequence
    pub fn sequence_closed(&mut self) {
        self.first_variant = true;
    }

    /// Content was restored to the template
    pub fn reset(&mut self) {
        self.phase = ClonePhase::Idle;
    }
}
