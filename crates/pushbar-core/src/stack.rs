#![forbid(unsafe_code)]

//! Stack state: the active panel and the trail of panels it displaced.
//!
//! # Invariants
//!
//! 1. **No self-reference**: the trail never contains the active id.
//! 2. **Lock mirrors activity**: [`PanelStack::is_locked`] is true iff an id
//!    is active.
//! 3. **Bounded growth**: each [`PanelStack::push`] adds at most one trail
//!    entry and each [`PanelStack::pop`] removes at most one.
//!
//! The stack never resolves ids itself. Callers validate before mutating so a
//! failed lookup leaves it untouched.

use crate::panel::PanelId;

/// Active id plus LIFO trail of previously active ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelStack {
    active: Option<PanelId>,
    trail: Vec<PanelId>,
}

impl PanelStack {
    /// Empty stack: nothing active, empty trail.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            active: None,
            trail: Vec::new(),
        }
    }

    /// Make `id` active, pushing the current active id onto the trail first.
    ///
    /// Returns the id that was displaced, if any. Re-activating the current
    /// id displaces nothing. An id already in the trail is lifted out of it
    /// so the trail never repeats the active id.
    pub fn push(&mut self, id: PanelId) -> Option<PanelId> {
        if self.active.as_ref() == Some(&id) {
            return None;
        }
        self.trail.retain(|entry| entry != &id);
        let previous = self.active.replace(id);
        if let Some(prev) = &previous {
            self.trail.push(prev.clone());
        }
        previous
    }

    /// Replace the active id with the most recent trail entry.
    ///
    /// Returns the newly active id. With an empty trail the stack empties.
    pub fn pop(&mut self) -> Option<&PanelId> {
        self.active = self.trail.pop();
        self.active.as_ref()
    }

    /// Currently active id.
    #[inline]
    #[must_use]
    pub fn active(&self) -> Option<&PanelId> {
        self.active.as_ref()
    }

    /// Trail of previously active ids, most recent last.
    #[inline]
    #[must_use]
    pub fn trail(&self) -> &[PanelId] {
        &self.trail
    }

    /// Whether the page lock is engaged.
    #[inline]
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.active.is_some()
    }

    /// Number of open entries (active plus trail).
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.trail.len() + usize::from(self.active.is_some())
    }

    /// Owned copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> StackSnapshot {
        StackSnapshot {
            active: self.active.clone(),
            trail: self.trail.clone(),
            locked: self.is_locked(),
        }
    }
}

/// Point-in-time view of a [`PanelStack`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StackSnapshot {
    pub active: Option<PanelId>,
    pub trail: Vec<PanelId>,
    pub locked: bool,
}
