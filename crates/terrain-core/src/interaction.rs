//! Hover and selection state for the terrain.
//!
//! Points are identified by their index in the laid-out terrain. Pointer
//! events are applied in arrival order and the last one wins. Once a point
//! is selected, hover traffic no longer changes the state: only `Close`
//! clears a selection, and clicking another point replaces it.

use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "point", rename_all = "snake_case")]
pub enum InteractionState {
    #[default]
    Idle,
    Hovering(usize),
    Selected(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEvent {
    Enter(usize),
    Leave(usize),
    Click(usize),
    Close,
}

impl InteractionState {
    /// Next state after `event`. Events naming a point outside
    /// `0..point_count` are ignored.
    pub fn apply(self, event: PointerEvent, point_count: usize) -> Self {
        use InteractionState::*;
        use PointerEvent::*;

        let in_range = |p: usize| p < point_count;
        match (self, event) {
            (Idle | Hovering(_), Enter(p)) if in_range(p) => Hovering(p),
            (Hovering(p), Leave(q)) if p == q => Idle,
            (_, Click(p)) if in_range(p) => Selected(p),
            (Selected(_), Close) => Idle,
            (state, _) => state,
        }
    }

    pub fn hovered(self) -> Option<usize> {
        match self {
            InteractionState::Hovering(p) => Some(p),
            _ => None,
        }
    }

    pub fn selected(self) -> Option<usize> {
        match self {
            InteractionState::Selected(p) => Some(p),
            _ => None,
        }
    }

    /// Point drawn with emphasis, if any.
    pub fn highlighted(self) -> Option<usize> {
        match self {
            InteractionState::Hovering(p) | InteractionState::Selected(p) => Some(p),
            InteractionState::Idle => None,
        }
    }
}

/// Interaction state bound to the size of the terrain it tracks.
#[derive(Clone, Debug, Default)]
pub struct Interaction {
    state: InteractionState,
    point_count: usize,
}

impl Interaction {
    pub fn new(point_count: usize) -> Self {
        Self {
            state: InteractionState::Idle,
            point_count,
        }
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn dispatch(&mut self, event: PointerEvent) -> InteractionState {
        let next = self.state.apply(event, self.point_count);
        if next != self.state {
            tracing::trace!(?event, from = ?self.state, to = ?next, "terrain interaction");
        }
        self.state = next;
        next
    }

    /// Drop any hover or selection and track a freshly laid-out terrain.
    pub fn reset(&mut self, point_count: usize) {
        self.state = InteractionState::Idle;
        self.point_count = point_count;
    }
}
