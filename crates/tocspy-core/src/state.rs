//! Active-section state and its transitions.
//!
//! [`TocState`] is the explicit record behind the tracker. Every event the
//! page can produce maps to one method here, so the whole state machine can
//! be driven without a browser or a UI framework.

use std::collections::HashSet;

use crate::heading::FlatHeadingRef;

/// Tree-reset counter stamped on every visibility notification.
pub type Generation = u64;

/// Lifecycle of the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackerPhase {
    /// No targets observed yet.
    #[default]
    Uninitialized,
    /// Targets registered, notifications are applied.
    Tracking,
    /// All observation released, notifications are ignored.
    Disposed,
}

/// State shared with the navigation renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveState {
    /// Id of the highlighted heading.
    pub active_id: Option<String>,

    /// Whether the navigation panel is open.
    pub is_expanded: bool,
}

/// A visibility notification bound to the generation it was registered under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crossing {
    /// Generation of the observation that produced this notification.
    pub generation: Generation,

    /// Id of the heading element.
    pub id: String,

    /// Whether the element entered the visibility region.
    pub is_intersecting: bool,
}

/// Explicit tracker state record.
#[derive(Debug, Default)]
pub struct TocState {
    phase: TrackerPhase,
    generation: Generation,
    headings: Vec<FlatHeadingRef>,
    known: HashSet<String>,
    visible: HashSet<String>,
    active: ActiveState,
    clear_when_hidden: bool,
}

impl TocState {
    /// Create an uninitialized state.
    pub fn new(clear_when_hidden: bool) -> Self {
        Self {
            clear_when_hidden,
            ..Self::default()
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> TrackerPhase {
        self.phase
    }

    /// Current generation.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Flattened headings of the current tree.
    pub fn headings(&self) -> &[FlatHeadingRef] {
        &self.headings
    }

    /// Renderer-facing snapshot.
    pub fn active(&self) -> &ActiveState {
        &self.active
    }

    /// Highlighted heading id.
    pub fn active_id(&self) -> Option<&str> {
        self.active.active_id.as_deref()
    }

    /// Whether the navigation panel is open.
    pub fn is_expanded(&self) -> bool {
        self.active.is_expanded
    }

    /// Whether `id` belongs to the current heading list.
    pub fn contains(&self, id: &str) -> bool {
        self.known.contains(id)
    }

    /// Replace the heading list after a tree change.
    ///
    /// Starts a new generation, so notifications from the previous target set
    /// no longer apply. The active id is cleared; the new observation sets it
    /// again once a heading crosses into view.
    pub fn reset(&mut self, headings: Vec<FlatHeadingRef>) -> Generation {
        self.generation += 1;
        self.known = headings.iter().map(|h| h.id.clone()).collect();
        self.headings = headings;
        self.visible.clear();
        self.phase = TrackerPhase::Uninitialized;
        self.active.active_id = None;

        self.generation
    }

    /// Mark observation as established for the current generation.
    pub fn begin_tracking(&mut self) {
        if !self.headings.is_empty() {
            self.phase = TrackerPhase::Tracking;
        }
    }

    /// Apply a visibility notification.
    ///
    /// Returns `true` when the active id changed. Notifications outside
    /// [`TrackerPhase::Tracking`], from an older generation, or for an
    /// unknown id are ignored.
    pub fn apply(&mut self, crossing: &Crossing) -> bool {
        if self.phase != TrackerPhase::Tracking
            || crossing.generation != self.generation
            || !self.known.contains(&crossing.id)
        {
            return false;
        }

        if crossing.is_intersecting {
            self.visible.insert(crossing.id.clone());
            if self.active_id() == Some(crossing.id.as_str()) {
                return false;
            }
            self.active.active_id = Some(crossing.id.clone());
            return true;
        }

        self.visible.remove(&crossing.id);
        if self.clear_when_hidden && self.visible.is_empty() && self.active.active_id.is_some() {
            self.active.active_id = None;
            return true;
        }
        false
    }

    /// Release everything. Idempotent.
    ///
    /// Returns `true` when an active id was cleared.
    pub fn dispose(&mut self) -> bool {
        self.phase = TrackerPhase::Disposed;
        self.visible.clear();
        self.active.active_id.take().is_some()
    }

    /// Flip the panel and return the new value.
    pub fn toggle_expanded(&mut self) -> bool {
        self.active.is_expanded = !self.active.is_expanded;
        self.active.is_expanded
    }

    /// Open or close the panel.
    pub fn set_expanded(&mut self, expanded: bool) {
        self.active.is_expanded = expanded;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refs(ids: &[&str]) -> Vec<FlatHeadingRef> {
        ids.iter()
            .map(|id| FlatHeadingRef {
                id: (*id).to_string(),
                anchor: format!("#{id}"),
            })
            .collect()
    }

    fn tracking(ids: &[&str], clear_when_hidden: bool) -> TocState {
        let mut state = TocState::new(clear_when_hidden);
        state.reset(refs(ids));
        state.begin_tracking();
        state
    }

    fn crossing(state: &TocState, id: &str, is_intersecting: bool) -> Crossing {
        Crossing {
            generation: state.generation(),
            id: id.to_string(),
            is_intersecting,
        }
    }

    #[test]
    fn test_initial_state() {
        let state = TocState::default();
        assert_eq!(state.phase(), TrackerPhase::Uninitialized);
        assert_eq!(state.generation(), 0);
        assert!(state.active_id().is_none());
        assert!(!state.is_expanded());
    }

    #[test]
    fn test_last_crossing_wins() {
        let mut state = tracking(&["intro", "usage", "faq"], false);

        assert!(state.apply(&crossing(&state, "usage", true)));
        assert!(state.apply(&crossing(&state, "intro", true)));
        assert_eq!(state.active_id(), Some("intro"));

        // Repeating the current id is not a change.
        assert!(!state.apply(&crossing(&state, "intro", true)));
    }

    #[test]
    fn test_leaving_keeps_active_by_default() {
        let mut state = tracking(&["intro", "usage"], false);
        state.apply(&crossing(&state, "usage", true));

        assert!(!state.apply(&crossing(&state, "usage", false)));
        assert_eq!(state.active_id(), Some("usage"));
    }

    #[test]
    fn test_clear_when_hidden() {
        let mut state = tracking(&["intro", "usage"], true);
        state.apply(&crossing(&state, "intro", true));
        state.apply(&crossing(&state, "usage", true));

        assert!(!state.apply(&crossing(&state, "intro", false)));
        assert_eq!(state.active_id(), Some("usage"));

        assert!(state.apply(&crossing(&state, "usage", false)));
        assert!(state.active_id().is_none());
    }

    #[test]
    fn test_unknown_id_ignored() {
        let mut state = tracking(&["intro"], false);
        assert!(!state.apply(&crossing(&state, "footer", true)));
        assert!(state.active_id().is_none());
    }

    #[test]
    fn test_stale_generation_ignored() {
        let mut state = tracking(&["intro", "usage"], false);
        let old = crossing(&state, "usage", true);

        state.reset(refs(&["intro", "usage"]));
        state.begin_tracking();

        assert!(!state.apply(&old));
        assert!(state.active_id().is_none());
    }

    #[test]
    fn test_reset_discards_missing_active_id() {
        let mut state = tracking(&["intro", "usage"], false);
        state.apply(&crossing(&state, "usage", true));

        state.reset(refs(&["changelog"]));
        assert!(state.active_id().is_none());
        assert_eq!(state.phase(), TrackerPhase::Uninitialized);
        assert!(state.contains("changelog"));
        assert!(!state.contains("usage"));
    }

    #[test]
    fn test_reset_clears_surviving_active_id() {
        let mut state = tracking(&["intro", "usage"], false);
        state.apply(&crossing(&state, "usage", true));

        state.reset(refs(&["usage", "faq"]));
        assert!(state.active_id().is_none());
        assert_eq!(state.phase(), TrackerPhase::Uninitialized);

        state.begin_tracking();
        assert!(state.apply(&crossing(&state, "usage", true)));
        assert_eq!(state.active_id(), Some("usage"));
    }

    #[test]
    fn test_begin_tracking_requires_headings() {
        let mut state = TocState::default();
        state.reset(Vec::new());
        state.begin_tracking();
        assert_eq!(state.phase(), TrackerPhase::Uninitialized);
    }

    #[test]
    fn test_notifications_ignored_before_tracking() {
        let mut state = TocState::default();
        state.reset(refs(&["intro"]));
        assert!(!state.apply(&crossing(&state, "intro", true)));
    }

    #[test]
    fn test_dispose_idempotent() {
        let mut state = tracking(&["intro"], false);
        state.apply(&crossing(&state, "intro", true));

        assert!(state.dispose());
        assert!(!state.dispose());
        assert_eq!(state.phase(), TrackerPhase::Disposed);
        assert!(state.active_id().is_none());

        assert!(!state.apply(&crossing(&state, "intro", true)));
        assert!(state.active_id().is_none());
    }

    #[test]
    fn test_toggle_does_not_touch_active_id() {
        let mut state = tracking(&["intro"], false);
        state.apply(&crossing(&state, "intro", true));

        assert!(state.toggle_expanded());
        assert_eq!(state.active_id(), Some("intro"));
        assert!(!state.toggle_expanded());

        state.set_expanded(true);
        state.apply(&crossing(&state, "intro", false));
        assert!(state.is_expanded());
        assert_eq!(
            state.active(),
            &ActiveState {
                active_id: Some("intro".to_string()),
                is_expanded: true,
            }
        );
    }
}
