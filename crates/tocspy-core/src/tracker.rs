//! Active-section tracker.
//!
//! Owns the observation handles for the mounted heading list and routes
//! visibility notifications into [`TocState`].

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use crate::{
    config::TrackerSettings,
    environment::{Environment, LinkEvent, VisibilityChange, VisibilitySink},
    heading::{FlatCache, FlatHeadingRef, HeadingTree, anchor_id},
    state::{ActiveState, Crossing, Generation, TocState, TrackerPhase},
};

type Listener = Rc<dyn Fn(Option<&str>)>;

/// Keeps the active heading in sync with what the page shows.
pub struct Tracker<E: Environment> {
    env: E,
    state: Rc<RefCell<TocState>>,
    cache: FlatCache,
    observations: Vec<E::Observation>,
    observed: usize,
    listener: Option<Listener>,
}

impl<E: Environment> Tracker<E> {
    /// Create a tracker with default settings.
    pub fn new(env: E) -> Self {
        Self::with_settings(env, &TrackerSettings::default())
    }

    /// Create a tracker with explicit settings.
    pub fn with_settings(env: E, settings: &TrackerSettings) -> Self {
        Self {
            env,
            state: Rc::new(RefCell::new(TocState::new(settings.clear_when_hidden))),
            cache: FlatCache::new(),
            observations: Vec::new(),
            observed: 0,
            listener: None,
        }
    }

    /// Call `listener` with the new active id whenever it changes.
    pub fn on_change(mut self, listener: impl Fn(Option<&str>) + 'static) -> Self {
        self.listener = Some(Rc::new(listener));
        self
    }

    /// Start tracking `tree`, replacing whatever was tracked before.
    ///
    /// Returns the number of observed heading elements. Headings without an
    /// element on the page are skipped. A disposed tracker stays disposed and
    /// observes nothing.
    pub fn mount(&mut self, tree: &HeadingTree) -> usize {
        if self.phase() == TrackerPhase::Disposed {
            tracing::debug!("mount on a disposed tracker ignored");
            return 0;
        }

        let changed = self.cache.refresh(tree);
        if !changed && self.phase() == TrackerPhase::Tracking {
            return self.observed;
        }

        self.release_all();
        let headings = self.cache.current().to_vec();
        let before = self.active_id();
        let generation = self.state.borrow_mut().reset(headings.clone());
        if self.active_id() != before {
            self.emit();
        }

        if !self.env.is_interactive() {
            tracing::debug!("non-interactive environment, heading tracking disabled");
            return 0;
        }

        if headings.is_empty() {
            return 0;
        }

        let targets: Vec<_> = headings
            .iter()
            .filter_map(|heading| match self.env.find_element_by_id(&heading.id) {
                Some(element) => Some((heading.id.clone(), element)),
                None => {
                    tracing::debug!(id = %heading.id, "heading element not found, skipping");
                    None
                }
            })
            .collect();

        if targets.is_empty() {
            return 0;
        }

        let count = targets.len();
        let Some(observation) = self.env.observe_visibility(targets, self.sink(generation)) else {
            tracing::warn!("visibility observation unavailable");
            return 0;
        };

        self.observations.push(observation);
        self.observed = count;
        self.state.borrow_mut().begin_tracking();
        tracing::debug!(
            generation,
            observed = count,
            skipped = headings.len() - count,
            "heading tracker mounted"
        );
        count
    }

    /// Scroll the heading behind `anchor` into view.
    ///
    /// The active id is left alone; the scroll itself produces the crossing
    /// that updates it.
    pub fn navigate(&self, anchor: &str) -> bool {
        if self.phase() == TrackerPhase::Disposed || !self.env.is_interactive() {
            return false;
        }
        self.env.scroll_into_view(anchor_id(anchor))
    }

    /// Handle a click on a navigation link.
    pub fn activate_link(&self, anchor: &str, event: &impl LinkEvent) -> bool {
        event.prevent_default();
        self.navigate(anchor)
    }

    /// Flip the navigation panel and return the new value.
    pub fn toggle_expanded(&self) -> bool {
        self.state.borrow_mut().toggle_expanded()
    }

    /// Open or close the navigation panel.
    pub fn set_expanded(&self, expanded: bool) {
        self.state.borrow_mut().set_expanded(expanded);
    }

    /// Release every observation and clear the active id. Idempotent.
    pub fn dispose(&mut self) {
        self.release_all();
        self.cache.clear();
        let cleared = self.state.borrow_mut().dispose();
        if cleared {
            self.emit();
        }
    }

    /// Highlighted heading id.
    pub fn active_id(&self) -> Option<String> {
        self.state.borrow().active_id().map(str::to_owned)
    }

    /// Whether the navigation panel is open.
    pub fn is_expanded(&self) -> bool {
        self.state.borrow().is_expanded()
    }

    /// Renderer-facing snapshot.
    pub fn snapshot(&self) -> ActiveState {
        self.state.borrow().active().clone()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> TrackerPhase {
        self.state.borrow().phase()
    }

    /// Flattened headings of the mounted tree.
    pub fn headings(&self) -> Vec<FlatHeadingRef> {
        self.state.borrow().headings().to_vec()
    }

    /// Number of observed heading elements.
    pub fn observed(&self) -> usize {
        self.observed
    }

    fn sink(&self, generation: Generation) -> VisibilitySink {
        let state = Rc::downgrade(&self.state);
        let listener = self.listener.clone();
        Rc::new(move |change: VisibilityChange| {
            deliver(&state, listener.as_ref(), generation, change);
        })
    }

    fn release_all(&mut self) {
        let released = self.observations.len();
        for observation in self.observations.drain(..) {
            self.env.release(observation);
        }
        self.observed = 0;
        if released > 0 {
            tracing::debug!(released, "released heading observations");
        }
    }

    fn emit(&self) {
        if let Some(listener) = &self.listener {
            let active = self.active_id();
            listener(active.as_deref());
        }
    }
}

impl<E: Environment> Drop for Tracker<E> {
    fn drop(&mut self) {
        self.release_all();
    }
}

fn deliver(
    state: &Weak<RefCell<TocState>>,
    listener: Option<&Listener>,
    generation: Generation,
    change: VisibilityChange,
) {
    let Some(state) = state.upgrade() else {
        return;
    };

    let crossing = Crossing {
        generation,
        id: change.id,
        is_intersecting: change.is_intersecting,
    };

    let changed = state.borrow_mut().apply(&crossing);
    if !changed {
        return;
    }
    if let Some(listener) = listener {
        let active = state.borrow().active_id().map(str::to_owned);
        listener(active.as_deref());
    }
}
