//! Reactive wrapper around the heading tracker.

use leptos::prelude::*;
use tocspy_core::{HeadingTree, Tracker, TrackerSettings};

use crate::browser::{BrowserEnvironment, Click};

/// Handle to a mounted heading tracker.
///
/// Copyable, so it can be passed down to every navigation entry.
#[derive(Clone, Copy)]
pub struct HeadingTracker {
    tracker: StoredValue<Tracker<BrowserEnvironment>, LocalStorage>,
    active_id: RwSignal<Option<String>>,
    expanded: RwSignal<bool>,
}

/// Track the active heading of `tree` for the lifetime of the current owner.
///
/// The tracker remounts whenever `tree` changes and is disposed on cleanup.
pub fn use_heading_tracker(tree: Signal<HeadingTree>, settings: TrackerSettings) -> HeadingTracker {
    let active_id = RwSignal::new(None::<String>);
    let expanded = RwSignal::new(false);

    let tracker = Tracker::with_settings(BrowserEnvironment::detect(&settings), &settings)
        .on_change(move |id| {
            // Late notifications after unmount land on a disposed signal.
            let _ = active_id.try_set(id.map(str::to_owned));
        });
    let tracker = StoredValue::new_local(tracker);

    // Effects run after the view is mounted, so heading elements exist here.
    Effect::new(move |_| {
        let tree = tree.get();
        tracker.update_value(|t| {
            t.mount(&tree);
        });
    });

    on_cleanup(move || {
        let _ = tracker.try_update_value(|t| t.dispose());
    });

    HeadingTracker {
        tracker,
        active_id,
        expanded,
    }
}

impl HeadingTracker {
    /// Whether the navigation panel is open.
    pub fn expanded(&self) -> Signal<bool> {
        self.expanded.into()
    }

    /// Whether `id` is the highlighted heading.
    pub fn is_active(&self, id: &str) -> bool {
        self.active_id.with(|active| active.as_deref() == Some(id))
    }

    /// Open or close the navigation panel.
    pub fn toggle(&self) {
        if let Some(expanded) = self.tracker.try_update_value(|t| t.toggle_expanded()) {
            self.expanded.set(expanded);
        }
    }

    /// Replace the link's hash jump with a smooth scroll to `anchor`.
    pub fn activate_link(&self, ev: &web_sys::MouseEvent, anchor: &str) -> bool {
        self.tracker
            .try_with_value(|t| t.activate_link(anchor, &Click(ev)))
            .unwrap_or_else(|| {
                ev.prevent_default();
                false
            })
    }
}
