//! Capabilities the tracker needs from its host page.

use std::rc::Rc;

/// A heading element entering or leaving the visibility region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityChange {
    /// Id of the observed element.
    pub id: String,

    /// Whether the element is now inside the region.
    pub is_intersecting: bool,
}

impl VisibilityChange {
    /// Element entered the region.
    pub fn entered(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_intersecting: true,
        }
    }

    /// Element left the region.
    pub fn left(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_intersecting: false,
        }
    }
}

/// Callback receiving visibility notifications.
pub type VisibilitySink = Rc<dyn Fn(VisibilityChange)>;

/// Page capabilities used by the tracker.
///
/// The browser implementation lives in `tocspy-ui`; tests supply fakes.
pub trait Environment {
    /// Handle to an element on the page.
    type Element;

    /// Handle to a registered observation, released with [`Environment::release`].
    type Observation;

    /// Whether the page has a viewport to observe at all.
    fn is_interactive(&self) -> bool {
        true
    }

    /// Look up an element by id.
    fn find_element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Start reporting visibility changes of `targets` to `sink`.
    ///
    /// `None` means the observation could not be established.
    fn observe_visibility(
        &mut self,
        targets: Vec<(String, Self::Element)>,
        sink: VisibilitySink,
    ) -> Option<Self::Observation>;

    /// Stop an observation. No notification may reach its sink afterwards.
    fn release(&mut self, observation: Self::Observation);

    /// Smooth-scroll the element with `id` to the top of its container.
    ///
    /// Returns `false` when the element does not exist.
    fn scroll_into_view(&self, id: &str) -> bool;
}

/// Environment for non-interactive render passes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Headless;

impl Environment for Headless {
    type Element = ();
    type Observation = ();

    fn is_interactive(&self) -> bool {
        false
    }

    fn find_element_by_id(&self, _id: &str) -> Option<()> {
        None
    }

    fn observe_visibility(&mut self, _targets: Vec<(String, ())>, _sink: VisibilitySink) -> Option<()> {
        None
    }

    fn release(&mut self, _observation: ()) {}

    fn scroll_into_view(&self, _id: &str) -> bool {
        false
    }
}

/// A link activation whose default navigation can be cancelled.
pub trait LinkEvent {
    /// Cancel the browser's own hash navigation.
    fn prevent_default(&self);
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[test]
    fn test_visibility_change_constructors() {
        assert!(VisibilityChange::entered("intro").is_intersecting);
        let left = VisibilityChange::left("intro");
        assert_eq!(left.id, "intro");
        assert!(!left.is_intersecting);
    }

    #[test]
    fn test_headless_observes_nothing() {
        let mut env = Headless;
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink_seen = Rc::clone(&seen);
        let sink: VisibilitySink = Rc::new(move |change| sink_seen.borrow_mut().push(change));

        assert!(!env.is_interactive());
        assert!(env.find_element_by_id("intro").is_none());
        assert!(env.observe_visibility(vec![("intro".into(), ())], sink).is_none());
        assert!(!env.scroll_into_view("intro"));
        assert!(seen.borrow().is_empty());
    }
}
