//! Browser implementation of the tracker environment.
//!
//! Visibility comes from an `IntersectionObserver` whose root margin narrows
//! the viewport to a band near the top; navigation uses smooth
//! `scrollIntoView`.

use tocspy_core::{Environment, LinkEvent, TrackerSettings, VisibilityChange, VisibilitySink};
use wasm_bindgen::{JsCast, prelude::*};

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>;

/// Page environment backed by `web_sys`.
pub struct BrowserEnvironment {
    document: Option<web_sys::Document>,
    root_margin: String,
    threshold: f64,
}

impl BrowserEnvironment {
    /// Use the current document, if there is one.
    ///
    /// Outside a browser (server rendering, native tests) the environment is
    /// non-interactive and the tracker stays idle.
    pub fn detect(settings: &TrackerSettings) -> Self {
        Self {
            document: current_document(),
            root_margin: settings.root_margin.clone(),
            threshold: settings.threshold,
        }
    }

    /// Environment that never observes anything.
    pub fn detached(settings: &TrackerSettings) -> Self {
        Self {
            document: None,
            root_margin: settings.root_margin.clone(),
            threshold: settings.threshold,
        }
    }

    /// Root margin handed to the observer.
    pub fn root_margin(&self) -> &str {
        &self.root_margin
    }
}

#[cfg(target_arch = "wasm32")]
fn current_document() -> Option<web_sys::Document> {
    web_sys::window().and_then(|window| window.document())
}

#[cfg(not(target_arch = "wasm32"))]
fn current_document() -> Option<web_sys::Document> {
    None
}

/// A live `IntersectionObserver` and the closure it calls.
pub struct VisibilityObservation {
    observer: web_sys::IntersectionObserver,
    _callback: ObserverCallback,
}

impl Environment for BrowserEnvironment {
    type Element = web_sys::Element;
    type Observation = VisibilityObservation;

    fn is_interactive(&self) -> bool {
        self.document.is_some()
    }

    fn find_element_by_id(&self, id: &str) -> Option<web_sys::Element> {
        self.document.as_ref()?.get_element_by_id(id)
    }

    fn observe_visibility(
        &mut self,
        targets: Vec<(String, web_sys::Element)>,
        sink: VisibilitySink,
    ) -> Option<VisibilityObservation> {
        let callback = ObserverCallback::new(
            move |entries: js_sys::Array, _observer: web_sys::IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: web_sys::IntersectionObserverEntry = entry.unchecked_into();
                    sink(VisibilityChange {
                        id: entry.target().id(),
                        is_intersecting: entry.is_intersecting(),
                    });
                }
            },
        );

        let options = web_sys::IntersectionObserverInit::new();
        options.set_root_margin(&self.root_margin);
        options.set_threshold(&JsValue::from_f64(self.threshold));

        let observer = match web_sys::IntersectionObserver::new_with_options(
            callback.as_ref().unchecked_ref(),
            &options,
        ) {
            Ok(observer) => observer,
            Err(e) => {
                tracing::warn!(error = ?e, "failed to create IntersectionObserver");
                return None;
            }
        };

        for (_, element) in &targets {
            observer.observe(element);
        }

        Some(VisibilityObservation {
            observer,
            _callback: callback,
        })
    }

    fn release(&mut self, observation: VisibilityObservation) {
        observation.observer.disconnect();
    }

    fn scroll_into_view(&self, id: &str) -> bool {
        let Some(element) = self.find_element_by_id(id) else {
            return false;
        };

        let options = web_sys::ScrollIntoViewOptions::new();
        options.set_behavior(web_sys::ScrollBehavior::Smooth);
        options.set_block(web_sys::ScrollLogicalPosition::Start);
        element.scroll_into_view_with_scroll_into_view_options(&options);
        true
    }
}

/// A click on a navigation link.
pub struct Click<'a>(pub &'a web_sys::MouseEvent);

impl LinkEvent for Click<'_> {
    fn prevent_default(&self) {
        self.0.prevent_default();
    }
}

#[cfg(test)]
mod tests {
    use tocspy_core::{HeadingNode, HeadingTree, Tracker, TrackerPhase};

    use super::*;

    #[test]
    fn test_native_environment_is_detached() {
        let env = BrowserEnvironment::detect(&TrackerSettings::default());
        assert!(!env.is_interactive());
        assert!(env.find_element_by_id("intro").is_none());
        assert!(!env.scroll_into_view("intro"));
        assert_eq!(env.root_margin(), "0% 0% -80% 0%");
    }

    #[test]
    fn test_detached_tracker_stays_idle() {
        let settings = TrackerSettings::default();
        let mut tracker = Tracker::new(BrowserEnvironment::detached(&settings));
        let tree = HeadingTree::new(vec![HeadingNode::new("Intro", "#intro")]);

        assert_eq!(tracker.mount(&tree), 0);
        assert_eq!(tracker.phase(), TrackerPhase::Uninitialized);
        assert!(!tracker.navigate("#intro"));
        assert!(tracker.active_id().is_none());
    }
}
