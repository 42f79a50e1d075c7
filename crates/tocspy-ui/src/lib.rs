//! tocspy UI Components
//!
//! Leptos components for article tables of contents.
//!
//! # Components
//!
//! - [`TableOfContents`] - Collapsible nested heading list with active-section highlighting
//!
//! # Tracking
//!
//! - [`use_heading_tracker`] - Mounts a tracker for a heading tree signal
//! - [`BrowserEnvironment`] - `IntersectionObserver` and `scrollIntoView` backed environment
//!
//! # Example
//!
//! ```ignore
//! use leptos::prelude::*;
//! use tocspy_core::{HeadingNode, HeadingTree};
//! use tocspy_ui::TableOfContents;
//!
//! #[component]
//! fn Sidebar() -> impl IntoView {
//!     let tree = HeadingTree::new(vec![
//!         HeadingNode::new("Install", "#install"),
//!         HeadingNode::new("Usage", "#usage"),
//!     ]);
//!
//!     view! { <TableOfContents tree=tree /> }
//! }
//! ```

pub mod browser;
pub mod toc;
pub mod tracking;

pub use browser::{BrowserEnvironment, Click, VisibilityObservation};
pub use toc::TableOfContents;
pub use tracking::{HeadingTracker, use_heading_tracker};
