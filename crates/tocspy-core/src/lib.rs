//! tocspy Core Library
//!
//! Heading tree model, active-section tracking and navigation model for
//! article tables of contents.
//!
//! The crate is framework-free: browser capabilities are reached through the
//! [`Environment`] trait, and every state change is an explicit transition on
//! [`TocState`].

pub mod config;
pub mod environment;
pub mod error;
pub mod heading;
pub mod nav;
pub mod state;
pub mod tracker;

pub use config::{Config, MarkdownSettings, NavSettings, TrackerSettings};
pub use environment::{Environment, Headless, LinkEvent, VisibilityChange, VisibilitySink};
pub use error::{CoreError, Result};
pub use heading::{FlatCache, FlatHeadingRef, HeadingNode, HeadingTree, anchor_id, flatten};
pub use nav::{NavEntry, build_nav, render_html};
pub use state::{ActiveState, Crossing, Generation, TocState, TrackerPhase};
pub use tracker::Tracker;
