//! tocspy CLI Library
//!
//! Command implementations for the `tocspy` binary. The binary entry point
//! only parses arguments and dispatches here.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (extract, render, check)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use tocspy::cmd;
//! use tocspy_core::Config;
//!
//! // Print the heading tree of an article
//! cmd::extract::run(Path::new("content/posts/hello.md"), false, &Config::default()).unwrap();
//! ```

pub mod cmd;

pub use tocspy_core::{Config, HeadingTree};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
///
/// # Example
///
/// ```no_run
/// tocspy::init_tracing(2); // Enable DEBUG level logging
/// ```
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
