//! # mstyle
//!
//! A style checker and auto-formatter for `.m` source files — a
//! MATLAB/Octave-like dynamic, array-oriented scientific language.
//!
//! ## Features
//!
//! - A three-stage pipeline: whole-file rules, stateful per-line rules, and
//!   a token-buffer analyzer for punctuation, keyword, operator, comment,
//!   continuation, and indentation checks
//! - **Automatic fixing** via a token-buffer replayer that honors directive
//!   precedence
//! - **Configuration** via JSON, YAML, or TOML files, with `extends` chains
//!   and named presets
//! - **Justification markers** (`mh:ignore_style`) to suppress diagnostics
//!   on a line
//! - **Async and sync APIs** for flexible integration
//! - **Parallel file processing** via `rayon`
//!
//! ## Quick Start
//!
//! ### Sync API
//!
//! ```rust,no_run
//! use mstyle::{analyze, AnalyzeOptions};
//!
//! let options = AnalyzeOptions::new().with_file("script.m");
//! let results = analyze(&options)?;
//! for report in &results.reports {
//!     for d in &report.diagnostics {
//!         println!("{}", d);
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ### Async API (requires `async` feature)
//!
//! ```rust,ignore
//! use mstyle::{analyze_async, AnalyzeOptions};
//!
//! # tokio_test::block_on(async {
//! let options = AnalyzeOptions::new().with_file("script.m");
//! let results = analyze_async(&options).await?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! # })
//! ```
//!
//! ## Configuration
//!
//! ```json
//! {
//!   "default": true,
//!   "line_length": 100,
//!   "indentation": {
//!     "indent_width": 4
//!   }
//! }
//! ```
//!
//! ## Justification Markers
//!
//! A Style diagnostic on a given line can be suppressed with a trailing
//! comment:
//!
//! ```text
//! x=1;  % mh:ignore_style
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod engine;
pub mod formatters;
pub mod lexer;
pub mod parser;
pub mod replay;
pub mod rules;
pub mod stage3;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;

// Re-export main types and functions
pub use config::{Config, ConfigParser, RuleConfig};
pub use engine::analyze;
pub use types::{AnalysisResults, AnalyzeOptions, Diagnostic, FileReport, Severity};

#[cfg(feature = "async")]
pub use engine::analyze_async;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the library version.
pub fn version() -> &'static str {
    VERSION
}
