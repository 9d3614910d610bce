//! Snippet Core - assembles runnable Synvert snippets
//!
//! Given a transformation body, a file glob and optional runtime/dependency
//! version constraints, this library renders a complete Synvert script in the
//! dialect of the chosen language: the Ruby DSL for `ruby`, the JavaScript DSL
//! for `javascript` and `typescript`.
//!
//! # Architecture
//!
//! - **Layer 1: Rendering** - language resolution, constraint parsing and
//!   dialect templates; pure and synchronous
//! - **Layer 2: Session and providers** - copy-on-write editing state and the
//!   async seam to the remote snippet generator
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage
//!
//! ```
//! use snippet_core::{assemble, SnippetRequest};
//!
//! let request = SnippetRequest {
//!     runtime_version: "3.1.2".to_string(),
//!     ..SnippetRequest::new("ruby")
//! };
//! let snippet = assemble(&request).unwrap();
//! assert!(snippet.text().starts_with("Synvert::Rewriter.execute do"));
//! ```

pub mod assembler;
pub mod constraint;
pub mod dialect;
pub mod error;
pub mod language;
pub mod provider;
pub mod session;
pub mod source;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use assembler::{assemble, combine, render_or_empty, RenderedSnippet, SnippetRequest};
pub use constraint::VersionConstraint;
pub use error::{Result, SnippetError};
pub use language::{resolve, Language, LanguageFamily};
pub use provider::{BodyProvider, GenerateRequest, HttpBodyProvider, ParseRequest};
pub use session::{ExamplePairs, SnippetSession};
pub use source::read_source;

#[cfg(feature = "tui")]
pub use tui::run;
