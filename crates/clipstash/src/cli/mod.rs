//! # CLI Behavior
//!
//! This is **one possible client** for clipstash, not the application itself.
//! It plays two roles at once: the capture side (turning clipboard or stdin
//! content into a [`Capture`](clipstashapp::model::Capture)) and the
//! presentation side (listing, searching, tagging).
//!
//! ## Naked Execution (`clipstash`)
//!
//! Running `clipstash` with no arguments lists the history.
//!
//! ## Capture Sources (`clipstash add`)
//!
//! 1. `--image FILE`: the file bytes become a data URL, hashed with SHA-256
//! 2. `--html FILE`: the file is the HTML payload; TEXT (or the markup with
//!    tags stripped) is the plain fallback
//! 3. TEXT arguments, joined with spaces
//! 4. Piped stdin
//! 5. The system clipboard
//!
//! A blank capture is reported, not treated as an error.
//!
//! ## Referring to Entries
//!
//! Commands taking an `ID` accept the record id or its 1-based position in
//! `clipstash list`.
//!
//! ## Module Structure
//!
//! - `commands`: run loop, config + logging setup, per-command handlers
//! - `render`: output formatting
//! - `setup`: argument parsing via clap
//! - `styles`: terminal styles

mod commands;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
