//! # ClipStash CLI Architecture
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this
//! file only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/clipstashapp/`: the store library, UI-agnostic
//! - `crates/clipstash/`: this CLI, one client of that library
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/clipstash/src/cli/)                      │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Config, logging, dispatch (commands.rs)                  │
//! │  - Terminal rendering (render.rs, styles.rs)                │
//! │  - Clipboard access for capture and copy (clipboard.rs)     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/clipstashapp/src/api.rs)                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command + Storage Layers (crates/clipstashapp/src/...)     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything from `api.rs` inward takes and returns plain Rust values. The
//! CLI owns every user-facing concern: argument parsing, reading stdin or the
//! clipboard, rendering, and exit codes.
//!
//! ## Testing Approach
//!
//! - Rendering helpers are pure functions returning `String`, unit tested in
//!   `render.rs`.
//! - `tests/cli.rs` drives the built binary with `assert_cmd` against a
//!   temporary `--data` directory.

mod cli;
mod clipboard;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
