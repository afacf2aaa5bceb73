//! System clipboard access through the platform's command-line tools.
//!
//! Each platform has an ordered list of helpers; the first one that can be
//! spawned wins.
//!
//! | Platform | Read | Write |
//! |----------|------|-------|
//! | macOS | `pbpaste` | `pbcopy` |
//! | Linux | `xclip`, `xsel`, `wl-paste` | `xclip`, `xsel`, `wl-copy` |
//! | Windows | `powershell Get-Clipboard` | `clip` |

use clipstashapp::error::{ClipError, Result};
use std::io::Write;
use std::process::{Command, Stdio};

type Helper = (&'static str, &'static [&'static str]);

#[cfg(target_os = "macos")]
const READERS: &[Helper] = &[("pbpaste", &[])];
#[cfg(target_os = "macos")]
const WRITERS: &[Helper] = &[("pbcopy", &[])];

#[cfg(target_os = "linux")]
const READERS: &[Helper] = &[
    ("xclip", &["-selection", "clipboard", "-o"]),
    ("xsel", &["--clipboard", "--output"]),
    ("wl-paste", &["--no-newline"]),
];
#[cfg(target_os = "linux")]
const WRITERS: &[Helper] = &[
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("wl-copy", &[]),
];

#[cfg(target_os = "windows")]
const READERS: &[Helper] = &[("powershell", &["-command", "Get-Clipboard"])];
#[cfg(target_os = "windows")]
const WRITERS: &[Helper] = &[("clip", &[])];

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
const READERS: &[Helper] = &[];
#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
const WRITERS: &[Helper] = &[];

fn helper_names(helpers: &[Helper]) -> String {
    helpers
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ")
}

fn unavailable(helpers: &[Helper]) -> ClipError {
    if helpers.is_empty() {
        ClipError::Api("Clipboard not supported on this platform".to_string())
    } else {
        ClipError::Api(format!(
            "No clipboard helper found. Install one of: {}",
            helper_names(helpers)
        ))
    }
}

/// Read the clipboard as text.
pub fn get_from_clipboard() -> Result<String> {
    for (program, args) in READERS {
        let output = match Command::new(program).args(*args).output() {
            Ok(output) => output,
            Err(e) => {
                tracing::debug!(program, error = %e, "clipboard reader unavailable");
                continue;
            }
        };
        if !output.status.success() {
            tracing::debug!(program, status = %output.status, "clipboard reader failed");
            continue;
        }
        return String::from_utf8(output.stdout)
            .map_err(|e| ClipError::Api(format!("Invalid UTF-8 in clipboard: {}", e)));
    }
    Err(unavailable(READERS))
}

/// Replace the clipboard contents with `text`.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    for (program, args) in WRITERS {
        let mut child = match Command::new(program).args(*args).stdin(Stdio::piped()).spawn() {
            Ok(child) => child,
            Err(e) => {
                tracing::debug!(program, error = %e, "clipboard writer unavailable");
                continue;
            }
        };
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .map_err(|e| ClipError::Api(format!("Failed to write to {}: {}", program, e)))?;
        }
        let status = child
            .wait()
            .map_err(|e| ClipError::Api(format!("Failed to wait for {}: {}", program, e)))?;
        if status.success() {
            return Ok(());
        }
        tracing::debug!(program, %status, "clipboard writer failed");
    }
    Err(unavailable(WRITERS))
}
