//! Terminal styles.
//!
//! Styles are semantic: code asks for `TIME` or `PINNED`, never for a color.
//! `console` drops the escapes on its own when stdout is not a terminal.

use console::Style;
use once_cell::sync::Lazy;

pub static INDEX: Lazy<Style> = Lazy::new(Style::new);
pub static INDEX_PINNED: Lazy<Style> = Lazy::new(|| Style::new().yellow());
pub static PINNED: Lazy<Style> = Lazy::new(|| Style::new().yellow());
pub static TIME: Lazy<Style> = Lazy::new(|| Style::new().color256(246).italic());
pub static KIND: Lazy<Style> = Lazy::new(|| Style::new().color256(246));
pub static TAG: Lazy<Style> = Lazy::new(|| Style::new().cyan());
pub static TITLE: Lazy<Style> = Lazy::new(|| Style::new().bold());
pub static MUTED: Lazy<Style> = Lazy::new(|| Style::new().dim());
pub static SUCCESS: Lazy<Style> = Lazy::new(|| Style::new().green());
pub static WARNING: Lazy<Style> = Lazy::new(|| Style::new().yellow());
