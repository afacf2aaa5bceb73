//! Tag support for clipstash.
//!
//! Tags are short free-form labels attached to a record. Unlike the record
//! store, which stores whatever list it is handed, this module is where tag
//! input gets checked before it reaches the store.
//!
//! ## Tag Rules
//!
//! See [`validation`] for details. In summary:
//! - Surrounding whitespace is trimmed
//! - Must not be empty after trimming
//! - At most 20 characters
//! - Case-sensitive: `Work` and `work` are different tags

pub mod validation;

pub use validation::{normalize_tags, validate_tag, TagValidationError, MAX_TAG_CHARS};
