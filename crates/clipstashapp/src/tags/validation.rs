//! Tag validation for clipstash.
//!
//! Valid tags:
//! - Non-empty after trimming
//! - At most [`MAX_TAG_CHARS`] characters (characters, not bytes)

pub const MAX_TAG_CHARS: usize = 20;

/// Validates a single tag and returns its trimmed form.
///
/// # Examples
/// ```
/// use clipstashapp::tags::validation::validate_tag;
///
/// assert_eq!(validate_tag("  work ").unwrap(), "work");
/// assert!(validate_tag("").is_err());
/// assert!(validate_tag("   ").is_err());
/// assert!(validate_tag("a-very-long-tag-name-indeed").is_err());
/// ```
pub fn validate_tag(tag: &str) -> Result<&str, TagValidationError> {
    let trimmed = tag.trim();
    if trimmed.is_empty() {
        return Err(TagValidationError::Empty);
    }
    let len = trimmed.chars().count();
    if len > MAX_TAG_CHARS {
        return Err(TagValidationError::TooLong(len));
    }
    Ok(trimmed)
}

/// Turns raw tag input into a list the store can take as-is:
/// each tag trimmed, blanks dropped, the rest validated, repeats dropped
/// (first occurrence wins).
pub fn normalize_tags<I, S>(tags: I) -> Result<Vec<String>, TagValidationError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = match validate_tag(tag.as_ref()) {
            Ok(tag) => tag,
            Err(TagValidationError::Empty) => continue,
            Err(e) => return Err(e),
        };
        if !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    Ok(out)
}

/// Error type for tag validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValidationError {
    /// Tag is empty or whitespace only
    Empty,
    /// Tag is longer than [`MAX_TAG_CHARS`]; carries the actual length
    TooLong(usize),
}

impl std::fmt::Display for TagValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TagValidationError::Empty => write!(f, "tag cannot be empty"),
            TagValidationError::TooLong(len) => write!(
                f,
                "tag is {} characters long (max {})",
                len, MAX_TAG_CHARS
            ),
        }
    }
}

impl std::error::Error for TagValidationError {}
