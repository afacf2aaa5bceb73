use super::styles::{
    INDEX, INDEX_PINNED, KIND, MUTED, PINNED, SUCCESS, TAG, TIME, TITLE, WARNING,
};
use chrono::{DateTime, Utc};
use clipstashapp::commands::stats::format_bytes;
use clipstashapp::commands::StorageStats;
use clipstashapp::model::{CacheRecord, RecordKind};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const PIN_MARKER: &str = "⚲";

pub(super) fn print_success(message: &str) {
    println!("{}", SUCCESS.apply_to(message));
}

pub(super) fn print_warning(message: &str) {
    println!("{}", WARNING.apply_to(message));
}

pub(super) fn print_info(message: &str) {
    println!("{}", MUTED.apply_to(message));
}

/// One-line summary of a record's payload.
pub(super) fn preview(record: &CacheRecord) -> String {
    match record.kind {
        RecordKind::Image => {
            let size = record
                .image_data_url
                .as_ref()
                .map(|url| format_bytes(url.len() as u64))
                .unwrap_or_else(|| format_bytes(0));
            format!("image, {}", size)
        }
        _ => record
            .content
            .trim()
            .chars()
            .map(|c| if c == '\n' || c == '\t' || c == '\r' { ' ' } else { c })
            .collect(),
    }
}

fn format_tags(tags: &[String]) -> String {
    tags.iter()
        .map(|t| format!("#{}", t))
        .collect::<Vec<_>>()
        .join(" ")
}

pub(super) fn render_record_list(records: &[CacheRecord], now: DateTime<Utc>) -> String {
    if records.is_empty() {
        return "No entries found.\n".to_string();
    }

    let mut out = String::new();
    let mut last_was_pinned = false;
    for (i, record) in records.iter().enumerate() {
        if last_was_pinned && !record.pinned {
            out.push('\n');
        }
        last_was_pinned = record.pinned;

        let left_prefix = if record.pinned {
            format!("  {} ", PIN_MARKER)
        } else {
            "    ".to_string()
        };
        let idx_str = format!("{}. ", i + 1);
        let badge = match record.kind {
            RecordKind::Text => String::new(),
            other => format!("[{}] ", other),
        };
        let tags = format_tags(&record.tags);
        let tags_suffix = if tags.is_empty() {
            String::new()
        } else {
            format!(" {}", tags)
        };
        let time_ago = format_time_ago(record.created_at, now);

        let fixed_width = left_prefix.width()
            + idx_str.width()
            + badge.width()
            + tags_suffix.width()
            + TIME_WIDTH
            + 1;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let body = truncate_to_width(&preview(record), available);
        let padding = available.saturating_sub(body.width());

        let idx_styled = if record.pinned {
            INDEX_PINNED.apply_to(idx_str)
        } else {
            INDEX.apply_to(idx_str)
        };

        out.push_str(&format!(
            "{}{}{}{}{}{} {}\n",
            PINNED.apply_to(left_prefix),
            idx_styled,
            KIND.apply_to(badge),
            body,
            TAG.apply_to(tags_suffix),
            " ".repeat(padding),
            TIME.apply_to(time_ago)
        ));
    }
    out
}

/// Full view of one record; `html` picks the HTML payload when there is one.
pub(super) fn render_record_full(
    record: &CacheRecord,
    html: bool,
    now: DateTime<Utc>,
) -> String {
    let mut header = format!("{} {}", TITLE.apply_to(&record.id), KIND.apply_to(record.kind));
    if record.pinned {
        header.push_str(&format!(" {}", PINNED.apply_to(PIN_MARKER)));
    }
    if !record.tags.is_empty() {
        header.push_str(&format!(" {}", TAG.apply_to(format_tags(&record.tags))));
    }
    header.push_str(&format!(
        "  {}",
        TIME.apply_to(format_time_ago(record.created_at, now).trim_start())
    ));

    let body = match record.kind {
        RecordKind::Image => record.image_data_url.clone().unwrap_or_default(),
        RecordKind::Html if html => record.html_content.clone().unwrap_or_default(),
        _ => record.content.clone(),
    };

    format!("{}\n--------------------------------\n{}\n", header, body)
}

pub(super) fn render_stats(stats: &StorageStats) -> String {
    format!(
        "{} / {} entries, {}\n",
        stats.count, stats.max_count, stats.formatted_size
    )
}

pub(super) fn render_tag_list(tags: &[String]) -> String {
    if tags.is_empty() {
        return "No tags.\n".to_string();
    }
    tags.iter()
        .map(|t| format!("{}\n", TAG.apply_to(t)))
        .collect()
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(timestamp);
    let formatter = Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
