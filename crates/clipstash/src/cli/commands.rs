//! # CLI Layer
//!
//! The **only** place in the workspace that:
//! - Knows about terminal I/O (stdout, stderr, stdin)
//! - Reads or writes the system clipboard
//! - Installs the tracing subscriber
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: clap derive types in `setup.rs`
//! 2. **Context Setup**: load [`ClipstashConfig`], start logging, open the store
//! 3. **API Dispatch**: call the matching [`ClipStashApi`] method
//! 4. **Output Formatting**: hand results to `render.rs`, or print JSON
//!
//! ## Structure
//!
//! - `run()`: main dispatch logic (called by `main.rs`)
//! - `init_context()`: config, logging and the API
//! - `handle_*()`: per-command handlers

use super::render::{
    print_info, print_success, print_warning, render_record_full, render_record_list,
    render_stats, render_tag_list,
};
use super::setup::{Cli, Commands, ConfigKey};
use crate::clipboard::{copy_to_clipboard, get_from_clipboard};
use chrono::Utc;
use clap::Parser;
use clipstashapp::api::{export_filename, ClipStashApi, PinState};
use clipstashapp::config::ClipstashConfig;
use clipstashapp::error::{ClipError, Result};
use clipstashapp::image::{data_url, image_hash, mime_for_extension};
use clipstashapp::model::{CacheRecord, Capture, RecordKind};
use clipstashapp::settings::{Language, Theme};
use clipstashapp::store::fs_backend::FsBackend;
use serde::Serialize;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

struct AppContext {
    api: ClipStashApi<FsBackend>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Add { text, html, image }) => handle_add(&mut ctx, text, html, image),
        Some(Commands::List { tag, json }) => handle_list(&ctx, tag, json),
        Some(Commands::Search { query, json }) => handle_search(&ctx, &query, json),
        Some(Commands::Show { id, html }) => handle_show(&ctx, &id, html),
        Some(Commands::Copy { id }) => handle_copy(&ctx, &id),
        Some(Commands::Rm { id }) => handle_remove(&mut ctx, &id),
        Some(Commands::Pin { id }) => handle_pin(&mut ctx, &id),
        Some(Commands::Tag {
            id,
            tags,
            add,
            remove,
        }) => handle_tag(&mut ctx, &id, tags, add, remove),
        Some(Commands::Tags) => handle_tags(&ctx),
        Some(Commands::Clear) => handle_clear(&mut ctx),
        Some(Commands::Stats { json }) => handle_stats(&ctx, json),
        Some(Commands::Export { file }) => handle_export(&ctx, file),
        Some(Commands::Import { file }) => handle_import(&mut ctx, &file),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_list(&ctx, None, false),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config_file = cli
        .config
        .clone()
        .or_else(ClipstashConfig::default_config_file);
    let config = ClipstashConfig::load(config_file.as_deref())?;
    if !init_logging(&config, cli.verbose) {
        tracing::debug!("tracing subscriber already installed");
    }

    let data_dir = config.resolve_data_dir(cli.data.clone())?;
    Ok(AppContext {
        api: ClipStashApi::open(data_dir),
    })
}

/// `RUST_LOG` wins; otherwise `-v` means debug, else the configured level.
/// Returns `false` when a global subscriber was already installed.
fn init_logging(config: &ClipstashConfig, verbose: bool) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new(&config.log_level)
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| ClipError::Api(format!("Cannot read {}: {}", path.display(), e)))
}

/// Accepts a record id or a 1-based position in the listing.
fn resolve_record(ctx: &AppContext, selector: &str) -> Result<Option<CacheRecord>> {
    if let Ok(position) = selector.parse::<usize>() {
        let records = ctx.api.get_caches()?;
        return Ok(position
            .checked_sub(1)
            .and_then(|i| records.into_iter().nth(i)));
    }
    ctx.api.get_cache(selector)
}

fn resolve_id(ctx: &AppContext, selector: &str) -> Result<Option<String>> {
    Ok(resolve_record(ctx, selector)?.map(|r| r.id))
}

fn not_found(selector: &str) {
    print_warning(&format!("No entry matches '{}'.", selector));
}

/// Naive markup strip used as the plain-text fallback of an HTML capture.
fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.trim().to_string()
}

fn capture_from_args(
    text: Vec<String>,
    html: Option<PathBuf>,
    image: Option<PathBuf>,
) -> Result<Capture> {
    if let Some(path) = image {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let mime = mime_for_extension(ext).ok_or_else(|| {
            ClipError::Api(format!("Unrecognized image type: {}", path.display()))
        })?;
        let bytes = std::fs::read(&path)
            .map_err(|e| ClipError::Api(format!("Cannot read {}: {}", path.display(), e)))?;
        return Ok(Capture::image(data_url(mime, &bytes), Some(image_hash(&bytes))));
    }

    let text = text.join(" ");

    if let Some(path) = html {
        let markup = read_file(&path)?;
        let plain = if text.trim().is_empty() {
            strip_tags(&markup)
        } else {
            text
        };
        return Ok(Capture::html(plain, markup));
    }

    if !text.is_empty() {
        return Ok(Capture::text(text));
    }

    if !std::io::stdin().is_terminal() {
        let piped = read_stdin()?;
        if !piped.trim().is_empty() {
            return Ok(Capture::text(piped));
        }
    }

    Ok(Capture::text(get_from_clipboard()?))
}

fn handle_add(
    ctx: &mut AppContext,
    text: Vec<String>,
    html: Option<PathBuf>,
    image: Option<PathBuf>,
) -> Result<()> {
    let capture = capture_from_args(text, html, image)?;
    let kind = capture.kind();
    let outcome = ctx.api.add_cache(capture)?;

    if outcome.added {
        print_success(&format!("Saved {} entry.", kind));
    } else if outcome.duplicate {
        print_info("Already in history.");
    } else {
        print_warning("Nothing to capture.");
    }
    Ok(())
}

fn print_records(records: &[CacheRecord], json: bool) -> Result<()> {
    if json {
        return print_json(&records);
    }
    print!("{}", render_record_list(records, Utc::now()));
    Ok(())
}

fn handle_list(ctx: &AppContext, tag: Option<String>, json: bool) -> Result<()> {
    let mut records = ctx.api.get_caches()?;
    if let Some(tag) = tag {
        records.retain(|r| r.tags.iter().any(|t| *t == tag));
    }
    print_records(&records, json)
}

fn handle_search(ctx: &AppContext, query: &str, json: bool) -> Result<()> {
    let records = ctx.api.search_caches(query)?;
    print_records(&records, json)
}

fn handle_show(ctx: &AppContext, selector: &str, html: bool) -> Result<()> {
    match resolve_record(ctx, selector)? {
        Some(record) => print!("{}", render_record_full(&record, html, Utc::now())),
        None => not_found(selector),
    }
    Ok(())
}

fn handle_copy(ctx: &AppContext, selector: &str) -> Result<()> {
    let Some(record) = resolve_record(ctx, selector)? else {
        not_found(selector);
        return Ok(());
    };
    if record.kind == RecordKind::Image {
        print_warning("Images cannot be copied from the terminal.");
        return Ok(());
    }
    copy_to_clipboard(&record.content)?;
    print_success("Copied to clipboard.");
    Ok(())
}

fn handle_remove(ctx: &mut AppContext, selector: &str) -> Result<()> {
    let Some(id) = resolve_id(ctx, selector)? else {
        not_found(selector);
        return Ok(());
    };
    if ctx.api.remove_cache(&id)? {
        print_success("Removed.");
    } else {
        not_found(selector);
    }
    Ok(())
}

fn handle_pin(ctx: &mut AppContext, selector: &str) -> Result<()> {
    let Some(id) = resolve_id(ctx, selector)? else {
        not_found(selector);
        return Ok(());
    };
    match ctx.api.toggle_pin(&id)? {
        PinState::Pinned => print_success("Pinned."),
        PinState::Unpinned => print_success("Unpinned."),
        PinState::NotFound => not_found(selector),
    }
    Ok(())
}

fn handle_tag(
    ctx: &mut AppContext,
    selector: &str,
    tags: Vec<String>,
    add: bool,
    remove: bool,
) -> Result<()> {
    let Some(record) = resolve_record(ctx, selector)? else {
        not_found(selector);
        return Ok(());
    };

    if tags.is_empty() && (add || remove) {
        print_warning("No tags given.");
        return Ok(());
    }

    if tags.is_empty() {
        print!("{}", render_tag_list(&record.tags));
        return Ok(());
    }

    if add {
        for tag in &tags {
            ctx.api.add_tag(&record.id, tag)?;
        }
    } else if remove {
        for tag in &tags {
            ctx.api.remove_tag(&record.id, tag.trim())?;
        }
    } else {
        ctx.api.update_cache_tags(&record.id, &tags)?;
    }

    let updated = ctx.api.get_cache(&record.id)?;
    let current = updated.map(|r| r.tags).unwrap_or_default();
    print!("{}", render_tag_list(&current));
    Ok(())
}

fn handle_tags(ctx: &AppContext) -> Result<()> {
    print!("{}", render_tag_list(&ctx.api.all_tags()?));
    Ok(())
}

fn handle_clear(ctx: &mut AppContext) -> Result<()> {
    ctx.api.clear_all_caches()?;
    print_success("History cleared.");
    Ok(())
}

fn handle_stats(ctx: &AppContext, json: bool) -> Result<()> {
    let stats = ctx.api.storage_stats()?;
    if json {
        return print_json(&stats);
    }
    print!("{}", render_stats(&stats));
    Ok(())
}

fn handle_export(ctx: &AppContext, file: Option<PathBuf>) -> Result<()> {
    let document = ctx.api.export_caches()?;
    match file {
        Some(path) if path.as_os_str() == "-" => {
            println!("{}", document);
        }
        file => {
            let path = file.unwrap_or_else(|| PathBuf::from(export_filename()));
            std::fs::write(&path, document)?;
            let count = ctx.api.storage_stats()?.count;
            print_success(&format!("Exported {} entries to {}", count, path.display()));
        }
    }
    Ok(())
}

fn handle_import(ctx: &mut AppContext, file: &Path) -> Result<()> {
    let document = if file.as_os_str() == "-" {
        read_stdin()?
    } else {
        read_file(file)?
    };
    let summary = ctx.api.import_caches(&document)?;
    print_success(&format!(
        "Imported {} of {} entries ({} duplicates, {} skipped).",
        summary.added,
        summary.total,
        summary.duplicates,
        summary.skipped()
    ));
    Ok(())
}

fn handle_config(
    ctx: &mut AppContext,
    key: Option<ConfigKey>,
    value: Option<String>,
) -> Result<()> {
    let Some(key) = key else {
        println!("max-cache-size = {}", ctx.api.settings()?.max_cache_size);
        println!("theme = {}", ctx.api.theme()?.as_str());
        println!("lang = {}", ctx.api.language()?.as_str());
        return Ok(());
    };

    let Some(value) = value else {
        let current = match key {
            ConfigKey::MaxCacheSize => ctx.api.settings()?.max_cache_size.to_string(),
            ConfigKey::Theme => ctx.api.theme()?.as_str().to_string(),
            ConfigKey::Lang => ctx.api.language()?.as_str().to_string(),
        };
        println!("{}", current);
        return Ok(());
    };

    match key {
        ConfigKey::MaxCacheSize => {
            let size = value.trim().parse::<usize>().map_err(|_| {
                ClipError::InvalidSetting(format!("'{}' is not a number", value))
            })?;
            ctx.api.set_max_cache_size(size)?;
        }
        ConfigKey::Theme => ctx.api.set_theme(value.parse::<Theme>()?)?,
        ConfigKey::Lang => ctx.api.set_language(value.parse::<Language>()?)?,
    }
    print_success(&format!("{} = {}", key.name(), value.trim()));
    Ok(())
}
