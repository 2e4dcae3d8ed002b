use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::FileError;
use crate::services::config_store::ConfigStore;
use crate::services::prompt::Prompter;

pub const DEFAULT_FOOD_LOG: &str = "sample_food_log.json";

/// Reads the whole file as text. The content is never parsed.
pub fn load(path: &Path) -> Result<String, FileError> {
    let content = fs::read_to_string(path).map_err(|e| FileError::from_io(path.to_path_buf(), e))?;
    log::debug!("📄 Loaded {} ({} bytes)", path.display(), content.len());
    Ok(content)
}

#[derive(Debug)]
pub struct FoodLog {
    pub path: PathBuf,
    pub content: String,
}

/// Picks a food log path and loads it, giving the user one retry with a
/// different path if the first one can't be read.
///
/// `preset` skips the first question. `default` is offered when the user just
/// presses enter.
pub fn select_and_load<W: Write>(
    preset: Option<PathBuf>,
    default: &str,
    prompter: &mut dyn Prompter,
    out: &mut W,
) -> Result<FoodLog, FileError> {
    let first = match preset {
        Some(path) => path,
        None => ask_path(prompter, default)?.unwrap_or_else(|| PathBuf::from(default)),
    };

    let first_err = match load(&first) {
        Ok(content) => return Ok(FoodLog { path: first, content }),
        Err(e) => e,
    };

    log::warn!("⚠️ Food log unavailable: {}", first_err);
    if let Err(e) = writeln!(out, "Could not read food log: {}", first_err) {
        log::warn!("⚠️ Could not print error: {}", e);
    }

    let retry = match ask_path(prompter, default)? {
        Some(path) => path,
        None => return Err(first_err),
    };
    let content = load(&retry)?;
    Ok(FoodLog { path: retry, content })
}

/// The food log path used last time, or `default` if none was stored.
pub fn last_used_or(store: &ConfigStore, default: &str) -> String {
    store
        .load()
        .ok()
        .and_then(|c| c.last_food_log)
        .unwrap_or_else(|| default.to_string())
}

/// Stores `path` as next run's default. Failure only costs a convenience.
pub fn remember_last_used(store: &ConfigStore, path: &Path) {
    let last_used = path.display().to_string();
    match store.update(|c| c.last_food_log = Some(last_used)) {
        Ok(()) => log::debug!("💾 Remembered food log {}", path.display()),
        Err(e) => log::warn!("⚠️ Could not remember food log path: {}", e),
    }
}

fn ask_path(prompter: &mut dyn Prompter, default: &str) -> Result<Option<PathBuf>, FileError> {
    let prompt = format!("Path to your food log [{}]: ", default);
    let answer = prompter
        .read_visible(&prompt)
        .map_err(|source| FileError::Io { path: PathBuf::from("<stdin>"), source })?;

    Ok(answer.map(|a| {
        let trimmed = a.trim();
        if trimmed.is_empty() {
            PathBuf::from(default)
        } else {
            PathBuf::from(trimmed)
        }
    }))
}
