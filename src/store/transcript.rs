use std::fmt::Write as _;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use tracing::info;

use crate::session::quiz::QuizSession;

/// Render answers grouped by section: a `--- name ---` header, one
/// `Q<n>: text` line per saved answer in question order, then a blank line.
pub fn render(session: &QuizSession) -> String {
    let mut out = String::new();
    for section in session.sections() {
        let _ = writeln!(out, "--- {} ---", section.name());
        for (index, answer) in section.answers() {
            let _ = writeln!(out, "Q{}: {}", index + 1, answer);
        }
        out.push('\n');
    }
    out
}

pub fn file_name(at: DateTime<Local>) -> String {
    format!("responses_{}.txt", at.format("%Y-%m-%d_%H-%M-%S"))
}

/// Write a new transcript file into `dir`. Existing files are never
/// overwritten: a clash within the same second gets a numeric suffix.
pub fn write(dir: &Path, session: &QuizSession, at: DateTime<Local>) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create transcript directory {dir:?}"))?;
    let content = render(session);
    let base = file_name(at);
    let stem = base.trim_end_matches(".txt");

    for attempt in 1u32.. {
        let name = if attempt == 1 {
            base.clone()
        } else {
            format!("{stem}_{attempt}.txt")
        };
        let path = dir.join(name);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                file.write_all(content.as_bytes())
                    .with_context(|| format!("failed to write {path:?}"))?;
                info!(path = %path.display(), "responses submitted");
                return Ok(path);
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e).with_context(|| format!("failed to create {path:?}")),
        }
    }
    unreachable!("transcript suffixes exhausted")
}
