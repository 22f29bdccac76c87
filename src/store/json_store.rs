use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::session::quiz::QuizSession;
use crate::store::schema::{SessionData, SessionFileError};

/// Reads and writes whole-session JSON documents.
pub struct SessionStore {
    base_dir: PathBuf,
}

impl SessionStore {
    pub fn new(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)
            .with_context(|| format!("failed to create session directory {base_dir:?}"))?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Turn user input into a session path: `~` expands to home, a bare
    /// name lands in the session directory, and `.json` is appended when the
    /// name has no extension.
    pub fn resolve_path(&self, input: &str) -> PathBuf {
        let input = input.trim();
        let mut path = expand_home(input);
        if path.components().count() == 1 && !path.is_absolute() {
            path = self.base_dir.join(path);
        }
        if path.extension().is_none() {
            path.set_extension("json");
        }
        path
    }

    /// Atomic write: serialize to a sibling `.tmp` file, then rename over.
    pub fn save_session(&self, path: &Path, session: &QuizSession) -> Result<()> {
        let data = SessionData::from_session(session);
        let json = serde_json::to_string_pretty(&data)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp_path = path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp_path)
            .with_context(|| format!("failed to create {tmp_path:?}"))?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp_path, path).with_context(|| format!("failed to write {path:?}"))?;

        info!(path = %path.display(), sections = data.sections.len(), "session saved");
        Ok(())
    }

    /// Parse and validate a session file. Nothing is returned unless the
    /// whole document is consistent.
    pub fn load_session(&self, path: &Path) -> Result<QuizSession> {
        let content =
            fs::read_to_string(path).with_context(|| format!("failed to read {path:?}"))?;
        let session = parse_session(&content)
            .with_context(|| format!("failed to load session from {path:?}"))?;
        info!(path = %path.display(), sections = session.sections().len(), "session loaded");
        Ok(session)
    }
}

pub fn parse_session(content: &str) -> Result<QuizSession, SessionFileError> {
    let data: SessionData = serde_json::from_str(content)?;
    data.into_session()
}

pub fn expand_home(input: &str) -> PathBuf {
    if let Some(rest) = input.strip_prefix('~') {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest.trim_start_matches(['/', '\\']));
        }
    }
    PathBuf::from(input)
}
