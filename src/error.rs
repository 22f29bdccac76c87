//! Error types shared across the quiz core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by session edits that the user can correct and retry.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("timer must be between {min} and {max} minutes, got {got}")]
    TimerOutOfRange { min: u32, max: u32, got: i64 },
    #[error("'{0}' is not a whole number of minutes")]
    TimerNotANumber(String),
    #[error("section names must not be empty")]
    EmptySectionName,
    #[error("section name '{0}' is used more than once")]
    DuplicateSection(String),
    #[error("unsupported question file {0:?} (expected .jpg, .jpeg, .png or .pdf)")]
    UnsupportedFile(PathBuf),
    #[error("no question files found in {0:?}")]
    NoQuestionFiles(PathBuf),
    #[error("question {got} is out of range (1-{count})")]
    QuestionOutOfRange { got: usize, count: usize },
}

/// Errors raised while resolving a question for display. Never fatal:
/// navigation state is left untouched when one of these is returned.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RenderError {
    #[error("cannot load file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot load file {path:?}: {source}")]
    Pdf {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },
    #[error("cannot load file {0:?}: not a regular file")]
    NotAFile(PathBuf),
    #[error("cannot load file {0:?}: document has no pages")]
    EmptyDocument(PathBuf),
    #[error("page {page} is outside {path:?} ({page_count} pages)")]
    PageOutOfRange {
        path: PathBuf,
        page: usize,
        page_count: usize,
    },
}
