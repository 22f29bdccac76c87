use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::store::json_store::expand_home;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionKind {
    Image,
    Pdf,
}

impl QuestionKind {
    pub const EXTENSIONS: [&'static str; 4] = ["jpg", "jpeg", "png", "pdf"];

    /// Derive the kind from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" | "png" => Some(QuestionKind::Image),
            "pdf" => Some(QuestionKind::Pdf),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            QuestionKind::Image => "image",
            QuestionKind::Pdf => "pdf",
        }
    }
}

/// A question file. Its identity is its position in the owning section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    pub path: PathBuf,
    pub kind: QuestionKind,
}

impl Question {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, QuizError> {
        let path = path.into();
        match QuestionKind::from_path(&path) {
            Some(kind) => Ok(Self { path, kind }),
            None => Err(QuizError::UnsupportedFile(path)),
        }
    }

    pub fn is_pdf(&self) -> bool {
        self.kind == QuestionKind::Pdf
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.to_string_lossy().to_string())
    }
}

/// Turn picker input into an ordered question list. The input is either a
/// comma separated list of files or a single directory, which expands to its
/// supported files sorted by name.
pub fn collect_question_files(input: &str) -> Result<Vec<Question>, QuizError> {
    let paths: Vec<PathBuf> = input
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(expand_home)
        .collect();

    if let [dir] = paths.as_slice()
        && dir.is_dir()
    {
        let mut found: Vec<PathBuf> = fs::read_dir(dir)
            .map_err(|_| QuizError::NoQuestionFiles(dir.clone()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && QuestionKind::from_path(p).is_some())
            .collect();
        if found.is_empty() {
            return Err(QuizError::NoQuestionFiles(dir.clone()));
        }
        found.sort();
        return found.into_iter().map(Question::new).collect();
    }

    if paths.is_empty() {
        return Err(QuizError::NoQuestionFiles(PathBuf::from(input.trim())));
    }
    paths.into_iter().map(Question::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_from_extension_ignores_case() {
        assert_eq!(
            QuestionKind::from_path(Path::new("q1.PNG")),
            Some(QuestionKind::Image)
        );
        assert_eq!(
            QuestionKind::from_path(Path::new("/tmp/a.Jpeg")),
            Some(QuestionKind::Image)
        );
        assert_eq!(
            QuestionKind::from_path(Path::new("paper.pdf")),
            Some(QuestionKind::Pdf)
        );
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        assert!(QuestionKind::from_path(Path::new("notes.txt")).is_none());
        assert!(QuestionKind::from_path(Path::new("no_extension")).is_none());
        assert!(matches!(
            Question::new("notes.txt"),
            Err(QuizError::UnsupportedFile(_))
        ));
    }

    #[test]
    fn file_name_falls_back_to_full_path() {
        let q = Question::new("dir/q2.jpg").unwrap();
        assert_eq!(q.file_name(), "q2.jpg");
        assert!(!q.is_pdf());
    }

    #[test]
    fn collect_keeps_listed_order() {
        let questions = collect_question_files(" b.pdf, a.png ,, c.JPG").unwrap();
        let names: Vec<String> = questions.iter().map(Question::file_name).collect();
        assert_eq!(names, vec!["b.pdf", "a.png", "c.JPG"]);
    }

    #[test]
    fn collect_rejects_unsupported_entries() {
        assert!(matches!(
            collect_question_files("a.png, notes.txt"),
            Err(QuizError::UnsupportedFile(_))
        ));
        assert!(matches!(
            collect_question_files("  "),
            Err(QuizError::NoQuestionFiles(_))
        ));
    }

    #[test]
    fn collect_expands_directory_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["q10.png", "q02.pdf", "readme.md", "q01.jpeg"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::create_dir(dir.path().join("nested.png")).unwrap();

        let questions = collect_question_files(&dir.path().display().to_string()).unwrap();
        let names: Vec<String> = questions.iter().map(Question::file_name).collect();
        assert_eq!(names, vec!["q01.jpeg", "q02.pdf", "q10.png"]);
        assert_eq!(questions[1].kind, QuestionKind::Pdf);
    }

    #[test]
    fn collect_empty_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            collect_question_files(&dir.path().display().to_string()),
            Err(QuizError::NoQuestionFiles(_))
        ));
    }
}
