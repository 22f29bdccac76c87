use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::QuizError;
use crate::session::question::Question;
use crate::session::quiz::{QuizSession, validate_names};
use crate::session::section::Section;

/// On-disk session document. Every per-section map is keyed by section
/// name; answer maps are keyed by question index (written as JSON strings).
/// All keys are required: a file missing any of them is rejected rather than
/// partially loaded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub sections: Vec<String>,
    pub files: BTreeMap<String, Vec<PathBuf>>,
    pub current_index: BTreeMap<String, usize>,
    pub current_page: BTreeMap<String, i64>,
    pub marked_for_review: BTreeMap<String, Vec<bool>>,
    pub answers: BTreeMap<String, BTreeMap<usize, String>>,
    pub time_left: u32,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionFileError {
    #[error("malformed session file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid session file: {0}")]
    Invalid(#[from] QuizError),
    #[error("'{key}' has no entry for section '{section}'")]
    MissingEntry { key: &'static str, section: String },
    #[error("'{key}' has an entry for unknown section '{section}'")]
    UnknownEntry { key: &'static str, section: String },
    #[error("section '{section}' has {flags} review flags for {files} files")]
    FlagCount {
        section: String,
        flags: usize,
        files: usize,
    },
    #[error("section '{section}' has an answer for question {index} but only {files} files")]
    AnswerOutOfRange {
        section: String,
        index: usize,
        files: usize,
    },
    #[error("section '{section}' points at question {index} but only has {files} files")]
    IndexOutOfRange {
        section: String,
        index: usize,
        files: usize,
    },
}

impl SessionData {
    pub fn from_session(session: &QuizSession) -> Self {
        let mut data = SessionData {
            sections: session.section_names(),
            time_left: session.time_left(),
            ..Default::default()
        };
        for section in session.sections() {
            let name = section.name().to_string();
            data.files.insert(
                name.clone(),
                section.files().iter().map(|q| q.path.clone()).collect(),
            );
            data.current_index
                .insert(name.clone(), section.current_index());
            data.current_page.insert(name.clone(), section.current_page());
            data.marked_for_review
                .insert(name.clone(), section.marked_for_review().to_vec());
            data.answers.insert(name, section.answers().clone());
        }
        data
    }

    /// Validate the whole document before building anything from it.
    pub fn into_session(mut self) -> Result<QuizSession, SessionFileError> {
        validate_names(&self.sections)?;
        self.check_keys()?;

        let mut sections = Vec::with_capacity(self.sections.len());
        for name in &self.sections {
            let paths = self.files.remove(name).unwrap_or_default();
            let files = paths
                .into_iter()
                .map(Question::new)
                .collect::<Result<Vec<_>, _>>()?;
            let flags = self.marked_for_review.remove(name).unwrap_or_default();
            let answers = self.answers.remove(name).unwrap_or_default();
            let current_index = self.current_index.get(name).copied().unwrap_or(0);
            let current_page = self.current_page.get(name).copied().unwrap_or(0);

            if flags.len() != files.len() {
                return Err(SessionFileError::FlagCount {
                    section: name.clone(),
                    flags: flags.len(),
                    files: files.len(),
                });
            }
            if let Some((&index, _)) = answers.iter().find(|(i, _)| **i >= files.len()) {
                return Err(SessionFileError::AnswerOutOfRange {
                    section: name.clone(),
                    index,
                    files: files.len(),
                });
            }
            if current_index != 0 && current_index >= files.len() {
                return Err(SessionFileError::IndexOutOfRange {
                    section: name.clone(),
                    index: current_index,
                    files: files.len(),
                });
            }

            sections.push(Section::from_parts(
                name.clone(),
                files,
                current_index,
                current_page,
                flags,
                answers,
            ));
        }

        Ok(QuizSession::from_parts(sections, self.time_left))
    }

    fn check_keys(&self) -> Result<(), SessionFileError> {
        let names: HashSet<&str> = self.sections.iter().map(String::as_str).collect();
        let maps: [(&'static str, Vec<&String>); 5] = [
            ("files", self.files.keys().collect()),
            ("current_index", self.current_index.keys().collect()),
            ("current_page", self.current_page.keys().collect()),
            ("marked_for_review", self.marked_for_review.keys().collect()),
            ("answers", self.answers.keys().collect()),
        ];
        for (key, present) in &maps {
            for name in &self.sections {
                if !present.contains(&name) {
                    return Err(SessionFileError::MissingEntry {
                        key: *key,
                        section: name.clone(),
                    });
                }
            }
            if let Some(extra) = present.iter().find(|n| !names.contains(n.as_str())) {
                return Err(SessionFileError::UnknownEntry {
                    key: *key,
                    section: (*extra).clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_session() -> QuizSession {
        let mut session = QuizSession::new(&["A", "B"], 900).unwrap();
        let a = session.section_mut(0).unwrap();
        a.load_files(vec![
            Question::new("q1.png").unwrap(),
            Question::new("q2.pdf").unwrap(),
        ]);
        a.save_answer("first");
        a.next_question();
        a.mark_for_review();
        session
    }

    #[test]
    fn answer_keys_are_written_as_strings() {
        let data = SessionData::from_session(&sample_session());
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["answers"]["A"]["0"], "first");
        assert_eq!(json["current_index"]["A"], 1);
        assert_eq!(json["marked_for_review"]["A"][1], true);
        assert_eq!(json["time_left"], 900);
        assert!(json["answers"]["B"].as_object().unwrap().is_empty());
    }

    #[test]
    fn into_session_restores_state() {
        let session = sample_session();
        let data = SessionData::from_session(&session);
        let json = serde_json::to_string(&data).unwrap();
        let parsed: SessionData = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.into_session().unwrap(), session);
    }

    #[test]
    fn missing_top_level_key_is_a_parse_error() {
        let json = r#"{"sections": ["A"], "files": {"A": []}}"#;
        let err = serde_json::from_str::<SessionData>(json).unwrap_err();
        assert!(err.to_string().contains("missing field"));
    }

    #[test]
    fn missing_section_entry_is_rejected() {
        let mut data = SessionData::from_session(&sample_session());
        data.current_page.remove("B");
        let err = data.into_session().unwrap_err();
        assert!(matches!(
            err,
            SessionFileError::MissingEntry { key: "current_page", ref section } if section == "B"
        ));
    }

    #[test]
    fn unknown_section_entry_is_rejected() {
        let mut data = SessionData::from_session(&sample_session());
        data.answers.insert("Ghost".to_string(), BTreeMap::new());
        assert!(matches!(
            data.into_session(),
            Err(SessionFileError::UnknownEntry { key: "answers", .. })
        ));
    }

    #[test]
    fn flag_count_must_match_files() {
        let mut data = SessionData::from_session(&sample_session());
        data.marked_for_review.insert("A".to_string(), vec![true]);
        assert!(matches!(
            data.into_session(),
            Err(SessionFileError::FlagCount { flags: 1, files: 2, .. })
        ));
    }

    #[test]
    fn answer_index_must_be_in_range() {
        let mut data = SessionData::from_session(&sample_session());
        data.answers
            .get_mut("A")
            .unwrap()
            .insert(7, "stray".to_string());
        assert!(matches!(
            data.into_session(),
            Err(SessionFileError::AnswerOutOfRange { index: 7, .. })
        ));
    }

    #[test]
    fn current_index_must_be_in_range() {
        let mut data = SessionData::from_session(&sample_session());
        data.current_index.insert("A".to_string(), 2);
        assert!(matches!(
            data.into_session(),
            Err(SessionFileError::IndexOutOfRange { index: 2, .. })
        ));
    }

    #[test]
    fn unsupported_file_is_rejected() {
        let mut data = SessionData::from_session(&sample_session());
        data.files
            .insert("A".to_string(), vec!["a.png".into(), "notes.txt".into()]);
        assert!(matches!(
            data.into_session(),
            Err(SessionFileError::Invalid(QuizError::UnsupportedFile(_)))
        ));
    }

    #[test]
    fn duplicate_section_names_are_rejected() {
        let mut data = SessionData::from_session(&sample_session());
        data.sections.push("A".to_string());
        assert!(matches!(
            data.into_session(),
            Err(SessionFileError::Invalid(QuizError::DuplicateSection(_)))
        ));
    }
}
