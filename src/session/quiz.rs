use std::collections::HashSet;

use crate::error::QuizError;
use crate::session::section::Section;

/// All sections plus the shared countdown value. This is the unit that is
/// saved, loaded and submitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizSession {
    sections: Vec<Section>,
    time_left: u32,
}

impl QuizSession {
    pub fn new<S: AsRef<str>>(names: &[S], time_left: u32) -> Result<Self, QuizError> {
        validate_names(names)?;
        Ok(Self {
            sections: names.iter().map(|n| Section::new(n.as_ref())).collect(),
            time_left,
        })
    }

    pub(crate) fn from_parts(sections: Vec<Section>, time_left: u32) -> Self {
        Self {
            sections,
            time_left,
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    pub fn section_mut(&mut self, index: usize) -> Option<&mut Section> {
        self.sections.get_mut(index)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.name() == name)
    }

    pub fn section_names(&self) -> Vec<String> {
        self.sections.iter().map(|s| s.name().to_string()).collect()
    }

    /// Replace every section. All files, answers and flags are discarded.
    pub fn replace_sections<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), QuizError> {
        validate_names(names)?;
        self.sections = names.iter().map(|n| Section::new(n.as_ref())).collect();
        Ok(())
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn set_time_left(&mut self, seconds: u32) {
        self.time_left = seconds;
    }
}

/// Split a comma separated list of names, trimming each and skipping blanks.
pub fn parse_section_names(input: &str) -> Result<Vec<String>, QuizError> {
    let names: Vec<String> = input
        .split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect();
    validate_names(&names)?;
    Ok(names)
}

pub(crate) fn validate_names<S: AsRef<str>>(names: &[S]) -> Result<(), QuizError> {
    if names.is_empty() {
        return Err(QuizError::EmptySectionName);
    }
    let mut seen = HashSet::new();
    for name in names {
        let name = name.as_ref();
        if name.trim().is_empty() {
            return Err(QuizError::EmptySectionName);
        }
        if !seen.insert(name) {
            return Err(QuizError::DuplicateSection(name.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::question::Question;

    #[test]
    fn new_session_has_empty_sections() {
        let session = QuizSession::new(&["A", "B"], 1800).unwrap();
        assert_eq!(session.section_names(), vec!["A", "B"]);
        assert!(session.sections().iter().all(Section::is_empty));
        assert_eq!(session.time_left(), 1800);
        assert_eq!(session.position("B"), Some(1));
        assert_eq!(session.position("C"), None);
    }

    #[test]
    fn replace_sections_discards_state() {
        let mut session = QuizSession::new(&["A"], 60).unwrap();
        let section = session.section_mut(0).unwrap();
        section.load_files(vec![Question::new("q.png").unwrap()]);
        section.save_answer("x");

        session.replace_sections(&["A", "Z"]).unwrap();
        assert!(session.section(0).unwrap().answers().is_empty());
        assert!(session.section(0).unwrap().is_empty());
        assert_eq!(session.sections().len(), 2);
    }

    #[test]
    fn failed_replace_keeps_old_sections() {
        let mut session = QuizSession::new(&["A"], 60).unwrap();
        assert!(session.replace_sections(&["X", "X"]).is_err());
        assert_eq!(session.section_names(), vec!["A"]);
    }

    #[test]
    fn parse_names_trims_and_skips_blanks() {
        let names = parse_section_names(" Physics , Chemistry,, Maths ,").unwrap();
        assert_eq!(names, vec!["Physics", "Chemistry", "Maths"]);
    }

    #[test]
    fn parse_names_rejects_empty_and_duplicates() {
        assert!(matches!(
            parse_section_names(" , "),
            Err(QuizError::EmptySectionName)
        ));
        assert!(matches!(
            parse_section_names("A, B, A"),
            Err(QuizError::DuplicateSection(name)) if name == "A"
        ));
    }
}
