use std::collections::BTreeMap;

use crate::session::question::Question;
use crate::session::status::{QuestionStatus, StatusSummary};

/// Navigation and answer state for one named group of questions.
///
/// Invariants: `marked_for_review.len() == files.len()`, every answer key is
/// a valid index into `files`, and `current_index` is 0 or a valid index.
/// `current_page` may step outside the document between renders; the
/// renderer clamps it back through [`Section::clamp_page`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    name: String,
    files: Vec<Question>,
    current_index: usize,
    current_page: i64,
    marked_for_review: Vec<bool>,
    answers: BTreeMap<usize, String>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            files: Vec::new(),
            current_index: 0,
            current_page: 0,
            marked_for_review: Vec::new(),
            answers: BTreeMap::new(),
        }
    }

    /// Build a section from already validated parts (see `store::schema`).
    pub(crate) fn from_parts(
        name: String,
        files: Vec<Question>,
        current_index: usize,
        current_page: i64,
        marked_for_review: Vec<bool>,
        answers: BTreeMap<usize, String>,
    ) -> Self {
        debug_assert_eq!(files.len(), marked_for_review.len());
        Self {
            name,
            files,
            current_index,
            current_page,
            marked_for_review,
            answers,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn files(&self) -> &[Question] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_page(&self) -> i64 {
        self.current_page
    }

    pub fn marked_for_review(&self) -> &[bool] {
        &self.marked_for_review
    }

    pub fn answers(&self) -> &BTreeMap<usize, String> {
        &self.answers
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.files.get(self.current_index)
    }

    /// Replace the question list wholesale. Flags, answers and position
    /// belong to the old list and are dropped with it.
    pub fn load_files(&mut self, files: Vec<Question>) {
        self.marked_for_review = vec![false; files.len()];
        self.files = files;
        self.answers.clear();
        self.current_index = 0;
        self.current_page = 0;
    }

    /// Returns true when the index moved and the question must be reloaded.
    pub fn next_question(&mut self) -> bool {
        if self.files.is_empty() || self.current_index + 1 >= self.files.len() {
            return false;
        }
        self.current_index += 1;
        self.current_page = 0;
        true
    }

    pub fn prev_question(&mut self) -> bool {
        if self.files.is_empty() || self.current_index == 0 {
            return false;
        }
        self.current_index -= 1;
        self.current_page = 0;
        true
    }

    pub fn select_question(&mut self, index: usize) -> bool {
        if index >= self.files.len() {
            return false;
        }
        self.current_index = index;
        self.current_page = 0;
        true
    }

    /// Page steps are unbounded here; only PDF questions have pages.
    pub fn next_page(&mut self) -> bool {
        self.step_page(1)
    }

    pub fn prev_page(&mut self) -> bool {
        self.step_page(-1)
    }

    fn step_page(&mut self, delta: i64) -> bool {
        match self.current_question() {
            Some(q) if q.is_pdf() => {
                self.current_page += delta;
                true
            }
            _ => false,
        }
    }

    /// Force the page into `[0, page_count - 1]`, store it and return it.
    pub fn clamp_page(&mut self, page_count: usize) -> usize {
        let last = page_count.saturating_sub(1) as i64;
        self.current_page = self.current_page.clamp(0, last);
        self.current_page as usize
    }

    /// Store trimmed text for the current question, overwriting any earlier
    /// answer. An empty string is kept as an explicit empty answer.
    pub fn save_answer(&mut self, text: &str) {
        if self.files.is_empty() {
            return;
        }
        self.answers
            .insert(self.current_index, text.trim().to_string());
    }

    pub fn answer(&self, index: usize) -> Option<&str> {
        self.answers.get(&index).map(String::as_str)
    }

    pub fn current_answer(&self) -> Option<&str> {
        self.answer(self.current_index)
    }

    pub fn mark_for_review(&mut self) -> bool {
        self.set_flag(true)
    }

    pub fn unmark_for_review(&mut self) -> bool {
        self.set_flag(false)
    }

    fn set_flag(&mut self, value: bool) -> bool {
        match self.marked_for_review.get_mut(self.current_index) {
            Some(flag) => {
                *flag = value;
                true
            }
            None => false,
        }
    }

    pub fn is_marked(&self, index: usize) -> bool {
        self.marked_for_review.get(index).copied().unwrap_or(false)
    }

    pub fn status(&self, index: usize) -> QuestionStatus {
        QuestionStatus::derive(self.is_marked(index), self.answer(index))
    }

    pub fn statuses(&self) -> impl Iterator<Item = QuestionStatus> + '_ {
        (0..self.files.len()).map(|i| self.status(i))
    }

    pub fn summary(&self) -> StatusSummary {
        StatusSummary::from_statuses(self.statuses())
    }
}
