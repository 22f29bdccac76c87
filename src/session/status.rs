/// Panel status of a single question. Derived on demand, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QuestionStatus {
    NotVisited,
    Answered,
    Marked,
    MarkedAnswered,
}

impl QuestionStatus {
    /// Priority: a review flag wins over an answer, and only a non-empty
    /// answer upgrades a flagged question to `MarkedAnswered`. An empty saved
    /// answer still counts as `Answered` when unflagged.
    pub fn derive(marked: bool, answer: Option<&str>) -> Self {
        match (marked, answer) {
            (true, Some(text)) if !text.is_empty() => QuestionStatus::MarkedAnswered,
            (true, _) => QuestionStatus::Marked,
            (false, Some(_)) => QuestionStatus::Answered,
            (false, None) => QuestionStatus::NotVisited,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            QuestionStatus::NotVisited => "not visited",
            QuestionStatus::Answered => "answered",
            QuestionStatus::Marked => "marked",
            QuestionStatus::MarkedAnswered => "marked + answered",
        }
    }
}

/// Per-section tally shown under the question panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusSummary {
    pub not_visited: usize,
    pub answered: usize,
    pub marked: usize,
    pub marked_answered: usize,
}

impl StatusSummary {
    pub fn from_statuses(statuses: impl IntoIterator<Item = QuestionStatus>) -> Self {
        let mut summary = Self::default();
        for status in statuses {
            match status {
                QuestionStatus::NotVisited => summary.not_visited += 1,
                QuestionStatus::Answered => summary.answered += 1,
                QuestionStatus::Marked => summary.marked += 1,
                QuestionStatus::MarkedAnswered => summary.marked_answered += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.not_visited + self.answered + self.marked + self.marked_answered
    }
}
