use crate::document::render::RenderedQuestion;
use crate::ui::line_input::LineInput;

/// Display and input surfaces belonging to one section tab. The app keeps
/// one per section, in section order, and rebuilds them whenever the
/// section list is replaced.
pub struct SectionView {
    pub answer: LineInput,
    /// Last successfully resolved question. Kept when a later resolve fails.
    pub shown: Option<RenderedQuestion>,
    pub error: Option<String>,
}

impl SectionView {
    pub fn new() -> Self {
        Self {
            answer: LineInput::new(""),
            shown: None,
            error: None,
        }
    }

    pub fn show(&mut self, rendered: Option<RenderedQuestion>) {
        self.shown = rendered;
        self.error = None;
    }

    pub fn fail(&mut self, message: String) {
        self.error = Some(message);
    }
}

impl Default for SectionView {
    fn default() -> Self {
        Self::new()
    }
}
