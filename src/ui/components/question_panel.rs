use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Widget};

use crate::session::section::Section;
use crate::session::status::QuestionStatus;
use crate::ui::theme::Theme;

/// Grid of numbered question buttons coloured by status, with a count of
/// each status underneath.
pub struct QuestionPanel<'a> {
    pub section: &'a Section,
    pub theme: &'a Theme,
}

impl<'a> QuestionPanel<'a> {
    pub const COLUMNS: usize = 4;
    const CELL_WIDTH: u16 = 5;

    pub fn new(section: &'a Section, theme: &'a Theme) -> Self {
        Self { section, theme }
    }

    pub fn cell_label(number: usize, status: QuestionStatus) -> String {
        match status {
            QuestionStatus::MarkedAnswered => format!("{number}\u{2714}"),
            _ => number.to_string(),
        }
    }
}

impl Widget for QuestionPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Questions ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if self.section.is_empty() {
            buf.set_string(
                inner.x,
                inner.y,
                "No questions",
                Style::default().fg(colors.text_dim()),
            );
            return;
        }

        let summary_rows: u16 = 4;
        let grid_rows = inner.height.saturating_sub(summary_rows).max(1);
        let current = self.section.current_index();

        for (i, status) in self.section.statuses().enumerate() {
            let row = (i / Self::COLUMNS) as u16;
            let col = (i % Self::COLUMNS) as u16;
            if row >= grid_rows {
                break;
            }
            let x = inner.x + col * Self::CELL_WIDTH;
            if x + Self::CELL_WIDTH > inner.x + inner.width {
                continue;
            }

            let mut style = Style::default().fg(Color::Black).bg(colors.status(status));
            if i == current {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            let label = format!("{:^4}", Self::cell_label(i + 1, status));
            buf.set_string(x, inner.y + row, &label, style);
        }

        let summary = self.section.summary();
        let lines = [
            (QuestionStatus::NotVisited, summary.not_visited),
            (QuestionStatus::Answered, summary.answered),
            (QuestionStatus::Marked, summary.marked),
            (QuestionStatus::MarkedAnswered, summary.marked_answered),
        ];
        let top = inner.y + inner.height.saturating_sub(summary_rows);
        for (offset, (status, count)) in lines.into_iter().enumerate() {
            let y = top + offset as u16;
            if y >= inner.y + inner.height {
                break;
            }
            buf.set_string(
                inner.x,
                y,
                format!("{:<16}{count:>3}", status.label()),
                Style::default().fg(colors.status(status)),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::question::Question;

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn marked_answered_label_has_tick() {
        assert_eq!(QuestionPanel::cell_label(3, QuestionStatus::Marked), "3");
        assert_eq!(
            QuestionPanel::cell_label(3, QuestionStatus::MarkedAnswered),
            "3\u{2714}"
        );
    }

    #[test]
    fn renders_every_question_number() {
        let mut section = Section::new("A");
        section.load_files(
            ["q1.png", "q2.png", "q3.png", "q4.png", "q5.png"]
                .into_iter()
                .map(|p| Question::new(p).unwrap())
                .collect(),
        );
        let theme = Theme::default();
        let area = Rect::new(0, 0, 26, 12);
        let mut buf = Buffer::empty(area);
        QuestionPanel::new(&section, &theme).render(area, &mut buf);

        let text = buffer_text(&buf);
        for n in 1..=5 {
            assert!(text.contains(&n.to_string()));
        }
        assert!(text.contains("not visited"));
    }
}
