use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::session::section::Section;
use crate::ui::section_view::SectionView;
use crate::ui::theme::Theme;

/// Describes the current question of a section. The terminal cannot draw
/// the page itself, so this shows which file to look at and where the
/// extracted page lives.
pub struct QuestionView<'a> {
    pub section: &'a Section,
    pub view: &'a SectionView,
    pub theme: &'a Theme,
}

impl<'a> QuestionView<'a> {
    pub fn new(section: &'a Section, view: &'a SectionView, theme: &'a Theme) -> Self {
        Self {
            section,
            view,
            theme,
        }
    }

    fn title(&self) -> String {
        if self.section.is_empty() {
            return format!(" {} ", self.section.name());
        }
        format!(
            " {}: Question {} of {} ",
            self.section.name(),
            self.section.current_index() + 1,
            self.section.len()
        )
    }
}

impl Widget for QuestionView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(self.title())
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));

        let label = Style::default().fg(colors.text_dim());
        let value = Style::default().fg(colors.fg());
        let mut lines: Vec<Line> = Vec::new();

        match &self.view.shown {
            None if self.section.is_empty() => {
                lines.push(Line::from(Span::styled(
                    "No questions loaded. Press [Ctrl-O] to upload image or PDF files.",
                    label,
                )));
            }
            None => {}
            Some(shown) => {
                let name = shown
                    .source
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                lines.push(Line::from(Span::styled(
                    name,
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(""));
                lines.push(Line::from(vec![
                    Span::styled("Type:   ", label),
                    Span::styled(shown.kind.label(), value),
                ]));
                if let Some(page) = shown.page {
                    lines.push(Line::from(vec![
                        Span::styled("Page:   ", label),
                        Span::styled(format!("{} / {}", page.index + 1, page.count), value),
                    ]));
                }
                lines.push(Line::from(vec![
                    Span::styled("Source: ", label),
                    Span::styled(shown.source.display().to_string(), value),
                ]));
                if shown.display_path != shown.source {
                    lines.push(Line::from(vec![
                        Span::styled("View:   ", label),
                        Span::styled(shown.display_path.display().to_string(), value),
                    ]));
                }
            }
        }

        if let Some(error) = &self.view.error {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(colors.error()),
            )));
        }

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
