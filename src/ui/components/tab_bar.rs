use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::Theme;

/// One tab per section plus a trailing Help tab, with the countdown on the
/// right.
pub struct TabBar<'a> {
    pub titles: Vec<String>,
    pub active: usize,
    pub timer: String,
    pub timer_running: bool,
    pub theme: &'a Theme,
}

impl<'a> TabBar<'a> {
    pub fn new(
        sections: &[String],
        active: usize,
        timer: String,
        timer_running: bool,
        theme: &'a Theme,
    ) -> Self {
        let mut titles = sections.to_vec();
        titles.push("Help".to_string());
        Self {
            titles,
            active,
            timer,
            timer_running,
            theme,
        }
    }
}

impl Widget for TabBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.header_bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut spans: Vec<Span> = Vec::new();
        for (i, title) in self.titles.iter().enumerate() {
            let style = if i == self.active {
                Style::default()
                    .fg(colors.header_bg())
                    .bg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.header_fg())
            };
            spans.push(Span::styled(format!(" {title} "), style));
            spans.push(Span::raw(" "));
        }
        Paragraph::new(Line::from(spans)).render(inner, buf);

        let clock = format!(" Time Left: {} ", self.timer);
        let width = clock.chars().count() as u16;
        if inner.width > width {
            let mut style = Style::default().fg(colors.timer());
            if self.timer_running {
                style = style.add_modifier(Modifier::BOLD);
            }
            buf.set_string(inner.x + inner.width - width, inner.y, &clock, style);
        }
    }
}
