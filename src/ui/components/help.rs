use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::ui::theme::Theme;

pub const KEY_BINDINGS: &[(&str, &str)] = &[
    ("Up / Down", "Previous / next question"),
    ("PgUp / PgDn", "Previous / next page of a PDF question"),
    ("Tab / Shift-Tab", "Switch section tab"),
    ("Ctrl-G", "Go to question number"),
    ("Ctrl-R", "Mark current question for review"),
    ("Ctrl-D", "Remove the review mark"),
    ("Ctrl-O", "Upload question files into this section"),
    ("Ctrl-E", "Edit section names"),
    ("Ctrl-T", "Start the timer"),
    ("F5 / F6", "Resume / pause the timer"),
    ("Ctrl-S / Ctrl-L", "Save / load a session"),
    ("Ctrl-X", "Submit answers"),
    ("F1", "Show this help"),
    ("Ctrl-C", "Quit"),
];

/// Short forms of `KEY_BINDINGS` for the footer of a section tab.
pub const FOOTER_HINTS: &[&str] = &[
    "[Up/Down] Question",
    "[PgUp/PgDn] Page",
    "[Tab/Shift-Tab] Section",
    "[Ctrl-G] Go to",
    "[Ctrl-R] Mark",
    "[Ctrl-D] Unmark",
    "[Ctrl-O] Upload",
    "[Ctrl-E] Sections",
    "[Ctrl-T] Timer",
    "[F5/F6] Resume/Pause",
    "[Ctrl-S/Ctrl-L] Save/Load",
    "[Ctrl-X] Submit",
    "[F1] Help",
    "[Ctrl-C] Quit",
];

const INSTRUCTIONS: &[&str] = &[
    "Upload questions for each section, then type your answer under each one.",
    "Answers are saved when you move to another question, save or submit.",
    "The panel colours each question by status: not visited, answered, marked for review,",
    "and marked + answered (shown with a tick).",
    "When the timer runs out your responses are submitted automatically.",
];

pub struct HelpView<'a> {
    pub theme: &'a Theme,
}

impl<'a> HelpView<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for HelpView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Help ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));

        let mut lines: Vec<Line> = INSTRUCTIONS
            .iter()
            .map(|text| Line::from(Span::styled(*text, Style::default().fg(colors.fg()))))
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Keys",
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )));
        for (key, action) in KEY_BINDINGS {
            lines.push(Line::from(vec![
                Span::styled(format!("  {key:<18}"), Style::default().fg(colors.accent())),
                Span::styled(*action, Style::default().fg(colors.text_dim())),
            ]));
        }

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
