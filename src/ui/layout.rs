use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen regions of the quiz view: tab bar, question display, answer box,
/// question panel on the right and a hint footer.
pub struct QuizLayout {
    pub tabs: Rect,
    pub question: Rect,
    pub answer: Rect,
    pub panel: Rect,
    pub footer: Rect,
}

impl QuizLayout {
    pub const PANEL_WIDTH: u16 = 26;

    pub fn new(area: Rect, footer_lines: u16) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(footer_lines.max(1)),
            ])
            .split(area);

        let panel_width = if area.width >= 70 { Self::PANEL_WIDTH } else { 0 };
        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(panel_width)])
            .split(vertical[1]);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(horizontal[0]);

        Self {
            tabs: vertical[0],
            question: left[0],
            answer: left[1],
            panel: horizontal[1],
            footer: vertical[2],
        }
    }
}

/// Greedily pack key hints into as few lines as fit `width`.
pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    const PREFIX: &str = "  ";
    const SEPARATOR: &str = "  ";

    if width == 0 {
        return Vec::new();
    }

    let mut out: Vec<String> = Vec::new();
    let mut current = String::new();
    for hint in hints.iter().filter(|h| !h.is_empty()) {
        if current.is_empty() {
            current = format!("{PREFIX}{hint}");
            continue;
        }
        let candidate = format!("{current}{SEPARATOR}{hint}");
        if candidate.chars().count() <= width {
            current = candidate;
        } else {
            out.push(std::mem::replace(&mut current, format!("{PREFIX}{hint}")));
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_POPUP_WIDTH: u16 = 50;
    const MIN_POPUP_HEIGHT: u16 = 7;

    let requested_w = area.width.saturating_mul(percent_x.min(100)) / 100;
    let requested_h = area.height.saturating_mul(percent_y.min(100)) / 100;

    let target_w = requested_w.max(MIN_POPUP_WIDTH).min(area.width);
    let target_h = requested_h.max(MIN_POPUP_HEIGHT).min(area.height);

    let left = area
        .x
        .saturating_add((area.width.saturating_sub(target_w)) / 2);
    let top = area
        .y
        .saturating_add((area.height.saturating_sub(target_h)) / 2);

    Rect::new(left, top, target_w, target_h)
}
