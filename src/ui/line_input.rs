use std::fs;
use std::io;
use std::path::MAIN_SEPARATOR;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Submit,
    Cancel,
}

/// Candidates offered for the last comma segment, cycled with Tab.
struct Completion {
    /// Everything before the segment being completed.
    head: String,
    candidates: Vec<String>,
    index: usize,
}

/// Single-line editor used for answers and for modal prompts.
///
/// The cursor is a byte offset that always sits on a char boundary. Path
/// inputs complete the segment after the last comma on Tab, so several files
/// can be picked in one prompt.
pub struct LineInput {
    text: String,
    cursor: usize,
    complete_paths: bool,
    completion: Option<Completion>,
    /// Set when the directory for the last completion could not be read.
    pub completion_error: bool,
}

const MAX_CANDIDATES: usize = 64;

impl LineInput {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: text.len(),
            complete_paths: false,
            completion: None,
            completion_error: false,
        }
    }

    pub fn path(text: &str) -> Self {
        Self {
            complete_paths: true,
            ..Self::new(text)
        }
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    pub fn set_value(&mut self, text: &str) {
        self.completion = None;
        self.completion_error = false;
        self.text = text.to_string();
        self.cursor = self.text.len();
    }

    /// Text before the cursor, the char under it (None at the end) and the
    /// rest, for drawing a block cursor.
    pub fn render_parts(&self) -> (&str, Option<char>, &str) {
        let (before, rest) = self.text.split_at(self.cursor);
        let mut chars = rest.chars();
        match chars.next() {
            Some(ch) => (before, Some(ch), chars.as_str()),
            None => (before, None, ""),
        }
    }

    pub fn handle(&mut self, key: KeyEvent) -> InputResult {
        match key.code {
            KeyCode::Esc => return InputResult::Cancel,
            KeyCode::Enter => return InputResult::Submit,
            KeyCode::Tab if self.complete_paths => {
                self.cycle_completion(true);
                return InputResult::Continue;
            }
            KeyCode::BackTab if self.complete_paths => {
                self.cycle_completion(false);
                return InputResult::Continue;
            }
            _ => {}
        }

        self.completion = None;
        self.completion_error = false;
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Left => self.cursor = self.prev_boundary(),
            KeyCode::Right => self.cursor = self.next_boundary(),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.text.len(),
            KeyCode::Char('a') if ctrl => self.cursor = 0,
            KeyCode::Char('u') if ctrl => {
                self.text.replace_range(..self.cursor, "");
                self.cursor = 0;
            }
            KeyCode::Char('w') if ctrl => self.delete_word(),
            KeyCode::Backspace => {
                let start = self.prev_boundary();
                self.text.replace_range(start..self.cursor, "");
                self.cursor = start;
            }
            KeyCode::Delete => {
                let end = self.next_boundary();
                self.text.replace_range(self.cursor..end, "");
            }
            KeyCode::Char(ch) if !ctrl => {
                self.text.insert(self.cursor, ch);
                self.cursor += ch.len_utf8();
            }
            _ => {}
        }
        InputResult::Continue
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .chars()
            .next_back()
            .map_or(self.cursor, |ch| self.cursor - ch.len_utf8())
    }

    fn next_boundary(&self) -> usize {
        self.text[self.cursor..]
            .chars()
            .next()
            .map_or(self.cursor, |ch| self.cursor + ch.len_utf8())
    }

    /// Remove the word before the cursor along with trailing spaces.
    fn delete_word(&mut self) {
        let trimmed = self.text[..self.cursor].trim_end();
        let start = trimmed
            .char_indices()
            .rev()
            .find(|(_, ch)| ch.is_whitespace())
            .map_or(0, |(i, ch)| i + ch.len_utf8());
        self.text.replace_range(start..self.cursor, "");
        self.cursor = start;
    }

    fn cycle_completion(&mut self, forward: bool) {
        if let Some(completion) = self.completion.as_mut() {
            let count = completion.candidates.len();
            completion.index = if forward {
                (completion.index + 1) % count
            } else {
                (completion.index + count - 1) % count
            };
        } else {
            if self.cursor != self.text.len() {
                return;
            }
            let (head, segment) = split_last_segment(&self.text);
            match path_candidates(segment) {
                Ok(candidates) if !candidates.is_empty() => {
                    self.completion = Some(Completion {
                        head: head.to_string(),
                        candidates,
                        index: 0,
                    });
                }
                Ok(_) => return,
                Err(_) => {
                    self.completion_error = true;
                    return;
                }
            }
        }

        if let Some(completion) = &self.completion {
            self.text = format!(
                "{}{}",
                completion.head, completion.candidates[completion.index]
            );
            self.cursor = self.text.len();
        }
    }
}

/// Split at the last comma, keeping the comma and any following spaces in
/// the head: `"a.png, b"` -> (`"a.png, "`, `"b"`).
fn split_last_segment(text: &str) -> (&str, &str) {
    let Some(comma) = text.rfind(',') else {
        return ("", text);
    };
    let rest = &text[comma + 1..];
    let split = text.len() - rest.trim_start().len();
    text.split_at(split)
}

/// Entries of the segment's directory whose names start with its last
/// component. Directories come first and end with a separator. Dot files
/// are offered only when the typed name starts with a dot.
fn path_candidates(segment: &str) -> io::Result<Vec<String>> {
    let split = segment.rfind(['/', '\\']).map_or(0, |i| i + 1);
    let (dir, partial) = segment.split_at(split);

    let scan = match dir.strip_prefix('~') {
        Some(rest) => dirs::home_dir()
            .map(|home| format!("{}{rest}", home.display()))
            .unwrap_or_else(|| dir.to_string()),
        None if dir.is_empty() => ".".to_string(),
        None => dir.to_string(),
    };

    let mut found: Vec<(bool, String)> = Vec::new();
    for entry in fs::read_dir(scan)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if !name.starts_with(partial) || (name.starts_with('.') && !partial.starts_with('.')) {
            continue;
        }
        let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
        let path = if is_dir {
            format!("{dir}{name}{MAIN_SEPARATOR}")
        } else {
            format!("{dir}{name}")
        };
        found.push((!is_dir, path));
    }
    found.sort();
    found.truncate(MAX_CANDIDATES);
    Ok(found.into_iter().map(|(_, path)| path).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(input: &mut LineInput, code: KeyCode) -> InputResult {
        input.handle(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(input: &mut LineInput, text: &str) {
        for ch in text.chars() {
            press(input, KeyCode::Char(ch));
        }
    }

    #[test]
    fn typing_and_cursor_movement() {
        let mut input = LineInput::new("");
        type_str(&mut input, "x = 4");
        press(&mut input, KeyCode::Left);
        press(&mut input, KeyCode::Left);
        type_str(&mut input, "=");
        assert_eq!(input.value(), "x == 4");
        press(&mut input, KeyCode::Home);
        press(&mut input, KeyCode::Delete);
        assert_eq!(input.value(), " == 4");
        press(&mut input, KeyCode::End);
        press(&mut input, KeyCode::Backspace);
        assert_eq!(input.value(), " == ");
    }

    #[test]
    fn multibyte_text_keeps_char_boundaries() {
        let mut input = LineInput::new("π≈3");
        press(&mut input, KeyCode::Left);
        press(&mut input, KeyCode::Backspace);
        assert_eq!(input.value(), "π3");
        assert_eq!(input.render_parts(), ("π", Some('3'), ""));
        press(&mut input, KeyCode::Home);
        press(&mut input, KeyCode::Left);
        assert_eq!(input.render_parts(), ("", Some('π'), "3"));
    }

    #[test]
    fn control_shortcuts_edit_the_line() {
        let mut input = LineInput::new("the quick  ");
        input.handle(KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL));
        assert_eq!(input.value(), "the ");
        input.handle(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(input.value(), "");
        type_str(&mut input, "ab");
        input.handle(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL));
        type_str(&mut input, ">");
        assert_eq!(input.value(), ">ab");
        // Ctrl-E is a global key and does not move the cursor.
        input.handle(KeyEvent::new(KeyCode::Char('e'), KeyModifiers::CONTROL));
        assert_eq!(input.render_parts(), (">", Some('a'), "b"));
    }

    #[test]
    fn enter_and_escape_end_the_edit() {
        let mut input = LineInput::new("done");
        assert_eq!(press(&mut input, KeyCode::Enter), InputResult::Submit);
        assert_eq!(press(&mut input, KeyCode::Esc), InputResult::Cancel);
        assert_eq!(input.value(), "done");
    }

    #[test]
    fn plain_input_ignores_tab() {
        let mut input = LineInput::new("/");
        press(&mut input, KeyCode::Tab);
        assert_eq!(input.value(), "/");
    }

    #[test]
    fn last_segment_splits_after_comma_and_spaces() {
        assert_eq!(split_last_segment("a.png,  b"), ("a.png,  ", "b"));
        assert_eq!(split_last_segment("solo"), ("", "solo"));
        assert_eq!(split_last_segment("x,"), ("x,", ""));
    }

    #[test]
    fn tab_completes_last_segment_and_cycles() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("q1.png"), b"").unwrap();
        fs::write(dir.path().join("q2.pdf"), b"").unwrap();
        fs::write(dir.path().join(".hidden"), b"").unwrap();
        fs::create_dir(dir.path().join("q_more")).unwrap();
        let base = format!("{}{MAIN_SEPARATOR}", dir.path().display());

        let mut input = LineInput::path(&format!("first.png, {base}q"));
        press(&mut input, KeyCode::Tab);
        assert_eq!(
            input.value(),
            format!("first.png, {base}q_more{MAIN_SEPARATOR}")
        );
        press(&mut input, KeyCode::Tab);
        assert_eq!(input.value(), format!("first.png, {base}q1.png"));
        press(&mut input, KeyCode::BackTab);
        press(&mut input, KeyCode::BackTab);
        assert_eq!(input.value(), format!("first.png, {base}q2.pdf"));
    }

    #[test]
    fn unreadable_directory_flags_error_until_next_edit() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope").join("x");
        let mut input = LineInput::path(&missing.display().to_string());
        press(&mut input, KeyCode::Tab);
        assert!(input.completion_error);
        assert_eq!(input.value(), missing.display().to_string());
        type_str(&mut input, "y");
        assert!(!input.completion_error);
    }
}
