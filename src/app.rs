use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use chrono::Local;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::document::backend::DocumentProvider;
use crate::document::render::QuestionRenderer;
use crate::session::question::collect_question_files;
use crate::session::quiz::{QuizSession, parse_section_names};
use crate::session::section::Section;
use crate::session::timer::{Countdown, TickOutcome};
use crate::store::json_store::SessionStore;
use crate::store::transcript;
use crate::ui::line_input::LineInput;
use crate::ui::section_view::SectionView;
use crate::ui::theme::Theme;

/// Soft limit for question files; larger files load but are logged.
const LARGE_FILE_BYTES: u64 = 100 * 1024 * 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptKind {
    EditSections,
    LoadFiles,
    TimerMinutes,
    GoToQuestion,
    SaveSession,
    LoadSession,
}

impl PromptKind {
    pub fn title(self) -> &'static str {
        match self {
            PromptKind::EditSections => "Edit Sections",
            PromptKind::LoadFiles => "Upload Questions",
            PromptKind::TimerMinutes => "Start Timer",
            PromptKind::GoToQuestion => "Go To Question",
            PromptKind::SaveSession => "Save Session",
            PromptKind::LoadSession => "Load Session",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            PromptKind::EditSections => {
                "Section names separated by commas. Replaces all sections and answers."
            }
            PromptKind::LoadFiles => {
                "Image/PDF paths separated by commas, or one directory. [Tab] completes."
            }
            PromptKind::TimerMinutes => "Minutes (1-180).",
            PromptKind::GoToQuestion => "Question number.",
            PromptKind::SaveSession => "Session file (name or path). [Tab] completes.",
            PromptKind::LoadSession => "Session file to load. [Tab] completes.",
        }
    }

    fn completes_paths(self) -> bool {
        matches!(
            self,
            PromptKind::LoadFiles | PromptKind::SaveSession | PromptKind::LoadSession
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub is_error: bool,
}

pub enum Modal {
    Prompt { kind: PromptKind, input: LineInput },
    ConfirmSubmit,
    Notice(Notice),
}

pub struct App {
    pub session: QuizSession,
    /// One per section, same order as `session.sections()`.
    pub views: Vec<SectionView>,
    /// Index into the sections; `views.len()` selects the help tab.
    pub active_tab: usize,
    pub countdown: Countdown,
    pub renderer: QuestionRenderer,
    pub store: SessionStore,
    pub config: Config,
    pub theme: &'static Theme,
    pub modal: Option<Modal>,
    /// One-line feedback shown in the footer until the next action.
    pub flash: Option<String>,
    pub last_submission: Option<PathBuf>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, provider: Box<dyn DocumentProvider>) -> Result<Self> {
        let store = SessionStore::new(PathBuf::from(&config.session_dir))?;
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));
        let session = QuizSession::new(&config.default_sections, config.default_seconds())?;
        let views = session.sections().iter().map(|_| SectionView::new()).collect();

        Ok(Self {
            countdown: Countdown::new(session.time_left()),
            session,
            views,
            active_tab: 0,
            renderer: QuestionRenderer::new(provider),
            store,
            config,
            theme,
            modal: None,
            flash: None,
            last_submission: None,
            should_quit: false,
        })
    }

    pub fn active_section(&self) -> Option<usize> {
        (self.active_tab < self.session.sections().len()).then_some(self.active_tab)
    }

    pub fn is_help_tab(&self) -> bool {
        self.active_section().is_none()
    }

    pub fn tab_count(&self) -> usize {
        self.session.sections().len() + 1
    }

    pub fn next_tab(&mut self) {
        self.leave_tab();
        self.active_tab = (self.active_tab + 1) % self.tab_count();
    }

    pub fn prev_tab(&mut self) {
        self.leave_tab();
        let count = self.tab_count();
        self.active_tab = (self.active_tab + count - 1) % count;
    }

    pub fn show_help(&mut self) {
        self.leave_tab();
        self.active_tab = self.session.sections().len();
    }

    /// Editor text stays in the section's view until the question changes,
    /// so switching tabs records nothing.
    fn leave_tab(&mut self) {
        self.flash = None;
    }

    fn current(&mut self) -> Option<(usize, &mut Section)> {
        let idx = self.active_section()?;
        self.session.section_mut(idx).map(|s| (idx, s))
    }

    // --- answers ------------------------------------------------------------

    /// Copy the editor text of section `idx` into its answer map.
    pub fn save_answer(&mut self, idx: usize) {
        let Some(view) = self.views.get(idx) else {
            return;
        };
        let text = view.answer.value().to_string();
        if let Some(section) = self.session.section_mut(idx) {
            section.save_answer(&text);
        }
    }

    pub fn flush_answers(&mut self) {
        for idx in 0..self.views.len() {
            self.save_answer(idx);
        }
    }

    /// Re-resolve the display of section `idx` without touching its editor.
    pub fn render_question(&mut self, idx: usize) {
        let (Some(section), Some(view)) = (self.session.section_mut(idx), self.views.get_mut(idx))
        else {
            return;
        };
        match self.renderer.resolve(section) {
            Ok(rendered) => view.show(rendered),
            Err(e) => {
                warn!(section = section.name(), error = %e, "question could not be displayed");
                view.fail(e.to_string());
                self.modal = Some(Modal::Notice(Notice {
                    title: "Error".to_string(),
                    message: e.to_string(),
                    is_error: true,
                }));
            }
        }
    }

    /// Display the current question of section `idx` and put its saved
    /// answer (or nothing) into the editor.
    pub fn load_question(&mut self, idx: usize) {
        let Some(section) = self.session.section(idx) else {
            return;
        };
        if section.is_empty() {
            return;
        }
        let saved = section.current_answer().unwrap_or_default().to_string();
        if let Some(view) = self.views.get_mut(idx) {
            view.answer.set_value(&saved);
        }
        self.render_question(idx);
    }

    // --- navigation ---------------------------------------------------------

    pub fn next_question(&mut self) {
        self.navigate(Section::next_question);
    }

    pub fn prev_question(&mut self) {
        self.navigate(Section::prev_question);
    }

    /// Jump to `index` (0-based) in the active section.
    pub fn select_question(&mut self, index: usize) {
        self.navigate(|s| s.select_question(index));
    }

    fn navigate(&mut self, step: impl FnOnce(&mut Section) -> bool) {
        let Some(idx) = self.active_section() else {
            return;
        };
        self.save_answer(idx);
        self.flash = None;
        let moved = match self.session.section_mut(idx) {
            Some(section) => step(section),
            None => false,
        };
        if moved {
            if let Some(section) = self.session.section(idx) {
                debug!(section = section.name(), index = section.current_index(), "question changed");
            }
            self.load_question(idx);
        }
    }

    pub fn next_page(&mut self) {
        self.turn_page(Section::next_page);
    }

    pub fn prev_page(&mut self) {
        self.turn_page(Section::prev_page);
    }

    fn turn_page(&mut self, step: impl FnOnce(&mut Section) -> bool) {
        let Some((idx, section)) = self.current() else {
            return;
        };
        if step(section) {
            self.render_question(idx);
        }
    }

    pub fn mark_for_review(&mut self) {
        let number = self
            .current()
            .and_then(|(_, s)| s.mark_for_review().then(|| s.current_index() + 1));
        if let Some(number) = number {
            self.flash = Some(format!("Question {number} marked for review."));
        }
    }

    pub fn unmark_for_review(&mut self) {
        let number = self
            .current()
            .and_then(|(_, s)| s.unmark_for_review().then(|| s.current_index() + 1));
        if let Some(number) = number {
            self.flash = Some(format!("Question {number} unmarked."));
        }
    }

    // --- section and file management ---------------------------------------

    pub fn edit_sections(&mut self, input: &str) -> Result<()> {
        let names = parse_section_names(input)?;
        self.session.replace_sections(&names)?;
        self.renderer.clear();
        self.rebuild_views();
        info!(sections = ?names, "sections replaced");
        Ok(())
    }

    /// Replace the question list of the active section.
    pub fn load_files(&mut self, input: &str) -> Result<usize> {
        let Some(idx) = self.active_section() else {
            return Ok(0);
        };
        let questions = collect_question_files(input)?;
        for q in &questions {
            if let Ok(meta) = fs::metadata(&q.path)
                && meta.len() > LARGE_FILE_BYTES
            {
                warn!(path = %q.path.display(), bytes = meta.len(), "question file exceeds 100 MB");
            }
        }
        let count = questions.len();
        self.renderer.clear();
        if let Some(section) = self.session.section_mut(idx) {
            section.load_files(questions);
            info!(section = section.name(), count, "question files loaded");
        }
        if let Some(view) = self.views.get_mut(idx) {
            *view = SectionView::new();
        }
        self.load_question(idx);
        Ok(count)
    }

    fn rebuild_views(&mut self) {
        self.views = self
            .session
            .sections()
            .iter()
            .map(|_| SectionView::new())
            .collect();
        self.active_tab = 0;
    }

    // --- timer ----------------------------------------------------------------

    pub fn start_timer(&mut self, input: &str, now: Instant) -> Result<()> {
        let minutes = Countdown::parse_minutes(input)?;
        self.countdown.start(minutes, now)?;
        self.session.set_time_left(self.countdown.remaining());
        info!(minutes, generation = ?self.countdown.active_generation(), "timer started");
        Ok(())
    }

    pub fn resume_timer(&mut self, now: Instant) {
        if self.countdown.resume(now) {
            info!(remaining = self.countdown.remaining(), "timer resumed");
        } else {
            self.flash = Some("No time left to resume.".to_string());
        }
    }

    pub fn pause_timer(&mut self) {
        self.countdown.pause();
        self.session.set_time_left(self.countdown.remaining());
    }

    /// Advance the countdown to `now`; auto-submits when it runs out.
    pub fn on_tick(&mut self, now: Instant) {
        let outcome = self.countdown.advance(now);
        self.session.set_time_left(self.countdown.remaining());
        if outcome == TickOutcome::Expired {
            self.auto_submit();
        }
    }

    pub fn timer_display(&self) -> String {
        self.countdown.display()
    }

    // --- persistence ----------------------------------------------------------

    pub fn submit(&mut self) -> Result<PathBuf> {
        self.flush_answers();
        let dir = PathBuf::from(&self.config.transcript_dir);
        let path = transcript::write(&dir, &self.session, Local::now())?;
        self.last_submission = Some(path.clone());
        Ok(path)
    }

    fn auto_submit(&mut self) {
        info!("time is up, submitting");
        let notice = match self.submit() {
            Ok(path) => Notice {
                title: "Time's up!".to_string(),
                message: format!(
                    "Time is over. Your responses have been saved as '{}'.",
                    path.display()
                ),
                is_error: false,
            },
            Err(e) => Notice {
                title: "Time's up!".to_string(),
                message: format!("Time is over, but saving responses failed: {e:#}"),
                is_error: true,
            },
        };
        self.modal = Some(Modal::Notice(notice));
    }

    pub fn save_session(&mut self, input: &str) -> Result<PathBuf> {
        self.flush_answers();
        self.session.set_time_left(self.countdown.remaining());
        let path = self.store.resolve_path(input);
        self.store.save_session(&path, &self.session)?;
        Ok(path)
    }

    /// Replace the whole session with the one stored at `input`. On error
    /// the current session is left exactly as it was.
    pub fn load_session(&mut self, input: &str) -> Result<PathBuf> {
        let path = self.store.resolve_path(input);
        let session = self.store.load_session(&path)?;
        self.session = session;
        self.renderer.clear();
        self.countdown.restore(self.session.time_left());
        self.rebuild_views();
        for idx in 0..self.views.len() {
            self.load_question(idx);
        }
        Ok(path)
    }

    // --- modals ---------------------------------------------------------------

    pub fn open_prompt(&mut self, kind: PromptKind) {
        let initial = match kind {
            PromptKind::EditSections => self.session.section_names().join(", "),
            PromptKind::TimerMinutes => self.config.default_minutes.to_string(),
            _ => String::new(),
        };
        let input = if kind.completes_paths() {
            LineInput::path(&initial)
        } else {
            LineInput::new(&initial)
        };
        self.modal = Some(Modal::Prompt { kind, input });
    }

    /// Run the action behind a submitted prompt. Failures become an error
    /// notice; the prompt is closed either way.
    pub fn submit_prompt(&mut self, kind: PromptKind, value: &str, now: Instant) {
        self.modal = None;
        if value.trim().is_empty() {
            return;
        }
        let result: Result<Option<String>> = match kind {
            PromptKind::EditSections => self.edit_sections(value).map(|_| None),
            PromptKind::LoadFiles => self
                .load_files(value)
                .map(|n| Some(format!("Loaded {n} question file(s)."))),
            PromptKind::TimerMinutes => self.start_timer(value, now).map(|_| None),
            PromptKind::GoToQuestion => self.go_to_question(value).map(|_| None),
            PromptKind::SaveSession => self.save_session(value).map(|path| {
                Some(format!("Session saved to '{}'.", path.display()))
            }),
            PromptKind::LoadSession => self.load_session(value).map(|path| {
                Some(format!("Session loaded from '{}'.", path.display()))
            }),
        };
        match result {
            Ok(Some(message)) if self.modal.is_none() => self.flash = Some(message),
            Ok(_) => {}
            Err(e) => {
                warn!(prompt = kind.title(), error = %e, "action failed");
                self.modal = Some(Modal::Notice(Notice {
                    title: kind.title().to_string(),
                    message: format!("{e:#}"),
                    is_error: true,
                }));
            }
        }
    }

    fn go_to_question(&mut self, value: &str) -> Result<()> {
        let Some(idx) = self.active_section() else {
            return Ok(());
        };
        let count = self.session.section(idx).map(Section::len).unwrap_or(0);
        let number: usize = value.trim().parse().unwrap_or(0);
        if number == 0 || number > count {
            return Err(crate::error::QuizError::QuestionOutOfRange { got: number, count }.into());
        }
        self.select_question(number - 1);
        Ok(())
    }

    pub fn confirm_submit(&mut self) {
        self.modal = None;
        match self.submit() {
            Ok(path) => {
                self.modal = Some(Modal::Notice(Notice {
                    title: "Submitted".to_string(),
                    message: format!("Your responses have been saved as '{}'.", path.display()),
                    is_error: false,
                }))
            }
            Err(e) => {
                self.modal = Some(Modal::Notice(Notice {
                    title: "Submit".to_string(),
                    message: format!("{e:#}"),
                    is_error: true,
                }))
            }
        }
    }

    /// Sweep temporary page files before the process exits.
    pub fn shutdown(&mut self) {
        self.renderer.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::document::render::fake::FakeProvider;
    use crate::session::status::QuestionStatus;
    use tempfile::TempDir;

    fn test_app(dir: &TempDir, provider: FakeProvider) -> App {
        let config = Config {
            session_dir: dir.path().join("sessions").display().to_string(),
            transcript_dir: dir.path().join("out").display().to_string(),
            ..Config::default()
        };
        App::new(config, Box::new(provider)).unwrap()
    }

    /// Write `names` as empty files and return a comma separated path list.
    fn files(dir: &TempDir, names: &[&str]) -> String {
        names
            .iter()
            .map(|n| {
                let path = dir.path().join(n);
                fs::write(&path, b"").unwrap();
                path.display().to_string()
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn type_answer(app: &mut App, text: &str) {
        let idx = app.active_section().unwrap();
        app.views[idx].answer.set_value(text);
    }

    #[test]
    fn starts_with_default_sections() {
        let dir = TempDir::new().unwrap();
        let app = test_app(&dir, FakeProvider::default());
        assert_eq!(
            app.session.section_names(),
            vec!["Section 1", "Section 2", "Section 3"]
        );
        assert_eq!(app.views.len(), 3);
        assert_eq!(app.timer_display(), "30:00");
        assert!(!app.is_help_tab());
    }

    #[test]
    fn tabs_wrap_through_help() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir, FakeProvider::default());
        app.prev_tab();
        assert!(app.is_help_tab());
        app.next_tab();
        assert_eq!(app.active_section(), Some(0));
    }

    #[test]
    fn next_question_saves_typed_answer_and_restores_it() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir, FakeProvider::default());
        app.load_files(&files(&dir, &["q1.png", "q2.png"])).unwrap();

        type_answer(&mut app, "  first answer ");
        app.next_question();
        assert_eq!(app.session.section(0).unwrap().answer(0), Some("first answer"));
        assert_eq!(app.views[0].answer.value(), "");

        app.prev_question();
        assert_eq!(app.views[0].answer.value(), "first answer");
    }

    #[test]
    fn switching_tabs_keeps_draft_without_answering() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir, FakeProvider::default());
        app.load_files(&files(&dir, &["q1.png", "q2.png"])).unwrap();

        type_answer(&mut app, "half typed");
        app.next_tab();
        app.show_help();
        app.next_tab();
        assert_eq!(app.active_section(), Some(0));

        let section = app.session.section(0).unwrap();
        assert!(section.answers().is_empty());
        assert_eq!(section.status(0), QuestionStatus::NotVisited);
        assert_eq!(app.views[0].answer.value(), "half typed");

        app.next_question();
        assert_eq!(app.session.section(0).unwrap().answer(0), Some("half typed"));
    }

    #[test]
    fn empty_answer_round_trips_as_empty() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir, FakeProvider::default());
        app.load_files(&files(&dir, &["q1.png", "q2.png"])).unwrap();

        app.next_question();
        app.prev_question();
        let section = app.session.section(0).unwrap();
        assert_eq!(section.answer(0), Some(""));
        assert_eq!(section.status(0), QuestionStatus::Answered);
        assert_eq!(section.status(1), QuestionStatus::Answered);
    }

    #[test]
    fn select_question_saves_before_jumping() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir, FakeProvider::default());
        app.load_files(&files(&dir, &["q1.png", "q2.png", "q3.png"])).unwrap();

        type_answer(&mut app, "kept");
        app.select_question(2);
        let section = app.session.section(0).unwrap();
        assert_eq!(section.current_index(), 2);
        assert_eq!(section.answer(0), Some("kept"));

        app.select_question(9);
        assert_eq!(app.session.section(0).unwrap().current_index(), 2);
    }

    #[test]
    fn page_navigation_keeps_unsaved_text() {
        let dir = TempDir::new().unwrap();
        let pdf = dir.path().join("paper.pdf");
        let provider = FakeProvider::with(&[(pdf.to_str().unwrap(), 3)]);
        let mut app = test_app(&dir, provider);
        app.load_files(&pdf.display().to_string()).unwrap();

        type_answer(&mut app, "draft");
        app.next_page();
        app.next_page();
        app.next_page();
        assert_eq!(app.session.section(0).unwrap().current_page(), 2);
        assert_eq!(app.views[0].answer.value(), "draft");
        assert!(app.session.section(0).unwrap().answers().is_empty());

        let shown = app.views[0].shown.as_ref().unwrap();
        assert_eq!(shown.page.unwrap().index, 2);
    }

    #[test]
    fn missing_file_shows_error_and_keeps_position() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir, FakeProvider::default());
        let present = files(&dir, &["q1.png"]);
        let missing = dir.path().join("gone.png").display().to_string();
        app.load_files(&format!("{present}, {missing}")).unwrap();
        assert!(app.modal.is_none());

        app.next_question();
        assert_eq!(app.session.section(0).unwrap().current_index(), 1);
        assert!(matches!(app.modal, Some(Modal::Notice(Notice { is_error: true, .. }))));
        assert!(app.views[0].error.is_some());
        assert!(app.views[0].shown.as_ref().unwrap().source.ends_with("q1.png"));
    }

    #[test]
    fn mark_for_review_sets_flash() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir, FakeProvider::default());
        app.load_files(&files(&dir, &["q1.png"])).unwrap();
        app.mark_for_review();
        assert!(app.session.section(0).unwrap().is_marked(0));
        assert!(app.flash.as_deref().unwrap().contains("marked"));
    }

    #[test]
    fn edit_sections_resets_everything() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir, FakeProvider::default());
        app.load_files(&files(&dir, &["q1.png"])).unwrap();
        app.next_tab();

        app.edit_sections("Verbal, Quant").unwrap();
        assert_eq!(app.session.section_names(), vec!["Verbal", "Quant"]);
        assert_eq!(app.views.len(), 2);
        assert_eq!(app.active_tab, 0);
        assert!(app.session.section(0).unwrap().is_empty());

        assert!(app.edit_sections("A, A").is_err());
        assert_eq!(app.session.section_names(), vec!["Verbal", "Quant"]);
    }

    #[test]
    fn timer_prompt_rejects_out_of_range() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir, FakeProvider::default());
        let now = Instant::now();
        app.submit_prompt(PromptKind::TimerMinutes, "0", now);
        assert!(matches!(app.modal, Some(Modal::Notice(Notice { is_error: true, .. }))));
        assert!(!app.countdown.is_running());
        assert_eq!(app.timer_display(), "30:00");
    }

    #[test]
    fn expiry_auto_submits_once() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir, FakeProvider::default());
        app.load_files(&files(&dir, &["q1.png"])).unwrap();
        type_answer(&mut app, "last second");

        let t0 = Instant::now();
        app.start_timer("1", t0).unwrap();
        app.on_tick(t0 + Duration::from_secs(30));
        assert_eq!(app.timer_display(), "00:30");
        assert!(app.last_submission.is_none());

        app.on_tick(t0 + Duration::from_secs(60));
        let first = app.last_submission.clone().unwrap();
        assert!(matches!(app.modal, Some(Modal::Notice(Notice { is_error: false, .. }))));
        assert!(fs::read_to_string(&first).unwrap().contains("Q1: last second"));

        app.on_tick(t0 + Duration::from_secs(90));
        assert_eq!(app.last_submission, Some(first));
        let written = fs::read_dir(dir.path().join("out")).unwrap().count();
        assert_eq!(written, 1);
    }

    #[test]
    fn save_and_load_session_replace_state() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir, FakeProvider::default());
        app.load_files(&files(&dir, &["q1.png", "q2.png"])).unwrap();
        type_answer(&mut app, "saved");
        app.save_session("exam").unwrap();

        app.edit_sections("Other").unwrap();
        let path = app.load_session("exam").unwrap();
        assert!(path.ends_with("exam.json"));
        assert_eq!(
            app.session.section_names(),
            vec!["Section 1", "Section 2", "Section 3"]
        );
        assert_eq!(app.views[0].answer.value(), "saved");
        assert!(!app.countdown.is_running());
    }

    #[test]
    fn failed_load_keeps_current_session() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir, FakeProvider::default());
        let bad = dir.path().join("sessions").join("bad.json");
        fs::write(&bad, r#"{"sections": ["A"], "files": {}}"#).unwrap();

        app.submit_prompt(PromptKind::LoadSession, "bad", Instant::now());
        assert!(matches!(app.modal, Some(Modal::Notice(Notice { is_error: true, .. }))));
        assert_eq!(app.session.section_names().len(), 3);
    }

    #[test]
    fn go_to_question_uses_one_based_numbers() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir, FakeProvider::default());
        app.load_files(&files(&dir, &["q1.png", "q2.png"])).unwrap();

        app.submit_prompt(PromptKind::GoToQuestion, "2", Instant::now());
        assert_eq!(app.session.section(0).unwrap().current_index(), 1);

        app.submit_prompt(PromptKind::GoToQuestion, "3", Instant::now());
        assert!(app.modal.is_some());
        assert_eq!(app.session.section(0).unwrap().current_index(), 1);
    }
}
