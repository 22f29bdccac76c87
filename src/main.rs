mod app;
mod config;
mod document;
mod error;
mod event;
mod session;
mod store;
mod ui;

use std::fs::{self, File};
use std::io;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use app::{App, Modal, Notice, PromptKind};
use config::Config;
use document::backend::PdfProvider;
use event::{EventHandler, UiEvent};
use session::quiz::parse_section_names;
use session::timer::Countdown;
use ui::components::help::{FOOTER_HINTS, HelpView};
use ui::components::question_panel::QuestionPanel;
use ui::components::question_view::QuestionView;
use ui::components::tab_bar::TabBar;
use ui::layout::{QuizLayout, centered_rect, pack_hint_lines};
use ui::line_input::{InputResult, LineInput};

#[derive(Parser)]
#[command(
    name = "quizdeck",
    version,
    about = "Timed, sectioned exam practice with image and PDF questions"
)]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Default timer length in minutes (1-180)")]
    minutes: Option<String>,

    #[arg(short, long, help = "Initial section names, comma separated")]
    sections: Option<String>,

    #[arg(long, help = "Session file to load at startup")]
    session: Option<String>,

    #[arg(long, help = "Directory submitted responses are written to")]
    transcripts: Option<String>,

    #[arg(long, help = "Write the effective configuration to the config file and exit")]
    write_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let mut config = Config::load().context("failed to read configuration")?;
    apply_overrides(&mut config, &cli)?;

    if cli.write_config {
        config.save().context("failed to write configuration")?;
        println!("Configuration written to {}", Config::config_path().display());
        return Ok(());
    }

    let mut app = App::new(config, Box::new(PdfProvider))?;
    if let Some(path) = cli.session.as_deref() {
        app.load_session(path)?;
    }
    info!(sections = ?app.session.section_names(), "starting");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(200));

    let result = run_app(&mut terminal, &mut app, &events);

    app.shutdown();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        error!(error = %err, "exited with error");
        eprintln!("Error: {err:?}");
    }
    if let Some(path) = &app.last_submission {
        println!("Responses saved to {}", path.display());
    }

    Ok(())
}

fn apply_overrides(config: &mut Config, cli: &Cli) -> Result<()> {
    if let Some(theme) = &cli.theme {
        config.theme = theme.clone();
    }
    if let Some(minutes) = &cli.minutes {
        config.default_minutes = Countdown::parse_minutes(minutes)?;
    }
    if let Some(sections) = &cli.sections {
        config.default_sections = parse_section_names(sections)?;
    }
    if let Some(dir) = &cli.transcripts {
        config.transcript_dir = dir.clone();
    }
    Ok(())
}

/// Log to a file under the data directory; the terminal belongs to the UI.
/// Failing to set up logging is not fatal.
fn init_logging() {
    let Some(dir) = dirs::data_dir().map(|d| d.join("quizdeck")) else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = File::options()
        .create(true)
        .append(true)
        .open(dir.join("quizdeck.log"))
    else {
        return;
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            UiEvent::Key(key) => handle_key(app, key),
            UiEvent::Tick | UiEvent::Resize => {}
        }
        // Every event advances the countdown, so typing never starves it.
        app.on_tick(Instant::now());

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.modal.take() {
        Some(Modal::Prompt { kind, input }) => handle_prompt_key(app, kind, input, key),
        Some(Modal::ConfirmSubmit) => handle_confirm_key(app, key),
        Some(Modal::Notice(notice)) => handle_notice_key(app, key, notice),
        None if app.is_help_tab() => handle_help_key(app, key),
        None => handle_quiz_key(app, key),
    }
}

fn handle_prompt_key(app: &mut App, kind: PromptKind, mut input: LineInput, key: KeyEvent) {
    match input.handle(key) {
        InputResult::Continue => app.modal = Some(Modal::Prompt { kind, input }),
        InputResult::Cancel => {}
        InputResult::Submit => {
            let value = input.value().to_string();
            app.submit_prompt(kind, &value, Instant::now());
        }
    }
}

fn handle_confirm_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => app.confirm_submit(),
        KeyCode::Char('n') | KeyCode::Esc => {}
        _ => app.modal = Some(Modal::ConfirmSubmit),
    }
}

fn handle_notice_key(app: &mut App, key: KeyEvent, notice: Notice) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => {}
        _ => app.modal = Some(Modal::Notice(notice)),
    }
}

/// Keys that work on every tab. Returns true when the key was consumed.
fn handle_global_key(app: &mut App, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Tab => app.next_tab(),
        KeyCode::BackTab => app.prev_tab(),
        KeyCode::F(1) => app.show_help(),
        KeyCode::F(5) => app.resume_timer(Instant::now()),
        KeyCode::F(6) => app.pause_timer(),
        KeyCode::Char('e') if ctrl => app.open_prompt(PromptKind::EditSections),
        KeyCode::Char('t') if ctrl => app.open_prompt(PromptKind::TimerMinutes),
        KeyCode::Char('s') if ctrl => app.open_prompt(PromptKind::SaveSession),
        KeyCode::Char('l') if ctrl => app.open_prompt(PromptKind::LoadSession),
        KeyCode::Char('x') if ctrl => app.modal = Some(Modal::ConfirmSubmit),
        _ => return false,
    }
    true
}

fn handle_help_key(app: &mut App, key: KeyEvent) {
    if !handle_global_key(app, key) && key.code == KeyCode::Esc {
        app.active_tab = 0;
    }
}

fn handle_quiz_key(app: &mut App, key: KeyEvent) {
    if handle_global_key(app, key) {
        return;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let Some(idx) = app.active_section() else {
        return;
    };
    match key.code {
        KeyCode::Up => app.prev_question(),
        KeyCode::Down => app.next_question(),
        KeyCode::PageUp => app.prev_page(),
        KeyCode::PageDown => app.next_page(),
        KeyCode::Char('r') if ctrl => app.mark_for_review(),
        KeyCode::Char('d') if ctrl => app.unmark_for_review(),
        KeyCode::Char('o') if ctrl => app.open_prompt(PromptKind::LoadFiles),
        KeyCode::Char('g') if ctrl => {
            if app.session.section(idx).is_some_and(|s| !s.is_empty()) {
                app.open_prompt(PromptKind::GoToQuestion);
            }
        }
        _ => {
            if app.session.section(idx).is_none_or(|s| s.is_empty()) {
                return;
            }
            if let InputResult::Submit = app.views[idx].answer.handle(key) {
                app.save_answer(idx);
                app.flash = Some("Answer saved.".to_string());
            }
        }
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let hints = footer_hints(app);
    let mut footer_lines = pack_hint_lines(&hints, area.width as usize);
    if let Some(flash) = &app.flash {
        footer_lines.insert(0, format!("  {flash}"));
    }
    let layout = QuizLayout::new(area, footer_lines.len() as u16);

    let tab_bar = TabBar::new(
        &app.session.section_names(),
        app.active_tab,
        app.timer_display(),
        app.countdown.is_running(),
        app.theme,
    );
    frame.render_widget(tab_bar, layout.tabs);

    match app.active_section() {
        Some(idx) => render_section(frame, app, idx, &layout),
        None => {
            let body = Rect {
                height: layout.question.height + layout.answer.height,
                width: layout.question.width + layout.panel.width,
                ..layout.question
            };
            frame.render_widget(HelpView::new(app.theme), body);
        }
    }

    let footer: Vec<Line> = footer_lines
        .into_iter()
        .map(|l| Line::from(Span::styled(l, Style::default().fg(colors.text_dim()))))
        .collect();
    frame.render_widget(Paragraph::new(footer), layout.footer);

    if let Some(modal) = &app.modal {
        render_modal(frame, app, modal);
    }
}

fn render_section(frame: &mut ratatui::Frame, app: &App, idx: usize, layout: &QuizLayout) {
    let colors = &app.theme.colors;
    let (Some(section), Some(view)) = (app.session.section(idx), app.views.get(idx)) else {
        return;
    };

    frame.render_widget(QuestionView::new(section, view, app.theme), layout.question);

    let focused = app.modal.is_none() && !section.is_empty();
    let block = Block::bordered()
        .title(" Answer ")
        .border_style(Style::default().fg(if focused {
            colors.border_focused()
        } else {
            colors.border()
        }));
    let line = if section.is_empty() {
        Line::from(Span::styled(
            "Upload questions to start answering.",
            Style::default().fg(colors.text_dim()),
        ))
    } else {
        input_line(&view.answer, focused, app)
    };
    frame.render_widget(Paragraph::new(line).block(block), layout.answer);

    if layout.panel.width > 0 {
        frame.render_widget(QuestionPanel::new(section, app.theme), layout.panel);
    }
}

fn input_line<'a>(input: &'a LineInput, show_cursor: bool, app: &App) -> Line<'a> {
    let colors = &app.theme.colors;
    let text = Style::default().fg(colors.fg());
    let (before, cursor, after) = input.render_parts();
    let mut spans = vec![Span::styled(before, text)];
    if show_cursor {
        let cursor_style = Style::default().fg(colors.bg()).bg(colors.fg());
        match cursor {
            Some(ch) => spans.push(Span::styled(ch.to_string(), cursor_style)),
            None => spans.push(Span::styled(" ", cursor_style)),
        }
    } else if let Some(ch) = cursor {
        spans.push(Span::styled(ch.to_string(), text));
    }
    spans.push(Span::styled(after, text));
    Line::from(spans)
}

fn footer_hints(app: &App) -> Vec<&'static str> {
    if app.modal.is_some() {
        return Vec::new();
    }
    if app.is_help_tab() {
        return vec!["[Tab] Sections", "[Esc] Back", "[Ctrl-C] Quit"];
    }
    FOOTER_HINTS.to_vec()
}

fn render_modal(frame: &mut ratatui::Frame, app: &App, modal: &Modal) {
    let colors = &app.theme.colors;
    let area = centered_rect(60, 30, frame.area());
    frame.render_widget(Clear, area);

    let (title, border, lines) = match modal {
        Modal::Prompt { kind, input } => {
            let mut lines = vec![
                Line::from(Span::styled(kind.hint(), Style::default().fg(colors.text_dim()))),
                Line::from(""),
                input_line(input, true, app),
            ];
            if input.completion_error {
                lines.push(Line::from(Span::styled(
                    "Could not read directory.",
                    Style::default().fg(colors.error()),
                )));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "[Enter] OK  [Esc] Cancel",
                Style::default().fg(colors.text_dim()),
            )));
            (kind.title().to_string(), colors.border_focused(), lines)
        }
        Modal::ConfirmSubmit => (
            "Submit".to_string(),
            colors.border_focused(),
            vec![
                Line::from(Span::styled(
                    "Are you sure you want to submit your answers?",
                    Style::default().fg(colors.fg()),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "[y] Submit  [n] Cancel",
                    Style::default().fg(colors.text_dim()),
                )),
            ],
        ),
        Modal::Notice(notice) => {
            let color = if notice.is_error {
                colors.error()
            } else {
                colors.success()
            };
            (
                notice.title.clone(),
                color,
                vec![
                    Line::from(Span::styled(
                        notice.message.clone(),
                        Style::default().fg(colors.fg()),
                    )),
                    Line::from(""),
                    Line::from(Span::styled("[Enter] OK", Style::default().fg(colors.text_dim()))),
                ],
            )
        }
    };

    let block = Block::bordered()
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(border).add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(colors.bg()));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}
