use std::io;
use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::config::Config;
use crate::models::ChapterIndex;
use crate::session::Session;
use crate::settings::Keymap;
use crate::ui::board::Board;
use crate::ui::windows::help::HelpWindow;
use crate::view::Screen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    NextChapter,
    PrevChapter,
    ScrollDown,
    ScrollUp,
    ToggleHelp,
    Quit,
}

/// Resolve a key press against the keymap. Arrow keys, Esc and Ctrl+C are
/// always bound.
pub fn action_for(keymap: &Keymap, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Right => Some(Action::NextChapter),
        KeyCode::Left => Some(Action::PrevChapter),
        KeyCode::Down => Some(Action::ScrollDown),
        KeyCode::Up => Some(Action::ScrollUp),
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char(c) => {
            if Keymap::matches(&keymap.next_chapter, c) {
                Some(Action::NextChapter)
            } else if Keymap::matches(&keymap.prev_chapter, c) {
                Some(Action::PrevChapter)
            } else if Keymap::matches(&keymap.scroll_down, c) {
                Some(Action::ScrollDown)
            } else if Keymap::matches(&keymap.scroll_up, c) {
                Some(Action::ScrollUp)
            } else if Keymap::matches(&keymap.help, c) {
                Some(Action::ToggleHelp)
            } else if Keymap::matches(&keymap.quit, c) {
                Some(Action::Quit)
            } else {
                None
            }
        }
        _ => None,
    }
}

/// UI-specific state; everything about the chapter itself lives in the session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    pub scroll: u16,
    pub show_help: bool,
    pub should_quit: bool,
}

impl UiState {
    /// Apply one action. Chapter changes go through the session commands
    /// and reset the scroll position when the index actually moved.
    pub fn apply(&mut self, session: &mut Session, action: Action) {
        if self.show_help {
            // Any key, quit included, only closes the popup.
            self.show_help = false;
            return;
        }

        match action {
            Action::NextChapter => {
                if session.advance() {
                    self.scroll = 0;
                }
            }
            Action::PrevChapter => {
                if session.retreat() {
                    self.scroll = 0;
                }
            }
            Action::ScrollDown => self.scroll = self.scroll.saturating_add(1),
            Action::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            Action::ToggleHelp => self.show_help = true,
            Action::Quit => self.should_quit = true,
        }
    }
}

/// Main reader application struct
pub struct Reader {
    session: Session,
    config: Config,
    ui_state: UiState,
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl Reader {
    pub fn new(config: Config, session: Session) -> eyre::Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            session,
            config,
            ui_state: UiState::default(),
            terminal,
        })
    }

    /// Run the main application loop
    pub fn run(&mut self) -> eyre::Result<()> {
        crossterm::terminal::enable_raw_mode()?;
        crossterm::execute!(io::stdout(), crossterm::terminal::EnterAlternateScreen)?;

        self.terminal.clear()?;
        self.terminal.hide_cursor()?;

        let result = self.event_loop();

        // Cleanup terminal even when the loop failed
        self.terminal.clear()?;
        self.terminal.show_cursor()?;
        crossterm::execute!(io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;
        crossterm::terminal::disable_raw_mode()?;

        result
    }

    fn event_loop(&mut self) -> eyre::Result<()> {
        loop {
            if self.ui_state.should_quit {
                break;
            }

            if self.session.poll() {
                log::debug!("Chapter {} settled", self.session.current_index());
            }

            {
                let session = &self.session;
                let config = &self.config;
                let ui_state = &self.ui_state;
                self.terminal.draw(|f| {
                    Self::render_static(f, session, config, ui_state);
                })?;
            }

            // Poll faster while a request is outstanding so the result shows up promptly
            let poll_timeout = if self.session.fetch_state().is_fetching() {
                Duration::from_millis(50)
            } else {
                Duration::from_millis(500)
            };

            if !crossterm::event::poll(poll_timeout)? {
                continue;
            }

            if let Ok(Event::Key(key)) = crossterm::event::read()
                && key.kind == KeyEventKind::Press
            {
                self.handle_key_event(key);
            }
        }

        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if let Some(action) = action_for(&self.config.keymap, key) {
            self.ui_state.apply(&mut self.session, action);
        } else if self.ui_state.show_help {
            self.ui_state.show_help = false;
        }
    }

    fn render_static(frame: &mut Frame, session: &Session, config: &Config, ui_state: &UiState) {
        let [header_area, board_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let index = session.current_index();
        let status = if session.fetch_state().is_fetching() {
            " (loading)"
        } else {
            ""
        };
        let header = Paragraph::new(Line::from(vec![
            Span::styled(" Surah ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("{}/{}{}", index, ChapterIndex::LAST, status)),
        ]));
        frame.render_widget(header, header_area);

        let screen = Screen::new(session.fetch_state(), &config.settings.labels);
        Board::new()
            .with_transliteration(config.settings.show_transliteration)
            .with_scroll(ui_state.scroll)
            .render(frame, board_area, &format!(" {} ", index), &screen);

        let footer = Paragraph::new(Self::footer_line(session, &config.keymap));
        frame.render_widget(footer, footer_area);

        if ui_state.show_help {
            HelpWindow::render(frame, frame.area(), &config.keymap);
        }
    }

    /// Navigation hints, dimmed at the bound they cannot cross.
    fn footer_line(session: &Session, keymap: &Keymap) -> Line<'static> {
        let enabled = Style::default().fg(Color::Green);
        let disabled = Style::default().fg(Color::DarkGray);

        Line::from(vec![
            Span::styled(
                format!(" ◀ {} Prev ", keymap.prev_chapter),
                if session.at_lower_bound() { disabled } else { enabled },
            ),
            Span::raw("  "),
            Span::styled(
                format!(" Next {} ▶ ", keymap.next_chapter),
                if session.at_upper_bound() { disabled } else { enabled },
            ),
            Span::raw("  "),
            Span::styled(
                format!("{} help  {} quit", keymap.help, keymap.quit),
                Style::default().fg(Color::DarkGray),
            ),
        ])
    }
}
