//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - Driving the inference session

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::application::{InferenceService, InferenceSession, ResourceLoader};
use crate::ports::ArtifactSource;

use super::ui::{
    form::{render_form, FormState},
    render_disclaimer,
    verdict::{render_verdict, VerdictState},
};

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Form,
    Verdict,
}

/// Main application state
pub struct App {
    /// Current screen
    screen: Screen,

    /// Whether the app should quit
    should_quit: bool,

    /// Submission state machine over the loaded resources
    session: InferenceSession,

    /// Respondent form state
    form_state: FormState,

    /// Last verdict, set by the first submission
    verdict_state: Option<VerdictState>,

    /// Short artifact digests shown in the form header
    digests: (Option<String>, Option<String>),
}

impl App {
    /// Load resources through `loader` and build the application.
    ///
    /// # Errors
    /// Returns error if the model or encoders cannot be loaded. Nothing is
    /// drawn in that case.
    pub fn new<S: ArtifactSource>(loader: &ResourceLoader<S>) -> Result<Self> {
        let resources = loader
            .load()
            .context("Failed to load model resources; check FINCLUSION_MODEL_PATH and FINCLUSION_ENCODERS_PATH")?;

        Ok(Self::with_dependencies(InferenceSession::new(
            InferenceService::new(resources),
        )))
    }

    /// Create application with an injected session.
    #[must_use]
    pub fn with_dependencies(session: InferenceSession) -> Self {
        let resources = session.service().resources();
        let form_state = FormState::from_encoders(resources.encoders());
        let (model, encoders) = resources.digests();
        let digests = (model.map(str::to_owned), encoders.map(str::to_owned));

        Self {
            screen: Screen::Form,
            should_quit: false,
            session,
            form_state,
            verdict_state: None,
            digests,
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(f.area());

                match (self.screen, &self.verdict_state) {
                    (Screen::Verdict, Some(verdict)) => render_verdict(f, chunks[0], verdict),
                    _ => render_form(
                        f,
                        chunks[0],
                        &self.form_state,
                        (self.digests.0.as_deref(), self.digests.1.as_deref()),
                    ),
                }

                render_disclaimer(f, chunks[1]);
            })?;
            self.after_draw();

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key.code, key.modifiers);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn after_draw(&mut self) {
        if self.screen == Screen::Verdict {
            self.session.rendered();
        }
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if matches!(key, KeyCode::Char('q') | KeyCode::Char('Q'))
            && modifiers.contains(KeyModifiers::CONTROL)
        {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Form => self.handle_form_key(key),
            Screen::Verdict => self.handle_verdict_key(key),
        }
    }

    fn handle_form_key(&mut self, key: KeyCode) {
        let changed = match key {
            KeyCode::Esc => {
                self.should_quit = true;
                false
            }
            KeyCode::Up | KeyCode::BackTab => {
                self.form_state.prev_field();
                false
            }
            KeyCode::Down | KeyCode::Tab => {
                self.form_state.next_field();
                false
            }
            KeyCode::Right => self.form_state.next_option(),
            KeyCode::Left => self.form_state.prev_option(),
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.form_state.load_sample_data();
                true
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.form_state.reset();
                false
            }
            KeyCode::Char(c) => self.form_state.input_char(c),
            KeyCode::Backspace => self.form_state.delete_char(),
            KeyCode::Delete => self.form_state.clear_field(),
            KeyCode::Enter => {
                self.submit_form();
                false
            }
            _ => false,
        };

        if changed {
            self.session.fields_changed();
        }
    }

    fn handle_verdict_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Esc => {
                self.session.acknowledge();
                self.screen = Screen::Form;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn submit_form(&mut self) {
        let record = match self.form_state.to_record() {
            Ok(record) => record,
            Err(e) => {
                self.form_state.error_message = Some(e);
                return;
            }
        };

        self.form_state.error_message = None;
        self.verdict_state = Some(match self.session.submit(&record) {
            Ok(prediction) => VerdictState::Complete { prediction },
            Err(e) => VerdictState::Error {
                message: e.to_string(),
            },
        });
        self.screen = Screen::Verdict;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::JsonArtifactStore;
    use crate::application::SessionState;
    use crate::domain::AccountOutcome;
    use std::path::Path;
    use tempfile::tempdir;

    fn app() -> App {
        let loader = ResourceLoader::new(JsonArtifactStore::in_dir("models"));
        App::new(&loader).expect("bundled resources load")
    }

    fn press(app: &mut App, key: KeyCode) {
        app.handle_key(key, KeyModifiers::NONE);
    }

    fn load_error(dir: &Path) -> String {
        let loader = ResourceLoader::new(JsonArtifactStore::in_dir(dir));
        match App::new(&loader) {
            Ok(_) => panic!("app must not be built without its artifacts"),
            Err(e) => format!("{e:#}"),
        }
    }

    #[test]
    fn test_missing_model_prevents_startup() {
        let temp = tempdir().expect("tempdir");
        std::fs::copy("models/label_encoders.json", temp.path().join("label_encoders.json"))
            .expect("copy encoders");

        let message = load_error(temp.path());
        assert!(message.contains("financial_inclusion_model.json"), "{message}");
    }

    #[test]
    fn test_missing_encoders_prevents_startup() {
        let temp = tempdir().expect("tempdir");
        std::fs::copy(
            "models/financial_inclusion_model.json",
            temp.path().join("financial_inclusion_model.json"),
        )
        .expect("copy model");

        let message = load_error(temp.path());
        assert!(message.contains("label_encoders.json"), "{message}");
    }

    #[test]
    fn test_starts_on_form_with_digests() {
        let app = app();
        assert_eq!(app.screen, Screen::Form);
        assert!(app.verdict_state.is_none());
        assert!(app.digests.0.is_some());
        assert!(app.digests.1.is_some());
    }

    #[test]
    fn test_sample_submit_and_return() {
        let mut app = app();
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.session.state(), SessionState::FieldsFilled);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::Verdict);
        assert_eq!(app.session.state(), SessionState::Predicted);
        match &app.verdict_state {
            Some(VerdictState::Complete { prediction }) => {
                assert!(matches!(
                    prediction.outcome,
                    AccountOutcome::LikelyBanked | AccountOutcome::UnlikelyBanked
                ));
            }
            other => panic!("expected a verdict, got {other:?}"),
        }

        app.after_draw();
        assert_eq!(app.session.state(), SessionState::Rendered);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen, Screen::Form);
        assert_eq!(app.session.state(), SessionState::Idle);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_invalid_number_stays_on_form() {
        let mut app = app();
        // Country -> Year
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Delete);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.screen, Screen::Form);
        assert!(app.form_state.error_message.is_some());
        assert_eq!(app.session.state(), SessionState::FieldsFilled);
    }

    #[test]
    fn test_option_change_marks_fields_filled() {
        let mut app = app();
        press(&mut app, KeyCode::Right);
        assert_eq!(app.session.state(), SessionState::FieldsFilled);
    }

    #[test]
    fn test_ctrl_q_quits() {
        let mut app = app();
        app.handle_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }

    #[test]
    fn test_plain_q_ignored_on_form() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }
}
