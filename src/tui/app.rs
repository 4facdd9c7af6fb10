//! App state - Central state management for the TUI
//!
//! Wraps the [`UploadController`] and turns terminal input into
//! controller messages. The analysis request runs on a tokio task and
//! reports back through a channel, so the UI never blocks on the network.

use std::path::PathBuf;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::config::Config;
use crate::controller::{Effect, Msg, SessionState, UploadController};
use crate::error::SubmitError;
use crate::selector::{parse_dropped, parse_typed, SelectedFile};
use crate::service::AnalysisService;

/// Keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Typing a file path
    PathInput,
}

/// Main application state
pub struct App {
    pub controller: UploadController,
    service: Arc<dyn AnalysisService>,
    tx: UnboundedSender<Msg>,
    rx: UnboundedReceiver<Msg>,
    /// Endpoint shown in the header
    pub endpoint: String,
    pub mode: InputMode,
    /// Path being typed in PathInput mode
    pub path_input: String,
    /// Blocking notification; any key dismisses it
    pub notification: Option<String>,
    pub show_help: bool,
    pub should_quit: bool,
    pub status_message: String,
    /// Vertical scroll of the results region
    pub results_scroll: u16,
    /// Frame counter for the busy spinner
    pub frame_count: u64,
}

impl App {
    pub fn new(config: &Config, service: Arc<dyn AnalysisService>) -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            controller: UploadController::new(
                config.general.locale,
                config.animation.timing(),
            ),
            service,
            tx,
            rx,
            endpoint: crate::service::analyze_endpoint(&config.service.base_url),
            mode: InputMode::Normal,
            path_input: String::new(),
            notification: None,
            show_help: false,
            should_quit: false,
            status_message: "Press 'o' to choose a file, or drop one here. '?' for help".to_string(),
            results_scroll: 0,
            frame_count: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.controller.state()
    }

    /// Feed one message to the controller and carry out its effect
    pub fn dispatch(&mut self, msg: Msg) {
        let effect = self.controller.update(msg);
        self.apply(effect);
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::StartRequest(file) => {
                self.status_message = format!("Uploading {}...", file.name);
                self.spawn_request(file);
            }
            Effect::Notify(notification) => {
                let message = notification.message(self.controller.locale());
                self.status_message = message.clone();
                self.notification = Some(message);
            }
            Effect::RevealResults => {
                self.results_scroll = 0;
                if let Some(view) = self.controller.view() {
                    self.status_message = format!("Score: {}/100", view.score);
                }
            }
            Effect::ScrollToTop => {
                self.results_scroll = 0;
                self.status_message = "Session cleared".to_string();
            }
        }
    }

    /// Run the request on its own task; the outcome always comes back as
    /// `Msg::Settled`, even if the task panics
    fn spawn_request(&self, file: SelectedFile) {
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let request = tokio::spawn(async move { service.analyze(&file).await });
            let outcome = match request.await {
                Ok(outcome) => outcome,
                Err(e) => Err(SubmitError::Transport(format!("request task failed: {}", e))),
            };
            if tx.send(Msg::Settled(outcome)).is_err() {
                tracing::debug!("UI gone before the request settled");
            }
        });
    }

    /// Per-tick housekeeping: settled requests and animation
    pub fn on_tick(&mut self) {
        self.frame_count = self.frame_count.wrapping_add(1);
        while let Ok(msg) = self.rx.try_recv() {
            self.dispatch(msg);
        }
        self.controller.animator_mut().tick();
    }

    /// Record a file by path through the picker path
    pub fn choose_path(&mut self, path: PathBuf) {
        match SelectedFile::from_path(&path) {
            Ok(file) => {
                self.status_message = format!("Selected {} ({})", file.name, file.human_size());
                self.dispatch(Msg::FileChosen(file));
            }
            Err(e) => self.notification = Some(e.to_string()),
        }
    }

    /// Terminal paste, which is how a drag-and-drop arrives
    pub fn on_paste(&mut self, text: &str) {
        if self.mode == InputMode::PathInput {
            self.path_input.push_str(text.trim_end_matches(['\r', '\n']));
            return;
        }
        if self.controller.is_busy() {
            return;
        }
        let Some(path) = parse_dropped(text) else {
            return;
        };
        match SelectedFile::from_path(&path) {
            Ok(file) => {
                self.status_message = format!("Dropped {} ({})", file.name, file.human_size());
                self.dispatch(Msg::FileDropped(file));
            }
            Err(e) => self.notification = Some(e.to_string()),
        }
    }

    /// Global key handler
    pub fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.notification.is_some() {
            self.notification = None;
            return;
        }

        if self.show_help {
            self.show_help = false;
            return;
        }

        match self.mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::PathInput => self.handle_path_key(key),
        }
    }

    /// Key handler for the main view
    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,

            KeyCode::Char('o') | KeyCode::Char('/') => {
                if self.controller.is_busy() {
                    return;
                }
                self.mode = InputMode::PathInput;
                self.path_input.clear();
                self.status_message = "Type a path, Enter to select, Esc to cancel".to_string();
            }

            KeyCode::Enter | KeyCode::Char('s') => {
                if self.controller.is_busy() {
                    self.status_message = "Analysis already running".to_string();
                    return;
                }
                self.dispatch(Msg::Submit);
            }

            KeyCode::Char('r') => self.dispatch(Msg::Reset),

            KeyCode::Char('j') | KeyCode::Down => {
                self.results_scroll = self.results_scroll.saturating_add(1)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.results_scroll = self.results_scroll.saturating_sub(1)
            }
            KeyCode::Char('g') | KeyCode::Home => self.results_scroll = 0,

            KeyCode::Char('?') | KeyCode::F(1) => self.show_help = true,

            _ => {}
        }
    }

    /// Handle keys while typing a path
    fn handle_path_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                self.mode = InputMode::Normal;
                let typed = std::mem::take(&mut self.path_input);
                match parse_typed(&typed) {
                    Some(path) => self.choose_path(expand_home(path)),
                    None => self.status_message = "No path entered".to_string(),
                }
            }
            KeyCode::Esc => {
                self.mode = InputMode::Normal;
                self.path_input.clear();
                self.status_message = "Selection cancelled".to_string();
            }
            KeyCode::Backspace => {
                self.path_input.pop();
            }
            KeyCode::Char(c) => self.path_input.push(c),
            _ => {}
        }
    }
}

/// `~/x` to the home directory
fn expand_home(path: PathBuf) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or(path),
        Err(_) => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Locale;
    use crate::model::AnalysisResult;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    struct FakeService {
        calls: AtomicUsize,
        outcome: Result<AnalysisResult, SubmitError>,
    }

    #[async_trait]
    impl AnalysisService for FakeService {
        async fn analyze(&self, _file: &SelectedFile) -> Result<AnalysisResult, SubmitError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    fn sample() -> AnalysisResult {
        AnalysisResult {
            score: 70,
            word_count: 300,
            found_sections: vec!["contact".into()],
            missing_sections: vec![],
            advice: vec!["Use action verbs".into()],
            has_email: None,
            has_phone: None,
        }
    }

    fn make_app(outcome: Result<AnalysisResult, SubmitError>) -> (App, Arc<FakeService>) {
        let mut config = Config::default();
        config.general.locale = Locale::En;
        let service = Arc::new(FakeService {
            calls: AtomicUsize::new(0),
            outcome,
        });
        (App::new(&config, service.clone()), service)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn write_file(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, b"content").unwrap();
        path
    }

    async fn settle(app: &mut App) {
        let msg = app.rx.recv().await.unwrap();
        app.dispatch(msg);
    }

    #[tokio::test]
    async fn test_keybinding_quit() {
        let (mut app, _) = make_app(Ok(sample()));
        assert!(!app.should_quit);
        app.on_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_submit_without_file_shows_notification() {
        let (mut app, service) = make_app(Ok(sample()));
        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.notification.as_deref(), Some("Please choose a file first"));
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);

        // any key dismisses it
        app.on_key(key(KeyCode::Char('x')));
        assert!(app.notification.is_none());
        assert_eq!(app.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn test_drop_then_submit() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "resume.pdf");
        let (mut app, service) = make_app(Ok(sample()));

        app.on_paste(&format!("'{}'\n", path.display()));
        assert_eq!(app.state(), SessionState::FileSelected);

        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.state(), SessionState::Submitting);
        assert!(app.controller.is_busy());

        // a second submit while busy does nothing
        app.on_key(key(KeyCode::Enter));

        settle(&mut app).await;
        assert_eq!(app.state(), SessionState::Displaying);
        assert!(!app.controller.is_busy());
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
        assert_eq!(app.status_message, "Score: 70/100");
    }

    #[tokio::test]
    async fn test_failed_request_notifies() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "resume.docx");
        let (mut app, _) = make_app(Err(SubmitError::Service {
            status: 400,
            message: Some("bad upload".into()),
        }));

        app.choose_path(path);
        app.on_key(key(KeyCode::Char('s')));
        settle(&mut app).await;

        assert_eq!(app.notification.as_deref(), Some("Error: bad upload"));
        assert_eq!(app.state(), SessionState::FileSelected);
        assert!(!app.controller.is_busy());
    }

    #[tokio::test]
    async fn test_path_input_mode() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "cv.PDF");
        let (mut app, _) = make_app(Ok(sample()));

        app.on_key(key(KeyCode::Char('o')));
        assert_eq!(app.mode, InputMode::PathInput);
        for c in path.display().to_string().chars() {
            app.on_key(key(KeyCode::Char(c)));
        }
        app.on_key(key(KeyCode::Enter));

        assert_eq!(app.mode, InputMode::Normal);
        assert_eq!(app.controller.selected().unwrap().extension, "pdf");
    }

    #[tokio::test]
    async fn test_path_input_with_spaces() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "my cv.pdf");
        let (mut app, _) = make_app(Ok(sample()));

        app.on_key(key(KeyCode::Char('o')));
        for c in path.display().to_string().chars() {
            app.on_key(key(KeyCode::Char(c)));
        }
        app.on_key(key(KeyCode::Enter));

        assert!(app.notification.is_none());
        assert_eq!(app.controller.selected().unwrap().name, "my cv.pdf");
        assert_eq!(app.state(), SessionState::FileSelected);
    }

    #[tokio::test]
    async fn test_drop_of_missing_file() {
        let (mut app, _) = make_app(Ok(sample()));
        app.on_paste("/definitely/not/here.pdf");
        assert!(app.notification.is_some());
        assert_eq!(app.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn test_reset_after_results() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "resume.pdf");
        let (mut app, _) = make_app(Ok(sample()));

        app.choose_path(path);
        app.on_key(key(KeyCode::Enter));
        settle(&mut app).await;
        app.on_tick();
        app.on_key(key(KeyCode::Char('j')));
        assert_eq!(app.results_scroll, 1);

        app.on_key(key(KeyCode::Char('r')));
        assert_eq!(app.state(), SessionState::Idle);
        assert_eq!(app.results_scroll, 0);
        assert!(app.controller.selected().is_none());
        assert_eq!(app.controller.animator().displayed(), 0);
    }

    #[test]
    fn test_expand_home() {
        let plain = PathBuf::from("/tmp/cv.pdf");
        assert_eq!(expand_home(plain.clone()), plain);
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home(PathBuf::from("~/cv.pdf")), home.join("cv.pdf"));
        }
    }
}
