//! Interactive configuration editor
//!
//! A small menu-driven state machine over a `Config`. The editor itself
//! never touches the disk or the clipboard: `handle_key` reports save and
//! paste requests as `EditorAction`s and the event loop carries them out.

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    text::Line,
};
use tracing::{debug, warn};

use crate::config::{Config, ConfigStore};
use crate::ui::{MenuItem, Styles, render_confirm, render_footer, render_menu, render_text_entry};

const CUSTOM_MODEL: &str = "Custom...";
const MODEL_ROW: usize = 2;

/// Field edited in the text entry box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    ApiKey,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    MainMenu,
    AiSettings,
    GitSettings,
    TextEntry {
        field: TextField,
        buffer: String,
        return_to: Box<Screen>,
    },
    ModelPicker {
        options: Vec<String>,
        return_to: Box<Screen>,
    },
    ConfirmSave,
}

/// What the event loop should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    Continue,
    /// Leave without saving
    Exit,
    /// Persist the config, then leave
    Save,
    /// Read the clipboard and hand the text to `paste`
    Paste,
}

pub struct ConfigEditor {
    config: Config,
    screen: Screen,
    cursor: usize,
    message: Option<String>,
    dirty: bool,
}

impl ConfigEditor {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            screen: Screen::MainMenu,
            cursor: 0,
            message: None,
            dirty: false,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    #[cfg(test)]
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    #[cfg(test)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Whether there are unsaved changes
    #[cfg(test)]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> EditorAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            return EditorAction::Exit;
        }

        match self.screen {
            Screen::TextEntry { .. } => self.handle_text_key(key, ctrl),
            Screen::ConfirmSave => self.handle_confirm_key(key),
            _ => self.handle_menu_key(key),
        }
    }

    /// Append cleaned clipboard text to the text entry buffer
    pub fn paste(&mut self, text: &str) {
        if let Screen::TextEntry { buffer, .. } = &mut self.screen {
            buffer.push_str(&clean_clipboard_text(text));
        }
    }

    /// Called by the loop when saving failed
    pub fn save_failed(&mut self, error: &anyhow::Error) {
        self.message = Some(format!("Error saving config: {:#}", error));
        self.go_to(Screen::MainMenu);
    }

    /// Rows of the current menu screen
    pub fn menu_items(&self) -> Vec<MenuItem> {
        let ai = &self.config.ai;
        let git = &self.config.git;
        match &self.screen {
            Screen::MainMenu => vec![
                MenuItem::action("AI Settings"),
                MenuItem::action("Git Settings"),
                MenuItem::action("Save & Exit"),
            ],
            Screen::AiSettings => {
                let key = if ai.api_key.is_empty() {
                    "(not set)".to_string()
                } else {
                    ai.masked_api_key()
                };
                let model = if ai.model.is_empty() {
                    format!("{} (default)", ai.effective_model())
                } else {
                    ai.model.clone()
                };
                vec![
                    MenuItem::setting("Provider", ai.provider.name()),
                    MenuItem::setting("API Key", key),
                    MenuItem::setting("Model", model),
                    MenuItem::action("← Back"),
                ]
            }
            Screen::GitSettings => vec![
                MenuItem::setting("Auto Stage", on_off(git.auto_stage)),
                MenuItem::setting("Show Diff", on_off(git.show_diff)),
                MenuItem::setting("Confirm Push", on_off(git.confirm_push)),
                MenuItem::setting("Direct Commit", on_off(git.direct_commit)),
                MenuItem::setting("Interactive Mode", on_off(git.interactive)),
                MenuItem::setting("Use AI", on_off(git.use_ai)),
                MenuItem::action("← Back"),
            ],
            Screen::ModelPicker { options, .. } => {
                options.iter().map(|o| MenuItem::action(o)).collect()
            }
            Screen::TextEntry { .. } | Screen::ConfirmSave => Vec::new(),
        }
    }

    fn go_to(&mut self, screen: Screen) {
        self.screen = screen;
        self.cursor = 0;
    }

    /// Return to a previous screen, keeping the cursor within its rows
    fn back_to(&mut self, screen: Screen) {
        self.screen = screen;
        let last = self.menu_items().len().saturating_sub(1);
        self.cursor = self.cursor.min(last);
    }

    fn changed(&mut self, message: String) {
        debug!(%message, "config changed");
        self.message = Some(message);
        self.dirty = true;
    }

    fn handle_menu_key(&mut self, key: KeyEvent) -> EditorAction {
        let len = self.menu_items().len();
        match key.code {
            KeyCode::Char('q') => return EditorAction::Exit,
            KeyCode::Up | KeyCode::Char('k') => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor + 1 < len {
                    self.cursor += 1;
                }
            }
            KeyCode::Esc => match &self.screen {
                Screen::AiSettings | Screen::GitSettings => self.go_to(Screen::MainMenu),
                Screen::ModelPicker { return_to, .. } => {
                    let previous = (**return_to).clone();
                    self.back_to(previous);
                    self.cursor = MODEL_ROW;
                }
                _ => {}
            },
            KeyCode::Enter => return self.activate(),
            _ => {}
        }
        EditorAction::Continue
    }

    fn activate(&mut self) -> EditorAction {
        match (&self.screen, self.cursor) {
            (Screen::MainMenu, 0) => self.go_to(Screen::AiSettings),
            (Screen::MainMenu, 1) => self.go_to(Screen::GitSettings),
            (Screen::MainMenu, _) => {
                if !self.dirty {
                    return EditorAction::Exit;
                }
                self.go_to(Screen::ConfirmSave);
            }

            (Screen::AiSettings, 0) => {
                self.config.ai.provider = self.config.ai.provider.next();
                self.config.ai.model.clear();
                self.changed(format!("Provider changed to {}", self.config.ai.provider));
            }
            (Screen::AiSettings, 1) => {
                self.screen = Screen::TextEntry {
                    field: TextField::ApiKey,
                    buffer: self.config.ai.api_key.clone(),
                    return_to: Box::new(Screen::AiSettings),
                };
            }
            (Screen::AiSettings, 2) => self.open_model_picker(),
            (Screen::AiSettings, _) => self.go_to(Screen::MainMenu),

            (Screen::GitSettings, row) if row < 6 => {
                let git = &mut self.config.git;
                let (label, flag) = match row {
                    0 => ("Auto Stage", &mut git.auto_stage),
                    1 => ("Show Diff", &mut git.show_diff),
                    2 => ("Confirm Push", &mut git.confirm_push),
                    3 => ("Direct Commit", &mut git.direct_commit),
                    4 => ("Interactive Mode", &mut git.interactive),
                    _ => ("Use AI", &mut git.use_ai),
                };
                *flag = !*flag;
                let message = format!("{} {}", label, on_off(*flag));
                self.changed(message);
            }
            (Screen::GitSettings, _) => self.go_to(Screen::MainMenu),

            (Screen::ModelPicker { options, return_to }, row) => {
                let choice = options.get(row).cloned();
                let return_to = return_to.clone();
                match choice.as_deref() {
                    Some(CUSTOM_MODEL) => {
                        self.screen = Screen::TextEntry {
                            field: TextField::Model,
                            buffer: self.config.ai.model.clone(),
                            return_to,
                        };
                    }
                    Some(model) => {
                        self.config.ai.model = model.to_string();
                        self.changed(format!("Model set to {}", model));
                        self.back_to(*return_to);
                        self.cursor = MODEL_ROW;
                    }
                    None => {}
                }
            }

            (Screen::TextEntry { .. } | Screen::ConfirmSave, _) => {}
        }
        EditorAction::Continue
    }

    fn open_model_picker(&mut self) {
        let mut options: Vec<String> = self
            .config
            .ai
            .provider
            .models()
            .iter()
            .map(|m| m.to_string())
            .collect();
        options.push(CUSTOM_MODEL.to_string());

        let current = self.config.ai.effective_model();
        let cursor = options
            .iter()
            .position(|o| o == current)
            .unwrap_or(options.len() - 1);

        self.screen = Screen::ModelPicker {
            options,
            return_to: Box::new(Screen::AiSettings),
        };
        self.cursor = cursor;
    }

    fn handle_text_key(&mut self, key: KeyEvent, ctrl: bool) -> EditorAction {
        let Screen::TextEntry {
            field,
            buffer,
            return_to,
        } = &mut self.screen
        else {
            return EditorAction::Continue;
        };

        match key.code {
            KeyCode::Char('u') if ctrl => buffer.clear(),
            KeyCode::Char('v') if ctrl => return EditorAction::Paste,
            KeyCode::Char(c) if !ctrl && (' '..='~').contains(&c) => buffer.push(c),
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Esc => {
                let (field, previous) = (*field, (**return_to).clone());
                self.back_to(previous);
                if field == TextField::Model {
                    self.cursor = MODEL_ROW;
                }
            }
            KeyCode::Enter => {
                let (field, value, previous) = (*field, buffer.trim().to_string(), (**return_to).clone());
                self.apply_text(field, value);
                self.back_to(previous);
            }
            _ => {}
        }
        EditorAction::Continue
    }

    fn apply_text(&mut self, field: TextField, value: String) {
        let message = match (field, value.is_empty()) {
            (TextField::ApiKey, true) => "API Key cleared".to_string(),
            (TextField::ApiKey, false) => "API Key updated".to_string(),
            (TextField::Model, true) => "Model reset to default".to_string(),
            (TextField::Model, false) => format!("Model set to {}", value),
        };
        match field {
            TextField::ApiKey => self.config.ai.api_key = value,
            TextField::Model => {
                self.config.ai.model = value;
                self.cursor = MODEL_ROW;
            }
        }
        self.changed(message);
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> EditorAction {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => EditorAction::Save,
            KeyCode::Char('n') | KeyCode::Char('q') => EditorAction::Exit,
            KeyCode::Esc => {
                self.go_to(Screen::MainMenu);
                EditorAction::Continue
            }
            _ => EditorAction::Continue,
        }
    }

    fn title(&self) -> &'static str {
        match &self.screen {
            Screen::MainMenu | Screen::ConfirmSave => "Commet Configuration",
            Screen::AiSettings => "AI Settings",
            Screen::GitSettings => "Git Settings",
            Screen::ModelPicker { .. } => "Select Model",
            Screen::TextEntry {
                field: TextField::ApiKey,
                ..
            } => "API Key",
            Screen::TextEntry {
                field: TextField::Model,
                ..
            } => "Custom Model",
        }
    }

    fn render(&self, frame: &mut ratatui::Frame, styles: &Styles) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
            .split(frame.area());

        let buf = frame.buffer_mut();
        for x in chunks[0].x..chunks[0].x + chunks[0].width {
            buf[(x, chunks[0].y)].set_char(' ').set_style(styles.header);
        }
        buf.set_line(
            chunks[0].x,
            chunks[0].y,
            &Line::styled(" commet │ configuration", styles.header),
            chunks[0].width,
        );

        match &self.screen {
            Screen::TextEntry { field, buffer, .. } => {
                let shown = match field {
                    TextField::ApiKey => "*".repeat(buffer.chars().count()),
                    TextField::Model => buffer.clone(),
                };
                render_text_entry(buf, chunks[1], self.title(), &shown, styles);
            }
            Screen::ConfirmSave => {
                render_confirm(buf, chunks[1], "Save changes to the config file?", styles);
            }
            _ => render_menu(buf, chunks[1], self.title(), &self.menu_items(), self.cursor, styles),
        }

        render_footer(
            buf,
            chunks[2],
            &[("↑↓/jk", "move"), ("enter", "select"), ("esc", "back"), ("q", "quit")],
            self.message(),
            styles,
        );
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "✓ enabled" } else { "✗ disabled" }
}

/// Keep only printable ASCII from pasted text, dropping line breaks and tabs
pub fn clean_clipboard_text(text: &str) -> String {
    text.chars().filter(|c| (' '..='~').contains(c)).collect()
}

/// Run the editor over `config`. Returns true when changes were saved.
pub fn run_config_editor(store: &ConfigStore, config: Config) -> Result<bool> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let mut editor = ConfigEditor::new(config);
    let result = event_loop(&mut terminal, &mut editor, store);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, editor: &mut ConfigEditor, store: &ConfigStore) -> Result<bool> {
    let styles = Styles::new();

    loop {
        terminal.draw(|frame| editor.render(frame, &styles))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match editor.handle_key(key) {
            EditorAction::Continue => {}
            EditorAction::Exit => return Ok(false),
            EditorAction::Paste => match read_clipboard() {
                Ok(text) => editor.paste(&text),
                Err(e) => warn!(error = %e, "clipboard paste failed"),
            },
            EditorAction::Save => match store.save(editor.config()) {
                Ok(()) => return Ok(true),
                Err(e) => editor.save_failed(&anyhow::Error::new(e)),
            },
        }
    }
}

fn read_clipboard() -> Result<String, arboard::Error> {
    arboard::Clipboard::new()?.get_text()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Provider;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn press(editor: &mut ConfigEditor, codes: &[KeyCode]) -> EditorAction {
        let mut action = EditorAction::Continue;
        for code in codes {
            action = editor.handle_key(key(*code));
        }
        action
    }

    fn type_text(editor: &mut ConfigEditor, text: &str) {
        for c in text.chars() {
            editor.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_provider_cycle_resets_model() {
        let mut config = Config::default();
        config.ai.model = "gpt-4o-mini".to_string();
        let mut editor = ConfigEditor::new(config);

        press(&mut editor, &[KeyCode::Enter]);
        assert_eq!(editor.screen(), &Screen::AiSettings);

        let order = [Provider::Claude, Provider::Google, Provider::Groq, Provider::OpenAI];
        for expected in order {
            press(&mut editor, &[KeyCode::Enter]);
            assert_eq!(editor.config().ai.provider, expected);
            assert!(editor.config().ai.model.is_empty());
        }
        assert!(editor.is_dirty());
        assert_eq!(editor.message(), Some("Provider changed to openai"));
    }

    #[test]
    fn test_git_toggles() {
        let mut editor = ConfigEditor::new(Config::default());
        press(&mut editor, &[KeyCode::Down, KeyCode::Enter]);
        assert_eq!(editor.screen(), &Screen::GitSettings);
        assert!(!editor.is_dirty());

        press(&mut editor, &[KeyCode::Enter]);
        assert!(editor.config().git.auto_stage);
        assert_eq!(editor.message(), Some("Auto Stage ✓ enabled"));

        // Use AI is the sixth row and starts enabled
        press(&mut editor, &[KeyCode::Down; 5]);
        press(&mut editor, &[KeyCode::Enter]);
        assert!(!editor.config().git.use_ai);
        assert_eq!(editor.message(), Some("Use AI ✗ disabled"));
        assert!(editor.is_dirty());

        // Cursor clamps on the Back row
        press(&mut editor, &[KeyCode::Down, KeyCode::Down, KeyCode::Down]);
        assert_eq!(editor.cursor(), 6);
        press(&mut editor, &[KeyCode::Enter]);
        assert_eq!(editor.screen(), &Screen::MainMenu);
    }

    #[test]
    fn test_api_key_entry() {
        let mut editor = ConfigEditor::new(Config::default());
        press(&mut editor, &[KeyCode::Enter, KeyCode::Down, KeyCode::Enter]);
        assert!(matches!(editor.screen(), Screen::TextEntry { field: TextField::ApiKey, .. }));

        type_text(&mut editor, "sk-abcq");
        press(&mut editor, &[KeyCode::Backspace]);
        editor.handle_key(ctrl('v'));
        editor.paste("12\n34\t\u{7f}");
        press(&mut editor, &[KeyCode::Enter]);

        assert_eq!(editor.screen(), &Screen::AiSettings);
        assert_eq!(editor.config().ai.api_key, "sk-abc1234");
        assert_eq!(editor.message(), Some("API Key updated"));
        assert_eq!(editor.cursor(), 1);
    }

    #[test]
    fn test_text_entry_clear_and_cancel() {
        let mut config = Config::default();
        config.ai.api_key = "old-key".to_string();
        let mut editor = ConfigEditor::new(config);
        press(&mut editor, &[KeyCode::Enter, KeyCode::Down, KeyCode::Enter]);

        editor.handle_key(ctrl('u'));
        type_text(&mut editor, "new");
        press(&mut editor, &[KeyCode::Esc]);

        assert_eq!(editor.screen(), &Screen::AiSettings);
        assert_eq!(editor.config().ai.api_key, "old-key");
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_paste_request() {
        let mut editor = ConfigEditor::new(Config::default());
        press(&mut editor, &[KeyCode::Enter, KeyCode::Down, KeyCode::Enter]);
        assert_eq!(editor.handle_key(ctrl('v')), EditorAction::Paste);

        // Outside text entry paste does nothing
        let mut idle = ConfigEditor::new(Config::default());
        idle.paste("ignored");
        assert_eq!(idle.screen(), &Screen::MainMenu);
    }

    #[test]
    fn test_model_picker() {
        let mut editor = ConfigEditor::new(Config::default());
        press(&mut editor, &[KeyCode::Enter, KeyCode::Down, KeyCode::Down, KeyCode::Enter]);

        let Screen::ModelPicker { options, return_to } = editor.screen().clone() else {
            panic!("expected model picker");
        };
        assert_eq!(*return_to, Screen::AiSettings);
        assert_eq!(options.first().map(String::as_str), Some(Provider::OpenAI.default_model()));
        assert_eq!(options.last().map(String::as_str), Some(CUSTOM_MODEL));
        // Preselects the effective model
        assert_eq!(editor.cursor(), 0);

        press(&mut editor, &[KeyCode::Down, KeyCode::Enter]);
        assert_eq!(editor.config().ai.model, options[1]);
        assert_eq!(editor.screen(), &Screen::AiSettings);
        assert_eq!(editor.cursor(), MODEL_ROW);
    }

    #[test]
    fn test_custom_model() {
        let mut editor = ConfigEditor::new(Config::default());
        press(&mut editor, &[KeyCode::Enter, KeyCode::Down, KeyCode::Down, KeyCode::Enter]);
        let last = editor.menu_items().len() - 1;
        for _ in 0..last {
            press(&mut editor, &[KeyCode::Down]);
        }
        press(&mut editor, &[KeyCode::Enter]);
        assert!(matches!(editor.screen(), Screen::TextEntry { field: TextField::Model, .. }));

        type_text(&mut editor, "my-model");
        press(&mut editor, &[KeyCode::Enter]);
        assert_eq!(editor.config().ai.model, "my-model");
        assert_eq!(editor.screen(), &Screen::AiSettings);
    }

    #[test]
    fn test_custom_model_cancel_returns_to_model_row() {
        let mut editor = ConfigEditor::new(Config::default());
        press(&mut editor, &[KeyCode::Enter, KeyCode::Down, KeyCode::Down, KeyCode::Enter]);
        let last = editor.menu_items().len() - 1;
        for _ in 0..last {
            press(&mut editor, &[KeyCode::Down]);
        }
        press(&mut editor, &[KeyCode::Enter, KeyCode::Esc]);

        assert_eq!(editor.screen(), &Screen::AiSettings);
        assert_eq!(editor.cursor(), MODEL_ROW);
        assert!(editor.cursor() < editor.menu_items().len());
        assert!(editor.config().ai.model.is_empty());

        // Enter on the model row reopens the picker instead of leaving
        press(&mut editor, &[KeyCode::Enter]);
        assert!(matches!(editor.screen(), Screen::ModelPicker { .. }));
    }

    #[test]
    fn test_back_clamps_cursor_to_menu() {
        let mut editor = ConfigEditor::new(Config::default());
        editor.cursor = 9;
        editor.back_to(Screen::AiSettings);
        assert_eq!(editor.cursor(), 3);
    }

    #[test]
    fn test_exit_without_changes() {
        let mut editor = ConfigEditor::new(Config::default());
        let action = press(&mut editor, &[KeyCode::Down, KeyCode::Down, KeyCode::Enter]);
        assert_eq!(action, EditorAction::Exit);
    }

    #[test]
    fn test_save_flow() {
        let mut editor = ConfigEditor::new(Config::default());
        press(&mut editor, &[KeyCode::Enter, KeyCode::Enter, KeyCode::Esc]);
        assert_eq!(editor.screen(), &Screen::MainMenu);

        press(&mut editor, &[KeyCode::Down, KeyCode::Down, KeyCode::Enter]);
        assert_eq!(editor.screen(), &Screen::ConfirmSave);

        // esc goes back to the main menu
        press(&mut editor, &[KeyCode::Esc]);
        assert_eq!(editor.screen(), &Screen::MainMenu);

        press(&mut editor, &[KeyCode::Down, KeyCode::Down, KeyCode::Enter]);
        assert_eq!(press(&mut editor, &[KeyCode::Char('y')]), EditorAction::Save);
    }

    #[test]
    fn test_decline_save_exits() {
        let mut editor = ConfigEditor::new(Config::default());
        press(&mut editor, &[KeyCode::Down, KeyCode::Enter, KeyCode::Enter, KeyCode::Esc]);
        press(&mut editor, &[KeyCode::Down, KeyCode::Down, KeyCode::Enter]);
        assert_eq!(press(&mut editor, &[KeyCode::Char('n')]), EditorAction::Exit);
    }

    #[test]
    fn test_save_failure_returns_to_menu() {
        let mut editor = ConfigEditor::new(Config::default());
        press(&mut editor, &[KeyCode::Down, KeyCode::Enter, KeyCode::Enter, KeyCode::Esc]);
        press(&mut editor, &[KeyCode::Down, KeyCode::Down, KeyCode::Enter]);

        editor.save_failed(&anyhow::anyhow!("disk full"));
        assert_eq!(editor.screen(), &Screen::MainMenu);
        assert_eq!(editor.message(), Some("Error saving config: disk full"));
        assert!(editor.is_dirty());
    }

    #[test]
    fn test_quit_keys() {
        let mut editor = ConfigEditor::new(Config::default());
        assert_eq!(editor.handle_key(ctrl('c')), EditorAction::Exit);
        assert_eq!(press(&mut editor, &[KeyCode::Char('q')]), EditorAction::Exit);

        // q is text inside the entry box
        press(&mut editor, &[KeyCode::Enter, KeyCode::Down, KeyCode::Enter]);
        assert_eq!(press(&mut editor, &[KeyCode::Char('q')]), EditorAction::Continue);
    }

    #[test]
    fn test_clean_clipboard_text() {
        assert_eq!(clean_clipboard_text("sk-1\r\n2\t3"), "sk-123");
        assert_eq!(clean_clipboard_text("ключ-key"), "-key");
    }

    #[test]
    fn test_ai_settings_values() {
        let mut config = Config::default();
        config.ai.api_key = "sk-1234567890".to_string();
        let mut editor = ConfigEditor::new(config);
        press(&mut editor, &[KeyCode::Enter]);

        let items = editor.menu_items();
        assert_eq!(items[0].value.as_deref(), Some("openai"));
        assert_eq!(items[1].value.as_deref(), Some("sk-1*****7890"));
        assert_eq!(
            items[2].value,
            Some(format!("{} (default)", Provider::OpenAI.default_model()))
        );
    }
}
