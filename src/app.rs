//! Interactive file selector
//!
//! Wraps the selector model with a crossterm event loop and ratatui
//! rendering. Diff previews load in the background through `DiffLoader`
//! and are applied as they arrive.

use std::io;
use std::sync::Arc;
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
    layout::{Constraint, Direction as LayoutDirection, Layout},
};
use tokio::runtime::Handle;
use tracing::{debug, warn};

use crate::git::{ChangeLists, Git, diff_stats};
use crate::loader::{DiffLoader, DiffSource};
use crate::selector::{Direction, Selector, SelectorOutcome};
use crate::syntax::{HighlightedLine, Highlighter};
use crate::ui::{
    FILE_LIST_WIDTH, Styles, footer::SELECTOR_HINTS, render_diff_pane, render_file_list,
    render_footer, render_header,
};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Let the user pick which of the changed files to commit
pub fn run_selector(git: Arc<Git>, runtime: Handle, changes: &ChangeLists) -> Result<SelectorOutcome> {
    let branch = branch_label(&git);
    let selector = Selector::new(
        &changes.union(),
        &changes.staged,
        &changes.unstaged,
        &changes.untracked,
    )?;
    let loader = DiffLoader::new(runtime, git);
    App::new(selector, loader, branch).run()
}

/// Branch shown in the header; empty (rendered as detached) when git fails
fn branch_label(git: &Git) -> String {
    git.current_branch().unwrap_or_else(|e| {
        warn!(error = %e, "could not read current branch");
        String::new()
    })
}

/// Selector application state
pub struct App<S: DiffSource> {
    selector: Selector,
    loader: DiffLoader<S>,
    highlighter: Highlighter,
    /// Highlighted bodies of the previewed diff
    highlighted: Vec<Option<HighlightedLine>>,
    /// Added and removed line counts of the previewed diff
    stats: (usize, usize),
    branch: String,
    styles: Styles,
}

impl<S: DiffSource> App<S> {
    pub fn new(selector: Selector, loader: DiffLoader<S>, branch: String) -> Self {
        Self {
            selector,
            loader,
            highlighter: Highlighter::new(),
            highlighted: Vec::new(),
            stats: (0, 0),
            branch,
            styles: Styles::new(),
        }
    }

    /// Run until the user confirms or cancels
    pub fn run(mut self) -> Result<SelectorOutcome> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        let result = self.event_loop(&mut terminal);

        // Restore the terminal before reporting any loop error
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<SelectorOutcome> {
        self.selector.set_display_height(terminal.size()?.height);
        let request = self.selector.request_current_diff();
        self.loader.request(request);

        loop {
            self.drain_diffs();

            terminal.draw(|frame| self.render(frame))?;

            if event::poll(POLL_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    Event::Resize(_, height) => self.selector.set_display_height(height),
                    _ => {}
                }
            }

            if let Some(outcome) = self.selector.take_outcome() {
                debug!(?outcome, "selector finished");
                return Ok(outcome);
            }
        }
    }

    /// Apply every finished diff load; stale ones are dropped by the model
    fn drain_diffs(&mut self) {
        while let Some(ready) = self.loader.poll() {
            let index = ready.index;
            let stats = diff_stats(&ready.text);
            if !self.selector.apply_diff(ready) {
                debug!(index, cursor = self.selector.cursor(), "discarded stale diff");
                continue;
            }

            let path = &self.selector.entries()[index].path;
            self.highlighted = self
                .highlighter
                .highlight_diff(path, &self.selector.preview().lines);
            self.stats = stats;
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('c') {
                self.selector.cancel();
            }
            return;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(Direction::Up),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(Direction::Down),
            KeyCode::Char(' ') => self.selector.toggle_selection(),
            KeyCode::Enter => {
                self.selector.confirm();
            }
            KeyCode::Char('q') | KeyCode::Esc => self.selector.cancel(),
            KeyCode::Left | KeyCode::Char('h') => self.selector.scroll_diff(Direction::Up, 1),
            KeyCode::Right | KeyCode::Char('l') => self.selector.scroll_diff(Direction::Down, 1),
            KeyCode::PageUp => self.selector.page_diff(Direction::Up),
            KeyCode::PageDown => self.selector.page_diff(Direction::Down),
            _ => {}
        }
    }

    fn move_cursor(&mut self, direction: Direction) {
        if let Some(request) = self.selector.move_cursor(direction) {
            self.loader.request(request);
        }
    }

    fn render(&self, frame: &mut ratatui::Frame) {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
            .split(frame.area());

        let content = Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints([Constraint::Length(FILE_LIST_WIDTH), Constraint::Min(0)])
            .split(chunks[1]);

        let preview = self.selector.preview();
        let entries = self.selector.entries();
        let current_file = preview.index.map(|i| entries[i].path.as_str());
        let included: Vec<bool> = (0..entries.len())
            .map(|i| self.selector.is_included(i))
            .collect();

        let buf = frame.buffer_mut();
        render_header(
            buf,
            chunks[0],
            &self.branch,
            self.selector.included_count(),
            entries.len(),
            self.stats.0,
            self.stats.1,
            current_file,
            &self.styles,
        );
        render_file_list(buf, content[0], entries, &included, self.selector.cursor(), &self.styles);
        render_diff_pane(
            buf,
            content[1],
            current_file,
            &preview.lines,
            &self.highlighted,
            preview.scroll,
            preview.loading,
            &self.styles,
        );
        render_footer(buf, chunks[2], SELECTOR_HINTS, None, &self.styles);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use ratatui::backend::TestBackend;
    use tokio::runtime::{Builder, Runtime};

    use super::*;
    use crate::git::FileStatus;
    use crate::selector::Selection;

    struct Fixed;

    impl DiffSource for Fixed {
        fn load(&self, path: &str, _status: FileStatus) -> String {
            format!("--- a/{p}\n+++ b/{p}\n@@ -1 +1,2 @@\n-old\n+new\n+more\n", p = path)
        }
    }

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn app(rt: &Runtime) -> App<Fixed> {
        let selector = Selector::new(
            &paths(&["a.rs", "b.rs"]),
            &paths(&["a.rs"]),
            &paths(&["b.rs"]),
            &[],
        )
        .unwrap();
        let loader = DiffLoader::new(rt.handle().clone(), Arc::new(Fixed));
        App::new(selector, loader, "main".to_string())
    }

    fn press(app: &mut App<Fixed>, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn wait_for_preview(app: &mut App<Fixed>, index: usize) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.selector.preview().index != Some(index) || app.selector.preview().loading {
            assert!(Instant::now() < deadline, "preview never arrived");
            std::thread::sleep(Duration::from_millis(5));
            app.drain_diffs();
        }
    }

    #[test]
    fn test_branch_label_survives_git_failure() {
        let Some((dir, git)) = crate::git::testing::scratch_repo() else {
            return;
        };
        std::fs::remove_dir_all(dir.path().join(".git")).unwrap();

        // Only meaningful when the temp dir is not nested in another checkout
        if git.current_branch().is_err() {
            assert_eq!(branch_label(&git), "");
        }
    }

    #[test]
    fn test_enter_confirms() {
        let rt = Builder::new_current_thread().enable_all().build().unwrap();
        let mut app = app(&rt);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Enter);

        assert_eq!(
            app.selector.take_outcome(),
            Some(SelectorOutcome::Confirmed(Selection {
                selected: paths(&["a.rs", "b.rs"]),
                to_unstage: vec![],
            }))
        );
    }

    #[test]
    fn test_cancel_keys() {
        let rt = Builder::new_current_thread().enable_all().build().unwrap();
        for key in [
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE),
            KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            let mut app = app(&rt);
            app.handle_key(key);
            assert_eq!(app.selector.take_outcome(), Some(SelectorOutcome::Cancelled));
        }
    }

    #[test]
    fn test_cursor_move_loads_preview() {
        let rt = Builder::new_current_thread().enable_all().build().unwrap();
        let mut app = app(&rt);
        press(&mut app, KeyCode::Down);
        wait_for_preview(&mut app, 1);

        assert_eq!(app.stats, (2, 1));
        assert_eq!(app.highlighted.len(), app.selector.preview().lines.len());
        assert!(app.selector.preview().lines.contains(&"+new".to_string()));
    }

    #[test]
    fn test_renders_all_panels() {
        let rt = Builder::new_current_thread().enable_all().build().unwrap();
        let mut app = app(&rt);
        let request = app.selector.request_current_diff();
        app.loader.request(request);
        wait_for_preview(&mut app, 0);

        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();

        let buf = terminal.backend().buffer();
        let text: String = (0..20)
            .map(|y| (0..100).map(|x| buf[(x, y)].symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");
        assert!(text.contains("[1/2 selected]"));
        assert!(text.contains("[x] ● a.rs"));
        assert!(text.contains("+new"));
        assert!(text.contains("enter confirm"));
    }
}
