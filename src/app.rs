// SPDX-License-Identifier: MIT
//
// The studio application — state machine and frame painter.
//
// One `App` owns the session plus everything presentational: the active
// view, the selected slot, the toast line, and the clipboard handle.
// Key handling mutates, `render` is read-only and returns the full
// frame as one escape-sequence string, written in a single syscall by
// the caller. No partial repaints; the frames are small.

use std::fmt::Write as _;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use lumo_color::Rgb;
use lumo_core::{Gradient, Session};

use crate::clipboard::Clipboard;
use crate::export;
use crate::input::Key;
use crate::term::Size;

/// How long a toast stays on screen.
const TOAST_DURATION: Duration = Duration::from_secs(2);

/// Rows per gradient card: title, two swatch rows, separator.
const CARD_HEIGHT: u16 = 4;

/// Rows reserved for header and footer chrome.
const CHROME_HEIGHT: u16 = 4;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

// ─── Views and toasts ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Grid,
    Favorites,
    Help,
}

#[derive(Debug)]
struct Toast {
    message: String,
    expires_at: Instant,
}

// ─── App ────────────────────────────────────────────────────────────────────

/// The running studio.
pub struct App {
    session: Session,
    clipboard: Clipboard,
    export_dir: PathBuf,
    view: View,
    selected: usize,
    selected_favorite: usize,
    toast: Option<Toast>,
    dirty: bool,
}

impl App {
    /// Build the app around a started session. Opens the help view when
    /// this is the user's first run.
    #[must_use]
    pub fn new(session: Session, export_dir: PathBuf) -> Self {
        let view = if session.first_run() {
            View::Help
        } else {
            View::Grid
        };
        Self {
            session,
            clipboard: Clipboard::new(),
            export_dir,
            view,
            selected: 0,
            selected_favorite: 0,
            toast: None,
            dirty: true,
        }
    }

    /// True when the frame needs repainting. Cleared by [`render`](Self::render).
    #[must_use]
    pub const fn dirty(&self) -> bool {
        self.dirty
    }

    /// Expire a stale toast. Returns true if the frame changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| now >= toast.expires_at)
        {
            self.toast = None;
            self.dirty = true;
        }
        self.dirty
    }

    fn toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    // ── Key handling ────────────────────────────────────────────────────

    /// Dispatch one keypress. Returns true when the app should quit.
    pub fn handle_key(&mut self, key: Key) -> bool {
        self.dirty = true;

        if self.view == View::Help {
            // Any key closes help; the first close records the visit.
            self.session.mark_visited();
            self.view = View::Grid;
            return matches!(key, Key::Char('q'));
        }

        match key {
            Key::Char('q') => return true,
            Key::Char('?') => self.view = View::Help,
            Key::Char('v') => self.toggle_favorites_view(),
            Key::Escape => self.view = View::Grid,
            Key::Char('t') => {
                let theme = self.session.cycle_theme();
                self.toast(format!("Theme: {}", theme.name()));
            }
            Key::Char(' ') if self.view == View::Grid => {
                if self.session.regenerate() {
                    self.clamp_selection();
                } else {
                    self.toast("Everything is locked");
                }
            }
            Key::Left if self.view == View::Grid => {
                if self.session.navigate(-1) {
                    self.clamp_selection();
                }
            }
            Key::Right if self.view == View::Grid => {
                if self.session.navigate(1) {
                    self.clamp_selection();
                }
            }
            Key::Char('j') | Key::Down => self.select(1),
            Key::Char('k') | Key::Up => self.select(-1),
            Key::Char('l') if self.view == View::Grid => {
                if let Some(id) = self.selected_id() {
                    match self.session.toggle_lock(&id) {
                        Some(true) => self.toast("Locked"),
                        Some(false) => self.toast("Unlocked"),
                        None => {}
                    }
                }
            }
            Key::Char('f') => {
                if let Some(id) = self.selected_id() {
                    match self.session.toggle_favorite(&id) {
                        Some(true) => self.toast("Added to favorites"),
                        Some(false) => self.toast("Removed from favorites"),
                        None => {}
                    }
                    self.clamp_selection();
                }
            }
            Key::Char('c') => self.copy_selected(),
            Key::Char('e') => self.export_selected(),
            _ => self.dirty = false,
        }
        false
    }

    fn toggle_favorites_view(&mut self) {
        self.view = match self.view {
            View::Favorites => View::Grid,
            _ => {
                self.selected_favorite = 0;
                View::Favorites
            }
        };
    }

    fn select(&mut self, delta: isize) {
        let (index, len) = match self.view {
            View::Favorites => (&mut self.selected_favorite, self.session.favorites().len()),
            _ => (&mut self.selected, self.session.current().len()),
        };
        if len == 0 {
            return;
        }
        let next = index.saturating_add_signed(delta);
        *index = next.min(len - 1);
    }

    fn clamp_selection(&mut self) {
        let len = self.session.current().len();
        if len > 0 {
            self.selected = self.selected.min(len - 1);
        }
        let favorites = self.session.favorites().len();
        self.selected_favorite = self.selected_favorite.min(favorites.saturating_sub(1));
    }

    /// Id of the gradient the cursor is on, in the active view.
    fn selected_id(&self) -> Option<String> {
        self.selected_gradient().map(|g| g.id.clone())
    }

    fn selected_gradient(&self) -> Option<&Gradient> {
        match self.view {
            View::Favorites => self
                .session
                .favorites()
                .entries()
                .get(self.selected_favorite),
            _ => self.session.current().get(self.selected),
        }
    }

    fn copy_selected(&mut self) {
        let Some(gradient) = self.selected_gradient() else {
            return;
        };
        let declaration = gradient.css_declaration();
        match self.clipboard.copy(&declaration) {
            Ok(()) => self.toast("CSS copied to clipboard!"),
            Err(err) => self.toast(format!("Copy failed: {err}")),
        }
    }

    fn export_selected(&mut self) {
        let Some(gradient) = self.selected_gradient() else {
            return;
        };
        match export::write_png(gradient, &self.export_dir) {
            Ok(path) => self.toast(format!("Saved {}", path.display())),
            Err(err) => self.toast(format!("Export failed: {err:#}")),
        }
    }

    /// Persist session state on the way out.
    pub fn shutdown(&mut self) {
        self.session.mark_visited();
        self.session.persist();
    }

    // ── Rendering ───────────────────────────────────────────────────────

    /// Paint the full frame for a terminal of `size`.
    pub fn render(&mut self, size: Size) -> String {
        self.dirty = false;

        let mut frame = String::with_capacity(8 * 1024);
        frame.push_str("\x1b[H\x1b[2J");

        match self.view {
            View::Help => self.render_help(&mut frame),
            View::Grid => {
                let current = self.session.current().to_vec();
                self.render_cards(&mut frame, size, &current, self.selected, "gradients");
            }
            View::Favorites => {
                let favorites = self.session.favorites().entries().to_vec();
                self.render_cards(
                    &mut frame,
                    size,
                    &favorites,
                    self.selected_favorite,
                    "favorites",
                );
            }
        }

        self.render_footer(&mut frame, size);
        frame
    }

    fn render_cards(
        &self,
        frame: &mut String,
        size: Size,
        gradients: &[Gradient],
        selected: usize,
        label: &str,
    ) {
        let accent = self.session.theme().primary();
        let history = self.session.history();
        let _ = write!(
            frame,
            "{}{}lumo{RESET}  {DIM}{label}{RESET}  theme {}  history {}/{}\r\n\r\n",
            fg(accent),
            BOLD,
            self.session.theme().name(),
            history.cursor() + 1,
            history.len(),
        );

        if gradients.is_empty() {
            let _ = write!(frame, "  {DIM}Nothing here yet. Press f to favorite a gradient.{RESET}\r\n");
            return;
        }

        let per_page = usize::from((size.rows.saturating_sub(CHROME_HEIGHT) / CARD_HEIGHT).max(1));
        let first = (selected / per_page) * per_page;
        let swatch_width = usize::from(size.cols.saturating_sub(4).clamp(10, 60));

        for (i, gradient) in gradients
            .iter()
            .enumerate()
            .skip(first)
            .take(per_page)
        {
            self.render_card(frame, gradient, i == selected, swatch_width);
        }
    }

    fn render_card(
        &self,
        frame: &mut String,
        gradient: &Gradient,
        selected: bool,
        swatch_width: usize,
    ) {
        let marker = if selected { "▸" } else { " " };
        let name_style = if selected { BOLD } else { "" };
        let _ = write!(
            frame,
            "{marker} {name_style}{}{RESET} {DIM}{}{RESET}",
            gradient.name,
            gradient.descriptor(),
        );
        if gradient.locked {
            let _ = write!(frame, " {}[locked]{RESET}", fg(self.session.theme().secondary()));
        }
        if gradient.favorite {
            let _ = write!(frame, " {}♥{RESET}", fg(self.session.theme().primary()));
        }
        if !gradient.adequate_contrast() {
            let _ = write!(frame, " {DIM}[low contrast]{RESET}");
        }
        frame.push_str("\r\n");

        // Two swatch rows sampled through the same function the PNG
        // exporter uses.
        for row in 0..2u8 {
            frame.push_str("  ");
            let v = if row == 0 { 0.25 } else { 0.75 };
            for col in 0..swatch_width {
                #[allow(clippy::cast_precision_loss)]
                let u = col as f64 / (swatch_width - 1) as f64;
                let rgb = export::sample(gradient, u, v);
                let _ = write!(frame, "{} ", bg(rgb));
            }
            let _ = write!(frame, "{RESET}\r\n");
        }

        if selected {
            let _ = write!(
                frame,
                "  {DIM}{} · {} · {}{RESET}\r\n",
                gradient.colors[0], gradient.colors[1], gradient.id,
            );
        } else {
            frame.push_str("\r\n");
        }
    }

    fn render_help(&self, frame: &mut String) {
        let accent = self.session.theme().primary();
        let _ = write!(frame, "{}{BOLD}lumo — gradient studio{RESET}\r\n\r\n", fg(accent));
        for (key, action) in [
            ("space", "regenerate unlocked gradients"),
            ("← / →", "step back / forward through history"),
            ("j / k", "move the selection"),
            ("l", "lock the selected gradient"),
            ("f", "favorite the selected gradient"),
            ("v", "open the favorites view"),
            ("c", "copy the CSS to the clipboard"),
            ("e", "export the selection as a PNG"),
            ("t", "cycle the color theme"),
            ("?", "show this help"),
            ("q", "quit"),
        ] {
            let _ = write!(frame, "  {BOLD}{key:>7}{RESET}  {action}\r\n");
        }
        let _ = write!(frame, "\r\n{DIM}Press any key to continue.{RESET}\r\n");
    }

    fn render_footer(&self, frame: &mut String, size: Size) {
        let _ = write!(frame, "\x1b[{};1H", size.rows);
        if let Some(toast) = &self.toast {
            let _ = write!(
                frame,
                "{}{BOLD}{}{RESET}",
                fg(self.session.theme().secondary()),
                toast.message,
            );
        } else {
            let _ = write!(
                frame,
                "{DIM}space new · ←→ history · f fav · c copy · e export · ? help · q quit{RESET}",
            );
        }
    }
}

fn fg(rgb: Rgb) -> String {
    format!("\x1b[38;2;{};{};{}m", rgb.r, rgb.g, rgb.b)
}

fn bg(rgb: Rgb) -> String {
    format!("\x1b[48;2;{};{};{}m", rgb.r, rgb.g, rgb.b)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use lumo_core::{SessionConfig, StateStore};
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct Scratch(PathBuf);

    impl Scratch {
        fn new() -> Self {
            static COUNTER: AtomicU32 = AtomicU32::new(0);
            let n = COUNTER.fetch_add(1, Ordering::Relaxed);
            Self(std::env::temp_dir().join(format!(
                "lumo-app-test-{}-{n}",
                std::process::id()
            )))
        }
    }

    impl Drop for Scratch {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.0);
        }
    }

    fn app(scratch: &Scratch) -> App {
        let store = StateStore::at(scratch.0.join("state.json"));
        let session = Session::start(
            store,
            &SessionConfig {
                seed: Some(42),
                ..SessionConfig::default()
            },
        );
        App::new(session, scratch.0.join("exports"))
    }

    fn size() -> Size {
        Size { cols: 80, rows: 40 }
    }

    // ── View transitions ────────────────────────────────────────────────

    #[test]
    fn first_run_opens_help_then_any_key_closes() {
        let scratch = Scratch::new();
        let mut app = app(&scratch);
        assert_eq!(app.view, View::Help);
        assert!(!app.handle_key(Key::Char(' ')));
        assert_eq!(app.view, View::Grid);
    }

    #[test]
    fn quit_from_help_quits() {
        let scratch = Scratch::new();
        let mut app = app(&scratch);
        assert!(app.handle_key(Key::Char('q')));
    }

    #[test]
    fn v_toggles_favorites_view() {
        let scratch = Scratch::new();
        let mut app = app(&scratch);
        app.handle_key(Key::Enter); // close onboarding
        app.handle_key(Key::Char('v'));
        assert_eq!(app.view, View::Favorites);
        app.handle_key(Key::Char('v'));
        assert_eq!(app.view, View::Grid);
    }

    #[test]
    fn escape_returns_to_grid() {
        let scratch = Scratch::new();
        let mut app = app(&scratch);
        app.handle_key(Key::Enter);
        app.handle_key(Key::Char('v'));
        app.handle_key(Key::Escape);
        assert_eq!(app.view, View::Grid);
    }

    // ── Selection ───────────────────────────────────────────────────────

    #[test]
    fn selection_moves_and_clamps() {
        let scratch = Scratch::new();
        let mut app = app(&scratch);
        app.handle_key(Key::Enter);

        app.handle_key(Key::Char('j'));
        app.handle_key(Key::Down);
        assert_eq!(app.selected, 2);

        for _ in 0..100 {
            app.handle_key(Key::Char('j'));
        }
        assert_eq!(app.selected, app.session.current().len() - 1);

        for _ in 0..100 {
            app.handle_key(Key::Char('k'));
        }
        assert_eq!(app.selected, 0);
    }

    // ── Operations through the keyboard ─────────────────────────────────

    #[test]
    fn space_regenerates() {
        let scratch = Scratch::new();
        let mut app = app(&scratch);
        app.handle_key(Key::Enter);
        let before = app.session.current().to_vec();
        app.handle_key(Key::Char(' '));
        assert_ne!(app.session.current(), before.as_slice());
        assert_eq!(app.session.history().len(), 2);
    }

    #[test]
    fn arrows_navigate_history() {
        let scratch = Scratch::new();
        let mut app = app(&scratch);
        app.handle_key(Key::Enter);
        let first = app.session.current().to_vec();
        app.handle_key(Key::Char(' '));
        app.handle_key(Key::Left);
        assert_eq!(app.session.current(), first.as_slice());
        app.handle_key(Key::Right);
        assert_ne!(app.session.current(), first.as_slice());
    }

    #[test]
    fn lock_and_favorite_target_selection() {
        let scratch = Scratch::new();
        let mut app = app(&scratch);
        app.handle_key(Key::Enter);
        app.handle_key(Key::Char('j'));

        app.handle_key(Key::Char('l'));
        assert!(app.session.current()[1].locked);

        app.handle_key(Key::Char('f'));
        assert!(app.session.current()[1].favorite);
        assert_eq!(app.session.favorites().len(), 1);
    }

    #[test]
    fn all_locked_regeneration_toasts() {
        let scratch = Scratch::new();
        let mut app = app(&scratch);
        app.handle_key(Key::Enter);
        let ids: Vec<String> = app.session.current().iter().map(|g| g.id.clone()).collect();
        for id in &ids {
            app.session.toggle_lock(id);
        }
        app.handle_key(Key::Char(' '));
        assert_eq!(app.session.history().len(), 1);
        assert!(app.toast.is_some());
    }

    #[test]
    fn export_writes_png_and_toasts() {
        let scratch = Scratch::new();
        let mut app = app(&scratch);
        app.handle_key(Key::Enter);
        app.handle_key(Key::Char('e'));
        let stem = app.session.current()[0].file_stem();
        assert!(scratch.0.join("exports").join(format!("{stem}.png")).exists());
        assert_eq!(app.toast.as_ref().map(|t| t.message.starts_with("Saved")), Some(true));
    }

    #[test]
    fn unfavorite_from_favorites_view() {
        let scratch = Scratch::new();
        let mut app = app(&scratch);
        app.handle_key(Key::Enter);
        app.handle_key(Key::Char('f'));
        app.handle_key(Key::Char('v'));
        app.handle_key(Key::Char('f'));
        assert!(app.session.favorites().is_empty());
    }

    // ── Toast lifecycle ─────────────────────────────────────────────────

    #[test]
    fn toast_expires_on_tick() {
        let scratch = Scratch::new();
        let mut app = app(&scratch);
        app.handle_key(Key::Enter);
        app.handle_key(Key::Char('t'));
        assert!(app.toast.is_some());

        assert!(app.tick(Instant::now() + Duration::from_secs(3)));
        assert!(app.toast.is_none());
    }

    // ── Frames ──────────────────────────────────────────────────────────

    #[test]
    fn render_clears_dirty_and_shows_names() {
        let scratch = Scratch::new();
        let mut app = app(&scratch);
        app.handle_key(Key::Enter);
        let name = app.session.current()[0].name.clone();
        let frame = app.render(size());
        assert!(!app.dirty());
        assert!(frame.contains(&name));
        assert!(frame.contains("history 1/1"));
    }

    #[test]
    fn help_frame_lists_bindings() {
        let scratch = Scratch::new();
        let mut app = app(&scratch);
        let frame = app.render(size());
        assert!(frame.contains("regenerate unlocked gradients"));
        assert!(frame.contains("quit"));
    }

    #[test]
    fn empty_favorites_frame_has_hint() {
        let scratch = Scratch::new();
        let mut app = app(&scratch);
        app.handle_key(Key::Enter);
        app.handle_key(Key::Char('v'));
        let frame = app.render(size());
        assert!(frame.contains("Nothing here yet"));
    }
}
