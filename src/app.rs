//! Presentation state: owns the session timer, the theme provider, and the
//! open dialog, and maps key presses onto timer commands.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::pattern::BackgroundPattern;
use crate::prefs::PreferenceStore;
use crate::settings::{SettingsDialog, SettingsField};
use crate::theme::{ThemeName, ThemeProvider};
use crate::tick::{TickSource, TickStamp};
use crate::timer::{SessionTimer, TickOutcome, Toggle};

#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    None,
    Settings(SettingsDialog),
    Themes { cursor: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App<T: TickSource, P: PreferenceStore> {
    pub timer: SessionTimer<T>,
    pub themes: ThemeProvider<P>,
    pub pattern: BackgroundPattern,
    pub overlay: Overlay,
    pub status: Option<String>,
    /// Frames drawn so far, drives the running pulse
    pub frame: u64,
}

impl<T: TickSource, P: PreferenceStore> App<T, P> {
    pub fn new(timer: SessionTimer<T>, themes: ThemeProvider<P>, pattern: BackgroundPattern) -> Self {
        Self {
            timer,
            themes,
            pattern,
            overlay: Overlay::None,
            status: None,
            frame: 0,
        }
    }

    pub fn on_tick(&mut self, stamp: TickStamp) -> TickOutcome {
        let outcome = self.timer.tick(stamp);
        if outcome == TickOutcome::Completed {
            self.status = Some("Time's up! Press r to go again.".to_string());
        }
        outcome
    }

    pub fn on_frame(&mut self) {
        self.frame = self.frame.wrapping_add(1);
    }

    /// Reset does nothing useful on an untouched session, so the UI dims it
    pub fn can_reset(&self) -> bool {
        !self.timer.session().is_pristine()
    }

    /// Start is unavailable once the clock has run out
    pub fn can_toggle(&self) -> bool {
        self.timer.remaining_seconds() > 0
    }

    pub fn toggle(&mut self) {
        self.status = match self.timer.toggle() {
            Toggle::Ignored => Some("Session complete. Press r to reset.".to_string()),
            Toggle::Started | Toggle::Paused => None,
        };
    }

    pub fn reset(&mut self) {
        self.timer.reset();
        self.status = None;
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Flow {
        if key.kind != KeyEventKind::Press {
            return Flow::Continue;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Flow::Quit;
        }

        match std::mem::replace(&mut self.overlay, Overlay::None) {
            Overlay::None => self.on_timer_key(key),
            Overlay::Settings(dialog) => {
                self.on_settings_key(key, dialog);
                Flow::Continue
            }
            Overlay::Themes { cursor } => {
                self.on_themes_key(key, cursor);
                Flow::Continue
            }
        }
    }

    fn on_timer_key(&mut self, key: KeyEvent) -> Flow {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Flow::Quit,
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle(),
            KeyCode::Char('r') => self.reset(),
            KeyCode::Char('s') => {
                self.overlay = Overlay::Settings(SettingsDialog::open(self.timer.total_minutes()));
            }
            KeyCode::Char('t') => {
                let cursor = ThemeName::ALL
                    .iter()
                    .position(|t| *t == self.themes.name())
                    .unwrap_or(0);
                self.overlay = Overlay::Themes { cursor };
            }
            KeyCode::Char('p') => self.pattern = self.pattern.next(),
            _ => {}
        }
        Flow::Continue
    }

    fn on_settings_key(&mut self, key: KeyEvent, mut dialog: SettingsDialog) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return,
            KeyCode::Enter => {
                let minutes = dialog.draft.apply();
                self.timer.reconfigure(minutes);
                self.status = Some(format!("Session length set to {minutes} minutes"));
                return;
            }
            KeyCode::Up | KeyCode::Down | KeyCode::Tab | KeyCode::Char('k') | KeyCode::Char('j') => {
                dialog.focus = dialog.focus.other();
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('+') => {
                if let Some(p) = dialog.adjust(true, self.pattern) {
                    self.pattern = p;
                }
            }
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('-') => {
                if let Some(p) = dialog.adjust(false, self.pattern) {
                    self.pattern = p;
                }
            }
            _ => {}
        }
        self.overlay = Overlay::Settings(dialog);
    }

    fn on_themes_key(&mut self, key: KeyEvent, cursor: usize) {
        let last = ThemeName::ALL.len() - 1;
        let cursor = match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return,
            KeyCode::Enter => {
                let name = ThemeName::ALL[cursor.min(last)];
                self.themes.select(name);
                self.status = Some(format!("Theme: {}", name.label()));
                return;
            }
            KeyCode::Up | KeyCode::Char('k') => cursor.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => (cursor + 1).min(last),
            _ => cursor,
        };
        self.overlay = Overlay::Themes { cursor };
    }

    pub fn settings_focus(&self) -> Option<SettingsField> {
        match &self.overlay {
            Overlay::Settings(dialog) => Some(dialog.focus),
            _ => None,
        }
    }
}
