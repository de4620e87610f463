//! Colour themes and the persisted theme preference.
//!
//! The catalog is fixed. The chosen theme is saved under [`THEME_KEY`] in a
//! [`PreferenceStore`]; an absent or unknown saved value falls back to
//! [`ThemeName::Sunset`].

use clap::ValueEnum;
use ratatui::style::{palette::tailwind, Color};

use crate::prefs::PreferenceStore;

pub const THEME_KEY: &str = "deepwork-theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Sunset,
    Ocean,
    Forest,
    Lavender,
    Cherry,
    Monochrome,
}

impl ThemeName {
    pub const ALL: [ThemeName; 6] = [
        ThemeName::Sunset,
        ThemeName::Ocean,
        ThemeName::Forest,
        ThemeName::Lavender,
        ThemeName::Cherry,
        ThemeName::Monochrome,
    ];

    /// Look up a theme by its stored identifier (`"ocean"`, ...)
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.to_string() == id)
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeName::Sunset => "Sunset",
            ThemeName::Ocean => "Ocean",
            ThemeName::Forest => "Forest",
            ThemeName::Lavender => "Lavender",
            ThemeName::Cherry => "Cherry",
            ThemeName::Monochrome => "Monochrome",
        }
    }

    pub fn colors(self) -> ColorTheme {
        let (from, via, to, primary, secondary) = match self {
            ThemeName::Sunset => (
                tailwind::ORANGE.c400,
                tailwind::PINK.c500,
                tailwind::PURPLE.c600,
                tailwind::ORANGE.c500,
                tailwind::PINK.c600,
            ),
            ThemeName::Ocean => (
                tailwind::CYAN.c400,
                tailwind::BLUE.c500,
                tailwind::INDIGO.c600,
                tailwind::CYAN.c500,
                tailwind::BLUE.c600,
            ),
            ThemeName::Forest => (
                tailwind::GREEN.c400,
                tailwind::EMERALD.c500,
                tailwind::TEAL.c600,
                tailwind::GREEN.c500,
                tailwind::EMERALD.c600,
            ),
            ThemeName::Lavender => (
                tailwind::PURPLE.c400,
                tailwind::VIOLET.c500,
                tailwind::FUCHSIA.c600,
                tailwind::PURPLE.c500,
                tailwind::VIOLET.c600,
            ),
            ThemeName::Cherry => (
                tailwind::RED.c400,
                tailwind::ROSE.c500,
                tailwind::PINK.c600,
                tailwind::RED.c500,
                tailwind::ROSE.c600,
            ),
            ThemeName::Monochrome => (
                tailwind::GRAY.c400,
                tailwind::GRAY.c500,
                tailwind::GRAY.c600,
                tailwind::GRAY.c500,
                tailwind::GRAY.c600,
            ),
        };

        ColorTheme {
            name: self,
            from,
            via,
            to,
            primary,
            secondary,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorTheme {
    pub name: ThemeName,
    pub from: Color,
    pub via: Color,
    pub to: Color,
    pub primary: Color,
    pub secondary: Color,
}

impl ColorTheme {
    /// Colour at position `t` in [0, 1] along the from → via → to gradient
    pub fn gradient(&self, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        if t <= 0.5 {
            lerp(self.from, self.via, t * 2.0)
        } else {
            lerp(self.via, self.to, (t - 0.5) * 2.0)
        }
    }
}

fn lerp(a: Color, b: Color, t: f64) -> Color {
    match (a, b) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let mix = |x: u8, y: u8| (f64::from(x) + (f64::from(y) - f64::from(x)) * t).round() as u8;
            Color::Rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2))
        }
        _ if t < 0.5 => a,
        _ => b,
    }
}

/// Owns the current theme choice and writes changes through to the store.
/// Children borrow it, so it always outlives every reader.
#[derive(Debug)]
pub struct ThemeProvider<S: PreferenceStore> {
    store: S,
    current: ThemeName,
}

impl<S: PreferenceStore> ThemeProvider<S> {
    pub fn new(store: S) -> Self {
        let current = match store.get(THEME_KEY) {
            Some(id) => ThemeName::from_id(&id).unwrap_or_else(|| {
                log::debug!("unknown saved theme {id:?}, using default");
                ThemeName::default()
            }),
            None => ThemeName::default(),
        };
        Self { store, current }
    }

    pub fn name(&self) -> ThemeName {
        self.current
    }

    pub fn theme(&self) -> ColorTheme {
        self.current.colors()
    }

    /// Switch to the theme with identifier `id`. Unknown ids are ignored.
    pub fn set_theme(&mut self, id: &str) -> bool {
        match ThemeName::from_id(id) {
            Some(name) => {
                self.select(name);
                true
            }
            None => {
                log::debug!("ignoring unknown theme {id:?}");
                false
            }
        }
    }

    pub fn select(&mut self, name: ThemeName) {
        self.current = name;
        if let Err(e) = self.store.set(THEME_KEY, &name.to_string()) {
            log::warn!("could not save theme preference: {e}");
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
