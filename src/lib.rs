// Library surface for headless/integration tests and reuse.
// main.rs only wires these together against a real terminal.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod logging;
pub mod pattern;
pub mod prefs;
pub mod runtime;
pub mod session;
pub mod settings;
pub mod theme;
pub mod tick;
pub mod timer;
pub mod title;
pub mod ui;
pub mod util;
