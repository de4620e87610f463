use std::fs::{self, OpenOptions};
use std::path::Path;

use env_logger::{Env, Target};

/// Map `-v` repetitions onto a filter. Without any, the configured level stands.
pub fn level_for(verbosity: u8, configured: &str) -> String {
    match verbosity {
        0 => configured.to_string(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Route `log` output to a file. The terminal belongs to the UI, so nothing
/// is written to stderr. RUST_LOG overrides `default_level`.
///
/// Returns false (and leaves logging disabled) if the file cannot be opened.
pub fn init(default_level: &str, path: &Path) -> bool {
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return false;
        }
    }
    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(f) => f,
        Err(_) => return false,
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .is_ok()
}
