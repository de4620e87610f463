use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use deepwork::{
    app::{App, Flow},
    app_dirs::AppDirs,
    config::{ConfigStore, FileConfigStore, Overrides},
    error::{DeepWorkError, Result},
    logging,
    pattern::BackgroundPattern,
    prefs::{FilePreferenceStore, PreferenceStore},
    runtime::{AppEvent, CrosstermEventSource, EventSource, FixedTicker, Runner, Ticker},
    theme::{ThemeName, ThemeProvider},
    tick::{ThreadTickSource, TickSource, SESSION_TICK},
    timer::SessionTimer,
    title::{TerminalTitle, TitleMirror, TitleSink},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin, Stdout},
    path::PathBuf,
    time::Duration,
};

const FRAME_RATE_MS: u64 = 100;

/// focused countdown timer for deep work sessions
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A distraction-free countdown timer for deep work sessions, with colour themes, background patterns, and a live countdown in the terminal title."
)]
pub struct Cli {
    /// session length in minutes (overrides the config file)
    #[clap(short = 'm', long, value_parser = clap::value_parser!(u32).range(1..=600))]
    minutes: Option<u32>,

    /// colour theme to use and remember
    #[clap(short = 't', long, value_enum)]
    theme: Option<ThemeName>,

    /// background pattern behind the timer
    #[clap(short = 'p', long, value_enum)]
    pattern: Option<BackgroundPattern>,

    /// path to the config file
    #[clap(long)]
    config: Option<PathBuf>,

    /// path to the log file
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// more logging, repeat for more (-v info, -vv debug, -vvv trace)
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            session_minutes: self.minutes,
            pattern: self.pattern,
            log_level: (self.verbose > 0).then(|| logging::level_for(self.verbose, "warn")),
        }
    }
}

fn main() -> std::result::Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = match &cli.config {
        Some(path) => FileConfigStore::with_path(path),
        None => FileConfigStore::new(),
    };
    let config = store.load().merged(cli.overrides());

    let log_path = cli.log_file.clone().unwrap_or_else(AppDirs::log_path);
    logging::init(&config.log_level, &log_path);
    log::info!(
        "starting: {} minute session, pattern {}",
        config.session_minutes,
        config.pattern
    );

    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(FRAME_RATE_MS)),
    );
    let ticks = ThreadTickSource::new(runner.sender(), SESSION_TICK);
    let timer = SessionTimer::with_minutes(config.session_minutes, ticks);

    let mut themes = ThemeProvider::new(FilePreferenceStore::new());
    if let Some(theme) = cli.theme {
        themes.set_theme(&theme.to_string());
    }

    let mut app = App::new(timer, themes, config.pattern);
    let mut title = TitleMirror::new(TerminalTitle::stdout());

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = start_tui(&mut terminal, &mut app, &runner, &mut title);
    drop(title);
    restore_terminal(&mut terminal)?;
    res?;

    Ok(())
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().map_err(|e| DeepWorkError::Terminal(format!("disable raw mode: {e}")))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(|e| DeepWorkError::Terminal(format!("leave alternate screen: {e}")))?;
    terminal.show_cursor()?;
    Ok(())
}

fn start_tui<B, T, P, E, K, S>(
    terminal: &mut Terminal<B>,
    app: &mut App<T, P>,
    runner: &Runner<E, K>,
    title: &mut TitleMirror<S>,
) -> Result<()>
where
    B: Backend,
    T: TickSource,
    P: PreferenceStore,
    E: EventSource,
    K: Ticker,
    S: TitleSink,
{
    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        match runner.step() {
            AppEvent::Tick(stamp) => {
                app.on_tick(stamp);
            }
            AppEvent::Frame => app.on_frame(),
            AppEvent::Resize => {}
            AppEvent::Key(key) => {
                if app.on_key(key) == Flow::Quit {
                    break;
                }
            }
        }

        title.update(app.timer.session());
    }

    log::info!("quitting with {}s left", app.timer.remaining_seconds());
    Ok(())
}
