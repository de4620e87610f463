use std::sync::mpsc::Sender;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use deepwork::app::{App, Flow};
use deepwork::pattern::BackgroundPattern;
use deepwork::prefs::MemoryPreferenceStore;
use deepwork::runtime::{AppEvent, FixedTicker, Runner, TestEventSource};
use deepwork::session::Phase;
use deepwork::theme::ThemeProvider;
use deepwork::tick::{ThreadTickSource, TickSource, TickStamp};
use deepwork::timer::{SessionTimer, TickOutcome};
use deepwork::title::{status_title, TitleMirror, TitleSink, APP_TITLE};

type HeadlessApp = App<ThreadTickSource<AppEvent>, MemoryPreferenceStore>;

// Headless integration using the real runtime and a fast thread tick source.
fn headless(minutes: u32, tick_ms: u64) -> (HeadlessApp, Runner<TestEventSource, FixedTicker>) {
    let runner = Runner::new(
        TestEventSource::new(),
        FixedTicker::new(Duration::from_millis(5)),
    );
    let ticks = ThreadTickSource::new(runner.sender(), Duration::from_millis(tick_ms));
    let app = App::new(
        SessionTimer::with_minutes(minutes, ticks),
        ThemeProvider::new(MemoryPreferenceStore::new()),
        BackgroundPattern::None,
    );
    (app, runner)
}

fn press(tx: &Sender<AppEvent>, c: char) {
    tx.send(AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)))
        .unwrap();
}

/// Drive one event through the app the way the binary's loop does
fn pump(app: &mut HeadlessApp, runner: &Runner<TestEventSource, FixedTicker>) -> Flow {
    match runner.step() {
        AppEvent::Tick(stamp) => {
            app.on_tick(stamp);
        }
        AppEvent::Frame => app.on_frame(),
        AppEvent::Resize => {}
        AppEvent::Key(key) => return app.on_key(key),
    }
    Flow::Continue
}

#[derive(Default)]
struct Recorder(Vec<String>);

impl TitleSink for &mut Recorder {
    fn set_title(&mut self, title: &str) -> std::io::Result<()> {
        self.0.push(title.to_string());
        Ok(())
    }
}

#[test]
fn headless_session_runs_to_completion() {
    let (mut app, runner) = headless(1, 1);
    let tx = runner.sender();
    press(&tx, ' ');

    for _ in 0..20_000u32 {
        pump(&mut app, &runner);
        if app.timer.phase() == Phase::Completed {
            break;
        }
    }

    assert_eq!(app.timer.phase(), Phase::Completed);
    assert_eq!(app.timer.remaining_seconds(), 0);
    assert!(!app.timer.is_running());
    assert!(!app.timer.ticks().is_active());
    assert_eq!(app.timer.progress(), 1.0);
    assert_eq!(app.timer.display(), "00:00");
    assert!(!app.can_toggle());
}

#[test]
fn headless_pause_stops_the_countdown() {
    let (mut app, runner) = headless(25, 2);
    let tx = runner.sender();
    press(&tx, ' ');

    while app.timer.remaining_seconds() > 1495 {
        pump(&mut app, &runner);
    }
    press(&tx, ' ');
    while app.timer.is_running() {
        pump(&mut app, &runner);
    }
    let paused_at = app.timer.remaining_seconds();

    // anything still queued, or produced before the cancel landed, is stale
    for _ in 0..40 {
        pump(&mut app, &runner);
    }
    assert_eq!(app.timer.remaining_seconds(), paused_at);
    assert_eq!(app.timer.phase(), Phase::Idle);
    assert!(app.can_reset());
}

#[test]
fn headless_orphan_tick_is_dropped() {
    let (mut app, runner) = headless(25, 1000);
    let tx = runner.sender();

    press(&tx, ' ');
    pump(&mut app, &runner);
    let first = TickStamp(app.timer.generation());

    press(&tx, 'r');
    pump(&mut app, &runner);
    press(&tx, ' ');
    pump(&mut app, &runner);

    // a tick from the first run arrives after the restart
    assert_ne!(first.0, app.timer.generation());
    assert_eq!(app.on_tick(first), TickOutcome::Stale);
    assert_eq!(app.timer.remaining_seconds(), 1500);

    tx.send(AppEvent::Tick(TickStamp(app.timer.generation())))
        .unwrap();
    pump(&mut app, &runner);
    assert_eq!(app.timer.remaining_seconds(), 1499);
}

#[test]
fn headless_reset_while_running_restores_total() {
    let (mut app, runner) = headless(1, 1);
    let tx = runner.sender();
    press(&tx, ' ');
    while app.timer.remaining_seconds() > 50 {
        pump(&mut app, &runner);
    }

    press(&tx, 'r');
    while app.timer.is_running() {
        pump(&mut app, &runner);
    }
    for _ in 0..20 {
        pump(&mut app, &runner);
    }

    assert_eq!(app.timer.remaining_seconds(), 60);
    assert!(!app.can_reset());
}

#[test]
fn headless_quit_key_ends_loop() {
    let (mut app, runner) = headless(25, 1000);
    let tx = runner.sender();
    press(&tx, ' ');
    press(&tx, 'q');

    let mut flow = Flow::Continue;
    for _ in 0..10 {
        flow = pump(&mut app, &runner);
        if flow == Flow::Quit {
            break;
        }
    }
    assert_eq!(flow, Flow::Quit);
}

#[test]
fn headless_title_follows_session() {
    let (mut app, runner) = headless(1, 1);
    let tx = runner.sender();
    let mut recorder = Recorder::default();

    {
        let mut title = TitleMirror::new(&mut recorder);
        title.update(app.timer.session());
        press(&tx, ' ');
        while app.timer.phase() != Phase::Completed {
            pump(&mut app, &runner);
            title.update(app.timer.session());
        }
        assert_eq!(title.current(), Some(status_title(app.timer.session()).as_str()));
    }

    let seen = &recorder.0;
    assert_eq!(seen.first().map(String::as_str), Some(APP_TITLE));
    assert!(seen.iter().any(|t| t == "00:59 - DeepWork Timer"));
    assert!(seen.iter().any(|t| t == "Time's up! - DeepWork Timer"));
    // restored on teardown
    assert_eq!(seen.last().map(String::as_str), Some(APP_TITLE));
}
