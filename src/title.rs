use std::io::{self, Write};

use crossterm::{execute, terminal::SetTitle};

use crate::session::{Phase, Session};

pub const APP_TITLE: &str = "DeepWork Timer";

/// Title text mirroring the session: live countdown while running,
/// a completion notice at zero, the plain app name otherwise.
pub fn status_title(session: &Session) -> String {
    match session.phase() {
        Phase::Running => format!("{} - {APP_TITLE}", session.display()),
        Phase::Completed => format!("Time's up! - {APP_TITLE}"),
        Phase::Idle => APP_TITLE.to_string(),
    }
}

/// Somewhere a status title can be shown
pub trait TitleSink {
    fn set_title(&mut self, title: &str) -> io::Result<()>;
}

/// Terminal window title via OSC escape
pub struct TerminalTitle<W: Write> {
    out: W,
}

impl<W: Write> TerminalTitle<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl TerminalTitle<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TitleSink for TerminalTitle<W> {
    fn set_title(&mut self, title: &str) -> io::Result<()> {
        execute!(self.out, SetTitle(title))
    }
}

/// Keeps a sink in step with the session, writing only on change and
/// restoring the plain app name when dropped.
pub struct TitleMirror<S: TitleSink> {
    sink: S,
    last: Option<String>,
}

impl<S: TitleSink> TitleMirror<S> {
    pub fn new(sink: S) -> Self {
        Self { sink, last: None }
    }

    pub fn update(&mut self, session: &Session) {
        let title = status_title(session);
        if self.last.as_deref() == Some(title.as_str()) {
            return;
        }
        if let Err(e) = self.sink.set_title(&title) {
            log::warn!("could not set title: {e}");
        }
        self.last = Some(title);
    }

    pub fn current(&self) -> Option<&str> {
        self.last.as_deref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<S: TitleSink> Drop for TitleMirror<S> {
    fn drop(&mut self) {
        if let Err(e) = self.sink.set_title(APP_TITLE) {
            log::warn!("could not restore title: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<String>>>);

    impl TitleSink for Recorder {
        fn set_title(&mut self, title: &str) -> io::Result<()> {
            self.0.borrow_mut().push(title.to_string());
            Ok(())
        }
    }

    fn running(total: u64, ticks: u64) -> Session {
        let mut s = Session::new(total);
        s.set_running(true);
        for _ in 0..ticks {
            s.count_down();
        }
        s
    }

    #[test]
    fn idle_session_shows_app_name() {
        assert_eq!(status_title(&Session::default()), "DeepWork Timer");
    }

    #[test]
    fn running_session_shows_countdown() {
        assert_eq!(status_title(&running(1500, 1)), "24:59 - DeepWork Timer");
    }

    #[test]
    fn paused_session_reverts_to_app_name() {
        let mut s = running(1500, 10);
        s.set_running(false);
        assert_eq!(status_title(&s), "DeepWork Timer");
    }

    #[test]
    fn completed_session_says_times_up() {
        assert_eq!(status_title(&running(2, 2)), "Time's up! - DeepWork Timer");
    }

    #[test]
    fn mirror_skips_duplicates_and_restores_on_drop() {
        let rec = Recorder::default();
        let log = Rc::clone(&rec.0);
        {
            let mut mirror = TitleMirror::new(rec);
            let s = Session::default();
            mirror.update(&s);
            mirror.update(&s);
            mirror.update(&running(1500, 1));
            assert_eq!(mirror.current(), Some("24:59 - DeepWork Timer"));
        }
        assert_eq!(
            *log.borrow(),
            vec![
                "DeepWork Timer".to_string(),
                "24:59 - DeepWork Timer".to_string(),
                "DeepWork Timer".to_string(),
            ]
        );
    }

    #[test]
    fn terminal_title_writes_osc_sequence() {
        let mut out = Vec::new();
        TerminalTitle::new(&mut out).set_title("25:00 - DeepWork Timer").unwrap();
        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("25:00 - DeepWork Timer"));
    }
}
