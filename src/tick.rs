use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

pub const SESSION_TICK: Duration = Duration::from_secs(1);

/// Generation tag carried by every tick. A tick only counts if its stamp
/// matches the generation of the timer that receives it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TickStamp(pub u64);

/// Periodic source of session ticks
pub trait TickSource {
    /// Begin delivering ticks tagged with `stamp`. No-op while already active.
    fn start(&mut self, stamp: TickStamp);
    /// Stop delivering ticks. Synchronous: nothing new is produced once this returns.
    fn cancel(&mut self);
    fn is_active(&self) -> bool;
}

/// Production tick source: a sleeper thread feeding ticks into the app's event channel
#[derive(Debug)]
pub struct ThreadTickSource<E> {
    tx: Sender<E>,
    interval: Duration,
    live: Option<Arc<AtomicBool>>,
}

impl<E: From<TickStamp> + Send + 'static> ThreadTickSource<E> {
    pub fn new(tx: Sender<E>, interval: Duration) -> Self {
        Self {
            tx,
            interval,
            live: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl<E: From<TickStamp> + Send + 'static> TickSource for ThreadTickSource<E> {
    fn start(&mut self, stamp: TickStamp) {
        if self.is_active() {
            return;
        }

        let live = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&live);
        let tx = self.tx.clone();
        let interval = self.interval;

        thread::spawn(move || loop {
            thread::sleep(interval);
            if !flag.load(Ordering::Acquire) {
                break;
            }
            if tx.send(E::from(stamp)).is_err() {
                break;
            }
        });

        log::trace!("tick source started for generation {}", stamp.0);
        self.live = Some(live);
    }

    fn cancel(&mut self) {
        if let Some(live) = self.live.take() {
            live.store(false, Ordering::Release);
            log::trace!("tick source cancelled");
        }
    }

    fn is_active(&self) -> bool {
        self.live.is_some()
    }
}

impl<E> Drop for ThreadTickSource<E> {
    fn drop(&mut self) {
        if let Some(live) = self.live.take() {
            live.store(false, Ordering::Release);
        }
    }
}

/// Deterministic tick source for tests: never fires on its own, only
/// records what the timer asked of it.
#[derive(Debug, Default)]
pub struct ManualTickSource {
    active: Option<TickStamp>,
    starts: usize,
    cancels: usize,
}

impl ManualTickSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp a real source would currently be emitting
    pub fn active_stamp(&self) -> Option<TickStamp> {
        self.active
    }

    pub fn starts(&self) -> usize {
        self.starts
    }

    pub fn cancels(&self) -> usize {
        self.cancels
    }
}

impl TickSource for ManualTickSource {
    fn start(&mut self, stamp: TickStamp) {
        if self.active.is_none() {
            self.active = Some(stamp);
            self.starts += 1;
        }
    }

    fn cancel(&mut self) {
        if self.active.take().is_some() {
            self.cancels += 1;
        }
    }

    fn is_active(&self) -> bool {
        self.active.is_some()
    }
}
