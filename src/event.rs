use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, KeyEvent};

pub enum Event {
    Key(KeyEvent),
    Tick,
}

/// Terminal input and a fixed-rate tick, merged into one queue.
///
/// At most one tick waits in the queue. When the main loop falls behind,
/// ticks are dropped rather than replayed, so keys never queue up behind a
/// backlog of stale frames.
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
    tick_pending: Arc<AtomicBool>,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self::spawn(tick_rate_ms, read_terminal_key)
    }

    fn spawn<F>(tick_rate_ms: u64, mut read_key: F) -> Self
    where
        F: FnMut(Duration) -> Option<KeyEvent> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let tick_rate = Duration::from_millis(tick_rate_ms);
        let tick_pending = Arc::new(AtomicBool::new(false));
        let pending = Arc::clone(&tick_pending);

        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                // Keys must not starve the tick while a flap key is held down
                let timeout = tick_rate.saturating_sub(last_tick.elapsed());
                if let Some(key) = read_key(timeout) {
                    if tx.send(Event::Key(key)).is_err() {
                        return;
                    }
                }
                if last_tick.elapsed() >= tick_rate {
                    if !pending.swap(true, Ordering::AcqRel) && tx.send(Event::Tick).is_err() {
                        return;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Self { rx, tick_pending }
    }

    pub fn next(&self) -> io::Result<Event> {
        let event = self
            .rx
            .recv()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        if matches!(event, Event::Tick) {
            self.tick_pending.store(false, Ordering::Release);
        }
        Ok(event)
    }
}

/// Press, repeat and release events; release only arrives on terminals with
/// keyboard enhancement turned on.
fn read_terminal_key(timeout: Duration) -> Option<KeyEvent> {
    if !event::poll(timeout).unwrap_or(false) {
        return None;
    }
    match event::read() {
        Ok(crossterm::event::Event::Key(key)) => Some(key),
        _ => None,
    }
}
