//! Landmark feed: newline-delimited JSON written by an external hand tracker.
//!
//! Each line is one frame, either a [`HandLandmarks`] object or `null` when
//! no hand was found:
//!
//! ```text
//! {"wrist":{"x":0.51,"y":0.80},"index_tip":{"x":0.49,"y":0.42}}
//! null
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::thread;

use super::gesture::{FrameSource, GestureInput, HandDetector, HandLandmarks};

#[derive(Debug, Default)]
struct Latest {
    fresh: Option<String>,
    closed: bool,
}

/// The tracker's current frame.
///
/// A background thread drains the feed as fast as the tracker writes it and
/// keeps only the newest line, so a read always sees what the camera shows
/// now. Between tracker frames the previous frame is repeated.
pub struct FeedReader {
    latest: Arc<Mutex<Latest>>,
    current: Option<String>,
}

impl FeedReader {
    pub fn spawn<R>(reader: R) -> Self
    where
        R: BufRead + Send + 'static,
    {
        let latest = Arc::new(Mutex::new(Latest::default()));
        let shared = Arc::clone(&latest);
        thread::spawn(move || drain(reader, &shared));
        Self {
            latest,
            current: None,
        }
    }

    #[cfg(test)]
    fn is_closed(&self) -> bool {
        self.latest.lock().map(|l| l.closed).unwrap_or(true)
    }
}

fn drain<R: BufRead>(mut reader: R, latest: &Mutex<Latest>) {
    let mut line = String::new();
    loop {
        line.clear();
        let done = match reader.read_line(&mut line) {
            Ok(0) => true,
            Ok(_) => false,
            Err(e) => {
                log::warn!("landmark feed read failed: {}", e);
                true
            }
        };
        let Ok(mut shared) = latest.lock() else {
            return;
        };
        if done {
            shared.closed = true;
            return;
        }
        // A partial last line still counts as a frame
        shared.fresh = Some(line.trim().to_string());
    }
}

impl FrameSource for FeedReader {
    type Frame = String;

    fn read_frame(&mut self) -> io::Result<String> {
        let mut latest = self
            .latest
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "landmark feed reader panicked"))?;
        if let Some(frame) = latest.fresh.take() {
            self.current = Some(frame);
        } else if latest.closed {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "landmark feed closed",
            ));
        }
        self.current
            .clone()
            .ok_or_else(|| io::Error::new(io::ErrorKind::WouldBlock, "no landmark frame yet"))
    }

    fn discard(&mut self) {
        self.current = None;
        if let Ok(mut latest) = self.latest.lock() {
            latest.fresh = None;
        }
    }
}

/// Decodes a feed line into landmarks.
#[derive(Debug, Default)]
pub struct JsonLandmarks;

impl HandDetector<String> for JsonLandmarks {
    fn detect(&mut self, frame: &String) -> Option<HandLandmarks> {
        match serde_json::from_str::<Option<HandLandmarks>>(frame) {
            Ok(hand) => hand,
            Err(e) => {
                log::debug!("skipping unreadable landmark frame: {}", e);
                None
            }
        }
    }
}

pub type FeedGestureInput = GestureInput<FeedReader, JsonLandmarks>;

/// Opens the feed once; the reader thread stops when the tracker closes it.
pub fn open_gesture_feed(path: &Path) -> io::Result<FeedGestureInput> {
    let file = File::open(path)?;
    log::info!("gesture input reading landmarks from {}", path.display());
    Ok(GestureInput::new(
        FeedReader::spawn(BufReader::new(file)),
        JsonLandmarks,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::gesture::{classify, Gesture};
    use crate::input::InputSource;
    use std::io::{Cursor, Read};
    use std::sync::mpsc;
    use std::time::{Duration, Instant};

    const UP: &str = r#"{"wrist":{"x":0.5,"y":0.8},"index_tip":{"x":0.52,"y":0.4}}"#;
    const SIDEWAYS: &str = r#"{"wrist":{"x":0.5,"y":0.5},"index_tip":{"x":0.9,"y":0.48}}"#;

    /// A feed the test writes to line by line, like a live tracker.
    struct LiveFeed {
        rx: mpsc::Receiver<String>,
        buf: Vec<u8>,
    }

    impl Read for LiveFeed {
        fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
            if self.buf.is_empty() {
                match self.rx.recv() {
                    Ok(line) => self.buf = format!("{line}\n").into_bytes(),
                    Err(_) => return Ok(0),
                }
            }
            let n = out.len().min(self.buf.len());
            out[..n].copy_from_slice(&self.buf[..n]);
            self.buf.drain(..n);
            Ok(n)
        }
    }

    fn live_feed() -> (mpsc::Sender<String>, FeedReader) {
        let (tx, rx) = mpsc::channel();
        let reader = FeedReader::spawn(BufReader::new(LiveFeed {
            rx,
            buf: Vec::new(),
        }));
        (tx, reader)
    }

    fn wait_for(mut done: impl FnMut() -> bool) {
        let start = Instant::now();
        while !done() {
            assert!(start.elapsed() < Duration::from_secs(2), "feed never caught up");
            thread::sleep(Duration::from_millis(2));
        }
    }

    fn wait_for_frame(reader: &FeedReader) {
        wait_for(|| reader.latest.lock().map(|l| l.fresh.is_some()).unwrap_or(false));
    }

    #[test]
    fn test_backlog_collapses_to_newest_frame() {
        let mut feed = format!("{UP}\n");
        for _ in 0..200 {
            feed.push_str("null\n");
        }
        let reader = FeedReader::spawn(Cursor::new(feed));
        wait_for(|| reader.is_closed());

        let mut input = GestureInput::new(reader, JsonLandmarks);
        // The queued pointing-up frame is history; the newest frame has no hand
        assert!(!input.flap_requested());
        // Closed feed: idle from now on
        assert!(!input.flap_requested());
    }

    #[test]
    fn test_live_feed_repeats_current_frame() {
        let (tx, mut reader) = live_feed();
        assert_eq!(
            reader.read_frame().map_err(|e| e.kind()),
            Err(io::ErrorKind::WouldBlock)
        );

        tx.send(UP.to_string()).unwrap();
        wait_for_frame(&reader);
        assert_eq!(reader.read_frame().unwrap(), UP);
        // No new frame from the tracker: the hand is still where it was
        assert_eq!(reader.read_frame().unwrap(), UP);

        tx.send(SIDEWAYS.to_string()).unwrap();
        wait_for_frame(&reader);
        assert_eq!(reader.read_frame().unwrap(), SIDEWAYS);

        drop(tx);
        wait_for(|| reader.is_closed());
        assert_eq!(
            reader.read_frame().map_err(|e| e.kind()),
            Err(io::ErrorKind::UnexpectedEof)
        );
    }

    #[test]
    fn test_discard_forgets_old_frames() {
        let (tx, mut reader) = live_feed();
        tx.send(UP.to_string()).unwrap();
        wait_for_frame(&reader);
        reader.discard();
        assert_eq!(
            reader.read_frame().map_err(|e| e.kind()),
            Err(io::ErrorKind::WouldBlock)
        );

        tx.send("null".to_string()).unwrap();
        wait_for_frame(&reader);
        assert_eq!(reader.read_frame().unwrap(), "null");
    }

    #[test]
    fn test_unreadable_lines_are_idle() {
        let (tx, mut reader) = live_feed();
        let mut detector = JsonLandmarks;
        for (line, gesture) in [
            (UP, Gesture::PointingUp),
            ("garbage", Gesture::Idle),
            (SIDEWAYS, Gesture::Idle),
            (UP, Gesture::PointingUp),
        ] {
            tx.send(line.to_string()).unwrap();
            wait_for_frame(&reader);
            let frame = reader.read_frame().unwrap();
            assert_eq!(classify(detector.detect(&frame).as_ref()), gesture, "frame {line}");
        }
    }

    #[test]
    fn test_detector_parses_null_as_no_hand() {
        let mut detector = JsonLandmarks;
        assert!(detector.detect(&"null".to_string()).is_none());
        assert!(detector.detect(&UP.to_string()).is_some());
    }

    #[test]
    fn test_open_missing_feed_fails() {
        let path = std::env::temp_dir().join("trace_runner_no_such_feed.jsonl");
        assert!(open_gesture_feed(&path).is_err());
    }
}
