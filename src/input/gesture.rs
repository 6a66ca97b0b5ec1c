//! Hand-gesture flaps: point the index finger up to flap.

use std::io;

use serde::{Deserialize, Serialize};

use super::InputSource;

/// Pointing angles (degrees, inclusive) that count as "up".
pub const POINTING_UP: (f32, f32) = (45.0, 135.0);

/// A landmark in image coordinates; y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

/// The two landmarks the classifier needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandLandmarks {
    pub wrist: Landmark,
    pub index_tip: Landmark,
}

impl HandLandmarks {
    /// Direction from wrist to index fingertip in degrees, counter-clockwise
    /// from the positive x axis, in `[0, 360)`. Straight up is 90.
    pub fn pointing_angle(&self) -> f32 {
        let dx = self.index_tip.x - self.wrist.x;
        let dy = self.wrist.y - self.index_tip.y;
        dy.atan2(dx).to_degrees().rem_euclid(360.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    PointingUp,
    Idle,
}

pub fn classify(hand: Option<&HandLandmarks>) -> Gesture {
    match hand {
        Some(hand) => {
            let angle = hand.pointing_angle();
            if (POINTING_UP.0..=POINTING_UP.1).contains(&angle) {
                Gesture::PointingUp
            } else {
                Gesture::Idle
            }
        }
        None => Gesture::Idle,
    }
}

/// Produces the current frame on each call.
pub trait FrameSource {
    type Frame;
    fn read_frame(&mut self) -> io::Result<Self::Frame>;

    /// Drops anything captured so far; the next read waits for a new frame.
    fn discard(&mut self) {}
}

/// Finds a hand in a frame.
pub trait HandDetector<F> {
    fn detect(&mut self, frame: &F) -> Option<HandLandmarks>;
}

/// Reads the current frame each tick and flaps while the player points up.
///
/// A failed read or a frame without a hand is simply no flap.
pub struct GestureInput<S, D> {
    source: S,
    detector: D,
    last: Gesture,
}

impl<S, D> GestureInput<S, D>
where
    S: FrameSource,
    D: HandDetector<S::Frame>,
{
    pub fn new(source: S, detector: D) -> Self {
        Self {
            source,
            detector,
            last: Gesture::Idle,
        }
    }

    pub fn poll_gesture(&mut self) -> Gesture {
        let gesture = match self.source.read_frame() {
            Ok(frame) => classify(self.detector.detect(&frame).as_ref()),
            Err(e) => {
                log::debug!("gesture frame unavailable: {}", e);
                Gesture::Idle
            }
        };
        if gesture != self.last {
            log::debug!("gesture changed: {:?} -> {:?}", self.last, gesture);
            self.last = gesture;
        }
        gesture
    }

    #[cfg(test)]
    fn last_gesture(&self) -> Gesture {
        self.last
    }
}

impl<S, D> InputSource for GestureInput<S, D>
where
    S: FrameSource,
    D: HandDetector<S::Frame>,
{
    fn flap_requested(&mut self) -> bool {
        self.poll_gesture() == Gesture::PointingUp
    }

    fn reset(&mut self) {
        self.source.discard();
        self.last = Gesture::Idle;
    }
}
