//! Where flaps come from.
//!
//! Every source answers the same question once per tick: did the player ask
//! for a flap? The session ORs all of them together.

pub mod feed;
pub mod gesture;

pub use feed::{open_gesture_feed, FeedGestureInput, FeedReader, JsonLandmarks};
pub use gesture::{classify, FrameSource, Gesture, GestureInput, HandDetector, HandLandmarks, Landmark};

pub trait InputSource {
    /// Polled exactly once per tick.
    fn flap_requested(&mut self) -> bool;

    /// Forgets input captured before a round starts.
    fn reset(&mut self) {}
}

/// The flap key.
///
/// On terminals that report key releases the key counts for every tick it
/// is held down. Elsewhere only presses and auto-repeats arrive, so a press
/// latches until the next poll.
#[derive(Debug, Default)]
pub struct KeyboardInput {
    pending: bool,
    held: bool,
    tracks_release: bool,
}

impl KeyboardInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// For terminals that send release events.
    pub fn with_key_release() -> Self {
        Self {
            tracks_release: true,
            ..Self::default()
        }
    }

    pub fn tracks_release(&self) -> bool {
        self.tracks_release
    }

    pub fn press(&mut self) {
        self.pending = true;
        self.held = self.tracks_release;
    }

    pub fn release(&mut self) {
        self.held = false;
    }

    pub fn clear(&mut self) {
        self.pending = false;
        self.held = false;
    }
}

impl InputSource for KeyboardInput {
    fn flap_requested(&mut self) -> bool {
        // A tap that starts and ends between two polls still flaps once
        std::mem::take(&mut self.pending) || self.held
    }

    fn reset(&mut self) {
        self.clear();
    }
}

/// The keyboard plus any number of extra sources.
#[derive(Default)]
pub struct InputHub {
    pub keyboard: KeyboardInput,
    extra: Vec<Box<dyn InputSource>>,
}

impl InputHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_source(&mut self, source: Box<dyn InputSource>) {
        self.extra.push(source);
    }

    pub fn extra_sources(&self) -> usize {
        self.extra.len()
    }
}

impl InputSource for InputHub {
    fn flap_requested(&mut self) -> bool {
        // Poll everything so each source consumes its input for this tick
        let mut requested = self.keyboard.flap_requested();
        for source in &mut self.extra {
            requested |= source.flap_requested();
        }
        requested
    }

    fn reset(&mut self) {
        self.keyboard.reset();
        for source in &mut self.extra {
            source.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Scripted {
        answers: Vec<bool>,
        polls: Rc<Cell<usize>>,
    }

    impl InputSource for Scripted {
        fn flap_requested(&mut self) -> bool {
            let i = self.polls.get();
            self.polls.set(i + 1);
            self.answers.get(i).copied().unwrap_or(false)
        }
    }

    #[test]
    fn test_keyboard_press_is_consumed() {
        let mut keyboard = KeyboardInput::new();
        assert!(!keyboard.flap_requested());
        keyboard.press();
        keyboard.press();
        assert!(keyboard.flap_requested());
        assert!(!keyboard.flap_requested());
    }

    #[test]
    fn test_held_key_flaps_every_tick_until_released() {
        let mut keyboard = KeyboardInput::with_key_release();
        keyboard.press();
        assert!(keyboard.flap_requested());
        assert!(keyboard.flap_requested());
        assert!(keyboard.flap_requested());
        keyboard.release();
        assert!(!keyboard.flap_requested());
    }

    #[test]
    fn test_quick_tap_between_polls_still_flaps() {
        let mut keyboard = KeyboardInput::with_key_release();
        keyboard.press();
        keyboard.release();
        assert!(keyboard.flap_requested());
        assert!(!keyboard.flap_requested());
    }

    #[test]
    fn test_hub_reset_clears_every_source() {
        let mut hub = InputHub::new();
        hub.keyboard = KeyboardInput::with_key_release();
        hub.keyboard.press();
        hub.reset();
        assert!(!hub.flap_requested());
        assert!(hub.keyboard.tracks_release());
    }

    #[test]
    fn test_hub_ors_sources() {
        let polls = Rc::new(Cell::new(0));
        let mut hub = InputHub::new();
        hub.add_source(Box::new(Scripted {
            answers: vec![false, true, false],
            polls: Rc::clone(&polls),
        }));

        assert!(!hub.flap_requested());
        assert!(hub.flap_requested());
        hub.keyboard.press();
        assert!(hub.flap_requested());
        assert!(!hub.flap_requested());
    }

    #[test]
    fn test_hub_polls_every_source_each_tick() {
        let polls = Rc::new(Cell::new(0));
        let mut hub = InputHub::new();
        hub.add_source(Box::new(Scripted {
            answers: vec![true; 10],
            polls: Rc::clone(&polls),
        }));
        hub.keyboard.press();
        assert!(hub.flap_requested());
        assert_eq!(polls.get(), 1);
    }
}
