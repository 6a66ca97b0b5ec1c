//! The round simulation: Trace, the scrolling barriers and the rules tying
//! them together. Nothing in here touches the terminal.

pub mod character;
pub mod collision;
pub mod course;
pub mod obstacle;
pub mod round;

pub use character::Character;
pub use collision::collides;
pub use course::{AdvanceOutcome, Course};
pub use obstacle::{gap_range, Obstacle};
pub use round::{Round, RoundState};

/// Axis-aligned rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Bounds {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Strict overlap; rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersects_is_symmetric() {
        let a = Bounds::new(0.0, 0.0, 40.0, 40.0);
        let b = Bounds::new(30.0, 30.0, 50.0, 50.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Bounds::new(0.0, 0.0, 40.0, 40.0);
        assert!(!a.intersects(&Bounds::new(40.0, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&Bounds::new(0.0, 40.0, 10.0, 10.0)));
    }

    #[test]
    fn test_zero_height_strip_at_top_edge() {
        let a = Bounds::new(0.0, 0.0, 40.0, 40.0);
        assert!(!a.intersects(&Bounds::new(10.0, 0.0, 50.0, 0.0)));
    }
}
