use rand::Rng;

use crate::config::WorldConfig;

use super::Bounds;

/// A barrier pair scrolling leftward, open between `gap_y` and `gap_y + gap_height`.
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub x: f32,
    gap_y: f32,
    width: f32,
    gap_height: f32,
    speed: f32,
    screen_height: f32,
}

impl Obstacle {
    pub fn new<R: Rng>(x: f32, difficulty: f32, world: &WorldConfig, rng: &mut R) -> Self {
        let (low, high) = gap_range(world, difficulty);
        let gap_y = if high > low {
            rng.gen_range(low..high)
        } else {
            low
        };
        Self::with_gap(x, gap_y, world)
    }

    /// Builds an obstacle with a known gap position.
    pub fn with_gap(x: f32, gap_y: f32, world: &WorldConfig) -> Self {
        Self {
            x,
            gap_y,
            width: world.obstacle_width,
            gap_height: world.gap_height,
            speed: world.obstacle_speed,
            screen_height: world.screen_height,
        }
    }

    pub fn update(&mut self) {
        self.x -= self.speed;
    }

    pub fn gap_y(&self) -> f32 {
        self.gap_y
    }

    pub fn gap_height(&self) -> f32 {
        self.gap_height
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn right_edge(&self) -> f32 {
        self.x + self.width
    }

    /// Fully past the left edge of the screen.
    pub fn is_off_screen(&self) -> bool {
        self.right_edge() < 0.0
    }

    pub fn top_rect(&self) -> Bounds {
        Bounds::new(self.x, 0.0, self.width, self.gap_y)
    }

    pub fn bottom_rect(&self) -> Bounds {
        let top = self.gap_y + self.gap_height;
        Bounds::new(self.x, top, self.width, self.screen_height - top)
    }
}

/// Half-open range of legal gap positions at `difficulty`.
///
/// The upper bound shrinks as difficulty rises. Once it meets the lower bound
/// the range collapses onto the lower bound instead of going negative.
pub fn gap_range(world: &WorldConfig, difficulty: f32) -> (f32, f32) {
    let low = world.gap_margin;
    let high = world.screen_height - world.gap_height - world.gap_margin - difficulty;
    (low, high.max(low))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_update_moves_left_by_speed() {
        let world = WorldConfig::default();
        let mut obstacle = Obstacle::with_gap(50.0, 100.0, &world);
        obstacle.update();
        assert_eq!(obstacle.x, 48.0);
        assert_eq!(obstacle.right_edge(), 98.0);
        assert!(!obstacle.is_off_screen());
    }

    #[test]
    fn test_off_screen_only_when_right_edge_negative() {
        let world = WorldConfig::default();
        assert!(Obstacle::with_gap(-60.0, 100.0, &world).is_off_screen());
        assert!(!Obstacle::with_gap(-50.0, 100.0, &world).is_off_screen());
        assert!(!Obstacle::with_gap(-49.0, 100.0, &world).is_off_screen());
    }

    #[test]
    fn test_barrier_rects() {
        let world = WorldConfig::default();
        let obstacle = Obstacle::with_gap(300.0, 80.0, &world);
        assert_eq!(obstacle.top_rect(), Bounds::new(300.0, 0.0, 50.0, 80.0));
        assert_eq!(obstacle.bottom_rect(), Bounds::new(300.0, 280.0, 50.0, 120.0));
    }

    #[test]
    fn test_gap_within_range_for_valid_difficulties() {
        let world = WorldConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for step in 0..20 {
            let difficulty = step as f32 * 5.0;
            for _ in 0..200 {
                let obstacle = Obstacle::new(800.0, difficulty, &world, &mut rng);
                let gap = obstacle.gap_y();
                assert!(gap >= 50.0, "gap {gap} below margin at d={difficulty}");
                assert!(gap < 150.0 - difficulty, "gap {gap} too low at d={difficulty}");
            }
        }
    }

    #[test]
    fn test_extreme_difficulty_clamps_to_margin() {
        let world = WorldConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for difficulty in [100.0, 105.0, 500.0, 10_000.0] {
            let obstacle = Obstacle::new(800.0, difficulty, &world, &mut rng);
            assert_eq!(obstacle.gap_y(), 50.0);
        }
        assert_eq!(gap_range(&world, 1_000.0), (50.0, 50.0));
    }
}
