use rand::Rng;

use crate::config::WorldConfig;

use super::{collides, Character, Obstacle};

/// What one advance of the course produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvanceOutcome {
    pub recycled: u32,
    pub collided: bool,
}

/// The live obstacles of a round, plus the difficulty and score they drive.
#[derive(Debug, Clone)]
pub struct Course {
    obstacles: Vec<Obstacle>,
    difficulty: f32,
    score: u32,
    world: WorldConfig,
}

impl Course {
    pub fn new<R: Rng>(world: &WorldConfig, rng: &mut R) -> Self {
        let obstacles = (0..world.obstacle_count)
            .map(|i| {
                let x = world.screen_width + i as f32 * world.obstacle_spacing;
                Obstacle::new(x, 0.0, world, rng)
            })
            .collect();
        Self {
            obstacles,
            difficulty: 0.0,
            score: 0,
            world: *world,
        }
    }

    /// A course with hand-placed obstacles.
    pub fn with_obstacles(world: &WorldConfig, obstacles: Vec<Obstacle>) -> Self {
        Self {
            obstacles,
            difficulty: 0.0,
            score: 0,
            world: *world,
        }
    }

    /// Scrolls every obstacle, tests each one still on screen against
    /// `character`, then recycles the ones that left the screen.
    pub fn advance<R: Rng>(&mut self, character: &Character, rng: &mut R) -> AdvanceOutcome {
        let mut outcome = AdvanceOutcome::default();

        for obstacle in &mut self.obstacles {
            obstacle.update();
            if obstacle.is_off_screen() {
                outcome.recycled += 1;
            } else if collides(character, obstacle) {
                outcome.collided = true;
            }
        }

        if outcome.recycled > 0 {
            self.obstacles.retain(|o| !o.is_off_screen());
            for _ in 0..outcome.recycled {
                self.difficulty += self.world.difficulty_step;
                let fresh = Obstacle::new(self.world.screen_width, self.difficulty, &self.world, rng);
                self.obstacles.push(fresh);
                self.score += 1;
                log::debug!(
                    "obstacle recycled: score={} difficulty={}",
                    self.score,
                    self.difficulty
                );
            }
        }

        outcome
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn difficulty(&self) -> f32 {
        self.difficulty
    }

    pub fn score(&self) -> u32 {
        self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn safe_character(world: &WorldConfig) -> Character {
        Character::new(world)
    }

    #[test]
    fn test_new_course_seeds_three_obstacles() {
        let world = WorldConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let course = Course::new(&world, &mut rng);
        let xs: Vec<f32> = course.obstacles().iter().map(|o| o.x).collect();
        assert_eq!(xs, vec![800.0, 1100.0, 1400.0]);
        assert_eq!(course.score(), 0);
        assert_eq!(course.difficulty(), 0.0);
    }

    #[test]
    fn test_recycle_bumps_difficulty_and_score() {
        let world = WorldConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let obstacles = vec![
            Obstacle::with_gap(-58.0, 100.0, &world),
            Obstacle::with_gap(500.0, 100.0, &world),
            Obstacle::with_gap(800.0, 100.0, &world),
        ];
        let mut course = Course::with_obstacles(&world, obstacles);

        let outcome = course.advance(&safe_character(&world), &mut rng);

        assert_eq!(outcome.recycled, 1);
        assert!(!outcome.collided);
        assert_eq!(course.score(), 1);
        assert_eq!(course.difficulty(), 5.0);
        assert_eq!(course.obstacles().len(), 3);
        // Survivors keep their order, the replacement goes last at the spawn edge
        assert_eq!(course.obstacles()[0].x, 498.0);
        assert_eq!(course.obstacles()[1].x, 798.0);
        assert_eq!(course.obstacles()[2].x, 800.0);
    }

    #[test]
    fn test_two_exits_in_one_tick_recycle_both() {
        let world = WorldConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let obstacles = vec![
            Obstacle::with_gap(-55.0, 100.0, &world),
            Obstacle::with_gap(-51.0, 100.0, &world),
            Obstacle::with_gap(600.0, 100.0, &world),
        ];
        let mut course = Course::with_obstacles(&world, obstacles);

        let outcome = course.advance(&safe_character(&world), &mut rng);

        assert_eq!(outcome.recycled, 2);
        assert_eq!(course.score(), 2);
        assert_eq!(course.difficulty(), 10.0);
        assert_eq!(course.obstacles().len(), 3);
        assert_eq!(course.obstacles()[0].x, 598.0);
    }

    #[test]
    fn test_obstacle_at_edge_not_recycled() {
        let world = WorldConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let mut course =
            Course::with_obstacles(&world, vec![Obstacle::with_gap(-48.0, 100.0, &world)]);
        let outcome = course.advance(&safe_character(&world), &mut rng);
        assert_eq!(outcome.recycled, 0);
        assert_eq!(course.obstacles()[0].x, -50.0);
        assert_eq!(course.score(), 0);
    }

    #[test]
    fn test_collision_reported() {
        let world = WorldConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut course =
            Course::with_obstacles(&world, vec![Obstacle::with_gap(102.0, 300.0, &world)]);
        // Character sits at y=133, above a gap starting at 300
        let outcome = course.advance(&safe_character(&world), &mut rng);
        assert!(outcome.collided);
    }

    #[test]
    fn test_count_invariant_over_long_run() {
        let world = WorldConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut course = Course::new(&world, &mut rng);
        let character = safe_character(&world);
        let mut last_score = 0;
        for _ in 0..5_000 {
            let outcome = course.advance(&character, &mut rng);
            assert_eq!(course.obstacles().len(), 3);
            assert_eq!(course.score(), last_score + outcome.recycled);
            assert!(outcome.recycled <= 1);
            last_score = course.score();
        }
        assert!(course.score() > 0);
        assert_eq!(course.difficulty(), course.score() as f32 * 5.0);
    }
}
