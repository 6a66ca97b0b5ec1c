use rand::Rng;

use crate::config::WorldConfig;

use super::{Character, Course};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    Playing,
    Ended,
}

/// One round of play, from the first tick to the first collision.
#[derive(Debug, Clone)]
pub struct Round {
    pub character: Character,
    pub course: Course,
    state: RoundState,
    ticks: u64,
}

impl Round {
    pub fn new<R: Rng>(world: &WorldConfig, rng: &mut R) -> Self {
        Self::from_parts(Character::new(world), Course::new(world, rng))
    }

    pub fn from_parts(character: Character, course: Course) -> Self {
        Self {
            character,
            course,
            state: RoundState::Playing,
            ticks: 0,
        }
    }

    /// Advances the round by one frame.
    ///
    /// Order: character physics, obstacle scroll with per-obstacle collision,
    /// recycling, then the flap polled for this frame. The flap therefore
    /// shows up in the next frame's physics step.
    pub fn tick<R: Rng>(&mut self, flap_requested: bool, rng: &mut R) -> RoundState {
        if self.state == RoundState::Ended {
            return self.state;
        }
        self.ticks += 1;

        self.character.update();
        let outcome = self.course.advance(&self.character, rng);

        if outcome.collided {
            self.state = RoundState::Ended;
            log::info!(
                "round ended after {} ticks: score={} difficulty={}",
                self.ticks,
                self.score(),
                self.difficulty()
            );
            return self.state;
        }

        if flap_requested {
            self.character.flap();
        }
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state == RoundState::Ended
    }

    pub fn score(&self) -> u32 {
        self.course.score()
    }

    pub fn difficulty(&self) -> f32 {
        self.course.difficulty()
    }

    #[cfg(test)]
    fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Obstacle;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_flap_applies_after_physics() {
        let world = WorldConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(10);
        let mut round = Round::new(&world, &mut rng);

        round.tick(true, &mut rng);
        // Gravity ran first, then the flap overwrote the velocity
        assert_eq!(round.character.y, 133.5);
        assert_eq!(round.character.velocity_y, -7.0);

        round.tick(false, &mut rng);
        assert_eq!(round.character.velocity_y, -6.5);
        assert_eq!(round.character.y, 127.0);
    }

    #[test]
    fn test_collision_ends_round_and_freezes_it() {
        let world = WorldConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let course = Course::with_obstacles(
            &world,
            vec![Obstacle::with_gap(120.0, 300.0, &world)],
        );
        let mut round = Round::from_parts(Character::new(&world), course);

        assert_eq!(round.tick(false, &mut rng), RoundState::Ended);
        assert!(round.is_over());

        let y = round.character.y;
        let ticks = round.ticks();
        assert_eq!(round.tick(true, &mut rng), RoundState::Ended);
        assert_eq!(round.character.y, y);
        assert_eq!(round.ticks(), ticks);
    }

    #[test]
    fn test_unattended_round_eventually_ends() {
        let world = WorldConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let mut round = Round::new(&world, &mut rng);
        for _ in 0..10_000 {
            if round.tick(false, &mut rng) == RoundState::Ended {
                break;
            }
        }
        // Resting on the floor, Trace sits below every possible gap
        assert!(round.is_over());
        assert_eq!(round.score(), 0);
    }
}
