use crate::config::WorldConfig;

use super::Bounds;

/// Trace: fixed column, free vertical motion.
#[derive(Debug, Clone)]
pub struct Character {
    pub x: f32,
    pub y: f32,
    pub velocity_y: f32,
    size: f32,
    gravity: f32,
    flap_velocity: f32,
    floor: f32,
}

impl Character {
    pub fn new(world: &WorldConfig) -> Self {
        Self {
            x: world.character_x,
            y: world.character_start_y(),
            velocity_y: 0.0,
            size: world.character_size,
            gravity: world.gravity,
            flap_velocity: world.flap_velocity,
            floor: world.floor(),
        }
    }

    /// Overwrites the current velocity with the upward impulse.
    pub fn flap(&mut self) {
        self.velocity_y = self.flap_velocity;
    }

    /// One physics step. Velocity keeps accumulating while pinned to an edge.
    pub fn update(&mut self) {
        self.velocity_y += self.gravity;
        self.y += self.velocity_y;
        self.y = self.y.clamp(0.0, self.floor);
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.size, self.size)
    }
}
