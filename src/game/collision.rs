use super::{Character, Obstacle};

/// True when Trace touches either barrier of `obstacle`.
pub fn collides(character: &Character, obstacle: &Obstacle) -> bool {
    let size = character.size();
    let overlaps_x = character.x < obstacle.right_edge() && character.x + size > obstacle.x;
    let outside_gap = character.y < obstacle.gap_y()
        || character.y + size > obstacle.gap_y() + obstacle.gap_height();
    overlaps_x && outside_gap
}
