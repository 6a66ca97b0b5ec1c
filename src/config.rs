//! Tuning constants and file locations.
//!
//! Everything the game needs to know up front lives in [`Config`]. The
//! defaults reproduce the classic 800x400 arcade feel; a handful of
//! environment variables can override the file locations and the tick rate.

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = ".trace-runner";
const LEADERBOARD_FILE: &str = "leaderboard.json";
const LOG_FILE: &str = "trace-runner.log";

/// Physics and layout of the logical world, in canvas pixels per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    pub gravity: f32,
    /// Velocity set by a flap (negative = upward).
    pub flap_velocity: f32,
    pub character_x: f32,
    pub character_size: f32,
    pub obstacle_speed: f32,
    pub obstacle_width: f32,
    pub gap_height: f32,
    /// Minimum distance between a gap and the top/bottom edge.
    pub gap_margin: f32,
    pub obstacle_spacing: f32,
    pub obstacle_count: usize,
    pub difficulty_step: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            screen_width: 800.0,
            screen_height: 400.0,
            gravity: 0.5,
            flap_velocity: -7.0,
            character_x: 100.0,
            character_size: 40.0,
            obstacle_speed: 2.0,
            obstacle_width: 50.0,
            gap_height: 200.0,
            gap_margin: 50.0,
            obstacle_spacing: 300.0,
            obstacle_count: 3,
            difficulty_step: 5.0,
        }
    }
}

impl WorldConfig {
    /// Lowest y the character's top edge may take.
    pub fn floor(&self) -> f32 {
        self.screen_height - self.character_size
    }

    /// Starting height of the character: a third of the way down.
    pub fn character_start_y(&self) -> f32 {
        (self.screen_height / 3.0).floor()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub world: WorldConfig,
    pub tick_rate_ms: u64,
    pub leaderboard_path: PathBuf,
    pub leaderboard_capacity: usize,
    /// Wipe the leaderboard once when the program starts.
    pub reset_leaderboard_on_start: bool,
    /// Newline-delimited JSON hand landmarks; enables gesture input when set.
    pub gesture_feed: Option<PathBuf>,
    pub log_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            tick_rate_ms: 16, // ~60 FPS
            leaderboard_path: data_path(LEADERBOARD_FILE),
            leaderboard_capacity: 5,
            reset_leaderboard_on_start: false,
            gesture_feed: None,
            log_path: data_path(LOG_FILE),
        }
    }
}

impl Config {
    /// Defaults overlaid with `TRACE_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Config::default();

        if let Some(path) = lookup("TRACE_LEADERBOARD").filter(|s| !s.is_empty()) {
            config.leaderboard_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("TRACE_GESTURE_FEED").filter(|s| !s.is_empty()) {
            config.gesture_feed = Some(PathBuf::from(path));
        }
        if let Some(flag) = lookup("TRACE_RESET_LEADERBOARD") {
            config.reset_leaderboard_on_start = parse_flag(&flag);
        }
        if let Some(ms) = lookup("TRACE_TICK_MS").and_then(|s| s.trim().parse::<u64>().ok()) {
            config.tick_rate_ms = ms.max(1);
        }
        if let Some(path) = lookup("TRACE_LOG_FILE").filter(|s| !s.is_empty()) {
            config.log_path = PathBuf::from(path);
        }
        config
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// `~/.trace-runner/<file>`, or the working directory when there is no home.
fn data_path(file: &str) -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(APP_DIR).join(file),
        None => PathBuf::from(file),
    }
}
