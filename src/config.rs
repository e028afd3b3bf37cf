use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub steering: SteeringConfig,
    #[serde(default)]
    pub sim: SimConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_cols")]
    pub cols: usize,
    #[serde(default = "default_rows")]
    pub rows: usize,
    #[serde(default = "default_cell_width")]
    pub cell_width: f32,
    #[serde(default = "default_cell_height")]
    pub cell_height: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SteeringConfig {
    /// Top speed in pixels per second
    #[serde(default = "default_max_speed")]
    pub max_speed: f32,
    #[serde(default = "default_collision_radius")]
    pub collision_radius: f32,
    /// Candidate sweep step in degrees
    #[serde(default = "default_rotation_increment")]
    pub rotation_increment_deg: f32,
    /// Samples projected ahead along each candidate direction
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
    /// Arrival distance for waypoints
    #[serde(default = "default_goal_range")]
    pub goal_range: f32,
    #[serde(default = "default_waypoint_bias")]
    pub waypoint_bias: f32,
    #[serde(default = "default_lateral_bias")]
    pub lateral_bias: f32,
    #[serde(default = "default_forward_bias")]
    pub forward_bias: f32,
    /// Valid-step growth on a side path counting as "opened"
    #[serde(default = "default_step_increase_threshold")]
    pub step_increase_threshold: usize,
    #[serde(default = "default_goal_capacity")]
    pub goal_capacity: usize,
    #[serde(default = "default_trail_capacity")]
    pub trail_capacity: usize,
    /// Ticks between known-map resets around the goal
    #[serde(default = "default_known_map_reset_interval")]
    pub known_map_reset_interval: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimConfig {
    /// Fixed tick delta in seconds
    #[serde(default = "default_delta_time")]
    pub delta_time: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_enable_action_log")]
    pub enable_action_log: bool,
    #[serde(default = "default_action_log_path")]
    pub action_log_path: String,
}

// Default values
fn default_cols() -> usize { 40 }
fn default_rows() -> usize { 40 }
fn default_cell_width() -> f32 { 20.0 }
fn default_cell_height() -> f32 { 20.0 }
fn default_max_speed() -> f32 { 120.0 }
fn default_collision_radius() -> f32 { 6.0 }
fn default_rotation_increment() -> f32 { 1.0 }
fn default_max_steps() -> usize { 5 }
fn default_goal_range() -> f32 { 4.0 }
fn default_waypoint_bias() -> f32 { 2.0 }
fn default_lateral_bias() -> f32 { 1.0 }
fn default_forward_bias() -> f32 { 1.1 }
fn default_step_increase_threshold() -> usize { 2 }
fn default_goal_capacity() -> usize { 8 }
fn default_trail_capacity() -> usize { 64 }
fn default_known_map_reset_interval() -> u64 { 30 }
fn default_delta_time() -> f32 { 1.0 / 60.0 }
fn default_enable_action_log() -> bool { false }
fn default_action_log_path() -> String { "action_log.json".to_string() }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cols: default_cols(),
            rows: default_rows(),
            cell_width: default_cell_width(),
            cell_height: default_cell_height(),
        }
    }
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            max_speed: default_max_speed(),
            collision_radius: default_collision_radius(),
            rotation_increment_deg: default_rotation_increment(),
            max_steps: default_max_steps(),
            goal_range: default_goal_range(),
            waypoint_bias: default_waypoint_bias(),
            lateral_bias: default_lateral_bias(),
            forward_bias: default_forward_bias(),
            step_increase_threshold: default_step_increase_threshold(),
            goal_capacity: default_goal_capacity(),
            trail_capacity: default_trail_capacity(),
            known_map_reset_interval: default_known_map_reset_interval(),
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            delta_time: default_delta_time(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_action_log: default_enable_action_log(),
            action_log_path: default_action_log_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            steering: SteeringConfig::default(),
            sim: SimConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from config.toml, or use defaults if missing
    pub fn load() -> Self {
        Self::load_from("config.toml")
    }

    pub fn load_from(path: &str) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    println!("Loaded configuration from {}", path);
                    config
                }
                Err(e) => {
                    eprintln!("Warning: Failed to parse {}: {}", path, e);
                    eprintln!("Using default configuration");
                    Config::default()
                }
            },
            Err(_) => {
                println!("No {} found, using default configuration", path);
                Config::default()
            }
        }
    }
}
