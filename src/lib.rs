pub mod action_log;
pub mod bounds;
pub mod collision;
pub mod collision_model;
pub mod config;
pub mod grid_cell;
pub mod map;
pub mod movement;
pub mod save_state;
pub mod sim;
pub mod spatial_grid;
pub mod vec2;
pub mod waypoint_queue;

pub use bounds::Bounds;
pub use collision::Collision;
pub use collision_model::{CollisionModel, CollisionWorld};
pub use config::Config;
pub use map::GameMap;
pub use movement::{Decision, MoveState, Movement, Pathing};
pub use sim::Simulation;
pub use spatial_grid::SpatialIndexGrid;
pub use vec2::Vec2;
