use crate::config::SteeringConfig;
use crate::map::GameMap;
use crate::sim::Simulation;
use crate::vec2::Vec2;
use serde::{Deserialize, Serialize};
use std::fs;

/// Save state containing the static map and agent positions
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveState {
    /// Grid dimensions
    pub grid_rows: usize,
    pub grid_cols: usize,
    pub cell_width: f32,
    pub cell_height: f32,
    /// Solid cells (stored as cell ids)
    pub blocked_cells: Vec<usize>,
    /// Agent positions (without steering state)
    pub agents: Vec<AgentSaveData>,
}

/// Minimal agent data for saving/loading
#[derive(Debug, Serialize, Deserialize)]
pub struct AgentSaveData {
    pub index: usize,
    pub x: f32,
    pub y: f32,
}

impl SaveState {
    /// Snapshot a running simulation's map and agent positions
    pub fn from_simulation(sim: &Simulation) -> Self {
        let map = sim.map();
        let agents = (0..sim.agent_count())
            .map(|index| {
                let origin = sim.world().model(sim.agent(index).model_id).origin;
                AgentSaveData {
                    index,
                    x: origin.x,
                    y: origin.y,
                }
            })
            .collect();

        SaveState {
            grid_rows: map.rows(),
            grid_cols: map.cols(),
            cell_width: map.cell_width(),
            cell_height: map.cell_height(),
            blocked_cells: map.blocked_cell_ids(),
            agents,
        }
    }

    /// Save to file
    pub fn save_to_file(&self, path: &str) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize save state: {}", e))?;

        fs::write(path, json).map_err(|e| format!("Failed to write save file: {}", e))?;

        Ok(())
    }

    /// Load from file
    pub fn load_from_file(path: &str) -> Result<Self, String> {
        let json =
            fs::read_to_string(path).map_err(|e| format!("Failed to read save file: {}", e))?;

        let save_state: SaveState =
            serde_json::from_str(&json).map_err(|e| format!("Failed to parse save file: {}", e))?;

        Ok(save_state)
    }

    /// Restore the static map from save state
    pub fn restore_map(&self) -> GameMap {
        GameMap::with_blocked(
            self.grid_rows,
            self.grid_cols,
            self.cell_width,
            self.cell_height,
            &self.blocked_cells,
        )
    }

    /// Restore a fresh simulation: map geometry and agent positions only;
    /// steering state and known maps start over
    pub fn restore_simulation(&self, steering: SteeringConfig, delta_time: f32) -> Simulation {
        let mut sim = Simulation::new(self.restore_map(), steering, delta_time);
        for agent in &self.agents {
            sim.spawn_agent(Vec2::new(agent.x, agent.y));
        }
        sim
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_json() {
        let map = GameMap::with_blocked(8, 8, 20.0, 20.0, &[10, 27]);
        let mut sim = Simulation::new(map, SteeringConfig::default(), 1.0 / 60.0);
        sim.spawn_agent(Vec2::new(30.0, 30.0));
        sim.spawn_agent(Vec2::new(90.0, 110.0));

        let state = SaveState::from_simulation(&sim);
        let json = serde_json::to_string(&state).unwrap();
        let parsed: SaveState = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.blocked_cells, vec![10, 27]);
        assert_eq!(parsed.agents.len(), 2);
        assert_eq!(parsed.agents[1].x, 90.0);

        let restored = parsed.restore_simulation(SteeringConfig::default(), 1.0 / 60.0);
        assert_eq!(restored.agent_count(), 2);
        assert!(restored.map().is_solid(1, 2)); // cell id 10
        let origin = restored.world().model(restored.agent(0).model_id).origin;
        assert_eq!(origin, Vec2::new(30.0, 30.0));
    }
}
