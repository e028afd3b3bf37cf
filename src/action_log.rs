use serde::{Deserialize, Serialize};
use std::time::Instant;

/// User-level actions that change the simulation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Action {
    /// Agent spawned at a world position
    SpawnAgent { agent: usize, x: f32, y: f32 },
    /// Waypoint queued for an agent (accepted = false means the point was
    /// in collision or off the map and was silently ignored)
    AddWaypoint { agent: usize, x: f32, y: f32, accepted: bool },
    /// Agent memory and queues reset
    ResetAgent { agent: usize },
    /// Agent removed from the simulation
    RemoveAgent { agent: usize },
}

/// Logged action with timestamp and the tick it happened on
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggedAction {
    /// Milliseconds since the log was created
    pub timestamp_ms: u64,
    /// Simulation tick at the time of the action
    pub tick: u64,
    pub action: Action,
}

/// Action logger
pub struct ActionLog {
    start_time: Instant,
    actions: Vec<LoggedAction>,
}

impl ActionLog {
    pub fn new() -> Self {
        ActionLog {
            start_time: Instant::now(),
            actions: Vec::new(),
        }
    }

    pub fn log(&mut self, tick: u64, action: Action) {
        let timestamp_ms = self.start_time.elapsed().as_millis() as u64;
        self.actions.push(LoggedAction {
            timestamp_ms,
            tick,
            action,
        });
    }

    pub fn actions(&self) -> &[LoggedAction] {
        &self.actions
    }

    /// Save log to JSON file
    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(&self.actions)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Print log to console
    pub fn print(&self) {
        println!("\n=== Action Log ({} events) ===", self.actions.len());
        for (i, logged) in self.actions.iter().enumerate() {
            println!(
                "[{:6}ms] tick {:5} #{:3} {:?}",
                logged.timestamp_ms,
                logged.tick,
                i + 1,
                logged.action
            );
        }
        println!("=== End of Log ===\n");
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let mut spawns = 0;
        let mut accepted_waypoints = 0;
        let mut rejected_waypoints = 0;
        let mut resets = 0;

        for logged in &self.actions {
            match &logged.action {
                Action::SpawnAgent { .. } => spawns += 1,
                Action::AddWaypoint { accepted, .. } => {
                    if *accepted {
                        accepted_waypoints += 1;
                    } else {
                        rejected_waypoints += 1;
                    }
                }
                Action::ResetAgent { .. } => resets += 1,
                Action::RemoveAgent { .. } => {}
            }
        }

        let duration = self.actions.last().map(|l| l.timestamp_ms).unwrap_or(0);
        format!(
            "Session Duration: {}ms\n\
             Total Events: {}\n\
             Agents Spawned: {}\n\
             Waypoints: {} accepted, {} rejected\n\
             Agent Resets: {}",
            duration,
            self.actions.len(),
            spawns,
            accepted_waypoints,
            rejected_waypoints,
            resets
        )
    }
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new()
    }
}
