use crate::action_log::{Action, ActionLog};
use crate::bounds::Bounds;
use crate::collision_model::CollisionWorld;
use crate::config::{Config, SteeringConfig};
use crate::map::GameMap;
use crate::movement::Movement;
use crate::vec2::Vec2;

/// One autonomous agent: its collision body plus its planner
pub struct Agent {
    pub model_id: usize,
    pub movement: Movement,
}

/// The explicit simulation context: world, agents, fixed tick delta, and the
/// action log. Constructed once, torn down explicitly; multiple independent
/// simulations can coexist.
pub struct Simulation {
    world: CollisionWorld,
    agents: Vec<Agent>,
    steering: SteeringConfig,
    delta_time: f32,
    tick_count: u64,
    pub log: ActionLog,
}

impl Simulation {
    pub fn new(map: GameMap, steering: SteeringConfig, delta_time: f32) -> Self {
        Simulation {
            world: CollisionWorld::new(map),
            agents: Vec::new(),
            steering,
            delta_time,
            tick_count: 0,
            log: ActionLog::new(),
        }
    }

    /// Build an open-map simulation from configuration
    pub fn from_config(config: &Config) -> Self {
        let map = GameMap::new(
            config.grid.rows,
            config.grid.cols,
            config.grid.cell_width,
            config.grid.cell_height,
        );
        Simulation::new(map, config.steering.clone(), config.sim.delta_time)
    }

    pub fn world(&self) -> &CollisionWorld {
        &self.world
    }

    pub fn map(&self) -> &GameMap {
        self.world.map()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    pub fn agent(&self, index: usize) -> &Agent {
        &self.agents[index]
    }

    pub fn agent_mut(&mut self, index: usize) -> &mut Agent {
        &mut self.agents[index]
    }

    /// Spawn an agent at a world position; returns its index
    pub fn spawn_agent(&mut self, position: Vec2) -> usize {
        let movement = Movement::new(self.world.map(), self.steering.clone(), self.delta_time);
        let local_bounds = Bounds::centered(self.steering.collision_radius);
        let model_id = self.world.insert_model(local_bounds, position);
        self.agents.push(Agent { model_id, movement });
        let index = self.agents.len() - 1;
        self.log.log(
            self.tick_count,
            Action::SpawnAgent {
                agent: index,
                x: position.x,
                y: position.y,
            },
        );
        index
    }

    /// Queue a goal for an agent; points in collision are silently ignored
    /// (logged as rejected)
    pub fn add_user_waypoint(&mut self, agent: usize, point: Vec2) -> bool {
        let accepted = self.agents[agent]
            .movement
            .add_user_waypoint(self.world.map(), point);
        self.log.log(
            self.tick_count,
            Action::AddWaypoint {
                agent,
                x: point.x,
                y: point.y,
                accepted,
            },
        );
        accepted
    }

    /// Remove an agent and its collision body. Later agents shift down
    /// one index, matching Vec::remove.
    pub fn remove_agent(&mut self, agent: usize) {
        let removed = self.agents.remove(agent);
        self.world.remove_model(removed.model_id);
        self.log.log(self.tick_count, Action::RemoveAgent { agent });
    }

    /// Forget an agent's known map, queues, and steering state
    pub fn reset_agent(&mut self, agent: usize) {
        self.agents[agent].movement.reset();
        self.log.log(self.tick_count, Action::ResetAgent { agent });
    }

    /// Advance one fixed tick. Agents are processed in list order, so an
    /// agent's grid re-registration is visible to every later agent's
    /// broad-phase query within the same tick.
    pub fn tick(&mut self) {
        self.tick_count += 1;
        for agent in self.agents.iter_mut() {
            agent.movement.update(&mut self.world, agent.model_id);
        }
    }

    /// Run several ticks back to back
    pub fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.tick();
        }
    }
}
