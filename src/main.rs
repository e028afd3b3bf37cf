use gridnav::config::Config;
use gridnav::movement::MoveState;
use gridnav::{GameMap, Simulation, Vec2};

/// Headless demo: build a map with a wall across the middle, spawn an agent,
/// send it to the far side, and report its progress every second.
fn main() {
    let config = Config::load();

    // wall across row 20 with a gap near the right edge
    let cols = config.grid.cols;
    let mut blocked = Vec::new();
    for col in 0..cols.saturating_sub(4) {
        blocked.push(col + 20 * cols);
    }
    let map = GameMap::with_blocked(
        config.grid.rows,
        config.grid.cols,
        config.grid.cell_width,
        config.grid.cell_height,
        &blocked,
    );

    let mut sim = Simulation::new(map, config.steering.clone(), config.sim.delta_time);

    let start = Vec2::new(
        2.5 * config.grid.cell_width,
        2.5 * config.grid.cell_height,
    );
    let goal = Vec2::new(
        2.5 * config.grid.cell_width,
        (config.grid.rows as f32 - 2.5) * config.grid.cell_height,
    );

    let agent = sim.spawn_agent(start);
    if !sim.add_user_waypoint(agent, goal) {
        eprintln!("Goal point {:?} is not traversable", goal);
        return;
    }

    println!(
        "Agent {} steering from ({:.0},{:.0}) to ({:.0},{:.0})",
        agent, start.x, start.y, goal.x, goal.y
    );

    let ticks_per_second = (1.0 / config.sim.delta_time).round() as u64;
    let max_seconds = 60;
    let mut arrived = false;

    for second in 1..=max_seconds {
        sim.run(ticks_per_second);

        let origin = sim.world().model(sim.agent(agent).model_id).origin;
        let movement = &sim.agent(agent).movement;
        let state = match movement.move_state() {
            MoveState::ToGoal => "goal",
            MoveState::ToTrail => "trail",
        };
        println!(
            "t={:3}s pos=({:6.1},{:6.1}) mode={} trail={} moving={}",
            second,
            origin.x,
            origin.y,
            state,
            movement.trail().len(),
            movement.is_moving()
        );

        if movement.current_waypoint().is_none() {
            arrived = true;
            println!("Arrived after {} seconds", second);
            break;
        }
    }

    if !arrived {
        println!("Gave up after {} seconds", max_seconds);
    }

    if config.logging.enable_action_log {
        match sim.log.save_to_file(&config.logging.action_log_path) {
            Ok(()) => println!("Action log written to {}", config.logging.action_log_path),
            Err(e) => eprintln!("Failed to write action log: {}", e),
        }
    }
    println!("{}", sim.log.summary());
}
