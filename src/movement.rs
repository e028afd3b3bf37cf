use crate::collision;
use crate::collision_model::CollisionWorld;
use crate::config::SteeringConfig;
use crate::map::GameMap;
use crate::spatial_grid::SpatialIndexGrid;
use crate::vec2::Vec2;
use crate::waypoint_queue::WaypointQueue;

pub const UNKNOWN_TILE: u8 = 0;
pub const VISITED_TILE: u8 = 1;

/// Which steering algorithm drives this agent.
/// `None` means velocity is set directly and only the collision-avoidance
/// response runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pathing {
    None,
    Compass,
    Wall,
}

/// Which waypoint queue is authoritative this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveState {
    ToGoal,
    ToTrail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallSide {
    Left,
    Right,
}

/// How promising a candidate travel direction looked this frame
#[derive(Debug, Clone, Copy, Default)]
pub struct Decision {
    pub vector: Vec2,
    /// Fraction of sampled steps landing on UNKNOWN known-map tiles
    pub step_ratio: f32,
    /// Consecutive collision-free samples along the direction
    pub valid_steps: usize,
}

impl Decision {
    pub fn with_vector(vector: Vec2) -> Self {
        Decision {
            vector,
            step_ratio: 0.0,
            valid_steps: 0,
        }
    }
}

/// Per-agent steering: waypoint queues, known-map exploration memory, the
/// compass-sweep steering algorithm, the wall-follow fallback, and the
/// collision-avoidance response for directly-driven motion.
pub struct Movement {
    params: SteeringConfig,
    delta_time: f32,
    /// Current per-tick speed in pixels
    speed: f32,
    moving: bool,
    pathing: Pathing,
    move_state: MoveState,

    forward: Decision,
    left: Decision,
    right: Decision,

    goals: WaypointQueue,
    trail: WaypointQueue,
    current_waypoint: Option<Vec2>,

    known_map: SpatialIndexGrid<u8>,
    current_tile: Option<(usize, usize)>,
    previous_tile: Option<(usize, usize)>,
    last_trail_tile: Option<(usize, usize)>,

    wall_side: Option<WallSide>,
    wall_confirmed: bool,
    /// Direction into the followed wall; kept 90 degrees on the wall side
    /// of forward while contact holds
    wall_dir: Vec2,
    /// Accumulated corner turns since wall contact last tested blocked
    wall_sweep_deg: f32,

    skip_region_reset: bool,
    tick_count: u64,
}

impl Movement {
    /// Create a planner whose known map mirrors the world grid dimensions
    pub fn new(map: &GameMap, params: SteeringConfig, delta_time: f32) -> Self {
        let max_step = params.max_speed * delta_time;
        Movement {
            speed: max_step,
            delta_time,
            moving: false,
            pathing: Pathing::Compass,
            move_state: MoveState::ToGoal,
            forward: Decision::with_vector(Vec2::new(1.0, 0.0)),
            left: Decision::with_vector(Vec2::new(0.0, 1.0)),
            right: Decision::with_vector(Vec2::new(0.0, -1.0)),
            goals: WaypointQueue::with_capacity(params.goal_capacity),
            trail: WaypointQueue::with_capacity(params.trail_capacity),
            current_waypoint: None,
            known_map: SpatialIndexGrid::new(
                map.rows(),
                map.cols(),
                map.cell_width(),
                map.cell_height(),
            ),
            current_tile: None,
            previous_tile: None,
            last_trail_tile: None,
            wall_side: None,
            wall_confirmed: false,
            wall_dir: Vec2::ZERO,
            wall_sweep_deg: 0.0,
            skip_region_reset: false,
            tick_count: 0,
            params,
        }
    }

    pub fn pathing(&self) -> Pathing {
        self.pathing
    }

    pub fn set_pathing(&mut self, pathing: Pathing) {
        self.pathing = pathing;
    }

    pub fn move_state(&self) -> MoveState {
        self.move_state
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn forward(&self) -> &Decision {
        &self.forward
    }

    pub fn current_waypoint(&self) -> Option<Vec2> {
        self.current_waypoint
    }

    /// Read-only known map for debug overlays
    pub fn known_map(&self) -> &SpatialIndexGrid<u8> {
        &self.known_map
    }

    pub fn goals(&self) -> &WaypointQueue {
        &self.goals
    }

    pub fn trail(&self) -> &WaypointQueue {
        &self.trail
    }

    /// Debug reset: forget everything learned and queued
    pub fn reset(&mut self) {
        self.goals.clear();
        self.trail.clear();
        self.current_waypoint = None;
        self.known_map.clear_all_cells();
        self.current_tile = None;
        self.previous_tile = None;
        self.last_trail_tile = None;
        self.move_state = MoveState::ToGoal;
        self.wall_side = None;
        self.wall_confirmed = false;
        self.wall_dir = Vec2::ZERO;
        self.wall_sweep_deg = 0.0;
        self.moving = false;
        self.skip_region_reset = true;
    }

    /// Queue a user goal. Points inside static collision or off the map
    /// are silently rejected.
    pub fn add_user_waypoint(&mut self, map: &GameMap, point: Vec2) -> bool {
        if !map.is_point_traversable(point) {
            return false;
        }
        self.goals.push_front(point);
        self.update_waypoint(false);
        true
    }

    /// Per-tick entry point. Steers, commits motion, then runs known-map,
    /// trail, and arrival bookkeeping.
    pub fn update(&mut self, world: &mut CollisionWorld, id: usize) {
        self.tick_count += 1;

        if self.current_waypoint.is_none() && self.pathing != Pathing::None {
            self.stop(world, id);
            return;
        }

        match self.pathing {
            Pathing::Compass => self.compass_follow(world, id),
            Pathing::Wall => self.wall_follow(world, id),
            Pathing::None => self.collision_response(world, id),
        }

        world.update_origin(id);
        self.update_known_map(world, id);

        if let Some(waypoint) = self.current_waypoint {
            let origin = world.model(id).origin;
            let range = self.params.goal_range;
            if origin.distance_squared(waypoint) <= range * range {
                self.update_waypoint(true);
            }
        }
    }

    fn stop(&mut self, world: &mut CollisionWorld, id: usize) {
        world.model_mut(id).velocity = Vec2::ZERO;
        self.moving = false;
    }

    /// Re-derive the authoritative waypoint, optionally consuming the one
    /// just reached. A fresh goal invalidates old breadcrumbs.
    pub fn update_waypoint(&mut self, get_next: bool) {
        match self.move_state {
            MoveState::ToGoal => {
                if get_next {
                    self.goals.pop_back();
                    self.trail.clear();
                }
                self.check_trail();
                if let Some(goal) = self.goals.back() {
                    self.current_waypoint = Some(goal);
                    return;
                }
                if let Some(crumb) = self.trail.front() {
                    self.move_state = MoveState::ToTrail;
                    self.current_waypoint = Some(crumb);
                    return;
                }
                self.current_waypoint = None;
            }
            MoveState::ToTrail => {
                if get_next {
                    self.trail.pop_front();
                }
                if let Some(crumb) = self.trail.front() {
                    self.current_waypoint = Some(crumb);
                    return;
                }
                self.check_trail();
                if let Some(goal) = self.goals.back() {
                    self.move_state = MoveState::ToGoal;
                    self.current_waypoint = Some(goal);
                    return;
                }
                self.current_waypoint = None;
            }
        }
    }

    /// An empty trail means a fresh start: forget the known map
    fn check_trail(&mut self) {
        if self.trail.is_empty() {
            self.known_map.clear_all_cells();
            self.last_trail_tile = None;
            self.skip_region_reset = true;
        }
    }

    /// Project up to max_steps sample points along a candidate direction,
    /// probing three radius-offset points per sample against world validity.
    /// Fills in valid_steps and step_ratio; returns true when a sample lands
    /// within goal range of the current waypoint (GOAL mode only).
    pub fn check_vector_path(&self, map: &GameMap, origin: Vec2, decision: &mut Decision) -> bool {
        let dir = decision.vector;
        let radius = self.params.collision_radius;
        let ahead = dir * radius;
        let left_probe = dir.perpendicular_left() * radius;
        let right_probe = dir.perpendicular_right() * radius;
        let step_length = self.speed.max(1.0);
        let range = self.params.goal_range;

        let mut valid_steps = 0usize;
        let mut new_steps = 0.0f32;
        let mut reached = false;

        for step in 1..=self.params.max_steps {
            let sample = origin + dir * (step_length * step as f32);
            if !map.is_point_traversable(sample + ahead)
                || !map.is_point_traversable(sample + left_probe)
                || !map.is_point_traversable(sample + right_probe)
            {
                break;
            }
            valid_steps += 1;

            let (row, col) = self.known_map.index_validated(sample);
            if *self.known_map.cell(row, col) == UNKNOWN_TILE {
                new_steps += 1.0;
            }

            if self.move_state == MoveState::ToGoal {
                if let Some(waypoint) = self.current_waypoint {
                    if sample.distance_squared(waypoint) <= range * range {
                        reached = true;
                        break;
                    }
                }
            }
        }

        decision.valid_steps = valid_steps;
        decision.step_ratio = if valid_steps > 0 {
            new_steps / valid_steps as f32
        } else {
            0.0
        };
        reached
    }

    /// Primary steering: sweep candidate directions and pick the most
    /// promising short-range heading toward the current waypoint.
    fn compass_follow(&mut self, world: &mut CollisionWorld, id: usize) {
        let origin = world.model(id).origin;
        let waypoint = match self.current_waypoint {
            Some(w) => w,
            None => {
                self.stop(world, id);
                return;
            }
        };

        let waypoint_vec = waypoint - origin;
        let dist_sq = waypoint_vec.length_squared();
        let max_step = self.params.max_speed * self.delta_time;

        // ease off near the goal so arrival can be precise
        self.speed = if self.move_state == MoveState::ToGoal {
            let slow_range = max_step * self.params.max_steps as f32;
            if dist_sq < slow_range * slow_range {
                (dist_sq.sqrt() / self.params.max_steps as f32).clamp(1.0, max_step)
            } else {
                max_step
            }
        } else {
            max_step
        };

        let waypoint_dir = waypoint_vec.normalized();

        // refresh the carried sensors and note which side paths opened up
        let old_left_steps = self.left.valid_steps;
        let old_right_steps = self.right.valid_steps;
        if self.moving {
            let mut forward = self.forward;
            self.check_vector_path(world.map(), origin, &mut forward);
            self.forward = forward;
            let mut left = self.left;
            self.check_vector_path(world.map(), origin, &mut left);
            self.left = left;
            let mut right = self.right;
            self.check_vector_path(world.map(), origin, &mut right);
            self.right = right;
        }
        let opened = self.params.step_increase_threshold;
        let left_opened = self.left.valid_steps > old_left_steps + opened;
        let right_opened = self.right.valid_steps > old_right_steps + opened;
        let forward_blocked = self.forward.valid_steps == 0;

        // never consider doubling back once in motion
        let (start_vector, sweep_total) = if self.moving {
            (self.right.vector, 180.0f32)
        } else {
            (Vec2::new(1.0, 0.0), 360.0f32)
        };

        let mut best: Option<Decision> = None;
        let mut best_weight = f32::NEG_INFINITY;

        let mut angle = 0.0f32;
        while angle < sweep_total {
            let mut candidate =
                Decision::with_vector(start_vector.rotated_deg(angle).normalized());
            let reached = self.check_vector_path(world.map(), origin, &mut candidate);

            if reached {
                // greedy shortcut: if the literal waypoint vector is also
                // clear, prefer it over the swept candidate
                let mut direct = Decision::with_vector(waypoint_dir);
                if self.check_vector_path(world.map(), origin, &mut direct) {
                    self.adopt_heading(world, id, direct);
                } else {
                    self.adopt_heading(world, id, candidate);
                }
                return;
            }

            let mut weight = candidate.valid_steps as f32
                + candidate.vector.dot(waypoint_dir) * self.params.waypoint_bias;
            if self.moving {
                if left_opened {
                    weight += candidate.vector.dot(self.left.vector)
                        * self.params.lateral_bias
                        * self.left.step_ratio;
                }
                if right_opened {
                    weight += candidate.vector.dot(self.right.vector)
                        * self.params.lateral_bias
                        * self.right.step_ratio;
                }
                if !forward_blocked {
                    weight += candidate.vector.dot(self.forward.vector)
                        * self.params.forward_bias
                        * self.forward.step_ratio;
                }
            }

            let is_better = match &best {
                None => true,
                Some(current) => {
                    if (candidate.valid_steps > 0) != (current.valid_steps > 0) {
                        candidate.valid_steps > 0
                    } else if candidate.step_ratio != current.step_ratio {
                        // unexplored-tile novelty dominates plain weight
                        candidate.step_ratio > current.step_ratio
                    } else {
                        weight > best_weight
                    }
                }
            };
            if is_better {
                best = Some(candidate);
                best_weight = weight;
            }

            angle += self.params.rotation_increment_deg;
        }

        let best = match best {
            Some(b) => b,
            None => {
                self.stop(world, id);
                return;
            }
        };

        // cornered: discourage re-selecting this tile
        if self.forward.valid_steps == 0
            && (self.left.valid_steps == 0 || self.right.valid_steps == 0)
        {
            if let Some((row, col)) = self.current_tile {
                *self.known_map.cell_mut(row, col) = VISITED_TILE;
            }
        }

        if self.move_state == MoveState::ToGoal && best.step_ratio == 0.0 {
            // no productive direction: begin retreating along the trail
            self.move_state = MoveState::ToTrail;
        } else if self.move_state == MoveState::ToTrail && best.step_ratio > 0.0 {
            self.move_state = MoveState::ToGoal;
        }

        if self.move_state == MoveState::ToTrail && best.valid_steps == 0 {
            // fully blocked
            self.stop(world, id);
            return;
        }

        self.adopt_heading(world, id, best);
        self.update_waypoint(false);
    }

    /// Adopt a new forward direction, recompute the perpendicular sensors
    /// and their look-ahead validity, and commit the velocity.
    fn adopt_heading(&mut self, world: &mut CollisionWorld, id: usize, decision: Decision) {
        let origin = world.model(id).origin;
        self.forward = decision;

        let mut left = Decision::with_vector(decision.vector.perpendicular_left());
        self.check_vector_path(world.map(), origin, &mut left);
        self.left = left;

        let mut right = Decision::with_vector(decision.vector.perpendicular_right());
        self.check_vector_path(world.map(), origin, &mut right);
        self.right = right;

        world.model_mut(id).velocity = decision.vector * self.speed;
        self.moving = true;
    }

    /// Fallback steering: hand-on-the-wall search. Maintain contact with a
    /// chosen wall side, prefer continuing past corners, give up after one
    /// full rotation without finding the wall again.
    fn wall_follow(&mut self, world: &mut CollisionWorld, id: usize) {
        let origin = world.model(id).origin;
        self.speed = self.params.max_speed * self.delta_time;

        if !self.moving {
            let waypoint = match self.current_waypoint {
                Some(w) => w,
                None => {
                    self.stop(world, id);
                    return;
                }
            };
            let aim = Decision::with_vector((waypoint - origin).normalized());
            self.wall_side = None;
            self.wall_confirmed = false;
            self.wall_sweep_deg = 0.0;
            self.adopt_heading(world, id, aim);
        }

        let mut forward = self.forward;
        self.check_vector_path(world.map(), origin, &mut forward);
        self.forward = forward;
        let mut left = self.left;
        self.check_vector_path(world.map(), origin, &mut left);
        self.left = left;
        let mut right = self.right;
        self.check_vector_path(world.map(), origin, &mut right);
        self.right = right;

        if self.wall_side.is_none() {
            match self.find_wall_ahead(world.map(), origin) {
                Some((side, wall_dir)) => {
                    self.wall_side = Some(side);
                    self.wall_dir = wall_dir;
                    self.wall_sweep_deg = 0.0;
                    self.wall_confirmed = false;
                }
                None => {
                    // nothing to hug yet: keep heading for the waypoint
                    world.model_mut(id).velocity = self.forward.vector * self.speed;
                    self.moving = true;
                    return;
                }
            }
        }

        let side = match self.wall_side {
            Some(s) => s,
            None => return,
        };

        if !self.wall_confirmed {
            if !self.confirm_wall_behind(world.map(), origin, side) {
                self.stop(world, id);
                self.wall_side = None;
                return;
            }
            self.wall_confirmed = true;
        }

        match self.next_heading_along_wall(world.map(), origin, side) {
            Some(heading) => self.adopt_heading(world, id, heading),
            None => {
                // a full rotation found no opening
                self.stop(world, id);
                self.wall_side = None;
                self.wall_confirmed = false;
            }
        }
    }

    /// Sweep the front half; the first blocked direction is the wall, and
    /// it selects whichever adjacent side aligns better with it.
    fn find_wall_ahead(&self, map: &GameMap, origin: Vec2) -> Option<(WallSide, Vec2)> {
        let mut angle = -90.0f32;
        while angle <= 90.0 {
            let test = self.forward.vector.rotated_deg(angle);
            let mut sample = Decision::with_vector(test);
            self.check_vector_path(map, origin, &mut sample);
            if sample.valid_steps == 0 {
                let side = if test.dot(self.left.vector) >= test.dot(self.right.vector) {
                    WallSide::Left
                } else {
                    WallSide::Right
                };
                return Some((side, test));
            }
            angle += self.params.rotation_increment_deg;
        }
        None
    }

    /// Confirm phase: sweep behind on the wall side; the first free sample
    /// confirms the wall is present and adjacent.
    fn confirm_wall_behind(&self, map: &GameMap, origin: Vec2, side: WallSide) -> bool {
        let toward_side = match side {
            WallSide::Left => -1.0,
            WallSide::Right => 1.0,
        };
        let behind = -self.forward.vector;
        let mut angle = 0.0f32;
        while angle <= 360.0 {
            let test = behind.rotated_deg(toward_side * angle);
            let mut sample = Decision::with_vector(test);
            self.check_vector_path(map, origin, &mut sample);
            if sample.valid_steps > 0 {
                return true;
            }
            angle += self.params.rotation_increment_deg;
        }
        false
    }

    /// Sweep for the next open heading, starting just past the wall
    /// direction and rotating away from the followed side. While the wall
    /// direction tests blocked the hand stays on the wall; when it frees
    /// up the sweep turns straight into it, rounding the corner.
    fn next_heading_along_wall(
        &mut self,
        map: &GameMap,
        origin: Vec2,
        side: WallSide,
    ) -> Option<Decision> {
        let away_sign = match side {
            WallSide::Left => -1.0,
            WallSide::Right => 1.0,
        };

        let mut contact = Decision::with_vector(self.wall_dir);
        self.check_vector_path(map, origin, &mut contact);
        if contact.valid_steps == 0 {
            self.wall_sweep_deg = 0.0;
        } else {
            // the wall fell away: count the corner turn, give up after a
            // full rotation without regaining contact
            self.wall_sweep_deg += 90.0;
            if self.wall_sweep_deg >= 360.0 {
                return None;
            }
        }

        let mut angle = self.params.rotation_increment_deg;
        while angle <= 360.0 {
            let test = self.wall_dir.rotated_deg(away_sign * angle);
            let mut sample = Decision::with_vector(test);
            if self.check_vector_path(map, origin, &mut sample) || sample.valid_steps > 0 {
                // keep the hand on the wall: the contact direction sits
                // 90 degrees on the wall side of the adopted heading
                self.wall_dir = match side {
                    WallSide::Left => test.perpendicular_left(),
                    WallSide::Right => test.perpendicular_right(),
                };
                return Some(sample);
            }
            angle += self.params.rotation_increment_deg;
        }
        None
    }

    /// Response for directly-driven motion: clip against the first
    /// approaching mid-step contact, or slide along surfaces already
    /// touched at the start of the step.
    fn collision_response(&mut self, world: &mut CollisionWorld, id: usize) {
        let velocity = world.model(id).velocity;
        if velocity == Vec2::ZERO {
            self.moving = false;
            return;
        }

        let collisions = collision::forward_collision_test(world, id);
        for hit in &collisions {
            // already moving away from this surface
            if hit.normal.dot(velocity) >= 0.0 {
                continue;
            }
            if hit.fraction > 0.0 {
                world.model_mut(id).velocity = velocity * hit.fraction;
            } else {
                // pressed against the surface: slide along its tangent and
                // re-test once for secondary contacts
                let mut tangent = hit.normal.perpendicular_left();
                if tangent.dot(velocity) < 0.0 {
                    tangent = -tangent;
                }
                let slid = tangent * velocity.dot(tangent);
                world.model_mut(id).velocity = slid;

                let second_pass = collision::forward_collision_test(world, id);
                for second in &second_pass {
                    if second.normal.dot(slid) < 0.0 {
                        world.model_mut(id).velocity = slid * second.fraction;
                        break;
                    }
                }
            }
            break;
        }

        self.moving = world.model(id).velocity.length_squared() > 0.0;
    }

    /// Known-map and trail bookkeeping, run after motion commits
    fn update_known_map(&mut self, world: &CollisionWorld, id: usize) {
        let origin = world.model(id).origin;
        let tile = self.known_map.index_validated(origin);

        if Some(tile) != self.current_tile {
            if let Some(prev) = self.current_tile {
                *self.known_map.cell_mut(prev.0, prev.1) = VISITED_TILE;
                if self.move_state == MoveState::ToGoal
                    && self.moving
                    && self.last_trail_tile != Some(prev)
                {
                    let crumb = self.known_map.cell_center(prev.0, prev.1);
                    self.trail.push_front(crumb);
                    self.last_trail_tile = Some(prev);
                }
            }
            self.previous_tile = self.current_tile;
            self.current_tile = Some(tile);
        }

        // stale "visited" memory near the goal would block re-exploration;
        // interval 0 disables the periodic forgetting
        let interval = self.params.known_map_reset_interval;
        if interval > 0 && self.tick_count % interval == 0 {
            if self.skip_region_reset {
                self.skip_region_reset = false;
            } else if self.move_state == MoveState::ToGoal {
                if let Some(waypoint) = self.current_waypoint {
                    self.reset_known_map_region(origin, waypoint);
                }
            }
        }

        // prune breadcrumbs that no longer fall on a visited tile
        while let Some(crumb) = self.trail.back() {
            let (row, col) = self.known_map.index_validated(crumb);
            if *self.known_map.cell(row, col) != VISITED_TILE {
                self.trail.pop_back();
            } else {
                break;
            }
        }
    }

    /// Reset a square region of the known map around the goal, sized by the
    /// remaining distance, clamped to the grid
    fn reset_known_map_region(&mut self, origin: Vec2, waypoint: Vec2) {
        let distance = origin.distance(waypoint);
        let half_extent = (distance / self.known_map.cell_width()) as i32;
        let (goal_row, goal_col) = self.known_map.index_validated(waypoint);
        let (min_row, min_col) = self.known_map.validate(
            goal_row as i32 - half_extent,
            goal_col as i32 - half_extent,
        );
        let (max_row, max_col) = self.known_map.validate(
            goal_row as i32 + half_extent,
            goal_col as i32 + half_extent,
        );
        for row in min_row..=max_row {
            for col in min_col..=max_col {
                *self.known_map.cell_mut(row, col) = UNKNOWN_TILE;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::Bounds;
    use crate::config::SteeringConfig;

    fn setup(blocked: &[usize]) -> (CollisionWorld, Movement, usize) {
        let map = GameMap::with_blocked(10, 10, 20.0, 20.0, blocked);
        let params = SteeringConfig::default();
        let movement = Movement::new(&map, params, 1.0 / 60.0);
        let mut world = CollisionWorld::new(map);
        let id = world.insert_model(Bounds::centered(5.0), Vec2::new(30.0, 30.0));
        (world, movement, id)
    }

    #[test]
    fn test_waypoint_rejected_in_collision() {
        let (world, mut movement, _id) = setup(&[55]);
        // center of the solid cell (5, 5)
        assert!(!movement.add_user_waypoint(world.map(), Vec2::new(110.0, 110.0)));
        assert!(movement.goals().is_empty());
        // off the map
        assert!(!movement.add_user_waypoint(world.map(), Vec2::new(-5.0, 10.0)));
        // open point
        assert!(movement.add_user_waypoint(world.map(), Vec2::new(150.0, 30.0)));
        assert_eq!(movement.current_waypoint(), Some(Vec2::new(150.0, 30.0)));
    }

    #[test]
    fn test_goals_consumed_oldest_first() {
        let (world, mut movement, _id) = setup(&[]);
        movement.add_user_waypoint(world.map(), Vec2::new(50.0, 50.0));
        movement.add_user_waypoint(world.map(), Vec2::new(150.0, 150.0));
        assert_eq!(movement.current_waypoint(), Some(Vec2::new(50.0, 50.0)));
        movement.update_waypoint(true);
        assert_eq!(movement.current_waypoint(), Some(Vec2::new(150.0, 150.0)));
        movement.update_waypoint(true);
        assert_eq!(movement.current_waypoint(), None);
    }

    #[test]
    fn test_check_vector_path_open_direction() {
        let (world, mut movement, _id) = setup(&[]);
        movement.speed = 2.0;
        let mut decision = Decision::with_vector(Vec2::new(1.0, 0.0));
        movement.check_vector_path(world.map(), Vec2::new(30.0, 30.0), &mut decision);
        assert_eq!(decision.valid_steps, movement.params.max_steps);
        // nothing visited yet, every step is novel
        assert!((decision.step_ratio - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_check_vector_path_blocked_direction() {
        // wall along column 2: cells (r, 2) for all rows
        let blocked: Vec<usize> = (0..10).map(|r| 2 + r * 10).collect();
        let (world, mut movement, _id) = setup(&blocked);
        movement.speed = 20.0;
        // agent just left of the wall, +x candidate runs into it within one step
        let mut decision = Decision::with_vector(Vec2::new(1.0, 0.0));
        movement.check_vector_path(world.map(), Vec2::new(30.0, 30.0), &mut decision);
        assert_eq!(decision.valid_steps, 0);
        assert_eq!(decision.step_ratio, 0.0);
    }

    #[test]
    fn test_no_waypoint_means_idle() {
        let (mut world, mut movement, id) = setup(&[]);
        movement.update(&mut world, id);
        assert!(!movement.is_moving());
        assert_eq!(world.model(id).velocity, Vec2::ZERO);
        assert_eq!(world.model(id).origin, Vec2::new(30.0, 30.0));
    }

    #[test]
    fn test_steers_toward_open_waypoint() {
        let (mut world, mut movement, id) = setup(&[]);
        movement.add_user_waypoint(world.map(), Vec2::new(130.0, 30.0));
        movement.update(&mut world, id);

        assert!(movement.is_moving());
        let velocity = world.model(id).velocity;
        assert!(velocity.length() > 0.0);
        let max_step = movement.params.max_speed * movement.delta_time;
        assert!(velocity.length() <= max_step + 1e-3);
        // forward points toward +x
        assert!(movement.forward().vector.x > 0.9);
    }

    #[test]
    fn test_trail_empty_clears_known_map() {
        let (mut world, mut movement, id) = setup(&[]);
        movement.add_user_waypoint(world.map(), Vec2::new(170.0, 30.0));
        for _ in 0..200 {
            movement.update(&mut world, id);
            if movement.current_waypoint().is_none() {
                break;
            }
        }
        // goal consumed, trail cleared, known map forgotten
        assert!(movement.trail().is_empty());
        assert!(movement.known_map().iter().all(|&c| c == UNKNOWN_TILE));
    }

    #[test]
    fn test_breadcrumbs_dropped_while_moving_to_goal() {
        let (mut world, mut movement, id) = setup(&[]);
        movement.add_user_waypoint(world.map(), Vec2::new(170.0, 30.0));
        // run a while but stop before arrival clears the trail
        for _ in 0..40 {
            movement.update(&mut world, id);
        }
        let moved = world.model(id).origin.distance(Vec2::new(30.0, 30.0));
        if moved > 20.0 {
            assert!(!movement.trail().is_empty());
        }
    }

    #[test]
    fn test_zero_reset_interval_disables_forgetting() {
        let map = GameMap::new(10, 10, 20.0, 20.0);
        let params = SteeringConfig {
            known_map_reset_interval: 0,
            ..SteeringConfig::default()
        };
        let mut movement = Movement::new(&map, params, 1.0 / 60.0);
        let mut world = CollisionWorld::new(map);
        let id = world.insert_model(Bounds::centered(5.0), Vec2::new(30.0, 30.0));
        movement.add_user_waypoint(world.map(), Vec2::new(170.0, 30.0));
        // runs well past any would-be reset tick without dividing by zero
        for _ in 0..40 {
            movement.update(&mut world, id);
        }
        assert!(movement.is_moving());
        // visited marks persist behind the agent
        assert!(movement.known_map().iter().any(|&c| c == VISITED_TILE));
    }

    #[test]
    fn test_direct_drive_clips_at_wall() {
        let (mut world, mut movement, id) = setup(&[]);
        movement.set_pathing(Pathing::None);
        // static blocker directly ahead
        let _ = world.insert_model(Bounds::centered(10.0), Vec2::new(55.0, 30.0));
        world.model_mut(id).velocity = Vec2::new(20.0, 0.0);
        movement.update(&mut world, id);
        // contact at fraction 0.5: abs gap is 10, step is 20
        let origin = world.model(id).origin;
        assert!((origin.x - 40.0).abs() < 1e-3);
        assert_eq!(origin.y, 30.0);
    }

    #[test]
    fn test_direct_drive_slides_along_touched_wall() {
        let (mut world, mut movement, id) = setup(&[]);
        movement.set_pathing(Pathing::None);
        // wall touching the agent's right edge at x = 35
        let _ = world.insert_model(Bounds::centered(10.0), Vec2::new(45.0, 30.0));
        // diagonal push into the wall: the x component is absorbed
        world.model_mut(id).velocity = Vec2::new(20.0, 10.0);
        movement.update(&mut world, id);
        let origin = world.model(id).origin;
        assert!((origin.x - 30.0).abs() < 1e-3);
        assert!((origin.y - 40.0).abs() < 1e-3);
    }

    #[test]
    fn test_direct_drive_ignores_receding_contact() {
        let (mut world, mut movement, id) = setup(&[]);
        movement.set_pathing(Pathing::None);
        // blocker behind the agent, touching it
        let _ = world.insert_model(Bounds::centered(10.0), Vec2::new(15.0, 30.0));
        world.model_mut(id).velocity = Vec2::new(20.0, 0.0);
        movement.update(&mut world, id);
        assert!((world.model(id).origin.x - 50.0).abs() < 1e-3);
    }
}
