use crate::bounds::Bounds;
use crate::collision_model::CollisionWorld;
use crate::map::GameMap;
use crate::vec2::Vec2;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Result of a swept or ray test against one collider.
/// `normal` is axis-aligned and faces back at the mover.
#[derive(Debug, Clone, Copy)]
pub struct Collision {
    pub normal: Vec2,
    /// Fraction of the sweep at which contact begins, in [0, 1]
    pub fraction: f32,
    /// Handle of the struck collider
    pub collider: usize,
}

/// Broad phase: every grid cell whose stored AABB overlaps the area
pub fn area_cells(map: &GameMap, bounds: &Bounds) -> Vec<(usize, usize)> {
    let ((min_row, max_row), (min_col, max_col)) = map.grid().range_for_bounds(bounds);
    let mut cells = Vec::new();
    for row in min_row..=max_row {
        for col in min_col..=max_col {
            if map.grid().cell(row, col).bounds.overlaps(bounds) {
                cells.push((row, col));
            }
        }
    }
    cells
}

/// Touching-inclusive static overlap test
pub fn aabb_aabb_test(a: &Bounds, b: &Bounds) -> bool {
    a.overlaps(b)
}

/// Swept test of a moving AABB against a static one.
/// Already-overlapping pairs report fraction 0; contact at or beyond the
/// end of the step counts as a miss (it shows up as a touch next tick).
pub fn moving_aabb_aabb_test(
    self_bounds: &Bounds,
    velocity: Vec2,
    other: &Bounds,
    collider: usize,
) -> Option<Collision> {
    if aabb_aabb_test(self_bounds, other) {
        let normal = collision_normal(self_bounds, velocity, other, 0.0);
        return Some(Collision {
            normal,
            fraction: 0.0,
            collider,
        });
    }

    let (t_entry_x, t_exit_x) = axis_entry_exit(
        velocity.x,
        self_bounds.mins.x,
        self_bounds.maxs.x,
        other.mins.x,
        other.maxs.x,
    )?;
    let (t_entry_y, t_exit_y) = axis_entry_exit(
        velocity.y,
        self_bounds.mins.y,
        self_bounds.maxs.y,
        other.mins.y,
        other.maxs.y,
    )?;

    let t_first = t_entry_x.max(t_entry_y);
    let t_last = t_exit_x.min(t_exit_y);
    if t_first > t_last || t_first < 0.0 || t_first >= 1.0 {
        return None;
    }

    let normal = collision_normal(self_bounds, velocity, other, t_first);
    Some(Collision {
        normal,
        fraction: t_first,
        collider,
    })
}

/// Per-axis slab entry/exit times. None when the axis is disjoint with no
/// closing velocity (separating or static on this axis).
fn axis_entry_exit(
    v: f32,
    self_min: f32,
    self_max: f32,
    other_min: f32,
    other_max: f32,
) -> Option<(f32, f32)> {
    if v == 0.0 {
        if self_max < other_min || self_min > other_max {
            return None;
        }
        return Some((f32::NEG_INFINITY, f32::INFINITY));
    }
    let (entry, exit) = if v > 0.0 {
        ((other_min - self_max) / v, (other_max - self_min) / v)
    } else {
        ((other_max - self_min) / v, (other_min - self_max) / v)
    };
    Some((entry, exit))
}

/// Resolve the axis-aligned collision normal. At fraction 0 the touching
/// side wins; at fraction > 0 the axis that times the contact wins.
/// Ties break x-axis before y-axis, within an axis by the nearer side.
pub fn collision_normal(
    self_bounds: &Bounds,
    velocity: Vec2,
    other: &Bounds,
    fraction: f32,
) -> Vec2 {
    if fraction == 0.0 {
        // side distances: zero on a touching side, negative when penetrating
        let from_left = (other.mins.x - self_bounds.maxs.x).abs();
        let from_right = (self_bounds.mins.x - other.maxs.x).abs();
        let from_above = (other.mins.y - self_bounds.maxs.y).abs();
        let from_below = (self_bounds.mins.y - other.maxs.y).abs();

        let (x_gap, x_normal) = if from_left <= from_right {
            (from_left, Vec2::new(-1.0, 0.0))
        } else {
            (from_right, Vec2::new(1.0, 0.0))
        };
        let (y_gap, y_normal) = if from_above <= from_below {
            (from_above, Vec2::new(0.0, -1.0))
        } else {
            (from_below, Vec2::new(0.0, 1.0))
        };
        return if x_gap <= y_gap { x_normal } else { y_normal };
    }

    let t_entry_x = axis_entry_exit(
        velocity.x,
        self_bounds.mins.x,
        self_bounds.maxs.x,
        other.mins.x,
        other.maxs.x,
    )
    .map(|(entry, _)| entry)
    .unwrap_or(f32::NEG_INFINITY);
    let t_entry_y = axis_entry_exit(
        velocity.y,
        self_bounds.mins.y,
        self_bounds.maxs.y,
        other.mins.y,
        other.maxs.y,
    )
    .map(|(entry, _)| entry)
    .unwrap_or(f32::NEG_INFINITY);

    if t_entry_x >= t_entry_y {
        Vec2::new(-velocity.x.signum(), 0.0)
    } else {
        Vec2::new(0.0, -velocity.y.signum())
    }
}

/// Parametric ray versus AABB. `dir` must be unit length; returns the
/// nearest entry distance within [0, length] and its surface normal.
pub fn ray_aabb_test(begin: Vec2, dir: Vec2, length: f32, bounds: &Bounds) -> Option<(f32, Vec2)> {
    if bounds.contains_point(begin) {
        return Some((0.0, Vec2::ZERO));
    }

    let (t_entry_x, t_exit_x) =
        axis_entry_exit(dir.x, begin.x, begin.x, bounds.mins.x, bounds.maxs.x)?;
    let (t_entry_y, t_exit_y) =
        axis_entry_exit(dir.y, begin.y, begin.y, bounds.mins.y, bounds.maxs.y)?;

    let t_first = t_entry_x.max(t_entry_y);
    let t_last = t_exit_x.min(t_exit_y);
    if t_first > t_last || t_first < 0.0 || t_first > length {
        return None;
    }

    let normal = if t_entry_x >= t_entry_y {
        Vec2::new(-dir.x.signum(), 0.0)
    } else {
        Vec2::new(0.0, -dir.y.signum())
    };
    Some((t_first, normal))
}

/// Sweep a model's bounds along its velocity, test every distinct collider
/// found in the overlapped cells, and return all hits nearest-first.
pub fn forward_collision_test(world: &CollisionWorld, id: usize) -> Vec<Collision> {
    let model = world.model(id);
    let broad_bounds = model
        .abs_bounds
        .union(model.abs_bounds.translated(model.velocity));

    let mut tested: HashSet<usize> = HashSet::new();
    tested.insert(id);

    let mut collisions = Vec::new();
    for (row, col) in area_cells(world.map(), &broad_bounds) {
        for &other_id in world.map().grid().cell(row, col).contents() {
            if !tested.insert(other_id) {
                continue;
            }
            let other = world.model(other_id);
            if let Some(collision) = moving_aabb_aabb_test(
                &model.abs_bounds,
                model.velocity,
                &other.abs_bounds,
                other_id,
            ) {
                collisions.push(collision);
            }
        }
    }

    collisions.sort_by(|a, b| {
        a.fraction
            .partial_cmp(&b.fraction)
            .unwrap_or(Ordering::Equal)
    });
    collisions
}
