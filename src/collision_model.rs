use crate::bounds::Bounds;
use crate::map::GameMap;
use crate::vec2::Vec2;

/// Per-entity AABB plus velocity. Keeps itself registered in the grid
/// cells its absolute bounds overlap; registration is maintained by
/// CollisionWorld on every origin change.
#[derive(Debug, Clone)]
pub struct CollisionModel {
    /// Bounds centered on the local origin
    pub local_bounds: Bounds,
    /// local_bounds translated by origin, recomputed on every move
    pub abs_bounds: Bounds,
    pub origin: Vec2,
    /// Origin at the previous move, kept for collision response
    pub old_origin: Vec2,
    /// Displacement per tick; never normalized
    pub velocity: Vec2,
    /// Static models belong to the map and never move
    pub is_static: bool,
    /// (row, col) grid cells this model is currently registered in
    areas: Vec<(usize, usize)>,
}

impl CollisionModel {
    fn new(local_bounds: Bounds, origin: Vec2, is_static: bool) -> Self {
        CollisionModel {
            local_bounds,
            abs_bounds: local_bounds.translated(origin),
            origin,
            old_origin: origin,
            velocity: Vec2::ZERO,
            is_static,
            areas: Vec::new(),
        }
    }

    pub fn areas(&self) -> &[(usize, usize)] {
        &self.areas
    }
}

/// Arena of collision models layered on the map's grid. Handles are
/// stable usize ids; grid cells hold handles, never references.
pub struct CollisionWorld {
    map: GameMap,
    models: Vec<Option<CollisionModel>>,
    free_ids: Vec<usize>,
}

impl CollisionWorld {
    /// Wrap a map, materializing every solid cell as a static collider so
    /// the broad phase sees permanent geometry and dynamic bodies uniformly.
    pub fn new(map: GameMap) -> Self {
        let mut world = CollisionWorld {
            map,
            models: Vec::new(),
            free_ids: Vec::new(),
        };
        for row in 0..world.map.rows() {
            for col in 0..world.map.cols() {
                if world.map.is_solid(row, col) {
                    let bounds = world.map.grid().cell_bounds(row, col);
                    let origin = bounds.center();
                    let local = Bounds::new(bounds.mins - origin, bounds.maxs - origin);
                    world.insert_static_model(local, origin);
                }
            }
        }
        world
    }

    pub fn map(&self) -> &GameMap {
        &self.map
    }

    /// Insert a movable model; returns its stable handle
    pub fn insert_model(&mut self, local_bounds: Bounds, origin: Vec2) -> usize {
        self.insert(CollisionModel::new(local_bounds, origin, false))
    }

    fn insert_static_model(&mut self, local_bounds: Bounds, origin: Vec2) -> usize {
        self.insert(CollisionModel::new(local_bounds, origin, true))
    }

    fn insert(&mut self, model: CollisionModel) -> usize {
        let id = match self.free_ids.pop() {
            Some(id) => {
                self.models[id] = Some(model);
                id
            }
            None => {
                self.models.push(Some(model));
                self.models.len() - 1
            }
        };
        self.update_areas(id);
        id
    }

    /// Remove a model, deregistering it from every referenced cell
    pub fn remove_model(&mut self, id: usize) {
        if let Some(model) = self.models.get_mut(id).and_then(|m| m.take()) {
            for &(row, col) in &model.areas {
                self.map.grid_mut().cell_mut(row, col).remove_collider(id);
            }
            self.free_ids.push(id);
        }
    }

    pub fn model(&self, id: usize) -> &CollisionModel {
        self.models[id].as_ref().expect("stale collider handle")
    }

    pub fn model_mut(&mut self, id: usize) -> &mut CollisionModel {
        self.models[id].as_mut().expect("stale collider handle")
    }

    pub fn contains(&self, id: usize) -> bool {
        self.models.get(id).map_or(false, |m| m.is_some())
    }

    /// Absolute repositioning: recompute abs bounds and re-register cells
    pub fn set_origin(&mut self, id: usize, point: Vec2) {
        {
            let model = self.model_mut(id);
            model.old_origin = model.origin;
            model.origin = point;
            model.abs_bounds = model.local_bounds.translated(point);
        }
        self.update_areas(id);
    }

    /// Advance origin by velocity; the normal per-tick motion path
    pub fn update_origin(&mut self, id: usize) {
        let target = {
            let model = self.model(id);
            model.origin + model.velocity
        };
        self.set_origin(id, target);
    }

    /// Re-derive the set of cells overlapping the model's absolute bounds.
    /// Deregister from the old cells first, then register into the new set.
    fn update_areas(&mut self, id: usize) {
        let old_areas = std::mem::take(&mut self.model_mut(id).areas);
        for (row, col) in old_areas {
            self.map.grid_mut().cell_mut(row, col).remove_collider(id);
        }

        let abs_bounds = self.model(id).abs_bounds;
        let ((min_row, max_row), (min_col, max_col)) =
            self.map.grid().range_for_bounds(&abs_bounds);

        let mut areas = Vec::new();
        for row in min_row..=max_row {
            for col in min_col..=max_col {
                let cell_bounds = self.map.grid().cell(row, col).bounds;
                if cell_bounds.overlaps(&abs_bounds) {
                    self.map.grid_mut().cell_mut(row, col).add_collider(id);
                    areas.push((row, col));
                }
            }
        }
        self.model_mut(id).areas = areas;
    }
}
