use crate::bounds::Bounds;

/// One cell of the world collision grid.
/// Bounds are fixed at map load; contents mutate only through
/// CollisionWorld (de)registration.
#[derive(Clone, Default)]
pub struct GridCell {
    /// World-space area of this cell, set once at map load
    pub bounds: Bounds,
    /// Permanent collision: part of the static map geometry
    pub solid: bool,
    /// Handles of colliders currently overlapping this cell
    contents: Vec<usize>,
}

impl GridCell {
    pub fn contents(&self) -> &[usize] {
        &self.contents
    }

    pub fn add_collider(&mut self, id: usize) {
        if !self.contents.contains(&id) {
            self.contents.push(id);
        }
    }

    pub fn remove_collider(&mut self, id: usize) {
        self.contents.retain(|&c| c != id);
    }
}
