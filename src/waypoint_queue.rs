use crate::vec2::Vec2;

/// Fixed-capacity deque over pre-allocated storage. Pushing past capacity
/// silently overwrites the oldest (back) entry; nothing ever grows.
#[derive(Clone)]
pub struct WaypointQueue {
    storage: Vec<Vec2>,
    head: usize,
    len: usize,
}

impl WaypointQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "waypoint queue capacity must be positive");
        WaypointQueue {
            storage: vec![Vec2::ZERO; capacity],
            head: 0,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Push a new front entry; when full, the back entry is overwritten
    pub fn push_front(&mut self, point: Vec2) {
        let capacity = self.capacity();
        self.head = (self.head + capacity - 1) % capacity;
        self.storage[self.head] = point;
        if self.len < capacity {
            self.len += 1;
        }
    }

    pub fn front(&self) -> Option<Vec2> {
        if self.is_empty() {
            None
        } else {
            Some(self.storage[self.head])
        }
    }

    pub fn back(&self) -> Option<Vec2> {
        if self.is_empty() {
            None
        } else {
            Some(self.storage[(self.head + self.len - 1) % self.capacity()])
        }
    }

    pub fn pop_front(&mut self) -> Option<Vec2> {
        let front = self.front()?;
        self.head = (self.head + 1) % self.capacity();
        self.len -= 1;
        Some(front)
    }

    pub fn pop_back(&mut self) -> Option<Vec2> {
        let back = self.back()?;
        self.len -= 1;
        Some(back)
    }

    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    /// Front-to-back iteration (newest first)
    pub fn iter(&self) -> impl Iterator<Item = Vec2> + '_ {
        (0..self.len).map(move |i| self.storage[(self.head + i) % self.capacity()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32) -> Vec2 {
        Vec2::new(x, 0.0)
    }

    #[test]
    fn test_front_back_order() {
        let mut q = WaypointQueue::with_capacity(4);
        q.push_front(p(1.0));
        q.push_front(p(2.0));
        q.push_front(p(3.0));
        assert_eq!(q.front(), Some(p(3.0)));
        assert_eq!(q.back(), Some(p(1.0)));
        assert_eq!(q.len(), 3);
    }

    #[test]
    fn test_overflow_overwrites_oldest() {
        let mut q = WaypointQueue::with_capacity(3);
        for i in 1..=5 {
            q.push_front(p(i as f32));
        }
        assert_eq!(q.len(), 3);
        assert_eq!(q.front(), Some(p(5.0)));
        // oldest entries 1 and 2 were silently dropped
        assert_eq!(q.back(), Some(p(3.0)));
        let items: Vec<Vec2> = q.iter().collect();
        assert_eq!(items, vec![p(5.0), p(4.0), p(3.0)]);
    }

    #[test]
    fn test_pop_both_ends() {
        let mut q = WaypointQueue::with_capacity(4);
        q.push_front(p(1.0));
        q.push_front(p(2.0));
        q.push_front(p(3.0));
        assert_eq!(q.pop_back(), Some(p(1.0)));
        assert_eq!(q.pop_front(), Some(p(3.0)));
        assert_eq!(q.pop_front(), Some(p(2.0)));
        assert_eq!(q.pop_front(), None);
        assert_eq!(q.pop_back(), None);
        assert!(q.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut q = WaypointQueue::with_capacity(2);
        q.push_front(p(1.0));
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.front(), None);
    }

    #[test]
    fn test_wraparound_after_pops() {
        let mut q = WaypointQueue::with_capacity(3);
        q.push_front(p(1.0));
        q.push_front(p(2.0));
        q.pop_back();
        q.push_front(p(3.0));
        q.push_front(p(4.0));
        let items: Vec<Vec2> = q.iter().collect();
        assert_eq!(items, vec![p(4.0), p(3.0), p(2.0)]);
    }
}
