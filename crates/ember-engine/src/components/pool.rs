//! Fixed-capacity particle pool.
//!
//! Every particle is either in the free list or in the active list, never
//! both. Removal swap-removes from the active list, so active order is
//! unspecified — rendering does not depend on it.

use super::particle::Particle;

pub struct ParticlePool {
    free: Vec<Particle>,
    active: Vec<Particle>,
    capacity: usize,
}

impl ParticlePool {
    /// Pre-size to the maximum quality tier's cap so a tier downgrade
    /// never requires resizing.
    pub fn new(capacity: usize) -> Self {
        let mut free = Vec::with_capacity(capacity);
        for _ in 0..capacity {
            free.push(Particle::idle());
        }
        Self {
            free,
            active: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Pull a free record into the active list. Returns `None` when the
    /// active list has reached `max_active` or the pool is exhausted;
    /// spawn requests beyond capacity are silently dropped.
    pub fn acquire(&mut self, max_active: usize) -> Option<&mut Particle> {
        if self.active.len() >= max_active {
            return None;
        }
        let mut p = self.free.pop()?;
        p.active = true;
        p.reset_transient();
        self.active.push(p);
        self.active.last_mut()
    }

    /// Return the active particle at `index` to the free list.
    /// The last active particle is swapped into its slot.
    pub fn release(&mut self, index: usize) {
        let mut p = self.active.swap_remove(index);
        p.active = false;
        p.reset_transient();
        self.free.push(p);
    }

    pub fn active(&self) -> &[Particle] {
        &self.active
    }

    pub fn active_mut(&mut self) -> &mut [Particle] {
        &mut self.active
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop all live particles back into the pool.
    pub fn clear(&mut self) {
        while !self.active.is_empty() {
            self.release(self.active.len() - 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::particle::ParticleKind;

    #[test]
    fn acquire_release_round_trip() {
        let mut pool = ParticlePool::new(8);
        assert_eq!(pool.free_len(), 8);
        assert!(pool.acquire(8).is_some());
        assert_eq!(pool.active_len(), 1);
        assert_eq!(pool.free_len(), 7);
        pool.release(0);
        assert_eq!(pool.active_len(), 0);
        assert_eq!(pool.free_len(), 8);
    }

    #[test]
    fn conservation_across_cycles() {
        let mut pool = ParticlePool::new(16);
        for round in 0..5 {
            for _ in 0..(4 + round) {
                pool.acquire(16);
            }
            while pool.active_len() > 0 {
                pool.release(pool.active_len() - 1);
            }
            assert_eq!(pool.free_len() + pool.active_len(), pool.capacity());
        }
    }

    #[test]
    fn acquire_respects_active_cap() {
        let mut pool = ParticlePool::new(10);
        for _ in 0..15 {
            pool.acquire(10);
        }
        assert_eq!(pool.active_len(), 10);
        assert_eq!(pool.free_len(), 0);
        assert!(pool.acquire(10).is_none());
    }

    #[test]
    fn cap_below_capacity_limits_acquire() {
        let mut pool = ParticlePool::new(100);
        for _ in 0..100 {
            pool.acquire(20);
        }
        assert_eq!(pool.active_len(), 20);
    }

    #[test]
    fn release_swaps_last_into_slot() {
        let mut pool = ParticlePool::new(4);
        for i in 0..3 {
            let p = pool.acquire(4).unwrap();
            p.size = i as f32;
        }
        pool.release(0);
        // The particle that was last (size 2) now occupies index 0.
        assert_eq!(pool.active()[0].size, 2.0);
        assert_eq!(pool.active_len(), 2);
    }

    #[test]
    fn released_particle_is_cleared() {
        let mut pool = ParticlePool::new(2);
        {
            let p = pool.acquire(2).unwrap();
            p.kind = ParticleKind::Rocket;
            p.target_y = Some(50.0);
        }
        pool.release(0);
        // Re-acquire and check the transient fields came back clean.
        let p = pool.acquire(2).unwrap();
        assert!(p.active);
        assert!(p.target_y.is_none());
    }

    #[test]
    fn clear_returns_everything() {
        let mut pool = ParticlePool::new(12);
        for _ in 0..9 {
            pool.acquire(12);
        }
        pool.clear();
        assert_eq!(pool.active_len(), 0);
        assert_eq!(pool.free_len(), 12);
    }
}
