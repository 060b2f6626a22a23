//! Fixed-capacity object pools for particles and ripples.
//!
//! Slots are allocated by scanning for a dead entry and freed implicitly when
//! an entry reports that it is no longer alive, so nothing allocates while a
//! frame is being rendered.

/// Something that lives in a [`Pool`] slot.
pub trait Lifetime: Copy + Default {
    /// Dead entries are free slots. `Default` must produce a dead entry.
    fn is_alive(&self) -> bool;
}

/// `N` slots of `T`.
pub struct Pool<T, const N: usize> {
    slots: [T; N],
    born: [u32; N],
    spawned: u32,
}

impl<T: Lifetime, const N: usize> Pool<T, N> {
    pub fn new() -> Self {
        Self {
            slots: [T::default(); N],
            born: [0; N],
            spawned: 0,
        }
    }

    /// Place `item` in the first free slot. `None` when every slot is alive.
    pub fn spawn(&mut self, item: T) -> Option<&mut T> {
        let i = self.slots.iter().position(|s| !s.is_alive())?;
        Some(self.occupy(i, item))
    }

    /// Like [`spawn`](Self::spawn), but a full pool drops its oldest entry.
    pub fn spawn_evicting(&mut self, item: T) -> Option<&mut T> {
        let i = match self.slots.iter().position(|s| !s.is_alive()) {
            Some(i) => i,
            None => {
                let (oldest, _) = self.born.iter().enumerate().min_by_key(|&(_, b)| *b)?;
                oldest
            }
        };
        Some(self.occupy(i, item))
    }

    fn occupy(&mut self, i: usize, item: T) -> &mut T {
        self.born[i] = self.spawned;
        self.spawned = self.spawned.wrapping_add(1);
        self.slots[i] = item;
        &mut self.slots[i]
    }

    /// Live entries.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter(|s| s.is_alive())
    }

    /// Live entries, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots.iter_mut().filter(|s| s.is_alive())
    }

    pub fn live_count(&self) -> usize {
        self.iter().count()
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Lifetime::is_alive)
    }

    /// Kill every entry.
    pub fn clear(&mut self) {
        self.slots = [T::default(); N];
        self.born = [0; N];
        self.spawned = 0;
    }
}

impl<T: Lifetime, const N: usize> Default for Pool<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, Default, PartialEq)]
    struct Spark {
        id: u8,
        life: u8,
    }

    impl Lifetime for Spark {
        fn is_alive(&self) -> bool {
            self.life > 0
        }
    }

    const fn spark(id: u8) -> Spark {
        Spark { id, life: 10 }
    }

    #[test]
    fn spawn_fills_then_refuses() {
        let mut pool: Pool<Spark, 2> = Pool::new();
        assert!(pool.spawn(spark(1)).is_some());
        assert!(pool.spawn(spark(2)).is_some());
        assert!(pool.is_full());
        assert!(pool.spawn(spark(3)).is_none());
        assert_eq!(pool.live_count(), 2);
    }

    #[test]
    fn dead_entries_free_their_slot() {
        let mut pool: Pool<Spark, 2> = Pool::new();
        pool.spawn(spark(1));
        pool.spawn(spark(2));
        for s in pool.iter_mut().filter(|s| s.id == 1) {
            s.life = 0;
        }
        assert_eq!(pool.live_count(), 1);
        assert!(pool.spawn(spark(3)).is_some());
        assert!(pool.iter().any(|s| s.id == 3));
    }

    #[test]
    fn evicting_spawn_drops_oldest() {
        let mut pool: Pool<Spark, 3> = Pool::new();
        for id in 1..=3 {
            pool.spawn_evicting(spark(id));
        }
        pool.spawn_evicting(spark(4));
        pool.spawn_evicting(spark(5));
        let mut ids: alloc::vec::Vec<u8> = pool.iter().map(|s| s.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, [3, 4, 5]);
    }

    #[test]
    fn clear_kills_everything() {
        let mut pool: Pool<Spark, 4> = Pool::new();
        pool.spawn(spark(1));
        pool.clear();
        assert_eq!(pool.live_count(), 0);
    }
}
