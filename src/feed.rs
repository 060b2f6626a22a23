//! Latest-value mailboxes between producer tasks and the render loop.
//!
//! The IMU poller and the audio task run on their own schedule and publish
//! whenever they have something new; the render loop reads whatever was
//! published last. Readers never wait for a fresh value and writers simply
//! overwrite, so a slow reader just skips snapshots.

use core::cell::Cell;

use embassy_sync::blocking_mutex::{
    Mutex,
    raw::CriticalSectionRawMutex,
};

use crate::{
    audio::AudioFeatures,
    gravity::Tilt,
};

/// Orientation published by the IMU task.
pub type TiltFeed = Latest<Tilt>;

/// Spectral features published by the audio task.
pub type AudioFeed = Latest<AudioFeatures>;

/// A snapshot cell with last-write-wins semantics, usable from a `static`.
pub struct Latest<T: Copy> {
    inner: Mutex<CriticalSectionRawMutex, Cell<(u32, T)>>,
}

impl<T: Copy> Latest<T> {
    pub const fn new(initial: T) -> Self {
        Self {
            inner: Mutex::new(Cell::new((0, initial))),
        }
    }

    /// Replace the snapshot.
    pub fn publish(&self, value: T) {
        self.inner.lock(|cell| {
            let (version, _) = cell.get();
            cell.set((version.wrapping_add(1), value));
        });
    }

    /// Most recently published value.
    pub fn get(&self) -> T {
        self.inner.lock(|cell| cell.get().1)
    }

    /// Number of publishes so far (wrapping). Lets a reader tell whether
    /// anything arrived since it last looked.
    pub fn version(&self) -> u32 {
        self.inner.lock(|cell| cell.get().0)
    }
}
