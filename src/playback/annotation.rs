//! Bounded pool of reusable debug-vector annotation slots.

use glam::Mat4;
use log::warn;

use crate::schema::{Command, CommandKind};
use crate::transform;

/// Pool capacity of the reference visualizer.
pub const DEFAULT_CAPACITY: usize = 50;

/// One reusable annotation slot: arrow transform plus visibility.
#[derive(Debug, Clone)]
pub struct VectorSlot {
    pub transform: Mat4,
    pub visible: bool,
}

impl VectorSlot {
    fn hidden() -> Self {
        Self {
            transform: Mat4::IDENTITY,
            visible: false,
        }
    }
}

/// Fixed-capacity pool multiplexing transient debug vectors across frames.
///
/// The pool is created once and reused for every frame of every document;
/// slots are never allocated per-frame. Each frame starts by hiding every
/// slot, then claims slots in command order. Commands beyond capacity are
/// dropped and logged rather than growing the pool or overwriting earlier
/// slots, so a slot left untouched during a frame is guaranteed invisible
/// for that frame.
#[derive(Debug)]
pub struct VectorAnnotationPool {
    slots: Vec<VectorSlot>,
    cursor: usize,
    dropped_last_frame: usize,
}

impl Default for VectorAnnotationPool {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl VectorAnnotationPool {
    /// Create a pool with a fixed number of slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![VectorSlot::hidden(); capacity],
            cursor: 0,
            dropped_last_frame: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// All slots, visible or not, for the renderer to mirror.
    #[inline]
    pub fn slots(&self) -> &[VectorSlot] {
        &self.slots
    }

    /// Number of slots claimed during the last processed frame.
    pub fn visible_count(&self) -> usize {
        self.cursor
    }

    /// Commands dropped during the last processed frame.
    pub fn dropped_last_frame(&self) -> usize {
        self.dropped_last_frame
    }

    /// Hide every slot and rewind the allocation cursor.
    pub fn begin_frame(&mut self) {
        for slot in &mut self.slots {
            slot.visible = false;
        }
        self.cursor = 0;
        self.dropped_last_frame = 0;
    }

    /// Process one frame's commands, claiming slots in order.
    ///
    /// Non-vector commands are skipped. Vector commands beyond capacity are
    /// counted and reported with a single warning per frame.
    pub fn process_frame(&mut self, commands: &[Command]) {
        self.begin_frame();

        for command in commands {
            if command.kind != CommandKind::Vector {
                continue;
            }
            if self.cursor >= self.slots.len() {
                self.dropped_last_frame += 1;
                continue;
            }
            let slot = &mut self.slots[self.cursor];
            slot.transform = transform::from_direction(command.origin, command.direction);
            slot.visible = true;
            self.cursor += 1;
        }

        if self.dropped_last_frame > 0 {
            warn!(
                "Dropped {} vector annotations beyond pool capacity {}",
                self.dropped_last_frame,
                self.slots.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn vector_command(direction: Vec3, origin: Vec3) -> Command {
        Command {
            kind: CommandKind::Vector,
            direction,
            origin,
        }
    }

    #[test]
    fn test_commands_claim_slots_in_order() {
        let mut pool = VectorAnnotationPool::new(8);
        let commands: Vec<_> = (0..3)
            .map(|i| vector_command(Vec3::Y, Vec3::new(i as f32, 0.0, 0.0)))
            .collect();

        pool.process_frame(&commands);

        assert_eq!(pool.visible_count(), 3);
        let slots = pool.slots();
        for (i, slot) in slots.iter().take(3).enumerate() {
            assert!(slot.visible);
            // Each slot carries the transform of its own command.
            let base = slot.transform.transform_point3(Vec3::ZERO);
            assert!((base.x - i as f32).abs() < 1e-6);
        }
        assert!(slots[3..].iter().all(|slot| !slot.visible));
    }

    #[test]
    fn test_next_frame_hides_stale_slots() {
        let mut pool = VectorAnnotationPool::new(4);
        let commands = vec![vector_command(Vec3::Y, Vec3::ZERO); 4];
        pool.process_frame(&commands);
        assert_eq!(pool.visible_count(), 4);

        pool.process_frame(&[]);
        assert_eq!(pool.visible_count(), 0);
        assert!(pool.slots().iter().all(|slot| !slot.visible));
    }

    #[test]
    fn test_overflow_drops_without_corrupting_slots() {
        let mut pool = VectorAnnotationPool::new(2);
        let commands = vec![
            vector_command(Vec3::X, Vec3::new(1.0, 0.0, 0.0)),
            vector_command(Vec3::X, Vec3::new(2.0, 0.0, 0.0)),
            vector_command(Vec3::X, Vec3::new(99.0, 0.0, 0.0)),
            vector_command(Vec3::X, Vec3::new(99.0, 0.0, 0.0)),
        ];

        pool.process_frame(&commands);

        assert_eq!(pool.visible_count(), 2);
        assert_eq!(pool.dropped_last_frame(), 2);

        // Earlier slots keep their own transforms.
        for (i, slot) in pool.slots().iter().enumerate() {
            let base = slot.transform.transform_point3(Vec3::ZERO);
            assert!((base.x - (i + 1) as f32).abs() < 1e-6);
        }
    }

    #[test]
    fn test_non_vector_commands_skipped() {
        let mut pool = VectorAnnotationPool::new(4);
        let commands = vec![
            Command {
                kind: CommandKind::Other("text".to_string()),
                direction: Vec3::Y,
                origin: Vec3::ZERO,
            },
            vector_command(Vec3::Y, Vec3::ZERO),
        ];

        pool.process_frame(&commands);

        assert_eq!(pool.visible_count(), 1);
        assert_eq!(pool.dropped_last_frame(), 0);
    }

    #[test]
    fn test_zero_capacity_pool() {
        let mut pool = VectorAnnotationPool::new(0);
        pool.process_frame(&[vector_command(Vec3::Y, Vec3::ZERO)]);

        assert_eq!(pool.visible_count(), 0);
        assert_eq!(pool.dropped_last_frame(), 1);
    }
}
