use bevy::prelude::*;
use std::collections::VecDeque;

/// Emitted once per accepted placement.
#[derive(Event, Debug, Clone, Copy)]
pub struct ObjectPlaced {
    pub entity: Entity,
    pub sequence: u64,
}

/// Ordered list of placed objects, oldest first.
///
/// Unbounded by default. With a cap, pushing past it hands back the oldest entity so the
/// caller can despawn it.
#[derive(Resource, Debug, Default)]
pub struct PlacedObjects {
    entries: VecDeque<Entity>,
    cap: Option<usize>,
    placed_total: u64,
}

impl PlacedObjects {
    pub fn with_cap(cap: Option<usize>) -> Self {
        Self { cap: cap.filter(|c| *c > 0), ..Default::default() }
    }

    pub fn cap(&self) -> Option<usize> {
        self.cap
    }

    /// Next sequence number that `push` will assign.
    pub fn next_sequence(&self) -> u64 {
        self.placed_total
    }

    /// Appends `entity`; returns the evicted oldest entry when over capacity.
    pub fn push(&mut self, entity: Entity) -> Option<Entity> {
        self.entries.push_back(entity);
        self.placed_total += 1;
        match self.cap {
            Some(cap) if self.entries.len() > cap => self.entries.pop_front(),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total accepted placements, including evicted ones.
    pub fn placed_total(&self) -> u64 {
        self.placed_total
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Entity> {
        self.entries.iter()
    }
}

/// Appends a freshly spawned object, despawns whatever the cap pushed out, and announces it.
/// Returns the sequence number the object was given.
pub fn record_placement(
    commands: &mut Commands,
    placed: &mut PlacedObjects,
    events: &mut EventWriter<ObjectPlaced>,
    entity: Entity,
) -> u64 {
    let sequence = placed.next_sequence();
    if let Some(evicted) = placed.push(entity) {
        commands.entity(evicted).despawn();
    }
    events.write(ObjectPlaced { entity, sequence });
    sequence
}
