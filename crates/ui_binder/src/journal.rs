use bevy::prelude::*;
use std::collections::VecDeque;

use crate::{ApplyResult, ControlEvent};

#[derive(Debug, Clone)]
pub struct JournalEntry {
    pub event: ControlEvent,
    pub result: ApplyResult,
    pub elapsed_ms: f32,
}

/// Bounded history of processed control events, newest last.
#[derive(Resource, Debug)]
pub struct ControlJournal {
    entries: VecDeque<JournalEntry>,
    capacity: usize,
}

impl ControlJournal {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: VecDeque::with_capacity(capacity), capacity }
    }

    pub fn push(&mut self, entry: JournalEntry) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &JournalEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ControlJournal {
    fn default() -> Self {
        Self::with_capacity(64)
    }
}
