//! Deterministic event source for tests, benches and replays.
//!
//! Each call to [`EventSource::pump`] delivers one queued batch, so a batch is
//! "everything that happened between two polls".

use std::collections::VecDeque;

use anyhow::{bail, Result};
use arrayvec::ArrayVec;

use crate::source::{EventSource, InputSink, RawEvent};
use crate::types::{Scancode, GRID_HEIGHT, GRID_WIDTH, SCANCODE_COUNT};

/// Maximum number of events in one batch.
pub const BATCH_CAPACITY: usize = 32;

pub type EventBatch = ArrayVec<RawEvent, BATCH_CAPACITY>;

#[derive(Debug, Clone)]
pub struct ScriptedSource {
    batches: VecDeque<EventBatch>,
    held: [bool; SCANCODE_COUNT],
    cell_size: i32,
    pumps: usize,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self {
            batches: VecDeque::new(),
            held: [false; SCANCODE_COUNT],
            cell_size: 1,
            pumps: 0,
        }
    }

    /// Pixel size of one grid cell used by [`EventSource::map_position`].
    pub fn with_cell_size(mut self, cell_size: i32) -> Self {
        self.cell_size = cell_size.max(1);
        self
    }

    /// Queue the events delivered by one pump. An empty batch is a quiet tick.
    pub fn tick(&mut self, events: impl IntoIterator<Item = RawEvent>) -> &mut Self {
        let mut batch = EventBatch::new();
        for event in events {
            if batch.try_push(event).is_err() {
                tracing::warn!(capacity = BATCH_CAPACITY, "scripted batch full, dropping event");
                break;
            }
        }
        self.batches.push_back(batch);
        self
    }

    /// Queue `n` quiet ticks.
    pub fn idle(&mut self, n: usize) -> &mut Self {
        for _ in 0..n {
            self.batches.push_back(EventBatch::new());
        }
        self
    }

    /// Mark a key as physically held without delivering an event.
    pub fn hold(&mut self, code: Scancode) -> &mut Self {
        if let Some(n) = code.index() {
            self.held[n] = true;
        }
        self
    }

    pub fn remaining(&self) -> usize {
        self.batches.len()
    }

    /// Number of pumps performed so far.
    pub fn pumps(&self) -> usize {
        self.pumps
    }

    fn deliver(&mut self, batch: &EventBatch, sink: &mut dyn InputSink) {
        for &event in batch {
            if let RawEvent::Key { code, pressed } = event {
                if let Some(n) = code.index() {
                    self.held[n] = pressed;
                }
            }
            event.dispatch(sink);
        }
    }
}

impl Default for ScriptedSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for ScriptedSource {
    fn pump(&mut self, blocking: bool, sink: &mut dyn InputSink) -> Result<()> {
        self.pumps += 1;
        loop {
            let Some(batch) = self.batches.pop_front() else {
                if blocking {
                    bail!("scripted source exhausted while blocking for input");
                }
                return Ok(());
            };
            if blocking && batch.is_empty() {
                continue;
            }
            self.deliver(&batch, sink);
            return Ok(());
        }
    }

    fn is_key_down(&self, code: Scancode) -> bool {
        code.index().is_some_and(|n| self.held[n])
    }

    fn map_position(&self, x: i32, y: i32) -> Option<u32> {
        if x < 0 || y < 0 {
            return None;
        }
        let (col, row) = ((x / self.cell_size) as u32, (y / self.cell_size) as u32);
        (col < GRID_WIDTH && row < GRID_HEIGHT).then_some(row * GRID_WIDTH + col)
    }
}
