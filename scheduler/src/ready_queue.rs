use std::collections::VecDeque;

use crate::{AgingFactor, ProcessInfo};

/// Processes waiting for the CPU, kept in insertion order.
#[derive(Debug, Default)]
pub struct ReadyQueue {
    queue: VecDeque<ProcessInfo>,
}

impl ReadyQueue {
    pub fn new() -> ReadyQueue {
        ReadyQueue::default()
    }

    /// Appends a process to the tail and marks it ready.
    pub fn insert(&mut self, mut process: ProcessInfo) {
        process.make_ready();
        self.queue.push_back(process);
    }

    pub fn remove_front(&mut self) -> Option<ProcessInfo> {
        self.queue.pop_front()
    }

    /// Removes the process with the greatest effective priority at `clock`.
    /// On equal scores the one inserted first wins.
    pub fn remove_highest_effective_priority(
        &mut self,
        aging: AgingFactor,
        clock: usize,
    ) -> Option<ProcessInfo> {
        let mut best: Option<(usize, i64)> = None;
        for (idx, process) in self.queue.iter().enumerate() {
            let score = process.effective_priority(aging, clock);
            if best.map_or(true, |(_, max)| score > max) {
                best = Some((idx, score));
            }
        }

        best.and_then(|(idx, _)| self.queue.remove(idx))
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProcessInfo> {
        self.queue.iter()
    }
}
