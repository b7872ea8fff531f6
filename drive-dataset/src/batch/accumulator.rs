use crate::{common::*, frame::FrameRecord};

/// The in-memory buffer of records for the batch in progress.
#[derive(Debug, Clone, Default)]
pub struct BatchAccumulator {
    records: Vec<FrameRecord>,
}

impl BatchAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: FrameRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Takes the buffered records, leaving the accumulator empty.
    pub fn take(&mut self) -> Vec<FrameRecord> {
        mem::take(&mut self.records)
    }
}
