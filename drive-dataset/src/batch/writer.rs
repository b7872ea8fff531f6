use super::*;
use crate::{
    common::*,
    frame::{FrameRecord, FrameShape},
};

/// Streams records into fixed-size, sequentially numbered batch archives.
///
/// Records accumulate in memory and are flushed to `batch-<index>.npz` under
/// the output directory whenever the buffer reaches the batch size. Indices
/// start at 0 and are contiguous. [`BatchWriter::finish`] flushes the
/// remaining records.
#[derive(Debug)]
pub struct BatchWriter {
    output_dir: PathBuf,
    batch_size: usize,
    frame_shape: FrameShape,
    keep_empty_trailing_batch: bool,
    next_index: usize,
    total_records: usize,
    accumulator: BatchAccumulator,
}

impl BatchWriter {
    pub fn new(
        output_dir: impl Into<PathBuf>,
        batch_size: NonZeroUsize,
        frame_shape: FrameShape,
        keep_empty_trailing_batch: bool,
    ) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).with_context(|| {
            format!(
                "failed to create output directory '{}'",
                output_dir.display()
            )
        })?;

        Ok(Self {
            output_dir,
            batch_size: batch_size.get(),
            frame_shape,
            keep_empty_trailing_batch,
            next_index: 0,
            total_records: 0,
            accumulator: BatchAccumulator::new(),
        })
    }

    /// Appends one record, flushing an archive when the buffer reaches the
    /// batch size.
    pub fn push(&mut self, record: FrameRecord) -> Result<()> {
        ensure!(
            record.frame.shape() == self.frame_shape,
            "frame shape {:?} does not match the writer shape {:?}",
            record.frame.shape(),
            self.frame_shape
        );

        self.accumulator.push(record);
        self.total_records += 1;

        if self.accumulator.len() == self.batch_size {
            self.flush()?;
        }

        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        let records = self.accumulator.take();
        let path = self.output_dir.join(batch_file_name(self.next_index));
        write_batch(&path, &records, self.frame_shape)?;
        info!("batch {} saved ({} records)", self.next_index, records.len());
        self.next_index += 1;
        Ok(())
    }

    /// Flushes the remaining records and returns the number of archives
    /// written.
    ///
    /// An empty buffer is flushed only when the writer keeps empty trailing
    /// batches.
    pub fn finish(mut self) -> Result<usize> {
        if !self.accumulator.is_empty() || self.keep_empty_trailing_batch {
            self.flush()?;
        }
        Ok(self.next_index)
    }

    /// The number of records pushed so far.
    pub fn total_records(&self) -> usize {
        self.total_records
    }
}
