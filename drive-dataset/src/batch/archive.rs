//! Batch archive reading and writing.
//!
//! A batch is stored as an `.npz` archive holding two equal-length named
//! arrays: `images`, the 4-D `u8` frame stack in batch-height-width-channel
//! order, and `labels`, the 1-D `f64` steering values.

use crate::{
    common::*,
    frame::{FrameRecord, FrameShape},
};
use ndarray_npy::{NpzReader, NpzWriter};

pub const IMAGES_NAME: &str = "images";
pub const LABELS_NAME: &str = "labels";

/// Builds the archive file name of the batch with the given index.
pub fn batch_file_name(index: usize) -> String {
    format!("batch-{}.npz", index)
}

/// Writes one batch of records to an archive file.
///
/// The frame shape argument fixes the image array extents so that an empty
/// batch still stores well-formed shapes.
pub fn write_batch(
    path: impl AsRef<Path>,
    records: &[FrameRecord],
    frame_shape: FrameShape,
) -> Result<()> {
    let path = path.as_ref();
    let FrameShape {
        height,
        width,
        channels,
    } = frame_shape;

    let mut pixels = Vec::with_capacity(records.len() * frame_shape.pixel_count());
    let mut labels = Vec::with_capacity(records.len());

    for record in records {
        ensure!(
            record.frame.shape() == frame_shape,
            "frame shape {:?} does not match the batch shape {:?}",
            record.frame.shape(),
            frame_shape
        );
        pixels.extend_from_slice(record.frame.pixels());
        labels.push(record.label);
    }

    let images = Array4::from_shape_vec((records.len(), height, width, channels), pixels)?;
    let labels = Array1::from_vec(labels);

    let file = File::create(path)
        .with_context(|| format!("failed to create batch file '{}'", path.display()))?;
    let mut npz = NpzWriter::new(BufWriter::new(file));
    npz.add_array(IMAGES_NAME, &images)?;
    npz.add_array(LABELS_NAME, &labels)?;
    npz.finish()
        .with_context(|| format!("failed to write batch file '{}'", path.display()))?;

    Ok(())
}

/// Reads the image and label arrays of one batch archive.
pub fn read_batch(path: impl AsRef<Path>) -> Result<(Array4<u8>, Array1<f64>)> {
    let path = path.as_ref();

    let file = File::open(path)
        .with_context(|| format!("failed to open batch file '{}'", path.display()))?;
    let mut npz = NpzReader::new(file)
        .with_context(|| format!("failed to read batch file '{}'", path.display()))?;

    let images: Array4<u8> = npz
        .by_name(IMAGES_NAME)
        .with_context(|| format!("missing '{}' array in '{}'", IMAGES_NAME, path.display()))?;
    let labels: Array1<f64> = npz
        .by_name(LABELS_NAME)
        .with_context(|| format!("missing '{}' array in '{}'", LABELS_NAME, path.display()))?;

    ensure!(
        images.shape()[0] == labels.len(),
        "batch file '{}' holds {} images but {} labels",
        path.display(),
        images.shape()[0],
        labels.len()
    );

    Ok((images, labels))
}
