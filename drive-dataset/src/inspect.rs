//! Batch archive inspection.

use crate::{batch, common::*};

/// The shape report of one batch archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchInfo {
    pub file: PathBuf,
    pub index: usize,
    pub images_shape: Vec<usize>,
    pub labels_shape: Vec<usize>,
}

/// Opens every batch archive under the directory and reports the stored
/// array shapes, in batch index order.
///
/// A directory without batch archives yields an empty report.
pub fn inspect_batches(batch_dir: impl AsRef<Path>) -> Result<Vec<BatchInfo>> {
    let batch_dir = batch_dir.as_ref();
    ensure!(
        batch_dir.is_dir(),
        "the batch directory '{}' does not exist",
        batch_dir.display()
    );

    let mut files: Vec<(usize, PathBuf)> =
        glob::glob(&format!("{}/batch-*.npz", batch_dir.display()))?
            .map(|result| -> Result<_> {
                let path = result?;
                let index = parse_batch_index(&path)?;
                Ok((index, path))
            })
            .try_collect()?;
    files.sort_by_key(|(index, _)| *index);

    let infos: Vec<BatchInfo> = files
        .into_iter()
        .map(|(index, path)| -> Result<_> {
            let (images, labels) = batch::read_batch(&path)?;
            Ok(BatchInfo {
                index,
                images_shape: images.shape().to_vec(),
                labels_shape: labels.shape().to_vec(),
                file: path,
            })
        })
        .try_collect()?;

    Ok(infos)
}

fn parse_batch_index(path: &Path) -> Result<usize> {
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| format_err!("invalid batch file name '{}'", path.display()))?;
    let index = stem
        .strip_prefix("batch-")
        .ok_or_else(|| format_err!("invalid batch file name '{}'", path.display()))?
        .parse()
        .with_context(|| format!("invalid batch file name '{}'", path.display()))?;
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{FrameRecord, FrameShape, ProcessedFrame};

    const SHAPE: FrameShape = FrameShape {
        height: 1,
        width: 2,
        channels: 1,
    };

    fn write_archive(dir: &Path, index: usize, num_records: usize) {
        let records: Vec<FrameRecord> = (0..num_records)
            .map(|_| FrameRecord {
                frame: ProcessedFrame::new(1, 2, vec![0, 1]).unwrap(),
                label: 0.0,
            })
            .collect();
        let path = dir.join(batch::batch_file_name(index));
        batch::write_batch(&path, &records, SHAPE).unwrap();
    }

    #[test]
    fn empty_directory_reports_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(inspect_batches(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn rejects_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(inspect_batches(dir.path().join("absent")).is_err());
    }

    #[test]
    fn reports_shapes_in_index_order() {
        let dir = tempfile::tempdir().unwrap();
        write_archive(dir.path(), 10, 3);
        write_archive(dir.path(), 0, 1);
        write_archive(dir.path(), 2, 2);

        let infos = inspect_batches(dir.path()).unwrap();
        let indices: Vec<_> = infos.iter().map(|info| info.index).collect();
        assert_eq!(indices, [0, 2, 10]);

        assert_eq!(infos[0].images_shape, [1, 1, 2, 1]);
        assert_eq!(infos[0].labels_shape, [1]);
        assert_eq!(infos[1].images_shape, [2, 1, 2, 1]);
        assert_eq!(infos[2].images_shape, [3, 1, 2, 1]);
        assert_eq!(infos[2].labels_shape, [3]);
    }

    #[test]
    fn aborts_on_corrupted_archives() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("batch-0.npz"), b"junk").unwrap();
        assert!(inspect_batches(dir.path()).is_err());
    }
}
