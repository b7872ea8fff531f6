//! The batch building pipeline.

use crate::{
    batch::BatchWriter,
    camera::Camera,
    common::*,
    config::Config,
    frame::{FrameRecord, FrameShape},
    map,
    preprocess::Preprocessor,
};

/// Statistics of one completed build run.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildSummary {
    pub total_rows: usize,
    pub total_records: usize,
    pub num_batches: usize,
    pub frame_shape: FrameShape,
    /// Label row counts per map, in processing order.
    pub rows_per_map: IndexMap<String, usize>,
}

/// Builds batch archives from the map data described by the configuration.
///
/// Every label row yields six records: the three camera frames in center,
/// right, left order, each followed by its horizontally flipped variant with
/// the label negated.
pub fn build_batches(config: &Config) -> Result<BuildSummary> {
    let Config {
        dataset,
        preprocessor,
        output,
    } = config;

    let preprocessor = Preprocessor::new(preprocessor)?;
    let frame_shape = preprocessor.output_shape();

    let maps = map::discover_maps(dataset)?;
    info!(
        "found {} maps under '{}'",
        maps.len(),
        dataset.maps_dir.display()
    );

    let mut writer = BatchWriter::new(
        &output.dir,
        output.batch_size,
        frame_shape,
        output.keep_empty_trailing_batch,
    )?;

    if output.sample_preview {
        save_sample_preview(&dataset.maps_dir, &output.dir, &preprocessor)?;
    }

    let mut rows_per_map = IndexMap::new();

    for map_entry in &maps {
        let rows = map::load_label_rows(map_entry)?;
        info!("map '{}': {} label rows", map_entry.name, rows.len());
        rows_per_map.insert(map_entry.name.clone(), rows.len());

        for row in &rows {
            for camera in Camera::ALL {
                let image_file = map_entry
                    .image_dir
                    .join(camera.image_file_name(&row.timestamp));
                let frame = preprocessor.process_file(&image_file)?;
                let label = row.steering + camera.correction();

                let flipped = FrameRecord {
                    frame: frame.flipped(),
                    label: -label,
                };
                writer.push(FrameRecord { frame, label })?;
                writer.push(flipped)?;
            }
        }
    }

    let total_rows: usize = rows_per_map.values().sum();
    let total_records = writer.total_records();
    let num_batches = writer.finish()?;

    let summary = BuildSummary {
        total_rows,
        total_records,
        num_batches,
        frame_shape,
        rows_per_map,
    };
    save_manifest(&output.dir, output.batch_size.get(), &summary)?;

    info!(
        "wrote {} records in {} batch files under '{}'",
        total_records,
        num_batches,
        output.dir.display()
    );

    Ok(summary)
}

/// Preprocesses the first image found under the maps directory and saves it
/// as `preview.png` in the output directory.
fn save_sample_preview(
    maps_dir: &Path,
    output_dir: &Path,
    preprocessor: &Preprocessor,
) -> Result<()> {
    let pattern = format!("{}/**/*.jpg", maps_dir.display());
    let sample = match glob::glob(&pattern)?.next().transpose()? {
        Some(path) => path,
        None => {
            warn!("no sample image found under '{}'", maps_dir.display());
            return Ok(());
        }
    };

    let frame = preprocessor.process_file(&sample)?;
    let preview_file = output_dir.join("preview.png");
    frame
        .to_image()
        .save(&preview_file)
        .with_context(|| format!("failed to save preview image '{}'", preview_file.display()))?;
    info!("saved sample preview to '{}'", preview_file.display());

    Ok(())
}

/// Writes the run manifest next to the batch archives.
fn save_manifest(output_dir: &Path, batch_size: usize, summary: &BuildSummary) -> Result<()> {
    let manifest_file = output_dir.join("manifest.json");
    let manifest = serde_json::json!({
        "created": Local::now().to_rfc3339(),
        "batch_size": batch_size,
        "num_batches": summary.num_batches,
        "total_records": summary.total_records,
        "frame_shape": summary.frame_shape,
        "rows_per_map": &summary.rows_per_map,
    });

    let file = File::create(&manifest_file)
        .with_context(|| format!("failed to create manifest file '{}'", manifest_file.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &manifest)?;

    Ok(())
}
