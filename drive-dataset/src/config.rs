//! Batch building configuration format.

use crate::common::*;

/// The main batch building configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub dataset: DatasetConfig,
    pub preprocessor: PreprocessorConfig,
    pub output: OutputConfig,
}

impl Config {
    pub fn open<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        let config = json5::from_str(&text)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
        Ok(config)
    }
}

/// Dataset tree options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// The directory containing one subdirectory per recorded map.
    pub maps_dir: PathBuf,
    /// The per-map label file name.
    #[serde(default = "default_label_file_name")]
    pub label_file_name: String,
    /// The per-map image directory name.
    #[serde(default = "default_image_dir_name")]
    pub image_dir_name: String,
    /// If set, fail unless the first discovered map has this name.
    #[serde(default = "default_expect_first_map")]
    pub expect_first_map: Option<String>,
}

/// Frame preprocessing options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessorConfig {
    /// The number of rows cropped from the frame top.
    #[serde(default = "default_crop_top")]
    pub crop_top: usize,
    /// The number of rows cropped from the frame bottom.
    #[serde(default = "default_crop_bottom")]
    pub crop_bottom: usize,
    /// The output frame height.
    #[serde(default = "default_output_height")]
    pub output_height: NonZeroUsize,
    /// The output frame width.
    #[serde(default = "default_output_width")]
    pub output_width: NonZeroUsize,
}

/// Batch output options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// The directory receiving the batch archives.
    pub dir: PathBuf,
    /// The number of records per batch archive.
    #[serde(default = "default_batch_size")]
    pub batch_size: NonZeroUsize,
    /// If set, write a trailing empty archive when the record count is a
    /// multiple of the batch size.
    #[serde(default)]
    pub keep_empty_trailing_batch: bool,
    /// If set, save a preprocessed sample frame into the output directory
    /// before the main loop.
    #[serde(default = "default_sample_preview")]
    pub sample_preview: bool,
}

fn default_label_file_name() -> String {
    "training_data.csv".into()
}

fn default_image_dir_name() -> String {
    "img".into()
}

fn default_expect_first_map() -> Option<String> {
    Some("Map1".into())
}

fn default_crop_top() -> usize {
    60
}

fn default_crop_bottom() -> usize {
    20
}

fn default_output_height() -> NonZeroUsize {
    NonZeroUsize::new(66).unwrap()
}

fn default_output_width() -> NonZeroUsize {
    NonZeroUsize::new(200).unwrap()
}

fn default_batch_size() -> NonZeroUsize {
    NonZeroUsize::new(2500).unwrap()
}

fn default_sample_preview() -> bool {
    true
}
