//! Common imports from external crates.

pub use anyhow::{bail, ensure, format_err, Context, Error, Result};
pub use chrono::Local;
pub use image::{
    imageops::{self, FilterType},
    DynamicImage, GrayImage,
};
pub use indexmap::IndexMap;
pub use itertools::Itertools;
pub use log::{info, warn};
pub use ndarray::{Array1, Array4};
pub use serde::{Deserialize, Serialize};
pub use std::{
    fmt::Debug,
    fs::{self, File},
    io::BufWriter,
    mem,
    num::NonZeroUsize,
    path::{Path, PathBuf},
};
