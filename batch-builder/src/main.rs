use anyhow::Result;
use clap::Parser;
use drive_dataset::{builder::build_batches, config::Config, inspect::inspect_batches};
use prettytable::{cell, row, Table};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Parser)]
enum Opts {
    /// Build batch archives from map data
    Build {
        /// configuration file
        #[clap(default_value = "batch-builder.json5")]
        config_file: PathBuf,
    },
    /// Report the array shapes of existing batch archives
    Info {
        /// batch output directory
        batch_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    pretty_env_logger::init();

    match Opts::parse() {
        Opts::Build { config_file } => {
            build(config_file)?;
        }
        Opts::Info { batch_dir } => {
            info(batch_dir)?;
        }
    }

    Ok(())
}

fn build(config_file: impl AsRef<Path>) -> Result<()> {
    let config = Config::open(config_file)?;
    let summary = build_batches(&config)?;

    // print run statistics
    {
        let mut table = Table::new();
        table.add_row(row!["maps", "label rows", "records", "batch files"]);
        table.add_row(row![
            summary.rows_per_map.len(),
            summary.total_rows,
            summary.total_records,
            summary.num_batches,
        ]);
        table.printstd();
    }

    Ok(())
}

fn info(batch_dir: impl AsRef<Path>) -> Result<()> {
    let batches = inspect_batches(batch_dir)?;

    // print per-archive shape information
    {
        let mut table = Table::new();
        table.add_row(row!["file", "images shape", "labels shape"]);

        batches.iter().for_each(|info| {
            table.add_row(row![
                info.file.display(),
                format!("{:?}", info.images_shape),
                format!("{:?}", info.labels_shape),
            ]);
        });

        table.printstd();
    }

    Ok(())
}
