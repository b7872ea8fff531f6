//! Map directory discovery and label file reading.

use crate::{common::*, config::DatasetConfig};

/// One recorded driving session on a single map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapEntry {
    pub name: String,
    pub label_file: PathBuf,
    pub image_dir: PathBuf,
}

/// One row of a session label file, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelRow {
    /// The capture timestamp, used verbatim in image file names.
    pub timestamp: String,
    /// The recorded steering value.
    pub steering: f64,
}

/// Enumerates the map subdirectories of the maps directory in name order.
pub fn discover_maps(config: &DatasetConfig) -> Result<Vec<MapEntry>> {
    let DatasetConfig {
        maps_dir,
        label_file_name,
        image_dir_name,
        expect_first_map,
    } = config;

    ensure!(
        maps_dir.is_dir(),
        "the maps directory '{}' does not exist",
        maps_dir.display()
    );

    let map_dirs: Vec<PathBuf> = glob::glob(&format!("{}/*", maps_dir.display()))?
        .filter_map(|result| match result {
            Ok(path) if path.is_dir() => Some(Ok(path)),
            Ok(_) => None,
            Err(err) => Some(Err(Error::from(err))),
        })
        .try_collect()?;

    ensure!(
        !map_dirs.is_empty(),
        "no map directories found under '{}'",
        maps_dir.display()
    );

    let maps: Vec<MapEntry> = map_dirs
        .into_iter()
        .map(|dir| {
            let name = dir
                .file_name()
                .and_then(|name| name.to_str())
                .ok_or_else(|| format_err!("invalid map directory name '{}'", dir.display()))?
                .to_owned();
            let label_file = dir.join(label_file_name);
            let image_dir = dir.join(image_dir_name);

            ensure!(
                label_file.is_file(),
                "the label file '{}' does not exist",
                label_file.display()
            );
            ensure!(
                image_dir.is_dir(),
                "the image directory '{}' does not exist",
                image_dir.display()
            );

            Ok(MapEntry {
                name,
                label_file,
                image_dir,
            })
        })
        .try_collect()?;

    if let Some(expected) = expect_first_map {
        ensure!(
            maps[0].name == expected.as_str(),
            "expect the first map to be '{}', but found '{}'",
            expected,
            maps[0].name
        );
    }

    Ok(maps)
}

/// Reads the label file of a map as an ordered sequence of rows.
///
/// The file is a header-less CSV whose column 0 holds the timestamp and
/// column 1 holds the steering value. Trailing columns are ignored.
pub fn load_label_rows(map: &MapEntry) -> Result<Vec<LabelRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(&map.label_file)
        .with_context(|| format!("failed to open label file '{}'", map.label_file.display()))?;

    let rows: Vec<LabelRow> = reader
        .records()
        .map(|result| -> Result<_> {
            let record = result
                .with_context(|| format!("failed to read label file '{}'", map.label_file.display()))?;
            let line = record.position().map(|pos| pos.line()).unwrap_or(0);

            let timestamp = record
                .get(0)
                .ok_or_else(|| {
                    format_err!(
                        "missing timestamp column at line {} of '{}'",
                        line,
                        map.label_file.display()
                    )
                })?
                .trim()
                .to_owned();
            let steering: f64 = record
                .get(1)
                .ok_or_else(|| {
                    format_err!(
                        "missing steering column at line {} of '{}'",
                        line,
                        map.label_file.display()
                    )
                })?
                .trim()
                .parse()
                .with_context(|| {
                    format!(
                        "invalid steering value at line {} of '{}'",
                        line,
                        map.label_file.display()
                    )
                })?;

            Ok(LabelRow {
                timestamp,
                steering,
            })
        })
        .try_collect()?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn dataset_config(maps_dir: &Path) -> DatasetConfig {
        DatasetConfig {
            maps_dir: maps_dir.to_owned(),
            label_file_name: "training_data.csv".into(),
            image_dir_name: "img".into(),
            expect_first_map: Some("Map1".into()),
        }
    }

    fn create_map(root: &Path, name: &str, csv_text: &str) {
        let map_dir = root.join(name);
        fs::create_dir_all(map_dir.join("img")).unwrap();
        fs::write(map_dir.join("training_data.csv"), csv_text).unwrap();
    }

    #[test]
    fn discovers_maps_in_name_order() {
        let root = tempfile::tempdir().unwrap();
        create_map(root.path(), "Map2", "");
        create_map(root.path(), "Map1", "");
        fs::write(root.path().join("notes.txt"), "stray file").unwrap();

        let maps = discover_maps(&dataset_config(root.path())).unwrap();
        let names: Vec<_> = maps.iter().map(|map| map.name.as_str()).collect();
        assert_eq!(names, ["Map1", "Map2"]);
    }

    #[test]
    fn rejects_empty_maps_dir() {
        let root = tempfile::tempdir().unwrap();
        assert!(discover_maps(&dataset_config(root.path())).is_err());
    }

    #[test]
    fn rejects_unexpected_first_map() {
        let root = tempfile::tempdir().unwrap();
        create_map(root.path(), "Map2", "");
        assert!(discover_maps(&dataset_config(root.path())).is_err());
    }

    #[test]
    fn rejects_map_without_label_file() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("Map1").join("img")).unwrap();
        assert!(discover_maps(&dataset_config(root.path())).is_err());
    }

    #[test]
    fn reads_label_rows_in_file_order() {
        let root = tempfile::tempdir().unwrap();
        create_map(root.path(), "Map1", "t1,0.5\nt2,-0.25\nt3,0\n");

        let maps = discover_maps(&dataset_config(root.path())).unwrap();
        let rows = load_label_rows(&maps[0]).unwrap();

        let timestamps: Vec<_> = rows.iter().map(|row| row.timestamp.as_str()).collect();
        assert_eq!(timestamps, ["t1", "t2", "t3"]);
        assert_abs_diff_eq!(rows[0].steering, 0.5);
        assert_abs_diff_eq!(rows[1].steering, -0.25);
        assert_abs_diff_eq!(rows[2].steering, 0.0);
    }

    #[test]
    fn ignores_trailing_columns() {
        let root = tempfile::tempdir().unwrap();
        create_map(root.path(), "Map1", "t1,0.5,0.9,0.0\nt2,-0.25,0.8,0.1\n");

        let maps = discover_maps(&dataset_config(root.path())).unwrap();
        let rows = load_label_rows(&maps[0]).unwrap();

        assert_eq!(rows.len(), 2);
        assert_abs_diff_eq!(rows[0].steering, 0.5);
        assert_abs_diff_eq!(rows[1].steering, -0.25);
    }

    #[test]
    fn rejects_malformed_steering() {
        let root = tempfile::tempdir().unwrap();
        create_map(root.path(), "Map1", "t1,not-a-number\n");

        let maps = discover_maps(&dataset_config(root.path())).unwrap();
        assert!(load_label_rows(&maps[0]).is_err());
    }

    #[test]
    fn empty_label_file_yields_no_rows() {
        let root = tempfile::tempdir().unwrap();
        create_map(root.path(), "Map1", "");

        let maps = discover_maps(&dataset_config(root.path())).unwrap();
        assert!(load_label_rows(&maps[0]).unwrap().is_empty());
    }
}
