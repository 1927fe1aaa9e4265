use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ChartError, Result};

const DELTA_T_FILE: &str = "swe_deltat.txt";
const PLANET_FILE_EXTENSIONS: &[&str] = &["se1", "se2"];
const FOUND_FILES_SAMPLE: usize = 50;

/// Files the engine needs, as reported to callers
pub const REQUIRED_DATA_FILES: &[&str] = &["swe_deltat.txt", "sepl_*.se1 (planet files)"];

/// An ephemeris data directory that passed the presence checks
#[derive(Debug, Clone, PartialEq)]
pub struct DataDirectory {
    pub path: PathBuf,
}

/// Check that `path` exists and holds the delta-T table plus at least one
/// planet file, so engine failures surface as an actionable error instead.
pub fn verify_data_directory(path: &Path) -> Result<DataDirectory> {
    if !path.is_dir() {
        return Err(ChartError::DataDirectoryMissing {
            expected_path: path.to_path_buf(),
        });
    }

    let entries = fs::read_dir(path).map_err(|source| ChartError::DataDirectoryUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ChartError::DataDirectoryUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }

    let has_delta_t = names.iter().any(|name| name == DELTA_T_FILE);
    let has_planet_file = names.iter().any(|name| is_planet_file(name));

    if !(has_delta_t && has_planet_file) {
        names.sort();
        names.truncate(FOUND_FILES_SAMPLE);
        return Err(ChartError::DataFilesIncomplete {
            expected_path: path.to_path_buf(),
            found_files_sample: names,
        });
    }

    Ok(DataDirectory {
        path: path.to_path_buf(),
    })
}

fn is_planet_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| PLANET_FILE_EXTENSIONS.contains(&ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn test_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("swiss_ephemeris");

        match verify_data_directory(&missing) {
            Err(ChartError::DataDirectoryMissing { expected_path }) => assert_eq!(expected_path, missing),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_incomplete_directory_reports_sorted_sample() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "swe_deltat.txt");
        touch(tmp.path(), "README.md");

        match verify_data_directory(tmp.path()) {
            Err(ChartError::DataFilesIncomplete { found_files_sample, .. }) => {
                assert_eq!(found_files_sample, vec!["README.md", "swe_deltat.txt"]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_planet_files_without_delta_t() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "sepl_18.se1");

        assert!(matches!(
            verify_data_directory(tmp.path()),
            Err(ChartError::DataFilesIncomplete { .. })
        ));
    }

    #[test]
    fn test_sample_is_capped() {
        let tmp = tempfile::tempdir().unwrap();
        for i in 0..60 {
            touch(tmp.path(), &format!("notes_{i:02}.txt"));
        }

        match verify_data_directory(tmp.path()) {
            Err(ChartError::DataFilesIncomplete { found_files_sample, .. }) => {
                assert_eq!(found_files_sample.len(), 50);
                assert_eq!(found_files_sample[0], "notes_00.txt");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_complete_directory() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "swe_deltat.txt");
        touch(tmp.path(), "semo_18.se2");

        let dir = verify_data_directory(tmp.path()).unwrap();
        assert_eq!(dir.path, tmp.path());
    }
}
