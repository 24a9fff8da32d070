//! Reading and writing TSPLIB instance files.

use camino::Utf8Path;
use tourkit_core::{Instance, tsplib};

use crate::LoadError;

/// Load and parse the TSPLIB instance at `path`.
///
/// # Errors
///
/// Returns [`LoadError::NotAFile`] when nothing readable exists at `path`,
/// [`LoadError::Read`] when reading fails, and [`LoadError::Parse`] when
/// the text is not a loadable instance.
pub fn load_instance(path: &Utf8Path) -> Result<Instance, LoadError> {
    let read_error = |source| LoadError::Read {
        path: path.to_owned(),
        source,
    };
    if !tourkit_fs::file_is_file(path).map_err(read_error)? {
        return Err(LoadError::NotAFile {
            path: path.to_owned(),
        });
    }
    let text = tourkit_fs::read_to_string(path).map_err(read_error)?;
    let instance = tsplib::parse(&text).map_err(|source| LoadError::Parse {
        path: path.to_owned(),
        source,
    })?;
    log::debug!("loaded {path}: {} cities", instance.dimension());
    Ok(instance)
}

/// Write `instance` to `path` as an explicit full-matrix instance,
/// creating parent directories as needed.
///
/// # Errors
///
/// Returns [`LoadError::Write`] when the file cannot be written.
pub fn save_instance(instance: &Instance, path: &Utf8Path) -> Result<(), LoadError> {
    tourkit_fs::write_string(path, &tsplib::write_full_matrix(instance)).map_err(|source| {
        LoadError::Write {
            path: path.to_owned(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;
    use tourkit_core::test_support::{UNIT_SQUARE_TSP, unit_square};
    use tourkit_core::tsplib::ParseErrorKind;

    #[fixture]
    fn temp_dir() -> TempDir {
        TempDir::new().expect("create temp dir")
    }

    fn utf8(dir: &TempDir, name: &str) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().join(name)).expect("utf-8 temp path")
    }

    #[rstest]
    fn loads_a_written_file(temp_dir: TempDir) {
        let path = utf8(&temp_dir, "square.tsp");
        tourkit_fs::write_string(&path, UNIT_SQUARE_TSP).expect("write fixture");

        let instance = load_instance(&path).expect("square loads");
        assert_eq!(instance.matrix(), unit_square().matrix());
    }

    #[rstest]
    fn missing_files_are_reported(temp_dir: TempDir) {
        let path = utf8(&temp_dir, "absent.tsp");
        let err = load_instance(&path).expect_err("file is absent");
        assert!(matches!(err, LoadError::NotAFile { path: ref reported } if *reported == path));
    }

    #[rstest]
    fn parse_errors_carry_the_path_and_line(temp_dir: TempDir) {
        let path = utf8(&temp_dir, "atsp.tsp");
        tourkit_fs::write_string(&path, "TYPE: ATSP\n").expect("write fixture");

        let err = load_instance(&path).expect_err("ATSP is rejected");
        let LoadError::Parse { source, .. } = &err else {
            panic!("expected a parse error, got {err:?}");
        };
        assert_eq!(source.line, 1);
        assert_eq!(source.kind, ParseErrorKind::NotTsp("ATSP".to_owned()));
        assert!(err.to_string().contains("atsp.tsp"));
    }

    #[rstest]
    fn saved_instances_load_back(temp_dir: TempDir) {
        let path = utf8(&temp_dir, "out/square.tsp");
        save_instance(&unit_square(), &path).expect("save succeeds");

        let reread = load_instance(&path).expect("saved file loads");
        assert_eq!(reread.matrix(), unit_square().matrix());
        assert_eq!(reread.coordinates(), unit_square().coordinates());
    }
}
