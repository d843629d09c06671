use crate::errors::custom::GenerationError;
use crate::table::Workbook;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};
use uuid::Uuid;

/******************************************/
// Writing the workbook atomically
/******************************************/
/// Serializes up front, writes a sibling temp file, syncs it, then renames
/// it over `path`. On failure the temp file is removed and `path` is untouched.
#[instrument(name = "Write workbook", skip(path, workbook), fields(path = %path.display()))]
pub fn write_workbook(path: &Path, workbook: &Workbook) -> Result<(), GenerationError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| GenerationError::WriteFailure {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let bytes = serde_json::to_vec_pretty(workbook)?;
    let temp = temp_path(path);
    if let Err(source) = write_and_commit(&temp, path, &bytes) {
        if temp.exists() {
            if let Err(err) = fs::remove_file(&temp) {
                warn!(temp = %temp.display(), error = %err, "failed to remove temp file");
            }
        }
        return Err(GenerationError::WriteFailure {
            path: path.to_path_buf(),
            source,
        });
    }

    info!(sheets = workbook.sheets.len(), "workbook written");
    Ok(())
}

fn write_and_commit(temp: &Path, target: &Path, bytes: &[u8]) -> io::Result<()> {
    let file = File::create(temp)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(bytes)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    drop(writer);
    fs::rename(temp, target)
}

fn temp_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "workbook".to_string());
    path.with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Cell, Table};
    use claim::{assert_err, assert_ok};

    fn scratch_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("writer-{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn workbook() -> Workbook {
        let mut t = Table::new(["id"]);
        t.push_row(vec![Cell::text("CUST0001")]);
        let mut wb = Workbook::new();
        wb.push("customers", t);
        wb
    }

    #[test]
    fn creates_missing_directories() {
        let dir = scratch_dir();
        let target = dir.join("nested").join("deeper").join("data.json");

        assert_ok!(write_workbook(&target, &workbook()));

        let back: Workbook = serde_json::from_slice(&fs::read(&target).unwrap()).unwrap();
        assert_eq!(back, workbook());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn overwrites_previous_output() {
        let dir = scratch_dir();
        let target = dir.join("data.json");
        fs::write(&target, b"stale").unwrap();

        assert_ok!(write_workbook(&target, &workbook()));

        let back: Workbook = serde_json::from_slice(&fs::read(&target).unwrap()).unwrap();
        assert_eq!(back, workbook());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn failed_commit_leaves_no_partial_file() {
        let dir = scratch_dir();
        // A directory in the way makes the final rename fail.
        let target = dir.join("data.json");
        fs::create_dir(&target).unwrap();

        let result = write_workbook(&target, &workbook());

        assert_err!(&result);
        assert!(matches!(result, Err(GenerationError::WriteFailure { .. })));
        let leftovers: Vec<_> = fs::read_dir(&dir)
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, vec![std::ffi::OsString::from("data.json")]);
        assert!(target.is_dir());
        fs::remove_dir_all(dir).unwrap();
    }
}
