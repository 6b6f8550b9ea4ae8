//! JSON snapshots for hosts that want state across restarts.
//!
//! One file per student under the base directory, named by the hex encoding
//! of the student id (ids are opaque strings and may contain characters that
//! are not filesystem-safe). Writes go to a `.tmp` sibling first and are
//! renamed into place, so a crashed write corrupts at most one student's
//! file. Loading skips unreadable files with a warning rather than refusing
//! to start.

use std::fs;
use std::path::PathBuf;

use super::student_map::{Result, StoreError, StudentData, StudentId, StudentMap};

pub struct SnapshotStore {
    base_dir: PathBuf,
}

impl SnapshotStore {
    /// Create a snapshot store rooted at `base_dir`, creating the directory
    /// if needed.
    pub fn new(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// Default snapshot directory under the platform data dir.
    pub fn default_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("studium").join("snapshots"))
            .ok_or(StoreError::DataDirNotFound)
    }

    fn student_path(&self, id: &StudentId) -> PathBuf {
        self.base_dir
            .join(format!("{}.json", hex::encode(id.as_str())))
    }

    /// Save one student's partition using atomic write (write to .tmp then
    /// rename).
    pub fn save_student(&self, id: &StudentId, data: &StudentData) -> Result<()> {
        let path = self.student_path(id);
        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(data)?;
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    /// Save every partition in the map.
    pub fn save_all(&self, students: &StudentMap) -> Result<()> {
        for entry in students.iter() {
            self.save_student(entry.key(), entry.value())?;
        }
        Ok(())
    }

    /// Load all partitions found under the base directory.
    ///
    /// Files with an undecodable name or unparsable contents are skipped
    /// with a warning.
    pub fn load_all(&self) -> Result<Vec<(StudentId, StudentData)>> {
        let mut loaded = Vec::new();

        if !self.base_dir.exists() {
            return Ok(loaded);
        }

        for entry in fs::read_dir(&self.base_dir)? {
            let entry = entry?;
            let path = entry.path();

            if !path.extension().map(|e| e == "json").unwrap_or(false) {
                continue;
            }

            let Some(student) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| hex::decode(stem).ok())
                .and_then(|bytes| String::from_utf8(bytes).ok())
                .map(StudentId::new)
            else {
                log::warn!("skipping snapshot with undecodable name: {:?}", path);
                continue;
            };

            match fs::read_to_string(&path)
                .map_err(StoreError::from)
                .and_then(|content| Ok(serde_json::from_str::<StudentData>(&content)?))
            {
                Ok(data) => loaded.push((student, data)),
                Err(err) => {
                    log::warn!("skipping unreadable snapshot {:?}: {}", path, err);
                }
            }
        }

        Ok(loaded)
    }
}
