//! JSON file persistence for a `ProjectList`.
//!
//! The whole model is stored as one exported `Snapshot`. Loading goes
//! through `ProjectList::from_seed`, so saved ids come back unchanged.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::Path;

use log::{debug, info};

use crate::error::{ParseError, StoreError};
use crate::project_list::ProjectList;
use crate::snapshot::ProjectListSeed;

/// Load a project list from `path`. A missing file yields a fresh list.
pub fn load(path: &Path) -> Result<ProjectList, StoreError> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("event=store_load module=store status=missing path={}", path.display());
            return Ok(ProjectList::new());
        }
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let list = from_json(&data).map_err(|e| e.at(path))?;
    debug!(
        "event=store_load module=store status=ok path={} projects={} tasks={}",
        path.display(),
        list.project_count(),
        list.task_count()
    );
    Ok(list)
}

/// Save using an atomic-ish write (temp file + rename).
pub fn save(list: &ProjectList, path: &Path) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let data = to_json(list).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let tmp = path.with_extension("json.tmp");
    let mut f = File::create(&tmp).map_err(io_err)?;
    f.write_all(data.as_bytes()).map_err(io_err)?;
    f.flush().map_err(io_err)?;
    fs::rename(&tmp, path).map_err(io_err)?;
    debug!("event=store_save module=store status=ok path={}", path.display());
    Ok(())
}

/// Pretty JSON of the exported snapshot.
pub fn to_json(list: &ProjectList) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&list.export())
}

/// Build a list from snapshot JSON (or any seed-shaped JSON).
pub fn from_json(data: &str) -> Result<ProjectList, ParseError> {
    let seed: ProjectListSeed = serde_json::from_str(data)?;
    Ok(ProjectList::from_seed(seed)?)
}
