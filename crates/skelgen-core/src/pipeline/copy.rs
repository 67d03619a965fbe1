use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, SkelError};

/// Copy the skeleton tree at `source` into `dest`, which must not exist yet.
///
/// Returns the copied files, relative to `dest`.
pub fn copy_skeleton(skeleton: &str, source: &Path, dest: &Path) -> Result<Vec<PathBuf>> {
    if !source.is_dir() {
        return Err(SkelError::SkeletonMissing {
            skeleton: skeleton.to_string(),
            path: source.to_path_buf(),
        });
    }
    if dest.exists() {
        return Err(SkelError::ProjectExists {
            path: dest.to_path_buf(),
        });
    }

    std::fs::create_dir_all(dest).map_err(|e| SkelError::Io {
        context: format!("creating project directory {}", dest.display()),
        source: e,
    })?;

    let mut copied = Vec::new();
    for entry in WalkDir::new(source).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| SkelError::Io {
            context: format!("walking skeleton {}", source.display()),
            source: e.into(),
        })?;
        let Ok(rel_path) = entry.path().strip_prefix(source) else {
            continue;
        };
        let dest_path = dest.join(rel_path);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&dest_path).map_err(|e| SkelError::Io {
                context: format!("creating directory {}", dest_path.display()),
                source: e,
            })?;
            continue;
        }

        std::fs::copy(entry.path(), &dest_path).map_err(|e| SkelError::Io {
            context: format!(
                "copying {} to {}",
                entry.path().display(),
                dest_path.display()
            ),
            source: e,
        })?;
        copied.push(rel_path.to_path_buf());
    }

    Ok(copied)
}
