//! Turn command line paths into picker candidates

use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::selection::SelectedFile;
use crate::Result;

/// Expand files and directories into candidate files, in argument order.
///
/// Directories contribute their files sorted by name; nothing is filtered here,
/// the controller's video filter decides what is kept.
pub async fn collect_candidates(paths: &[PathBuf], recursive: bool) -> Result<Vec<SelectedFile>> {
    let mut candidates = Vec::new();

    for path in paths {
        if path.is_dir() {
            for file in walk_directory(path, recursive) {
                candidates.push(SelectedFile::from_path(&file).await?);
            }
        } else {
            candidates.push(SelectedFile::from_path(path).await?);
        }
    }

    debug!("Collected {} candidate file(s)", candidates.len());
    Ok(candidates)
}

fn walk_directory(dir: &Path, recursive: bool) -> Vec<PathBuf> {
    let max_depth = if recursive { usize::MAX } else { 1 };

    WalkDir::new(dir)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_collect_flat_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("day2");
        tokio::fs::create_dir_all(&nested).await.unwrap();
        tokio::fs::write(temp_dir.path().join("b.mp4"), b"b").await.unwrap();
        tokio::fs::write(temp_dir.path().join("a.txt"), b"a").await.unwrap();
        tokio::fs::write(nested.join("c.mkv"), b"c").await.unwrap();

        let candidates = collect_candidates(&[temp_dir.path().to_path_buf()], false)
            .await
            .unwrap();
        let names: Vec<&str> = candidates.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.mp4"]);
    }

    #[tokio::test]
    async fn test_collect_recursive_and_explicit_files() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("day2");
        tokio::fs::create_dir_all(&nested).await.unwrap();
        tokio::fs::write(nested.join("c.mkv"), b"c").await.unwrap();
        let single = temp_dir.path().join("z.webm");
        tokio::fs::write(&single, b"z").await.unwrap();

        let candidates = collect_candidates(&[single.clone(), nested.clone()], true)
            .await
            .unwrap();
        let names: Vec<&str> = candidates.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["z.webm", "c.mkv"]);
    }

    #[tokio::test]
    async fn test_missing_path_is_an_error() {
        let result = collect_candidates(&[PathBuf::from("/no/such/video.mp4")], false).await;
        assert!(result.is_err());
    }
}
