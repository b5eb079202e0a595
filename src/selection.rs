//! File selection: the video filter and the ordered list of files queued for upload

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::UploadConfig;
use crate::{Result, UploadError};

/// Where the bytes of a selected file come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    /// File on local disk, streamed at upload time
    Path(PathBuf),
    /// Content already held in memory
    Memory(Vec<u8>),
}

/// A file handed to the uploader by the picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// Display and upload filename
    pub name: String,
    /// Size in bytes
    pub size: u64,
    /// Declared media type (may be empty when the picker could not tell)
    pub media_type: String,
    /// Content source
    pub source: FileSource,
}

impl SelectedFile {
    /// Create a file backed by in-memory content
    pub fn from_bytes(name: impl Into<String>, media_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size: data.len() as u64,
            media_type: media_type.into(),
            source: FileSource::Memory(data),
        }
    }

    /// Create a file backed by a path on disk, reading its size and guessing its media type
    pub async fn from_path(path: &Path) -> Result<Self> {
        let metadata = tokio::fs::metadata(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            media_type: media_type_for_name(&name).unwrap_or_default().to_string(),
            name,
            size: metadata.len(),
            source: FileSource::Path(path.to_path_buf()),
        })
    }

    /// Lowercased extension of the filename, if any
    pub fn extension(&self) -> Option<String> {
        name_extension(&self.name)
    }

    /// Media type to send with the upload part
    pub fn upload_media_type(&self) -> &str {
        if self.media_type.is_empty() {
            "application/octet-stream"
        } else {
            &self.media_type
        }
    }
}

/// Lowercased text after the last dot of a filename; a bare `.mp4` counts as `mp4`
fn name_extension(name: &str) -> Option<String> {
    name.rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// Media type a browser would report for a known video extension
pub fn media_type_for_name(name: &str) -> Option<&'static str> {
    let ext = name_extension(name)?;
    let media_type = match ext.as_str() {
        "mp4" => "video/mp4",
        "avi" => "video/avi",
        "mov" => "video/quicktime",
        "mkv" => "video/x-matroska",
        "flv" => "video/x-flv",
        "wmv" => "video/x-ms-wmv",
        "webm" => "video/webm",
        _ => return None,
    };
    Some(media_type)
}

/// Accepts files whose media type or extension marks them as video.
///
/// The extension fallback exists because pickers do not always report a media type,
/// so a mislabeled file can get through. This is a convenience filter only.
#[derive(Debug, Clone)]
pub struct VideoFilter {
    allowed_media_types: Vec<String>,
    video_extensions: Vec<String>,
}

impl VideoFilter {
    pub fn new(allowed_media_types: Vec<String>, video_extensions: Vec<String>) -> Self {
        Self {
            allowed_media_types,
            video_extensions: video_extensions
                .into_iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }

    pub fn from_config(config: &UploadConfig) -> Self {
        Self::new(
            config.allowed_media_types.clone(),
            config.video_extensions.clone(),
        )
    }

    pub fn accepts(&self, file: &SelectedFile) -> bool {
        if self.allowed_media_types.iter().any(|t| *t == file.media_type) {
            return true;
        }

        match file.extension() {
            Some(ext) => self.video_extensions.contains(&ext),
            None => false,
        }
    }
}

impl Default for VideoFilter {
    fn default() -> Self {
        Self::from_config(&crate::config::Config::default().upload)
    }
}

/// Ordered list of files queued for the next batch
#[derive(Debug, Clone, Default)]
pub struct Selection {
    files: Vec<SelectedFile>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append every candidate the filter accepts, in order. Returns how many were accepted.
    pub fn add_files<I>(&mut self, filter: &VideoFilter, candidates: I) -> usize
    where
        I: IntoIterator<Item = SelectedFile>,
    {
        let before = self.files.len();
        for file in candidates {
            if filter.accepts(&file) {
                self.files.push(file);
            } else {
                debug!("Skipping non-video file: {} ({:?})", file.name, file.media_type);
            }
        }
        self.files.len() - before
    }

    /// Remove the file at `index`, shifting later files left
    pub fn remove(&mut self, index: usize) -> Result<SelectedFile> {
        if index >= self.files.len() {
            return Err(UploadError::InvalidIndex {
                index,
                len: self.files.len(),
            });
        }
        Ok(self.files.remove(index))
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }
}

/// Human readable size label, base 1024 with up to two decimals
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}
