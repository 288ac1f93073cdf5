use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::common::config;
use crate::common::errors::Result;
use crate::fsops;

/// Category derived from a file's extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileCategory {
    Video,
    Image,
    Audio,
    Archive,
    Document,
    Application,
    DiskImage,
    Other,
}

impl std::fmt::Display for FileCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileCategory::Video => write!(f, "Video"),
            FileCategory::Image => write!(f, "Image"),
            FileCategory::Audio => write!(f, "Audio"),
            FileCategory::Archive => write!(f, "Archive"),
            FileCategory::Document => write!(f, "Document"),
            FileCategory::Application => write!(f, "Application"),
            FileCategory::DiskImage => write!(f, "Disk Image"),
            FileCategory::Other => write!(f, "Other"),
        }
    }
}

impl std::str::FromStr for FileCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "video" => Ok(FileCategory::Video),
            "image" => Ok(FileCategory::Image),
            "audio" => Ok(FileCategory::Audio),
            "archive" => Ok(FileCategory::Archive),
            "document" => Ok(FileCategory::Document),
            "application" => Ok(FileCategory::Application),
            "diskimage" | "disk-image" => Ok(FileCategory::DiskImage),
            "other" => Ok(FileCategory::Other),
            _ => Err(format!("unknown category: {}", s)),
        }
    }
}

impl FileCategory {
    /// Map a file extension to its category. Total: every extension maps
    /// to exactly one category; anything unrecognized is Other.
    pub fn from_extension(ext: &str) -> FileCategory {
        match ext.to_lowercase().as_str() {
            "mp4" | "mov" | "avi" | "mkv" | "wmv" | "flv" | "webm" | "m4v" => FileCategory::Video,
            "jpg" | "jpeg" | "png" | "gif" | "bmp" | "tiff" | "heic" | "webp" | "raw" | "psd" => {
                FileCategory::Image
            }
            "mp3" | "wav" | "aac" | "flac" | "m4a" | "ogg" | "wma" => FileCategory::Audio,
            "zip" | "rar" | "7z" | "tar" | "gz" | "bz2" | "xz" => FileCategory::Archive,
            "pdf" | "doc" | "docx" | "xls" | "xlsx" | "ppt" | "pptx" | "txt" | "rtf" => {
                FileCategory::Document
            }
            "app" | "pkg" | "ipa" => FileCategory::Application,
            "dmg" | "iso" | "img" => FileCategory::DiskImage,
            _ => FileCategory::Other,
        }
    }
}

/// A regular file at or above the size threshold
#[derive(Debug, Clone, Serialize)]
pub struct LargeFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub category: FileCategory,
    pub last_modified: Option<DateTime<Utc>>,
    pub extension: String,
}

/// Directory extensions treated as opaque packages
const PACKAGE_EXTENSIONS: &[&str] = &["app", "bundle", "framework", "photoslibrary"];

/// Finds oversized files and classifies them by extension
#[derive(Debug, Clone, Default)]
pub struct LargeFileScanner {
    excludes: Vec<String>,
}

impl LargeFileScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// User-configured paths to leave out of results
    pub fn with_excludes(mut self, excludes: Vec<String>) -> Self {
        self.excludes = excludes;
        self
    }

    /// Recursively enumerate `root` for regular files at or above
    /// `min_size`, optionally restricted to an allow-list of categories.
    /// Hidden files and package bundles are skipped. Sorted descending.
    pub fn scan(
        &self,
        root: &Path,
        min_size: u64,
        categories: Option<&[FileCategory]>,
    ) -> Vec<LargeFile> {
        let mut results = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| {
                if e.depth() == 0 {
                    return true;
                }
                let name = e.file_name().to_string_lossy();
                if name.starts_with('.') {
                    return false;
                }
                !(e.file_type().is_dir() && is_package(e.path()))
            })
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }

            let meta = match entry.metadata() {
                Ok(m) => m,
                Err(_) => continue,
            };

            let size = file_size(&meta);
            if size < min_size {
                continue;
            }

            let path = entry.path();
            if config::path_is_excluded(&self.excludes, path) {
                continue;
            }
            let extension = path
                .extension()
                .map(|e| e.to_string_lossy().to_string())
                .unwrap_or_default();
            let category = FileCategory::from_extension(&extension);

            if let Some(allowed) = categories {
                if !allowed.contains(&category) {
                    continue;
                }
            }

            results.push(LargeFile {
                path: path.to_path_buf(),
                name: entry.file_name().to_string_lossy().to_string(),
                size,
                category,
                last_modified: meta.modified().ok().map(DateTime::from),
                extension,
            });
        }

        results.sort_by(|a, b| b.size.cmp(&a.size));
        results
    }

    /// Union scan across the common user directories
    pub fn scan_common(&self, min_size: u64) -> Vec<LargeFile> {
        let home = dirs::home_dir().unwrap_or_default();
        let mut all = Vec::new();

        for dir in ["Downloads", "Documents", "Desktop", "Movies", "Music", "Pictures"] {
            let root = home.join(dir);
            if root.exists() {
                all.extend(self.scan(&root, min_size, None));
            }
        }

        all.sort_by(|a, b| b.size.cmp(&a.size));
        all
    }

    /// Move a large file to the trash
    pub fn delete_file(&self, path: &Path) -> Result<()> {
        fsops::move_to_trash(path)
    }
}

#[cfg(unix)]
fn file_size(meta: &std::fs::Metadata) -> u64 {
    use std::os::unix::fs::MetadataExt;
    meta.blocks() * 512
}

#[cfg(not(unix))]
fn file_size(meta: &std::fs::Metadata) -> u64 {
    meta.len()
}

fn is_package(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| PACKAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_table_is_total() {
        assert_eq!(FileCategory::from_extension("mp4"), FileCategory::Video);
        assert_eq!(FileCategory::from_extension("MOV"), FileCategory::Video);
        assert_eq!(FileCategory::from_extension("jpeg"), FileCategory::Image);
        assert_eq!(FileCategory::from_extension("FLAC"), FileCategory::Audio);
        assert_eq!(FileCategory::from_extension("tar"), FileCategory::Archive);
        assert_eq!(FileCategory::from_extension("PDF"), FileCategory::Document);
        assert_eq!(FileCategory::from_extension("pkg"), FileCategory::Application);
        assert_eq!(FileCategory::from_extension("dmg"), FileCategory::DiskImage);
        assert_eq!(FileCategory::from_extension("xyz"), FileCategory::Other);
        assert_eq!(FileCategory::from_extension(""), FileCategory::Other);
    }

    #[test]
    fn test_category_case_insensitive() {
        for ext in ["zip", "ZIP", "Zip"] {
            assert_eq!(FileCategory::from_extension(ext), FileCategory::Archive);
        }
    }
}
