use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::hasher;
use crate::common::config;
use crate::common::errors::Result;
use crate::fsops;

/// Directory names treated as opaque packages and never descended into
const PACKAGE_EXTENSIONS: &[&str] = &["app", "bundle", "framework", "photoslibrary"];

/// A single file within a duplicate group
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateFile {
    pub path: PathBuf,
    pub name: String,
}

/// A set of files sharing one quick-hash fingerprint.
///
/// Never materialized with fewer than two members. The first file is the
/// canonical "original" — that is filesystem enumeration order, not
/// modification time.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateGroup {
    pub hash: String,
    pub files: Vec<DuplicateFile>,
    pub file_size: u64,
}

impl DuplicateGroup {
    /// Number of redundant copies (excluding the original)
    pub fn duplicate_count(&self) -> usize {
        self.files.len().saturating_sub(1)
    }

    /// Bytes reclaimable by keeping one copy
    pub fn total_wasted(&self) -> u64 {
        self.file_size * self.duplicate_count() as u64
    }
}

/// Finds byte-identical duplicate files via size buckets then quick-hash
/// buckets. Holds only its size floor; safe to share across threads.
#[derive(Debug, Clone)]
pub struct DuplicateScanner {
    min_size: u64,
    show_progress: bool,
    excludes: Vec<String>,
}

impl DuplicateScanner {
    pub fn new(min_size: u64) -> Self {
        Self {
            min_size,
            show_progress: false,
            excludes: Vec::new(),
        }
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// User-configured paths to leave out of results
    pub fn with_excludes(mut self, excludes: Vec<String>) -> Self {
        self.excludes = excludes;
        self
    }

    /// Run the two-phase duplicate scan over one or more roots.
    ///
    /// Files from all roots land in one size-bucket map, so a duplicate
    /// pair split across Downloads and Desktop is reported as one group.
    /// Groups are sorted descending by wasted bytes.
    ///
    /// Grouping relies solely on the head+tail+size fingerprint and never
    /// performs full-content verification; see [`hasher::quick_hash`] for
    /// the documented false-positive window.
    pub fn scan(&self, roots: &[PathBuf]) -> Vec<DuplicateGroup> {
        // Pass 1: bucket by exact byte length. Buckets of one are
        // discarded before any hashing happens.
        let pb = self.spinner("Pass 1: grouping by file size...");
        let mut by_size: HashMap<u64, Vec<PathBuf>> = HashMap::new();
        for root in roots {
            for (path, len) in collect_files(root, self.min_size, &self.excludes) {
                by_size.entry(len).or_default().push(path);
            }
        }
        by_size.retain(|_, paths| paths.len() > 1);
        finish(pb, &format!("Pass 1: {} size buckets", by_size.len()));

        // Pass 2: quick-hash within each size bucket
        let pb = self.spinner("Pass 2: fingerprinting candidates...");
        let mut groups = Vec::new();
        for (size, paths) in by_size {
            let mut by_hash: HashMap<String, Vec<PathBuf>> = HashMap::new();
            for path in paths {
                match hasher::quick_hash(&path) {
                    Ok(hash) => by_hash.entry(hash).or_default().push(path),
                    Err(e) => {
                        // Unreadable files are silently excluded from
                        // duplicate consideration
                        tracing::debug!("skipping unhashable '{}': {}", path.display(), e);
                    }
                }
            }

            for (hash, files) in by_hash {
                if files.len() < 2 {
                    continue;
                }
                groups.push(DuplicateGroup {
                    hash,
                    files: files
                        .into_iter()
                        .map(|path| DuplicateFile {
                            name: file_name(&path),
                            path,
                        })
                        .collect(),
                    file_size: size,
                });
            }
        }

        groups.sort_by(|a, b| b.total_wasted().cmp(&a.total_wasted()));
        finish(pb, &format!("Found {} duplicate groups", groups.len()));
        groups
    }

    /// Scan the common user directories, merging matches across them
    pub fn scan_common(&self) -> Vec<DuplicateGroup> {
        let home = dirs::home_dir().unwrap_or_default();
        let roots: Vec<PathBuf> = ["Downloads", "Documents", "Desktop", "Pictures"]
            .iter()
            .map(|d| home.join(d))
            .filter(|p| p.exists())
            .collect();
        self.scan(&roots)
    }

    /// Total reclaimable bytes across all groups
    pub fn total_wasted_space(groups: &[DuplicateGroup]) -> u64 {
        groups.iter().map(|g| g.total_wasted()).sum()
    }

    fn spinner(&self, msg: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.set_message(msg.to_string());
        Some(pb)
    }
}

/// Trash one file out of a duplicate group and update the group list.
/// A group that would drop to a single remaining file is discarded — it
/// is no longer a duplicate set.
pub fn delete_from_group(groups: &mut Vec<DuplicateGroup>, path: &Path) -> Result<()> {
    fsops::move_to_trash(path)?;

    for group in groups.iter_mut() {
        group.files.retain(|f| f.path != path);
    }
    groups.retain(|g| g.files.len() > 1);

    Ok(())
}

/// Collect regular files at or above the size floor.
/// Hidden entries and package bundles are skipped; the minimum-size
/// filter uses exact logical length, matching the bucketing key.
fn collect_files(root: &Path, min_size: u64, excludes: &[String]) -> Vec<(PathBuf, u64)> {
    let mut files = Vec::new();

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
        if entry.file_type().is_file() {
            if config::path_is_excluded(excludes, entry.path()) {
                continue;
            }
            if let Ok(meta) = entry.metadata() {
                if meta.len() >= min_size {
                    files.push((entry.path().to_path_buf(), meta.len()));
                }
            }
        }
    }

    files
}

fn is_package(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| PACKAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn finish(pb: Option<ProgressBar>, msg: &str) {
    if let Some(pb) = pb {
        pb.finish_with_message(msg.to_string());
    }
}
