use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::common::config;
use crate::common::errors::Result;
use crate::fsops;

/// Classification of a cache directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheType {
    Browser,
    System,
    Application,
    Developer,
    Unknown,
}

impl std::fmt::Display for CacheType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheType::Browser => write!(f, "Browser"),
            CacheType::System => write!(f, "System"),
            CacheType::Application => write!(f, "Application"),
            CacheType::Developer => write!(f, "Developer"),
            CacheType::Unknown => write!(f, "Unknown"),
        }
    }
}

/// One top-level item inside a caches directory.
/// Rebuilt from scratch on every scan; no diffing against prior results.
#[derive(Debug, Clone, Serialize)]
pub struct CacheEntry {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub cache_type: CacheType,
    pub is_developer_related: bool,
    pub is_safe_to_delete: bool,
    pub description: String,
}

const BROWSER_KEYWORDS: &[&str] = &[
    "safari", "chrome", "firefox", "edge", "brave", "opera", "webkit",
];

/// Keywords that make a cache classify as Developer
const DEV_TYPE_KEYWORDS: &[&str] = &[
    "xcode", "npm", "cargo", "gradle", "cocoapods", "homebrew", "pip", "composer",
];

/// Broader list for the developer-related flag; a superset of the
/// classification keywords
const DEV_KEYWORDS: &[&str] = &[
    "xcode", "npm", "cargo", "gradle", "cocoapods", "homebrew", "pip", "composer", "maven",
    "android", "llvm", "clang", "swift",
];

/// Names that indicate a cache the system depends on
const UNSAFE_KEYWORDS: &[&str] = &["apple", "system", "kernel"];

/// Enumerates and classifies the user and system cache roots.
/// Directory discovery stops at depth 1; sizes are computed recursively
/// per item.
#[derive(Debug, Clone)]
pub struct CacheScanner {
    user_root: PathBuf,
    system_root: PathBuf,
    excludes: Vec<String>,
}

impl CacheScanner {
    pub fn new() -> Self {
        let home = dirs::home_dir().unwrap_or_default();
        Self {
            user_root: home.join("Library/Caches"),
            system_root: PathBuf::from("/Library/Caches"),
            excludes: Vec::new(),
        }
    }

    /// Construct against explicit roots (used by tests)
    pub fn with_roots(user_root: PathBuf, system_root: PathBuf) -> Self {
        Self {
            user_root,
            system_root,
            excludes: Vec::new(),
        }
    }

    /// User-configured paths to leave out of results
    pub fn with_excludes(mut self, excludes: Vec<String>) -> Self {
        self.excludes = excludes;
        self
    }

    /// Scan the per-user caches directory
    pub fn scan_user_caches(&self) -> Vec<CacheEntry> {
        scan_cache_directory(&self.user_root, false, &self.excludes)
    }

    /// Scan the system-wide caches directory
    pub fn scan_system_caches(&self) -> Vec<CacheEntry> {
        scan_cache_directory(&self.system_root, true, &self.excludes)
    }

    /// Scan both roots, sorted descending by size
    pub fn scan_all(&self) -> Vec<CacheEntry> {
        let mut entries = self.scan_user_caches();
        entries.extend(self.scan_system_caches());
        entries.sort_by(|a, b| b.size.cmp(&a.size));
        entries
    }

    /// Move a cache entry to the trash
    pub fn delete_cache(&self, path: &Path) -> Result<()> {
        fsops::move_to_trash(path)
    }
}

impl Default for CacheScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Total size across a set of entries
pub fn total_size(entries: &[CacheEntry]) -> u64 {
    entries.iter().map(|e| e.size).sum()
}

fn scan_cache_directory(root: &Path, is_system: bool, excludes: &[String]) -> Vec<CacheEntry> {
    let read_dir = match std::fs::read_dir(root) {
        Ok(rd) => rd,
        Err(e) => {
            // Unreadable root degrades to an empty contribution
            tracing::debug!("cache root '{}' unreadable: {}", root.display(), e);
            return Vec::new();
        }
    };

    let mut entries = Vec::new();

    for item in read_dir.filter_map(|e| e.ok()) {
        let name = item.file_name().to_string_lossy().to_string();
        if name.starts_with('.') {
            continue;
        }

        let path = item.path();
        if config::path_is_excluded(excludes, &path) {
            continue;
        }
        let size = fsops::allocated_size(&path);
        let cache_type = classify(&name, is_system);

        entries.push(CacheEntry {
            name: name.clone(),
            size,
            cache_type,
            is_developer_related: is_developer_cache(&name),
            is_safe_to_delete: is_safe_to_delete(&name),
            description: describe(cache_type).to_string(),
            path,
        });
    }

    entries.sort_by(|a, b| b.size.cmp(&a.size));
    entries
}

fn classify(name: &str, is_system: bool) -> CacheType {
    let lower = name.to_lowercase();

    if BROWSER_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return CacheType::Browser;
    }
    if DEV_TYPE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return CacheType::Developer;
    }
    if is_system {
        CacheType::System
    } else {
        CacheType::Application
    }
}

fn is_developer_cache(name: &str) -> bool {
    let lower = name.to_lowercase();
    DEV_KEYWORDS.iter().any(|k| lower.contains(k))
}

fn is_safe_to_delete(name: &str) -> bool {
    let lower = name.to_lowercase();
    !UNSAFE_KEYWORDS.iter().any(|k| lower.contains(k))
}

fn describe(cache_type: CacheType) -> &'static str {
    match cache_type {
        CacheType::Browser => "Browser cache and temporary files",
        CacheType::System => "System cache files",
        CacheType::Developer => "Developer tool cache",
        CacheType::Application => "Application cache files",
        CacheType::Unknown => "Cache files",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_browser() {
        assert_eq!(classify("com.google.Chrome", false), CacheType::Browser);
        assert_eq!(classify("Firefox", false), CacheType::Browser);
        assert_eq!(classify("WebKitCache", true), CacheType::Browser);
    }

    #[test]
    fn test_classify_developer() {
        assert_eq!(classify("Homebrew", false), CacheType::Developer);
        assert_eq!(classify("org.cocoapods.pods", false), CacheType::Developer);
    }

    #[test]
    fn test_developer_flag_is_broader_than_type() {
        // Names on the extended list get the flag but classify by root
        for name in ["maven-repo", "AndroidStudio", "llvm-cache", "org.swift.swiftpm"] {
            assert!(is_developer_cache(name), "{} should be dev-related", name);
            assert_eq!(classify(name, false), CacheType::Application);
        }
    }

    #[test]
    fn test_classify_falls_back_by_root() {
        assert_eq!(classify("SomeRandomApp", true), CacheType::System);
        assert_eq!(classify("SomeRandomApp", false), CacheType::Application);
    }

    #[test]
    fn test_unsafe_names() {
        assert!(!is_safe_to_delete("com.apple.Safari"));
        assert!(!is_safe_to_delete("SystemStats"));
        assert!(!is_safe_to_delete("kernel_task_cache"));
        assert!(is_safe_to_delete("com.spotify.client"));
    }
}
