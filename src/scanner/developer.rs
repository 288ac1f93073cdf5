use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::common::config;
use crate::common::errors::{CleanerError, Result};
use crate::fsops;

/// The Docker Desktop data directory is guarded: deleting it out from
/// under the daemon corrupts images and volumes, so the engine directs
/// users to `docker system prune` instead.
const DOCKER_DATA_MARKER: &str = "com.docker.docker";

/// A known developer cache location, relative to the home directory
pub struct DevCacheLocation {
    pub name: &'static str,
    pub relative_path: &'static str,
    pub description: &'static str,
    pub safe_to_clean: bool,
}

/// Static catalog of developer tool caches worth probing
pub const KNOWN_LOCATIONS: &[DevCacheLocation] = &[
    DevCacheLocation {
        name: "npm Cache",
        relative_path: ".npm",
        description: "Node.js package manager cache",
        safe_to_clean: true,
    },
    DevCacheLocation {
        name: "Yarn Cache",
        relative_path: ".yarn/cache",
        description: "Yarn package manager cache",
        safe_to_clean: true,
    },
    DevCacheLocation {
        name: "pnpm Store",
        relative_path: ".pnpm-store",
        description: "pnpm package manager store",
        safe_to_clean: true,
    },
    DevCacheLocation {
        name: "Cargo Cache",
        relative_path: ".cargo/registry/cache",
        description: "Rust package registry cache",
        safe_to_clean: true,
    },
    DevCacheLocation {
        name: "CocoaPods Cache",
        relative_path: "Library/Caches/CocoaPods",
        description: "iOS dependency manager cache",
        safe_to_clean: true,
    },
    DevCacheLocation {
        name: "Xcode DerivedData",
        relative_path: "Library/Developer/Xcode/DerivedData",
        description: "Xcode build artifacts (safe to clean)",
        safe_to_clean: true,
    },
    DevCacheLocation {
        name: "Xcode Archives",
        relative_path: "Library/Developer/Xcode/Archives",
        description: "Xcode archived builds",
        safe_to_clean: false,
    },
    DevCacheLocation {
        name: "Gradle Cache",
        relative_path: ".gradle/caches",
        description: "Android/Java build cache",
        safe_to_clean: true,
    },
    DevCacheLocation {
        name: "Maven Repository",
        relative_path: ".m2/repository",
        description: "Maven dependencies (partial clean recommended)",
        safe_to_clean: false,
    },
    DevCacheLocation {
        name: "Homebrew Cache",
        relative_path: "Library/Caches/Homebrew",
        description: "Homebrew package downloads",
        safe_to_clean: true,
    },
    DevCacheLocation {
        name: "pip Cache",
        relative_path: "Library/Caches/pip",
        description: "Python package cache",
        safe_to_clean: true,
    },
    DevCacheLocation {
        name: "VS Code Cache",
        relative_path: "Library/Application Support/Code/Cache",
        description: "Visual Studio Code cache",
        safe_to_clean: true,
    },
    DevCacheLocation {
        name: "Android SDK Cache",
        relative_path: "Library/Android/sdk/.temp",
        description: "Android SDK temporary files",
        safe_to_clean: true,
    },
    DevCacheLocation {
        name: "Composer Cache",
        relative_path: ".composer/cache",
        description: "PHP Composer package cache",
        safe_to_clean: true,
    },
    DevCacheLocation {
        name: "Go Modules Cache",
        relative_path: "go/pkg/mod/cache",
        description: "Go modules cache",
        safe_to_clean: true,
    },
];

/// A probed developer cache: catalog entry resolved against home
#[derive(Debug, Clone, Serialize)]
pub struct DevCache {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
    pub description: String,
    pub exists: bool,
    pub safe_to_clean: bool,
}

/// Probes the known developer cache catalog and cleans entries in place
#[derive(Debug, Clone)]
pub struct DeveloperScanner {
    home: PathBuf,
    excludes: Vec<String>,
}

impl DeveloperScanner {
    pub fn new() -> Self {
        Self {
            home: dirs::home_dir().unwrap_or_default(),
            excludes: Vec::new(),
        }
    }

    /// Construct against an explicit home directory (used by tests)
    pub fn with_home(home: PathBuf) -> Self {
        Self {
            home,
            excludes: Vec::new(),
        }
    }

    /// User-configured paths to leave out of results
    pub fn with_excludes(mut self, excludes: Vec<String>) -> Self {
        self.excludes = excludes;
        self
    }

    /// Probe every catalog location, plus the Docker Desktop data
    /// directory, which is reported but never cleanable through this
    /// engine. Absent locations carry size 0. Sorted descending by size.
    pub fn scan(&self) -> Vec<DevCache> {
        let mut caches: Vec<DevCache> = KNOWN_LOCATIONS
            .iter()
            .filter_map(|loc| {
                let path = self.home.join(loc.relative_path);
                if config::path_is_excluded(&self.excludes, &path) {
                    return None;
                }
                let exists = path.exists();
                let size = if exists { fsops::allocated_size(&path) } else { 0 };
                Some(DevCache {
                    name: loc.name.to_string(),
                    path,
                    size,
                    description: loc.description.to_string(),
                    exists,
                    safe_to_clean: loc.safe_to_clean,
                })
            })
            .collect();

        let docker_data = self
            .home
            .join("Library/Containers")
            .join(DOCKER_DATA_MARKER)
            .join("Data");
        if docker_data.exists() && !config::path_is_excluded(&self.excludes, &docker_data) {
            caches.push(DevCache {
                name: "Docker Desktop".to_string(),
                size: fsops::allocated_size(&docker_data),
                path: docker_data,
                description: "Docker Desktop data (use 'docker system prune' to clean)"
                    .to_string(),
                exists: true,
                safe_to_clean: false,
            });
        }

        caches.sort_by(|a, b| b.size.cmp(&a.size));
        caches
    }

    /// Remove a cache directory's immediate children, keeping the
    /// directory itself so the owning tool can repopulate it. Returns the
    /// pre-clean size.
    ///
    /// Unlike deletes, a missing path here is an error: there is no freed
    /// size to report for something that was already gone.
    pub fn clean_cache(&self, path: &Path) -> Result<u64> {
        // A vanished path reports as not-found even for guarded locations
        if !path.exists() {
            return Err(CleanerError::PathNotFound {
                path: path.to_path_buf(),
            });
        }

        if path.to_string_lossy().contains(DOCKER_DATA_MARKER) {
            return Err(CleanerError::OperationNotAllowed {
                path: path.to_path_buf(),
                hint: "use 'docker system prune' or the Docker Desktop UI instead".into(),
            });
        }

        let size_before = fsops::allocated_size(path);

        let read_dir = std::fs::read_dir(path).map_err(|e| CleanerError::from_io(path, e))?;
        for entry in read_dir.filter_map(|e| e.ok()) {
            fsops::permanently_delete(&entry.path())?;
        }

        Ok(size_before)
    }

    /// Total size of all caches that exist on disk
    pub fn total_size(&self) -> u64 {
        self.scan().iter().filter(|c| c.exists).map(|c| c.size).sum()
    }

    /// Heuristic: does this machine look like a developer workstation?
    pub fn is_developer_environment_detected(&self) -> bool {
        let indicators = [
            self.home.join(".npm"),
            self.home.join(".cargo"),
            self.home.join(".gradle"),
            self.home.join("Library/Developer/Xcode"),
            self.home.join(".gitconfig"),
            PathBuf::from("/Applications/Xcode.app"),
            PathBuf::from("/Applications/Visual Studio Code.app"),
        ];

        indicators.iter().any(|p| p.exists())
    }
}

impl Default for DeveloperScanner {
    fn default() -> Self {
        Self::new()
    }
}
