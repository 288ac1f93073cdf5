use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::common::config;
use crate::common::errors::Result;
use crate::fsops;

/// Which leftover-prone location an orphan was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrphanType {
    AppSupport,
    Preferences,
    Containers,
    Caches,
    Logs,
    Other,
}

impl std::fmt::Display for OrphanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrphanType::AppSupport => write!(f, "Application Support"),
            OrphanType::Preferences => write!(f, "Preferences"),
            OrphanType::Containers => write!(f, "Containers"),
            OrphanType::Caches => write!(f, "Caches"),
            OrphanType::Logs => write!(f, "Logs"),
            OrphanType::Other => write!(f, "Other"),
        }
    }
}

/// A leftover support/preference/cache item whose owning application no
/// longer appears to be installed
#[derive(Debug, Clone, Serialize)]
pub struct OrphanFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub orphan_type: OrphanType,
    pub possible_app_name: String,
}

/// Leftover-prone locations under the user's Library
const LEFTOVER_LOCATIONS: &[(&str, OrphanType)] = &[
    ("Library/Application Support", OrphanType::AppSupport),
    ("Library/Preferences", OrphanType::Preferences),
    ("Library/Containers", OrphanType::Containers),
    ("Library/Caches", OrphanType::Caches),
    ("Library/Logs", OrphanType::Logs),
];

/// Vendor/system prefixes whose items are never orphans
const SYSTEM_PREFIXES: &[&str] = &["com.apple.", "Apple", ".", "System"];

/// Known system folder names (matched as substrings, case-sensitive)
const SYSTEM_NAMES: &[&str] = &["CloudDocs", "Mobile Documents", "Ubiquity", "CoreData", "GameKit"];

/// Detects leftover files from uninstalled applications.
///
/// Two-stage pipeline with no persisted state: build the installed-app
/// name registry, then match leftover names against it. The match is a
/// deliberately permissive bidirectional substring test — missing a real
/// orphan is cheaper than falsely accusing an installed app's data.
#[derive(Debug, Clone)]
pub struct OrphanScanner {
    home: PathBuf,
    app_dirs: Vec<PathBuf>,
    excludes: Vec<String>,
}

impl OrphanScanner {
    pub fn new() -> Self {
        let home = dirs::home_dir().unwrap_or_default();
        let app_dirs = vec![PathBuf::from("/Applications"), home.join("Applications")];
        Self {
            home,
            app_dirs,
            excludes: Vec::new(),
        }
    }

    /// Construct against explicit roots (used by tests)
    pub fn with_roots(home: PathBuf, app_dirs: Vec<PathBuf>) -> Self {
        Self {
            home,
            app_dirs,
            excludes: Vec::new(),
        }
    }

    /// User-configured paths to leave out of results
    pub fn with_excludes(mut self, excludes: Vec<String>) -> Self {
        self.excludes = excludes;
        self
    }

    /// Stage 1: collect lower-cased names of every installed application
    /// bundle, plus the last dot-segment of each readable bundle
    /// identifier. Unreadable install directories contribute nothing.
    pub fn installed_apps(&self) -> HashSet<String> {
        let mut names = HashSet::new();

        for dir in &self.app_dirs {
            let read_dir = match std::fs::read_dir(dir) {
                Ok(rd) => rd,
                Err(e) => {
                    tracing::debug!("app dir '{}' unreadable: {}", dir.display(), e);
                    continue;
                }
            };

            for entry in read_dir.filter_map(|e| e.ok()) {
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) != Some("app") {
                    continue;
                }

                if let Some(stem) = path.file_stem() {
                    names.insert(stem.to_string_lossy().to_lowercase());
                }

                if let Some(bundle_id) = read_bundle_id(&path) {
                    if let Some(last) = bundle_id.rsplit('.').next() {
                        names.insert(last.to_lowercase());
                    }
                }
            }
        }

        names
    }

    /// Stage 2: scan the leftover-prone locations for items not matching
    /// any installed application. Sorted descending by size.
    pub fn scan(&self) -> Vec<OrphanFile> {
        let installed = self.installed_apps();
        let mut orphans = Vec::new();

        for (relative, orphan_type) in LEFTOVER_LOCATIONS {
            let location = self.home.join(relative);
            let read_dir = match std::fs::read_dir(&location) {
                Ok(rd) => rd,
                Err(e) => {
                    tracing::debug!("leftover dir '{}' unreadable: {}", location.display(), e);
                    continue;
                }
            };

            for entry in read_dir.filter_map(|e| e.ok()) {
                let name = entry.file_name().to_string_lossy().to_string();

                if is_system_item(&name) {
                    continue;
                }

                let normalized = normalize_name(&name);
                if installed
                    .iter()
                    .any(|app| normalized.contains(app.as_str()) || app.contains(&normalized))
                {
                    continue;
                }

                let path = entry.path();
                if config::path_is_excluded(&self.excludes, &path) {
                    continue;
                }
                orphans.push(OrphanFile {
                    size: fsops::allocated_size(&path),
                    name: name.clone(),
                    orphan_type: *orphan_type,
                    possible_app_name: extract_app_name(&name),
                    path,
                });
            }
        }

        orphans.sort_by(|a, b| b.size.cmp(&a.size));
        orphans
    }

    /// Move an orphan to the trash
    pub fn delete_orphan(&self, path: &Path) -> Result<()> {
        fsops::move_to_trash(path)
    }
}

impl Default for OrphanScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Read CFBundleIdentifier from an application bundle's Info.plist
fn read_bundle_id(app_path: &Path) -> Option<String> {
    let info_plist = app_path.join("Contents/Info.plist");
    let value = plist::Value::from_file(&info_plist).ok()?;
    value
        .as_dictionary()?
        .get("CFBundleIdentifier")?
        .as_string()
        .map(|s| s.to_string())
}

/// System and vendor items are excluded before any matching happens
pub fn is_system_item(name: &str) -> bool {
    let lower = name.to_lowercase();
    for prefix in SYSTEM_PREFIXES {
        if name.starts_with(prefix) || lower.starts_with(&prefix.to_lowercase()) {
            return true;
        }
    }
    SYSTEM_NAMES.iter().any(|s| name.contains(s))
}

/// Normalize a leftover item name for registry matching: lower-case,
/// reduce a reverse-domain identifier to its final segment, strip
/// version/number tokens and separators, trim whitespace.
pub fn normalize_name(name: &str) -> String {
    let mut normalized = name.to_lowercase();

    if normalized.starts_with("com.") {
        if let Some(last) = normalized.rsplit('.').next() {
            normalized = last.to_string();
        }
    }

    normalized
        .chars()
        .filter(|c| !c.is_ascii_digit() && !matches!(c, '.' | '_' | '-'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Best-effort human-readable app name from a folder or bundle-id name
pub fn extract_app_name(name: &str) -> String {
    let mut app_name = name.to_string();

    if name.starts_with("com.") || name.starts_with("org.") || name.starts_with("net.") {
        let components: Vec<&str> = name.split('.').collect();
        if components.len() >= 3 {
            app_name = components[2..].join(" ");
        } else if let Some(last) = components.last() {
            app_name = last.to_string();
        }
    }

    title_case(&app_name)
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_items_excluded() {
        assert!(is_system_item("com.apple.Safari"));
        assert!(is_system_item("Apple Music"));
        assert!(is_system_item(".DS_Store"));
        assert!(is_system_item("SystemConfiguration"));
        assert!(is_system_item("Mobile Documents"));
        assert!(!is_system_item("com.spotify.client"));
    }

    #[test]
    fn test_normalize_reverse_domain() {
        assert_eq!(normalize_name("com.tinyspeck.slackmacgap"), "slackmacgap");
        assert_eq!(normalize_name("com.spotify.client"), "client");
    }

    #[test]
    fn test_normalize_strips_versions() {
        assert_eq!(normalize_name("MyApp 2.0"), "myapp");
        assert_eq!(normalize_name("tool_v3-beta"), "toolvbeta");
    }

    #[test]
    fn test_extract_app_name() {
        assert_eq!(extract_app_name("com.company.coolapp"), "Coolapp");
        assert_eq!(extract_app_name("slack helper"), "Slack Helper");
    }
}
