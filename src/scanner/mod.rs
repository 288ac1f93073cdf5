pub mod cache;
pub mod developer;
pub mod large;
pub mod orphan;

pub use cache::{CacheEntry, CacheScanner, CacheType};
pub use developer::{DevCache, DeveloperScanner};
pub use large::{FileCategory, LargeFile, LargeFileScanner};
pub use orphan::{OrphanFile, OrphanScanner, OrphanType};

use serde::Serialize;
use std::time::Instant;

use crate::common::config::Config;
use crate::common::disk::{self, DiskUsage};
use crate::duplicates::{DuplicateGroup, DuplicateScanner};

/// Aggregated results of running all five scanners
#[derive(Debug, Serialize)]
pub struct QuickScanReport {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub duration_secs: f64,
    pub disk: Option<DiskUsage>,
    pub caches: Vec<CacheEntry>,
    pub dev_caches: Vec<DevCache>,
    pub orphans: Vec<OrphanFile>,
    pub large_files: Vec<LargeFile>,
    pub duplicate_groups: Vec<DuplicateGroup>,
}

impl QuickScanReport {
    pub fn total_cache_size(&self) -> u64 {
        self.caches.iter().map(|c| c.size).sum()
    }

    pub fn total_dev_size(&self) -> u64 {
        self.dev_caches.iter().filter(|c| c.exists).map(|c| c.size).sum()
    }

    pub fn total_orphan_size(&self) -> u64 {
        self.orphans.iter().map(|o| o.size).sum()
    }

    pub fn total_large_size(&self) -> u64 {
        self.large_files.iter().map(|f| f.size).sum()
    }

    pub fn total_duplicate_waste(&self) -> u64 {
        DuplicateScanner::total_wasted_space(&self.duplicate_groups)
    }

    /// Everything the engine flagged, summed
    pub fn total_reclaimable(&self) -> u64 {
        self.total_cache_size()
            + self.total_dev_size()
            + self.total_orphan_size()
            + self.total_large_size()
            + self.total_duplicate_waste()
    }
}

/// Run all five scanners in parallel and aggregate their results.
///
/// Structured fan-out: each branch fills its own slot and the report is
/// assembled only after every branch has finished. The scanners share no
/// mutable state; size accounting and hashing are stateless, so no
/// coordination is needed. There is no cancellation — a scan over a very
/// large tree runs to completion.
pub fn quick_scan(config: &Config) -> QuickScanReport {
    let start = Instant::now();

    let mut caches = Vec::new();
    let mut dev_caches = Vec::new();
    let mut orphans = Vec::new();
    let mut large_files = Vec::new();
    let mut duplicate_groups = Vec::new();

    let large_min = config.large_file_threshold_bytes();
    let dup_min = config.duplicate_min_bytes();
    let excludes = &config.exclude_paths;

    rayon::scope(|s| {
        s.spawn(|_| {
            caches = CacheScanner::new()
                .with_excludes(excludes.clone())
                .scan_all()
        });
        s.spawn(|_| {
            dev_caches = DeveloperScanner::new()
                .with_excludes(excludes.clone())
                .scan()
        });
        s.spawn(|_| {
            orphans = OrphanScanner::new()
                .with_excludes(excludes.clone())
                .scan()
        });
        s.spawn(|_| {
            large_files = LargeFileScanner::new()
                .with_excludes(excludes.clone())
                .scan_common(large_min)
        });
        s.spawn(|_| {
            duplicate_groups = DuplicateScanner::new(dup_min)
                .with_excludes(excludes.clone())
                .scan_common()
        });
    });

    let report = QuickScanReport {
        timestamp: chrono::Utc::now(),
        duration_secs: start.elapsed().as_secs_f64(),
        disk: disk::disk_usage(),
        caches,
        dev_caches,
        orphans,
        large_files,
        duplicate_groups,
    };

    tracing::info!(
        duration_secs = report.duration_secs,
        total_reclaimable = report.total_reclaimable(),
        "quick scan complete"
    );

    report
}
