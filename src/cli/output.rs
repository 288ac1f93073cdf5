use colored::*;

use crate::common::format::{
    format_count, format_duration, format_path, format_size, format_size_colored, truncate,
};
use crate::duplicates::DuplicateGroup;
use crate::scanner::{CacheEntry, DevCache, LargeFile, OrphanFile, QuickScanReport};

/// Print anything serializable as pretty JSON
pub fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("JSON encoding failed: {}", e),
    }
}

pub fn print_caches(entries: &[CacheEntry]) {
    if entries.is_empty() {
        println!("{}", "No cache entries found.".dimmed());
        return;
    }

    println!();
    println!("{}", "Cache Directories".bold().underline());
    println!();

    for entry in entries {
        let safety = if entry.is_safe_to_delete {
            "safe".green()
        } else {
            "unsafe".red()
        };
        println!(
            "  {:>10}  {:<12} {:<8} {}",
            format_size_colored(entry.size),
            entry.cache_type.to_string().cyan(),
            safety,
            format_path(&entry.path)
        );
    }

    let total: u64 = entries.iter().map(|e| e.size).sum();
    println!();
    println!(
        "  {} across {}",
        format_size(total).bold(),
        format_count(entries.len())
    );
}

pub fn print_dev_caches(caches: &[DevCache]) {
    println!();
    println!("{}", "Developer Caches".bold().underline());
    println!();

    for cache in caches {
        if !cache.exists {
            continue;
        }
        let flag = if cache.safe_to_clean {
            "cleanable".green()
        } else {
            "guarded".yellow()
        };
        println!(
            "  {:>10}  {:<20} {:<10} {}",
            format_size_colored(cache.size),
            cache.name,
            flag,
            cache.description.dimmed()
        );
    }

    let total: u64 = caches.iter().filter(|c| c.exists).map(|c| c.size).sum();
    println!();
    println!("  {} total", format_size(total).bold());
}

pub fn print_orphans(orphans: &[OrphanFile]) {
    if orphans.is_empty() {
        println!("{}", "No orphaned app files found.".dimmed());
        return;
    }

    println!();
    println!("{}", "Orphaned App Files".bold().underline());
    println!();

    for orphan in orphans {
        println!(
            "  {:>10}  {:<22} {:<20} {}",
            format_size_colored(orphan.size),
            orphan.orphan_type.to_string().cyan(),
            truncate(&orphan.possible_app_name, 20),
            format_path(&orphan.path).dimmed()
        );
    }

    let total: u64 = orphans.iter().map(|o| o.size).sum();
    println!();
    println!(
        "  {} across {}",
        format_size(total).bold(),
        format_count(orphans.len())
    );
}

pub fn print_large_files(files: &[LargeFile]) {
    if files.is_empty() {
        println!("{}", "No large files found.".dimmed());
        return;
    }

    println!();
    println!("{}", "Large Files".bold().underline());
    println!();

    for file in files {
        println!(
            "  {:>10}  {:<10} {}",
            format_size_colored(file.size),
            file.category.to_string().cyan(),
            format_path(&file.path)
        );
    }

    let total: u64 = files.iter().map(|f| f.size).sum();
    println!();
    println!(
        "  {} across {}",
        format_size(total).bold(),
        format_count(files.len())
    );
}

pub fn print_duplicate_groups(groups: &[DuplicateGroup], detailed: bool) {
    if groups.is_empty() {
        println!("{}", "No duplicates found.".dimmed());
        return;
    }

    println!();
    println!("{}", "Duplicate Groups".bold().underline());
    println!();

    for (i, group) in groups.iter().enumerate() {
        println!(
            "  {} {} copies of {} each — {} wasted",
            format!("#{}", i + 1).bold(),
            group.files.len(),
            format_size(group.file_size),
            format_size_colored(group.total_wasted())
        );
        if detailed {
            for (j, file) in group.files.iter().enumerate() {
                let marker = if j == 0 { "keep " } else { "dup  " };
                let marker = if j == 0 { marker.green() } else { marker.yellow() };
                println!("      {} {}", marker, format_path(&file.path));
            }
        }
    }

    let wasted: u64 = groups.iter().map(|g| g.total_wasted()).sum();
    println!();
    println!(
        "  {} reclaimable across {} groups",
        format_size(wasted).bold(),
        groups.len()
    );
}

pub fn print_quick_report(report: &QuickScanReport) {
    println!();
    println!("{}", "QuickClean Scan".bold().underline());
    println!();

    if let Some(disk) = &report.disk {
        println!(
            "  Disk: {} used of {} ({:.0}%)",
            format_size(disk.used_bytes),
            format_size(disk.total_bytes),
            disk.used_percentage()
        );
        println!();
    }

    print_summary_line("Caches", report.total_cache_size(), report.caches.len());
    print_summary_line(
        "Developer caches",
        report.total_dev_size(),
        report.dev_caches.iter().filter(|c| c.exists).count(),
    );
    print_summary_line("App leftovers", report.total_orphan_size(), report.orphans.len());
    print_summary_line("Large files", report.total_large_size(), report.large_files.len());
    print_summary_line(
        "Duplicate waste",
        report.total_duplicate_waste(),
        report.duplicate_groups.len(),
    );

    println!();
    println!(
        "  {} potentially reclaimable (scanned in {})",
        format_size(report.total_reclaimable()).bold().green(),
        format_duration(report.duration_secs)
    );
}

fn print_summary_line(label: &str, size: u64, count: usize) {
    println!(
        "  {:>10}  {:<18} {}",
        format_size_colored(size),
        label,
        format!("({})", count).dimmed()
    );
}
