use std::io;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use colored::*;

use quickclean::cli::args::{Cli, Commands, CompletionShell, ConfigAction, OutputFormat};
use quickclean::cli::output;
use quickclean::common::config::{Config, OutputFormat as ConfigFormat};
use quickclean::common::format::format_size;
use quickclean::duplicates::DuplicateScanner;
use quickclean::fsops;
use quickclean::scanner::{
    CacheScanner, DeveloperScanner, FileCategory, LargeFileScanner, OrphanScanner,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    init_logging(cli.verbose, cli.quiet);

    let config = Config::load().unwrap_or_default();
    let json = wants_json(cli.format.as_ref(), &config);
    let show_progress = !cli.quiet && !json;
    let excludes = config.exclude_paths.clone();

    match cli.command {
        Commands::Quick => {
            let report = quickclean::scanner::quick_scan(&config);
            if json {
                output::print_json(&report);
            } else {
                output::print_quick_report(&report);
            }
        }

        Commands::Caches { system } => {
            let scanner = CacheScanner::new().with_excludes(excludes);
            let entries = if system {
                scanner.scan_all()
            } else {
                scanner.scan_user_caches()
            };
            if json {
                output::print_json(&entries);
            } else {
                output::print_caches(&entries);
            }
        }

        Commands::Dev => {
            let scanner = DeveloperScanner::new().with_excludes(excludes);
            let caches = scanner.scan();
            if json {
                output::print_json(&caches);
            } else {
                output::print_dev_caches(&caches);
            }
        }

        Commands::Orphans => {
            let scanner = OrphanScanner::new().with_excludes(excludes);
            let orphans = scanner.scan();
            if json {
                output::print_json(&orphans);
            } else {
                output::print_orphans(&orphans);
            }
        }

        Commands::Large {
            path,
            min_size,
            categories,
        } => {
            let min_bytes = min_size
                .map(|mb| mb * 1024 * 1024)
                .unwrap_or_else(|| config.large_file_threshold_bytes());
            let categories = parse_categories(categories.as_deref())?;
            let scanner = LargeFileScanner::new().with_excludes(excludes);
            let files = match path {
                Some(root) => scanner.scan(&root, min_bytes, categories.as_deref()),
                None => scanner.scan_common(min_bytes),
            };
            if json {
                output::print_json(&files);
            } else {
                output::print_large_files(&files);
            }
        }

        Commands::Dup {
            paths,
            min_size,
            detailed,
        } => {
            let min_bytes = min_size
                .map(|mb| mb * 1024 * 1024)
                .unwrap_or_else(|| config.duplicate_min_bytes());
            let scanner = DuplicateScanner::new(min_bytes)
                .with_progress(show_progress)
                .with_excludes(excludes);
            let groups = if paths.is_empty() {
                scanner.scan_common()
            } else {
                scanner.scan(&paths)
            };
            if json {
                output::print_json(&groups);
            } else {
                output::print_duplicate_groups(&groups, detailed);
            }
        }

        Commands::Clean { path } => {
            let scanner = DeveloperScanner::new();
            let freed = scanner
                .clean_cache(&path)
                .with_context(|| format!("failed to clean {}", path.display()))?;
            println!("Freed {} from {}", format_size(freed).bold(), path.display());
        }

        Commands::Delete { path, permanent } => {
            if permanent {
                fsops::permanently_delete(&path)
                    .with_context(|| format!("failed to delete {}", path.display()))?;
                println!("Deleted {}", path.display());
            } else {
                fsops::move_to_trash(&path)
                    .with_context(|| format!("failed to trash {}", path.display()))?;
                println!("Moved {} to trash", path.display());
            }
        }

        Commands::Reveal { path } => {
            fsops::reveal(&path);
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                if json {
                    output::print_json(&config);
                } else {
                    let rendered =
                        toml::to_string_pretty(&config).context("failed to render config")?;
                    print!("{}", rendered);
                }
            }
            ConfigAction::Init => {
                config.save().context("failed to write config file")?;
                println!("Wrote {}", Config::config_path().display());
            }
        },

        Commands::Completions { shell } => {
            let shell = match shell {
                CompletionShell::Bash => Shell::Bash,
                CompletionShell::Zsh => Shell::Zsh,
                CompletionShell::Fish => Shell::Fish,
            };
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "quickclean", &mut io::stdout());
        }
    }

    Ok(())
}

fn init_logging(verbose: bool, quiet: bool) {
    let default = if verbose {
        "quickclean=debug"
    } else if quiet {
        "quickclean=error"
    } else {
        "quickclean=warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// The --format flag wins; otherwise the configured preference applies
fn wants_json(flag: Option<&OutputFormat>, config: &Config) -> bool {
    match flag {
        Some(format) => *format == OutputFormat::Json,
        None => config.output_format == ConfigFormat::Json,
    }
}

fn parse_categories(names: Option<&[String]>) -> Result<Option<Vec<FileCategory>>> {
    let Some(names) = names else {
        return Ok(None);
    };
    let mut out = Vec::with_capacity(names.len());
    for name in names {
        let cat: FileCategory = name
            .parse()
            .map_err(|_| anyhow::anyhow!("unknown category: {name}"))?;
        out.push(cat);
    }
    Ok(Some(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_all_subcommands() {
        for argv in [
            vec!["quickclean", "quick"],
            vec!["quickclean", "caches", "--system"],
            vec!["quickclean", "dev"],
            vec!["quickclean", "orphans"],
            vec!["quickclean", "large", "--min-size", "500"],
            vec!["quickclean", "dup", "--detailed"],
            vec!["quickclean", "delete", "/tmp/x", "--permanent"],
            vec!["quickclean", "config", "show"],
            vec!["quickclean", "completions", "zsh"],
        ] {
            Cli::try_parse_from(argv).unwrap();
        }
    }

    #[test]
    fn parse_categories_rejects_unknown() {
        let names = vec!["video".to_string(), "bogus".to_string()];
        assert!(parse_categories(Some(&names)).is_err());
    }

    #[test]
    fn format_flag_overrides_config_default() {
        let mut config = Config::default();
        config.output_format = ConfigFormat::Json;

        // No flag: the configured preference decides
        assert!(wants_json(None, &config));
        assert!(!wants_json(None, &Config::default()));

        // An explicit flag always wins
        assert!(!wants_json(Some(&OutputFormat::Human), &config));
        assert!(wants_json(Some(&OutputFormat::Json), &Config::default()));
    }
}
