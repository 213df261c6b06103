//! Command-line surface.

use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::Serialize;

use crate::app::entries::IgnoreDocument;
use crate::app::resolve::{ResolveOptions, Resolver};
use crate::domain::errors::ResolveError;
use crate::domain::model::{EntryLine, FsItem, ResolvedLine};
use crate::infra::config::{CaseSensitivity, Config};
use crate::infra::fs::RealFileSystem;

/// Resolve ignore-file entries to the files they actually match.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve the entries of an ignore file against the directory tree.
    Resolve(ResolveArgs),
    /// Generate shell completions.
    Completions {
        /// Shell to emit completions for.
        shell: Shell,
    },
}

#[derive(Debug, clap::Args)]
struct ResolveArgs {
    /// Ignore file to resolve (e.g. a .gitignore).
    file: PathBuf,
    /// Only resolve the Nth entry, counting resolvable lines from 1.
    #[arg(long)]
    entry: Option<usize>,
    /// Output format.
    #[arg(long)]
    format: Option<OutputFormat>,
    /// Case sensitivity override.
    #[arg(long)]
    case: Option<CaseSensitivity>,
    /// Path segment separator.
    #[arg(long)]
    separator: Option<String>,
    /// Print absolute paths instead of paths relative to the ignore file.
    #[arg(long)]
    absolute: bool,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One entry per block, matches indented beneath it.
    Plain,
    /// Structured report for tooling.
    Json,
}

impl FromStr for OutputFormat {
    type Err = OutputFormatParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "plain" | "text" | "txt" => Ok(OutputFormat::Plain),
            "json" => Ok(OutputFormat::Json),
            other => Err(OutputFormatParseError::UnknownFormat(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OutputFormatParseError {
    #[error("unknown output format: {0}")]
    UnknownFormat(String),
}

/// Report for one resolved entry.
#[derive(Debug, Serialize)]
struct EntryReport {
    pattern: String,
    offset: usize,
    segments: Vec<SegmentReport>,
    matches: Vec<String>,
}

#[derive(Debug, Serialize)]
struct SegmentReport {
    index: usize,
    text: String,
    range: (usize, usize),
    matches: Vec<String>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Resolve(args) => run_resolve(args),
        Command::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "ignorenav", &mut io::stdout());
            Ok(())
        }
    }
}

fn run_resolve(args: ResolveArgs) -> Result<()> {
    let config = Config::load()?;

    let format = match args.format {
        Some(format) => format,
        None => config
            .output
            .format
            .parse()
            .context("invalid output format in configuration")?,
    };
    let separator = args
        .separator
        .clone()
        .unwrap_or(config.resolution.separator);
    let case_sensitive = args
        .case
        .unwrap_or(config.resolution.case_sensitivity)
        .resolve();
    let absolute = args.absolute || config.output.absolute_paths;

    let file = args
        .file
        .canonicalize()
        .with_context(|| format!("cannot open ignore file {}", args.file.display()))?;
    let owner = file.parent().map(Path::to_path_buf);

    let document = IgnoreDocument::load(&file)?;
    let mut entries = document.entries();
    if let Some(requested) = args.entry {
        let index = requested
            .checked_sub(1)
            .filter(|index| *index < entries.len())
            .ok_or(ResolveError::NoSuchEntry(requested))?;
        entries = vec![entries.swap_remove(index)];
    }

    let fs = RealFileSystem;
    let resolver = Resolver::new(
        &fs,
        ResolveOptions {
            separator,
            case_sensitive,
        },
    );

    let reports: Vec<EntryReport> = entries
        .iter()
        .map(|entry| {
            let resolved = resolver.resolve_line(entry, owner.as_deref());
            build_report(entry, &resolved, &resolver, owner.as_deref(), absolute)
        })
        .collect();

    match format {
        OutputFormat::Plain => print_plain(&reports),
        OutputFormat::Json => {
            let rendered =
                serde_json::to_string_pretty(&reports).context("failed to encode report")?;
            println!("{rendered}");
        }
    }

    Ok(())
}

fn build_report(
    entry: &EntryLine,
    resolved: &ResolvedLine,
    resolver: &Resolver<'_, RealFileSystem>,
    owner: Option<&Path>,
    absolute: bool,
) -> EntryReport {
    let segments = resolved
        .segments
        .iter()
        .map(|segment| SegmentReport {
            index: segment.segment.index,
            text: segment.segment.text.clone(),
            range: segment.segment.range,
            matches: display_paths(&segment.matches, owner, absolute),
        })
        .collect();

    let matches = resolver
        .last_meaningful(resolved)
        .map(|segment| display_paths(&segment.matches, owner, absolute))
        .unwrap_or_default();

    EntryReport {
        pattern: entry.text.clone(),
        offset: entry.offset,
        segments,
        matches,
    }
}

/// Deduplicated, sorted display paths. The resolver reports raw traversal
/// results; presentation is the one place that tidies them.
fn display_paths(items: &[FsItem], owner: Option<&Path>, absolute: bool) -> Vec<String> {
    let unique: BTreeSet<String> = items
        .iter()
        .map(|item| {
            let relative = (!absolute)
                .then(|| owner.and_then(|root| item.path().strip_prefix(root).ok()))
                .flatten();
            let mut display = match relative {
                Some(relative) => {
                    let joined = relative
                        .components()
                        .map(|component| component.as_os_str().to_string_lossy())
                        .collect::<Vec<_>>()
                        .join("/");
                    if joined.is_empty() { ".".to_owned() } else { joined }
                }
                None => item.path().display().to_string(),
            };
            if item.is_directory() && display != "." {
                display.push('/');
            }
            display
        })
        .collect();
    unique.into_iter().collect()
}

fn print_plain(reports: &[EntryReport]) {
    for report in reports {
        println!("{}", report.pattern);
        if report.matches.is_empty() {
            println!("    (no matches)");
        } else {
            for path in &report.matches {
                println!("    {path}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::FsItemKind;

    #[test]
    fn output_format_parses_aliases() {
        assert_eq!("plain".parse::<OutputFormat>().unwrap(), OutputFormat::Plain);
        assert_eq!("TEXT".parse::<OutputFormat>().unwrap(), OutputFormat::Plain);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn display_paths_relativizes_sorts_and_dedups() {
        let items = vec![
            FsItem::file("/proj/sub/b.class"),
            FsItem::file("/proj/a.class"),
            FsItem::file("/proj/a.class"),
            FsItem {
                path: "/proj/build".into(),
                kind: FsItemKind::Directory,
            },
        ];
        let rendered = display_paths(&items, Some(Path::new("/proj")), false);
        assert_eq!(rendered, vec!["a.class", "build/", "sub/b.class"]);
    }

    #[test]
    fn display_paths_absolute_mode_keeps_full_paths() {
        let items = vec![FsItem::file("/proj/a.class")];
        let rendered = display_paths(&items, Some(Path::new("/proj")), true);
        assert_eq!(rendered, vec!["/proj/a.class"]);
    }
}
