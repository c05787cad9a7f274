use std::{
    env, fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::{info, warn};

use super::{CommandResult, CommandSummary, FileOutcome, StreamSummary, StripSummary};
use crate::{
    cli::args::StripCommand,
    config::{Config, load_config},
    core::{FilterStats, Options, discard_comments, parse_css, scan::scan_files, stringify},
};

const STDIN_NAME: &str = "<stdin>";

pub fn strip(cmd: StripCommand) -> Result<CommandResult> {
    let base_dir = env::current_dir().context("Failed to get current directory")?;
    let loaded = load_config(&base_dir)?;
    if loaded.from_file {
        info!("using config file from {}", base_dir.display());
    }

    let config = merge_flags(loaded.config, &cmd);
    config.validate()?;
    let options = config.options()?;

    if cmd.is_stdin() {
        return strip_stdin(&options);
    }

    let includes: Vec<String> = if cmd.paths.is_empty() {
        config.includes.clone()
    } else {
        cmd.paths
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect()
    };

    let scan = scan_files(&base_dir, &includes, &config.ignores, cmd.common.verbose);
    if scan.files.is_empty() {
        warn!("no stylesheets found");
    }

    let files = scan
        .files
        .par_iter()
        .map(|path| strip_file(path, &base_dir, &options, cmd.apply))
        .collect::<Result<Vec<_>>>()?;

    let error_count = files.iter().filter(|f| f.is_failed()).count();
    Ok(CommandResult {
        summary: CommandSummary::Strip(StripSummary {
            files,
            is_apply: cmd.apply,
            skipped_count: scan.skipped_count,
        }),
        error_count,
    })
}

/// CLI flags only ever widen what the config file removes.
fn merge_flags(mut config: Config, cmd: &StripCommand) -> Config {
    config.remove_all |= cmd.remove_all;
    config.remove_all_but_first |= cmd.remove_all_but_first;
    config
        .remove_patterns
        .extend(cmd.remove_patterns.iter().cloned());
    config
}

fn strip_stdin(options: &Options) -> Result<CommandResult> {
    let mut css = String::new();
    io::stdin()
        .read_to_string(&mut css)
        .context("Failed to read stdin")?;

    let (output, outcome) = match strip_source(&css, options) {
        Ok((output, stats)) => {
            let path = PathBuf::from(STDIN_NAME);
            let outcome = if stats.removed > 0 {
                FileOutcome::Changed { path, stats }
            } else {
                FileOutcome::Unchanged { path, stats }
            };
            (Some(output), outcome)
        }
        Err(e) => (
            None,
            FileOutcome::Failed {
                path: PathBuf::from(STDIN_NAME),
                error: format!("{:#}", e),
            },
        ),
    };

    let error_count = usize::from(outcome.is_failed());
    Ok(CommandResult {
        summary: CommandSummary::Stream(StreamSummary { output, outcome }),
        error_count,
    })
}

/// Filter one file. Parse and predicate failures become `Failed`; I/O
/// failures abort the whole run.
fn strip_file(
    path: &Path,
    base_dir: &Path,
    options: &Options,
    apply: bool,
) -> Result<FileOutcome> {
    let display_path = path.strip_prefix(base_dir).unwrap_or(path).to_path_buf();
    let css = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let (output, stats) = match strip_source(&css, options) {
        Ok(result) => result,
        Err(e) => {
            warn!(path = %display_path.display(), "failed: {:#}", e);
            return Ok(FileOutcome::Failed {
                path: display_path,
                error: format!("{:#}", e),
            });
        }
    };

    info!(
        path = %display_path.display(),
        removed = stats.removed,
        kept = stats.kept,
        "processed"
    );

    if stats.removed == 0 {
        return Ok(FileOutcome::Unchanged {
            path: display_path,
            stats,
        });
    }

    if apply {
        fs::write(path, output).with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(FileOutcome::Changed {
        path: display_path,
        stats,
    })
}

fn strip_source(css: &str, options: &Options) -> Result<(String, FilterStats)> {
    let mut root = parse_css(css)?;
    let stats = discard_comments(&mut root, options)?;
    Ok((stringify(&root), stats))
}
