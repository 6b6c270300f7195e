#![forbid(unsafe_code)]

//! utilkit
//!
//! Command-line front end for the utilkit helpers. The main command, `prune`,
//! deletes empty files below a directory whose names match an include
//! pattern and do not match an exclude pattern. The `text` and `list`
//! commands expose the string and collection helpers.

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use std::path::PathBuf;

use utilkit::commands::{list, prune::prune_empty_files, text};
use utilkit::errors::AppError;
use utilkit::prune::{MatchTarget, PruneOptions};

#[derive(Parser, Debug)]
#[command(name = "utilkit")]
#[command(about = "Small file and text utilities")]
struct Cli {
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Delete empty files matching a pattern
    Prune {
        /// Directory to clean
        root: PathBuf,
        /// Regex a file name must fully match
        #[arg(long)]
        include: String,
        /// Regex a file name must not fully match
        #[arg(long, default_value = "")]
        exclude: String,
        /// Deepest subdirectory level to enter; 0 stays in the root
        #[arg(long, default_value_t = 0)]
        max_depth: usize,
        /// Treat a max depth of 0 as unlimited
        #[arg(long, default_value_t = false)]
        zero_depth_unlimited: bool,
        /// Match patterns against the full path instead of the file name
        #[arg(long, default_value_t = false)]
        match_full_path: bool,
        /// Descend into symlinked directories
        #[arg(long, default_value_t = false)]
        follow_symlinks: bool,
        /// List what would be deleted without deleting
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Reverse or interpolate strings
    Text {
        #[command(subcommand)]
        subcommand: TextSubcommands,
    },
    /// Chunk, count, batch or merge items
    List {
        #[command(subcommand)]
        subcommand: ListSubcommands,
    },
}

#[derive(Subcommand, Debug)]
enum TextSubcommands {
    Reverse {
        input: String,
    },
    Interpolate {
        template: String,
        /// Placeholder value as KEY=VALUE
        #[arg(long = "var")]
        vars: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
enum ListSubcommands {
    Chunk {
        #[arg(long)]
        size: usize,
        #[arg(required = true)]
        items: Vec<String>,
    },
    Freq {
        items: Vec<String>,
    },
    Batch {
        /// Batch size; 0 uses the default of 5
        #[arg(long, default_value_t = 0)]
        size: usize,
        items: Vec<String>,
    },
    Merge {
        /// Base entry as KEY=VALUE
        #[arg(long)]
        left: Vec<String>,
        /// Entry merged on top as KEY=VALUE
        #[arg(long)]
        right: Vec<String>,
        /// Let right-hand entries replace existing keys
        #[arg(long = "override", default_value_t = false)]
        override_existing: bool,
    },
}

/// Entry point
///
/// The log level starts at `info` and moves with each `-v`/`-q`; a `RUST_LOG`
/// directive overrides it. Prune progress and per-file failures go to the
/// log on stderr, command results go to stdout. Any `AppError`, including a
/// prune that recorded failures, ends the process with a non-zero status.
fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .parse_default_env()
        .init();

    match cli.command {
        Commands::Prune {
            root,
            include,
            exclude,
            max_depth,
            zero_depth_unlimited,
            match_full_path,
            follow_symlinks,
            dry_run,
        } => {
            let options = PruneOptions {
                max_depth,
                zero_depth_unlimited,
                match_target: if match_full_path {
                    MatchTarget::FullPath
                } else {
                    MatchTarget::FileName
                },
                follow_symlinks,
                dry_run,
            };
            prune_empty_files(&root, &include, &exclude, options)
        }
        Commands::Text { subcommand } => match subcommand {
            TextSubcommands::Reverse { input } => text::reverse_text(&input),
            TextSubcommands::Interpolate { template, vars } => {
                text::interpolate_text(&template, &vars)
            }
        },
        Commands::List { subcommand } => match subcommand {
            ListSubcommands::Chunk { size, items } => list::chunk_items(&items, size),
            ListSubcommands::Freq { items } => {
                list::count_items(&items);
                Ok(())
            }
            ListSubcommands::Batch { size, items } => {
                list::batch_items(&items, size);
                Ok(())
            }
            ListSubcommands::Merge {
                left,
                right,
                override_existing,
            } => list::merge_pairs(&left, &right, override_existing),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_moves_log_level_from_info() {
        let level = |args: &[&str]| {
            let argv = ["utilkit"].iter().chain(args).chain(&["text", "reverse", "x"]);
            Cli::parse_from(argv).verbose.log_level_filter()
        };

        assert_eq!(level(&[]), log::LevelFilter::Info);
        assert_eq!(level(&["-v"]), log::LevelFilter::Debug);
        assert_eq!(level(&["-vv"]), log::LevelFilter::Trace);
        assert_eq!(level(&["-q"]), log::LevelFilter::Warn);
    }

    #[test]
    fn test_parse_prune_flags() {
        let cli = Cli::parse_from([
            "utilkit",
            "prune",
            "/tmp/x",
            "--include",
            r".*\.tmp",
            "--max-depth",
            "2",
            "--dry-run",
        ]);
        match cli.command {
            Commands::Prune {
                root,
                exclude,
                max_depth,
                dry_run,
                follow_symlinks,
                ..
            } => {
                assert_eq!(root, PathBuf::from("/tmp/x"));
                assert_eq!(exclude, "");
                assert_eq!(max_depth, 2);
                assert!(dry_run);
                assert!(!follow_symlinks);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
