use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::schema::{DEFAULT_DATABASE, DEFAULT_DATA_DIR};

#[derive(Parser, Debug)]
#[command(name = "cardlist-to-sqlite")]
#[command(version, about = "Load NationStates card dumps into a SQLite database")]
pub struct Cli {
    /// Defaults to `load` with default arguments
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load the JSONL card dumps into SQLite (default)
    Load(LoadArgs),

    /// Convert cardlist_<tag>.xml dumps into the JSONL files `load` reads
    Convert(ConvertArgs),

    /// List the configured datasets
    ListDatasets,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct ConvertArgs {
    /// Directory holding the XML dumps; JSONL files are written beside them
    #[arg(short, long, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Only convert these datasets (comma-separated tags)
    #[arg(short, long, value_delimiter = ',')]
    pub include: Option<Vec<String>>,

    /// Skip these datasets (comma-separated tags)
    #[arg(short, long, value_delimiter = ',')]
    pub exclude: Option<Vec<String>>,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct LoadArgs {
    /// Directory containing the cardlist_<tag>.jsonl files
    #[arg(short, long, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Output SQLite database path
    #[arg(short, long, default_value = DEFAULT_DATABASE)]
    pub output_db: PathBuf,

    /// Only load these datasets (comma-separated tags)
    #[arg(short, long, value_delimiter = ',')]
    pub include: Option<Vec<String>>,

    /// Skip these datasets (comma-separated tags)
    #[arg(short, long, value_delimiter = ',')]
    pub exclude: Option<Vec<String>>,

    /// Show a terminal progress UI
    #[arg(long)]
    pub tui: bool,
}

impl Default for LoadArgs {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            output_db: PathBuf::from(DEFAULT_DATABASE),
            include: None,
            exclude: None,
            tui: false,
        }
    }
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Load(LoadArgs::default())
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_means_default_load() {
        let cli = Cli::try_parse_from(["cardlist-to-sqlite"]).unwrap();
        assert!(cli.command.is_none());
        match cli.command.unwrap_or_default() {
            Commands::Load(args) => assert_eq!(args, LoadArgs::default()),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_load_defaults_match_explicit_load() {
        let cli = Cli::try_parse_from(["cardlist-to-sqlite", "load"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Load(ref a)) if *a == LoadArgs::default()));
    }

    #[test]
    fn test_load_filters() {
        let cli = Cli::try_parse_from([
            "cardlist-to-sqlite",
            "load",
            "--include",
            "S1,S3",
            "--output-db",
            "out.db",
        ])
        .unwrap();
        let Some(Commands::Load(args)) = cli.command else {
            panic!("expected load");
        };
        assert_eq!(args.include, Some(vec!["S1".to_string(), "S3".to_string()]));
        assert_eq!(args.output_db, PathBuf::from("out.db"));
    }

    #[test]
    fn test_convert_args() {
        let cli =
            Cli::try_parse_from(["cardlist-to-sqlite", "convert", "-d", "dumps", "-e", "S4"])
                .unwrap();
        let Some(Commands::Convert(args)) = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(args.data_dir, PathBuf::from("dumps"));
        assert_eq!(args.include, None);
        assert_eq!(args.exclude, Some(vec!["S4".to_string()]));
    }
}
