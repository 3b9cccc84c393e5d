//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use combine_core::cycle::DEFAULT_MAX_DEPTH;

/// A YAML pre-processor to combine one or more YAML files with $xref references
#[derive(Parser, Debug)]
#[command(name = "yaml-combine")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Files to combine, merged in sorted order
    #[arg(value_name = "FILENAME", required = true)]
    pub files: Vec<String>,

    /// Directory that input files and $xref file parts are relative to
    #[arg(short = 'C', long, env = "YAML_COMBINE_BASE_DIR", default_value = ".")]
    pub base_dir: PathBuf,

    /// Write the combined document here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Emit JSON instead of YAML
    #[arg(long)]
    pub json: bool,

    /// Maximum nesting of $xref expansions
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_files_and_defaults() {
        let cli = Cli::try_parse_from(["yaml-combine", "b.yaml", "a.yaml"]).unwrap();
        assert_eq!(cli.files, vec!["b.yaml", "a.yaml"]);
        assert_eq!(cli.base_dir, PathBuf::from("."));
        assert_eq!(cli.output, None);
        assert!(!cli.json);
        assert_eq!(cli.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn requires_at_least_one_file() {
        assert!(Cli::try_parse_from(["yaml-combine"]).is_err());
    }

    #[test]
    fn verbose_flag_counts() {
        let cli = Cli::try_parse_from(["yaml-combine", "-vv", "a.yaml"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn parses_all_options() {
        let cli = Cli::try_parse_from([
            "yaml-combine",
            "-C",
            "specs",
            "--output",
            "out.json",
            "--json",
            "--max-depth",
            "8",
            "api.yaml",
        ])
        .unwrap();
        assert_eq!(cli.base_dir, PathBuf::from("specs"));
        assert_eq!(cli.output, Some(PathBuf::from("out.json")));
        assert!(cli.json);
        assert_eq!(cli.max_depth, 8);
        assert_eq!(cli.files, vec!["api.yaml"]);
    }
}
