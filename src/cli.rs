use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glob::Pattern;

use crate::options::NormalizationPolicy;
use crate::report::Format;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Reference directory (expected)
    pub expected_dir: PathBuf,

    /// Directory under test (actual)
    pub actual_dir: PathBuf,

    /// Ignore leading and trailing whitespace on each line
    #[arg(short = 'l', long)]
    pub ignore_line_spaces: bool,

    /// Ignore blank lines anywhere in a file
    #[arg(short = 'b', long)]
    pub ignore_blank_lines: bool,

    /// Glob patterns to skip in the expected tree (can be repeated or comma separated)
    #[arg(short, long, value_delimiter = ',', num_args = 1..)]
    pub ignore: Vec<String>,

    /// Report format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

#[derive(Debug)]
pub struct Options {
    pub policy: NormalizationPolicy,
    pub ignore_patterns: Vec<Pattern>,
    pub format: Format,
}

pub fn build_options(args: &Args) -> Result<Options> {
    let patterns = args
        .ignore
        .iter()
        .map(|s| Pattern::new(s).with_context(|| format!("Invalid glob pattern: {s}")))
        .collect::<Result<Vec<_>>>()?;

    let mut policy = NormalizationPolicy::new();
    if args.ignore_line_spaces {
        policy = policy.ignore_line_spaces();
    }
    if args.ignore_blank_lines {
        policy = policy.ignore_blank_lines();
    }

    Ok(Options {
        policy,
        ignore_patterns: patterns,
        format: args.format,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_to_policy() {
        let args = Args::parse_from(["treecmp", "want", "got", "-l", "-b", "-i", "*.log,tmp"]);
        let opts = build_options(&args).unwrap();
        assert!(opts.policy.trim_line_whitespace);
        assert!(opts.policy.skip_blank_lines);
        assert_eq!(opts.ignore_patterns.len(), 2);
        assert_eq!(opts.format, Format::Text);
    }

    #[test]
    fn defaults_are_strict() {
        let args = Args::parse_from(["treecmp", "want", "got", "--format", "json"]);
        let opts = build_options(&args).unwrap();
        assert_eq!(opts.policy, NormalizationPolicy::default());
        assert_eq!(opts.format, Format::Json);
    }

    #[test]
    fn bad_glob_is_rejected() {
        let args = Args::parse_from(["treecmp", "want", "got", "-i", "[oops"]);
        let err = build_options(&args).unwrap_err();
        assert!(err.to_string().contains("Invalid glob pattern: [oops"));
    }
}
