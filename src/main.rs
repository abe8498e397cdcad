use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use treecmp::{build_options, compare_trees, render, Args, DirTree};

fn run() -> Result<bool> {
    let args = Args::parse();
    let opts = build_options(&args)?;

    let expected_root = args
        .expected_dir
        .canonicalize()
        .context("Invalid expected_dir")?;
    let actual_root = args
        .actual_dir
        .canonicalize()
        .context("Invalid actual_dir")?;

    let expected = DirTree::new(expected_root).with_ignore_patterns(opts.ignore_patterns);
    let actual = DirTree::new(actual_root);

    let diff = compare_trees(&expected, &actual, opts.policy)?;
    print!("{}", render(&diff, opts.format)?);

    Ok(diff.is_empty())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}
