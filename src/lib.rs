//
// lib.rs
// treecmp
//
// Library entry that re-exports modules so the binary and any external users can compare trees, tune the normalization policy, and render reports.
//
// Thales Matheus Mendonça Santos - November 2025
//
// Public crate interface: re-export modules used by the binary and tests.
pub mod cli;
pub mod compare;
pub mod error;
pub mod options;
pub mod reader;
pub mod report;
pub mod tree;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use cli::{build_options, Args, Options};
pub use compare::{compare_file, compare_streams, compare_trees, FileDiff, LineDiff, TreeDiff};
pub use error::{CompareError, CompareResult, OpenError, Side, TraversalError};
pub use options::NormalizationPolicy;
pub use reader::LineReader;
pub use report::{render, Format};
pub use tree::{DirTree, FileTree, MemTree};
