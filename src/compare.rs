//! Positional, line-indexed comparison of files and trees.
//!
//! Two files are walked line by line in lockstep. When one runs out, the rest
//! of the other is drained and every leftover line is reported on its own, so
//! extra content on either side always shows up.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};
use tracing::{debug, info, warn};

use crate::error::{CompareResult, OpenError, Side};
use crate::options::NormalizationPolicy;
use crate::reader::LineReader;
use crate::tree::FileTree;
use crate::utils::is_blank;

/// One mismatching line. A side that has no line at this point has no text
/// and no line number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LineDiff {
    pub expected: Option<String>,
    pub actual: Option<String>,
    pub expected_line: Option<usize>,
    pub actual_line: Option<usize>,
}

impl LineDiff {
    fn expected_only(text: String, line: usize) -> Self {
        Self {
            expected: Some(text),
            expected_line: Some(line),
            ..Self::default()
        }
    }

    fn actual_only(text: String, line: usize) -> Self {
        Self {
            actual: Some(text),
            actual_line: Some(line),
            ..Self::default()
        }
    }

    /// True when neither side has a line. Such a record is never produced.
    pub fn is_empty(&self) -> bool {
        self.expected.is_none() && self.actual.is_none()
    }
}

/// Differences found in a single file.
#[derive(Debug, Serialize)]
pub struct FileDiff {
    pub path: PathBuf,
    #[serde(serialize_with = "serialize_error")]
    pub error: Option<OpenError>,
    pub diffs: Vec<LineDiff>,
}

fn serialize_error<S: Serializer>(err: &Option<OpenError>, s: S) -> Result<S::Ok, S::Error> {
    match err {
        Some(e) => s.serialize_some(&e.to_string()),
        None => s.serialize_none(),
    }
}

/// Every file that differs between two trees, in traversal order.
#[derive(Debug, Default, Serialize)]
pub struct TreeDiff {
    pub files: Vec<FileDiff>,
}

impl TreeDiff {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Synced,
    DrainingExpected,
    DrainingActual,
    Done,
}

/// Compares the file at `path` in both trees. Returns `None` when the file is
/// equal under `policy`.
///
/// A failure to open either side is reported in the result instead of the
/// line differences.
pub fn compare_file(
    expected: &dyn FileTree,
    actual: &dyn FileTree,
    path: &Path,
    policy: NormalizationPolicy,
) -> Option<FileDiff> {
    let opened = expected
        .open(path)
        .map_err(|source| OpenError {
            side: Side::Expected,
            source,
        })
        .and_then(|e| {
            let a = actual.open(path).map_err(|source| OpenError {
                side: Side::Actual,
                source,
            })?;
            Ok((e, a))
        });

    let (e, a) = match opened {
        Ok(streams) => streams,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to open file");
            return Some(FileDiff {
                path: path.to_path_buf(),
                error: Some(err),
                diffs: Vec::new(),
            });
        }
    };

    let diffs = compare_streams(e, a, policy);
    debug!(path = %path.display(), mismatches = diffs.len(), "compared file");
    if diffs.is_empty() {
        return None;
    }
    Some(FileDiff {
        path: path.to_path_buf(),
        error: None,
        diffs,
    })
}

/// Compares two already opened streams line by line.
pub fn compare_streams<E: BufRead, A: BufRead>(
    expected: E,
    actual: A,
    policy: NormalizationPolicy,
) -> Vec<LineDiff> {
    let mut exp = LineReader::new(expected);
    let mut act = LineReader::new(actual);
    let mut diffs = Vec::new();
    let mut phase = Phase::Synced;

    while phase != Phase::Done {
        phase = match phase {
            Phase::Synced => match (exp.advance(), act.advance()) {
                (true, true) => {
                    if let Some(diff) = compare_current(&mut exp, &mut act, policy) {
                        diffs.push(diff);
                    }
                    Phase::Synced
                }
                (true, false) => {
                    push_leftover(&exp, Side::Expected, policy, &mut diffs);
                    Phase::DrainingExpected
                }
                (false, true) => {
                    push_leftover(&act, Side::Actual, policy, &mut diffs);
                    Phase::DrainingActual
                }
                (false, false) => Phase::Done,
            },
            Phase::DrainingExpected => {
                if exp.advance() {
                    push_leftover(&exp, Side::Expected, policy, &mut diffs);
                    Phase::DrainingExpected
                } else {
                    Phase::Done
                }
            }
            Phase::DrainingActual => {
                if act.advance() {
                    push_leftover(&act, Side::Actual, policy, &mut diffs);
                    Phase::DrainingActual
                } else {
                    Phase::Done
                }
            }
            Phase::Done => Phase::Done,
        };
    }

    diffs
}

/// Compares the lines both readers just produced.
fn compare_current<E: BufRead, A: BufRead>(
    exp: &mut LineReader<E>,
    act: &mut LineReader<A>,
    policy: NormalizationPolicy,
) -> Option<LineDiff> {
    let (e_text, a_text) = if policy.skip_blank_lines {
        (exp.skip_to_next_non_blank(), act.skip_to_next_non_blank())
    } else {
        (exp.current_line().to_owned(), act.current_line().to_owned())
    };
    let e_text = policy.normalize(&e_text);
    let a_text = policy.normalize(&a_text);
    if e_text == a_text {
        return None;
    }

    // A side that ran dry while looking for a non-blank line has no position
    // to report.
    let side = |reader_exhausted: bool, text: &str, line: usize| {
        if reader_exhausted {
            (None, None)
        } else {
            (Some(text.to_owned()), Some(line))
        }
    };
    let (expected, expected_line) = side(exp.is_exhausted(), e_text, exp.line_number());
    let (actual, actual_line) = side(act.is_exhausted(), a_text, act.line_number());
    let diff = LineDiff {
        expected,
        actual,
        expected_line,
        actual_line,
    };
    debug_assert!(!diff.is_empty());
    Some(diff)
}

/// Records the line `reader` just produced after the other side ran out.
/// Blank leftovers are dropped when blank lines are skipped.
fn push_leftover<R: BufRead>(
    reader: &LineReader<R>,
    side: Side,
    policy: NormalizationPolicy,
    diffs: &mut Vec<LineDiff>,
) {
    let line = reader.current_line();
    if policy.skip_blank_lines && is_blank(line) {
        return;
    }
    let text = policy.normalize(line).to_owned();
    diffs.push(match side {
        Side::Expected => LineDiff::expected_only(text, reader.line_number()),
        Side::Actual => LineDiff::actual_only(text, reader.line_number()),
    });
}

/// Compares every regular file of `expected` with the file at the same
/// relative path in `actual`.
///
/// Files that only exist in `actual` are not visited. A file missing from
/// `actual` shows up as an open error.
pub fn compare_trees(
    expected: &dyn FileTree,
    actual: &dyn FileTree,
    policy: NormalizationPolicy,
) -> CompareResult<TreeDiff> {
    let mut tree_diff = TreeDiff::default();
    let mut compared = 0usize;

    for path in expected.files() {
        let path = path?;
        compared += 1;
        if let Some(file_diff) = compare_file(expected, actual, &path, policy) {
            tree_diff.files.push(file_diff);
        }
    }

    info!(
        compared,
        differing = tree_diff.files.len(),
        "tree comparison finished"
    );
    Ok(tree_diff)
}
