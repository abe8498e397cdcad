use std::fmt;

use crate::compare::{FileDiff, LineDiff, TreeDiff};
use crate::utils::display_rel;

impl fmt::Display for LineDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "\tExpected@{}: {} ; Actual@{}: {}",
            self.expected_line.unwrap_or(0),
            self.expected.as_deref().unwrap_or(""),
            self.actual_line.unwrap_or(0),
            self.actual.as_deref().unwrap_or(""),
        )
    }
}

impl fmt::Display for FileDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.diffs.is_empty() && self.error.is_none() {
            return Ok(());
        }
        writeln!(f, "File {}:", display_rel(&self.path))?;
        if let Some(err) = &self.error {
            writeln!(f, "Failed to open file: {err}")?;
        }
        for diff in &self.diffs {
            write!(f, "{diff}")?;
        }
        Ok(())
    }
}

/// Renders nothing for equal trees.
impl fmt::Display for TreeDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        f.write_str("Differences found in filesystem\n\n")?;
        for file in &self.files {
            write!(f, "{file}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

pub fn render(diff: &TreeDiff, format: Format) -> serde_json::Result<String> {
    match format {
        Format::Text => Ok(diff.to_string()),
        Format::Json => serde_json::to_string_pretty(diff).map(|s| s + "\n"),
    }
}
