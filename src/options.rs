/// Whitespace leniencies applied to each line before two lines are compared.
///
/// Both switches are off by default and may be combined. Blank-line skipping
/// chooses the line first; trimming is applied to whatever was chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizationPolicy {
    pub trim_line_whitespace: bool,
    pub skip_blank_lines: bool,
}

impl NormalizationPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ignore leading and trailing whitespace on every line.
    pub fn ignore_line_spaces(mut self) -> Self {
        self.trim_line_whitespace = true;
        self
    }

    /// Ignore lines that are empty after trimming, wherever they appear.
    pub fn ignore_blank_lines(mut self) -> Self {
        self.skip_blank_lines = true;
        self
    }

    pub(crate) fn normalize<'a>(&self, line: &'a str) -> &'a str {
        if self.trim_line_whitespace {
            line.trim()
        } else {
            line
        }
    }
}
