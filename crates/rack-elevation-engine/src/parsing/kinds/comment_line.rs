/// Lines that carry no equipment: `#` comments and blank lines.
pub struct CommentLine;

impl CommentLine {
    pub const MARKER: char = '#';

    pub fn is_skipped(line: &str) -> bool {
        let trimmed = line.trim_start();
        trimmed.is_empty() || trimmed.starts_with(Self::MARKER)
    }
}
