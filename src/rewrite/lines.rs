//! Line walking shared by the attribute-driven rewriters.

/// One line of a source text, with its terminator still attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// Byte offset of the first character in the full text
    pub start: usize,
    pub text: &'a str,
}

impl<'a> Line<'a> {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Split `text` into lines, keeping terminators so offsets stay exact.
pub fn split_lines(text: &str) -> Vec<Line<'_>> {
    let mut start = 0;
    text.split_inclusive('\n')
        .map(|line| {
            let current = Line { start, text: line };
            start += line.len();
            current
        })
        .collect()
}

/// Index of the first non-blank line strictly after `index`.
pub fn next_non_blank(lines: &[Line<'_>], index: usize) -> Option<usize> {
    (index + 1..lines.len()).find(|&i| !lines[i].is_blank())
}
