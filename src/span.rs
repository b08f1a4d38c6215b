use std::ops::Add;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub line: usize,
    pub column: usize,
}

impl Ord for Cursor {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        if self.line < other.line {
            return std::cmp::Ordering::Less;
        }
        if self.line > other.line {
            return std::cmp::Ordering::Greater;
        }

        self.column.cmp(&other.column)
    }
}

impl PartialOrd for Cursor {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self { line: 1, column: 0 }
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

impl Add<NextLine> for Cursor {
    type Output = Self;

    fn add(mut self, rhs: NextLine) -> Self::Output {
        self += rhs;
        self
    }
}

impl Add<NextColumn> for Cursor {
    type Output = Self;

    fn add(mut self, rhs: NextColumn) -> Self::Output {
        self += rhs;
        self
    }
}

impl std::ops::AddAssign<NextLine> for Cursor {
    fn add_assign(&mut self, _: NextLine) {
        self.column = 0;
        self.line += 1;
    }
}

impl std::ops::AddAssign<NextColumn> for Cursor {
    fn add_assign(&mut self, _: NextColumn) {
        self.column += 1;
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
/// The location of a token in the stream.
pub struct Span {
    pub from: Cursor,
    pub to: Cursor,
}

impl From<Cursor> for Span {
    fn from(value: Cursor) -> Self {
        Self {
            from: value,
            to: value,
        }
    }
}

impl Span {
    pub fn new(from: Cursor, to: Cursor) -> Self {
        Self { from, to }
    }

    /// The line the span starts on.
    pub fn line(&self) -> usize {
        self.from.line
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.from.fmt(f)
    }
}

pub struct NextLine;
pub struct NextColumn;
