//! Source positions.
//!
//! The parser attaches a line/column position to call nodes closest to user
//! code; the evaluator uses it once, to pin a diagnostic to the outermost
//! call site that knows where it is.

use std::fmt;

/// A line/column source position (both 1-based).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    /// Create a new position.
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_display() {
        let pos = Position::new(3, 7);
        assert_eq!(format!("{pos}"), "line 3, column 7");
        assert_eq!(format!("{pos:?}"), "3:7");
    }
}
