//! Default tag conventions

/// Default tag delimiters, as `(begin, end)` pairs
pub mod tags {
    pub const VARIABLE: (&str, &str) = ("<", ">");
    pub const BLOCK_START: (&str, &str) = ("<", ">");
    pub const BLOCK_END: (&str, &str) = ("</", ">");
    pub const BLOCK_VARIATION: (&str, &str) = ("<^", ">");
}

/// Default auto-tag names
pub mod auto {
    /// Right-alignment padding marker, rendered as `<+>`
    pub const ALIGNMENT: char = '+';

    /// First/standard/last value selector, rendered as `<.>STD<^.>LAST<^.>FIRST</.>`
    pub const VARIANT: char = '.';
}

/// Columns per tab stop
pub const TAB_SIZE: usize = 4;
