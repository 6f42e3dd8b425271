use std::fmt;

/// Expected address of the first row of a memory dump.
pub const DEFAULT_BASE_ADDR: u16 = 0x200;

/// Number of bytes each row of a memory dump is expected to carry.
pub const ROW_SIZE: u16 = 0x10;

/// One line of a memory dump: the stated address and the bytes that follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub addr: u16,
    pub data: Vec<u8>,
}

impl Row {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolEntry {
    pub name: String,
    pub addr: u16,
}

/// What to do when a row's stated address breaks the sequence.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum MismatchPolicy {
    /// Fail the whole conversion.
    #[default]
    Strict,
    /// Report the mismatch and keep only the rows before it.
    Lenient,
}

impl fmt::Display for MismatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use MismatchPolicy::*;
        match self {
            Strict => write!(f, "Strict"),
            Lenient => write!(f, "Lenient"),
        }
    }
}
