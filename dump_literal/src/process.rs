use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};
use log::{debug, warn};

use crate::common::{MismatchPolicy, Row, SymbolEntry, ROW_SIZE};

/// Concatenates the rows into one memory image, checking that each row
/// starts exactly `ROW_SIZE` bytes after the previous one, beginning at
/// `base_addr`.
///
/// With [`MismatchPolicy::Lenient`] the first out of sequence row ends the
/// image and is reported in [`ImageOutput::mismatch`] instead of failing.
pub fn build_image(rows: Vec<Row>, base_addr: u16, policy: MismatchPolicy) -> ProcessResult {
    let mut image = BytesMut::with_capacity(rows.len() * ROW_SIZE as usize);
    // Not bounded by u16: no row can follow one stated at 0xfff0.
    let mut expected_addr = base_addr as u32;
    let mut mismatch = None;

    for (row_idx, row) in rows.into_iter().enumerate() {
        if row.addr as u32 != expected_addr {
            let found = AddressMismatch {
                row_idx,
                stated: row.addr,
                expected: expected_addr,
            };
            match policy {
                MismatchPolicy::Strict => return Err(ProcessError::AddressMismatch(found)),
                MismatchPolicy::Lenient => {
                    warn!("{found}, truncating image at {} bytes", image.len());
                    mismatch = Some(found);
                    break;
                }
            }
        }
        image.put_slice(&row.data);
        expected_addr = expected_addr.saturating_add(ROW_SIZE as u32);
    }

    debug!("built memory image of {} bytes", image.len());
    Ok(ImageOutput {
        image: image.freeze(),
        mismatch,
    })
}

/// Orders symbols by address. Symbols sharing an address keep their input order.
pub fn build_symbol_table(mut entries: Vec<SymbolEntry>) -> Vec<SymbolEntry> {
    entries.sort_by_key(|entry| entry.addr);
    entries
}

pub struct ImageOutput {
    pub image: Bytes,
    pub mismatch: Option<AddressMismatch>,
}

impl ImageOutput {
    pub fn is_truncated(&self) -> bool {
        self.mismatch.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressMismatch {
    pub row_idx: usize,
    pub stated: u16,
    pub expected: u32,
}

impl fmt::Display for AddressMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {} stated at {:04x}, expected {:04x}",
            self.row_idx, self.stated, self.expected
        )
    }
}

#[derive(Debug)]
pub enum ProcessError {
    AddressMismatch(AddressMismatch),
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to process memory rows: ")?;
        use ProcessError::*;
        match self {
            AddressMismatch(mismatch) => write!(f, "address not contiguous: {mismatch}"),
        }
    }
}

impl std::error::Error for ProcessError {}

pub type ProcessResult = std::result::Result<ImageOutput, ProcessError>;
