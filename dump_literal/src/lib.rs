//! Turns a hex memory dump and a symbol table into literal initializers
//! that can be pasted into another program's source.

mod common;
mod format;
mod hex;
mod parse;
mod process;

pub use common::{MismatchPolicy, Row, SymbolEntry, DEFAULT_BASE_ADDR, ROW_SIZE};
pub use format::{render_image, render_symbols, write_image, write_symbols, Layout};
pub use hex::{decode_hex_token, InvalidHexToken};
pub use parse::{
    parse_code_file, parse_code_str, parse_symbols_file, parse_symbols_str, Error,
    ParseRowError, ParseSymbolError, RowField, TokenError,
};
pub use process::{
    build_image, build_symbol_table, AddressMismatch, ImageOutput, ProcessError, ProcessResult,
};
