use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use log::{debug, warn};

use crate::common::{Row, SymbolEntry, ROW_SIZE};
use crate::hex::{self, InvalidHexToken};

/// Reads a memory dump file and parses every line into a [`Row`].
pub fn parse_code_file<P>(path: P) -> Result<Vec<Row>>
where
    P: AsRef<Path>,
{
    let content = read_file(path.as_ref())?;
    parse_code_str(&content)
}

/// Parses memory dump lines of the form `<addr> <byte> <byte> ...`.
pub fn parse_code_str(content: &str) -> Result<Vec<Row>> {
    let rows = numbered_lines(content)
        .map(|(line_no, line)| parse_row(line_no, line))
        .collect::<Result<Vec<_>>>()?;
    debug!("parsed {} memory rows", rows.len());
    Ok(rows)
}

/// Reads a symbol file and parses every line into a [`SymbolEntry`].
pub fn parse_symbols_file<P>(path: P) -> Result<Vec<SymbolEntry>>
where
    P: AsRef<Path>,
{
    let content = read_file(path.as_ref())?;
    parse_symbols_str(&content)
}

/// Parses symbol lines of the form `<name> <addr>`. Names are trimmed and
/// lowercased. Entries are returned in input order.
pub fn parse_symbols_str(content: &str) -> Result<Vec<SymbolEntry>> {
    let entries = numbered_lines(content)
        .map(|(line_no, line)| parse_symbol(line_no, line))
        .collect::<Result<Vec<_>>>()?;
    debug!("parsed {} symbols", entries.len());
    Ok(entries)
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(Error::ReadFile)
}

fn numbered_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(line_idx, line)| (line_idx + 1, line))
}

fn parse_row(line_no: usize, line: &str) -> Result<Row> {
    let mut tokens = line.split_whitespace();
    let addr_token = tokens.next().ok_or_else(|| missing_address_error(line_no))?;
    let addr = decode_u16(addr_token)
        .map_err(|kind| invalid_row_token_error(line_no, RowField::Address, addr_token, kind))?;

    let data = tokens
        .enumerate()
        .map(|(offset, token)| {
            decode_u8(token).map_err(|kind| {
                invalid_row_token_error(line_no, RowField::Data { offset }, token, kind)
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if data.len() != ROW_SIZE as usize {
        warn!(
            "line {line_no}: row at {addr:04x} has {} bytes, expected {ROW_SIZE}",
            data.len()
        );
    }

    Ok(Row { addr, data })
}

fn parse_symbol(line_no: usize, line: &str) -> Result<SymbolEntry> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [name, addr_token] = tokens[..] else {
        return Err(malformed_symbol_error(line_no, tokens.len()));
    };
    let addr = decode_u16(addr_token)
        .map_err(|kind| invalid_symbol_address_error(line_no, addr_token, kind))?;

    Ok(SymbolEntry {
        name: name.trim().to_lowercase(),
        addr,
    })
}

fn decode_u16(token: &str) -> std::result::Result<u16, TokenError> {
    let value = hex::decode_hex_token(token).map_err(TokenError::InvalidHex)?;
    u16::try_from(value).map_err(|_| TokenError::OutOfRange {
        value,
        max: u16::MAX as u32,
    })
}

fn decode_u8(token: &str) -> std::result::Result<u8, TokenError> {
    let value = hex::decode_hex_token(token).map_err(TokenError::InvalidHex)?;
    u8::try_from(value).map_err(|_| TokenError::OutOfRange {
        value,
        max: u8::MAX as u32,
    })
}

#[derive(Debug)]
pub enum Error {
    ReadFile(io::Error),
    ParseRow {
        line_no: usize,
        kind: ParseRowError,
    },
    ParseSymbol {
        line_no: usize,
        kind: ParseSymbolError,
    },
}

fn missing_address_error(line_no: usize) -> Error {
    Error::ParseRow {
        line_no,
        kind: ParseRowError::MissingAddress,
    }
}

fn invalid_row_token_error(
    line_no: usize,
    field: RowField,
    token: &str,
    kind: TokenError,
) -> Error {
    Error::ParseRow {
        line_no,
        kind: ParseRowError::InvalidToken {
            field,
            token: token.to_string(),
            kind,
        },
    }
}

fn malformed_symbol_error(line_no: usize, token_count: usize) -> Error {
    Error::ParseSymbol {
        line_no,
        kind: ParseSymbolError::MalformedLine { token_count },
    }
}

fn invalid_symbol_address_error(line_no: usize, token: &str, kind: TokenError) -> Error {
    Error::ParseSymbol {
        line_no,
        kind: ParseSymbolError::InvalidAddress {
            token: token.to_string(),
            kind,
        },
    }
}

#[derive(Debug)]
pub enum ParseRowError {
    MissingAddress,
    InvalidToken {
        field: RowField,
        token: String,
        kind: TokenError,
    },
}

#[derive(Debug)]
pub enum ParseSymbolError {
    /// The line does not consist of exactly a name and an address.
    MalformedLine { token_count: usize },
    InvalidAddress { token: String, kind: TokenError },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowField {
    Address,
    Data { offset: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    InvalidHex(InvalidHexToken),
    OutOfRange { value: u32, max: u32 },
}

impl fmt::Display for RowField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use RowField::*;
        match self {
            Address => write!(f, "address"),
            Data { offset } => write!(f, "data byte {offset}"),
        }
    }
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use TokenError::*;
        match self {
            InvalidHex(error) => write!(f, "{error}"),
            OutOfRange { value, max } => {
                write!(f, "value {value:#x} exceeds maximum {max:#x}")
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Error::*;
        match &self {
            ReadFile(io_error) => write!(f, "error reading the file: {io_error}"),
            ParseRow { line_no, kind } => {
                write!(f, "failed to parse memory row on line {line_no}: ")?;
                use ParseRowError::*;
                match kind {
                    MissingAddress => write!(f, "address missing"),
                    InvalidToken { field, token, kind } => {
                        write!(f, "invalid {field} '{token}': {kind}")
                    }
                }
            }
            ParseSymbol { line_no, kind } => {
                write!(f, "failed to parse symbol on line {line_no}: ")?;
                use ParseSymbolError::*;
                match kind {
                    MalformedLine { token_count } => {
                        write!(f, "expected a name and an address, found {token_count} tokens")
                    }
                    InvalidAddress { token, kind } => {
                        write!(f, "invalid address '{token}': {kind}")
                    }
                }
            }
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
