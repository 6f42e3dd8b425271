use std::fmt;

/// Decodes a hex token such as `1f`, `0200`, `0x10` or `+0x1_f` into its value.
///
/// An optional `+` sign and `0x` prefix may lead the digits, which can be of
/// either case. Single `_` separators are allowed between digits and directly
/// after the prefix.
pub fn decode_hex_token(token: &str) -> Result<u32> {
    let token = token.as_bytes();
    let unsigned = token.strip_prefix(b"+").unwrap_or(token);
    let (digits, prefixed) = strip_hex_prefix(unsigned);

    let mut value: u32 = 0;
    let mut seen_digit = false;
    let mut after_separator = false;
    for (idx, &digit) in digits.iter().enumerate() {
        if digit == SEPARATOR {
            let follows_digit_or_prefix = seen_digit || (prefixed && idx == 0);
            if after_separator || !follows_digit_or_prefix {
                return Err(InvalidHexToken::MisplacedSeparator);
            }
            after_separator = true;
            continue;
        }
        let nibble = decode_hex_digit(digit)?;
        value = value
            .checked_mul(16)
            .and_then(|v| v.checked_add(nibble as u32))
            .ok_or(InvalidHexToken::TooLarge)?;
        seen_digit = true;
        after_separator = false;
    }

    if !seen_digit {
        Err(InvalidHexToken::Empty)
    } else if after_separator {
        Err(InvalidHexToken::MisplacedSeparator)
    } else {
        Ok(value)
    }
}

const SEPARATOR: u8 = b'_';

fn strip_hex_prefix(token: &[u8]) -> (&[u8], bool) {
    match token {
        [b'0', b'x' | b'X', rest @ ..] => (rest, true),
        _ => (token, false),
    }
}

fn decode_hex_digit(digit: u8) -> Result<u8> {
    match digit {
        b'0'..=b'9' => Ok(digit - b'0'),
        b'a'..=b'f' => Ok(10 + (digit - b'a')),
        b'A'..=b'F' => Ok(10 + (digit - b'A')),
        d => Err(InvalidHexToken::InvalidDigit(d)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidHexToken {
    Empty,
    InvalidDigit(u8),
    MisplacedSeparator,
    TooLarge,
}

impl fmt::Display for InvalidHexToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use InvalidHexToken::*;
        match self {
            Empty => write!(f, "no hex digits"),
            InvalidDigit(d) => write!(f, "invalid hex digit '{}'", d.escape_ascii()),
            MisplacedSeparator => write!(f, "'_' must sit between digits"),
            TooLarge => write!(f, "value too large"),
        }
    }
}

impl std::error::Error for InvalidHexToken {}

type Result<T> = std::result::Result<T, InvalidHexToken>;
