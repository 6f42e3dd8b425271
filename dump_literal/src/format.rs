use std::collections::BTreeMap;
use std::io::{self, Write};

use log::warn;

use crate::common::SymbolEntry;
use crate::process::ImageOutput;

const BYTES_PER_LINE: usize = 8;

const IMAGE_OPENING: &str = "code := []byte{";
const SYMBOLS_OPENING: &str = "symbols := SymbolTable{";
const CLOSING: &str = "}";

/// Whether a block is printed as a bare literal body or wrapped in a
/// declaration that can be pasted as is.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Layout {
    #[default]
    Body,
    Wrapped,
}

/// Renders the memory image as `0xhh, ` items, eight per line, ending with a
/// newline.
///
/// A truncated image is never rendered; the address mismatch that cut it
/// short is rendered instead as `<stated> != <expected>`.
pub fn render_image(output: &ImageOutput, layout: Layout) -> String {
    if let Some(mismatch) = &output.mismatch {
        return format!("{:04x} != {:04x}\n", mismatch.stated, mismatch.expected);
    }

    let bytes = &output.image;
    let mut text = String::with_capacity(bytes.len() * 6 + bytes.len() / BYTES_PER_LINE + 1);
    if layout == Layout::Wrapped {
        text.push_str(IMAGE_OPENING);
        text.push('\n');
    }
    for (idx, byte) in bytes.iter().enumerate() {
        if idx % BYTES_PER_LINE == 0 && idx != 0 {
            text.push('\n');
        }
        text.push_str(&format!("0x{byte:02x}, "));
    }
    text.push('\n');
    if layout == Layout::Wrapped {
        text.push_str(CLOSING);
        text.push('\n');
    }
    text
}

/// Renders one `0xaaaa: "name",` line per symbol, in the order given.
///
/// A wrapped table is a map keyed by address, so symbols sharing an address
/// are logged since the pasted literal will not compile.
pub fn render_symbols(entries: &[SymbolEntry], layout: Layout) -> String {
    let mut text = String::new();
    if layout == Layout::Wrapped {
        for addr in duplicate_addrs(entries) {
            warn!("several symbols at {addr:#06x}, wrapped table has duplicate keys");
        }
        text.push_str(SYMBOLS_OPENING);
        text.push('\n');
    }
    for entry in entries {
        text.push_str(&format!("0x{:04x}: \"{}\",\n", entry.addr, entry.name));
    }
    if layout == Layout::Wrapped {
        text.push_str(CLOSING);
        text.push('\n');
    }
    text
}

pub fn write_image<W: Write>(
    out: &mut W,
    output: &ImageOutput,
    layout: Layout,
) -> io::Result<()> {
    out.write_all(render_image(output, layout).as_bytes())
}

pub fn write_symbols<W: Write>(
    out: &mut W,
    entries: &[SymbolEntry],
    layout: Layout,
) -> io::Result<()> {
    out.write_all(render_symbols(entries, layout).as_bytes())
}

fn duplicate_addrs(entries: &[SymbolEntry]) -> Vec<u16> {
    let mut counts: BTreeMap<u16, usize> = BTreeMap::new();
    for entry in entries {
        *counts.entry(entry.addr).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|&(_, count)| count > 1)
        .map(|(addr, _)| addr)
        .collect()
}
