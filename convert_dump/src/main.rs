use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use dump_literal::*;

/*
Usage:
  convert_dump > literals.txt
  convert_dump --code dump.txt --symbols syms.txt --lenient --wrap

  Reads code.txt and symbols.txt from the current directory by default.
 */

/// Convert a hex memory dump and a symbol table into source literals
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Memory dump, one `<addr> <byte>...` row per line
    #[clap(long, default_value = "code.txt")]
    code: PathBuf,

    /// Symbol table, one `<name> <addr>` pair per line
    #[clap(long, default_value = "symbols.txt")]
    symbols: PathBuf,

    /// Expected address of the first memory row, in hex
    #[clap(long, default_value = "0x200", value_parser = parse_base_addr)]
    base: u16,

    /// Report a non-contiguous row and drop the rest of the dump instead of failing
    #[clap(long)]
    lenient: bool,

    /// Wrap each block in a declaration
    #[clap(long)]
    wrap: bool,
}

fn parse_base_addr(arg: &str) -> std::result::Result<u16, String> {
    let value = decode_hex_token(arg).map_err(|e| e.to_string())?;
    u16::try_from(value).map_err(|_| format!("{value:#x} does not fit in 16 bits"))
}

fn main() {
    let env = env_logger::Env::default()
        .filter_or("CONVERT_DUMP_LOG", "warn")
        .write_style_or("CONVERT_DUMP_LOG_STYLE", "auto");
    env_logger::init_from_env(env);

    if let Err(e) = try_main() {
        eprintln!("ERROR: {e:#}");
        process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let args = Args::parse();
    let policy = if args.lenient {
        MismatchPolicy::Lenient
    } else {
        MismatchPolicy::Strict
    };
    let layout = if args.wrap {
        Layout::Wrapped
    } else {
        Layout::Body
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let rows = parse_code_file(&args.code)
        .with_context(|| format!("failed to parse {:?}", args.code))?;
    let output = build_image(rows, args.base, policy)
        .with_context(|| format!("failed to convert {:?}", args.code))?;
    info!("{} bytes from {:?} ({policy})", output.image.len(), args.code);
    write_image(&mut out, &output, layout).context("failed to write memory image")?;
    out.flush()?;

    let entries = parse_symbols_file(&args.symbols)
        .with_context(|| format!("failed to parse {:?}", args.symbols))?;
    let table = build_symbol_table(entries);
    info!("{} symbols from {:?}", table.len(), args.symbols);
    write_symbols(&mut out, &table, layout).context("failed to write symbol table")?;
    out.flush()?;

    Ok(())
}
