mod dump;
mod extract;

use std::{env, ffi::OsString, fs::File, io::{self, BufReader}, path::{Path, PathBuf}, process};
use anyhow::{bail, Context as _};
use clap::Parser;
use encoding_rs::Encoding;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Print the third column of every INSERT in a sqlite3 dump")]
struct Args {
    #[arg(
        short, long, default_value = "utf-8", value_parser = parse_encoding,
        help = "Encoding of the dump file (must be ASCII-compatible)"
    )]
    encoding: &'static Encoding,
    #[arg(short, long, help = "Skip malformed INSERT lines instead of stopping at the first one")]
    keep_going: bool,
    #[arg(help = "Path to the sqlite3 dump file")]
    file: Option<PathBuf>,
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    _rest: Vec<OsString>
}

fn parse_encoding(label: &str) -> Result<&'static Encoding, String> {
    match Encoding::for_label(label.as_bytes()) {
        Some(enc) if enc.is_ascii_compatible() => Ok(enc),
        Some(enc) => Err(format!("{} is not ASCII-compatible", enc.name())),
        None => Err(format!("unknown encoding {label:?}"))
    }
}

fn usage() -> ! {
    let prog = env::args_os().next().unwrap_or_default();
    println!("Usage: {} <sqlite3 dump file>", Path::new(&prog).display());
    process::exit(1)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let Some(path) = args.file else { usage() };

    let file = File::open(&path).with_context(|| format!("failed to open {}", path.display()))?;
    let summary = dump::run(
        BufReader::new(file),
        io::stdout().lock(),
        dump::Options { encoding: args.encoding, keep_going: args.keep_going }
    )?;

    info!(?summary, "done");

    if summary.malformed > 0 {
        bail!("skipped {} malformed INSERT line(s)", summary.malformed);
    }

    Ok(())
}
