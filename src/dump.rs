use std::{borrow::Cow, io::{BufRead, Write}};

use anyhow::{Context as _, bail};
use encoding_rs::Encoding;
use tracing::{debug, trace, warn};

use crate::extract::extract;

#[derive(Clone, Copy, Debug)]
pub struct Options {
    pub encoding: &'static Encoding,
    pub keep_going: bool
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub lines: usize,
    pub extracted: usize,
    pub malformed: usize
}

fn decode<'a>(encoding: &'static Encoding, b: &'a [u8]) -> Option<Cow<'a, str>> {
    encoding.decode_without_bom_handling_and_without_replacement(b)
}

/// Streams `input` one line at a time, writing each extracted field to `output` back to back.
///
/// Stops at the first malformed `INSERT` unless `keep_going` is set, in which case the line is
/// skipped and counted in `Summary::malformed`. Anything already written stays written.
pub fn run(mut input: impl BufRead, mut output: impl Write, opts: Options) -> anyhow::Result<Summary> {
    let mut summary = Summary::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        summary.lines += 1;
        let lineno = summary.lines;

        let Some(line) = decode(opts.encoding, &buf) else {
            bail!("line {lineno} is not valid {}", opts.encoding.name());
        };

        match extract(&line) {
            Ok(None) => trace!(lineno, "skipped"),
            Ok(Some(field)) => {
                summary.extracted += 1;
                debug!(lineno, len = field.len(), "extracted");
                output.write_all(field.as_bytes())?;
            },
            Err(e) if opts.keep_going => {
                summary.malformed += 1;
                warn!(lineno, "skipping malformed INSERT: {e}");
            },
            Err(e) => return Err(e).with_context(|| format!("malformed INSERT on line {lineno}"))
        }
    }

    output.flush()?;
    Ok(summary)
}
