use regex::bytes::Regex;
use std::io::{self, BufRead, Write};
use std::sync::OnceLock;

/// One assembled line of a listing:
/// `00:AAAAAAAA BBBB...   SSS: source text`.
///
/// Byte-oriented so that source text in any encoding passes through untouched.
pub const LINE_PATTERN: &str = r"(?-u)^00:([0-9A-F]{8}) ([0-9A-F]+)\s+([0-9]+):\s*(.*)$";

fn line_regex() -> &'static Regex {
    static LINE_REGEX: OnceLock<Regex> = OnceLock::new();
    LINE_REGEX.get_or_init(|| Regex::new(LINE_PATTERN).expect("listing line pattern is valid"))
}

/// The fields captured from a matching listing line.
///
/// Only `opcode_bytes` and `source` reach the fixture file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRecord<'a> {
    pub address: u32,
    pub opcode_bytes: &'a str,
    pub sequence: &'a str,
    pub source: &'a [u8],
}

impl<'a> ListingRecord<'a> {
    /// Matches a line with its terminator already removed.
    pub fn parse(line: &'a [u8]) -> Option<Self> {
        let captures = line_regex().captures(line)?;

        // The hex and digit groups are ASCII by construction.
        let address = std::str::from_utf8(captures.get(1)?.as_bytes()).ok()?;
        let opcode_bytes = std::str::from_utf8(captures.get(2)?.as_bytes()).ok()?;
        let sequence = std::str::from_utf8(captures.get(3)?.as_bytes()).ok()?;

        Some(Self {
            address: u32::from_str_radix(address, 16).ok()?,
            opcode_bytes,
            sequence,
            source: captures.get(4)?.as_bytes(),
        })
    }

    /// Writes `<opcode bytes>\t<source>\n`.
    pub fn write_fixture_line<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(self.opcode_bytes.as_bytes())?;
        out.write_all(b"\t")?;
        out.write_all(self.source)?;
        out.write_all(b"\n")
    }
}

/// Reads one line into `line` without its terminator. `\n`, `\r\n` and a
/// lone `\r` all end a line, and the last line need not be terminated.
///
/// Returns `false` once the input is exhausted.
pub fn read_listing_line<R: BufRead>(input: &mut R, line: &mut Vec<u8>) -> io::Result<bool> {
    line.clear();
    let mut read_any = false;

    loop {
        let (terminator, used) = {
            let available = match input.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                return Ok(read_any);
            }
            read_any = true;

            match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(pos) => {
                    line.extend_from_slice(&available[..pos]);
                    (Some(available[pos]), pos + 1)
                }
                None => {
                    line.extend_from_slice(available);
                    (None, available.len())
                }
            }
        };
        input.consume(used);

        match terminator {
            Some(b'\r') => {
                if input.fill_buf()?.first() == Some(&b'\n') {
                    input.consume(1);
                }
                return Ok(true);
            }
            Some(_) => return Ok(true),
            None => {}
        }
    }
}
