//! Reader for GNU ddrescue mapfiles.
//!
//! A mapfile is a list of comment lines (`#`), one status line
//! `current_pos current_status [current_pass]`, and then one line per block:
//! `pos size status`.

use std::fmt;
use std::path::Path;

use tracing::debug;

use crate::error::{MapfileError, Result};

/// Rescue state of one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockStatus {
    /// `?`
    NonTried,
    /// `*`
    NonTrimmed,
    /// `/`
    NonScraped,
    /// `-`
    BadSector,
    /// `+`
    Finished,
}

impl BlockStatus {
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '?' => Some(Self::NonTried),
            '*' => Some(Self::NonTrimmed),
            '/' => Some(Self::NonScraped),
            '-' => Some(Self::BadSector),
            '+' => Some(Self::Finished),
            _ => None,
        }
    }

    /// Drawing category for this status, or `None` for rescued blocks.
    #[must_use]
    pub fn category(self) -> Option<Category> {
        match self {
            Self::BadSector => Some(Category::Bad),
            Self::NonTried | Self::NonTrimmed | Self::NonScraped => Some(Category::Unknown),
            Self::Finished => None,
        }
    }
}

/// Phase ddrescue was in when the mapfile was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Copying,
    Trimming,
    Scraping,
    Retrying,
    Filling,
    Generating,
    Finished,
}

impl Phase {
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '?' => Some(Self::Copying),
            '*' => Some(Self::Trimming),
            '/' => Some(Self::Scraping),
            '-' => Some(Self::Retrying),
            'F' => Some(Self::Filling),
            'G' => Some(Self::Generating),
            '+' => Some(Self::Finished),
            _ => None,
        }
    }
}

/// How a damaged region is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Confirmed bad sectors.
    Bad,
    /// Areas not read successfully yet.
    Unknown,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Bad, Category::Unknown];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bad => "bad",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contiguous range of data offsets, `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    start: u64,
    end: u64,
}

impl Interval {
    /// Creates an interval.
    ///
    /// # Errors
    ///
    /// Returns [`MapfileError::InvalidInterval`] if `start > end`.
    pub fn new(start: u64, end: u64) -> Result<Self> {
        if start > end {
            return Err(MapfileError::InvalidInterval { start, end }.into());
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn start(&self) -> u64 {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> u64 {
        self.end
    }

    #[must_use]
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// One block line of a mapfile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub interval: Interval,
    pub status: BlockStatus,
}

/// A parsed ddrescue mapfile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapfile {
    pub current_pos: u64,
    pub phase: Phase,
    pub current_pass: Option<u32>,
    pub blocks: Vec<Block>,
}

impl Mapfile {
    /// Reads and parses a mapfile from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| MapfileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Parses mapfile text.
    ///
    /// # Errors
    ///
    /// Returns [`MapfileError::UnrecognizedLogLine`] for any data line that
    /// is not a valid status or block line, and
    /// [`MapfileError::MissingStatusLine`] if there are no data lines.
    pub fn parse(text: &str) -> Result<Self> {
        let mut status: Option<(u64, Phase, Option<u32>)> = None;
        let mut blocks = Vec::new();

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let unrecognized = || MapfileError::UnrecognizedLogLine {
                line_number: index + 1,
                line: raw.to_owned(),
            };
            let fields: Vec<&str> = line.split_whitespace().collect();

            if status.is_none() {
                status = Some(parse_status_line(&fields).ok_or_else(unrecognized)?);
            } else {
                blocks.push(parse_block_line(&fields).ok_or_else(unrecognized)?);
            }
        }

        let (current_pos, phase, current_pass) = status.ok_or(MapfileError::MissingStatusLine)?;
        debug!("parsed mapfile with {} blocks", blocks.len());
        Ok(Self {
            current_pos,
            phase,
            current_pass,
            blocks,
        })
    }

    /// Intervals of every block drawn in `category`, in file order.
    #[must_use]
    pub fn intervals(&self, category: Category) -> Vec<Interval> {
        self.blocks
            .iter()
            .filter(|b| b.status.category() == Some(category))
            .map(|b| b.interval)
            .collect()
    }
}

fn parse_status_line(fields: &[&str]) -> Option<(u64, Phase, Option<u32>)> {
    let (pos, phase, pass) = match fields {
        [pos, phase] => (pos, phase, None),
        [pos, phase, pass] => (pos, phase, Some(pass)),
        _ => return None,
    };
    let pass = match pass {
        Some(p) => Some(p.parse().ok()?),
        None => None,
    };
    Some((parse_int(pos)?, Phase::from_char(single_char(phase)?)?, pass))
}

fn parse_block_line(fields: &[&str]) -> Option<Block> {
    let [pos, size, status] = fields else {
        return None;
    };
    let pos = parse_int(pos)?;
    let end = pos.checked_add(parse_int(size)?)?;
    Some(Block {
        interval: Interval { start: pos, end },
        status: BlockStatus::from_char(single_char(status)?)?,
    })
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    let c = chars.next()?;
    chars.next().is_none().then_some(c)
}

/// Parses an unsigned integer in decimal, `0x` hex, `0o` octal or `0b` binary.
fn parse_int(s: &str) -> Option<u64> {
    let (digits, radix) = if let Some(rest) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        (rest, 16)
    } else if let Some(rest) = s.strip_prefix("0o").or_else(|| s.strip_prefix("0O")) {
        (rest, 8)
    } else if let Some(rest) = s.strip_prefix("0b").or_else(|| s.strip_prefix("0B")) {
        (rest, 2)
    } else {
        (s, 10)
    };
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return None;
    }
    u64::from_str_radix(digits, radix).ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::DiscmapError;

    const SAMPLE: &str = "\
# Mapfile. Created by GNU ddrescue version 1.27
# Command line: ddrescue -b 2048 /dev/sr0 image.iso image.log
# Start time:   2024-03-02 11:04:31
# current_pos  current_status  current_pass
0x1C9A0000     +               1
#      pos        size  status
0x00000000  0x1C9A0000  +
0x1C9A0000  0x00010000  -
0x1C9B0000  0x00200000  /
0x1CBB0000  0x00000800  *
0x1CBB0800  0x00000800  ?
0x1CBB1000  0x0B000000  +
";

    #[test]
    fn parses_status_line() {
        let map = Mapfile::parse(SAMPLE).unwrap();
        assert_eq!(map.current_pos, 0x1C9A_0000);
        assert_eq!(map.phase, Phase::Finished);
        assert_eq!(map.current_pass, Some(1));
        assert_eq!(map.blocks.len(), 6);
    }

    #[test]
    fn splits_intervals_by_category() {
        let map = Mapfile::parse(SAMPLE).unwrap();
        let bad = map.intervals(Category::Bad);
        assert_eq!(bad, vec![Interval::new(0x1C9A_0000, 0x1C9B_0000).unwrap()]);

        let unknown = map.intervals(Category::Unknown);
        assert_eq!(unknown.len(), 3);
        assert_eq!(unknown[0].len(), 0x0020_0000);
        assert_eq!(unknown[2].end(), 0x1CBB_1000);
    }

    #[test]
    fn status_line_without_pass() {
        let map = Mapfile::parse("0 ?\n0 100 ?\n").unwrap();
        assert_eq!(map.phase, Phase::Copying);
        assert_eq!(map.current_pass, None);
        assert_eq!(map.intervals(Category::Unknown).len(), 1);
    }

    #[test]
    fn zero_current_position_is_still_the_status_line() {
        let map = Mapfile::parse("0 +\n0 4096 -\n").unwrap();
        assert_eq!(map.blocks.len(), 1);
        assert_eq!(map.intervals(Category::Bad)[0].len(), 4096);
    }

    #[test]
    fn unknown_status_is_an_error() {
        let r = Mapfile::parse("0 +\n0 100 x\n");
        assert!(matches!(
            r,
            Err(DiscmapError::Mapfile(MapfileError::UnrecognizedLogLine { line_number: 2, .. }))
        ));
    }

    #[test]
    fn wrong_field_count_is_an_error() {
        assert!(Mapfile::parse("0 +\n0 100\n").is_err());
        assert!(Mapfile::parse("0 + 1 extra\n").is_err());
    }

    #[test]
    fn bad_number_is_an_error() {
        assert!(Mapfile::parse("0 +\n0xZZ 100 -\n").is_err());
        assert!(Mapfile::parse("0 +\n-5 100 -\n").is_err());
    }

    #[test]
    fn overflowing_block_is_an_error() {
        assert!(Mapfile::parse("0 +\n0xFFFFFFFFFFFFFFFF 2 -\n").is_err());
    }

    #[test]
    fn indented_comments_are_skipped() {
        let text = "  # rescue log\n0 +\n\t# pos size status\n   #\n0 100 -\n";
        let map = Mapfile::parse(text).unwrap();
        assert_eq!(map.blocks.len(), 1);
        assert_eq!(map.intervals(Category::Bad)[0].len(), 100);
    }

    #[test]
    fn empty_mapfile_has_no_status() {
        let r = Mapfile::parse("# nothing here\n\n");
        assert!(matches!(
            r,
            Err(DiscmapError::Mapfile(MapfileError::MissingStatusLine))
        ));
    }

    #[test]
    fn integer_forms() {
        assert_eq!(parse_int("4096"), Some(4096));
        assert_eq!(parse_int("0x1000"), Some(4096));
        assert_eq!(parse_int("0o10000"), Some(4096));
        assert_eq!(parse_int("0b1000000000000"), Some(4096));
        assert_eq!(parse_int("0x"), None);
        assert_eq!(parse_int("12a"), None);
    }

    #[test]
    fn interval_rejects_reversed_bounds() {
        assert!(Interval::new(10, 5).is_err());
        assert!(Interval::new(5, 5).unwrap().is_empty());
    }
}
