//! Normalizing loosely formatted genomic coordinates into BED records.
//!
//! Coordinates out in the wild come in all shapes: `chr6:160585140`,
//! `6 160585140`, `chr6-160585140`, `Chr6_160585140.160585170`, and so on.
//! [`normalize()`] finds the first chromosome/position pattern on a line and
//! converts the 1-based position(s) into a zero-based, half-open interval.
//!
//! Parsing is best effort. A line that doesn't contain a recognizable
//! coordinate produces no record, and no error is raised for it.

use std::borrow::Cow;
use std::io;
use std::io::BufRead;
use std::io::Write;
use std::sync::LazyLock;

use omics::coordinate::position::Number;
use regex::Regex;
use tracing::trace;

use crate::bed;
use crate::bed::Record;
use crate::file::read_line;

/// The prefix carried by every normalized chromosome name.
pub const CHROMOSOME_PREFIX: &str = "chr";

/// A chromosome, a separator, a position, and optionally another separator
/// and a second position.
static COORDINATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:chr)?([0-9]+|X|Y|M|MT)[\s:\-._]+([0-9]+)(?:[\s:\-._]+([0-9]+))?").unwrap()
});

/// A chromosome field that makes up the whole of a BED column.
static CHROMOSOME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:chr)?([0-9]+|X|Y|M|MT)$").unwrap());

/// Builds the normalized chromosome name from a chromosome token.
fn chromosome_name(token: &str) -> String {
    format!("{CHROMOSOME_PREFIX}{}", token.to_uppercase())
}

/// Parses a field made up solely of ASCII digits.
fn parse_number(field: &str) -> Option<Number> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    field.parse().ok()
}

/// Returns the chromosome name with a `chr` prefix, adding one if needed.
///
/// Only the prefix is checked: the rest of the name is left untouched.
///
/// # Examples
///
/// ```
/// use bedlift::normalize::with_chromosome_prefix;
///
/// assert_eq!(with_chromosome_prefix("chr1"), "chr1");
/// assert_eq!(with_chromosome_prefix("1"), "chr1");
/// assert_eq!(with_chromosome_prefix("X"), "chrX");
/// ```
pub fn with_chromosome_prefix(chromosome: &str) -> Cow<'_, str> {
    if chromosome.starts_with(CHROMOSOME_PREFIX) {
        Cow::Borrowed(chromosome)
    } else {
        Cow::Owned(format!("{CHROMOSOME_PREFIX}{chromosome}"))
    }
}

/// Recognizes a line that is already a canonical BED record.
///
/// Only lines with a fourth column qualify, as every normalized record carries
/// the original line there. The start and end are kept as they are (they are
/// already zero-based), and whatever follows the third column becomes the
/// metadata. A three-column line is left to the 1-based coordinate pattern.
fn canonical(line: &str) -> Option<Record> {
    let mut fields = line.splitn(4, bed::DELIMITER);

    let token = CHROMOSOME_REGEX.captures(fields.next()?)?;
    let start = parse_number(fields.next()?)?;
    let end = parse_number(fields.next()?)?;
    let metadata = fields.next()?;

    Some(Record::new(
        chromosome_name(&token[1]),
        start,
        end,
        vec![metadata.to_string()],
    ))
}

/// Attempts to normalize a single line of text into a [`Record`].
///
/// A single position `P` becomes the interval `[P-1, P)`, and a pair of
/// positions `P1`, `P2` becomes `[P1-1, P2)`. The pair isn't checked for
/// order, so a reversed pair produces a record with `end < start`. The trimmed
/// line is kept as the record's only metadata field.
///
/// Lines that are already tab-delimited BED records with a metadata column are
/// passed through with their coordinates unchanged, which makes normalization
/// idempotent.
///
/// [`None`] is returned for blank lines and for lines without a recognizable
/// coordinate.
///
/// # Examples
///
/// ```
/// use bedlift::normalize::normalize;
///
/// let record = normalize("6 160585140").unwrap();
/// assert_eq!(record.chromosome(), "chr6");
/// assert_eq!(record.start(), 160585139);
/// assert_eq!(record.end(), 160585140);
///
/// let record = normalize("chrx:100-200").unwrap();
/// assert_eq!(record.to_string(), "chrX\t99\t200\tchrx:100-200");
///
/// assert!(normalize("").is_none());
/// assert!(normalize("no coordinates here").is_none());
/// ```
pub fn normalize(line: &str) -> Option<Record> {
    let line = line.trim();

    if line.is_empty() {
        return None;
    }

    if let Some(record) = canonical(line) {
        return Some(record);
    }

    let captures = COORDINATE_REGEX.captures(line)?;

    let first = parse_number(&captures[2])?;
    let last = match captures.get(3) {
        Some(m) => parse_number(m.as_str())?,
        None => first,
    };

    // A position of zero has no 1-based meaning.
    let start = first.checked_sub(1)?;

    Some(Record::new(
        chromosome_name(&captures[1]),
        start,
        last,
        vec![line.to_string()],
    ))
}

/// Normalizes every line of `reader`, writing the resulting records to
/// `writer`.
///
/// Returns the number of lines that produced a record.
///
/// # Examples
///
/// ```
/// let data = b"chr6:160585140\nnothing to see\n\nX 5-10\n";
/// let mut output = Vec::new();
///
/// let count = bedlift::normalize::normalize_lines(&data[..], &mut output)?;
///
/// assert_eq!(count, 2);
/// assert_eq!(
///     String::from_utf8(output)?,
///     "chr6\t160585139\t160585140\tchr6:160585140\nchrX\t4\t10\tX 5-10\n"
/// );
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn normalize_lines<R, W>(mut reader: R, writer: W) -> io::Result<usize>
where
    R: BufRead,
    W: Write,
{
    let mut writer = bed::Writer::new(writer);
    let mut buffer = String::new();
    let mut count = 0;
    let mut line_no = 0;

    while read_line(&mut reader, &mut buffer)? != 0 {
        line_no += 1;

        match normalize(&buffer) {
            Some(record) => {
                writer.write_record(&record)?;
                count += 1;
            }
            None => trace!("skipping line {line_no}: no coordinate found"),
        }
    }

    writer.flush()?;

    Ok(count)
}
