//! BED-like interval records and the facilities to read and write them.
//!
//! A record is a chromosome, a zero-based inclusive start, a zero-based
//! exclusive end, and any number of trailing metadata fields. Input records are
//! whitespace-delimited. Output records are always tab-delimited.

use std::io;
use std::io::BufRead;
use std::io::Write;
use std::iter;
use std::num::ParseIntError;
use std::str::FromStr;

use omics::coordinate::position::Number;

use crate::file::read_line;

/// The delimiter used when writing a record.
pub const DELIMITER: char = '\t';

/// The prefix of a comment line.
pub const COMMENT_PREFIX: char = '#';

/// The minimum number of fields in a record.
pub const NUM_REQUIRED_FIELDS: usize = 3;

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error related to the parsing of a [`Record`].
#[derive(Debug)]
pub enum ParseError {
    /// Too few fields in the line.
    IncorrectNumberOfFields(usize),

    /// An invalid start position.
    InvalidStart(ParseIntError),

    /// An invalid end position.
    InvalidEnd(ParseIntError),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::IncorrectNumberOfFields(n) => write!(
                f,
                "invalid number of fields: expected at least {NUM_REQUIRED_FIELDS} fields, \
                 found {n} fields"
            ),
            ParseError::InvalidStart(err) => write!(f, "invalid start: {err}"),
            ParseError::InvalidEnd(err) => write!(f, "invalid end: {err}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// An error related to a [`Reader`].
#[derive(Debug)]
pub enum Error {
    /// An I/O error.
    Io(io::Error),

    /// A record that could not be parsed, along with its 1-based line number.
    Parse(usize, ParseError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::Parse(line_no, err) => write!(f, "parse error at line {line_no}: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////////////////////
// Record
////////////////////////////////////////////////////////////////////////////////////////

/// A single BED-like interval along with its trailing metadata.
///
/// No relationship between `start` and `end` is enforced: an interval with
/// `end < start` is carried along as-is.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    /// The chromosome name.
    chromosome: String,

    /// The zero-based, inclusive start.
    start: Number,

    /// The zero-based, exclusive end.
    end: Number,

    /// The trailing metadata fields.
    metadata: Vec<String>,
}

impl Record {
    /// Creates a new [`Record`].
    ///
    /// # Examples
    ///
    /// ```
    /// use bedlift::Record;
    ///
    /// let record = Record::new("chr1", 99, 200, vec![String::from("geneA")]);
    /// assert_eq!(record.to_string(), "chr1\t99\t200\tgeneA");
    /// ```
    pub fn new(
        chromosome: impl Into<String>,
        start: Number,
        end: Number,
        metadata: Vec<String>,
    ) -> Self {
        Self {
            chromosome: chromosome.into(),
            start,
            end,
            metadata,
        }
    }

    /// Gets the chromosome name.
    ///
    /// # Examples
    ///
    /// ```
    /// let record = "chr1 99 200".parse::<bedlift::Record>()?;
    /// assert_eq!(record.chromosome(), "chr1");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn chromosome(&self) -> &str {
        &self.chromosome
    }

    /// Gets the zero-based, inclusive start.
    ///
    /// # Examples
    ///
    /// ```
    /// let record = "chr1 99 200".parse::<bedlift::Record>()?;
    /// assert_eq!(record.start(), 99);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn start(&self) -> Number {
        self.start
    }

    /// Gets the zero-based, exclusive end.
    ///
    /// # Examples
    ///
    /// ```
    /// let record = "chr1 99 200".parse::<bedlift::Record>()?;
    /// assert_eq!(record.end(), 200);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn end(&self) -> Number {
        self.end
    }

    /// Gets the trailing metadata fields.
    ///
    /// # Examples
    ///
    /// ```
    /// let record = "chr1 99 200 geneA rs123".parse::<bedlift::Record>()?;
    /// assert_eq!(record.metadata(), ["geneA", "rs123"]);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn metadata(&self) -> &[String] {
        &self.metadata
    }

    /// Consumes self and returns the metadata fields.
    pub fn into_metadata(self) -> Vec<String> {
        self.metadata
    }
}

impl FromStr for Record {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts = s.split_whitespace().collect::<Vec<_>>();

        if parts.len() < NUM_REQUIRED_FIELDS {
            return Err(ParseError::IncorrectNumberOfFields(parts.len()));
        }

        let start = parts[1].parse().map_err(ParseError::InvalidStart)?;
        let end = parts[2].parse().map_err(ParseError::InvalidEnd)?;
        let metadata = parts[NUM_REQUIRED_FIELDS..]
            .iter()
            .map(|field| field.to_string())
            .collect();

        Ok(Self::new(parts[0], start, end, metadata))
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}{}{}{}",
            self.chromosome, DELIMITER, self.start, DELIMITER, self.end
        )?;

        for field in &self.metadata {
            write!(f, "{DELIMITER}{field}")?;
        }

        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////
// Reader
////////////////////////////////////////////////////////////////////////////////////////

/// A reader of BED-like records.
///
/// Blank lines and lines starting with `#` are skipped.
#[derive(Debug)]
pub struct Reader<T>
where
    T: BufRead,
{
    /// The inner reader.
    inner: T,

    /// The number of lines read so far.
    line_no: usize,
}

impl<T> Reader<T>
where
    T: BufRead,
{
    /// Creates a new BED reader.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"chr1\t99\t200\tgeneA\n";
    /// let reader = bedlift::bed::Reader::new(&data[..]);
    /// ```
    pub fn new(inner: T) -> Self {
        Self { inner, line_no: 0 }
    }

    /// Consumes self and returns the inner reader.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Attempts to read the next [`Record`], skipping comments and blank lines.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"# comment\n\nchr1 99 200 geneA\n";
    /// let mut reader = bedlift::bed::Reader::new(&data[..]);
    ///
    /// let mut buffer = String::new();
    /// let record = reader.read_record(&mut buffer)?.unwrap();
    /// assert_eq!(record.chromosome(), "chr1");
    /// assert!(reader.read_record(&mut buffer)?.is_none());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn read_record(&mut self, buffer: &mut String) -> Result<Option<Record>> {
        loop {
            if read_line(&mut self.inner, buffer).map_err(Error::Io)? == 0 {
                return Ok(None);
            }

            self.line_no += 1;

            let line = buffer.trim();
            if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
                continue;
            }

            return line
                .parse()
                .map(Some)
                .map_err(|err| Error::Parse(self.line_no, err));
        }
    }

    /// Returns an iterator over the [`Record`]s in the underlying reader.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"chr1\t99\t200\nchr2\t0\t1\n";
    /// let mut reader = bedlift::bed::Reader::new(&data[..]);
    ///
    /// let records = reader.records().collect::<Result<Vec<_>, _>>()?;
    /// assert_eq!(records.len(), 2);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn records(&mut self) -> impl Iterator<Item = Result<Record>> + '_ {
        let mut buffer = String::new();
        iter::from_fn(move || self.read_record(&mut buffer).transpose())
    }
}

////////////////////////////////////////////////////////////////////////////////////////
// Writer
////////////////////////////////////////////////////////////////////////////////////////

/// A writer of tab-delimited BED-like records.
#[derive(Debug)]
pub struct Writer<W>
where
    W: Write,
{
    /// The inner writer.
    inner: W,
}

impl<W> Writer<W>
where
    W: Write,
{
    /// Creates a new BED writer.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Writes a single [`Record`] followed by a new line.
    ///
    /// # Examples
    ///
    /// ```
    /// use bedlift::Record;
    ///
    /// let mut writer = bedlift::bed::Writer::new(Vec::new());
    /// writer.write_record(&Record::new("chr1", 99, 200, Vec::new()))?;
    ///
    /// assert_eq!(writer.into_inner(), b"chr1\t99\t200\n");
    ///
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn write_record(&mut self, record: &Record) -> io::Result<()> {
        writeln!(self.inner, "{record}")
    }

    /// Writes every record in `records`, returning how many were written.
    pub fn write_records<'a>(
        &mut self,
        records: impl IntoIterator<Item = &'a Record>,
    ) -> io::Result<usize> {
        let mut count = 0;

        for record in records {
            self.write_record(record)?;
            count += 1;
        }

        Ok(count)
    }

    /// Flushes the inner writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    /// Consumes self and returns the inner writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}
