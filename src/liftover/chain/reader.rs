//! A chain file reader.

use std::io;
use std::io::BufRead;
use std::iter;

use crate::file::read_line;
use crate::liftover::chain::Line;
use crate::liftover::chain::Section;
use crate::liftover::chain::data;
use crate::liftover::chain::line;
use crate::liftover::chain::section;

/// An error related to a [`Reader`].
#[derive(Debug)]
pub enum Error {
    /// An I/O error.
    Io(io::Error),

    /// A line that could not be parsed, along with its 1-based line number.
    Line(usize, line::ParseError),

    /// The file ended in the middle of an alignment section.
    AbruptEndInSection,

    /// A blank line within an alignment section.
    BlankLineInSection(usize),

    /// Alignment data outside of an alignment section.
    DataBetweenSections(usize),

    /// A header within an alignment section.
    HeaderInSection(usize),

    /// An invalid alignment section, along with the line number of its header.
    Section(usize, section::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::Line(line_no, err) => write!(f, "line {line_no}: {err}"),
            Error::AbruptEndInSection => write!(
                f,
                "the file abruptly ended in the middle of an alignment section"
            ),
            Error::BlankLineInSection(line_no) => {
                write!(f, "line {line_no}: found blank line in alignment section")
            }
            Error::DataBetweenSections(line_no) => {
                write!(f, "line {line_no}: found alignment data between sections")
            }
            Error::HeaderInSection(line_no) => {
                write!(f, "line {line_no}: found header in alignment section")
            }
            Error::Section(line_no, err) => {
                write!(f, "section starting at line {line_no}: {err}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A chain file reader.
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
    /// Creates a chain file reader.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"chain 0 seq0 4 + 0 4 seq0 5 - 0 5 1\n3\t0\t1\n1\n";
    /// let reader = bedlift::liftover::chain::Reader::new(&data[..]);
    /// ```
    pub fn new(inner: T) -> Self {
        Self { inner, line_no: 0 }
    }

    /// Consumes self and returns the inner reader.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Attempts to read a [`Line`] from the underlying reader.
    ///
    /// # Examples
    ///
    /// ```
    /// use bedlift::liftover::chain::Line;
    ///
    /// let data = b"chain 0 seq0 4 + 0 4 seq0 5 - 0 5 1\n3\t0\t1\n1";
    /// let mut reader = bedlift::liftover::chain::Reader::new(&data[..]);
    ///
    /// let mut buffer = String::new();
    /// assert!(matches!(reader.read_line(&mut buffer)?, Some(Line::Header(_))));
    /// assert!(matches!(reader.read_line(&mut buffer)?, Some(Line::AlignmentData(_))));
    /// assert!(matches!(reader.read_line(&mut buffer)?, Some(Line::AlignmentData(_))));
    /// assert!(reader.read_line(&mut buffer)?.is_none());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn read_line(&mut self, buffer: &mut String) -> Result<Option<Line>> {
        if read_line(&mut self.inner, buffer).map_err(Error::Io)? == 0 {
            return Ok(None);
        }

        self.line_no += 1;

        buffer
            .parse()
            .map(Some)
            .map_err(|err| Error::Line(self.line_no, err))
    }

    /// Attempts to read the next [`Section`] from the underlying reader.
    ///
    /// Blank lines and comments between sections are skipped.
    pub fn read_section(&mut self, buffer: &mut String) -> Result<Option<Section>> {
        let header = loop {
            match self.read_line(buffer)? {
                None => return Ok(None),
                Some(Line::Empty) | Some(Line::Comment) => continue,
                Some(Line::AlignmentData(_)) => {
                    return Err(Error::DataBetweenSections(self.line_no));
                }
                Some(Line::Header(header)) => break header,
            }
        };

        let header_line_no = self.line_no;
        let mut data = Vec::<data::Record>::new();

        loop {
            match self.read_line(buffer)? {
                None => return Err(Error::AbruptEndInSection),
                Some(Line::Empty) => return Err(Error::BlankLineInSection(self.line_no)),
                Some(Line::Comment) => continue,
                Some(Line::Header(_)) => return Err(Error::HeaderInSection(self.line_no)),
                Some(Line::AlignmentData(record)) => {
                    let terminating = record.is_terminating();
                    data.push(record);

                    if terminating {
                        break;
                    }
                }
            }
        }

        Section::try_new(header, data)
            .map(Some)
            .map_err(|err| Error::Section(header_line_no, err))
    }

    /// Returns an iterator over the alignment sections in the underlying
    /// reader.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"chain 0 seq0 4 + 0 4 seq0 5 - 0 5 1\n3\t0\t1\n1\n\n\
    ///              chain 0 seq1 4 + 0 4 seq1 4 + 0 4 2\n4\n";
    /// let mut reader = bedlift::liftover::chain::Reader::new(&data[..]);
    ///
    /// let sections = reader.sections().collect::<Result<Vec<_>, _>>()?;
    /// assert_eq!(sections.len(), 2);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn sections(&mut self) -> impl Iterator<Item = Result<Section>> + '_ {
        let mut buffer = String::new();
        iter::from_fn(move || self.read_section(&mut buffer).transpose())
    }
}

impl<T> From<T> for Reader<T>
where
    T: BufRead,
{
    fn from(inner: T) -> Self {
        Self::new(inner)
    }
}
