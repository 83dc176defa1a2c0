//! A sequence within a header record.

use std::num::ParseIntError;

use omics::coordinate::Strand;
use omics::coordinate::position::Number;
use omics::coordinate::strand;

/// Errors associated with parsing a sequence.
#[derive(Debug)]
pub enum ParseError {
    /// An invalid chromosome size.
    InvalidChromosomeSize(ParseIntError),

    /// An invalid strand.
    InvalidStrand(strand::Error),

    /// An invalid alignment start.
    InvalidAlignmentStart(ParseIntError),

    /// An invalid alignment end.
    InvalidAlignmentEnd(ParseIntError),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidChromosomeSize(err) => write!(f, "invalid chromosome size: {err}"),
            ParseError::InvalidStrand(err) => write!(f, "invalid strand: {err}"),
            ParseError::InvalidAlignmentStart(err) => write!(f, "invalid alignment start: {err}"),
            ParseError::InvalidAlignmentEnd(err) => write!(f, "invalid alignment end: {err}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// An error related to a [`Sequence`].
#[derive(Debug)]
pub enum Error {
    /// The alignment starts after it ends.
    StartAfterEnd(Number, Number),

    /// The alignment ends past the end of the chromosome.
    EndExceedsSize(Number, Number),

    /// A parse error.
    Parse(ParseError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::StartAfterEnd(start, end) => {
                write!(f, "the alignment start ({start}) is after the alignment end ({end})")
            }
            Error::EndExceedsSize(end, size) => write!(
                f,
                "the alignment end ({end}) exceeds the size of the chromosome ({size})"
            ),
            Error::Parse(err) => write!(f, "parse error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// The source or target portion of a header record.
///
/// When the strand is negative, the alignment start and end are expressed
/// in terms of the reverse-complemented chromosome.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Sequence {
    /// The chromosome name.
    chromosome_name: String,

    /// The chromosome size.
    chromosome_size: Number,

    /// The strand.
    strand: Strand,

    /// The start of the alignment.
    alignment_start: Number,

    /// The end of the alignment.
    alignment_end: Number,
}

impl Sequence {
    /// Attempts to create a new sequence from the textual fields of a header.
    ///
    /// # Examples
    ///
    /// ```
    /// use bedlift::liftover::chain::header::Sequence;
    /// use omics::coordinate::Strand;
    ///
    /// let sequence = Sequence::try_new("chr1", "248956422", "+", "0", "1000")?;
    ///
    /// assert_eq!(sequence.chromosome_name(), "chr1");
    /// assert_eq!(sequence.chromosome_size(), 248956422);
    /// assert_eq!(sequence.strand(), &Strand::Positive);
    /// assert_eq!(sequence.alignment_start(), 0);
    /// assert_eq!(sequence.alignment_end(), 1000);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(
        chromosome_name: &str,
        chromosome_size: &str,
        strand: &str,
        alignment_start: &str,
        alignment_end: &str,
    ) -> Result<Self> {
        let chromosome_size = chromosome_size
            .parse()
            .map_err(|err| Error::Parse(ParseError::InvalidChromosomeSize(err)))?;
        let strand = strand
            .parse()
            .map_err(|err| Error::Parse(ParseError::InvalidStrand(err)))?;
        let alignment_start = alignment_start
            .parse()
            .map_err(|err| Error::Parse(ParseError::InvalidAlignmentStart(err)))?;
        let alignment_end = alignment_end
            .parse()
            .map_err(|err| Error::Parse(ParseError::InvalidAlignmentEnd(err)))?;

        if alignment_start > alignment_end {
            return Err(Error::StartAfterEnd(alignment_start, alignment_end));
        }

        if alignment_end > chromosome_size {
            return Err(Error::EndExceedsSize(alignment_end, chromosome_size));
        }

        Ok(Self {
            chromosome_name: chromosome_name.into(),
            chromosome_size,
            strand,
            alignment_start,
            alignment_end,
        })
    }

    /// Returns the chromosome name.
    pub fn chromosome_name(&self) -> &str {
        &self.chromosome_name
    }

    /// Returns the chromosome size.
    pub fn chromosome_size(&self) -> Number {
        self.chromosome_size
    }

    /// Returns the strand.
    pub fn strand(&self) -> &Strand {
        &self.strand
    }

    /// Returns the alignment start.
    pub fn alignment_start(&self) -> Number {
        self.alignment_start
    }

    /// Returns the alignment end.
    pub fn alignment_end(&self) -> Number {
        self.alignment_end
    }

    /// Converts a zero-based range `[start, end)` expressed on this sequence's
    /// strand into the equivalent range on the positive strand.
    ///
    /// # Examples
    ///
    /// ```
    /// use bedlift::liftover::chain::header::Sequence;
    ///
    /// let sequence = Sequence::try_new("chr1", "100", "-", "0", "100")?;
    /// assert_eq!(sequence.to_forward(10, 20), (80, 90));
    ///
    /// let sequence = Sequence::try_new("chr1", "100", "+", "0", "100")?;
    /// assert_eq!(sequence.to_forward(10, 20), (10, 20));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn to_forward(&self, start: Number, end: Number) -> (Number, Number) {
        match self.strand {
            Strand::Positive => (start, end),
            Strand::Negative => (self.chromosome_size - end, self.chromosome_size - start),
        }
    }
}

impl std::fmt::Display for Sequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.chromosome_name,
            self.chromosome_size,
            self.strand,
            self.alignment_start,
            self.alignment_end
        )
    }
}
