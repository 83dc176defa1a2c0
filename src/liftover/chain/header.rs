//! A header record.

pub mod sequence;

use std::num::ParseIntError;
use std::str::FromStr;

use omics::coordinate::position::Number;
pub use sequence::Sequence;

/// The prefix for a header record.
pub const HEADER_PREFIX: &str = "chain";

/// The number of expected fields in a header record.
pub const NUM_HEADER_FIELDS: usize = 13;

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error associated with parsing a header record.
#[derive(Debug)]
pub enum ParseError {
    /// An incorrect number of fields in the header line.
    IncorrectNumberOfFields(usize),

    /// An invalid prefix.
    InvalidPrefix(String),

    /// An invalid score.
    InvalidScore(ParseIntError),

    /// An invalid reference sequence.
    InvalidReferenceSequence(sequence::Error),

    /// An invalid query sequence.
    InvalidQuerySequence(sequence::Error),

    /// An invalid id.
    InvalidId(ParseIntError),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::IncorrectNumberOfFields(fields) => write!(
                f,
                "invalid number of fields in header: expected {NUM_HEADER_FIELDS} fields, found \
                 {fields} fields"
            ),
            ParseError::InvalidPrefix(prefix) => {
                write!(
                    f,
                    "invalid prefix: expected \"{HEADER_PREFIX}\", found \"{prefix}\""
                )
            }
            ParseError::InvalidScore(err) => write!(f, "invalid score: {err}"),
            ParseError::InvalidReferenceSequence(err) => {
                write!(f, "invalid reference sequence: {err}")
            }
            ParseError::InvalidQuerySequence(err) => write!(f, "invalid query sequence: {err}"),
            ParseError::InvalidId(err) => write!(f, "invalid id: {err}"),
        }
    }
}

impl std::error::Error for ParseError {}

////////////////////////////////////////////////////////////////////////////////////////
// Record
////////////////////////////////////////////////////////////////////////////////////////

/// A header record within a chain file.
///
/// The reference sequence is the assembly being lifted over from, and the
/// query sequence is the assembly being lifted over to.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    /// The chain score.
    score: Number,

    /// The reference sequence.
    reference_sequence: Sequence,

    /// The query sequence.
    query_sequence: Sequence,

    /// The chain id.
    id: Number,
}

impl Record {
    /// Gets the score.
    ///
    /// # Examples
    ///
    /// ```
    /// use bedlift::liftover::chain::header;
    ///
    /// let header = "chain 4900 chr1 10 + 0 10 chr5 20 - 3 13 7".parse::<header::Record>()?;
    /// assert_eq!(header.score(), 4900);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn score(&self) -> Number {
        self.score
    }

    /// Gets the reference sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use bedlift::liftover::chain::header;
    /// use omics::coordinate::Strand;
    ///
    /// let header = "chain 4900 chr1 10 + 0 10 chr5 20 - 3 13 7".parse::<header::Record>()?;
    ///
    /// assert_eq!(header.reference_sequence().chromosome_name(), "chr1");
    /// assert_eq!(header.reference_sequence().strand(), &Strand::Positive);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn reference_sequence(&self) -> &Sequence {
        &self.reference_sequence
    }

    /// Gets the query sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use bedlift::liftover::chain::header;
    /// use omics::coordinate::Strand;
    ///
    /// let header = "chain 4900 chr1 10 + 0 10 chr5 20 - 3 13 7".parse::<header::Record>()?;
    ///
    /// assert_eq!(header.query_sequence().chromosome_name(), "chr5");
    /// assert_eq!(header.query_sequence().strand(), &Strand::Negative);
    /// assert_eq!(header.query_sequence().alignment_start(), 3);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn query_sequence(&self) -> &Sequence {
        &self.query_sequence
    }

    /// Gets the id.
    pub fn id(&self) -> Number {
        self.id
    }
}

impl FromStr for Record {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s.split_whitespace().collect::<Vec<_>>();

        if parts.len() != NUM_HEADER_FIELDS {
            return Err(ParseError::IncorrectNumberOfFields(parts.len()));
        }

        if parts[0] != HEADER_PREFIX {
            return Err(ParseError::InvalidPrefix(parts[0].into()));
        }

        let score = parts[1].parse().map_err(ParseError::InvalidScore)?;
        let reference_sequence =
            Sequence::try_new(parts[2], parts[3], parts[4], parts[5], parts[6])
                .map_err(ParseError::InvalidReferenceSequence)?;
        let query_sequence = Sequence::try_new(parts[7], parts[8], parts[9], parts[10], parts[11])
            .map_err(ParseError::InvalidQuerySequence)?;
        let id = parts[12].parse().map_err(ParseError::InvalidId)?;

        Ok(Record {
            score,
            reference_sequence,
            query_sequence,
            id,
        })
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{HEADER_PREFIX} {} {} {} {}",
            self.score, self.reference_sequence, self.query_sequence, self.id
        )
    }
}

#[cfg(test)]
mod tests {
    use omics::coordinate::Strand;

    use super::*;

    #[test]
    pub fn parse() {
        let header = "chain 0 seq0 2 + 0 2 seq1 3 - 1 3 1"
            .parse::<Record>()
            .unwrap();

        assert_eq!(header.score(), 0);

        assert_eq!(header.reference_sequence().chromosome_name(), "seq0");
        assert_eq!(header.reference_sequence().chromosome_size(), 2);
        assert_eq!(header.reference_sequence().strand(), &Strand::Positive);
        assert_eq!(header.reference_sequence().alignment_start(), 0);
        assert_eq!(header.reference_sequence().alignment_end(), 2);

        assert_eq!(header.query_sequence().chromosome_name(), "seq1");
        assert_eq!(header.query_sequence().chromosome_size(), 3);
        assert_eq!(header.query_sequence().strand(), &Strand::Negative);
        assert_eq!(header.query_sequence().alignment_start(), 1);
        assert_eq!(header.query_sequence().alignment_end(), 3);

        assert_eq!(header.id(), 1);
    }

    #[test]
    fn incorrect_number_of_fields() {
        let err = "chain 0 seq0 2 + 0 2 seq0 2 - 0 2"
            .parse::<Record>()
            .unwrap_err();

        assert!(matches!(err, ParseError::IncorrectNumberOfFields(12)));
        assert_eq!(
            err.to_string(),
            "invalid number of fields in header: expected 13 fields, found 12 fields"
        );
    }

    #[test]
    fn invalid_prefix() {
        let err = "foo 0 seq0 2 + 0 2 seq0 2 - 0 2 1"
            .parse::<Record>()
            .unwrap_err();

        assert!(matches!(err, ParseError::InvalidPrefix(_)));
        assert_eq!(
            err.to_string(),
            "invalid prefix: expected \"chain\", found \"foo\""
        );
    }

    #[test]
    fn invalid_score() {
        let err = "chain ? seq0 2 + 0 2 seq0 2 - 0 2 1"
            .parse::<Record>()
            .unwrap_err();

        assert!(matches!(err, ParseError::InvalidScore(_)));
        assert_eq!(err.to_string(), "invalid score: invalid digit found in string");
    }

    #[test]
    fn invalid_reference_sequence() {
        let err = "chain 0 seq0 ? + 0 2 seq0 2 - 0 2 1"
            .parse::<Record>()
            .unwrap_err();

        assert!(matches!(err, ParseError::InvalidReferenceSequence(_)));
        assert_eq!(
            err.to_string(),
            "invalid reference sequence: parse error: invalid chromosome size: invalid digit \
             found in string"
        );
    }

    #[test]
    fn invalid_query_sequence() {
        let err = "chain 0 seq0 2 + 0 2 seq0 2 - 0 3 1"
            .parse::<Record>()
            .unwrap_err();

        assert!(matches!(err, ParseError::InvalidQuerySequence(_)));
        assert_eq!(
            err.to_string(),
            "invalid query sequence: the alignment end (3) exceeds the size of the chromosome (2)"
        );
    }

    #[test]
    fn invalid_id() {
        let err = "chain 0 seq0 2 + 0 2 seq0 2 - 0 2 ?"
            .parse::<Record>()
            .unwrap_err();

        assert!(matches!(err, ParseError::InvalidId(_)));
        assert_eq!(err.to_string(), "invalid id: invalid digit found in string");
    }

    #[test]
    pub fn display() {
        let header = "chain 0 seq0 2 + 0 2 seq0 2 - 0 2 1"
            .parse::<Record>()
            .unwrap();

        assert_eq!(header.to_string(), "chain 0 seq0 2 + 0 2 seq0 2 - 0 2 1");
    }
}
