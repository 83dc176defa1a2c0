//! A line within a chain file.

use std::str::FromStr;

use crate::liftover::chain::data;
use crate::liftover::chain::header;
use crate::liftover::chain::header::HEADER_PREFIX;

/// The prefix of a comment line.
pub const COMMENT_PREFIX: char = '#';

/// An error associated with parsing a line of a chain file.
#[derive(Debug)]
pub enum ParseError {
    /// An invalid header record.
    InvalidHeaderRecord(header::ParseError),

    /// An invalid alignment data record.
    InvalidAlignmentDataRecord(data::ParseError),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidHeaderRecord(err) => write!(f, "invalid header record: {err}"),
            ParseError::InvalidAlignmentDataRecord(err) => {
                write!(f, "invalid alignment data record: {err}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// A line within a chain file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Line {
    /// An empty (or whitespace-only) line.
    Empty,

    /// A comment line.
    Comment,

    /// A header line.
    Header(header::Record),

    /// An alignment data line.
    AlignmentData(data::Record),
}

impl FromStr for Line {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.is_empty() {
            Ok(Self::Empty)
        } else if s.starts_with(COMMENT_PREFIX) {
            Ok(Self::Comment)
        } else if s.starts_with(HEADER_PREFIX) {
            s.parse()
                .map(Line::Header)
                .map_err(ParseError::InvalidHeaderRecord)
        } else {
            s.parse()
                .map(Line::AlignmentData)
                .map_err(ParseError::InvalidAlignmentDataRecord)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_lines() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!("".parse::<Line>()?, Line::Empty);
        assert_eq!(" \t".parse::<Line>()?, Line::Empty);
        assert_eq!("#comment".parse::<Line>()?, Line::Comment);
        assert!(matches!(
            "chain 0 seq0 2 + 0 2 seq0 2 - 0 2 1".parse::<Line>()?,
            Line::Header(_)
        ));
        assert_eq!(
            "9\t0\t1".parse::<Line>()?,
            Line::AlignmentData(data::Record::nonterminating(9, 0, 1))
        );
        assert_eq!(
            "9".parse::<Line>()?,
            Line::AlignmentData(data::Record::terminating(9))
        );

        Ok(())
    }

    #[test]
    fn test_invalid_header_line() {
        let err = "chain 0 seq0 2 + 0 2 seq0 2 - 0 2 ?"
            .parse::<Line>()
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "invalid header record: invalid id: invalid digit found in string"
        );
    }

    #[test]
    fn test_invalid_alignment_data_line() {
        let err = "9\t1".parse::<Line>().unwrap_err();

        assert_eq!(
            err.to_string(),
            "invalid alignment data record: invalid number of fields in alignment data: \
             expected 3 (non-terminating) or 1 (terminating) fields, found 2 fields"
        );
    }
}
