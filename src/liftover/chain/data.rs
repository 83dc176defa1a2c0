//! An alignment data record.

use std::num::ParseIntError;
use std::str::FromStr;

use omics::coordinate::position::Number;

/// The number of expected fields in a non-terminating alignment data record.
pub const NUM_ALIGNMENT_DATA_FIELDS_NONTERMINATING: usize = 3;

/// The number of expected fields in a terminating alignment data record.
pub const NUM_ALIGNMENT_DATA_FIELDS_TERMINATING: usize = 1;

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error related to the parsing of an alignment data record.
#[derive(Debug)]
pub enum ParseError {
    /// An incorrect number of fields in the alignment data line.
    IncorrectNumberOfFields(usize),

    /// An invalid size.
    InvalidSize(ParseIntError),

    /// An invalid dt.
    InvalidDt(ParseIntError),

    /// An invalid dq.
    InvalidDq(ParseIntError),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::IncorrectNumberOfFields(n) => write!(
                f,
                "invalid number of fields in alignment data: expected \
                 {NUM_ALIGNMENT_DATA_FIELDS_NONTERMINATING} (non-terminating) or \
                 {NUM_ALIGNMENT_DATA_FIELDS_TERMINATING} (terminating) fields, found {n} fields"
            ),
            ParseError::InvalidSize(err) => write!(f, "invalid size: {err}"),
            ParseError::InvalidDt(err) => write!(f, "invalid dt: {err}"),
            ParseError::InvalidDq(err) => write!(f, "invalid dq: {err}"),
        }
    }
}

impl std::error::Error for ParseError {}

////////////////////////////////////////////////////////////////////////////////////////
// Record
////////////////////////////////////////////////////////////////////////////////////////

/// An alignment data record within a chain file.
///
/// Every record describes an ungapped block of `size` bases. All records
/// except the last one in a section also describe the gap that follows the
/// block: `dt` bases in the source sequence and `dq` bases in the target
/// sequence.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    /// The size of the ungapped block.
    size: Number,

    /// The gaps following the block as `(dt, dq)`, if any.
    gaps: Option<(Number, Number)>,
}

impl Record {
    /// Creates a non-terminating record.
    ///
    /// # Examples
    ///
    /// ```
    /// use bedlift::liftover::chain::data::Record;
    ///
    /// let record = Record::nonterminating(10, 0, 1);
    ///
    /// assert_eq!(record.size(), 10);
    /// assert_eq!(record.dt(), Some(0));
    /// assert_eq!(record.dq(), Some(1));
    /// assert!(!record.is_terminating());
    /// ```
    pub fn nonterminating(size: Number, dt: Number, dq: Number) -> Self {
        Self {
            size,
            gaps: Some((dt, dq)),
        }
    }

    /// Creates a terminating record.
    ///
    /// # Examples
    ///
    /// ```
    /// use bedlift::liftover::chain::data::Record;
    ///
    /// let record = Record::terminating(10);
    ///
    /// assert_eq!(record.size(), 10);
    /// assert_eq!(record.dt(), None);
    /// assert!(record.is_terminating());
    /// ```
    pub fn terminating(size: Number) -> Self {
        Self { size, gaps: None }
    }

    /// Returns the size of the ungapped block.
    pub fn size(&self) -> Number {
        self.size
    }

    /// Returns the gap between this block and the next block in the source
    /// sequence.
    pub fn dt(&self) -> Option<Number> {
        self.gaps.map(|(dt, _)| dt)
    }

    /// Returns the gap between this block and the next block in the target
    /// sequence.
    pub fn dq(&self) -> Option<Number> {
        self.gaps.map(|(_, dq)| dq)
    }

    /// Returns whether this record is the last one in its section.
    pub fn is_terminating(&self) -> bool {
        self.gaps.is_none()
    }
}

impl FromStr for Record {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s.split_whitespace().collect::<Vec<_>>();

        match parts.len() {
            NUM_ALIGNMENT_DATA_FIELDS_TERMINATING => {
                let size = parts[0].parse().map_err(ParseError::InvalidSize)?;
                Ok(Record::terminating(size))
            }
            NUM_ALIGNMENT_DATA_FIELDS_NONTERMINATING => {
                let size = parts[0].parse().map_err(ParseError::InvalidSize)?;
                let dt = parts[1].parse().map_err(ParseError::InvalidDt)?;
                let dq = parts[2].parse().map_err(ParseError::InvalidDq)?;
                Ok(Record::nonterminating(size, dt, dq))
            }
            n => Err(ParseError::IncorrectNumberOfFields(n)),
        }
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.size)?;

        if let Some((dt, dq)) = self.gaps {
            write!(f, "\t{dt}\t{dq}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonterminating_alignment_data() {
        let record = "9\t1\t0".parse::<Record>().unwrap();

        assert_eq!(record.size(), 9);
        assert_eq!(record.dt(), Some(1));
        assert_eq!(record.dq(), Some(0));
        assert!(!record.is_terminating());
    }

    #[test]
    fn space_delimited_alignment_data() {
        let record = "9 1 0".parse::<Record>().unwrap();
        assert_eq!(record, Record::nonterminating(9, 1, 0));
    }

    #[test]
    fn terminating_alignment_data() {
        let record = "9".parse::<Record>().unwrap();

        assert_eq!(record.size(), 9);
        assert_eq!(record.dt(), None);
        assert_eq!(record.dq(), None);
        assert!(record.is_terminating());
    }

    #[test]
    fn invalid_number_of_fields() {
        let err = "9\t0".parse::<Record>().unwrap_err();

        assert!(matches!(err, ParseError::IncorrectNumberOfFields(2)));
        assert_eq!(
            err.to_string(),
            "invalid number of fields in alignment data: expected 3 (non-terminating) or 1 \
             (terminating) fields, found 2 fields"
        );
    }

    #[test]
    fn invalid_size() {
        let err = "?\t0\t1".parse::<Record>().unwrap_err();

        assert!(matches!(err, ParseError::InvalidSize(_)));
        assert_eq!(err.to_string(), "invalid size: invalid digit found in string");
    }

    #[test]
    fn invalid_dt() {
        let err = "9\t?\t1".parse::<Record>().unwrap_err();

        assert!(matches!(err, ParseError::InvalidDt(_)));
        assert_eq!(err.to_string(), "invalid dt: invalid digit found in string");
    }

    #[test]
    fn invalid_dq() {
        let err = "9\t0\t?".parse::<Record>().unwrap_err();

        assert!(matches!(err, ParseError::InvalidDq(_)));
        assert_eq!(err.to_string(), "invalid dq: invalid digit found in string");
    }

    #[test]
    fn display() {
        assert_eq!(Record::nonterminating(9, 1, 0).to_string(), "9\t1\t0");
        assert_eq!(Record::terminating(9).to_string(), "9");
    }
}
