//! An alignment section: a header and its alignment data.

use omics::coordinate::position::Number;

use crate::liftover::chain::data;
use crate::liftover::chain::header;

/// An error related to a [`Section`].
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// The section contains no alignment data.
    Empty,

    /// The final alignment data record is not a terminating record.
    MissingTerminatingRecord,

    /// The alignment data does not add up to the end coordinates in the
    /// header. The values are the computed reference and query ends.
    Misaligned(Number, Number),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Empty => write!(f, "alignment section contains no alignment data"),
            Error::MissingTerminatingRecord => write!(
                f,
                "alignment section does not end with a terminating alignment data record"
            ),
            Error::Misaligned(reference, query) => write!(
                f,
                "misaligned alignment section: the alignment data ends at {reference} \
                 (reference) and {query} (query), which does not match the header"
            ),
        }
    }
}

impl std::error::Error for Error {}

/// An ungapped block shared by the reference and the query.
///
/// Starts are expressed on the strand of their respective sequence (see
/// [`header::Sequence`]).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Block {
    /// The start of the block within the reference sequence.
    reference_start: Number,

    /// The start of the block within the query sequence.
    query_start: Number,

    /// The number of bases in the block.
    size: Number,
}

impl Block {
    /// Gets the start of the block within the reference sequence.
    pub fn reference_start(&self) -> Number {
        self.reference_start
    }

    /// Gets the start of the block within the query sequence.
    pub fn query_start(&self) -> Number {
        self.query_start
    }

    /// Gets the number of bases in the block.
    pub fn size(&self) -> Number {
        self.size
    }
}

/// An alignment section within a chain file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Section {
    /// The header.
    header: header::Record,

    /// The alignment data.
    data: Vec<data::Record>,
}

impl Section {
    /// Attempts to create a new [`Section`], checking that the alignment data
    /// covers exactly the region described in the header.
    ///
    /// # Examples
    ///
    /// ```
    /// use bedlift::liftover::chain::Section;
    /// use bedlift::liftover::chain::data;
    /// use bedlift::liftover::chain::header;
    ///
    /// let header = "chain 0 chr1 10 + 0 10 chr1 12 + 0 12 1".parse::<header::Record>()?;
    /// let data = vec![
    ///     data::Record::nonterminating(4, 0, 2),
    ///     data::Record::terminating(6),
    /// ];
    ///
    /// let section = Section::try_new(header, data)?;
    /// assert_eq!(section.data().len(), 2);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(header: header::Record, data: Vec<data::Record>) -> Result<Self, Error> {
        match data.last() {
            None => return Err(Error::Empty),
            Some(record) if !record.is_terminating() => {
                return Err(Error::MissingTerminatingRecord);
            }
            _ => {}
        }

        let section = Self { header, data };

        let (reference, query) = section.ends();
        if reference != section.header.reference_sequence().alignment_end()
            || query != section.header.query_sequence().alignment_end()
        {
            return Err(Error::Misaligned(reference, query));
        }

        Ok(section)
    }

    /// Gets the header.
    pub fn header(&self) -> &header::Record {
        &self.header
    }

    /// Gets the alignment data.
    pub fn data(&self) -> &[data::Record] {
        &self.data
    }

    /// Returns an iterator over the ungapped blocks in the section.
    ///
    /// # Examples
    ///
    /// ```
    /// use bedlift::liftover::chain;
    ///
    /// let data = b"chain 0 chr1 10 + 0 10 chr1 12 + 0 12 1\n4\t0\t2\n6\n";
    /// let mut reader = chain::Reader::new(&data[..]);
    /// let section = reader.sections().next().unwrap()?;
    ///
    /// let blocks = section.blocks().collect::<Vec<_>>();
    /// assert_eq!(blocks[1].reference_start(), 4);
    /// assert_eq!(blocks[1].query_start(), 6);
    /// assert_eq!(blocks[1].size(), 6);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn blocks(&self) -> impl Iterator<Item = Block> + '_ {
        let mut reference = self.header.reference_sequence().alignment_start();
        let mut query = self.header.query_sequence().alignment_start();

        self.data.iter().map(move |record| {
            let block = Block {
                reference_start: reference,
                query_start: query,
                size: record.size(),
            };

            reference += record.size() + record.dt().unwrap_or_default();
            query += record.size() + record.dq().unwrap_or_default();

            block
        })
    }

    /// Computes where the alignment data ends in the reference and query.
    fn ends(&self) -> (Number, Number) {
        self.data.iter().fold(
            (
                self.header.reference_sequence().alignment_start(),
                self.header.query_sequence().alignment_start(),
            ),
            |(reference, query), record| {
                (
                    reference
                        .saturating_add(record.size())
                        .saturating_add(record.dt().unwrap_or_default()),
                    query
                        .saturating_add(record.size())
                        .saturating_add(record.dq().unwrap_or_default()),
                )
            },
        )
    }
}
