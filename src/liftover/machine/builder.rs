//! A builder for a [`Machine`].

use std::collections::HashMap;
use std::io::BufRead;
use std::sync::Arc;

use omics::coordinate::position::Number;
use rust_lapper as lapper;
use tracing::debug;

use crate::liftover::Machine;
use crate::liftover::chain;
use crate::liftover::machine::Segment;

/// The inner value of the liftover lookup data structure.
type Iv = lapper::Interval<Number, Segment>;

/// An error related to building a [`Machine`].
#[derive(Debug)]
pub enum Error {
    /// An error reading alignment sections.
    InvalidSections(chain::reader::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidSections(err) => write!(f, "invalid chain file: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A builder for a [`Machine`].
#[derive(Debug, Default)]
pub struct Builder;

impl Builder {
    /// Builds a [`Machine`] from every section in a chain file.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"chain 0 seq0 4 + 0 4 seq0 5 - 0 5 1\n3\t0\t1\n1\n";
    /// let reader = bedlift::liftover::chain::Reader::new(&data[..]);
    ///
    /// let machine = bedlift::liftover::machine::Builder.try_build_from(reader)?;
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_build_from<T>(&self, mut reader: chain::Reader<T>) -> Result<Machine>
    where
        T: BufRead,
    {
        let mut hm = HashMap::<String, Vec<Iv>>::default();
        let mut query_chromosomes = HashMap::<String, Arc<str>>::default();
        let mut sections = 0usize;

        for result in reader.sections() {
            let section = result.map_err(Error::InvalidSections)?;
            let header = section.header();
            let reference = header.reference_sequence();
            let query = header.query_sequence();

            let query_chromosome = query_chromosomes
                .entry(query.chromosome_name().to_string())
                .or_insert_with(|| Arc::from(query.chromosome_name()))
                .clone();

            let entry = hm
                .entry(reference.chromosome_name().to_string())
                .or_default();

            for block in section.blocks().filter(|block| block.size() > 0) {
                let (start, stop) = reference.to_forward(
                    block.reference_start(),
                    block.reference_start() + block.size(),
                );

                entry.push(lapper::Interval {
                    start,
                    stop,
                    val: Segment {
                        reference_size: reference.chromosome_size(),
                        reference_strand: reference.strand().clone(),
                        reference_start: block.reference_start(),
                        query_chromosome: query_chromosome.clone(),
                        query_size: query.chromosome_size(),
                        query_strand: query.strand().clone(),
                        query_start: block.query_start(),
                        score: header.score(),
                    },
                });
            }

            sections += 1;
        }

        let inner = hm
            .into_iter()
            .map(|(chromosome, intervals)| (chromosome, lapper::Lapper::new(intervals)))
            .collect::<HashMap<_, _>>();

        debug!(
            "built liftover machine from {sections} chain sections across {} reference \
             chromosomes",
            inner.len()
        );

        Ok(Machine { inner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_chain_file() {
        let data = b"chain 0 seq0 4 + 0 4 seq0 5 - 0 5 1\n3\t0\t1\n";
        let err = Builder
            .try_build_from(chain::Reader::new(&data[..]))
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "invalid chain file: the file abruptly ended in the middle of an alignment section"
        );
    }

    #[test]
    fn empty_chain_file() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let machine = Builder.try_build_from(chain::Reader::new(&b""[..]))?;

        assert_eq!(machine.reference_chromosomes().count(), 0);
        assert!(machine.lookup("chr1", 0).is_empty());

        Ok(())
    }
}
