//! A machine for looking up where positions land in another genome build.

use std::collections::HashMap;
use std::sync::Arc;

use omics::coordinate::Strand;
use omics::coordinate::position::Number;
use rust_lapper as lapper;

use crate::liftover::Candidate;

pub mod builder;

pub use builder::Builder;

/// An ungapped block of a chain, ready to project positions through.
///
/// The reference and query starts are expressed on the strand of their
/// respective sequence, exactly as they appear in the chain file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Segment {
    /// The size of the reference chromosome.
    reference_size: Number,

    /// The strand of the reference sequence.
    reference_strand: Strand,

    /// The start of the block on the reference strand.
    reference_start: Number,

    /// The query chromosome name.
    query_chromosome: Arc<str>,

    /// The size of the query chromosome.
    query_size: Number,

    /// The strand of the query sequence.
    query_strand: Strand,

    /// The start of the block on the query strand.
    query_start: Number,

    /// The score of the chain the block belongs to.
    score: Number,
}

impl Segment {
    /// Projects a positive-strand reference `position` that falls within this
    /// segment to the positive strand of the query.
    fn project(&self, position: Number) -> Candidate {
        let reference = match self.reference_strand {
            Strand::Positive => position,
            Strand::Negative => self.reference_size - 1 - position,
        };

        let query = self.query_start + (reference - self.reference_start);

        let query = match self.query_strand {
            Strand::Positive => query,
            Strand::Negative => self.query_size - 1 - query,
        };

        let strand = if self.reference_strand == self.query_strand {
            Strand::Positive
        } else {
            Strand::Negative
        };

        Candidate::new(&*self.query_chromosome, query, strand, self.score)
    }
}

/// A machine for lifting over positions from a reference genome to a query
/// genome.
///
/// Generally, you will want to use a [`builder::Builder`] to construct one of
/// these.
#[derive(Debug)]
pub struct Machine {
    /// The inner lookup table of positive-strand reference positions to
    /// segments for each chromosome in the reference genome.
    inner: HashMap<String, lapper::Lapper<Number, Segment>>,
}

impl Machine {
    /// Looks up every location a zero-based `position` on `chromosome` maps
    /// to in the query genome.
    ///
    /// The candidates are sorted by descending chain score, so the first
    /// candidate (if any) is the primary mapping. Positions are always
    /// reported on the positive strand of the query chromosome.
    ///
    /// # Examples
    ///
    /// ```
    /// use bedlift::liftover::chain;
    /// use bedlift::liftover::machine;
    ///
    /// let data = b"chain 0 chr1 10 + 0 10 chr2 20 + 10 20 1\n10\n";
    /// let machine = machine::Builder.try_build_from(chain::Reader::new(&data[..]))?;
    ///
    /// let candidates = machine.lookup("chr1", 3);
    /// assert_eq!(candidates[0].chromosome(), "chr2");
    /// assert_eq!(candidates[0].position(), 13);
    ///
    /// assert!(machine.lookup("chr1", 10).is_empty());
    /// assert!(machine.lookup("chr3", 3).is_empty());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn lookup(&self, chromosome: &str, position: Number) -> Vec<Candidate> {
        let Some(segments) = self.inner.get(chromosome) else {
            return Vec::new();
        };

        let mut candidates = segments
            .find(position, position.saturating_add(1))
            .map(|interval| interval.val.project(position))
            .collect::<Vec<_>>();

        candidates.sort_by(|a, b| b.score().cmp(&a.score()));
        candidates
    }

    /// Returns an iterator over the reference chromosomes known to the
    /// machine.
    pub fn reference_chromosomes(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(|chromosome| chromosome.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::liftover::chain::Reader;
    use crate::liftover::machine;

    /// Builds a machine from the textual chain file in `data`.
    fn build(data: &[u8]) -> Machine {
        machine::Builder.try_build_from(Reader::new(data)).unwrap()
    }

    /// Looks up the primary `(chromosome, position)` for a position.
    fn primary(machine: &Machine, chromosome: &str, position: Number) -> Option<(String, Number)> {
        machine
            .lookup(chromosome, position)
            .first()
            .map(|c| (c.chromosome().to_string(), c.position()))
    }

    #[test]
    fn positive_to_positive_with_gap() {
        let machine = build(b"chain 100 chr1 20 + 0 20 chr1 30 + 5 23 1\n8\t2\t0\n10\n");

        assert_eq!(primary(&machine, "chr1", 0), Some((String::from("chr1"), 5)));
        assert_eq!(primary(&machine, "chr1", 7), Some((String::from("chr1"), 12)));
        assert_eq!(primary(&machine, "chr1", 8), None);
        assert_eq!(primary(&machine, "chr1", 9), None);
        assert_eq!(primary(&machine, "chr1", 10), Some((String::from("chr1"), 13)));
        assert_eq!(primary(&machine, "chr1", 19), Some((String::from("chr1"), 22)));
        assert_eq!(primary(&machine, "chr1", 20), None);
    }

    #[test]
    fn positive_to_negative() {
        let machine = build(b"chain 50 chr1 10 + 0 10 chr2 100 - 10 20 1\n10\n");

        let candidates = machine.lookup("chr1", 0);
        assert_eq!(
            candidates,
            vec![Candidate::new("chr2", 89, Strand::Negative, 50)]
        );

        assert_eq!(primary(&machine, "chr1", 9), Some((String::from("chr2"), 80)));
    }

    #[test]
    fn negative_reference() {
        let machine = build(b"chain 5 chr1 10 - 0 4 chr2 10 + 2 6 1\n4\n");

        assert_eq!(
            machine.lookup("chr1", 6),
            vec![Candidate::new("chr2", 5, Strand::Negative, 5)]
        );
        assert_eq!(primary(&machine, "chr1", 9), Some((String::from("chr2"), 2)));
        assert_eq!(primary(&machine, "chr1", 5), None);
    }

    #[test]
    fn candidates_are_sorted_by_score() {
        let machine = build(
            b"chain 10 chr1 10 + 0 10 chr1 10 + 0 10 1\n10\n\n\
              chain 20 chr1 10 + 0 5 chr5 10 + 5 10 2\n5\n",
        );

        assert_eq!(
            machine.lookup("chr1", 2),
            vec![
                Candidate::new("chr5", 7, Strand::Positive, 20),
                Candidate::new("chr1", 2, Strand::Positive, 10),
            ]
        );

        assert_eq!(
            machine.lookup("chr1", 7),
            vec![Candidate::new("chr1", 7, Strand::Positive, 10)]
        );
    }

    #[test]
    fn reference_chromosomes() {
        let machine = build(
            b"chain 10 chr1 10 + 0 10 chr1 10 + 0 10 1\n10\n\n\
              chain 20 chr2 10 + 0 5 chr5 10 + 5 10 2\n5\n",
        );

        let mut chromosomes = machine.reference_chromosomes().collect::<Vec<_>>();
        chromosomes.sort();

        assert_eq!(chromosomes, vec!["chr1", "chr2"]);
    }
}
