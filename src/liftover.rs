//! Facilities for lifting over intervals between genome builds.
//!
//! The orchestration (see [`convert()`]) never maps coordinates itself.
//! Instead, it asks a [`Resolve`] implementation where a single position lands
//! in the target assembly. The crate ships one implementation,
//! [`ChainService`], which is backed by a UCSC chain file, but anything that
//! implements [`Resolve`] (a remote service, a fixture in a test, ...) can be
//! swapped in.

use omics::coordinate::Strand;
use omics::coordinate::position::Number;
use tracing::trace;

use crate::Assembly;
use crate::Direction;

pub mod chain;
pub mod convert;
pub mod machine;

pub use convert::Conversion;
pub use convert::Outcome;
pub use convert::WriteError;
pub use convert::Written;
pub use convert::convert;
pub use convert::convert_record;
pub use machine::Machine;

/// A candidate location for a position in the target assembly.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Candidate {
    /// The chromosome in the target assembly.
    chromosome: String,

    /// The zero-based position in the target assembly.
    position: Number,

    /// The strand of the target relative to the source.
    strand: Strand,

    /// The score of the alignment that produced this candidate.
    score: Number,
}

impl Candidate {
    /// Creates a new [`Candidate`].
    ///
    /// # Examples
    ///
    /// ```
    /// use bedlift::liftover::Candidate;
    /// use omics::coordinate::Strand;
    ///
    /// let candidate = Candidate::new("chr1", 1000, Strand::Positive, 0);
    ///
    /// assert_eq!(candidate.chromosome(), "chr1");
    /// assert_eq!(candidate.position(), 1000);
    /// assert_eq!(candidate.strand(), &Strand::Positive);
    /// ```
    pub fn new(
        chromosome: impl Into<String>,
        position: Number,
        strand: Strand,
        score: Number,
    ) -> Self {
        Self {
            chromosome: chromosome.into(),
            position,
            strand,
            score,
        }
    }

    /// Gets the chromosome in the target assembly.
    pub fn chromosome(&self) -> &str {
        &self.chromosome
    }

    /// Gets the zero-based position in the target assembly.
    pub fn position(&self) -> Number {
        self.position
    }

    /// Gets the strand of the target relative to the source.
    pub fn strand(&self) -> &Strand {
        &self.strand
    }

    /// Gets the score of the alignment that produced this candidate.
    pub fn score(&self) -> Number {
        self.score
    }
}

/// A service that resolves single positions from one assembly to another.
///
/// An empty list means the position could not be resolved. Otherwise, the
/// first candidate is the primary mapping and any others are lower
/// confidence alternatives (e.g., for regions that split in the target
/// assembly).
pub trait Resolve {
    /// Resolves a zero-based `position` on `chromosome` in the `source`
    /// assembly to its candidate locations in the `target` assembly.
    fn resolve(
        &self,
        chromosome: &str,
        position: Number,
        source: Assembly,
        target: Assembly,
    ) -> Vec<Candidate>;
}

impl<R> Resolve for &R
where
    R: Resolve + ?Sized,
{
    fn resolve(
        &self,
        chromosome: &str,
        position: Number,
        source: Assembly,
        target: Assembly,
    ) -> Vec<Candidate> {
        (**self).resolve(chromosome, position, source, target)
    }
}

/// A [`Resolve`] implementation backed by the chain file for one
/// [`Direction`].
///
/// Queries for any other pair of assemblies resolve to nothing.
#[derive(Debug)]
pub struct ChainService {
    /// The direction the chain file lifts over in.
    direction: Direction,

    /// The lookup machine built from the chain file.
    machine: Machine,
}

impl ChainService {
    /// Creates a new [`ChainService`] for `direction` from a [`Machine`] built
    /// from that direction's chain file.
    pub fn new(direction: Direction, machine: Machine) -> Self {
        Self { direction, machine }
    }

    /// Gets the direction this service lifts over in.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Gets the inner lookup machine.
    pub fn machine(&self) -> &Machine {
        &self.machine
    }
}

impl Resolve for ChainService {
    fn resolve(
        &self,
        chromosome: &str,
        position: Number,
        source: Assembly,
        target: Assembly,
    ) -> Vec<Candidate> {
        if self.direction.assemblies() != (source, target) {
            trace!(
                "chain service for {} cannot resolve {source} -> {target}",
                self.direction
            );
            return Vec::new();
        }

        self.machine.lookup(chromosome, position)
    }
}
