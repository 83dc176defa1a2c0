//! Converting BED-like records from one assembly to another.

use std::fs::File;
use std::io;
use std::io::BufWriter;
use std::path::Path;

use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::Direction;
use crate::Record;
use crate::bed;
use crate::liftover::Resolve;
use crate::normalize::with_chromosome_prefix;

/// An error related to writing a [`Conversion`] to disk.
#[derive(Debug)]
pub enum WriteError {
    /// An error writing the converted records.
    Converted(io::Error),

    /// An error writing the unmapped records.
    Unmapped(io::Error),
}

impl std::fmt::Display for WriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteError::Converted(err) => write!(f, "writing converted records: {err}"),
            WriteError::Unmapped(err) => write!(f, "writing unmapped records: {err}"),
        }
    }
}

impl std::error::Error for WriteError {}

/// The number of records written by [`Conversion::write_to()`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Written {
    /// The number of converted records written.
    converted: usize,

    /// The number of unmapped records written, if the unmapped file was
    /// written at all.
    unmapped: Option<usize>,
}

impl Written {
    /// Gets the number of converted records written.
    pub fn converted(&self) -> usize {
        self.converted
    }

    /// Gets the number of unmapped records written.
    ///
    /// This is [`None`] when every record was converted, in which case no
    /// unmapped file is created.
    pub fn unmapped(&self) -> Option<usize> {
        self.unmapped
    }
}

/// Writes records to a new BED file at `path`.
fn write_file(path: &Path, records: &[Record]) -> io::Result<usize> {
    let mut writer = bed::Writer::new(BufWriter::new(File::create(path)?));
    let n = writer.write_records(records)?;
    writer.flush()?;

    Ok(n)
}

/// The outcome of converting a single record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// The record in target assembly coordinates.
    Converted(Record),

    /// The original record, unchanged, because either its start or its end
    /// could not be resolved.
    Unmapped(Record),
}

impl Outcome {
    /// Returns whether the record was converted.
    pub fn is_converted(&self) -> bool {
        matches!(self, Outcome::Converted(_))
    }

    /// Consumes self and returns the inner record.
    pub fn into_record(self) -> Record {
        match self {
            Outcome::Converted(record) | Outcome::Unmapped(record) => record,
        }
    }
}

/// The results of converting a set of records.
///
/// Together, the converted and unmapped records account for every input
/// record exactly once, and each list keeps the order of the input.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Conversion {
    /// The records in target assembly coordinates.
    converted: Vec<Record>,

    /// The records that could not be mapped, in source assembly coordinates.
    unmapped: Vec<Record>,
}

impl Conversion {
    /// Gets the converted records.
    pub fn converted(&self) -> &[Record] {
        &self.converted
    }

    /// Gets the unmapped records.
    pub fn unmapped(&self) -> &[Record] {
        &self.unmapped
    }

    /// Gets the total number of records that were processed.
    pub fn len(&self) -> usize {
        self.converted.len() + self.unmapped.len()
    }

    /// Returns whether no records were processed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consumes self and returns the converted and unmapped records.
    pub fn into_parts(self) -> (Vec<Record>, Vec<Record>) {
        (self.converted, self.unmapped)
    }

    /// Writes the converted records to `converted` and, if any record failed
    /// to map, the unmapped records to `unmapped`.
    ///
    /// The unmapped file is only created when there is something to put in
    /// it, and it is written first.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use bedlift::liftover::Conversion;
    ///
    /// # fn run(conversion: Conversion) -> Result<(), Box<dyn std::error::Error>> {
    /// let written = conversion.write_to("lifted.bed", "failed_mapping.txt")?;
    ///
    /// if let Some(n) = written.unmapped() {
    ///     println!("{n} records could not be mapped");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn write_to(
        &self,
        converted: impl AsRef<Path>,
        unmapped: impl AsRef<Path>,
    ) -> Result<Written, WriteError> {
        let unmapped = if self.unmapped.is_empty() {
            None
        } else {
            Some(write_file(unmapped.as_ref(), &self.unmapped).map_err(WriteError::Unmapped)?)
        };

        let converted =
            write_file(converted.as_ref(), &self.converted).map_err(WriteError::Converted)?;

        Ok(Written {
            converted,
            unmapped,
        })
    }

    /// Adds an outcome to the conversion.
    fn push(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Converted(record) => self.converted.push(record),
            Outcome::Unmapped(record) => self.unmapped.push(record),
        }
    }
}

/// Converts a single record in the given `direction`.
///
/// The start and the end are resolved independently. If both resolve, the
/// converted record takes its chromosome and start from the primary candidate
/// for the start and its end from the primary candidate for the end. The
/// metadata is carried over untouched. If either fails to resolve, the
/// record is returned unchanged as [`Outcome::Unmapped`].
///
/// # Examples
///
/// ```
/// use bedlift::Direction;
/// use bedlift::Record;
/// use bedlift::liftover::Outcome;
/// use bedlift::liftover::chain;
/// use bedlift::liftover::machine;
///
/// let data = b"chain 0 chr1 1000 + 0 1000 chr1 1000 + 0 1000 1\n1000\n";
/// let machine = machine::Builder.try_build_from(chain::Reader::new(&data[..]))?;
/// let service = bedlift::liftover::ChainService::new(Direction::Hg19ToHg38, machine);
///
/// let record = Record::new("1", 10, 20, Vec::new());
/// let outcome = bedlift::liftover::convert_record(Direction::Hg19ToHg38, record, &service);
///
/// assert_eq!(outcome, Outcome::Converted(Record::new("chr1", 10, 20, Vec::new())));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn convert_record<R>(direction: Direction, record: Record, service: &R) -> Outcome
where
    R: Resolve + ?Sized,
{
    let (source, target) = direction.assemblies();

    let (start, end) = {
        let chromosome = with_chromosome_prefix(record.chromosome());

        (
            service.resolve(&chromosome, record.start(), source, target),
            service.resolve(&chromosome, record.end(), source, target),
        )
    };

    let (Some(start), Some(end)) = (start.first(), end.first()) else {
        debug!("unable to map {record} from {source} to {target}");
        return Outcome::Unmapped(record);
    };

    if start.chromosome() != end.chromosome() {
        warn!(
            "the start and end of {record} map to different chromosomes ({} and {}): \
             using {}",
            start.chromosome(),
            end.chromosome(),
            start.chromosome()
        );
    }

    let converted = Record::new(
        start.chromosome(),
        start.position(),
        end.position(),
        record.into_metadata(),
    );

    Outcome::Converted(converted)
}

/// Converts every record in the given `direction`, partitioning them into
/// converted and unmapped records.
///
/// A record that fails to map is never an error: it simply lands in
/// [`Conversion::unmapped()`].
pub fn convert<R, I>(direction: Direction, records: I, service: &R) -> Conversion
where
    R: Resolve + ?Sized,
    I: IntoIterator<Item = Record>,
{
    info!(
        "converting records from {} to {}",
        direction.source(),
        direction.target()
    );

    let mut conversion = Conversion::default();

    for record in records {
        conversion.push(convert_record(direction, record, service));
    }

    info!(
        "converted {} of {} records ({} unmapped)",
        conversion.converted.len(),
        conversion.len(),
        conversion.unmapped.len()
    );

    conversion
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use omics::coordinate::Strand;
    use omics::coordinate::position::Number;
    use tempdir::TempDir;

    use super::*;
    use crate::Assembly;
    use crate::liftover::Candidate;

    /// A deterministic, in-memory [`Resolve`] implementation.
    #[derive(Debug, Default)]
    struct Fixture {
        /// Candidates keyed by the query.
        answers: HashMap<(Assembly, Assembly, String, Number), Vec<Candidate>>,
    }

    impl Fixture {
        /// Registers an answer for a query.
        fn with(
            mut self,
            (source, target): (Assembly, Assembly),
            chromosome: &str,
            position: Number,
            candidates: Vec<(&str, Number)>,
        ) -> Self {
            let candidates = candidates
                .into_iter()
                .map(|(chromosome, position)| {
                    Candidate::new(chromosome, position, Strand::Positive, 0)
                })
                .collect();

            self.answers.insert(
                (source, target, chromosome.to_string(), position),
                candidates,
            );
            self
        }
    }

    impl Resolve for Fixture {
        fn resolve(
            &self,
            chromosome: &str,
            position: Number,
            source: Assembly,
            target: Assembly,
        ) -> Vec<Candidate> {
            self.answers
                .get(&(source, target, chromosome.to_string(), position))
                .cloned()
                .unwrap_or_default()
        }
    }

    /// Builds a record with string metadata.
    fn record(chromosome: &str, start: Number, end: Number, metadata: &[&str]) -> Record {
        Record::new(
            chromosome,
            start,
            end,
            metadata.iter().map(|field| field.to_string()).collect(),
        )
    }

    /// hg19 to hg38.
    const FORWARD: (Assembly, Assembly) = (Assembly::Hg19, Assembly::Hg38);
    /// hg38 to hg19.
    const BACKWARD: (Assembly, Assembly) = (Assembly::Hg38, Assembly::Hg19);

    #[test]
    fn end_to_end() {
        let service = Fixture::default()
            .with(FORWARD, "chr1", 100, vec![("chr1", 10100)])
            .with(FORWARD, "chr1", 200, vec![("chr1", 10200)])
            .with(FORWARD, "chr1", 500, vec![("chr1", 10500)])
            .with(FORWARD, "chr1", 400, vec![("chr1", 10400)]);

        let records = vec![
            record("chr1", 100, 200, &["geneA"]),
            record("chr1", 500, 400, &["geneB"]),
            record("chrUn", 5, 10, &["lost", "cause"]),
        ];

        let conversion = convert(Direction::Hg19ToHg38, records, &service);

        assert_eq!(
            conversion.converted(),
            &[
                record("chr1", 10100, 10200, &["geneA"]),
                record("chr1", 10500, 10400, &["geneB"]),
            ]
        );
        assert_eq!(
            conversion.unmapped(),
            &[record("chrUn", 5, 10, &["lost", "cause"])]
        );
        assert_eq!(
            conversion.converted()[0].to_string(),
            "chr1\t10100\t10200\tgeneA"
        );
    }

    #[test]
    fn partition_is_complete_and_ordered() {
        let service = Fixture::default()
            .with(FORWARD, "chr2", 1, vec![("chr2", 2)])
            .with(FORWARD, "chr2", 3, vec![("chr2", 4)])
            .with(FORWARD, "chr4", 7, vec![("chr4", 8)])
            .with(FORWARD, "chr4", 9, vec![("chr4", 10)]);

        let records = vec![
            record("chr2", 1, 3, &["a"]),
            record("chr2", 1, 5, &["b"]),
            record("chr3", 1, 3, &["c"]),
            record("chr4", 7, 9, &["d", "e"]),
            record("chr4", 0, 9, &["f"]),
        ];

        let (converted, unmapped) = convert(Direction::Hg19ToHg38, records, &service).into_parts();

        assert_eq!(converted.len() + unmapped.len(), 5);

        let names = |records: &[Record]| {
            records
                .iter()
                .map(|record| record.metadata()[0].clone())
                .collect::<Vec<_>>()
        };

        assert_eq!(names(&converted), vec!["a", "d"]);
        assert_eq!(names(&unmapped), vec!["b", "c", "f"]);
        assert_eq!(converted[1].metadata(), &["d", "e"]);
    }

    #[test]
    fn unmapped_records_keep_their_coordinates() {
        let service = Fixture::default().with(FORWARD, "chr1", 100, vec![("chr1", 10100)]);
        let original = record("1", 100, 200, &["geneA"]);

        let outcome = convert_record(Direction::Hg19ToHg38, original.clone(), &service);

        assert!(!outcome.is_converted());
        assert_eq!(outcome.into_record(), original);
    }

    #[test]
    fn chromosome_prefix_is_added_for_the_query() {
        let service = Fixture::default()
            .with(FORWARD, "chrX", 10, vec![("chrX", 20)])
            .with(FORWARD, "chrX", 11, vec![("chrX", 21)]);

        let outcome = convert_record(Direction::Hg19ToHg38, record("X", 10, 11, &[]), &service);

        assert_eq!(outcome, Outcome::Converted(record("chrX", 20, 21, &[])));
    }

    #[test]
    fn primary_candidates_are_used() {
        let service = Fixture::default()
            .with(FORWARD, "chr1", 10, vec![("chr1", 110), ("chr9", 5)])
            .with(FORWARD, "chr1", 20, vec![("chr1", 120), ("chr9", 15)]);

        let outcome = convert_record(Direction::Hg19ToHg38, record("chr1", 10, 20, &[]), &service);

        assert_eq!(outcome, Outcome::Converted(record("chr1", 110, 120, &[])));
    }

    #[test]
    fn start_chromosome_wins_when_ends_disagree() {
        let service = Fixture::default()
            .with(FORWARD, "chr1", 10, vec![("chr1", 110)])
            .with(FORWARD, "chr1", 20, vec![("chr2", 5)]);

        let outcome = convert_record(Direction::Hg19ToHg38, record("chr1", 10, 20, &[]), &service);

        assert_eq!(outcome, Outcome::Converted(record("chr1", 110, 5, &[])));
    }

    #[test]
    fn directions_are_symmetric() {
        let service = Fixture::default()
            .with(FORWARD, "chr1", 100, vec![("chr1", 1100)])
            .with(FORWARD, "chr1", 200, vec![("chr1", 1200)])
            .with(BACKWARD, "chr1", 1100, vec![("chr1", 100)])
            .with(BACKWARD, "chr1", 1200, vec![("chr1", 200)]);

        let forward = convert(
            Direction::Hg19ToHg38,
            vec![record("chr1", 100, 200, &["geneA"])],
            &service,
        );
        let backward = convert(
            Direction::Hg38ToHg19,
            forward.converted().to_vec(),
            &service,
        );

        assert_eq!(forward.converted(), &[record("chr1", 1100, 1200, &["geneA"])]);
        assert_eq!(backward.converted(), &[record("chr1", 100, 200, &["geneA"])]);
        assert!(forward.unmapped().is_empty());
        assert!(backward.unmapped().is_empty());

        // The same query in the wrong direction does not resolve.
        let wrong = convert(
            Direction::Hg38ToHg19,
            vec![record("chr1", 100, 200, &["geneA"])],
            &service,
        );
        assert_eq!(wrong.unmapped(), &[record("chr1", 100, 200, &["geneA"])]);
    }

    #[test]
    fn unmapped_file_is_skipped_when_everything_maps(
    ) -> Result<(), Box<dyn std::error::Error>> {
        let service = Fixture::default()
            .with(FORWARD, "chr1", 100, vec![("chr1", 10100)])
            .with(FORWARD, "chr1", 200, vec![("chr1", 10200)]);

        let conversion = convert(
            Direction::Hg19ToHg38,
            vec![record("chr1", 100, 200, &["geneA"])],
            &service,
        );

        let dir = TempDir::new("bedlift")?;
        let converted = dir.path().join("lifted.bed");
        let unmapped = dir.path().join("failed_mapping.txt");

        let written = conversion.write_to(&converted, &unmapped)?;

        assert_eq!(written.converted(), 1);
        assert_eq!(written.unmapped(), None);
        assert!(!unmapped.exists());
        assert_eq!(
            std::fs::read_to_string(&converted)?,
            "chr1\t10100\t10200\tgeneA\n"
        );

        Ok(())
    }

    #[test]
    fn unmapped_file_keeps_source_coordinates() -> Result<(), Box<dyn std::error::Error>> {
        let service = Fixture::default()
            .with(FORWARD, "chr1", 100, vec![("chr1", 10100)])
            .with(FORWARD, "chr1", 200, vec![("chr1", 10200)]);

        let conversion = convert(
            Direction::Hg19ToHg38,
            vec![
                record("chr1", 100, 200, &["geneA"]),
                record("chrUn", 5, 10, &["lost", "cause"]),
            ],
            &service,
        );

        let dir = TempDir::new("bedlift")?;
        let converted = dir.path().join("lifted.bed");
        let unmapped = dir.path().join("failed_mapping.txt");

        let written = conversion.write_to(&converted, &unmapped)?;

        assert_eq!(written.converted(), 1);
        assert_eq!(written.unmapped(), Some(1));
        assert_eq!(
            std::fs::read_to_string(&unmapped)?,
            "chrUn\t5\t10\tlost\tcause\n"
        );
        assert_eq!(
            std::fs::read_to_string(&converted)?,
            "chr1\t10100\t10200\tgeneA\n"
        );

        Ok(())
    }

    #[test]
    fn write_errors_name_the_output() {
        let conversion = Conversion::default();
        let err = conversion
            .write_to("/this/path/does/not/exist.bed", "unused.txt")
            .unwrap_err();

        assert!(matches!(err, WriteError::Converted(_)));
        assert!(err.to_string().starts_with("writing converted records: "));
    }

    #[test]
    fn empty_input() {
        let conversion = convert(Direction::Hg19ToHg38, Vec::new(), &Fixture::default());
        assert!(conversion.is_empty());
    }
}
