//! `bedlift` is a crate for cleaning up genomic coordinates and lifting BED
//! intervals from one genome build to another.
//!
//! The crate provides two main points of entry:
//!
//! - Normalizing loosely formatted coordinate text (`chr6:160585140`,
//!   `6 160585140`, `chr6-160585140-160585170`, ...) into canonical, zero-based
//!   half-open BED records via [`normalize::normalize()`].
//! - Lifting over BED records between genome builds via
//!   [`liftover::convert()`].
//!
//! ## Normalizing coordinates
//!
//! Text coordinates are generally written as 1-based positions. The normalizer
//! finds the first chromosome/position pattern on each line and turns it into a
//! BED [`Record`] that keeps the original line as its only metadata field.
//! Lines that don't contain a recognizable coordinate are skipped rather than
//! reported.
//!
//! ```
//! use bedlift::normalize;
//!
//! let record = normalize::normalize("chr6:160585140-160585170").unwrap();
//!
//! assert_eq!(record.chromosome(), "chr6");
//! assert_eq!(record.start(), 160585139);
//! assert_eq!(record.end(), 160585170);
//! assert_eq!(record.metadata(), ["chr6:160585140-160585170"]);
//! ```
//!
//! ## Lifting over intervals
//!
//! The liftover itself is orchestrated by [`liftover::convert()`], which asks a
//! [`liftover::Resolve`] implementation to map the start and the end of each
//! interval independently. Records where either end fails to map are kept, in
//! their original coordinates, in a separate unmapped list.
//!
//! Most users will want to use a [`liftover::ChainService`], which resolves
//! positions using a UCSC chain file loaded into a [`liftover::Machine`].
//!
//! ```
//! use bedlift::Direction;
//! use bedlift::Record;
//! use bedlift::liftover;
//! use bedlift::liftover::chain;
//!
//! let data = b"chain 100 chr1 1000 + 0 1000 chr1 2000 + 500 1500 1\n1000\n";
//! let reader = chain::Reader::new(&data[..]);
//! let machine = liftover::machine::Builder.try_build_from(reader)?;
//! let service = liftover::ChainService::new(Direction::Hg19ToHg38, machine);
//!
//! let records = vec![
//!     Record::new("chr1", 100, 200, vec![String::from("geneA")]),
//!     Record::new("chr2", 100, 200, vec![String::from("geneB")]),
//! ];
//!
//! let conversion = liftover::convert(Direction::Hg19ToHg38, records, &service);
//!
//! assert_eq!(conversion.converted().len(), 1);
//! assert_eq!(conversion.converted()[0].to_string(), "chr1\t600\t700\tgeneA");
//! assert_eq!(conversion.unmapped()[0].to_string(), "chr2\t100\t200\tgeneB");
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod assembly;
pub mod bed;
pub mod file;
pub mod liftover;
pub mod normalize;

pub use assembly::Assembly;
pub use assembly::Direction;
pub use bed::Record;
