//! Reading UCSC chain files.
//!
//! A chain file is made up of sections. Each section starts with a
//! [header](header::Record) describing the aligned regions of the source
//! (reference) and target (query) sequences, followed by one or more
//! [alignment data](data::Record) lines describing ungapped blocks and the
//! gaps between them. Sections are separated by blank lines.
//!
//! ```
//! use bedlift::liftover::chain;
//!
//! let data = b"chain 0 chr1 10 + 0 10 chr1 12 + 0 12 1\n4\t0\t2\n6\n";
//! let mut reader = chain::Reader::new(&data[..]);
//!
//! for result in reader.sections() {
//!     let section = result?;
//!     assert_eq!(section.blocks().count(), 2);
//! }
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod data;
pub mod header;
pub mod line;
pub mod reader;
pub mod section;

pub use line::Line;
pub use reader::Reader;
pub use section::Section;
