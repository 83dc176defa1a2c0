//! Opening (optionally gzipped) text files and reading lines from them.

use std::fs::File;
use std::io;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;

use flate2::read::MultiGzDecoder;

/// The new line character.
const NEW_LINE: char = '\n';

/// The carriage return character.
const CARRIAGE_RETURN: char = '\r';

/// The extension that marks a gzip-compressed file.
const GZIP_EXTENSION: &str = "gz";

/// Opens a file for buffered reading.
///
/// Files ending in `.gz` are transparently decompressed. Both plain gzip and
/// BGZF (multi-member gzip) files are supported.
///
/// # Examples
///
/// ```no_run
/// use std::io::BufRead;
///
/// let reader = bedlift::file::open("hg19ToHg38.over.chain.gz")?;
/// for line in reader.lines() {
///     println!("{}", line?);
/// }
///
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn open(path: impl AsRef<Path>) -> io::Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let file = File::open(path)?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some(GZIP_EXTENSION) => Ok(Box::new(BufReader::new(MultiGzDecoder::new(file)))),
        _ => Ok(Box::new(BufReader::new(file))),
    }
}

/// Reads a line from a buffered reader, stripping the trailing line ending.
///
/// The returned count includes the stripped line ending, so a return value of
/// zero always means the reader is exhausted.
pub(crate) fn read_line<T>(reader: &mut T, buffer: &mut String) -> io::Result<usize>
where
    T: BufRead,
{
    buffer.clear();

    match reader.read_line(buffer) {
        Ok(0) => Ok(0),
        Ok(n) => {
            if buffer.ends_with(NEW_LINE) {
                buffer.pop();

                if buffer.ends_with(CARRIAGE_RETURN) {
                    buffer.pop();
                }
            }

            Ok(n)
        }
        Err(e) => Err(e),
    }
}
