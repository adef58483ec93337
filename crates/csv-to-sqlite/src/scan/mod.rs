//! Delimited-text file scanning.
//!
//! A scanner owns one open file handle for the lifetime of a load: the
//! typing pass and the insert pass both read from it, restarting via a
//! seek to offset zero rather than reopening the path. Records are read
//! as raw bytes and decoded per field under the configured encoding.

use std::fs::File;
use std::io::{BufReader, Seek, SeekFrom};
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder};
use encoding_rs::Encoding;
use tracing::debug;

use crate::error::{LoadError, Result};

/// One open delimited-text source: the header row plus a restartable row
/// cursor. Dropping the scanner releases the underlying handle.
#[derive(Debug)]
pub struct CsvScanner {
    file: File,
    delimiter: u8,
    encoding: &'static Encoding,
    headers: Vec<String>,
}

impl CsvScanner {
    /// Open a source file and read its header row.
    ///
    /// Fails if the path cannot be opened, the file contains no records,
    /// or the header cannot be decoded under `encoding`.
    pub fn open(path: &Path, delimiter: u8, encoding: &'static Encoding) -> Result<Self> {
        let mut file = File::open(path)?;

        let mut headers = {
            let mut reader = byte_reader(&mut file, delimiter);
            let mut record = ByteRecord::new();
            if !reader.read_byte_record(&mut record)? {
                return Err(LoadError::MissingHeader(path.display().to_string()));
            }
            decode_record(&record, encoding)?
        };

        // Excel and friends prepend a BOM; it would otherwise end up inside
        // the first column name.
        if let Some(first) = headers.first_mut() {
            if let Some(stripped) = first.strip_prefix('\u{feff}') {
                *first = stripped.to_string();
            }
        }

        debug!(
            "Opened {} with {} columns",
            path.display(),
            headers.len()
        );

        Ok(Self {
            file,
            delimiter,
            encoding,
            headers,
        })
    }

    /// Column names from the header row, in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Rewind to the start of the file and return a fresh lazy cursor over
    /// ALL records, including the header; callers that want only data rows
    /// skip the first record. The cursor is finite and not restartable
    /// mid-iteration; only another `rows()` call resets position.
    pub fn rows(&mut self) -> Result<RowCursor<'_>> {
        self.file.seek(SeekFrom::Start(0))?;
        Ok(RowCursor {
            reader: byte_reader(&mut self.file, self.delimiter),
            record: ByteRecord::new(),
            encoding: self.encoding,
            done: false,
        })
    }
}

/// Lazy row-by-row cursor over one pass of the file.
pub struct RowCursor<'a> {
    reader: csv::Reader<BufReader<&'a mut File>>,
    record: ByteRecord,
    encoding: &'static Encoding,
    done: bool,
}

impl Iterator for RowCursor<'_> {
    type Item = Result<Vec<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.read_byte_record(&mut self.record) {
            Ok(true) => Some(decode_record(&self.record, self.encoding)),
            Ok(false) => {
                self.done = true;
                None
            }
            Err(e) => {
                // A parse error poisons the rest of the pass.
                self.done = true;
                Some(Err(e.into()))
            }
        }
    }
}

fn byte_reader(file: &mut File, delimiter: u8) -> csv::Reader<BufReader<&mut File>> {
    // has_headers(false) so every pass yields the header record too, and
    // non-flexible mode so any record whose field count differs from the
    // first record's fails at the reader.
    ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_reader(BufReader::new(file))
}

fn decode_record(record: &ByteRecord, encoding: &'static Encoding) -> Result<Vec<String>> {
    record
        .iter()
        .map(|field| decode_field(field, encoding))
        .collect()
}

fn decode_field(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        return Err(LoadError::Decode(format!(
            "field is not valid {}: {:?}",
            encoding.name(),
            String::from_utf8_lossy(bytes)
        )));
    }
    Ok(text.into_owned())
}
