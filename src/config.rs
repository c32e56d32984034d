use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};

use crate::error::LoadError;

const COMMENT_MARKERS: [char; 2] = ['#', ';'];

/// One `KEY=VALUE` pair as it appeared in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub key: String,
    pub value: String,
    /// 1-based physical line number.
    pub line: usize,
}

/// Lazy scan over a document, yielding one entry per non-skipped line.
///
/// Iteration ends after the first error.
pub struct Entries<R> {
    reader: R,
    source: PathBuf,
    buf: String,
    line: usize,
    failed: bool,
}

impl<R: BufRead> Entries<R> {
    fn new(reader: R, source: PathBuf) -> Self {
        Self {
            reader,
            source,
            buf: String::new(),
            line: 0,
            failed: false,
        }
    }

    /// Number of physical lines consumed so far.
    pub fn lines_read(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> Iterator for Entries<R> {
    type Item = Result<RawEntry, LoadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None, // EOF
                Ok(_) => {}
                Err(e) => {
                    self.failed = true;
                    return Some(Err(LoadError::io(self.source.clone(), e)));
                }
            }
            self.line += 1;

            let line = self.buf.strip_suffix('\n').unwrap_or(&self.buf);
            let line = line.strip_suffix('\r').unwrap_or(line);
            let line = line.trim_start();

            if line.is_empty() || line.starts_with(&COMMENT_MARKERS[..]) {
                continue;
            }

            let result = split_entry(line, self.line);
            self.failed = result.is_err();
            return Some(result);
        }
    }
}

fn split_entry(line: &str, line_no: usize) -> Result<RawEntry, LoadError> {
    let malformed = || LoadError::MalformedLine {
        line: line_no,
        text: line.to_string(),
    };

    // Only the first '=' delimits, values may contain more.
    let (key, value) = line.split_once('=').ok_or_else(malformed)?;
    let key = key.trim_end();
    if key.is_empty() {
        return Err(malformed());
    }

    Ok(RawEntry {
        key: key.to_string(),
        value: value.to_string(),
        line: line_no,
    })
}

/// Scans a buffered source. Errors reported for `reader` name it `<input>`.
pub fn parse_lines<R: BufRead>(reader: R) -> Entries<R> {
    Entries::new(reader, PathBuf::from("<input>"))
}

/// Scans an in-memory document.
pub fn parse_str(text: &str) -> Entries<Cursor<&[u8]>> {
    Entries::new(Cursor::new(text.as_bytes()), PathBuf::from("<memory>"))
}

pub(crate) fn open(path: &Path) -> Result<Entries<BufReader<File>>, LoadError> {
    let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
    Ok(Entries::new(BufReader::new(file), path.to_path_buf()))
}

/// Reads every entry of a file into an untyped map. Later keys overwrite earlier ones.
pub fn load_map(path: impl AsRef<Path>) -> Result<HashMap<String, String>, LoadError> {
    let mut map = HashMap::new();
    for entry in open(path.as_ref())? {
        let entry = entry?;
        map.insert(entry.key, entry.value);
    }
    Ok(map)
}
