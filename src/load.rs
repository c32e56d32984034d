use std::io::BufRead;
use std::path::Path;

use tracing::{debug, info};

use crate::coerce::coerce;
use crate::config::{self, Entries, RawEntry};
use crate::error::LoadError;
use crate::field::Record;

/// Outcome of a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadReport {
    /// Physical lines scanned, comments and blanks included.
    pub lines: usize,
    /// Entries written into the record.
    pub applied: usize,
}

/// Loads the file at `path` into `record`.
///
/// Fields without a matching key keep their current value. On error the
/// record may already hold values from earlier lines.
pub fn load<R: Record + ?Sized>(
    path: impl AsRef<Path>,
    record: &mut R,
) -> Result<LoadReport, LoadError> {
    let path = path.as_ref();
    let report = apply(config::open(path)?, record)?;
    info!(
        "Loaded {} entries from {} ({} lines)",
        report.applied,
        path.display(),
        report.lines
    );
    Ok(report)
}

/// Same as [`load`], reading the file through Tokio.
pub async fn load_async<R: Record + ?Sized>(
    path: impl AsRef<Path>,
    record: &mut R,
) -> Result<LoadReport, LoadError> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| LoadError::io(path, e))?;
    let report = apply(config::parse_str(&text), record)?;
    info!(
        "Loaded {} entries from {} ({} lines)",
        report.applied,
        path.display(),
        report.lines
    );
    Ok(report)
}

pub fn load_str<R: Record + ?Sized>(text: &str, record: &mut R) -> Result<LoadReport, LoadError> {
    apply(config::parse_str(text), record)
}

pub fn load_reader<B: BufRead, R: Record + ?Sized>(
    reader: B,
    record: &mut R,
) -> Result<LoadReport, LoadError> {
    apply(config::parse_lines(reader), record)
}

fn apply<B: BufRead, R: Record + ?Sized>(
    mut entries: Entries<B>,
    record: &mut R,
) -> Result<LoadReport, LoadError> {
    let mut applied = 0;
    for entry in entries.by_ref() {
        apply_entry(&entry?, record)?;
        applied += 1;
    }
    Ok(LoadReport {
        lines: entries.lines_read(),
        applied,
    })
}

fn apply_entry<R: Record + ?Sized>(entry: &RawEntry, record: &mut R) -> Result<(), LoadError> {
    let slot = record
        .slot(&entry.key)
        .ok_or_else(|| LoadError::UnknownField {
            line: entry.line,
            key: entry.key.clone(),
        })?;

    let kind = slot.kind();
    let value = coerce(&entry.value, &kind).map_err(|e| e.at(&entry.key, entry.line))?;
    debug!("line {}: {} = {}", entry.line, entry.key, value);

    if !slot.assign(value) {
        return Err(LoadError::InvalidValue {
            line: entry.line,
            key: entry.key.clone(),
            kind,
            raw: entry.value.clone(),
        });
    }
    Ok(())
}
