//! JSON export of collected card records

use crate::extract::CardRecord;
use crate::CrawlError;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes card records as a pretty-printed JSON object keyed by record name
///
/// ```
/// use card_ring::output::write_records;
/// use std::collections::BTreeMap;
///
/// let mut out = Vec::new();
/// write_records(&BTreeMap::new(), &mut out).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "{}\n");
/// ```
pub fn write_records<W: Write>(
    records: &BTreeMap<String, CardRecord>,
    mut writer: W,
) -> Result<(), CrawlError> {
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Writes card records to a file, replacing any existing content
pub fn save_records(
    records: &BTreeMap<String, CardRecord>,
    output_path: &Path,
) -> Result<(), CrawlError> {
    let file = File::create(output_path)?;
    write_records(records, BufWriter::new(file))
}
