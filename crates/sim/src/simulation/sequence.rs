//! Reading and writing reference sequences.
//!
//! Host and virus references are plain FASTA files. Headers are cut at the
//! first whitespace to form the record name; sequence lines are concatenated
//! with surrounding whitespace removed.

use crate::base::SequenceStore;
use crate::errors::{EventsError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Line width used when writing FASTA records.
pub const FASTA_LINE_WIDTH: usize = 60;

/// Parse sequences from a FASTA file.
///
/// ```text
/// >chr1 description
/// ACGTACGTACGT
/// ACGT
/// >chr2
/// TGCATGCA
/// ```
///
/// Records with an empty sequence are skipped. A file without any records,
/// sequence data before the first header, a repeated record name, text that
/// is not UTF-8 or a non-ASCII sequence character is a parse error. Failing
/// to open or read the file is an I/O error.
pub fn parse_fasta(path: impl AsRef<Path>) -> Result<SequenceStore> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| EventsError::io(path, e))?;
    let reader = BufReader::new(file);

    let mut entries: Vec<(String, String)> = Vec::new();
    let mut current_id: Option<String> = None;
    let mut current_seq = String::new();

    for (lineno, line) in reader.split(b'\n').enumerate() {
        let line = line.map_err(|e| EventsError::io(path, e))?;
        let line = String::from_utf8(line).map_err(|_| {
            EventsError::Parse(format!(
                "line {} of {} is not valid UTF-8",
                lineno + 1,
                path.display()
            ))
        })?;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('>') {
            if let Some(id) = current_id.take() {
                if !current_seq.is_empty() {
                    entries.push((id, std::mem::take(&mut current_seq)));
                }
            }

            let id = header.split_whitespace().next().ok_or_else(|| {
                EventsError::Parse(format!("empty FASTA header in {}", path.display()))
            })?;
            current_id = Some(id.to_string());
        } else if current_id.is_none() {
            return Err(EventsError::Parse(format!(
                "sequence data before the first header in {}",
                path.display()
            )));
        } else {
            current_seq.push_str(line);
        }
    }

    if let Some(id) = current_id {
        if !current_seq.is_empty() {
            entries.push((id, current_seq));
        }
    }

    if entries.is_empty() {
        return Err(EventsError::Parse(format!(
            "no sequences found in {}",
            path.display()
        )));
    }

    SequenceStore::from_records(entries)
        .map_err(|e| EventsError::Parse(format!("{e} in {}", path.display())))
}

/// Returns true if `path` is a readable FASTA file with at least one record.
pub fn fasta_exists(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    path.is_file() && parse_fasta(path).is_ok()
}

/// Write `(name, sequence)` records to `path`, wrapping sequence lines.
pub fn write_fasta<'a, I>(path: impl AsRef<Path>, records: I) -> Result<()>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| EventsError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    write_records(&mut writer, records).map_err(|e| EventsError::io(path, e))?;
    writer.flush().map_err(|e| EventsError::io(path, e))
}

fn write_records<'a, W, I>(writer: &mut W, records: I) -> std::io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    for (name, seq) in records {
        writeln!(writer, ">{name}")?;
        for chunk in seq.as_bytes().chunks(FASTA_LINE_WIDTH) {
            writer.write_all(chunk)?;
            writer.write_all(b"\n")?;
        }
    }
    Ok(())
}
