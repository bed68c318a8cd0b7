//! Writing simulated genomes and ground truth to disk.
//!
//! The mutated host is assembled record by record from the untouched host
//! reference and the integration records. Episomes are appended as extra
//! records. Two tab-separated tables describe every event in enough detail
//! to rebuild it.

use crate::base::SequenceStore;
use crate::errors::{EventsError, Result};
use crate::events::{EpisomeEvent, IntegrationEvent, Junction, Span};
use crate::simulation::write_fasta;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Header of the integration table.
pub const INTEGRATION_COLUMNS: [&str; 23] = [
    "id",
    "chr",
    "position",
    "host_deleted",
    "host_del_start",
    "host_del_end",
    "virus",
    "virus_start",
    "virus_end",
    "whole",
    "orientation",
    "rearranged",
    "breakpoints",
    "deletion",
    "pieces",
    "left_junction",
    "left_length",
    "left_bases",
    "right_junction",
    "right_length",
    "right_bases",
    "out_start",
    "out_end",
];

/// Header of the episome table.
pub const EPISOME_COLUMNS: [&str; 15] = [
    "id",
    "name",
    "virus",
    "virus_start",
    "virus_end",
    "whole",
    "orientation",
    "rearranged",
    "breakpoints",
    "deletion",
    "pieces",
    "circular",
    "junction",
    "junction_length",
    "junction_bases",
];

/// A mutated host record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledRecord {
    pub name: String,
    pub sequence: String,
}

/// The mutated host, with the location of every inserted segment in it.
#[derive(Debug, Clone, Default)]
pub struct AssembledHost {
    pub records: Vec<AssembledRecord>,
    /// Output coordinates of each integration's inserted sequence, by id
    pub inserted: HashMap<usize, Span>,
}

fn virus_sequence<'a>(virus: &'a SequenceStore, name: &str) -> Result<&'a str> {
    virus.get(name).ok_or_else(|| {
        EventsError::Parse(format!("event refers to unknown virus record '{name}'"))
    })
}

/// Apply `integrations` to `host`.
///
/// Records come out in input order. Inserted sequence replaces any deleted
/// host bases at its position; everything else is copied unchanged.
pub fn assemble_host(
    host: &SequenceStore,
    virus: &SequenceStore,
    integrations: &[IntegrationEvent],
) -> Result<AssembledHost> {
    let mut by_record: HashMap<&str, Vec<&IntegrationEvent>> = HashMap::new();
    for event in integrations {
        by_record.entry(event.chromosome.as_str()).or_default().push(event);
    }

    let mut assembled = AssembledHost::default();
    for (name, seq) in host.iter() {
        let mut events = by_record.remove(name).unwrap_or_default();
        events.sort_by_key(|e| e.position);

        let mut out = String::with_capacity(seq.len());
        let mut cursor = 0;
        for event in events {
            let position = event.position.clamp(cursor, seq.len());
            out.push_str(&seq[cursor..position]);

            let virus_seq = virus_sequence(virus, &event.fragment.virus)?;
            let inserted = event.inserted_sequence(virus_seq);
            let start = out.len();
            out.push_str(&inserted);
            assembled.inserted.insert(event.id, Span::new(start, out.len()));

            cursor = (position + event.host_deleted()).min(seq.len());
        }
        out.push_str(&seq[cursor..]);

        assembled.records.push(AssembledRecord {
            name: name.to_string(),
            sequence: out,
        });
    }

    if let Some(name) = by_record.keys().next() {
        return Err(EventsError::Parse(format!(
            "event refers to unknown host record '{name}'"
        )));
    }

    Ok(assembled)
}

/// Write the mutated host followed by one record per episome.
pub fn save_fasta(
    path: impl AsRef<Path>,
    host: &SequenceStore,
    virus: &SequenceStore,
    integrations: &[IntegrationEvent],
    episomes: &[EpisomeEvent],
) -> Result<()> {
    let assembled = assemble_host(host, virus, integrations)?;

    let mut episome_records = Vec::with_capacity(episomes.len());
    for episome in episomes {
        let seq = virus_sequence(virus, &episome.fragment.virus)?;
        episome_records.push((episome.record_name(), episome.sequence(seq)));
    }

    let records = assembled
        .records
        .iter()
        .map(|r| (r.name.as_str(), r.sequence.as_str()))
        .chain(episome_records.iter().map(|(n, s)| (n.as_str(), s.as_str())));
    write_fasta(path, records)
}

fn na_or<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "NA".to_string(), |v| v.to_string())
}

fn junction_fields(junction: &Junction) -> [String; 3] {
    let bases = match junction.filler() {
        "" => "NA".to_string(),
        filler => filler.to_string(),
    };
    [junction.kind().to_string(), junction.len().to_string(), bases]
}

fn write_table<F>(path: &Path, header: &[&str], write_rows: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let file = File::create(path).map_err(|e| EventsError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "{}", header.join("\t"))
        .and_then(|_| write_rows(&mut writer))
        .and_then(|_| writer.flush())
        .map_err(|e| EventsError::io(path, e))
}

/// Write the integration table.
///
/// `out_start`/`out_end` locate the inserted sequence (junction filler
/// included) in the matching record of the output FASTA.
pub fn save_integrations_info(
    path: impl AsRef<Path>,
    host: &SequenceStore,
    virus: &SequenceStore,
    integrations: &[IntegrationEvent],
) -> Result<()> {
    let assembled = assemble_host(host, virus, integrations)?;

    write_table(path.as_ref(), &INTEGRATION_COLUMNS, |w| {
        for event in integrations {
            let frag = &event.fragment;
            let out = assembled.inserted.get(&event.id);
            let row = [
                vec![
                    event.id.to_string(),
                    event.chromosome.clone(),
                    event.position.to_string(),
                    event.host_deleted().to_string(),
                    na_or(event.host_deletion.map(|s| s.start)),
                    na_or(event.host_deletion.map(|s| s.end)),
                    frag.virus.clone(),
                    frag.span.start.to_string(),
                    frag.span.end.to_string(),
                    frag.whole.to_string(),
                    frag.orientation.to_string(),
                    frag.is_rearranged().to_string(),
                    frag.breakpoints_label(),
                    na_or(frag.deletion),
                    frag.pieces_label(),
                ],
                junction_fields(&event.left_junction).to_vec(),
                junction_fields(&event.right_junction).to_vec(),
                vec![na_or(out.map(|s| s.start)), na_or(out.map(|s| s.end))],
            ]
            .concat();
            writeln!(w, "{}", row.join("\t"))?;
        }
        Ok(())
    })
}

/// Write the episome table.
pub fn save_episomes_info(path: impl AsRef<Path>, episomes: &[EpisomeEvent]) -> Result<()> {
    write_table(path.as_ref(), &EPISOME_COLUMNS, |w| {
        for episome in episomes {
            let frag = &episome.fragment;
            let row = [
                vec![
                    episome.id.to_string(),
                    episome.record_name(),
                    frag.virus.clone(),
                    frag.span.start.to_string(),
                    frag.span.end.to_string(),
                    frag.whole.to_string(),
                    frag.orientation.to_string(),
                    frag.is_rearranged().to_string(),
                    frag.breakpoints_label(),
                    na_or(frag.deletion),
                    frag.pieces_label(),
                    episome.circular.to_string(),
                ],
                junction_fields(&episome.junction).to_vec(),
            ]
            .concat();
            writeln!(w, "{}", row.join("\t"))?;
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Orientation, Piece, ViralFragment};
    use crate::simulation::parse_fasta;
    use tempfile::NamedTempFile;

    fn fragment(virus: &str, span: Span) -> ViralFragment {
        ViralFragment {
            virus: virus.to_string(),
            span,
            whole: false,
            orientation: Orientation::Forward,
            breakpoints: vec![],
            deletion: None,
            pieces: vec![Piece {
                span,
                orientation: Orientation::Forward,
            }],
        }
    }

    fn integration(id: usize, position: usize, deleted: usize) -> IntegrationEvent {
        IntegrationEvent {
            id,
            chromosome: "chr1".to_string(),
            position,
            fragment: fragment("v", Span::new(0, 4)),
            left_junction: Junction::Clean,
            right_junction: Junction::Clean,
            host_deletion: (deleted > 0).then(|| Span::new(position, position + deleted)),
        }
    }

    fn stores() -> (SequenceStore, SequenceStore) {
        let host =
            SequenceStore::from_records([("chr1", "AAAAAAAAAA"), ("chr2", "CCCC")]).unwrap();
        let virus = SequenceStore::from_records([("v", "TTTT")]).unwrap();
        (host, virus)
    }

    #[test]
    fn test_assemble_host() {
        let (host, virus) = stores();
        let events = [integration(1, 7, 2), integration(0, 2, 0)];
        let assembled = assemble_host(&host, &virus, &events).unwrap();

        assert_eq!(assembled.records.len(), 2);
        assert_eq!(assembled.records[0].sequence, "AATTTTAAAAATTTTA");
        assert_eq!(assembled.records[1].sequence, "CCCC");
        assert_eq!(assembled.inserted[&0], Span::new(2, 6));
        assert_eq!(assembled.inserted[&1], Span::new(11, 15));
    }

    #[test]
    fn test_length_accounting() {
        let (host, virus) = stores();
        let events = [integration(0, 0, 3), integration(1, 8, 2)];
        let assembled = assemble_host(&host, &virus, &events).unwrap();
        let deleted: usize = events.iter().map(|e| e.host_deleted()).sum();
        let total: usize = assembled.records.iter().map(|r| r.sequence.len()).sum();
        assert_eq!(deleted, 5);
        assert_eq!(total, host.total_length() + 8 - deleted);
    }

    #[test]
    fn test_unknown_host_record() {
        let (host, virus) = stores();
        let mut event = integration(0, 1, 0);
        event.chromosome = "chrX".to_string();
        assert!(assemble_host(&host, &virus, &[event]).is_err());
    }

    #[test]
    fn test_save_fasta_appends_episomes() {
        let (host, virus) = stores();
        let episome = EpisomeEvent {
            id: 0,
            fragment: fragment("v", Span::new(1, 3)),
            circular: false,
            junction: Junction::Clean,
        };
        let file = NamedTempFile::new().unwrap();
        save_fasta(file.path(), &host, &virus, &[], &[episome]).unwrap();

        let written = parse_fasta(file.path()).unwrap();
        let names: Vec<&str> = written.names().collect();
        assert_eq!(names, ["chr1", "chr2", "episome_0"]);
        assert_eq!(written.get("chr1"), Some("AAAAAAAAAA"));
        assert_eq!(written.get("episome_0"), Some("TT"));
    }

    #[test]
    fn test_integration_table() {
        let (host, virus) = stores();
        let mut event = integration(0, 2, 1);
        event.left_junction = Junction::Gap {
            bases: "GC".to_string(),
        };
        let file = NamedTempFile::new().unwrap();
        save_integrations_info(file.path(), &host, &virus, &[event]).unwrap();

        let text = std::fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], INTEGRATION_COLUMNS.join("\t"));
        let fields: Vec<&str> = lines[1].split('\t').collect();
        assert_eq!(fields.len(), INTEGRATION_COLUMNS.len());
        assert_eq!(fields[1], "chr1");
        assert_eq!(fields[3], "1");
        assert_eq!(fields[15], "gap");
        assert_eq!(fields[17], "GC");
        assert_eq!(fields[18], "clean");
        assert_eq!(&fields[21..], ["2", "8"]);
    }

    #[test]
    fn test_empty_tables_have_header_only() {
        let file = NamedTempFile::new().unwrap();
        save_episomes_info(file.path(), &[]).unwrap();
        let text = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(text, format!("{}\n", EPISOME_COLUMNS.join("\t")));
    }
}
