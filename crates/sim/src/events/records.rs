//! Ground-truth records for generated events.
//!
//! Records only describe what happened; the mutated sequences are assembled
//! from them and the untouched references when output is written.

use crate::base::reverse_complement;
use std::fmt;

/// Half-open coordinate range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} is past end {end}");
        Self { start, end }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Strand of a piece of inserted sequence relative to the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Forward,
    Reverse,
}

impl Orientation {
    pub fn from_forward(forward: bool) -> Self {
        if forward { Self::Forward } else { Self::Reverse }
    }

    pub fn symbol(self) -> char {
        match self {
            Self::Forward => '+',
            Self::Reverse => '-',
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A contiguous stretch of virus sequence in a given orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub span: Span,
    pub orientation: Orientation,
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.span, self.orientation)
    }
}

/// Boundary between inserted virus material and its surroundings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Junction {
    /// Virus and flanking sequence abut directly.
    #[default]
    Clean,
    /// Random filler bases separate virus and flank.
    Gap { bases: String },
    /// Bases shared between virus and flank; they are taken out of the
    /// virus side when the sequence is assembled.
    Overlap { length: usize },
}

impl Junction {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Gap { .. } => "gap",
            Self::Overlap { .. } => "overlap",
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Clean => 0,
            Self::Gap { bases } => bases.len(),
            Self::Overlap { length } => *length,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Filler bases contributed by a gap.
    pub fn filler(&self) -> &str {
        match self {
            Self::Gap { bases } => bases,
            _ => "",
        }
    }

    /// Number of virus bases consumed by an overlap.
    pub fn overlap(&self) -> usize {
        match self {
            Self::Overlap { length } => *length,
            _ => 0,
        }
    }
}

/// The virus-derived material of one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViralFragment {
    /// Name of the source virus record
    pub virus: String,
    /// Selected range of the virus before rearrangement or deletion
    pub span: Span,
    /// True if the whole virus was selected
    pub whole: bool,
    /// Orientation of the fragment as a whole
    pub orientation: Orientation,
    /// Breakpoints used to rearrange the fragment, empty if not rearranged
    pub breakpoints: Vec<usize>,
    /// Internally deleted range, if any
    pub deletion: Option<Span>,
    /// Pieces in insertion order, after rearrangement and deletion
    pub pieces: Vec<Piece>,
}

impl ViralFragment {
    pub fn is_rearranged(&self) -> bool {
        !self.breakpoints.is_empty()
    }

    pub fn is_deleted(&self) -> bool {
        self.deletion.is_some()
    }

    /// Number of virus bases remaining after deletion.
    pub fn len(&self) -> usize {
        self.pieces.iter().map(|p| p.span.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Assemble the fragment's sequence from the virus reference.
    pub fn sequence(&self, virus_seq: &str) -> String {
        let mut out = String::with_capacity(self.len());
        for piece in &self.pieces {
            let part = &virus_seq[piece.span.start..piece.span.end];
            match piece.orientation {
                Orientation::Forward => out.push_str(part),
                Orientation::Reverse => out.push_str(&reverse_complement(part)),
            }
        }
        match self.orientation {
            Orientation::Forward => out,
            Orientation::Reverse => reverse_complement(&out),
        }
    }

    /// `;`-separated pieces, or `NA` if there are none.
    pub fn pieces_label(&self) -> String {
        join_or_na(self.pieces.iter())
    }

    pub fn breakpoints_label(&self) -> String {
        join_or_na(self.breakpoints.iter())
    }
}

fn join_or_na<T: fmt::Display>(items: impl Iterator<Item = T>) -> String {
    let joined = items.map(|i| i.to_string()).collect::<Vec<_>>().join(";");
    if joined.is_empty() { "NA".to_string() } else { joined }
}

/// A virus fragment inserted into a host record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrationEvent {
    pub id: usize,
    /// Host record receiving the insertion
    pub chromosome: String,
    /// Insertion offset on the unmodified host record
    pub position: usize,
    pub fragment: ViralFragment,
    pub left_junction: Junction,
    pub right_junction: Junction,
    /// Host bases removed at the insertion site
    pub host_deletion: Option<Span>,
}

impl IntegrationEvent {
    /// Host range this event occupies: the insertion point plus any
    /// deleted host bases.
    pub fn footprint(&self) -> Span {
        self.host_deletion
            .unwrap_or_else(|| Span::new(self.position, self.position))
    }

    /// Number of host bases deleted.
    pub fn host_deleted(&self) -> usize {
        self.host_deletion.map_or(0, |s| s.len())
    }

    /// Sequence inserted into the host: left filler, virus bases left after
    /// both overlaps, right filler.
    pub fn inserted_sequence(&self, virus_seq: &str) -> String {
        let viral = self.fragment.sequence(virus_seq);
        let start = self.left_junction.overlap().min(viral.len());
        let end = viral
            .len()
            .saturating_sub(self.right_junction.overlap())
            .max(start);
        let mut out = String::with_capacity(viral.len() + 16);
        out.push_str(self.left_junction.filler());
        out.push_str(&viral[start..end]);
        out.push_str(self.right_junction.filler());
        out
    }
}

/// A virus fragment that stays outside the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisomeEvent {
    pub id: usize,
    pub fragment: ViralFragment,
    pub circular: bool,
    /// Junction joining the two ends of a circular episome; always `Clean`
    /// for linear ones
    pub junction: Junction,
}

impl EpisomeEvent {
    /// Name used for the episome's output record.
    pub fn record_name(&self) -> String {
        format!("episome_{}", self.id)
    }

    /// Episome sequence, with any closing filler appended and any overlap
    /// removed from the end.
    pub fn sequence(&self, virus_seq: &str) -> String {
        let mut seq = self.fragment.sequence(virus_seq);
        let keep = seq.len().saturating_sub(self.junction.overlap()).max(1);
        seq.truncate(keep.min(seq.len()));
        seq.push_str(self.junction.filler());
        seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(pieces: Vec<Piece>, orientation: Orientation) -> ViralFragment {
        ViralFragment {
            virus: "v".to_string(),
            span: Span::new(0, 8),
            whole: true,
            orientation,
            breakpoints: vec![],
            deletion: None,
            pieces,
        }
    }

    fn fwd(start: usize, end: usize) -> Piece {
        Piece {
            span: Span::new(start, end),
            orientation: Orientation::Forward,
        }
    }

    #[test]
    fn test_fragment_sequence_rearranged() {
        let virus = "AACCGGTT";
        let frag = fragment(
            vec![
                fwd(4, 8),
                Piece {
                    span: Span::new(0, 2),
                    orientation: Orientation::Reverse,
                },
            ],
            Orientation::Forward,
        );
        assert_eq!(frag.sequence(virus), "GGTTTT");
        assert_eq!(frag.len(), 6);
        assert_eq!(frag.pieces_label(), "4-8+;0-2-");
    }

    #[test]
    fn test_fragment_reverse_orientation() {
        let frag = fragment(vec![fwd(0, 4)], Orientation::Reverse);
        assert_eq!(frag.sequence("AACGTT"), "CGTT");
    }

    #[test]
    fn test_inserted_sequence_applies_junctions() {
        let event = IntegrationEvent {
            id: 0,
            chromosome: "chr1".to_string(),
            position: 10,
            fragment: fragment(vec![fwd(0, 8)], Orientation::Forward),
            left_junction: Junction::Gap {
                bases: "NN".to_string(),
            },
            right_junction: Junction::Overlap { length: 3 },
            host_deletion: Some(Span::new(10, 14)),
        };
        assert_eq!(event.inserted_sequence("AACCGGTT"), "NNAACCG");
        assert_eq!(event.footprint(), Span::new(10, 14));
        assert_eq!(event.host_deleted(), 4);
    }

    #[test]
    fn test_episome_sequence() {
        let epi = EpisomeEvent {
            id: 3,
            fragment: fragment(vec![fwd(0, 8)], Orientation::Forward),
            circular: true,
            junction: Junction::Overlap { length: 2 },
        };
        assert_eq!(epi.sequence("AACCGGTT"), "AACCGG");
        assert_eq!(epi.record_name(), "episome_3");
    }

    #[test]
    fn test_junction_accessors() {
        let gap = Junction::Gap {
            bases: "ACG".to_string(),
        };
        assert_eq!(gap.kind(), "gap");
        assert_eq!(gap.len(), 3);
        assert_eq!(gap.overlap(), 0);
        assert_eq!(Junction::Overlap { length: 4 }.overlap(), 4);
        assert!(Junction::Clean.is_empty());
    }

    #[test]
    fn test_labels_na() {
        let frag = fragment(vec![], Orientation::Forward);
        assert_eq!(frag.pieces_label(), "NA");
        assert_eq!(frag.breakpoints_label(), "NA");
    }
}
