//! Compound event model.
//!
//! Turns a placement window into a full event record: which part of which
//! virus is inserted, how it is rearranged and trimmed, what the junctions
//! look like and how much host sequence is lost. Every draw happens in a
//! fixed order so a given seed always reproduces the same records.

use crate::base::{AddressSpace, Nucleotide, SequenceStore};
use crate::errors::{ConfigurationError, Result};
use crate::events::placement::Window;
use crate::events::records::{
    EpisomeEvent, IntegrationEvent, Junction, Orientation, Piece, Span, ViralFragment,
};
use crate::simulation::ProbabilityConfig;
use rand::Rng;
use rand::seq::SliceRandom;
use rand::seq::index;
use rand_distr::{Distribution, Poisson, PoissonError};

/// Samples event records from a probability configuration.
#[derive(Debug, Clone)]
pub struct MutationModel<'a> {
    virus: &'a SequenceStore,
    virus_space: AddressSpace,
    probs: ProbabilityConfig,
    min_len: usize,
    max_len: Option<usize>,
    split: Poisson<f64>,
    junction: Poisson<f64>,
    host_del: Poisson<f64>,
}

fn poisson(key: &'static str, lambda: f64) -> Result<Poisson<f64>> {
    Poisson::new(lambda).map_err(|e| {
        match e {
            PoissonError::ShapeTooLarge => ConfigurationError::RateTooLarge {
                key,
                value: lambda,
                max: Poisson::<f64>::MAX_LAMBDA,
            },
            PoissonError::ShapeTooSmall | PoissonError::NonFinite => {
                ConfigurationError::InvalidRate { key, value: lambda }
            }
        }
        .into()
    })
}

fn poisson_len<R: Rng + ?Sized>(dist: &Poisson<f64>, rng: &mut R) -> usize {
    dist.sample(rng) as usize
}

impl<'a> MutationModel<'a> {
    pub fn new(
        virus: &'a SequenceStore,
        probs: &ProbabilityConfig,
        min_len: usize,
        max_len: Option<usize>,
    ) -> Result<Self> {
        probs.check_ranges()?;
        let virus_space = AddressSpace::new(virus);
        if virus_space.is_empty() {
            return Err(ConfigurationError::EmptyReference("virus").into());
        }

        Ok(Self {
            virus,
            virus_space,
            probs: *probs,
            min_len,
            max_len,
            split: poisson("lambda_split", probs.lambda_split)?,
            junction: poisson("lambda_junction", probs.lambda_junction)?,
            host_del: poisson("lambda_host_del", probs.lambda_host_del)?,
        })
    }

    pub fn probs(&self) -> &ProbabilityConfig {
        &self.probs
    }

    /// Build an integration at `window` on `host`.
    pub fn materialize_integration<R: Rng + ?Sized>(
        &self,
        id: usize,
        window: Window,
        host: &SequenceStore,
        rng: &mut R,
    ) -> IntegrationEvent {
        let anchor = self.draw_anchor(rng);
        let fragment = self.draw_fragment(anchor, rng);

        let left = self.draw_junction(rng);
        let right = self.draw_junction(rng);
        let (left_junction, right_junction) = clamp_overlaps(fragment.len(), left, right);

        let record_len = host.sequence(window.record).len();
        let host_deletion = self.draw_host_deletion(window.offset, record_len, rng);

        IntegrationEvent {
            id,
            chromosome: host.name(window.record).to_string(),
            position: window.offset,
            fragment,
            left_junction,
            right_junction,
            host_deletion,
        }
    }

    /// Build an episome anchored at `anchor` on the virus.
    pub fn materialize_episome<R: Rng + ?Sized>(
        &self,
        id: usize,
        anchor: Window,
        rng: &mut R,
    ) -> EpisomeEvent {
        let fragment = self.draw_fragment(anchor, rng);

        let circular = rng.random_bool(0.5);
        let junction = if circular {
            let closing = self.draw_junction(rng);
            clamp_overlaps(fragment.len(), closing, Junction::Clean).0
        } else {
            Junction::Clean
        };

        EpisomeEvent {
            id,
            fragment,
            circular,
            junction,
        }
    }

    fn draw_anchor<R: Rng + ?Sized>(&self, rng: &mut R) -> Window {
        // Non-empty, checked in `new`.
        let (record, offset) = self.virus_space.draw(rng).unwrap_or((0, 0));
        Window { record, offset }
    }

    fn draw_fragment<R: Rng + ?Sized>(&self, anchor: Window, rng: &mut R) -> ViralFragment {
        let vlen = self.virus.sequence(anchor.record).len();

        let whole = rng.random_bool(self.probs.p_whole);
        let span = if whole {
            Span::new(0, vlen)
        } else {
            let lo = self.min_len.min(vlen);
            let hi = self.max_len.map_or(vlen, |m| m.min(vlen)).max(lo);
            let len = rng.random_range(lo..=hi);
            let start = anchor.offset.min(vlen - len);
            Span::new(start, start + len)
        };

        let orientation = Orientation::from_forward(rng.random_bool(0.5));

        let mut pieces = vec![Piece {
            span,
            orientation: Orientation::Forward,
        }];
        let mut breakpoints = Vec::new();
        if rng.random_bool(self.probs.p_rearrange) && span.len() >= 2 {
            (pieces, breakpoints) = self.rearrange(span, rng);
        }

        let mut deletion = None;
        if rng.random_bool(self.probs.p_delete) && span.len() >= 3 {
            let start = rng.random_range(span.start + 1..span.end - 1);
            let end = rng.random_range(start + 1..span.end);
            let removed = Span::new(start, end);
            pieces = remove_span(&pieces, removed);
            deletion = Some(removed);
        }

        ViralFragment {
            virus: self.virus.name(anchor.record).to_string(),
            span,
            whole,
            orientation,
            breakpoints,
            deletion,
            pieces,
        }
    }

    /// Cut `span` at random breakpoints and put the pieces back in a
    /// different order, each in a random orientation.
    fn rearrange<R: Rng + ?Sized>(&self, span: Span, rng: &mut R) -> (Vec<Piece>, Vec<usize>) {
        let interior = span.len() - 1;
        let splits = poisson_len(&self.split, rng).clamp(1, interior);

        let mut breakpoints: Vec<usize> = index::sample(rng, interior, splits)
            .into_iter()
            .map(|i| span.start + 1 + i)
            .collect();
        breakpoints.sort_unstable();

        let mut pieces = Vec::with_capacity(splits + 1);
        let mut start = span.start;
        for &cut in breakpoints.iter().chain(std::iter::once(&span.end)) {
            pieces.push(Piece {
                span: Span::new(start, cut),
                orientation: Orientation::Forward,
            });
            start = cut;
        }

        pieces.shuffle(rng);
        if pieces.windows(2).all(|w| w[0].span.start < w[1].span.start) {
            pieces.reverse();
        }
        for piece in &mut pieces {
            piece.orientation = Orientation::from_forward(rng.random_bool(0.5));
        }

        (pieces, breakpoints)
    }

    fn draw_junction<R: Rng + ?Sized>(&self, rng: &mut R) -> Junction {
        let u: f64 = rng.random();
        if u < self.probs.p_gap {
            let len = poisson_len(&self.junction, rng);
            if len == 0 {
                return Junction::Clean;
            }
            let bases = (0..len).map(|_| Nucleotide::random(rng).to_char()).collect();
            Junction::Gap { bases }
        } else if u < self.probs.p_gap + self.probs.p_overlap {
            match poisson_len(&self.junction, rng) {
                0 => Junction::Clean,
                length => Junction::Overlap { length },
            }
        } else {
            Junction::Clean
        }
    }

    fn draw_host_deletion<R: Rng + ?Sized>(
        &self,
        position: usize,
        record_len: usize,
        rng: &mut R,
    ) -> Option<Span> {
        if !rng.random_bool(self.probs.p_host_del) {
            return None;
        }
        let len = poisson_len(&self.host_del, rng).min(record_len - position);
        (len > 0).then(|| Span::new(position, position + len))
    }
}

/// Remove `removed` from a list of pieces, keeping reading order.
fn remove_span(pieces: &[Piece], removed: Span) -> Vec<Piece> {
    let mut out = Vec::with_capacity(pieces.len() + 1);
    for piece in pieces {
        let Piece { span, orientation } = *piece;
        let left = Span::new(span.start, removed.start.clamp(span.start, span.end));
        let right = Span::new(removed.end.clamp(span.start, span.end), span.end);
        let parts = match orientation {
            Orientation::Forward => [left, right],
            Orientation::Reverse => [right, left],
        };
        out.extend(
            parts
                .into_iter()
                .filter(|p| !p.is_empty())
                .map(|span| Piece { span, orientation }),
        );
    }
    out
}

/// Shrink overlaps so that at least one virus base survives assembly.
fn clamp_overlaps(virus_bases: usize, left: Junction, right: Junction) -> (Junction, Junction) {
    let available = virus_bases.saturating_sub(1);
    let left = clamp_overlap(left, available);
    let right = clamp_overlap(right, available - left.overlap());
    (left, right)
}

fn clamp_overlap(junction: Junction, available: usize) -> Junction {
    match junction {
        Junction::Overlap { length } if length > available => {
            log::debug!("overlap of {length} clamped to {available}");
            match available {
                0 => Junction::Clean,
                length => Junction::Overlap { length },
            }
        }
        other => other,
    }
}
