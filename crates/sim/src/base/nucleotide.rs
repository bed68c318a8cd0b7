use core::fmt;

use rand::Rng;

/// A DNA nucleotide base, used when the simulator has to invent sequence
/// (junction gap filler).
///
/// Reference sequences themselves are kept as plain text and may contain any
/// character; see [`complement_ascii`] for how those are complemented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Nucleotide {
    A = 0,
    C = 1,
    G = 2,
    T = 3,
}

impl Nucleotide {
    #[inline(always)]
    pub const fn to_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::C => 'C',
            Self::G => 'G',
            Self::T => 'T',
        }
    }

    /// Draw a base uniformly at random.
    #[inline]
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        match rng.random_range(0..4u8) {
            0 => Self::A,
            1 => Self::C,
            2 => Self::G,
            _ => Self::T,
        }
    }
}

impl fmt::Display for Nucleotide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Complement a single character, preserving case.
///
/// IUPAC ambiguity codes are complemented too; anything else (gaps, masks,
/// protein letters) is returned unchanged.
#[inline]
pub const fn complement_ascii(c: char) -> char {
    match c {
        'A' => 'T',
        'T' => 'A',
        'U' => 'A',
        'C' => 'G',
        'G' => 'C',
        'R' => 'Y',
        'Y' => 'R',
        'K' => 'M',
        'M' => 'K',
        'B' => 'V',
        'V' => 'B',
        'D' => 'H',
        'H' => 'D',
        'a' => 't',
        't' => 'a',
        'u' => 'a',
        'c' => 'g',
        'g' => 'c',
        'r' => 'y',
        'y' => 'r',
        'k' => 'm',
        'm' => 'k',
        'b' => 'v',
        'v' => 'b',
        'd' => 'h',
        'h' => 'd',
        other => other,
    }
}

/// Reverse complement of `seq`.
pub fn reverse_complement(seq: &str) -> String {
    seq.chars().rev().map(complement_ascii).collect()
}
