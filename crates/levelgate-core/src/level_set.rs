//! Immutable sets of enabled severities

use crate::severity::Severity;

/// Bit for every severity except the `None` sentinel
const REAL_SEVERITIES: u8 = 0b0011_1111;

/// Bit for every severity, `None` included
const ALL_BITS: u8 = 0b0111_1111;

/// The set of severities a category lets through
///
/// A plain bitset: one bit per [`Severity`], so the whole set fits in the low
/// byte of an atomic word.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LevelSet(u8);

impl LevelSet {
    /// No severity passes
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Every real severity passes (`None` excluded)
    pub const fn all() -> Self {
        Self(REAL_SEVERITIES)
    }

    /// Every real severity at or above `min`
    ///
    /// `at_least(Severity::None)` is empty.
    pub const fn at_least(min: Severity) -> Self {
        Self(REAL_SEVERITIES & (ALL_BITS << (min as u8)))
    }

    /// Rebuild a set from [`LevelSet::bits`]; unknown bits are dropped
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & ALL_BITS)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, severity: Severity) -> bool {
        self.0 & (1 << (severity as u8)) != 0
    }

    #[must_use]
    pub const fn with(self, severity: Severity) -> Self {
        Self(self.0 | (1 << (severity as u8)))
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Members in ascending order
    pub fn iter(self) -> impl Iterator<Item = Severity> {
        (0..Severity::ALL.len() as u8)
            .filter(move |bit| self.0 & (1 << bit) != 0)
            .map(Severity::from_u8)
    }
}

impl FromIterator<Severity> for LevelSet {
    fn from_iter<I: IntoIterator<Item = Severity>>(iter: I) -> Self {
        iter.into_iter().fold(LevelSet::empty(), LevelSet::with)
    }
}

impl std::fmt::Debug for LevelSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
