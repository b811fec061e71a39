//! Strongly-typed identifiers: [`Species`], [`Occupant`] and [`BowlNumber`].

use std::fmt;

/// The two classes of actor contending for bowls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Species {
    /// A cat.
    Cat,
    /// A mouse.
    Mouse,
}

impl Species {
    /// Both species, in a fixed order.
    pub const ALL: [Species; 2] = [Species::Cat, Species::Mouse];

    /// The species that may never eat at the same time as `self`.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Cat => Self::Mouse,
            Self::Mouse => Self::Cat,
        }
    }

    /// The single-character bowl marker for this species.
    pub const fn marker(self) -> char {
        match self {
            Self::Cat => 'c',
            Self::Mouse => 'm',
        }
    }

    /// Lower-case name, used in log lines and thread names.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cat => "cat",
            Self::Mouse => "mouse",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The content of a single bowl.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Occupant {
    /// Nobody is eating here.
    #[default]
    Empty,
    /// A cat is eating here.
    Cat,
    /// A mouse is eating here.
    Mouse,
}

impl Occupant {
    /// The species occupying the bowl, or `None` if it is empty.
    pub const fn species(self) -> Option<Species> {
        match self {
            Self::Empty => None,
            Self::Cat => Some(Species::Cat),
            Self::Mouse => Some(Species::Mouse),
        }
    }

    /// Whether the bowl is free.
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The character used in occupancy lines: `-`, `c` or `m`.
    pub const fn marker(self) -> char {
        match self {
            Self::Empty => '-',
            Self::Cat => 'c',
            Self::Mouse => 'm',
        }
    }
}

impl From<Species> for Occupant {
    fn from(species: Species) -> Self {
        match species {
            Species::Cat => Self::Cat,
            Species::Mouse => Self::Mouse,
        }
    }
}

impl fmt::Display for Occupant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.marker())
    }
}

/// A 1-based bowl number as seen by actors.
///
/// Bowl numbers are 1-based at every public interface and 0-based in
/// storage. `BowlNumber(0)` is representable so that callers can pass
/// it and have it rejected as a contract violation; it is never valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BowlNumber(pub u32);

impl BowlNumber {
    /// The 0-based storage index for this bowl, or `None` if it falls
    /// outside `1..=bowl_count`.
    pub fn index(self, bowl_count: usize) -> Option<usize> {
        let n = self.0 as usize;
        (1..=bowl_count).contains(&n).then(|| n - 1)
    }

    /// The bowl number for a 0-based storage index.
    ///
    /// # Panics
    ///
    /// Panics if `index + 1` does not fit in `u32`. Arena construction
    /// rejects bowl counts that large, so this is unreachable for
    /// indices obtained from an arena.
    pub fn from_index(index: usize) -> Self {
        Self(u32::try_from(index + 1).expect("bowl index exceeds u32::MAX"))
    }
}

impl fmt::Display for BowlNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for BowlNumber {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
