//! Endpoint marks and edge kinds.
//!
//! Every edge in a causal graph is described by the marks at its two
//! endpoints. The vocabulary is closed: four marks and seven edge kinds,
//! each kind with a stable integer code (used by the binary codec and the
//! adjacency matrix) and a canonical ASCII symbol (used when building graphs
//! from text).
//!
//! | kind | code | source | target | symbol |
//! |------|------|--------|--------|--------|
//! | `None` | 0 | `None` | `None` | `""` |
//! | `Directed` | 1 | `Line` | `Arrow` | `"->"` |
//! | `Undirected` | 2 | `Line` | `Line` | `"-"` |
//! | `Bidirected` | 3 | `Arrow` | `Arrow` | `"<->"` |
//! | `Semidirected` | 4 | `Circle` | `Arrow` | `"o->"` |
//! | `Nondirected` | 5 | `Circle` | `Circle` | `"o-o"` |
//! | `Semiundirected` | 6 | `Circle` | `Line` | `"o-"` |

use std::fmt;
use std::str::FromStr;

use crate::error::GraphError;

// ---------------------------------------------------------------------------
// EdgeMark
// ---------------------------------------------------------------------------

/// Mark drawn at one endpoint of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdgeMark {
    None = 0,
    Line = 1,
    Arrow = 2,
    Circle = 3,
}

impl EdgeMark {
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }
}

// ---------------------------------------------------------------------------
// EdgeType
// ---------------------------------------------------------------------------

/// Kind of edge joining two nodes.
///
/// `None` means "no edge". It exists so adjacency matrices and lookups have
/// a zero value, but graph constructors reject it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdgeType {
    None,
    Directed,
    Undirected,
    Bidirected,
    Semidirected,
    Nondirected,
    Semiundirected,
}

impl EdgeType {
    /// Every edge kind in code order.
    pub const ALL: [Self; 7] = [
        Self::None,
        Self::Directed,
        Self::Undirected,
        Self::Bidirected,
        Self::Semidirected,
        Self::Nondirected,
        Self::Semiundirected,
    ];

    /// Stable integer code used by the codec and adjacency matrices.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Directed => 1,
            Self::Undirected => 2,
            Self::Bidirected => 3,
            Self::Semidirected => 4,
            Self::Nondirected => 5,
            Self::Semiundirected => 6,
        }
    }

    /// Look up a kind by its integer code.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::None),
            1 => Some(Self::Directed),
            2 => Some(Self::Undirected),
            3 => Some(Self::Bidirected),
            4 => Some(Self::Semidirected),
            5 => Some(Self::Nondirected),
            6 => Some(Self::Semiundirected),
            _ => None,
        }
    }

    /// Canonical ASCII symbol, e.g. `"->"`.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Directed => "->",
            Self::Undirected => "-",
            Self::Bidirected => "<->",
            Self::Semidirected => "o->",
            Self::Nondirected => "o-o",
            Self::Semiundirected => "o-",
        }
    }

    /// Look up a kind by its canonical symbol. Only exact matches count.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.symbol() == symbol)
    }

    #[must_use]
    pub const fn source_mark(self) -> EdgeMark {
        self.marks().0
    }

    #[must_use]
    pub const fn target_mark(self) -> EdgeMark {
        self.marks().1
    }

    /// Find the kind with the given pair of endpoint marks.
    #[must_use]
    pub fn from_marks(source: EdgeMark, target: EdgeMark) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.marks() == (source, target))
    }

    /// Symmetric kinds look the same from either endpoint, so their edge key
    /// is stored with the smaller node name first.
    #[must_use]
    pub const fn is_symmetric(self) -> bool {
        matches!(self, Self::Undirected | Self::Bidirected | Self::Nondirected)
    }

    const fn marks(self) -> (EdgeMark, EdgeMark) {
        match self {
            Self::None => (EdgeMark::None, EdgeMark::None),
            Self::Directed => (EdgeMark::Line, EdgeMark::Arrow),
            Self::Undirected => (EdgeMark::Line, EdgeMark::Line),
            Self::Bidirected => (EdgeMark::Arrow, EdgeMark::Arrow),
            Self::Semidirected => (EdgeMark::Circle, EdgeMark::Arrow),
            Self::Nondirected => (EdgeMark::Circle, EdgeMark::Circle),
            Self::Semiundirected => (EdgeMark::Circle, EdgeMark::Line),
        }
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for EdgeType {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_symbol(s).ok_or_else(|| GraphError::UnknownEdgeSymbol {
            symbol: s.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
