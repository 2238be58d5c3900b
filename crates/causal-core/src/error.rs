//! Error taxonomy for graph construction, conversion and decoding.
//!
//! [`GraphError`] carries the details (offending node, edge or byte offset).
//! [`ErrorKind`] is the coarse category callers branch on: a bad edge symbol
//! is a *type* problem, a malformed node/edge set is a *value* problem, and
//! subtype violations are reported as "not a DAG" / "not a PDAG".

use std::fmt;

use thiserror::Error;

use crate::edge::EdgeType;
use crate::graph::GraphKind;

/// Coarse error categories with stable machine-readable codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Type,
    Value,
    NotDag,
    NotPdag,
    Unextendable,
    Codec,
}

impl ErrorKind {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Type => "E1001",
            Self::Value => "E1002",
            Self::NotDag => "E2001",
            Self::NotPdag => "E2002",
            Self::Unextendable => "E2003",
            Self::Codec => "E3001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Type => "Unrecognized edge symbol",
            Self::Value => "Invalid node or edge set",
            Self::NotDag => "Graph is not a DAG",
            Self::NotPdag => "Graph is not a PDAG",
            Self::Unextendable => "PDAG has no consistent extension",
            Self::Codec => "Malformed graph encoding",
        }
    }

    /// Optional remediation hint.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::Type => Some("Use one of: ->, -, <->, o->, o-o, o-."),
            Self::Value => None,
            Self::NotDag => Some("DAGs allow only '->' edges and no directed cycles."),
            Self::NotPdag => {
                Some("PDAGs allow only '->' and '-' edges and no directed cycles.")
            }
            Self::Unextendable => {
                Some("Orient some undirected edges so no new collider or cycle is required.")
            }
            Self::Codec => Some("Re-encode the graph; the buffer is truncated or corrupt."),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Every failure the library reports.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("unrecognized edge symbol {symbol:?}")]
    UnknownEdgeSymbol { symbol: String },

    #[error("node names must be non-empty")]
    EmptyNodeName,

    #[error("duplicate node {node:?}")]
    DuplicateNode { node: String },

    #[error("edge {from:?} - {to:?} has no type")]
    NoneEdge { from: String, to: String },

    #[error("self-loop on node {node:?}")]
    SelfLoop { node: String },

    #[error("edge {from:?} - {to:?} references undeclared node {node:?}")]
    UnknownNode {
        node: String,
        from: String,
        to: String,
    },

    #[error("duplicate edge between {from:?} and {to:?}")]
    DuplicateEdge { from: String, to: String },

    #[error("rename key {node:?} is not a node of the graph")]
    UnknownRenameKey { node: String },

    #[error("{kind} cannot contain {edge_type:?} edge {from:?} {symbol} {to:?}", symbol = .edge_type.symbol())]
    UnsupportedEdgeType {
        kind: GraphKind,
        from: String,
        edge_type: EdgeType,
        to: String,
    },

    #[error("{kind} has a directed cycle through {}", .members.join(", "))]
    Cycle { kind: GraphKind, members: Vec<String> },

    #[error("PDAG cannot be extended: undirected edges remain between {}", format_pairs(.remaining))]
    Unextendable { remaining: Vec<(String, String)> },

    #[error("graph encoding truncated at byte {offset}: {needed} more byte(s) needed")]
    CodecTruncated { offset: usize, needed: usize },

    #[error("edge at byte {offset} references node index {index} but only {count} nodes exist")]
    CodecOutOfRange {
        offset: usize,
        index: u16,
        count: usize,
    },

    #[error("unrecognized edge type code {code} at byte {offset}")]
    UnknownEdgeCode { offset: usize, code: u8 },

    #[error("node name at byte {offset} is not valid UTF-8")]
    CodecInvalidUtf8 { offset: usize },

    #[error("{extra} trailing byte(s) after graph encoding")]
    CodecTrailingBytes { extra: usize },

    #[error("{what} ({actual} exceeds {limit})")]
    CodecLimitExceeded {
        what: &'static str,
        actual: usize,
        limit: usize,
    },

    #[error("some columns wrong length for adjmat: column {column:?} has {len} values, expected {expected}")]
    AdjMatrixShape {
        column: String,
        len: usize,
        expected: usize,
    },

    #[error("invalid integer values for adjmat: {code} in column {column:?}")]
    AdjMatrixCode { column: String, code: i64 },
}

impl GraphError {
    /// Coarse category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownEdgeSymbol { .. } => ErrorKind::Type,
            Self::EmptyNodeName
            | Self::DuplicateNode { .. }
            | Self::NoneEdge { .. }
            | Self::SelfLoop { .. }
            | Self::UnknownNode { .. }
            | Self::DuplicateEdge { .. }
            | Self::UnknownRenameKey { .. }
            | Self::AdjMatrixShape { .. }
            | Self::AdjMatrixCode { .. } => ErrorKind::Value,
            Self::UnsupportedEdgeType { kind, .. } | Self::Cycle { kind, .. } => match kind {
                GraphKind::Dag => ErrorKind::NotDag,
                GraphKind::Pdag | GraphKind::Sdg => ErrorKind::NotPdag,
            },
            Self::Unextendable { .. } => ErrorKind::Unextendable,
            Self::CodecTruncated { .. }
            | Self::CodecOutOfRange { .. }
            | Self::UnknownEdgeCode { .. }
            | Self::CodecInvalidUtf8 { .. }
            | Self::CodecTrailingBytes { .. }
            | Self::CodecLimitExceeded { .. } => ErrorKind::Codec,
        }
    }

    #[must_use]
    pub const fn is_not_dag(&self) -> bool {
        matches!(self.kind(), ErrorKind::NotDag)
    }

    #[must_use]
    pub const fn is_not_pdag(&self) -> bool {
        matches!(self.kind(), ErrorKind::NotPdag)
    }

    /// True for every category that signals an invalid graph value
    /// (including subtype violations and unextendable PDAGs).
    #[must_use]
    pub const fn is_value_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Value | ErrorKind::NotDag | ErrorKind::NotPdag | ErrorKind::Unextendable
        )
    }
}

fn format_pairs(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(u, v)| format!("{u}-{v}"))
        .collect::<Vec<_>>()
        .join(", ")
}
