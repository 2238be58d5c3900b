//! Compact binary encoding of a graph.
//!
//! All integers are big-endian:
//!
//! ```text
//! u16 node_count
//! node_count x { u16 name_len; name_len bytes of UTF-8 }   // node order
//! u16 edge_count
//! edge_count x { u16 source_index; u16 target_index; u8 edge_type_code }
//! ```
//!
//! Edges are written in key order, so equal graphs encode to equal bytes.
//! Decoding always produces a plain [`Graph`]: the format does not record
//! whether the encoded graph was a DAG or PDAG, and callers that need one
//! convert with `Dag::try_from` / `Pdag::try_from`.

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::edge::EdgeType;
use crate::error::GraphError;
use crate::graph::Graph;

const LIMIT: usize = u16::MAX as usize;

// ---------------------------------------------------------------------------
// Encode
// ---------------------------------------------------------------------------

impl Graph {
    /// Encode the graph to bytes.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::CodecLimitExceeded`] when the graph has more
    /// than 65535 nodes or edges, or a node name longer than 65535 bytes.
    #[instrument(skip(self), fields(nodes = self.number_of_nodes(), edges = self.number_of_edges()))]
    pub fn encode(&self) -> Result<Vec<u8>, GraphError> {
        let node_count = checked_u16("too many nodes", self.number_of_nodes())?;
        let edge_count = checked_u16("too many edges", self.number_of_edges())?;

        let mut buf = Vec::with_capacity(4 + self.number_of_edges() * 5);
        buf.extend_from_slice(&node_count.to_be_bytes());
        let mut index: HashMap<&str, u16> = HashMap::with_capacity(self.number_of_nodes());
        for (i, node) in self.nodes().iter().enumerate() {
            let len = checked_u16("node name too long", node.len())?;
            buf.extend_from_slice(&len.to_be_bytes());
            buf.extend_from_slice(node.as_bytes());
            index.insert(node.as_str(), checked_u16("too many nodes", i)?);
        }

        buf.extend_from_slice(&edge_count.to_be_bytes());
        for ((s, t), ty) in self.edges() {
            for endpoint in [s, t] {
                let idx = index.get(endpoint.as_str()).copied().unwrap_or_default();
                buf.extend_from_slice(&idx.to_be_bytes());
            }
            buf.push(ty.code());
        }

        debug!(bytes = buf.len(), "graph encoded");
        Ok(buf)
    }

    /// Decode bytes produced by [`Graph::encode`].
    ///
    /// # Errors
    ///
    /// Returns a codec error for truncated input, an out-of-range node index,
    /// an unknown edge-type code, a non-UTF-8 name or trailing bytes, and the
    /// usual construction errors for content that is structurally sound but
    /// not a valid graph (duplicate names, self-loops, duplicate edges).
    #[instrument(skip(data), fields(bytes = data.len()))]
    pub fn decode(data: &[u8]) -> Result<Self, GraphError> {
        let mut reader = Reader { data, pos: 0 };

        let node_count = usize::from(reader.read_u16()?);
        let mut nodes = Vec::with_capacity(node_count);
        for _ in 0..node_count {
            let len = usize::from(reader.read_u16()?);
            let offset = reader.pos;
            let bytes = reader.take(len)?;
            let name = std::str::from_utf8(bytes)
                .map_err(|_| GraphError::CodecInvalidUtf8 { offset })?;
            nodes.push(name.to_string());
        }

        let edge_count = usize::from(reader.read_u16()?);
        let mut edges = Vec::with_capacity(edge_count);
        for _ in 0..edge_count {
            let source = reader.read_index(nodes.len())?;
            let target = reader.read_index(nodes.len())?;
            let code_offset = reader.pos;
            let code = reader.read_u8()?;
            let edge_type = EdgeType::from_code(code).ok_or(GraphError::UnknownEdgeCode {
                offset: code_offset,
                code,
            })?;
            edges.push((nodes[source].clone(), edge_type, nodes[target].clone()));
        }

        let extra = data.len() - reader.pos;
        if extra > 0 {
            return Err(GraphError::CodecTrailingBytes { extra });
        }

        Self::from_parts(nodes, edges)
    }
}

fn checked_u16(what: &'static str, actual: usize) -> Result<u16, GraphError> {
    u16::try_from(actual).map_err(|_| GraphError::CodecLimitExceeded {
        what,
        actual,
        limit: LIMIT,
    })
}

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], GraphError> {
        let available = self.data.len() - self.pos;
        if available < n {
            return Err(GraphError::CodecTruncated {
                offset: self.pos,
                needed: n - available,
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn read_u8(&mut self) -> Result<u8, GraphError> {
        Ok(self.take(1)?[0])
    }

    fn read_u16(&mut self) -> Result<u16, GraphError> {
        let bytes = self.take(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    fn read_index(&mut self, count: usize) -> Result<usize, GraphError> {
        let offset = self.pos;
        let index = self.read_u16()?;
        let idx = usize::from(index);
        if idx >= count {
            return Err(GraphError::CodecOutOfRange {
                offset,
                index,
                count,
            });
        }
        Ok(idx)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
