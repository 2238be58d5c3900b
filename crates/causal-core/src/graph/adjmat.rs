//! Dense adjacency matrix view of a graph.
//!
//! Rows and columns follow the graph's node order. `cell(row, col)` holds the
//! [`EdgeType`] code of the stored edge `col -> row`, or 0 when there is none.
//! A symmetric edge occupies a single cell, at its stored orientation.

use std::fmt;

use super::Graph;
use crate::edge::EdgeType;
use crate::error::GraphError;

/// Square matrix of edge-type codes indexed by node name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjMatrix {
    nodes: Vec<String>,
    cells: Vec<u8>,
}

impl AdjMatrix {
    /// Build a matrix from named columns of codes.
    ///
    /// Row `i` of every column belongs to the `i`-th column's name, so each
    /// column must hold exactly one value per column.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::AdjMatrixShape`] when a column's length differs
    /// from the number of columns, and [`GraphError::AdjMatrixCode`] for a
    /// value that is not an edge-type code.
    pub fn from_columns<S: AsRef<str>>(columns: &[(S, Vec<i64>)]) -> Result<Self, GraphError> {
        let n = columns.len();
        let mut cells = vec![0u8; n * n];
        for (col, (name, values)) in columns.iter().enumerate() {
            if values.len() != n {
                return Err(GraphError::AdjMatrixShape {
                    column: name.as_ref().to_string(),
                    len: values.len(),
                    expected: n,
                });
            }
            for (row, value) in values.iter().enumerate() {
                let code = u8::try_from(*value)
                    .ok()
                    .filter(|c| EdgeType::from_code(*c).is_some())
                    .ok_or_else(|| GraphError::AdjMatrixCode {
                        column: name.as_ref().to_string(),
                        code: *value,
                    })?;
                cells[row * n + col] = code;
            }
        }
        Ok(Self {
            nodes: columns.iter().map(|(name, _)| name.as_ref().to_string()).collect(),
            cells,
        })
    }

    #[must_use]
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Code at `(row, col)`, i.e. of the edge `col -> row`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> u8 {
        let n = self.len();
        assert!(row < n && col < n, "adjmat index ({row}, {col}) out of bounds for {n}");
        self.cells[row * n + col]
    }

    /// Code of the edge `source -> target`, by node name.
    #[must_use]
    pub fn edge_code(&self, source: &str, target: &str) -> Option<u8> {
        let col = self.position(source)?;
        let row = self.position(target)?;
        Some(self.cells[row * self.len() + col])
    }

    /// Rebuild the graph the matrix describes.
    ///
    /// # Errors
    ///
    /// Returns the usual construction errors, e.g. [`GraphError::DuplicateEdge`]
    /// when both orientations of a pair are set.
    pub fn to_graph(&self) -> Result<Graph, GraphError> {
        let n = self.len();
        let mut edges = Vec::new();
        for row in 0..n {
            for col in 0..n {
                let code = self.cells[row * n + col];
                if code == 0 {
                    continue;
                }
                let edge_type = EdgeType::from_code(code).unwrap_or(EdgeType::None);
                edges.push((self.nodes[col].clone(), edge_type, self.nodes[row].clone()));
            }
        }
        Graph::from_parts(self.nodes.clone(), edges)
    }

    fn position(&self, node: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n == node)
    }
}

impl fmt::Display for AdjMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.nodes.iter().map(String::len).max().unwrap_or(0);
        write!(f, "{:width$}", "")?;
        for node in &self.nodes {
            write!(f, " {node:>width$}")?;
        }
        for (row, node) in self.nodes.iter().enumerate() {
            write!(f, "\n{node:width$}")?;
            for col in 0..self.len() {
                write!(f, " {:>width$}", self.cell(row, col))?;
            }
        }
        Ok(())
    }
}

impl Graph {
    /// Adjacency matrix over the node order.
    #[must_use]
    pub fn to_adjmat(&self) -> AdjMatrix {
        let n = self.number_of_nodes();
        let mut cells = vec![0u8; n * n];
        let index = |name: &str| {
            self.nodes()
                .binary_search_by(|node| node.as_str().cmp(name))
                .ok()
        };
        for ((s, t), ty) in self.edges() {
            if let (Some(col), Some(row)) = (index(s), index(t)) {
                cells[row * n + col] = ty.code();
            }
        }
        AdjMatrix {
            nodes: self.nodes().to_vec(),
            cells,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_graph_has_empty_matrix() {
        let m = Graph::empty().to_adjmat();
        assert!(m.is_empty());
        assert_eq!(m, AdjMatrix::from_columns::<&str>(&[]).expect("empty"));
    }

    #[test]
    fn cell_holds_code_of_col_to_row_edge() {
        let g = Graph::new(&["A", "B", "C"], &[("A", "->", "B"), ("C", "-", "B")])
            .expect("valid");
        let m = g.to_adjmat();
        assert_eq!(m.nodes(), ["A", "B", "C"]);
        // A -> B: column A, row B
        assert_eq!(m.cell(1, 0), 1);
        assert_eq!(m.cell(0, 1), 0);
        // B - C is stored as (B, C)
        assert_eq!(m.cell(2, 1), 2);
        assert_eq!(m.cell(1, 2), 0);
        assert_eq!(m.edge_code("A", "B"), Some(1));
        assert_eq!(m.edge_code("A", "Z"), None);
    }

    #[test]
    fn from_columns_matches_to_adjmat() {
        let g = Graph::new(&["A", "B"], &[("A", "o->", "B")]).expect("valid");
        let m = AdjMatrix::from_columns(&[("A", vec![0, 4]), ("B", vec![0, 0])]).expect("valid");
        assert_eq!(g.to_adjmat(), m);
        assert_eq!(m.to_graph().expect("graph"), g);
    }

    #[test]
    fn from_columns_rejects_wrong_length() {
        let err = AdjMatrix::from_columns(&[("A", vec![0, 1]), ("B", vec![0])])
            .expect_err("short column");
        assert!(err.to_string().starts_with("some columns wrong length for adjmat"));
    }

    #[test]
    fn from_columns_rejects_bad_codes() {
        for bad in [-1, 7, 300] {
            let err = AdjMatrix::from_columns(&[("A", vec![0, bad]), ("B", vec![0, 0])])
                .expect_err("bad code");
            assert!(err.to_string().starts_with("invalid integer values for adjmat"));
        }
    }

    #[test]
    fn display_is_aligned() {
        let g = Graph::new(&["A", "B"], &[("A", "->", "B")]).expect("valid");
        assert_eq!(g.to_adjmat().to_string(), "  A B\nA 0 0\nB 1 0");
    }
}
