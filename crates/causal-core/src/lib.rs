//! causal-core library.
//!
//! Graph types for causal structures and the conversions between them:
//!
//! - [`Graph`]: the general semi-directed graph (SDG) with any of the six
//!   non-`None` edge kinds in [`EdgeType`].
//! - [`Dag`]: directed acyclic graph.
//! - [`Pdag`]: partially directed acyclic graph, including CPDAGs.
//! - [`dag_to_pdag`], [`extend_pdag`], [`pdag_to_cpdag`], [`is_cpdag`]:
//!   movement within a Markov-equivalence class.
//!
//! # Conventions
//!
//! - **Errors**: every fallible operation returns [`GraphError`]; its
//!   [`ErrorKind`] gives the coarse category and a stable `E####` code.
//! - **Logging**: `tracing` spans on the conversions and codec, `debug!` for
//!   summaries, `trace!` for individual orientations.
//! - **Values**: graphs are immutable except for `rename`; equality compares
//!   nodes and edges only, so a `Dag`, a `Pdag` and a `Graph` with the same
//!   content are equal.

pub mod codec;
pub mod convert;
pub mod dag;
pub mod edge;
pub mod error;
pub mod graph;
pub mod pdag;

pub use convert::{dag_to_pdag, extend_pdag, is_cpdag, pdag_to_cpdag};
pub use dag::Dag;
pub use edge::{EdgeMark, EdgeType};
pub use error::{ErrorKind, GraphError};
pub use graph::components::UndirectedTree;
pub use graph::{AdjMatrix, EdgeMap, Graph, GraphKind, canonical_key, partial_order};
pub use pdag::Pdag;

/// Content equality between the graph newtypes and `Graph`.
macro_rules! content_eq {
    ($($lhs:ty => $rhs:ty),* $(,)?) => {
        $(
            impl PartialEq<$rhs> for $lhs {
                fn eq(&self, other: &$rhs) -> bool {
                    AsRef::<Graph>::as_ref(self) == AsRef::<Graph>::as_ref(other)
                }
            }
        )*
    };
}

content_eq! {
    Dag => Graph,
    Graph => Dag,
    Pdag => Graph,
    Graph => Pdag,
    Dag => Pdag,
    Pdag => Dag,
}

impl AsRef<Self> for Graph {
    fn as_ref(&self) -> &Self {
        self
    }
}
