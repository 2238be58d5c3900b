//! Conversions across the Markov-equivalence class of a DAG.
//!
//! - [`dag_to_pdag`]: DAG to its completed PDAG (CPDAG).
//! - [`extend_pdag`]: PDAG to one consistent member DAG.
//! - [`pdag_to_cpdag`]: PDAG to the canonical CPDAG of its class.
//! - [`is_cpdag`]: whether a PDAG is already canonical.

pub mod extend;
pub mod meek;

pub use extend::extend_pdag;
pub use meek::dag_to_pdag;

use tracing::instrument;

use crate::error::GraphError;
use crate::pdag::Pdag;

/// Canonical CPDAG of the class `pdag` belongs to.
///
/// Any consistent extension gives the same result, so the choice made by
/// [`extend_pdag`] does not matter.
///
/// # Errors
///
/// Propagates [`GraphError::Unextendable`] from [`extend_pdag`].
#[instrument(skip(pdag), fields(nodes = pdag.number_of_nodes()))]
pub fn pdag_to_cpdag(pdag: &Pdag) -> Result<Pdag, GraphError> {
    dag_to_pdag(&extend_pdag(pdag)?)
}

/// Whether `pdag` equals the CPDAG of its own class.
///
/// # Errors
///
/// An unextendable PDAG is an error, not a negative answer:
/// [`GraphError::Unextendable`] is propagated.
pub fn is_cpdag(pdag: &Pdag) -> Result<bool, GraphError> {
    Ok(pdag_to_cpdag(pdag)? == *pdag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dag::Dag;

    fn pdag(nodes: &[&str], edges: &[(&str, &str, &str)]) -> Pdag {
        Pdag::new(nodes, edges).expect("valid pdag")
    }

    #[test]
    fn collider_is_cpdag() {
        let d = Dag::new(&["A", "B", "C"], &[("A", "->", "C"), ("B", "->", "C")])
            .expect("valid");
        let p = dag_to_pdag(&d).expect("cpdag");
        assert!(is_cpdag(&p).expect("extendable"));
    }

    #[test]
    fn chain_cpdag_edges_are_reversible() {
        let d = Dag::new(&["A", "B", "C"], &[("A", "->", "B"), ("B", "->", "C")])
            .expect("valid");
        let p = dag_to_pdag(&d).expect("cpdag");
        assert!(p.edge_reversible(("A", "B")));
        assert!(p.edge_reversible(("B", "C")));
        assert!(is_cpdag(&p).expect("extendable"));
    }

    #[test]
    fn directed_chain_is_not_cpdag() {
        let p = pdag(&["A", "B", "C"], &[("A", "->", "B"), ("B", "->", "C")]);
        assert!(!is_cpdag(&p).expect("extendable"));
        assert_eq!(
            pdag_to_cpdag(&p).expect("cpdag"),
            pdag(&["A", "B", "C"], &[("A", "-", "B"), ("B", "-", "C")])
        );
    }

    #[test]
    fn unextendable_square_propagates() {
        let p = pdag(
            &["1", "2", "3", "4"],
            &[("1", "-", "2"), ("2", "-", "3"), ("3", "-", "4"), ("4", "-", "1")],
        );
        let err = is_cpdag(&p).expect_err("unextendable");
        assert!(matches!(err, GraphError::Unextendable { .. }));
        assert!(err.is_value_error());
        assert!(pdag_to_cpdag(&p).is_err());
    }

    #[test]
    fn empty_pdag_is_cpdag() {
        assert!(is_cpdag(&Pdag::default()).expect("empty"));
    }
}
