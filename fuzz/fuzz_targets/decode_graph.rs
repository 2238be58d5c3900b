//! Fuzz target for the binary graph decoder.
//!
//! Arbitrary bytes must decode or fail cleanly; whatever decodes must
//! re-encode to the same bytes.

#![no_main]

use causal_core::Graph;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(graph) = Graph::decode(data) else {
        return;
    };
    let bytes = graph.encode().expect("decoded graph fits the encoding limits");
    let again = Graph::decode(&bytes).expect("re-encoded graph decodes");
    assert_eq!(again, graph);
});
