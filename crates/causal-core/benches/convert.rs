use causal_core::{Dag, EdgeType, Graph, dag_to_pdag, extend_pdag, pdag_to_cpdag};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

struct Tier {
    name: &'static str,
    nodes: usize,
    /// Expected parents per node.
    fan_in: u64,
}

const TIERS: [Tier; 3] = [
    Tier {
        name: "small",
        nodes: 20,
        fan_in: 2,
    },
    Tier {
        name: "medium",
        nodes: 100,
        fan_in: 3,
    },
    Tier {
        name: "large",
        nodes: 400,
        fan_in: 3,
    },
];

/// Deterministic random DAG: arcs only from lower to higher index.
fn synthetic_dag(tier: &Tier, seed: u64) -> Dag {
    let mut state = seed;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    let nodes: Vec<String> = (0..tier.nodes).map(|i| format!("X{i:04}")).collect();
    let mut edges = Vec::new();
    for j in 1..tier.nodes {
        for i in 0..j {
            if next() % (j as u64) < tier.fan_in {
                edges.push((nodes[i].clone(), EdgeType::Directed, nodes[j].clone()));
            }
        }
    }
    Dag::from_parts(nodes, edges).expect("forward arcs are acyclic")
}

fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert.tiered");

    for tier in &TIERS {
        let dag = synthetic_dag(tier, 0xCA05A1_u64 + tier.nodes as u64);
        let cpdag = dag_to_pdag(&dag).expect("cpdag");
        let bytes = dag.encode().expect("encode");
        group.throughput(Throughput::Elements(dag.number_of_edges() as u64));

        group.bench_with_input(BenchmarkId::new("dag_to_pdag", tier.name), &dag, |b, dag| {
            b.iter(|| black_box(dag_to_pdag(dag)))
        });

        group.bench_with_input(
            BenchmarkId::new("extend_pdag", tier.name),
            &cpdag,
            |b, cpdag| b.iter(|| black_box(extend_pdag(cpdag))),
        );

        group.bench_with_input(
            BenchmarkId::new("pdag_to_cpdag", tier.name),
            &cpdag,
            |b, cpdag| b.iter(|| black_box(pdag_to_cpdag(cpdag))),
        );

        group.bench_with_input(BenchmarkId::new("decode", tier.name), &bytes, |b, bytes| {
            b.iter(|| black_box(Graph::decode(bytes)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_convert);
criterion_main!(benches);
