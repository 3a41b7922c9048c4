//! Property tests for task graph resolution.

use std::collections::HashSet;

use proptest::prelude::*;

use wrtpack::{Task, TaskGraph, WrtError};

fn name(i: usize) -> String {
    format!("t{}", i)
}

/// Random DAG as adjacency lists; task `i` only depends on tasks below `i`.
fn dag() -> impl Strategy<Value = Vec<Vec<usize>>> {
    proptest::collection::vec(proptest::collection::vec(0usize..64, 0..4), 1..12).prop_map(
        |raw| {
            raw.into_iter()
                .enumerate()
                .map(|(i, deps)| {
                    if i == 0 {
                        Vec::new()
                    } else {
                        deps.into_iter().map(|d| d % i).collect()
                    }
                })
                .collect()
        },
    )
}

fn build(deps: &[Vec<usize>]) -> TaskGraph<()> {
    let mut graph = TaskGraph::new();
    for (i, task_deps) in deps.iter().enumerate() {
        graph
            .register(Task::new(name(i), task_deps.iter().map(|d| name(*d)), ()))
            .unwrap();
    }
    graph
}

fn reachable(deps: &[Vec<usize>], entry: usize) -> HashSet<String> {
    let mut seen = HashSet::new();
    let mut stack = vec![entry];
    while let Some(i) = stack.pop() {
        if seen.insert(name(i)) {
            stack.extend(deps[i].iter().copied());
        }
    }
    seen
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Every task reachable from the entry is planned exactly once,
    /// after all of its dependencies, and nothing else is planned.
    #[test]
    fn property_plan_is_topological_and_minimal(deps in dag(), pick in 0usize..64) {
        let entry = pick % deps.len();
        let entry_name = name(entry);
        let graph = build(&deps);

        let plan = graph.resolve(&entry_name).unwrap();

        let planned: Vec<&str> = plan.iter().collect();
        let unique: HashSet<&str> = planned.iter().copied().collect();
        prop_assert_eq!(unique.len(), planned.len());

        let expected = reachable(&deps, entry);
        prop_assert_eq!(
            unique.iter().map(|s| s.to_string()).collect::<HashSet<_>>(),
            expected
        );

        for (i, task_deps) in deps.iter().enumerate() {
            let Some(at) = plan.position(&name(i)) else {
                continue;
            };
            for d in task_deps {
                let dep_at = plan.position(&name(*d));
                prop_assert!(dep_at.is_some_and(|p| p < at));
            }
        }
        prop_assert_eq!(planned.last().copied(), Some(entry_name.as_str()));
    }

    /// PROPERTY: Resolution is deterministic.
    #[test]
    fn property_resolution_is_deterministic(deps in dag()) {
        let entry = name(deps.len() - 1);
        let first = build(&deps).resolve(&entry).unwrap();
        let second = build(&deps).resolve(&entry).unwrap();
        prop_assert_eq!(first, second);
    }

    /// PROPERTY: A dependency ring of any length is reported as a cycle that
    /// starts and ends at the same task.
    #[test]
    fn property_ring_is_a_cycle(len in 1usize..8, start in 0usize..8) {
        let mut graph: TaskGraph<()> = TaskGraph::new();
        for i in 0..len {
            graph.register(Task::new(name(i), [name((i + 1) % len)], ())).unwrap();
        }

        let err = graph.resolve(&name(start % len)).unwrap_err();

        match err {
            WrtError::Cycle { path } => {
                prop_assert_eq!(path.len(), len + 1);
                prop_assert_eq!(path.first(), path.last());
            }
            other => prop_assert!(false, "expected a cycle, got {}", other),
        }
    }
}
