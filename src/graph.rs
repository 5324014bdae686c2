use crate::StateId;
use std::collections::{HashMap, HashSet, VecDeque};

/// A plain successor-set view of an automaton's state graph. Built on demand
/// from a transition table and discarded after use; only states with
/// outgoing edges are required to appear as keys.
pub(crate) type Graph = HashMap<StateId, HashSet<StateId>>;

pub(crate) fn reverse(graph: &Graph) -> Graph {
    let mut reversed = Graph::new();
    for (&from, targets) in graph {
        for &to in targets {
            reversed.entry(to).or_default().insert(from);
        }
    }
    reversed
}

/// BFS forward closure of `seeds`. The seeds are always part of the result,
/// since the graph only stores edges.
pub(crate) fn reachable<I>(graph: &Graph, seeds: I) -> HashSet<StateId>
where
    I: IntoIterator<Item = StateId>,
{
    let mut seen = HashSet::new();
    let mut queue = VecDeque::new();
    for seed in seeds {
        if seen.insert(seed) {
            queue.push_back(seed);
        }
    }

    while let Some(current) = queue.pop_front() {
        if let Some(targets) = graph.get(&current) {
            for &next in targets {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
    }
    seen
}
