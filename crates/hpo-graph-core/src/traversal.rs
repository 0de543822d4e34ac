//! Breadth-first primitives over dense node positions.
//!
//! Every edge has unit weight, so BFS yields shortest path lengths. Visited
//! sets are [`FixedBitSet`]s: a node is expanded at most once, which makes
//! parallel edges irrelevant and keeps a cyclic input from looping forever.
//!
//! The functions take a neighbor closure instead of a graph so the same code
//! walks raw edges forward, backward, or through the undirected view.

use std::collections::VecDeque;

use fixedbitset::FixedBitSet;

/// Shortest hop count from `start` to every node, `None` where unreachable.
pub fn bfs_levels<F, I>(node_count: usize, start: usize, mut neighbors: F) -> Vec<Option<usize>>
where
    F: FnMut(usize) -> I,
    I: IntoIterator<Item = usize>,
{
    let mut levels = vec![None; node_count];
    levels[start] = Some(0);
    let mut queue = VecDeque::from([(start, 0)]);

    while let Some((current, depth)) = queue.pop_front() {
        for next in neighbors(current) {
            if levels[next].is_none() {
                levels[next] = Some(depth + 1);
                queue.push_back((next, depth + 1));
            }
        }
    }

    levels
}

/// Shortest hop count from `start` to `target`, stopping as soon as the
/// target is discovered.
pub fn shortest_path_len<F, I>(
    node_count: usize,
    start: usize,
    target: usize,
    mut neighbors: F,
) -> Option<usize>
where
    F: FnMut(usize) -> I,
    I: IntoIterator<Item = usize>,
{
    if start == target {
        return Some(0);
    }

    let mut visited = FixedBitSet::with_capacity(node_count);
    visited.insert(start);
    let mut queue = VecDeque::from([(start, 0)]);

    while let Some((current, depth)) = queue.pop_front() {
        for next in neighbors(current) {
            if next == target {
                return Some(depth + 1);
            }
            if !visited.put(next) {
                queue.push_back((next, depth + 1));
            }
        }
    }

    None
}

/// Every node reachable from `start` in at least one step.
///
/// `start` itself is excluded unless a cycle leads back to it.
pub fn reachable<F, I>(node_count: usize, start: usize, mut neighbors: F) -> FixedBitSet
where
    F: FnMut(usize) -> I,
    I: IntoIterator<Item = usize>,
{
    let mut visited = FixedBitSet::with_capacity(node_count);
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        for next in neighbors(current) {
            if !visited.put(next) {
                queue.push_back(next);
            }
        }
    }

    visited
}
