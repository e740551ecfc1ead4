//! Cycle detection — iterative depth-first traversal.
//!
//! One DFS from each unvisited node, maintaining a recursion-stack set
//! and a path vector. Hitting a neighbor already on the stack slices the
//! path from that neighbor onward into a cycle; traversal continues so
//! independent cycles are all found. Overlapping rotations of the same
//! cycle may appear; canonicalization is a presentation concern.
//!
//! O(V + E): every node is visited once and every edge followed once.

use petgraph::graph::{NodeIndex, Neighbors};
use petgraph::Direction;

use super::builder::{BuildGraph, EdgeAttrs};

pub(crate) fn detect(graph: &BuildGraph) -> Vec<Vec<String>> {
    let n = graph.node_count();
    let mut visited = vec![false; n];
    let mut on_stack = vec![false; n];
    let mut cycles = Vec::new();

    for start in graph.node_indices() {
        if visited[start.index()] {
            continue;
        }

        let mut path: Vec<NodeIndex> = vec![start];
        let mut frames: Vec<(NodeIndex, Neighbors<'_, EdgeAttrs>)> =
            vec![(start, graph.neighbors_directed(start, Direction::Outgoing))];
        visited[start.index()] = true;
        on_stack[start.index()] = true;

        loop {
            let Some(frame) = frames.last_mut() else {
                break;
            };
            let node = frame.0;
            let step = frame.1.next();
            match step {
                Some(next) => {
                    if next == node {
                        // Self-edges are not reported as cycles.
                        continue;
                    }
                    if !visited[next.index()] {
                        visited[next.index()] = true;
                        on_stack[next.index()] = true;
                        path.push(next);
                        frames.push((next, graph.neighbors_directed(next, Direction::Outgoing)));
                    } else if on_stack[next.index()] {
                        if let Some(pos) = path.iter().position(|&p| p == next) {
                            let mut cycle: Vec<String> = path[pos..]
                                .iter()
                                .map(|&p| graph[p].path.clone())
                                .collect();
                            cycle.push(graph[next].path.clone());
                            cycles.push(cycle);
                        }
                    }
                }
                None => {
                    on_stack[node.index()] = false;
                    path.pop();
                    frames.pop();
                }
            }
        }
    }

    cycles
}
