//! Min-cost flow by successive shortest paths.
//!
//! Network: source -> each row (capacity 1), row -> column for every
//! admissible pair (capacity 1, cost -weight), column -> sink (capacity =
//! column capacity). One unit is pushed per augmentation along the cheapest
//! residual path, found with a queue-based Bellman-Ford that tolerates the
//! negative costs.

use std::collections::VecDeque;

use staffplan_core::{Result, StaffplanError};
use tracing::{debug, trace};

use super::{AssignmentBackend, CapacitatedProblem};
use crate::stats::SolveStats;
use crate::termination::Deadline;

/// Relaxations must improve a distance by more than this to count.
const EPSILON: f64 = 1e-9;

/// Successive-shortest-path backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinCostFlow;

#[derive(Debug, Clone)]
struct Edge {
    to: usize,
    rev: usize,
    cap: u32,
    cost: f64,
}

#[derive(Debug)]
struct Network {
    adjacency: Vec<Vec<Edge>>,
}

impl Network {
    fn new(nodes: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); nodes],
        }
    }

    fn add_edge(&mut self, from: usize, to: usize, cap: u32, cost: f64) {
        let rev_from = self.adjacency[to].len();
        let rev_to = self.adjacency[from].len();
        self.adjacency[from].push(Edge {
            to,
            rev: rev_from,
            cap,
            cost,
        });
        self.adjacency[to].push(Edge {
            to: from,
            rev: rev_to,
            cap: 0,
            cost: -cost,
        });
    }

    /// Cheapest residual path from `source`; returns the predecessor edge of
    /// every reached node as `(node, edge index)`.
    fn shortest_path(
        &self,
        source: usize,
        stats: &mut SolveStats,
    ) -> Result<Vec<Option<(usize, usize)>>> {
        let nodes = self.adjacency.len();
        let mut dist = vec![f64::INFINITY; nodes];
        let mut prev: Vec<Option<(usize, usize)>> = vec![None; nodes];
        let mut queued = vec![false; nodes];
        let mut enqueued = vec![0usize; nodes];
        let mut queue = VecDeque::new();

        dist[source] = 0.0;
        queue.push_back(source);
        queued[source] = true;

        while let Some(node) = queue.pop_front() {
            queued[node] = false;
            for (index, edge) in self.adjacency[node].iter().enumerate() {
                if edge.cap == 0 {
                    continue;
                }
                let candidate = dist[node] + edge.cost;
                if candidate < dist[edge.to] - EPSILON {
                    dist[edge.to] = candidate;
                    prev[edge.to] = Some((node, index));
                    stats.record_relaxations(1);
                    if !queued[edge.to] {
                        // more enqueues than nodes only happens on a negative cycle
                        enqueued[edge.to] += 1;
                        if enqueued[edge.to] > nodes {
                            return Err(StaffplanError::SolverFailure(
                                "negative cycle in residual network".to_string(),
                            ));
                        }
                        queued[edge.to] = true;
                        queue.push_back(edge.to);
                    }
                }
            }
        }
        Ok(prev)
    }
}

impl AssignmentBackend for MinCostFlow {
    fn name(&self) -> &'static str {
        "min_cost_flow"
    }

    fn solve(
        &self,
        problem: &CapacitatedProblem,
        deadline: &Deadline,
        stats: &mut SolveStats,
    ) -> Result<Vec<usize>> {
        problem.check_feasible()?;

        let rows = problem.rows();
        let columns = problem.columns();
        let source = 0;
        let row_node = |r: usize| 1 + r;
        let column_node = |c: usize| 1 + rows + c;
        let sink = 1 + rows + columns;

        let mut network = Network::new(sink + 1);
        for r in 0..rows {
            network.add_edge(source, row_node(r), 1, 0.0);
            for c in 0..columns {
                if let Some(w) = problem.weight(r, c) {
                    network.add_edge(row_node(r), column_node(c), 1, -w);
                }
            }
        }
        for c in 0..columns {
            let cap = problem.effective_capacity(c) as u32;
            if cap > 0 {
                network.add_edge(column_node(c), sink, cap, 0.0);
            }
        }
        debug!(
            nodes = sink + 1,
            edges = problem.admissible_edges() + rows + columns,
            "Built flow network"
        );

        for flow in 0..rows {
            deadline.check()?;
            let prev = network.shortest_path(source, stats)?;
            if prev[sink].is_none() {
                return Err(StaffplanError::Infeasible(format!(
                    "only {} of {} rows can be placed",
                    flow, rows
                )));
            }

            let mut node = sink;
            while let Some((from, index)) = prev[node] {
                let rev = network.adjacency[from][index].rev;
                network.adjacency[from][index].cap -= 1;
                network.adjacency[node][rev].cap += 1;
                node = from;
            }
            stats.record_augmentation();
            trace!(flow = flow + 1, "Augmented");
        }

        // A row node only owns forward edges to columns, plus the residual
        // edge back to the source; a saturated column edge carries the flow.
        let column_nodes = column_node(0)..sink;
        let mut assignment = Vec::with_capacity(rows);
        for r in 0..rows {
            let column = network.adjacency[row_node(r)]
                .iter()
                .find(|e| column_nodes.contains(&e.to) && e.cap == 0)
                .map(|e| e.to - column_node(0));
            match column {
                Some(c) => assignment.push(c),
                None => {
                    return Err(StaffplanError::SolverFailure(format!(
                        "row {} carries no flow",
                        r
                    )))
                }
            }
        }
        Ok(assignment)
    }
}
