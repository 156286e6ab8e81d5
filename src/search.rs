use std::{
    cmp::Ordering,
    collections::{BinaryHeap, HashMap, HashSet},
};

use tracing::{debug, info, trace};

use crate::{
    data::*,
    error::SearchError,
    geo::heuristic,
    graph::Graph,
};

/// How a step between two stations is scored.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CostModel {
    /// Steps and the estimate to the goal are both great-circle kilometres.
    /// Edge weights are not consulted.
    #[default]
    Distance,
    /// Steps cost the edge's travel time in seconds; the estimate to the goal
    /// is the great-circle distance covered at `average_speed_kmh`.
    TravelTime { average_speed_kmh: f64 },
}

impl CostModel {
    fn step(&self, from: &Node, to: &Node, edge: &Edge) -> f64 {
        match self {
            CostModel::Distance => heuristic(from, to),
            CostModel::TravelTime { .. } => edge.weight.max(0) as f64,
        }
    }

    fn estimate(&self, from: &Node, goal: &Node) -> f64 {
        match self {
            CostModel::Distance => heuristic(from, goal),
            CostModel::TravelTime { average_speed_kmh } => {
                heuristic(from, goal) / average_speed_kmh * 3600.0
            }
        }
    }
}

/// Ordered stations from departure to destination. Empty when there is no path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Route(Vec<NodeIndex>);

impl Route {
    pub fn nodes(&self) -> &[NodeIndex] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn stations<'a>(&'a self, graph: &'a Graph) -> impl Iterator<Item = &'a Station> + 'a {
        self.0.iter().map(move |&idx| graph.node(idx).station.as_ref())
    }

    pub fn names<'a>(&'a self, graph: &'a Graph) -> Vec<&'a str> {
        self.stations(graph)
            .map(|station| station.name.as_str())
            .collect()
    }
}

/// Scores that read as infinite until set.
#[derive(Debug, Default)]
struct Scores(HashMap<NodeIndex, f64>);

impl Scores {
    fn get(&self, idx: NodeIndex) -> f64 {
        self.0.get(&idx).copied().unwrap_or(f64::INFINITY)
    }

    fn set(&mut self, idx: NodeIndex, score: f64) {
        self.0.insert(idx, score);
    }
}

#[derive(Debug)]
struct FrontierEntry {
    f_score: f64,
    seq: u64,
    node: NodeIndex,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    // Reversed so the max-heap yields the lowest score, then the earliest insertion.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f_score
            .total_cmp(&self.f_score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// The open set. A node keeps the sequence number of its first insertion, so
/// among equal scores the node that joined earliest is taken first.
#[derive(Debug, Default)]
struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    members: HashMap<NodeIndex, u64>,
    next_seq: u64,
}

impl Frontier {
    fn contains(&self, idx: NodeIndex) -> bool {
        self.members.contains_key(&idx)
    }

    fn insert(&mut self, node: NodeIndex, f_score: f64) {
        let seq = *self.members.entry(node).or_insert_with(|| {
            self.next_seq += 1;
            self.next_seq
        });
        self.heap.push(FrontierEntry { f_score, seq, node });
    }

    /// Removes the member with the lowest current score. Entries superseded by
    /// a later rescore are dropped on the way.
    fn pop(&mut self, f_scores: &Scores) -> Option<NodeIndex> {
        while let Some(entry) = self.heap.pop() {
            if !self.members.contains_key(&entry.node)
                || entry.f_score.to_bits() != f_scores.get(entry.node).to_bits()
            {
                continue;
            }
            self.members.remove(&entry.node);
            return Some(entry.node);
        }
        None
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Search<'g> {
    graph: &'g Graph,
    cost: CostModel,
}

impl<'g> Search<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            cost: CostModel::default(),
        }
    }

    pub fn with_cost(self, cost: CostModel) -> Self {
        Self { cost, ..self }
    }

    fn endpoint(&self, name: &str) -> Result<NodeIndex, SearchError> {
        self.graph
            .find_by_name(name)
            .ok_or_else(|| SearchError::EndpointNotFound {
                name: name.to_owned(),
            })
    }

    /// Route between the stations named `departure` and `destination`.
    pub fn run(&self, departure: &str, destination: &str) -> Result<Route, SearchError> {
        let start = self.endpoint(departure)?;
        let goal = self.endpoint(destination)?;

        debug!(departure, destination, cost = ?self.cost, "Searching route");
        let route = self.between(start, goal);

        if route.is_empty() {
            info!(departure, destination, "No route found");
        } else {
            info!(departure, destination, stations = route.len(), "Found route");
        }

        Ok(route)
    }

    fn between(&self, start: NodeIndex, goal: NodeIndex) -> Route {
        let graph = self.graph;
        let goal_node = graph.node(goal);

        let mut open = Frontier::default();
        let mut closed = HashSet::new();
        let mut came_from = HashMap::new();
        let mut g_score = Scores::default();
        let mut f_score = Scores::default();

        g_score.set(start, 0.0);
        f_score.set(start, self.cost.estimate(graph.node(start), goal_node));
        open.insert(start, f_score.get(start));

        while let Some(current) = open.pop(&f_score) {
            if current == goal {
                return reconstruct_path(&came_from, current);
            }

            closed.insert(current);
            let current_node = graph.node(current);
            trace!(
                station = %current_node.station.name,
                g = g_score.get(current),
                f = f_score.get(current),
                "Expanding"
            );

            for edge in &current_node.edges {
                let neighbor = edge.target;
                if closed.contains(&neighbor) {
                    continue;
                }

                let neighbor_node = graph.node(neighbor);
                let tentative =
                    g_score.get(current) + self.cost.step(current_node, neighbor_node, edge);

                let discovered = !open.contains(neighbor);
                if !discovered && tentative >= g_score.get(neighbor) {
                    continue;
                }

                let f = tentative + self.cost.estimate(neighbor_node, goal_node);
                came_from.insert(neighbor, current);
                g_score.set(neighbor, tentative);
                f_score.set(neighbor, f);
                open.insert(neighbor, f);
            }
        }

        Route::default()
    }
}

fn reconstruct_path(came_from: &HashMap<NodeIndex, NodeIndex>, goal: NodeIndex) -> Route {
    let mut path = vec![goal];
    let mut current = goal;

    while let Some(&previous) = came_from.get(&current) {
        path.push(previous);
        current = previous;
    }

    path.reverse();
    Route(path)
}

/// Route between two station names with the default [`CostModel`].
pub fn search(departure: &str, destination: &str, graph: &Graph) -> Result<Route, SearchError> {
    Search::new(graph).run(departure, destination)
}
