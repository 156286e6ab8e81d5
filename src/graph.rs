use std::{collections::HashMap, sync::Arc};

use itertools::Itertools;
use tracing::{debug, info, warn};

use crate::{data::*, error::GraphError};

/// Stations as nodes, scheduled train segments as edges.
///
/// Nodes keep the input order of the stations they were built from, and every
/// edge addresses its target by [`NodeIndex`].
#[derive(Debug, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    index: HashMap<ID, NodeIndex>,
}

impl Graph {
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, idx: NodeIndex) -> &Node {
        &self.nodes[idx.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|node| node.edges.len()).sum()
    }

    pub fn index_of(&self, station_id: &str) -> Option<NodeIndex> {
        self.index.get(station_id).copied()
    }

    /// First node, in station order, whose station has exactly this name.
    pub fn find_by_name(&self, name: &str) -> Option<NodeIndex> {
        self.nodes
            .iter()
            .position(|node| node.station.name == name)
            .map(NodeIndex)
    }

    fn resolve(&self, stop: &Stop) -> Result<NodeIndex, GraphError> {
        self.index_of(&stop.station_id)
            .ok_or_else(|| GraphError::UnknownStation {
                station_id: stop.station_id.to_owned(),
                stop_id: stop.id.to_owned(),
            })
    }
}

/// Stops of every train, each train's stops sorted by departure.
///
/// Trains come in the order of `trains`; stops whose train is not listed there
/// follow, ordered by train id.
pub fn train_runs<'a>(trains: &[Train], stops: &'a [Stop]) -> Vec<(ID, Vec<&'a Stop>)> {
    let mut by_train = stops
        .iter()
        .into_group_map_by(|stop| stop.train_id.to_owned());

    let mut runs = trains
        .iter()
        .filter_map(|train| by_train.remove_entry(&train.id))
        .collect::<Vec<_>>();

    let unlisted = by_train.into_iter().sorted_by(|a, b| a.0.cmp(&b.0));
    for (train_id, train_stops) in unlisted {
        warn!(%train_id, "Stops reference a train that is not in the train list");
        runs.push((train_id, train_stops));
    }

    for (_, train_stops) in runs.iter_mut() {
        train_stops.sort_by_key(|stop| stop.departure);
    }

    runs
}

pub fn build_graph(
    trains: &[Train],
    stops: &[Stop],
    stations: &[Station],
) -> Result<Graph, GraphError> {
    let mut graph = Graph::default();

    for station in stations {
        if graph.index.contains_key(&station.id) {
            return Err(GraphError::DuplicateStation {
                station_id: station.id.to_owned(),
            });
        }
        graph
            .index
            .insert(station.id.to_owned(), NodeIndex(graph.nodes.len()));
        graph.nodes.push(Node::new(Arc::new(station.clone())));
    }

    for (train_id, train_stops) in train_runs(trains, stops) {
        // A lone stop still has to name a known station.
        if let [only] = train_stops.as_slice() {
            graph.resolve(only)?;
        }

        for (stop, next) in train_stops.iter().tuple_windows() {
            let from = graph.resolve(stop)?;
            let to = graph.resolve(next)?;
            let weight = stop.time_to(next);

            if weight < 0 {
                warn!(
                    %train_id,
                    from = %stop.id,
                    to = %next.id,
                    weight,
                    "Segment arrives before it departs"
                );
            }

            graph.nodes[from.0].edges.push(Edge {
                target: to,
                train_id: train_id.to_owned(),
                weight,
            });
        }

        debug!(
            %train_id,
            edges = train_stops.len().saturating_sub(1),
            "Linked train stops"
        );
    }

    info!(
        nodes = graph.len(),
        edges = graph.edge_count(),
        "Built graph"
    );

    Ok(graph)
}
