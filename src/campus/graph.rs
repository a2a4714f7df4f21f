//! Location graph and emergency routing
//!
//! Undirected weighted graph of campus locations plus one synthetic vertex, the
//! emergency spot. Edge weights are walking distances in meters. The graph is
//! not guaranteed to be connected, so every route query may come back empty.

use crate::campus::registry::EntityStore;
use crate::types::LocationId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::fmt;
use tracing::debug;

/// Identifier of the synthetic evacuation vertex
pub const EMERGENCY_SPOT_ID: &str = "EMERGENCY_SPOT";

/// A declared connection between two locations, as found in the map file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// One end of the connection
    pub from: String,
    /// The other end of the connection
    pub to: String,
    /// Walking distance in meters
    pub distance: f64,
}

#[derive(Debug, Clone, Copy)]
struct Edge {
    to: usize,
    distance: f64,
}

/// Cheapest route between two vertices
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    /// Sum of the traversed edge weights
    pub cost: f64,
    /// Vertices from origin to destination, both inclusive
    pub path: Vec<LocationId>,
}

impl Route {
    /// Last location visited before the destination
    ///
    /// For evacuation routes this is the exit the person should take.
    pub fn exit(&self) -> Option<&LocationId> {
        self.path.len().checked_sub(2).and_then(|idx| self.path.get(idx))
    }

    /// Number of hops in the route
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stops: Vec<&str> = self.path.iter().map(LocationId::as_str).collect();
        write!(f, "{} ({} m)", stops.join(" → "), self.cost)
    }
}

/// Frontier entry ordered so that `BinaryHeap` pops the smallest distance first
#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    distance: f64,
    vertex: usize,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other.distance.total_cmp(&self.distance)
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Weighted undirected graph over campus locations
#[derive(Debug, Clone)]
pub struct LocationGraph {
    vertices: Vec<LocationId>,
    index: HashMap<String, usize>,
    adjacency: Vec<Vec<Edge>>,
    emergency_spot: usize,
}

impl Default for LocationGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationGraph {
    /// Create a graph holding only the emergency spot
    pub fn new() -> Self {
        let emergency = LocationId::from_static(EMERGENCY_SPOT_ID);
        let mut index = HashMap::new();
        index.insert(EMERGENCY_SPOT_ID.to_string(), 0);
        Self { vertices: vec![emergency], index, adjacency: vec![Vec::new()], emergency_spot: 0 }
    }

    /// Build the graph from the store's locations and the declared relationships
    ///
    /// Relationships naming an unknown location are skipped.
    pub fn build(store: &EntityStore, relationships: &[Relationship]) -> Self {
        let mut graph = Self::new();
        for location in store.locations() {
            graph.add_vertex(location.id.clone());
        }

        let mut skipped = 0usize;
        for relationship in relationships {
            if !graph.add_edge(&relationship.from, &relationship.to, relationship.distance) {
                debug!(
                    from = %relationship.from,
                    to = %relationship.to,
                    distance = relationship.distance,
                    "Skipping relationship"
                );
                skipped += 1;
            }
        }

        debug!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            skipped,
            "Location graph built"
        );
        graph
    }

    /// Add a vertex, returning `false` if it already exists
    pub fn add_vertex(&mut self, id: LocationId) -> bool {
        if self.index.contains_key(id.as_str()) {
            return false;
        }
        self.index.insert(id.as_str().to_string(), self.vertices.len());
        self.vertices.push(id);
        self.adjacency.push(Vec::new());
        true
    }

    /// Connect two existing vertices in both directions
    ///
    /// Returns `false` when either end is unknown or the distance is negative
    /// or not a number.
    pub fn add_edge(&mut self, from: &str, to: &str, distance: f64) -> bool {
        if !distance.is_finite() || distance < 0.0 {
            return false;
        }
        let (Some(&a), Some(&b)) = (self.index.get(from), self.index.get(to)) else {
            return false;
        };
        self.adjacency[a].push(Edge { to: b, distance });
        if a != b {
            self.adjacency[b].push(Edge { to: a, distance });
        }
        true
    }

    /// Check whether a vertex exists
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Number of vertices, emergency spot included
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        let endpoints: usize = self.adjacency.iter().map(Vec::len).sum();
        let loops = self
            .adjacency
            .iter()
            .enumerate()
            .map(|(v, edges)| edges.iter().filter(|e| e.to == v).count())
            .sum::<usize>();
        (endpoints - loops) / 2 + loops
    }

    /// The emergency spot vertex
    pub fn emergency_spot(&self) -> &LocationId {
        &self.vertices[self.emergency_spot]
    }

    /// Neighbours of a vertex with the connecting distance, in declaration order
    pub fn neighbours(&self, id: &str) -> Vec<(&LocationId, f64)> {
        self.index
            .get(id)
            .map(|&v| {
                self.adjacency[v]
                    .iter()
                    .map(|edge| (&self.vertices[edge.to], edge.distance))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Cheapest route between two vertices (Dijkstra)
    ///
    /// Returns `None` when either vertex is unknown or no path connects them.
    pub fn cheapest_path(&self, origin: &str, destination: &str) -> Option<Route> {
        let &source = self.index.get(origin)?;
        let &target = self.index.get(destination)?;

        let mut distances = vec![f64::INFINITY; self.vertices.len()];
        let mut predecessors: Vec<Option<usize>> = vec![None; self.vertices.len()];
        let mut frontier = BinaryHeap::new();

        distances[source] = 0.0;
        frontier.push(FrontierEntry { distance: 0.0, vertex: source });

        while let Some(FrontierEntry { distance, vertex }) = frontier.pop() {
            if vertex == target {
                break;
            }
            // stale entry
            if distance > distances[vertex] {
                continue;
            }
            for edge in &self.adjacency[vertex] {
                let candidate = distance + edge.distance;
                if candidate < distances[edge.to] {
                    distances[edge.to] = candidate;
                    predecessors[edge.to] = Some(vertex);
                    frontier.push(FrontierEntry { distance: candidate, vertex: edge.to });
                }
            }
        }

        if distances[target].is_infinite() {
            return None;
        }

        let mut path = vec![self.vertices[target].clone()];
        let mut current = target;
        while let Some(previous) = predecessors[current] {
            path.push(self.vertices[previous].clone());
            current = previous;
        }
        path.reverse();

        Some(Route { cost: distances[target], path })
    }

    /// Cheapest route from a location to the emergency spot
    ///
    /// Access restrictions are ignored: an evacuation route must always be
    /// computable.
    pub fn route_to_emergency(&self, origin: &str) -> Option<Route> {
        self.cheapest_path(origin, EMERGENCY_SPOT_ID)
    }
}
