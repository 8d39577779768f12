//! City graph representation and builder.
//!
//! # Data layout
//!
//! Per node the graph keeps two parallel lists: `adjacency[n]` (neighbour
//! ids, in insertion order) and `edges[n]` (the directed [`Edge`]s leaving
//! `n`, same order).  Every road is stored as two directed edges; the
//! reverse edge has the same distance and negated elevation.
//!
//! Node degree is bounded (≤ 8 on a grid with diagonals), so
//! [`CityGraph::get_edge`] is a linear scan of the source node's edge list.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps planar `(x, y)` to the nearest `NodeId`.
//! Used to snap free coordinates (a clicked map point, a fleet depot) to the
//! graph.
//!
//! The graph is built once at startup and is read-only thereafter.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use gp_core::{Edge, NodeId};

use crate::{NetworkError, NetworkResult};

// ── R-tree node entry ─────────────────────────────────────────────────────────

#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2], // [x, y]
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── Node ──────────────────────────────────────────────────────────────────────

/// A city intersection.  Immutable after graph generation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub name: String,
}

// ── CityGraph ─────────────────────────────────────────────────────────────────

/// Directed road graph plus a spatial index for node snapping.
///
/// Do not construct directly; use [`CityGraphBuilder`] or
/// [`generate_grid`](crate::generate_grid).
pub struct CityGraph {
    nodes: Vec<Node>,
    adjacency: Vec<Vec<NodeId>>,
    edges: Vec<Vec<Edge>>,
    spatial_idx: RTree<NodeEntry>,
}

impl CityGraph {
    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of directed edges (twice the number of roads).
    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ── Node access ───────────────────────────────────────────────────────

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.nodes.len()
    }

    /// `Ok(())` if `node` belongs to this graph, otherwise
    /// [`NetworkError::UnknownNode`].
    pub fn check_node(&self, node: NodeId) -> NetworkResult<()> {
        if self.contains(node) {
            Ok(())
        } else {
            Err(NetworkError::UnknownNode { node, node_count: self.node_count() })
        }
    }

    pub fn node(&self, node: NodeId) -> Option<&Node> {
        self.nodes.get(node.index())
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All node ids in ascending order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().map(|n| n.id)
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Neighbours of `node` in insertion order.  Empty for unknown nodes.
    #[inline]
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        self.adjacency.get(node.index()).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Directed edges leaving `node`.  Empty for unknown nodes.
    #[inline]
    pub fn edges_from(&self, node: NodeId) -> &[Edge] {
        self.edges.get(node.index()).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The directed edge `from → to`, if the road exists.
    pub fn get_edge(&self, from: NodeId, to: NodeId) -> Option<&Edge> {
        self.edges_from(from).iter().find(|e| e.to == to)
    }

    /// Iterator over every directed edge in the graph.
    pub fn all_edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().flatten()
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The node nearest to planar point `(x, y)`.
    ///
    /// Returns `None` only if the graph has no nodes.
    pub fn nearest_node(&self, x: f64, y: f64) -> Option<NodeId> {
        self.spatial_idx.nearest_neighbor(&[x, y]).map(|e| e.id)
    }

    /// Up to `k` nodes nearest to `(x, y)`, sorted by ascending distance.
    pub fn k_nearest_nodes(&self, x: f64, y: f64, k: usize) -> Vec<NodeId> {
        self.spatial_idx
            .nearest_neighbor_iter(&[x, y])
            .take(k)
            .map(|e| e.id)
            .collect()
    }

    /// Straight-line distance between two nodes' coordinates.
    pub fn euclidean(&self, a: NodeId, b: NodeId) -> Option<f64> {
        let (a, b) = (self.node(a)?, self.node(b)?);
        Some(((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt())
    }
}

// ── CityGraphBuilder ──────────────────────────────────────────────────────────

/// Construct a [`CityGraph`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use gp_network::CityGraphBuilder;
///
/// let mut b = CityGraphBuilder::new();
/// let a = b.add_node(0.0, 0.0);
/// let c = b.add_node(100.0, 0.0);
/// b.add_road(a, c, 104.0, 2.5);
/// let g = b.build();
/// assert_eq!(g.node_count(), 2);
/// assert_eq!(g.edge_count(), 2); // bidirectional
/// assert_eq!(g.get_edge(c, a).unwrap().elevation, -2.5);
/// ```
#[derive(Default)]
pub struct CityGraphBuilder {
    nodes: Vec<Node>,
    adjacency: Vec<Vec<NodeId>>,
    edges: Vec<Vec<Edge>>,
}

impl CityGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            adjacency: Vec::with_capacity(nodes),
            edges: Vec::with_capacity(nodes),
        }
    }

    /// Add a node named `N<id>` and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, x: f64, y: f64) -> NodeId {
        let name = format!("N{}", self.nodes.len());
        self.add_named_node(x, y, name)
    }

    pub fn add_named_node(&mut self, x: f64, y: f64, name: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node { id, x, y, name: name.into() });
        self.adjacency.push(Vec::new());
        self.edges.push(Vec::new());
        id
    }

    /// Add a **directed** edge.  Both endpoints must already exist.
    pub fn add_directed_edge(&mut self, from: NodeId, to: NodeId, distance: f64, elevation: f64) {
        self.adjacency[from.index()].push(to);
        self.edges[from.index()].push(Edge::new(from, to, distance, elevation));
    }

    /// Add a road as two directed edges; the reverse edge gets the negated
    /// elevation.
    pub fn add_road(&mut self, a: NodeId, b: NodeId, distance: f64, elevation: f64) {
        self.add_directed_edge(a, b, distance, elevation);
        self.add_directed_edge(b, a, distance, -elevation);
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Consume the builder and bulk-load the spatial index.
    pub fn build(self) -> CityGraph {
        let entries: Vec<NodeEntry> = self
            .nodes
            .iter()
            .map(|n| NodeEntry { point: [n.x, n.y], id: n.id })
            .collect();

        CityGraph {
            nodes: self.nodes,
            adjacency: self.adjacency,
            edges: self.edges,
            spatial_idx: RTree::bulk_load(entries),
        }
    }
}
