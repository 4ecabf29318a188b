//! Schematic graph data structure.

use std::collections::{BTreeMap, HashMap};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use sf_core::Expr;

/// Visual role of a node; the emitter maps kinds to display attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Input,
    Output,
    State,
    /// State derivative (SFG topology only).
    XDot,
    /// Summing junction (integrator topology only).
    Sum,
    /// 1/s integrator block (integrator topology only).
    Integrator,
}

/// A node: stable string id, kind, optional display label, and
/// presentation attributes a caller may pre-set (the emitter fills in
/// per-kind defaults without overriding these).
#[derive(Debug, Clone, PartialEq)]
pub struct SchematicNode {
    pub id: String,
    pub kind: NodeKind,
    pub label: Option<String>,
    pub attrs: BTreeMap<String, String>,
}

/// Directed schematic graph with symbolic edge gains.
///
/// Wraps a petgraph `DiGraph` with an id index for string-keyed lookup.
/// Node and edge iteration follow insertion order, which keeps emission
/// deterministic. Built fresh per invocation and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct SchematicGraph {
    name: String,
    graph: DiGraph<SchematicNode, Expr>,
    index: HashMap<String, NodeIndex>,
}

impl SchematicGraph {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            graph: DiGraph::new(),
            index: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a node; ids are expected to be unique per graph.
    pub fn add_node(
        &mut self,
        id: impl Into<String>,
        kind: NodeKind,
        label: impl Into<String>,
    ) -> NodeIndex {
        let id = id.into();
        debug_assert!(!self.index.contains_key(&id), "duplicate node id {id}");
        let idx = self.graph.add_node(SchematicNode {
            id: id.clone(),
            kind,
            label: Some(label.into()),
            attrs: BTreeMap::new(),
        });
        self.index.insert(id, idx);
        idx
    }

    /// Add a directed gain edge between two existing nodes.
    pub fn add_edge(&mut self, src: NodeIndex, dst: NodeIndex, gain: Expr) {
        debug_assert!(
            self.graph.find_edge(src, dst).is_none(),
            "duplicate edge {:?} -> {:?}",
            src,
            dst
        );
        self.graph.add_edge(src, dst, gain);
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&SchematicNode> {
        self.index.get(id).map(|idx| &self.graph[*idx])
    }

    /// Mutable node access, for pre-setting presentation attributes the
    /// emitter must not override.
    pub fn node_mut(&mut self, id: &str) -> Option<&mut SchematicNode> {
        let idx = *self.index.get(id)?;
        Some(&mut self.graph[idx])
    }

    pub fn contains_edge(&self, src: &str, dst: &str) -> bool {
        self.gain(src, dst).is_some()
    }

    /// The gain on the edge src -> dst, if present.
    pub fn gain(&self, src: &str, dst: &str) -> Option<&Expr> {
        let src = *self.index.get(src)?;
        let dst = *self.index.get(dst)?;
        let edge = self.graph.find_edge(src, dst)?;
        self.graph.edge_weight(edge)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &SchematicNode> {
        self.graph.node_weights()
    }

    /// Edges in insertion order as (source node, target node, gain).
    pub fn edges(&self) -> impl Iterator<Item = (&SchematicNode, &SchematicNode, &Expr)> {
        self.graph.edge_references().map(|edge| {
            (
                &self.graph[edge.source()],
                &self.graph[edge.target()],
                edge.weight(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_id() {
        let mut graph = SchematicGraph::new("g");
        let u = graph.add_node("u", NodeKind::Input, "u");
        let y = graph.add_node("y", NodeKind::Output, "y");
        graph.add_edge(u, y, Expr::num(2.0));

        assert!(graph.contains_node("u"));
        assert!(!graph.contains_node("x1"));
        assert_eq!(graph.node("y").unwrap().kind, NodeKind::Output);
        assert_eq!(graph.gain("u", "y"), Some(&Expr::num(2.0)));
        assert_eq!(graph.gain("y", "u"), None);
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut graph = SchematicGraph::new("g");
        let a = graph.add_node("a", NodeKind::State, "a");
        let b = graph.add_node("b", NodeKind::State, "b");
        let c = graph.add_node("c", NodeKind::State, "c");
        graph.add_edge(b, c, Expr::one());
        graph.add_edge(a, b, Expr::one());

        let ids: Vec<&str> = graph.nodes().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        let pairs: Vec<(&str, &str)> = graph
            .edges()
            .map(|(s, t, _)| (s.id.as_str(), t.id.as_str()))
            .collect();
        assert_eq!(pairs, [("b", "c"), ("a", "b")]);
    }
}
