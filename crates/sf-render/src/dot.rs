//! DOT serialization of schematic graphs.

use core::fmt;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::str::FromStr;

use sf_graph::{NodeKind, SchematicGraph, SchematicNode};

use crate::RenderError;
use crate::gain::format_gain;

/// Graphviz rank direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankDir {
    /// Left to right.
    Lr,
    /// Top to bottom.
    Tb,
}

impl fmt::Display for RankDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankDir::Lr => write!(f, "LR"),
            RankDir::Tb => write!(f, "TB"),
        }
    }
}

impl FromStr for RankDir {
    type Err = RenderError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            "LR" => Ok(RankDir::Lr),
            "TB" => Ok(RankDir::Tb),
            _ => Err(RenderError::InvalidRankDir(value.to_string())),
        }
    }
}

/// Fixed per-kind display attributes.
fn kind_style(kind: NodeKind) -> &'static [(&'static str, &'static str)] {
    match kind {
        NodeKind::Input => &[
            ("shape", "circle"),
            ("style", "filled"),
            ("fillcolor", "#dbeafe"),
        ],
        NodeKind::Output => &[
            ("shape", "doublecircle"),
            ("style", "filled"),
            ("fillcolor", "#dcfce7"),
        ],
        NodeKind::State => &[("shape", "circle")],
        NodeKind::XDot => &[("shape", "circle"), ("style", "dashed")],
        NodeKind::Sum => &[
            ("shape", "circle"),
            ("style", "filled"),
            ("fillcolor", "#fef3c7"),
        ],
        NodeKind::Integrator => &[("shape", "box")],
    }
}

/// Serialize a styled copy of the graph to DOT text.
///
/// The graph itself is left untouched: style attributes are merged into a
/// working map per node, defaults applied only where the builder did not
/// set a value. Nodes and edges are emitted in insertion order with
/// attributes in sorted key order, so the output is deterministic.
pub fn graph_to_dot(
    graph: &SchematicGraph,
    rankdir: RankDir,
    simplify: bool,
    float_precision: Option<usize>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "digraph \"{}\" {{", escape(graph.name()));
    let _ = writeln!(out, "  rankdir={rankdir};");
    for node in graph.nodes() {
        let attrs = styled_attrs(node);
        let _ = writeln!(out, "  \"{}\" [{}];", escape(&node.id), join_attrs(&attrs));
    }
    for (src, dst, gain) in graph.edges() {
        let label = format_gain(gain, simplify, float_precision);
        let _ = writeln!(
            out,
            "  \"{}\" -> \"{}\" [label=\"{}\"];",
            escape(&src.id),
            escape(&dst.id),
            escape(&label)
        );
    }
    out.push_str("}\n");
    out
}

/// Caller-set attributes first, then per-kind defaults, then the label
/// (builder label, falling back to the node id).
fn styled_attrs(node: &SchematicNode) -> BTreeMap<String, String> {
    let mut attrs = node.attrs.clone();
    for (key, value) in kind_style(node.kind) {
        attrs
            .entry((*key).to_string())
            .or_insert_with(|| (*value).to_string());
    }
    attrs
        .entry("label".to_string())
        .or_insert_with(|| node.label.clone().unwrap_or_else(|| node.id.clone()));
    attrs
}

fn join_attrs(attrs: &BTreeMap<String, String>) -> String {
    attrs
        .iter()
        .map(|(key, value)| format!("{key}=\"{}\"", escape(value)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_core::Expr;

    fn sample_graph() -> SchematicGraph {
        let mut graph = SchematicGraph::new("sample");
        let u = graph.add_node("u", NodeKind::Input, "u");
        let xdot = graph.add_node("xdot1", NodeKind::XDot, "x_dot1");
        let x = graph.add_node("x1", NodeKind::State, "x1");
        let y = graph.add_node("y", NodeKind::Output, "y");
        graph.add_edge(u, xdot, Expr::one());
        graph.add_edge(xdot, x, Expr::one() / Expr::sym("s"));
        graph.add_edge(x, y, Expr::one());
        graph
    }

    #[test]
    fn emits_digraph_with_rankdir() {
        let dot = graph_to_dot(&sample_graph(), RankDir::Lr, false, None);
        assert!(dot.starts_with("digraph \"sample\" {\n  rankdir=LR;\n"));
        assert!(dot.ends_with("}\n"));
        let tb = graph_to_dot(&sample_graph(), RankDir::Tb, false, None);
        assert!(tb.contains("rankdir=TB;"));
    }

    #[test]
    fn nodes_carry_kind_styles() {
        let dot = graph_to_dot(&sample_graph(), RankDir::Lr, false, None);
        assert!(dot.contains(
            "\"u\" [fillcolor=\"#dbeafe\", label=\"u\", shape=\"circle\", style=\"filled\"];"
        ));
        assert!(dot.contains(
            "\"xdot1\" [label=\"x_dot1\", shape=\"circle\", style=\"dashed\"];"
        ));
        assert!(dot.contains("\"x1\" [label=\"x1\", shape=\"circle\"];"));
        assert!(dot.contains(
            "\"y\" [fillcolor=\"#dcfce7\", label=\"y\", shape=\"doublecircle\", style=\"filled\"];"
        ));
    }

    #[test]
    fn edges_are_labeled_with_formatted_gains() {
        let dot = graph_to_dot(&sample_graph(), RankDir::Lr, false, None);
        assert!(dot.contains("\"xdot1\" -> \"x1\" [label=\"1/s\"];"));
        assert!(dot.contains("\"u\" -> \"xdot1\" [label=\"1\"];"));
    }

    #[test]
    fn preset_attributes_are_not_overridden() {
        let mut graph = SchematicGraph::new("styled");
        let u = graph.add_node("u", NodeKind::Input, "u");
        let y = graph.add_node("y", NodeKind::Output, "y");
        graph.add_edge(u, y, Expr::num(2.0));
        graph
            .node_mut("u")
            .unwrap()
            .attrs
            .insert("fillcolor".to_string(), "#ff0000".to_string());
        let dot = graph_to_dot(&graph, RankDir::Lr, false, None);
        assert!(dot.contains("\"u\" [fillcolor=\"#ff0000\""));
        assert!(!dot.contains("\"u\" [fillcolor=\"#dbeafe\""));
    }

    #[test]
    fn output_is_deterministic() {
        let first = graph_to_dot(&sample_graph(), RankDir::Lr, true, Some(4));
        let second = graph_to_dot(&sample_graph(), RankDir::Lr, true, Some(4));
        assert_eq!(first, second);
    }

    #[test]
    fn rankdir_parse() {
        assert_eq!("lr".parse::<RankDir>().unwrap(), RankDir::Lr);
        assert_eq!("TB".parse::<RankDir>().unwrap(), RankDir::Tb);
        let err = "UD".parse::<RankDir>().unwrap_err();
        assert_eq!(err.to_string(), "rankdir must be either LR or TB, got 'UD'");
    }
}
