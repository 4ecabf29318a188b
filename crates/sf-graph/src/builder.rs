//! Topology builders: state-space model -> schematic graph.

use petgraph::graph::NodeIndex;
use sf_core::Expr;
use sf_model::StateSpaceModel;

use crate::graph::{NodeKind, SchematicGraph};
use crate::style::GraphStyle;

/// Build a schematic graph in the requested style.
pub fn build_graph(
    model: &StateSpaceModel,
    style: GraphStyle,
    unicode_labels: bool,
    prune_zeros: bool,
) -> SchematicGraph {
    match style {
        GraphStyle::Sfg => build_sfg_graph(model, unicode_labels, prune_zeros),
        GraphStyle::Integrator => build_integrator_graph(model, unicode_labels, prune_zeros),
    }
}

/// Signal-flow graph: derivative nodes fed row-wise by A and b, integrated
/// into state nodes through structural 1/s edges.
pub fn build_sfg_graph(
    model: &StateSpaceModel,
    unicode_labels: bool,
    prune_zeros: bool,
) -> SchematicGraph {
    let mut graph = SchematicGraph::new(model.name());
    let u = graph.add_node("u", NodeKind::Input, "u");
    let y = graph.add_node("y", NodeKind::Output, "y");

    let n = model.order();
    let mut states = Vec::with_capacity(n);
    let mut xdots = Vec::with_capacity(n);
    for i in 0..n {
        states.push(graph.add_node(state_id(i), NodeKind::State, model.state_name(i)));
        xdots.push(graph.add_node(xdot_id(i), NodeKind::XDot, xdot_label(i, unicode_labels)));
    }

    add_row_edges(&mut graph, model, &states, &xdots, u, prune_zeros);

    for i in 0..n {
        // Laplace integration is structural, never pruned.
        graph.add_edge(xdots[i], states[i], laplace_gain());
        add_coefficient_edge(&mut graph, states[i], y, model.c(i).clone(), prune_zeros);
    }
    if !model.d().is_zero() {
        add_coefficient_edge(&mut graph, u, y, model.d().clone(), prune_zeros);
    }
    graph
}

/// Integrator block diagram: summing junctions feeding 1/s blocks feeding
/// state nodes, with an output summing junction in front of y.
pub fn build_integrator_graph(
    model: &StateSpaceModel,
    unicode_labels: bool,
    prune_zeros: bool,
) -> SchematicGraph {
    let mut graph = SchematicGraph::new(model.name());
    let u = graph.add_node("u", NodeKind::Input, "u");
    let y = graph.add_node("y", NodeKind::Output, "y");
    let ysum = graph.add_node("ysum", NodeKind::Sum, output_sum_label(unicode_labels));
    graph.add_edge(ysum, y, Expr::one());

    let n = model.order();
    let mut states = Vec::with_capacity(n);
    let mut sums = Vec::with_capacity(n);
    for i in 0..n {
        let sum = graph.add_node(sum_id(i), NodeKind::Sum, sum_label(i, unicode_labels));
        let int = graph.add_node(integrator_id(i), NodeKind::Integrator, "1/s");
        let state = graph.add_node(state_id(i), NodeKind::State, model.state_name(i));
        graph.add_edge(sum, int, Expr::one());
        graph.add_edge(int, state, Expr::one());
        sums.push(sum);
        states.push(state);
    }

    add_row_edges(&mut graph, model, &states, &sums, u, prune_zeros);

    for i in 0..n {
        add_coefficient_edge(&mut graph, states[i], ysum, model.c(i).clone(), prune_zeros);
    }
    if !model.d().is_zero() {
        add_coefficient_edge(&mut graph, u, ysum, model.d().clone(), prune_zeros);
    }
    graph
}

/// Feed each row's collector node with A[row][col] from every state and
/// b[row] from the input; this encodes ẋ = A·x + b·u row-wise.
fn add_row_edges(
    graph: &mut SchematicGraph,
    model: &StateSpaceModel,
    states: &[NodeIndex],
    collectors: &[NodeIndex],
    u: NodeIndex,
    prune_zeros: bool,
) {
    for row in 0..model.order() {
        for col in 0..model.order() {
            add_coefficient_edge(
                graph,
                states[col],
                collectors[row],
                model.a(row, col).clone(),
                prune_zeros,
            );
        }
        add_coefficient_edge(graph, u, collectors[row], model.b(row).clone(), prune_zeros);
    }
}

/// Coefficient edges are the only ones subject to zero pruning; the zero
/// test normalizes, so expression-equal zeros are pruned too.
fn add_coefficient_edge(
    graph: &mut SchematicGraph,
    src: NodeIndex,
    dst: NodeIndex,
    gain: Expr,
    prune_zeros: bool,
) {
    if prune_zeros && gain.is_zero() {
        return;
    }
    graph.add_edge(src, dst, gain);
}

fn laplace_gain() -> Expr {
    Expr::one() / Expr::sym("s")
}

fn state_id(index: usize) -> String {
    format!("x{}", index + 1)
}

fn xdot_id(index: usize) -> String {
    format!("xdot{}", index + 1)
}

fn sum_id(index: usize) -> String {
    format!("sum{}", index + 1)
}

fn integrator_id(index: usize) -> String {
    format!("int{}", index + 1)
}

fn xdot_label(index: usize, unicode_labels: bool) -> String {
    if unicode_labels {
        format!("x\u{0307}{}", index + 1)
    } else {
        format!("x_dot{}", index + 1)
    }
}

fn sum_label(index: usize, unicode_labels: bool) -> String {
    if unicode_labels {
        format!("\u{03a3}{}", index + 1)
    } else {
        format!("sum{}", index + 1)
    }
}

fn output_sum_label(unicode_labels: bool) -> String {
    if unicode_labels {
        "\u{03a3}_y".to_string()
    } else {
        "sum_y".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeKind;

    fn demo_model(d: f64) -> StateSpaceModel {
        StateSpaceModel::new(
            "demo",
            vec![
                vec![Expr::zero(), Expr::one()],
                vec![Expr::num(-2.0), Expr::num(-3.0)],
            ],
            vec![Expr::zero(), Expr::one()],
            vec![Expr::one(), Expr::zero()],
            Expr::num(d),
            vec![],
        )
        .unwrap()
    }

    #[test]
    fn sfg_integration_edge_gain_is_inverse_s() {
        let graph = build_sfg_graph(&demo_model(0.0), false, false);
        assert_eq!(graph.gain("xdot1", "x1").unwrap().to_string(), "1/s");
        assert_eq!(graph.gain("xdot2", "x2").unwrap().to_string(), "1/s");
    }

    #[test]
    fn sfg_row_edges_carry_coefficients() {
        let graph = build_sfg_graph(&demo_model(0.0), false, false);
        assert_eq!(graph.gain("x1", "xdot1"), Some(&Expr::zero()));
        assert_eq!(graph.gain("x2", "xdot1"), Some(&Expr::one()));
        assert_eq!(graph.gain("x1", "xdot2"), Some(&Expr::num(-2.0)));
        assert_eq!(graph.gain("x2", "xdot2"), Some(&Expr::num(-3.0)));
        assert_eq!(graph.gain("u", "xdot2"), Some(&Expr::one()));
        assert_eq!(graph.gain("x1", "y"), Some(&Expr::one()));
    }

    #[test]
    fn prune_zeros_drops_zero_coefficients_only() {
        let graph = build_sfg_graph(&demo_model(0.0), false, true);
        assert!(!graph.contains_edge("x1", "xdot1"));
        assert!(!graph.contains_edge("u", "xdot1"));
        assert!(!graph.contains_edge("x2", "y"));
        // Structural integration edges survive pruning.
        assert!(graph.contains_edge("xdot1", "x1"));
        assert!(graph.contains_edge("xdot2", "x2"));
    }

    #[test]
    fn feedthrough_edge_present_iff_d_nonzero() {
        let without = build_sfg_graph(&demo_model(0.0), false, false);
        assert!(!without.contains_edge("u", "y"));
        let with = build_sfg_graph(&demo_model(2.0), false, false);
        assert_eq!(with.gain("u", "y"), Some(&Expr::num(2.0)));
    }

    #[test]
    fn integrator_graph_has_output_sum_and_feedthrough() {
        let graph = build_integrator_graph(&demo_model(2.0), false, false);
        assert!(graph.contains_node("ysum"));
        assert_eq!(graph.gain("u", "ysum"), Some(&Expr::num(2.0)));
        assert_eq!(graph.gain("ysum", "y"), Some(&Expr::one()));
    }

    #[test]
    fn integrator_graph_chains_sum_int_state() {
        let graph = build_integrator_graph(&demo_model(0.0), false, false);
        for i in 1..=2 {
            assert_eq!(
                graph.gain(&format!("sum{i}"), &format!("int{i}")),
                Some(&Expr::one())
            );
            assert_eq!(
                graph.gain(&format!("int{i}"), &format!("x{i}")),
                Some(&Expr::one())
            );
        }
        assert_eq!(graph.node("int1").unwrap().label.as_deref(), Some("1/s"));
        // 3 fixed nodes plus sum/int/state per state.
        assert_eq!(graph.node_count(), 3 + 3 * 2);
    }

    #[test]
    fn unicode_labels_affect_derivative_and_sum_nodes_only() {
        let sfg = build_sfg_graph(&demo_model(0.0), true, false);
        assert_eq!(sfg.node("xdot1").unwrap().label.as_deref(), Some("x\u{0307}1"));
        assert_eq!(sfg.node("x1").unwrap().label.as_deref(), Some("x1"));

        let ascii = build_sfg_graph(&demo_model(0.0), false, false);
        assert_eq!(ascii.node("xdot1").unwrap().label.as_deref(), Some("x_dot1"));

        let int = build_integrator_graph(&demo_model(0.0), true, false);
        assert_eq!(int.node("sum1").unwrap().label.as_deref(), Some("\u{03a3}1"));
        assert_eq!(int.node("ysum").unwrap().label.as_deref(), Some("\u{03a3}_y"));
        assert_eq!(int.node("int1").unwrap().label.as_deref(), Some("1/s"));
    }

    #[test]
    fn dispatcher_selects_topology() {
        let model = demo_model(0.0);
        let sfg = build_graph(&model, GraphStyle::Sfg, false, false);
        assert!(sfg.contains_node("xdot1"));
        assert!(!sfg.contains_node("sum1"));
        let int = build_graph(&model, GraphStyle::Integrator, false, false);
        assert!(int.contains_node("sum1"));
        assert!(!int.contains_node("xdot1"));
        assert_eq!(int.node("sum1").unwrap().kind, NodeKind::Sum);
    }

    #[test]
    fn symbolic_zero_coefficient_is_pruned() {
        // A gain that is expression-equal to zero must be detected.
        let a = Expr::sym("a");
        let model = StateSpaceModel::new(
            "sym",
            vec![vec![a.clone() - a]],
            vec![Expr::one()],
            vec![Expr::one()],
            Expr::zero(),
            vec!["a".to_string()],
        )
        .unwrap();
        let graph = build_sfg_graph(&model, false, true);
        assert!(!graph.contains_edge("x1", "xdot1"));
        assert!(graph.contains_edge("xdot1", "x1"));
    }
}
