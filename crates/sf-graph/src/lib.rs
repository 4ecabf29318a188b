//! sf-graph: schematic graph layer for sigflow.
//!
//! Provides:
//! - Typed directed graph with symbolic edge gains (SchematicGraph)
//! - SFG and integrator topology builders
//! - Graph style selection
//!
//! # Example
//!
//! ```
//! use sf_core::Expr;
//! use sf_graph::{GraphStyle, build_graph};
//! use sf_model::StateSpaceModel;
//!
//! let model = StateSpaceModel::new(
//!     "demo",
//!     vec![vec![Expr::zero()]],
//!     vec![Expr::one()],
//!     vec![Expr::one()],
//!     Expr::zero(),
//!     vec![],
//! )
//! .unwrap();
//! let graph = build_graph(&model, GraphStyle::Sfg, false, false);
//! assert!(graph.contains_edge("xdot1", "x1"));
//! ```

pub mod builder;
pub mod error;
pub mod graph;
pub mod style;

// Re-exports for ergonomics
pub use builder::{build_graph, build_integrator_graph, build_sfg_graph};
pub use error::GraphError;
pub use graph::{NodeKind, SchematicGraph, SchematicNode};
pub use style::GraphStyle;
