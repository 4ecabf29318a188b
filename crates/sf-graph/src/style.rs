use core::fmt;
use std::str::FromStr;

use crate::error::GraphError;

/// Schematic topology to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphStyle {
    /// Signal-flow graph with explicit derivative nodes.
    Sfg,
    /// Block diagram with summing junctions and 1/s integrator blocks.
    Integrator,
}

impl fmt::Display for GraphStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphStyle::Sfg => write!(f, "sfg"),
            GraphStyle::Integrator => write!(f, "integrator"),
        }
    }
}

impl FromStr for GraphStyle {
    type Err = GraphError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "sfg" => Ok(GraphStyle::Sfg),
            "integrator" => Ok(GraphStyle::Integrator),
            _ => Err(GraphError::UnsupportedStyle(value.to_string())),
        }
    }
}
