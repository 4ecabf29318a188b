//! sf-render: DOT emission and output writing for schematic graphs.

pub mod dot;
pub mod gain;
pub mod output;

pub use dot::{RankDir, graph_to_dot};
pub use gain::format_gain;
pub use output::{OutputFormat, write_output};

pub type RenderResult<T> = Result<T, RenderError>;

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("rankdir must be either LR or TB, got '{0}'")]
    InvalidRankDir(String),

    #[error("Unsupported output format '{0}'")]
    UnsupportedFormat(String),

    #[error("Graphviz 'dot' executable not found; install graphviz or output DOT instead")]
    GraphvizNotFound,

    #[error("Graphviz failed with exit code {code}")]
    GraphvizFailed { code: i32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
