//! Output writing: DOT text directly, or a rendered artifact via Graphviz.

use core::fmt;
use std::io::Write as _;
use std::path::Path;
use std::process::{Command, Stdio};
use std::str::FromStr;

use sf_graph::SchematicGraph;

use crate::dot::{RankDir, graph_to_dot};
use crate::{RenderError, RenderResult};

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Dot,
    Svg,
    Png,
    Pdf,
}

impl OutputFormat {
    /// File extension, doubling as the Graphviz `-T` target.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Dot => "dot",
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
            OutputFormat::Pdf => "pdf",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = RenderError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "dot" => Ok(OutputFormat::Dot),
            "svg" => Ok(OutputFormat::Svg),
            "png" => Ok(OutputFormat::Png),
            "pdf" => Ok(OutputFormat::Pdf),
            _ => Err(RenderError::UnsupportedFormat(value.to_string())),
        }
    }
}

/// Serialize the graph and write it to `output_path` in the requested
/// format, creating parent directories as needed.
///
/// Non-DOT formats go through the external Graphviz `dot` executable; its
/// output is captured and written only after a zero exit status, so a
/// failed render leaves no partial artifact behind.
pub fn write_output(
    graph: &SchematicGraph,
    output_path: &Path,
    format: OutputFormat,
    rankdir: RankDir,
    simplify: bool,
    float_precision: Option<usize>,
) -> RenderResult<()> {
    let dot_source = graph_to_dot(graph, rankdir, simplify, float_precision);
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    match format {
        OutputFormat::Dot => {
            std::fs::write(output_path, dot_source)?;
            Ok(())
        }
        _ => render_with_graphviz(&dot_source, output_path, format),
    }
}

fn render_with_graphviz(source: &str, output_path: &Path, format: OutputFormat) -> RenderResult<()> {
    let artifact = run_renderer("dot", source, format)?;
    std::fs::write(output_path, &artifact)?;
    Ok(())
}

fn run_renderer(executable: &str, source: &str, format: OutputFormat) -> RenderResult<Vec<u8>> {
    tracing::debug!(%format, "invoking graphviz");
    let mut child = Command::new(executable)
        .arg(format!("-T{format}"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                RenderError::GraphvizNotFound
            } else {
                RenderError::Io(err)
            }
        })?;
    {
        let mut stdin = child.stdin.take().expect("stdin is piped");
        // A child that exits without draining its input closes the pipe;
        // the exit status below carries the real failure.
        if let Err(err) = stdin.write_all(source.as_bytes()) {
            if err.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(RenderError::Io(err));
            }
        }
    }
    let output = child.wait_with_output()?;
    if !output.status.success() {
        return Err(RenderError::GraphvizFailed {
            code: output.status.code().unwrap_or(-1),
        });
    }
    Ok(output.stdout)
}
