//! Writing rendered graphs to disk, optionally through Graphviz

use clap::ValueEnum;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

use super::LayoutEngine;
use crate::errors::{Result, VizError};

/// Artifact written to the output path
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// DOT text as rendered
    Dot,
    Svg,
    Png,
    Pdf,
    /// Extracted relation set as JSON
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Dot => "dot",
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
            OutputFormat::Pdf => "pdf",
            OutputFormat::Json => "json",
        }
    }

    /// Formats produced by running Graphviz over the DOT text
    pub fn needs_graphviz(&self) -> bool {
        matches!(self, OutputFormat::Svg | OutputFormat::Png | OutputFormat::Pdf)
    }
}

/// Write `content` to `path`, creating parent directories and overwriting
/// any existing file
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("[Output] Creating directory {:?}", parent);
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, content)?;
    info!("[Output] Wrote {} bytes to {:?}", content.len(), path);
    Ok(())
}

/// Lay out `dot` with Graphviz and write the image to `output`.
///
/// The DOT text goes through a temporary file that is removed afterwards.
pub fn convert_with_graphviz(
    program: &str,
    dot: &str,
    output: &Path,
    format: OutputFormat,
    engine: LayoutEngine,
) -> Result<()> {
    if !format.needs_graphviz() {
        return Err(VizError::InvalidArgument(format!(
            "{} output is not produced by Graphviz",
            format.as_str()
        )));
    }

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut tmp = tempfile::Builder::new()
        .prefix("owlviz-")
        .suffix(".dot")
        .tempfile()?;
    tmp.write_all(dot.as_bytes())?;
    tmp.flush()?;

    debug!(
        "[Output] {} -K{} -T{} {:?} -o {:?}",
        program,
        engine,
        format.as_str(),
        tmp.path(),
        output
    );

    let result = Command::new(program)
        .arg(format!("-K{}", engine))
        .arg(format!("-T{}", format.as_str()))
        .arg(tmp.path())
        .arg("-o")
        .arg(output)
        .output()
        .map_err(|e| VizError::Conversion(format!("failed to run {}: {}", program, e)))?;

    if !result.status.success() {
        return Err(VizError::Conversion(format!(
            "{} exited with {}: {}",
            program,
            result.status,
            String::from_utf8_lossy(&result.stderr).trim()
        )));
    }

    info!("[Output] {} file saved to {:?}", format.as_str().to_uppercase(), output);
    Ok(())
}
