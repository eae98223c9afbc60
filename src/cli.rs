//! Command-line argument parsing for the demo driver
//!
//! Supports:
//! - Loading a text file as the sample document
//! - Scripted typing and pasting through the pipeline
//! - Replaying undo steps at the end of the session

use clap::Parser;
use std::path::PathBuf;

/// A scripted session driver for the scribe editing core
#[derive(Parser, Debug)]
#[command(name = "scribe", version, about = "Rich-text editing core demo")]
pub struct CliArgs {
    /// Text file to load as the document's initial content
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Text typed through the pipeline, character by character
    #[arg(short, long, value_name = "TEXT", default_value = " Typed through the pipeline.")]
    pub type_text: String,

    /// Clipboard payload pasted after typing (CRLF gets sanitized)
    #[arg(short, long, value_name = "TEXT")]
    pub paste: Option<String>,

    /// Number of undo steps replayed at the end of the session
    #[arg(short, long, value_name = "N", default_value_t = 0)]
    pub undo: usize,
}
