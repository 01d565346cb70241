//! Command-line argument definitions for soapdrill.

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

use crate::scenario::{Category, Difficulty};

/// Command-line interface for soapdrill.
#[derive(Debug, Parser)]
#[command(name = "soapdrill")]
#[command(
    author,
    version,
    about = "A training tool for diagnosing simulated SOAP request failures"
)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file.
    #[arg(long, global = true)]
    pub config: Option<Utf8PathBuf>,

    /// Directory holding the persisted scenario collection.
    #[arg(long, global = true)]
    pub data_dir: Option<Utf8PathBuf>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List scenarios, optionally filtered.
    List(ListArgs),

    /// Show a single scenario in full.
    Show(ShowArgs),

    /// Send a scenario's request and report the simulated response.
    Run(RunArgs),

    /// Author a new scenario.
    Add(AddArgs),

    /// Write the collection to a JSON document.
    Export(ExportArgs),

    /// Append the scenarios from a JSON document.
    Import(ImportArgs),

    /// Restore the bundled scenarios, discarding custom ones.
    Reset,
}

/// Arguments for the `list` subcommand.
#[derive(Debug, Default, Args)]
pub struct ListArgs {
    /// Case-insensitive text matched against name, description and tags.
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Only show scenarios in this category.
    #[arg(long, value_enum)]
    pub category: Option<Category>,

    /// Only show scenarios at this difficulty.
    #[arg(long, value_enum)]
    pub difficulty: Option<Difficulty>,
}

/// Arguments for the `show` subcommand.
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Scenario identifier.
    #[arg(required = true)]
    pub id: String,

    /// Also print the scenario's explanation.
    #[arg(long)]
    pub explain: bool,
}

/// Arguments for the `run` subcommand.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Scenario identifier.
    #[arg(required = true)]
    pub id: String,

    /// Apply the fix and resend when the first run fails.
    #[arg(long)]
    pub resolve: bool,

    /// Print the scenario's explanation after the response.
    #[arg(long)]
    pub explain: bool,
}

/// Arguments for the `add` subcommand.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// Scenario title.
    #[arg(long, required = true)]
    pub name: String,

    /// One-line summary of the failure.
    #[arg(long, required = true)]
    pub description: String,

    /// Failure family.
    #[arg(long, value_enum, default_value_t = Category::XmlStructureErrors)]
    pub category: Category,

    /// Expected learner level.
    #[arg(long, value_enum, default_value_t = Difficulty::Beginner)]
    pub difficulty: Difficulty,

    /// File holding the request envelope.
    #[arg(long)]
    pub request_file: Option<Utf8PathBuf>,

    /// File holding the success response envelope.
    #[arg(long)]
    pub response_file: Option<Utf8PathBuf>,

    /// File holding the fault envelope.
    #[arg(long)]
    pub error_file: Option<Utf8PathBuf>,

    /// File holding the corrected request envelope.
    #[arg(long)]
    pub fixed_request_file: Option<Utf8PathBuf>,

    /// Why the request fails and what the fix changes.
    #[arg(long)]
    pub explanation: Option<String>,

    /// Search tag; may be repeated.
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Start from the request, response and fault skeletons.
    #[arg(long)]
    pub templates: bool,
}

/// Arguments for the `export` subcommand.
#[derive(Debug, Default, Args)]
pub struct ExportArgs {
    /// Directory to write the document into.
    #[arg(long, default_value = ".")]
    pub dir: Utf8PathBuf,
}

/// Arguments for the `import` subcommand.
#[derive(Debug, Args)]
pub struct ImportArgs {
    /// JSON document to import.
    #[arg(required = true)]
    pub file: Utf8PathBuf,
}
