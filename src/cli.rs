use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

pub use crate::api::models::Format;

#[derive(Debug, Parser)]
#[command(name = "gmctl", version, about = "Gmail REST API command line wrapper")]
pub struct Cli {
    #[arg(long, global = true, help = "Verbose logging to stderr")]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search and read messages
    Read(ReadArgs),
    /// Compose and send a message
    Send(SendArgs),
    /// List, create, apply, or remove labels
    Labels(LabelsArgs),
}

#[derive(Debug, Args)]
pub struct ReadArgs {
    #[arg(long, help = "Gmail search query, interpreted by the server")]
    pub query: String,
    #[arg(long, default_value_t = 10, help = "Maximum messages to return (1-100)")]
    pub max_results: u32,
    #[arg(long, value_enum, default_value_t = Format::Metadata, help = "Output detail level")]
    pub format: Format,
}

#[derive(Debug, Args)]
pub struct SendArgs {
    #[arg(long, value_delimiter = ',', num_args = 1.., required = true, help = "Recipient addresses")]
    pub to: Vec<String>,
    #[arg(long, required = true, help = "Email subject")]
    pub subject: String,
    #[arg(long, help = "Inline body text")]
    pub body: Option<String>,
    #[arg(long, help = "Read body from file")]
    pub body_file: Option<PathBuf>,
    #[arg(long, value_delimiter = ',', num_args = 1.., help = "CC addresses")]
    pub cc: Vec<String>,
    #[arg(long, value_delimiter = ',', num_args = 1.., help = "BCC addresses")]
    pub bcc: Vec<String>,
    #[arg(long, action = ArgAction::Append, help = "Attach file (repeatable)")]
    pub attach: Vec<PathBuf>,
}

#[derive(Debug, Args)]
pub struct LabelsArgs {
    #[arg(long, value_enum, help = "Label action to perform")]
    pub action: LabelAction,
    #[arg(long, help = "Label name (create)")]
    pub name: Option<String>,
    #[arg(long, help = "Existing label name (apply/remove)")]
    pub label_name: Option<String>,
    #[arg(long, value_delimiter = ',', num_args = 1.., help = "Message ids (apply/remove)")]
    pub message_ids: Vec<String>,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum LabelAction {
    List,
    Create,
    Apply,
    Remove,
}
