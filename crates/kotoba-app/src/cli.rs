use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use kotoba_types::TextSource;

/// kotoba - collect Japanese vocabulary from conversation text
#[derive(Parser, Debug)]
#[command(name = "kotoba")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON config profile
    #[arg(long, global = true, default_value = "config.json")]
    pub config: PathBuf,

    /// Directory holding the dictionary and notebook
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract words from TEXT (or stdin) and record them
    Extract {
        #[arg(long, value_enum, default_value = "agent")]
        source: SourceArg,

        /// Print the annotated words without recording them
        #[arg(long)]
        dry_run: bool,

        text: Option<String>,
    },

    /// Feed stdin lines through the extractor as a conversation
    Chat,

    /// Bulk-import a JSON, NDJSON or CSV vocabulary file
    Import { file: PathBuf },

    /// Write the dictionary or notebook as CSV
    Export {
        #[arg(value_enum)]
        target: ExportTarget,

        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    #[command(subcommand)]
    Notebook(NotebookCommands),
}

#[derive(Subcommand, Debug)]
pub enum NotebookCommands {
    /// Show recorded words
    List {
        /// Defaults to the configured display cap
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Remove every entry
    Clear,
    /// Drop repeated words, keeping the first
    Dedupe,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceArg {
    Agent,
    User,
    Manual,
}

impl From<SourceArg> for TextSource {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Agent => TextSource::AgentReply,
            SourceArg::User => TextSource::UserInput,
            SourceArg::Manual => TextSource::Manual,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportTarget {
    Dictionary,
    Notebook,
}
