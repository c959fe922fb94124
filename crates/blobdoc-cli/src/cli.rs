use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "blobdoc",
    about = "JSON document store over blob containers",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Config file (defaults to ./blobdoc.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Storage root for the local backend, overriding the config file
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// List containers
    Containers,
    /// Create a container
    CreateContainer(ContainerArgs),
    /// Delete a container and everything in it
    DeleteContainer(ContainerArgs),
    /// List the items in a container
    Items(ContainerArgs),
    /// Print an item's raw text
    Get(ItemArgs),
    /// Store a JSON object under a new random id
    Create(CreateArgs),
    /// Replace the document stored under an id
    Update(UpdateArgs),
    /// Store a JSON payload under the next sequence number
    Post(CreateArgs),
    /// Delete an item
    Delete(ItemArgs),
    /// Print every document in a container as one JSON array
    Merge(ContainerArgs),
    /// Print one top-level field of an item
    Field(FieldArgs),
    /// Find the first document whose field equals a value
    Find(FindArgs),
    /// Move an item to another container
    Move(MoveArgs),
    /// Rename an item within a container
    Rename(RenameArgs),
    /// Upload a local file as an item
    Upload(UploadArgs),
    /// Download an item to a local file or stdout
    Download(DownloadArgs),
}

#[derive(Args)]
pub struct ContainerArgs {
    pub container: String,
}

#[derive(Args)]
pub struct ItemArgs {
    pub container: String,
    pub item: String,
}

/// A JSON payload given inline, from a file, or on stdin.
#[derive(Args)]
pub struct PayloadArgs {
    pub json: Option<String>,
    #[arg(short, long, conflicts_with = "json")]
    pub file: Option<PathBuf>,
}

#[derive(Args)]
pub struct CreateArgs {
    pub container: String,
    #[command(flatten)]
    pub payload: PayloadArgs,
}

#[derive(Args)]
pub struct UpdateArgs {
    pub container: String,
    pub id: String,
    #[command(flatten)]
    pub payload: PayloadArgs,
}

#[derive(Args)]
pub struct FieldArgs {
    pub container: String,
    pub item: String,
    pub field: String,
}

#[derive(Args)]
pub struct FindArgs {
    pub container: String,
    pub field: String,
    pub value: String,
}

#[derive(Args)]
pub struct MoveArgs {
    pub from: String,
    pub to: String,
    pub item: String,
}

#[derive(Args)]
pub struct RenameArgs {
    pub container: String,
    pub old: String,
    pub new: String,
}

#[derive(Args)]
pub struct UploadArgs {
    pub container: String,
    pub item: String,
    pub path: PathBuf,
}

#[derive(Args)]
pub struct DownloadArgs {
    pub container: String,
    pub item: String,
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
