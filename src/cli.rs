use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::model::CollisionPolicy;

#[derive(Debug, Parser)] // requires `derive` feature
#[command(name = "divvy")]
#[command(about = "Partition and merge directory trees", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Distribute the contents of a source directory across new
    /// subdirectories of the destination
    Partition(PartitionArgs),
    /// Move the contents of a source tree into a destination tree,
    /// resolving name collisions
    Merge(MergeArgs),
}

#[derive(Debug, Args)]
#[command(group(clap::ArgGroup::new("mode").required(true).multiple(false)))]
pub struct PartitionArgs {
    /// Directory whose contents will be distributed
    #[arg(short, long)]
    pub source: PathBuf,

    /// Where partition directories are created; defaults to the source
    #[arg(short, long)]
    pub destination: Option<PathBuf>,

    /// Number of partitions, filled by balanced greedy assignment
    #[arg(short = 'n', long, group = "mode")]
    pub partitions: Option<usize>,

    /// Approximate size of each partition in megabytes
    #[arg(long, group = "mode")]
    pub split_size: Option<u64>,

    /// Approximate number of files per partition
    #[arg(short = 'c', long, group = "mode")]
    pub split_count: Option<usize>,

    /// Partition directory prefix; `part` yields part-1, part-2, ...
    #[arg(long)]
    pub dir_prefix: Option<String>,

    /// Only include files whose name matches this regular expression
    #[arg(long)]
    pub pattern: Option<String>,

    /// What to do when a destination path already exists
    #[arg(long, value_enum)]
    pub on_collision: Option<CollisionPolicy>,

    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Args)]
pub struct MergeArgs {
    /// Root directory to traverse and merge into the destination
    #[arg(short, long)]
    pub source: PathBuf,

    /// Directory receiving the merged files
    #[arg(short, long)]
    pub destination: PathBuf,

    /// What to do with files already present at the destination
    #[arg(long, value_enum)]
    pub overwrite: Option<CollisionPolicy>,

    /// Only include files whose name matches this regular expression
    #[arg(long)]
    pub pattern: Option<String>,

    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
