use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "paper", version, about = "Catalog academic papers and keep a Markdown list in sync", long_about = None)]
pub struct Cli {
    /// Repository holding the record store and the document
    #[arg(long, global = true, value_name = "DIR")]
    pub repo: Option<PathBuf>,

    /// Config file (defaults to ./.paper-cli.toml, then ~/.config/paper-cli/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv); PAPER_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a paper to the library
    Add(AddArgs),
    /// Search papers
    #[command(visible_alias = "s")]
    Search(SearchArgs),
    /// List papers
    #[command(visible_alias = "ls")]
    List(ListArgs),
    /// Preview the generated Markdown tables
    Preview {
        /// Preview one topic only
        #[arg(short, long)]
        topic: Option<String>,
        /// Show what a sync would change instead of the tables
        #[arg(long)]
        diff: bool,
    },
    /// Regenerate the document's topic tables from the record store
    Sync,
    /// List topics with their paper counts
    Topics,
    /// Show library statistics
    Stats,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Paper URL (arXiv, ACM, IEEE, DOI link) or a bare arXiv ID / DOI
    #[arg(value_name = "REFERENCE")]
    pub reference: String,

    /// Topic (free-form, e.g. Memory, LLM); falls back to default_topic
    pub topic: Option<String>,

    #[arg(long)]
    pub title: Option<String>,

    /// Comma-separated author names
    #[arg(long)]
    pub authors: Option<String>,

    /// Venue or version label, e.g. "CHI 2024"
    #[arg(short, long)]
    pub source: Option<String>,

    /// Publication date (YYYY.MM)
    #[arg(long)]
    pub date: Option<String>,

    #[arg(long)]
    pub doi: Option<String>,

    #[arg(long)]
    pub journal_ref: Option<String>,

    /// Comma-separated classification codes
    #[arg(long)]
    pub subjects: Option<String>,

    /// Comma-separated tags
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Additional notes
    #[arg(short, long)]
    pub note: Option<String>,

    /// Add even if the paper already seems to be in the library
    #[arg(long)]
    pub allow_duplicate: bool,

    /// Don't update the document
    #[arg(long)]
    pub no_sync: bool,

    /// Show the record without saving it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Keyword matched against title, tags, authors and subjects
    pub query: Option<String>,

    #[arg(short, long)]
    pub tag: Option<String>,

    #[arg(short, long)]
    pub author: Option<String>,

    #[arg(long)]
    pub topic: Option<String>,

    /// Start date (YYYY.MM), inclusive
    #[arg(long = "from", value_name = "YYYY.MM")]
    pub date_from: Option<String>,

    /// End date (YYYY.MM), inclusive
    #[arg(long = "to", value_name = "YYYY.MM")]
    pub date_to: Option<String>,

    /// Most recent first
    #[arg(long)]
    pub recent: bool,

    /// Max results (0 for all)
    #[arg(short, long, default_value_t = 20)]
    pub limit: usize,

    /// Print matching records as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Most recent first
    #[arg(long)]
    pub recent: bool,

    /// Max results (0 for all)
    #[arg(short, long, default_value_t = 10)]
    pub limit: usize,

    /// Print records as JSON
    #[arg(long)]
    pub json: bool,
}
