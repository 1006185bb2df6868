use clap::{Args, Parser, Subcommand};

use crate::config::Overrides;

#[derive(Debug, Clone, Parser)]
#[command(name = "monastery-catalog")]
#[command(about = "Browse, search and export the monastery catalog")]
pub struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// JSON catalog file to use instead of the built-in dataset
    #[arg(long, global = true)]
    pub catalog: Option<String>,

    /// Display language code (en, hi, ne, si, bo)
    #[arg(short, long, global = true)]
    pub language: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Args)]
pub struct QueryArgs {
    /// Free-text search over name, local name, description, location and tradition
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Filter key (all, featured, ancient, modern, small, large, easy, moderate, challenging)
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Sort key (name, rating, founded, difficulty, reviews)
    #[arg(short = 'o', long)]
    pub sort: Option<String>,

    /// Reject unknown filter or sort keys instead of ignoring them
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// List monasteries matching a search, filter and sort
    List {
        #[command(flatten)]
        query: QueryArgs,

        /// Output format (table, json, csv)
        #[arg(long)]
        format: Option<String>,
    },

    /// Show the full record of one monastery
    Show {
        id: String,

        /// Output format (table, json, csv)
        #[arg(long)]
        format: Option<String>,
    },

    /// Show the rating summary and reviews of one monastery
    Reviews {
        id: String,

        /// Review order (recent, helpful, rating)
        #[arg(long, default_value = "recent")]
        sort: String,

        /// Only show reviews with this many stars (all, 1-5)
        #[arg(long, default_value = "all")]
        stars: String,

        /// Output format (table, json, csv)
        #[arg(long)]
        format: Option<String>,
    },

    /// Ask the visitor guide a question
    Ask {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,

        /// Output format (table, json)
        #[arg(long)]
        format: Option<String>,
    },

    /// Write the matching monasteries to a file
    Export {
        /// Output file path
        output: String,

        #[command(flatten)]
        query: QueryArgs,

        /// Output format (json, csv)
        #[arg(long, default_value = "json")]
        format: String,
    },

    /// Load and validate the catalog and configuration
    Validate,

    /// List supported display languages
    Languages,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        let (format, strict) = match &self.command {
            Commands::List { query, format } => (format.clone(), query.strict),
            Commands::Show { format, .. }
            | Commands::Reviews { format, .. }
            | Commands::Ask { format, .. } => (format.clone(), false),
            Commands::Export { query, format, .. } => (Some(format.clone()), query.strict),
            Commands::Validate | Commands::Languages => (None, false),
        };

        Overrides {
            catalog: self.catalog.clone(),
            language: self.language.clone(),
            format,
            strict,
        }
    }
}
