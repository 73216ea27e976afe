use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use crate::config::Bm25Config;

#[derive(Debug, Parser)]
#[command(
    name = "bm25s",
    about = "Rank short texts against a query with script-aware BM25"
)]
pub struct Cli {
    /// Increase log verbosity (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Rank corpus entries against a query
    Search(SearchArgs),
    /// Show collection statistics and resolved parameters
    Stats(StatsArgs),
    /// Assemble the answer or LLM prompt for a query
    Prompt(PromptArgs),
    /// Generate shell completions
    #[command(hide = true)]
    Completions(CompletionsArgs),
}

// -- Shared ranking options --

#[derive(Debug, Clone, clap::Args)]
pub struct RankingArgs {
    /// Corpus file: a JSON array of entries, or text with one document per line
    #[arg(long)]
    pub corpus: PathBuf,

    /// Language hint (en, ru); anything else uses script detection
    #[arg(long, default_value = "auto")]
    pub lang: String,

    /// Pin the term-frequency saturation constant
    #[arg(long)]
    pub k1: Option<f64>,

    /// Pin the length-normalization constant
    #[arg(long)]
    pub b: Option<f64>,

    /// Weight terms by inverse word frequency instead of IDF
    #[arg(long)]
    pub iwf: bool,
}

impl RankingArgs {
    pub fn config(&self) -> Bm25Config {
        let mut config = Bm25Config::default();
        if let Some(k1) = self.k1 {
            config = config.with_k1(k1);
        }
        if let Some(b) = self.b {
            config = config.with_b(b);
        }
        if self.iwf {
            config = config.with_iwf();
        }
        config
    }
}

// -- Search --

#[derive(Debug, Parser)]
pub struct SearchArgs {
    /// The search query
    pub query: String,

    #[command(flatten)]
    pub ranking: RankingArgs,

    /// Number of results to return
    #[arg(short = 'n', long, default_value = "10")]
    pub count: usize,

    /// Return every document that scores above zero
    #[arg(long)]
    pub all: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

impl SearchArgs {
    /// Result limit passed to the engine; 0 disables truncation.
    pub fn top_n(&self) -> usize {
        if self.all { 0 } else { self.count }
    }
}

// -- Stats --

#[derive(Debug, Parser)]
pub struct StatsArgs {
    #[command(flatten)]
    pub ranking: RankingArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// -- Prompt --

#[derive(Debug, Parser)]
pub struct PromptArgs {
    /// The user's question
    pub query: String,

    #[command(flatten)]
    pub ranking: RankingArgs,

    /// System prompt placed before the user message
    #[arg(long, default_value = "")]
    pub system: String,

    /// Files whose contents are inlined into the prompt (repeatable)
    #[arg(long = "attach")]
    pub attachments: Vec<PathBuf>,

    /// Also list entries that fuzzily match the whole query
    #[arg(long)]
    pub fuzzy: bool,

    /// Minimum similarity for fuzzy matches
    #[arg(long, default_value = "0.75")]
    pub fuzzy_threshold: f64,

    /// Model name recorded in the request
    #[arg(long, default_value = "")]
    pub model: String,
}

// -- Completions --

#[derive(Debug, Parser)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsArgs {
    /// Generate shell completions and print to stdout.
    pub fn generate(&self) {
        let mut cmd = Cli::command();
        clap_complete::generate(
            self.shell,
            &mut cmd,
            "bm25s",
            &mut std::io::stdout(),
        );
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::{config::Param, weighting::Weighting};

    #[test]
    fn parse_search_defaults() {
        let cli =
            Cli::parse_from(["bm25s", "search", "fox", "--corpus", "db.json"]);
        match cli.command {
            Command::Search(args) => {
                assert_eq!(args.query, "fox");
                assert_eq!(args.count, 10);
                assert_eq!(args.top_n(), 10);
                assert_eq!(args.ranking.lang, "auto");
                assert!(!args.json);
                let config = args.ranking.config();
                assert_eq!(config.k1, Param::Auto);
                assert_eq!(config.weighting, Weighting::Idf);
            }
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn parse_search_overrides() {
        let cli = Cli::parse_from([
            "bm25s", "search", "fox", "--corpus", "db.txt", "--k1", "1.8",
            "--b", "0.4", "--iwf", "--all",
        ]);
        match cli.command {
            Command::Search(args) => {
                assert_eq!(args.top_n(), 0);
                let config = args.ranking.config();
                assert_eq!(config.k1, Param::Pinned(1.8));
                assert_eq!(config.b, Param::Pinned(0.4));
                assert_eq!(config.weighting, Weighting::Iwf);
            }
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn parse_prompt_attachments() {
        let cli = Cli::parse_from([
            "bm25s", "prompt", "why?", "--corpus", "db.json", "--attach",
            "a.txt", "--attach", "b.txt", "--fuzzy",
        ]);
        match cli.command {
            Command::Prompt(args) => {
                assert_eq!(args.attachments.len(), 2);
                assert!(args.fuzzy);
                assert_eq!(args.fuzzy_threshold, 0.75);
            }
            _ => panic!("expected prompt command"),
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
