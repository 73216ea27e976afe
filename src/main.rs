use bm25s::{
    DocMatch,
    cli::{Cli, Command, PromptArgs, RankingArgs, SearchArgs, StatsArgs},
    corpus,
    error,
    format,
    prompt::{self, QueryRequest},
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if let Ok(env) = std::env::var("BM25S_LOG") {
        EnvFilter::new(env)
    } else if quiet {
        EnvFilter::new("warn")
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() -> error::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Command::Search(args) => cmd_search(&args)?,
        Command::Stats(args) => cmd_stats(&args)?,
        Command::Prompt(args) => cmd_prompt(&args)?,
        Command::Completions(args) => args.generate(),
    }

    Ok(())
}

fn load_doc_match(ranking: &RankingArgs) -> error::Result<DocMatch> {
    let entries = corpus::load(&ranking.corpus)?;
    DocMatch::new(entries, &ranking.lang, ranking.config())
}

fn cmd_search(args: &SearchArgs) -> error::Result<()> {
    let doc_match = load_doc_match(&args.ranking)?;
    let hits = doc_match.engine().search(&args.query, args.top_n());
    let ranked = format::rank_entries(&hits, doc_match.entries());

    if args.json {
        println!("{}", format::format_json(&ranked, &args.query)?);
    } else {
        print!("{}", format::format_human(&ranked));
    }
    Ok(())
}

fn cmd_stats(args: &StatsArgs) -> error::Result<()> {
    let doc_match = load_doc_match(&args.ranking)?;
    let stats = doc_match.engine().stats();

    if args.json {
        println!("{}", serde_json::to_string(&stats)?);
    } else {
        print!("{}", format::format_stats_human(&stats));
    }
    Ok(())
}

fn cmd_prompt(args: &PromptArgs) -> error::Result<()> {
    let doc_match = load_doc_match(&args.ranking)?
        .with_fuzzy_threshold(args.fuzzy_threshold)?;

    let request = QueryRequest {
        model: args.model.clone(),
        system_prompt: args.system.clone(),
        query: args.query.clone(),
        attachments: args.attachments.clone(),
        use_fuzzy: args.fuzzy,
    };

    let assembled = prompt::assemble(&doc_match, &request)?;
    println!("{}", serde_json::to_string_pretty(&assembled)?);
    Ok(())
}
