//! Rendering of search results and statistics for the terminal.

use std::fmt::Write as _;

use serde::Serialize;

use crate::{
    engine::{CollectionStats, SearchResult},
    error::Result,
    retrieval::ResponseEntry,
};

/// A search hit joined with its response entry.
#[derive(Debug, Clone, Serialize)]
pub struct RankedEntry<'a> {
    pub rank: usize,
    pub score: f64,
    pub doc_index: usize,
    pub id: &'a str,
    pub content: &'a str,
}

#[derive(Serialize)]
struct JsonResults<'a> {
    query: &'a str,
    result_count: usize,
    results: &'a [RankedEntry<'a>],
}

pub fn rank_entries<'a>(
    hits: &[SearchResult<'a>],
    entries: &'a [ResponseEntry],
) -> Vec<RankedEntry<'a>> {
    hits.iter()
        .enumerate()
        .filter_map(|(i, hit)| {
            let entry = entries.get(hit.doc_index)?;
            Some(RankedEntry {
                rank: i + 1,
                score: hit.score,
                doc_index: hit.doc_index,
                id: &entry.id,
                content: hit.document,
            })
        })
        .collect()
}

pub fn format_human(results: &[RankedEntry<'_>]) -> String {
    if results.is_empty() {
        return "No results found.\n".to_string();
    }

    let mut out = String::new();
    for r in results {
        let _ = writeln!(out, "{:>3}. [{:.3}] {}", r.rank, r.score, r.id);
        let _ = writeln!(out, "     {}", r.content);
    }
    let _ = writeln!(out, "\n{} result(s)", results.len());
    out
}

pub fn format_json(results: &[RankedEntry<'_>], query: &str) -> Result<String> {
    Ok(serde_json::to_string(&JsonResults {
        query,
        result_count: results.len(),
        results,
    })?)
}

pub fn format_stats_human(stats: &CollectionStats) -> String {
    format!(
        "documents:      {}\n\
         total terms:    {}\n\
         vocabulary:     {}\n\
         avg length:     {:.3}\n\
         k1:             {} ({})\n\
         b:              {} ({})\n\
         weighting:      {}\n\
         language:       {}\n",
        stats.documents,
        stats.total_terms,
        stats.vocabulary,
        stats.avg_doc_length,
        stats.k1,
        stats.k1_source,
        stats.b,
        stats.b_source,
        stats.weighting,
        stats.language,
    )
}
