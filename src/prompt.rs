//! Prompt assembly for retrieval-augmented answers.
//!
//! A query is first matched against the response database. If the best BM25
//! hit is a ready-made response it is returned as-is; otherwise the retrieved
//! context, attached files and the question are packed into chat messages
//! for a [`CompletionClient`].

use std::{fmt::Write as _, path::PathBuf};

use serde::Serialize;

use crate::{error::Result, retrieval::DocMatch, text_util};

/// Only the first this-many fuzzy matches are considered for a prompt. The
/// BM25 best entry still counts toward the cap when it is skipped, unless it
/// sits exactly at the last slot.
pub const MAX_FUZZY_IN_PROMPT: usize = 5;

const INFO_HEADER: &str = "Using the following information:";
const FUZZY_HEADER: &str = "Fuzzy matches:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryRequest {
    pub model: String,
    pub system_prompt: String,
    pub query: String,
    pub attachments: Vec<PathBuf>,
    pub use_fuzzy: bool,
}

/// Either a stored answer or the messages to send to a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Assembled {
    Direct(String),
    Prompt(Vec<Message>),
}

/// Boundary to an external chat-completion service.
pub trait CompletionClient {
    fn complete(&self, model: &str, messages: &[Message]) -> Result<String>;
}

/// Build the answer or the message list for `request`.
///
/// Attachments are read in order; the first unreadable or non-UTF-8 file
/// aborts assembly.
pub fn assemble(
    doc_match: &DocMatch,
    request: &QueryRequest,
) -> Result<Assembled> {
    let best = doc_match
        .best_match(&request.query)
        .and_then(|m| doc_match.entry(m.entry_index));

    if let Some(entry) = best
        && !entry.is_prompt
    {
        tracing::debug!(id = %entry.id, "returning stored response");
        return Ok(Assembled::Direct(entry.content.clone()));
    }

    let fuzzy = if request.use_fuzzy {
        doc_match.fuzzy_matches(&request.query)
    } else {
        Vec::new()
    };

    let mut messages = Vec::with_capacity(2);
    if !request.system_prompt.is_empty() {
        messages.push(Message::system(&request.system_prompt));
    }

    let mut body = String::new();
    if !request.attachments.is_empty() || best.is_some() || !fuzzy.is_empty() {
        let _ = writeln!(body, "{INFO_HEADER}");
    }

    if let Some(entry) = best {
        let _ = writeln!(body, "{}", entry.content);
    }

    let best_id = best.map(|entry| entry.id.as_str());
    let mut listed = Vec::new();
    for (i, entry) in fuzzy.iter().enumerate() {
        if Some(entry.id.as_str()) == best_id {
            continue;
        }
        listed.push(entry);
        if i + 1 >= MAX_FUZZY_IN_PROMPT {
            break;
        }
    }
    if !listed.is_empty() {
        let _ = writeln!(body, "{FUZZY_HEADER}");
        for entry in listed {
            let _ = writeln!(body, "  - {}", entry.content);
        }
        let _ = writeln!(body);
    }

    for path in &request.attachments {
        let content = text_util::read_utf8_file(path)?;
        let _ = writeln!(
            body,
            "Content of file {}:\n{}",
            text_util::file_label(path),
            content
        );
    }

    let _ = writeln!(
        body,
        "Answer the question in {} language:\n{}",
        text_util::answer_language(&request.query),
        request.query
    );

    messages.push(Message::user(body));
    Ok(Assembled::Prompt(messages))
}

/// Ties a response database to a completion backend.
pub struct RagPipeline<C> {
    doc_match: DocMatch,
    client: C,
}

impl<C: CompletionClient> RagPipeline<C> {
    pub fn new(doc_match: DocMatch, client: C) -> Self {
        Self { doc_match, client }
    }

    pub fn doc_match(&self) -> &DocMatch {
        &self.doc_match
    }

    pub fn process_query(&self, request: &QueryRequest) -> Result<String> {
        match assemble(&self.doc_match, request)? {
            Assembled::Direct(answer) => Ok(answer),
            Assembled::Prompt(messages) => {
                self.client.complete(&request.model, &messages)
            }
        }
    }
}
