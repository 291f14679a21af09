//! JSON request handling.
//!
//! A request names a sentence, a grammar in text form and an algorithm id.
//! The response is the serialized [`ParseOutcome`] (`{"success", "steps"}`)
//! or `{"error": message}` when the request cannot be served.

use anyhow::Context;
use cfgtrace::grammar::text::parse_grammar_with_start;
use cfgtrace::{tokenize, Algorithm, Grammar, ParseOptions, ParseOutcome};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct ParseRequest {
    /// Whitespace-separated words; lowercased before parsing
    pub sentence: String,
    /// Grammar text, one `lhs --> sym, sym` rule per line
    pub grammar: String,
    /// Algorithm id such as `"bottom-up"`
    pub algorithm: String,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub options: ParseOptions,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ParseResponse {
    Outcome(ParseOutcome),
    Error { error: String },
}

impl ParseResponse {
    /// Whether the sentence was accepted; `None` for an error response.
    #[must_use]
    pub fn accepted(&self) -> Option<bool> {
        match self {
            Self::Outcome(outcome) => Some(outcome.accepted),
            Self::Error { .. } => None,
        }
    }
}

impl ParseRequest {
    /// Serve the request. Every failure becomes an error response.
    #[must_use]
    pub fn respond(&self) -> ParseResponse {
        match self.run() {
            Ok(outcome) => ParseResponse::Outcome(outcome),
            Err(err) => {
                let error = format!("{err:#}");
                tracing::debug!(%error, "request failed");
                ParseResponse::Error { error }
            }
        }
    }

    fn run(&self) -> anyhow::Result<ParseOutcome> {
        let algorithm: Algorithm = self.algorithm.parse()?;
        let grammar = match &self.start {
            Some(start) => parse_grammar_with_start(&self.grammar, start),
            None => Grammar::from_text(&self.grammar),
        }
        .context("invalid grammar")?;
        let tokens = tokenize(&self.sentence);
        Ok(cfgtrace::parse(&grammar, &tokens, algorithm, &self.options)?)
    }
}

/// Decode a request body and serve it.
#[must_use]
pub fn respond_json(body: &str) -> ParseResponse {
    match serde_json::from_str::<ParseRequest>(body) {
        Ok(request) => request.respond(),
        Err(err) => ParseResponse::Error {
            error: format!("invalid request: {err}"),
        },
    }
}
