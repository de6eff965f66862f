use std::sync::LazyLock;

use regex::Regex;

use crate::application::ports::{EntityExtractor, ExtractorError};
use crate::domain::{EntityRecord, RegulatoryRule};

static CLAUSE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*\d+(?:\.\d+)*[.)]\s+").unwrap());

static MEASUREMENT_HINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(measur|gfa|gross floor area|comput|calculat)").unwrap());

const SUMMARY_MAX_CHARS: usize = 400;

/// Parses regulatory circulars into clause-level rules. Clauses are the
/// numbered paragraphs (`1.`, `2.3`, `4)` ...); each yields one
/// `RegulatoryRule` whose summary is the clause's first sentence and whose
/// measurement basis is the first sentence that talks about how a quantity
/// is measured or computed, if any.
#[derive(Default)]
pub struct CircularExtractor;

impl CircularExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl EntityExtractor for CircularExtractor {
    fn extract(&self, text: &str) -> Result<Vec<EntityRecord>, ExtractorError> {
        let starts: Vec<usize> = CLAUSE_MARKER.find_iter(text).map(|m| m.start()).collect();
        if starts.is_empty() {
            return Err(ExtractorError::MalformedStructure(
                "no numbered clauses found in circular text".to_string(),
            ));
        }

        let mut rules = Vec::new();
        for (i, &start) in starts.iter().enumerate() {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            let clause = text[start..end].trim();
            if clause.is_empty() {
                continue;
            }

            let body = CLAUSE_MARKER.replace(clause, "");
            let sentences: Vec<&str> = split_sentences(&body);
            let Some(first) = sentences.first() else {
                continue;
            };

            let measurement_basis = sentences
                .iter()
                .find(|s| MEASUREMENT_HINT.is_match(s))
                .map(|s| s.trim().to_string());

            rules.push(EntityRecord::Rule(RegulatoryRule {
                rule_summary: truncate(first.trim(), SUMMARY_MAX_CHARS),
                measurement_basis,
            }));
        }

        Ok(rules)
    }
}

fn split_sentences(text: &str) -> Vec<&str> {
    text.split_inclusive(&['.', '!', '?'][..])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    s.chars().take(max_chars).collect()
}
