//! ARC documentation search (simulated index).
//!
//! The index is seeded per category at construction. Search scores each
//! entry by term matches: +5 per term found in the title, +1 per term found
//! in the content, and +3 extra for each content-matching term when the
//! whole query appears in the content as a phrase.

use serde::Serialize;
use tracing::{debug, info};

/// Categories the documentation is split into.
pub const CATEGORIES: [&str; 4] = ["api", "infrastructure", "ui", "saas"];

const SNIPPET_CONTEXT: usize = 100;
const SNIPPET_FALLBACK: usize = 200;

#[derive(Debug, Clone)]
struct DocEntry {
    title: String,
    url: String,
    category: String,
    content: String,
}

/// A single search hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocSearchResult {
    pub title: String,
    pub url: String,
    pub category: String,
    pub snippet: String,
    pub score: u32,
}

/// Search over the ARC documentation.
#[derive(Debug, Clone)]
pub struct DocumentationService {
    entries: Vec<DocEntry>,
}

impl DocumentationService {
    /// Build the service and index every category under `base_url`.
    pub fn new(base_url: &str) -> Self {
        let mut entries = Vec::new();
        for category in CATEGORIES {
            let seeded = seed_entries(base_url, category);
            info!("Indexed {} entries for {}", seeded.len(), category);
            entries.extend(seeded);
        }
        Self { entries }
    }

    /// Number of indexed entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Search the index. `category` of `"all"` searches every category.
    pub async fn search(
        &self,
        query: &str,
        category: &str,
        max_results: usize,
    ) -> Vec<DocSearchResult> {
        let query_lower = query.to_lowercase();
        let terms: Vec<&str> = query_lower.split(' ').collect();

        let mut results: Vec<DocSearchResult> = self
            .entries
            .iter()
            .filter(|entry| category == "all" || entry.category == category)
            .filter_map(|entry| {
                let score = score_entry(entry, &query_lower, &terms);
                (score > 0).then(|| DocSearchResult {
                    title: entry.title.clone(),
                    url: entry.url.clone(),
                    category: entry.category.clone(),
                    snippet: snippet(&entry.content, &query_lower),
                    score,
                })
            })
            .collect();

        // Stable sort keeps index order among equal scores.
        results.sort_by(|a, b| b.score.cmp(&a.score));
        results.truncate(max_results);

        debug!("Search {:?} in {} returned {} results", query, category, results.len());
        results
    }
}

fn score_entry(entry: &DocEntry, query_lower: &str, terms: &[&str]) -> u32 {
    let title = entry.title.to_lowercase();
    let content = entry.content.to_lowercase();
    let phrase_match = content.contains(query_lower);

    terms.iter().fold(0, |mut score, term| {
        if title.contains(term) {
            score += 5;
        }
        if content.contains(term) {
            score += 1;
            if phrase_match {
                score += 3;
            }
        }
        score
    })
}

/// Text around the first phrase match, or the start of the content.
fn snippet(content: &str, query_lower: &str) -> String {
    let chars: Vec<char> = content.chars().collect();
    let lower: Vec<char> = content.to_lowercase().chars().collect();
    let needle: Vec<char> = query_lower.chars().collect();

    let found = if lower.len() == chars.len() && !needle.is_empty() {
        lower.windows(needle.len()).position(|w| w == needle.as_slice())
    } else {
        None
    };

    let (start, end) = match found {
        Some(at) => (
            at.saturating_sub(SNIPPET_CONTEXT),
            (at + needle.len() + SNIPPET_CONTEXT).min(chars.len()),
        ),
        None => (0, SNIPPET_FALLBACK.min(chars.len())),
    };

    let mut text: String = chars[start..end].iter().collect();
    text.push_str("...");
    text
}

fn seed_entries(base_url: &str, category: &str) -> Vec<DocEntry> {
    let base = format!("{}arc-{}-docs/", base_url, category);
    let pages: &[(&str, &str, &str)] = match category {
        "api" => &[
            (
                "Authentication Service",
                "authentication.html",
                "The Authentication Service provides user authentication and authorization capabilities for ARC applications.",
            ),
            (
                "Notification Service",
                "notification.html",
                "The Notification Service enables sending notifications across multiple channels in ARC applications.",
            ),
        ],
        "infrastructure" => &[(
            "Deployment Guide",
            "deployment.html",
            "This guide explains how to deploy ARC applications to various cloud environments.",
        )],
        "ui" => &[(
            "UI Components",
            "components.html",
            "ARC provides a set of reusable UI components for building consistent user interfaces.",
        )],
        "saas" => &[(
            "Multi-tenancy",
            "multi-tenancy.html",
            "ARC supports multi-tenancy for building SaaS applications with isolated tenant data.",
        )],
        _ => &[],
    };

    pages
        .iter()
        .map(|(title, page, content)| DocEntry {
            title: title.to_string(),
            url: format!("{}{}", base, page),
            category: category.to_string(),
            content: content.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> DocumentationService {
        DocumentationService::new("https://docs.example/")
    }

    #[test]
    fn test_index_is_seeded() {
        assert_eq!(service().len(), 5);
    }

    #[tokio::test]
    async fn test_title_match_ranks_first() {
        let results = service().search("notification", "all", 5).await;
        assert_eq!(results[0].title, "Notification Service");
        // Title (+5), content (+1) and phrase bonus (+3).
        assert_eq!(results[0].score, 9);
        assert_eq!(
            results[0].url,
            "https://docs.example/arc-api-docs/notification.html"
        );
    }

    #[tokio::test]
    async fn test_category_filter_and_limit() {
        let results = service().search("arc", "api", 5).await;
        assert!(results.iter().all(|r| r.category == "api"));
        assert_eq!(results.len(), 2);

        let results = service().search("arc", "all", 3).await;
        assert_eq!(results.len(), 3);
    }

    #[tokio::test]
    async fn test_no_match_yields_nothing() {
        assert!(service().search("kubernetes", "all", 5).await.is_empty());
    }

    #[test]
    fn test_snippet_fallback_and_window() {
        let content = "x".repeat(300);
        assert_eq!(snippet(&content, "nomatch").len(), 203);

        let content = format!("{}needle{}", "a".repeat(150), "b".repeat(150));
        let text = snippet(&content, "needle");
        assert_eq!(text.len(), 100 + 6 + 100 + 3);
        assert!(text.contains("needle"));
    }
}
