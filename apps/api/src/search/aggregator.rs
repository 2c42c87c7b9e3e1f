//! Search Aggregator — fans out a fixed set of query variants for an
//! (employer, role) pair, tags each hit by source domain, and deduplicates
//! by URL.
//!
//! The query variants are independent and run as concurrent tasks, but the
//! results are collected in query order so the output is reproducible for
//! identical external responses regardless of completion order. A failed or
//! empty query contributes zero findings and never aborts the batch.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::search::SearchProvider;

const RESULTS_PER_QUERY: u8 = 8;

/// Source category of a finding, matched by URL substring.
/// The match list is priority-ordered; the first substring hit wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceTag {
    Glassdoor,
    Reddit,
    Geeksforgeeks,
    LeetcodeDiscuss,
    Blind,
    Web,
}

impl SourceTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceTag::Glassdoor => "glassdoor",
            SourceTag::Reddit => "reddit",
            SourceTag::Geeksforgeeks => "geeksforgeeks",
            SourceTag::LeetcodeDiscuss => "leetcode_discuss",
            SourceTag::Blind => "blind",
            SourceTag::Web => "web",
        }
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One deduplicated, source-tagged search result. Identity is the URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub source: SourceTag,
    pub title: String,
    pub snippet: String,
    pub url: String,
}

/// Priority-ordered domain substrings for source tagging.
const DOMAIN_TAGS: &[(&str, SourceTag)] = &[
    ("glassdoor", SourceTag::Glassdoor),
    ("reddit.com", SourceTag::Reddit),
    ("geeksforgeeks", SourceTag::Geeksforgeeks),
    ("leetcode.com", SourceTag::LeetcodeDiscuss),
    ("teamblind", SourceTag::Blind),
    ("blind.com", SourceTag::Blind),
];

fn classify_source(url: &str) -> SourceTag {
    DOMAIN_TAGS
        .iter()
        .find(|(needle, _)| url.contains(needle))
        .map(|(_, tag)| *tag)
        .unwrap_or(SourceTag::Web)
}

/// The fixed query variants targeting known review and discussion sites.
fn build_queries(employer: &str, role: &str) -> Vec<String> {
    let base = format!("{employer} {role}").trim().to_string();

    vec![
        format!("{base} interview experience"),
        format!("{base} interview rounds"),
        format!("site:glassdoor.com {base} interview"),
        format!("site:reddit.com {employer} interview experience"),
        format!("site:geeksforgeeks.org {employer} interview experience"),
        format!("site:leetcode.com/discuss {employer} interview"),
        format!("{employer} {role} interview experience blog"),
    ]
}

/// Collects public interview signal for an (employer, role) pair.
///
/// Returns an empty list without issuing any query when both employer and
/// role are blank. Otherwise issues every query variant, drops hits missing
/// a title or snippet, and deduplicates by URL keeping the first occurrence
/// in query order.
pub async fn collect_findings(
    provider: &Arc<dyn SearchProvider>,
    employer: &str,
    role: &str,
) -> Vec<Finding> {
    if employer.trim().is_empty() && role.trim().is_empty() {
        return vec![];
    }

    let queries = build_queries(employer.trim(), role.trim());

    let handles: Vec<_> = queries
        .into_iter()
        .map(|query| {
            let provider = Arc::clone(provider);
            tokio::spawn(async move {
                match provider.search(&query, RESULTS_PER_QUERY).await {
                    Ok(hits) => hits,
                    Err(e) => {
                        warn!("search query {:?} failed, skipping: {e}", query);
                        vec![]
                    }
                }
            })
        })
        .collect();

    // Await in query order — first-seen dedup must not depend on which
    // request finished first.
    let mut seen_urls: HashSet<String> = HashSet::new();
    let mut findings: Vec<Finding> = Vec::new();

    for handle in handles {
        let hits = handle.await.unwrap_or_default();
        for hit in hits {
            if hit.title.is_empty() || hit.snippet.is_empty() {
                continue;
            }
            if hit.link.is_empty() || seen_urls.contains(&hit.link) {
                continue;
            }
            seen_urls.insert(hit.link.clone());
            findings.push(Finding {
                source: classify_source(&hit.link),
                title: hit.title,
                snippet: hit.snippet,
                url: hit.link,
            });
        }
    }

    info!(
        "aggregated {} unique findings for {:?} / {:?}",
        findings.len(),
        employer,
        role
    );

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Stub provider: returns canned hits keyed by a substring of the query,
    /// and counts how many queries were issued.
    struct StubSearch {
        responses: Vec<(&'static str, Vec<RawHit>)>,
        calls: AtomicUsize,
        fail_on: Option<&'static str>,
    }

    use crate::search::RawHit;

    impl StubSearch {
        fn new(responses: Vec<(&'static str, Vec<RawHit>)>) -> Self {
            Self {
                responses,
                calls: AtomicUsize::new(0),
                fail_on: None,
            }
        }

        fn failing_on(mut self, needle: &'static str) -> Self {
            self.fail_on = Some(needle);
            self
        }
    }

    #[async_trait]
    impl SearchProvider for StubSearch {
        async fn search(&self, query: &str, _limit: u8) -> Result<Vec<RawHit>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(needle) = self.fail_on {
                if query.contains(needle) {
                    return Err(anyhow!("simulated provider outage"));
                }
            }
            Ok(self
                .responses
                .iter()
                .filter(|(needle, _)| query.contains(needle))
                .flat_map(|(_, hits)| hits.clone())
                .collect())
        }
    }

    fn hit(title: &str, url: &str) -> RawHit {
        RawHit {
            title: title.to_string(),
            snippet: format!("snippet for {title}"),
            link: url.to_string(),
        }
    }

    #[test]
    fn test_classify_source_known_domains() {
        assert_eq!(
            classify_source("https://www.glassdoor.com/Interview/acme"),
            SourceTag::Glassdoor
        );
        assert_eq!(
            classify_source("https://www.reddit.com/r/cscareerquestions/abc"),
            SourceTag::Reddit
        );
        assert_eq!(
            classify_source("https://www.geeksforgeeks.org/acme-interview"),
            SourceTag::Geeksforgeeks
        );
        assert_eq!(
            classify_source("https://leetcode.com/discuss/interview/acme"),
            SourceTag::LeetcodeDiscuss
        );
        assert_eq!(
            classify_source("https://www.teamblind.com/post/acme"),
            SourceTag::Blind
        );
        assert_eq!(
            classify_source("https://someblog.dev/acme-interview"),
            SourceTag::Web
        );
    }

    #[test]
    fn test_classify_source_priority_order_first_match_wins() {
        // Contains both "glassdoor" and "reddit.com" — glassdoor is earlier
        // in the priority list.
        assert_eq!(
            classify_source("https://glassdoor.example/via?ref=reddit.com"),
            SourceTag::Glassdoor
        );
    }

    #[test]
    fn test_build_queries_has_site_scoped_variants() {
        let queries = build_queries("Acme", "Backend Engineer");
        assert_eq!(queries.len(), 7);
        assert!(queries.iter().any(|q| q.starts_with("site:glassdoor.com")));
        assert!(queries.iter().any(|q| q.starts_with("site:reddit.com")));
        assert!(queries
            .iter()
            .any(|q| q.starts_with("site:leetcode.com/discuss")));
    }

    #[tokio::test]
    async fn test_blank_inputs_short_circuit_without_queries() {
        let stub = Arc::new(StubSearch::new(vec![]));
        let provider: Arc<dyn SearchProvider> = stub.clone();

        let findings = collect_findings(&provider, "  ", "").await;

        assert!(findings.is_empty());
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_dedup_keeps_first_occurrence_in_query_order() {
        // The same URL surfaces in the generic query and the glassdoor query;
        // only the first occurrence (generic query, issued first) survives.
        let stub = Arc::new(StubSearch::new(vec![
            (
                "interview experience",
                vec![
                    hit("Acme interview write-up", "https://glassdoor.com/a"),
                    hit("Another post", "https://someblog.dev/b"),
                ],
            ),
            (
                "site:glassdoor.com",
                vec![hit("Duplicate write-up", "https://glassdoor.com/a")],
            ),
        ]));
        let provider: Arc<dyn SearchProvider> = stub;

        let findings = collect_findings(&provider, "Acme", "Backend Engineer").await;

        let urls: Vec<&str> = findings.iter().map(|f| f.url.as_str()).collect();
        assert_eq!(
            urls.iter().filter(|u| **u == "https://glassdoor.com/a").count(),
            1
        );
        assert_eq!(findings[0].title, "Acme interview write-up");
    }

    #[tokio::test]
    async fn test_failed_query_contributes_nothing() {
        let stub = Arc::new(
            StubSearch::new(vec![(
                "interview rounds",
                vec![hit("Rounds overview", "https://someblog.dev/rounds")],
            )])
            .failing_on("site:glassdoor.com"),
        );
        let provider: Arc<dyn SearchProvider> = stub;

        let findings = collect_findings(&provider, "Acme", "Backend Engineer").await;

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].url, "https://someblog.dev/rounds");
    }

    #[tokio::test]
    async fn test_hits_without_title_or_snippet_are_dropped() {
        let stub = Arc::new(StubSearch::new(vec![(
            "interview experience",
            vec![
                RawHit {
                    title: String::new(),
                    snippet: "snippet".to_string(),
                    link: "https://x.dev/1".to_string(),
                },
                RawHit {
                    title: "title".to_string(),
                    snippet: String::new(),
                    link: "https://x.dev/2".to_string(),
                },
                hit("Kept", "https://x.dev/3"),
            ],
        )]));
        let provider: Arc<dyn SearchProvider> = stub;

        let findings = collect_findings(&provider, "Acme", "Engineer").await;

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].url, "https://x.dev/3");
    }

    #[tokio::test]
    async fn test_identical_inputs_yield_identical_ordered_output() {
        let make_provider = || -> Arc<dyn SearchProvider> {
            Arc::new(StubSearch::new(vec![
                (
                    "interview experience",
                    vec![
                        hit("First", "https://a.dev/1"),
                        hit("Second", "https://b.dev/2"),
                    ],
                ),
                (
                    "site:reddit.com",
                    vec![hit("Third", "https://reddit.com/3")],
                ),
            ]))
        };

        let first = collect_findings(&make_provider(), "Acme", "Engineer").await;
        let second = collect_findings(&make_provider(), "Acme", "Engineer").await;

        assert_eq!(first, second);
        assert_eq!(first[0].url, "https://a.dev/1");
        assert_eq!(first[1].url, "https://b.dev/2");
    }
}
