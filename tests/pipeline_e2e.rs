// tests/pipeline_e2e.rs
//
// End-to-end runs of the filtering pipeline against the repo's category table
// (config/categories.toml). Expected scores are worked out by hand below.

use std::path::Path;
use std::sync::Arc;

use lead_relevance_filter::keywords::{CategoryKeywords, NoEnhancement};
use lead_relevance_filter::summary::BatchSummarizer;
use lead_relevance_filter::{Document, FilterConfig, FilterPipeline, Lead};

const PROBLEM: &str = "getting first clients";

fn categories() -> Arc<CategoryKeywords> {
    Arc::new(
        CategoryKeywords::load_from(Path::new("config/categories.toml"))
            .expect("load repo category table"),
    )
}

fn post(title: &str, content: &str, permalink: &str) -> Document {
    Document {
        title: title.into(),
        content: content.into(),
        subreddit: "consulting".into(),
        permalink: permalink.into(),
        author: "someone".into(),
        created_utc: 1_700_000_000,
        score: 3,
    }
}

fn sample_posts() -> Vec<Document> {
    vec![
        // client + consultant (6) + struggling, stuck, first client, any advice (8) + "first" (1) = 15
        post(
            "Struggling to land my first client as a consultant",
            "I've been stuck for months. Any advice?",
            "/a",
        ),
        // nothing matches = 0
        post("Weekly showcase thread", "Share what you built this week!", "/b"),
        // client (via "clients") + referral (6) + looking for (2) + "clients" (1) = 9
        post(
            "Referral program ideas?",
            "Looking for ways to get clients through referral partners.",
            "/c",
        ),
        // proposal + retainer (6) + help, need help, how to (6) + "first" (1) = 13
        post(
            "Need help writing a proposal",
            "How to price my first retainer?",
            "/d",
        ),
        // client (3) + help, lost (4) = 7, but malformed: skipped at lead construction
        Document {
            created_utc: -1,
            ..post("Help! Lost my biggest client", "", "/e")
        },
        // consulting (3) = 3, below threshold
        post("Consulting rates", "", "/f"),
    ]
}

fn pipeline() -> FilterPipeline {
    FilterPipeline::new(&FilterConfig::default(), categories(), Arc::new(NoEnhancement))
}

#[test]
fn ranks_filters_and_summarizes_realistic_batch() {
    let p = pipeline();
    let docs = sample_posts();
    let (leads, metrics) = p.filter_posts(&docs, PROBLEM, "consulting", None);

    let got: Vec<(&str, u32)> = leads
        .iter()
        .map(|l| (l.permalink.as_str(), l.ai_relevance_score))
        .collect();
    assert_eq!(got, vec![("/a", 15), ("/d", 13), ("/c", 9)]);

    assert_eq!(metrics.posts_analyzed, 6);
    assert_eq!(metrics.posts_filtered, 4);
    assert_eq!(metrics.results_returned, 3);
    assert_eq!(metrics.summaries_generated, 3);
    assert_eq!(metrics.filter_method, "rule_based");
    assert_eq!(metrics.summary_method, "lexical");

    assert_eq!(
        leads[0].ai_summary,
        "Post about first - Struggling to land my first client as a consultant..."
    );
    assert_eq!(
        leads[1].ai_summary,
        "Post about getting first clients - Need help writing a proposal..."
    );
    for lead in &leads {
        assert!(lead.ai_summary.contains(&lead.title));
        assert_eq!(lead.business_context, "consulting");
        assert_eq!(lead.problem_category, "General");
    }

    assert_eq!(p.last_metrics(), Some(metrics));
}

#[test]
fn inputs_are_not_mutated() {
    let p = pipeline();
    let docs = sample_posts();
    let before = docs.clone();
    let _ = p.filter_posts(&docs, PROBLEM, "consulting", None);
    assert_eq!(docs, before);
}

#[test]
fn industry_keywords_add_to_business_keywords() {
    let p = pipeline();
    let docs = vec![post("New dental clinic, zero patients", "", "/g")];

    // consulting alone: nothing matches
    assert!(p.filter_posts(&docs, "x", "consulting", None).0.is_empty());

    // + healthcare: clinic, patient, dental = 9
    let (leads, _) = p.filter_posts(&docs, "x", "consulting", Some("healthcare"));
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].ai_relevance_score, 9);
}

#[test]
fn long_content_becomes_bounded_snippet() {
    let p = pipeline();
    let body = format!("I need help finding a client. {}", "details ".repeat(60));
    let docs = vec![post("Consultant here", &body, "/h")];
    let (leads, _) = p.filter_posts(&docs, PROBLEM, "consulting", None);
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].snippet.chars().count(), 203);
    assert!(leads[0].snippet.ends_with("..."));
    assert!(body.starts_with(leads[0].snippet.trim_end_matches("...")));
}

struct TitleEcho;

impl BatchSummarizer for TitleEcho {
    fn summarize_batch(&self, leads: &[Lead], problem: &str) -> anyhow::Result<Vec<String>> {
        Ok(leads
            .iter()
            .map(|l| format!("{} (re: {problem})", l.title))
            .collect())
    }

    fn name(&self) -> &'static str {
        "title_echo"
    }
}

struct Unreachable;

impl BatchSummarizer for Unreachable {
    fn summarize_batch(&self, _: &[Lead], _: &str) -> anyhow::Result<Vec<String>> {
        anyhow::bail!("connection refused")
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}

#[test]
fn batch_summarizer_replaces_lexical_summaries() {
    let p = pipeline().with_summarizer(Arc::new(TitleEcho));
    let docs = sample_posts();
    let (leads, metrics) = p.filter_posts(&docs, PROBLEM, "consulting", None);
    assert_eq!(metrics.summary_method, "title_echo");
    assert_eq!(metrics.summaries_generated, 3);
    assert_eq!(
        leads[2].ai_summary,
        "Referral program ideas? (re: getting first clients)"
    );
}

#[test]
fn failing_summarizer_keeps_leads_with_fallback_summaries() {
    let p = pipeline().with_summarizer(Arc::new(Unreachable));
    let docs = sample_posts();
    let outcome = p.run(&docs, PROBLEM, "consulting", None);
    assert!(!outcome.is_degraded());
    let (leads, metrics) = outcome.into_parts();
    assert_eq!(leads.len(), 3);
    assert_eq!(metrics.summary_method, "fallback");
    assert_eq!(metrics.summaries_generated, 0);
    assert_eq!(
        leads[0].ai_summary,
        "Post about getting first clients - Struggling to land my first client as a consultant..."
    );
}

#[test]
fn empty_batch_never_fails() {
    let p = pipeline();
    let (leads, metrics) = p.filter_posts(&[], PROBLEM, "consulting", None);
    assert!(leads.is_empty());
    assert_eq!(metrics.posts_analyzed, 0);
    assert_eq!(metrics.results_returned, 0);
}
