use std::collections::HashSet;
use std::fmt;
use std::time::Duration;
use actix_web::http::StatusCode;
use futures_util::future::LocalBoxFuture;
use log::{debug, info, warn};
use serde::Deserialize;
use crate::utils::{capitalize, char_len, encode_path_segment, is_alphabetic_ignoring_spaces};

pub const DEFAULT_API_BASE: &str = "http://api.conceptnet.io";

pub const MIN_WORD_LEN: usize = 3;
pub const MAX_WORD_LEN: usize = 25;
pub const MAX_WORDS: usize = 100;
/// Below this many words the secondary language is queried too
pub const FALLBACK_THRESHOLD: usize = 30;

/// Category terms that make a candidate useless for the game
pub const DENYLIST: [&str; 6] = ["cor", "color", "número", "numero", "numeral", "quantidade"];

const PRIMARY_LANG: &str = "pt";
const FALLBACK_LANG: &str = "en";

const PRIMARY_RELATIONS: [(Relation, usize); 4] = [
    (Relation::RelatedTo, 100),
    (Relation::Synonym, 50),
    (Relation::IsA, 50),
    (Relation::PartOf, 50),
];

const FALLBACK_RELATIONS: [(Relation, usize); 2] = [
    (Relation::RelatedTo, 50),
    (Relation::Synonym, 30),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    RelatedTo,
    Synonym,
    IsA,
    PartOf,
}

impl Relation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::RelatedTo => "RelatedTo",
            Relation::Synonym => "Synonym",
            Relation::IsA => "IsA",
            Relation::PartOf => "PartOf",
        }
    }
}

/// One page of ConceptNet edges
#[derive(Debug, Default, Deserialize)]
pub struct EdgePage {
    #[serde(default)]
    pub edges: Vec<Edge>,
}

#[derive(Debug, Deserialize)]
pub struct Edge {
    pub start: EdgeNode,
    pub end: EdgeNode,
}

#[derive(Debug, Deserialize)]
pub struct EdgeNode {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug)]
pub enum FetchError {
    Transport(String),
    Status(StatusCode),
    Decode(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Transport(e) => write!(f, "request failed: {}", e),
            FetchError::Status(status) => write!(f, "unexpected status {}", status),
            FetchError::Decode(e) => write!(f, "invalid response body: {}", e),
        }
    }
}

impl std::error::Error for FetchError {}

/// Anything that can answer a ConceptNet path (e.g. `/c/pt/gato`) with a page of edges
pub trait EdgeSource {
    fn get_edges<'a>(&'a self, path: &'a str) -> LocalBoxFuture<'a, Result<EdgePage, FetchError>>;
}

/// ConceptNet over HTTP. Built per worker since `awc::Client` is not `Send`.
pub struct ConceptNetClient {
    client: awc::Client,
    base_url: String,
}

impl ConceptNetClient {
    // Edge pages with 100 entries are a few hundred KiB
    const BODY_LIMIT: usize = 8 * 1024 * 1024;

    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = awc::Client::builder()
            .timeout(timeout)
            .finish();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl EdgeSource for ConceptNetClient {
    fn get_edges<'a>(&'a self, path: &'a str) -> LocalBoxFuture<'a, Result<EdgePage, FetchError>> {
        Box::pin(async move {
            let url = format!("{}{}", self.base_url, path);
            debug!("GET {}", url);

            let mut response = self.client
                .get(url.as_str())
                .insert_header(("Accept", "application/json"))
                .send()
                .await
                .map_err(|e| FetchError::Transport(e.to_string()))?;

            if !response.status().is_success() {
                return Err(FetchError::Status(response.status()));
            }

            response
                .json::<EdgePage>()
                .limit(Self::BODY_LIMIT)
                .await
                .map_err(|e| FetchError::Decode(e.to_string()))
        })
    }
}

/// Filtered, deduplicated word collection that remembers insertion order
#[derive(Debug, Default)]
struct WordCollector {
    words: Vec<String>,
    seen: HashSet<String>,
}

impl WordCollector {
    /// Add the candidate if it passes every filter; returns whether it was kept
    fn offer(&mut self, candidate: &str) -> bool {
        if !is_candidate_word(candidate) || self.seen.contains(candidate) {
            return false;
        }
        self.seen.insert(candidate.to_string());
        self.words.push(candidate.to_string());
        true
    }

    fn len(&self) -> usize {
        self.words.len()
    }

    fn finish(self) -> RelatedWordSet {
        let mut words = self.words;
        words.sort_by_key(|w| char_len(w));
        words.truncate(MAX_WORDS);
        RelatedWordSet { words }
    }
}

/// Alphabetic (spaces aside), 3 to 25 characters long, and free of denylisted terms
pub fn is_candidate_word(word: &str) -> bool {
    let len = char_len(word);
    if !(MIN_WORD_LEN..=MAX_WORD_LEN).contains(&len) {
        return false;
    }
    if !is_alphabetic_ignoring_spaces(word) {
        return false;
    }
    let lowered = word.to_lowercase();
    !DENYLIST.iter().any(|term| lowered.contains(term))
}

/// Words related to a seed, shortest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelatedWordSet {
    words: Vec<String>,
}

impl RelatedWordSet {
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn into_words(self) -> Vec<String> {
        self.words
    }
}

/// Seed as it appears inside ConceptNet node ids (`cão de guarda` -> `cão_de_guarda`)
fn node_term(seed: &str) -> String {
    seed.trim().to_lowercase().replace(' ', "_")
}

fn node_id(lang: &str, term: &str) -> String {
    format!("/c/{}/{}", lang, term)
}

fn concept_path(lang: &str, term: &str) -> String {
    format!("/c/{}/{}", lang, encode_path_segment(term))
}

fn query_path(lang: &str, term: &str, relation: Relation, limit: usize) -> String {
    format!(
        "/query?node=/c/{}/{}&rel=/r/{}&limit={}",
        lang,
        encode_path_segment(term),
        relation.as_str(),
        limit
    )
}

/// Label on the far side of the edge from the seed node, lowercased
fn far_label<'e>(edge: &'e Edge, node: &str) -> String {
    let label: &'e str = if edge.start.id.contains(node) {
        &edge.end.label
    } else {
        &edge.start.label
    };
    label.to_lowercase()
}

pub struct RelatedWordFetcher {
    source: Box<dyn EdgeSource>,
}

impl RelatedWordFetcher {
    pub fn new(source: Box<dyn EdgeSource>) -> Self {
        Self { source }
    }

    /// Related words for `seed`. An empty result means nothing could be fetched,
    /// not that the seed has no relations.
    pub async fn fetch_related(&self, seed: &str) -> Vec<String> {
        match self.collect(seed).await {
            Ok(set) if set.is_empty() => {
                info!("No usable words for '{}'", seed.trim());
                Vec::new()
            }
            Ok(set) => {
                info!("Fetched {} related words for '{}'", set.len(), seed.trim());
                set.into_words()
            }
            Err(e) => {
                warn!("Failed to fetch related words for '{}': {}", seed.trim(), e);
                Vec::new()
            }
        }
    }

    async fn collect(&self, seed: &str) -> Result<RelatedWordSet, FetchError> {
        let seed = seed.trim();
        let term = node_term(seed);
        let mut collector = WordCollector::default();

        collector.offer(&seed.to_lowercase());
        collector.offer(&seed.to_uppercase());
        collector.offer(&capitalize(seed));

        let mut primary = vec![concept_path(PRIMARY_LANG, &term)];
        primary.extend(
            PRIMARY_RELATIONS.iter()
                .map(|&(relation, limit)| query_path(PRIMARY_LANG, &term, relation, limit)),
        );

        let node = node_id(PRIMARY_LANG, &term);
        for path in &primary {
            let page = self.source.get_edges(path).await?;
            self.absorb(&mut collector, &page, &node);
        }

        if collector.len() < FALLBACK_THRESHOLD {
            info!(
                "Only {} words for '{}', querying '{}' relations",
                collector.len(), seed, FALLBACK_LANG
            );
            let node = node_id(FALLBACK_LANG, &term);
            for &(relation, limit) in FALLBACK_RELATIONS.iter() {
                let path = query_path(FALLBACK_LANG, &term, relation, limit);
                match self.source.get_edges(&path).await {
                    Ok(page) => self.absorb(&mut collector, &page, &node),
                    Err(FetchError::Status(status)) => {
                        warn!("Skipping {} ({})", path, status);
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        Ok(collector.finish())
    }

    fn absorb(&self, collector: &mut WordCollector, page: &EdgePage, node: &str) {
        let kept = page.edges.iter()
            .filter(|edge| collector.offer(&far_label(edge, node)))
            .count();
        debug!("Kept {} of {} edges", kept, page.edges.len());
    }
}
