//! Prefix expansion over the autocomplete endpoint.
//!
//! Every 1- and 2-character prefix drawn from the alphabet is queried. When a
//! query returns suggestions, the term is extended by repeating its first
//! character and queried again, until a query comes back empty.

use std::collections::VecDeque;
use std::future::Future;

use tracing::{debug, info, warn};

use super::client::StationCandidate;
use super::error::StationError;
use super::group::{CountryGroup, process};

/// Digits followed by the lowercase Cyrillic alphabet.
pub const DEFAULT_ALPHABET: &str = "1234567890абвгдеёжзийклмнопрстуфхцчшщъыьэюя";

/// Trait for answering autocomplete queries.
///
/// This abstraction allows the expander to be tested with mock data.
/// Implementations may use `async fn`; the returned future must be `Send`.
pub trait AutocompleteSource {
    /// Return every suggestion for `term`.
    fn search(
        &self,
        term: &str,
    ) -> impl Future<Output = Result<Vec<StationCandidate>, StationError>> + Send;
}

/// Ordered set of characters used to build root prefixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet(Vec<char>);

impl Alphabet {
    /// Build an alphabet from the characters of `chars`, in order.
    pub fn new(chars: &str) -> Self {
        Self(chars.chars().collect())
    }

    /// Characters in order.
    pub fn chars(&self) -> &[char] {
        &self.0
    }

    /// Number of characters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the alphabet has no characters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHABET)
    }
}

/// Root prefixes in visiting order: `a`, then `a` followed by every letter,
/// for each letter `a` of the alphabet.
pub fn root_prefixes(alphabet: &Alphabet) -> Vec<String> {
    let chars = alphabet.chars();
    let mut prefixes = Vec::with_capacity(chars.len() * (chars.len() + 1));

    for &first in chars {
        prefixes.push(first.to_string());
        for &second in chars {
            prefixes.push([first, second].iter().collect());
        }
    }

    prefixes
}

/// Drives prefix expansion against an [`AutocompleteSource`].
///
/// Queries are issued strictly one at a time.
pub struct PrefixExpander<'a, S: AutocompleteSource> {
    source: &'a S,
    max_depth: Option<usize>,
    queries_issued: usize,
}

impl<'a, S: AutocompleteSource> PrefixExpander<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            max_depth: None,
            queries_issued: 0,
        }
    }

    /// Cap the number of extensions per root prefix.
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Number of autocomplete queries issued so far.
    pub fn queries_issued(&self) -> usize {
        self.queries_issued
    }

    /// Expand a single prefix.
    ///
    /// Returns the suggestions for `prefix` followed by those of each longer
    /// term, stopping at the first empty response. An empty prefix issues
    /// no query.
    pub async fn expand(&mut self, prefix: &str) -> Result<Vec<StationCandidate>, StationError> {
        let Some(first) = prefix.chars().next() else {
            return Ok(Vec::new());
        };

        let mut term = prefix.to_string();
        let mut results = Vec::new();
        let mut depth = 0;

        loop {
            self.queries_issued += 1;
            let batch = self.source.search(&term).await?;
            debug!(term = %term, results = batch.len(), "autocomplete query");

            if batch.is_empty() {
                break;
            }
            results.extend(batch);

            if self.max_depth.is_some_and(|max| depth >= max) {
                warn!(term = %term, depth, "prefix expansion depth cap reached");
                break;
            }

            term.push(first);
            depth += 1;
        }

        Ok(results)
    }

    /// Expand every root prefix of `alphabet`, in order.
    ///
    /// The first failing query aborts the run.
    pub async fn discover(
        &mut self,
        alphabet: &Alphabet,
    ) -> Result<Vec<StationCandidate>, StationError> {
        let mut pending: VecDeque<String> = root_prefixes(alphabet).into();
        let mut results = Vec::new();

        while let Some(prefix) = pending.pop_front() {
            let found = self.expand(&prefix).await?;
            results.extend(found);
        }

        Ok(results)
    }
}

/// Run the whole station discovery pipeline.
///
/// Expands every root prefix, then deduplicates, sorts and groups the
/// suggestions by country.
pub async fn discover_stations<S: AutocompleteSource>(
    source: &S,
    alphabet: &Alphabet,
    max_depth: Option<usize>,
) -> Result<Vec<CountryGroup>, StationError> {
    let mut expander = PrefixExpander::new(source).with_max_depth(max_depth);
    let raw = expander.discover(alphabet).await?;
    let raw_count = raw.len();

    let groups = process(raw);
    let unique: usize = groups.iter().map(|g| g.stations.len()).sum();

    info!(
        queries = expander.queries_issued(),
        raw = raw_count,
        unique,
        groups = groups.len(),
        "station discovery complete"
    );

    Ok(groups)
}
