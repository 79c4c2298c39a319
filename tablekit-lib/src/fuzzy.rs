//! Fuzzy name search: nucleo-matcher subsequence scoring plus a typo-tolerant
//! substring distance from strsim.

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str, Utf32String};

use crate::error::FieldError;
use crate::model::{Dataset, Field, FieldKind, Record};

/// A scored hit from [`FuzzyIndex::matches`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatch {
    /// Index of the record in the dataset.
    pub index: usize,
    /// Raw subsequence matcher score (higher is better), 0 for hits found
    /// only through typo tolerance.
    pub score: u32,
    /// 0.0 for an exact hit, up to the index threshold.
    pub distance: f64,
}

/// Approximate text search over one field of a dataset.
///
/// Built once; haystacks are converted up front. If the dataset changes the
/// index must be rebuilt.
///
/// Each candidate gets two distances and keeps the smaller:
///
/// - a fuzzy subsequence score, normalised against the score the query earns
///   on itself, which tolerates gaps and skipped characters;
/// - the fewest typos (insertions, deletions, substitutions, adjacent
///   transpositions) turning the query into some substring of the haystack,
///   divided by the query length, so substrings anywhere in the text are
///   distance 0 and "labtop" is one typo away from "Laptop".
///
/// Hits whose distance exceeds the threshold are dropped.
#[derive(Debug, Clone)]
pub struct FuzzyIndex {
    dataset: Dataset,
    field: Field,
    threshold: f64,
    haystacks: Vec<Utf32String>,
    folded: Vec<Vec<char>>,
}

impl FuzzyIndex {
    pub const DEFAULT_THRESHOLD: f64 = 0.3;

    /// Indexes the `name` field with the default threshold.
    pub fn new(dataset: &Dataset) -> Self {
        Self::build(dataset, Field::Name, Self::DEFAULT_THRESHOLD)
    }

    /// Indexes the `name` field with a custom threshold (clamped to `0.0..=1.0`).
    pub fn with_threshold(dataset: &Dataset, threshold: f64) -> Self {
        Self::build(dataset, Field::Name, threshold)
    }

    /// Indexes an arbitrary text field.
    pub fn for_field(dataset: &Dataset, field: Field, threshold: f64) -> Result<Self, FieldError> {
        if field.kind() != FieldKind::Text {
            return Err(FieldError::type_mismatch(
                field.name(),
                FieldKind::Text.as_str(),
                field.kind().as_str(),
            ));
        }
        Ok(Self::build(dataset, field, threshold))
    }

    fn build(dataset: &Dataset, field: Field, threshold: f64) -> Self {
        let texts: Vec<String> = dataset
            .iter()
            .map(|record| field.value(record).to_string())
            .collect();
        Self {
            dataset: dataset.clone(),
            field,
            threshold: threshold.clamp(0.0, 1.0),
            haystacks: texts.iter().map(|t| Utf32String::from(t.as_str())).collect(),
            folded: texts.iter().map(|t| fold(t)).collect(),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Scores every record against `query`, best first.
    ///
    /// A blank query matches every record with distance 0, in dataset order.
    pub fn matches(&self, query: &str) -> Vec<FuzzyMatch> {
        let query = query.trim();
        if query.is_empty() {
            return (0..self.haystacks.len())
                .map(|index| FuzzyMatch {
                    index,
                    score: 0,
                    distance: 0.0,
                })
                .collect();
        }

        let mut matcher = Matcher::new(Config::DEFAULT);
        let pattern = Pattern::new(
            query,
            CaseMatching::Ignore,
            Normalization::Smart,
            AtomKind::Fuzzy,
        );

        let mut buf = Vec::new();
        let best = pattern
            .score(Utf32Str::new(query, &mut buf), &mut matcher)
            .unwrap_or(0);
        let needle = fold(query);

        let mut matches: Vec<FuzzyMatch> = self
            .haystacks
            .iter()
            .zip(&self.folded)
            .enumerate()
            .filter_map(|(index, (haystack, folded))| {
                let score = pattern.score(haystack.slice(..), &mut matcher);
                let fuzzy = score.map(|score| {
                    if best == 0 {
                        0.0
                    } else {
                        1.0 - (f64::from(score.min(best)) / f64::from(best))
                    }
                });
                let distance = match (fuzzy, typo_distance(&needle, folded, self.threshold)) {
                    (Some(a), Some(b)) => a.min(b),
                    (Some(d), None) | (None, Some(d)) => d,
                    (None, None) => return None,
                };
                (distance <= self.threshold).then_some(FuzzyMatch {
                    index,
                    score: score.unwrap_or(0),
                    distance,
                })
            })
            .collect();

        // Stable: equal hits keep dataset order
        matches.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then_with(|| b.score.cmp(&a.score))
        });

        log::trace!(
            "Fuzzy query {:?} on '{}': {} of {} records within {}",
            query,
            self.field,
            matches.len(),
            self.haystacks.len(),
            self.threshold
        );
        matches
    }

    /// Records matching `query`, best match first. A blank query returns the
    /// whole dataset unfiltered.
    pub fn search(&self, query: &str) -> Vec<&Record> {
        let records = self.dataset.records();
        self.matches(query)
            .into_iter()
            .map(|m| &records[m.index])
            .collect()
    }
}

fn fold(text: &str) -> Vec<char> {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Typos per query character between `needle` and its closest window of
/// `haystack`, or `None` if more than `threshold` would be needed.
///
/// Windows are one character shorter or longer than the needle to leave room
/// for a dropped or doubled letter.
fn typo_distance(needle: &[char], haystack: &[char], threshold: f64) -> Option<f64> {
    if needle.is_empty() || haystack.is_empty() {
        return None;
    }
    let allowed = (threshold * needle.len() as f64).floor() as usize;
    let shortest = needle.len().saturating_sub(allowed.min(1)).max(1);
    let longest = needle.len() + allowed.min(1);

    let mut fewest = usize::MAX;
    for width in shortest..=longest {
        let width = width.min(haystack.len());
        for window in haystack.windows(width) {
            fewest = fewest.min(strsim::generic_damerau_levenshtein(needle, window));
            if fewest == 0 {
                return Some(0.0);
            }
        }
    }
    (fewest <= allowed).then_some(fewest as f64 / needle.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset::new(vec![
            Record::new("1", "Wireless Mouse"),
            Record::new("2", "Laptop Stand"),
            Record::new("3", "Laptop"),
            Record::new("4", "Desk Lamp"),
        ])
    }

    fn ids(records: &[&Record]) -> Vec<String> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_empty_query_returns_all_in_order() {
        let index = FuzzyIndex::new(&dataset());
        assert_eq!(ids(&index.search("")), vec!["1", "2", "3", "4"]);
        assert_eq!(ids(&index.search("   ")), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_exact_name_matches() {
        let index = FuzzyIndex::new(&dataset());
        let hits = ids(&index.search("Desk Lamp"));
        assert_eq!(hits.first().map(String::as_str), Some("4"));
    }

    #[test]
    fn test_prefix_is_case_insensitive() {
        let index = FuzzyIndex::new(&dataset());
        let hits = ids(&index.search("laptop"));
        assert!(hits.contains(&"2".to_string()));
        assert!(hits.contains(&"3".to_string()));
        assert!(!hits.contains(&"1".to_string()));
    }

    #[test]
    fn test_mid_word_substring_matches() {
        let dataset = Dataset::new(vec![
            Record::new("1", "Laptop"),
            Record::new("2", "Desk Lamp"),
            Record::new("3", "Wireless Mouse"),
            Record::new("4", "Smartphone"),
        ]);
        let index = FuzzyIndex::new(&dataset);
        assert_eq!(ids(&index.search("phone")), vec!["4"]);
        assert_eq!(ids(&index.search("top")), vec!["1"]);
        assert_eq!(ids(&index.search("ouse")), vec!["3"]);
        assert!(index.matches("phone")[0].distance < 0.01);
    }

    #[test]
    fn test_single_typo_matches() {
        let dataset = Dataset::new(vec![
            Record::new("1", "Laptop"),
            Record::new("2", "Desk Lamp"),
            Record::new("3", "Wireless Mouse"),
            Record::new("4", "Smartphone"),
        ]);
        let index = FuzzyIndex::new(&dataset);
        // substitution
        assert_eq!(ids(&index.search("labtop")), vec!["1"]);
        // transposition
        assert_eq!(ids(&index.search("laptpo")), vec!["1"]);
        assert_eq!(ids(&index.search("mosue")), vec!["3"]);
        // two typos in six letters is too many
        assert!(index.search("lbpbop").is_empty());
    }

    #[test]
    fn test_exact_hits_rank_before_typos() {
        let dataset = Dataset::new(vec![Record::new("1", "Lamp Stand"), Record::new("2", "Lamb")]);
        let index = FuzzyIndex::new(&dataset);
        assert_eq!(ids(&index.search("lamb")), vec!["2", "1"]);
    }

    #[test]
    fn test_no_matches() {
        let index = FuzzyIndex::new(&dataset());
        assert!(index.search("xyzzy").is_empty());
    }

    #[test]
    fn test_full_threshold_accepts_every_subsequence_match() {
        let strict = FuzzyIndex::with_threshold(&dataset(), 0.0);
        let loose = FuzzyIndex::with_threshold(&dataset(), 1.0);
        assert!(loose.search("lp").len() >= strict.search("lp").len());
        for m in loose.matches("lp") {
            assert!((0.0..=1.0).contains(&m.distance));
        }
    }

    #[test]
    fn test_non_text_field_rejected() {
        assert!(FuzzyIndex::for_field(&dataset(), Field::Price, 0.3).is_err());
        assert!(FuzzyIndex::for_field(&dataset(), Field::Category, 0.3).is_ok());
    }
}
