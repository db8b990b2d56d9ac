//! Splits a brief's articles into bullish, bearish and neutral columns.

use crate::types::{Article, Stance};

/// Articles grouped by stance, each bucket in input order.
#[derive(Debug, Default, PartialEq)]
pub struct SentimentPartition<'a> {
    pub bullish: Vec<&'a Article>,
    pub bearish: Vec<&'a Article>,
    pub neutral: Vec<&'a Article>,
    /// Articles whose stance matched none of the canonical values. They
    /// appear in no bucket.
    pub unrecognized: usize,
}

impl SentimentPartition<'_> {
    /// Number of articles placed in a bucket.
    #[must_use]
    pub fn classified_len(&self) -> usize {
        self.bullish.len() + self.bearish.len() + self.neutral.len()
    }
}

/// Partition `articles` by `sentiment.stance`.
///
/// The partition is stable and the buckets are disjoint. Unknown stances are
/// counted in [`SentimentPartition::unrecognized`] and otherwise dropped.
#[must_use]
pub fn partition_articles(articles: &[Article]) -> SentimentPartition<'_> {
    let mut partition = SentimentPartition::default();
    for article in articles {
        match article.stance() {
            Some(Stance::Positive) => partition.bullish.push(article),
            Some(Stance::Negative) => partition.bearish.push(article),
            Some(Stance::Neutral) => partition.neutral.push(article),
            None => partition.unrecognized += 1,
        }
    }
    partition
}
