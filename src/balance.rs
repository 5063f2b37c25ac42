//! Label balancing: trims the neutral surplus down to the support/attack mass.

use crate::pairs::{PairRecord, Relation};

/// A pair record annotated with the cosine similarity computed by the
/// external embedding stage. Lower similarity means more plausibly
/// neutral.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPair {
    pub record: PairRecord,
    pub similarity: f32,
}

/// Balances the label distribution of a mined corpus.
///
/// All support and attack records are kept. Neutrals are capped at half
/// the support+attack mass, split evenly between same-tree and
/// cross-tree records, keeping the most dissimilar (lowest similarity)
/// pairs first.
pub fn balance(scored: Vec<ScoredPair>) -> Vec<PairRecord> {
    let mut support = Vec::new();
    let mut attack = Vec::new();
    let mut neutral_same = Vec::new();
    let mut neutral_cross = Vec::new();

    for pair in scored {
        match pair.record.relation {
            Relation::Support => support.push(pair.record),
            Relation::Attack => attack.push(pair.record),
            Relation::Neutral if pair.record.same_tree => neutral_same.push(pair),
            Relation::Neutral => neutral_cross.push(pair),
        }
    }

    let target_neutral = (support.len() + attack.len()) / 2;
    for bucket in [&mut neutral_same, &mut neutral_cross] {
        bucket.sort_by(|a, b| a.similarity.total_cmp(&b.similarity));
        bucket.truncate(target_neutral / 2);
    }

    let mut balanced = support;
    balanced.extend(attack);
    balanced.extend(neutral_same.into_iter().map(|p| p.record));
    balanced.extend(neutral_cross.into_iter().map(|p| p.record));
    balanced
}
