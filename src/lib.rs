//! argmine: mines labeled argument pairs from hierarchical debate transcripts.
//!
//! A debate export is parsed into positioned, stance-tagged argument
//! records ([`parser`]), assembled into an arena-backed tree ([`arena`],
//! [`builder`]), and mined for training pairs: support/attack pairs along
//! parent/child edges and neutral pairs sampled within one tree or across
//! two ([`pairs`], [`sampler`]). [`mine_pairs`] runs the whole batch
//! pipeline; [`balance`] trims the label distribution afterwards.

pub mod arena;
pub mod balance;
pub mod builder;
pub mod corpus;
pub mod errors;
pub mod pairs;
pub mod parser;
pub mod sampler;

pub use arena::{Argument, DebateTree, Stance, TreeNode};
pub use balance::{balance, ScoredPair};
pub use builder::TreeBuilder;
pub use corpus::Transcript;
pub use errors::{MinerError, MinerResult};
pub use pairs::{edge_pairs, neutral_pairs, neutral_pairs_cross, PairRecord, Relation};
pub use parser::LineParser;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, instrument, warn};

/// Knobs for the batch pipeline.
#[derive(Debug, Clone)]
pub struct MinerConfig {
    /// Minimum combined depth for same-tree neutral pairs
    pub neutral_threshold: usize,
    /// Seed for the sampling RNG; unseeded runs are not reproducible
    pub seed: Option<u64>,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            neutral_threshold: 10,
            seed: None,
        }
    }
}

/// Mines pair records from a batch of tagged transcripts.
///
/// Per transcript: edge pairs, then same-tree neutrals (as many as the
/// tree has nodes), then cross-tree neutrals against the previous
/// transcript's tree (as many as the larger of the two). Malformed
/// transcripts are logged and skipped; a failed cross-tree sampling call
/// drops only that batch. Only the current and previous trees are kept
/// alive at any point.
#[instrument(skip(entries, config), fields(n_transcripts = entries.len()))]
pub fn mine_pairs(entries: &[(Transcript, String)], config: &MinerConfig) -> Vec<PairRecord> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let parser = LineParser::new();
    let builder = TreeBuilder::new();

    let mut records = Vec::new();
    let mut prev: Option<(DebateTree, String)> = None;

    for (transcript, domain) in entries {
        let tree = match parser
            .parse(&transcript.lines, &transcript.subject)
            .and_then(|args| builder.build(args, &transcript.subject))
        {
            Ok(tree) => tree,
            Err(err) => {
                warn!(subject = %transcript.subject, %err, "skipping transcript");
                continue;
            }
        };
        debug!(subject = %transcript.subject, nodes = tree.node_count(), "tree built");

        records.extend(edge_pairs(&tree, domain));

        let same = sampler::sample_same_tree(
            &tree,
            config.neutral_threshold,
            tree.node_count(),
            &mut rng,
        );
        records.extend(neutral_pairs(&tree, &same, domain));

        if let Some((prev_tree, prev_domain)) = &prev {
            let n = tree.node_count().max(prev_tree.node_count());
            match sampler::sample_cross(&tree, prev_tree, n, &mut rng) {
                Ok(cross) => records.extend(neutral_pairs_cross(
                    &tree,
                    prev_tree,
                    &cross,
                    domain,
                    Some(prev_domain.as_str()),
                )),
                Err(err) => {
                    warn!(subject = %tree.subject(), %err, "skipping cross-tree batch");
                }
            }
        }

        prev = Some((tree, domain.clone()));
    }

    records
}
