//! Neutral-pair sampling: node pairs with no direct argumentative relation.
//!
//! Same-tree pairs must sit in different top-level branches (only the root
//! as common ancestor) and be deep enough combined; cross-tree pairs are
//! neutral by construction. All randomness flows through an explicit
//! caller-supplied generator so tests can seed it.

use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::instrument;

use crate::arena::DebateTree;
use crate::errors::{MinerError, MinerResult};

/// Attempt budget for single-pair rejection sampling.
const ATTEMPT_LIMIT: usize = 1000;

/// Same-tree neutrality predicate: distinct nodes, root as the only
/// common ancestor, and a combined depth of at least `threshold`.
///
/// The depth check sums the precomputed `level` fields rather than
/// walking the tree; an earlier version of the corpus used the true
/// walking distance and was replaced by this approximation.
pub fn is_neutral(tree: &DebateTree, path1: &str, path2: &str, threshold: usize) -> bool {
    if path1 == path2 {
        return false;
    }
    if tree.common_ancestor_count(path1, path2) != 1 {
        return false;
    }
    match (tree.node_by_path(path1), tree.node_by_path(path2)) {
        (Some(n1), Some(n2)) => n1.data.level + n2.data.level >= threshold,
        _ => false,
    }
}

/// Cross product of node paths over every pair of distinct top-level
/// branches. Pairs within one branch share an ancestor below the root
/// and are never candidates.
fn branch_cross_product(tree: &DebateTree) -> Vec<(String, String)> {
    let branches = tree.branches();
    let mut candidates = Vec::new();
    for (b1, b2) in branches.iter().tuple_combinations() {
        candidates.extend(
            b1.iter()
                .cartesian_product(b2.iter())
                .map(|(n1, n2)| (n1.clone(), n2.clone())),
        );
    }
    candidates
}

/// Exhaustively enumerates every same-tree neutral pair.
///
/// Worst case is quadratic in tree size; prefer [`sample_same_tree`] for
/// large trees.
#[instrument(level = "debug", skip(tree), fields(subject = tree.subject()))]
pub fn all_same_tree(tree: &DebateTree, threshold: usize) -> Vec<(String, String)> {
    branch_cross_product(tree)
        .into_iter()
        .filter(|(n1, n2)| is_neutral(tree, n1, n2, threshold))
        .collect()
}

/// Draws up to `n` same-tree neutral pairs.
///
/// The candidate list is shuffled once, then popped and tested from the
/// end until `n` pairs are accepted or candidates run out; a shortfall
/// returns fewer pairs rather than an error.
#[instrument(level = "debug", skip(tree, rng), fields(subject = tree.subject()))]
pub fn sample_same_tree<R: Rng>(
    tree: &DebateTree,
    threshold: usize,
    n: usize,
    rng: &mut R,
) -> Vec<(String, String)> {
    let mut candidates = branch_cross_product(tree);
    candidates.shuffle(rng);

    let mut pairs = Vec::new();
    while pairs.len() < n {
        let Some((n1, n2)) = candidates.pop() else {
            break;
        };
        if is_neutral(tree, &n1, &n2, threshold) {
            pairs.push((n1, n2));
        }
    }
    pairs
}

/// Rejection-samples a single neutral pair from the whole tree.
///
/// Fallback for ad hoc queries; the bulk path goes through
/// [`sample_same_tree`]. Fails after 1000 rejected draws.
pub fn sample_pair<R: Rng>(
    tree: &DebateTree,
    threshold: usize,
    rng: &mut R,
) -> MinerResult<(String, String)> {
    let nodes = tree.non_root_paths();
    if nodes.len() < 2 {
        return Err(MinerError::AttemptsExhausted(0));
    }

    for _ in 0..ATTEMPT_LIMIT {
        let picked: Vec<&String> = nodes.choose_multiple(rng, 2).collect();
        let (n1, n2) = (picked[0], picked[1]);
        if is_neutral(tree, n1, n2, threshold) {
            return Ok((n1.clone(), n2.clone()));
        }
    }
    Err(MinerError::AttemptsExhausted(ATTEMPT_LIMIT))
}

/// Every cross-tree pair: any non-root node of `tree_a` with any
/// non-root node of `tree_b`. Independent debates need no structural
/// predicate.
pub fn all_cross(tree_a: &DebateTree, tree_b: &DebateTree) -> Vec<(String, String)> {
    let nodes_a = tree_a.non_root_paths();
    let nodes_b = tree_b.non_root_paths();
    nodes_a
        .iter()
        .cartesian_product(nodes_b.iter())
        .map(|(n1, n2)| (n1.clone(), n2.clone()))
        .collect()
}

/// Uniform sample of `n` cross-tree pairs without replacement.
///
/// Requesting more pairs than exist is an error, never a silent
/// truncation.
#[instrument(level = "debug", skip(tree_a, tree_b, rng))]
pub fn sample_cross<R: Rng>(
    tree_a: &DebateTree,
    tree_b: &DebateTree,
    n: usize,
    rng: &mut R,
) -> MinerResult<Vec<(String, String)>> {
    let all = all_cross(tree_a, tree_b);
    if n > all.len() {
        return Err(MinerError::NotEnoughCandidates {
            requested: n,
            available: all.len(),
        });
    }
    let picked = rand::seq::index::sample(rng, all.len(), n);
    Ok(picked.into_iter().map(|i| all[i].clone()).collect())
}
