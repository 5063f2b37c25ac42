//! Pair records: edge-pair extraction and neutral-pair assembly.

use serde::Serialize;

use crate::arena::{DebateTree, Stance, TreeNode};

/// Argumentative relation between the two members of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    Support,
    Attack,
    Neutral,
}

/// One labeled argument pair, the unit handed to the downstream
/// embedding/CSV stage. Field names serialize in the tabular schema's
/// camelCase (`topArgument`, `sameTree`, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairRecord {
    pub top_argument: String,
    pub sub_argument: String,
    pub relation: Relation,
    pub domain: String,
    pub subject: String,
    pub same_tree: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_argument_level: Option<usize>,
}

/// Emits one support/attack pair per tree edge whose parent is not the
/// root, in an iterative pre-order walk. The synthetic root has no text
/// and never appears as `top_argument`.
pub fn edge_pairs(tree: &DebateTree, domain: &str) -> Vec<PairRecord> {
    let root = tree.root();
    let mut pairs = Vec::new();

    for (_, node) in tree.iter() {
        let Some(parent_idx) = node.parent else {
            continue;
        };
        if Some(parent_idx) == root {
            continue;
        }
        let Some(parent) = tree.get_node(parent_idx) else {
            continue;
        };
        let (Some(top), Some(sub)) = (parent.data.text.as_deref(), node.data.text.as_deref())
        else {
            continue;
        };

        let relation = match node.data.stance {
            Some(Stance::Con) => Relation::Attack,
            _ => Relation::Support,
        };
        pairs.push(PairRecord {
            top_argument: top.to_string(),
            sub_argument: sub.to_string(),
            relation,
            domain: domain.to_string(),
            subject: tree.subject().to_string(),
            same_tree: true,
            sub_argument_level: Some(node.data.level),
        });
    }

    pairs
}

fn neutral_record(
    top: &TreeNode,
    sub: &TreeNode,
    subject: String,
    domain: String,
    same_tree: bool,
) -> Option<PairRecord> {
    Some(PairRecord {
        top_argument: top.data.text.clone()?,
        sub_argument: sub.data.text.clone()?,
        relation: Relation::Neutral,
        domain,
        subject,
        same_tree,
        sub_argument_level: None,
    })
}

/// Converts same-tree name pairs into neutral records. Neutrality is
/// symmetric, so every pair also yields its mirror.
pub fn neutral_pairs(
    tree: &DebateTree,
    names: &[(String, String)],
    domain: &str,
) -> Vec<PairRecord> {
    let mut pairs = Vec::new();
    for (name1, name2) in names {
        let (Some(n1), Some(n2)) = (tree.node_by_path(name1), tree.node_by_path(name2)) else {
            continue;
        };
        for (top, sub) in [(n1, n2), (n2, n1)] {
            if let Some(record) = neutral_record(
                top,
                sub,
                tree.subject().to_string(),
                domain.to_string(),
                true,
            ) {
                pairs.push(record);
            }
        }
    }
    pairs
}

/// Converts cross-tree name pairs (first name from `tree_a`, second from
/// `tree_b`) into neutral records plus mirrors. Subjects concatenate as
/// `"A & B"`; domains likewise, falling back to `domain_a` when the
/// second tree carries no tag.
pub fn neutral_pairs_cross(
    tree_a: &DebateTree,
    tree_b: &DebateTree,
    names: &[(String, String)],
    domain_a: &str,
    domain_b: Option<&str>,
) -> Vec<PairRecord> {
    let join = |first: &str, second: &str| format!("{first} & {second}");
    let forward_domain = match domain_b {
        Some(b) => join(domain_a, b),
        None => domain_a.to_string(),
    };
    let reverse_domain = match domain_b {
        Some(b) => join(b, domain_a),
        None => domain_a.to_string(),
    };

    let mut pairs = Vec::new();
    for (name1, name2) in names {
        let (Some(n1), Some(n2)) = (tree_a.node_by_path(name1), tree_b.node_by_path(name2))
        else {
            continue;
        };
        if let Some(record) = neutral_record(
            n1,
            n2,
            join(tree_a.subject(), tree_b.subject()),
            forward_domain.clone(),
            false,
        ) {
            pairs.push(record);
        }
        if let Some(record) = neutral_record(
            n2,
            n1,
            join(tree_b.subject(), tree_a.subject()),
            reverse_domain.clone(),
            false,
        ) {
            pairs.push(record);
        }
    }
    pairs
}
