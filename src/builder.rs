//! Tree builder: flat argument records -> rooted debate tree.

use tracing::instrument;

use crate::arena::{Argument, DebateTree};
use crate::errors::{MinerError, MinerResult};

/// Position path of the synthetic root node.
pub const ROOT_PATH: &str = "1.";

/// Parent path of a non-root position path: the longest proper
/// dot-terminated prefix (`"1.2.3."` -> `"1.2."`). `None` for the root.
pub fn parent_path(path: &str) -> Option<&str> {
    let trimmed = path.strip_suffix('.')?;
    let cut = trimmed.rfind('.')?;
    Some(&path[..cut + 1])
}

/// Assembles a [`DebateTree`] from parser output.
///
/// Records must arrive in document order so that every parent path is
/// already present when its children are inserted; transcripts violating
/// that are structurally broken and rejected as a whole.
#[derive(Debug, Default)]
pub struct TreeBuilder;

impl TreeBuilder {
    pub fn new() -> Self {
        Self
    }

    #[instrument(level = "debug", skip(self, records), fields(n_records = records.len()))]
    pub fn build(
        &self,
        records: Vec<Argument>,
        subject: &str,
    ) -> MinerResult<DebateTree> {
        let mut tree = DebateTree::new(subject);

        let root = Argument {
            path: ROOT_PATH.to_string(),
            level: 0,
            stance: None,
            text: None,
            node_id: format!("{}_0", subject.replace(' ', "_")),
        };
        tree.insert_node(root, None);

        for record in records {
            let parent = parent_path(&record.path).ok_or_else(|| MinerError::MissingParent {
                child: record.path.clone(),
                parent: String::new(),
            })?;
            let parent_idx =
                tree.index_of(parent)
                    .ok_or_else(|| MinerError::MissingParent {
                        child: record.path.clone(),
                        parent: parent.to_string(),
                    })?;
            tree.insert_node(record, Some(parent_idx));
        }

        Ok(tree)
    }
}
