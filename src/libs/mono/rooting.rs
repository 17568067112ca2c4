use super::error::MonoError;
use crate::libs::phylo::{NodeId, Tree, TreeError};
use std::collections::BTreeSet;

pub const MIN_OUTGROUP: usize = 2;
pub const MAX_OUTGROUP: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootOutcome {
    /// A new root was placed on the edge above this node
    Rerooted(NodeId),
    /// Neither the outgroup nor its complement forms a clade below the root
    Unchanged,
}

/// Roots `tree` on the clade defined by 2 to 5 outgroup tips.
///
/// Every tip is checked before the tree is touched; the first one missing
/// from the tree is reported. A new root is put halfway along the edge above
/// the tips' MRCA. If that MRCA already is the root, the MRCA of all other
/// tips is used instead.
///
/// With `support_as_labels`, internal labels follow their splits through the
/// rerooting.
pub fn root_on_tips(
    tree: &mut Tree,
    tips: &[String],
    support_as_labels: bool,
) -> Result<RootOutcome, MonoError> {
    if !(MIN_OUTGROUP..=MAX_OUTGROUP).contains(&tips.len()) {
        return Err(MonoError::OutgroupSize(tips.len()));
    }

    let name_id = tree.get_leaf_name_id()?;
    let ids = tips
        .iter()
        .map(|tip| {
            name_id
                .get(tip)
                .copied()
                .ok_or_else(|| MonoError::TipNotFound(tip.clone()))
        })
        .collect::<Result<Vec<NodeId>, MonoError>>()?;

    log::info!("Using tips {:?} to root tree.", tips);

    let root = tree
        .get_root()
        .ok_or_else(|| TreeError::LogicError("Tree has no root".to_string()))?;
    let mut target = tree.get_common_ancestor_of(&ids).map_err(TreeError::from)?;

    if target == root {
        let outgroup: BTreeSet<NodeId> = ids.iter().copied().collect();
        let others: Vec<NodeId> = name_id
            .values()
            .copied()
            .filter(|id| !outgroup.contains(id))
            .collect();
        if !others.is_empty() {
            target = tree.get_common_ancestor_of(&others).map_err(TreeError::from)?;
        }
    }

    if target == root {
        log::warn!(
            "Tips {:?} and the remaining tips both span the root; tree left unchanged",
            tips
        );
        return Ok(RootOutcome::Unchanged);
    }

    let new_root = tree.insert_parent(target).map_err(TreeError::from)?;
    tree.reroot_at(new_root, support_as_labels)
        .map_err(TreeError::from)?;
    tree.remove_degree_two_nodes();

    Ok(RootOutcome::Rerooted(target))
}

/// `Rooted_{name}` for the tree file at `path`
pub fn rooted_file_name(path: &str) -> String {
    let name = std::path::Path::new(path)
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "tree.nwk".to_string());
    format!("Rooted_{}", name)
}
