use super::Tree;
use crate::libs::phylo::error::TreeError;
use crate::libs::phylo::node::NodeId;
use std::collections::BTreeMap;

/// Get IDs of all leaves in subtree rooted at `id`.
pub fn get_leaves(tree: &Tree, id: NodeId) -> Vec<NodeId> {
    tree.preorder(&id)
        .into_iter()
        .filter(|&n| tree.get_node(n).is_some_and(|node| node.is_leaf()))
        .collect()
}

/// Names of all live nodes that have one.
pub fn get_names(tree: &Tree) -> Vec<String> {
    tree.nodes
        .iter()
        .filter(|n| !n.deleted)
        .filter_map(|n| n.name.clone())
        .collect()
}

/// Map of tip name to leaf NodeId.
///
/// Fails on an unnamed leaf or a tip name used twice.
pub fn get_leaf_name_id(tree: &Tree) -> Result<BTreeMap<String, NodeId>, TreeError> {
    let mut map = BTreeMap::new();
    for id in tree.get_leaves() {
        let name = tree
            .get_node(id)
            .and_then(|n| n.name.clone())
            .ok_or_else(|| TreeError::LogicError(format!("Leaf node {} has no name", id)))?;
        if map.insert(name.clone(), id).is_some() {
            return Err(TreeError::LogicError(format!(
                "Tip name {} occurs more than once",
                name
            )));
        }
    }
    Ok(map)
}

/// All tip names, sorted alphabetically.
pub fn taxa(tree: &Tree) -> Result<Vec<String>, TreeError> {
    Ok(get_leaf_name_id(tree)?.into_keys().collect())
}
