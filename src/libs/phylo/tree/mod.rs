pub mod io;
pub mod ops;
pub mod query;
pub mod split;
pub mod stat;
#[cfg(test)]
pub mod tests;
pub mod traversal;

use super::error::TreeError;
use super::node::{Node, NodeId};
use std::collections::BTreeMap;

#[derive(Debug, Default, Clone)]
pub struct Tree {
    /// Arena storage for all nodes
    pub(super) nodes: Vec<Node>,

    /// Optional root ID (a tree might be empty or in construction)
    pub(super) root: Option<NodeId>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new detached node to the tree. Returns the new node's ID.
    pub fn add_node(&mut self) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node::new(id));
        id
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| !n.deleted).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get_root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id).filter(|n| !n.deleted)
    }

    pub fn get_node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id).filter(|n| !n.deleted)
    }

    pub fn set_root(&mut self, id: NodeId) {
        if self.get_node(id).is_some() {
            self.root = Some(id);
        }
    }

    // --- Delegation to ops ---

    pub fn add_child(&mut self, parent_id: NodeId, child_id: NodeId) -> Result<(), String> {
        ops::add_child(self, parent_id, child_id)
    }

    pub fn collapse_node(&mut self, id: NodeId) -> Result<(), String> {
        ops::collapse_node(self, id)
    }

    pub fn insert_parent(&mut self, child_id: NodeId) -> Result<NodeId, String> {
        ops::insert_parent(self, child_id)
    }

    pub fn remove_degree_two_nodes(&mut self) {
        ops::remove_degree_two_nodes(self)
    }

    pub fn reroot_at(&mut self, new_root: NodeId, shift_labels: bool) -> Result<(), String> {
        ops::reroot_at(self, new_root, shift_labels)
    }

    // --- Delegation to traversal ---

    pub fn preorder(&self, start_node: &NodeId) -> Vec<NodeId> {
        traversal::preorder(self, *start_node)
    }

    pub fn postorder(&self, start_node: &NodeId) -> Vec<NodeId> {
        traversal::postorder(self, *start_node)
    }

    // --- Delegation to query ---

    pub fn get_path_from_root(&self, id: &NodeId) -> Result<Vec<NodeId>, String> {
        query::get_path_from_root(self, id)
    }

    pub fn get_common_ancestor(&self, a: &NodeId, b: &NodeId) -> Result<NodeId, String> {
        query::get_common_ancestor(self, a, b)
    }

    pub fn get_common_ancestor_of(&self, ids: &[NodeId]) -> Result<NodeId, String> {
        query::get_common_ancestor_of(self, ids)
    }

    pub fn get_node_by_name(&self, name: &str) -> Option<NodeId> {
        query::get_node_by_name(self, name)
    }

    pub fn check_monophyly(&self, leaves: &[NodeId]) -> Result<query::Monophyly, String> {
        query::check_monophyly(self, leaves)
    }

    pub fn node_support(&self, id: NodeId) -> Option<f64> {
        self.get_node(id).and_then(|n| n.support())
    }

    // --- Delegation to stat ---

    pub fn get_leaves(&self) -> Vec<NodeId> {
        match self.root {
            Some(root) => stat::get_leaves(self, root),
            None => Vec::new(),
        }
    }

    pub fn get_names(&self) -> Vec<String> {
        stat::get_names(self)
    }

    pub fn get_leaf_name_id(&self) -> Result<BTreeMap<String, NodeId>, TreeError> {
        stat::get_leaf_name_id(self)
    }

    pub fn taxa(&self) -> Result<Vec<String>, TreeError> {
        stat::taxa(self)
    }

    // --- Delegation to io ---

    pub fn to_newick(&self) -> String {
        io::to_newick(self)
    }
}
