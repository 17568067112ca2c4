use super::Tree;
use crate::libs::phylo::node::NodeId;

/// Add a child to a parent node.
/// Updates both parent's `children` list and child's `parent` field.
pub fn add_child(tree: &mut Tree, parent_id: NodeId, child_id: NodeId) -> Result<(), String> {
    if parent_id == child_id {
        return Err("Cannot add node as child of itself".to_string());
    }
    if tree.get_node(parent_id).is_none() {
        return Err(format!("Parent node {} not found or deleted", parent_id));
    }
    let child = tree
        .get_node(child_id)
        .ok_or_else(|| format!("Child node {} not found or deleted", child_id))?;
    if let Some(old_parent) = child.parent {
        return Err(format!("Node {} already has parent {}", child_id, old_parent));
    }

    tree.nodes[child_id].parent = Some(parent_id);
    tree.nodes[parent_id].children.push(child_id);

    Ok(())
}

/// Splice a node out, attaching its children to its parent.
/// Edge lengths are summed (parent->node + node->child).
pub fn collapse_node(tree: &mut Tree, id: NodeId) -> Result<(), String> {
    let node = tree.get_node(id).ok_or(format!("Node {} not found", id))?;
    let parent_id = node.parent.ok_or("Cannot collapse root node")?;
    let parent_edge = node.length;
    let children = node.children.clone();

    for &child_id in &children {
        if let Some(child) = tree.get_node_mut(child_id) {
            child.parent = Some(parent_id);
            child.length = match (parent_edge, child.length) {
                (Some(p), Some(c)) => Some(p + c),
                (p, c) => p.or(c),
            };
        }
    }

    if let Some(parent) = tree.get_node_mut(parent_id) {
        if let Some(pos) = parent.children.iter().position(|&x| x == id) {
            parent.children.splice(pos..pos + 1, children);
        }
    }

    if let Some(node) = tree.get_node_mut(id) {
        node.deleted = true;
        node.children.clear();
        node.parent = None;
    }

    Ok(())
}

/// Insert a node halfway along the edge between `id` and its parent.
/// Returns the new node's ID.
pub fn insert_parent(tree: &mut Tree, id: NodeId) -> Result<NodeId, String> {
    let node = tree.get_node(id).ok_or(format!("Node {} not found", id))?;
    let parent = node.parent.ok_or("Node has no parent")?;
    let half = node.length.map(|l| l / 2.0);

    let new_node = tree.add_node();

    // Keep the new node at the child's position among its siblings
    if let Some(p_node) = tree.get_node_mut(parent) {
        if let Some(pos) = p_node.children.iter().position(|&c| c == id) {
            p_node.children[pos] = new_node;
        }
    }
    tree.nodes[new_node].parent = Some(parent);
    tree.nodes[new_node].length = half;

    tree.nodes[id].parent = None;
    add_child(tree, new_node, id)?;
    tree.nodes[id].length = half;

    Ok(new_node)
}

/// Collapse every non-root node that has exactly one child.
/// Rerooting leaves the old root in this state.
pub fn remove_degree_two_nodes(tree: &mut Tree) {
    loop {
        let target = tree
            .nodes
            .iter()
            .find(|n| !n.deleted && n.parent.is_some() && n.children.len() == 1)
            .map(|n| n.id);

        match target {
            Some(id) => {
                if collapse_node(tree, id).is_err() {
                    break;
                }
            }
            None => break,
        }
    }
}

/// Move the root to an internal node by turning every edge on the path from
/// the old root upside down.
///
/// Each edge length travels with its edge, so along the path a node takes the
/// length its child on the path used to carry. With `shift_labels`, internal
/// labels travel the same way and support values stay on their bipartitions.
/// The old root's label ends up on the new root.
pub fn reroot_at(tree: &mut Tree, new_root: NodeId, shift_labels: bool) -> Result<(), String> {
    let node = tree
        .get_node(new_root)
        .ok_or_else(|| format!("Node {} not found", new_root))?;
    if node.is_leaf() {
        return Err(format!("Cannot root at leaf {}", new_root));
    }
    if tree.root == Some(new_root) {
        return Ok(());
    }

    let path = tree.get_path_from_root(&new_root)?;

    let mut lengths: Vec<Option<f64>> = path.iter().map(|&id| tree.nodes[id].length).collect();
    lengths.rotate_left(1);
    if let Some(last) = lengths.last_mut() {
        *last = None;
    }

    let mut labels: Vec<Option<String>> = path.iter().map(|&id| tree.nodes[id].name.clone()).collect();
    labels.rotate_left(1);

    for pair in path.windows(2) {
        let (upper, lower) = (pair[0], pair[1]);
        tree.nodes[upper].children.retain(|&c| c != lower);
        tree.nodes[lower].children.push(upper);
        tree.nodes[upper].parent = Some(lower);
    }

    for (k, &id) in path.iter().enumerate() {
        tree.nodes[id].length = lengths[k];
        if shift_labels {
            tree.nodes[id].name = labels[k].take();
        }
    }

    tree.nodes[new_root].parent = None;
    tree.root = Some(new_root);

    Ok(())
}
