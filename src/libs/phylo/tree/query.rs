use super::split::CladeSets;
use super::Tree;
use crate::libs::phylo::node::NodeId;

pub fn get_path_from_root(tree: &Tree, id: &NodeId) -> Result<Vec<NodeId>, String> {
    let mut path = Vec::new();
    let mut current = *id;

    if tree.get_node(current).is_none() {
        return Err(format!("Node {} not found", current));
    }

    loop {
        path.push(current);
        match tree.nodes[current].parent {
            Some(p) => current = p,
            None => break,
        }
    }

    path.reverse();
    if tree.root != Some(path[0]) {
        return Err(format!("Node {} is detached from root", id));
    }

    Ok(path)
}

/// Find Lowest Common Ancestor (LCA) of two nodes.
pub fn get_common_ancestor(tree: &Tree, a: &NodeId, b: &NodeId) -> Result<NodeId, String> {
    let path_a = get_path_from_root(tree, a)?;
    let path_b = get_path_from_root(tree, b)?;

    path_a
        .iter()
        .zip(path_b.iter())
        .take_while(|(u, v)| u == v)
        .last()
        .map(|(u, _)| *u)
        .ok_or_else(|| "Nodes are not in the same tree (no common ancestor)".to_string())
}

/// LCA of any number of nodes.
pub fn get_common_ancestor_of(tree: &Tree, ids: &[NodeId]) -> Result<NodeId, String> {
    let (first, rest) = ids
        .split_first()
        .ok_or("No nodes given for common ancestor")?;

    rest.iter()
        .try_fold(*first, |lca, id| get_common_ancestor(tree, &lca, id))
}

/// Get node ID by name. Returns first match.
pub fn get_node_by_name(tree: &Tree, name: &str) -> Option<NodeId> {
    tree.nodes
        .iter()
        .find(|n| !n.deleted && n.name.as_deref() == Some(name))
        .map(|n| n.id)
}

/// Which side of which edge forms the smallest clade around a leaf set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enclosing {
    /// All leaves below the node
    Descendants(NodeId),
    /// All leaves not below the node; the node is internal and not the root
    Complement(NodeId),
}

impl Enclosing {
    /// The node whose parent edge induces this clade
    pub fn node(&self) -> NodeId {
        match self {
            Enclosing::Descendants(id) | Enclosing::Complement(id) => *id,
        }
    }
}

/// Outcome of an unrooted monophyly test.
#[derive(Debug, Clone, PartialEq)]
pub struct Monophyly {
    pub enclosing: Enclosing,
    /// Leaves inside the enclosing clade that are not in the target set
    pub foreign: Vec<NodeId>,
    /// Some target leaf lies below the MRCA of the foreign leaves
    pub polyphyletic: bool,
}

impl Monophyly {
    pub fn is_monophyletic(&self) -> bool {
        self.foreign.is_empty()
    }
}

/// Unrooted monophyly test of a set of leaves.
///
/// Candidate clades are the leaf sets below every node plus, for every
/// non-root node, the leaves on the other side of its parent edge. The
/// smallest candidate holding all targets is the enclosing clade; ties go to
/// descendant sets, then to the node met first in pre-order. The targets are
/// monophyletic when nothing else is in it.
///
/// The far side of a leaf edge (every tip but one) only counts when it is
/// exactly the target set. Otherwise such a group is enclosed by the clade
/// around all of its tips, not by "everything but some tip".
///
/// ```
/// use monophy::libs::phylo::Tree;
///
/// let tree = Tree::from_newick("((A,C),(B,D));").unwrap();
/// let a = tree.get_node_by_name("A").unwrap();
/// let b = tree.get_node_by_name("B").unwrap();
///
/// let res = tree.check_monophyly(&[a, b]).unwrap();
/// assert!(!res.is_monophyletic());
/// assert_eq!(res.foreign.len(), 2);
///
/// // All tips but D are cut off by D's own edge
/// let d = tree.get_node_by_name("D").unwrap();
/// let others: Vec<_> = tree.get_leaves().into_iter().filter(|&id| id != d).collect();
/// assert!(tree.check_monophyly(&others).unwrap().is_monophyletic());
/// ```
pub fn check_monophyly(tree: &Tree, targets: &[NodeId]) -> Result<Monophyly, String> {
    if targets.is_empty() {
        return Err("No leaves given for monophyly test".to_string());
    }
    let root = tree.root.ok_or("Tree has no root")?;

    let clades = CladeSets::new(tree, root);
    let target_bits = clades
        .bits_of(targets)
        .ok_or("Monophyly test on a node that is not a leaf of this tree")?;

    // (size, complement?, pre-order rank)
    let mut best: Option<((usize, bool, usize), Enclosing)> = None;
    let mut consider = |key: (usize, bool, usize), enclosing: Enclosing| {
        if best.as_ref().map_or(true, |(k, _)| key < *k) {
            best = Some((key, enclosing));
        }
    };

    for (rank, id) in tree.preorder(&root).into_iter().enumerate() {
        let Some(below) = clades.sets.get(&id) else {
            continue;
        };

        if target_bits.is_subset(below) {
            consider(
                (below.count_ones(..), false, rank),
                Enclosing::Descendants(id),
            );
        } else if id != root && target_bits.is_disjoint(below) {
            let size = clades.len() - below.count_ones(..);
            let is_leaf_edge = clades.index.contains_key(&id);
            if !is_leaf_edge || size == target_bits.count_ones(..) {
                consider((size, true, rank), Enclosing::Complement(id));
            }
        }
    }

    // The root always holds every target, so a candidate exists
    let (_, enclosing) = best.ok_or("No clade encloses the given leaves")?;
    let enclosing_bits = match enclosing {
        Enclosing::Descendants(id) => clades.sets.get(&id).cloned(),
        Enclosing::Complement(id) => clades.complement(id),
    }
    .ok_or("Enclosing clade vanished")?;

    let mut foreign_bits = enclosing_bits;
    foreign_bits.difference_with(&target_bits);
    let foreign = clades.to_leaves(&foreign_bits);

    let polyphyletic = if foreign.is_empty() {
        false
    } else {
        let lca = get_common_ancestor_of(tree, &foreign)?;
        clades
            .sets
            .get(&lca)
            .is_some_and(|below| !below.is_disjoint(&target_bits))
    };

    Ok(Monophyly {
        enclosing,
        foreign,
        polyphyletic,
    })
}
