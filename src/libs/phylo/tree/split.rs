use super::Tree;
use crate::libs::phylo::node::NodeId;
use fixedbitset::FixedBitSet;
use std::collections::HashMap;

/// Leaf sets of every clade below `root`, one bit per leaf.
///
/// Bits are assigned to leaves in sorted-name order, so two trees with the same
/// taxa get the same layout.
#[derive(Debug, Clone)]
pub struct CladeSets {
    /// Leaf NodeId for each bit
    pub leaves: Vec<NodeId>,
    /// Bit for each leaf NodeId
    pub index: HashMap<NodeId, usize>,
    /// Descendant leaf set of each node
    pub sets: HashMap<NodeId, FixedBitSet>,
}

impl CladeSets {
    pub fn new(tree: &Tree, root: NodeId) -> Self {
        let mut leaves = super::stat::get_leaves(tree, root);
        leaves.sort_by(|a, b| {
            let name = |id: &NodeId| tree.get_node(*id).and_then(|n| n.name.clone());
            name(a).cmp(&name(b)).then(a.cmp(b))
        });

        let index: HashMap<NodeId, usize> =
            leaves.iter().enumerate().map(|(i, &id)| (id, i)).collect();

        let mut sets: HashMap<NodeId, FixedBitSet> = HashMap::new();
        // Post-order: children are filled before their parent
        for id in tree.postorder(&root) {
            let mut bits = FixedBitSet::with_capacity(leaves.len());
            if let Some(&i) = index.get(&id) {
                bits.insert(i);
            } else if let Some(node) = tree.get_node(id) {
                for child in &node.children {
                    if let Some(child_bits) = sets.get(child) {
                        bits.union_with(child_bits);
                    }
                }
            }
            sets.insert(id, bits);
        }

        Self {
            leaves,
            index,
            sets,
        }
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Bitset of the given leaves. `None` if one of them is not a leaf here.
    pub fn bits_of(&self, leaves: &[NodeId]) -> Option<FixedBitSet> {
        let mut bits = FixedBitSet::with_capacity(self.len());
        for id in leaves {
            bits.insert(*self.index.get(id)?);
        }
        Some(bits)
    }

    /// The other side of the bipartition induced by the edge above `id`.
    pub fn complement(&self, id: NodeId) -> Option<FixedBitSet> {
        let below = self.sets.get(&id)?;
        let mut bits = FixedBitSet::with_capacity(self.len());
        bits.insert_range(..);
        for i in below.ones() {
            bits.set(i, false);
        }
        Some(bits)
    }

    pub fn to_leaves(&self, bits: &FixedBitSet) -> Vec<NodeId> {
        bits.ones().map(|i| self.leaves[i]).collect()
    }
}
