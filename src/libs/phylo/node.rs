use std::collections::BTreeMap;

/// NodeId is an index into the Tree's node vector.
pub type NodeId = usize;

#[derive(Debug, Clone)]
pub struct Node {
    /// Index in the arena
    pub id: NodeId,

    /// Parent node ID (None for root)
    pub parent: Option<NodeId>,

    /// List of child node IDs
    pub children: Vec<NodeId>,

    /// Tip name for leaves; support value or clade name for internal nodes
    pub name: Option<String>,

    /// Branch length to parent
    pub length: Option<f64>,

    /// NHX tags like [&&NHX:B=95]. BTreeMap keeps output order deterministic.
    pub properties: Option<BTreeMap<String, String>>,

    /// Soft deletion flag, set when a node is spliced out during rerooting.
    pub deleted: bool,
}

impl Node {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            parent: None,
            children: Vec::new(),
            name: None,
            length: None,
            properties: None,
            deleted: false,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Add a property (key-value pair)
    pub fn add_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Numeric support attached to this node.
    ///
    /// Internal labels are read as support values first (`(A,B)95`), then the
    /// NHX bootstrap tag (`[&&NHX:B=95]`). Anything non-numeric is `None`.
    pub fn support(&self) -> Option<f64> {
        let from_name = self
            .name
            .as_deref()
            .and_then(|s| s.trim().parse::<f64>().ok());

        from_name.or_else(|| {
            self.properties
                .as_ref()
                .and_then(|p| p.get("B"))
                .and_then(|s| s.trim().parse::<f64>().ok())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_support() {
        let mut node = Node::new(0);
        assert_eq!(node.support(), None);

        node.set_name("95");
        assert_eq!(node.support(), Some(95.0));

        node.set_name("0.87");
        assert_eq!(node.support(), Some(0.87));

        node.set_name("Hylidae");
        assert_eq!(node.support(), None);

        node.add_property("B", "72");
        assert_eq!(node.support(), Some(72.0));
    }
}
