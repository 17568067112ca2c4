use super::Tree;
use crate::libs::phylo::node::NodeId;

/// Serialize tree to a single-line Newick string.
pub fn to_newick(tree: &Tree) -> String {
    match tree.get_root() {
        Some(root) => {
            let mut s = String::new();
            write_node(tree, root, &mut s);
            s.push(';');
            s
        }
        None => ";".to_string(),
    }
}

fn write_node(tree: &Tree, id: NodeId, out: &mut String) {
    let Some(node) = tree.get_node(id) else {
        return;
    };

    if !node.children.is_empty() {
        out.push('(');
        for (i, &child) in node.children.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            write_node(tree, child, out);
        }
        out.push(')');
    }

    if let Some(name) = &node.name {
        out.push_str(&quote_label(name));
    }
    if let Some(len) = node.length {
        out.push_str(&format!(":{}", len));
    }
    if let Some(props) = node.properties.as_ref().filter(|p| !p.is_empty()) {
        out.push_str("[&&NHX");
        for (k, v) in props {
            out.push_str(&format!(":{}={}", k, v));
        }
        out.push(']');
    }
}

fn quote_label(label: &str) -> String {
    if label.chars().any(|c| "(),:;[] \t\n".contains(c)) {
        format!("'{}'", label.replace('\'', "''"))
    } else {
        label.to_string()
    }
}
