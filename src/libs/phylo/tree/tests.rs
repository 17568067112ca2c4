use super::query::Enclosing;
use super::*;

fn ids(tree: &Tree, names: &[&str]) -> Vec<NodeId> {
    names
        .iter()
        .map(|n| tree.get_node_by_name(n).unwrap())
        .collect()
}

fn names(tree: &Tree, ids: &[NodeId]) -> Vec<String> {
    let mut names: Vec<String> = ids
        .iter()
        .filter_map(|&id| tree.get_node(id).and_then(|n| n.name.clone()))
        .collect();
    names.sort();
    names
}

#[test]
fn test_tree_traversals() {
    let mut tree = Tree::new();
    //    0
    //   / \
    //  1   2
    // / \   \
    //3   4   5
    let n: Vec<NodeId> = (0..6).map(|_| tree.add_node()).collect();
    tree.set_root(n[0]);
    tree.add_child(n[0], n[1]).unwrap();
    tree.add_child(n[0], n[2]).unwrap();
    tree.add_child(n[1], n[3]).unwrap();
    tree.add_child(n[1], n[4]).unwrap();
    tree.add_child(n[2], n[5]).unwrap();

    assert_eq!(tree.preorder(&n[0]), vec![n[0], n[1], n[3], n[4], n[2], n[5]]);
    assert_eq!(tree.postorder(&n[0]), vec![n[3], n[4], n[1], n[5], n[2], n[0]]);

    assert!(tree.add_child(n[0], n[0]).is_err());
    assert!(tree.add_child(n[2], n[3]).is_err());
}

#[test]
fn test_common_ancestor() {
    let tree = Tree::from_newick("(((A,B)ab,C)abc,(D,E)de)root;").unwrap();
    let ab = tree.get_node_by_name("ab").unwrap();
    let abc = tree.get_node_by_name("abc").unwrap();
    let root = tree.get_root().unwrap();

    let leaves = ids(&tree, &["A", "B", "C", "D"]);
    assert_eq!(tree.get_common_ancestor(&leaves[0], &leaves[1]).unwrap(), ab);
    assert_eq!(tree.get_common_ancestor_of(&leaves[..3]).unwrap(), abc);
    assert_eq!(tree.get_common_ancestor_of(&leaves).unwrap(), root);
    assert_eq!(tree.get_common_ancestor_of(&leaves[..1]).unwrap(), leaves[0]);
    assert!(tree.get_common_ancestor_of(&[]).is_err());
}

#[test]
fn test_taxa_sorted_and_unique() {
    let tree = Tree::from_newick("((Rana,Hyla),(Bufo,Ascaphus));").unwrap();
    assert_eq!(tree.taxa().unwrap(), vec!["Ascaphus", "Bufo", "Hyla", "Rana"]);

    let dup = Tree::from_newick("((A,B),(A,C));").unwrap();
    let err = dup.taxa().unwrap_err();
    assert!(err.to_string().contains("A occurs more than once"));

    let unnamed = Tree::from_newick("((A,B),(,C));").unwrap();
    assert!(unnamed.taxa().is_err());
}

#[test]
fn test_monophyly_exact_clade() {
    let tree = Tree::from_newick("((A,B)ab,(C,D)cd);").unwrap();
    let res = tree.check_monophyly(&ids(&tree, &["A", "B"])).unwrap();

    assert!(res.is_monophyletic());
    assert!(res.foreign.is_empty());
    let ab = tree.get_node_by_name("ab").unwrap();
    assert_eq!(res.enclosing, Enclosing::Descendants(ab));
}

#[test]
fn test_monophyly_whole_tree_encloses() {
    let tree = Tree::from_newick("((A,C),(B,D));").unwrap();
    let res = tree.check_monophyly(&ids(&tree, &["A", "B"])).unwrap();

    assert!(!res.is_monophyletic());
    assert_eq!(names(&tree, &res.foreign), vec!["C", "D"]);
    assert_eq!(res.enclosing, Enclosing::Descendants(tree.get_root().unwrap()));
}

#[test]
fn test_monophyly_unrooted_complement() {
    // {A,B,C} is not below any node, but it is one side of the edge above (D,E)
    let tree = Tree::from_newick("((A,B),(C,(D,E)de));").unwrap();
    let res = tree.check_monophyly(&ids(&tree, &["A", "B", "C"])).unwrap();

    assert!(res.is_monophyletic());
    let de = tree.get_node_by_name("de").unwrap();
    assert_eq!(res.enclosing, Enclosing::Complement(de));
}

#[test]
fn test_monophyly_all_but_one_tip() {
    // Every tip but D is the far side of D's own edge
    let tree = Tree::from_newick("((A,B),(C,D));").unwrap();
    let res = tree.check_monophyly(&ids(&tree, &["A", "B", "C"])).unwrap();
    assert!(res.is_monophyletic());
    let d = tree.get_node_by_name("D").unwrap();
    assert_eq!(res.enclosing, Enclosing::Complement(d));

    let tree = Tree::from_newick("(((A,B),C),D,E);").unwrap();
    let res = tree.check_monophyly(&ids(&tree, &["A", "B", "C", "E"])).unwrap();
    assert!(res.is_monophyletic());

    // A leaf edge never encloses a smaller group
    let tree = Tree::from_newick("((A,C),(B,D));").unwrap();
    let res = tree.check_monophyly(&ids(&tree, &["A", "B"])).unwrap();
    assert_eq!(names(&tree, &res.foreign), vec!["C", "D"]);
}

// Detaches the named leaves, then tidies up childless and single-child nodes
fn drop_leaves(tree: &mut Tree, drop: &[String]) {
    for name in drop {
        let id = tree.get_node_by_name(name).unwrap();
        let parent = tree.nodes[id].parent.unwrap();
        tree.nodes[parent].children.retain(|&c| c != id);
        tree.nodes[id].deleted = true;
    }

    while let Some(id) = tree
        .nodes
        .iter()
        .find(|n| !n.deleted && n.parent.is_some() && n.children.is_empty() && n.name.is_none())
        .map(|n| n.id)
    {
        let parent = tree.nodes[id].parent.unwrap();
        tree.nodes[parent].children.retain(|&c| c != id);
        tree.nodes[id].deleted = true;
    }
    tree.remove_degree_two_nodes();

    let root = tree.get_root().unwrap();
    if tree.nodes[root].children.len() == 1 {
        let child = tree.nodes[root].children[0];
        tree.nodes[root].deleted = true;
        tree.nodes[child].parent = None;
        tree.set_root(child);
    }
}

#[test]
fn test_monophyly_removing_foreign_leaves() {
    let cases: Vec<(&str, Vec<&str>)> = vec![
        ("((A,C),(B,D));", vec!["A", "B"]),
        ("((((A,B),C),D),E);", vec!["A", "C"]),
        ("((((A,B),C),D),E);", vec!["A", "D"]),
        ("(A,(B,C,D),(E,F));", vec!["A", "B"]),
        ("(A,(B,C,D),(E,F));", vec!["B", "E", "F"]),
        ("((A,B),(C,D),(E,(F,G)));", vec!["A", "C", "F"]),
        ("((A,B),(C,D),(E,(F,G)));", vec!["C", "D", "E"]),
        ("(((A,B),C),D,E);", vec!["B", "D", "E"]),
        ("((A,B),(C,(D,E)));", vec!["A", "B", "D"]),
    ];

    for (newick, group) in cases {
        let mut tree = Tree::from_newick(newick).unwrap();
        let res = tree.check_monophyly(&ids(&tree, &group)).unwrap();
        assert!(!res.is_monophyletic(), "{} {:?}", newick, group);

        let foreign = names(&tree, &res.foreign);
        drop_leaves(&mut tree, &foreign);
        let res = tree.check_monophyly(&ids(&tree, &group)).unwrap();
        assert!(
            res.is_monophyletic(),
            "{} {:?} still has {:?}",
            newick,
            group,
            names(&tree, &res.foreign)
        );
    }
}

#[test]
fn test_monophyly_para_and_poly() {
    let tree = Tree::from_newick("((((A,B),C),D),E);").unwrap();

    // {A,C} leaves out B, which forms its own subclade: paraphyletic
    let res = tree.check_monophyly(&ids(&tree, &["A", "C"])).unwrap();
    assert_eq!(names(&tree, &res.foreign), vec!["B"]);
    assert!(!res.polyphyletic);

    // {A,D}: the MRCA of the intruders B and C also holds A: polyphyletic
    let res = tree.check_monophyly(&ids(&tree, &["A", "D"])).unwrap();
    assert_eq!(names(&tree, &res.foreign), vec!["B", "C"]);
    assert!(res.polyphyletic);
}

#[test]
fn test_monophyly_rejects_internal_nodes() {
    let tree = Tree::from_newick("((A,B)ab,(C,D)cd);").unwrap();
    let ab = tree.get_node_by_name("ab").unwrap();
    assert!(tree.check_monophyly(&[ab]).is_err());
    assert!(tree.check_monophyly(&[]).is_err());
}

#[test]
fn test_monophyly_is_pure() {
    let tree = Tree::from_newick("(((A,B),C),(D,(E,F)));").unwrap();
    let targets = ids(&tree, &["A", "C", "E"]);
    let first = tree.check_monophyly(&targets).unwrap();
    let second = tree.check_monophyly(&targets).unwrap();
    assert_eq!(first, second);
    assert_eq!(tree.to_newick(), "(((A,B),C),(D,(E,F)));");
}

#[test]
fn test_insert_parent_and_reroot() {
    let mut tree = Tree::from_newick("((A:1,B:1)ab:2,(C:1,D:1)cd:2);").unwrap();
    let c = tree.get_node_by_name("C").unwrap();
    let d = tree.get_node_by_name("D").unwrap();
    let cd = tree.get_common_ancestor(&c, &d).unwrap();

    let new_root = tree.insert_parent(cd).unwrap();
    assert_eq!(tree.get_node(cd).unwrap().length, Some(1.0));
    assert_eq!(tree.get_node(new_root).unwrap().length, Some(1.0));

    tree.reroot_at(new_root, false).unwrap();
    tree.remove_degree_two_nodes();

    assert_eq!(tree.get_root(), Some(new_root));
    assert_eq!(tree.to_newick(), "((C:1,D:1)cd:1,(A:1,B:1)ab:3);");
}

#[test]
fn test_reroot_shifts_support() {
    let mut tree = Tree::from_newick("(((A,B)90,C)70,D,E);").unwrap();
    let a = tree.get_node_by_name("A").unwrap();
    let b = tree.get_node_by_name("B").unwrap();
    let ab = tree.get_common_ancestor(&a, &b).unwrap();

    let new_root = tree.insert_parent(ab).unwrap();
    tree.reroot_at(new_root, true).unwrap();
    tree.remove_degree_two_nodes();

    // 70 moves to the old root, which now sits on the {D,E} | {A,B,C} edge
    assert_eq!(tree.to_newick(), "((A,B)90,(C,(D,E)70));");
}

#[test]
fn test_reroot_at_leaf_or_root() {
    let mut tree = Tree::from_newick("((A,B)ab,(C,D)cd);").unwrap();
    let a = tree.get_node_by_name("A").unwrap();

    let err = tree.reroot_at(a, false).unwrap_err();
    assert!(err.contains("Cannot root at leaf"));
    assert_eq!(tree.to_newick(), "((A,B)ab,(C,D)cd);");

    let root = tree.get_root().unwrap();
    tree.reroot_at(root, true).unwrap();
    assert_eq!(tree.to_newick(), "((A,B)ab,(C,D)cd);");
}

#[test]
fn test_node_support() {
    let tree = Tree::from_newick("((A,B)95,(C,D)[&&NHX:B=60]);").unwrap();
    let leaves = ids(&tree, &["A", "C", "D"]);
    let ab = tree.get_node(leaves[0]).unwrap().parent.unwrap();
    let cd = tree.get_common_ancestor(&leaves[1], &leaves[2]).unwrap();

    assert_eq!(tree.node_support(ab), Some(95.0));
    assert_eq!(tree.node_support(cd), Some(60.0));
    assert_eq!(tree.node_support(tree.get_root().unwrap()), None);
}

#[test]
fn test_node_support_fraction() {
    use approx::assert_abs_diff_eq;

    let tree = Tree::from_newick("((A:0.1,B:0.2)0.95:0.05,(C,D)[&&NHX:B=0.6]);").unwrap();
    let leaves = ids(&tree, &["A", "C"]);
    let ab = tree.get_node(leaves[0]).unwrap().parent.unwrap();
    let cd = tree.get_node(leaves[1]).unwrap().parent.unwrap();

    assert_abs_diff_eq!(tree.node_support(ab).unwrap(), 0.95, epsilon = 1e-9);
    assert_abs_diff_eq!(tree.node_support(cd).unwrap(), 0.6, epsilon = 1e-9);
}
