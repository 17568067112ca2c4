//! Monophyly checks of tip groupings.
//!
//! The pipeline: [`grouping`] turns the mapping table into one task per
//! category, [`rooting`] optionally roots the tree, [`evaluate`] tests every
//! group and [`report`] writes the per-category and combined tables.

pub mod error;
pub mod evaluate;
pub mod grouping;
pub mod report;
pub mod rooting;
pub mod tips;

pub use error::MonoError;
pub use evaluate::{Evaluator, MonophylyResult, Phyly};
pub use grouping::GroupTask;
pub use report::Report;

use crate::libs::phylo::{Tree, TreeError};

/// Reads the first tree of a Newick file and checks its tip names.
///
/// Fails if the file holds no tree, if a leaf is unnamed, or if a tip name
/// occurs twice.
pub fn read_tree(path: &str) -> anyhow::Result<Tree> {
    let text = crate::libs::io::read_to_string(path)?;
    let parse_err = |source: TreeError| MonoError::TreeParse {
        path: path.to_string(),
        source,
    };

    let tree = Tree::from_newick_multi(&text)
        .map_err(parse_err)?
        .into_iter()
        .next()
        .ok_or_else(|| parse_err(TreeError::LogicError("no tree found".to_string())))?;

    let taxa = tree.taxa().map_err(parse_err)?;
    log::info!("Found {} tips in tree.", taxa.len());

    Ok(tree)
}

/// Tests every group of every task, keeping category order.
pub fn evaluate_tasks(
    tree: &Tree,
    tasks: &[GroupTask],
    with_support: bool,
) -> Result<Vec<Report>, MonoError> {
    let evaluator = Evaluator::new(tree, with_support)?;
    tasks
        .iter()
        .map(|task| evaluator.evaluate_task(task))
        .collect()
}
