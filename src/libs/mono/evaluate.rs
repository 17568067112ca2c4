use super::error::MonoError;
use super::grouping::GroupTask;
use super::report::Report;
use crate::libs::phylo::{NodeId, Tree};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Outcome of testing one group. `Untestable` is the `NA` state of
/// single-taxon groups, which are neither clades nor non-clades.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phyly {
    Monophyletic,
    Paraphyletic,
    Polyphyletic,
    Untestable,
}

impl Phyly {
    /// `Some(true)` / `Some(false)`, or `None` for untestable groups
    pub fn is_monophyletic(&self) -> Option<bool> {
        match self {
            Phyly::Monophyletic => Some(true),
            Phyly::Paraphyletic | Phyly::Polyphyletic => Some(false),
            Phyly::Untestable => None,
        }
    }
}

impl fmt::Display for Phyly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phyly::Monophyletic => "Monophyletic",
            Phyly::Paraphyletic => "Paraphyletic",
            Phyly::Polyphyletic => "Polyphyletic",
            Phyly::Untestable => "NA",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonophylyResult {
    pub group: String,
    pub category: String,
    pub taxon_count: usize,
    pub phyly: Phyly,
    /// Sorted alphabetically
    pub interfering: Vec<String>,
    pub support: Option<f64>,
}

/// Tests groups of tips against one tree. Holds no state besides a name index,
/// so evaluating the same group twice gives the same result.
pub struct Evaluator<'a> {
    tree: &'a Tree,
    name_id: BTreeMap<String, NodeId>,
    with_support: bool,
}

impl<'a> Evaluator<'a> {
    pub fn new(tree: &'a Tree, with_support: bool) -> Result<Self, MonoError> {
        Ok(Self {
            tree,
            name_id: tree.get_leaf_name_id()?,
            with_support,
        })
    }

    pub fn evaluate(
        &self,
        category: &str,
        group: &str,
        tips: &BTreeSet<String>,
    ) -> Result<MonophylyResult, MonoError> {
        let ids = tips
            .iter()
            .map(|tip| {
                self.name_id
                    .get(tip)
                    .copied()
                    .ok_or_else(|| MonoError::UnknownTip(tip.clone()))
            })
            .collect::<Result<Vec<NodeId>, MonoError>>()?;

        let mut result = MonophylyResult {
            group: group.to_string(),
            category: category.to_string(),
            taxon_count: ids.len(),
            phyly: Phyly::Untestable,
            interfering: Vec::new(),
            support: None,
        };
        if ids.len() < 2 {
            return Ok(result);
        }

        let mono = self
            .tree
            .check_monophyly(&ids)
            .map_err(crate::libs::phylo::TreeError::from)?;

        result.phyly = if mono.is_monophyletic() {
            Phyly::Monophyletic
        } else if mono.polyphyletic {
            Phyly::Polyphyletic
        } else {
            Phyly::Paraphyletic
        };

        let mut interfering: Vec<String> = mono
            .foreign
            .iter()
            .filter_map(|&id| self.tree.get_node(id).and_then(|n| n.name.clone()))
            .collect();
        interfering.sort();
        result.interfering = interfering;

        // A leaf edge carries no support value
        let defining = mono.enclosing.node();
        let is_leaf = self.tree.get_node(defining).is_some_and(|n| n.is_leaf());
        if self.with_support && mono.is_monophyletic() && !is_leaf {
            result.support = self.tree.node_support(defining);
        }

        Ok(result)
    }

    /// Evaluates every group of a category, in alphabetical group order.
    pub fn evaluate_task(&self, task: &GroupTask) -> Result<Report, MonoError> {
        log::info!("Examining {}:", task.category);
        let mut report = Report::new(&task.category, self.with_support);
        for (group, tips) in &task.groups {
            report.push(self.evaluate(&task.category, group, tips)?);
        }
        log::info!("{}", report.summary());
        Ok(report)
    }
}
