use super::evaluate::{MonophylyResult, Phyly};
use crate::libs::io::write_file;
use itertools::Itertools;
use std::collections::BTreeSet;
use std::path::Path;

pub const COMBINED_FILE: &str = "All_Groups_results.txt";
pub const LOG_FILE: &str = "Summary.log";

/// `Group_{category}_results.txt`. Characters that are not allowed in a file
/// name become `_`.
pub fn results_file_name(category: &str) -> String {
    format!("Group_{}_results.txt", file_stem(category))
}

fn file_stem(category: &str) -> String {
    category
        .chars()
        .map(|c| {
            if c.is_control() || "/\\:*?\"<>|".contains(c) {
                '_'
            } else {
                c
            }
        })
        .collect()
}

/// One results file name per report. A name already taken by an earlier
/// report gets a `_2`, `_3`, ... suffix.
pub fn results_file_names(reports: &[Report]) -> Vec<String> {
    let mut used = BTreeSet::new();
    let mut names = Vec::with_capacity(reports.len());

    for report in reports {
        let stem = file_stem(&report.category);
        let mut name = results_file_name(&report.category);
        let mut n = 1;
        while used.contains(&name) {
            n += 1;
            name = format!("Group_{}_{}_results.txt", stem, n);
        }
        if n > 1 {
            log::warn!(
                "Category {} is reported more than once; this copy goes to {}",
                report.category,
                name
            );
        }
        used.insert(name.clone());
        names.push(name);
    }

    names
}

/// Results of every group in one category.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub category: String,
    pub with_support: bool,
    pub rows: Vec<MonophylyResult>,
    status: Vec<String>,
}

impl Report {
    pub fn new(category: &str, with_support: bool) -> Self {
        Self {
            category: category.to_string(),
            with_support,
            rows: Vec::new(),
            status: Vec::new(),
        }
    }

    pub fn push(&mut self, result: MonophylyResult) {
        let line = match result.phyly {
            Phyly::Untestable => format!("\t{} contains only 1 taxon", result.group),
            phyly => format!("\t{} is {}", result.group, phyly),
        };
        log::info!("{}", line);
        self.status.push(line);
        self.rows.push(result);
    }

    pub fn total(&self) -> usize {
        self.rows.len()
    }

    pub fn monophyletic(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.phyly == Phyly::Monophyletic)
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.phyly == Phyly::Untestable)
            .count()
    }

    pub fn testable(&self) -> usize {
        self.total() - self.skipped()
    }

    pub fn summary(&self) -> String {
        format!(
            "Found {} monophyletic groups out of {} testable groupings.\n\
             Of {} total groupings, {} contained a single taxon and were ignored.",
            self.monophyletic(),
            self.testable(),
            self.total(),
            self.skipped()
        )
    }

    pub fn header(with_support: bool) -> String {
        let mut cols = vec!["Grouping", "Number_Contained_Taxa", "Monophyletic", "Category"];
        if with_support {
            cols.push("Support");
        }
        cols.push("Number_Interfering_Species");
        cols.push("Interfering_Species");
        cols.join("\t")
    }

    fn row(&self, r: &MonophylyResult) -> String {
        let mut cells = vec![
            r.group.clone(),
            r.taxon_count.to_string(),
            match r.phyly.is_monophyletic() {
                Some(true) => "True".to_string(),
                Some(false) => "False".to_string(),
                None => "NA".to_string(),
            },
            r.category.clone(),
        ];
        if self.with_support {
            cells.push(r.support.map_or("NA".to_string(), |s| s.to_string()));
        }
        cells.push(r.interfering.len().to_string());
        cells.push(r.interfering.iter().join(", "));
        cells.join("\t")
    }

    /// The per-category table, header first
    pub fn to_tsv(&self) -> String {
        let mut out = Self::header(self.with_support);
        out.push('\n');
        for r in &self.rows {
            out.push_str(&self.row(r));
            out.push('\n');
        }
        out
    }

    /// This category's block of the run log
    pub fn log_block(&self) -> String {
        let mut out = format!("Examining {}:\n", self.category);
        for line in &self.status {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(&self.summary());
        out.push_str("\n\n");
        out
    }
}

/// Joins tables that share a header: the first table is kept whole, the
/// header line of every later one is dropped.
///
/// ```
/// use monophy::libs::mono::report::concat_tables;
///
/// let a = "H1\tH2\na\t1\n".to_string();
/// let b = "H1\tH2\nb\t2\nc\t3\n".to_string();
/// assert_eq!(concat_tables(&[a, b]), "H1\tH2\na\t1\nb\t2\nc\t3\n");
/// ```
pub fn concat_tables(tables: &[String]) -> String {
    let mut out = String::new();
    for (i, table) in tables.iter().enumerate() {
        let body = if i == 0 {
            table.as_str()
        } else {
            table.split_once('\n').map_or("", |(_, rest)| rest)
        };
        out.push_str(body);
        if !body.is_empty() && !body.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}

/// Writes one table per category, the combined table and the run log into
/// `dir`. Existing files are replaced.
pub fn write_reports(dir: &Path, reports: &[Report]) -> anyhow::Result<()> {
    let mut tables = Vec::with_capacity(reports.len());
    let mut log = String::new();

    for (report, name) in reports.iter().zip(results_file_names(reports)) {
        let table = report.to_tsv();
        write_file(dir, &name, &table)?;
        tables.push(table);
        log.push_str(&report.log_block());
    }

    if !tables.is_empty() {
        write_file(dir, COMBINED_FILE, &concat_tables(&tables))?;
    }
    write_file(dir, LOG_FILE, &log)?;

    log::info!("Wrote {} category reports to {}", reports.len(), dir.display());
    Ok(())
}
