use super::error::MonoError;
use super::tips;
use std::collections::{BTreeMap, BTreeSet};

/// Cell value that keeps a tip out of a category.
pub const NA: &str = "NA";

/// One category column of the mapping file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupTask {
    pub category: String,
    /// Group label -> member tips; both levels iterate alphabetically
    pub groups: BTreeMap<String, BTreeSet<String>>,
}

/// Parses a tab-separated mapping table.
///
/// Row 0 is the header: the tip column followed by one column per category.
/// Every data row must have as many cells as the header. Blank lines are
/// skipped. Cells holding `NA` (or nothing) leave the tip out of that
/// category, and tips absent from `taxa` are left out of every category.
///
/// `source` only names the table in error messages. `taxa` must be sorted.
///
/// ```
/// use monophy::libs::mono::grouping::parse_mapping;
///
/// let taxa = vec!["A".to_string(), "B".to_string(), "C".to_string()];
/// let text = "Tip\tGenus\tRegion\nA\tG1\tNorth\nB\tG1\tNA\nC\tG2\tNorth\n";
/// let tasks = parse_mapping(text, "map.txt", &taxa).unwrap();
///
/// assert_eq!(tasks.len(), 2);
/// assert_eq!(tasks[0].category, "Genus");
/// assert_eq!(tasks[0].groups["G1"].len(), 2);
/// assert_eq!(tasks[1].groups["North"].len(), 2);
/// ```
pub fn parse_mapping(
    text: &str,
    source: &str,
    taxa: &[String],
) -> Result<Vec<GroupTask>, MonoError> {
    let mut rows = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| (i + 1, line.split('\t').map(str::trim).collect::<Vec<_>>()));

    let (_, header) = rows
        .next()
        .ok_or_else(|| MonoError::malformed(source, "the file is empty"))?;
    if header.len() < 2 {
        return Err(MonoError::malformed(
            source,
            "the header needs a tip column and at least one category column",
        ));
    }

    let mut tasks: Vec<GroupTask> = header[1..]
        .iter()
        .map(|label| GroupTask {
            category: label.to_string(),
            groups: BTreeMap::new(),
        })
        .collect();

    let mut unknown = BTreeSet::new();
    for (line_no, cells) in rows {
        if cells.len() != header.len() {
            return Err(MonoError::malformed(
                source,
                format!(
                    "line {} has {} columns, the header has {}",
                    line_no,
                    cells.len(),
                    header.len()
                ),
            ));
        }

        let tip = cells[0];
        if taxa.binary_search_by(|t| t.as_str().cmp(tip)).is_err() {
            unknown.insert(tip.to_string());
            continue;
        }

        for (task, &group) in tasks.iter_mut().zip(&cells[1..]) {
            if group.is_empty() || group == NA {
                continue;
            }
            task.groups
                .entry(group.to_string())
                .or_default()
                .insert(tip.to_string());
        }
    }

    for tip in &unknown {
        log::warn!("{} from {} is not a tip of the tree and was skipped", tip, source);
    }

    for task in &tasks {
        log::info!("Category: {}", task.category);
        for (group, members) in &task.groups {
            log::info!("\tSubgroup {} contains {} taxa.", group, members.len());
        }
    }

    Ok(tasks)
}

/// Reads and parses a mapping file.
pub fn read_mapping(path: &str, taxa: &[String]) -> anyhow::Result<Vec<GroupTask>> {
    log::info!("Examining tips and groupings in map file {}", path);
    let text = crate::libs::io::read_to_string(path)?;
    Ok(parse_mapping(&text, path, taxa)?)
}

/// A `Genus` category built from `Genus_species` tip names.
pub fn genus_groups(taxa: &[String]) -> GroupTask {
    let groups = tips::genera(taxa)
        .into_iter()
        .map(|(genus, species)| (genus, species.into_iter().collect()))
        .collect();

    GroupTask {
        category: "Genus".to_string(),
        groups,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taxa(names: &[&str]) -> Vec<String> {
        let mut v: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        v.sort();
        v
    }

    #[test]
    fn test_parse_basic() {
        let text = "Tip\tCat\nA\tG1\nB\tG1\nC\tG2\nD\tG2\n";
        let tasks = parse_mapping(text, "map", &taxa(&["A", "B", "C", "D"])).unwrap();

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].category, "Cat");
        let groups: Vec<&String> = tasks[0].groups.keys().collect();
        assert_eq!(groups, vec!["G1", "G2"]);
        assert_eq!(
            tasks[0].groups["G2"].iter().collect::<Vec<_>>(),
            vec!["C", "D"]
        );
    }

    #[test]
    fn test_parse_na_unknown_and_blank_lines() {
        let text = "Tip\tGenus\tRegion\r\n\r\nA\tHyla\tNA\r\nB\tHyla\tEast\r\nZ\tRana\tEast\r\n\n";
        let tasks = parse_mapping(text, "map", &taxa(&["A", "B"])).unwrap();

        assert_eq!(tasks.len(), 2);
        // Z is not in the tree, so Rana has no valid member and is dropped
        assert_eq!(tasks[0].groups.len(), 1);
        assert_eq!(tasks[0].groups["Hyla"].len(), 2);
        // A is NA for Region
        assert_eq!(tasks[1].groups["East"].iter().collect::<Vec<_>>(), vec!["B"]);
    }

    #[test]
    fn test_parse_category_order() {
        let text = "Tip\tZeta\tAlpha\nA\tx\ty\n";
        let tasks = parse_mapping(text, "map", &taxa(&["A"])).unwrap();
        let order: Vec<&str> = tasks.iter().map(|t| t.category.as_str()).collect();
        assert_eq!(order, vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn test_parse_empty_category_kept() {
        let text = "Tip\tGenus\tRegion\nA\tHyla\tNA\n";
        let tasks = parse_mapping(text, "map", &taxa(&["A"])).unwrap();
        assert_eq!(tasks.len(), 2);
        assert!(tasks[1].groups.is_empty());
    }

    #[test]
    fn test_parse_malformed() {
        let all = taxa(&["A", "B"]);

        let err = parse_mapping("", "empty.txt", &all).unwrap_err();
        assert!(matches!(err, MonoError::MalformedMapping { .. }));
        assert!(err.to_string().contains("empty.txt"));

        let err = parse_mapping("Tip\nA\n", "map", &all).unwrap_err();
        assert!(matches!(err, MonoError::MalformedMapping { .. }));

        let err = parse_mapping("Tip\tCat\nA\tG1\nB\n", "map", &all).unwrap_err();
        assert!(err.to_string().contains("line 3 has 1 columns"));
    }

    #[test]
    fn test_genus_groups() {
        let task = genus_groups(&taxa(&["Hyla_cinerea", "Hyla_versicolor", "Rana_pipiens"]));
        assert_eq!(task.category, "Genus");
        assert_eq!(task.groups["Hyla"].len(), 2);
        assert_eq!(task.groups["Rana"].len(), 1);
    }
}
