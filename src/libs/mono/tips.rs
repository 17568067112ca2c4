use std::collections::BTreeMap;

/// Genus part of a `Genus_species` tip name.
pub fn genus_of(tip: &str) -> &str {
    tip.split('_').next().unwrap_or(tip)
}

/// Genus -> its tips, in the order they appear in `taxa`.
pub fn genera(taxa: &[String]) -> BTreeMap<String, Vec<String>> {
    let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for tip in taxa {
        map.entry(genus_of(tip).to_string())
            .or_default()
            .push(tip.clone());
    }
    map
}

/// `Tip_List.txt`
pub fn tip_list(taxa: &[String]) -> String {
    let mut out = String::from("Tip\n");
    for tip in taxa {
        out.push_str(tip);
        out.push('\n');
    }
    out
}

/// `Species_List.txt`, rows grouped by genus
pub fn species_list(genera: &BTreeMap<String, Vec<String>>) -> String {
    let mut out = String::from("Species\tGenus\n");
    for (genus, species) in genera {
        for sp in species {
            out.push_str(&format!("{}\t{}\n", sp, genus));
        }
    }
    out
}

/// `Genus_List.txt`
pub fn genus_list(genera: &BTreeMap<String, Vec<String>>) -> String {
    let mut out = String::from("Genus\n");
    for genus in genera.keys() {
        out.push_str(genus);
        out.push('\n');
    }
    out
}
