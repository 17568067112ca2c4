use clap::*;
use monophy::libs::io::write_file;
use monophy::libs::mono::{grouping, report, rooting, tips};

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("check")
        .about("Tests whether groupings of tips form monophyletic clades")
        .after_help(
            r###"
Tests every grouping of a mapping file against the first tree of a Newick file.

Notes:
* Mapping file:
    * Tab separated. The first column holds tip names, every other column is a
      category whose cells name the group of each tip.
    * `NA` and empty cells leave the tip out of that category.
    * Tips absent from the tree are reported once and skipped.
* Monophyly is tested on the unrooted tree:
    * A group is monophyletic if some edge separates it from all other tips.
    * Otherwise it is Paraphyletic or Polyphyletic, and the tips inside its
      smallest enclosing clade are listed as interfering.
    * Groups of a single tip are NA and are not counted as testable.
* Support (`--support`):
    * Read from the numeric label (or NHX `B`) of the node defining the clade.
    * Labels shift with their splits when the tree is rooted.
* Rooting (`--root`):
    * 2 to 5 outgroup tips; the new root sits on the edge above their MRCA.
    * If they span the root, the MRCA of all other tips is used.
* Genera (`--genus`):
    * Adds a `Genus` category from `Genus_species` tip names. `--map` is then
      optional.
    * A category name used twice gets a numbered results file.

Outputs in <outdir>, replaced on every run:
* Group_<category>_results.txt
* All_Groups_results.txt
* Summary.log
* Tip_List.txt with `--write-tips`
* Species_List.txt and Genus_List.txt with `--write-tips --genus`
* Rooted_<tree> with `--write-root`

Examples:
1. Test the groupings of a mapping file:
   monophy check tree.nwk --map groups.tsv -o out

2. Root on two outgroups and report support values:
   monophy check tree.nwk --map groups.tsv -o out --root Xenopus_laevis --root Xenopus_tropicalis --support

3. Test genera only:
   monophy check tree.nwk --genus -o out

"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .num_args(1)
                .index(1)
                .help("Input Newick file. [stdin] for standard input"),
        )
        .arg(
            Arg::new("map")
                .long("map")
                .short('m')
                .num_args(1)
                .required_unless_present("genus")
                .help("Tab separated mapping of tips to groups"),
        )
        .arg(
            Arg::new("outdir")
                .long("outdir")
                .short('o')
                .num_args(1)
                .required(true)
                .help("Output directory"),
        )
        .arg(
            Arg::new("support")
                .long("support")
                .short('s')
                .action(ArgAction::SetTrue)
                .help("Report support values of monophyletic groups"),
        )
        .arg(
            Arg::new("root")
                .long("root")
                .short('r')
                .num_args(1)
                .action(ArgAction::Append)
                .help("Outgroup tip to root on, 2 to 5 times"),
        )
        .arg(
            Arg::new("write_root")
                .long("write-root")
                .action(ArgAction::SetTrue)
                .requires("root")
                .help("Write the rooted tree"),
        )
        .arg(
            Arg::new("write_tips")
                .long("write-tips")
                .action(ArgAction::SetTrue)
                .help("Write Tip_List.txt, plus the species and genus lists with --genus"),
        )
        .arg(
            Arg::new("genus")
                .long("genus")
                .short('g')
                .action(ArgAction::SetTrue)
                .help("Group tips by the genus part of their names"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let infile = args.get_one::<String>("infile").unwrap();
    let outdir = super::outdir(args.get_one::<String>("outdir").unwrap())?;
    let with_support = args.get_flag("support");
    let is_genus = args.get_flag("genus");

    let outgroup: Vec<String> = args
        .get_many::<String>("root")
        .map(|v| v.cloned().collect())
        .unwrap_or_default();

    //----------------------------
    // Tree
    //----------------------------
    let mut tree = monophy::libs::mono::read_tree(infile)?;

    if !outgroup.is_empty() {
        rooting::root_on_tips(&mut tree, &outgroup, with_support)?;
        if args.get_flag("write_root") {
            let mut newick = tree.to_newick();
            newick.push('\n');
            write_file(&outdir, &rooting::rooted_file_name(infile), &newick)?;
        }
    }

    let taxa = tree.taxa()?;
    if args.get_flag("write_tips") {
        write_file(&outdir, "Tip_List.txt", &tips::tip_list(&taxa))?;
        if is_genus {
            let genera = tips::genera(&taxa);
            write_file(&outdir, "Species_List.txt", &tips::species_list(&genera))?;
            write_file(&outdir, "Genus_List.txt", &tips::genus_list(&genera))?;
        }
    }

    //----------------------------
    // Groupings
    //----------------------------
    let mut tasks = vec![];
    if is_genus {
        tasks.push(grouping::genus_groups(&taxa));
    }
    if let Some(map) = args.get_one::<String>("map") {
        tasks.extend(grouping::read_mapping(map, &taxa)?);
    }

    //----------------------------
    // Output
    //----------------------------
    let reports = monophy::libs::mono::evaluate_tasks(&tree, &tasks, with_support)?;
    report::write_reports(&outdir, &reports)?;

    Ok(())
}
