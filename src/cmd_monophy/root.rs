use clap::*;
use monophy::libs::mono::rooting::{self, RootOutcome};
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("root")
        .about("Roots a tree on outgroup tips")
        .after_help(
            r###"
Roots the first tree of a Newick file on 2 to 5 outgroup tips.

Notes:
* The new root is placed halfway along the edge above the MRCA of the tips.
* If the tips span the current root, the MRCA of all other tips is used.
* If both span the root, the tree is written unchanged with a warning.
* A tip missing from the tree is an error; nothing is written.
* `--support-as-labels` shifts internal labels so that support values stay
  on their splits.

Examples:
1. monophy root tree.nwk --tip Xenopus_laevis --tip Xenopus_tropicalis
2. monophy root tree.nwk -t A -t B -s -o rooted.nwk

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
            Arg::new("tip")
                .long("tip")
                .short('t')
                .num_args(1)
                .required(true)
                .action(ArgAction::Append)
                .help("Outgroup tip, 2 to 5 times"),
        )
        .arg(
            Arg::new("outfile")
                .short('o')
                .long("outfile")
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
        .arg(
            Arg::new("support_as_labels")
                .long("support-as-labels")
                .short('s')
                .action(ArgAction::SetTrue)
                .help("Treat internal node labels as support values and shift them when rooting"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let infile = args.get_one::<String>("infile").unwrap();
    let outgroup: Vec<String> = args.get_many::<String>("tip").unwrap().cloned().collect();
    let support_as_labels = args.get_flag("support_as_labels");

    //----------------------------
    // Ops
    //----------------------------
    let mut tree = monophy::libs::mono::read_tree(infile)?;
    if rooting::root_on_tips(&mut tree, &outgroup, support_as_labels)? == RootOutcome::Unchanged {
        log::info!("Writing the tree as read");
    }

    //----------------------------
    // Output
    //----------------------------
    let mut writer = monophy::writer(args.get_one::<String>("outfile").unwrap())?;
    writer.write_fmt(format_args!("{}\n", tree.to_newick()))?;
    writer.flush()?;

    Ok(())
}
