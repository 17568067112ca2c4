use clap::*;
use monophy::libs::io::write_file;
use monophy::libs::mono::tips;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("tips")
        .about("Lists the tips of a tree")
        .after_help(
            r###"
Writes Tip_List.txt into <outdir>, one tip per line in alphabetical order.

With `--genus`, tips named `Genus_species` are also split into
Species_List.txt (species and genus) and Genus_List.txt.

The lists can be used as a starting point for a mapping file.

Examples:
1. monophy tips tree.nwk -o out
2. monophy tips tree.nwk -o out --genus

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
            Arg::new("outdir")
                .long("outdir")
                .short('o')
                .num_args(1)
                .required(true)
                .help("Output directory"),
        )
        .arg(
            Arg::new("genus")
                .long("genus")
                .short('g')
                .action(ArgAction::SetTrue)
                .help("Also write species and genus lists"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let infile = args.get_one::<String>("infile").unwrap();
    let outdir = super::outdir(args.get_one::<String>("outdir").unwrap())?;

    let tree = monophy::libs::mono::read_tree(infile)?;
    let taxa = tree.taxa()?;

    write_file(&outdir, "Tip_List.txt", &tips::tip_list(&taxa))?;

    if args.get_flag("genus") {
        let genera = tips::genera(&taxa);
        log::info!("Found {} genera.", genera.len());
        write_file(&outdir, "Species_List.txt", &tips::species_list(&genera))?;
        write_file(&outdir, "Genus_List.txt", &tips::genus_list(&genera))?;
    }

    Ok(())
}
