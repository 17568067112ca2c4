extern crate clap;
use clap::*;

mod cmd_monophy;

fn main() -> anyhow::Result<()> {
    let app = Command::new("monophy")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`monophy` - Monophyly checks of taxon groupings")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Print debug messages"),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .global(true)
                .action(ArgAction::SetTrue)
                .conflicts_with("verbose")
                .help("Only print warnings and errors"),
        )
        .subcommand(cmd_monophy::check::make_subcommand())
        .subcommand(cmd_monophy::tips::make_subcommand())
        .subcommand(cmd_monophy::root::make_subcommand())
        .after_help(
            r###"Subcommands:

* check - Test every grouping of a mapping file against a tree
* tips  - List the tips (and genera) of a tree
* root  - Root a tree on 2 to 5 outgroup tips

Progress messages go to stderr. RUST_LOG overrides -v / -q.

"###,
        );

    let matches = app.get_matches();

    let level = if matches.get_flag("verbose") {
        "debug"
    } else if matches.get_flag("quiet") {
        "warn"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .init();

    match matches.subcommand() {
        Some(("check", sub_matches)) => cmd_monophy::check::execute(sub_matches),
        Some(("tips", sub_matches)) => cmd_monophy::tips::execute(sub_matches),
        Some(("root", sub_matches)) => cmd_monophy::root::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
