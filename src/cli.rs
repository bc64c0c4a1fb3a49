use clap::{command, Arg, ArgAction, ArgGroup, Command, ValueHint};

pub fn build_command() -> Command {
    command!()
        .args([
            Arg::new("user_id")
                .short('u')
                .long("user-id")
                .alias("steamid")
                .value_name("STEAMID64")
                .help("Numeric Steam ID whose public wishlist is fetched."),
            Arg::new("export")
                .short('e')
                .long("export")
                .value_hint(ValueHint::FilePath)
                .value_name("PATH")
                .help("Wishlist JSON exported by Augmented Steam, used instead of fetching."),
            Arg::new("output")
                .short('o')
                .long("output")
                .value_hint(ValueHint::FilePath)
                .value_name("PATH")
                .help("Where to write the HTML report [default: wishlist.html]."),
            Arg::new("demos_only")
                .long("demos-only")
                .action(ArgAction::SetTrue)
                .help("Leave games without a demo out of the report."),
            Arg::new("config")
                .short('c')
                .long("config-file")
                .alias("config")
                .value_hint(ValueHint::FilePath)
                .value_name("PATH")
                .help("Path to the YAML config file."),
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Log every page and batch request."),
            Arg::new("log_file")
                .long("log-file")
                .value_hint(ValueHint::FilePath)
                .value_name("PATH")
                .help("Also append log output to this file."),
        ])
        .group(
            ArgGroup::new("source")
                .args(["user_id", "export"])
                .required(true),
        )
}
