use clap::{arg, crate_version, Arg, Command};

pub fn build_cli() -> Command {
    let long_help = "emtf-core runs the endcap muon trigger's pattern-bank reconstruction
pipeline over one event's hit stubs, or inspects a pattern bank or the fixed
detector geometry.
Set RUST_LOG environment variable to control logging level.
  levels: trace,debug,info,warn,error

Examples:
---------
Run one event:          `emtf-core run -e event.json -b bank.bin`
Run with a config file:  `emtf-core run -e event.json -b bank.bin -c run.toml`
Inspect a bank:          `emtf-core bank -b bank.bin`
Dump the geometry LUTs:  `emtf-core geometry`";

    let mut main_cmd = Command::new("emtf-core")
        .about("Pattern-bank track reconstruction for an endcap muon trigger")
        .after_long_help(long_help)
        .version(crate_version!());

    main_cmd = main_cmd.subcommand(
        Command::new("run")
            .arg(arg!(-e --event <PATH> "path to a JSON file holding one event's raw hits").required(true))
            .arg(arg!(-b --bank <PATH> "path to a pattern-bank file").required(true))
            .arg(arg!(-c --config <PATH> "path to a run-config TOML file").required(false))
            .arg(
                Arg::new("indent")
                    .long("indent")
                    .help("pretty-print the output track list with this many spaces")
                    .value_name("SPACES")
                    .value_parser(clap::value_parser!(u16))
                    .required(false),
            )
            .about("reconstruct tracks for one event and print them as JSON"),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("bank")
            .arg(arg!(-b --bank <PATH> "path to a pattern-bank file").required(true))
            .arg(
                Arg::new("indent")
                    .long("indent")
                    .help("pretty-print the output with this many spaces")
                    .value_name("SPACES")
                    .value_parser(clap::value_parser!(u16))
                    .required(false),
            )
            .about("load a pattern bank and print its shape and summary statistics"),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("geometry")
            .arg(
                Arg::new("indent")
                    .long("indent")
                    .help("pretty-print the output with this many spaces")
                    .value_name("SPACES")
                    .value_parser(clap::value_parser!(u16))
                    .required(false),
            )
            .about("dump the fixed layer/zone geometry LUTs as JSON"),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("completions")
            .arg(
                Arg::new("shell")
                    .help("shell to generate completions for")
                    .value_name("SHELL")
                    .required(true)
                    .value_parser(["bash", "elv", "fish", "ps1", "zsh"]),
            )
            .about("generate a shell completion script on stdout"),
    );
    main_cmd
}
