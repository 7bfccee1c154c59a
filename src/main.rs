use abc_cost_model::{generator, inspect, logging, CliOverrides, Config};
use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::Path;

pub fn make_app() -> Command {
    Command::new("abc-cost-model")
        .about("Generate the bearing workshop Activity-Based Costing workbook")
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("PATH")
                .help("Workbook to write (env: ABC_MODEL_OUTPUT)"),
        )
        .arg(
            Arg::new("date")
                .long("date")
                .value_name("YYYY-MM-DD")
                .help("Creation date shown on the guide sheet (env: ABC_MODEL_DATE)"),
        )
        .arg(
            Arg::new("data")
                .long("data")
                .value_name("FILE")
                .help("YAML case data to use instead of the built-in case (env: ABC_MODEL_DATA)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Log progress to stderr"),
        )
        .subcommand(
            Command::new("inspect")
                .arg(Arg::new("file").required(true))
                .about("List the sheets, used ranges and formula counts of a workbook"),
        )
}

fn main() {
    // Load .env file if present (for local configuration)
    let _ = dotenvy::dotenv();

    let matches = make_app().get_matches();

    if let Err(e) = logging::init_logging(matches.get_flag("verbose")) {
        eprintln!("{}", e);
    }

    let result = match matches.subcommand_matches("inspect") {
        Some(sub_args) => handle_inspect(sub_args),
        None => handle_generate(&matches),
    };

    if let Err(e) = result {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn handle_generate(matches: &ArgMatches) -> Result<()> {
    let cli = CliOverrides {
        output: matches.get_one::<String>("output").cloned(),
        date: matches.get_one::<String>("date").cloned(),
        data: matches.get_one::<String>("data").cloned(),
    };
    let config = Config::from_env(cli)?;
    log::debug!("resolved configuration: {:?}", config);

    let data = config.load_dataset()?;
    generator::generate(&data, config.created, &config.output, |name| {
        println!("{}", generator::sheet_done_line(name));
    })?;

    for line in generator::summary_lines(&data, &config.output) {
        println!("{}", line);
    }
    Ok(())
}

fn handle_inspect(sub_args: &ArgMatches) -> Result<()> {
    let file = sub_args
        .get_one::<String>("file")
        .map(String::as_str)
        .unwrap_or_default();

    for summary in inspect::inspect_workbook(Path::new(file))? {
        println!("{}", summary);
    }
    Ok(())
}
