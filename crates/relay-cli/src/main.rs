use std::path::PathBuf;

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use relay_cli::{commands, input, logging, CommandStatus, RelayConfig};
use relay_router::ArtifactRouter;

fn cli() -> Command {
    let json_flag = Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output as JSON");
    let input_arg = Arg::new("input")
        .value_name("FILE")
        .default_value(input::STDIN_PATH)
        .value_parser(value_parser!(PathBuf))
        .help("JSON array or JSON Lines of raw artifact values ('-' for stdin)");

    Command::new("artifact-relay")
        .version(relay_cli::VERSION)
        .about("Decode, render, and route chat assistant artifacts")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("log")
                .long("log")
                .global(true)
                .help("Log filter directive (overrides RUST_LOG and config)"),
        )
        .arg(
            Arg::new("max-depth")
                .long("max-depth")
                .global(true)
                .value_parser(value_parser!(u32))
                .help("Maximum JSON parses per raw value"),
        )
        .subcommand(
            Command::new("decode")
                .about("Decode raw artifact values and classify each one")
                .arg(input_arg.clone())
                .arg(json_flag.clone()),
        )
        .subcommand(
            Command::new("render")
                .about("Decode and route artifacts to render handlers")
                .arg(input_arg)
                .arg(json_flag.clone()),
        )
        .subcommand(
            Command::new("agent")
                .about("Choose the agent for a chat query")
                .arg(
                    Arg::new("query")
                        .required(true)
                        .num_args(1..)
                        .help("Query text"),
                )
                .arg(
                    Arg::new("agent")
                        .long("agent")
                        .help("Explicit agent selection ('auto' to match patterns)"),
                )
                .arg(json_flag),
        )
}

fn load_config(matches: &ArgMatches) -> anyhow::Result<RelayConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => RelayConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RelayConfig::new(),
    };
    if let Some(depth) = matches.get_one::<u32>("max-depth") {
        config = config.with_max_reencode_depth(*depth);
    }
    Ok(config)
}

fn run(matches: &ArgMatches) -> anyhow::Result<CommandStatus> {
    let config = load_config(matches)?;

    let env_filter = std::env::var("RUST_LOG").ok();
    let filter = logging::resolve_filter(
        matches.get_one::<String>("log").map(String::as_str),
        env_filter.as_deref(),
        &config.logging,
    );
    logging::init(&filter, config.logging.json)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let status = match matches.subcommand() {
        Some(("decode", args)) => {
            let decoder = config.decoder()?;
            let raws = read_input(args)?;
            commands::decode(&decoder, &raws, args.get_flag("json"), &mut out)?
        }
        Some(("render", args)) => {
            let decoder = config.decoder()?;
            let router = ArtifactRouter::with_defaults();
            let raws = read_input(args)?;
            commands::render(&decoder, &router, &raws, args.get_flag("json"), &mut out)?
        }
        Some(("agent", args)) => {
            let router = config.agent_router()?;
            let query = args
                .get_many::<String>("query")
                .map(|words| words.map(String::as_str).collect::<Vec<_>>().join(" "))
                .unwrap_or_default();
            let selection = args.get_one::<String>("agent").map(String::as_str);
            commands::agent(&router, &query, selection, args.get_flag("json"), &mut out)?
        }
        _ => CommandStatus::Clean,
    };
    Ok(status)
}

fn read_input(args: &ArgMatches) -> anyhow::Result<Vec<serde_json::Value>> {
    let path = args
        .get_one::<PathBuf>("input")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(input::STDIN_PATH));
    let raws = input::read_batch(&path)?;
    tracing::info!(count = raws.len(), path = %path.display(), "read artifact batch");
    Ok(raws)
}

fn main() {
    let matches = cli().get_matches();
    match run(&matches) {
        Ok(status) => std::process::exit(status.exit_code()),
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(2);
        }
    }
}
