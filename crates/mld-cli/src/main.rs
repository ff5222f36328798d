//! `mld`: assemble a service configuration and query its chains

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    let config = Arg::new("config")
        .long("config")
        .short('c')
        .required(true)
        .value_parser(clap::value_parser!(PathBuf))
        .help("Service configuration (.yaml, .yml, .json or .toml)");

    Command::new("mld")
        .version(mld_cli::VERSION)
        .about("Assemble and exercise decorated model chains")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("json-logs")
                .long("json-logs")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .subcommand(
            Command::new("describe")
                .about("Print identity and contracts of every served model")
                .arg(config.clone())
                .arg(
                    Arg::new("model")
                        .long("model")
                        .short('m')
                        .help("Only describe this qualified name"),
                ),
        )
        .subcommand(
            Command::new("predict")
                .about("Run one prediction")
                .arg(config)
                .arg(
                    Arg::new("model")
                        .long("model")
                        .short('m')
                        .required(true)
                        .help("Qualified name of the served model"),
                )
                .arg(
                    Arg::new("input")
                        .long("input")
                        .short('i')
                        .required(true)
                        .help("Input as a JSON object, or @path to read it from a file"),
                ),
        )
        .subcommand(Command::new("catalog").about("List registered base models and decorators"))
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn config_path(args: &ArgMatches) -> anyhow::Result<&PathBuf> {
    args.get_one::<PathBuf>("config")
        .context("--config is required")
}

fn read_input(raw: &str) -> anyhow::Result<String> {
    match raw.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("failed to read input file {path}")),
        None => Ok(raw.to_string()),
    }
}

fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    init_logging(matches.get_flag("json-logs"));

    let document = match matches.subcommand() {
        Some(("describe", args)) => {
            let service = mld_cli::load_service(config_path(args)?)?;
            match args.get_one::<String>("model") {
                Some(name) => {
                    let model = service
                        .get(name)
                        .with_context(|| format!("model '{name}' is not served"))?;
                    mld_cli::describe(model.as_ref())
                }
                None => mld_cli::describe_service(&service),
            }
        }
        Some(("predict", args)) => {
            let service = mld_cli::load_service(config_path(args)?)?;
            let model = args.get_one::<String>("model").context("--model is required")?;
            let raw = args.get_one::<String>("input").context("--input is required")?;
            mld_cli::predict(&service, model, &read_input(raw)?)?
        }
        Some(("catalog", _)) => mld_cli::catalog(),
        _ => unreachable!("subcommand is required"),
    };

    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        cli().debug_assert();
    }

    #[test]
    fn predict_requires_model_and_input() {
        let result = cli().try_get_matches_from(["mld", "predict", "--config", "a.yaml"]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_describe_with_global_flag() {
        let matches = cli()
            .try_get_matches_from(["mld", "describe", "-c", "svc.toml", "--json-logs"])
            .unwrap();
        let (name, args) = matches.subcommand().unwrap();
        assert_eq!(name, "describe");
        assert!(args.get_flag("json-logs"));
        assert_eq!(args.get_one::<PathBuf>("config"), Some(&PathBuf::from("svc.toml")));
    }

    #[test]
    fn inline_input_passes_through() {
        assert_eq!(read_input("{\"a\": 1}").unwrap(), "{\"a\": 1}");
    }
}
