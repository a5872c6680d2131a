use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, Command};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use modelgen::model::{Document, File};
use modelgen::renderer::{DependencyManager, Generator};
use modelgen::settings::{LineTerminator, Settings};
use modelgen::{java, markup};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn command() -> Command {
    Command::new("modelgen")
        .about("Render a JSON source model as code")
        .arg(
            Arg::new("input")
                .help("JSON model file (a Java file or a markup document)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("target")
                .long("target")
                .short('t')
                .help("Output language")
                .value_parser(["java", "markup"])
                .default_value("java"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Settings file (defaults to <config dir>/modelgen/settings.toml)")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("indent")
                .long("indent")
                .help("Spaces per indentation level")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("crlf")
                .long("crlf")
                .help("Terminate lines with CRLF")
                .action(ArgAction::SetTrue),
        )
}

fn main() -> Result<()> {
    init_tracing();
    let matches = command().get_matches();

    let input = matches
        .get_one::<String>("input")
        .context("missing input file")?;
    let target = matches
        .get_one::<String>("target")
        .map(String::as_str)
        .unwrap_or("java");

    let config = matches.get_one::<PathBuf>("config").map(PathBuf::as_path);
    let mut settings = Settings::load_or_default(config).context("failed to load settings")?;
    if let Some(indent) = matches.get_one::<usize>("indent") {
        settings.indent = *indent;
    }
    if matches.get_flag("crlf") {
        settings.line_terminator = LineTerminator::Crlf;
    }
    debug!(?settings, language = target, "settings resolved");

    let json = fs::read_to_string(input).with_context(|| format!("failed to read {}", input))?;

    let output = match target {
        "java" => {
            let file: File = serde_json::from_str(&json)
                .with_context(|| format!("{} is not a valid Java model", input))?;
            file.validate()
                .with_context(|| format!("invalid model in {}", input))?;
            let deps = settings.dependency_manager(java::ignore_patterns())?;
            configure(Generator::new(java::transform_factory(), deps), &settings).render(&file)
        }
        "markup" => {
            let document: Document = serde_json::from_str(&json)
                .with_context(|| format!("{} is not a valid markup model", input))?;
            document
                .validate()
                .with_context(|| format!("invalid model in {}", input))?;
            configure(
                Generator::new(markup::transform_factory(), DependencyManager::default()),
                &settings,
            )
            .render(&document)
        }
        other => bail!("unknown target `{}`", other),
    };

    print!("{}", output.unwrap_or_default());
    Ok(())
}

fn configure(generator: Generator, settings: &Settings) -> Generator {
    generator
        .with_format(settings.format())
        .with_max_depth(settings.max_depth)
}
