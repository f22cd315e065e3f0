//! postmap CLI - Command-line tool for the object-to-wire mapping engine
//!
//! This binary provides command-line interfaces for:
//! - render: map a domain object given as JSON to its wire form
//! - upsert: build a suppression list create-or-update body from addresses
//! - routines: list the registered conversion routines

use clap::{Parser, Subcommand, ValueEnum};
use postmap_codec::{DataMapper, Entity, MapperOptions};
use postmap_format::{MapError, WireMapping};
use postmap_model::{
    payloads, routines, Address, Attachment, Content, File, InlineImage, MessageEventsQuery,
    Options, Recipient, RecipientList, Subaccount, Suppression, SuppressionsQuery, Transmission,
    Webhook,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::error::Error;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "postmap")]
#[command(about = "Render mail API domain objects as wire JSON")]
#[command(version)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Map a domain object to its wire form
    ///
    /// Examples:
    ///   postmap render --entity transmission send.json --pretty
    ///   postmap render --entity message-events-query query.json --config opts.toml
    Render {
        /// Kind of domain object in the input
        #[arg(long, value_enum)]
        entity: EntityKind,
        /// Input file with the object as JSON ("-" for stdin)
        input: PathBuf,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
        /// Mapper options as TOML
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Build a suppression create-or-update body, one address per line
    Upsert {
        /// Input file with one address per line ("-" for stdin)
        input: PathBuf,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
    /// List registered conversion routines
    Routines,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum EntityKind {
    Transmission,
    Recipient,
    RecipientList,
    Address,
    Options,
    Content,
    Attachment,
    InlineImage,
    File,
    Suppression,
    Webhook,
    Subaccount,
    MessageEventsQuery,
    SuppressionsQuery,
}

impl EntityKind {
    fn render(self, mapper: &DataMapper, json: &str) -> Result<Option<WireMapping>, MapError> {
        match self {
            EntityKind::Transmission => map_json::<Transmission>(mapper, json),
            EntityKind::Recipient => map_json::<Recipient>(mapper, json),
            EntityKind::RecipientList => map_json::<RecipientList>(mapper, json),
            EntityKind::Address => map_json::<Address>(mapper, json),
            EntityKind::Options => map_json::<Options>(mapper, json),
            EntityKind::Content => map_json::<Content>(mapper, json),
            EntityKind::Attachment => map_json::<Attachment>(mapper, json),
            EntityKind::InlineImage => map_json::<InlineImage>(mapper, json),
            EntityKind::File => map_json::<File>(mapper, json),
            EntityKind::Suppression => map_json::<Suppression>(mapper, json),
            EntityKind::Webhook => map_json::<Webhook>(mapper, json),
            EntityKind::Subaccount => map_json::<Subaccount>(mapper, json),
            EntityKind::MessageEventsQuery => map_json::<MessageEventsQuery>(mapper, json),
            EntityKind::SuppressionsQuery => map_json::<SuppressionsQuery>(mapper, json),
        }
    }
}

fn map_json<T>(mapper: &DataMapper, json: &str) -> Result<Option<WireMapping>, MapError>
where
    T: Entity + DeserializeOwned,
{
    let value: T = serde_json::from_str(json)?;
    Ok(mapper.to_wire(&value))
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Render {
            entity,
            input,
            output,
            pretty,
            config,
        } => {
            handle_render(entity, &input, output.as_deref(), pretty, config.as_deref())?;
        }
        Commands::Upsert {
            input,
            output,
            pretty,
        } => {
            handle_upsert(&input, output.as_deref(), pretty)?;
        }
        Commands::Routines => {
            handle_routines()?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn handle_render(
    entity: EntityKind,
    input: &Path,
    output: Option<&Path>,
    pretty: bool,
    config: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let options = load_options(config)?;
    let mapper = routines::data_mapper(options)?;
    let json = read_input(input)?;

    let wire = entity.render(&mapper, &json)?;
    info!(entity = ?entity, absent = wire.is_none(), "rendered");
    if let Some(mapping) = &wire {
        debug!(keys = ?mapping.keys().collect::<Vec<_>>(), "wire keys");
    }
    let value = wire.map_or(Value::Null, Value::Object);
    write_output(&value, output, pretty)
}

fn handle_upsert(input: &Path, output: Option<&Path>, pretty: bool) -> Result<(), Box<dyn Error>> {
    let mapper = routines::data_mapper(MapperOptions::default())?;
    let text = read_input(input)?;
    let emails: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    debug!(count = emails.len(), "read addresses");

    let body = payloads::suppression_upsert_from_emails(&mapper, emails);
    write_output(&Value::Object(body), output, pretty)
}

fn handle_routines() -> Result<(), Box<dyn Error>> {
    let registry = routines::registry()?;
    let mut stdout = std::io::stdout().lock();
    for name in registry.routine_names() {
        let type_name = registry.type_name_of(name).unwrap_or("?");
        writeln!(stdout, "{name}\t{type_name}")?;
    }
    stdout.flush()?;
    Ok(())
}

fn load_options(config: Option<&Path>) -> Result<MapperOptions, MapError> {
    let Some(path) = config else {
        return Ok(MapperOptions::default());
    };
    let text = fs::read_to_string(path)?;
    let options: MapperOptions = toml::from_str(&text)
        .map_err(|err| MapError::Config(format!("{}: {err}", path.display())))?;
    options.validate()?;
    debug!(path = %path.display(), ?options, "loaded mapper options");
    Ok(options)
}

fn read_input(input: &Path) -> Result<String, MapError> {
    if input == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    Ok(fs::read_to_string(input)?)
}

fn write_output(value: &Value, output: Option<&Path>, pretty: bool) -> Result<(), Box<dyn Error>> {
    let mut text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    text.push('\n');

    match output {
        Some(path) => fs::write(path, text)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
