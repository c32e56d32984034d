use clap::{Arg, ArgAction, Command};
use tracing::info;

use knut::{load_async, parse_lines, DynamicRecord, FieldKind};

fn parse_field(spec: &str) -> Result<(String, FieldKind), String> {
    let (name, kind) = spec
        .split_once(':')
        .ok_or_else(|| format!("expected NAME:KIND, got '{}'", spec))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing field name in '{}'", spec));
    }
    Ok((name.to_string(), kind.parse()?))
}

fn check_syntax(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let file = std::fs::File::open(path).map_err(|e| format!("failed to read {}: {}", path, e))?;
    let mut entries = parse_lines(std::io::BufReader::new(file));
    let mut count = 0;
    for entry in entries.by_ref() {
        let entry = entry?;
        println!("{}={}", entry.key, entry.value);
        count += 1;
    }
    info!("{}: {} entries in {} lines", path, count, entries.lines_read());
    Ok(())
}

async fn check_fields(path: &str, specs: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let mut record = DynamicRecord::new();
    for spec in specs {
        let (name, kind) = parse_field(spec)?;
        record.declare(name, kind);
    }

    load_async(path, &mut record).await?;

    for field in record.iter() {
        if let Some(value) = &field.value {
            println!("{} = {}", field.name, value);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let matches = Command::new("knut-check")
        .about("Validates a KEY=VALUE config file")
        .arg(
            Arg::new("file")
                .help("Path to config file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("field")
                .long("field")
                .short('f')
                .value_name("NAME:KIND")
                .help("Declare a typed field, e.g. Port:u16 or Hosts:[string]")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .default_value("INFO")
                .help("DEBUG, INFO, WARN or ERROR"),
        )
        .get_matches();

    let log_level = matches
        .get_one::<String>("log-level")
        .map(|s| s.to_uppercase())
        .unwrap_or_default();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(match log_level.as_str() {
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => tracing::Level::INFO,
        })
        .init();

    // Required by clap, so always present.
    let path = matches.get_one::<String>("file").cloned().unwrap_or_default();
    let specs: Vec<String> = matches
        .get_many::<String>("field")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    let result = if specs.is_empty() {
        check_syntax(&path)
    } else {
        check_fields(&path, &specs).await
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
