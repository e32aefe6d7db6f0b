use std::error::Error;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use clap::{ArgAction, Parser};
use serde_json::Value;
use tag_content::{
    append_with_options, AppendOptions, Charset, DefaultHtmlEncoder, DefaultTagHelperContent,
    HtmlString,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tag-content", version, about = "Append values to tag helper content with HTML encoding")]
struct Args {
    /// Input file path. Omit or use '-' to read from stdin.
    input: Option<String>,

    /// Output file path (prints to stdout if omitted).
    #[arg(short, long, value_name = "file")]
    output: Option<String>,

    /// Treat the input as pre-escaped markup and append it verbatim.
    #[arg(long, conflicts_with = "json")]
    raw: bool,

    /// Parse the input as JSON; arrays append each element in order.
    #[arg(long)]
    json: bool,

    /// JSON file with append options ({"charset": "...", "escape_quotes": bool}).
    #[arg(long, value_name = "file")]
    config: Option<String>,

    /// Character encoding reported to writers (default: utf-8).
    #[arg(long, value_name = "name", value_parser = parse_charset)]
    charset: Option<Charset>,

    /// Encode every non-ASCII character as a numeric reference.
    #[arg(long = "ascii-only")]
    ascii_only: bool,

    /// Leave double quotes in encoded text as-is.
    #[arg(long = "no-escape-quotes", action = ArgAction::SetTrue)]
    no_escape_quotes: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Text,
    Raw,
    Json,
}

#[derive(Debug)]
enum InputSource {
    Stdin,
    File(String),
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);
    if let Err(err) = run(&args) {
        eprintln!("ERROR  {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let options = resolve_options(args)?;
    let encoder = if args.ascii_only || !options.charset.is_unicode() {
        DefaultHtmlEncoder::ascii_only()
    } else {
        DefaultHtmlEncoder::new()
    };
    let mode = resolve_mode(args);
    tracing::debug!(?mode, charset = %options.charset, ascii_only = encoder.is_ascii_only(), "resolved options");

    let (input, input_source) = read_input(args.input.as_deref())?;
    let mut content = DefaultTagHelperContent::new();

    match mode {
        Mode::Text => {
            append_with_options(&mut content, &encoder, input.as_str(), &options)?;
        }
        Mode::Raw => {
            let markup = HtmlString::new(&input);
            append_with_options(&mut content, &encoder, &markup, &options)?;
        }
        Mode::Json => {
            let value: Value = serde_json::from_str(&input)?;
            match &value {
                Value::Array(items) => {
                    for item in items {
                        append_with_options(&mut content, &encoder, item, &options)?;
                    }
                }
                other => {
                    append_with_options(&mut content, &encoder, other, &options)?;
                }
            }
        }
    }
    tracing::info!(chunks = content.chunks().count(), "content rendered");

    let output = OutputTarget::from_arg(args.output.as_deref());
    write_output(output.path(), content.content().as_bytes())?;
    if let OutputTarget::File(path) = &output {
        report_status(&input_source, path);
    }
    Ok(())
}

fn resolve_options(args: &Args) -> Result<AppendOptions, Box<dyn Error>> {
    let mut options = match args.config.as_deref() {
        Some(path) => {
            let raw = fs::read_to_string(path)?;
            serde_json::from_str::<AppendOptions>(&raw)?
        }
        None => AppendOptions::default(),
    };
    if let Some(charset) = args.charset {
        options = options.with_charset(charset);
    }
    if args.no_escape_quotes {
        options = options.with_escape_quotes(false);
    }
    Ok(options)
}

fn resolve_mode(args: &Args) -> Mode {
    if args.raw {
        Mode::Raw
    } else if args.json {
        Mode::Json
    } else {
        Mode::Text
    }
}

fn parse_charset(raw: &str) -> Result<Charset, String> {
    raw.parse::<Charset>().map_err(|err| err.to_string())
}

fn read_input(input: Option<&str>) -> Result<(String, InputSource), Box<dyn Error>> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok((buf, InputSource::Stdin))
        }
        Some(path) => {
            let buf = fs::read_to_string(path)?;
            Ok((buf, InputSource::File(path.to_string())))
        }
    }
}

#[derive(Clone, Debug)]
enum OutputTarget {
    Stdout,
    File(String),
}

impl OutputTarget {
    fn from_arg(output: Option<&str>) -> Self {
        match output {
            Some(path) if path != "-" => OutputTarget::File(path.to_string()),
            _ => OutputTarget::Stdout,
        }
    }

    fn path(&self) -> Option<&str> {
        match self {
            OutputTarget::Stdout => None,
            OutputTarget::File(path) => Some(path.as_str()),
        }
    }
}

fn write_output(path: Option<&str>, data: &[u8]) -> Result<(), Box<dyn Error>> {
    match path {
        Some(path) => {
            let mut file = fs::File::create(path)?;
            file.write_all(data)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(data)?;
            handle.flush()?;
        }
    }
    Ok(())
}

fn report_status(input_source: &InputSource, output_path: &str) {
    let input_label = match input_source {
        InputSource::Stdin => "stdin".to_string(),
        InputSource::File(path) => display_name(path),
    };
    println!("✔ Rendered {input_label} → {}", display_name(output_path));
}

fn display_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}
