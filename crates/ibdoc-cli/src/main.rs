use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use ibdoc::{template, ContentMode, Document, Editor, RenderConfig, TracingObserver};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "ibdoc",
    version,
    about = "Edit Interface Builder launch screen storyboards"
)]
struct Cli {
    /// Spaces per nesting level in rendered XML
    #[arg(long, global = true, default_value_t = 4)]
    indent: usize,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the default launch screen storyboard
    Template {
        /// Output file (defaults to stdout)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },
    /// Show an image in the splash slot
    Attach {
        /// Image resource name
        #[arg(long)]
        image: String,
        /// How the image fills the screen
        #[arg(long, default_value = "scaleAspectFit")]
        content_mode: ContentMode,
        /// Container background as a CSS color
        #[arg(long)]
        background: Option<String>,
        #[command(flatten)]
        io: InOut,
    },
    /// Remove the splash image and its resource
    Detach {
        /// Image resource name
        #[arg(long)]
        image: String,
        #[command(flatten)]
        io: InOut,
    },
    /// Parse and re-render a storyboard
    Fmt {
        #[command(flatten)]
        io: InOut,
    },
    /// Print the generic tree as JSON
    Dump {
        /// Input file (defaults to stdin)
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,
        /// Rewrite `xKey` keys to `key` first
        #[arg(long)]
        normalize: bool,
    },
    /// Print the id derived from FIELDS
    Id {
        #[arg(required = true, value_name = "FIELDS")]
        fields: Vec<String>,
    },
}

#[derive(Debug, Args)]
struct InOut {
    /// Input file (defaults to stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let render = RenderConfig::with_indent(cli.indent);
    match cli.command {
        Command::Template { output } => {
            let doc = template::launch_screen();
            write_output(&output, ibdoc::to_string_with_config(&doc, render).as_bytes())?;
        }
        Command::Attach {
            image,
            content_mode,
            background,
            io,
        } => {
            let mut doc = read_document(&io.input)?;
            let mut editor = Editor::with_observer(&mut doc, &TracingObserver);
            editor
                .attach_image(&image, content_mode)
                .with_context(|| format!("failed to attach image {image}"))?;
            if let Some(color) = background {
                editor
                    .set_background_color(&color)
                    .with_context(|| format!("failed to set background color {color}"))?;
            }
            info!(image = %image, mode = %content_mode, "attached splash image");
            write_output(&io.output, ibdoc::to_string_with_config(&doc, render).as_bytes())?;
        }
        Command::Detach { image, io } => {
            let mut doc = read_document(&io.input)?;
            Editor::with_observer(&mut doc, &TracingObserver)
                .detach_image(&image)
                .with_context(|| format!("failed to detach image {image}"))?;
            info!(image = %image, "detached splash image");
            write_output(&io.output, ibdoc::to_string_with_config(&doc, render).as_bytes())?;
        }
        Command::Fmt { io } => {
            let doc = read_document(&io.input)?;
            write_output(&io.output, ibdoc::to_string_with_config(&doc, render).as_bytes())?;
        }
        Command::Dump { input, normalize } => {
            let doc = read_document(&input)?;
            let doc = if normalize {
                doc.restore_reserved_keys()?
            } else {
                doc
            };
            let mut json = serde_json::to_string_pretty(&doc.to_value())?;
            json.push('\n');
            write_output(&None, json.as_bytes())?;
        }
        Command::Id { fields } => {
            let id = ibdoc::generate_id(&fields);
            write_output(&None, format!("{id}\n").as_bytes())?;
        }
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn read_document(path: &Option<PathBuf>) -> Result<Document> {
    let input = read_input(path)?;
    let source = path
        .as_ref()
        .map_or_else(|| "stdin".to_string(), |p| p.display().to_string());
    ibdoc::from_str(&input).with_context(|| format!("failed to parse {source}"))
}

fn read_input(path: &Option<PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            if buffer.trim().is_empty() {
                bail!("no input provided on stdin");
            }
            Ok(buffer)
        }
    }
}

fn write_output(path: &Option<PathBuf>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, data)
            .with_context(|| format!("failed to write output file {}", path.display())),
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(data).context("failed to write stdout")?;
            Ok(())
        }
    }
}
