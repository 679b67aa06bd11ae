use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use vibe_core::{highlight, FormatResult, PrettyConfig};
use vibe_observability::init_tracing;
use vibe_orchestrator::PrettyPrinter;

#[derive(Debug, Parser)]
#[command(name = "vibe-pprint")]
#[command(about = "Validate and pretty-print JSON, XML, YAML or plain text")]
struct Cli {
    /// File to format; `-` reads standard input.
    #[arg(default_value = "-")]
    input: PathBuf,

    /// Declared format: json, xml, yaml or text.
    #[arg(short, long, default_value = "text")]
    kind: String,

    /// Credential for the remote formatter.
    #[arg(long, env = "VIBE_PP_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    color: ColorMode,

    /// Print the result and its origin as JSON instead of plain text.
    #[arg(long)]
    json_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn enabled(self) -> bool {
        match self {
            Self::Auto => io::stdout().is_terminal(),
            Self::Always => true,
            Self::Never => false,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("vibe_cli");
    let cli = Cli::parse();

    let text = read_input(&cli.input)?;
    let printer = PrettyPrinter::from_config(PrettyConfig::from_env());

    let result = printer
        .run(&text, &cli.kind, cli.api_key.as_deref())
        .await
        .context("input rejected")?;

    tracing::debug!(
        metrics = ?printer.orchestrator().metrics().snapshot(),
        "run complete"
    );

    let rendered = render(&result, cli.json_output, cli.color.enabled())?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    if !rendered.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed reading standard input")?;
        return Ok(buffer);
    }

    fs::read_to_string(path).with_context(|| format!("failed reading {}", path.display()))
}

fn render(result: &FormatResult, json_output: bool, color: bool) -> Result<String> {
    if json_output {
        return Ok(serde_json::to_string_pretty(result)?);
    }

    if color {
        Ok(highlight(&result.content, result.kind))
    } else {
        Ok(result.content.clone())
    }
}
