//! CLI 主程序入口

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sheetloc::core::{
    localize_document_from_data, print_error_message, SheetlocError, SheetlocOptions,
};

#[derive(Parser)]
#[command(
    name = "sheetloc",
    version,
    about = "Annotate character-sheet HTML for localization",
    long_about = "Scans a character-sheet HTML document for human-readable text, \
annotates the tree with stable i18n lookup keys, and writes a key-to-text \
mapping file alongside the annotated document."
)]
struct Cli {
    /// Input HTML file
    input: PathBuf,

    /// Output HTML file [default: <INPUT>.i18n.html]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Key/text mapping output file
    #[arg(short, long, default_value = "translations.json")]
    mapping: PathBuf,

    /// Additional tag to exclude from extraction (repeatable)
    #[arg(long = "skip-tag", value_name = "TAG")]
    skip_tags: Vec<String>,

    /// Additional formatting tag to preserve inside text (repeatable)
    #[arg(long = "preserve-tag", value_name = "TAG")]
    preserve_tags: Vec<String>,

    /// Keep original attributes next to their annotations
    #[arg(short = 'k', long)]
    keep_original_attributes: bool,

    /// Output character encoding (e.g. utf-8, windows-1250)
    #[arg(short, long)]
    encoding: Option<String>,

    /// Exclude timestamp metadata comment from the output
    #[arg(long)]
    no_metadata: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error_message(&format!("Error: {err}"));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), SheetlocError> {
    let input_data = fs::read(&cli.input)
        .map_err(|e| SheetlocError::new(&format!("failed to read {}: {e}", cli.input.display())))?;

    let options = SheetlocOptions {
        encoding: cli.encoding.clone(),
        keep_original_attributes: cli.keep_original_attributes,
        no_metadata: cli.no_metadata,
        preserve_tags: cli.preserve_tags.clone(),
        silent: !cli.verbose,
        skip_tags: cli.skip_tags.clone(),
    };

    let input_name = cli
        .input
        .file_name()
        .map(|name| name.to_string_lossy().to_string());

    let result = localize_document_from_data(&options, input_data, None, input_name)?;

    let output_path = cli.output.unwrap_or_else(|| default_output_path(&cli.input));

    fs::write(&output_path, &result.html).map_err(|e| {
        SheetlocError::new(&format!("failed to write {}: {e}", output_path.display()))
    })?;

    let mut mapping = result.mapping_json.clone();
    mapping.push('\n');
    fs::write(&cli.mapping, mapping).map_err(|e| {
        SheetlocError::new(&format!("failed to write {}: {e}", cli.mapping.display()))
    })?;

    info!(
        document = %output_path.display(),
        mapping = %cli.mapping.display(),
        keys = result.key_count,
        "localization annotation finished"
    );

    if !options.silent {
        if let Some(title) = &result.title {
            println!("Annotated \"{}\": {} key(s)", title.trim(), result.key_count);
        } else {
            println!("Annotated document: {} key(s)", result.key_count);
        }
    }

    Ok(())
}

/// 由输入路径推导默认输出路径（<stem>.i18n.html）
fn default_output_path(input: &std::path::Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());

    input.with_file_name(format!("{stem}.i18n.html"))
}
