use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use slimsheet::database::selector::ColumnSelector;
use slimsheet::expand::expand_delimited;
use slimsheet::expand::ExpandOptions;
use slimsheet::packager::config::PackagerConfig;
use slimsheet::packager::installer::PipInstaller;
use slimsheet::packager::OutputFormat;
use slimsheet::packager::Packager;
use std::fs::File;
use std::io;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::trace;

/// Slim down Python lambda packages and expand delimited table columns
#[derive(Parser)]
#[command(name = "slimsheet", version)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install, slim down and package the dependencies of a lambda function
    Package(PackageArgs),
    /// Split a delimited column of a table into new columns
    Expand(ExpandArgs),
}

#[derive(Args)]
struct PackageArgs {
    /// The working directory for the lambda function code
    #[arg(long)]
    wd: PathBuf,

    /// Only clean up old runs to revert changes to the working directory
    #[arg(long)]
    clean_up: bool,

    /// Produce the final output as files or as a zip
    #[arg(long, value_enum, default_value_t = OutputFormat::Zip)]
    output_format: OutputFormat,

    /// Package installer program
    #[arg(long, default_value = "pip")]
    installer: String,

    /// Requirements file name inside the working directory
    #[arg(long, default_value = "requirements.txt")]
    requirements_file: String,

    /// Exclusion patterns file name inside the working directory
    #[arg(long, default_value = "anti-requirements.txt")]
    exclusions_file: String,
}

#[derive(Args)]
struct ExpandArgs {
    /// Input table with a header row, `-` for stdin
    input: PathBuf,

    /// Output file, stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Field delimiter of the input and output tables
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Name of the column to split
    #[arg(long)]
    column_name: Option<String>,

    /// Zero-based index of the column to split
    #[arg(long)]
    column_index: Option<usize>,

    /// Separator used to split cell text
    #[arg(long, default_value = "|")]
    separator: String,

    /// Character used to re-join overflow parts (defaults to the separator)
    #[arg(long)]
    join_char: Option<String>,

    /// Value used to pad missing parts
    #[arg(long, default_value = "NA")]
    missing_value: String,

    /// Base name of the generated columns (defaults to the source column)
    #[arg(long)]
    new_column_name: Option<String>,

    /// Keep each row's parts as a single list value instead of new columns
    #[arg(long)]
    no_expand: bool,

    /// Keep the source column when the original columns are output
    #[arg(long)]
    keep_old: bool,

    /// Fixed number of generated columns, 0 for as many as needed
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    max_column_split: i64,

    /// Output the original columns alongside the new ones
    #[arg(long)]
    with_original: bool,
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(cli.verbose >= 2)
        .with_writer(io::stderr)
        .init();

    debug!("slimsheet started with verbosity level: {}", cli.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());

    let result = match cli.command {
        Commands::Package(args) => run_package(args),
        Commands::Expand(args) => run_expand(args),
    };

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run_package(args: PackageArgs) -> Result<()> {
    let config = PackagerConfig {
        requirements_file: args.requirements_file,
        exclusions_file: args.exclusions_file,
        ..PackagerConfig::default()
    };
    let packager = Packager::new(config, PipInstaller::new(args.installer));

    if args.clean_up {
        let removed = packager
            .clean_up_previous_run(&args.wd)
            .with_context(|| format!("Failed to clean up '{}'", args.wd.display()))?;
        info!("all done, removed {} files/dirs ...", removed);
        return Ok(());
    }

    let summary = packager
        .run(&args.wd, args.output_format)
        .with_context(|| format!("Failed to package '{}'", args.wd.display()))?;
    info!(
        "all done: kept {} of {} installed files in ({})",
        summary.kept,
        summary.installed,
        summary.output.display()
    );
    Ok(())
}

fn run_expand(args: ExpandArgs) -> Result<()> {
    if !args.delimiter.is_ascii() {
        bail!("Delimiter '{}' must be a single ASCII character", args.delimiter);
    }
    let delimiter = args.delimiter as u8;
    let selector = ColumnSelector {
        name: args.column_name,
        index: args.column_index,
    };
    let options = ExpandOptions {
        separator: args.separator,
        join_char: args.join_char,
        missing_value: args.missing_value,
        new_column_name: args.new_column_name,
        expand: !args.no_expand,
        drop_old: !args.keep_old,
        max_column_split: args.max_column_split,
        new_data_only: !args.with_original,
    };

    let reader: Box<dyn Read> = if args.input.as_os_str() == "-" {
        Box::new(io::stdin().lock())
    } else {
        let file = File::open(&args.input)
            .with_context(|| format!("Failed to open '{}'", args.input.display()))?;
        Box::new(BufReader::new(file))
    };
    let writer: Box<dyn Write> = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create '{}'", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    let source = args.input.display().to_string();
    let rows = expand_delimited(&source, reader, writer, delimiter, &selector, &options)
        .context("Failed to expand table")?;
    debug!("wrote {} rows", rows);
    Ok(())
}
