use clap::{ArgAction, Parser, Subcommand};
use imgfit::config::{self, ResizeConfig};
use imgfit::{imaging, output};
use std::path::PathBuf;
use std::process::ExitCode;

/// Flags that override values from the config file.
#[derive(clap::Args)]
struct ResizeArgs {
    /// Image to shrink (.jpg, .jpeg, .png or .gif; anything else is skipped)
    file: PathBuf,

    /// Longest edge allowed in the output, in pixels
    #[arg(short, long)]
    max_dimension: Option<f64>,

    /// Text inserted before the extension of the output filename
    #[arg(short, long)]
    suffix: Option<String>,

    /// Fail on damaged JPEG pixel data instead of logging it
    #[arg(long)]
    strict: bool,

    /// Refuse source files larger than this many bytes
    #[arg(long)]
    max_input_bytes: Option<u64>,
}

#[derive(Parser)]
#[command(name = "imgfit")]
#[command(about = "Shrink an image to fit a bounding box")]
#[command(long_about = "\
Shrink an image to fit a bounding box

Reads one JPEG, PNG or GIF, scales it so the longer edge fits within
--max-dimension (aspect ratio preserved, never enlarged) and writes the
result next to the original:

  photos/cat.jpg  --suffix _web  ->  photos/cat_web.jpg

Images already within the bound are copied byte-for-byte. Animated GIFs
keep every frame, its timing and its disposal. Other file types are
skipped without error.

Run 'imgfit gen-config' to generate a documented imgfit.toml.")]
#[command(version)]
struct Cli {
    /// Config file; defaults apply when it does not exist
    #[arg(long, default_value = "imgfit.toml", global = true)]
    config: PathBuf,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG also works
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resize one image into a suffixed sibling file
    Resize(ResizeArgs),
    /// Print a stock imgfit.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Resize(args) => {
            let config = effective_config(config::load_config(&cli.config)?, &args);
            config.validate()?;
            let outcome = imaging::resize_image(&args.file, &config)?;
            println!(
                "{}",
                output::format_outcome(&args.file, &outcome, config.max_dimension)
            );
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }
    Ok(())
}

/// Layer command-line flags over the loaded config.
fn effective_config(mut config: ResizeConfig, args: &ResizeArgs) -> ResizeConfig {
    if let Some(max) = args.max_dimension {
        config.max_dimension = max;
    }
    if let Some(suffix) = &args.suffix {
        config.suffix = suffix.clone();
    }
    if args.strict {
        config.strict_decode = true;
    }
    if let Some(limit) = args.max_input_bytes {
        config.limits.max_input_bytes = Some(limit);
    }
    config
}

/// Warnings by default; `-v` and `-vv` raise the level unless RUST_LOG is set.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
