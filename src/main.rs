use clap::{Parser, Subcommand};
use std::path::PathBuf;
use upfit::imaging::RustCodec;
use upfit::intake::IntakeSettings;
use upfit::{batch, config, output};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

/// Shared limit-override flags for commands that process images.
#[derive(clap::Args, Clone)]
struct LimitArgs {
    /// Maximum output width in pixels
    #[arg(long)]
    max_width: Option<u32>,

    /// Maximum output height in pixels
    #[arg(long)]
    max_height: Option<u32>,

    /// First-pass JPEG quality factor, (0, 1]
    #[arg(long)]
    quality: Option<f32>,

    /// Size threshold in bytes — files at or under it are not normalized
    #[arg(long)]
    threshold: Option<usize>,
}

#[derive(Parser)]
#[command(name = "upfit")]
#[command(about = "Fit images into bounded dimensions and size for upload")]
#[command(long_about = "\
Fit images into bounded dimensions and size for upload

Files at or under the size threshold are written out unchanged. Oversized
files are decoded, resampled so neither dimension exceeds the configured
bounds (aspect ratio preserved, longer edge gates), and re-encoded as JPEG.
If the first encode is over 3 MiB, one more pass at quality 0.95 runs and
its result is kept either way — never a third attempt.

Configuration is read from upfit.toml in the working directory (or --config);
flags override file values. Run 'upfit gen-config' for a documented stock
config.")]
#[command(version = version_string())]
struct Cli {
    /// Config file (defaults to ./upfit.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Prepare files for upload, writing payloads to the output directory
    Run {
        /// Input image files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output directory
        #[arg(long, default_value = "prepared")]
        out_dir: PathBuf,

        /// Emit the report as JSON instead of per-file lines
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        limits: LimitArgs,
    },
    /// Dry run: report what each file would get, without writing anything
    Check {
        /// Input image files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        limits: LimitArgs,
    },
    /// Print a stock upfit.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run {
            files,
            out_dir,
            json,
            limits,
        } => {
            let cfg = load_configuration(cli.config.as_deref())?;
            init_thread_pool(&cfg.processing);
            let settings = apply_overrides(cfg.intake_settings(), &limits);

            let codec = RustCodec::new();
            let reports = batch::process_files(&codec, &files, &out_dir, &settings)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                for report in &reports {
                    println!("{}", output::format_file_report(report));
                }
                println!();
                println!("{}", output::format_summary(&reports));
            }

            let failed = reports
                .iter()
                .any(|r| matches!(r.outcome, batch::Outcome::Failed { .. }));
            if failed {
                std::process::exit(1);
            }
        }
        Command::Check { files, limits } => {
            let cfg = load_configuration(cli.config.as_deref())?;
            let settings = apply_overrides(cfg.intake_settings(), &limits);

            let codec = RustCodec::new();
            for row in batch::inspect_files(&codec, &files, &settings) {
                println!("{}", output::format_inspection(&row));
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load config from --config, or ./upfit.toml when present, or defaults.
fn load_configuration(
    path: Option<&std::path::Path>,
) -> Result<config::UpfitConfig, config::ConfigError> {
    match path {
        Some(path) => config::load_config(path),
        None => {
            let default_path = std::path::Path::new("upfit.toml");
            if default_path.exists() {
                config::load_config(default_path)
            } else {
                Ok(config::UpfitConfig::default())
            }
        }
    }
}

/// CLI flags win over config file values.
fn apply_overrides(mut settings: IntakeSettings, limits: &LimitArgs) -> IntakeSettings {
    if let Some(w) = limits.max_width {
        settings.bounds.max_width = w;
    }
    if let Some(h) = limits.max_height {
        settings.bounds.max_height = h;
    }
    if let Some(q) = limits.quality {
        settings.quality = upfit::imaging::Quality::new(q);
    }
    if let Some(t) = limits.threshold {
        settings.threshold_bytes = t;
    }
    settings
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores — user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
