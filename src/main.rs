use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pixel_worksheet::assets::AssetLoader;
use pixel_worksheet::error::{AppError, EXIT_CONFIG};
use pixel_worksheet::models::AppConfig;
use pixel_worksheet::services::{
    ConvertRequest, Converter, Overrides, DEFAULT_PREVIEW_SCALE, LANG_DIR_ENV,
};

#[derive(Parser)]
#[command(name = "pixel-worksheet")]
#[command(about = "Convert an image to a color-by-number spreadsheet")]
struct Cli {
    /// The image file to convert
    #[arg(required_unless_present = "list_languages")]
    image: Option<PathBuf>,

    /// Scale down to this many cells wide (height follows the aspect ratio)
    #[arg(short, long, allow_negative_numbers = true)]
    width: Option<i64>,

    /// Number of colors, white included (2 to 32; anything else uses all 32)
    #[arg(short, long, allow_negative_numbers = true)]
    colors: Option<i64>,

    /// Resampling filter: NEAREST, BOX, BILINEAR, HAMMING, BICUBIC or LANCZOS
    #[arg(short, long)]
    filter: Option<String>,

    /// Language for captions and color names (default: en)
    #[arg(short, long)]
    lang: Option<String>,

    /// Output workbook path (default: <image>.xlsx)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write an indexed PNG preview of the quantized image
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Preview pixels per cell
    #[arg(long, default_value_t = DEFAULT_PREVIEW_SCALE)]
    preview_scale: u32,

    /// Allow a width larger than the image
    #[arg(long)]
    allow_upscale: bool,

    /// YAML config file (default: $PIXEL_WORKSHEET_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,

    /// List available languages and exit
    #[arg(long)]
    list_languages: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Nothing left to report to if stdout/stderr are gone
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(EXIT_CONFIG)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let default_filter = if cli.quiet {
        "pixel_worksheet=warn,grid_quant=warn"
    } else {
        "pixel_worksheet=info,grid_quant=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config = AppConfig::load(cli.config.as_deref())?;
    let env_lang_dir = std::env::var_os(LANG_DIR_ENV).map(PathBuf::from);

    if cli.list_languages {
        let loader = AssetLoader::new(config.lang_dir.clone().or(env_lang_dir));
        println!("en");
        for code in loader.list_languages() {
            println!("{code}");
        }
        return Ok(());
    }

    let overrides = Overrides {
        width: cli.width,
        colors: cli.colors,
        filter: cli.filter,
        language: cli.lang,
        allow_upscale: cli.allow_upscale,
    };
    let converter = Converter::from_config(&config, overrides, env_lang_dir)?;

    let Some(image) = cli.image else {
        return Ok(());
    };
    let request = ConvertRequest {
        input: image,
        output: cli.output,
        preview: cli.preview,
        preview_scale: cli.preview_scale,
    };

    let report = converter.convert(&request)?;
    tracing::info!(
        output = %report.output.display(),
        width = report.width,
        height = report.height,
        colors = report.legend_colors,
        "Worksheet ready"
    );
    Ok(())
}
