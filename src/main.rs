use clap::{Parser, Subcommand};
use hand_zoom::config::{self, AppConfig};
use hand_zoom::gesture::{GestureEstimator, LandmarkFrame, draw_landmarks};
use hand_zoom::imaging::{self, Dimensions, RustBackend};
use hand_zoom::server;
use hand_zoom::zoom_source::{FixedFactor, ZoomSource, zoom_with};
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let on_tag = env!("HAND_ZOOM_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("HAND_ZOOM_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "hand-zoom")]
#[command(about = "Simulated optical zoom: center-crop and resize images over HTTP")]
#[command(long_about = "\
Simulated optical zoom: center-crop and resize images over HTTP

A zoom factor of 2.0 keeps the middle half of the frame (by width and
height) and scales it back up to the original size. 1.0 returns the image
re-encoded, and factors below 1.0 shrink the frame onto a black border.

HTTP routes (serve):

  GET  /health         {\"status\":\"ok\"}
  GET  /               service name, version and routes
  POST /upload-image/  form-data: file, zoom (default 1.5) → image/jpeg
  POST /upload-frame/  same, for a client posting live camera frames

Settings come from hand-zoom.toml (optional), then the PORT environment
variable, then command-line flags.

Run 'hand-zoom gen-config' to generate a documented hand-zoom.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Config file; a missing file means stock defaults
    #[arg(long, default_value = "hand-zoom.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Clone)]
struct ServeArgs {
    /// Address to bind (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides config and PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP service
    Serve(ServeArgs),
    /// Zoom a single image file
    Zoom {
        /// Input image (JPEG, PNG, TIFF, WebP)
        input: PathBuf,
        /// Output JPEG path
        output: PathBuf,
        /// Zoom factor (defaults to zoom.default_factor)
        #[arg(long, allow_negative_numbers = true)]
        factor: Option<f64>,
    },
    /// Estimate a zoom factor from hand landmarks on a frame
    Gesture {
        /// Landmark JSON: {"hands": [{"landmarks": [{"x": .., "y": ..}, ...]}]}
        landmarks: PathBuf,
        /// The frame the landmarks were detected on
        frame: PathBuf,
        /// Write the frame with landmarks drawn on it
        #[arg(long)]
        overlay: Option<PathBuf>,
        /// Write the frame zoomed by the estimated factor
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print a stock hand-zoom.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Serve(args) => {
            let mut app_config = config::load_config(&cli.config)?;
            if let Some(host) = args.host {
                app_config.server.host = host;
            }
            if let Some(port) = args.port {
                app_config.server.port = port;
            }
            build_runtime()?.block_on(server::serve(app_config))?;
        }
        Command::Zoom {
            input,
            output,
            factor,
        } => {
            let app_config = config::load_config(&cli.config)?;
            let source = FixedFactor(factor.unwrap_or(app_config.zoom.default_factor));
            let bytes = std::fs::read(&input)?;
            write_zoomed(&bytes, &output, &source, &app_config)?;
            println!(
                "{} → {} (zoom {:.2})",
                input.display(),
                output.display(),
                source.zoom_factor()
            );
        }
        Command::Gesture {
            landmarks,
            frame,
            overlay,
            output,
        } => {
            let app_config = config::load_config(&cli.config)?;
            let detected: LandmarkFrame =
                serde_json::from_str(&std::fs::read_to_string(&landmarks)?)?;
            let bytes = std::fs::read(&frame)?;
            let (width, height) = imaging::get_dimensions(&RustBackend::new(), &bytes)?;

            let mut estimator = GestureEstimator::new(app_config.gesture.clone());
            let zoom = estimator.observe(&detected.hands, Dimensions { width, height });
            println!("Hands: {}", detected.hands.len());
            println!("Zoom: {zoom:.2}");

            if let Some(path) = overlay {
                let mut img = image::load_from_memory(&bytes)?.to_rgb8();
                for hand in &detected.hands {
                    draw_landmarks(&mut img, hand);
                }
                img.save(&path)?;
                println!("Overlay → {}", path.display());
            }
            if let Some(path) = output {
                write_zoomed(&bytes, &path, &estimator, &app_config)?;
                println!("Zoomed → {}", path.display());
            }
        }
    }

    Ok(())
}

/// Log to stderr so subcommand output on stdout stays clean. `RUST_LOG`
/// overrides the default `info` level.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn build_runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
}

/// Run the transform with `source`'s factor and write the JPEG to `output`.
fn write_zoomed(
    bytes: &[u8],
    output: &Path,
    source: &dyn ZoomSource,
    app_config: &AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let jpeg = zoom_with(
        &RustBackend::new(),
        bytes,
        source,
        &app_config.zoom.encoding(),
    )?;
    std::fs::write(output, jpeg)?;
    Ok(())
}
