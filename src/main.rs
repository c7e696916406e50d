use clap::Parser;
use std::fs::File;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use pinch_keys::camera::{CameraCapture, CameraError, FrameSource, SyntheticFrames};
use pinch_keys::cli::{self, Args, Command};
use pinch_keys::config::{Config, ConfigError};
use pinch_keys::driver::{Driver, RunError, StopReason};
use pinch_keys::injector::{KeyInjector, LogInjector, RdevInjector};
use pinch_keys::render::Renderer;
use pinch_keys::session::Session;
use pinch_keys::terminal::TerminalDisplay;
use pinch_keys::tracker::{LandmarkProvider, MediaPipeTracker, ReplayTracker, TrackerError};

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Camera(#[from] CameraError),

    #[error(transparent)]
    Tracker(#[from] TrackerError),

    #[error(transparent)]
    Run(#[from] RunError),

    #[error("Failed to open log file '{path}': {source}")]
    LogFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to set Ctrl+C handler: {0}")]
    Signal(#[from] ctrlc::Error),

    #[error("Terminal setup failed: {0}")]
    Terminal(#[from] std::io::Error),
}

fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(args.log_file.as_deref()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr unless a file is given; `RUST_LOG` overrides the level.
fn init_logging(log_file: Option<&Path>) -> Result<(), AppError> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(path) = log_file {
        let file = File::create(path).map_err(|e| AppError::LogFile {
            path: path.display().to_string(),
            source: e,
        })?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn run(args: Args) -> Result<(), AppError> {
    let mut config = Config::load(args.config.as_deref())?;
    args.apply_to(&mut config);
    config.validate()?;

    match &args.command {
        Some(Command::ListCameras) => cli::list_cameras()?,
        Some(Command::Layout) => cli::print_layout(&config),
        Some(Command::Config { action }) => {
            cli::handle_config_action(action.clone(), &config, args.config.as_deref())?
        }
        None => run_keyboard(&args, &config)?,
    }
    Ok(())
}

fn run_keyboard(args: &Args, config: &Config) -> Result<(), AppError> {
    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        ctrlc::set_handler(move || {
            stop.store(true, Ordering::SeqCst);
        })?;
    }

    let configured = config.resolution();
    let min_confidence = config.tracker.min_confidence;

    // Replay mode needs no camera: blank frames paced at the configured fps,
    // one per recorded line. A camera reports the resolution it really delivers.
    let (source, tracker, resolution) = match &args.replay {
        Some(path) => {
            let tracker = ReplayTracker::open(path, min_confidence)?;
            let frames = u32::try_from(tracker.remaining()).unwrap_or(u32::MAX);
            let source = SyntheticFrames::new(configured.width, configured.height, config.camera.fps)
                .with_limit(frames)
                .paced();
            (
                Box::new(source) as Box<dyn FrameSource>,
                Box::new(tracker) as Box<dyn LandmarkProvider>,
                configured,
            )
        }
        None => {
            let mut camera = CameraCapture::open(config.camera_settings())?;
            camera.start()?;
            let actual = camera.actual_resolution().unwrap_or(configured);
            let tracker = MediaPipeTracker::spawn(&config.tracker_settings())?;
            (
                Box::new(camera) as Box<dyn FrameSource>,
                Box::new(tracker) as Box<dyn LandmarkProvider>,
                actual,
            )
        }
    };

    let injector: Box<dyn KeyInjector> = if args.dry_run {
        log::info!("Dry run: key presses are logged, not sent");
        Box::new(LogInjector::new())
    } else {
        Box::new(RdevInjector::new())
    };

    let keyboard = config.build_keyboard();
    if !keyboard.fits_within(resolution.width, resolution.height) {
        log::warn!("Keyboard extends past the {} capture frame", resolution);
    }
    let session = Session::new(keyboard, config.gesture_config())
        .with_status_bar(config.ui.status_bar)
        .with_quit_key(config.ui.quit_key);

    let renderer = Renderer::new(
        config.colors.clone(),
        config.charset(),
        resolution.width,
        resolution.height,
    );
    let display = TerminalDisplay::new(renderer, config.ui.quit_key)?;

    let mut driver = Driver::new(source, tracker, injector, display, session);
    let result = driver.run(&stop);
    driver.display_mut().restore()?;
    let summary = result?;

    match summary.reason {
        StopReason::EndOfStream => println!("Input ended."),
        StopReason::QuitKey | StopReason::Interrupted => {}
    }
    println!(
        "Typed {} key(s) in {} frames{}",
        summary.typed.len(),
        summary.frames,
        if args.dry_run { " (dry run)" } else { "" }
    );
    Ok(())
}
