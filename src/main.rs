use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use log::info;

use rflayoutbugs::page::{StaticPage, WebPage};
use rflayoutbugs::report::{mark_buggy_pixels, LayoutBugReport};
use rflayoutbugs::{DetectorConfig, LayoutBugDetector, TooLowContrastDetector};

/// Find text with too low contrast in a page screenshot.
///
/// Prints a JSON array with zero or one bug report. Exits with 0 when the page
/// is clean, 1 when a bug was found and 2 on errors.
#[derive(Parser, Debug)]
#[command(name = "rflayoutbugs", version)]
struct Args {
    /// Screenshot of the rendered page (PNG or JPEG)
    #[arg(long)]
    screenshot: PathBuf,

    /// Text pixel mask, same size as the screenshot; light pixels are text
    #[arg(long)]
    text_mask: PathBuf,

    /// JSON detector configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Minimum readable contrast ratio, overrides the config file
    #[arg(long)]
    min_contrast: Option<f64>,

    /// Write the screenshot with buggy pixels painted red to this PNG
    #[arg(long)]
    marked: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn run(args: &Args) -> anyhow::Result<bool> {
    let mut config = match &args.config {
        Some(path) => DetectorConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => DetectorConfig::default(),
    };
    if let Some(c) = args.min_contrast {
        config.min_readable_contrast = c;
    }

    let detector = TooLowContrastDetector::new(config)?;
    let page = StaticPage::open(&args.screenshot, &args.text_mask).with_context(|| {
        format!(
            "Failed to load page from {} and {}",
            args.screenshot.display(),
            args.text_mask.display()
        )
    })?;

    let bugs = detector.find_layout_bugs_in(&page)?;
    let reports: Vec<LayoutBugReport> = bugs.iter().map(LayoutBugReport::from).collect();
    let json = if args.pretty {
        serde_json::to_string_pretty(&reports)?
    } else {
        serde_json::to_string(&reports)?
    };
    println!("{}", json);

    if let Some(path) = &args.marked {
        let screenshot = page.screenshot()?;
        let image = match bugs.first() {
            Some(bug) => mark_buggy_pixels(screenshot, &bug.buggy_pixels)?,
            None => screenshot.to_rgb_image(),
        };
        image
            .save(path)
            .with_context(|| format!("Failed to write marked screenshot: {}", path.display()))?;
        info!("wrote marked screenshot to {}", path.display());
    }

    Ok(!bugs.is_empty())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    match run(&args) {
        Ok(false) => ExitCode::SUCCESS,
        Ok(true) => ExitCode::from(1),
        Err(e) => {
            eprintln!("rflayoutbugs: {:#}", e);
            ExitCode::from(2)
        }
    }
}
