//! `rune-ttf`: render a line of text to a PNG.
//!
//! Defaults come from `rune-ttf.toml` and `RUNE_TTF_*` environment
//! variables; command-line flags override both.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use rune_config::RuneTtfConfig;
use rune_ttf::{Color, Library};

#[derive(Parser, Debug)]
#[command(name = "rune-ttf", version, about = "Render text with a TrueType font")]
struct Cli {
    /// Text to render
    text: String,

    /// Output PNG path
    #[arg(short, long, default_value = "out.png")]
    output: PathBuf,

    /// Configuration file (default: ./rune-ttf.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Font file
    #[arg(short, long)]
    font: Option<PathBuf>,

    /// Point size at 72 DPI
    #[arg(short, long)]
    size: Option<u32>,

    /// Render without antialiasing
    #[arg(long)]
    no_antialias: bool,

    /// Foreground color, RRGGBB
    #[arg(long)]
    fg: Option<String>,

    /// Background color, RRGGBB (transparent when omitted)
    #[arg(long)]
    bg: Option<String>,

    #[arg(long)]
    bold: bool,

    #[arg(long)]
    italic: bool,

    #[arg(long)]
    underline: bool,

    /// Print font metrics before rendering
    #[arg(long)]
    metrics: bool,
}

fn load_config(cli: &Cli) -> Result<RuneTtfConfig> {
    let mut config = match &cli.config {
        Some(path) => RuneTtfConfig::load_from_file(path)?,
        None => RuneTtfConfig::load_or_default(),
    };
    config.merge_with_env();

    if let Some(font) = &cli.font {
        config.font.path = Some(font.clone());
    }
    if let Some(size) = cli.size {
        config.font.point_size = size;
    }
    if cli.no_antialias {
        config.render.antialias = false;
    }
    if let Some(fg) = &cli.fg {
        config.render.foreground = Color::from_hex(fg)?.to_array();
    }
    if let Some(bg) = &cli.bg {
        config.render.background = Some(Color::from_hex(bg)?.to_array());
    }
    config.style.bold |= cli.bold;
    config.style.italic |= cli.italic;
    config.style.underline |= cli.underline;
    Ok(config)
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let Some(font_path) = config.font.path.as_ref() else {
        bail!("no font given (use --font, RUNE_TTF_FONT or [font] path in rune-ttf.toml)");
    };

    log::info!("rune-ttf {}", rune_ttf::version());
    let library = Library::init().context("failed to initialize font library")?;

    let mut font = library
        .open_index(font_path, config.font.point_size, config.font.index)
        .with_context(|| format!("failed to open {}", font_path.display()))?;
    font.set_bold(config.style.bold)?;
    font.set_italic(config.style.italic)?;
    font.set_underline(config.style.underline)?;

    if cli.metrics {
        let m = font.metrics()?;
        println!(
            "height={} ascent={} descent={} line_skip={}",
            m.height, m.ascent, m.descent, m.line_skip
        );
    }

    let surface = font.render(
        &cli.text,
        config.render.antialias,
        Color::from(config.render.foreground),
        config.render.background.map(Color::from),
    )?;
    surface
        .save_png(&cli.output)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    println!(
        "wrote {}x{} {:?} surface to {}",
        surface.width(),
        surface.height(),
        surface.format(),
        cli.output.display()
    );

    drop(font);
    library.quit();
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    run(Cli::parse())
}
