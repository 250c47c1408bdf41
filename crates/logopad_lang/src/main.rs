use std::{path::PathBuf, process::exit};

use anyhow::Context;
use clap::Parser;
use logopad::{render, CanvasConfig, Turtle};
use logopad_lang::{Interpreter, InterpreterConfig, Outcome, RepeatMode, SleepPacing};

/// Runs a turtle script without opening a window.
#[derive(Parser)]
struct Args {
    /// The script to run.
    input: PathBuf,

    /// Start from the segments in this drawing.
    #[arg(long)]
    load: Option<PathBuf>,

    /// Save the drawing here afterwards.
    #[arg(long)]
    save: Option<PathBuf>,

    /// Paint the canvas to this SVG file afterwards.
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Print the final turtle state as JSON.
    #[arg(long)]
    json: bool,

    /// Treat `repeat N [ ... ]` as a block of commands.
    #[arg(long)]
    bracketed_repeat: bool,

    /// Wait between steps, like the desktop canvas does.
    #[arg(long)]
    animate: bool,

    /// Milliseconds to wait per step when animating, even after `home`. Without this, the
    /// turtle's own speed is used.
    #[arg(long)]
    speed: Option<f64>,

    #[arg(long, default_value_t = CanvasConfig::default().width)]
    width: f64,

    #[arg(long, default_value_t = CanvasConfig::default().height)]
    height: f64,
}

fn run(args: Args) -> anyhow::Result<()> {
    let input = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to open input file {}", args.input.display()))?;

    let mut turtle = Turtle::new(CanvasConfig {
        width: args.width,
        height: args.height,
    });
    if let Some(speed) = args.speed {
        turtle.set_speed(speed);
    }
    if let Some(path) = &args.load {
        // A drawing that can't be loaded just means starting from a blank canvas.
        if let Err(e) = turtle.load_from_file(path) {
            log::warn!("{e}");
        }
    }

    let repeat_mode = if args.bracketed_repeat {
        RepeatMode::Bracketed
    } else {
        RepeatMode::Literal
    };
    let mut interp = Interpreter::new(InterpreterConfig { repeat_mode });
    if args.animate {
        interp.set_pacer(args.speed.map(SleepPacing::fixed).unwrap_or_default());
    }

    if interp.execute(&mut turtle, &input) == Outcome::Bye {
        log::info!("script said bye");
    }

    if let Some(path) = &args.save {
        turtle.save_to_file(path)?;
    }
    if let Some(path) = &args.svg {
        render::save_svg(path, &turtle)?;
    }
    if args.json {
        println!("{}", serde_json::to_string_pretty(&turtle.snapshot())?);
    }
    Ok(())
}

pub fn main() {
    pretty_env_logger::init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        println!("{e:#}");
        exit(1);
    }
}
