use clap::{Parser, ValueEnum};
use lumina::demos::color_cycle::{self, ColorCycleOptions};
use lumina::demos::SceneContext;
use lumina::frame::FaultPolicy;
use lumina::palette::Rgb;
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OnFault {
    /// Log the failing adapter and keep going.
    Continue,
    /// Stop the frame loop.
    Halt,
}

#[derive(Parser, Debug)]
#[command(name = "color_cycle")]
#[command(about = "Background and text cycling through a color palette", long_about = None)]
struct Args {
    /// Font used to show `--text`; without it only the background cycles.
    #[arg(long)]
    font: Option<PathBuf>,
    #[arg(long, default_value = "lumina")]
    text: String,
    /// Replace the deep tone palette, e.g. `--color '#ff0000' --color 00ff00`.
    #[arg(long = "color", value_parser = parse_color)]
    colors: Vec<Rgb>,
    #[arg(long, default_value_t = 800)]
    width: u32,
    #[arg(long, default_value_t = 600)]
    height: u32,
    #[arg(long, value_enum, default_value = "continue")]
    on_fault: OnFault,
    #[arg(long)]
    auto_rotate: bool,
}

fn parse_color(s: &str) -> Result<Rgb, String> {
    Rgb::from_hex(s).ok_or_else(|| format!("`{}` is not a #rrggbb color", s))
}

#[kiss3d::main]
async fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut ctx = SceneContext::default().with_title("lumina: color cycle");
    ctx.window.width = args.width;
    ctx.window.height = args.height;
    ctx.orbit.auto_rotate = args.auto_rotate;
    ctx.policy = match args.on_fault {
        OnFault::Continue => FaultPolicy::LogAndContinue,
        OnFault::Halt => FaultPolicy::Halt,
    };
    if !args.colors.is_empty() {
        ctx.palette = args.colors;
    }

    let options = ColorCycleOptions {
        font: args.font,
        text: args.text,
    };

    color_cycle::run(&ctx, &options).await;
}
