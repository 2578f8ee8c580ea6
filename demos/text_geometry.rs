use clap::{Parser, ValueEnum};
use lumina::demos::text_geometry::{self, TextGeometryOptions};
use lumina::demos::SceneContext;
use lumina::frame::FaultPolicy;
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OnFault {
    /// Log the failing adapter and keep going.
    Continue,
    /// Stop the frame loop.
    Halt,
}

#[derive(Parser, Debug)]
#[command(name = "text_geometry")]
#[command(about = "Extruded 3D text built from a TrueType font", long_about = None)]
struct Args {
    /// TrueType or OpenType font file.
    font: PathBuf,
    /// Text to extrude; `\n` starts a new line.
    #[arg(long, default_value = text_geometry::TITLE)]
    text: String,
    /// Glyph size, in world units.
    #[arg(long)]
    size: Option<f32>,
    /// Extrusion depth, in world units.
    #[arg(long)]
    depth: Option<f32>,
    /// Line segments per glyph curve.
    #[arg(long)]
    curve_segments: Option<u32>,
    #[arg(long, default_value_t = 800)]
    width: u32,
    #[arg(long, default_value_t = 600)]
    height: u32,
    #[arg(long, value_enum, default_value = "continue")]
    on_fault: OnFault,
    #[arg(long)]
    auto_rotate: bool,
}

#[kiss3d::main]
async fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut ctx = SceneContext::default().with_title("lumina: text geometry");
    ctx.window.width = args.width;
    ctx.window.height = args.height;
    ctx.orbit.auto_rotate = args.auto_rotate;
    ctx.policy = match args.on_fault {
        OnFault::Continue => FaultPolicy::LogAndContinue,
        OnFault::Halt => FaultPolicy::Halt,
    };

    let text = args.text.replace("\\n", "\n");
    let mut options = TextGeometryOptions::new(args.font, &text);
    if let Some(size) = args.size {
        options.text.size = size;
    }
    if let Some(depth) = args.depth {
        options.text.height = depth;
    }
    if let Some(segments) = args.curve_segments {
        options.text.curve_segments = segments;
    }

    text_geometry::run(&ctx, &options).await;
}
