use clap::{Parser, ValueEnum};
use lumina::demos::luminescence::{self, LuminescenceOptions};
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
#[command(name = "luminescence")]
#[command(about = "A glTF model playing its first animation under a bloom pass", long_about = None)]
struct Args {
    /// The glTF or GLB model to show.
    model: PathBuf,
    #[arg(long, default_value_t = 800)]
    width: u32,
    #[arg(long, default_value_t = 600)]
    height: u32,
    /// What to do when an adapter fails.
    #[arg(long, value_enum, default_value = "continue")]
    on_fault: OnFault,
    /// Let the camera orbit on its own.
    #[arg(long)]
    auto_rotate: bool,
    /// Add a static ground plane.
    #[arg(long)]
    with_ground: bool,
    /// Drop a crowd of humans onto the scene.
    #[arg(long)]
    crowd: bool,
    /// Bloom strength.
    #[arg(long)]
    strength: Option<f32>,
}

#[kiss3d::main]
async fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut ctx = SceneContext::default().with_title("lumina: luminescence");
    ctx.window.width = args.width;
    ctx.window.height = args.height;
    ctx.orbit.auto_rotate = args.auto_rotate;
    ctx.orbit.enable_damping = true;
    ctx.policy = match args.on_fault {
        OnFault::Continue => FaultPolicy::LogAndContinue,
        OnFault::Halt => FaultPolicy::Halt,
    };
    if let Some(strength) = args.strength {
        ctx.bloom.strength = strength;
    }

    let options = LuminescenceOptions {
        with_ground: args.with_ground,
        crowd: args.crowd,
        ..LuminescenceOptions::new(args.model)
    };

    luminescence::run(&ctx, &options).await;
}
