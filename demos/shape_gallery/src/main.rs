use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "shape_gallery", version, about = "Rotating procedural meshes with glow, pulse and textures")]
struct Args {
    /// Config file used instead of the demo's layered defaults
    #[arg(long, short)]
    config: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();
    let config = demo_scaffold::load_demo_config(shape_gallery::DEMO_NAME, args.config.as_deref());
    shape_gallery::run_shape_gallery(config);
}
