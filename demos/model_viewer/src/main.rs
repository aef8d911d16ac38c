use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "model_viewer", version, about = "glTF model viewer with material and light controls")]
struct Args {
    /// Config file used instead of the demo's layered defaults
    #[arg(long, short)]
    config: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();
    let config = demo_scaffold::load_demo_config(model_viewer::DEMO_NAME, args.config.as_deref());
    model_viewer::run_model_viewer(config);
}
