use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "place_models", version, about = "Hit-test reticle, tap to place model clones")]
struct Args {
    /// Config file used instead of the demo's layered defaults
    #[arg(long, short)]
    config: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();
    let config = demo_scaffold::load_demo_config(place_models::DEMO_NAME, args.config.as_deref());
    place_models::run_place_models(config);
}
