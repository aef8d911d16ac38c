use clap::Parser;
use demo_scaffold::{load_demo_config, LayeredConfig};
use std::path::PathBuf;

/// Entry describing a demo.
struct DemoEntry {
    name: &'static str,
    run: fn(LayeredConfig),
    description: &'static str,
}

use model_viewer::{run_model_viewer, DEMO_NAME as VIEWER_DEMO};
use place_models::{run_place_models, DEMO_NAME as PLACE_MODELS_DEMO};
use place_shapes::{run_place_shapes, DEMO_NAME as PLACE_SHAPES_DEMO};
use shape_gallery::{run_shape_gallery, DEMO_NAME as GALLERY_DEMO};

static DEMOS: &[DemoEntry] = &[
    DemoEntry { name: GALLERY_DEMO, run: run_shape_gallery, description: "Rotating procedural meshes with glow, pulse and textures" },
    DemoEntry { name: VIEWER_DEMO, run: run_model_viewer, description: "glTF model viewer with material and light controls" },
    DemoEntry { name: PLACE_SHAPES_DEMO, run: run_place_shapes, description: "Hit-test reticle, tap to place dodecahedra" },
    DemoEntry { name: PLACE_MODELS_DEMO, run: run_place_models, description: "Hit-test reticle, tap to place model clones" },
];

#[derive(Parser, Debug)]
#[command(name = "ar_showcase", version, about = "Launcher for the AR showcase demos")]
struct Cli {
    /// Demo name to run (see --list)
    demo: Option<String>,
    /// List available demos and exit
    #[arg(long, short)]
    list: bool,
    /// Config file used instead of the demo's layered defaults
    #[arg(long, short)]
    config: Option<PathBuf>,
}

#[derive(Debug, PartialEq, Eq)]
enum Selection {
    Demo(usize),
    Quit,
    Invalid,
}

fn parse_selection(input: &str, count: usize) -> Selection {
    let trimmed = input.trim();
    if trimmed.eq_ignore_ascii_case("q") {
        return Selection::Quit;
    }
    match trimmed.parse::<usize>() {
        Ok(idx) if (1..=count).contains(&idx) => Selection::Demo(idx - 1),
        _ => Selection::Invalid,
    }
}

fn find_demo(name: &str) -> Option<&'static DemoEntry> {
    DEMOS.iter().find(|d| d.name == name)
}

fn main() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let cli = Cli::parse();

    if cli.list {
        list_demos();
        return;
    }

    if let Some(name) = cli.demo.as_ref() {
        launch_by_name(name, cli.config.clone());
        return;
    }

    interactive_select_and_launch(cli.config);
}

fn list_demos() {
    println!("Available demos:");
    for (i, d) in DEMOS.iter().enumerate() {
        println!("  [{}] {:16} - {}", i + 1, d.name, d.description);
    }
}

fn launch_by_name(name: &str, config: Option<PathBuf>) {
    if let Some(entry) = find_demo(name) {
        println!("Launching demo: {}", entry.name);
        run_entry(entry, config);
    } else {
        eprintln!("Unknown demo '{name}'. Use --list to see options.");
        std::process::exit(1);
    }
}

fn run_entry(entry: &DemoEntry, config: Option<PathBuf>) {
    let layered = load_demo_config(entry.name, config.as_deref());
    if let Err(payload) = std::panic::catch_unwind(|| (entry.run)(layered)) {
        eprintln!("Demo '{}' panicked. Aborting.", entry.name);
        if let Some(msg) = payload.downcast_ref::<&str>() {
            eprintln!("Reason: {msg}");
        } else if let Some(msg) = payload.downcast_ref::<String>() {
            eprintln!("Reason: {msg}");
        }
        std::process::exit(1);
    }
}

fn interactive_select_and_launch(config: Option<PathBuf>) {
    use std::io::{self, Write};
    loop {
        list_demos();
        println!("Select a demo by number (or 'q' to quit):");
        print!("> ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) => {
                println!("EOF received. Exiting.");
                return;
            }
            Ok(_) => match parse_selection(&line, DEMOS.len()) {
                Selection::Quit => return,
                Selection::Demo(idx) => {
                    let entry = &DEMOS[idx];
                    println!("Launching demo: {}", entry.name);
                    run_entry(entry, config);
                    return;
                }
                Selection::Invalid => {
                    println!("Invalid selection '{}'. Please enter a number 1-{} or 'q'.", line.trim(), DEMOS.len());
                }
            },
            Err(e) => {
                eprintln!("Error reading input: {e}. Exiting.");
                return;
            }
        }
    }
}
