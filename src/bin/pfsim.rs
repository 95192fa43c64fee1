use pfsim::prelude::*;
use std::path::Path;
use structopt::StructOpt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command line options
#[derive(StructOpt, Debug)]
#[structopt(
    name = "pfsim",
    about = "Runs a quasi-static phase-field brittle fracture simulation"
)]
struct Options {
    /// JSON file with the configuration
    input: String,

    /// Output directory (default: DEFAULT_OUT_DIR)
    #[structopt(long)]
    out_dir: Option<String>,

    /// Filename stem of the output files (default: the input filename stem)
    #[structopt(long)]
    fn_stem: Option<String>,

    /// Also writes VTU and PVD files for visualization with ParaView
    #[structopt(long)]
    vtu: bool,

    /// Does not print the progress table
    #[structopt(long)]
    quiet: bool,
}

fn main() -> Result<(), StrError> {
    // logging (RUST_LOG overrides the default level)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // parse options
    let options = Options::from_args();
    let fn_stem = match &options.fn_stem {
        Some(stem) => stem.clone(),
        None => Path::new(&options.input)
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or("cannot get the filename stem of the input file")?
            .to_string(),
    };

    // configuration
    let mut config = Config::read_json(&options.input)?;
    if options.quiet {
        config.control.verbose = false;
        config.control.verbose_steps = false;
    }
    tracing::info!(input = %options.input, "configuration loaded");
    if !options.quiet {
        println!("{}", config);
    }

    // run
    let output = Output::new_enabled(&fn_stem, options.out_dir.as_deref(), options.vtu)?;
    let mut sim = BrittleFracture::new(&config, output)?;
    sim.run()?;

    // message
    let path_summary = sim.output.path_summary();
    let summary = OutputSummary::read_json(&path_summary)?;
    let thin_line = format!("{:─^1$}", "", path_summary.len());
    println!("\n\n{}", thin_line);
    println!("{} load increments converged; the summary file is:", summary.load_steps.len());
    println!("{}", path_summary);
    if options.vtu {
        println!("{}", sim.output.path_pvd());
    }
    println!("{}\n\n", thin_line);
    Ok(())
}
