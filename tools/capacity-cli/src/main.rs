use std::io::Write;
use std::path::PathBuf;
use std::process::exit;

use clap::Parser;

use capacity_planner::core::planner::CapacityPlanner;
use capacity_planner::extensions::scenario::Scenario;

fn init_logger() {
    use env_logger::Builder;
    Builder::from_default_env()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();
}

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
/// Runs the capacity planner on a scenario file
struct Args {
    /// Path to YAML file with the planning scenario
    #[arg(short, long)]
    scenario: PathBuf,

    /// Path to produced JSON file with the plan report (default - stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit compact JSON instead of pretty-printed
    #[arg(long, default_value_t = false)]
    compact: bool,
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let scenario = Scenario::from_file(&args.scenario.to_string_lossy())?;
    let planner = CapacityPlanner::new(scenario.config.clone())?;
    let report = planner.plan(&scenario.workload, &scenario.clusters)?;

    let json = if args.compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    match &args.output {
        Some(path) => std::fs::write(path, json)?,
        None => println!("{}", json),
    }
    Ok(())
}

fn main() {
    init_logger();
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("error: {}", e);
        exit(1);
    }
}
