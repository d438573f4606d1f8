use std::path::PathBuf;
use std::time::Duration;

use clap::{arg, ArgAction, ArgMatches, Command};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tsp_heuristic::batch::{run_batch, BatchOptions, ALL_INSTANCES};
use tsp_heuristic::io::{read_instance, BoardGenerator};
use tsp_heuristic::local_search::MoveEvaluation;
use tsp_heuristic::logging::{init_logger, parse_level};
use tsp_heuristic::solver::{solve_with, HeuristicConfig};
use tsp_heuristic::{Error, Result};

fn solver_args(cmd: Command) -> Command {
    cmd.arg(
        arg!(--evaluation [EVALUATION] "2-opt move evaluation: delta or full")
            .value_parser(clap::value_parser!(String)),
    )
    .arg(
        arg!(--"time-limit" [SECS] "Stop refining after this many seconds")
            .value_parser(clap::value_parser!(f64)),
    )
    .arg(
        arg!(--config [CONFIG] "Solver config json file")
            .value_parser(clap::value_parser!(PathBuf)),
    )
}

fn cli() -> Command {
    Command::new("tsp-heuristic")
        .about("Greedy-edge + 2-opt heuristic for the Euclidean TSP")
        .arg_required_else_help(true)
        .arg(
            arg!(--"log-level" [LEVEL] "error, warn, info, debug or trace")
                .global(true)
                .default_value("info")
                .value_parser(clap::value_parser!(String)),
        )
        .arg(
            arg!(--"log-timestamp" "Prefix log lines with a timestamp")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            solver_args(
                Command::new("solve")
                    .about("Solves a single instance file")
                    .arg(
                        arg!(<FILE> "Path to an instance file")
                            .value_parser(clap::value_parser!(PathBuf)),
                    ),
            )
            .arg(arg!(--json "Print the solution as json").action(ArgAction::SetTrue)),
        )
        .subcommand(solver_args(
            Command::new("batch")
                .about("Solves every instance file in a directory and writes a csv report")
                .arg(
                    arg!([FILTER] "Node count to select (instance_{FILTER}_*.dat) or 'all'")
                        .default_value(ALL_INSTANCES)
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--"data-dir" [DIR] "Directory containing .dat instances")
                        .default_value("./data")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--"output-dir" [DIR] "Directory for the csv report")
                        .default_value("./data/solution")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        ))
        .subcommand(
            Command::new("generate")
                .about("Generates synthetic drill-board instances")
                .arg(
                    arg!(--"out-dir" [DIR] "Directory to write instances into")
                        .default_value("./data")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--seed [SEED] "Random seed (default: from the OS)")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(--"per-size" [K] "Instances per node count")
                        .default_value("5")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--sizes [SIZES] "Comma-separated node counts")
                        .value_delimiter(',')
                        .value_parser(clap::value_parser!(usize)),
                ),
        )
}

fn main() {
    let matches = cli().get_matches();

    let level = matches.get_one::<String>("log-level").unwrap();
    let timestamp = matches.get_flag("log-timestamp");
    if let Err(e) = parse_level(level).and_then(|level| init_logger(level, timestamp)) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = match matches.subcommand() {
        Some(("solve", sub_m)) => solve_file(sub_m),
        Some(("batch", sub_m)) => batch(sub_m),
        Some(("generate", sub_m)) => generate(sub_m),
        _ => Err(Error::other("Invalid subcommand")),
    } {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn solver_config(sub_m: &ArgMatches) -> Result<HeuristicConfig> {
    let mut config = match sub_m.get_one::<PathBuf>("config") {
        Some(path) => HeuristicConfig::from_json_file(path)?,
        None => HeuristicConfig::default(),
    };
    if let Some(evaluation) = sub_m.get_one::<String>("evaluation") {
        config = config.with_evaluation(evaluation.parse::<MoveEvaluation>()?);
    }
    if let Some(&secs) = sub_m.get_one::<f64>("time-limit") {
        let limit = Duration::try_from_secs_f64(secs)
            .map_err(|e| Error::other(format!("invalid time limit {secs}: {e}")))?;
        config = config.with_time_limit(limit);
    }
    Ok(config)
}

fn solve_file(sub_m: &ArgMatches) -> Result<()> {
    let path = sub_m.get_one::<PathBuf>("FILE").unwrap();
    let config = solver_config(sub_m)?;
    let instance = read_instance(path)?;
    let solution = solve_with(&instance, &config)?;

    if sub_m.get_flag("json") {
        let json = serde_json::to_string_pretty(&solution)
            .map_err(|e| Error::other(format!("failed to serialize solution: {e}")))?;
        println!("{json}");
    } else {
        println!(
            "Feasible solution found with obj_value {} with solving time (sec) {}",
            solution.objective_value(),
            solution.elapsed().as_secs_f64()
        );
        println!("Solution (Tour): {}", solution.tour());
    }
    Ok(())
}

fn batch(sub_m: &ArgMatches) -> Result<()> {
    let options = BatchOptions {
        data_dir: sub_m.get_one::<PathBuf>("data-dir").unwrap().clone(),
        output_dir: sub_m.get_one::<PathBuf>("output-dir").unwrap().clone(),
        filter: sub_m.get_one::<String>("FILTER").unwrap().clone(),
        config: solver_config(sub_m)?,
    };
    let summary = run_batch(&options)?;
    println!(
        "solved {} instances ({} skipped, {} failed); report written to {}",
        summary.solved,
        summary.skipped,
        summary.failed,
        options.report_path().display()
    );
    Ok(())
}

fn generate(sub_m: &ArgMatches) -> Result<()> {
    let out_dir = sub_m.get_one::<PathBuf>("out-dir").unwrap();
    let mut generator =
        BoardGenerator::default().with_per_size(*sub_m.get_one::<usize>("per-size").unwrap());
    if let Some(sizes) = sub_m.get_many::<usize>("sizes") {
        generator = generator.with_sizes(sizes.copied().collect());
    }
    let mut rng = match sub_m.get_one::<u64>("seed") {
        Some(&seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let written = generator.generate_instance_set(out_dir, &mut rng)?;
    println!("generated {} instances in {}", written.len(), out_dir.display());
    Ok(())
}
