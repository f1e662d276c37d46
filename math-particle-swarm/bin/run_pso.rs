use clap::Parser;
use math_audio_particle_swarm::{
    ConvergenceRecorder, PSOConfigBuilder, ParallelConfig, SweepConfig, SwarmParams,
    eggholder_swarm, format_report, run_sweep, write_report,
};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(
    name = "run_pso",
    about = "Sweep Particle Swarm Optimization on the Eggholder function over population and iteration grids"
)]
struct Cli {
    /// Population sizes to sweep (comma separated)
    #[arg(long, value_delimiter = ',', default_value = "50,100")]
    populations: Vec<usize>,

    /// Iteration counts to sweep (comma separated)
    #[arg(long, value_delimiter = ',', default_value = "20,50,100")]
    iterations: Vec<usize>,

    /// Independent runs per (population, iterations) cell
    #[arg(long, default_value_t = 10)]
    runs: usize,

    /// Repeat the whole sweep this many times, appending to the report
    #[arg(long, default_value_t = 1)]
    repeat: usize,

    /// Optional random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Inertia weight
    #[arg(long, default_value_t = 0.5)]
    w: f64,

    /// Cognitive coefficient
    #[arg(long, default_value_t = 1.5)]
    c1: f64,

    /// Social coefficient
    #[arg(long, default_value_t = 1.5)]
    c2: f64,

    /// Lower position bound
    #[arg(long, default_value_t = -512.0, allow_hyphen_values = true)]
    pos_min: f64,

    /// Upper position bound
    #[arg(long, default_value_t = 512.0, allow_hyphen_values = true)]
    pos_max: f64,

    /// Initial velocity limit
    #[arg(long, default_value_t = 77.0)]
    vel_max: f64,

    /// Report file
    #[arg(long, default_value = "results.txt")]
    output: PathBuf,

    /// Record the convergence of one extra seeded run (largest population,
    /// largest iteration count) to CSV
    #[arg(long)]
    record: bool,

    /// Disable parallel execution of independent runs
    #[arg(long)]
    no_parallel: bool,

    /// Number of threads (0 = use all available cores)
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Print progress to stderr
    #[arg(long)]
    disp: bool,
}

fn main() {
    let args = Cli::parse();

    if args.repeat == 0 {
        eprintln!("Error: --repeat must be at least 1.");
        process::exit(2);
    }

    let params = SwarmParams {
        dimensions: 2,
        pos_min: args.pos_min,
        pos_max: args.pos_max,
        vel_max: args.vel_max,
        w: args.w,
        c1: args.c1,
        c2: args.c2,
    };

    let parallel = ParallelConfig {
        enabled: !args.no_parallel,
        num_threads: if args.threads == 0 {
            None
        } else {
            Some(args.threads)
        },
    };

    let overall_start = Instant::now();

    for round in 0..args.repeat {
        let config = SweepConfig {
            populations: args.populations.clone(),
            iterations: args.iterations.clone(),
            runs: args.runs,
            // keep repeats distinct but reproducible
            seed: args
                .seed
                .map(|s| s.wrapping_add((round as u64) * (args.runs as u64))),
            params,
            parallel: parallel.clone(),
            disp: args.disp,
        };

        let rows = match run_sweep(&config) {
            Ok(rows) => rows,
            Err(e) => {
                eprintln!("Error: sweep failed: {}", e);
                process::exit(2);
            }
        };

        print!("{}", format_report(&rows));

        if let Err(e) = write_report(&args.output, &rows, round > 0) {
            eprintln!("Error: cannot write {}: {}", args.output.display(), e);
            process::exit(1);
        }
    }

    println!(
        "\nSweep completed in {:.2?}; report written to {}",
        overall_start.elapsed(),
        args.output.display()
    );

    if args.record {
        record_run(&args, params);
    }
}

fn record_run(args: &Cli, params: SwarmParams) {
    let population = args.populations.iter().copied().max().unwrap_or(50);
    let iterations = args.iterations.iter().copied().max().unwrap_or(100);
    let recorder = ConvergenceRecorder::new(format!(
        "eggholder_pop{}_iter{}",
        population, iterations
    ));

    let mut builder = PSOConfigBuilder::new()
        .population(population)
        .iterations(iterations)
        .params(params)
        .disp(args.disp)
        .callback(recorder.create_callback());
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }

    let report = match builder.build().and_then(eggholder_swarm) {
        Ok(mut pso) => pso.solve(),
        Err(e) => {
            eprintln!("Error: invalid configuration: {}", e);
            process::exit(2);
        }
    };

    println!(
        "Recorded run: best f = {:.6} at [{:.6}, {:.6}]",
        report.fun, report.x[0], report.x[1]
    );
    match recorder.save_csv() {
        Ok(path) => println!("Convergence CSV saved to {}", path.display()),
        Err(e) => {
            eprintln!("Error: cannot save convergence CSV: {}", e);
            process::exit(1);
        }
    }
}
