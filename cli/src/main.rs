//! Orgnet CLI: run the organizational network simulator from the terminal
//!
//! Builds a controller from flags or a parameter file, runs a number of
//! ticks and prints network statistics.

use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use orgnet::{ErgmParameters, NetworkStatistics, SimulationController, StateSnapshot};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "orgnet", version, about = "Organizational network simulator")]
struct Cli {
    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation and report statistics
    Run {
        /// Number of ticks to run
        #[arg(long, default_value_t = 100)]
        ticks: usize,

        /// Seed for a reproducible run (entropy-seeded if omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Parameter file (.yaml, .yml or .json)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Report every N ticks (0 reports only the final state)
        #[arg(long, default_value_t = 0)]
        every: usize,

        /// Emit the full final snapshot (nodes and edges) as JSON
        #[arg(long)]
        snapshot: bool,

        #[command(flatten)]
        overrides: ParamOverrides,
    },
    /// Print the default parameter file as YAML
    Params,
}

#[derive(clap::Args)]
struct ParamOverrides {
    #[arg(long)]
    nodes: Option<usize>,
    #[arg(long)]
    density: Option<f64>,
    #[arg(long)]
    homophily: Option<f64>,
    #[arg(long)]
    preferential_attachment: Option<f64>,
    #[arg(long)]
    clustering: Option<f64>,
    #[arg(long)]
    temporal_decay: Option<f64>,
    #[arg(long)]
    growth: bool,
    #[arg(long)]
    growth_rate: Option<f64>,
}

impl ParamOverrides {
    fn apply(&self, params: &mut ErgmParameters) {
        if let Some(v) = self.nodes {
            params.node_count = v;
        }
        if let Some(v) = self.density {
            params.density = v;
        }
        if let Some(v) = self.homophily {
            params.homophily = v;
        }
        if let Some(v) = self.preferential_attachment {
            params.preferential_attachment = v;
        }
        if let Some(v) = self.clustering {
            params.clustering = v;
        }
        if let Some(v) = self.temporal_decay {
            params.temporal_decay = v;
        }
        if self.growth {
            params.growth_mode = true;
        }
        if let Some(v) = self.growth_rate {
            params.growth_rate = v;
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            ticks,
            seed,
            config,
            every,
            snapshot,
            overrides,
        } => run_simulation(ticks, seed, config, every, snapshot, &overrides, &cli.format),
        Commands::Params => print_params(),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn load_params(config: Option<PathBuf>, overrides: &ParamOverrides) -> anyhow::Result<ErgmParameters> {
    let mut params = match config {
        Some(path) => ErgmParameters::from_path(&path)
            .with_context(|| format!("loading parameters from {}", path.display()))?,
        None => ErgmParameters::default(),
    };
    overrides.apply(&mut params);
    params.validate()?;
    Ok(params)
}

fn run_simulation(
    ticks: usize,
    seed: Option<u64>,
    config: Option<PathBuf>,
    every: usize,
    snapshot: bool,
    overrides: &ParamOverrides,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let params = load_params(config, overrides)?;
    let mut sim = match seed {
        Some(seed) => SimulationController::seeded(params, seed),
        None => SimulationController::new(params),
    };

    let mut rows: Vec<(f64, NetworkStatistics)> = vec![(sim.time(), sim.statistics().clone())];
    for tick in 1..=ticks {
        let state = sim.step();
        if every > 0 && tick % every == 0 {
            rows.push((state.time, state.statistics));
        }
    }
    if every == 0 || ticks % every != 0 {
        rows.push((sim.time(), sim.statistics().clone()));
    }

    if snapshot {
        print_snapshot(&sim.snapshot())?;
        return Ok(());
    }

    match format {
        OutputFormat::Json => {
            let records: Vec<serde_json::Value> = rows
                .iter()
                .map(|(time, stats)| serde_json::json!({ "time": time, "statistics": stats }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        OutputFormat::Csv => {
            println!("{}", HEADER.join(","));
            for (time, stats) in &rows {
                println!("{}", stat_cells(*time, stats).join(","));
            }
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(HEADER);
            for (time, stats) in &rows {
                table.add_row(stat_cells(*time, stats));
            }
            println!("{}", table);
            if let Some((_, last)) = rows.last() {
                println!("degree distribution: {}", format_distribution(last));
            }
        }
    }

    Ok(())
}

const HEADER: [&str; 10] = [
    "time",
    "nodes",
    "edges",
    "density",
    "avg_degree",
    "max_degree",
    "clustering",
    "transitivity",
    "homophily",
    "components",
];

fn stat_cells(time: f64, stats: &NetworkStatistics) -> Vec<String> {
    vec![
        format!("{:.1}", time),
        stats.node_count.to_string(),
        stats.edge_count.to_string(),
        format!("{:.4}", stats.density),
        format!("{:.3}", stats.average_degree),
        stats.max_degree.to_string(),
        format!("{:.4}", stats.clustering_coefficient),
        format!("{:.4}", stats.transitivity),
        format!("{:.4}", stats.department_homophily),
        stats.component_count.to_string(),
    ]
}

fn format_distribution(stats: &NetworkStatistics) -> String {
    stats
        .degree_distribution
        .iter()
        .map(|(degree, count)| format!("{}:{}", degree, count))
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_snapshot(snapshot: &StateSnapshot) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(snapshot)?);
    Ok(())
}

fn print_params() -> anyhow::Result<()> {
    print!("{}", ErgmParameters::default().to_yaml_string()?);
    Ok(())
}
