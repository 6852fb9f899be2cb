use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::Parser;
use serde_json::json;

use crud_sim::catalog::{self, CatalogService, CatalogStore, RefreshmentPoint};
use crud_sim::logging::{self, LogFormat};
use crud_sim::{Console, Controller, SimulationConfig};

/// Runs a scripted CRUD session against the refreshment point catalog.
#[derive(Debug, Parser)]
#[command(name = "crud-sim-demo", version, about)]
struct Cli {
    /// TOML file with simulation settings
    #[arg(long, env = "CRUD_SIM_CONFIG")]
    config: Option<PathBuf>,

    /// Probability that a connection check succeeds, in [0, 1]
    #[arg(long)]
    success_probability: Option<f64>,

    /// Seed for reproducible outages
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated latency per operation, in milliseconds
    #[arg(long)]
    latency_ms: Option<u64>,

    /// Log output format: pretty or json
    #[arg(long, default_value = "pretty")]
    log_format: LogFormat,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Serve the controller over HTTP at this address instead of running the script
    #[cfg(feature = "http")]
    #[arg(long)]
    serve: Option<String>,
}

impl Cli {
    fn simulation_config(&self) -> anyhow::Result<SimulationConfig> {
        let config = match &self.config {
            Some(path) => SimulationConfig::from_file(path)?,
            None => SimulationConfig::default(),
        };
        let mut config = config.apply_env()?;
        if let Some(p) = self.success_probability {
            config.success_probability = p;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(ms) = self.latency_ms {
            config.latency_ms = ms;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_format, &cli.log_level).map_err(anyhow::Error::msg)?;

    let config = cli.simulation_config()?;
    tracing::info!(
        success_probability = config.success_probability,
        seed = ?config.seed,
        latency_ms = config.latency_ms,
        "starting demo"
    );

    let service = Arc::new(catalog::service(&config).context("loading sample refreshment points")?);
    let controller = Arc::new(Controller::crud(Arc::clone(&service)));

    if serve_if_requested(&cli, &controller)? {
        return Ok(());
    }

    let stdout = io::stdout();
    let mut console = Console::new(stdout.lock());
    run_script(&mut console, &controller, &service)?;
    console.into_inner().flush()?;
    Ok(())
}

#[cfg(feature = "http")]
fn serve_if_requested(
    cli: &Cli,
    controller: &Arc<Controller<RefreshmentPoint, CatalogStore>>,
) -> anyhow::Result<bool> {
    let Some(addr) = &cli.serve else {
        return Ok(false);
    };
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(crud_sim::controller::serve(Arc::clone(controller), addr))?;
    Ok(true)
}

#[cfg(not(feature = "http"))]
fn serve_if_requested(
    _cli: &Cli,
    _controller: &Arc<Controller<RefreshmentPoint, CatalogStore>>,
) -> anyhow::Result<bool> {
    Ok(false)
}

fn run_script<W: Write>(
    console: &mut Console<W>,
    controller: &Controller<RefreshmentPoint, CatalogStore>,
    service: &CatalogService,
) -> io::Result<()> {
    let command = |name: &str| format!("{}.{}", catalog::COLLECTION, name);

    console.heading("browse")?;
    console.report("list all", &controller.dispatch(&command("search"), json!(null)))?;
    console.report(
        "search \"gelat\"",
        &controller.dispatch(&command("search"), json!({ "filter": "gelat" })),
    )?;
    console.report("get RP003", &controller.dispatch(&command("get"), json!({ "id": "RP003" })))?;

    console.heading("insert")?;
    console.report(
        "create without fields",
        &controller.dispatch(&command("create"), json!({})),
    )?;
    let mountain_cafe = RefreshmentPoint::new("Mountain Cafe", "Sentiero degli Dei, km 4", 20);
    console.render("create Mountain Cafe", &service.create(mountain_cafe))?;

    console.heading("delete")?;
    for attempt in ["first", "second"] {
        console.report(
            &format!("delete RP001 ({} attempt)", attempt),
            &controller.dispatch(&command("delete"), json!({ "id": "RP001" })),
        )?;
    }
    console.report("delete blank id", &controller.dispatch(&command("delete"), json!({ "id": "  " })))?;

    console.heading("outage")?;
    if let Some(connection) = service.connection() {
        connection.force_available(false);
        console.report("delete RP002", &controller.dispatch(&command("delete"), json!({ "id": "RP002" })))?;
        console.report("search", &controller.dispatch(&command("search"), json!(null)))?;
        connection.clear_forced();
    }
    console.report("search after recovery", &controller.dispatch(&command("search"), json!(null)))?;

    Ok(())
}
