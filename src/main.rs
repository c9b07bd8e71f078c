use fundplan::{AllocationPlanner, AppConfig, Catalog, Cli, CsvDataSource, DataSource as _};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::import()?;
    let config = AppConfig::load(&cli)?;

    let raw = CsvDataSource::new(&config.data.dir).load()?;
    let catalog = Catalog::load(raw, config.as_of())?;

    let planner = AllocationPlanner::new(config.planner_settings());
    let context = planner.build(&catalog)?;

    if let Some(path) = &cli.export_lp {
        std::fs::write(path, context.problem.to_lp_format())?;
        tracing::info!(path = %path.display(), "model exported");
    }

    let solver = fundplan::SolverFactory::create(planner.settings().backend)?;
    let report = planner.solve(&context, solver.as_ref())?;

    // An unsolvable plan is a reported outcome, not a failed run
    print!("{}", report);
    Ok(())
}
