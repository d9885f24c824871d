use clap::Parser;
use replika::config::Cli;
use replika::{logging, Config, TracingLog};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Convert CLI args to Config - this validates immediately
    let config = Config::try_from(cli)?;
    config.prepare()?;

    // Dropping the guard flushes the log file, so it lives until the end of main
    let _guard = logging::init(&config.log_settings())?;

    tracing::info!(
        target: "replika",
        "replika v{} mirroring {} -> {} ({} cycle(s), every {}s, {} digest)",
        replika::VERSION,
        config.source.display(),
        config.replica.display(),
        config.count,
        config.interval.as_secs(),
        config.hash
    );

    let history = replika::commands::sync::run(&config, TracingLog);
    let errors: usize = history.iter().map(|stats| stats.errors).sum();
    if errors > 0 {
        tracing::warn!(target: "replika", "Finished with {errors} error(s), see log for details");
    }

    Ok(())
}
