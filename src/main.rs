use anyhow::{Context, Result};
use bikeshare::{
    config::{Config, CONFIG_FILE},
    session::{ConsolePrompter, Session},
};
use std::io;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    // stdout belongs to the prompts and reports, so logs go to stderr
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();
    info!("startup");

    std::panic::set_hook(Box::new(|info| {
        eprintln!("panic: {:?}", info);
    }));

    // ─── 2) config & city table ──────────────────────────────────────
    let config = Config::load(CONFIG_FILE).context("loading configuration")?;
    let cities = config.city_table();
    for (city, path) in cities.iter() {
        info!(%city, path = %path.display(), "city data file");
    }

    // ─── 3) interactive session ──────────────────────────────────────
    let stdin = io::stdin();
    let prompter = ConsolePrompter::new(stdin.lock(), io::stdout());
    let mut session = Session::new(&cities, config.duration_unit, prompter, io::stdout());
    session.run()?;

    info!("done");
    Ok(())
}
