//! `vellum`: run an application directory on the headless toolkit, with
//! user activity read line by line from stdin.
//!
//! ```text
//! $ cargo run -p vellum-studio -- demos/console
//! type command test
//! submit command
//! tree
//! ```

mod commands;
mod console;

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use vellum_ui::HeadlessToolkit;
use vellum_ui::host::HostBuilder;
use vellum_ui::logging::{LoggingConfig, init_logging};

#[derive(Parser, Debug)]
#[command(name = "vellum")]
#[command(about = "Run a vellum application from the console")]
struct Cli {
    /// Application directory holding app.toml, interface/ and lang/
    #[arg(default_value = "demos/console")]
    app_dir: PathBuf,

    /// Start in this language instead of the manifest's
    #[arg(short, long)]
    lang: Option<String>,

    /// Log filter, e.g. "debug" or "vellum_ui=trace" (defaults to RUST_LOG, then info)
    #[arg(long)]
    log: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(LoggingConfig { env_filter: cli.log.clone(), ..Default::default() });

    let mut toolkit = HeadlessToolkit::new().with_echo(true);
    toolkit.feed(console::inputs(io::stdin().lines()));

    let mut builder = HostBuilder::from_manifest(&cli.app_dir)
        .with_context(|| format!("cannot load application {}", cli.app_dir.display()))?;
    if let Some(lang) = cli.lang {
        builder = builder.language(lang);
    }
    let host = commands::register(builder).toolkit(toolkit).build();

    log::info!("{} ready; {}", host.name(), console::USAGE);
    host.run_main()
        .with_context(|| format!("{} stopped", host.name()))?;
    Ok(())
}
