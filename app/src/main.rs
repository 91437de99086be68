//! render-flow
//!
//! Replays a recorded trace of page notifications through a detection
//! pipeline, forwards the events to a panel log and prints it.
//!
//! Usage: `render-flow <trace.jsonl> [settings.json]`

use std::path::PathBuf;

use anyhow::{bail, Context};
use pipeline::{read_trace, Pipeline, ReplayHost, SettingsStore};
use relay::{Forwarder, Relay};
use sink::{pump, EventLog};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const USAGE: &str = "usage: render-flow <trace.jsonl> [settings.json]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args_os().skip(1);
    let Some(trace_path) = args.next().map(PathBuf::from) else {
        bail!(USAGE);
    };
    let settings_path = args.next().map(PathBuf::from);
    if args.next().is_some() {
        bail!(USAGE);
    }

    let settings = match settings_path {
        Some(path) => {
            let mut store = SettingsStore::new(&path);
            store
                .load()
                .await
                .with_context(|| format!("failed to load settings from {}", path.display()))?
                .clone()
        }
        None => Default::default(),
    };
    tracing::info!(
        title = %settings.panel.title,
        icon = %settings.panel.icon,
        page = %settings.panel.page,
        "panel registered"
    );

    let steps = read_trace(&trace_path)
        .await
        .with_context(|| format!("failed to read trace {}", trace_path.display()))?;
    tracing::info!("Loaded {} trace steps from {:?}", steps.len(), trace_path);

    let mut host = ReplayHost::new();
    let pipeline = Pipeline::start(&mut host, &settings);

    // Page -> background forwarder -> panel
    let panel = Relay::new();
    let mut panel_listener = panel.subscribe();
    let forwarder = tokio::spawn(Forwarder::new(pipeline.subscribe(), panel).run());
    let panel_task = tokio::spawn(async move {
        let mut log = EventLog::new();
        pump(&mut panel_listener, &mut log).await;
        log
    });

    let replayed = host.replay(&steps);
    tracing::info!(
        steps = replayed.steps,
        mutation_records = replayed.mutation_records,
        performance_entries = replayed.performance_entries,
        "trace replayed"
    );

    let emitted = pipeline.shutdown();
    let forwarded = forwarder.await.context("forwarder task failed")?;
    let log = panel_task.await.context("panel task failed")?;
    tracing::info!(emitted = emitted.total(), forwarded = forwarded, received = log.len(), "done");

    for line in log.render_lines() {
        println!("{}", line);
    }

    Ok(())
}
