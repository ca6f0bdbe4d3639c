use mgmt_console::{
    init_tracing, jca_registry, AssignContentDialog, ConsoleConfig, ConsoleParts, ConsoleSystem,
    Content, InMemoryJcaView, ThreadPoolSubmission, TracingNotifier,
};
use mgmt_framework::{AddressTemplate, Property, ResourceAddress};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::{info, info_span, warn, Instrument};

fn attributes(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn names(properties: &[Property]) -> Vec<&str> {
    properties.iter().map(|p| p.name.as_str()).collect()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => ConsoleConfig::load(path)?,
        None => {
            let mut config = ConsoleConfig::default();
            config.apply_env();
            config
        }
    };
    init_tracing(&config);

    let jca = ResourceAddress::root().child("subsystem", "jca");
    let wm1 = jca.child("workmanager", "wm1");
    let lrt_a = wm1.child("long-running-threads", "lrt-a");
    let seed = vec![
        (jca, Map::new()),
        (wm1, attributes(json!({"name": "wm1"}))),
        (lrt_a, attributes(json!({"max-threads": 10, "queue-length": 10}))),
    ];

    let view = Arc::new(InMemoryJcaView::default());
    let system = ConsoleSystem::start(
        &config,
        seed,
        ConsoleParts {
            registry: Arc::new(jca_registry()),
            notifier: Arc::new(TracingNotifier),
            view: view.clone(),
        },
    )?;

    // 1. Thread pools
    let wm = AddressTemplate::of("subsystem=jca/workmanager=*");
    async {
        let dialog = system.presenter.launch_add_thread_pool(&wm, "wm1").await?;
        info!(slot = ?dialog.slot, "Add dialog ready");

        let submission = ThreadPoolSubmission {
            variant: dialog.fixed_variant(),
            name: "srt-b".into(),
            attributes: attributes(json!({"max-threads": 5, "queue-length": 5})),
        };
        let address = system.presenter.add_thread_pool(&dialog, submission).await?;
        info!(%address, "Created");

        if let Err(e) = system.presenter.launch_add_thread_pool(&wm, "wm1").await {
            warn!(error = %e, "Third pool refused");
        }
        Ok::<_, mgmt_console::ConsoleError>(())
    }
    .instrument(info_span!("thread_pools"))
    .await?;

    if let Some(pools) = view.thread_pools() {
        info!(lrt = ?names(&pools.lrt), srt = ?names(&pools.srt), "View");
    }

    // 2. Tracer
    system.presenter.add_tracer().await?;

    // 3. Content assignment
    let mut dialog = AssignContentDialog::assign(
        Content::new("app.war"),
        ["g3".to_string(), "g1".to_string(), "g2".to_string()],
        |content, groups, enable| {
            info!(content = %content.name, ?groups, enable, "Assign");
        },
    );
    dialog.show();
    if let Err(e) = dialog.confirm() {
        warn!(error = %e, "Nothing selected");
    }
    dialog.select("g2");
    dialog.confirm()?;

    system.shutdown().await?;
    Ok(())
}
