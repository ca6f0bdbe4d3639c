use mgmt_console::{
    jca_registry, ConsoleConfig, ConsoleError, ConsoleParts, ConsoleSystem, FormItemKind,
    InMemoryJcaView, Level, RecordingNotifier, SlotState, ThreadPool, ThreadPoolSubmission,
    ThreadPoolVariant,
};
use mgmt_console::form::TYPE;
use mgmt_console::jca::templates::DISTRIBUTED_WORKMANAGER_TEMPLATE;
use mgmt_framework::{AddressTemplate, Operation, ResourceAddress};
use serde_json::{json, Map, Value};
use std::sync::Arc;

fn attributes(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn wm_template() -> AddressTemplate {
    AddressTemplate::of("subsystem=jca/workmanager=*")
}

fn launch(
    seed: Vec<(ResourceAddress, Map<String, Value>)>,
) -> (ConsoleSystem, Arc<InMemoryJcaView>, Arc<RecordingNotifier>) {
    let view = Arc::new(InMemoryJcaView::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let system = ConsoleSystem::start(
        &ConsoleConfig::default(),
        seed,
        ConsoleParts {
            registry: Arc::new(jca_registry()),
            notifier: notifier.clone(),
            view: view.clone(),
        },
    )
    .unwrap();
    (system, view, notifier)
}

fn start(
    with_lrt: bool,
) -> (ConsoleSystem, Arc<InMemoryJcaView>, Arc<RecordingNotifier>) {
    let jca = ResourceAddress::root().child("subsystem", "jca");
    let wm1 = jca.child("workmanager", "wm1");
    let mut seed = vec![(jca, Map::new()), (wm1.clone(), attributes(json!({"name": "wm1"})))];
    if with_lrt {
        seed.push((
            wm1.child("long-running-threads", "lrt-a"),
            attributes(json!({"max-threads": 10, "queue-length": 10})),
        ));
    }
    launch(seed)
}

fn names(properties: &[mgmt_framework::Property]) -> Vec<&str> {
    properties.iter().map(|p| p.name.as_str()).collect()
}

/// End to end: wm1 already has lrt-a, so only a short running pool may be added.
#[tokio::test]
async fn test_add_missing_short_running_pool() {
    let (system, view, notifier) = start(true);

    // 1. The dialog locks the type to Short Running
    let dialog = system
        .presenter
        .launch_add_thread_pool(&wm_template(), "wm1")
        .await
        .unwrap();
    assert_eq!(
        dialog.slot,
        SlotState::PartiallyFilled {
            missing: ThreadPoolVariant::ShortRunning
        }
    );
    let type_item = dialog.form.item(TYPE).unwrap();
    assert!(!type_item.enabled);
    assert_eq!(type_item.value, Some(json!("Short Running")));

    // 2. Submit srt-b
    let address = system
        .presenter
        .add_thread_pool(
            &dialog,
            ThreadPoolSubmission {
                variant: None,
                name: "srt-b".into(),
                attributes: attributes(json!({"max-threads": 5, "queue-length": 5})),
            },
        )
        .await
        .unwrap();
    assert_eq!(
        address.to_string(),
        "/subsystem=jca/workmanager=wm1/short-running-threads=srt-b"
    );

    // 3. The view shows the refreshed lists
    let pools = view.thread_pools().unwrap();
    assert_eq!(names(&pools.lrt), vec!["lrt-a"]);
    assert_eq!(names(&pools.srt), vec!["srt-b"]);
    assert_eq!(pools.srt[0].value["max-threads"], 5);
    assert_eq!(notifier.messages()[0].text, "Thread Pool srt-b successfully added.");

    // 4. A third pool is refused
    let err = system
        .presenter
        .launch_add_thread_pool(&wm_template(), "wm1")
        .await
        .unwrap_err();
    assert!(matches!(err, ConsoleError::ConstraintViolation(_)));
    assert_eq!(notifier.messages().last().unwrap().level, Level::Error);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_empty_work_manager_offers_both_variants() {
    let (system, _view, _notifier) = start(false);

    let dialog = system
        .presenter
        .launch_add_thread_pool(&wm_template(), "wm1")
        .await
        .unwrap();

    assert_eq!(dialog.slot, SlotState::Open);
    assert_eq!(
        dialog.form.item(TYPE).unwrap().kind,
        FormItemKind::SingleSelect {
            choices: vec!["Long Running".into(), "Short Running".into()]
        }
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_save_reset_and_remove_pool() {
    let (system, view, notifier) = start(true);
    let pool = ThreadPool::new("lrt-a", ThreadPoolVariant::LongRunning, json!({}));

    // Save only what changed
    let changed = attributes(json!({"max-threads": 20, "thread-factory": "tf"}));
    system
        .presenter
        .save_thread_pool(&wm_template(), "wm1", &pool, &changed)
        .await
        .unwrap();
    let lrt = view.thread_pools().unwrap().lrt;
    assert_eq!(lrt[0].value["max-threads"], 20);
    assert_eq!(lrt[0].value["thread-factory"], "tf");
    assert_eq!(lrt[0].value["queue-length"], 10);

    // Reset: thread-factory is undefined, required attributes stay
    let form = mgmt_console::Form::from_metadata(
        "pool",
        &mgmt_console::jca::metadata::thread_pool_metadata(),
        &["max-threads", "queue-length", "thread-factory"],
    );
    system
        .presenter
        .reset_thread_pool(&wm_template(), "wm1", &pool, &form)
        .await
        .unwrap();
    let lrt = view.thread_pools().unwrap().lrt;
    assert!(lrt[0].value.get("thread-factory").is_none());
    assert_eq!(lrt[0].value["max-threads"], 20);

    // Remove
    system
        .presenter
        .remove_thread_pool(&wm_template(), "wm1", &pool)
        .await
        .unwrap();
    assert!(view.thread_pools().unwrap().lrt.is_empty());

    let texts: Vec<String> = notifier.messages().into_iter().map(|m| m.text).collect();
    assert_eq!(
        texts,
        vec![
            "Thread Pool lrt-a successfully modified.",
            "Thread Pool lrt-a successfully reset.",
            "Thread Pool lrt-a successfully removed.",
        ]
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_failed_create_leaves_view_alone() {
    let (system, view, _notifier) = start(false);
    let dialog = system
        .presenter
        .launch_add_thread_pool(&wm_template(), "wm1")
        .await
        .unwrap();

    // Someone else removes the work manager in between
    let dispatcher = system.dispatcher();
    let wm1 = ResourceAddress::root()
        .child("subsystem", "jca")
        .child("workmanager", "wm1");
    dispatcher.execute(Operation::remove(wm1)).await.unwrap();
    drop(dispatcher);

    let err = system
        .presenter
        .add_thread_pool(
            &dialog,
            ThreadPoolSubmission {
                variant: Some(ThreadPoolVariant::LongRunning),
                name: "lrt-a".into(),
                attributes: Map::new(),
            },
        )
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ConsoleError::RemoteOperationFailure(
            "Management resource '/subsystem=jca/workmanager=wm1' not found".into()
        )
    );
    assert_eq!(view.updates(), 0);

    system.shutdown().await.unwrap();
}

/// Distributed work managers follow the same pool rules.
#[tokio::test]
async fn test_distributed_work_manager_pools() {
    let jca = ResourceAddress::root().child("subsystem", "jca");
    let dwm1 = jca.child("distributed-workmanager", "dwm1");
    let (system, view, notifier) = launch(vec![
        (jca, Map::new()),
        (dwm1, attributes(json!({"name": "dwm1"}))),
    ]);
    let template = AddressTemplate::of(DISTRIBUTED_WORKMANAGER_TEMPLATE);

    // 1. Both variants are offered; create a long running pool
    let dialog = system
        .presenter
        .launch_add_thread_pool(&template, "dwm1")
        .await
        .unwrap();
    assert_eq!(dialog.slot, SlotState::Open);
    let address = system
        .presenter
        .add_thread_pool(
            &dialog,
            ThreadPoolSubmission {
                variant: Some(ThreadPoolVariant::LongRunning),
                name: "lrt-d".into(),
                attributes: attributes(json!({"max-threads": 3, "queue-length": 3})),
            },
        )
        .await
        .unwrap();
    assert_eq!(
        address.to_string(),
        "/subsystem=jca/distributed-workmanager=dwm1/long-running-threads=lrt-d"
    );
    let pools = view.thread_pools().unwrap();
    assert_eq!(pools.workmanager, "dwm1");
    assert_eq!(names(&pools.lrt), vec!["lrt-d"]);

    // 2. Only the short running slot is left
    let dialog = system
        .presenter
        .launch_add_thread_pool(&template, "dwm1")
        .await
        .unwrap();
    assert_eq!(dialog.fixed_variant(), Some(ThreadPoolVariant::ShortRunning));
    system
        .presenter
        .add_thread_pool(
            &dialog,
            ThreadPoolSubmission {
                name: "srt-d".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(names(&view.thread_pools().unwrap().srt), vec!["srt-d"]);

    // 3. Then the work manager is full
    let err = system
        .presenter
        .launch_add_thread_pool(&template, "dwm1")
        .await
        .unwrap_err();
    assert!(matches!(err, ConsoleError::ConstraintViolation(_)));

    // 4. Remove goes to the distributed address
    let pool = ThreadPool::new("lrt-d", ThreadPoolVariant::LongRunning, json!({}));
    system
        .presenter
        .remove_thread_pool(&template, "dwm1", &pool)
        .await
        .unwrap();
    assert!(view.thread_pools().unwrap().lrt.is_empty());
    assert_eq!(
        notifier.messages().last().unwrap().text,
        "Thread Pool lrt-d successfully removed."
    );

    system.shutdown().await.unwrap();
}
