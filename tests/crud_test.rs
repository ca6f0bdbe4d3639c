use mgmt_console::notify::messages;
use mgmt_console::{CrudCoordinator, ConsoleError, Message, RecordingNotifier};
use mgmt_framework::mock::{create_mock_dispatcher, expect_execute, MockDispatcher};
use mgmt_framework::{AddressTemplate, DispatchError, MapStatementContext};
use serde_json::{json, Map, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn crud(dispatcher: mgmt_framework::Dispatcher, notifier: Arc<RecordingNotifier>) -> CrudCoordinator {
    CrudCoordinator::new(
        dispatcher,
        Arc::new(MapStatementContext::default().with("selected.host", "primary")),
        notifier,
    )
}

/// An empty change set sends nothing and still refreshes exactly once.
#[tokio::test]
async fn test_empty_save_makes_no_writes_and_one_refresh() {
    let mock = MockDispatcher::new();
    let notifier = Arc::new(RecordingNotifier::default());
    let crud = crud(mock.dispatcher(), notifier.clone());
    let refreshes = AtomicUsize::new(0);

    crud.save_singleton(
        &AddressTemplate::of("subsystem=jca/tracer=tracer"),
        &Map::new(),
        "Tracer successfully modified.",
        || async {
            refreshes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        },
    )
    .await
    .unwrap();

    assert_eq!(refreshes.load(Ordering::SeqCst), 1);
    assert!(mock.recorded().is_empty());
    assert_eq!(notifier.messages(), vec![Message::info(messages::no_changes())]);
}

/// A closed channel fails the create and skips the refresh.
#[tokio::test]
async fn test_closed_dispatcher_sends_no_create() {
    let (dispatcher, receiver) = create_mock_dispatcher(1);
    drop(receiver);
    let notifier = Arc::new(RecordingNotifier::default());
    let crud = crud(dispatcher, notifier.clone());
    let refreshes = AtomicUsize::new(0);

    let err = crud
        .add(
            "Work Manager",
            "wm2",
            &AddressTemplate::of("subsystem=jca/workmanager=*"),
            json!({"name": "wm2"}),
            |_| async {
                refreshes.fetch_add(1, Ordering::SeqCst);
                Ok(())
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ConsoleError::Communication(_)));
    assert_eq!(refreshes.load(Ordering::SeqCst), 0);
    assert!(notifier.messages().is_empty());
}

/// The refresh starts only after the mutation's reply arrived.
#[tokio::test]
async fn test_refresh_waits_for_mutation_reply() {
    let (dispatcher, mut receiver) = create_mock_dispatcher(4);
    let crud = crud(dispatcher, Arc::new(RecordingNotifier::default()));
    let refreshed = Arc::new(AtomicUsize::new(0));
    let flag = refreshed.clone();

    let task = tokio::spawn(async move {
        crud.remove(
            "Work Manager",
            "wm1",
            &AddressTemplate::of("subsystem=jca/workmanager=*"),
            move || async move {
                flag.fetch_add(1, Ordering::SeqCst);
                Ok(())
            },
        )
        .await
    });

    let (operation, responder) = expect_execute(&mut receiver).await.unwrap();
    assert_eq!(operation.name(), "remove");
    tokio::task::yield_now().await;
    assert_eq!(refreshed.load(Ordering::SeqCst), 0);

    responder.send(Ok(Value::Null)).unwrap();
    task.await.unwrap().unwrap();
    assert_eq!(refreshed.load(Ordering::SeqCst), 1);
}

/// Tuples in templates are filled from the statement context.
#[tokio::test]
async fn test_tuple_templates_resolve_from_context() {
    let mut mock = MockDispatcher::new();
    mock.expect_execute().return_ok(json!({"name": "primary"}));
    let crud = crud(mock.dispatcher(), Arc::new(RecordingNotifier::default()));

    let node = crud
        .read(&AddressTemplate::of("host={selected.host}/subsystem=jca"), 0)
        .await
        .unwrap();

    assert_eq!(node["name"], "primary");
    assert_eq!(
        mock.executed()[0].address.to_string(),
        "/host=primary/subsystem=jca"
    );
    mock.verify();
}

/// A rejected composite is reported once, verbatim.
#[tokio::test]
async fn test_rejected_composite_is_surfaced_verbatim() {
    let mut mock = MockDispatcher::new();
    mock.expect_composite()
        .return_err(DispatchError::Failed("Step 2 failed".into()));
    let notifier = Arc::new(RecordingNotifier::default());
    let crud = crud(mock.dispatcher(), notifier.clone());

    let mut changed = Map::new();
    changed.insert("a".into(), json!(1));
    changed.insert("b".into(), json!(2));
    let err = crud
        .save(
            &AddressTemplate::of("subsystem=jca/workmanager=*"),
            "wm1",
            &changed,
            "saved",
            || async { Ok(()) },
        )
        .await
        .unwrap_err();

    assert_eq!(err, ConsoleError::RemoteOperationFailure("Step 2 failed".into()));
    assert!(notifier.messages().is_empty());
}
