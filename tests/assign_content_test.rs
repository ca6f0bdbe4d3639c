use mgmt_console::{AssignContentDialog, ConsoleError, Content};
use std::sync::{Arc, Mutex};

type Assigned = Arc<Mutex<Vec<(String, Vec<String>, bool)>>>;

/// End to end: empty confirm is refused, then g2 is assigned.
#[test]
fn test_assign_content_to_selected_group() {
    let assigned: Assigned = Arc::default();
    let recorded = assigned.clone();
    let mut dialog = AssignContentDialog::assign(
        Content::new("app.war"),
        ["g3", "g1", "g2"].map(String::from),
        move |content, groups, enable| {
            recorded
                .lock()
                .unwrap()
                .push((content.name.clone(), groups.to_vec(), enable));
        },
    );

    dialog.show();
    assert_eq!(dialog.title(), "Assign Content");
    assert!(dialog.enable_visible());
    let rows: Vec<&str> = dialog.rows().iter().map(|r| r.server_group.as_str()).collect();
    assert_eq!(rows, vec!["g1", "g2", "g3"]);

    // 1. Nothing selected
    assert_eq!(dialog.confirm(), Err(ConsoleError::EmptySelection));
    assert!(dialog.is_open());
    assert!(dialog.indicator_visible());
    assert!(assigned.lock().unwrap().is_empty());

    // 2. Select g2
    dialog.select("g2");
    dialog.confirm().unwrap();
    assert!(!dialog.is_open());
    assert_eq!(
        *assigned.lock().unwrap(),
        vec![("app.war".to_string(), vec!["g2".to_string()], false)]
    );
}
