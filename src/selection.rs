//! # Assign / Unassign Content
//!
//! A dialog listing server groups next to a checkbox column. The user picks at
//! least one group and confirms; the dialog then hands the content item and the
//! picked groups to the callback it was built with. Confirming with nothing
//! picked shows the "no server group selected" indicator and keeps the dialog
//! open.
//!
//! Only the selection state lives here. Rendering the table, the alert and the
//! enable switch is the UI layer's business.

use crate::error::ConsoleError;
use crate::model::Content;
use tracing::debug;

pub type AssignCallback = Box<dyn FnMut(&Content, &[String], bool) + Send>;
pub type UnassignCallback = Box<dyn FnMut(&Content, &[String]) + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignMode {
    Assign,
    Unassign,
}

enum Callback {
    Assign(AssignCallback),
    Unassign(UnassignCallback),
}

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectableRow {
    pub server_group: String,
    pub selected: bool,
}

pub struct AssignContentDialog {
    content: Content,
    server_groups: Vec<String>,
    callback: Callback,
    rows: Vec<SelectableRow>,
    indicator_visible: bool,
    enable: bool,
    open: bool,
}

impl AssignContentDialog {
    /// Dialog assigning `content` to some of `server_groups` (the ones it is not yet assigned to).
    pub fn assign<F>(
        content: Content,
        server_groups: impl IntoIterator<Item = String>,
        callback: F,
    ) -> Self
    where
        F: FnMut(&Content, &[String], bool) + Send + 'static,
    {
        Self::build(content, server_groups, Callback::Assign(Box::new(callback)))
    }

    /// Dialog unassigning `content` from some of `server_groups`.
    pub fn unassign<F>(
        content: Content,
        server_groups: impl IntoIterator<Item = String>,
        callback: F,
    ) -> Self
    where
        F: FnMut(&Content, &[String]) + Send + 'static,
    {
        Self::build(content, server_groups, Callback::Unassign(Box::new(callback)))
    }

    fn build(
        content: Content,
        server_groups: impl IntoIterator<Item = String>,
        callback: Callback,
    ) -> Self {
        let mut server_groups: Vec<String> = server_groups.into_iter().collect();
        server_groups.sort();
        server_groups.dedup();
        Self {
            content,
            server_groups,
            callback,
            rows: Vec::new(),
            indicator_visible: false,
            enable: false,
            open: false,
        }
    }

    pub fn mode(&self) -> AssignMode {
        match self.callback {
            Callback::Assign(_) => AssignMode::Assign,
            Callback::Unassign(_) => AssignMode::Unassign,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.mode() {
            AssignMode::Assign => "Assign Content",
            AssignMode::Unassign => "Unassign Content",
        }
    }

    pub fn primary_label(&self) -> &'static str {
        match self.mode() {
            AssignMode::Assign => "Assign",
            AssignMode::Unassign => "Unassign",
        }
    }

    pub fn description(&self) -> String {
        match self.mode() {
            AssignMode::Assign => format!(
                "Please choose the server groups to which {} should be assigned.",
                self.content.name
            ),
            AssignMode::Unassign => format!(
                "Please choose the server groups from which {} should be unassigned.",
                self.content.name
            ),
        }
    }

    /// Opens the dialog with every row unselected, the indicator hidden and the
    /// enable switch off.
    pub fn show(&mut self) {
        self.rows = self
            .server_groups
            .iter()
            .map(|server_group| SelectableRow {
                server_group: server_group.clone(),
                selected: false,
            })
            .collect();
        self.indicator_visible = false;
        self.enable = false;
        self.open = true;
        debug!(content = %self.content.name, rows = self.rows.len(), mode = ?self.mode(), "Dialog shown");
    }

    pub fn rows(&self) -> &[SelectableRow] {
        &self.rows
    }

    /// Selects the row of `server_group`. Returns `false` if there is no such row.
    pub fn select(&mut self, server_group: &str) -> bool {
        self.set_selected(server_group, true)
    }

    pub fn deselect(&mut self, server_group: &str) -> bool {
        self.set_selected(server_group, false)
    }

    fn set_selected(&mut self, server_group: &str, selected: bool) -> bool {
        match self.rows.iter_mut().find(|r| r.server_group == server_group) {
            Some(row) => {
                row.selected = selected;
                true
            }
            None => false,
        }
    }

    /// Selected server groups, in table order.
    pub fn selection(&self) -> Vec<String> {
        self.rows
            .iter()
            .filter(|r| r.selected)
            .map(|r| r.server_group.clone())
            .collect()
    }

    /// Sets the "enable after assignment" switch. Has no effect when unassigning.
    pub fn set_enable(&mut self, enable: bool) {
        if self.mode() == AssignMode::Assign {
            self.enable = enable;
        }
    }

    pub fn enable(&self) -> bool {
        self.enable
    }

    /// Whether the enable switch is shown.
    pub fn enable_visible(&self) -> bool {
        self.mode() == AssignMode::Assign
    }

    /// Whether the "no server group selected" indicator is shown.
    pub fn indicator_visible(&self) -> bool {
        self.indicator_visible
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The primary action. With an empty selection nothing is called and the
    /// dialog stays open; otherwise the callback runs once and the dialog closes.
    ///
    /// A dialog that is not open refuses with [`ConsoleError::DialogClosed`].
    pub fn confirm(&mut self) -> Result<(), ConsoleError> {
        if !self.open {
            return Err(ConsoleError::DialogClosed);
        }
        let selection = self.selection();
        self.indicator_visible = selection.is_empty();
        if selection.is_empty() {
            return Err(ConsoleError::EmptySelection);
        }

        debug!(content = %self.content.name, ?selection, "Confirmed");
        match &mut self.callback {
            Callback::Assign(callback) => callback(&self.content, &selection, self.enable),
            Callback::Unassign(callback) => callback(&self.content, &selection),
        }
        self.open = false;
        Ok(())
    }

    pub fn cancel(&mut self) {
        self.open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    type Calls = Arc<Mutex<Vec<(String, Vec<String>, bool)>>>;

    fn groups() -> Vec<String> {
        vec!["main-server-group".into(), "backup".into(), "Other".into()]
    }

    fn assign_dialog() -> (AssignContentDialog, Calls) {
        let calls: Calls = Arc::default();
        let recorded = calls.clone();
        let dialog = AssignContentDialog::assign(Content::new("app.war"), groups(), move |c, g, e| {
            recorded.lock().unwrap().push((c.name.clone(), g.to_vec(), e));
        });
        (dialog, calls)
    }

    #[test]
    fn rows_are_sorted_by_byte_order() {
        let (mut dialog, _) = assign_dialog();
        dialog.show();
        let rows: Vec<&str> = dialog.rows().iter().map(|r| r.server_group.as_str()).collect();
        assert_eq!(rows, vec!["Other", "backup", "main-server-group"]);
    }

    #[test]
    fn empty_confirm_keeps_dialog_open() {
        let (mut dialog, calls) = assign_dialog();
        dialog.show();

        assert_eq!(dialog.confirm(), Err(ConsoleError::EmptySelection));
        assert!(dialog.indicator_visible());
        assert!(dialog.is_open());
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn confirm_passes_selection_in_table_order() {
        let (mut dialog, calls) = assign_dialog();
        dialog.show();
        dialog.select("main-server-group");
        dialog.select("Other");
        dialog.set_enable(true);

        dialog.confirm().unwrap();

        assert!(!dialog.is_open());
        assert!(!dialog.indicator_visible());
        assert_eq!(
            *calls.lock().unwrap(),
            vec![(
                "app.war".to_string(),
                vec!["Other".to_string(), "main-server-group".to_string()],
                true
            )]
        );
    }

    #[test]
    fn show_resets_state() {
        let (mut dialog, _) = assign_dialog();
        dialog.show();
        dialog.select("backup");
        dialog.set_enable(true);
        assert!(dialog.confirm().is_ok());

        dialog.show();
        assert!(dialog.is_open());
        assert!(dialog.selection().is_empty());
        assert!(!dialog.enable());
        assert!(!dialog.indicator_visible());
    }

    #[test]
    fn closed_dialog_calls_back_once() {
        let (mut dialog, calls) = assign_dialog();
        dialog.show();
        dialog.select("backup");
        dialog.confirm().unwrap();

        assert_eq!(dialog.confirm(), Err(ConsoleError::DialogClosed));
        assert_eq!(calls.lock().unwrap().len(), 1);

        dialog.show();
        dialog.select("Other");
        dialog.cancel();
        assert_eq!(dialog.confirm(), Err(ConsoleError::DialogClosed));
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn unshown_dialog_cannot_be_confirmed() {
        let (mut dialog, calls) = assign_dialog();
        assert_eq!(dialog.confirm(), Err(ConsoleError::DialogClosed));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn cancel_never_calls_back() {
        let (mut dialog, calls) = assign_dialog();
        dialog.show();
        dialog.select("backup");
        dialog.cancel();
        assert!(!dialog.is_open());
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn unassign_mode_hides_enable_switch() {
        let calls: Arc<Mutex<Vec<Vec<String>>>> = Arc::default();
        let recorded = calls.clone();
        let mut dialog = AssignContentDialog::unassign(Content::new("app.war"), groups(), move |_, g| {
            recorded.lock().unwrap().push(g.to_vec());
        });
        dialog.show();
        assert_eq!(dialog.title(), "Unassign Content");
        assert_eq!(dialog.primary_label(), "Unassign");
        assert!(!dialog.enable_visible());
        dialog.set_enable(true);
        assert!(!dialog.enable());
        assert!(!dialog.select("missing"));

        dialog.select("backup");
        dialog.confirm().unwrap();
        assert_eq!(*calls.lock().unwrap(), vec![vec!["backup".to_string()]]);
    }
}
