use crate::RequestId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Info,
    Edit,
    Copy,
    Approve,
    Delete,
}

impl MenuAction {
    pub const ALL: [MenuAction; 5] = [
        MenuAction::Info,
        MenuAction::Edit,
        MenuAction::Copy,
        MenuAction::Approve,
        MenuAction::Delete,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::Info => "Info",
            MenuAction::Edit => "Edit",
            MenuAction::Copy => "Copy",
            MenuAction::Approve => "Approve",
            MenuAction::Delete => "Delete",
        }
    }
}

/// Right-click menu over the table, holding the ids it acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextMenu {
    pub ids: Vec<RequestId>,
}

impl ContextMenu {
    /// Single-row entries need exactly one id; batch entries are disabled
    /// while another table batch is still in flight.
    pub fn is_enabled(&self, action: MenuAction, table_batch_pending: bool) -> bool {
        match action {
            MenuAction::Info | MenuAction::Edit | MenuAction::Copy => self.ids.len() == 1,
            MenuAction::Approve | MenuAction::Delete => {
                !self.ids.is_empty() && !table_batch_pending
            }
        }
    }
}
