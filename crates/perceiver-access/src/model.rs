//! Node-level data surfaced by the accessibility port.

use deskpilot_core_types::Rect;
use serde::{Deserialize, Serialize};

/// Semantic role of an accessibility node.
///
/// The interactive subset mirrors the control types a desktop automation
/// agent can usefully click, type into, or toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlRole {
    Button,
    Edit,
    Hyperlink,
    MenuItem,
    ListItem,
    TabItem,
    ComboBox,
    CheckBox,
    RadioButton,
    Slider,
    TreeItem,
    Window,
    Pane,
    Group,
    Document,
    Text,
    Image,
    Other,
}

impl ControlRole {
    /// Whether this role belongs to the interactive allow-set.
    pub fn is_interactive(&self) -> bool {
        matches!(
            self,
            ControlRole::Button
                | ControlRole::Edit
                | ControlRole::Hyperlink
                | ControlRole::MenuItem
                | ControlRole::ListItem
                | ControlRole::TabItem
                | ControlRole::ComboBox
                | ControlRole::CheckBox
                | ControlRole::RadioButton
                | ControlRole::Slider
                | ControlRole::TreeItem
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ControlRole::Button => "Button",
            ControlRole::Edit => "Edit",
            ControlRole::Hyperlink => "Hyperlink",
            ControlRole::MenuItem => "MenuItem",
            ControlRole::ListItem => "ListItem",
            ControlRole::TabItem => "TabItem",
            ControlRole::ComboBox => "ComboBox",
            ControlRole::CheckBox => "CheckBox",
            ControlRole::RadioButton => "RadioButton",
            ControlRole::Slider => "Slider",
            ControlRole::TreeItem => "TreeItem",
            ControlRole::Window => "Window",
            ControlRole::Pane => "Pane",
            ControlRole::Group => "Group",
            ControlRole::Document => "Document",
            ControlRole::Text => "Text",
            ControlRole::Image => "Image",
            ControlRole::Other => "Other",
        }
    }
}

/// Snapshot of one accessibility node's properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub role: ControlRole,
    pub name: String,
    pub automation_id: String,
    pub class_name: String,
    pub enabled: bool,
    /// Bounding rectangle in screen pixels; `None` when the node reports
    /// no geometry.
    pub rect: Option<Rect>,
}

impl NodeInfo {
    pub fn new(role: ControlRole, name: impl Into<String>) -> Self {
        Self {
            role,
            name: name.into(),
            automation_id: String::new(),
            class_name: String::new(),
            enabled: true,
            rect: None,
        }
    }

    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = Some(rect);
        self
    }

    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    pub fn with_automation_id(mut self, automation_id: impl Into<String>) -> Self {
        self.automation_id = automation_id.into();
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interactive_allow_set() {
        assert!(ControlRole::Button.is_interactive());
        assert!(ControlRole::TreeItem.is_interactive());
        assert!(!ControlRole::Window.is_interactive());
        assert!(!ControlRole::Pane.is_interactive());
        assert!(!ControlRole::Text.is_interactive());
    }
}
