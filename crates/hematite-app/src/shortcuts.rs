//! Keyboard shortcut listing.

use hematite_core::{LabeledButton, Panel, Sidebar};

/// A key and what it does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    pub key: String,
    pub description: String,
}

impl Shortcut {
    pub fn new(key: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
        }
    }

    fn for_button(key: String, button: &LabeledButton) -> Self {
        let description = button.description();
        let description = if description.is_empty() {
            button.name().to_string()
        } else {
            description
        };
        Self::new(key, description)
    }

    /// Format the key for display (e.g., "Key 1").
    pub fn format(&self) -> String {
        format!("Key {}", self.key)
    }
}

/// Shortcuts currently bound in a layout.
#[derive(Debug, Clone, Default)]
pub struct ShortcutRegistry {
    shortcuts: Vec<Shortcut>,
}

impl ShortcutRegistry {
    /// One entry per sidebar button that has a key, in sidebar order.
    /// Buttons without a description are listed by name.
    pub fn from_sidebar(sidebar: &Sidebar) -> Self {
        let shortcuts = sidebar
            .buttons()
            .iter()
            .filter_map(|button| button.shortcut().map(|key| Shortcut::for_button(key, button)))
            .collect();
        Self { shortcuts }
    }

    /// Add the close key of an open panel.
    pub fn with_panel(mut self, panel: &Panel) -> Self {
        if !panel.is_open() {
            return self;
        }
        if let Some(button) = panel.close_button() {
            if let Some(key) = button.shortcut() {
                let mut shortcut = Shortcut::for_button(key, button);
                shortcut.description = format!("{} ({})", shortcut.description, panel.heading());
                self.shortcuts.push(shortcut);
            }
        }
        self
    }

    pub fn all(&self) -> &[Shortcut] {
        &self.shortcuts
    }

    /// The listing as printed by the `help` command.
    pub fn format(&self) -> String {
        let mut out = String::from("=== Keyboard Shortcuts ===\n");
        for shortcut in &self.shortcuts {
            out.push_str(&format!("  {:10} {}\n", shortcut.format(), shortcut.description));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hematite_core::{ButtonSpec, ShortcutTable};

    #[test]
    fn test_from_sidebar() {
        let sidebar = Sidebar::with_shortcuts(ShortcutTable::new(["1", "2"]));
        sidebar.add_button(ButtonSpec::select("pencil").description("Draw"));
        sidebar.add_button(ButtonSpec::instant("undo"));
        sidebar.add_button(ButtonSpec::instant("unbound"));

        let registry = ShortcutRegistry::from_sidebar(&sidebar);
        assert_eq!(
            registry.all(),
            &[Shortcut::new("1", "Draw"), Shortcut::new("2", "undo")]
        );
        assert_eq!(
            registry.format(),
            "=== Keyboard Shortcuts ===\n  Key 1      Draw\n  Key 2      undo\n"
        );
    }
}
