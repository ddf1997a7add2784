//! Button kinds and construction specs.

use serde::{Deserialize, Serialize};

/// The three button behaviors. Fixed when a button is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ButtonKind {
    /// Fires `trigger` once per activation, no persistent state.
    #[default]
    Instant,
    /// Binary state that flips on activation unless the button is manual.
    Toggle,
    /// Takes part in its container's exclusive selection.
    Select,
}

impl ButtonKind {
    /// Lowercase name used in logs and layout files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Instant => "instant",
            Self::Toggle => "toggle",
            Self::Select => "select",
        }
    }
}

/// Everything needed to construct a button.
///
/// Omitted fields default to empty strings and `false`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonSpec {
    pub kind: ButtonKind,
    /// Event-channel name. Unique names are recommended but not enforced.
    pub name: String,
    /// Icon token shown while off.
    pub icon: String,
    /// Icon token shown while a toggle is on.
    pub icon_alternate: String,
    /// Label text shown while off.
    pub text: String,
    /// Label text shown while a toggle is on.
    pub text_alternate: String,
    /// Hover hint text.
    pub description: String,
    /// When set, clicks do not flip toggle state.
    pub manual: bool,
}

impl ButtonSpec {
    /// Spec for a button of `kind` named `name`.
    pub fn new(kind: ButtonKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn instant(name: impl Into<String>) -> Self {
        Self::new(ButtonKind::Instant, name)
    }

    pub fn toggle(name: impl Into<String>) -> Self {
        Self::new(ButtonKind::Toggle, name)
    }

    pub fn select(name: impl Into<String>) -> Self {
        Self::new(ButtonKind::Select, name)
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn icon_alternate(mut self, icon: impl Into<String>) -> Self {
        self.icon_alternate = icon.into();
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn text_alternate(mut self, text: impl Into<String>) -> Self {
        self.text_alternate = text.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn manual(mut self, manual: bool) -> Self {
        self.manual = manual;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let spec = ButtonSpec::toggle("contrast").icon("fa-adjust");

        assert_eq!(spec.kind, ButtonKind::Toggle);
        assert_eq!(spec.name, "contrast");
        assert_eq!(spec.icon, "fa-adjust");
        assert!(spec.icon_alternate.is_empty());
        assert!(spec.description.is_empty());
        assert!(!spec.manual);
    }

    #[test]
    fn test_deserialize_partial_spec() {
        let spec: ButtonSpec = serde_json::from_str(
            r#"{"kind": "select", "name": "select_1", "text": "4", "description": "For testing selects"}"#,
        )
        .unwrap();

        assert_eq!(spec.kind, ButtonKind::Select);
        assert_eq!(spec.text, "4");
        assert!(spec.icon.is_empty());
        assert!(!spec.manual);
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let result: Result<ButtonSpec, _> =
            serde_json::from_str(r#"{"kind": "radio", "name": "x"}"#);
        assert!(result.is_err());
    }
}
