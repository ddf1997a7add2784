//! Notifications emitted by buttons.

use std::fmt;

use super::LabeledButton;

/// Which notification a button emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonEventKind {
    /// Fired first on every activation. Its channel is the button's own name.
    Name,
    /// Instant buttons only.
    Trigger,
    /// Toggle buttons, on every accepted change to `true`.
    ToggledOn,
    /// Toggle buttons, on every accepted change to `false`.
    ToggledOff,
    /// Select buttons, when they become the selection.
    Select,
    /// Select buttons, when they stop being the selection.
    Unselect,
}

impl ButtonEventKind {
    /// Fixed channel name, or `None` for [`ButtonEventKind::Name`] whose
    /// channel depends on the button.
    pub fn fixed_channel(self) -> Option<&'static str> {
        match self {
            Self::Name => None,
            Self::Trigger => Some("trigger"),
            Self::ToggledOn => Some("toggledOn"),
            Self::ToggledOff => Some("toggledOff"),
            Self::Select => Some("select"),
            Self::Unselect => Some("unselect"),
        }
    }
}

/// A notification together with the button that emitted it.
#[derive(Clone)]
pub struct ButtonEvent {
    pub kind: ButtonEventKind,
    pub button: LabeledButton,
}

impl ButtonEvent {
    /// Channel the event is delivered on.
    pub fn channel(&self) -> &str {
        self.kind.fixed_channel().unwrap_or_else(|| self.button.name())
    }
}

impl fmt::Debug for ButtonEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonEvent")
            .field("kind", &self.kind)
            .field("button", &self.button.name())
            .finish()
    }
}
