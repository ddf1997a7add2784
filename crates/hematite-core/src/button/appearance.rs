//! Abstract visual state of a button.
//!
//! The core never draws anything. It keeps a list of visual classes, the
//! label text and the hover hint up to date, and a renderer reads them.

/// Class carried by every button.
pub const BUTTON_CLASS: &str = "ht_button";
/// Class enabling the icon font.
pub const ICON_FONT_CLASS: &str = "fa";
/// Class added while a select button is the container's selection.
pub const SELECTED_CLASS: &str = "ht_selected";

/// What a renderer should show for a button.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Appearance {
    /// Visual classes in display order.
    pub classes: Vec<String>,
    /// Literal label text.
    pub label: String,
    /// Hover hint, including the shortcut key when there is one.
    pub hint: String,
}

impl Appearance {
    /// Classes joined with spaces, the way a class attribute reads.
    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }

    /// Check for a single class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// Inputs for [`Appearance`], borrowed from a button's state.
pub(crate) struct Look<'a> {
    pub icon: &'a str,
    pub text: &'a str,
    pub description: &'a str,
    pub selected: bool,
    pub shortcut: Option<&'a str>,
}

impl Look<'_> {
    pub(crate) fn appearance(&self) -> Appearance {
        let mut classes = vec![BUTTON_CLASS.to_string(), ICON_FONT_CLASS.to_string()];
        if !self.icon.is_empty() {
            classes.push(self.icon.to_string());
        }
        if self.selected {
            classes.push(SELECTED_CLASS.to_string());
        }

        Appearance {
            classes,
            label: self.text.to_string(),
            hint: hint_text(self.description, self.shortcut),
        }
    }
}

/// Hover hint: the description, a blank line, then `Key: <symbol>`.
///
/// Either half is left out when missing, and the blank line only appears
/// when both are present.
pub fn hint_text(description: &str, shortcut: Option<&str>) -> String {
    match shortcut {
        Some(key) if description.is_empty() => format!("Key: {key}"),
        Some(key) => format!("{description}\n\nKey: {key}"),
        None => description.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_text_variants() {
        assert_eq!(hint_text("Flip contrast", Some("9")), "Flip contrast\n\nKey: 9");
        assert_eq!(hint_text("", Some("=")), "Key: =");
        assert_eq!(hint_text("Filling past the keycut slots", None), "Filling past the keycut slots");
        assert_eq!(hint_text("", None), "");
    }

    #[test]
    fn test_classes_without_icon() {
        let look = Look {
            icon: "",
            text: "4",
            description: "",
            selected: false,
            shortcut: None,
        };
        assert_eq!(look.appearance().class_name(), "ht_button fa");
    }

    #[test]
    fn test_selected_class_follows_icon() {
        let look = Look {
            icon: "fa-space-shuttle",
            text: "",
            description: "",
            selected: true,
            shortcut: None,
        };
        let appearance = look.appearance();
        assert_eq!(appearance.class_name(), "ht_button fa fa-space-shuttle ht_selected");
        assert!(appearance.has_class(SELECTED_CLASS));
    }
}
