//! Application-level key routing.
//!
//! One [`KeyRouter`] is fed by the application's single key source. Sidebars
//! and panels register as [`KeyTarget`]s instead of each listening to raw
//! input, so a press is resolved at most once.

use std::fmt;
use std::rc::Rc;

use crate::button::{LabeledButton, WeakButton};
use crate::keys::{Handled, KeyPress};

/// Something that reacts to key presses routed to it.
pub trait KeyTarget {
    /// Handle `press`. `focused` is the button holding input focus, if any.
    fn handle_key(&self, press: &KeyPress, focused: Option<&LabeledButton>) -> Handled;
}

/// Index of a registered target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetId(usize);

/// Routes key presses to registered targets.
///
/// The active target sees a press first. If it does not handle it, the
/// remaining targets are tried in registration order until one does.
#[derive(Default)]
pub struct KeyRouter {
    targets: Vec<Rc<dyn KeyTarget>>,
    active: Option<TargetId>,
    focused: Option<WeakButton>,
}

impl KeyRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, target: Rc<dyn KeyTarget>) -> TargetId {
        self.targets.push(target);
        TargetId(self.targets.len() - 1)
    }

    /// Make `target` the first to receive presses. Unknown ids clear it.
    pub fn set_active(&mut self, target: Option<TargetId>) {
        self.active = target.filter(|id| id.0 < self.targets.len());
    }

    pub fn active(&self) -> Option<TargetId> {
        self.active
    }

    /// Record which button has input focus.
    pub fn focus_button(&mut self, button: Option<&LabeledButton>) {
        self.focused = button.map(LabeledButton::downgrade);
    }

    pub fn focused_button(&self) -> Option<LabeledButton> {
        self.focused.as_ref().and_then(WeakButton::upgrade)
    }

    /// Route a press.
    pub fn dispatch(&self, press: &KeyPress) -> Handled {
        let focused = self.focused_button();
        let active = self.active.and_then(|id| self.targets.get(id.0));

        if let Some(target) = active {
            if target.handle_key(press, focused.as_ref()).was_handled() {
                return Handled::Yes;
            }
        }

        for (index, target) in self.targets.iter().enumerate() {
            if Some(TargetId(index)) == self.active {
                continue;
            }
            if target.handle_key(press, focused.as_ref()).was_handled() {
                log::trace!("Key {} handled by target {}", press.key, index);
                return Handled::Yes;
            }
        }
        Handled::No
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl fmt::Debug for KeyRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyRouter")
            .field("targets", &self.targets.len())
            .field("active", &self.active)
            .field("focused", &self.focused)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::button::ButtonSpec;
    use crate::keys::Key;
    use crate::sidebar::Sidebar;
    use std::cell::RefCell;

    fn triggers(sidebar: &Sidebar) -> Rc<RefCell<Vec<String>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        sidebar
            .on("trigger", move |event| sink.borrow_mut().push(event.button.name().to_string()))
            .detach();
        log
    }

    #[test]
    fn test_active_target_goes_first() {
        let left = Sidebar::new();
        left.add_button(ButtonSpec::instant("left_1"));
        let right = Sidebar::new();
        right.add_button(ButtonSpec::instant("right_1"));
        let left_log = triggers(&left);
        let right_log = triggers(&right);

        let mut router = KeyRouter::new();
        router.register(Rc::new(left.clone()));
        let right_id = router.register(Rc::new(right.clone()));

        router.dispatch(&KeyPress::plain(Key::character("1")));
        assert_eq!(*left_log.borrow(), vec!["left_1"]);
        assert!(right_log.borrow().is_empty());

        router.set_active(Some(right_id));
        router.dispatch(&KeyPress::plain(Key::character("1")));
        assert_eq!(*right_log.borrow(), vec!["right_1"]);
        assert_eq!(left_log.borrow().len(), 1);
    }

    #[test]
    fn test_falls_through_to_other_targets() {
        let short = Sidebar::new();
        short.add_button(ButtonSpec::instant("only"));
        let long = Sidebar::new();
        long.add_button(ButtonSpec::instant("first"));
        long.add_button(ButtonSpec::instant("second"));
        let long_log = triggers(&long);

        let mut router = KeyRouter::new();
        let short_id = router.register(Rc::new(short));
        router.register(Rc::new(long.clone()));
        router.set_active(Some(short_id));

        assert_eq!(router.dispatch(&KeyPress::plain(Key::character("2"))), Handled::Yes);
        assert_eq!(*long_log.borrow(), vec!["second"]);
        assert_eq!(router.dispatch(&KeyPress::plain(Key::character("3"))), Handled::No);
    }

    #[test]
    fn test_enter_activates_focus_once() {
        let first = Sidebar::new();
        let button = first.add_button(ButtonSpec::instant("focused"));
        let second = Sidebar::new();
        let log = triggers(&first);

        let mut router = KeyRouter::new();
        router.register(Rc::new(first.clone()));
        router.register(Rc::new(second));
        router.focus_button(Some(&button));

        router.dispatch(&KeyPress::plain(Key::Enter));
        assert_eq!(*log.borrow(), vec!["focused"]);

        router.focus_button(None);
        assert_eq!(router.dispatch(&KeyPress::plain(Key::Enter)), Handled::No);
    }

    #[test]
    fn test_unknown_active_id_is_cleared() {
        let mut router = KeyRouter::new();
        router.set_active(Some(TargetId(3)));
        assert_eq!(router.active(), None);
        assert!(router.is_empty());
    }
}
