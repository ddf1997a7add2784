//! Sidebar: an ordered button container with exclusive selection.
//!
//! Button order is the visual order and the shortcut order: the symbol at
//! position `i` of the shortcut table activates the button at position `i`.
//!
//! # Invariants
//!
//! 1. At most one button is marked selected.
//! 2. The selection, when set, is a member and a select button. Anything
//!    else assigned as selection is treated as "no selection".
//! 3. Every member's hint carries the symbol for its current position.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::button::{ButtonEvent, ButtonEventKind, ButtonHost, ButtonKind, ButtonSpec, LabeledButton, WeakButton};
use crate::config::SidebarConfig;
use crate::events::{EventEmitter, Subscription};
use crate::keys::{Handled, KeyCommand, KeyDispatcher, KeyPress, ShortcutTable};
use crate::router::KeyTarget;

pub(crate) struct SidebarInner {
    buttons: RefCell<Vec<LabeledButton>>,
    selection: RefCell<Option<WeakButton>>,
    dispatcher: KeyDispatcher,
    events: EventEmitter<ButtonEvent>,
}

impl SidebarInner {
    fn position_of(&self, button: &LabeledButton) -> Option<usize> {
        self.buttons.borrow().iter().position(|b| b == button)
    }
}

impl ButtonHost for SidebarInner {
    fn shortcut_for(&self, button: &LabeledButton) -> Option<String> {
        let position = self.position_of(button)?;
        self.dispatcher.table().symbol(position).map(str::to_string)
    }

    fn selection_container(self: Rc<Self>) -> Option<Sidebar> {
        Some(Sidebar { inner: self })
    }
}

impl Drop for SidebarInner {
    fn drop(&mut self) {
        for button in self.buttons.get_mut().drain(..) {
            button.detach();
        }
    }
}

/// Handle to a sidebar. Clones refer to the same sidebar.
#[derive(Clone)]
pub struct Sidebar {
    inner: Rc<SidebarInner>,
}

impl Sidebar {
    /// An empty sidebar with the default sidebar shortcut table
    /// (`1`–`9`, `0`, `-`, `=`).
    pub fn new() -> Self {
        Self::with_shortcuts(ShortcutTable::sidebar())
    }

    /// An empty sidebar with a custom shortcut table.
    pub fn with_shortcuts(table: ShortcutTable) -> Self {
        Self {
            inner: Rc::new(SidebarInner {
                buttons: RefCell::new(Vec::new()),
                selection: RefCell::new(None),
                dispatcher: KeyDispatcher::new(table),
                events: EventEmitter::new(),
            }),
        }
    }

    /// A sidebar with the configured shortcut table and buttons.
    pub fn from_config(config: &SidebarConfig) -> Self {
        let sidebar = Self::with_shortcuts(config.shortcut_table());
        for spec in &config.buttons {
            sidebar.add_button(spec.clone());
        }
        sidebar
    }

    pub fn shortcuts(&self) -> &ShortcutTable {
        self.inner.dispatcher.table()
    }

    /// Symbol that activates position `index`.
    pub fn shortcut_for_index(&self, index: usize) -> Option<&str> {
        self.shortcuts().symbol(index)
    }

    /// Create a button from `spec` and append it.
    ///
    /// Appending never shifts existing positions, so only the new button's
    /// hint is computed.
    pub fn add_button(&self, spec: ButtonSpec) -> LabeledButton {
        let button = LabeledButton::new(spec);
        self.warn_on_duplicate(&button);
        button.attach(self.host());
        self.inner.buttons.borrow_mut().push(button.clone());
        button.refresh();

        log::debug!("Added {} button {} at {}", button.kind().as_str(), button.name(), self.len() - 1);
        button
    }

    /// Create a button from `spec` and insert it at `index` (clamped to the
    /// end). Every button from `index` on gets its hint recomputed.
    pub fn insert_button(&self, index: usize, spec: ButtonSpec) -> LabeledButton {
        let button = LabeledButton::new(spec);
        self.warn_on_duplicate(&button);
        button.attach(self.host());
        let index = {
            let mut buttons = self.inner.buttons.borrow_mut();
            let index = index.min(buttons.len());
            buttons.insert(index, button.clone());
            index
        };
        self.sync_hints(index);

        log::debug!("Inserted {} button {} at {}", button.kind().as_str(), button.name(), index);
        button
    }

    /// Move a member to `index` (clamped). Returns `false` for non-members.
    pub fn move_button(&self, button: &LabeledButton, index: usize) -> bool {
        let Some(from) = self.inner.position_of(button) else {
            return false;
        };
        let to = {
            let mut buttons = self.inner.buttons.borrow_mut();
            let moved = buttons.remove(from);
            let to = index.min(buttons.len());
            buttons.insert(to, moved);
            to
        };
        self.sync_hints(from.min(to));

        log::debug!("Moved button {} from {} to {}", button.name(), from, to);
        true
    }

    /// Detach a member.
    ///
    /// A removed selection is first cleared through the selection protocol
    /// (one `unselect`). Buttons after it move up and get new hints; the
    /// removed button keeps no shortcut. Returns `false` for non-members.
    pub fn remove_button(&self, button: &LabeledButton) -> bool {
        if self.inner.position_of(button).is_none() {
            return false;
        }
        if self.selection().as_ref() == Some(button) {
            self.clear_selection();
        }

        // An unselect handler may already have removed it.
        let Some(position) = self.inner.position_of(button) else {
            return true;
        };
        self.inner.buttons.borrow_mut().remove(position);
        button.detach();
        self.sync_hints(position);

        log::debug!("Removed button {} from {}", button.name(), position);
        true
    }

    /// Snapshot of the buttons in order.
    pub fn buttons(&self) -> Vec<LabeledButton> {
        self.inner.buttons.borrow().clone()
    }

    pub fn button(&self, index: usize) -> Option<LabeledButton> {
        self.inner.buttons.borrow().get(index).cloned()
    }

    /// First button with this name.
    pub fn find(&self, name: &str) -> Option<LabeledButton> {
        self.inner.buttons.borrow().iter().find(|b| b.name() == name).cloned()
    }

    pub fn position(&self, button: &LabeledButton) -> Option<usize> {
        self.inner.position_of(button)
    }

    pub fn contains(&self, button: &LabeledButton) -> bool {
        self.position(button).is_some()
    }

    pub fn len(&self) -> usize {
        self.inner.buttons.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The selected button, if any.
    pub fn selection(&self) -> Option<LabeledButton> {
        self.inner.selection.borrow().as_ref().and_then(WeakButton::upgrade)
    }

    /// Assign the selection.
    ///
    /// A non-member or non-select candidate counts as `None`. Assigning the
    /// current value does nothing. Otherwise the old selection is unselected
    /// (mark cleared, `unselect` emitted) strictly before the new one is
    /// selected (mark set, `select` emitted).
    pub fn set_selection(&self, candidate: Option<&LabeledButton>) {
        // Handlers run between the two halves and may change the selection
        // or the membership, so both are re-read on every pass. Each button
        // is unselected at most once per call: if a handler puts back one
        // that was already unselected here, that nested assignment stands.
        let mut unselected: Vec<LabeledButton> = Vec::new();
        loop {
            let next = candidate.filter(|b| self.accepts_selection(b));
            let current = self.selection();
            if current.as_ref() == next {
                return;
            }

            match current {
                Some(previous) => {
                    if unselected.contains(&previous) {
                        log::debug!("Selection of {} restored by a handler, keeping it", previous.name());
                        return;
                    }
                    unselected.push(previous.clone());
                    *self.inner.selection.borrow_mut() = None;
                    log::debug!("Unselect {}", previous.name());
                    previous.mark_selected(false);
                    previous.emit(ButtonEventKind::Unselect);
                }
                None => {
                    // `next` differs from `current`, so it is set here.
                    let Some(next) = next else { return };
                    *self.inner.selection.borrow_mut() = Some(next.downgrade());
                    log::debug!("Select {}", next.name());
                    next.mark_selected(true);
                    next.emit(ButtonEventKind::Select);
                    return;
                }
            }
        }
    }

    /// Same as `set_selection(None)`.
    pub fn clear_selection(&self) {
        self.set_selection(None);
    }

    /// Resolve and run a key press.
    ///
    /// `focused` is the button that currently has input focus anywhere in
    /// the application; Enter activates it.
    pub fn handle_key(&self, press: &KeyPress, focused: Option<&LabeledButton>) -> Handled {
        let command = self
            .inner
            .dispatcher
            .resolve(press, focused.is_some(), self.len());

        let target = match command {
            Some(KeyCommand::ActivateFocused) => focused.cloned(),
            Some(KeyCommand::ActivatePosition(position)) => self.button(position),
            None => None,
        };

        match target {
            Some(button) => {
                log::trace!("Key {} activates {}", press.key, button.name());
                button.activate();
                Handled::Yes
            }
            None => Handled::No,
        }
    }

    /// Receive every notification emitted by any member, after the
    /// member's own listeners.
    pub fn subscribe(&self, handler: impl Fn(&ButtonEvent) + 'static) -> Subscription {
        self.inner.events.subscribe(handler)
    }

    /// Receive member notifications on one channel.
    pub fn on(&self, channel: &str, handler: impl Fn(&ButtonEvent) + 'static) -> Subscription {
        let channel = channel.to_string();
        self.subscribe(move |event| {
            if event.channel() == channel {
                handler(event);
            }
        })
    }

    pub(crate) fn bubble(&self, event: &ButtonEvent) {
        self.inner.events.emit(event);
    }

    fn accepts_selection(&self, button: &LabeledButton) -> bool {
        button.kind() == ButtonKind::Select && self.contains(button)
    }

    fn sync_hints(&self, from: usize) {
        for button in self.buttons().iter().skip(from) {
            button.refresh();
        }
    }

    fn host(&self) -> Weak<dyn ButtonHost> {
        let weak: Weak<SidebarInner> = Rc::downgrade(&self.inner);
        weak
    }

    fn warn_on_duplicate(&self, button: &LabeledButton) {
        if self.find(button.name()).is_some() {
            log::warn!("Sidebar already has a button named {}", button.name());
        }
    }
}

impl Default for Sidebar {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Sidebar {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Sidebar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.buttons().iter().map(|b| b.name().to_string()).collect();
        f.debug_struct("Sidebar")
            .field("buttons", &names)
            .field("selection", &self.selection().map(|b| b.name().to_string()))
            .finish()
    }
}

impl KeyTarget for Sidebar {
    fn handle_key(&self, press: &KeyPress, focused: Option<&LabeledButton>) -> Handled {
        Sidebar::handle_key(self, press, focused)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{Key, Modifiers};

    type Record = Rc<RefCell<Vec<(String, ButtonEventKind)>>>;

    fn record(sidebar: &Sidebar) -> Record {
        let log: Record = Rc::default();
        let sink = Rc::clone(&log);
        sidebar
            .subscribe(move |event| {
                sink.borrow_mut()
                    .push((event.button.name().to_string(), event.kind))
            })
            .detach();
        log
    }

    fn events(log: &Record) -> Vec<(String, ButtonEventKind)> {
        log.borrow().clone()
    }

    fn ev(name: &str, kind: ButtonEventKind) -> (String, ButtonEventKind) {
        (name.to_string(), kind)
    }

    fn count(log: &Record, kind: ButtonEventKind) -> usize {
        log.borrow().iter().filter(|(_, k)| *k == kind).count()
    }

    fn selected_count(sidebar: &Sidebar) -> usize {
        sidebar.buttons().iter().filter(|b| b.is_selected()).count()
    }

    fn key(symbol: &str) -> KeyPress {
        KeyPress::plain(Key::character(symbol))
    }

    /// Shortcuts `1 2 3`, buttons A(select), B(select), C(instant).
    fn abc() -> (Sidebar, LabeledButton, LabeledButton, LabeledButton) {
        let sidebar = Sidebar::with_shortcuts(ShortcutTable::new(["1", "2", "3"]));
        let a = sidebar.add_button(ButtonSpec::select("A"));
        let b = sidebar.add_button(ButtonSpec::select("B"));
        let c = sidebar.add_button(ButtonSpec::instant("C"));
        (sidebar, a, b, c)
    }

    #[test]
    fn test_hints_follow_positions() {
        let sidebar = Sidebar::new();
        let first = sidebar.add_button(ButtonSpec::instant("instant").description("Instant for testing"));
        let second = sidebar.add_button(ButtonSpec::instant("filler"));

        assert_eq!(first.appearance().hint, "Instant for testing\n\nKey: 1");
        assert_eq!(second.appearance().hint, "Key: 2");
        assert_eq!(first.shortcut().as_deref(), Some("1"));
    }

    #[test]
    fn test_buttons_past_the_table_have_no_key() {
        let sidebar = Sidebar::new();
        for i in 0..13 {
            sidebar.add_button(ButtonSpec::instant(format!("b{i}")).description("Filling"));
        }

        assert_eq!(sidebar.button(11).unwrap().appearance().hint, "Filling\n\nKey: =");
        assert_eq!(sidebar.button(12).unwrap().appearance().hint, "Filling");
    }

    #[test]
    fn test_selection_transitions() {
        let (sidebar, a, b, _c) = abc();
        let log = record(&sidebar);

        sidebar.set_selection(Some(&a));
        assert_eq!(events(&log), vec![ev("A", ButtonEventKind::Select)]);

        sidebar.set_selection(Some(&b));
        assert_eq!(
            events(&log)[1..],
            [ev("A", ButtonEventKind::Unselect), ev("B", ButtonEventKind::Select)]
        );
        assert_eq!(sidebar.selection(), Some(b.clone()));
        assert!(b.is_selected() && !a.is_selected());

        sidebar.set_selection(None);
        assert_eq!(events(&log)[3..], [ev("B", ButtonEventKind::Unselect)]);
        assert_eq!(sidebar.selection(), None);
        assert_eq!(selected_count(&sidebar), 0);
    }

    #[test]
    fn test_reassigning_selection_is_noop() {
        let (sidebar, a, _b, _c) = abc();
        let log = record(&sidebar);

        sidebar.set_selection(Some(&a));
        sidebar.set_selection(Some(&a));
        sidebar.set_selection(None);
        sidebar.set_selection(None);

        assert_eq!(count(&log, ButtonEventKind::Select), 1);
        assert_eq!(count(&log, ButtonEventKind::Unselect), 1);
    }

    #[test]
    fn test_invalid_selection_normalizes_to_none() {
        let (sidebar, a, _b, c) = abc();
        let stray = LabeledButton::new(ButtonSpec::select("stray"));
        let other = Sidebar::new();
        let foreign = other.add_button(ButtonSpec::select("foreign"));
        let log = record(&sidebar);

        sidebar.set_selection(Some(&c));
        sidebar.set_selection(Some(&stray));
        sidebar.set_selection(Some(&foreign));
        assert!(log.borrow().is_empty());
        assert_eq!(sidebar.selection(), None);
        assert!(!c.appearance().has_class(crate::button::SELECTED_CLASS));

        sidebar.set_selection(Some(&a));
        sidebar.set_selection(Some(&c));
        assert_eq!(
            events(&log),
            vec![ev("A", ButtonEventKind::Select), ev("A", ButtonEventKind::Unselect)]
        );
        assert_eq!(sidebar.selection(), None);
    }

    #[test]
    fn test_selection_highlight() {
        let (sidebar, a, b, _c) = abc();

        a.activate();
        assert_eq!(a.appearance().class_name(), "ht_button fa ht_selected");

        b.activate();
        assert_eq!(a.appearance().class_name(), "ht_button fa");
        assert_eq!(b.appearance().class_name(), "ht_button fa ht_selected");

        b.activate();
        assert_eq!(b.appearance().class_name(), "ht_button fa");
        assert!(sidebar.selection().is_none());
    }

    #[test]
    fn test_stray_select_leaves_sidebar_selection() {
        let (sidebar, a, _b, _c) = abc();
        let stray = LabeledButton::new(ButtonSpec::select("stray").icon("fa-space-shuttle"));

        a.activate();
        stray.activate();

        assert_eq!(sidebar.selection(), Some(a.clone()));
        assert!(a.is_selected());
        assert_eq!(stray.appearance().class_name(), "ht_button fa fa-space-shuttle");
    }

    #[test]
    fn test_key_scenario() {
        let (sidebar, _a, b, c) = abc();
        let log = record(&sidebar);

        assert_eq!(sidebar.handle_key(&key("2"), None), Handled::Yes);
        assert_eq!(
            events(&log),
            vec![ev("B", ButtonEventKind::Name), ev("B", ButtonEventKind::Select)]
        );
        assert_eq!(sidebar.selection(), Some(b.clone()));

        sidebar.handle_key(&key("2"), None);
        assert_eq!(
            events(&log)[2..],
            [ev("B", ButtonEventKind::Name), ev("B", ButtonEventKind::Unselect)]
        );
        assert_eq!(sidebar.selection(), None);

        sidebar.handle_key(&key("2"), None);
        log.borrow_mut().clear();
        c.activate();
        assert_eq!(
            events(&log),
            vec![
                ev("C", ButtonEventKind::Name),
                ev("C", ButtonEventKind::Trigger),
                ev("B", ButtonEventKind::Unselect),
            ]
        );
        assert_eq!(sidebar.selection(), None);
    }

    #[test]
    fn test_modified_or_unknown_keys_are_ignored() {
        let (sidebar, _a, _b, _c) = abc();
        let log = record(&sidebar);

        let shifted = KeyPress::new(Key::character("1"), Modifiers { shift: true, ..Default::default() });
        assert_eq!(sidebar.handle_key(&shifted, None), Handled::No);
        assert_eq!(sidebar.handle_key(&key("4"), None), Handled::No);
        assert_eq!(sidebar.handle_key(&KeyPress::plain(Key::Enter), None), Handled::No);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_enter_activates_focused_button() {
        let (sidebar, _a, _b, c) = abc();
        let log = record(&sidebar);

        assert_eq!(sidebar.handle_key(&KeyPress::plain(Key::Enter), Some(&c)), Handled::Yes);
        assert_eq!(
            events(&log),
            vec![ev("C", ButtonEventKind::Name), ev("C", ButtonEventKind::Trigger)]
        );
    }

    #[test]
    fn test_toggle_clears_selection() {
        let sidebar = Sidebar::new();
        let select = sidebar.add_button(ButtonSpec::select("select_1"));
        let manual = sidebar.add_button(ButtonSpec::toggle("toggle_m1").manual(true));
        let log = record(&sidebar);

        select.activate();
        manual.activate();

        assert_eq!(sidebar.selection(), None);
        assert_eq!(count(&log, ButtonEventKind::Unselect), 1);
        assert_eq!(count(&log, ButtonEventKind::ToggledOn), 0);
    }

    #[test]
    fn test_instant_never_emits_state_events() {
        let (sidebar, _a, _b, c) = abc();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        c.subscribe(move |event| sink.borrow_mut().push(event.kind)).detach();

        for _ in 0..3 {
            c.activate();
            sidebar.handle_key(&key("3"), None);
        }

        assert!(events
            .borrow()
            .iter()
            .all(|kind| matches!(kind, ButtonEventKind::Name | ButtonEventKind::Trigger)));
    }

    #[test]
    fn test_remove_selected_button() {
        let (sidebar, a, b, c) = abc();
        let log = record(&sidebar);
        sidebar.set_selection(Some(&a));

        assert!(sidebar.remove_button(&a));

        assert_eq!(count(&log, ButtonEventKind::Unselect), 1);
        assert_eq!(sidebar.selection(), None);
        assert!(!a.is_selected());
        assert!(a.container().is_none());
        assert_eq!(b.shortcut().as_deref(), Some("1"));
        assert_eq!(c.appearance().hint, "Key: 2");
        assert_eq!(a.appearance().hint, "");
        assert!(!sidebar.remove_button(&a));
    }

    #[test]
    fn test_remove_unselected_button_keeps_selection() {
        let (sidebar, a, b, _c) = abc();
        sidebar.set_selection(Some(&b));
        let log = record(&sidebar);

        sidebar.remove_button(&a);

        assert!(log.borrow().is_empty());
        assert_eq!(sidebar.selection(), Some(b.clone()));
        assert_eq!(b.shortcut().as_deref(), Some("1"));
    }

    #[test]
    fn test_insert_and_move_resync_hints() {
        let (sidebar, a, b, c) = abc();

        let d = sidebar.insert_button(0, ButtonSpec::instant("D"));
        assert_eq!(d.shortcut().as_deref(), Some("1"));
        assert_eq!(a.shortcut().as_deref(), Some("2"));
        assert_eq!(b.shortcut().as_deref(), Some("3"));
        assert_eq!(c.shortcut(), None);
        assert_eq!(c.appearance().hint, "");

        assert!(sidebar.move_button(&c, 0));
        assert_eq!(c.appearance().hint, "Key: 1");
        assert_eq!(d.appearance().hint, "Key: 2");
        assert_eq!(b.appearance().hint, "");

        let e = sidebar.insert_button(99, ButtonSpec::instant("E"));
        assert_eq!(sidebar.position(&e), Some(4));
    }

    #[test]
    fn test_description_uses_current_shortcut() {
        let (_sidebar, _a, b, _c) = abc();
        b.set_description("For testing selects");
        assert_eq!(b.appearance().hint, "For testing selects\n\nKey: 2");
    }

    #[test]
    fn test_at_most_one_selected_under_mixed_operations() {
        let sidebar = Sidebar::new();
        let selects: Vec<_> = (0..5)
            .map(|i| sidebar.add_button(ButtonSpec::select(format!("s{i}"))))
            .collect();

        for step in 0..40usize {
            let target = &selects[(step * 7) % selects.len()];
            match step % 4 {
                0 => sidebar.set_selection(Some(target)),
                1 => target.activate(),
                2 => {
                    sidebar.handle_key(&key(&((step % 5) + 1).to_string()), None);
                }
                _ => {
                    if step % 8 == 3 {
                        sidebar.remove_button(target);
                    } else {
                        sidebar.set_selection(Some(target));
                    }
                }
            }
            assert!(selected_count(&sidebar) <= 1, "step {step}");
            if let Some(selection) = sidebar.selection() {
                assert!(sidebar.contains(&selection));
                assert!(selection.is_selected());
            }
        }
    }

    #[test]
    fn test_reentrant_handler_switching_selection() {
        let (sidebar, a, b, _c) = abc();
        let extra = sidebar.add_button(ButtonSpec::select("X"));

        // Whenever A is unselected, a handler selects X instead.
        let sidebar_handle = sidebar.clone();
        let target = extra.clone();
        a.on("unselect", move |_| sidebar_handle.set_selection(Some(&target)))
            .detach();

        sidebar.set_selection(Some(&a));
        sidebar.set_selection(Some(&b));

        assert_eq!(sidebar.selection(), Some(b.clone()));
        assert_eq!(selected_count(&sidebar), 1);
        assert!(!extra.is_selected());
    }

    #[test]
    fn test_handler_restoring_selection_terminates() {
        let (sidebar, a, b, _c) = abc();
        let log: Record = Rc::default();
        let sink = Rc::clone(&log);
        a.subscribe(move |event| sink.borrow_mut().push((event.button.name().to_string(), event.kind)))
            .detach();

        // A refuses to lose the selection.
        let sidebar_handle = sidebar.clone();
        let again = a.clone();
        a.on("unselect", move |_| sidebar_handle.set_selection(Some(&again)))
            .detach();

        sidebar.set_selection(Some(&a));
        sidebar.set_selection(Some(&b));

        assert_eq!(sidebar.selection(), Some(a.clone()));
        assert!(a.is_selected());
        assert!(!b.is_selected());
        assert_eq!(selected_count(&sidebar), 1);
        assert_eq!(
            events(&log),
            vec![
                ev("A", ButtonEventKind::Select),
                ev("A", ButtonEventKind::Unselect),
                ev("A", ButtonEventKind::Select),
            ]
        );
    }

    #[test]
    fn test_dropping_sidebar_detaches_buttons() {
        let sidebar = Sidebar::new();
        let a = sidebar.add_button(ButtonSpec::select("A").description("first"));
        sidebar.set_selection(Some(&a));

        drop(sidebar);

        assert!(a.container().is_none());
        assert!(!a.is_selected());
        assert_eq!(a.appearance().hint, "first");
    }

    #[test]
    fn test_member_listener_runs_before_sidebar_listener() {
        let (sidebar, a, _b, _c) = abc();
        let order = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&order);
        sidebar.on("select", move |_| sink.borrow_mut().push("sidebar")).detach();
        let sink = Rc::clone(&order);
        a.on("select", move |_| sink.borrow_mut().push("button")).detach();

        a.activate();

        assert_eq!(*order.borrow(), vec!["button", "sidebar"]);
    }
}
