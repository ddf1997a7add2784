//! Labeled command buttons.
//!
//! A [`LabeledButton`] is a cheap, clonable handle. Clones refer to the same
//! button; equality is identity. Every state change follows the same order:
//! mutate the fields, recompute the [`Appearance`], then emit notifications
//! that already see the new state.

mod appearance;
mod event;
mod spec;

pub use appearance::{hint_text, Appearance, BUTTON_CLASS, ICON_FONT_CLASS, SELECTED_CLASS};
pub use event::{ButtonEvent, ButtonEventKind};
pub use spec::{ButtonKind, ButtonSpec};

use std::cell::RefCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

use uuid::Uuid;

use crate::events::{EventEmitter, Subscription};
use crate::sidebar::Sidebar;
use appearance::Look;

/// Unique identifier for a button.
pub type ButtonId = Uuid;

/// Whatever currently holds a button: a sidebar, or a panel for its close
/// control.
pub(crate) trait ButtonHost {
    /// Shortcut symbol for `button` in this host, if it has one.
    fn shortcut_for(&self, button: &LabeledButton) -> Option<String>;

    /// The sidebar behind this host, when the host takes part in selection.
    fn selection_container(self: Rc<Self>) -> Option<Sidebar>;
}

/// Mutable part of a button.
#[derive(Debug, Default)]
struct ButtonState {
    icon: String,
    icon_alternate: String,
    text: String,
    text_alternate: String,
    description: String,
    manual: bool,
    toggled: bool,
    selected: bool,
    appearance: Appearance,
}

impl ButtonState {
    fn look<'a>(&'a self, kind: ButtonKind, shortcut: Option<&'a str>) -> Look<'a> {
        let alternate = kind == ButtonKind::Toggle && self.toggled;
        Look {
            icon: if alternate { &self.icon_alternate } else { &self.icon },
            text: if alternate { &self.text_alternate } else { &self.text },
            description: &self.description,
            selected: self.selected,
            shortcut,
        }
    }
}

pub(crate) struct ButtonInner {
    id: ButtonId,
    kind: ButtonKind,
    name: String,
    state: RefCell<ButtonState>,
    events: EventEmitter<ButtonEvent>,
    host: RefCell<Option<Weak<dyn ButtonHost>>>,
}

/// A command control of one of the three [`ButtonKind`]s.
#[derive(Clone)]
pub struct LabeledButton {
    inner: Rc<ButtonInner>,
}

/// Non-owning reference to a button.
#[derive(Clone)]
pub struct WeakButton {
    inner: Weak<ButtonInner>,
}

impl WeakButton {
    /// The button, if it is still alive.
    pub fn upgrade(&self) -> Option<LabeledButton> {
        self.inner.upgrade().map(|inner| LabeledButton { inner })
    }

    /// Check whether this refers to `button`.
    pub fn refers_to(&self, button: &LabeledButton) -> bool {
        Weak::ptr_eq(&self.inner, &Rc::downgrade(&button.inner))
    }
}

impl fmt::Debug for WeakButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upgrade() {
            Some(button) => write!(f, "WeakButton({})", button.name()),
            None => f.write_str("WeakButton(<dropped>)"),
        }
    }
}

impl LabeledButton {
    /// Create a button that does not belong to any container yet.
    pub fn new(spec: ButtonSpec) -> Self {
        let ButtonSpec {
            kind,
            name,
            icon,
            icon_alternate,
            text,
            text_alternate,
            description,
            manual,
        } = spec;

        let button = Self {
            inner: Rc::new(ButtonInner {
                id: Uuid::new_v4(),
                kind,
                name,
                state: RefCell::new(ButtonState {
                    icon,
                    icon_alternate,
                    text,
                    text_alternate,
                    description,
                    manual,
                    ..Default::default()
                }),
                events: EventEmitter::new(),
                host: RefCell::new(None),
            }),
        };
        button.refresh();
        button
    }

    pub fn id(&self) -> ButtonId {
        self.inner.id
    }

    pub fn kind(&self) -> ButtonKind {
        self.inner.kind
    }

    /// Name of the button's `name` channel.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Toggle state. Always `false` for non-toggle buttons.
    pub fn is_toggled(&self) -> bool {
        self.inner.state.borrow().toggled
    }

    /// Whether this button is its container's current selection.
    pub fn is_selected(&self) -> bool {
        self.inner.state.borrow().selected
    }

    pub fn is_manual(&self) -> bool {
        self.inner.state.borrow().manual
    }

    /// Change the manual gate. Only affects future clicks.
    pub fn set_manual(&self, manual: bool) {
        self.inner.state.borrow_mut().manual = manual;
    }

    pub fn icon(&self) -> String {
        self.inner.state.borrow().icon.clone()
    }

    pub fn icon_alternate(&self) -> String {
        self.inner.state.borrow().icon_alternate.clone()
    }

    pub fn text(&self) -> String {
        self.inner.state.borrow().text.clone()
    }

    pub fn text_alternate(&self) -> String {
        self.inner.state.borrow().text_alternate.clone()
    }

    pub fn description(&self) -> String {
        self.inner.state.borrow().description.clone()
    }

    pub fn set_icon(&self, icon: impl Into<String>) {
        self.update(|state| state.icon = icon.into());
    }

    pub fn set_icon_alternate(&self, icon: impl Into<String>) {
        self.update(|state| state.icon_alternate = icon.into());
    }

    pub fn set_text(&self, text: impl Into<String>) {
        self.update(|state| state.text = text.into());
    }

    pub fn set_text_alternate(&self, text: impl Into<String>) {
        self.update(|state| state.text_alternate = text.into());
    }

    /// Set the hover description and recompute the hint with the current
    /// shortcut.
    pub fn set_description(&self, description: impl Into<String>) {
        self.update(|state| state.description = description.into());
    }

    /// Current visual classes, label and hint.
    pub fn appearance(&self) -> Appearance {
        self.inner.state.borrow().appearance.clone()
    }

    /// Shortcut symbol assigned by the current host.
    pub fn shortcut(&self) -> Option<String> {
        self.host().and_then(|host| host.shortcut_for(self))
    }

    /// The sidebar this button belongs to, if any.
    pub fn container(&self) -> Option<Sidebar> {
        self.host().and_then(|host| host.selection_container())
    }

    /// Simulate a click.
    ///
    /// The `name` notification always comes first. Then:
    /// - Instant: `trigger`, then the container's selection is cleared.
    /// - Toggle: unless manual, the state flips and `toggledOn`/`toggledOff`
    ///   fires; the container's selection is cleared either way.
    /// - Select: becomes the container's selection, or clears it when it
    ///   already is. A button outside any sidebar fires `select` then
    ///   `unselect` without holding a selection.
    pub fn activate(&self) {
        log::trace!("activate {} ({})", self.name(), self.kind().as_str());
        self.emit(ButtonEventKind::Name);

        match self.inner.kind {
            ButtonKind::Instant => {
                self.emit(ButtonEventKind::Trigger);
                if let Some(container) = self.container() {
                    container.clear_selection();
                }
            }
            ButtonKind::Toggle => {
                if !self.is_manual() {
                    let next = !self.is_toggled();
                    self.apply_toggled(next);
                }
                if let Some(container) = self.container() {
                    container.clear_selection();
                }
            }
            ButtonKind::Select => match self.container() {
                Some(container) => {
                    if container.selection().as_ref() == Some(self) {
                        container.clear_selection();
                    } else {
                        container.set_selection(Some(self));
                    }
                }
                None => {
                    self.emit(ButtonEventKind::Select);
                    self.emit(ButtonEventKind::Unselect);
                }
            },
        }
    }

    /// Set the toggle state directly.
    ///
    /// Emits `toggledOn`/`toggledOff` like a click would, even for manual
    /// buttons. Setting the current value, or calling this on a non-toggle
    /// button, does nothing.
    pub fn set_toggled(&self, toggled: bool) {
        if self.inner.kind != ButtonKind::Toggle {
            log::debug!("set_toggled ignored on {} button {}", self.kind().as_str(), self.name());
            return;
        }
        self.apply_toggled(toggled);
    }

    /// Receive every notification this button emits.
    pub fn subscribe(&self, handler: impl Fn(&ButtonEvent) + 'static) -> Subscription {
        self.inner.events.subscribe(handler)
    }

    /// Receive notifications on one channel: `"trigger"`, `"toggledOn"`,
    /// `"toggledOff"`, `"select"`, `"unselect"`, or the button's name.
    pub fn on(&self, channel: &str, handler: impl Fn(&ButtonEvent) + 'static) -> Subscription {
        let channel = channel.to_string();
        self.subscribe(move |event| {
            if event.channel() == channel {
                handler(event);
            }
        })
    }

    pub fn downgrade(&self) -> WeakButton {
        WeakButton {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub(crate) fn attach(&self, host: Weak<dyn ButtonHost>) {
        *self.inner.host.borrow_mut() = Some(host);
    }

    pub(crate) fn detach(&self) {
        *self.inner.host.borrow_mut() = None;
        self.inner.state.borrow_mut().selected = false;
        self.refresh();
    }

    /// Set the selection mark. Only the owning sidebar calls this.
    pub(crate) fn mark_selected(&self, selected: bool) {
        self.update(|state| state.selected = selected);
    }

    /// Recompute the appearance from the current state and host.
    pub(crate) fn refresh(&self) {
        let shortcut = self.shortcut();
        let mut state = self.inner.state.borrow_mut();
        let appearance = state.look(self.inner.kind, shortcut.as_deref()).appearance();
        state.appearance = appearance;
    }

    pub(crate) fn emit(&self, kind: ButtonEventKind) {
        let event = ButtonEvent {
            kind,
            button: self.clone(),
        };
        log::trace!("{} -> {}", self.name(), event.channel());

        self.inner.events.emit(&event);
        if let Some(container) = self.container() {
            container.bubble(&event);
        }
    }

    fn apply_toggled(&self, toggled: bool) {
        if self.is_toggled() == toggled {
            return;
        }
        self.update(|state| state.toggled = toggled);
        self.emit(if toggled {
            ButtonEventKind::ToggledOn
        } else {
            ButtonEventKind::ToggledOff
        });
    }

    fn update(&self, change: impl FnOnce(&mut ButtonState)) {
        change(&mut self.inner.state.borrow_mut());
        self.refresh();
    }

    fn host(&self) -> Option<Rc<dyn ButtonHost>> {
        self.inner.host.borrow().as_ref().and_then(Weak::upgrade)
    }
}

impl PartialEq for LabeledButton {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for LabeledButton {}

impl Hash for LabeledButton {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
    }
}

impl fmt::Debug for LabeledButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("LabeledButton")
            .field("name", &self.inner.name)
            .field("kind", &self.inner.kind)
            .field("toggled", &state.toggled)
            .field("selected", &state.selected)
            .finish()
    }
}
