//! Floating panels.
//!
//! A panel can be opened and closed, has an optional close button bound to
//! `Q`, and persists its dragged position through a [`KeyValueStore`].
//! Attaching to the screen and dragging belong to collaborators.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

use crate::button::{ButtonHost, ButtonSpec, LabeledButton};
use crate::events::{EventEmitter, Subscription};
use crate::keys::{Handled, KeyPress};
use crate::router::KeyTarget;
use crate::sidebar::Sidebar;
use crate::storage::KeyValueStore;

/// Heading used when none is configured.
pub const DEFAULT_HEADING: &str = "Heading";
/// Name of the close button.
pub const CLOSE_BUTTON_NAME: &str = "close";
/// Key bound to the close button.
pub const CLOSE_KEY: &str = "Q";

/// Panel construction options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelOptions {
    /// Identifier, also used in storage keys.
    pub id: String,
    pub heading: Option<String>,
    /// Show a close button.
    pub close_button: bool,
    /// Access key advertised in the panel hint.
    pub access_key: Option<char>,
    /// Open the panel right away.
    pub open: bool,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            id: String::new(),
            heading: None,
            close_button: true,
            access_key: None,
            open: true,
        }
    }
}

impl PanelOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }

    pub fn close_button(mut self, close_button: bool) -> Self {
        self.close_button = close_button;
        self
    }

    pub fn access_key(mut self, key: char) -> Self {
        self.access_key = Some(key);
        self
    }

    pub fn open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }
}

/// Position as style strings, e.g. `"120px"`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PanelPosition {
    pub top: String,
    pub left: String,
}

impl PanelPosition {
    pub fn new(top: impl Into<String>, left: impl Into<String>) -> Self {
        Self {
            top: top.into(),
            left: left.into(),
        }
    }
}

/// Where panels are shown.
pub trait DisplaySurface {
    fn attach(&self, panel_id: &str);
    fn detach(&self, panel_id: &str);
    /// Give input focus to the panel.
    fn focus(&self, panel_id: &str);
}

/// Drag-and-drop positioning of a panel by its heading.
///
/// The collaborator moves the panel on its own and calls
/// [`Panel::drag_finished`] when a drag ends.
pub trait DragBehavior {
    fn position(&self) -> PanelPosition;
    fn move_to(&self, position: &PanelPosition);
}

/// Notifications emitted by a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    Close,
}

/// Collaborators a panel is wired to.
#[derive(Clone)]
pub struct PanelCollaborators {
    pub surface: Rc<dyn DisplaySurface>,
    pub drag: Rc<dyn DragBehavior>,
    pub store: Rc<dyn KeyValueStore>,
}

struct PanelInner {
    id: String,
    heading: String,
    hint: String,
    open: Cell<bool>,
    close_button: Option<LabeledButton>,
    keycuts: RefCell<Vec<(String, LabeledButton)>>,
    collaborators: PanelCollaborators,
    events: EventEmitter<PanelEvent>,
}

impl ButtonHost for PanelInner {
    fn shortcut_for(&self, button: &LabeledButton) -> Option<String> {
        self.keycuts
            .borrow()
            .iter()
            .find(|(_, b)| b == button)
            .map(|(symbol, _)| symbol.clone())
    }

    fn selection_container(self: Rc<Self>) -> Option<Sidebar> {
        None
    }
}

/// Handle to a panel. Clones refer to the same panel.
#[derive(Clone)]
pub struct Panel {
    inner: Rc<PanelInner>,
}

impl Panel {
    /// Build a panel, restore its saved position and open it when
    /// `options.open` is set.
    pub fn new(options: PanelOptions, collaborators: PanelCollaborators) -> Self {
        let heading = options
            .heading
            .clone()
            .unwrap_or_else(|| DEFAULT_HEADING.to_string());
        let hint = match options.access_key {
            Some(key) => format!("{heading}\n\nAccess Key: {}", key.to_uppercase()),
            None => heading.clone(),
        };
        let close_button = options.close_button.then(|| {
            LabeledButton::new(
                ButtonSpec::instant(CLOSE_BUTTON_NAME)
                    .icon("fa-close")
                    .description("Close panel"),
            )
        });

        let inner = Rc::new(PanelInner {
            id: options.id,
            heading,
            hint,
            open: Cell::new(false),
            close_button: close_button.clone(),
            keycuts: RefCell::new(Vec::new()),
            collaborators,
            events: EventEmitter::new(),
        });
        let panel = Self { inner };

        if let Some(button) = close_button {
            panel.add_keycut(CLOSE_KEY, &button);
            let weak = Rc::downgrade(&panel.inner);
            button
                .on("trigger", move |_| {
                    if let Some(inner) = weak.upgrade() {
                        Panel { inner }.close();
                    }
                })
                .detach();
        }

        panel.restore_position();
        if options.open {
            panel.open(false);
        }
        panel
    }

    pub fn id(&self) -> &str {
        &self.inner.id
    }

    pub fn heading(&self) -> &str {
        &self.inner.heading
    }

    /// Hover hint: the heading plus the access key, if any.
    pub fn hint(&self) -> &str {
        &self.inner.hint
    }

    pub fn close_button(&self) -> Option<&LabeledButton> {
        self.inner.close_button.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.inner.open.get()
    }

    /// Attach to the display surface, then focus when asked.
    pub fn open(&self, focus: bool) {
        let surface = &self.inner.collaborators.surface;
        if !self.is_open() {
            surface.attach(&self.inner.id);
            self.inner.open.set(true);
            log::debug!("Opened panel {}", self.inner.id);
        }
        if focus {
            surface.focus(&self.inner.id);
        }
    }

    /// Detach from the display surface and emit `close`. No-op when closed.
    pub fn close(&self) {
        if !self.is_open() {
            return;
        }
        self.inner.collaborators.surface.detach(&self.inner.id);
        self.inner.open.set(false);
        log::debug!("Closed panel {}", self.inner.id);
        self.inner.events.emit(&PanelEvent::Close);
    }

    pub fn toggle_open(&self, focus: bool) {
        if self.is_open() {
            self.close();
        } else {
            self.open(focus);
        }
    }

    /// Bind `symbol` to `button` inside this panel. A button without a host
    /// is adopted so its hint shows the key.
    pub fn add_keycut(&self, symbol: impl Into<String>, button: &LabeledButton) {
        let symbol = symbol.into();
        self.inner
            .keycuts
            .borrow_mut()
            .retain(|(existing, _)| !existing.eq_ignore_ascii_case(&symbol));
        self.inner.keycuts.borrow_mut().push((symbol, button.clone()));

        if button.shortcut().is_none() && button.container().is_none() {
            let weak: Weak<PanelInner> = Rc::downgrade(&self.inner);
            button.attach(weak);
        }
        button.refresh();
    }

    /// Activate the button bound to the pressed key.
    ///
    /// Closed panels and presses with Alt/Ctrl/Shift are ignored. A handled
    /// press is not seen by other targets.
    pub fn handle_key(&self, press: &KeyPress) -> Handled {
        if !self.is_open() || press.modifiers.suppresses_shortcuts() {
            return Handled::No;
        }
        let target = self
            .inner
            .keycuts
            .borrow()
            .iter()
            .find(|(symbol, _)| press.key.matches_symbol(symbol))
            .map(|(_, button)| button.clone());

        match target {
            Some(button) => {
                button.activate();
                Handled::Yes
            }
            None => Handled::No,
        }
    }

    /// Persist the position reported by the drag collaborator.
    pub fn drag_finished(&self) {
        let position = self.inner.collaborators.drag.position();
        let store = &self.inner.collaborators.store;
        let (top_key, left_key) = self.storage_keys();

        let saved = store
            .set(&top_key, &position.top)
            .and_then(|()| store.set(&left_key, &position.left));
        match saved {
            Ok(()) => log::debug!(
                "Saved panel {} position {} / {}",
                self.inner.id,
                position.top,
                position.left
            ),
            Err(e) => log::warn!("Failed to save position of panel {}: {}", self.inner.id, e),
        }
    }

    /// Storage keys for the top and left coordinates.
    pub fn storage_keys(&self) -> (String, String) {
        (
            format!("dragger_{}_top", self.inner.id),
            format!("dragger_{}_left", self.inner.id),
        )
    }

    pub fn subscribe(&self, handler: impl Fn(&PanelEvent) + 'static) -> Subscription {
        self.inner.events.subscribe(handler)
    }

    fn restore_position(&self) {
        let store = &self.inner.collaborators.store;
        let (top_key, left_key) = self.storage_keys();

        let restored = store.get(&top_key).and_then(|top| match top {
            Some(top) => Ok(Some(PanelPosition {
                top,
                left: store.get(&left_key)?.unwrap_or_default(),
            })),
            None => Ok(None),
        });
        match restored {
            Ok(Some(position)) => {
                log::debug!("Restored panel {} to {} / {}", self.inner.id, position.top, position.left);
                self.inner.collaborators.drag.move_to(&position);
            }
            Ok(None) => {}
            Err(e) => log::warn!("Failed to restore position of panel {}: {}", self.inner.id, e),
        }
    }
}

impl KeyTarget for Panel {
    fn handle_key(&self, press: &KeyPress, _focused: Option<&LabeledButton>) -> Handled {
        Panel::handle_key(self, press)
    }
}

impl fmt::Debug for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Panel")
            .field("id", &self.inner.id)
            .field("heading", &self.inner.heading)
            .field("open", &self.is_open())
            .finish()
    }
}

/// A display surface that only records what happened to it.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    attached: RefCell<Vec<String>>,
    focused: RefCell<Option<String>>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_attached(&self, panel_id: &str) -> bool {
        self.attached.borrow().iter().any(|id| id == panel_id)
    }

    pub fn focused(&self) -> Option<String> {
        self.focused.borrow().clone()
    }
}

impl DisplaySurface for HeadlessSurface {
    fn attach(&self, panel_id: &str) {
        if !self.is_attached(panel_id) {
            self.attached.borrow_mut().push(panel_id.to_string());
        }
    }

    fn detach(&self, panel_id: &str) {
        self.attached.borrow_mut().retain(|id| id != panel_id);
        let mut focused = self.focused.borrow_mut();
        if focused.as_deref() == Some(panel_id) {
            *focused = None;
        }
    }

    fn focus(&self, panel_id: &str) {
        *self.focused.borrow_mut() = Some(panel_id.to_string());
    }
}

/// A drag collaborator driven by explicit calls instead of a pointer.
#[derive(Debug, Default)]
pub struct ManualDrag {
    position: RefCell<PanelPosition>,
}

impl ManualDrag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move as if the user had dragged the panel there. Call
    /// [`Panel::drag_finished`] afterwards to persist it.
    pub fn drag_to(&self, position: PanelPosition) {
        *self.position.borrow_mut() = position;
    }
}

impl DragBehavior for ManualDrag {
    fn position(&self) -> PanelPosition {
        self.position.borrow().clone()
    }

    fn move_to(&self, position: &PanelPosition) {
        *self.position.borrow_mut() = position.clone();
    }
}
