//! Hematite Core Library
//!
//! Interaction state for the Hematite widget toolkit: labeled buttons,
//! sidebars with exclusive selection and positional shortcuts, key routing
//! and floating panels. Rendering and raw input are left to collaborators.

pub mod button;
pub mod config;
pub mod events;
pub mod keys;
pub mod panel;
pub mod router;
pub mod sidebar;
pub mod storage;

pub use button::{
    Appearance, ButtonEvent, ButtonEventKind, ButtonId, ButtonKind, ButtonSpec, LabeledButton, WeakButton,
};
pub use config::{ConfigError, ConfigResult, HematiteConfig, SidebarConfig, StorageConfig};
pub use events::{EventEmitter, Subscription};
pub use keys::{Handled, Key, KeyCommand, KeyDispatcher, KeyPress, Modifiers, ShortcutTable};
pub use panel::{
    DisplaySurface, DragBehavior, HeadlessSurface, ManualDrag, Panel, PanelCollaborators, PanelEvent, PanelOptions,
    PanelPosition,
};
pub use router::{KeyRouter, KeyTarget, TargetId};
pub use sidebar::Sidebar;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError, StorageResult};
