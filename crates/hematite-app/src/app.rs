//! Headless application state and command loop.

use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::rc::Rc;

use hematite_core::{
    ButtonEvent, ConfigError, HeadlessSurface, HematiteConfig, Key, KeyPress, KeyRouter,
    KeyValueStore, ManualDrag, Panel, PanelCollaborators, PanelEvent, PanelPosition, Sidebar, StorageError,
    Subscription, TargetId,
};
use thiserror::Error;

use crate::shortcuts::ShortcutRegistry;

/// Layout used when no file is given.
pub const DEMO_LAYOUT: &str = r#"{
    "sidebar": {
        "buttons": [
            { "kind": "select", "name": "pencil", "icon": "fa-pencil", "description": "Draw freehand" },
            { "kind": "select", "name": "eraser", "icon": "fa-eraser", "description": "Erase" },
            { "kind": "toggle", "name": "grid", "icon": "fa-th", "icon_alternate": "fa-square-o", "description": "Show grid" },
            { "kind": "instant", "name": "undo", "icon": "fa-undo", "description": "Undo" }
        ]
    },
    "panels": [
        { "id": "help", "heading": "Help", "access_key": "h", "open": false }
    ]
}"#;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Startup options.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Layout file. `None` uses [`DEMO_LAYOUT`].
    pub layout_path: Option<PathBuf>,
    /// Keep panel positions in memory regardless of the layout.
    pub in_memory: bool,
}

impl AppConfig {
    /// Parse command line arguments: `[LAYOUT] [--in-memory]`.
    pub fn from_args(args: impl IntoIterator<Item = String>) -> Self {
        let mut config = Self::default();
        for arg in args {
            if arg == "--in-memory" {
                config.in_memory = true;
            } else {
                config.layout_path = Some(PathBuf::from(arg));
            }
        }
        config
    }

    pub fn layout(&self) -> AppResult<HematiteConfig> {
        let mut layout = match &self.layout_path {
            Some(path) => HematiteConfig::load(path)?,
            None => HematiteConfig::from_json(DEMO_LAYOUT)?,
        };
        if self.in_memory {
            layout.storage.in_memory = true;
        }
        Ok(layout)
    }
}

/// One line of driver input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Press a key, e.g. `key 2`, `key enter`, `key ctrl+1`.
    Key(KeyPress),
    /// Press a key given by its legacy key code, e.g. `code 189`.
    Code(u32),
    /// Click a sidebar button by name.
    Click(String),
    /// Move input focus to a sidebar button, or clear it.
    Focus(Option<String>),
    /// Assign the sidebar selection directly, or clear it.
    Select(Option<String>),
    /// Open or close a panel and make it the active key target.
    Panel(String),
    /// Drag a panel and drop it at `top`/`left`.
    Drag { id: String, top: String, left: String },
    /// Print every button's state.
    State,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let command = words.next()?;
        let rest: Vec<&str> = words.collect();
        let arg = rest.first().map(|s| s.to_string());

        match (command, rest.len()) {
            ("key", 1) => KeyPress::parse(rest[0]).map(Self::Key),
            ("code", 1) => rest[0].parse().ok().map(Self::Code),
            ("click", 1) => arg.map(Self::Click),
            ("focus", 0 | 1) => Some(Self::Focus(arg)),
            ("select", 0 | 1) => Some(Self::Select(arg)),
            ("panel", 1) => arg.map(Self::Panel),
            ("drag", 3) => Some(Self::Drag {
                id: rest[0].to_string(),
                top: rest[1].to_string(),
                left: rest[2].to_string(),
            }),
            ("state", 0) => Some(Self::State),
            ("help", 0) => Some(Self::Help),
            ("quit" | "exit", 0) => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Whether the loop keeps reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

struct PanelSlot {
    panel: Panel,
    drag: Rc<ManualDrag>,
    target: TargetId,
}

/// Main application struct.
pub struct App {
    sidebar: Sidebar,
    sidebar_target: TargetId,
    panels: Vec<PanelSlot>,
    router: KeyRouter,
    surface: Rc<HeadlessSurface>,
    output: Rc<RefCell<Vec<String>>>,
    _subscriptions: Vec<Subscription>,
}

impl App {
    /// Build the sidebar and panels described by `layout`.
    pub fn new(layout: &HematiteConfig) -> AppResult<Self> {
        let store: Rc<dyn KeyValueStore> = Rc::from(layout.storage.open()?);
        let surface = Rc::new(HeadlessSurface::new());
        let output = Rc::new(RefCell::new(Vec::new()));
        let mut subscriptions = Vec::new();
        let mut router = KeyRouter::new();

        let sidebar = Sidebar::from_config(&layout.sidebar);
        let sidebar_target = router.register(Rc::new(sidebar.clone()));
        let sink = Rc::clone(&output);
        subscriptions.push(sidebar.subscribe(move |event: &ButtonEvent| {
            log::trace!("{} -> {}", event.button.name(), event.channel());
            sink.borrow_mut().push(format!("{}: {}", event.button.name(), event.channel()));
        }));

        let mut panels = Vec::new();
        for options in &layout.panels {
            let drag = Rc::new(ManualDrag::new());
            let panel = Panel::new(
                options.clone(),
                PanelCollaborators {
                    surface: surface.clone(),
                    drag: drag.clone(),
                    store: Rc::clone(&store),
                },
            );
            let target = router.register(Rc::new(panel.clone()));

            let sink = Rc::clone(&output);
            let id = panel.id().to_string();
            subscriptions.push(panel.subscribe(move |event| match event {
                PanelEvent::Close => sink.borrow_mut().push(format!("panel {id}: close")),
            }));
            panels.push(PanelSlot { panel, drag, target });
        }

        log::info!(
            "Loaded {} sidebar buttons and {} panels",
            sidebar.len(),
            panels.len()
        );
        Ok(Self {
            sidebar,
            sidebar_target,
            panels,
            router,
            surface,
            output,
            _subscriptions: subscriptions,
        })
    }

    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        Self::new(&config.layout()?)
    }

    pub fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    pub fn panel(&self, id: &str) -> Option<&Panel> {
        self.slot(id).map(|slot| &slot.panel)
    }

    pub fn router(&self) -> &KeyRouter {
        &self.router
    }

    /// Run one command and return the lines it produced.
    pub fn execute(&mut self, command: Command) -> (Flow, Vec<String>) {
        let mut lines = Vec::new();
        match command {
            Command::Key(press) => self.press(&press, &mut lines),
            Command::Code(code) => self.press(&KeyPress::plain(Key::from_key_code(code)), &mut lines),
            // Clicking focuses the sidebar, so it sees keys first again.
            Command::Click(name) => match self.sidebar.find(&name) {
                Some(button) => {
                    self.router.set_active(Some(self.sidebar_target));
                    button.activate();
                }
                None => lines.push(format!("no button named {name}")),
            },
            Command::Focus(None) => self.router.focus_button(None),
            Command::Focus(Some(name)) => match self.sidebar.find(&name) {
                Some(button) => self.router.focus_button(Some(&button)),
                None => lines.push(format!("no button named {name}")),
            },
            Command::Select(None) => self.sidebar.clear_selection(),
            Command::Select(Some(name)) => match self.sidebar.find(&name) {
                Some(button) => self.sidebar.set_selection(Some(&button)),
                None => lines.push(format!("no button named {name}")),
            },
            Command::Panel(id) => match self.slot(&id).map(|slot| (slot.panel.clone(), slot.target)) {
                Some((panel, target)) => {
                    panel.toggle_open(true);
                    if panel.is_open() {
                        self.router.set_active(Some(target));
                    }
                }
                None => lines.push(format!("no panel named {id}")),
            },
            Command::Drag { id, top, left } => match self.slot(&id) {
                Some(slot) => {
                    slot.drag.drag_to(PanelPosition::new(top, left));
                    slot.panel.drag_finished();
                }
                None => lines.push(format!("no panel named {id}")),
            },
            Command::State => lines.extend(self.describe()),
            Command::Help => lines.extend(self.help().lines().map(str::to_string)),
            Command::Quit => return (Flow::Quit, lines),
        }

        self.release_closed_panel();
        let mut produced: Vec<String> = self.output.borrow_mut().drain(..).collect();
        produced.append(&mut lines);
        (Flow::Continue, produced)
    }

    /// Read commands from `input` until EOF or `quit`, writing results to
    /// `output`.
    pub fn run(&mut self, input: impl BufRead, mut output: impl Write) -> AppResult<()> {
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let Some(command) = Command::parse(&line) else {
                writeln!(output, "unknown command: {}", line.trim())?;
                continue;
            };
            let (flow, lines) = self.execute(command);
            for line in lines {
                writeln!(output, "{line}")?;
            }
            if flow == Flow::Quit {
                break;
            }
        }
        output.flush()?;
        Ok(())
    }

    /// Shortcut listing for the sidebar and open panels.
    pub fn help(&self) -> String {
        self.panels
            .iter()
            .fold(ShortcutRegistry::from_sidebar(&self.sidebar), |registry, slot| {
                registry.with_panel(&slot.panel)
            })
            .format()
    }

    fn press(&self, press: &KeyPress, lines: &mut Vec<String>) {
        if !self.router.dispatch(press).was_handled() {
            lines.push(format!("key {} not handled", press.key));
        }
    }

    fn describe(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .sidebar
            .buttons()
            .iter()
            .map(|button| {
                let appearance = button.appearance();
                format!(
                    "[{}] {} {} toggled={} selected={} class=\"{}\"",
                    button.shortcut().unwrap_or_default(),
                    button.kind().as_str(),
                    button.name(),
                    button.is_toggled(),
                    button.is_selected(),
                    appearance.class_name(),
                )
            })
            .collect();
        for slot in &self.panels {
            lines.push(format!(
                "panel {} open={} attached={}",
                slot.panel.id(),
                slot.panel.is_open(),
                self.surface.is_attached(slot.panel.id())
            ));
        }
        lines
    }

    fn slot(&self, id: &str) -> Option<&PanelSlot> {
        self.panels.iter().find(|slot| slot.panel.id() == id)
    }

    // A panel closed by its own key must stop being the first target.
    fn release_closed_panel(&mut self) {
        let active = self.router.active();
        let closed = self
            .panels
            .iter()
            .any(|slot| Some(slot.target) == active && !slot.panel.is_open());
        if closed {
            self.router.set_active(None);
        }
    }
}
