//! Application state types and entry glue.
//!
//! Defines the page shell (`PageState`), the composed users view, theming,
//! and re-exports the event loop as `run`.
//!
pub mod keymap;
pub mod list;
pub mod modal;
pub mod table;
pub mod timer;
pub mod update;

use ratatui::layout::Rect;
use ratatui::style::Color;
use tracing::{error, info};

use crate::api::{User, UserApi};
use crate::error::FetchError;
use keymap::Keymap;
use list::UserList;
use modal::{DetailModal, DocumentListeners};
use table::UserTable;
use timer::Timers;

pub const LOAD_ERROR_MESSAGE: &str = "Failed to load users. Please try again later.";
pub const EMPTY_MESSAGE: &str = "No users found.";

/// Best-effort RGB approximations for the terminal's named colors.
const NAMED_COLORS: [(Color, (u8, u8, u8)); 16] = [
    (Color::Black, (0x00, 0x00, 0x00)),
    (Color::Red, (0xFF, 0x00, 0x00)),
    (Color::Green, (0x00, 0xFF, 0x00)),
    (Color::Yellow, (0xFF, 0xFF, 0x00)),
    (Color::Blue, (0x00, 0x00, 0xFF)),
    (Color::Magenta, (0xFF, 0x00, 0xFF)),
    (Color::Cyan, (0x00, 0xFF, 0xFF)),
    (Color::Gray, (0xB3, 0xB3, 0xB3)),
    (Color::DarkGray, (0x4D, 0x4D, 0x4D)),
    (Color::LightRed, (0xFF, 0x66, 0x66)),
    (Color::LightGreen, (0x66, 0xFF, 0x66)),
    (Color::LightYellow, (0xFF, 0xFF, 0x66)),
    (Color::LightBlue, (0x66, 0x66, 0xFF)),
    (Color::LightMagenta, (0xFF, 0x66, 0xFF)),
    (Color::LightCyan, (0x66, 0xFF, 0xFF)),
    (Color::White, (0xFF, 0xFF, 0xFF)),
];

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub danger: Color,
    pub link: Color,
}

impl Theme {
    /// Plain terminal colors.
    pub fn dark() -> Self {
        Self {
            text: Color::Gray,
            muted: Color::DarkGray,
            title: Color::Cyan,
            border: Color::Gray,
            header_bg: Color::Black,
            header_fg: Color::Cyan,
            status_bg: Color::DarkGray,
            status_fg: Color::Black,
            highlight_fg: Color::Yellow,
            highlight_bg: Color::Reset,
            danger: Color::Red,
            link: Color::Blue,
        }
    }

    /// Catppuccin Mocha theme defaults.
    pub fn mocha() -> Self {
        // Palette reference: https://github.com/catppuccin/catppuccin
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),         // text
            muted: Color::Rgb(0x7f, 0x84, 0x9c),        // overlay1
            title: Color::Rgb(0xcb, 0xa6, 0xf7),        // mauve
            border: Color::Rgb(0x58, 0x5b, 0x70),       // surface2
            header_bg: Color::Rgb(0x31, 0x32, 0x44),    // surface0
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe),    // lavender
            status_bg: Color::Rgb(0x45, 0x47, 0x5a),    // surface1
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4),    // text
            highlight_fg: Color::Rgb(0xf9, 0xe2, 0xaf), // yellow
            highlight_bg: Color::Rgb(0x45, 0x47, 0x5a), // surface1
            danger: Color::Rgb(0xf3, 0x8b, 0xa8),       // red
            link: Color::Rgb(0x89, 0xb4, 0xfa),         // blue
        }
    }

    /// Load theme from a simple key=value file. Unknown or missing keys fall back to `mocha`.
    pub fn from_file(path: &str) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::parse(&contents))
    }

    pub fn parse(contents: &str) -> Self {
        let mut theme = Self::mocha();
        for raw_line in contents.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, val)) = line.split_once('=') else {
                continue;
            };
            let Some(color) = Self::parse_color(val) else {
                continue;
            };
            match key.trim() {
                "text" => theme.text = color,
                "muted" => theme.muted = color,
                "title" => theme.title = color,
                "border" => theme.border = color,
                "header_bg" => theme.header_bg = color,
                "header_fg" => theme.header_fg = color,
                "status_bg" => theme.status_bg = color,
                "status_fg" => theme.status_fg = color,
                "highlight_fg" => theme.highlight_fg = color,
                "highlight_bg" => theme.highlight_bg = color,
                "danger" => theme.danger = color,
                "link" => theme.link = color,
                _ => {}
            }
        }
        theme
    }

    /// Parse a color from hex ("#RRGGBB" or "RRGGBB"), "index:N" or "reset".
    ///
    /// Hex values that match a named color's approximation in
    /// [`NAMED_COLORS`] read back as that named color.
    fn parse_color(s: &str) -> Option<Color> {
        let lower = s.trim().to_ascii_lowercase();
        if lower == "reset" {
            return Some(Color::Reset);
        }
        if let Some(idx) = lower.strip_prefix("index:") {
            return idx.trim().parse::<u8>().ok().map(Color::Indexed);
        }
        let hex = lower.strip_prefix('#').unwrap_or(&lower);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        let rgb = (channel(0)?, channel(2)?, channel(4)?);
        Some(
            NAMED_COLORS
                .iter()
                .find(|(_, approx)| *approx == rgb)
                .map(|(named, _)| *named)
                .unwrap_or(Color::Rgb(rgb.0, rgb.1, rgb.2)),
        )
    }

    /// Persist the theme in key=value format.
    ///
    /// # Arguments
    ///
    /// * `path` - Destination file; overwritten.
    ///
    /// # Returns
    ///
    /// The I/O result of the write. Named colors are written as their hex
    /// approximation and read back as the same named color.
    pub fn write_file(&self, path: &str) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# userdeck theme configuration\n");
        buf.push_str("# Colors: hex as #RRGGBB or RRGGBB, index:N, or 'reset'\n\n");

        fn color_to_str(c: Color) -> String {
            match c {
                Color::Rgb(r, g, b) => format!("#{:02X}{:02X}{:02X}", r, g, b),
                Color::Reset => "reset".to_string(),
                Color::Indexed(i) => format!("index:{}", i),
                named => match NAMED_COLORS.iter().find(|(n, _)| *n == named) {
                    Some((_, (r, g, b))) => format!("#{:02X}{:02X}{:02X}", r, g, b),
                    None => "reset".to_string(),
                },
            }
        }

        for (k, v) in [
            ("text", self.text),
            ("muted", self.muted),
            ("title", self.title),
            ("border", self.border),
            ("header_bg", self.header_bg),
            ("header_fg", self.header_fg),
            ("status_bg", self.status_bg),
            ("status_fg", self.status_fg),
            ("highlight_fg", self.highlight_fg),
            ("highlight_bg", self.highlight_bg),
            ("danger", self.danger),
            ("link", self.link),
        ] {
            let _ = writeln!(&mut buf, "{} = {}", k, color_to_str(v));
        }

        std::fs::write(path, buf)
    }

    /// Load `path` if it exists; otherwise write the default theme there and return it.
    pub fn load_or_init(path: &str) -> Self {
        if std::path::Path::new(path).exists() {
            return Self::from_file(path).unwrap_or_else(Self::mocha);
        }
        let t = Self::mocha();
        if let Err(e) = t.write_file(path) {
            tracing::warn!(?e, path, "could not write default theme");
        }
        t
    }
}

/// Outward actions requested by the state layer, performed by the event loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    OpenLink(String),
}

/// The composed list screen: controller, table state and the optional modal.
#[derive(Debug)]
pub struct UsersView {
    pub list: UserList,
    pub table: UserTable,
    pub modal: Option<DetailModal>,
}

impl UsersView {
    pub fn new(users: Vec<User>) -> Self {
        Self { list: UserList::from_snapshot(users), table: UserTable::default(), modal: None }
    }

    /// The record the modal is showing, if any.
    pub fn selected_user(&self) -> Option<&User> {
        self.modal.as_ref().map(DetailModal::user)
    }
}

/// What the page shell shows.
#[derive(Debug)]
pub enum PageState {
    Loading,
    Failed { message: String },
    Empty,
    Ready(UsersView),
}

impl PageState {
    /// Fold the initial list fetch into a page. This is the only place fetch
    /// failures are recovered from.
    pub fn from_fetch(result: Result<Vec<User>, FetchError>) -> Self {
        match result {
            Err(e) => {
                error!(error = %e, "error fetching users");
                PageState::Failed { message: LOAD_ERROR_MESSAGE.to_string() }
            }
            Ok(users) if users.is_empty() => {
                info!("no users returned");
                PageState::Empty
            }
            Ok(users) => {
                info!(count = users.len(), "users loaded");
                PageState::Ready(UsersView::new(users))
            }
        }
    }

    pub fn load(api: &dyn UserApi) -> Self {
        Self::from_fetch(api.list_users())
    }

    pub fn view(&self) -> Option<&UsersView> {
        match self {
            PageState::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn view_mut(&mut self) -> Option<&mut UsersView> {
        match self {
            PageState::Ready(v) => Some(v),
            _ => None,
        }
    }
}

pub struct AppState {
    pub page: PageState,
    pub theme: Theme,
    pub keymap: Keymap,
    pub listeners: DocumentListeners,
    pub timers: Timers,
    /// Last full frame area; mouse hit-testing uses it.
    pub viewport: Rect,
    pub status: Option<String>,
    pub should_quit: bool,
    next_generation: u64,
    effects: Vec<Effect>,
}

impl AppState {
    pub fn new(theme: Theme, keymap: Keymap) -> Self {
        Self {
            page: PageState::Loading,
            theme,
            keymap,
            listeners: DocumentListeners::new(),
            timers: Timers::new(),
            viewport: Rect::new(0, 0, 120, 40),
            status: None,
            should_quit: false,
            next_generation: 0,
            effects: Vec::new(),
        }
    }

    /// State already holding a fetched page; used by tests and headless callers.
    pub fn with_page(page: PageState) -> Self {
        let mut app = Self::new(Theme::mocha(), Keymap::default());
        app.page = page;
        app
    }

    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    pub(crate) fn push_effect(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    pub(crate) fn bump_generation(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_parse_overrides_known_keys() {
        let t = Theme::parse("# c\ntitle = #010203\nlink=reset\nbogus = #FFFFFF\nborder = nothex\n");
        assert_eq!(t.title, Color::Rgb(1, 2, 3));
        assert_eq!(t.link, Color::Reset);
        assert_eq!(t.border, Theme::mocha().border);
    }

    #[test]
    fn named_colors_survive_write_and_read() {
        let path = std::env::temp_dir().join(format!("userdeck_dark_{}.conf", std::process::id()));
        let path_str = path.to_string_lossy().to_string();
        let dark = Theme::dark();
        dark.write_file(&path_str).unwrap();
        let written = std::fs::read_to_string(&path_str).unwrap();
        assert!(written.contains("text = #B3B3B3"));
        assert!(written.contains("highlight_bg = reset"));
        let back = Theme::from_file(&path_str).unwrap();
        assert_eq!(back.text, Color::Gray);
        assert_eq!(back.muted, Color::DarkGray);
        assert_eq!(back.title, Color::Cyan);
        assert_eq!(back.header_bg, Color::Black);
        assert_eq!(back.status_fg, Color::Black);
        assert_eq!(back.highlight_fg, Color::Yellow);
        assert_eq!(back.highlight_bg, Color::Reset);
        assert_eq!(back.danger, Color::Red);
        assert_eq!(back.link, Color::Blue);
        let _ = std::fs::remove_file(&path_str);
    }

    #[test]
    fn indexed_colors_read_back() {
        let t = Theme::parse("border = index:238\n");
        assert_eq!(t.border, Color::Indexed(238));
    }
}
