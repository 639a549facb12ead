//! Keybinding configuration: parse `keybinds.conf`, provide defaults, and map keys to actions.
//!
//! Only the table screen is remappable. The detail modal listens for Escape
//! (plus its link shortcuts) regardless of this map.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Semantic actions on the users table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    /// Jump to the first row.
    First,
    /// Jump to the last row.
    Last,
    /// Open the detail modal for the highlighted row.
    OpenDetails,
    /// Start the delayed removal of the highlighted row.
    DeleteUser,
    /// Open the highlighted row's website without selecting it.
    OpenWebsite,
    /// Swallow the key.
    Ignore,
}

const ALL_ACTIONS: [KeyAction; 11] = [
    KeyAction::Quit,
    KeyAction::MoveUp,
    KeyAction::MoveDown,
    KeyAction::PageUp,
    KeyAction::PageDown,
    KeyAction::First,
    KeyAction::Last,
    KeyAction::OpenDetails,
    KeyAction::DeleteUser,
    KeyAction::OpenWebsite,
    KeyAction::Ignore,
];

/// Maps `(KeyModifiers, KeyCode)` pairs to [`KeyAction`]s.
#[derive(Clone, Debug)]
pub struct Keymap {
    bindings: HashMap<(KeyModifiers, KeyCode), KeyAction>,
}

impl Keymap {
    /// Arrow keys plus vim-style j/k, Enter to inspect, Delete/d to remove.
    pub fn new_defaults() -> Self {
        use KeyCode::*;
        use KeyModifiers as M;
        let mut bindings = HashMap::new();
        bindings.insert((M::NONE, Char('q')), KeyAction::Quit);
        bindings.insert((M::CONTROL, Char('c')), KeyAction::Quit);
        bindings.insert((M::NONE, Esc), KeyAction::Ignore);
        bindings.insert((M::NONE, Up), KeyAction::MoveUp);
        bindings.insert((M::NONE, Down), KeyAction::MoveDown);
        bindings.insert((M::NONE, Char('k')), KeyAction::MoveUp);
        bindings.insert((M::NONE, Char('j')), KeyAction::MoveDown);
        bindings.insert((M::NONE, PageUp), KeyAction::PageUp);
        bindings.insert((M::NONE, PageDown), KeyAction::PageDown);
        bindings.insert((M::NONE, Home), KeyAction::First);
        bindings.insert((M::NONE, End), KeyAction::Last);
        bindings.insert((M::NONE, Char('g')), KeyAction::First);
        bindings.insert((M::SHIFT, Char('G')), KeyAction::Last);
        bindings.insert((M::NONE, Char('G')), KeyAction::Last);
        bindings.insert((M::NONE, Enter), KeyAction::OpenDetails);
        bindings.insert((M::NONE, Delete), KeyAction::DeleteUser);
        bindings.insert((M::NONE, Char('d')), KeyAction::DeleteUser);
        bindings.insert((M::NONE, Char('w')), KeyAction::OpenWebsite);
        Self { bindings }
    }

    /// Load keybindings from `path`, creating it with the defaults when missing.
    ///
    /// # Arguments
    ///
    /// * `path` - Location of `keybinds.conf`.
    ///
    /// # Returns
    ///
    /// The parsed map, or the defaults when the file is unreadable. A missing
    /// file is written out so the user has something to edit.
    pub fn load_or_init(path: &str) -> Self {
        if std::path::Path::new(path).exists() {
            return Self::from_file(path).unwrap_or_default();
        }
        let km = Self::default();
        if let Err(e) = km.write_file(path) {
            tracing::warn!(?e, path, "could not write default keybinds");
        }
        km
    }

    /// Read `<Action> = <KeySpec>` lines (or the legacy `<KeySpec> = <Action>`)
    /// on top of the defaults.
    pub fn from_file(path: &str) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::parse(&contents))
    }

    /// Parse keybinds file contents on top of the defaults.
    ///
    /// # Arguments
    ///
    /// * `contents` - File text; blank lines, `#` comments and lines that name
    ///   no known action or key are skipped.
    ///
    /// # Returns
    ///
    /// A keymap where each parsed line adds or overrides one binding.
    pub fn parse(contents: &str) -> Self {
        let mut map = Self::default();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((lhs, rhs)) = line.split_once('=') else {
                continue;
            };
            let (lhs, rhs) = (lhs.trim(), rhs.trim());
            if let (Some(action), Some(key)) = (parse_action(lhs), parse_key(rhs)) {
                map.bindings.insert(key, action);
            } else if let (Some(key), Some(action)) = (parse_key(lhs), parse_action(rhs)) {
                map.bindings.insert(key, action);
            }
        }
        map
    }

    /// Write all bindings as `<Action> = <KeySpec>` lines, sorted by action.
    ///
    /// # Arguments
    ///
    /// * `path` - Destination file; overwritten.
    ///
    /// # Returns
    ///
    /// The I/O result of the write.
    pub fn write_file(&self, path: &str) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# userdeck keybindings\n");
        buf.push_str("# Format: <Action> = <KeySpec>\n");
        buf.push_str("# KeySpec examples: q, Ctrl+c, Enter, Esc, Up, Down, PageUp, PageDown, Home, End, Delete, j, k\n");
        buf.push_str("# Actions: ");
        buf.push_str(&ALL_ACTIONS.map(format_action).join(", "));
        buf.push_str("\n\n");

        let mut entries: Vec<(String, KeyAction)> = self
            .bindings
            .iter()
            .map(|((mods, code), action)| (Self::format_key(*mods, *code), *action))
            .collect();
        entries.sort_by(|a, b| format_action(a.1).cmp(format_action(b.1)).then(a.0.cmp(&b.0)));
        for (key, action) in entries {
            let _ = writeln!(&mut buf, "{} = {}", format_action(action), key);
        }

        std::fs::write(path, buf)
    }

    /// Look up the action bound to a key event.
    ///
    /// # Arguments
    ///
    /// * `key` - Event from crossterm; modifiers must match exactly.
    ///
    /// # Returns
    ///
    /// `Some(action)` when bound, `None` otherwise.
    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&(key.modifiers, key.code)).copied()
    }

    /// Keys bound to `action`, formatted and sorted, for the help line.
    pub fn keys_for(&self, action: KeyAction) -> Vec<String> {
        let mut keys: Vec<String> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|((m, c), _)| Self::format_key(*m, *c))
            .collect();
        keys.sort();
        keys
    }

    /// Format a key like `Ctrl+c`, `Enter`, `j`.
    ///
    /// # Returns
    ///
    /// The same spelling `parse` accepts, so written files read back.
    pub fn format_key(mods: KeyModifiers, code: KeyCode) -> String {
        use KeyCode::*;
        let base = match code {
            Enter => "Enter".to_string(),
            Delete => "Delete".to_string(),
            Esc => "Esc".to_string(),
            Up => "Up".to_string(),
            Down => "Down".to_string(),
            Left => "Left".to_string(),
            Right => "Right".to_string(),
            PageUp => "PageUp".to_string(),
            PageDown => "PageDown".to_string(),
            Home => "Home".to_string(),
            End => "End".to_string(),
            Char(c) => c.to_string(),
            _ => format!("{:?}", code),
        };
        if mods.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{}", base)
        } else {
            base
        }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new_defaults()
    }
}

fn parse_key(spec: &str) -> Option<(KeyModifiers, KeyCode)> {
    use KeyCode::*;
    let (mut mods, rest) = match spec.trim().strip_prefix("Ctrl+") {
        Some(after) => (KeyModifiers::CONTROL, after),
        None => (KeyModifiers::NONE, spec.trim()),
    };
    let code = match rest {
        "Enter" => Enter,
        "Delete" => Delete,
        "Esc" | "Escape" => Esc,
        "Up" => Up,
        "Down" => Down,
        "Left" => Left,
        "Right" => Right,
        "PageUp" => PageUp,
        "PageDown" => PageDown,
        "Home" => Home,
        "End" => End,
        _ => {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => {
                    // crossterm reports uppercase letters with SHIFT held
                    if c.is_ascii_uppercase() && mods.is_empty() {
                        mods = KeyModifiers::SHIFT;
                    }
                    Char(c)
                }
                _ => return None,
            }
        }
    };
    Some((mods, code))
}

fn parse_action(s: &str) -> Option<KeyAction> {
    ALL_ACTIONS.into_iter().find(|a| format_action(*a) == s.trim())
}

pub fn format_action(a: KeyAction) -> &'static str {
    match a {
        KeyAction::Quit => "Quit",
        KeyAction::MoveUp => "MoveUp",
        KeyAction::MoveDown => "MoveDown",
        KeyAction::PageUp => "PageUp",
        KeyAction::PageDown => "PageDown",
        KeyAction::First => "First",
        KeyAction::Last => "Last",
        KeyAction::OpenDetails => "OpenDetails",
        KeyAction::DeleteUser => "DeleteUser",
        KeyAction::OpenWebsite => "OpenWebsite",
        KeyAction::Ignore => "Ignore",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_line_orders_over_defaults() {
        let km = Keymap::parse("# comment\nDeleteUser = x\nCtrl+o = OpenDetails\nbogus line\n");
        let x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        let ctrl_o = KeyEvent::new(KeyCode::Char('o'), KeyModifiers::CONTROL);
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(km.resolve(&x), Some(KeyAction::DeleteUser));
        assert_eq!(km.resolve(&ctrl_o), Some(KeyAction::OpenDetails));
        assert_eq!(km.resolve(&enter), Some(KeyAction::OpenDetails));
    }

    #[test]
    fn uppercase_spec_binds_with_shift() {
        let km = Keymap::parse("Quit = Q\n");
        let key = KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::SHIFT);
        assert_eq!(km.resolve(&key), Some(KeyAction::Quit));
    }

    #[test]
    fn written_file_parses_back() {
        let path = std::env::temp_dir().join(format!("userdeck_keys_{}.conf", std::process::id()));
        let path_str = path.to_string_lossy().to_string();
        Keymap::default().write_file(&path_str).unwrap();
        let km = Keymap::from_file(&path_str).unwrap();
        assert_eq!(km.keys_for(KeyAction::DeleteUser), vec!["Delete", "d"]);
        let _ = std::fs::remove_file(&path_str);
    }

    #[test]
    fn missing_file_is_created_with_defaults() {
        let path = std::env::temp_dir().join(format!("userdeck_new_keys_{}.conf", std::process::id()));
        let path_str = path.to_string_lossy().to_string();
        let _ = std::fs::remove_file(&path_str);
        let km = Keymap::load_or_init(&path_str);
        assert!(path.exists());
        assert_eq!(km.keys_for(KeyAction::Quit), vec!["Ctrl+c", "q"]);
        let reread = Keymap::from_file(&path_str).unwrap();
        assert_eq!(reread.keys_for(KeyAction::Quit), vec!["Ctrl+c", "q"]);
        let _ = std::fs::remove_file(&path_str);
    }
}
