//! Platform integration: handing outbound links to the desktop opener.
use crate::error::{Result, simple_error};
use std::process::{Command, ExitStatus, Stdio};
use std::thread::JoinHandle;

const ALLOWED_SCHEMES: [&str; 3] = ["https://", "http://", "mailto:"];

/// Characters a shell or `cmd.exe` would interpret; URLs carrying them are refused.
const FORBIDDEN_CHARS: [char; 9] = ['&', '|', '^', '<', '>', '"', '%', '`', '\''];

/// Command (program, leading args) that opens a URL on this platform.
///
/// None of these go through a command interpreter, so the URL stays a single
/// argument.
fn opener() -> (&'static str, &'static [&'static str]) {
    if cfg!(target_os = "macos") {
        ("open", &[])
    } else if cfg!(target_os = "windows") {
        ("rundll32", &["url.dll,FileProtocolHandler"])
    } else {
        ("xdg-open", &[])
    }
}

/// Whether `url` may be handed to the opener.
///
/// # Arguments
///
/// * `url` - Link built from API data (website, map or email).
///
/// # Returns
///
/// `true` for `http(s)://` and `mailto:` links free of whitespace, control
/// characters and shell metacharacters.
pub fn is_openable(url: &str) -> bool {
    ALLOWED_SCHEMES.iter().any(|s| url.starts_with(s))
        && !url
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || FORBIDDEN_CHARS.contains(&c))
}

/// Spawn `program args.. url` and reap it from a background thread.
///
/// Returns the reaper's handle; joining it yields the child's exit status.
fn launch(program: &str, args: &[&str], url: &str) -> Result<JoinHandle<std::io::Result<ExitStatus>>> {
    let mut child = Command::new(program)
        .args(args)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| simple_error(format!("failed to execute {program}: {e}")))?;
    let reaper = std::thread::Builder::new()
        .name("link-opener".to_string())
        .spawn(move || child.wait())
        .map_err(|e| simple_error(format!("failed to wait for {program}: {e}")))?;
    Ok(reaper)
}

/// Hand `url` to the platform opener without blocking the event loop.
///
/// # Arguments
///
/// * `url` - Link to open; must pass [`is_openable`].
///
/// # Returns
///
/// `Ok(())` once the opener is running; an error if the URL is refused or the
/// opener cannot be started.
pub fn open_link(url: &str) -> Result<()> {
    if !is_openable(url) {
        return Err(simple_error(format!("refusing to open '{url}'")));
    }
    let (program, args) = opener();
    launch(program, args, url)?;
    tracing::debug!(url, program, "link handed to opener");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_web_and_mail_links_are_opened() {
        assert!(is_openable("https://johndoe.com"));
        assert!(is_openable("https://www.google.com/maps?q=40.7128,-74.0060"));
        assert!(is_openable("mailto:john@example.com"));
        assert!(!is_openable("file:///etc/passwd"));
        assert!(open_link("--help").is_err());
    }

    #[test]
    fn shell_metacharacters_are_refused() {
        for url in [
            "https://x.com&calc",
            "https://x.com|calc",
            "https://x.com^&calc",
            "https://x.com<in",
            "https://x.com>out",
            "https://x.com\"calc",
            "https://x.com%PATH%",
            "https://x.com calc",
            "mailto:a@b.c\ncalc",
        ] {
            assert!(!is_openable(url), "{url:?} should be refused");
            assert!(open_link(url).is_err());
        }
    }

    #[cfg(target_os = "linux")]
    fn zombie_children() -> usize {
        let me = std::process::id().to_string();
        std::fs::read_dir("/proc")
            .into_iter()
            .flatten()
            .flatten()
            .filter_map(|entry| std::fs::read_to_string(entry.path().join("stat")).ok())
            .filter(|stat| {
                // fields after the ")" that closes comm: state ppid ...
                let rest = stat.rsplit_once(')').map(|(_, r)| r).unwrap_or("");
                let mut fields = rest.split_whitespace();
                let state = fields.next();
                let ppid = fields.next();
                state == Some("Z") && ppid == Some(me.as_str())
            })
            .count()
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn launched_openers_are_reaped() {
        let reapers: Vec<_> = (0..5)
            .map(|_| launch("true", &[], "https://johndoe.com").unwrap())
            .collect();
        for reaper in reapers {
            let status = reaper.join().unwrap().unwrap();
            assert!(status.success());
        }
        assert_eq!(zombie_children(), 0);
    }
}
