//! ANSI colors for terminal output

use std::env;
use std::io::IsTerminal;

pub struct Colors;

impl Colors {
    pub const RESET: &'static str = "\x1b[0m";
    pub const BOLD: &'static str = "\x1b[1m";
    pub const DIM: &'static str = "\x1b[2m";

    pub const RED: &'static str = "\x1b[31m";
    pub const GREEN: &'static str = "\x1b[32m";
    pub const YELLOW: &'static str = "\x1b[33m";
    pub const BLUE: &'static str = "\x1b[34m";
    pub const CYAN: &'static str = "\x1b[36m";
    pub const BRIGHT_BLACK: &'static str = "\x1b[90m";
}

/// Apply color to text if terminal supports it
pub fn colorize(text: &str, color: &str) -> String {
    if supports_formatting() {
        format!("{color}{text}{}", Colors::RESET)
    } else {
        text.to_string()
    }
}

pub fn success(text: &str) -> String {
    colorize(text, Colors::GREEN)
}

pub fn failure(text: &str) -> String {
    colorize(text, Colors::RED)
}

pub fn warning(text: &str) -> String {
    colorize(text, Colors::YELLOW)
}

pub fn heading(text: &str) -> String {
    colorize(text, Colors::BOLD)
}

pub fn muted(text: &str) -> String {
    colorize(text, Colors::BRIGHT_BLACK)
}

/// Terminal capability detection
pub fn supports_formatting() -> bool {
    if env::var("NO_COLOR").is_ok() || env::var("FORCE_COLOR").as_deref() == Ok("0") {
        return false;
    }

    if env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    // Disable formatting when running tests
    if cfg!(test) {
        return false;
    }

    if !std::io::stdout().is_terminal() {
        return false;
    }

    match env::var("TERM") {
        Ok(term) => !(term == "dumb" || term.is_empty()),
        Err(_) => env::var("TERM_PROGRAM").is_ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn with_env<F: FnOnce()>(vars: &[(&str, Option<&str>)], check: F) {
        let saved: Vec<_> = vars
            .iter()
            .map(|(key, _)| (key.to_string(), env::var(key).ok()))
            .collect();

        unsafe {
            for (key, value) in vars {
                match value {
                    Some(value) => env::set_var(key, value),
                    None => env::remove_var(key),
                }
            }
        }

        check();

        unsafe {
            for (key, value) in saved {
                match value {
                    Some(value) => env::set_var(&key, value),
                    None => env::remove_var(&key),
                }
            }
        }
    }

    #[test]
    #[serial]
    fn test_colorize_with_no_color() {
        with_env(&[("NO_COLOR", Some("1"))], || {
            assert_eq!(colorize("test", Colors::RED), "test");
            assert!(!supports_formatting());
        });
    }

    #[test]
    #[serial]
    fn test_force_color_zero_disables() {
        with_env(&[("NO_COLOR", None), ("FORCE_COLOR", Some("0"))], || {
            assert!(!supports_formatting());
        });
    }

    #[test]
    #[serial]
    fn test_force_color_enables() {
        with_env(&[("NO_COLOR", None), ("FORCE_COLOR", Some("1"))], || {
            assert_eq!(failure("x"), format!("{}x{}", Colors::RED, Colors::RESET));
        });
    }

    #[test]
    #[serial]
    fn test_helpers_are_plain_without_formatting() {
        with_env(&[("NO_COLOR", None), ("FORCE_COLOR", None)], || {
            assert_eq!(success("ok"), "ok");
            assert_eq!(warning("warn"), "warn");
            assert_eq!(heading("title"), "title");
            assert_eq!(muted("note"), "note");
        });
    }
}
