//! Interactive confirmation and clipboard helpers

use dialoguer::{Confirm, theme::ColorfulTheme};
use log::debug;
use std::io::Write;
use std::process::{Command, Stdio};

use crate::core::error::Result;

/// Ask a yes/no question on the terminal, defaulting to no
pub fn confirm(question: &str) -> Result<bool> {
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(question)
        .default(false)
        .interact()?)
}

/// Copy text with `xclip -selection clipboard`.
///
/// Returns whether the copy succeeded; a missing or failing `xclip` is not an
/// error.
pub fn copy_to_clipboard(text: &str) -> bool {
    let child = Command::new("xclip")
        .args(["-selection", "clipboard"])
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();

    let mut child = match child {
        Ok(child) => child,
        Err(err) => {
            debug!("xclip unavailable: {err}");
            return false;
        }
    };

    let written = child
        .stdin
        .take()
        .is_some_and(|mut stdin| stdin.write_all(text.as_bytes()).is_ok());

    match child.wait() {
        Ok(status) => written && status.success(),
        Err(err) => {
            debug!("xclip failed: {err}");
            false
        }
    }
}

/// The line printed after a clipboard attempt
pub fn clipboard_notice(copied: bool) -> &'static str {
    if copied {
        "📋 Copied to clipboard!"
    } else {
        "💡 Install xclip to copy results to the clipboard automatically"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clipboard_notice() {
        assert_eq!(clipboard_notice(true), "📋 Copied to clipboard!");
        assert!(clipboard_notice(false).contains("xclip"));
    }
}
