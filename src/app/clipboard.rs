//! Copying the contact address.
//!
//! Tries the system clipboard tools in order.  When none of them works the
//! `mailto:` link is handed to the desktop opener instead, and when that
//! fails too the link is simply shown.  Nothing here returns an error.

use std::io::Write;
use std::process::{Command, Stdio};

/// How long the "copied" confirmation stays visible.
pub const COPIED_NOTICE_MS: u64 = 1_600;

const CLIPBOARD_TOOLS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("pbcopy", &[]),
];

const OPENERS: &[&str] = &["xdg-open", "open"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied { tool: String },
    OpenedMailto { link: String },
    ShowLink { link: String },
}

impl CopyOutcome {
    pub fn message(&self) -> String {
        match self {
            CopyOutcome::Copied { .. } => "copied".to_string(),
            CopyOutcome::OpenedMailto { link } => format!("opened {link}"),
            CopyOutcome::ShowLink { link } => link.clone(),
        }
    }
}

pub fn mailto(email: &str) -> String {
    format!("mailto:{email}")
}

pub fn copy_email(email: &str) -> CopyOutcome {
    copy_with(email, CLIPBOARD_TOOLS, OPENERS)
}

fn copy_with(email: &str, tools: &[(&str, &[&str])], openers: &[&str]) -> CopyOutcome {
    for (tool, args) in tools {
        if pipe_into(tool, args, email) {
            tracing::info!(tool, "email copied");
            return CopyOutcome::Copied {
                tool: tool.to_string(),
            };
        }
    }

    let link = mailto(email);
    for opener in openers {
        let opened = Command::new(opener)
            .arg(&link)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false);
        if opened {
            tracing::info!(opener, "clipboard unavailable, opened mailto link");
            return CopyOutcome::OpenedMailto { link };
        }
    }

    tracing::warn!("no clipboard tool or opener available");
    CopyOutcome::ShowLink { link }
}

fn pipe_into(program: &str, args: &[&str], text: &str) -> bool {
    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    let Ok(mut child) = child else {
        return false;
    };
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(text.as_bytes()).is_ok(),
        None => false,
    };
    let exited_ok = child.wait().map(|s| s.success()).unwrap_or(false);
    written && exited_ok
}
