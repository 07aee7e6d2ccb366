//! Copying the active address, with transient button feedback.

use crate::{Error, Result};
use std::io::Write;
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub const COPY_LABEL: &str = "Copy";
pub const COPIED_LABEL: &str = "Copied!";
/// How long the acknowledgment label stays up.
pub const DEFAULT_FEEDBACK: Duration = Duration::from_millis(1500);

/// Destination for copied text.
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<()>;
}

/// Pipes text into the first platform clipboard tool that accepts it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

const CLIPBOARD_COMMANDS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("pbcopy", &[]),
    ("clip", &[]),
];

impl Clipboard for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        for (cmd, args) in CLIPBOARD_COMMANDS {
            if pipe_to_command(cmd, args, text) {
                debug!(tool = cmd, "copied to clipboard");
                return Ok(());
            }
        }
        Err(Error::Clipboard(
            "no clipboard tool (wl-copy, xclip, xsel, pbcopy, clip) succeeded".to_string(),
        ))
    }
}

/// Feed `text` to `cmd` on stdin. The child is always waited on.
fn pipe_to_command(cmd: &str, args: &[&str], text: &str) -> bool {
    let mut child = match Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(child) => child,
        Err(_) => return false,
    };
    let written = match child.stdin.take() {
        // Dropping stdin closes the pipe so the tool sees EOF.
        Some(mut stdin) => stdin.write_all(text.as_bytes()).is_ok(),
        None => false,
    };
    let exited_ok = child.wait().map(|s| s.success()).unwrap_or(false);
    written && exited_ok
}

/// Label state of the copy button.
///
/// Cloning shares the state, so a spawned revert task and the renderer see the same label.
#[derive(Debug, Clone)]
pub struct CopyButton {
    copied: Arc<AtomicBool>,
    presses: Arc<AtomicU64>,
    feedback: Duration,
}

impl Default for CopyButton {
    fn default() -> Self {
        Self::new(DEFAULT_FEEDBACK)
    }
}

impl CopyButton {
    pub fn new(feedback: Duration) -> Self {
        Self {
            copied: Arc::new(AtomicBool::new(false)),
            presses: Arc::new(AtomicU64::new(0)),
            feedback,
        }
    }

    pub fn label(&self) -> &'static str {
        if self.copied.load(Ordering::SeqCst) {
            COPIED_LABEL
        } else {
            COPY_LABEL
        }
    }

    pub fn feedback(&self) -> Duration {
        self.feedback
    }

    /// Show the acknowledgment label and schedule the revert.
    ///
    /// A later press supersedes the revert scheduled by an earlier one. Must be
    /// called from within a Tokio runtime.
    pub fn press(&self) -> JoinHandle<()> {
        let press = self.presses.fetch_add(1, Ordering::SeqCst) + 1;
        self.copied.store(true, Ordering::SeqCst);

        let copied = Arc::clone(&self.copied);
        let presses = Arc::clone(&self.presses);
        let feedback = self.feedback;
        tokio::spawn(async move {
            tokio::time::sleep(feedback).await;
            if presses.load(Ordering::SeqCst) == press {
                copied.store(false, Ordering::SeqCst);
            }
        })
    }
}

/// Copy `address` and flip the button label.
///
/// The label changes before the write and whether or not it succeeds; the write
/// result is returned so callers can report it. The write runs on the blocking pool
/// since platform tools are spawned and waited on.
pub async fn copy_address(
    clipboard: Arc<dyn Clipboard>,
    button: &CopyButton,
    address: String,
) -> (JoinHandle<()>, Result<()>) {
    let revert = button.press();
    let result = tokio::task::spawn_blocking(move || clipboard.write_text(&address))
        .await
        .unwrap_or_else(|err| Err(Error::Clipboard(format!("clipboard task failed: {err}"))));
    if let Err(err) = &result {
        warn!(error = %err, "failed to copy address");
    }
    (revert, result)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    /// In-memory clipboard for tests.
    #[derive(Default)]
    pub(crate) struct MemoryClipboard {
        pub(crate) contents: Mutex<Option<String>>,
        pub(crate) fail: bool,
    }

    impl Clipboard for MemoryClipboard {
        fn write_text(&self, text: &str) -> Result<()> {
            if self.fail {
                return Err(Error::Clipboard("permission denied".into()));
            }
            *self.contents.lock().unwrap() = Some(text.to_string());
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn label_reverts_after_feedback_window() {
        let clipboard = Arc::new(MemoryClipboard::default());
        let button = CopyButton::default();

        let (revert, result) =
            copy_address(clipboard.clone(), &button, "abc@barid.site".to_string()).await;
        assert!(result.is_ok());
        assert_eq!(button.label(), COPIED_LABEL);
        assert_eq!(
            clipboard.contents.lock().unwrap().as_deref(),
            Some("abc@barid.site")
        );

        tokio::time::sleep(Duration::from_millis(1499)).await;
        assert_eq!(button.label(), COPIED_LABEL);

        revert.await.unwrap();
        assert_eq!(button.label(), COPY_LABEL);
    }

    #[tokio::test(start_paused = true)]
    async fn label_changes_even_when_clipboard_fails() {
        let clipboard = Arc::new(MemoryClipboard {
            fail: true,
            ..Default::default()
        });
        let button = CopyButton::default();

        let (revert, result) =
            copy_address(clipboard, &button, "abc@barid.site".to_string()).await;
        assert!(matches!(result, Err(Error::Clipboard(_))));
        assert_eq!(button.label(), COPIED_LABEL);

        revert.await.unwrap();
        assert_eq!(button.label(), COPY_LABEL);
    }

    #[tokio::test(start_paused = true)]
    async fn second_press_extends_the_feedback() {
        let button = CopyButton::default();

        let first = button.press();
        tokio::time::sleep(Duration::from_millis(1000)).await;
        let second = button.press();

        first.await.unwrap();
        assert_eq!(button.label(), COPIED_LABEL);

        second.await.unwrap();
        assert_eq!(button.label(), COPY_LABEL);
    }

    #[cfg(unix)]
    #[test]
    fn pipe_reports_tool_outcome() {
        assert!(pipe_to_command("sh", &["-c", "cat >/dev/null"], "abc@barid.site"));
        assert!(!pipe_to_command("sh", &["-c", "exit 3"], "abc@barid.site"));
        assert!(!pipe_to_command("no-such-clipboard-tool", &[], "abc@barid.site"));
    }
}
