// SPDX-License-Identifier: MIT
//
// System clipboard access.
//
// `arboard` needs a display connection on Linux, which is absent over
// plain SSH. The handle is created once and tolerates failure: copy
// attempts then report the error to the toast line instead of killing
// the app.

use anyhow::{Context, anyhow};

/// Lazily-connected system clipboard.
pub struct Clipboard {
    inner: Option<arboard::Clipboard>,
}

impl Clipboard {
    /// Connect to the system clipboard. A failed connection is logged
    /// and remembered; the handle stays usable.
    #[must_use]
    pub fn new() -> Self {
        let inner = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(err) => {
                log::warn!("clipboard unavailable: {err}");
                None
            }
        };
        Self { inner }
    }

    /// True if the clipboard connection is live.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.inner.is_some()
    }

    /// Place `text` on the system clipboard.
    ///
    /// # Errors
    ///
    /// Fails when no clipboard connection exists or the write is
    /// rejected by the windowing system.
    pub fn copy(&mut self, text: &str) -> anyhow::Result<()> {
        self.inner
            .as_mut()
            .ok_or_else(|| anyhow!("no clipboard available"))?
            .set_text(text)
            .context("writing to clipboard")
    }
}

impl Default for Clipboard {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
