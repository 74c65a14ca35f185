#![forbid(unsafe_code)]

//! Soft keyboard bridge.
//!
//! The overlay text-entry widget runs on its own asynchronous channel inside
//! the OS. The bridge owns the session, pumps it once per frame, and turns
//! committed text into a replay buffer the input reconciler drains one byte
//! per pump, as if the characters were physical key presses.
//!
//! Failure policy: any overlay update failure marks the bridge permanently
//! unavailable for the rest of the session. `show`/`hide` become no-ops;
//! nothing is retried and nothing propagates to the client.

use std::sync::mpsc::Receiver;

use padframe_core::event::KeyboardReply;
use padframe_core::platform::{KeyboardConfig, KeyboardOverlay, Platform};

/// Bridge between the overlay session and the input reconciler.
#[derive(Debug)]
pub struct SoftKeyboardBridge<K: KeyboardOverlay> {
    overlay: Option<K>,
    replies: Option<Receiver<KeyboardReply>>,
    config: KeyboardConfig,
    open: bool,
    pending: Vec<u8>,
    cursor: Option<usize>,
}

impl<K: KeyboardOverlay> SoftKeyboardBridge<K> {
    /// Create the bridge by launching an overlay session on the platform.
    ///
    /// When the platform reports no keyboard support the bridge is created
    /// unavailable and every operation degrades to a no-op.
    pub fn new<P: Platform<Keyboard = K>>(platform: &mut P, config: KeyboardConfig) -> Self {
        let session = platform.create_keyboard();
        if session.is_none() {
            tracing::info!("soft keyboard unavailable");
        }
        let (overlay, replies) = match session {
            Some((overlay, replies)) => (Some(overlay), Some(replies)),
            None => (None, None),
        };
        Self {
            overlay,
            replies,
            config,
            open: false,
            pending: Vec::new(),
            cursor: None,
        }
    }

    /// Whether the overlay subsystem is usable. Set once at init, cleared
    /// permanently on the first update failure.
    #[must_use]
    pub fn available(&self) -> bool {
        self.overlay.is_some()
    }

    /// Whether the overlay is currently shown. While open, the overlay owns
    /// input focus and hardware input is suppressed.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Show the overlay: clear prior input, reset the cursor, pump once,
    /// then start the appear transition.
    pub fn show(&mut self) {
        let Some(overlay) = self.overlay.as_mut() else {
            return;
        };
        overlay.set_input_text("");
        overlay.set_cursor(0);
        if overlay.update().is_err() {
            self.tear_down();
            return;
        }
        let Some(overlay) = self.overlay.as_mut() else {
            return;
        };
        overlay.appear(&self.config);
        self.open = true;
    }

    /// Hide the overlay. Marks it closed immediately; the disappear
    /// animation finishes on its own.
    pub fn hide(&mut self) {
        let Some(overlay) = self.overlay.as_mut() else {
            return;
        };
        overlay.disappear();
        self.open = false;
    }

    /// Per-frame service: pump the overlay and drain completions.
    ///
    /// An update failure tears the bridge down for the rest of the session.
    pub fn pump(&mut self) {
        if let Some(overlay) = self.overlay.as_mut() {
            if overlay.update().is_err() {
                self.tear_down();
                return;
            }
        }
        self.drain_replies();
    }

    /// Next byte of committed text, one per call. `None` when the buffer is
    /// drained; reaching the end resets the replay cursor.
    pub fn next_char(&mut self) -> Option<u8> {
        let position = self.cursor?;
        match self.pending.get(position) {
            Some(&byte) => {
                self.cursor = Some(position + 1);
                Some(byte)
            }
            None => {
                self.cursor = None;
                None
            }
        }
    }

    /// Close the overlay session (window teardown).
    pub fn shutdown(&mut self) {
        self.overlay = None;
        self.replies = None;
        self.open = false;
    }

    fn drain_replies(&mut self) {
        let Some(replies) = self.replies.as_ref() else {
            return;
        };
        while let Ok(reply) = replies.try_recv() {
            match reply {
                KeyboardReply::Submitted(text) => {
                    let limit = self.config.max_text_len.saturating_sub(1);
                    let bytes = text.as_bytes();
                    if bytes.len() > limit {
                        tracing::warn!(
                            len = bytes.len(),
                            limit,
                            "committed text truncated to overlay limit"
                        );
                    }
                    let take = bytes.len().min(limit);
                    self.pending.clear();
                    self.pending.extend_from_slice(&bytes[..take]);
                    self.cursor = Some(0);
                    self.open = false;
                }
                KeyboardReply::Cancelled => {
                    self.open = false;
                }
            }
        }
    }

    fn tear_down(&mut self) {
        tracing::warn!("keyboard overlay update failed; disabling for the session");
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.disappear();
        }
        self.overlay = None;
        self.replies = None;
        self.open = false;
    }
}
