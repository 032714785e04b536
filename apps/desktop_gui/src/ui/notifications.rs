//! Transient notification tray: auto-dismiss after a fixed lifetime, with
//! manual dismissal and per-card entry animation.

use std::time::{Duration, Instant};

use motion::{MotionConfig, Spring, SPRING_SNAPPY};

pub const NOTIFICATION_LIFETIME: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    born: Instant,
    reveal: Spring,
}

impl Notification {
    pub fn reveal(&self) -> f32 {
        self.reveal.value().clamp(0.0, 1.0)
    }
}

pub struct NotificationTray {
    entries: Vec<Notification>,
    next_id: u64,
}

impl NotificationTray {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    pub fn push(&mut self, kind: NotificationKind, message: impl Into<String>, now: Instant) {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Notification {
            id,
            kind,
            message: normalize_message(&message.into()),
            born: now,
            reveal: Spring::new(0.0, 1.0, SPRING_SNAPPY),
        });
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|entry| entry.id != id);
    }

    /// Drop expired entries and advance reveal springs.
    pub fn tick(&mut self, now: Instant, dt: f32, config: &MotionConfig) {
        self.entries
            .retain(|entry| now.duration_since(entry.born) < NOTIFICATION_LIFETIME);
        for entry in &mut self.entries {
            if config.reduced_motion {
                entry.reveal.snap_to_target();
            } else {
                entry.reveal.tick(dt);
            }
        }
    }

    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    pub fn is_animating(&self) -> bool {
        self.entries.iter().any(|entry| !entry.reveal.is_at_rest())
    }
}

/// Server error payloads arrive in several shapes: plain text, a JSON
/// string, or a `{"message": ...}` object. Collapse them all to the text.
pub fn normalize_message(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        if let Some(text) = value.as_str() {
            return text.to_string();
        }
        if let Some(text) = value.get("message").and_then(|m| m.as_str()) {
            return text.to_string();
        }
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_every_payload_shape_to_plain_text() {
        assert_eq!(normalize_message("plain failure"), "plain failure");
        assert_eq!(normalize_message("\"quoted failure\""), "quoted failure");
        assert_eq!(
            normalize_message(r#"{"message": "wrapped failure"}"#),
            "wrapped failure"
        );
        assert_eq!(
            normalize_message(r#"{"error": "other shape"}"#),
            r#"{"error": "other shape"}"#
        );
    }

    #[test]
    fn entries_expire_after_their_lifetime() {
        let start = Instant::now();
        let config = MotionConfig::new(true);
        let mut tray = NotificationTray::new();
        tray.push(NotificationKind::Info, "saved", start);
        tray.tick(start + Duration::from_millis(2_900), 0.016, &config);
        assert_eq!(tray.entries().len(), 1);
        tray.tick(start + Duration::from_millis(3_001), 0.016, &config);
        assert!(tray.entries().is_empty());
    }

    #[test]
    fn manual_dismissal_removes_only_the_target() {
        let now = Instant::now();
        let config = MotionConfig::new(true);
        let mut tray = NotificationTray::new();
        tray.push(NotificationKind::Success, "one", now);
        tray.push(NotificationKind::Error, "two", now);
        let first = tray.entries()[0].id;
        tray.dismiss(first);
        assert_eq!(tray.entries().len(), 1);
        assert_eq!(tray.entries()[0].message, "two");
        tray.tick(now, 0.016, &config);
        assert_eq!(tray.entries()[0].reveal(), 1.0);
    }
}
