//! Skip redraws when nothing on screen changed.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::core::GameSnapshot;

/// Stable-within-process hash of everything the view draws.
pub fn fingerprint(snap: &GameSnapshot) -> u64 {
    let mut hasher = DefaultHasher::new();
    snap.hash(&mut hasher);
    hasher.finish()
}

#[derive(Debug, Clone)]
pub struct RenderThrottle {
    min_static_interval_ms: u64,
    last_render_ms: u64,
    last_fingerprint: u64,
    has_rendered: bool,
}

impl RenderThrottle {
    pub fn new(min_static_interval_ms: u64) -> Self {
        Self {
            min_static_interval_ms,
            last_render_ms: 0,
            last_fingerprint: 0,
            has_rendered: false,
        }
    }

    /// Render immediately when the fingerprint changed, otherwise at most
    /// once per `min_static_interval_ms` so a resized or scribbled-over
    /// terminal still heals.
    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64) -> bool {
        let due = !self.has_rendered
            || fingerprint != self.last_fingerprint
            || now_ms.saturating_sub(self.last_render_ms) >= self.min_static_interval_ms;
        if due {
            self.has_rendered = true;
            self.last_render_ms = now_ms;
            self.last_fingerprint = fingerprint;
        }
        due
    }

    /// Force the next call to render.
    pub fn reset(&mut self) {
        self.has_rendered = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameSession;

    #[test]
    fn first_frame_always_renders() {
        let mut t = RenderThrottle::new(1_000);
        assert!(t.should_render(0, 7));
    }

    #[test]
    fn unchanged_frames_are_throttled() {
        let mut t = RenderThrottle::new(1_000);
        assert!(t.should_render(0, 7));
        assert!(!t.should_render(16, 7));
        assert!(!t.should_render(999, 7));
        assert!(t.should_render(1_000, 7));
    }

    #[test]
    fn changed_fingerprint_renders_immediately() {
        let mut t = RenderThrottle::new(1_000);
        assert!(t.should_render(0, 7));
        assert!(t.should_render(1, 8));
    }

    #[test]
    fn reset_forces_render() {
        let mut t = RenderThrottle::new(1_000);
        assert!(t.should_render(0, 7));
        t.reset();
        assert!(t.should_render(1, 7));
    }

    #[test]
    fn fingerprint_tracks_game_changes() {
        let mut session = GameSession::new(11);
        session.start();
        let before = fingerprint(&session.snapshot());
        assert_eq!(before, fingerprint(&session.snapshot()));

        session.hard_drop();
        assert_ne!(before, fingerprint(&session.snapshot()));
    }
}
