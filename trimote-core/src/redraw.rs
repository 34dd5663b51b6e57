//! Redraw coalescing
//!
//! Every state change requests a redraw; the main loop consumes the request
//! at most once per iteration, so any number of changes between two polls
//! cost a single repaint. Main-loop only; not shared with the tick source.

/// Sticky "screen is stale" flag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RedrawFlag {
    pending: bool,
}

impl RedrawFlag {
    /// Flag with a redraw already pending (first paint)
    pub const fn pending() -> Self {
        Self { pending: true }
    }

    /// Request a redraw; repeated requests collapse into one
    pub fn request(&mut self) {
        self.pending = true;
    }

    /// Returns true once per pending period and clears it
    pub fn consume_if_pending(&mut self) -> bool {
        core::mem::replace(&mut self.pending, false)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requests_coalesce() {
        let mut flag = RedrawFlag::default();
        flag.request();
        flag.request();
        flag.request();

        assert!(flag.consume_if_pending());
        assert!(!flag.consume_if_pending());

        flag.request();
        assert!(flag.consume_if_pending());
    }

    #[test]
    fn test_starts_pending_for_first_paint() {
        let mut flag = RedrawFlag::pending();
        assert!(flag.is_pending());
        assert!(flag.consume_if_pending());
        assert!(!flag.is_pending());
    }

    #[test]
    fn test_idle_flag_never_fires() {
        let mut flag = RedrawFlag::default();
        assert!(!flag.consume_if_pending());
    }
}
