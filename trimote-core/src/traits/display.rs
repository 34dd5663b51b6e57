//! Display sink trait

use crate::view::DisplayView;

/// Renders the controller's screen
///
/// Called only when a redraw is due. Implementations must not block the
/// controller loop.
pub trait DisplaySink {
    fn render(&mut self, view: &DisplayView<'_>);
}
