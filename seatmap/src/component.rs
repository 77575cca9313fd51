//! Component trait for pure UI elements

use ratatui::{layout::Rect, Frame};
use seatmap_core::{EventKind, SessionAction};

/// A pure UI component that renders based on props and emits actions
///
/// Components follow these rules:
/// 1. Props contain ALL read-only data needed for rendering
/// 2. `handle_event` returns actions, never mutates session state
/// 3. `render` is a pure function of props (plus internal UI state like the
///    keyboard cursor or the last hit-test grid)
///
/// # Example
///
/// ```ignore
/// struct Legend;
///
/// impl Component for Legend {
///     type Props<'a> = ();
///
///     fn render(&mut self, frame: &mut Frame, area: Rect, _props: Self::Props<'_>) {
///         frame.render_widget(Paragraph::new("○ available  ● selected"), area);
///     }
/// }
/// ```
pub trait Component<A = SessionAction> {
    /// Data required to render the component (read-only)
    type Props<'a>;

    /// Handle an event and return actions to dispatch
    ///
    /// Returns any type implementing `IntoIterator<Item = A>`:
    /// - `None` - no actions (most common)
    /// - `Some(action)` - single action
    /// - `vec![...]` - multiple actions
    ///
    /// Default implementation returns no actions (render-only components).
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    /// Render the component to the frame
    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
