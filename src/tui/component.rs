use super::canvas::Canvas;

/// A reusable UI component.
///
/// Components hold their own content and style but never their geometry:
/// the caller hands them a [`Canvas`] sized for the current frame, so the
/// same component can be drawn at any size after a resize.
///
/// The event loop only sees `&dyn Component`, so new kinds of component can
/// be added without touching it.
pub trait Component {
    /// Paint the whole canvas. Must depend only on the component's content,
    /// style and the canvas dimensions.
    fn draw(&self, canvas: &mut Canvas);

    /// Whether this component can take keyboard focus.
    fn focusable(&self) -> bool {
        false
    }
}
