//! # TUI Components
//!
//! Everything here implements [`Component`](crate::tui::component::Component)
//! and is drawn through a [`Canvas`](crate::tui::canvas::Canvas).
//!
//! - `Text`: a static or streamed block of text, used for the header, the
//!   body and the footer.

mod text;
pub use text::Text;
