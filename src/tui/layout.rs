//! Header / body / footer split of the terminal area.
//!
//! Pure geometry, recomputed from the frame area on every draw. Small
//! terminals degrade by giving rows to the header first, then the footer,
//! and the body gets whatever is left (possibly nothing).

use ratatui::layout::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regions {
    pub header: Rect,
    pub body: Rect,
    pub footer: Rect,
}

pub fn compose(area: Rect) -> Regions {
    let Rect {
        x,
        y,
        width,
        height,
    } = area;

    let header_height = height.min(1);
    let footer_height = if height >= 2 { 1 } else { 0 };
    let body_height = height.saturating_sub(2);

    Regions {
        header: Rect::new(x, y, width, header_height),
        body: Rect::new(x, y + header_height, width, body_height),
        footer: Rect::new(x, y + height - footer_height, width, footer_height),
    }
}
