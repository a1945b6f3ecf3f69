use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::core::state::App;
use crate::tui::canvas::Canvas;
use crate::tui::component::Component;
use crate::tui::components::Text;
use crate::tui::layout;

/// The three long-lived components, one per region.
pub struct Screen {
    pub header: Text,
    pub body: Text,
    pub footer: Text,
}

impl Screen {
    pub fn new(app: &App) -> Self {
        Self {
            header: Text::new(app.header_text(), header_style()),
            body: Text::new("", Style::default()),
            footer: Text::new(app.footer_text(), footer_style()),
        }
    }

    /// Copy the latest app state into the components for a body of this size.
    pub fn sync(&mut self, app: &App, body: Rect) {
        self.header.set_content(app.header_text());
        self.body.set_content(app.body_text(body.height, body.width));
        self.footer.set_content(app.footer_text());
    }
}

fn header_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn footer_style() -> Style {
    Style::default().add_modifier(Modifier::REVERSED)
}

/// Draw header, body and footer, in that order, into the frame buffer.
///
/// Nothing reaches the terminal until the surrounding `Terminal::draw`
/// flushes the finished frame.
pub fn draw_ui(frame: &mut Frame, app: &App, screen: &mut Screen) {
    let regions = layout::compose(frame.area());
    screen.sync(app, regions.body);

    let buf = frame.buffer_mut();
    let parts: [(&dyn Component, Rect); 3] = [
        (&screen.header, regions.header),
        (&screen.body, regions.body),
        (&screen.footer, regions.footer),
    ];
    for (component, area) in parts {
        component.draw(&mut Canvas::new(buf, area));
    }
}
