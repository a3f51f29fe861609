//! Incremental notification renderer
//!
//! One full-screen pass draws the static chrome at startup; after that
//! every dequeued notification costs exactly one partial-window refresh.
//! Rendering is best-effort: a driver error propagates to the caller for
//! logging and leaves the scroll cursor where it was.

use core::fmt::Write;

use heapless::String;

use tidings_protocol::notification::{MESSAGE_CAPACITY, TITLE_CAPACITY};
use tidings_protocol::Notification;

use crate::display::{Color, DisplayDriver, DisplayError, Font};
use crate::layout::{FeedCursor, FeedGeometry};

/// Caption drawn in the header bar.
const HEADER_CAPTION: &str = "Notifications:";
/// Static clock text; there is no time source on the board yet.
const CLOCK_PLACEHOLDER: &str = "12:23 PM";
/// Static timer caption; the timer feature is a placeholder.
const TIMER_PLACEHOLDER: &str = "Timer: 20 min";

/// Upper bound of one rendered line: title, separator, message.
const LINE_CAPACITY: usize = TITLE_CAPACITY + 2 + MESSAGE_CAPACITY;

/// Draws the notification feed onto a [`DisplayDriver`]
///
/// Owns the display and the scroll cursor; one instance lives in the
/// render task for the whole process lifetime.
pub struct FeedRenderer<D: DisplayDriver> {
    display: D,
    cursor: FeedCursor,
}

impl<D: DisplayDriver> FeedRenderer<D> {
    /// Create a renderer with the default board geometry
    pub fn new(display: D) -> Self {
        Self::with_geometry(display, FeedGeometry::DEFAULT)
    }

    /// Create a renderer with an explicit geometry
    pub fn with_geometry(display: D, geometry: FeedGeometry) -> Self {
        Self {
            display,
            cursor: FeedCursor::new(geometry),
        }
    }

    /// One-time full-screen pass: header bar, clock and timer placeholders
    ///
    /// Not part of the per-notification cycle; call it once before the
    /// poll loop starts.
    pub fn draw_chrome(&mut self) -> Result<(), DisplayError> {
        let width = self.display.width();
        let height = self.display.height();
        let header_height = self.cursor.geometry().header_height;

        self.display.set_full_window();
        self.display.first_page()?;
        loop {
            self.display.fill_screen(Color::White);

            // Header bar
            self.display.fill_rect(0, 0, width, header_height, Color::Black);
            self.display.set_text_color(Color::White);
            self.display.set_font(Font::Bold);
            self.display.set_cursor(10, 28);
            self.display.print(HEADER_CAPTION);

            // Footer strip
            self.display.set_text_color(Color::Black);
            self.display.set_font(Font::Regular);
            self.display.set_cursor(width.saturating_sub(140), height.saturating_sub(40));
            self.display.print(CLOCK_PLACEHOLDER);
            self.display.set_cursor(20, height.saturating_sub(40));
            self.display.print(TIMER_PLACEHOLDER);

            if !self.display.next_page()? {
                break;
            }
        }
        Ok(())
    }

    /// Draw one notification into the next partial window
    ///
    /// Formats the record as a single `title: message` line, clears only
    /// the window it lands in, and advances the cursor once the page loop
    /// has completed. A failed draw leaves the cursor untouched so the
    /// slot is reused.
    pub fn draw_notification(&mut self, notification: &Notification) -> Result<(), DisplayError> {
        let mut line: String<LINE_CAPACITY> = String::new();
        let _ = write!(line, "{}: {}", notification.title, notification.message);

        let placement = self
            .cursor
            .place(self.display.width(), self.display.height());
        let window = placement.window;

        self.display
            .set_partial_window(window.x, window.y, window.width, window.height);
        self.display.first_page()?;
        loop {
            self.display
                .fill_rect(window.x, window.y, window.width, window.height, Color::White);
            self.display.set_text_color(Color::Black);
            self.display.set_font(Font::Bold);
            self.display.set_cursor(placement.text_x, placement.text_y);
            self.display.print(&line);

            if !self.display.next_page()? {
                break;
            }
        }

        self.cursor.commit(&placement);
        Ok(())
    }
}
