//! Display driver trait for the e-paper panel
//!
//! The renderer issues a bounded sequence of these calls per draw and
//! trusts the adapter to run the physical refresh. The adapter keeps a
//! paged interface in the style of e-paper libraries: select a window,
//! then loop drawing pages until [`DisplayDriver::next_page`] reports
//! completion.

/// Errors that can occur talking to the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// SPI transfer failed
    Bus,
    /// The panel's busy line never released
    BusyTimeout,
}

/// Panel colors; the target hardware is monochrome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    White,
    Black,
}

/// Fonts the renderer selects; the adapter maps them to real glyph sets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Font {
    /// Heading weight, used for the header caption and notification lines
    Bold,
    /// Body weight, used for the footer placeholders
    Regular,
}

/// Trait for the e-paper display adapter
///
/// Draw operations target the adapter's in-memory frame and cannot fail;
/// only the page boundaries touch the bus. Coordinates are in pixels with
/// the origin at the top-left; `set_cursor` positions the text baseline.
pub trait DisplayDriver {
    /// Panel width in pixels
    fn width(&self) -> u16;

    /// Panel height in pixels
    fn height(&self) -> u16;

    /// Select the whole panel as the refresh region
    fn set_full_window(&mut self);

    /// Select a sub-rectangle as the refresh region
    fn set_partial_window(&mut self, x: u16, y: u16, width: u16, height: u16);

    /// Begin the page loop for the selected window
    fn first_page(&mut self) -> Result<(), DisplayError>;

    /// Flush the current page; returns `true` while more pages remain
    fn next_page(&mut self) -> Result<bool, DisplayError>;

    /// Fill the selected window with one color
    fn fill_screen(&mut self, color: Color);

    /// Fill a rectangle
    fn fill_rect(&mut self, x: u16, y: u16, width: u16, height: u16, color: Color);

    /// Select the font for subsequent prints
    fn set_font(&mut self, font: Font);

    /// Select the text color for subsequent prints
    fn set_text_color(&mut self, color: Color);

    /// Move the text baseline
    fn set_cursor(&mut self, x: u16, y: u16);

    /// Draw text at the cursor; no wrapping, overflow is cut by the panel
    /// edge
    fn print(&mut self, text: &str);
}
