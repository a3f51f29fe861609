//! SPI adapter for the 3.97" 800x272 e-paper panel
//!
//! Implements the core `DisplayDriver` trait against an SSD1677-class
//! controller. The full 1-bpp frame stays in RAM, so the paged interface
//! collapses to a single page per window: `first_page` makes sure the
//! controller is initialized and `next_page` flushes the selected window
//! and starts the refresh. Text is rasterized into the frame with
//! embedded-graphics mono fonts.

use embassy_nrf::gpio::{Input, Output};
use embassy_nrf::peripherals::SPI3;
use embassy_nrf::spim::Spim;
use embassy_time::{block_for, Duration, Instant};
use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_9X18};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;

use tidings_core::{Color, DisplayDriver, DisplayError, Font};

/// Panel width in pixels
pub const EPD_WIDTH: u16 = 800;
/// Panel height in pixels
pub const EPD_HEIGHT: u16 = 272;
/// Size of one full 1-bpp frame
pub const FRAME_BYTES: usize = (EPD_WIDTH as usize / 8) * EPD_HEIGHT as usize;

const ROW_BYTES: usize = EPD_WIDTH as usize / 8;

// Controller commands (SSD1677 family)
const CMD_DRIVER_CONTROL: u8 = 0x01;
const CMD_DATA_ENTRY: u8 = 0x11;
const CMD_SW_RESET: u8 = 0x12;
const CMD_TEMP_SENSOR: u8 = 0x18;
const CMD_MASTER_ACTIVATE: u8 = 0x20;
const CMD_UPDATE_CONTROL: u8 = 0x22;
const CMD_WRITE_RAM: u8 = 0x24;
const CMD_BORDER_WAVEFORM: u8 = 0x3C;
const CMD_RAM_X_RANGE: u8 = 0x44;
const CMD_RAM_Y_RANGE: u8 = 0x45;
const CMD_RAM_X_COUNTER: u8 = 0x4E;
const CMD_RAM_Y_COUNTER: u8 = 0x4F;

// Update sequences for CMD_UPDATE_CONTROL
const UPDATE_FULL: u8 = 0xF7;
const UPDATE_PARTIAL: u8 = 0xFF;

/// How long the busy line may stay asserted before the draw fails
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone, Copy)]
struct Rect {
    x: u16,
    y: u16,
    width: u16,
    height: u16,
}

/// Driver for the GDEM0397-class panel over SPI
pub struct Epd397 {
    spi: Spim<'static, SPI3>,
    dc: Output<'static>,
    rst: Output<'static>,
    busy: Input<'static>,
    frame: &'static mut [u8; FRAME_BYTES],
    window: Rect,
    full_window: bool,
    initialized: bool,
    font: Font,
    text_color: Color,
    cursor: Point,
}

impl Epd397 {
    /// Wrap the SPI bus, control pins and a statically allocated frame
    pub fn new(
        spi: Spim<'static, SPI3>,
        dc: Output<'static>,
        rst: Output<'static>,
        busy: Input<'static>,
        frame: &'static mut [u8; FRAME_BYTES],
    ) -> Self {
        Self {
            spi,
            dc,
            rst,
            busy,
            frame,
            window: Rect {
                x: 0,
                y: 0,
                width: EPD_WIDTH,
                height: EPD_HEIGHT,
            },
            full_window: true,
            initialized: false,
            font: Font::Bold,
            text_color: Color::Black,
            cursor: Point::zero(),
        }
    }

    fn set_pixel(&mut self, x: u16, y: u16, dark: bool) {
        if x >= EPD_WIDTH || y >= EPD_HEIGHT {
            return;
        }
        let index = y as usize * ROW_BYTES + x as usize / 8;
        let mask = 0x80 >> (x % 8);
        // RAM convention: 1 = white, 0 = black
        if dark {
            self.frame[index] &= !mask;
        } else {
            self.frame[index] |= mask;
        }
    }

    fn command(&mut self, command: u8) -> Result<(), DisplayError> {
        self.dc.set_low();
        self.spi
            .blocking_write(&[command])
            .map_err(|_| DisplayError::Bus)
    }

    fn data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        self.dc.set_high();
        self.spi.blocking_write(data).map_err(|_| DisplayError::Bus)
    }

    fn command_data(&mut self, command: u8, data: &[u8]) -> Result<(), DisplayError> {
        self.command(command)?;
        self.data(data)
    }

    fn wait_idle(&mut self) -> Result<(), DisplayError> {
        let deadline = Instant::now() + BUSY_TIMEOUT;
        while self.busy.is_high() {
            if Instant::now() > deadline {
                return Err(DisplayError::BusyTimeout);
            }
            block_for(Duration::from_millis(1));
        }
        Ok(())
    }

    fn hardware_reset(&mut self) -> Result<(), DisplayError> {
        self.rst.set_low();
        block_for(Duration::from_millis(10));
        self.rst.set_high();
        block_for(Duration::from_millis(10));
        self.wait_idle()
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        self.hardware_reset()?;
        self.command(CMD_SW_RESET)?;
        self.wait_idle()?;

        let gates = EPD_HEIGHT - 1;
        self.command_data(CMD_DRIVER_CONTROL, &[gates as u8, (gates >> 8) as u8, 0x00])?;
        // X and Y increment
        self.command_data(CMD_DATA_ENTRY, &[0x03])?;
        self.command_data(CMD_BORDER_WAVEFORM, &[0x01])?;
        // Internal temperature sensor
        self.command_data(CMD_TEMP_SENSOR, &[0x80])?;
        self.wait_idle()
    }

    /// Push the selected window's frame rows to controller RAM and start
    /// the refresh
    fn flush(&mut self) -> Result<(), DisplayError> {
        let window = self.window;
        if window.width == 0 || window.height == 0 {
            return Ok(());
        }

        // X registers are byte-addressed; set_partial_window already
        // widened the window to byte boundaries.
        let x_start = window.x / 8;
        let x_end = (window.x + window.width - 1) / 8;
        let y_start = window.y;
        let y_end = window.y + window.height - 1;

        self.command_data(CMD_RAM_X_RANGE, &[x_start as u8, x_end as u8])?;
        self.command_data(
            CMD_RAM_Y_RANGE,
            &[
                y_start as u8,
                (y_start >> 8) as u8,
                y_end as u8,
                (y_end >> 8) as u8,
            ],
        )?;
        self.command_data(CMD_RAM_X_COUNTER, &[x_start as u8])?;
        self.command_data(CMD_RAM_Y_COUNTER, &[y_start as u8, (y_start >> 8) as u8])?;

        self.command(CMD_WRITE_RAM)?;
        let row_len = (x_end - x_start + 1) as usize;
        let mut row_buf = [0u8; ROW_BYTES];
        for row in y_start..=y_end {
            let offset = row as usize * ROW_BYTES + x_start as usize;
            row_buf[..row_len].copy_from_slice(&self.frame[offset..offset + row_len]);
            self.data(&row_buf[..row_len])?;
        }

        let mode = if self.full_window {
            UPDATE_FULL
        } else {
            UPDATE_PARTIAL
        };
        self.command_data(CMD_UPDATE_CONTROL, &[mode])?;
        self.command(CMD_MASTER_ACTIVATE)?;
        self.wait_idle()
    }
}

impl DisplayDriver for Epd397 {
    fn width(&self) -> u16 {
        EPD_WIDTH
    }

    fn height(&self) -> u16 {
        EPD_HEIGHT
    }

    fn set_full_window(&mut self) {
        self.window = Rect {
            x: 0,
            y: 0,
            width: EPD_WIDTH,
            height: EPD_HEIGHT,
        };
        self.full_window = true;
    }

    fn set_partial_window(&mut self, x: u16, y: u16, width: u16, height: u16) {
        let x0 = x.min(EPD_WIDTH);
        let y0 = y.min(EPD_HEIGHT);
        let x1 = x.saturating_add(width).min(EPD_WIDTH);
        let y1 = y.saturating_add(height).min(EPD_HEIGHT);

        // Widen to byte boundaries in X; controller RAM has no sub-byte
        // addressing.
        let x0 = x0 & !7;
        let x1 = (x1 + 7) & !7;

        self.window = Rect {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1.saturating_sub(y0),
        };
        self.full_window = false;
    }

    fn first_page(&mut self) -> Result<(), DisplayError> {
        if !self.initialized {
            self.init()?;
            self.initialized = true;
        }
        Ok(())
    }

    fn next_page(&mut self) -> Result<bool, DisplayError> {
        self.flush()?;
        Ok(false)
    }

    fn fill_screen(&mut self, color: Color) {
        let byte = match color {
            Color::White => 0xFF,
            Color::Black => 0x00,
        };
        self.frame.fill(byte);
    }

    fn fill_rect(&mut self, x: u16, y: u16, width: u16, height: u16, color: Color) {
        let dark = matches!(color, Color::Black);
        let x1 = x.saturating_add(width).min(EPD_WIDTH);
        let y1 = y.saturating_add(height).min(EPD_HEIGHT);
        for row in y..y1 {
            for col in x..x1 {
                self.set_pixel(col, row, dark);
            }
        }
    }

    fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    fn set_text_color(&mut self, color: Color) {
        self.text_color = color;
    }

    fn set_cursor(&mut self, x: u16, y: u16) {
        self.cursor = Point::new(x as i32, y as i32);
    }

    fn print(&mut self, text: &str) {
        let font: &MonoFont = match self.font {
            Font::Bold => &FONT_10X20,
            Font::Regular => &FONT_9X18,
        };
        let color = match self.text_color {
            Color::Black => BinaryColor::On,
            Color::White => BinaryColor::Off,
        };
        let style = MonoTextStyle::new(font, color);
        let position = self.cursor;
        // Infallible: drawing targets the in-RAM frame
        let _ = Text::new(text, position, style).draw(self);
    }
}

impl OriginDimensions for Epd397 {
    fn size(&self) -> Size {
        Size::new(EPD_WIDTH as u32, EPD_HEIGHT as u32)
    }
}

impl DrawTarget for Epd397 {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if (0..EPD_WIDTH as i32).contains(&point.x) && (0..EPD_HEIGHT as i32).contains(&point.y)
            {
                self.set_pixel(point.x as u16, point.y as u16, color == BinaryColor::On);
            }
        }
        Ok(())
    }
}
