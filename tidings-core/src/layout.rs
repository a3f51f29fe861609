//! Scroll layout for the notification feed
//!
//! Notifications stack downwards between the header bar and the reserved
//! footer strip. [`FeedCursor`] tracks where the next line goes; when the
//! remaining space runs out it wraps back to the top of the content region
//! instead of scrolling pixels, which keeps every refresh a small partial
//! window. Placement is a pure computation so the cursor only moves once a
//! draw actually succeeded.

/// Fixed feed geometry in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FeedGeometry {
    /// Height of the black header bar; also the top of the content region
    pub header_height: u16,
    /// Strip above the bottom edge kept free for the clock and timer
    pub footer_reserve: u16,
    /// Indent of the notification text
    pub left_margin: u16,
    /// Distance from the window top to the text baseline
    pub baseline_offset: u16,
    /// Vertical pitch of one text line
    pub line_height: u16,
    /// Height of one notification's refresh window
    pub box_height: u16,
}

impl FeedGeometry {
    /// Geometry of the 800x272 board layout
    pub const DEFAULT: Self = Self {
        header_height: 40,
        footer_reserve: 60,
        left_margin: 20,
        baseline_offset: 25,
        line_height: 30,
        box_height: 30,
    };
}

impl Default for FeedGeometry {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A refresh rectangle on the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Window {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

/// Where one notification goes: its refresh window and text baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Placement {
    pub window: Window,
    pub text_x: u16,
    pub text_y: u16,
}

/// Vertical write position of the feed
///
/// Owned exclusively by the render context; nothing else reads or writes
/// it, so it needs no synchronization.
#[derive(Debug, Clone)]
pub struct FeedCursor {
    geometry: FeedGeometry,
    cursor_y: u16,
}

impl FeedCursor {
    /// Start a fresh feed at the top of the content region
    pub fn new(geometry: FeedGeometry) -> Self {
        let cursor_y = geometry.header_height;
        Self { geometry, cursor_y }
    }

    /// The geometry this cursor lays out against
    pub fn geometry(&self) -> &FeedGeometry {
        &self.geometry
    }

    /// Current vertical position
    pub fn cursor_y(&self) -> u16 {
        self.cursor_y
    }

    /// Compute the placement for the next notification
    ///
    /// If no room remains above the footer the placement wraps back to the
    /// top of the content region. The returned window height is always
    /// strictly positive and never reaches into the footer strip. The
    /// cursor itself is untouched; call [`FeedCursor::commit`] after the
    /// draw succeeded.
    ///
    /// The content region must fit at least one line, i.e.
    /// `header_height < screen_height - footer_reserve`.
    pub fn place(&self, screen_width: u16, screen_height: u16) -> Placement {
        let limit = screen_height.saturating_sub(self.geometry.footer_reserve);
        debug_assert!(
            self.geometry.header_height < limit,
            "content region must fit at least one line"
        );

        let y = if self.cursor_y >= limit {
            self.geometry.header_height
        } else {
            self.cursor_y
        };
        let height = (limit - y).min(self.geometry.box_height);

        Placement {
            window: Window {
                x: 0,
                y,
                width: screen_width,
                height,
            },
            text_x: self.geometry.left_margin,
            text_y: y + self.geometry.baseline_offset,
        }
    }

    /// Advance past a drawn notification: one line plus one line of
    /// inter-item spacing
    pub fn commit(&mut self, placement: &Placement) {
        self.cursor_y = placement.window.y + 2 * self.geometry.line_height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SCREEN_W: u16 = 800;
    const SCREEN_H: u16 = 272;

    #[test]
    fn test_first_placement_at_top_of_content() {
        let cursor = FeedCursor::new(FeedGeometry::DEFAULT);
        let placement = cursor.place(SCREEN_W, SCREEN_H);

        assert_eq!(placement.window, Window { x: 0, y: 40, width: 800, height: 30 });
        assert_eq!(placement.text_x, 20);
        assert_eq!(placement.text_y, 65);
    }

    #[test]
    fn test_commit_advances_two_lines() {
        let mut cursor = FeedCursor::new(FeedGeometry::DEFAULT);
        let placement = cursor.place(SCREEN_W, SCREEN_H);
        cursor.commit(&placement);
        assert_eq!(cursor.cursor_y(), 100);

        let placement = cursor.place(SCREEN_W, SCREEN_H);
        assert_eq!(placement.window.y, 100);
    }

    #[test]
    fn test_wrap_when_footer_reached() {
        let mut cursor = FeedCursor::new(FeedGeometry::DEFAULT);
        // Three placements fit between y=40 and the footer at y=212.
        for expected_y in [40, 100, 160] {
            let placement = cursor.place(SCREEN_W, SCREEN_H);
            assert_eq!(placement.window.y, expected_y);
            cursor.commit(&placement);
        }

        // The fourth would start at 220, past the limit, so it wraps.
        assert_eq!(cursor.cursor_y(), 220);
        let placement = cursor.place(SCREEN_W, SCREEN_H);
        assert_eq!(placement.window.y, 40);
        assert_eq!(placement.window.height, 30);
    }

    #[test]
    fn test_place_without_commit_is_stable() {
        let cursor = FeedCursor::new(FeedGeometry::DEFAULT);
        let first = cursor.place(SCREEN_W, SCREEN_H);
        let second = cursor.place(SCREEN_W, SCREEN_H);
        assert_eq!(first, second);
    }

    #[test]
    fn test_window_clamped_near_footer() {
        // A short screen where the last slot is narrower than box_height.
        let mut cursor = FeedCursor::new(FeedGeometry::DEFAULT);
        let placement = cursor.place(SCREEN_W, 125);
        // limit = 65, so only 25 rows remain below y=40.
        assert_eq!(placement.window.height, 25);
        cursor.commit(&placement);

        // Wrapped placement is identical: the cursor is past the limit.
        let placement = cursor.place(SCREEN_W, 125);
        assert_eq!(placement.window.y, 40);
    }

    proptest! {
        #[test]
        fn window_height_always_positive(
            screen_h in 101u16..2048,
            draws in 1usize..64,
        ) {
            let mut cursor = FeedCursor::new(FeedGeometry::DEFAULT);
            let limit = screen_h - FeedGeometry::DEFAULT.footer_reserve;

            for _ in 0..draws {
                let placement = cursor.place(SCREEN_W, screen_h);
                prop_assert!(placement.window.height > 0);
                prop_assert!(placement.window.y + placement.window.height <= limit);
                cursor.commit(&placement);
            }
        }
    }
}
