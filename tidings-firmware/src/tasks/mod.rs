//! Embassy async tasks
//!
//! Each task runs independently; the queue handed over at spawn time is
//! the only state they share.

pub mod ancs_rx;
pub mod render;

pub use ancs_rx::ancs_rx_task;
pub use render::render_task;
