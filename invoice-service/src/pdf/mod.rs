//! Two-stage document pipeline: compose an invoice into layout blocks, then
//! render the blocks onto paginated A4 pages as PDF bytes. Both stages are
//! pure transforms with no persistence or network I/O.
pub mod compose;
pub mod render;

pub use compose::{compose_invoice, Block};
pub use render::render_pdf;
