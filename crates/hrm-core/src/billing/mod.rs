//! Invoice arithmetic and notification text

pub mod computation;
pub mod placeholders;

pub use computation::{compute_totals, line_amount, round_money, InvoiceTotals};
pub use placeholders::{render_message, substitute, RenderedMessage};
