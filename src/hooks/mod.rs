//! Capabilities supplied by the embedding application.
//!
//! The client never renders anything or routes anywhere itself; it calls
//! out through these traits.

mod navigator;
mod notifier;

pub use navigator::*;
pub use notifier::*;
