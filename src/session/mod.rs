//! Session state for Session Client.
//!
//! Owns where the credential lives, how it is cleared on expiry, and the
//! login/logout helpers that populate and empty it.

mod invalidator;
mod login;
mod store;

pub use invalidator::*;
pub use login::*;
pub use store::*;
