//! Output writing.

mod transaction;

pub use transaction::{Action, Print, Transaction, WriteFile};
