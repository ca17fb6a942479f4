pub mod controller;
pub mod display;
pub mod error;
pub mod history;
pub mod session;
pub mod store;

#[cfg(test)]
mod tests;

pub use controller::{Lookup, LookupController};
pub use error::{ControllerError, StoreError};
pub use history::History;
pub use session::Session;
