//! shelf-session
//!
//! Wires the query engine and the favourites store to a view: initial
//! rendering, intent dispatch, and the debounced async intent loop.
pub mod debounce;
pub mod driver;
pub mod session;

pub use debounce::Debouncer;
pub use driver::run;
pub use session::Session;
