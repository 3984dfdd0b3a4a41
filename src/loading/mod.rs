//! Reference-counted "busy" signal
//!
//! `LoadingCounter` counts outstanding asynchronous operations and publishes
//! a boolean that is `true` while at least one is in flight. Work units hold a
//! `LoadingGuard`, which releases its count on drop no matter how the work
//! ended.

mod counter;
mod guard;

pub use counter::LoadingCounter;
pub use guard::LoadingGuard;
