//! # Testdash Resilience
//!
//! Bounded waits for calls into external stores. A cache that hangs is
//! worse than a cache that is down, so every store call goes through here.

pub mod timeout;

pub use timeout::*;
