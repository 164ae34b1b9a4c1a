//! Chart session orchestration for Odonto.
//!
//! A [`ChartSession`] owns the in-memory mirror of one patient's chart and
//! keeps it consistent with the external document backend: the backend owns
//! the durable copy, the session owns the mirror, and the mirror only ever
//! reflects confirmed writes.

pub mod error;
pub mod notify;
pub mod session;

pub use error::{Error, Result};
pub use notify::{LogNotifier, Notifier, NullNotifier};
pub use session::{CHART_COLLECTION, ChartSession, Phase, Selection};
