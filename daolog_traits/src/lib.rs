//! Collaborator seams for the DAO logger.
//!
//! The logger never reads ambient state on its own: wall-clock time comes from
//! a [`Clock`] and the per-request context label from a [`ContextSource`].
//! Both are injected so tests can pin them down.

pub mod clock;
pub mod context;

pub use clock::{Clock, SystemClock};
pub use context::{ContextSource, EnvContext, NoContext};
