//! Events emitted by the review session.

mod review_event;

pub use review_event::ReviewEvent;
