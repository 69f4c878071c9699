//! Domain events and the observers that consume them.
//!
//! The engine emits a [`GameEvent`] for every turn, market move, majority
//! change and settlement step. Rendering, logging or recording them is up to
//! the injected [`GameObserver`].

pub mod event;
pub mod observer;

pub use event::GameEvent;
pub use observer::{EventLog, GameObserver, NullObserver, TracingObserver};
