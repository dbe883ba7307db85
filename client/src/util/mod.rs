//! Browser glue shared by the boot sequence.
//!
//! SYSTEM CONTEXT
//! ==============
//! These modules isolate `web-sys` concerns (element lookup, storage, event
//! listeners, timers) from the controllers in the `layout` crate, which never
//! see a DOM type.

#[cfg(feature = "hydrate")]
pub mod dom;
#[cfg(feature = "hydrate")]
pub mod events;
pub mod selectors;
pub mod storage;
