//! # client
//!
//! WebAssembly entry point for the journal's page chrome. Built with the
//! `hydrate` feature it attaches to the server-rendered document, scans it
//! into a [`layout::chrome::PageInventory`], and drives
//! [`layout::chrome::Chrome`] from DOM events. Without `hydrate` only the
//! browser-independent helpers compile, so the crate still tests natively.

pub mod util;

#[cfg(feature = "hydrate")]
mod boot;
