//! Page chrome behavior for the server-rendered journal UI.
//!
//! This crate holds every decision the browser layer makes about the page
//! chrome: which theme is active, which layout mode the sidebar is in, which
//! submenus are open, and which flash alerts are still visible. It has no
//! browser dependency. The `client` crate scans the DOM into a
//! [`chrome::PageInventory`], forwards DOM events as [`chrome::UiEvent`]s, and
//! implements [`surface::Surface`] and [`store::PreferenceStore`] on top of
//! `web-sys`.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`chrome`] | Start-up and event dispatch across all controllers |
//! | [`theme`] | Light/dark resolution and theme control styling |
//! | [`sidebar`] | Sidebar layout state machine |
//! | [`submenu`] | Per-group submenu disclosure |
//! | [`alerts`] | Flash alert dismissal and auto-dismiss |
//! | [`surface`] | Rendering adapter trait and class patches |
//! | [`store`] | Persisted preference storage |
//! | [`config`] | Tunable constants, overridable from the page |
//! | [`consts`] | Default values and storage keys |

pub mod alerts;
pub mod chrome;
pub mod config;
pub mod consts;
pub mod sidebar;
pub mod store;
pub mod submenu;
pub mod surface;
pub mod theme;
