//! Widget Session Module
//!
//! Hosts one widget instance per open browser page.
//!
//! ## Architecture Overview
//! 1. **Ownership**: Each session is a single tokio task that exclusively owns its
//!    `WidgetState`. UI events, debounce expiries and fetch completions all reach it
//!    through one mpsc channel, so state mutation is serialized without locks.
//! 2. **Effects**: The task arms the debouncer and spawns fetches as the state machine asks.
//!    Background work reports back through a weak sender and cannot keep a closed
//!    session alive.
//! 3. **Rendering**: After each event the task re-renders and publishes the markup
//!    through a `watch` channel; browsers long-poll for new versions.
//! 4. **Lifecycle**: Sessions live in a `DashMap` registry. A reaper loop drops sessions
//!    that stopped polling; dropping a session stops its task and cancels its debouncer.
//!
//! ## Submodules
//! - **`actor`**: The per-session task and its `WidgetHandle`.
//! - **`registry`**: Session bookkeeping and idle reaping.
//! - **`protocol`**: HTTP endpoints and DTOs exchanged with the page shell.
//! - **`handlers`**: Axum handlers and router.

pub mod actor;
pub mod handlers;
pub mod protocol;
pub mod registry;
