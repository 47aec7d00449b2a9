//! Book Finder Library
//!
//! A title search over a remote book catalog, presented as a single-page widget:
//! debounced input, paginated result grid, and a detail overlay.
//!
//! ## Architecture Modules
//! The crate is layered from pure logic up to the HTTP surface:
//!
//! - **`catalog`**: Records returned by the catalog, cover URL resolution, and the
//!   HTTP search client behind the `CatalogClient` trait.
//! - **`debounce`**: Cancellable delayed callbacks (`Scheduler`) and the single-slot
//!   `Debouncer` that turns keystroke bursts into one query commit.
//! - **`widget`**: The explicit widget state and its pure transition function, including
//!   pagination and the request-token scheme that drops stale responses.
//! - **`view`**: Pure rendering of widget state to HTML.
//! - **`session`**: One owning tokio task per open page, the session registry, and the
//!   Axum handlers that connect the browser to it.
//! - **`config`**: Environment-driven runtime settings for the binary.

pub mod catalog;
pub mod config;
pub mod debounce;
pub mod session;
pub mod view;
pub mod widget;
