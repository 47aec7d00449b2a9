//! View Rendering
//!
//! Pure rendering from `WidgetState` to HTML through minijinja templates. The
//! state is flattened into serializable view structs first; every value the
//! templates interpolate is HTML auto-escaped. Given the same state and context
//! the markup is always the same.
//!
//! Interactive elements carry `data-action` (and `data-key` for cards). The page
//! shell turns clicks on them into events. The detail card carries
//! `data-contain` so clicks inside it never reach the backdrop.
//!
//! ## Submodules
//! - **`render`**: `ViewRenderer` for the status line, error banner, empty state, grid,
//!   pager, detail overlay and the page shell.
//! - **`format`**: Small text helpers shared by the renderers.
//! - **`templates/`**: The `.html` templates themselves.

pub mod format;
pub mod render;
