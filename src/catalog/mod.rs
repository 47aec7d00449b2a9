//! Catalog Module
//!
//! Everything that talks about the remote book catalog: the records it returns,
//! how cover images are addressed, and the HTTP client that fetches result pages.
//!
//! ## Submodules
//! - **`types`**: Wire DTOs (`SearchEnvelope`) and the domain records (`SearchResultItem`, `SearchResultPage`).
//! - **`cover`**: Pure resolution of a record to a cover image URL, plus the placeholder text.
//! - **`client`**: The `CatalogClient` seam and its reqwest-backed implementation.

pub mod client;
pub mod cover;
pub mod types;
