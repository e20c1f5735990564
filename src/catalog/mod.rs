//! Remote catalog capability
//!
//! The catalog is consumed through the [`CatalogClient`] trait rather than
//! reimplemented: request signing and transport belong to the implementation
//! behind the trait. The library only relies on its contract: paginated
//! listings, a per-photo detail call, and the three failure classes
//! (transport, rate-limit, API error payload).
//!
//! [`CatalogConnector`] builds a fresh client session from an immutable
//! credential value; each export worker opens its own session so no mutable
//! client state is shared across workers.
//!
//! [`MemoryCatalog`] is an in-process implementation over fixture data, used
//! by the test suite and for offline dry runs.

mod memory;
mod traits;

pub use memory::{MemoryCatalog, MemoryCatalogBuilder};
pub use traits::{
    AlbumRecord, CatalogClient, CatalogConnector, Page, PhotoInfoRecord, PhotoRecord,
};
