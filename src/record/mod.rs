//! Records - the entities kept in a store.
//!
//! A record is a plain data holder: an optional identifier plus a handful of
//! scalar fields. The identifier is `None` until the store assigns one.
//!
//! ## Example
//!
//! ```ignore
//! use crud_sim::Record;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Clone, Serialize, Deserialize, Record)]
//! #[record(collection = "banners")]
//! struct Banner {
//!     id: Option<String>,
//!     #[record(search)]
//!     title: String,
//! }
//! ```

mod id;

use serde::{de::DeserializeOwned, Serialize};

pub use id::{IdGenerator, IdStrategy};

/// Trait for types that can be kept in a [`Store`](crate::Store).
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The collection name for this record type (e.g. "refreshment_points").
    const COLLECTION: &'static str;

    /// Returns the identifier, or `None` if it has not been assigned yet.
    fn id(&self) -> Option<&str>;

    /// Assigns the identifier. Only stores call this.
    fn set_id(&mut self, id: String);

    /// Text fields matched by [`Filter::text`](crate::Filter::text).
    fn search_fields(&self) -> Vec<&str> {
        Vec::new()
    }
}
