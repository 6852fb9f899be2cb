mod record;

use proc_macro::TokenStream;

// ============================================================================
// #[derive(Record)]
// ============================================================================

/// Derive macro implementing `crud_sim::Record` for a plain struct.
///
/// # Usage
///
/// ```ignore
/// #[derive(Clone, Serialize, Deserialize, Record)]
/// #[record(collection = "refreshment_points")]
/// pub struct RefreshmentPoint {
///     pub id: Option<String>,
///     #[record(search)]
///     pub name: String,
///     #[record(search)]
///     pub location: String,
///     pub capacity: u32,
/// }
/// ```
///
/// Attributes:
/// - `#[record(collection = "...")]` on the struct. Defaults to the snake_case
///   struct name plus `s`.
/// - `#[record(id)]` on an `Option<String>` field. Defaults to the field named `id`.
/// - `#[record(search)]` on string fields matched by text filters, in
///   declaration order.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive_record(input)
}
