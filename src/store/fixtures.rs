//! Fixture loading - seed data supplied from outside the store.

use crate::record::Record;

use super::StoreError;

/// Parse a JSON array of records.
///
/// ```ignore
/// let points: Vec<RefreshmentPoint> = load_fixture_json(r#"[
///     { "id": "RP001", "name": "Harbor View Bar", ... }
/// ]"#)?;
/// ```
pub fn load_fixture_json<R: Record>(json: &str) -> Result<Vec<R>, StoreError> {
    Ok(serde_json::from_str(json)?)
}
