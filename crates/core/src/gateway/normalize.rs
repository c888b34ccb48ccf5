use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Normalize a collection payload to a plain list of records.
///
/// Backends disagree on shape: some return a bare JSON array, others wrap
/// it under `data` or an entity-named key (`{"hustles": [...]}`). Elements
/// that fail to decode even leniently are skipped rather than failing the
/// whole response; anything unrecognizable normalizes to an empty list.
pub fn decode_collection<T>(payload: Value, wrapper_keys: &[&str]) -> Vec<T>
where
    T: DeserializeOwned,
{
    extract_items(payload, wrapper_keys)
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<T>(item) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!("skipping malformed collection entry: {e}");
                None
            }
        })
        .collect()
}

/// Pull the raw element list out of a bare-array or wrapped payload.
/// `data` is always tried first, then the entity-named keys.
fn extract_items(payload: Value, wrapper_keys: &[&str]) -> Vec<Value> {
    match payload {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            for key in std::iter::once(&"data").chain(wrapper_keys) {
                if let Some(Value::Array(items)) = map.remove(*key) {
                    return items;
                }
            }
            Vec::new()
        }
        _ => Vec::new(),
    }
}
