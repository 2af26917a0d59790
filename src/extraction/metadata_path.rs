use serde_json::Value;

/// Index chain from the root of a `GetMetadata` response to the location entry.
///
/// Derived empirically from live responses; the upstream schema is undocumented and this is the
/// only place that knows about it.
pub const LOCATION_PATH: [usize; 6] = [1, 0, 5, 0, 1, 0];

const LATITUDE_INDEX: usize = 2;
const LONGITUDE_INDEX: usize = 3;
const MIN_LOCATION_ARITY: usize = 4;

/// Returns the raw latitude and longitude leaves, if the response has the expected shape.
pub fn location_leaves(document: &Value) -> Option<(&Value, &Value)> {
    let location = LOCATION_PATH
        .iter()
        .try_fold(document, |value, &index| value.get(index))?;
    let entries = location
        .as_array()
        .filter(|entries| entries.len() >= MIN_LOCATION_ARITY)?;
    Some((&entries[LATITUDE_INDEX], &entries[LONGITUDE_INDEX]))
}
