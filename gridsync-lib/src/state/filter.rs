//! Filter entry types.

use serde::Deserialize;
use serde::Serialize;

/// One active filter condition on a grid column.
///
/// Entries are keyed by their slot number inside [`GridState`]. The wire
/// format keeps the field names the server already understands: the slot
/// serializes as `nr` and the column as `id`.
///
/// [`GridState`]: crate::state::GridState
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterEntry {
    /// Slot number identifying this entry within the grid's state.
    #[serde(rename = "nr")]
    pub slot: u32,
    /// Identifier of the target column.
    #[serde(rename = "id")]
    pub column: String,
    /// Operand values, in declared order. The length is dictated by the
    /// operand count of `mode`, which the presentation layer declares.
    pub values: Vec<String>,
    /// Identifier of the comparison operator to apply.
    pub mode: String,
}

/// A filter condition without a slot, as supplied by callers.
///
/// Used for preset filters passed at construction time; slots are assigned
/// when the entries are inserted into the state.
///
/// # Example
///
/// ```
/// use gridsync_lib::state::FilterSpec;
///
/// let preset = FilterSpec::new("name", ["abc"], "contains");
/// assert_eq!(preset.values, vec!["abc"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Identifier of the target column.
    pub column: String,
    /// Operand values, in declared order.
    pub values: Vec<String>,
    /// Identifier of the comparison operator to apply.
    pub mode: String,
}

impl FilterSpec {
    /// Creates a new filter spec.
    pub fn new<V>(column: impl Into<String>, values: V, mode: impl Into<String>) -> Self
    where
        V: IntoIterator,
        V::Item: Into<String>,
    {
        Self {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
            mode: mode.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_wire_names() {
        let entry = FilterEntry {
            slot: 2,
            column: "name".to_string(),
            values: vec!["abc".to_string()],
            mode: "contains".to_string(),
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["nr"], 2);
        assert_eq!(json["id"], "name");
        assert_eq!(json["values"][0], "abc");
        assert_eq!(json["mode"], "contains");
    }

    #[test]
    fn test_entry_deserializes_wire_names() {
        let entry: FilterEntry =
            serde_json::from_str(r#"{"nr":0,"id":"x","values":["1"],"mode":"="}"#).unwrap();
        assert_eq!(entry.slot, 0);
        assert_eq!(entry.column, "x");
    }
}
