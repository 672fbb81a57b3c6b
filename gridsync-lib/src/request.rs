//! Request parameter serialization.

use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::state::GridState;
use crate::state::Sorting;

/// The parameters of one grid request, built fresh on every reload.
///
/// Structurally this is a JSON object: it always contains `filter` as a list
/// (possibly empty), contains `page` and `sorting` only when they are set,
/// and carries any caller-supplied extra view parameters. The transport posts
/// the serialized object as a single form field keyed
/// [`GRID_DATA_FIELD`](crate::fetch::GRID_DATA_FIELD).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RequestParams {
    map: Map<String, Value>,
}

impl RequestParams {
    /// Builds the parameters for a state, overlaying the extra view params.
    ///
    /// Extra parameters are merged in last and overwrite colliding keys
    /// unconditionally, including `page`, `sorting`, and `filter`.
    pub fn build(state: &GridState, extra: &Map<String, Value>) -> Self {
        let mut map = Map::new();

        if let Some(page) = state.page() {
            map.insert("page".to_string(), Value::from(page));
        }
        if let Some(sorting) = state.sorting() {
            map.insert("sorting".to_string(), to_value(sorting));
        }

        let filter: Vec<Value> = state.filters().values().map(to_value).collect();
        map.insert("filter".to_string(), Value::Array(filter));

        for (key, value) in extra {
            map.insert(key.clone(), value.clone());
        }

        Self { map }
    }

    /// Returns the value under `key`, if present.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.map.get(key)
    }

    /// Returns the page number, if the request carries one.
    pub fn page(&self) -> Option<u64> {
        self.map.get("page").and_then(Value::as_u64)
    }

    /// Returns the sort specification, if the request carries one.
    pub fn sorting(&self) -> Option<Sorting> {
        let value = self.map.get("sorting")?;
        serde_json::from_value(value.clone()).ok()
    }

    /// Returns the number of filter entries in the request.
    pub fn filter_len(&self) -> usize {
        self.map
            .get("filter")
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }
}

fn to_value<T: Serialize>(value: T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Direction;
    use crate::state::FilterEntry;
    use crate::state::StateSnapshot;

    #[test]
    fn test_filter_is_always_a_list() {
        let params = RequestParams::build(&GridState::new(), &Map::new());
        assert!(params.get("filter").unwrap().is_array());
        assert_eq!(params.filter_len(), 0);
        assert!(params.get("page").is_none());
        assert!(params.get("sorting").is_none());
    }

    #[test]
    fn test_page_and_sorting_only_when_set() {
        let mut state = GridState::new();
        state.set_page(2);
        state.set_sorting("name", Direction::Asc);

        let params = RequestParams::build(&state, &Map::new());
        assert_eq!(params.page(), Some(2));
        assert_eq!(params.sorting().unwrap().column, "name");
    }

    #[test]
    fn test_extra_params_overlay_unconditionally() {
        let mut state = GridState::new();
        state.set_page(2);

        let mut extra = Map::new();
        extra.insert("page".to_string(), Value::from(9));
        extra.insert("project".to_string(), Value::from("alpha"));

        let params = RequestParams::build(&state, &extra);
        assert_eq!(params.page(), Some(9));
        assert_eq!(params.get("project").unwrap(), "alpha");
    }

    #[test]
    fn test_seeded_state_round_trips() {
        let mut state = GridState::new();
        state.seed(StateSnapshot {
            page: Some(3),
            sorting: Some(Sorting::new("x", Direction::Desc)),
            filter: vec![FilterEntry {
                slot: 0,
                column: "name".to_string(),
                values: vec!["abc".to_string()],
                mode: "contains".to_string(),
            }],
        });

        let params = RequestParams::build(&state, &Map::new());
        assert_eq!(params.page(), Some(3));
        let sorting = params.sorting().unwrap();
        assert_eq!(sorting.column, "x");
        assert_eq!(sorting.direction, Direction::Desc);
        assert_eq!(params.filter_len(), 1);

        let filter = params.get("filter").unwrap();
        assert_eq!(filter[0]["nr"], 0);
        assert_eq!(filter[0]["id"], "name");
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let mut state = GridState::new();
        state.set_page(1);
        let json = serde_json::to_string(&RequestParams::build(&state, &Map::new())).unwrap();
        assert!(json.starts_with('{'));
        assert!(json.contains("\"page\":1"));
        assert!(json.contains("\"filter\":[]"));
    }
}
