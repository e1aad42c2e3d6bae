use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;

/// Body of a `GMPStats` query.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsQuery {
    pub from_time: i64,
    pub to_time: i64,
}

/// Collects the distinct contract keys of a `GMPStats` response.
///
/// Returns `None` when `messages` is missing or not an array. Nodes of any
/// other unexpected shape are skipped.
pub fn collect_contract_keys(payload: &Value) -> Option<HashSet<&str>> {
    let messages = payload.get("messages")?.as_array()?;

    let mut keys = HashSet::new();
    for message in messages {
        for source in items(message, "source_chains") {
            for destination in items(source, "destination_chains") {
                keys.extend(contract_keys(destination));
            }
        }
        for destination in items(message, "destination_chains") {
            keys.extend(contract_keys(destination));
        }
    }
    Some(keys)
}

pub fn message_count(payload: &Value) -> usize {
    payload
        .get("messages")
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}

fn items<'a>(node: &'a Value, field: &str) -> impl Iterator<Item = &'a Value> {
    node.get(field)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

fn contract_keys(destination: &Value) -> impl Iterator<Item = &str> {
    items(destination, "contracts")
        .filter_map(|contract| contract.get("key").and_then(Value::as_str))
        .filter(|key| !key.is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn count(payload: Value) -> Option<usize> {
        collect_contract_keys(&payload).map(|keys| keys.len())
    }

    #[test]
    fn duplicate_keys_across_messages_collapse() {
        let payload = json!({"messages": [
            {"destination_chains": [{"contracts": [{"key": "A"}]}]},
            {"destination_chains": [{"contracts": [{"key": "A"}]}]},
            {"destination_chains": [{"contracts": [{"key": "B"}]}]},
        ]});
        assert_eq!(count(payload), Some(2));
    }

    #[test]
    fn key_on_both_paths_counts_once() {
        let payload = json!({"messages": [{
            "source_chains": [{"destination_chains": [{"contracts": [{"key": "0xabc"}]}]}],
            "destination_chains": [{"contracts": [{"key": "0xabc"}, {"key": "0xdef"}]}],
        }]});
        assert_eq!(count(payload), Some(2));
    }

    #[test]
    fn walks_every_source_and_destination() {
        let payload = json!({"messages": [{
            "source_chains": [
                {"destination_chains": [
                    {"contracts": [{"key": "a"}, {"key": "b"}]},
                    {"contracts": [{"key": "c"}]},
                ]},
                {"destination_chains": [{"contracts": [{"key": "d"}]}]},
            ],
        }]});
        assert_eq!(count(payload), Some(4));
    }

    #[test]
    fn absent_or_empty_keys_are_ignored() {
        let payload = json!({"messages": [{
            "destination_chains": [{"contracts": [
                {"key": ""},
                {"address": "0x1"},
                {"key": null},
                {"key": 7},
                {"key": "kept"},
            ]}],
        }]});
        assert_eq!(count(payload), Some(1));
    }

    #[test]
    fn non_array_messages_is_no_data() {
        assert_eq!(count(json!({"messages": "not-an-array"})), None);
        assert_eq!(count(json!({"messages": null})), None);
        assert_eq!(count(json!({"data": []})), None);
        assert_eq!(count(json!([])), None);
    }

    #[test]
    fn malformed_nested_nodes_are_skipped() {
        let payload = json!({"messages": [
            {"source_chains": "x", "destination_chains": {"contracts": []}},
            {"destination_chains": [{"contracts": "none"}, 3, {"contracts": [{"key": "ok"}]}]},
            "garbage",
        ]});
        assert_eq!(count(payload), Some(1));
        assert_eq!(message_count(&json!({"messages": [1, 2, 3]})), 3);
    }

    #[test]
    fn query_serializes_camel_case() {
        let body = serde_json::to_value(StatsQuery {
            from_time: 1,
            to_time: 2,
        })
        .unwrap();
        assert_eq!(body, json!({"fromTime": 1, "toTime": 2}));
    }
}
