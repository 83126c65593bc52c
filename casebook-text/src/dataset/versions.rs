//! Card version data
//!
//! Reprints share a `card_id` but have distinct card numbers. Within each group, the
//! first card number in file order is the primary version; every card lists the other
//! numbers of its group.

use serde_json::{json, Map, Value};

fn card_id(card: &Value) -> Option<String> {
    match card.get("card_id")? {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// Version entries keyed by card number, ready to be merged into the card data.
pub fn version_data(cards: &Map<String, Value>) -> Map<String, Value> {
    let mut groups: Vec<(String, Vec<&str>)> = Vec::new();

    for (number, card) in cards {
        let Some(id) = card_id(card) else {
            tracing::warn!(card = %number, "card has no card_id, skipping version data");
            continue;
        };
        match groups.iter_mut().find(|(group_id, _)| *group_id == id) {
            Some((_, numbers)) => numbers.push(number.as_str()),
            None => groups.push((id, vec![number.as_str()])),
        }
    }

    let mut versions = Map::new();
    for (id, numbers) in &groups {
        for (position, number) in numbers.iter().enumerate() {
            let others: Vec<&str> = numbers
                .iter()
                .filter(|other| *other != number)
                .copied()
                .collect();
            versions.insert(
                number.to_string(),
                json!({
                    "is_primary": position == 0,
                    "card_id": id,
                    "other_versions": others,
                }),
            );
        }
    }

    tracing::info!(
        card_ids = groups.len(),
        cards = versions.len(),
        "generated version data"
    );
    versions
}
