use serde_json::{Map, Value};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use super::catalog::{TradeUpFamily, MATERIALS_KEY};
use super::pricing::PricedItem;

const UPDATED_AT_KEY: &str = "updated_at";

/// Which of a family's two price lists an item lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    Output,
    Material,
}

/// Session state for one family's page: both price lists, owned by the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct FamilyState {
    pub family_id: String,
    pub outputs: Vec<PricedItem>,
    pub materials: Vec<PricedItem>,
    /// RFC 3339 timestamp of the last successful refresh.
    pub updated_at: Option<String>,
}

impl FamilyState {
    pub fn with_defaults(family: &TradeUpFamily) -> Self {
        Self {
            family_id: family.id.to_string(),
            outputs: family.default_outputs(),
            materials: family.default_materials(),
            updated_at: None,
        }
    }

    pub fn items(&self, kind: ItemKind) -> &[PricedItem] {
        match kind {
            ItemKind::Output => &self.outputs,
            ItemKind::Material => &self.materials,
        }
    }

    pub fn items_mut(&mut self, kind: ItemKind) -> &mut Vec<PricedItem> {
        match kind {
            ItemKind::Output => &mut self.outputs,
            ItemKind::Material => &mut self.materials,
        }
    }

    /// Finds an item by exact name in either list.
    pub fn locate(&self, name: &str) -> Option<(ItemKind, &PricedItem)> {
        [ItemKind::Output, ItemKind::Material]
            .into_iter()
            .find_map(|kind| {
                self.items(kind)
                    .iter()
                    .find(|item| item.name == name)
                    .map(|item| (kind, item))
            })
    }

    pub fn touch(&mut self) {
        self.updated_at = OffsetDateTime::now_utc().format(&Rfc3339).ok();
    }

    /// Rebuilds state from a persisted document.
    ///
    /// A bare array is the legacy layout holding only the output list. Missing
    /// keys fall back to the family defaults.
    pub fn from_persisted(family: &TradeUpFamily, document: Value) -> Self {
        let mut state = Self::with_defaults(family);
        match document {
            Value::Array(_) => {
                if let Some(outputs) = parse_items(document) {
                    state.outputs = outputs;
                }
            }
            Value::Object(mut map) => {
                if let Some(outputs) = map.remove(family.outputs_key).and_then(parse_items) {
                    state.outputs = outputs;
                }
                if let Some(materials) = map.remove(MATERIALS_KEY).and_then(parse_items) {
                    state.materials = materials;
                }
                state.updated_at = map
                    .remove(UPDATED_AT_KEY)
                    .and_then(|value| value.as_str().map(str::to_string));
            }
            _ => {}
        }
        state
    }

    pub fn to_persisted(&self, family: &TradeUpFamily) -> Value {
        let mut map = Map::new();
        map.insert(family.outputs_key.to_string(), items_value(&self.outputs));
        map.insert(MATERIALS_KEY.to_string(), items_value(&self.materials));
        if let Some(updated_at) = &self.updated_at {
            map.insert(UPDATED_AT_KEY.to_string(), Value::String(updated_at.clone()));
        }
        Value::Object(map)
    }
}

fn parse_items(value: Value) -> Option<Vec<PricedItem>> {
    serde_json::from_value(value).ok()
}

fn items_value(items: &[PricedItem]) -> Value {
    Value::Array(
        items
            .iter()
            .map(|item| {
                let mut entry = Map::new();
                entry.insert("name".into(), Value::String(item.name.clone()));
                entry.insert("min_price".into(), Value::from(item.min_price));
                Value::Object(entry)
            })
            .collect(),
    )
}
