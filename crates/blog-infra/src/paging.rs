//! Sort and slice helpers shared by the in-memory adapters.

use std::cmp::Ordering;

use serde::Serialize;
use serde_json::Value;

use blog_core::page::{Direction, PageRequest};

/// Apply the page's sort key (via the serialized field value), then slice
/// out the requested window. Without a sort key the incoming order is kept.
pub(crate) fn sort_and_page<T: Serialize>(mut items: Vec<T>, page: &PageRequest) -> Vec<T> {
    if let Some(sort) = &page.sort {
        items.sort_by(|a, b| {
            let ord = compare(&field_value(a, &sort.field), &field_value(b, &sort.field));
            match sort.direction {
                Direction::Asc => ord,
                Direction::Desc => ord.reverse(),
            }
        });
    }
    items
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.size as usize)
        .collect()
}

fn field_value<T: Serialize>(item: &T, field: &str) -> Value {
    serde_json::to_value(item)
        .ok()
        .and_then(|v| v.get(field).cloned())
        .unwrap_or(Value::Null)
}

fn compare(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .unwrap_or(0.0)
            .partial_cmp(&y.as_f64().unwrap_or(0.0))
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Less,
        (_, Value::Null) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}
