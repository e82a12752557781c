//! Badge and trophy normalisation for XML card dumps.
//!
//! Badges come in three shapes:
//! - `<BADGE type="Admin">5</BADGE>` becomes `{"Admin": 5}`
//! - `<BADGE>Easter Eggs (x3)</BADGE>` becomes `{"Easter Egg": 3}`
//! - `<BADGE>Founder</BADGE>` becomes `{"Founder": 1}`
//!
//! Trophies become `{type: int}`. A card with exactly one trophy has it
//! folded into the badge map instead, which is how existing dumps were
//! produced and what downstream queries expect.

use roxmltree::Node;
use serde_json::{Map, Value};

use super::xml::element_text;

const BADGE: &str = "BADGE";
const TROPHY: &str = "TROPHY";

/// Leading integer of `text` (optional sign, then digits), like JavaScript `parseInt`
pub fn leading_int(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Numeric text becomes a JSON number, anything else stays a string
pub fn scalar_value(text: &str) -> Value {
    if let Ok(i) = text.parse::<i64>() {
        return Value::from(i);
    }
    let numeric = !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'));
    if numeric {
        if let Some(n) = text.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
            return Value::Number(n);
        }
    }
    Value::String(text.to_string())
}

fn int_or_null(text: &str) -> Value {
    leading_int(text).map(Value::from).unwrap_or(Value::Null)
}

/// `Name (xN)` counts; the plural easter egg badge is stored singular
fn insert_counted_badge(badges: &mut Map<String, Value>, text: &str) {
    match text.split_once('(') {
        Some((base, rest)) => {
            let base = match base.trim() {
                "Easter Eggs" => "Easter Egg",
                other => other,
            };
            let count = rest.split('(').next().unwrap_or(rest);
            let count = count.replacen('x', "", 1).replacen(')', "", 1);
            badges.insert(base.to_string(), int_or_null(&count));
        }
        None => {
            badges.insert(text.to_string(), Value::from(1));
        }
    }
}

fn insert_badge(badges: &mut Map<String, Value>, node: Node) {
    let text = element_text(node);

    if node.attributes().next().is_none() {
        insert_counted_badge(badges, &text);
        return;
    }

    // Typed badges without a type or a value carry nothing to store
    if let Some(kind) = node.attribute("type") {
        if !text.is_empty() {
            badges.insert(kind.to_string(), scalar_value(&text));
        }
    }
}

fn insert_trophy(target: &mut Map<String, Value>, node: Node) {
    if let Some(kind) = node.attribute("type") {
        target.insert(kind.to_string(), int_or_null(&element_text(node)));
    }
}

/// Normalise the children of `<BADGES>` and `<TROPHIES>` into
/// `(badges, trophies)` maps.
pub fn normalize_awards(badges: Node, trophies: Node) -> (Map<String, Value>, Map<String, Value>) {
    let mut badge_map = Map::new();
    for node in badges.children().filter(|n| n.has_tag_name(BADGE)) {
        insert_badge(&mut badge_map, node);
    }

    let trophy_nodes: Vec<Node> = trophies
        .children()
        .filter(|n| n.has_tag_name(TROPHY))
        .collect();

    let mut trophy_map = Map::new();
    match trophy_nodes.as_slice() {
        [] => {}
        [single] => insert_trophy(&mut badge_map, *single),
        many => {
            for node in many {
                insert_trophy(&mut trophy_map, *node);
            }
        }
    }

    (badge_map, trophy_map)
}
