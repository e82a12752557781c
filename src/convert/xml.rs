use roxmltree::{Document, Node, ParsingOptions};
use serde::Serialize;
use serde_json::{Map, Value};

use super::badges::normalize_awards;
use crate::error::{ConvertError, ConvertResult};

const ROOT: &str = "CARDS";
const SET: &str = "SET";
const CARD: &str = "CARD";

/// One card in the JSONL shape the loader reads.
///
/// Elements absent from the XML are left out of the line entirely; empty
/// elements become `""`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonlCard {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "NAME", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "TYPE", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(rename = "MOTTO", skip_serializing_if = "Option::is_none")]
    pub motto: Option<String>,
    #[serde(rename = "CATEGORY", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "REGION", skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(rename = "FLAG", skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,
    #[serde(rename = "CARDCATEGORY", skip_serializing_if = "Option::is_none")]
    pub card_category: Option<String>,
    #[serde(rename = "DESCRIPTION", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "BADGES")]
    pub badges: Map<String, Value>,
    #[serde(rename = "TROPHIES")]
    pub trophies: Map<String, Value>,
}

/// Parse a `<CARDS><SET><CARD>...` dump.
///
/// A document whose root is not `CARDS` holds no cards. Cards from every
/// `SET` are returned in document order.
pub fn cards_from_xml(xml: &str) -> ConvertResult<Vec<JsonlCard>> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(xml, options)?;

    let root = doc.root_element();
    if !root.has_tag_name(ROOT) {
        return Ok(Vec::new());
    }

    root.children()
        .filter(|n| n.has_tag_name(SET))
        .flat_map(|set| set.children().filter(|n| n.has_tag_name(CARD)))
        .enumerate()
        .map(|(i, card)| parse_card(card, i + 1))
        .collect()
}

fn parse_card(card: Node, position: usize) -> ConvertResult<JsonlCard> {
    let missing = |element: &'static str| ConvertError::MissingElement {
        card: position,
        element,
    };
    let text = |name: &str| child_element(card, name).map(element_text);

    let id_text = text("ID").ok_or_else(|| missing("ID"))?;
    let id = id_text.parse::<i64>().map_err(|_| ConvertError::InvalidId {
        card: position,
        value: id_text.clone(),
    })?;

    let badges = child_element(card, "BADGES").ok_or_else(|| missing("BADGES"))?;
    let trophies = child_element(card, "TROPHIES").ok_or_else(|| missing("TROPHIES"))?;
    let (badges, trophies) = normalize_awards(badges, trophies);

    Ok(JsonlCard {
        id,
        name: text("NAME"),
        kind: text("TYPE"),
        motto: text("MOTTO"),
        category: text("CATEGORY"),
        region: text("REGION"),
        flag: text("FLAG"),
        card_category: text("CARDCATEGORY"),
        description: text("DESCRIPTION"),
        badges,
        trophies,
    })
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(name))
}

/// Direct text content of an element, trimmed
pub(crate) fn element_text(node: Node) -> String {
    let text: String = node
        .children()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DUMP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<CARDS>
  <SET season="1">
    <CARD>
      <ID>42</ID>
      <NAME>Testlandia</NAME>
      <TYPE>Republic</TYPE>
      <MOTTO>Test &amp; learn</MOTTO>
      <CATEGORY>Inoffensive Centrist Democracy</CATEGORY>
      <REGION>Testregionia</REGION>
      <FLAG>uploads/testlandia.png</FLAG>
      <CARDCATEGORY>legendary</CARDCATEGORY>
      <DESCRIPTION>4.35m Population of Testlandia</DESCRIPTION>
      <BADGES>
        <BADGE>Easter Eggs (x3)</BADGE>
        <BADGE>Founder</BADGE>
        <BADGE type="Admin">5</BADGE>
      </BADGES>
      <TROPHIES>
        <TROPHY type="cte-1">10</TROPHY>
        <TROPHY type="econ-5">5</TROPHY>
      </TROPHIES>
    </CARD>
    <CARD>
      <ID>43</ID>
      <NAME>Maxtopia</NAME>
      <MOTTO></MOTTO>
      <BADGES/>
      <TROPHIES/>
    </CARD>
  </SET>
</CARDS>"#;

    #[test]
    fn test_full_card() {
        let cards = cards_from_xml(DUMP).unwrap();
        assert_eq!(cards.len(), 2);

        let card = serde_json::to_value(&cards[0]).unwrap();
        assert_eq!(
            card,
            json!({
                "ID": 42,
                "NAME": "Testlandia",
                "TYPE": "Republic",
                "MOTTO": "Test & learn",
                "CATEGORY": "Inoffensive Centrist Democracy",
                "REGION": "Testregionia",
                "FLAG": "uploads/testlandia.png",
                "CARDCATEGORY": "legendary",
                "DESCRIPTION": "4.35m Population of Testlandia",
                "BADGES": {"Easter Egg": 3, "Founder": 1, "Admin": 5},
                "TROPHIES": {"cte-1": 10, "econ-5": 5},
            })
        );
    }

    #[test]
    fn test_absent_elements_are_omitted() {
        let cards = cards_from_xml(DUMP).unwrap();
        let card = serde_json::to_value(&cards[1]).unwrap();
        let obj = card.as_object().unwrap();

        assert_eq!(obj["MOTTO"], json!(""));
        assert!(!obj.contains_key("REGION"));
        assert!(!obj.contains_key("DESCRIPTION"));
        assert_eq!(obj["BADGES"], json!({}));
        assert_eq!(obj["TROPHIES"], json!({}));
    }

    #[test]
    fn test_cards_from_every_set() {
        let xml = "<CARDS>\
            <SET><CARD><ID>1</ID><BADGES/><TROPHIES/></CARD></SET>\
            <SET><CARD><ID>2</ID><BADGES/><TROPHIES/></CARD></SET>\
            </CARDS>";
        let ids: Vec<i64> = cards_from_xml(xml).unwrap().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_other_root_has_no_cards() {
        assert!(cards_from_xml("<NATIONS><SET/></NATIONS>").unwrap().is_empty());
    }

    #[test]
    fn test_missing_id() {
        let xml = "<CARDS><SET><CARD><ID>1</ID><BADGES/><TROPHIES/></CARD>\
            <CARD><NAME>x</NAME><BADGES/><TROPHIES/></CARD></SET></CARDS>";
        match cards_from_xml(xml) {
            Err(ConvertError::MissingElement { card, element }) => {
                assert_eq!(card, 2);
                assert_eq!(element, "ID");
            }
            other => panic!("expected MissingElement, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_id() {
        let xml = "<CARDS><SET><CARD><ID>abc</ID><BADGES/><TROPHIES/></CARD></SET></CARDS>";
        assert!(matches!(
            cards_from_xml(xml),
            Err(ConvertError::InvalidId { card: 1, .. })
        ));
    }

    #[test]
    fn test_missing_badges() {
        let xml = "<CARDS><SET><CARD><ID>1</ID><TROPHIES/></CARD></SET></CARDS>";
        assert!(matches!(
            cards_from_xml(xml),
            Err(ConvertError::MissingElement {
                element: "BADGES",
                ..
            })
        ));
    }

    #[test]
    fn test_malformed_xml() {
        assert!(matches!(
            cards_from_xml("<CARDS><SET>"),
            Err(ConvertError::Xml(_))
        ));
    }
}
