//! XML documents re-serialized as JSON.
//!
//! Elements map to objects keyed by child name, attributes keep an `@`
//! prefix, and repeated children collapse into arrays. An element with
//! nothing but character data becomes a plain string; one mixing text and
//! children keeps the text under `_text`.

use groundwork_core::error::ExtractError;
use groundwork_core::extract::Extractor;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};

pub struct XmlExtractor;

#[async_trait::async_trait]
impl Extractor for XmlExtractor {
    fn name(&self) -> &str {
        "xml"
    }

    fn extensions(&self) -> &[&str] {
        &["xml"]
    }

    async fn extract(
        &self,
        bytes: &[u8],
        _extension: &str,
    ) -> std::result::Result<String, ExtractError> {
        let xml = String::from_utf8_lossy(bytes);
        let tree = parse_document(&xml)?;
        serde_json::to_string(&tree)
            .map_err(|e| ExtractError::Parse(format!("XML serialize failed: {e}")))
    }
}

struct Frame {
    name: String,
    children: Map<String, Value>,
    text: Vec<String>,
}

impl Frame {
    fn root() -> Self {
        Frame {
            name: String::new(),
            children: Map::new(),
            text: Vec::new(),
        }
    }

    fn open(e: &BytesStart<'_>) -> std::result::Result<Self, ExtractError> {
        let mut children = Map::new();
        for attr in e.attributes() {
            let attr = attr.map_err(|e| ExtractError::Parse(format!("bad attribute: {e}")))?;
            let key = format!("@{}", String::from_utf8_lossy(attr.key.as_ref()));
            let value = attr
                .unescape_value()
                .map_err(|e| ExtractError::Parse(format!("bad attribute value: {e}")))?;
            children.insert(key, Value::String(value.into_owned()));
        }
        Ok(Frame {
            name: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
            children,
            text: Vec::new(),
        })
    }

    fn close(mut self) -> Value {
        let text = self.text.join(" ");
        if self.children.is_empty() {
            return Value::String(text);
        }
        if !text.is_empty() {
            self.children.insert("_text".to_string(), Value::String(text));
        }
        Value::Object(self.children)
    }

    /// Attach a finished child value, turning repeats into arrays.
    fn attach(&mut self, name: String, value: Value) {
        match self.children.get_mut(&name) {
            None => {
                self.children.insert(name, value);
            }
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
        }
    }
}

fn parse_document(xml: &str) -> std::result::Result<Value, ExtractError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack = vec![Frame::root()];
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => stack.push(Frame::open(&e)?),
            Ok(Event::Empty(e)) => {
                let frame = Frame::open(&e)?;
                let name = frame.name.clone();
                let value = frame.close();
                attach_to_top(&mut stack, name, value)?;
            }
            Ok(Event::End(_)) => {
                let frame = stack
                    .pop()
                    .ok_or_else(|| ExtractError::Parse("unmatched closing tag".to_string()))?;
                let name = frame.name.clone();
                let value = frame.close();
                attach_to_top(&mut stack, name, value)?;
            }
            Ok(Event::Text(t)) => {
                let text = t
                    .unescape()
                    .map_err(|e| ExtractError::Parse(format!("bad character data: {e}")))?;
                if let Some(frame) = stack.last_mut() {
                    frame.text.push(text.into_owned());
                }
            }
            Ok(Event::CData(t)) => {
                if let Some(frame) = stack.last_mut() {
                    frame
                        .text
                        .push(String::from_utf8_lossy(&t.into_inner()).into_owned());
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(ExtractError::Parse(format!("XML parse failed: {e}"))),
        }
    }

    if stack.len() != 1 {
        return Err(ExtractError::Parse("unexpected end of document".to_string()));
    }
    let root = stack.remove(0);
    Ok(Value::Object(root.children))
}

fn attach_to_top(
    stack: &mut [Frame],
    name: String,
    value: Value,
) -> std::result::Result<(), ExtractError> {
    stack
        .last_mut()
        .ok_or_else(|| ExtractError::Parse("unmatched closing tag".to_string()))?
        .attach(name, value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn extract(xml: &str) -> String {
        XmlExtractor.extract(xml.as_bytes(), "xml").await.unwrap()
    }

    #[tokio::test]
    async fn text_only_elements_become_strings() {
        assert_eq!(extract("<note>Remember milk</note>").await, r#"{"note":"Remember milk"}"#);
    }

    #[tokio::test]
    async fn attributes_and_repeats_are_preserved() {
        let text = extract(r#"<greeting kind="warm"><to>World</to><to>Mars</to></greeting>"#).await;
        assert_eq!(text, r#"{"greeting":{"@kind":"warm","to":["World","Mars"]}}"#);
    }

    #[tokio::test]
    async fn empty_elements_become_empty_strings() {
        assert_eq!(extract("<root><empty/></root>").await, r#"{"root":{"empty":""}}"#);
    }

    #[tokio::test]
    async fn text_beside_attributes_lands_under_a_text_key() {
        assert_eq!(
            extract(r#"<v unit="s">42</v>"#).await,
            r#"{"v":{"@unit":"s","_text":"42"}}"#
        );
    }

    #[tokio::test]
    async fn mismatched_tags_are_a_parse_error() {
        let err = XmlExtractor
            .extract(b"<a><b></a>", "xml")
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::Parse(_)));
    }
}
