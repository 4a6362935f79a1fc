//! Slide decks (`.pptx`, `.ppsx`): one line of text per slide.
//!
//! A deck is a zip archive holding one `ppt/slides/slideN.xml` part per
//! slide. Text lives in `<a:t>` runs inside those parts. Runs on a slide
//! join with spaces, slides join with newlines, and slides are visited in
//! numeric order so `slide10` lands after `slide2`.

use groundwork_core::error::ExtractError;
use groundwork_core::extract::Extractor;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use zip::ZipArchive;

pub struct SlideDeckExtractor;

#[async_trait::async_trait]
impl Extractor for SlideDeckExtractor {
    fn name(&self) -> &str {
        "slide_deck"
    }

    fn extensions(&self) -> &[&str] {
        &["pptx", "ppsx"]
    }

    async fn extract(
        &self,
        bytes: &[u8],
        _extension: &str,
    ) -> std::result::Result<String, ExtractError> {
        let bytes = bytes.to_vec();
        tokio::task::spawn_blocking(move || deck_text(bytes))
            .await
            .map_err(|e| ExtractError::TaskFailed(format!("slide deck task join error: {e}")))?
    }
}

fn deck_text(bytes: Vec<u8>) -> std::result::Result<String, ExtractError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractError::Archive(format!("deck archive open failed: {e}")))?;

    let mut slides: Vec<(u32, String)> = archive
        .file_names()
        .filter_map(|name| slide_number(name).map(|n| (n, name.to_string())))
        .collect();
    slides.sort_by_key(|(n, _)| *n);

    let mut lines = Vec::with_capacity(slides.len());
    for (_, name) in slides {
        let mut xml = String::new();
        archive
            .by_name(&name)
            .map_err(|e| ExtractError::Archive(format!("deck entry {name} missing: {e}")))?
            .read_to_string(&mut xml)
            .map_err(|e| ExtractError::Archive(format!("deck entry {name} unreadable: {e}")))?;
        lines.push(slide_text(&xml)?);
    }
    Ok(lines.join("\n"))
}

/// Slide number for entries shaped like `ppt/slides/slide12.xml`.
fn slide_number(entry_name: &str) -> Option<u32> {
    entry_name
        .strip_prefix("ppt/slides/slide")?
        .strip_suffix(".xml")?
        .parse()
        .ok()
}

/// Collect the `<a:t>` runs of one slide part, joined with spaces.
fn slide_text(xml: &str) -> std::result::Result<String, ExtractError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut runs = Vec::new();
    let mut in_text_run = false;
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"t" => in_text_run = true,
            Ok(Event::End(e)) if e.local_name().as_ref() == b"t" => in_text_run = false,
            Ok(Event::Text(t)) if in_text_run => {
                let text = t
                    .unescape()
                    .map_err(|e| ExtractError::Parse(format!("slide text decode failed: {e}")))?;
                runs.push(text.into_owned());
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(ExtractError::Parse(format!("slide XML parse failed: {e}"))),
        }
    }
    Ok(runs.join(" "))
}
