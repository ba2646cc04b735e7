//! XML text extraction

use eyre::Result;
use quick_xml::events::Event;
use quick_xml::reader::Reader;

/// Text content of every element named `tag`, in document order.
///
/// The tag is matched on its local name, so namespace prefixes are ignored.
/// Each element's descendant text and CDATA nodes are trimmed, empty ones are
/// skipped and the rest joined with a single space. Nested matches each get
/// their own entry and contribute their text to every enclosing match.
pub fn element_texts(xml: &str, tag: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let tag = tag.as_bytes();

    let mut found: Vec<Vec<String>> = Vec::new();
    let mut open: Vec<usize> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.local_name().as_ref() == tag => {
                open.push(found.len());
                found.push(Vec::new());
            }
            Event::End(e) if e.local_name().as_ref() == tag => {
                open.pop();
            }
            Event::Empty(e) if e.local_name().as_ref() == tag => {
                found.push(Vec::new());
            }
            Event::Text(e) if !open.is_empty() => {
                let text = e.unescape()?;
                push_text(&mut found, &open, &text);
            }
            Event::CData(e) if !open.is_empty() => {
                let text = String::from_utf8_lossy(&e);
                push_text(&mut found, &open, &text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(found.into_iter().map(|parts| parts.join(" ")).collect())
}

fn push_text(found: &mut [Vec<String>], open: &[usize], text: &str) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    for &i in open {
        found[i].push(text.to_string());
    }
}
