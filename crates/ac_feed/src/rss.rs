use std::io::Cursor;

use chrono::Utc;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use ac_core::{Error, Result};

use crate::document::{FeedDocument, FeedEntry, FeedMetadata};

const ITUNES_NS: &str = "http://www.itunes.com/dtds/podcast-1.0.dtd";

fn ser_err(e: quick_xml::Error) -> Error {
    Error::Storage(format!("failed to serialize feed: {}", e))
}

/// Serializes the whole document as RSS 2.0 with podcast extensions.
pub fn to_rss(document: &FeedDocument) -> Result<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(ser_err)?;

    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    rss.push_attribute(("xmlns:itunes", ITUNES_NS));
    writer.write_event(Event::Start(rss)).map_err(ser_err)?;
    writer
        .write_event(Event::Start(BytesStart::new("channel")))
        .map_err(ser_err)?;

    write_text_element(&mut writer, "title", &document.metadata.title)?;
    write_text_element(&mut writer, "description", &document.metadata.description)?;
    write_text_element(&mut writer, "link", &document.metadata.link)?;
    write_text_element(&mut writer, "language", &document.metadata.language)?;
    write_text_element(&mut writer, "itunes:author", &document.metadata.author)?;

    let mut category = BytesStart::new("itunes:category");
    category.push_attribute(("text", document.metadata.category.as_str()));
    writer.write_event(Event::Empty(category)).map_err(ser_err)?;

    for entry in &document.entries {
        writer
            .write_event(Event::Start(BytesStart::new("item")))
            .map_err(ser_err)?;

        let mut guid = BytesStart::new("guid");
        guid.push_attribute(("isPermaLink", "false"));
        writer.write_event(Event::Start(guid)).map_err(ser_err)?;
        writer
            .write_event(Event::Text(BytesText::new(&entry.id)))
            .map_err(ser_err)?;
        writer
            .write_event(Event::End(BytesEnd::new("guid")))
            .map_err(ser_err)?;

        write_text_element(&mut writer, "title", &entry.title)?;
        write_text_element(&mut writer, "description", &entry.description)?;
        if let Some(link) = &entry.link {
            write_text_element(&mut writer, "link", link)?;
        }

        let mut enclosure = BytesStart::new("enclosure");
        enclosure.push_attribute(("url", entry.enclosure_url.as_str()));
        let length = entry.enclosure_length.to_string();
        enclosure.push_attribute(("length", length.as_str()));
        enclosure.push_attribute(("type", entry.enclosure_type.as_str()));
        writer.write_event(Event::Empty(enclosure)).map_err(ser_err)?;

        write_text_element(&mut writer, "pubDate", &entry.published.to_rfc2822())?;

        writer
            .write_event(Event::End(BytesEnd::new("item")))
            .map_err(ser_err)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("channel")))
        .map_err(ser_err)?;
    writer
        .write_event(Event::End(BytesEnd::new("rss")))
        .map_err(ser_err)?;

    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).map_err(|e| Error::Storage(format!("feed is not valid UTF-8: {}", e)))
}

fn write_text_element(writer: &mut Writer<Cursor<Vec<u8>>>, name: &str, text: &str) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(ser_err)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(ser_err)?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(ser_err)?;
    Ok(())
}

fn blank_entry() -> FeedEntry {
    FeedEntry {
        id: String::new(),
        title: String::new(),
        description: String::new(),
        link: None,
        enclosure_url: String::new(),
        enclosure_type: "audio/mpeg".to_string(),
        enclosure_length: 0,
        published: Utc::now(),
    }
}

/// Best-effort parse of a feed this service wrote earlier. Returns `None` on
/// anything unexpected; the caller falls back to a fresh document.
pub fn parse_rss(xml: &str) -> Option<FeedDocument> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut metadata = FeedMetadata::default();
    let mut entries = Vec::new();
    let mut current: Option<FeedEntry> = None;
    let mut field: Vec<u8> = Vec::new();
    let mut saw_rss = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"rss" => saw_rss = true,
                b"item" => current = Some(blank_entry()),
                name => field = name.to_vec(),
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"enclosure" => {
                    if let Some(entry) = current.as_mut() {
                        for attr in e.attributes().flatten() {
                            let value = String::from_utf8(attr.value.into_owned()).ok()?;
                            match attr.key.as_ref() {
                                b"url" => entry.enclosure_url = value,
                                b"length" => {
                                    entry.enclosure_length = value.parse().unwrap_or(0)
                                }
                                b"type" => entry.enclosure_type = value,
                                _ => (),
                            }
                        }
                    }
                }
                b"itunes:category" => {
                    for attr in e.attributes().flatten() {
                        if attr.key.as_ref() == b"text" {
                            metadata.category = String::from_utf8(attr.value.into_owned()).ok()?;
                        }
                    }
                }
                _ => (),
            },
            Ok(Event::Text(t)) => {
                let text = t.unescape().ok()?.into_owned();
                match current.as_mut() {
                    Some(entry) => match field.as_slice() {
                        b"guid" => entry.id = text,
                        b"title" => entry.title = text,
                        b"description" => entry.description = text,
                        b"link" => entry.link = Some(text),
                        b"pubDate" => {
                            entry.published = chrono::DateTime::parse_from_rfc2822(&text)
                                .ok()?
                                .with_timezone(&Utc)
                        }
                        _ => (),
                    },
                    None => match field.as_slice() {
                        b"title" => metadata.title = text,
                        b"description" => metadata.description = text,
                        b"link" => metadata.link = text,
                        b"language" => metadata.language = text,
                        b"itunes:author" => metadata.author = text,
                        _ => (),
                    },
                }
            }
            Ok(Event::End(e)) => {
                if e.name().as_ref() == b"item" {
                    entries.push(current.take()?);
                }
                field.clear();
            }
            Ok(Event::Eof) => break,
            Err(_) => return None,
            _ => (),
        }
        buf.clear();
    }

    if !saw_rss {
        return None;
    }

    Some(FeedDocument { metadata, entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::FeedMetadata;

    fn document_with_entry(title: &str) -> FeedDocument {
        let mut document = FeedDocument::new(FeedMetadata::default());
        document.entries.push(FeedEntry {
            id: "e1".to_string(),
            title: title.to_string(),
            description: "A description".to_string(),
            link: Some("https://example.com/a".to_string()),
            enclosure_url: "https://bucket.s3.us-east-1.amazonaws.com/a.mp3".to_string(),
            enclosure_type: "audio/mpeg".to_string(),
            enclosure_length: 0,
            published: Utc::now(),
        });
        document
    }

    #[test]
    fn test_written_feed_parses_back() {
        let document = document_with_entry("Example & Co <news>");
        let xml = to_rss(&document).unwrap();
        let parsed = parse_rss(&xml).unwrap();

        assert_eq!(parsed.metadata, document.metadata);
        assert_eq!(parsed.entries.len(), 1);
        assert_eq!(parsed.entries[0].title, "Example & Co <news>");
        assert_eq!(
            parsed.entries[0].enclosure_url,
            "https://bucket.s3.us-east-1.amazonaws.com/a.mp3"
        );
    }

    #[test]
    fn test_pub_date_round_trips_to_the_second() {
        let document = document_with_entry("Example");
        let xml = to_rss(&document).unwrap();
        let parsed = parse_rss(&xml).unwrap();

        let before = document.entries[0].published.timestamp();
        assert_eq!(parsed.entries[0].published.timestamp(), before);
    }

    #[test]
    fn test_garbage_does_not_parse() {
        assert!(parse_rss("not a feed at all").is_none());
        assert!(parse_rss("<other><doc/></other>").is_none());
    }

    #[test]
    fn test_empty_feed_has_no_entries() {
        let xml = to_rss(&FeedDocument::new(FeedMetadata::default())).unwrap();
        let parsed = parse_rss(&xml).unwrap();
        assert!(parsed.entries.is_empty());
    }
}
