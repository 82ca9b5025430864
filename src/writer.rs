use std::io::{Cursor, Write};

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::document::{Document, Element};
use crate::error::ConvertError;

type Result<T> = std::result::Result<T, ConvertError>;

/// Serialize a document as indented UTF-8 XML.
pub fn write_document(doc: &Document) -> Result<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    let decl = &doc.declaration;
    write(
        &mut writer,
        Event::Decl(BytesDecl::new(&decl.version, decl.encoding.as_deref(), None)),
    )?;
    write_element(&mut writer, doc.root(), Some(&doc.namespace))?;

    Ok(writer.into_inner().into_inner())
}

/// Serialize a document into a `String`.
pub fn to_xml_string(doc: &Document) -> Result<String> {
    let bytes = write_document(doc)?;
    String::from_utf8(bytes).map_err(|e| ConvertError::xml(format!("invalid UTF-8: {e}")))
}

/// Write one element and its subtree. `namespace` is only given for the root,
/// where it becomes the default `xmlns`.
fn write_element<W: Write>(
    writer: &mut Writer<W>,
    element: &Element,
    namespace: Option<&str>,
) -> Result<()> {
    let mut start = BytesStart::new(element.name());
    if let Some(ns) = namespace {
        start.push_attribute(("xmlns", ns));
    }
    for (key, value) in element.attributes() {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.is_empty() {
        return write(writer, Event::Empty(start));
    }

    write(writer, Event::Start(start))?;
    if let Some(text) = element.text() {
        write(writer, Event::Text(BytesText::new(text)))?;
    }
    for child in element.children() {
        write_element(writer, child, None)?;
    }
    write(writer, Event::End(BytesEnd::new(element.name())))
}

fn write<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| ConvertError::xml(format!("Write error: {e}")))
}
