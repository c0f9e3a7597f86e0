//! XML story documents for single-story API submission.

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use trac_model::{NormalizedStory, Requestor};
use trac_transform::{Quoting, TimeFormatter};

use crate::error::{OutputError, Result};

/// Builds the `<story>` document for one record.
///
/// Ownership fields of the record itself are never sent: the service rejects
/// stories naming users who are not project members. Only a requestor
/// resolved against the project roster is emitted, and note authors are
/// omitted for the same reason.
#[derive(Debug, Clone, Copy, Default)]
pub struct PayloadBuilder {
    time: TimeFormatter,
}

impl PayloadBuilder {
    #[must_use]
    pub const fn new(time: TimeFormatter) -> Self {
        Self { time }
    }

    pub fn build(
        &self,
        story: &NormalizedStory,
        project_id: u64,
        requestor: &Requestor,
    ) -> Result<String> {
        let mut xml = Writer::new_with_indent(Vec::new(), b' ', 2);

        start(&mut xml, BytesStart::new("story"))?;
        write_typed_element(&mut xml, "project_id", "integer", &project_id.to_string())?;
        write_text_element(&mut xml, "story_type", &story.story_type)?;
        write_text_element(&mut xml, "current_state", &story.current_state)?;
        write_text_element(&mut xml, "description", &story.description)?;
        write_text_element(&mut xml, "name", &story.story)?;
        if let Some(requested_by) = requestor.as_resolved() {
            write_text_element(&mut xml, "requested_by", requested_by)?;
        }
        write_typed_element(&mut xml, "created_at", "datetime", &story.created_at)?;
        write_text_element(&mut xml, "labels", &story.labels)?;

        let mut notes = BytesStart::new("notes");
        notes.push_attribute(("type", "array"));
        start(&mut xml, notes)?;
        for comment in &story.notes_full {
            start(&mut xml, BytesStart::new("note"))?;
            write_text_element(&mut xml, "text", &comment.text)?;
            let noted_at = self.time.format(comment.time, Quoting::Plain);
            write_typed_element(&mut xml, "noted_at", "datetime", &noted_at)?;
            end(&mut xml, "note")?;
        }
        end(&mut xml, "notes")?;
        end(&mut xml, "story")?;

        String::from_utf8(xml.into_inner()).map_err(xml_error)
    }
}

fn start(writer: &mut Writer<Vec<u8>>, element: BytesStart<'_>) -> Result<()> {
    writer.write_event(Event::Start(element)).map_err(xml_error)
}

fn end(writer: &mut Writer<Vec<u8>>, name: &str) -> Result<()> {
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(xml_error)
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    start(writer, BytesStart::new(name))?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(xml_error)?;
    end(writer, name)
}

fn write_typed_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    value_type: &str,
    text: &str,
) -> Result<()> {
    let mut element = BytesStart::new(name);
    element.push_attribute(("type", value_type));
    start(writer, element)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(xml_error)?;
    end(writer, name)
}

fn xml_error(err: impl std::fmt::Display) -> OutputError {
    OutputError::Xml(err.to_string())
}
