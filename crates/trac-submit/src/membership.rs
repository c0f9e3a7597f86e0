//! Parsing of project membership rosters.

use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::Event;

use crate::error::{Result, SubmitError};

const NAME_PATH: [&[u8]; 3] = [b"membership", b"person", b"name"];

/// Person name of the first membership in a roster document.
///
/// Returns `Ok(None)` for a well-formed roster without members or without a
/// name on the first member.
pub fn first_member_name(xml: &str) -> Result<Option<String>> {
    let mut reader = Reader::from_str(xml);

    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut seen_membership = false;
    let mut name = String::new();

    loop {
        let event = reader
            .read_event()
            .map_err(|err| SubmitError::Membership(err.to_string()))?;
        match event {
            Event::Start(element) => {
                let local = element.local_name().as_ref().to_vec();
                if local == NAME_PATH[0] {
                    if seen_membership {
                        // Only the first member counts.
                        break;
                    }
                    seen_membership = true;
                }
                path.push(local);
            }
            Event::End(_) => {
                if in_name(&path) {
                    break;
                }
                path.pop();
            }
            Event::Text(text) if in_name(&path) => {
                let raw = String::from_utf8_lossy(&text).into_owned();
                let decoded =
                    unescape(&raw).map_err(|err| SubmitError::Membership(err.to_string()))?;
                name.push_str(&decoded);
            }
            Event::GeneralRef(reference) if in_name(&path) => {
                let raw = format!("&{};", String::from_utf8_lossy(&reference));
                let decoded =
                    unescape(&raw).map_err(|err| SubmitError::Membership(err.to_string()))?;
                name.push_str(&decoded);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let name = name.trim();
    Ok((!name.is_empty()).then(|| name.to_string()))
}

fn in_name(path: &[Vec<u8>]) -> bool {
    path.len() >= NAME_PATH.len()
        && path[path.len() - NAME_PATH.len()..]
            .iter()
            .zip(NAME_PATH)
            .all(|(seen, expected)| seen.as_slice() == expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROSTER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<memberships type="array">
  <membership>
    <id>1</id>
    <person>
      <email>jane@example.com</email>
      <name>Jane Doe</name>
      <initials>JD</initials>
    </person>
    <role>Owner</role>
    <project>
      <id>99</id>
      <name>Legacy Import</name>
    </project>
  </membership>
  <membership>
    <id>2</id>
    <person>
      <name>John Roe</name>
    </person>
  </membership>
</memberships>"#;

    #[test]
    fn first_member_wins() {
        assert_eq!(first_member_name(ROSTER).unwrap().as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn project_name_is_not_a_person() {
        let xml = r#"<memberships type="array">
  <membership>
    <project><name>Legacy Import</name></project>
    <person><name>Ann</name></person>
  </membership>
</memberships>"#;
        assert_eq!(first_member_name(xml).unwrap().as_deref(), Some("Ann"));
    }

    #[test]
    fn entities_are_decoded() {
        let xml = "<memberships><membership><person><name>Smith &amp; Sons</name></person></membership></memberships>";
        assert_eq!(
            first_member_name(xml).unwrap().as_deref(),
            Some("Smith & Sons")
        );
    }

    #[test]
    fn empty_roster() {
        assert_eq!(first_member_name(r#"<memberships type="array"></memberships>"#).unwrap(), None);
        assert_eq!(first_member_name("").unwrap(), None);
    }

    #[test]
    fn first_member_without_name() {
        let xml = "<memberships><membership><id>1</id></membership><membership><person><name>Late</name></person></membership></memberships>";
        assert_eq!(first_member_name(xml).unwrap(), None);
    }

    #[test]
    fn mismatched_tags_are_an_error() {
        let err = first_member_name("<memberships><membership></person></memberships>").unwrap_err();
        assert!(matches!(err, SubmitError::Membership(_)));
    }
}
