use serde::de::Error as _;
use serde_json::{Deserializer, Value};

use crate::models::PackageData;
use crate::package::path::{ends_with_ci, split_folder};
use crate::package::router::Target;

use super::DecodeResult;

/// Only `<section>/<file>.json` directly below `Activity/`.
pub(crate) fn classify(rest: &str) -> Option<Target<'_>> {
    let (section, file) = split_folder(rest)?;
    (!file.contains('/') && ends_with_ci(file, ".json")).then_some(Target::Activity { section })
}

/// Store the file's documents under `section`, replacing anything stored
/// for it earlier. The size ceiling is enforced before the entry is read.
pub(crate) fn apply(section: &str, content: &[u8], data: &mut PackageData) -> DecodeResult {
    let events = decode_documents(content)?;
    data.activity
        .get_or_insert_with(Default::default)
        .insert(section.to_string(), events);
    Ok(())
}

/// A JSON array, or one document per line as the analytics exports write them.
fn decode_documents(content: &[u8]) -> Result<Vec<Value>, serde_json::Error> {
    let content = content.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(content);
    let mut documents = Vec::new();
    for document in Deserializer::from_slice(content).into_iter::<Value>() {
        documents.push(document?);
    }

    if let [Value::Array(items)] = documents.as_mut_slice() {
        return Ok(std::mem::take(items));
    }
    if documents.is_empty() {
        return Err(serde_json::Error::custom("no JSON documents"));
    }
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_and_lines_decode_alike() {
        let array = decode_documents(br#"[{"event_type": "a"}, {"event_type": "b"}]"#).unwrap();
        let lines = decode_documents(b"{\"event_type\": \"a\"}\n{\"event_type\": \"b\"}\n").unwrap();
        assert_eq!(array, lines);
        assert_eq!(array.len(), 2);
    }

    #[test]
    fn rejects_empty_and_truncated() {
        assert!(decode_documents(b"  \n").is_err());
        assert!(decode_documents(b"{\"a\": 1}\n{\"b\"").is_err());
    }

    #[test]
    fn later_file_replaces_section() {
        let mut data = PackageData::default();
        apply("analytics", b"[1, 2, 3]", &mut data).unwrap();
        apply("analytics", b"[4]", &mut data).unwrap();
        apply("reporting", b"{\"x\": true}", &mut data).unwrap();
        let activity = data.activity.unwrap();
        assert_eq!(activity["analytics"], [Value::from(4)]);
        assert_eq!(activity["reporting"].len(), 1);
    }

    #[test]
    fn classify_depth() {
        assert_eq!(classify("tns/events.json"), Some(Target::Activity { section: "tns" }));
        assert_eq!(classify("events.json"), None);
    }
}
