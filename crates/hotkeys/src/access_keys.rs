//! One-time migration of native access keys into marker attributes.
//!
//! Native access keys would fire alongside the dispatcher's Alt bindings, so
//! every non-empty `accesskey` becomes `<marker>="Alt+<key>"` and is removed.

use webhotkeys_config::constants::{ACCESS_KEY_ATTRIBUTE, ACCESS_KEY_MODIFIER};

use crate::document::Document;

/// Migrate access keys, returning how many elements were converted.
pub(crate) fn migrate_access_keys<D: Document>(doc: &mut D, marker_attribute: &str) -> usize {
    let elements = match doc.query_selector_all(&format!("[{ACCESS_KEY_ATTRIBUTE}]")) {
        Ok(elements) => elements,
        Err(error) => {
            tracing::error!(%error, "Could not query access keys");
            return 0;
        }
    };

    let mut migrated = 0;
    for element in elements {
        let Some(key) = doc
            .attribute(element, ACCESS_KEY_ATTRIBUTE)
            .filter(|key| !key.is_empty())
        else {
            continue;
        };
        let combination = format!("{ACCESS_KEY_MODIFIER}+{key}");
        doc.set_attribute(element, marker_attribute, &combination);
        doc.remove_attribute(element, ACCESS_KEY_ATTRIBUTE);
        tracing::debug!(%element, %combination, "Migrated access key");
        migrated += 1;
    }
    migrated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MemoryDocument;

    #[test]
    fn test_migrates_non_empty_access_keys() {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let save = doc.append_element(body, "button", &[("accesskey", "s")]);
        let empty = doc.append_element(body, "button", &[("accesskey", "")]);

        assert_eq!(migrate_access_keys(&mut doc, "data-hotkey"), 1);

        assert_eq!(doc.attribute(save, "data-hotkey").as_deref(), Some("Alt+s"));
        assert_eq!(doc.attribute(save, "accesskey"), None);
        assert_eq!(doc.attribute(empty, "data-hotkey"), None);
        assert_eq!(doc.attribute(empty, "accesskey").as_deref(), Some(""));
    }
}
