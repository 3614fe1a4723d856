// Cross-document consolidation.

use std::collections::BTreeMap;

use log::debug;

use crate::models::{Confidence, ConsolidatedRecord, DocumentOutcome, ExtractedField, FieldKey};

/// An incoming field only replaces an existing one on strictly higher
/// confidence; ties keep the earlier document's value.
pub fn outranks(incoming: Confidence, existing: Confidence) -> bool {
    incoming > existing
}

/// Fold per-document field lists, in document order, into one record.
pub fn merge_fields<'a, I>(field_lists: I) -> ConsolidatedRecord
where
    I: IntoIterator<Item = &'a [ExtractedField]>,
{
    let mut merged: BTreeMap<FieldKey, ExtractedField> = BTreeMap::new();

    for fields in field_lists {
        for field in fields {
            let replace = merged
                .get(&field.key)
                .map_or(true, |existing| outranks(field.confidence, existing.confidence));
            if replace {
                if let Some(previous) = merged.get(&field.key) {
                    debug!(
                        "{}: {} ({}) replaces {} ({})",
                        field.key,
                        field.source,
                        field.confidence,
                        previous.source,
                        previous.confidence
                    );
                }
                merged.insert(field.key, field.clone());
            }
        }
    }

    ConsolidatedRecord::from_partial(merged)
}

pub fn merge(outcomes: &[DocumentOutcome]) -> ConsolidatedRecord {
    merge_fields(outcomes.iter().map(|outcome| outcome.fields.as_slice()))
}
