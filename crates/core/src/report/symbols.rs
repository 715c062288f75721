use std::collections::{BTreeSet, HashMap};

use crate::model::{BinaryImage, BinaryUuid, StackTraceCall};

/// Distinct UUIDs of the images that the given frames land in.
///
/// Each load address is resolved once, against the first image in table order
/// carrying the same token; later duplicates are ignored. Frames whose load
/// address has no image contribute nothing.
pub fn uuids_for_symbolication(
    calls: &[StackTraceCall],
    images: &[BinaryImage],
) -> BTreeSet<BinaryUuid> {
    let mut by_address: HashMap<&str, Option<&BinaryImage>> = HashMap::new();

    for call in calls {
        by_address.entry(call.load_address.as_str()).or_insert_with(|| {
            images.iter().find(|image| image.load_address == call.load_address)
        });
    }

    by_address.values().flatten().map(|image| image.uuid).collect()
}
