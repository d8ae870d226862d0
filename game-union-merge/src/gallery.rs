use game_union_core::GameRecord;

/// Remove the primary image from a record's gallery.
///
/// Providers often repeat the header image as the first screenshot; once two
/// galleries are merged it would show up twice. Comparison is exact.
pub fn clean_gallery(record: &mut GameRecord) {
    if record.primary_image.is_empty() {
        return;
    }
    let primary = &record.primary_image;
    record.gallery.retain(|url| url != primary);
}
