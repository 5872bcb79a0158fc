/// Client-side identifier for a freshly created tag.
///
/// The persistence layer may replace it with its own canonical id.
pub fn new_tag_uuid() -> String {
    uuid::Uuid::new_v4().to_string()
}
