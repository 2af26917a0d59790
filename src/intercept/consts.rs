/// Path fragment that identifies the panorama metadata call.
pub const METADATA_PATH_MARKER: &str = "/GetMetadata";
/// Larger metadata responses are forwarded without being searched for coordinates.
pub const MAX_INSPECTED_BODY_SIZE: usize = 16 * 1024 * 1024;
