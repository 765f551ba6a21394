// Upstream payload normalization shared by the provider adapters

/// Normalizes an upstream timestamp to the canonical
/// `YYYY-MM-DD HH:MM:SS` form: ISO `T` separators become spaces and
/// fractional seconds or timezone suffixes are cut. Values too short
/// to carry a time component pass through unchanged.
pub fn normalize_timestamp(raw: &str) -> String {
    let cleaned = raw.trim().replace('T', " ");
    if cleaned.len() > 19 {
        cleaned[..19].to_string()
    } else {
        cleaned
    }
}
