//! Small text helpers shared by the validator and the report renderer.

/// Upper-case the first character if it is an ASCII letter and leave the
/// rest untouched, as PHP's `ucfirst` does.
///
/// Apigility stores each API version in a namespace folder named after the
/// version with its first letter capitalized (`v1` lives in `src/V1`).
pub fn ucfirst(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => std::iter::once(first.to_ascii_uppercase()).chain(chars).collect(),
        None => String::new(),
    }
}

/// Render a list of strings as a compact JSON array (`["GET","POST"]`).
pub fn json_list<S: AsRef<str>>(items: &[S]) -> String {
    let items: Vec<&str> = items.iter().map(AsRef::as_ref).collect();
    // Serializing a list of strings cannot fail.
    serde_json::to_string(&items).unwrap_or_else(|_| String::from("[]"))
}
