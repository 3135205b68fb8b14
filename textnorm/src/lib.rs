// `  Foo   Bar ` => `foo bar`
// `MiXeD Case` => `mixed case`
// `one\ttwo\nthree` => `one two three`
// `` => ``

/// Canonicalize text for comparison: lowercase, trim, and collapse every
/// internal whitespace run to a single space.
///
/// Every key lookup and substring check in the query engine goes through
/// this function; stored record values are never rewritten.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        for ch in word.chars() {
            out.extend(ch.to_lowercase());
        }
    }
    out
}
