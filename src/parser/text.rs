/// Collapse every whitespace run to a single space and trim both ends.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Left-pad `s` with `fill` until it is at least `width` characters long.
pub fn lpad(s: &str, width: usize, fill: char) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.to_string();
    }
    let mut out: String = std::iter::repeat(fill).take(width - len).collect();
    out.push_str(s);
    out
}

pub fn zero_pad(s: &str, width: usize) -> String {
    lpad(s, width, '0')
}

/// Leading decimal digits parsed as an integer, ignoring anything after them.
pub fn parse_leading_int(s: &str) -> Option<i32> {
    let s = s.trim_start();
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse().ok()
}
