//! Text splitting and fixed-width row normalization used by column expansion.

/// Splits text on every non-overlapping occurrence of the separator.
/// Empty text yields no parts at all, not a single empty part.
pub fn split(text: &str, separator: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split(separator).map(str::to_owned).collect()
}

/// Lays parts out into exactly `width` values.
///
/// The first `width - 1` parts are kept verbatim, all remaining parts are joined
/// with `join_char` into one trailing value, and the row is right-padded with
/// `missing_value`. A width of one therefore collapses every part into the joined value.
pub fn normalize(parts: &[String], join_char: &str, width: usize, missing_value: &str) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let head_len = parts.len().min(width - 1);
    let (head, tail) = parts.split_at(head_len);
    let mut row = head.to_vec();
    if !tail.is_empty() {
        row.push(tail.join(join_char));
    }
    row.resize(width, missing_value.to_owned());
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn split_empty() {
        assert!(split("", "|").is_empty());
        assert!(split("", ",").is_empty());
    }

    #[test]
    fn split_without_separator() {
        assert_eq!(split("ajaja", "|"), strings(&["ajaja"]));
    }

    #[test]
    fn split_keeps_empty_parts() {
        assert_eq!(split("a||b|", "|"), strings(&["a", "", "b", ""]));
        assert_eq!(split("|", "|"), strings(&["", ""]));
    }

    #[test]
    fn split_multi_char_separator() {
        assert_eq!(split("a::b::c", "::"), strings(&["a", "b", "c"]));
    }

    #[test]
    fn split_then_join_is_lossless() {
        let text = "ajaja|hdsd|sds";
        assert_eq!(split(text, "|").join("|"), text);
    }

    #[test]
    fn normalize_exact_width() {
        assert_eq!(normalize(&strings(&["1", "2"]), "|", 2, "NA"), strings(&["1", "2"]));
    }

    #[test]
    fn normalize_joins_overflow() {
        assert_eq!(normalize(&strings(&["1", "2", "3"]), "|", 2, "NA"), strings(&["1", "2|3"]));
    }

    #[test]
    fn normalize_pads_short_rows() {
        assert_eq!(normalize(&strings(&["1", "2"]), "|", 3, "NA"), strings(&["1", "2", "NA"]));
        assert_eq!(normalize(&[], "|", 3, "NA"), strings(&["NA", "NA", "NA"]));
    }

    #[test]
    fn normalize_width_one_collapses() {
        assert_eq!(
            normalize(&strings(&["ajaja", "hdsd", "sds"]), ",", 1, "NA"),
            strings(&["ajaja,hdsd,sds"])
        );
        assert_eq!(normalize(&[], ",", 1, "NA"), strings(&["NA"]));
    }

    #[test]
    fn normalize_width_zero() {
        assert!(normalize(&strings(&["a", "b"]), "|", 0, "NA").is_empty());
    }

    #[test]
    fn normalize_keeps_empty_trailing_part() {
        assert_eq!(normalize(&strings(&["a", ""]), "|", 2, "NA"), strings(&["a", ""]));
    }

    #[test]
    fn normalize_length_invariant() {
        let parts = strings(&["a", "b", "c", "d", "e"]);
        for width in 0..8 {
            for len in 0..=parts.len() {
                assert_eq!(normalize(&parts[..len], "-", width, "NA").len(), width);
            }
        }
    }
}
