//! Case-insensitive name matching shared by the department stores.

#[inline]
fn normalize(text: &str) -> String {
    text.to_lowercase()
}

/// true when `fragment` occurs anywhere in `name`, ignoring case.
/// An empty fragment matches every name.
pub fn name_matches(name: &str, fragment: &str) -> bool {
    normalize(name).contains(&normalize(fragment))
}

/// Builds the bound value for `LOWER(name) LIKE ? ESCAPE '\\'`.
///
/// The fragment is lowercased and `%`, `_` and `\` are escaped so they match
/// literally, then wrapped in `%` for an unanchored match.
pub fn like_pattern(fragment: &str) -> String {
    let fragment = normalize(fragment);
    let mut pattern = String::with_capacity(fragment.len() + 2);

    pattern.push('%');
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');

    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMES: [&str; 3] = ["Sales", "Engineering", "Customer Success"];

    fn lookup(fragment: &str) -> Vec<&'static str> {
        NAMES
            .iter()
            .copied()
            .filter(|name| name_matches(name, fragment))
            .collect()
    }

    #[test]
    fn substring_anywhere_in_name() {
        assert_eq!(lookup("es"), vec!["Sales", "Customer Success"]);
        assert_eq!(lookup("ENGIN"), vec!["Engineering"]);
        assert_eq!(lookup("omer su"), vec!["Customer Success"]);
    }

    #[test]
    fn empty_fragment_matches_everything() {
        assert_eq!(lookup(""), NAMES.to_vec());
    }

    #[test]
    fn unknown_fragment_matches_nothing() {
        assert!(lookup("zzz").is_empty());
    }

    #[test]
    fn fragment_case_does_not_change_results() {
        let expected = lookup("sales");
        assert_eq!(lookup("SALES"), expected);
        assert_eq!(lookup("SaLeS"), expected);
        assert_eq!(expected, vec!["Sales"]);
    }

    #[test]
    fn non_ascii_names_fold_case() {
        assert!(name_matches("Öffentlichkeitsarbeit", "öFF"));
    }

    #[test]
    fn like_pattern_wraps_and_lowercases() {
        assert_eq!(like_pattern("ENGIN"), "%engin%");
        assert_eq!(like_pattern(""), "%%");
    }

    #[test]
    fn like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("50%"), "%50\\%%");
        assert_eq!(like_pattern("r_d"), "%r\\_d%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
