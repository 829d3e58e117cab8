// SPDX-License-Identifier: MIT OR Apache-2.0
//! Name helpers shared by takes, shots and cameras.

use std::collections::HashSet;

/// Return `name` if unused, otherwise the first free `name.000`, `name.001`, ...
pub fn find_first_unique_name<'a, I>(name: &str, existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let taken: HashSet<&str> = existing.into_iter().collect();
    if !taken.contains(name) {
        return name.to_string();
    }

    let mut index = 0u32;
    loop {
        let candidate = format!("{name}.{index:03}");
        if !taken.contains(candidate.as_str()) {
            return candidate;
        }
        index += 1;
    }
}

/// Make a name usable as a single path component
pub fn path_compliant_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_whitespace() => '_',
            c => c,
        })
        .collect();

    if cleaned.is_empty() {
        "_".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_name_unused() {
        assert_eq!(find_first_unique_name("Sh010", ["Sh020", "Sh030"]), "Sh010");
    }

    #[test]
    fn test_unique_name_suffixes() {
        assert_eq!(find_first_unique_name("Sh010", ["Sh010"]), "Sh010.000");
        assert_eq!(
            find_first_unique_name("Sh010", ["Sh010", "Sh010.000", "Sh010.001"]),
            "Sh010.002"
        );
    }

    #[test]
    fn test_path_compliant_name() {
        assert_eq!(path_compliant_name("Main Take"), "Main_Take");
        assert_eq!(path_compliant_name("a/b:c"), "a_b_c");
        assert_eq!(path_compliant_name("   "), "_");
    }
}
