/// Splits a name into label lines before every uppercase letter that starts a
/// word, i.e. an ASCII capital followed by a character that is not one.
/// Position 0 never splits.
pub fn split_label(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut lines = Vec::new();
    let mut current = String::new();
    for (i, &c) in chars.iter().enumerate() {
        let starts_word = i > 0
            && c.is_ascii_uppercase()
            && chars.get(i + 1).is_some_and(|next| !next.is_ascii_uppercase());
        if starts_word {
            lines.push(std::mem::take(&mut current));
        }
        current.push(c);
    }
    lines.push(current);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_boundaries() {
        assert_eq!(split_label("GrandTheftAutoV"), vec!["Grand", "Theft", "AutoV"]);
    }

    #[test]
    fn spaces_stay_on_the_previous_line() {
        assert_eq!(split_label("Wii Sports"), vec!["Wii ", "Sports"]);
    }

    #[test]
    fn capital_before_non_capital_starts_a_line() {
        assert_eq!(split_label("FIFA 16"), vec!["FIF", "A 16"]);
        assert_eq!(split_label("NBA2K"), vec!["NB", "A2K"]);
        assert_eq!(split_label("ABC"), vec!["ABC"]);
    }

    #[test]
    fn trivial_inputs() {
        assert_eq!(split_label(""), vec![""]);
        assert_eq!(split_label("tetris"), vec!["tetris"]);
        assert_eq!(split_label("A"), vec!["A"]);
    }
}
