/// Splits a target descriptor into its organism name and strain designation.
///
/// The first token always belongs to the organism. The strain starts at the first
/// later token that opens with an uppercase letter or a digit.
pub fn split_species(descriptor: &str) -> (String, String) {
    let tokens: Vec<&str> = descriptor.split_whitespace().collect();
    if tokens.is_empty() {
        return (String::new(), String::new());
    }

    let strain_start = tokens
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, token)| {
            token
                .chars()
                .next()
                .is_some_and(|c| c.is_uppercase() || c.is_ascii_digit())
        })
        .map(|(position, _)| position);

    match strain_start {
        Some(position) => (tokens[..position].join(" "), tokens[position..].join(" ")),
        None => (descriptor.to_string(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strain_designation_is_split_off() {
        assert_eq!(
            split_species("Escherichia coli ATCC 25922"),
            ("Escherichia coli".to_string(), "ATCC 25922".to_string())
        );
    }

    #[test]
    fn numeric_token_starts_the_strain() {
        assert_eq!(
            split_species("Staphylococcus aureus 29213"),
            ("Staphylococcus aureus".to_string(), "29213".to_string())
        );
    }

    #[test]
    fn first_token_is_always_kept_in_the_organism() {
        assert_eq!(
            split_species("Candida Albicans"),
            ("Candida".to_string(), "Albicans".to_string())
        );
    }

    #[test]
    fn descriptor_without_strain_is_returned_untouched() {
        assert_eq!(split_species("Unknown"), ("Unknown".to_string(), String::new()));
        assert_eq!(
            split_species("Pseudomonas  aeruginosa"),
            ("Pseudomonas  aeruginosa".to_string(), String::new())
        );
    }

    #[test]
    fn empty_descriptor_gives_empty_pair() {
        assert_eq!(split_species("   "), (String::new(), String::new()));
    }
}
