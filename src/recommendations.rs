//! Recommendations
//!
//! Builds the prompt sent to the text-generation endpoint from a customer's
//! browsing history and maps the reply back onto catalog products.

/// Most products returned for one request.
pub const MAX_RECOMMENDATIONS: usize = 4;

/// Most history entries used to build a prompt.
pub const HISTORY_LIMIT: usize = 10;

/// Join viewed product names into the comma-separated list the prompt expects.
pub fn history_line<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Prompt asking for related products the customer has not viewed yet.
pub fn render_prompt(history: &str) -> String {
    format!(
        "You are a shopping assistant helping a customer discover products they will like.\n\
         Based on the recently viewed product names below, suggest up to {MAX_RECOMMENDATIONS} \
         other distinct product names from a typical e-commerce catalog.\n\
         Prefer products related to or complementing the viewed items, with some variety.\n\
         Do not suggest products already in the browsing history.\n\
         \n\
         Browsing history (comma-separated product names):\n\
         {history}\n\
         \n\
         Reply with only the product names separated by commas, for example: \
         \"Cool Gadget, Stylish Mug, Useful Book\".\n\
         Recommended products:"
    )
}

/// Split a comma-separated reply into trimmed, non-empty names.
pub fn parse_recommendations(reply: &str) -> Vec<String> {
    reply
        .split(',')
        .map(|name| name.trim().trim_matches('"').trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Map suggested names onto catalog entries by exact name.
///
/// Only the first [`MAX_RECOMMENDATIONS`] suggestions are considered. Unknown
/// names, names already in `history` and repeats are dropped.
pub fn match_catalog<'c, T, S: AsRef<str>>(
    suggestions: &[String],
    catalog: &'c [T],
    history: &[S],
    name_of: impl Fn(&T) -> &str,
) -> Vec<&'c T> {
    let mut matched: Vec<&'c T> = Vec::with_capacity(MAX_RECOMMENDATIONS);

    for suggestion in suggestions.iter().take(MAX_RECOMMENDATIONS) {
        let suggestion = suggestion.as_str();

        if history.iter().any(|seen| seen.as_ref() == suggestion) {
            continue;
        }

        let Some(product) = catalog
            .iter()
            .find(|product| name_of(product) == suggestion)
        else {
            continue;
        };

        if matched.iter().any(|existing| name_of(existing) == suggestion) {
            continue;
        }

        matched.push(product);
    }

    matched
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_is_comma_joined() {
        assert_eq!(history_line(&["Mug", "Tee"]), "Mug, Tee");
        assert_eq!(history_line::<&str>(&[]), "");
    }

    #[test]
    fn prompt_embeds_history() {
        let prompt = render_prompt("Mug, Tee");

        assert!(prompt.contains("Mug, Tee"), "history missing: {prompt}");
        assert!(prompt.contains("up to 4"), "limit missing: {prompt}");
    }

    #[test]
    fn reply_is_split_and_trimmed() {
        assert_eq!(
            parse_recommendations(" \"Poster\", Hoodie ,, Sticker Pack "),
            vec!["Poster", "Hoodie", "Sticker Pack"]
        );
        assert!(parse_recommendations("  ").is_empty());
    }

    #[test]
    fn catalog_matching_is_exact_and_capped() {
        let catalog = ["Mug", "Tee", "Poster", "Hoodie", "Cap", "Socks"];
        let suggestions = parse_recommendations("Mug, poster, Hoodie, Hoodie, Cap, Socks");

        let matched = match_catalog(&suggestions, &catalog, &["Mug"], |name| *name);

        assert_eq!(matched, vec![&"Hoodie"]);
    }

    #[test]
    fn matches_follow_suggestion_order() {
        let catalog = ["Mug", "Tee", "Poster"];
        let suggestions = parse_recommendations("Poster, Tee");

        let history: [&str; 0] = [];
        let matched = match_catalog(&suggestions, &catalog, &history, |name| *name);

        assert_eq!(matched, vec![&"Poster", &"Tee"]);
    }
}
