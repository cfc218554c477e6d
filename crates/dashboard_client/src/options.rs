use scraper::{Html, Selector};

/// Pulls the choices out of an HTML `<option>` list, as served by the tag
/// and app-version endpoints. The `value` attribute wins over the text.
pub fn parse_options(html: &str) -> Vec<String> {
    let fragment = Html::parse_fragment(html);
    let Ok(selector) = Selector::parse("option") else {
        return Vec::new();
    };

    fragment
        .select(&selector)
        .map(|option| match option.value().attr("value") {
            Some(value) => value.trim().to_string(),
            None => option.text().collect::<String>().trim().to_string(),
        })
        .filter(|choice| !choice.is_empty())
        .collect()
}
