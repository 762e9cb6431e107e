use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::SuggestionRequest;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(area|location)\}\}").expect("placeholder pattern"));

const TEMPLATE: &str = "\
You are an expert in land measurement standards in Gujarat, India. Your task is to provide clear, concise, and accurate information about land measurement units for a specific district or region.

Your response MUST be in Gujarati.

When a user provides a location, you will:
1.  Identify the specific measurement standards for that district (e.g., the size of a Bigha in square meters).
2.  Explain any local variations if they exist within or near that district.
3.  Provide the standard conversion rates between commonly used units like Bigha, Guntha, and Hectare for that specific region.
4.  If the input location is not a valid district in Gujarat, state that you do not have information for that region.
5.  Keep the explanation focused and easy to understand for a non-expert.

User Input:
Area: {{area}}
Location: {{location}}

Your expert suggestion in Gujarati:";

/// Fills the regional-standards prompt with the request fields.
///
/// Both placeholders are filled in one pass, so field text that happens to
/// contain a placeholder is kept verbatim.
pub fn render_prompt(req: &SuggestionRequest) -> String {
    let area = req.area.trim();
    let location = req.location.as_deref().map(str::trim).unwrap_or("");
    PLACEHOLDER
        .replace_all(TEMPLATE, |caps: &Captures<'_>| match &caps[1] {
            "area" => area.to_string(),
            _ => location.to_string(),
        })
        .into_owned()
}
