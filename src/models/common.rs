use serde::Serialize;

/// A named suffix appended to a generation prompt to bias its style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StyleTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub suffix: &'static str,
    pub description: &'static str,
}

/// One selectable option, as listed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionInfo {
    pub id: String,
    pub description: String,
}
