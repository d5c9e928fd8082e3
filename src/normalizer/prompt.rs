use crate::models::StyleTemplate;

pub const STYLE_TEMPLATES: [StyleTemplate; 6] = [
    StyleTemplate {
        id: "realistic",
        name: "Realistic",
        suffix: ", photorealistic, high quality, detailed",
        description: "Lifelike photographic look",
    },
    StyleTemplate {
        id: "artistic",
        name: "Artistic",
        suffix: ", artistic painting, masterpiece, fine art",
        description: "Painterly fine-art look",
    },
    StyleTemplate {
        id: "anime",
        name: "Anime",
        suffix: ", anime style, manga art, japanese animation",
        description: "Japanese animation style",
    },
    StyleTemplate {
        id: "cartoon",
        name: "Cartoon",
        suffix: ", cartoon style, cute, colorful",
        description: "Cute cartoon look",
    },
    StyleTemplate {
        id: "sketch",
        name: "Sketch",
        suffix: ", pencil sketch, black and white, artistic drawing",
        description: "Pencil sketch",
    },
    StyleTemplate {
        id: "oil",
        name: "Oil painting",
        suffix: ", oil painting, classical art, brush strokes",
        description: "Classical oil painting",
    },
];

pub fn find_style(style_id: &str) -> Option<&'static StyleTemplate> {
    STYLE_TEMPLATES.iter().find(|template| template.id == style_id)
}

/// Appends the selected style's suffix. Missing, empty and unknown style ids
/// leave the prompt untouched.
pub fn compose_prompt(prompt: &str, style_id: Option<&str>) -> String {
    match style_id.filter(|id| !id.is_empty()).and_then(find_style) {
        Some(template) => format!("{}{}", prompt, template.suffix),
        None => prompt.to_string(),
    }
}
