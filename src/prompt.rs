/*!
 * Prompt construction for the diffusion-model image provider.
 *
 * Builds a contextual prompt from a content request by combining a scene
 * template with a decoration phrase. Template choice is random per call; the
 * local placeholder path never goes through here, so determinism is not
 * required.
 */

use rand::prelude::IndexedRandom;

use crate::content::ContentRequest;

/// Scene templates; `{}` is replaced with the requested word
const PROMPT_TEMPLATES: &[&str] = &[
    "A detailed illustration of {} in a Japanese style",
    "A vibrant, artistic representation of {} with Japanese cultural elements",
    "A photorealistic image of {} in a traditional Japanese setting",
];

/// Decoration phrases appended to the chosen template
const PROMPT_DECORATIONS: &[&str] = &[
    "with soft watercolor textures",
    "in a minimalist composition",
    "with intricate Japanese design elements",
    "featuring subtle traditional patterns",
];

/// Build a contextual image-generation prompt for a request
pub fn contextual_prompt(request: &ContentRequest) -> String {
    let mut rng = rand::rng();

    let template = PROMPT_TEMPLATES
        .choose(&mut rng)
        .unwrap_or(&PROMPT_TEMPLATES[0]);
    let decoration = PROMPT_DECORATIONS
        .choose(&mut rng)
        .unwrap_or(&PROMPT_DECORATIONS[0]);

    let mut prompt = template.replacen("{}", &request.text, 1);
    prompt.push_str(", ");
    prompt.push_str(decoration);

    if let Some(category) = &request.category {
        prompt.push_str(&format!(" ({})", category));
    }

    prompt
}
