//! Preset Catalog
//!
//! Merges the fixed built-in preset table with the custom presets from
//! the store. Custom presets override built-ins sharing an id.

use once_cell::sync::Lazy;

use crate::models::preset::{Preset, PresetExample};
use crate::storage::presets::PresetStore;
use crate::utils::error::AppResult;

fn built_in(
    id: &str,
    name: &str,
    description: &str,
    tags: &[&str],
    system_prompt: &str,
    examples: Vec<PresetExample>,
) -> Preset {
    Preset {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        system_prompt: system_prompt.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        is_built_in: true,
        examples,
        created_at: None,
        updated_at: None,
    }
}

/// The fixed built-in preset table, in catalog order.
///
/// Built once at startup and never mutated; these entries are never
/// persisted and never pass through the store.
static BUILT_IN_PRESETS: Lazy<Vec<Preset>> = Lazy::new(|| {
    vec![
        built_in(
            "general",
            "General Enhancement",
            "Structure any prompt with clear objectives, context, and constraints",
            &["general", "structure", "clarity"],
            "You are a prompt enhancement expert. Rewrite the user's rough prompt into a clear, structured, effective prompt.\n\nAlways structure the result with these sections:\n\n# Objective\nThe specific goal the user wants to achieve.\n\n# Context\nRelevant background information and constraints.\n\n# Format & Style\nDesired output format, tone, and length.\n\n# Success Criteria\nHow to tell the response meets the requirements.\n\nTransform the following prompt:\n\n{{input}}",
            vec![PresetExample {
                input: "Write about dogs".to_string(),
                expected_output: "# Objective\nCreate an informative article about dogs covering breeds and care.\n\n# Context\nAudience: pet owners. Tone: friendly.\n\n# Format & Style\nArticle, 800-1000 words, clear headings.\n\n# Success Criteria\nCovers breeds, includes care tips, easy to read.".to_string(),
                description: "General topic enhancement".to_string(),
            }],
        ),
        built_in(
            "images",
            "Image Generation",
            "Optimize prompts for image generation models (Midjourney, FLUX, Stable Diffusion)",
            &["images", "visual", "art", "generation"],
            "You are an expert at writing prompts for image generation models such as Midjourney, FLUX, and Stable Diffusion.\n\nTransform the user's prompt into a structured description with these elements:\n\nSubject: main focus of the image\nStyle: art style, technique, or aesthetic\nComposition: framing, perspective, layout\nLighting: type and quality of light\nColor: palette and mood\nDetails: specific elements, textures, effects\nNegative prompt: what to avoid\n\nBe detailed but concise; focus on visual elements the model can act on.\n\nTransform this prompt:\n\n{{input}}",
            vec![PresetExample {
                input: "A beautiful sunset".to_string(),
                expected_output: "Subject: dramatic sunset over silhouetted mountains\nStyle: photorealistic, cinematic\nComposition: wide landscape shot, rule of thirds\nLighting: golden hour backlighting\nColor: vibrant oranges and deep purples\nDetails: layered ridgelines, scattered clouds, atmospheric haze\nNegative prompt: blurry, low quality, oversaturated".to_string(),
                description: "Landscape image enhancement".to_string(),
            }],
        ),
        built_in(
            "code",
            "Code & Technical",
            "Optimize prompts for coding assistance and technical tasks",
            &["code", "programming", "technical", "development"],
            "You are a technical prompt specialist. Rewrite the user's request into a precise technical prompt that gets better results from coding assistants.\n\nStructure the result with:\n\n# Technical Objective\nThe specific programming goal.\n\n# Technology Stack\nLanguages, frameworks, versions, tools.\n\n# Requirements\nFunctional and technical requirements.\n\n# Expected Output\nCode format: complete file, snippet, tests, explanation.\n\n# Constraints\nPerformance, security, edge cases.\n\nBe specific about versions, patterns, and implementation details.\n\nTransform this technical request:\n\n{{input}}",
            vec![PresetExample {
                input: "Help me with React".to_string(),
                expected_output: "# Technical Objective\nCreate a reusable React component with proper TypeScript types.\n\n# Technology Stack\nReact 18+, TypeScript 5, functional components with hooks.\n\n# Requirements\nTyped props, loading and error states handled.\n\n# Expected Output\nComplete component code with a usage example.\n\n# Constraints\nAccessibility compliance, no unnecessary re-renders.".to_string(),
                description: "React component request enhancement".to_string(),
            }],
        ),
    ]
});

/// Merged, override-applied view over built-in and custom presets
#[derive(Clone)]
pub struct PresetCatalog {
    store: PresetStore,
}

impl PresetCatalog {
    pub fn new(store: PresetStore) -> Self {
        Self { store }
    }

    /// The fixed built-in set in catalog order.
    pub fn built_ins() -> &'static [Preset] {
        &BUILT_IN_PRESETS
    }

    /// All presets: built-ins first in fixed order, each replaced in
    /// place by a custom override sharing its id, then the remaining
    /// customs in stored order. At most one entry per id.
    pub async fn get_all(&self) -> AppResult<Vec<Preset>> {
        let customs = self.store.list().await?;
        let mut merged = Vec::with_capacity(BUILT_IN_PRESETS.len() + customs.len());

        for built_in in BUILT_IN_PRESETS.iter() {
            match customs.iter().find(|c| c.id == built_in.id) {
                Some(custom) => merged.push(custom.clone()),
                None => merged.push(built_in.clone()),
            }
        }

        for custom in customs {
            if !BUILT_IN_PRESETS.iter().any(|b| b.id == custom.id) {
                merged.push(custom);
            }
        }

        Ok(merged)
    }

    /// Look up one preset by id, custom collection first.
    ///
    /// Note the affinity is deliberately the reverse of `get_all`: a
    /// lookup prefers the custom override, while the listing prefers the
    /// built-in slot position. Both orders are part of the contract.
    pub async fn get_by_id(&self, id: &str) -> AppResult<Option<Preset>> {
        let customs = self.store.list().await?;
        if let Some(custom) = customs.into_iter().find(|c| c.id == id) {
            return Ok(Some(custom));
        }
        Ok(BUILT_IN_PRESETS.iter().find(|b| b.id == id).cloned())
    }
}
