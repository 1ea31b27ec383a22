//! Placeholder substitution for CI templates.
//! Templates contain literal `{{NAME}}` tokens; nothing else is interpreted.

use indexmap::IndexMap;
use regex::{Captures, Regex};

use crate::bundle::TemplateBundle;
use crate::config::Settings;
use crate::constants::{details, vars, DEFAULT_PROJECT_NAME};
use crate::detector::DetectionResult;
use crate::error::Result;

/// Placeholder name to substitution value, in insertion order.
pub type RenderContext = IndexMap<String, String>;

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `template` - Template text to render
    /// * `context` - Placeholder values
    ///
    /// # Returns
    /// * `Result<String>` - Rendered text
    fn render(&self, template: &str, context: &RenderContext) -> Result<String>;
}

/// Replaces `{{NAME}}` tokens with context values in a single pass.
///
/// Tokens whose name is missing from the context are left as they are, and
/// substituted values are never scanned again.
pub struct PlaceholderRenderer {
    pattern: Regex,
}

impl PlaceholderRenderer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}")?,
        })
    }
}

impl TemplateRenderer for PlaceholderRenderer {
    fn render(&self, template: &str, context: &RenderContext) -> Result<String> {
        let rendered = self.pattern.replace_all(template, |caps: &Captures| {
            match context.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            }
        });
        Ok(rendered.into_owned())
    }
}

/// Builds the context for one run.
///
/// Later layers win: bundle defaults, then the project name, then detected
/// details, then the environment-backed image, SonarQube and Nexus values.
pub fn build_context(
    bundle: &TemplateBundle,
    detection: &DetectionResult,
    settings: &Settings,
) -> RenderContext {
    let project_name = detection
        .detail(details::PACKAGE_NAME)
        .unwrap_or(DEFAULT_PROJECT_NAME)
        .to_string();

    let mut context = RenderContext::new();
    context.insert(vars::BUILD_CMD.to_string(), bundle.build_cmd.to_string());
    context.insert(vars::TEST_CMD.to_string(), bundle.test_cmd.to_string());
    context.insert(vars::CACHE_DIR.to_string(), bundle.cache_dir.to_string());
    context.insert(vars::PROJECT_NAME.to_string(), project_name.clone());

    for (key, value) in &detection.details {
        context.insert(key.clone(), value.clone());
    }

    context.insert(vars::IMAGE_NAME.to_string(), settings.image_name(&project_name));
    context.insert(vars::SONAR_HOST.to_string(), settings.sonar_host.clone());
    context.insert(vars::NEXUS_URL.to_string(), settings.nexus_url.clone());
    context
}
