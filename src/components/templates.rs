use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::{debug, info, warn};

use crate::errors::WikiError;

const BUILTIN_VIEW: &str = include_str!("../../static/html/view.html");
const BUILTIN_EDIT: &str = include_str!("../../static/html/edit.html");

/// Named HTML templates, loaded once at start-up and read-only afterwards.
///
/// Templates use two placeholders: `{{TITLE}}` and `{{BODY}}`. Callers are
/// responsible for escaping the values they substitute.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    templates: HashMap<String, String>,
}

impl TemplateSet {
    /// The `view` and `edit` templates compiled into the binary
    pub fn builtin() -> Self {
        let mut templates = HashMap::new();
        templates.insert("view".to_string(), BUILTIN_VIEW.to_string());
        templates.insert("edit".to_string(), BUILTIN_EDIT.to_string());
        Self { templates }
    }

    /// Load every `*.html` file in `dir`, keyed by file stem.
    ///
    /// Falls back to [`TemplateSet::builtin`] when `dir` does not exist.
    pub fn load(dir: &Path) -> Result<Self, WikiError> {
        if !dir.is_dir() {
            warn!("Template directory {:?} not found, using built-in templates", dir);
            return Ok(Self::builtin());
        }

        let mut templates = HashMap::new();
        let entries = fs::read_dir(dir)
            .map_err(|e| WikiError::Config(format!("cannot read template directory {dir:?}: {e}")))?;
        for entry in entries {
            let path = entry?.path();
            let is_html = path
                .extension()
                .and_then(|s| s.to_str())
                .map(|s| s.eq_ignore_ascii_case("html"))
                .unwrap_or(false);
            if !is_html {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            debug!("Loading template {:?} from {:?}", name, path);
            templates.insert(name.to_string(), fs::read_to_string(&path)?);
        }

        info!("Loaded {} templates from {:?}", templates.len(), dir);
        Ok(Self { templates })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Expand template `name` with already-escaped values.
    ///
    /// The body is substituted last so placeholder text inside a page body is
    /// left alone.
    pub fn render(&self, name: &str, title: &str, body: &str) -> Result<String, WikiError> {
        let template = self
            .templates
            .get(name)
            .ok_or_else(|| WikiError::Render(format!("template {name:?} is undefined")))?;
        Ok(template.replace("{{TITLE}}", title).replace("{{BODY}}", body))
    }
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self::builtin()
    }
}
