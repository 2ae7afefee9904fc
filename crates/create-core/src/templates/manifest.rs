//! Template manifest types and parsing

use serde::{Deserialize, Serialize};

/// One installable template listed in `meta.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDescriptor {
    /// Template identifier, also the directory name in the template repository
    #[serde(alias = "value")]
    pub name: String,

    /// Description of what the template provides
    #[serde(alias = "desc", default)]
    pub description: String,
}

/// Templates in manifest order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateCatalog {
    pub templates: Vec<TemplateDescriptor>,
}

impl TemplateCatalog {
    pub fn new(templates: Vec<TemplateDescriptor>) -> Self {
        Self { templates }
    }

    /// Exact-name lookup; the first entry wins if names repeat
    pub fn find(&self, name: &str) -> Option<&TemplateDescriptor> {
        self.templates.iter().find(|t| t.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.templates.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TemplateDescriptor> {
        self.templates.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_name_desc() {
        let catalog: TemplateCatalog = serde_json::from_str(
            r#"[{"name":"vue-naive","desc":"✅ Vue 3 + Naive UI"},{"name":"koa","desc":"Koa (prototype only)"}]"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.templates[0].name, "vue-naive");
        assert_eq!(catalog.templates[0].description, "✅ Vue 3 + Naive UI");
    }

    #[test]
    fn test_parse_value_description() {
        let catalog: TemplateCatalog =
            serde_json::from_str(r#"[{"value":"uni-app","description":"uni-app starter"}]"#).unwrap();

        assert_eq!(catalog.names(), vec!["uni-app"]);
        assert_eq!(catalog.templates[0].description, "uni-app starter");
    }

    #[test]
    fn test_missing_description_defaults_empty() {
        let catalog: TemplateCatalog = serde_json::from_str(r#"[{"name":"bare"}]"#).unwrap();
        assert_eq!(catalog.templates[0].description, "");
    }

    #[test]
    fn test_find_exact_first_match() {
        let catalog = TemplateCatalog::new(vec![
            TemplateDescriptor {
                name: "vue".to_string(),
                description: "first".to_string(),
            },
            TemplateDescriptor {
                name: "vue".to_string(),
                description: "second".to_string(),
            },
        ]);

        assert_eq!(catalog.find("vue").unwrap().description, "first");
        assert!(catalog.find("Vue").is_none());
        assert!(catalog.find("vu").is_none());
    }
}
