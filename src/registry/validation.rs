//! Schema validation for registry documents and per-author template files.
//!
//! Untyped JSON is checked field by field before it is deserialized into the
//! typed [`Registry`] / [`Template`] shapes. Every violation is collected
//! (rather than stopping at the first one) so a template author can fix all
//! of them in one pass. Fields that are absent get their defaults applied:
//! `name` is derived from the slug and `platform` is inferred from the URL.

use regex::Regex;
use reqwest::Url;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::LazyLock;

use super::schema::{
    display_name_from_slug, Framework, Platform, Registry, Template, TemplateType, Tier,
    UserTemplates,
};

static SLUG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("SLUG_REGEX must compile"));

const SLUG_EXPECTATION: &str = "lowercase alphanumeric with hyphens";

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Dotted path to the offending field (e.g. `templates.alice[0].slug`).
    pub path: String,
    /// What the field should have been.
    pub expected: String,
    /// What was actually found, if anything.
    pub found: Option<String>,
}

impl ValidationIssue {
    /// Create an issue for a field.
    pub fn new(path: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            expected: expected.into(),
            found: None,
        }
    }

    /// Record the offending value.
    pub fn with_found(mut self, found: impl Into<String>) -> Self {
        self.found = Some(found.into());
        self
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: expected {}", self.path, self.expected)?;
        if let Some(found) = &self.found {
            write!(f, ", found {}", found)?;
        }
        Ok(())
    }
}

/// All issues found while validating one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationIssue>);

impl ValidationErrors {
    /// Wrap a list of issues.
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self(issues)
    }

    /// Get the individual issues.
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.0
    }

    /// Number of issues.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no issues.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check whether any issue concerns the given path.
    pub fn has_path(&self, path: &str) -> bool {
        self.0.iter().any(|issue| issue.path == path)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  - {}", issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Parse a registry document from raw JSON text.
pub fn parse_registry_str(raw: &str) -> Result<Registry, ValidationErrors> {
    let value: Value = serde_json::from_str(raw).map_err(|e| {
        ValidationErrors::new(vec![
            ValidationIssue::new("$", "a JSON document").with_found(e.to_string())
        ])
    })?;
    parse_registry(&value)
}

/// Parse and validate a registry document.
pub fn parse_registry(raw: &Value) -> Result<Registry, ValidationErrors> {
    let mut checker = Checker::default();
    let normalized = checker.registry(raw);
    checker.finish(normalized)
}

/// Parse and validate a per-author source file (`{ "templates": [...] }`).
pub fn parse_user_template_file(raw: &Value) -> Result<Vec<Template>, ValidationErrors> {
    let mut checker = Checker::default();
    let normalized = checker.user_file(raw);
    checker
        .finish::<UserTemplates>(normalized)
        .map(|file| file.templates)
}

/// Validate an already-typed template (e.g. one built by `add`).
///
/// Enum fields are guaranteed by the type system; this checks the string
/// constraints the types cannot express.
pub fn validate_template(template: &Template) -> Result<(), ValidationErrors> {
    let mut checker = Checker::default();
    checker.slug("slug", &template.slug);
    checker.non_empty("name", &template.name);
    checker.url("url", &template.url);
    checker.non_empty("author.name", &template.author.name);
    if let Some(url) = &template.author.url {
        checker.url("author.url", url);
    }
    if let Some(pricing) = &template.pricing {
        if !(pricing.amount > 0.0) {
            checker.push(
                ValidationIssue::new("pricing.amount", "a positive number")
                    .with_found(pricing.amount.to_string()),
            );
        }
        checker.currency("pricing.currency", &pricing.currency);
        if let Some(url) = &pricing.purchase_url {
            checker.url("pricing.purchaseUrl", url);
        }
    }

    if checker.issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors::new(checker.issues))
    }
}

/// Check whether a string is a valid template slug.
pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_REGEX.is_match(slug)
}

/// Collects issues while producing a normalized copy of the input.
#[derive(Default)]
struct Checker {
    issues: Vec<ValidationIssue>,
}

impl Checker {
    fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    fn finish<T: serde::de::DeserializeOwned>(self, normalized: Value) -> Result<T, ValidationErrors> {
        if !self.issues.is_empty() {
            return Err(ValidationErrors::new(self.issues));
        }
        serde_json::from_value(normalized).map_err(|e| {
            ValidationErrors::new(vec![
                ValidationIssue::new("$", "a well-formed document").with_found(e.to_string())
            ])
        })
    }

    fn registry(&mut self, raw: &Value) -> Value {
        let Some(obj) = self.object("$", raw) else {
            return Value::Null;
        };
        let mut out = obj.clone();

        match obj.get("version") {
            None | Some(Value::Null) => {
                out.remove("version");
            }
            Some(Value::String(_)) => {}
            Some(other) => self.push(ValidationIssue::new("version", "a string").with_found(describe(other))),
        }

        match obj.get("lastUpdated") {
            Some(Value::String(s)) => {
                if chrono::DateTime::parse_from_rfc3339(s).is_err() {
                    self.push(
                        ValidationIssue::new("lastUpdated", "an ISO 8601 datetime")
                            .with_found(format!("{:?}", s)),
                    );
                }
            }
            Some(other) => self.push(
                ValidationIssue::new("lastUpdated", "an ISO 8601 datetime").with_found(describe(other)),
            ),
            None => self.push(ValidationIssue::new("lastUpdated", "an ISO 8601 datetime")),
        }

        match obj.get("templates") {
            Some(Value::Object(buckets)) => {
                let mut normalized = Map::new();
                for (author, bucket) in buckets {
                    let path = format!("templates.{}", author);
                    normalized.insert(author.clone(), self.template_list(&path, bucket));
                }
                out.insert("templates".to_string(), Value::Object(normalized));
            }
            Some(other) => self.push(
                ValidationIssue::new("templates", "an object keyed by author").with_found(describe(other)),
            ),
            None => self.push(ValidationIssue::new("templates", "an object keyed by author")),
        }

        Value::Object(out)
    }

    fn user_file(&mut self, raw: &Value) -> Value {
        let Some(obj) = self.object("$", raw) else {
            return Value::Null;
        };
        let mut out = obj.clone();
        match obj.get("templates") {
            Some(list) => {
                let normalized = self.template_list("templates", list);
                out.insert("templates".to_string(), normalized);
            }
            None => self.push(ValidationIssue::new("templates", "an array of templates")),
        }
        Value::Object(out)
    }

    fn template_list(&mut self, path: &str, raw: &Value) -> Value {
        let Value::Array(items) = raw else {
            self.push(ValidationIssue::new(path, "an array of templates").with_found(describe(raw)));
            return Value::Array(Vec::new());
        };
        Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| self.template(&format!("{}[{}]", path, i), item))
                .collect(),
        )
    }

    fn template(&mut self, path: &str, raw: &Value) -> Value {
        let Some(obj) = self.object(path, raw) else {
            return Value::Null;
        };
        let mut out = obj.clone();
        let field = |name: &str| format!("{}.{}", path, name);

        let slug = match obj.get("slug") {
            Some(Value::String(slug)) => {
                self.slug(&field("slug"), slug);
                Some(slug.clone())
            }
            other => {
                self.required_string(&field("slug"), other, SLUG_EXPECTATION);
                None
            }
        };

        match obj.get("name") {
            None | Some(Value::Null) => {
                if let Some(slug) = &slug {
                    out.insert("name".to_string(), Value::String(display_name_from_slug(slug)));
                }
            }
            Some(Value::String(name)) => self.non_empty(&field("name"), name),
            Some(other) => self.push(
                ValidationIssue::new(field("name"), "a non-empty string").with_found(describe(other)),
            ),
        }

        let url = match obj.get("url") {
            Some(Value::String(url)) => {
                self.url(&field("url"), url);
                Some(url.clone())
            }
            other => {
                self.required_string(&field("url"), other, "a valid URL");
                None
            }
        };

        match obj.get("platform") {
            None | Some(Value::Null) => {
                if let Some(url) = &url {
                    out.insert(
                        "platform".to_string(),
                        Value::String(Platform::infer(url).as_str().to_string()),
                    );
                }
            }
            Some(value) => self.one_of(&field("platform"), value, &Platform::names()),
        }

        match obj.get("type") {
            Some(value) => self.one_of(&field("type"), value, &TemplateType::names()),
            None => self.push(ValidationIssue::new(
                field("type"),
                format!("one of {}", TemplateType::names().join(", ")),
            )),
        }

        self.optional_enum(&mut out, obj, path, "framework", &Framework::names());
        self.optional_enum(&mut out, obj, path, "tier", &Tier::names());
        self.optional_string(&mut out, obj, path, "description");
        self.optional_string(&mut out, obj, path, "license");
        self.optional_string_list(&mut out, obj, path, "tags");
        self.optional_string_list(&mut out, obj, path, "features");

        match obj.get("author") {
            Some(author) => self.author(&field("author"), author),
            None => self.push(ValidationIssue::new(field("author"), "an object with a name")),
        }

        match obj.get("pricing") {
            None | Some(Value::Null) => {
                out.remove("pricing");
            }
            Some(pricing) => self.pricing(&field("pricing"), pricing),
        }

        Value::Object(out)
    }

    fn author(&mut self, path: &str, raw: &Value) {
        let Some(obj) = self.object(path, raw) else {
            return;
        };
        match obj.get("name") {
            Some(Value::String(name)) => self.non_empty(&format!("{}.name", path), name),
            other => self.required_string(&format!("{}.name", path), other, "a non-empty string"),
        }
        match obj.get("github") {
            None | Some(Value::Null) | Some(Value::String(_)) => {}
            Some(other) => self.push(
                ValidationIssue::new(format!("{}.github", path), "a string").with_found(describe(other)),
            ),
        }
        match obj.get("url") {
            None | Some(Value::Null) => {}
            Some(Value::String(url)) => self.url(&format!("{}.url", path), url),
            Some(other) => self.push(
                ValidationIssue::new(format!("{}.url", path), "a valid URL").with_found(describe(other)),
            ),
        }
    }

    fn pricing(&mut self, path: &str, raw: &Value) {
        let Some(obj) = self.object(path, raw) else {
            return;
        };
        match obj.get("amount").and_then(Value::as_f64) {
            Some(amount) if amount > 0.0 => {}
            _ => {
                let issue = ValidationIssue::new(format!("{}.amount", path), "a positive number");
                self.push(match obj.get("amount") {
                    Some(found) => issue.with_found(describe(found)),
                    None => issue,
                });
            }
        }
        match obj.get("currency") {
            None | Some(Value::Null) => {}
            Some(Value::String(currency)) => self.currency(&format!("{}.currency", path), currency),
            Some(other) => self.push(
                ValidationIssue::new(format!("{}.currency", path), "a 3-letter currency code")
                    .with_found(describe(other)),
            ),
        }
        match obj.get("purchaseUrl") {
            None | Some(Value::Null) => {}
            Some(Value::String(url)) => self.url(&format!("{}.purchaseUrl", path), url),
            Some(other) => self.push(
                ValidationIssue::new(format!("{}.purchaseUrl", path), "a valid URL")
                    .with_found(describe(other)),
            ),
        }
    }

    fn object<'v>(&mut self, path: &str, raw: &'v Value) -> Option<&'v Map<String, Value>> {
        match raw {
            Value::Object(obj) => Some(obj),
            other => {
                self.push(ValidationIssue::new(path, "an object").with_found(describe(other)));
                None
            }
        }
    }

    fn required_string(&mut self, path: &str, found: Option<&Value>, expected: &str) {
        let issue = ValidationIssue::new(path, expected);
        self.push(match found {
            Some(value) => issue.with_found(describe(value)),
            None => issue.with_found("nothing"),
        });
    }

    fn slug(&mut self, path: &str, slug: &str) {
        if !is_valid_slug(slug) {
            self.push(ValidationIssue::new(path, SLUG_EXPECTATION).with_found(format!("{:?}", slug)));
        }
    }

    fn non_empty(&mut self, path: &str, value: &str) {
        if value.is_empty() {
            self.push(ValidationIssue::new(path, "a non-empty string").with_found("\"\""));
        }
    }

    fn url(&mut self, path: &str, url: &str) {
        if Url::parse(url).is_err() {
            self.push(ValidationIssue::new(path, "a valid URL").with_found(format!("{:?}", url)));
        }
    }

    fn currency(&mut self, path: &str, currency: &str) {
        if currency.chars().count() != 3 {
            self.push(
                ValidationIssue::new(path, "a 3-letter currency code")
                    .with_found(format!("{:?}", currency)),
            );
        }
    }

    fn one_of(&mut self, path: &str, value: &Value, allowed: &[&str]) {
        let ok = value.as_str().is_some_and(|s| allowed.contains(&s));
        if !ok {
            self.push(
                ValidationIssue::new(path, format!("one of {}", allowed.join(", ")))
                    .with_found(describe(value)),
            );
        }
    }

    fn optional_enum(
        &mut self,
        out: &mut Map<String, Value>,
        obj: &Map<String, Value>,
        path: &str,
        name: &str,
        allowed: &[&str],
    ) {
        match obj.get(name) {
            None => {}
            Some(Value::Null) => {
                out.remove(name);
            }
            Some(value) => self.one_of(&format!("{}.{}", path, name), value, allowed),
        }
    }

    fn optional_string(
        &mut self,
        out: &mut Map<String, Value>,
        obj: &Map<String, Value>,
        path: &str,
        name: &str,
    ) {
        match obj.get(name) {
            None | Some(Value::String(_)) => {}
            Some(Value::Null) => {
                out.remove(name);
            }
            Some(other) => self.push(
                ValidationIssue::new(format!("{}.{}", path, name), "a string").with_found(describe(other)),
            ),
        }
    }

    fn optional_string_list(
        &mut self,
        out: &mut Map<String, Value>,
        obj: &Map<String, Value>,
        path: &str,
        name: &str,
    ) {
        match obj.get(name) {
            None => {}
            Some(Value::Null) => {
                out.remove(name);
            }
            Some(Value::Array(items)) => {
                for (i, item) in items.iter().enumerate() {
                    if !item.is_string() {
                        self.push(
                            ValidationIssue::new(format!("{}.{}[{}]", path, name, i), "a string")
                                .with_found(describe(item)),
                        );
                    }
                }
            }
            Some(other) => self.push(
                ValidationIssue::new(format!("{}.{}", path, name), "an array of strings")
                    .with_found(describe(other)),
            ),
        }
    }
}

/// Short description of a JSON value for diagnostics.
fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("{:?}", s),
        Value::Array(_) => "an array".to_string(),
        Value::Object(_) => "an object".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal_template() -> Value {
        json!({
            "slug": "api-starter",
            "url": "https://github.com/alice/api-starter",
            "type": "backend",
            "author": { "name": "Alice", "github": "alice" }
        })
    }

    fn registry_with(template: Value) -> Value {
        json!({
            "version": "1.0.0",
            "lastUpdated": "2024-05-01T12:00:00Z",
            "templates": { "alice": [template] }
        })
    }

    #[test]
    fn minimal_template_gets_defaults() {
        let registry = parse_registry(&registry_with(minimal_template())).unwrap();
        let template = &registry.templates["alice"][0];

        assert_eq!(template.name, "Api Starter");
        assert_eq!(template.platform, Platform::Github);
        assert_eq!(template.framework, Framework::Other);
        assert_eq!(template.tier, Tier::Free);
        assert_eq!(template.license, "MIT");
        assert!(template.tags.is_empty());
        assert!(template.features.is_empty());
    }

    #[test]
    fn platform_inferred_when_absent() {
        let mut template = minimal_template();
        template["url"] = json!("https://gitlab.com/alice/api-starter");
        let registry = parse_registry(&registry_with(template)).unwrap();
        assert_eq!(registry.templates["alice"][0].platform, Platform::Gitlab);
    }

    #[test]
    fn explicit_platform_is_kept() {
        let mut template = minimal_template();
        template["platform"] = json!("custom");
        let registry = parse_registry(&registry_with(template)).unwrap();
        assert_eq!(registry.templates["alice"][0].platform, Platform::Custom);
    }

    #[test]
    fn version_defaults_when_missing() {
        let mut raw = registry_with(minimal_template());
        raw.as_object_mut().unwrap().remove("version");
        let registry = parse_registry(&raw).unwrap();
        assert_eq!(registry.version, "1.0.0");
    }

    #[test]
    fn bad_slug_reports_expectation() {
        let mut template = minimal_template();
        template["slug"] = json!("My_Template");
        let errors = parse_registry(&registry_with(template)).unwrap_err();

        assert!(errors.has_path("templates.alice[0].slug"));
        let rendered = errors.to_string();
        assert!(rendered.contains("lowercase alphanumeric with hyphens"));
        assert!(rendered.contains("My_Template"));
    }

    #[test]
    fn malformed_url_is_rejected() {
        let mut template = minimal_template();
        template["url"] = json!("not a url");
        let errors = parse_registry(&registry_with(template)).unwrap_err();
        assert!(errors.has_path("templates.alice[0].url"));
    }

    #[test]
    fn unknown_type_and_framework_are_rejected() {
        let mut template = minimal_template();
        template["type"] = json!("desktop");
        template["framework"] = json!("rails");
        let errors = parse_registry(&registry_with(template)).unwrap_err();
        assert!(errors.has_path("templates.alice[0].type"));
        assert!(errors.has_path("templates.alice[0].framework"));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn collects_all_issues_across_templates() {
        let raw = json!({
            "lastUpdated": "2024-05-01T12:00:00Z",
            "templates": {
                "alice": [
                    { "slug": "ok", "url": "https://x.dev/a", "type": "cli", "author": { "name": "A" } },
                    { "slug": "BAD", "url": "https://x.dev/b", "type": "cli", "author": { "name": "" } }
                ],
                "bob": [ { "url": "https://x.dev/c", "type": "cli", "author": { "name": "B" } } ]
            }
        });
        let errors = parse_registry(&raw).unwrap_err();
        assert!(errors.has_path("templates.alice[1].slug"));
        assert!(errors.has_path("templates.alice[1].author.name"));
        assert!(errors.has_path("templates.bob[0].slug"));
    }

    #[test]
    fn missing_last_updated_is_rejected() {
        let mut raw = registry_with(minimal_template());
        raw.as_object_mut().unwrap().remove("lastUpdated");
        let errors = parse_registry(&raw).unwrap_err();
        assert!(errors.has_path("lastUpdated"));
    }

    #[test]
    fn pricing_constraints() {
        let mut template = minimal_template();
        template["tier"] = json!("premium");
        template["pricing"] = json!({ "amount": -5, "currency": "DOLLARS" });
        let errors = parse_registry(&registry_with(template)).unwrap_err();
        assert!(errors.has_path("templates.alice[0].pricing.amount"));
        assert!(errors.has_path("templates.alice[0].pricing.currency"));
    }

    #[test]
    fn pricing_currency_defaults_to_usd() {
        let mut template = minimal_template();
        template["tier"] = json!("premium");
        template["pricing"] = json!({ "amount": 19.0, "purchaseUrl": "https://buy.example.com" });
        let registry = parse_registry(&registry_with(template)).unwrap();
        let pricing = registry.templates["alice"][0].pricing.clone().unwrap();
        assert_eq!(pricing.currency, "USD");
        assert_eq!(pricing.purchase_url.as_deref(), Some("https://buy.example.com"));
    }

    #[test]
    fn non_json_text_is_a_validation_error() {
        let errors = parse_registry_str("<html>oops</html>").unwrap_err();
        assert!(errors.has_path("$"));
    }

    #[test]
    fn bucket_order_is_preserved() {
        let raw = json!({
            "lastUpdated": "2024-05-01T12:00:00Z",
            "templates": {
                "zed": [ { "slug": "z", "url": "https://x.dev/z", "type": "cli", "author": { "name": "Z" } } ],
                "amy": [ { "slug": "a", "url": "https://x.dev/a", "type": "cli", "author": { "name": "A" } } ]
            }
        });
        let registry = parse_registry(&raw).unwrap();
        let authors: Vec<&str> = registry.templates.keys().map(String::as_str).collect();
        assert_eq!(authors, vec!["zed", "amy"]);
    }

    #[test]
    fn user_template_file_parses() {
        let raw = json!({ "templates": [minimal_template()] });
        let templates = parse_user_template_file(&raw).unwrap();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].slug, "api-starter");
    }

    #[test]
    fn user_template_file_reports_paths_without_author_segment() {
        let raw = json!({ "templates": [{ "slug": "x" }] });
        let errors = parse_user_template_file(&raw).unwrap_err();
        assert!(errors.has_path("templates[0].url"));
        assert!(errors.has_path("templates[0].type"));
        assert!(errors.has_path("templates[0].author"));
    }

    #[test]
    fn slug_pattern() {
        assert!(is_valid_slug("nextjs-starter-2"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("Next"));
        assert!(!is_valid_slug("a/b"));
    }
}
