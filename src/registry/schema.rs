//! Template record and registry document definitions.
//!
//! A registry document groups template records by author handle:
//!
//! ```json
//! { "version": "1.0.0", "lastUpdated": "...", "templates": { "alice": [ ... ] } }
//! ```

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bucket key used when a template carries no GitHub handle.
pub const FALLBACK_AUTHOR: &str = "local";

/// Default registry document version.
pub const REGISTRY_VERSION: &str = "1.0.0";

/// One scaffoldable project template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Unique slug within the author's bucket (e.g. "nextjs-starter")
    pub slug: String,

    /// Human-readable name
    pub name: String,

    /// Git repository URL
    pub url: String,

    /// Source platform
    #[serde(default)]
    pub platform: Platform,

    /// Template category
    #[serde(rename = "type")]
    pub template_type: TemplateType,

    /// Primary framework
    #[serde(default)]
    pub framework: Framework,

    /// Short description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Searchable tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// Feature list for display
    #[serde(default)]
    pub features: Vec<String>,

    /// Template author
    pub author: Author,

    /// Pricing tier
    #[serde(default)]
    pub tier: Tier,

    /// Pricing details (premium tier only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<Pricing>,

    /// License identifier
    #[serde(default = "default_license")]
    pub license: String,
}

fn default_license() -> String {
    "MIT".to_string()
}

impl Template {
    /// Bucket key this template is filed under in a registry document.
    pub fn bucket_key(&self) -> &str {
        self.author
            .github
            .as_deref()
            .filter(|handle| !handle.is_empty())
            .unwrap_or(FALLBACK_AUTHOR)
    }

    /// Check if this is a premium template.
    pub fn is_premium(&self) -> bool {
        self.tier == Tier::Premium
    }
}

/// Template author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Pricing info for premium templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_url: Option<String>,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// Registry document: template records grouped by author handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registry {
    #[serde(default = "default_registry_version")]
    pub version: String,

    pub last_updated: DateTime<Utc>,

    /// Author handle to ordered bucket, in document order.
    pub templates: IndexMap<String, Vec<Template>>,
}

fn default_registry_version() -> String {
    REGISTRY_VERSION.to_string()
}

impl Registry {
    /// Create an empty registry document stamped with the current time.
    pub fn empty() -> Self {
        Self {
            version: default_registry_version(),
            last_updated: Utc::now(),
            templates: IndexMap::new(),
        }
    }

    /// Get an author's bucket.
    pub fn bucket(&self, author: &str) -> Option<&[Template]> {
        self.templates.get(author).map(Vec::as_slice)
    }

    /// Total number of template records across all buckets.
    pub fn template_count(&self) -> usize {
        self.templates.values().map(Vec::len).sum()
    }

    /// Stamp `lastUpdated` with the current time.
    pub fn touch(&mut self) {
        self.last_updated = Utc::now();
    }

    /// Remove authors whose bucket is empty.
    pub fn prune_empty_buckets(&mut self) {
        self.templates.retain(|_, bucket| !bucket.is_empty());
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::empty()
    }
}

/// Per-author source file: `{ "templates": [ ... ] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserTemplates {
    pub templates: Vec<Template>,
}

/// Error returned when a string does not name a known enum value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for UnknownVariant {}

/// Declares a string-backed enum with `as_str`, `ALL`, `Display` and `FromStr`.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal, default = $default:ident {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire name of this variant.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }

            /// Wire names of all variants, for diagnostics.
            pub fn names() -> Vec<&'static str> {
                Self::ALL.iter().map(|v| v.as_str()).collect()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

string_enum! {
    /// Source platform hosting the template repository.
    Platform, "platform", default = Github {
        Github => "github",
        Gitlab => "gitlab",
        Custom => "custom",
    }
}

impl Platform {
    /// Infer the platform from a repository URL.
    pub fn infer(url: &str) -> Self {
        if url.contains("github.com") {
            Platform::Github
        } else if url.contains("gitlab.com") {
            Platform::Gitlab
        } else {
            Platform::Custom
        }
    }
}

string_enum! {
    /// Template category.
    TemplateType, "type", default = Other {
        Frontend => "frontend",
        Backend => "backend",
        Fullstack => "fullstack",
        Mobile => "mobile",
        Cli => "cli",
        Library => "library",
        Other => "other",
    }
}

string_enum! {
    /// Framework identifiers.
    Framework, "framework", default = Other {
        React => "react",
        Vue => "vue",
        Svelte => "svelte",
        Angular => "angular",
        Nextjs => "nextjs",
        Nuxt => "nuxt",
        Astro => "astro",
        Solid => "solid",
        Qwik => "qwik",
        Express => "express",
        Fastify => "fastify",
        Hono => "hono",
        Elysia => "elysia",
        Nestjs => "nestjs",
        Koa => "koa",
        Remix => "remix",
        Sveltekit => "sveltekit",
        ReactNative => "react-native",
        Expo => "expo",
        Flutter => "flutter",
        NoFramework => "none",
        Other => "other",
    }
}

string_enum! {
    /// Pricing tier.
    Tier, "tier", default = Free {
        Free => "free",
        Premium => "premium",
    }
}

/// Turn a slug into a display name: `"my-cool-app"` becomes `"My Cool App"`.
pub fn display_name_from_slug(slug: &str) -> String {
    slug.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Author name recorded on templates created with `add`.
pub const LOCAL_AUTHOR_NAME: &str = "Local";

/// User-supplied fields for a new template, before defaults are applied.
///
/// `template_type` and `framework` are kept as raw strings: unknown values
/// downgrade to `other` with a warning instead of failing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateDraft {
    pub slug: String,
    pub url: String,
    pub template_type: Option<String>,
    pub framework: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub features: Vec<String>,
    /// GitHub handle of the author, used as the bucket key.
    pub author_handle: Option<String>,
}

/// A built template plus any downgrade warnings.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltTemplate {
    pub template: Template,
    pub warnings: Vec<String>,
}

impl TemplateDraft {
    /// Create a draft from a slug and repository URL.
    pub fn new(slug: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    /// Apply defaults and produce a template record.
    ///
    /// The result is not validated; run it through
    /// [`validate_template`](super::validation::validate_template) before
    /// persisting it.
    pub fn build(self) -> BuiltTemplate {
        let mut warnings = Vec::new();

        let template_type = downgrade::<TemplateType>(
            self.template_type.as_deref(),
            TemplateType::Other,
            &mut warnings,
        );
        let framework =
            downgrade::<Framework>(self.framework.as_deref(), Framework::Other, &mut warnings);

        let github = self
            .author_handle
            .map(|handle| handle.trim_start_matches('@').to_string())
            .filter(|handle| !handle.is_empty());

        let template = Template {
            name: display_name_from_slug(&self.slug),
            platform: Platform::infer(&self.url),
            slug: self.slug,
            url: self.url,
            template_type,
            framework,
            description: self.description.filter(|d| !d.is_empty()),
            tags: self.tags,
            features: self.features,
            author: Author {
                name: LOCAL_AUTHOR_NAME.to_string(),
                github,
                url: None,
            },
            tier: Tier::Free,
            pricing: None,
            license: default_license(),
        };

        BuiltTemplate { template, warnings }
    }
}

fn downgrade<T>(raw: Option<&str>, fallback: T, warnings: &mut Vec<String>) -> T
where
    T: FromStr<Err = UnknownVariant> + Copy + fmt::Display,
{
    match raw.map(str::parse::<T>) {
        None => fallback,
        Some(Ok(value)) => value,
        Some(Err(err)) => {
            let warning = format!("Invalid {} \"{}\". Using \"{}\".", err.kind, err.value, fallback);
            tracing::warn!("{}", warning);
            warnings.push(warning);
            fallback
        }
    }
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}
