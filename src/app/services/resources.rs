//! Presentation resources created once per process and shared by every
//! window: icon search paths, the rich-text tag table, syntax languages,
//! style schemes and the stylesheet.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::rc::Rc;

use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;

use crate::app::domain::config::{AppConfig, SyntaxTheme};

/// Resource prefix holding the bundled icons.
pub const ICONS_RESOURCE_PATH: &str = "/icons/";

#[derive(Debug, Default)]
pub struct IconTheme {
    resource_paths: Vec<String>,
}

impl IconTheme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource prefix to search for icons. Returns false if it
    /// was already registered.
    pub fn add_resource_path(&mut self, path: &str) -> bool {
        if self.has_resource_path(path) {
            return false;
        }
        self.resource_paths.push(path.to_string());
        true
    }

    pub fn has_resource_path(&self, path: &str) -> bool {
        self.resource_paths.iter().any(|p| p == path)
    }

    pub fn resource_paths(&self) -> &[String] {
        &self.resource_paths
    }
}

/// A rich-text tag. Names follow the `<property>_<value>` convention of
/// the document format, e.g. `weight_heavy` or `foreground_#ff0000`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextTag {
    pub name: String,
    pub property: String,
    pub value: String,
}

impl TextTag {
    fn from_name(name: &str) -> Self {
        let (property, value) = name.split_once('_').unwrap_or((name, ""));
        Self {
            name: name.to_string(),
            property: property.to_string(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct TextTagTable {
    tags: BTreeMap<String, TextTag>,
}

impl TextTagTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, name: &str) -> Option<&TextTag> {
        self.tags.get(name)
    }

    pub fn lookup_or_create(&mut self, name: &str) -> &TextTag {
        self.tags
            .entry(name.to_string())
            .or_insert_with(|| TextTag::from_name(name))
    }

    /// Create a tag for every `<property>="<value>"` attribute on the
    /// `rich_text` elements of a document. Returns how many distinct tags
    /// the document uses.
    pub fn register_rich_text_tags(&mut self, xml: &str) -> usize {
        let mut used = BTreeSet::new();
        for element in xml.split("<rich_text").skip(1) {
            let Some(end) = element.find('>') else {
                continue;
            };
            let mut rest = &element[..end];
            while let Some(eq) = rest.find("=\"") {
                let key = rest[..eq].trim();
                let after = &rest[eq + 2..];
                let Some(close) = after.find('"') else {
                    break;
                };
                if !key.is_empty() {
                    let name = format!("{}_{}", key, &after[..close]);
                    self.lookup_or_create(&name);
                    used.insert(name);
                }
                rest = &after[close + 1..];
            }
        }
        used.len()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

pub struct LanguageManager {
    syntax_set: SyntaxSet,
}

impl LanguageManager {
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
        }
    }

    /// Guess the language of a code node or file from its extension.
    pub fn guess_language(&self, path: &Path) -> Option<String> {
        let ext = path.extension()?.to_str()?;
        let syntax = self.syntax_set.find_syntax_by_extension(ext)?;
        if syntax.name == "Plain Text" {
            return None;
        }
        Some(syntax.name.clone())
    }

    pub fn language_ids(&self) -> Vec<&str> {
        self.syntax_set.syntaxes().iter().map(|s| s.name.as_str()).collect()
    }

    pub fn syntax_set(&self) -> &SyntaxSet {
        &self.syntax_set
    }
}

impl Default for LanguageManager {
    fn default() -> Self {
        Self::new()
    }
}

pub struct StyleSchemeManager {
    theme_set: ThemeSet,
}

impl StyleSchemeManager {
    pub fn new() -> Self {
        Self {
            theme_set: ThemeSet::load_defaults(),
        }
    }

    pub fn scheme(&self, theme: SyntaxTheme) -> Option<&Theme> {
        self.theme_set.themes.get(theme.theme_key())
    }

    pub fn scheme_ids(&self) -> Vec<&str> {
        self.theme_set.themes.keys().map(String::as_str).collect()
    }

    /// Background and foreground of a scheme as RGB tuples.
    pub fn palette(&self, theme: SyntaxTheme) -> Option<((u8, u8, u8), (u8, u8, u8))> {
        let settings = &self.scheme(theme)?.settings;
        let bg = settings.background?;
        let fg = settings.foreground?;
        Some(((bg.r, bg.g, bg.b), (fg.r, fg.g, fg.b)))
    }
}

impl Default for StyleSchemeManager {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Default)]
pub struct CssProvider {
    css: String,
}

impl CssProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Regenerate the stylesheet from the configured font and scheme.
    pub fn load_from_config(&mut self, config: &AppConfig, schemes: &StyleSchemeManager) {
        let mut css = format!("textview text {{ font-size: {}pt; }}\n", config.font_size);
        if let Some(((br, bg, bb), (fr, fg, fb))) = schemes.palette(config.syntax_theme) {
            css.push_str(&format!(
                ".codebox text {{ background-color: #{br:02x}{bg:02x}{bb:02x}; color: #{fr:02x}{fg:02x}{fb:02x}; }}\n"
            ));
        }
        self.css = css;
    }

    pub fn to_css_string(&self) -> &str {
        &self.css
    }
}

/// Handles to the shared presentation resources, cloned into every window.
#[derive(Clone)]
pub struct SharedResources {
    pub icon_theme: Rc<RefCell<IconTheme>>,
    pub text_tag_table: Rc<RefCell<TextTagTable>>,
    pub css_provider: Rc<RefCell<CssProvider>>,
    pub language_manager: Rc<LanguageManager>,
    pub style_scheme_manager: Rc<StyleSchemeManager>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_resource_path_registered_once() {
        let mut theme = IconTheme::new();
        assert!(theme.add_resource_path(ICONS_RESOURCE_PATH));
        assert!(!theme.add_resource_path(ICONS_RESOURCE_PATH));
        assert_eq!(theme.resource_paths(), &[ICONS_RESOURCE_PATH.to_string()]);
    }

    #[test]
    fn test_tag_table_lookup_or_create() {
        let mut table = TextTagTable::new();
        assert!(table.lookup("weight_heavy").is_none());

        let tag = table.lookup_or_create("foreground_#ff0000").clone();
        assert_eq!(tag.property, "foreground");
        assert_eq!(tag.value, "#ff0000");

        table.lookup_or_create("foreground_#ff0000");
        table.lookup_or_create("link");
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup("link").unwrap().value, "");
    }

    #[test]
    fn test_rich_text_tags_registered_from_document() {
        let xml = r##"<cherrytree><node name="a">
            <rich_text weight="heavy">Title</rich_text>
            <rich_text>plain</rich_text>
            <rich_text foreground="#ff0000" weight="heavy">red</rich_text>
            <rich_text link="webs https://example.com"/>
        </node></cherrytree>"##;
        let mut table = TextTagTable::new();
        table.lookup_or_create("scale_h1");

        assert_eq!(table.register_rich_text_tags(xml), 3);
        assert_eq!(table.lookup("weight_heavy").unwrap().value, "heavy");
        assert_eq!(table.lookup("foreground_#ff0000").unwrap().property, "foreground");
        assert_eq!(table.lookup("link_webs https://example.com").unwrap().property, "link");
        assert_eq!(table.len(), 4);

        assert_eq!(table.register_rich_text_tags("<cherrytree/>"), 0);
    }

    #[test]
    fn test_language_guess() {
        let languages = LanguageManager::new();
        assert_eq!(languages.guess_language(Path::new("main.rs")).as_deref(), Some("Rust"));
        assert_eq!(languages.guess_language(Path::new("notes.txt")), None);
        assert_eq!(languages.guess_language(Path::new("Makefile.unknownext")), None);
        assert!(languages.language_ids().contains(&"Python"));
    }

    #[test]
    fn test_every_syntax_theme_has_scheme() {
        let schemes = StyleSchemeManager::new();
        for theme in SyntaxTheme::all() {
            assert!(schemes.scheme(*theme).is_some(), "missing {}", theme.theme_key());
        }
    }

    #[test]
    fn test_css_from_config() {
        let schemes = StyleSchemeManager::new();
        let mut config = AppConfig::default();
        config.font_size = 18;
        let mut css = CssProvider::new();
        css.load_from_config(&config, &schemes);
        assert!(css.to_css_string().contains("font-size: 18pt"));
        assert!(css.to_css_string().contains(".codebox"));

        config.font_size = 11;
        css.load_from_config(&config, &schemes);
        assert!(css.to_css_string().starts_with("textview text { font-size: 11pt; }"));
    }
}
