//! Content transformer
//!
//! Rewrites text assets through an ordered list of [`TransformRule`]s.
//! Assets the [`AssetSelector`] does not accept pass through byte for byte.
//!
//! The standard rules, in order:
//! 1. strip `//` line comments (unconditionally, even inside URLs)
//! 2. strip `<!-- -->` block comments
//! 3. point the primary stylesheet link at the bundle, drop the other links
//! 4. strip `//` again where the removals above joined two slashes
//! 5. collapse horizontal whitespace runs and blank lines
//!
//! Stylesheet links are matched on the href's file name, so `css/small.css`
//! never counts as a reference to `all.css`.

use std::borrow::Cow;
use std::path::Path;

use regex::{NoExpand, Regex};

use crate::domain::value_objects::AssetSelector;
use crate::error::{WrtError, WrtResult};

/// What a rule does with the text its pattern matches
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleAction {
    /// Delete every match
    Remove,
    /// Replace every match with a literal string
    Replace(String),
    /// Among matches (which must capture `href`), keep the first that refers
    /// to `primary` or `bundle`, repointed at `bundle`; delete the rest.
    BundleReference { primary: String, bundle: String },
}

/// Which asset paths a rule applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleScope {
    Any,
    /// Lower-case file extensions, without the dot
    Extensions(Vec<String>),
}

impl RuleScope {
    pub fn html() -> Self {
        RuleScope::Extensions(vec!["html".to_string(), "htm".to_string()])
    }

    pub fn matches(&self, path: &Path) -> bool {
        match self {
            RuleScope::Any => true,
            RuleScope::Extensions(exts) => path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| exts.iter().any(|x| x.eq_ignore_ascii_case(e)))
                .unwrap_or(false),
        }
    }
}

/// One deterministic text rewrite step
#[derive(Debug, Clone)]
pub struct TransformRule {
    name: String,
    pattern: Regex,
    action: RuleAction,
    scope: RuleScope,
}

impl TransformRule {
    pub fn new(
        name: impl Into<String>,
        pattern: &str,
        action: RuleAction,
        scope: RuleScope,
    ) -> WrtResult<Self> {
        let pattern = Regex::new(pattern).map_err(|e| WrtError::Pattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            name: name.into(),
            pattern,
            action,
            scope,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn action(&self) -> &RuleAction {
        &self.action
    }

    pub fn applies_to(&self, path: &Path) -> bool {
        self.scope.matches(path)
    }

    /// Apply this rule to `text`, regardless of scope
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        match &self.action {
            RuleAction::Remove => self.pattern.replace_all(text, ""),
            RuleAction::Replace(with) => self.pattern.replace_all(text, NoExpand(with)),
            RuleAction::BundleReference { primary, bundle } => {
                self.rewrite_references(text, primary, bundle)
            }
        }
    }

    fn rewrite_references<'t>(&self, text: &'t str, primary: &str, bundle: &str) -> Cow<'t, str> {
        let refers = |href: &str| names_file(href, bundle) || names_file(href, primary);

        let keeper = self.pattern.captures_iter(text).position(|caps| {
            caps.name("href")
                .map(|h| refers(h.as_str()))
                .unwrap_or(false)
        });
        // Without a primary reference there is nothing to bundle into.
        let Some(keeper) = keeper else {
            return Cow::Borrowed(text);
        };

        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for (i, caps) in self.pattern.captures_iter(text).enumerate() {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            out.push_str(&text[last..whole.start()]);
            if i == keeper {
                match caps.name("href") {
                    Some(href) if !names_file(href.as_str(), bundle) => {
                        let dir_len = href.as_str().len() - primary.len();
                        out.push_str(&text[whole.start()..href.start() + dir_len]);
                        out.push_str(bundle);
                        out.push_str(&text[href.end()..whole.end()]);
                    }
                    _ => out.push_str(whole.as_str()),
                }
            }
            last = whole.end();
        }
        out.push_str(&text[last..]);
        Cow::Owned(out)
    }
}

/// True when `href` points at a file called exactly `name`
fn names_file(href: &str, name: &str) -> bool {
    href == name
        || href
            .strip_suffix(name)
            .is_some_and(|dir| dir.ends_with('/'))
}

/// The standard rule list for HTML pages.
pub fn standard_rules(primary_stylesheet: &str, bundled_stylesheet: &str) -> WrtResult<Vec<TransformRule>> {
    Ok(vec![
        TransformRule::new("line-comments", r"//[^\n]*", RuleAction::Remove, RuleScope::html())?,
        TransformRule::new(
            "block-comments",
            r"<!--[\s\S]*?-->",
            RuleAction::Remove,
            RuleScope::html(),
        )?,
        TransformRule::new(
            "bundle-stylesheets",
            r#"<link\s+rel="stylesheet"\s+href="(?P<href>[^"]*)"\s*/?>[ \t]*\n?"#,
            RuleAction::BundleReference {
                primary: primary_stylesheet.to_string(),
                bundle: bundled_stylesheet.to_string(),
            },
            RuleScope::html(),
        )?,
        // Removing a span can join two slashes; strip what that exposes.
        TransformRule::new(
            "joined-line-comments",
            r"//[^\n]*",
            RuleAction::Remove,
            RuleScope::html(),
        )?,
        TransformRule::new(
            "collapse-spaces",
            r"[ \t]{2,}",
            RuleAction::Replace(" ".to_string()),
            RuleScope::html(),
        )?,
        TransformRule::new(
            "collapse-newlines",
            r"\n{2,}",
            RuleAction::Replace("\n".to_string()),
            RuleScope::html(),
        )?,
    ])
}

/// Applies the rule list to assets the selector accepts
#[derive(Debug)]
pub struct ContentTransformer {
    selector: AssetSelector,
    rules: Vec<TransformRule>,
}

impl ContentTransformer {
    pub fn new(selector: AssetSelector, rules: Vec<TransformRule>) -> Self {
        Self { selector, rules }
    }

    /// Transformer with [`standard_rules`]
    pub fn standard(
        selector: AssetSelector,
        primary_stylesheet: &str,
        bundled_stylesheet: &str,
    ) -> WrtResult<Self> {
        Ok(Self::new(
            selector,
            standard_rules(primary_stylesheet, bundled_stylesheet)?,
        ))
    }

    pub fn rules(&self) -> &[TransformRule] {
        &self.rules
    }

    pub fn selector(&self) -> &AssetSelector {
        &self.selector
    }

    /// True when `asset_path` goes through the rules
    pub fn selects(&self, asset_path: &Path) -> bool {
        self.selector.accepts(asset_path)
    }

    /// Transform raw asset bytes.
    ///
    /// Non-selected assets and selected assets that are not UTF-8 come back
    /// unchanged.
    pub fn transform<'a>(&self, asset_path: &Path, raw: &'a [u8]) -> Cow<'a, [u8]> {
        if !self.selects(asset_path) {
            return Cow::Borrowed(raw);
        }
        let Ok(text) = std::str::from_utf8(raw) else {
            return Cow::Borrowed(raw);
        };
        match self.apply_rules(asset_path, text) {
            Cow::Borrowed(_) => Cow::Borrowed(raw),
            Cow::Owned(rewritten) => Cow::Owned(rewritten.into_bytes()),
        }
    }

    /// Transform text; non-selected assets come back unchanged.
    pub fn transform_text<'a>(&self, asset_path: &Path, text: &'a str) -> Cow<'a, str> {
        if !self.selects(asset_path) {
            return Cow::Borrowed(text);
        }
        self.apply_rules(asset_path, text)
    }

    fn apply_rules<'a>(&self, asset_path: &Path, text: &'a str) -> Cow<'a, str> {
        let mut current = Cow::Borrowed(text);
        for rule in self.rules.iter().filter(|r| r.applies_to(asset_path)) {
            if let Cow::Owned(next) = rule.apply(&current) {
                current = Cow::Owned(next);
            }
        }
        current
    }
}
