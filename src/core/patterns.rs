use regex::Regex;

use crate::config::PatternConfig;
use crate::error::ConfigError;

const IDENT: &str = "[A-Z][A-Za-z0-9_]*";

/// Compiled text patterns shared by the symbol extractor and reference collector.
///
/// These are deliberately shallow: they classify tokens by shape, so ordinary
/// member access on a capitalised local is indistinguishable from a static call.
#[derive(Debug, Clone)]
pub struct PatternSet {
    pub(crate) declaration: Regex,
    pub(crate) instantiation: Regex,
    pub(crate) member_access: Regex,
    pub(crate) service_lookup: Regex,
    pub(crate) service_enum: Regex,
    pub(crate) inheritance: Regex,
}

impl PatternSet {
    pub fn new(config: &PatternConfig) -> Result<Self, ConfigError> {
        let service_lookup = format!(
            r#"\b{}\(\s*['"]([A-Za-z0-9_]+)['"]"#,
            regex::escape(&config.service_lookup)
        );
        let service_enum = format!(r"{}\.([A-Za-z0-9_]+)", regex::escape(&config.service_enum));

        Ok(Self {
            declaration: compile("declaration", &format!(r"\bclass\s+({IDENT})"))?,
            instantiation: compile("instantiation", &format!(r"\bnew\s+({IDENT})"))?,
            member_access: compile("member_access", &format!(r"\b({IDENT})\s*\."))?,
            service_lookup: compile("patterns.service_lookup", &service_lookup)?,
            service_enum: compile("patterns.service_enum", &service_enum)?,
            inheritance: compile(
                "inheritance",
                &format!(r"\bclass\s+{IDENT}\s+extends\s+({IDENT})"),
            )?,
        })
    }

    /// Names declared by class-like constructs in `text`, in order of appearance.
    pub fn declarations<'r, 't>(&'r self, text: &'t str) -> impl Iterator<Item = &'t str> + 'r
    where
        't: 'r,
    {
        first_groups(&self.declaration, text)
    }
}

fn compile(field: &'static str, pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::Pattern { field, source })
}

pub(crate) fn first_groups<'r, 't>(
    regex: &'r Regex,
    text: &'t str,
) -> impl Iterator<Item = &'t str> + 'r
where
    't: 'r,
{
    regex
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
}
