//! Node selection criteria.
//!
//! Filtering shows up in two places with the same contract: at collection
//! time (bounding what ever enters the graph) and at traversal time (scoping
//! what an algorithm visits). The [`SelectionCriteria`] trait captures that
//! contract; the regex implementation speaks Perl-style `m//` patterns for
//! compatibility with the established command-line convention.

use regex::{Regex, RegexBuilder};

use ahash::AHashSet;

/// Pattern rejected while building criteria.
///
/// Criteria construction is the only fallible step; matching itself never
/// fails.
#[derive(Debug, thiserror::Error)]
pub enum CriteriaError {
    #[error("malformed pattern \"{pattern}\": {reason}")]
    BadPattern { pattern: String, reason: String },

    #[error("invalid regular expression \"{pattern}\"")]
    BadRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// What a criteria selects, per granularity.
pub trait SelectionCriteria {
    fn is_matching_packages(&self) -> bool {
        true
    }
    fn is_matching_classes(&self) -> bool {
        true
    }
    fn is_matching_features(&self) -> bool {
        true
    }

    fn matches_package_name(&self, name: &str) -> bool;
    fn matches_class_name(&self, name: &str) -> bool;
    fn matches_feature_name(&self, name: &str) -> bool;
}

/// Matches every node. The collector's default.
#[derive(Debug, Default, Clone, Copy)]
pub struct ComprehensiveCriteria;

impl SelectionCriteria for ComprehensiveCriteria {
    fn matches_package_name(&self, _name: &str) -> bool {
        true
    }
    fn matches_class_name(&self, _name: &str) -> bool {
        true
    }
    fn matches_feature_name(&self, _name: &str) -> bool {
        true
    }
}

/// One compiled Perl-style pattern.
///
/// The empty pattern (`//`) is the match-everything sentinel and carries no
/// regex at all.
#[derive(Debug, Clone)]
enum Pattern {
    MatchAll,
    Regex(Regex),
}

impl Pattern {
    /// Parse `"/re/mods"` or `"m<d>re<d>mods"` where `<d>` is any delimiter
    /// character. The only supported modifier is `i`.
    fn parse(text: &str) -> Result<Self, CriteriaError> {
        let bad = |reason: &str| CriteriaError::BadPattern {
            pattern: text.to_string(),
            reason: reason.to_string(),
        };

        let mut chars = text.chars();
        let delimiter = match chars.next() {
            Some('/') => '/',
            Some('m') => chars.next().ok_or_else(|| bad("missing delimiter"))?,
            _ => return Err(bad("expected /re/ or m=re= form")),
        };
        let rest = chars.as_str();
        let close = rest
            .rfind(delimiter)
            .ok_or_else(|| bad("unterminated pattern"))?;
        let body = &rest[..close];
        let modifiers = &rest[close + delimiter.len_utf8()..];

        let mut case_insensitive = false;
        for modifier in modifiers.chars() {
            match modifier {
                'i' => case_insensitive = true,
                other => return Err(bad(&format!("unsupported modifier '{other}'"))),
            }
        }

        if body.is_empty() {
            return Ok(Pattern::MatchAll);
        }
        let regex = RegexBuilder::new(body)
            .case_insensitive(case_insensitive)
            .build()
            .map_err(|source| CriteriaError::BadRegex {
                pattern: text.to_string(),
                source,
            })?;
        Ok(Pattern::Regex(regex))
    }

    fn matches(&self, name: &str) -> bool {
        match self {
            Pattern::MatchAll => true,
            Pattern::Regex(regex) => regex.is_match(name),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct PatternList {
    patterns: Vec<Pattern>,
}

impl PatternList {
    fn parse(texts: &[String]) -> Result<Self, CriteriaError> {
        let patterns = texts
            .iter()
            .map(|text| Pattern::parse(text))
            .collect::<Result<_, _>>()?;
        Ok(Self { patterns })
    }

    fn any_match(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(name))
    }
}

/// Include/exclude regex criteria with global and per-granularity lists.
///
/// A name is selected when any include (global or its granularity's) matches
/// and no exclude does. An empty effective include list selects nothing;
/// excludes always win. The default seeds the global includes with `//`, so
/// an untouched criteria selects everything.
#[derive(Debug, Clone)]
pub struct RegularExpressionCriteria {
    matching_packages: bool,
    matching_classes: bool,
    matching_features: bool,
    global_includes: PatternList,
    global_excludes: PatternList,
    package_includes: PatternList,
    package_excludes: PatternList,
    class_includes: PatternList,
    class_excludes: PatternList,
    feature_includes: PatternList,
    feature_excludes: PatternList,
}

impl Default for RegularExpressionCriteria {
    fn default() -> Self {
        Self {
            matching_packages: true,
            matching_classes: true,
            matching_features: true,
            global_includes: PatternList {
                patterns: vec![Pattern::MatchAll],
            },
            global_excludes: PatternList::default(),
            package_includes: PatternList::default(),
            package_excludes: PatternList::default(),
            class_includes: PatternList::default(),
            class_excludes: PatternList::default(),
            feature_includes: PatternList::default(),
            feature_excludes: PatternList::default(),
        }
    }
}

impl RegularExpressionCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the global include list. Passing an empty list makes the
    /// criteria select nothing unless per-granularity includes are set.
    pub fn set_global_includes(&mut self, patterns: &[String]) -> Result<(), CriteriaError> {
        self.global_includes = PatternList::parse(patterns)?;
        Ok(())
    }

    pub fn set_global_excludes(&mut self, patterns: &[String]) -> Result<(), CriteriaError> {
        self.global_excludes = PatternList::parse(patterns)?;
        Ok(())
    }

    pub fn set_package_includes(&mut self, patterns: &[String]) -> Result<(), CriteriaError> {
        self.package_includes = PatternList::parse(patterns)?;
        Ok(())
    }

    pub fn set_package_excludes(&mut self, patterns: &[String]) -> Result<(), CriteriaError> {
        self.package_excludes = PatternList::parse(patterns)?;
        Ok(())
    }

    pub fn set_class_includes(&mut self, patterns: &[String]) -> Result<(), CriteriaError> {
        self.class_includes = PatternList::parse(patterns)?;
        Ok(())
    }

    pub fn set_class_excludes(&mut self, patterns: &[String]) -> Result<(), CriteriaError> {
        self.class_excludes = PatternList::parse(patterns)?;
        Ok(())
    }

    pub fn set_feature_includes(&mut self, patterns: &[String]) -> Result<(), CriteriaError> {
        self.feature_includes = PatternList::parse(patterns)?;
        Ok(())
    }

    pub fn set_feature_excludes(&mut self, patterns: &[String]) -> Result<(), CriteriaError> {
        self.feature_excludes = PatternList::parse(patterns)?;
        Ok(())
    }

    pub fn set_matching_packages(&mut self, value: bool) {
        self.matching_packages = value;
    }

    pub fn set_matching_classes(&mut self, value: bool) {
        self.matching_classes = value;
    }

    pub fn set_matching_features(&mut self, value: bool) {
        self.matching_features = value;
    }

    fn selects(
        &self,
        name: &str,
        includes: &PatternList,
        excludes: &PatternList,
    ) -> bool {
        (self.global_includes.any_match(name) || includes.any_match(name))
            && !self.global_excludes.any_match(name)
            && !excludes.any_match(name)
    }
}

impl SelectionCriteria for RegularExpressionCriteria {
    fn is_matching_packages(&self) -> bool {
        self.matching_packages
    }

    fn is_matching_classes(&self) -> bool {
        self.matching_classes
    }

    fn is_matching_features(&self) -> bool {
        self.matching_features
    }

    fn matches_package_name(&self, name: &str) -> bool {
        self.matching_packages
            && self.selects(name, &self.package_includes, &self.package_excludes)
    }

    fn matches_class_name(&self, name: &str) -> bool {
        self.matching_classes && self.selects(name, &self.class_includes, &self.class_excludes)
    }

    fn matches_feature_name(&self, name: &str) -> bool {
        self.matching_features
            && self.selects(name, &self.feature_includes, &self.feature_excludes)
    }
}

/// Fixed name-set criteria: selected names minus excluded names.
#[derive(Debug, Default, Clone)]
pub struct CollectionCriteria {
    include: AHashSet<String>,
    exclude: AHashSet<String>,
}

impl CollectionCriteria {
    pub fn new<I, J>(include: I, exclude: J) -> Self
    where
        I: IntoIterator<Item = String>,
        J: IntoIterator<Item = String>,
    {
        Self {
            include: include.into_iter().collect(),
            exclude: exclude.into_iter().collect(),
        }
    }

    fn selects(&self, name: &str) -> bool {
        self.include.contains(name) && !self.exclude.contains(name)
    }
}

impl SelectionCriteria for CollectionCriteria {
    fn matches_package_name(&self, name: &str) -> bool {
        self.selects(name)
    }

    fn matches_class_name(&self, name: &str) -> bool {
        self.selects(name)
    }

    fn matches_feature_name(&self, name: &str) -> bool {
        self.selects(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_pattern_matches_everything() {
        let criteria = RegularExpressionCriteria::new();
        assert!(criteria.matches_package_name("anything.at.all"));
        assert!(criteria.matches_feature_name(""));
    }

    #[test]
    fn excludes_beat_includes() {
        let mut criteria = RegularExpressionCriteria::new();
        criteria
            .set_global_excludes(&[r"/^java\./".to_string()])
            .unwrap();
        assert!(!criteria.matches_class_name("java.lang.String"));
        assert!(criteria.matches_class_name("com.example.Foo"));
    }

    #[test]
    fn empty_include_list_matches_nothing() {
        let mut criteria = RegularExpressionCriteria::new();
        criteria.set_global_includes(&[]).unwrap();
        assert!(!criteria.matches_class_name("com.example.Foo"));
    }

    #[test]
    fn alternate_delimiter_and_case_modifier() {
        let mut criteria = RegularExpressionCriteria::new();
        criteria.set_global_includes(&["m=FOO=i".to_string()]).unwrap();
        assert!(criteria.matches_class_name("com.example.foo.Bar"));
        assert!(!criteria.matches_class_name("com.example.Baz"));
    }

    #[test]
    fn bad_pattern_is_rejected_at_construction() {
        let mut criteria = RegularExpressionCriteria::new();
        assert!(criteria.set_global_includes(&["/[/".to_string()]).is_err());
        assert!(criteria.set_global_includes(&["oops".to_string()]).is_err());
    }
}
