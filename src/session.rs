//! Shared load-and-collect plumbing for the analysis commands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use sextant::graph::{
    CodeDependencyCollector, NodeFactory, RegularExpressionCriteria, SelectionCriteria,
};
use sextant::loader::ClassfileLoader;
use sextant::Classfile;

/// Build collection criteria from CLI pattern lists.
///
/// Bare patterns are wrapped into `/re/` form so users can pass plain
/// regular expressions; anything already in `/re/` or `m=re=` form passes
/// through untouched.
pub fn build_criteria(
    includes: &[String],
    excludes: &[String],
) -> Result<RegularExpressionCriteria> {
    let mut criteria = RegularExpressionCriteria::new();
    if !includes.is_empty() {
        let includes: Vec<String> = includes.iter().map(|p| normalize(p)).collect();
        criteria
            .set_global_includes(&includes)
            .context("invalid --include pattern")?;
    }
    if !excludes.is_empty() {
        let excludes: Vec<String> = excludes.iter().map(|p| normalize(p)).collect();
        criteria
            .set_global_excludes(&excludes)
            .context("invalid --exclude pattern")?;
    }
    Ok(criteria)
}

fn normalize(pattern: &str) -> String {
    if is_delimited(pattern) {
        pattern.to_string()
    } else {
        format!("/{pattern}/")
    }
}

/// A pattern counts as already delimited when it starts with `/`, or with
/// `m` followed by a delimiter character. A bare pattern that merely begins
/// with the letter m, like `main`, still gets wrapped.
fn is_delimited(pattern: &str) -> bool {
    let mut chars = pattern.chars();
    match chars.next() {
        Some('/') => true,
        Some('m') => matches!(chars.next(), Some(delimiter) if !delimiter.is_alphanumeric()),
        _ => false,
    }
}

/// Load every classfile under the given locations.
///
/// Diagnostics go to stderr in canonical order; the returned count lets
/// responses report how many entries were skipped or failed.
pub fn load_classfiles(paths: &[PathBuf], progress: bool) -> Result<(Vec<Classfile>, usize)> {
    let mut loader = ClassfileLoader::new().show_progress(progress);
    loader.load(paths, &mut [])?;
    loader.diagnostics().report();
    let diagnostics = loader.diagnostics().len();
    Ok((loader.into_classfiles(), diagnostics))
}

/// Collect the dependency graph of a batch of classfiles.
pub fn collect_graph(
    classfiles: &[Classfile],
    criteria: &dyn SelectionCriteria,
) -> Result<NodeFactory> {
    let mut factory = NodeFactory::new();
    let mut collector = CodeDependencyCollector::new(&mut factory, criteria);
    for classfile in classfiles {
        collector
            .collect(classfile)
            .with_context(|| format!("collecting dependencies of {}", classfile.class_name))?;
    }
    Ok(factory)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_pattern_starting_with_m_is_wrapped() {
        let criteria = build_criteria(&["main".to_string()], &[]).unwrap();
        assert!(criteria.matches_class_name("com.example.main.Tool"));
        assert!(!criteria.matches_class_name("com.example.util.Tool"));
    }

    #[test]
    fn delimited_forms_pass_through() {
        assert_eq!(normalize("/^com\\./"), "/^com\\./");
        assert_eq!(normalize("m=^com\\.=i"), "m=^com\\.=i");
        assert_eq!(normalize("com\\.example"), "/com\\.example/");
        assert_eq!(normalize("metrics"), "/metrics/");
    }
}
