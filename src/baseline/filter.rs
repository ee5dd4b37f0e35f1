//! Unit selection and path-based ignores.

use crate::diff::{Diff, Reclassify};
use crate::error::{BaselineError, Result};
use crate::model::{Delta, ElementKind};
use crate::utils::compile_glob;
use regex::Regex;

#[derive(Debug, Clone)]
struct Instruction {
    pattern: Regex,
    /// Literal prefix of a trailing `.*`, which also matches the bare name
    parent: Option<String>,
    negated: bool,
}

impl Instruction {
    fn parse(text: &str) -> Result<Self> {
        let (negated, glob) = match text.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        if glob.is_empty() {
            return Err(BaselineError::config(format!("empty unit instruction '{text}'")));
        }
        let pattern = compile_glob(glob).map_err(BaselineError::config)?;
        Ok(Self {
            pattern,
            parent: glob.strip_suffix(".*").map(str::to_string),
            negated,
        })
    }

    fn matches(&self, name: &str) -> bool {
        self.pattern.is_match(name) || self.parent.as_deref() == Some(name)
    }
}

/// Ordered include/exclude instructions over unit names.
///
/// The first matching instruction decides; a leading `!` excludes. A name no
/// instruction matches is excluded, unless every instruction is negated.
/// Without instructions every unit is selected.
#[derive(Debug, Clone, Default)]
pub struct UnitFilter {
    instructions: Vec<Instruction>,
}

impl UnitFilter {
    pub fn parse<I, S>(instructions: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let instructions = instructions
            .into_iter()
            .map(|text| Instruction::parse(text.as_ref().trim()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { instructions })
    }

    #[must_use]
    pub fn matches(&self, unit: &str) -> bool {
        if let Some(instruction) = self.instructions.iter().find(|i| i.matches(unit)) {
            return !instruction.negated;
        }
        self.instructions.iter().all(|i| i.negated)
    }
}

/// Ignores diff nodes whose qualified path matches one of a set of globs.
///
/// Packages, types, resources and headers are matched by name, members as
/// `Type#member` with the field name for fields.
#[derive(Debug, Clone, Default)]
pub struct PathIgnore {
    globs: Vec<Regex>,
}

impl PathIgnore {
    pub fn parse<I, S>(globs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let globs = globs
            .into_iter()
            .map(|glob| compile_glob(glob.as_ref().trim()).map_err(BaselineError::config))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { globs })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.globs.is_empty()
    }

    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        self.globs.iter().any(|glob| glob.is_match(path))
    }
}

impl Reclassify for PathIgnore {
    fn reclassify(&self, diff: &Diff<'_>, ancestors: &[&Diff<'_>]) -> Option<Delta> {
        if self.globs.is_empty() {
            return None;
        }
        qualified_path(diff, ancestors)
            .filter(|path| self.matches(path))
            .map(|_| Delta::Ignored)
    }
}

/// Path of a node as written in ignore lists, if it has one.
#[must_use]
pub fn qualified_path(diff: &Diff<'_>, ancestors: &[&Diff<'_>]) -> Option<String> {
    let kind = diff.kind();
    if kind.is_type()
        || matches!(
            kind,
            ElementKind::Package | ElementKind::Resource | ElementKind::Header
        )
    {
        return Some(diff.name().to_string());
    }

    let member = match kind {
        ElementKind::Method => diff.name(),
        ElementKind::Field => diff.name().rsplit(' ').next().unwrap_or_default(),
        _ => return None,
    };
    let owner = ancestors.iter().rev().find(|a| a.kind().is_type())?;
    Some(format!("{}#{member}", owner.name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Element;

    #[test]
    fn test_first_match_wins() {
        let filter = UnitFilter::parse(["!p.internal*", "p.*"]).expect("filter");
        assert!(filter.matches("p"));
        assert!(filter.matches("p.api"));
        assert!(!filter.matches("p.internal"));
        assert!(!filter.matches("p.internal.impl"));
        assert!(!filter.matches("q"));
    }

    #[test]
    fn test_only_negations_select_the_rest() {
        let filter = UnitFilter::parse(["!p.impl"]).expect("filter");
        assert!(!filter.matches("p.impl"));
        assert!(filter.matches("p"));

        assert!(UnitFilter::default().matches("anything"));
    }

    #[test]
    fn test_invalid_instruction() {
        assert!(UnitFilter::parse(["!"]).is_err());
        assert!(UnitFilter::parse([""]).is_err());
        assert!(UnitFilter::parse(["p.["]).is_ok());
    }

    fn tree() -> Element {
        Element::builder(ElementKind::Package, "p")
            .child(
                Element::builder(ElementKind::Class, "p.C")
                    .child(Element::leaf(ElementKind::Method, "m()"))
                    .child(Element::leaf(ElementKind::Field, "int count"))
                    .build(),
            )
            .build()
    }

    #[test]
    fn test_qualified_paths() {
        let older = tree();
        let newer = Element::builder(ElementKind::Package, "p").build();
        let diff = Diff::new(&newer, &older).expect("diff");

        let mut paths = Vec::new();
        let mut stack: Vec<&Diff<'_>> = Vec::new();
        fn collect<'s, 'a>(
            diff: &'s Diff<'a>,
            stack: &mut Vec<&'s Diff<'a>>,
            paths: &mut Vec<Option<String>>,
        ) {
            paths.push(qualified_path(diff, stack));
            stack.push(diff);
            for child in diff.children() {
                collect(child, stack, paths);
            }
            stack.pop();
        }
        collect(&diff, &mut stack, &mut paths);

        assert_eq!(
            paths,
            vec![
                Some("p".to_string()),
                Some("p.C".to_string()),
                Some("p.C#m()".to_string()),
                Some("p.C#count".to_string()),
            ]
        );
    }

    #[test]
    fn test_path_ignore_masks_members() {
        let older = Element::builder(ElementKind::Package, "p")
            .child(Element::builder(ElementKind::Class, "p.C").build())
            .build();
        let newer = tree();
        let diff = Diff::new(&newer, &older).expect("diff");
        assert_eq!(diff.delta(), Delta::Minor);

        let ignore = PathIgnore::parse(["p.C#*"]).expect("globs");
        assert_eq!(diff.evaluate(&ignore), Delta::Unchanged);

        let unrelated = PathIgnore::parse(["q.*"]).expect("globs");
        assert_eq!(diff.evaluate(&unrelated), Delta::Minor);
    }

    #[test]
    fn test_path_ignore_exact_method() {
        let older = tree();
        let newer = Element::builder(ElementKind::Package, "p")
            .child(
                Element::builder(ElementKind::Class, "p.C")
                    .child(Element::leaf(ElementKind::Field, "int count"))
                    .build(),
            )
            .build();
        let diff = Diff::new(&newer, &older).expect("diff");
        assert_eq!(diff.delta(), Delta::Major);

        let ignore = PathIgnore::parse(["p.C#m()"]).expect("globs");
        assert!(ignore.matches("p.C#m()"));
        assert!(!ignore.matches("p.C#m"));
        assert_eq!(diff.evaluate(&ignore), Delta::Unchanged);
    }
}
