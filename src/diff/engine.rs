//! Merge-join diff over two element trees.

use crate::model::{check_order, Delta, Element, ElementKind, StructureError};
use std::cmp::Ordering;

/// Replaces the mapped severity of a diff node while folding.
///
/// `ancestors` runs from the node the evaluation started at down to the direct
/// parent of `diff`. Returning `None` keeps the node's own severity, which for a
/// two-sided node is the re-evaluated fold of its children.
pub trait Reclassify: Send + Sync {
    fn reclassify(&self, diff: &Diff<'_>, ancestors: &[&Diff<'_>]) -> Option<Delta>;
}

/// Hook that leaves every severity as it is.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReclassify;

impl Reclassify for NoReclassify {
    fn reclassify(&self, _diff: &Diff<'_>, _ancestors: &[&Diff<'_>]) -> Option<Delta> {
        None
    }
}

/// Ignore predicate: matching nodes fold as [`Delta::Ignored`].
pub struct IgnoreIf<F>(pub F);

impl<F> Reclassify for IgnoreIf<F>
where
    F: Fn(&Diff<'_>) -> bool + Send + Sync,
{
    fn reclassify(&self, diff: &Diff<'_>, _ancestors: &[&Diff<'_>]) -> Option<Delta> {
        (self.0)(diff).then_some(Delta::Ignored)
    }
}

/// Several hooks tried in order; the first one with an opinion wins.
pub struct FirstMatch<'h>(pub Vec<&'h dyn Reclassify>);

impl Reclassify for FirstMatch<'_> {
    fn reclassify(&self, diff: &Diff<'_>, ancestors: &[&Diff<'_>]) -> Option<Delta> {
        self.0
            .iter()
            .find_map(|hook| hook.reclassify(diff, ancestors))
    }
}

/// Result of matching a newer and an older element.
///
/// At least one side is present. The folded delta is computed once at
/// construction; re-evaluations with a hook never touch it.
#[derive(Debug)]
pub struct Diff<'a> {
    kind: ElementKind,
    name: &'a str,
    element: &'a Element,
    newer: Option<&'a Element>,
    older: Option<&'a Element>,
    children: Vec<Diff<'a>>,
    delta: Delta,
}

impl<'a> Diff<'a> {
    /// Diff two trees.
    ///
    /// Fails when either side has children out of `(kind, name)` order or with
    /// duplicate keys.
    pub fn new(newer: &'a Element, older: &'a Element) -> Result<Self, StructureError> {
        let children = merge(newer, older)?;
        let delta = fold(&children);
        Ok(Self {
            kind: newer.kind(),
            name: newer.name(),
            element: newer,
            newer: Some(newer),
            older: Some(older),
            children,
            delta,
        })
    }

    /// Diff for an element that only exists in the newer tree.
    pub fn added(newer: &'a Element) -> Result<Self, StructureError> {
        Self::one_sided(newer, true)
    }

    /// Diff for an element that only exists in the older tree.
    pub fn removed(older: &'a Element) -> Result<Self, StructureError> {
        Self::one_sided(older, false)
    }

    fn one_sided(element: &'a Element, is_newer: bool) -> Result<Self, StructureError> {
        check_children(element)?;
        let children = element
            .children()
            .iter()
            .map(|child| Self::one_sided(child, is_newer))
            .collect::<Result<Vec<_>, _>>()?;
        let (newer, older, delta) = if is_newer {
            (Some(element), None, Delta::Added)
        } else {
            (None, Some(element), Delta::Removed)
        };
        Ok(Self {
            kind: element.kind(),
            name: element.name(),
            element,
            newer,
            older,
            children,
            delta,
        })
    }

    #[must_use]
    pub const fn kind(&self) -> ElementKind {
        self.kind
    }

    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }

    #[must_use]
    pub const fn newer(&self) -> Option<&'a Element> {
        self.newer
    }

    #[must_use]
    pub const fn older(&self) -> Option<&'a Element> {
        self.older
    }

    /// The element of the newer side, or of the older one when removed.
    #[must_use]
    pub const fn element(&self) -> &'a Element {
        self.element
    }

    #[must_use]
    pub fn children(&self) -> &[Diff<'a>] {
        &self.children
    }

    /// Look up a direct child by kind and name.
    #[must_use]
    pub fn find(&self, kind: ElementKind, name: &str) -> Option<&Diff<'a>> {
        self.children
            .binary_search_by(|child| (child.kind, child.name).cmp(&(kind, name)))
            .ok()
            .map(|index| &self.children[index])
    }

    #[must_use]
    pub const fn is_one_sided(&self) -> bool {
        self.newer.is_none() || self.older.is_none()
    }

    /// Raw delta: `Added`/`Removed` for one-sided nodes, otherwise the folded
    /// severity of the children.
    #[must_use]
    pub const fn delta(&self) -> Delta {
        self.delta
    }

    /// Mapped severity: the present element's add/remove severity for
    /// one-sided nodes, otherwise the folded severity.
    #[must_use]
    pub fn severity(&self) -> Delta {
        self.own_severity().unwrap_or(self.delta)
    }

    fn own_severity(&self) -> Option<Delta> {
        match (self.newer, self.older) {
            (Some(newer), None) => Some(newer.add_severity()),
            (None, Some(older)) => Some(older.remove_severity()),
            _ => None,
        }
    }

    /// Re-fold with an ignore predicate applied at every level.
    #[must_use]
    pub fn delta_with<F>(&self, ignore: F) -> Delta
    where
        F: Fn(&Diff<'_>) -> bool + Send + Sync,
    {
        self.evaluate(&IgnoreIf(ignore))
    }

    /// Re-fold with a reclassification hook applied at every level.
    ///
    /// Like [`Diff::delta`], a one-sided node yields its raw outcome.
    #[must_use]
    pub fn evaluate(&self, hook: &dyn Reclassify) -> Delta {
        let mut ancestors = Vec::new();
        self.evaluate_in(hook, &mut ancestors)
    }

    fn evaluate_in<'s>(
        &'s self,
        hook: &dyn Reclassify,
        ancestors: &mut Vec<&'s Diff<'a>>,
    ) -> Delta {
        if self.is_one_sided() {
            return self.delta;
        }
        ancestors.push(self);
        let mut acc = Delta::Unchanged;
        for child in &self.children {
            acc = acc.escalate(child.mapped_in(hook, ancestors));
        }
        ancestors.pop();
        acc
    }

    /// Mapped severity of this node as seen by its parent under `hook`.
    pub(crate) fn mapped_in<'s>(
        &'s self,
        hook: &dyn Reclassify,
        ancestors: &mut Vec<&'s Diff<'a>>,
    ) -> Delta {
        if let Some(delta) = hook.reclassify(self, ancestors) {
            return delta;
        }
        match self.own_severity() {
            Some(delta) => delta,
            None => self.evaluate_in(hook, ancestors),
        }
    }

    /// Visit every node depth first, parents before children.
    pub fn walk<'s>(&'s self, visit: &mut impl FnMut(&'s Diff<'a>, usize)) {
        self.walk_at(0, visit);
    }

    fn walk_at<'s>(&'s self, depth: usize, visit: &mut impl FnMut(&'s Diff<'a>, usize)) {
        visit(self, depth);
        for child in &self.children {
            child.walk_at(depth + 1, visit);
        }
    }

    /// Number of nodes in this diff, including this one.
    #[must_use]
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(Diff::size).sum::<usize>()
    }
}

fn check_children(element: &Element) -> Result<(), StructureError> {
    element
        .children()
        .windows(2)
        .try_for_each(|pair| check_order(element, &pair[0], &pair[1]))
}

fn merge<'a>(newer: &'a Element, older: &'a Element) -> Result<Vec<Diff<'a>>, StructureError> {
    check_children(newer)?;
    check_children(older)?;

    let (mut newer_iter, mut older_iter) = (newer.children().iter(), older.children().iter());
    let (mut next_newer, mut next_older) = (newer_iter.next(), older_iter.next());
    let mut merged = Vec::with_capacity(newer.children().len().max(older.children().len()));

    loop {
        match (next_newer, next_older) {
            (Some(n), Some(o)) => match n.key().cmp(&o.key()) {
                Ordering::Equal => {
                    merged.push(Diff::new(n, o)?);
                    next_newer = newer_iter.next();
                    next_older = older_iter.next();
                }
                Ordering::Less => {
                    merged.push(Diff::added(n)?);
                    next_newer = newer_iter.next();
                }
                Ordering::Greater => {
                    merged.push(Diff::removed(o)?);
                    next_older = older_iter.next();
                }
            },
            (Some(n), None) => {
                merged.push(Diff::added(n)?);
                next_newer = newer_iter.next();
            }
            (None, Some(o)) => {
                merged.push(Diff::removed(o)?);
                next_older = older_iter.next();
            }
            (None, None) => break,
        }
    }

    Ok(merged)
}

fn fold(children: &[Diff<'_>]) -> Delta {
    children
        .iter()
        .fold(Delta::Unchanged, |acc, child| acc.escalate(child.severity()))
}
