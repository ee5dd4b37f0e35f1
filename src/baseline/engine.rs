//! Version baselining.
//!
//! Given the diff of two releases and their declared versions, decide for
//! every exported unit which version the newer release should carry, whether
//! the declared one is too low, and why. The component version is derived from
//! the most severe unit.

use super::bump::{bump, component_bump, suggest};
use super::filter::{PathIgnore, UnitFilter};
use super::metadata::ComponentMetadata;
use super::result::{BaselineResult, ExportedUnitInfo};
use crate::config::{BaselineConfig, PolicyConfig, DEFAULT_PARALLEL_THRESHOLD};
use crate::diff::{explain, Diff, FirstMatch, Reclassify};
use crate::error::Result;
use crate::model::{Delta, ElementKind, Version};
use crate::policy::{ignore_threshold, API_NODE};
use rayon::prelude::*;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Resolved baselining options.
#[derive(Debug, Clone)]
pub struct BaselineOptions {
    pub filter: UnitFilter,
    pub ignore: PathIgnore,
    pub reserved_prefixes: Vec<String>,
    pub parallel_threshold: usize,
    pub ignore_annotation: String,
}

impl Default for BaselineOptions {
    fn default() -> Self {
        Self {
            filter: UnitFilter::default(),
            ignore: PathIgnore::default(),
            reserved_prefixes: vec![crate::config::DEFAULT_RESERVED_PREFIX.to_string()],
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            ignore_annotation: crate::config::DEFAULT_IGNORE_ANNOTATION.to_string(),
        }
    }
}

impl BaselineOptions {
    pub fn from_config(baseline: &BaselineConfig, policy: &PolicyConfig) -> Result<Self> {
        Ok(Self {
            filter: UnitFilter::parse(&baseline.units)?,
            ignore: PathIgnore::parse(&baseline.ignore)?,
            reserved_prefixes: baseline.reserved_prefixes.clone(),
            parallel_threshold: baseline.parallel_threshold.max(1),
            ignore_annotation: policy.ignore_annotation.clone(),
        })
    }

    fn selects(&self, unit: &str) -> bool {
        !self
            .reserved_prefixes
            .iter()
            .any(|prefix| unit.starts_with(prefix.as_str()))
            && self.filter.matches(unit)
    }
}

/// Ignores nodes carrying the ignore marker when the change stays within
/// the marker's version.
struct IgnoreMarkers<'o> {
    annotation: &'o str,
    older: &'o Version,
}

impl Reclassify for IgnoreMarkers<'_> {
    fn reclassify(&self, diff: &Diff<'_>, _ancestors: &[&Diff<'_>]) -> Option<Delta> {
        let threshold = ignore_threshold(diff.element(), self.annotation)?.ok()?;
        let within = *self.older < threshold && bump(diff.severity(), self.older) <= threshold;
        within.then_some(Delta::Ignored)
    }
}

/// Treats method additions to the named interfaces as provider-side changes.
struct ProviderRetry<'p> {
    interfaces: &'p BTreeSet<&'p str>,
}

impl Reclassify for ProviderRetry<'_> {
    fn reclassify(&self, diff: &Diff<'_>, ancestors: &[&Diff<'_>]) -> Option<Delta> {
        if diff.kind() != ElementKind::Method
            || diff.delta() != Delta::Added
            || diff.severity() != Delta::Major
        {
            return None;
        }
        let owner = ancestors.last()?;
        (owner.kind() == ElementKind::Interface && self.interfaces.contains(owner.name()))
            .then_some(Delta::Minor)
    }
}

/// Interfaces of a unit whose major severity stems from added methods.
fn consumer_interfaces_with_additions<'a>(unit: &Diff<'a>) -> BTreeSet<&'a str> {
    unit.children()
        .iter()
        .filter(|ty| ty.kind() == ElementKind::Interface && !ty.is_one_sided())
        .filter(|ty| {
            ty.children().iter().any(|member| {
                member.kind() == ElementKind::Method
                    && member.delta() == Delta::Added
                    && member.severity() == Delta::Major
            })
        })
        .map(|ty| ty.name())
        .collect()
}

fn short_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

/// Warnings for ignore markers whose version does not parse.
fn marker_warnings(unit: &Diff<'_>, annotation: &str) -> Vec<String> {
    let mut warnings = Vec::new();
    unit.walk(&mut |node, _| {
        if let Some(Err(err)) = ignore_threshold(node.element(), annotation) {
            warnings.push(format!(
                "Ignoring {annotation} on {} {}: {err}",
                node.kind(),
                node.name()
            ));
        }
    });
    warnings
}

/// Computes suggested versions from a component diff.
#[derive(Debug, Clone, Default)]
pub struct Baseliner {
    options: BaselineOptions,
}

impl Baseliner {
    #[must_use]
    pub const fn new(options: BaselineOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> &BaselineOptions {
        &self.options
    }

    /// Baseline `diff`, the comparison of the newer component against the
    /// older one, or a one-sided diff of the newer component when there is no
    /// older release.
    #[must_use]
    pub fn baseline<'d>(
        &self,
        diff: &'d Diff<'d>,
        newer: &ComponentMetadata,
        older: Option<&ComponentMetadata>,
    ) -> BaselineResult<'d> {
        let units = self.units(diff, newer, older);
        let mut result = BaselineResult {
            identity: newer.identity.clone(),
            older_identity: older.map(|o| o.identity.clone()),
            newer_version: newer.version.clone(),
            older_version: older.map(|o| o.version.clone()),
            suggested_version: newer.version.clone(),
            mismatch: false,
            first_release: older.is_none(),
            delta: diff.delta(),
            reason: Vec::new(),
            warnings: Vec::new(),
            units,
            diff,
        };

        match older {
            Some(older) if older.identity == newer.identity => {
                Self::component(&mut result, older);
            }
            Some(older) => {
                result.warnings.push(format!(
                    "Identity changed from {} to {}, treating as a first release",
                    older.identity, newer.identity
                ));
                Self::initial(&mut result);
            }
            None => Self::initial(&mut result),
        }

        info!(
            identity = %result.identity,
            suggested = %result.suggested_version,
            mismatch = result.has_mismatch(),
            "baselined component"
        );
        result
    }

    fn initial(result: &mut BaselineResult<'_>) {
        if result.newer_version.is_empty() {
            result.suggested_version = Version::ONE;
        }
    }

    fn component(result: &mut BaselineResult<'_>, older: &ComponentMetadata) {
        let highest = result
            .units
            .iter()
            .map(ExportedUnitInfo::content_severity)
            .fold(Delta::Unchanged, Delta::escalate);

        let mut suggested = component_bump(highest, &older.version);
        if result.newer_version > suggested {
            suggested = result.newer_version.clone();
        }

        let declared = result.newer_version.without_qualifier();
        if declared < older.version.without_qualifier() {
            result.warnings.push(format!(
                "Declared version {} is lower than the baseline version {}",
                result.newer_version, older.version
            ));
        }

        let rebuild =
            declared == older.version.without_qualifier() && result.delta == Delta::Unchanged;
        if rebuild {
            debug!(version = %declared, "unchanged rebuild, suppressing mismatches");
            for unit in &mut result.units {
                unit.mismatch = false;
            }
            result.suggested_version = result.newer_version.clone();
            return;
        }

        result.mismatch = declared < suggested.without_qualifier();
        result.suggested_version = suggested;
        if highest > Delta::Unchanged {
            result.reason = result
                .units
                .iter()
                .filter(|unit| unit.content_severity() == highest)
                .flat_map(|unit| {
                    unit.reason
                        .iter()
                        .map(move |line| format!("{}: {line}", unit.name))
                })
                .collect();
        }
    }

    fn units<'d>(
        &self,
        diff: &'d Diff<'d>,
        newer: &ComponentMetadata,
        older: Option<&ComponentMetadata>,
    ) -> Vec<ExportedUnitInfo<'d>> {
        let Some(api) = diff.find(ElementKind::Api, API_NODE) else {
            return Vec::new();
        };
        let candidates: Vec<&'d Diff<'d>> = api
            .children()
            .iter()
            .filter(|unit| unit.kind() == ElementKind::Package && self.options.selects(unit.name()))
            .collect();

        let mut infos: Vec<ExportedUnitInfo<'d>> =
            if candidates.len() > self.options.parallel_threshold {
                debug!(units = candidates.len(), "baselining units in parallel");
                candidates
                    .par_iter()
                    .map(|&unit| self.unit(unit, newer, older))
                    .collect()
            } else {
                candidates
                    .into_iter()
                    .map(|unit| self.unit(unit, newer, older))
                    .collect()
            };
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        infos
    }

    fn unit<'d>(
        &self,
        unit: &'d Diff<'d>,
        newer: &ComponentMetadata,
        older: Option<&ComponentMetadata>,
    ) -> ExportedUnitInfo<'d> {
        let name = unit.name();
        let newer_meta = newer.unit(name);
        let older_meta = older.and_then(|o| o.unit(name));
        let newer_version = newer_meta.map(|m| m.version.clone());
        let older_version = older_meta.map(|m| m.version.clone());
        let attributes = newer_meta
            .or(older_meta)
            .map(|m| m.attributes.clone())
            .unwrap_or_default();

        let older_or_lowest = older_version.clone().unwrap_or(Version::LOWEST);
        let newer_or_lowest = newer_version.clone().unwrap_or(Version::LOWEST);

        let annotation = self.options.ignore_annotation.as_str();
        let markers = IgnoreMarkers {
            annotation,
            older: &older_or_lowest,
        };
        let hook = FirstMatch(vec![&self.options.ignore, &markers]);

        let delta = if self.options.ignore.matches(name) {
            Delta::Ignored
        } else {
            unit.evaluate(&hook)
        };
        let mut warnings = marker_warnings(unit, annotation);
        let suggestion = suggest(delta, &older_or_lowest, &newer_or_lowest);
        warnings.extend(suggestion.warning);

        let reason = if delta.is_one_sided() || delta > Delta::Unchanged {
            explain(unit, delta, &hook)
        } else {
            Vec::new()
        };

        let mismatch = suggestion.version.as_ref().is_some_and(|suggested| {
            *suggested > newer_or_lowest
                && older_or_lowest.major() > 0
                && newer_or_lowest.major() > 0
        });

        let mut providers = Vec::new();
        let mut suggested_if_providers = None;
        if mismatch && delta == Delta::Major {
            let interfaces = consumer_interfaces_with_additions(unit);
            if !interfaces.is_empty() {
                let retry = ProviderRetry {
                    interfaces: &interfaces,
                };
                let remediated = FirstMatch(vec![&self.options.ignore, &markers, &retry]);
                let retried = unit.evaluate(&remediated);
                providers = interfaces.iter().map(|i| short_name(i).to_string()).collect();
                if retried < Delta::Major {
                    let version = bump(retried, &older_or_lowest);
                    warnings.push(format!(
                        "Declaring {} as provider type(s) would reduce the suggested version to {version}",
                        providers.join(", ")
                    ));
                    suggested_if_providers = Some(version);
                }
            }
        }

        if mismatch {
            warn!(
                unit = name,
                declared = %newer_or_lowest,
                suggested = ?suggestion.version.as_ref().map(ToString::to_string),
                "unit version too low"
            );
        } else {
            debug!(unit = name, delta = %delta, "baselined unit");
        }

        ExportedUnitInfo {
            name: name.to_string(),
            delta,
            older_version,
            newer_version,
            attributes,
            suggested_version: suggestion.version,
            suggested_if_providers,
            mismatch,
            warnings,
            reason,
            providers,
            diff: unit,
        }
    }
}
