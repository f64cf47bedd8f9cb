// aivis-core/src/domain/scoring/registry.rs

use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use super::descriptor::ExecutionScope;
use super::dimension::Dimension;
use super::rule::Rule;
use crate::domain::error::DomainError;

/// Tolerance used when comparing sums of fractional weights.
const WEIGHT_EPSILON: f64 = 1e-9;

struct RegisteredRule {
    rule: Arc<dyn Rule>,
    sequence: usize,
}

/// Immutable set of rules, grouped by dimension and pre-sorted by
/// descending priority, then registration order.
pub struct RuleRegistry {
    by_dimension: BTreeMap<Dimension, Vec<RegisteredRule>>,
    reservations: BTreeMap<(Dimension, ExecutionScope), f64>,
}

/// Weight bookkeeping of one (dimension, scope) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightAudit {
    pub dimension: Dimension,
    pub scope: ExecutionScope,
    pub rule_count: usize,
    pub registered: f64,
    pub reserved: f64,
    /// Nominal weight neither registered nor explicitly reserved.
    pub unaccounted: f64,
}

impl WeightAudit {
    pub fn is_conserved(&self) -> bool {
        self.unaccounted.abs() < WEIGHT_EPSILON
    }
}

impl RuleRegistry {
    pub fn builder() -> RuleRegistryBuilder {
        RuleRegistryBuilder::default()
    }

    /// Rules of `dimension` in canonical evaluation order.
    pub fn rules_for(&self, dimension: Dimension) -> impl Iterator<Item = &Arc<dyn Rule>> + '_ {
        self.by_dimension
            .get(&dimension)
            .into_iter()
            .flatten()
            .map(|registered| &registered.rule)
    }

    pub fn get(&self, id: &str) -> Option<&Arc<dyn Rule>> {
        self.iter().find(|rule| rule.descriptor().id == id)
    }

    /// All rules, dimension by dimension, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Rule>> + '_ {
        self.by_dimension
            .values()
            .flatten()
            .map(|registered| &registered.rule)
    }

    pub fn len(&self) -> usize {
        self.by_dimension.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dimensions that own at least one rule of the given scope.
    pub fn dimensions_for(&self, scope: ExecutionScope) -> Vec<Dimension> {
        Dimension::ALL
            .into_iter()
            .filter(|dimension| {
                self.rules_for(*dimension)
                    .any(|rule| rule.descriptor().execution_scope == scope)
            })
            .collect()
    }

    pub fn reserved(&self, dimension: Dimension, scope: ExecutionScope) -> f64 {
        self.reservations
            .get(&(dimension, scope))
            .copied()
            .unwrap_or(0.0)
    }

    /// Static consistency check: registered weights plus reserved remainder
    /// should equal the nominal total for every populated (dimension, scope).
    pub fn weight_audit(&self) -> Vec<WeightAudit> {
        let mut audits = Vec::new();
        for scope in [ExecutionScope::Page, ExecutionScope::Domain] {
            for dimension in Dimension::ALL {
                let (rule_count, registered) = self
                    .rules_for(dimension)
                    .filter(|rule| rule.descriptor().execution_scope == scope)
                    .fold((0, 0.0), |(count, sum), rule| {
                        (count + 1, sum + rule.descriptor().weight)
                    });
                let reserved = self.reserved(dimension, scope);
                if rule_count == 0 && reserved == 0.0 {
                    continue;
                }
                audits.push(WeightAudit {
                    dimension,
                    scope,
                    rule_count,
                    registered,
                    reserved,
                    unaccounted: super::NOMINAL_TOTAL_WEIGHT - registered - reserved,
                });
            }
        }
        audits
    }
}

#[derive(Default)]
pub struct RuleRegistryBuilder {
    rules: Vec<Arc<dyn Rule>>,
    reservations: BTreeMap<(Dimension, ExecutionScope), f64>,
}

impl RuleRegistryBuilder {
    pub fn register<R: Rule + 'static>(self, rule: R) -> Self {
        self.register_shared(Arc::new(rule))
    }

    pub fn register_shared(mut self, rule: Arc<dyn Rule>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Declares nominal weight deliberately left unscored for a dimension.
    pub fn reserve(mut self, dimension: Dimension, scope: ExecutionScope, weight: f64) -> Self {
        self.reservations.insert((dimension, scope), weight);
        self
    }

    pub fn build(self) -> Result<RuleRegistry, DomainError> {
        let mut seen = HashSet::new();
        let mut totals: BTreeMap<(Dimension, ExecutionScope), f64> = BTreeMap::new();

        for rule in &self.rules {
            let descriptor = rule.descriptor();
            if !seen.insert(descriptor.id.clone()) {
                return Err(DomainError::DuplicateRule(descriptor.id.clone()));
            }
            if !(0.0..=1.0).contains(&descriptor.weight) {
                return Err(DomainError::InvalidWeight {
                    rule_id: descriptor.id.clone(),
                    weight: descriptor.weight,
                });
            }
            *totals
                .entry((descriptor.dimension, descriptor.execution_scope))
                .or_default() += descriptor.weight;
        }

        for (&(dimension, scope), &weight) in &self.reservations {
            if !(0.0..=1.0).contains(&weight) {
                return Err(DomainError::InvalidReservation { dimension, weight });
            }
            *totals.entry((dimension, scope)).or_default() += weight;
        }

        if let Some((&(dimension, scope), &total)) = totals
            .iter()
            .find(|(_, total)| **total > super::NOMINAL_TOTAL_WEIGHT + WEIGHT_EPSILON)
        {
            return Err(DomainError::WeightOverflow {
                dimension,
                scope,
                total,
            });
        }

        let mut by_dimension: BTreeMap<Dimension, Vec<RegisteredRule>> = BTreeMap::new();
        for (sequence, rule) in self.rules.into_iter().enumerate() {
            by_dimension
                .entry(rule.descriptor().dimension)
                .or_default()
                .push(RegisteredRule { rule, sequence });
        }
        for rules in by_dimension.values_mut() {
            rules.sort_by(|a, b| {
                b.rule
                    .descriptor()
                    .priority
                    .cmp(&a.rule.descriptor().priority)
                    .then(a.sequence.cmp(&b.sequence))
            });
        }

        Ok(RuleRegistry {
            by_dimension,
            reservations: self.reservations,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::error::RuleError;
    use crate::domain::page::RuleContext;
    use crate::domain::scoring::{RuleDescriptor, RuleResult};
    use async_trait::async_trait;

    struct FixedRule {
        descriptor: RuleDescriptor,
    }

    impl FixedRule {
        fn new(id: &str, dimension: Dimension, weight: f64, priority: i32) -> Self {
            Self {
                descriptor: RuleDescriptor::new(id, id, dimension)
                    .weight(weight)
                    .priority(priority),
            }
        }
    }

    #[async_trait]
    impl Rule for FixedRule {
        fn descriptor(&self) -> &RuleDescriptor {
            &self.descriptor
        }

        async fn evaluate(&self, _ctx: &RuleContext) -> Result<RuleResult, RuleError> {
            Ok(RuleResult::new(100.0))
        }
    }

    fn ids(registry: &RuleRegistry, dimension: Dimension) -> Vec<String> {
        registry
            .rules_for(dimension)
            .map(|r| r.descriptor().id.clone())
            .collect()
    }

    #[test]
    fn test_rules_ordered_by_priority_then_registration() {
        let registry = RuleRegistry::builder()
            .register(FixedRule::new("low", Dimension::Structure, 0.1, 10))
            .register(FixedRule::new("tie_a", Dimension::Structure, 0.1, 50))
            .register(FixedRule::new("high", Dimension::Structure, 0.1, 90))
            .register(FixedRule::new("tie_b", Dimension::Structure, 0.1, 50))
            .build()
            .unwrap();

        assert_eq!(
            ids(&registry, Dimension::Structure),
            vec!["high", "tie_a", "tie_b", "low"]
        );
        assert!(ids(&registry, Dimension::Authority).is_empty());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = RuleRegistry::builder()
            .register(FixedRule::new("dup", Dimension::Authority, 0.1, 1))
            .register(FixedRule::new("dup", Dimension::Freshness, 0.1, 1))
            .build();
        assert!(matches!(result, Err(DomainError::DuplicateRule(id)) if id == "dup"));
    }

    #[test]
    fn test_weight_outside_unit_interval_rejected() {
        let result = RuleRegistry::builder()
            .register(FixedRule::new("heavy", Dimension::Authority, 1.5, 1))
            .build();
        assert!(matches!(result, Err(DomainError::InvalidWeight { .. })));
    }

    #[test]
    fn test_overflowing_dimension_rejected() {
        let result = RuleRegistry::builder()
            .register(FixedRule::new("a", Dimension::Technical, 0.6, 1))
            .register(FixedRule::new("b", Dimension::Technical, 0.3, 1))
            .reserve(Dimension::Technical, ExecutionScope::Page, 0.2)
            .build();
        assert!(matches!(
            result,
            Err(DomainError::WeightOverflow {
                dimension: Dimension::Technical,
                ..
            })
        ));
    }

    #[test]
    fn test_weight_audit_reports_reserved_and_unaccounted() {
        let registry = RuleRegistry::builder()
            .register(FixedRule::new("a", Dimension::Authority, 0.2, 1))
            .register(FixedRule::new("b", Dimension::Authority, 0.7, 1))
            .reserve(Dimension::Authority, ExecutionScope::Page, 0.1)
            .register(FixedRule::new("c", Dimension::Freshness, 0.5, 1))
            .build()
            .unwrap();

        let audits = registry.weight_audit();
        assert_eq!(audits.len(), 2);

        let authority = &audits[0];
        assert_eq!(authority.dimension, Dimension::Authority);
        assert_eq!(authority.rule_count, 2);
        assert!(authority.is_conserved());

        let freshness = &audits[1];
        assert!(!freshness.is_conserved());
        assert!((freshness.unaccounted - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_dimensions_for_scope() {
        let mut site_rule = FixedRule::new("site", Dimension::Technical, 1.0, 1);
        site_rule.descriptor = site_rule
            .descriptor
            .clone()
            .execution_scope(ExecutionScope::Domain);
        let registry = RuleRegistry::builder()
            .register(FixedRule::new("page", Dimension::Authority, 1.0, 1))
            .register(site_rule)
            .build()
            .unwrap();

        assert_eq!(
            registry.dimensions_for(ExecutionScope::Domain),
            vec![Dimension::Technical]
        );
        assert_eq!(
            registry.dimensions_for(ExecutionScope::Page),
            vec![Dimension::Authority]
        );
        assert!(registry.get("site").is_some());
        assert_eq!(registry.len(), 2);
    }
}
