//! Design-space enumeration.
//!
//! [`experiment_generator`] turns ordered collections of model structures,
//! policies, and scenarios into a lazy stream of [`Case`] values. By default
//! it walks the full cross product — models outermost, then policies, then
//! scenarios. A `zip_over` directive instead pairs selected axes
//! element-wise; see the table on [`experiment_generator`].

use core::fmt;
use core::iter::FusedIterator;
use core::str::FromStr;

use crate::error::{Error, Result};
use crate::point::{Policy, Scenario};

/// An enumeration axis of the design space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// The model-structure collection.
    Models,
    /// The policy collection.
    Policies,
    /// The scenario collection.
    Scenarios,
}

impl Axis {
    /// Returns the axis name as used in `zip_over` directives.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Axis::Models => "models",
            Axis::Policies => "policies",
            Axis::Scenarios => "scenarios",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Axis {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "models" => Ok(Axis::Models),
            "policies" => Ok(Axis::Policies),
            "scenarios" => Ok(Axis::Scenarios),
            other => Err(Error::UnknownAxis(other.to_string())),
        }
    }
}

/// One point in the enumerated design space.
///
/// Cases are produced only by [`experiment_generator`]; the `experiment_id`
/// is the 0-based ordinal the generator assigned, and the name interpolates
/// the model structure, the policy, and that ordinal — unique within one
/// generator invocation even when input names repeat.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Case {
    name: String,
    model_name: String,
    policy: Policy,
    scenario: Scenario,
    experiment_id: u64,
}

impl Case {
    /// Returns the case's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the model-structure name.
    #[must_use]
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Returns the policy.
    #[must_use]
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Returns the scenario.
    #[must_use]
    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    /// Returns the ordinal position in enumeration order.
    #[must_use]
    pub fn experiment_id(&self) -> u64 {
        self.experiment_id
    }
}

/// How the three axes combine.
#[derive(Clone, Copy, Debug)]
enum Plan {
    /// Full cross product, models outermost, then policies, then scenarios.
    Product,
    /// Two axes paired element-wise, the remaining axis outermost.
    ZipTwo { outer: Axis },
    /// All three axes paired element-wise.
    ZipAll,
}

fn axis_len<M>(axis: Axis, scenarios: &[Scenario], models: &[M], policies: &[Policy]) -> usize {
    match axis {
        Axis::Models => models.len(),
        Axis::Policies => policies.len(),
        Axis::Scenarios => scenarios.len(),
    }
}

fn check_zip_lengths(pairs: &[(Axis, usize)]) -> Result<()> {
    let (first_axis, first_len) = pairs[0];
    for &(axis, len) in &pairs[1..] {
        if len != first_len {
            return Err(Error::ZipLengthMismatch {
                left: first_axis.as_str(),
                left_len: first_len,
                right: axis.as_str(),
                right_len: len,
            });
        }
    }
    Ok(())
}

/// Enumerates cases across model structures, policies, and scenarios.
///
/// `zip_over` selects which axes are paired element-wise instead of
/// cross-multiplied; duplicate mentions collapse (set semantics):
///
/// | `zip_over` | behavior | precondition |
/// |------------|----------|--------------|
/// | `None` / empty | full cross product, models → policies → scenarios | — |
/// | two axes | those two paired element-wise, crossed against the third (third outermost) | equal lengths |
/// | all three | one combined element-wise loop | equal lengths |
/// | one axis | rejected | — |
///
/// All validation happens here, before the first case is produced.
///
/// # Errors
///
/// Returns an error if `zip_over` names exactly one axis, or if axes being
/// zipped have different lengths.
///
/// # Examples
///
/// ```
/// use designspace::generator::experiment_generator;
/// use designspace::point::DesignIds;
///
/// let ids = DesignIds::new();
/// let scenarios = vec![ids.empty_scenario("s1"), ids.empty_scenario("s2")];
/// let policies = vec![ids.empty_policy("p1")];
/// let models = vec!["m1".to_string(), "m2".to_string()];
///
/// let cases: Vec<_> = experiment_generator(&scenarios, &models, &policies, None)
///     .unwrap()
///     .collect();
/// assert_eq!(cases.len(), 4);
/// assert_eq!(cases[0].name(), "m1 p1 0");
/// assert_eq!(cases[3].experiment_id(), 3);
/// ```
pub fn experiment_generator<'a, M: AsRef<str>>(
    scenarios: &'a [Scenario],
    model_structures: &'a [M],
    policies: &'a [Policy],
    zip_over: Option<&[Axis]>,
) -> Result<Cases<'a, M>> {
    let mut axes: Vec<Axis> = Vec::new();
    for &axis in zip_over.unwrap_or_default() {
        if !axes.contains(&axis) {
            axes.push(axis);
        }
    }

    let plan = match axes.len() {
        0 => Plan::Product,
        1 => return Err(Error::ZipSingleAxis),
        2 => {
            let outer = [Axis::Models, Axis::Policies, Axis::Scenarios]
                .into_iter()
                .find(|axis| !axes.contains(axis))
                .expect("two distinct axes leave exactly one out");
            let lengths: Vec<(Axis, usize)> = axes
                .iter()
                .map(|&axis| (axis, axis_len(axis, scenarios, model_structures, policies)))
                .collect();
            check_zip_lengths(&lengths)?;
            Plan::ZipTwo { outer }
        }
        _ => {
            let lengths = [
                (
                    Axis::Models,
                    axis_len(Axis::Models, scenarios, model_structures, policies),
                ),
                (
                    Axis::Policies,
                    axis_len(Axis::Policies, scenarios, model_structures, policies),
                ),
                (
                    Axis::Scenarios,
                    axis_len(Axis::Scenarios, scenarios, model_structures, policies),
                ),
            ];
            check_zip_lengths(&lengths)?;
            Plan::ZipAll
        }
    };

    let total = match plan {
        Plan::Product => model_structures.len() * policies.len() * scenarios.len(),
        Plan::ZipAll => scenarios.len(),
        Plan::ZipTwo { outer } => {
            let zipped = match outer {
                Axis::Models => policies.len(),
                Axis::Policies => model_structures.len(),
                Axis::Scenarios => model_structures.len(),
            };
            axis_len(outer, scenarios, model_structures, policies) * zipped
        }
    };

    trace_debug!(
        models = model_structures.len(),
        policies = policies.len(),
        scenarios = scenarios.len(),
        total,
        "enumerating design space"
    );

    Ok(Cases {
        scenarios,
        models: model_structures,
        policies,
        plan,
        next: 0,
        total,
    })
}

/// A lazy stream of cases.
///
/// Single-pass and non-restartable: each case is computed when pulled, and
/// once the stream is exhausted it stays exhausted. To replay an enumeration,
/// call [`experiment_generator`] again or collect the cases into a `Vec`
/// first.
#[derive(Debug)]
pub struct Cases<'a, M> {
    scenarios: &'a [Scenario],
    models: &'a [M],
    policies: &'a [Policy],
    plan: Plan,
    next: usize,
    total: usize,
}

impl<M: AsRef<str>> Iterator for Cases<'_, M> {
    type Item = Case;

    fn next(&mut self) -> Option<Case> {
        if self.next >= self.total {
            return None;
        }
        let i = self.next;
        self.next += 1;

        let (m, p, s) = match self.plan {
            Plan::Product => {
                let n_scenarios = self.scenarios.len();
                let n_policies = self.policies.len();
                (
                    i / (n_policies * n_scenarios),
                    (i / n_scenarios) % n_policies,
                    i % n_scenarios,
                )
            }
            Plan::ZipAll => (i, i, i),
            Plan::ZipTwo { outer } => match outer {
                Axis::Models => {
                    let n = self.policies.len();
                    (i / n, i % n, i % n)
                }
                Axis::Policies => {
                    let n = self.models.len();
                    (i % n, i / n, i % n)
                }
                Axis::Scenarios => {
                    let n = self.models.len();
                    (i % n, i % n, i / n)
                }
            },
        };

        let model = self.models[m].as_ref();
        let policy = &self.policies[p];
        Some(Case {
            name: format!("{} {} {}", model, policy.name(), i),
            model_name: model.to_string(),
            policy: policy.clone(),
            scenario: self.scenarios[s].clone(),
            experiment_id: i as u64,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total - self.next;
        (remaining, Some(remaining))
    }
}

impl<M: AsRef<str>> ExactSizeIterator for Cases<'_, M> {}

impl<M: AsRef<str>> FusedIterator for Cases<'_, M> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::DesignIds;

    fn fixtures(n_scenarios: usize, n_policies: usize) -> (Vec<Scenario>, Vec<Policy>) {
        let ids = DesignIds::new();
        let scenarios = (1..=n_scenarios)
            .map(|i| ids.empty_scenario(format!("s{i}")))
            .collect();
        let policies = (1..=n_policies)
            .map(|i| ids.empty_policy(format!("p{i}")))
            .collect();
        (scenarios, policies)
    }

    #[test]
    fn full_product_orders_models_policies_scenarios() {
        let (scenarios, policies) = fixtures(2, 1);
        let models = vec!["m1".to_string(), "m2".to_string()];
        let cases: Vec<Case> = experiment_generator(&scenarios, &models, &policies, None)
            .unwrap()
            .collect();

        assert_eq!(cases.len(), 4);
        let triples: Vec<(&str, &str, &str)> = cases
            .iter()
            .map(|c| (c.model_name(), c.policy().name(), c.scenario().name()))
            .collect();
        assert_eq!(
            triples,
            vec![
                ("m1", "p1", "s1"),
                ("m1", "p1", "s2"),
                ("m2", "p1", "s1"),
                ("m2", "p1", "s2"),
            ]
        );
        for (i, case) in cases.iter().enumerate() {
            assert_eq!(case.experiment_id(), i as u64);
        }
    }

    #[test]
    fn case_names_stay_unique_for_duplicate_inputs() {
        let ids = DesignIds::new();
        let scenarios = vec![ids.empty_scenario("s"), ids.empty_scenario("s")];
        let policies = vec![ids.empty_policy("p")];
        let models = vec!["m".to_string()];
        let names: Vec<String> = experiment_generator(&scenarios, &models, &policies, None)
            .unwrap()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names, vec!["m p 0", "m p 1"]);
    }

    #[test]
    fn zip_scenarios_policies_pairs_elementwise() {
        let (scenarios, policies) = fixtures(2, 2);
        let models = vec!["m1".to_string()];
        let cases: Vec<Case> = experiment_generator(
            &scenarios,
            &models,
            &policies,
            Some(&[Axis::Scenarios, Axis::Policies]),
        )
        .unwrap()
        .collect();

        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].policy().name(), "p1");
        assert_eq!(cases[0].scenario().name(), "s1");
        assert_eq!(cases[1].policy().name(), "p2");
        assert_eq!(cases[1].scenario().name(), "s2");
    }

    #[test]
    fn zip_models_scenarios_keeps_policies_outermost() {
        let (scenarios, policies) = fixtures(2, 2);
        let models = vec!["m1".to_string(), "m2".to_string()];
        let triples: Vec<(String, String, String)> = experiment_generator(
            &scenarios,
            &models,
            &policies,
            Some(&[Axis::Models, Axis::Scenarios]),
        )
        .unwrap()
        .map(|c| {
            (
                c.model_name().to_string(),
                c.policy().name().to_string(),
                c.scenario().name().to_string(),
            )
        })
        .collect();

        assert_eq!(
            triples,
            vec![
                ("m1".into(), "p1".into(), "s1".into()),
                ("m2".into(), "p1".into(), "s2".into()),
                ("m1".into(), "p2".into(), "s1".into()),
                ("m2".into(), "p2".into(), "s2".into()),
            ]
        );
    }

    #[test]
    fn zip_all_three_is_one_combined_loop() {
        let (scenarios, policies) = fixtures(3, 3);
        let models = vec!["m1".to_string(), "m2".to_string(), "m3".to_string()];
        let cases: Vec<Case> = experiment_generator(
            &scenarios,
            &models,
            &policies,
            Some(&[Axis::Models, Axis::Policies, Axis::Scenarios]),
        )
        .unwrap()
        .collect();

        assert_eq!(cases.len(), 3);
        assert_eq!(cases[2].model_name(), "m3");
        assert_eq!(cases[2].policy().name(), "p3");
        assert_eq!(cases[2].scenario().name(), "s3");
    }

    #[test]
    fn single_axis_zip_is_rejected_before_enumeration() {
        let (scenarios, policies) = fixtures(2, 1);
        let models = vec!["m1".to_string()];
        let result =
            experiment_generator(&scenarios, &models, &policies, Some(&[Axis::Scenarios]));
        assert!(matches!(result, Err(Error::ZipSingleAxis)));
    }

    #[test]
    fn duplicate_axis_mentions_collapse_to_one() {
        let (scenarios, policies) = fixtures(2, 1);
        let models = vec!["m1".to_string()];
        let result = experiment_generator(
            &scenarios,
            &models,
            &policies,
            Some(&[Axis::Scenarios, Axis::Scenarios]),
        );
        assert!(matches!(result, Err(Error::ZipSingleAxis)));
    }

    #[test]
    fn zipped_length_mismatch_is_rejected_before_enumeration() {
        let (scenarios, policies) = fixtures(3, 2);
        let models = vec!["m1".to_string()];
        let result = experiment_generator(
            &scenarios,
            &models,
            &policies,
            Some(&[Axis::Scenarios, Axis::Policies]),
        );
        assert!(matches!(result, Err(Error::ZipLengthMismatch { .. })));
    }

    #[test]
    fn axis_parsing_rejects_unknown_names() {
        assert_eq!("models".parse::<Axis>().unwrap(), Axis::Models);
        assert_eq!("scenarios".parse::<Axis>().unwrap(), Axis::Scenarios);
        assert!(matches!(
            "designs".parse::<Axis>(),
            Err(Error::UnknownAxis(name)) if name == "designs"
        ));
    }

    #[test]
    fn exact_size_shrinks_as_cases_are_pulled() {
        let (scenarios, policies) = fixtures(2, 2);
        let models = vec!["m1".to_string()];
        let mut cases = experiment_generator(&scenarios, &models, &policies, None).unwrap();
        assert_eq!(cases.len(), 4);
        let _ = cases.next();
        assert_eq!(cases.len(), 3);
    }
}
