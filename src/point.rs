//! Policies, scenarios, and experiment assembly.
//!
//! A [`Policy`] assigns concrete values to levers, a [`Scenario`] to
//! uncertainties. Each carries a unique sequential id drawn from a dedicated
//! counter owned by a [`DesignIds`] context. An [`Experiment`] flattens one
//! scenario, one policy, constants, and optional replication values into a
//! single mapping for the execution layer.

use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::parameter::Parameter;
use crate::value::{Constant, Value};

/// A monotonic id sequence.
///
/// Hands out 1, 2, 3, ... — one value per allocation, never reused, never
/// decremented. The increment is atomic, so concurrent construction across
/// threads stays strictly increasing.
#[derive(Debug)]
pub struct IdSource {
    next: AtomicU64,
}

impl IdSource {
    /// Creates a sequence starting at 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// Takes the next id.
    pub fn take(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Owns the id sequences for policies and scenarios.
///
/// One context per study session: keeping the counters here instead of in
/// module-level statics keeps test runs deterministic and lets independent
/// sessions allocate without cross-talk. Ids are taken after the
/// construction inputs are accepted, so a failed construction never burns a
/// sequence value.
///
/// # Examples
///
/// ```
/// use designspace::point::DesignIds;
///
/// let ids = DesignIds::new();
/// let p1 = ids.policy("base", [("rate", 0.1)]);
/// let p2 = ids.policy("push", [("rate", 0.9)]);
/// assert_eq!((p1.id(), p2.id()), (1, 2));
///
/// // Scenarios count independently.
/// let s1 = ids.scenario("low", [("demand", 10.0)]);
/// assert_eq!(s1.id(), 1);
/// ```
#[derive(Debug, Default)]
pub struct DesignIds {
    policies: IdSource,
    scenarios: IdSource,
}

impl DesignIds {
    /// Creates a fresh context with both sequences at 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a policy, allocating its id from the policy sequence.
    pub fn policy<I, K, V>(&self, name: impl Into<String>, values: I) -> Policy
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Policy {
            name: name.into(),
            id: self.policies.take(),
            values: collect_values(values),
        }
    }

    /// Builds a scenario, allocating its id from the scenario sequence.
    pub fn scenario<I, K, V>(&self, name: impl Into<String>, values: I) -> Scenario
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Scenario {
            name: name.into(),
            id: self.scenarios.take(),
            values: collect_values(values),
        }
    }

    /// Builds a policy with no lever values.
    pub fn empty_policy(&self, name: impl Into<String>) -> Policy {
        self.policy(name, Vec::<(String, Value)>::new())
    }

    /// Builds a scenario with no uncertainty values.
    pub fn empty_scenario(&self, name: impl Into<String>) -> Scenario {
        self.scenario(name, Vec::<(String, Value)>::new())
    }
}

fn collect_values<I, K, V>(values: I) -> IndexMap<String, Value>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    values
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// One concrete assignment of values to levers.
///
/// Immutable after construction; the id is allocated exactly once, at
/// construction time, and persists for the policy's lifetime.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Policy {
    name: String,
    id: u64,
    values: IndexMap<String, Value>,
}

impl Policy {
    /// Returns the policy's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the policy's unique sequential id.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the lever values in insertion order.
    #[must_use]
    pub fn values(&self) -> &IndexMap<String, Value> {
        &self.values
    }

    /// Returns the value for the named lever.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Projects the values into a sequence following the order of the given
    /// parameter collection — lever order, not insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first parameter this policy has no value
    /// for.
    pub fn to_list(&self, parameters: &[Parameter]) -> Result<Vec<Value>> {
        parameters
            .iter()
            .map(|parameter| {
                self.values
                    .get(parameter.name())
                    .cloned()
                    .ok_or_else(|| Error::MissingValue {
                        point: self.name.clone(),
                        parameter: parameter.name().to_string(),
                    })
            })
            .collect()
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Policy('{}')", self.name)
    }
}

/// One concrete assignment of values to uncertainties.
///
/// Immutable after construction; the id is allocated exactly once, at
/// construction time, and persists for the scenario's lifetime.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scenario {
    name: String,
    id: u64,
    values: IndexMap<String, Value>,
}

impl Scenario {
    /// Returns the scenario's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the scenario's unique sequential id.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the uncertainty values in insertion order.
    #[must_use]
    pub fn values(&self) -> &IndexMap<String, Value> {
        &self.values
    }

    /// Returns the value for the named uncertainty.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scenario('{}')", self.name)
    }
}

/// Replication-specific values (seed and the like) with a caller-assigned id.
///
/// Replication numbering belongs to the execution layer, so the id is
/// supplied rather than drawn from a sequence here.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Replication {
    id: u64,
    values: IndexMap<String, Value>,
}

impl Replication {
    /// Creates a replication record.
    #[must_use]
    pub fn new<I, K, V>(id: u64, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self {
            id,
            values: collect_values(values),
        }
    }

    /// Returns the replication id.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the replication values.
    #[must_use]
    pub fn values(&self) -> &IndexMap<String, Value> {
        &self.values
    }
}

/// Scenario, policy, constant, and replication values flattened into one
/// mapping.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Experiment {
    name: String,
    id: u64,
    values: IndexMap<String, Value>,
}

impl Experiment {
    /// Flattens the inputs into one mapping.
    ///
    /// The id is `scenario.id * policy.id * replication.id`, with the
    /// replication id defaulting to 1 when absent. The product is not
    /// injective: distinct (scenario, policy, replication) triples can land
    /// on the same id. Callers needing a unique key should use the name,
    /// which interpolates the scenario name, policy name, and replication id.
    ///
    /// # Errors
    ///
    /// Returns an error if the same key occurs in more than one of the
    /// inputs.
    pub fn new(
        scenario: &Scenario,
        policy: &Policy,
        constants: &[Constant],
        replication: Option<&Replication>,
    ) -> Result<Self> {
        let replication_id = replication.map_or(1, Replication::id);
        let id = scenario.id() * policy.id() * replication_id;
        let name = format!("{}_{}_{}", scenario.name(), policy.name(), replication_id);

        let mut values = IndexMap::new();
        let mut insert = |key: String, value: Value| -> Result<()> {
            if values.insert(key.clone(), value).is_some() {
                return Err(Error::DuplicateKey {
                    name: name.clone(),
                    key,
                });
            }
            Ok(())
        };

        for (key, value) in scenario.values() {
            insert(key.clone(), value.clone())?;
        }
        for (key, value) in policy.values() {
            insert(key.clone(), value.clone())?;
        }
        for constant in constants {
            insert(constant.name().to_string(), constant.value().clone())?;
        }
        if let Some(replication) = replication {
            for (key, value) in replication.values() {
                insert(key.clone(), value.clone())?;
            }
        }

        Ok(Self { name, id, values })
    }

    /// Returns the experiment's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the multiplicative id. Not injective; see [`Experiment::new`].
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the flattened values in insertion order: scenario, policy,
    /// constants, replication.
    #[must_use]
    pub fn values(&self) -> &IndexMap<String, Value> {
        &self.values
    }

    /// Returns the value for the named input.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_start_at_one_and_increment_per_kind() {
        let ids = DesignIds::new();
        let p1 = ids.policy("p1", [("a", 1.0)]);
        let s1 = ids.scenario("s1", [("b", 2.0)]);
        let p2 = ids.policy("p2", [("a", 3.0)]);
        let s2 = ids.scenario("s2", [("b", 4.0)]);
        assert_eq!(p1.id(), 1);
        assert_eq!(p2.id(), 2);
        assert_eq!(s1.id(), 1);
        assert_eq!(s2.id(), 2);
    }

    #[test]
    fn separate_contexts_do_not_share_counters() {
        let a = DesignIds::new();
        let b = DesignIds::new();
        let _ = a.policy("p", [("x", 1.0)]);
        assert_eq!(b.policy("p", [("x", 1.0)]).id(), 1);
    }

    #[test]
    fn to_list_follows_parameter_order() {
        let ids = DesignIds::new();
        let policy = ids.policy("p", [("b", 2.0), ("a", 1.0)]);
        let parameters = vec![
            Parameter::real("a", 0.0, 10.0).unwrap(),
            Parameter::real("b", 0.0, 10.0).unwrap(),
        ];
        let listed = policy.to_list(&parameters).unwrap();
        assert_eq!(listed, vec![Value::Real(1.0), Value::Real(2.0)]);
    }

    #[test]
    fn to_list_names_the_missing_parameter() {
        let ids = DesignIds::new();
        let policy = ids.policy("p", [("a", 1.0)]);
        let parameters = vec![Parameter::real("z", 0.0, 1.0).unwrap()];
        assert!(matches!(
            policy.to_list(&parameters),
            Err(Error::MissingValue { parameter, .. }) if parameter == "z"
        ));
    }

    #[test]
    fn experiment_flattens_in_input_order() {
        let ids = DesignIds::new();
        let scenario = ids.scenario("s", [("u", 1.0)]);
        let policy = ids.policy("p", [("l", 2.0)]);
        let constants = vec![Constant::new("c", 3.0)];
        let experiment = Experiment::new(&scenario, &policy, &constants, None).unwrap();
        let keys: Vec<&String> = experiment.values().keys().collect();
        assert_eq!(keys, vec!["u", "l", "c"]);
        assert_eq!(experiment.name(), "s_p_1");
    }

    #[test]
    fn experiment_id_multiplies_component_ids() {
        let ids = DesignIds::new();
        let _ = ids.scenario("skip", [("u", 0.0)]);
        let scenario = ids.scenario("s", [("u", 1.0)]);
        let _ = ids.policy("skip", [("l", 0.0)]);
        let _ = ids.policy("skip2", [("l", 0.0)]);
        let policy = ids.policy("p", [("l", 2.0)]);
        let replication = Replication::new(5, [("seed", 7_i64)]);

        let experiment =
            Experiment::new(&scenario, &policy, &[], Some(&replication)).unwrap();
        assert_eq!(experiment.id(), 2 * 3 * 5);
        assert_eq!(experiment.name(), "s_p_5");
        assert_eq!(experiment.get("seed"), Some(&Value::Int(7)));
    }

    #[test]
    fn experiment_rejects_overlapping_keys() {
        let ids = DesignIds::new();
        let scenario = ids.scenario("s", [("x", 1.0)]);
        let policy = ids.policy("p", [("x", 2.0)]);
        assert!(matches!(
            Experiment::new(&scenario, &policy, &[], None),
            Err(Error::DuplicateKey { key, .. }) if key == "x"
        ));
    }
}
