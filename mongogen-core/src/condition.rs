//! Condition records and the ordered set the caller edits.
//!
//! A [`Condition`] is one user-entered constraint: a dotted field path, a
//! filter operator, the raw value text, and an optional logical-group
//! assignment. [`ConditionSet`] is the caller-side store that keeps
//! conditions in insertion order and feeds them to the filter compiler.

use serde::{Deserialize, Serialize};

use crate::filter;

/// Filter operators a condition can apply to its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Equality (rendered as bare `{field: value}` shorthand).
    #[serde(rename = "$eq")]
    Eq,
    /// Not equal to.
    #[serde(rename = "$ne")]
    Ne,
    /// Greater than.
    #[serde(rename = "$gt")]
    Gt,
    /// Greater than or equal to.
    #[serde(rename = "$gte")]
    Gte,
    /// Less than.
    #[serde(rename = "$lt")]
    Lt,
    /// Less than or equal to.
    #[serde(rename = "$lte")]
    Lte,
    /// Value is one of the listed values.
    #[serde(rename = "$in")]
    In,
    /// Value is none of the listed values.
    #[serde(rename = "$nin")]
    Nin,
    /// Array field contains all listed values.
    #[serde(rename = "$all")]
    All,
    /// Array element matches a sub-query.
    #[serde(rename = "$elemMatch")]
    ElemMatch,
    /// Array field has the given length.
    #[serde(rename = "$size")]
    Size,
    /// Field presence check.
    #[serde(rename = "$exists")]
    Exists,
    /// BSON type check.
    #[serde(rename = "$type")]
    Type,
    /// Regular-expression match.
    #[serde(rename = "$regex")]
    Regex,
}

impl Operator {
    /// The MongoDB spelling of this operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "$eq",
            Operator::Ne => "$ne",
            Operator::Gt => "$gt",
            Operator::Gte => "$gte",
            Operator::Lt => "$lt",
            Operator::Lte => "$lte",
            Operator::In => "$in",
            Operator::Nin => "$nin",
            Operator::All => "$all",
            Operator::ElemMatch => "$elemMatch",
            Operator::Size => "$size",
            Operator::Exists => "$exists",
            Operator::Type => "$type",
            Operator::Regex => "$regex",
        }
    }

    /// Whether this operator takes a list of values rather than a scalar.
    pub fn takes_list(&self) -> bool {
        matches!(self, Operator::In | Operator::Nin | Operator::All)
    }
}

/// Logical operator combining the conditions of one group.
///
/// `None` marks a condition as ungrouped: it competes for a slot in the
/// flat top level of the compiled filter instead of joining a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GroupOperator {
    /// Not part of any explicit logical group.
    #[default]
    None,
    #[serde(rename = "$and")]
    And,
    #[serde(rename = "$or")]
    Or,
    #[serde(rename = "$nor")]
    Nor,
}

impl GroupOperator {
    /// The MongoDB spelling of this operator (`"None"` for ungrouped).
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupOperator::None => "None",
            GroupOperator::And => "$and",
            GroupOperator::Or => "$or",
            GroupOperator::Nor => "$nor",
        }
    }
}

/// Group label a condition can be assigned to.
///
/// Labels are meaningful only when the condition's [`GroupOperator`] is not
/// `None`. Groups are merged into the filter in ascending label order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum GroupNumber {
    #[default]
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
}

/// One user-entered filter constraint.
///
/// `field`, `operator`, and `value` are required and non-empty by the time
/// a condition reaches the compiler; the caller validates that before
/// constructing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Dotted field path, e.g. `"address.city"`.
    pub field: String,
    /// The filter operator applied to the field.
    pub operator: Operator,
    /// Raw value text as typed by the user; parsed per operator.
    pub value: String,
    /// Group label, used only when `group_operator` is not `None`.
    #[serde(default)]
    pub group_number: GroupNumber,
    /// Logical group membership.
    #[serde(default)]
    pub group_operator: GroupOperator,
}

/// Ordered collection of conditions with last-write-wins semantics.
///
/// Pushing a condition whose `(field, operator)` pair matches an existing
/// entry replaces that entry in place, so an exact duplicate keeps its
/// original position in the list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionSet {
    conditions: Vec<Condition>,
}

impl ConditionSet {
    /// Creates an empty condition set.
    pub fn new() -> Self {
        ConditionSet { conditions: Vec::new() }
    }

    /// Adds a condition, replacing any existing one with the same
    /// `(field, operator)` pair.
    pub fn push(&mut self, condition: Condition) {
        let existing = self
            .conditions
            .iter_mut()
            .find(|entry| entry.field == condition.field && entry.operator == condition.operator);

        match existing {
            Some(entry) => *entry = condition,
            None => self.conditions.push(condition),
        }
    }

    /// Removes the condition at `index`, returning it if present.
    pub fn remove(&mut self, index: usize) -> Option<Condition> {
        if index < self.conditions.len() {
            Some(self.conditions.remove(index))
        } else {
            None
        }
    }

    /// Removes all conditions.
    pub fn clear(&mut self) {
        self.conditions.clear();
    }

    /// Iterates conditions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Condition> {
        self.conditions.iter()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Compiles the current conditions into a filter document.
    pub fn compile(&self) -> bson::Document {
        filter::compile(&self.conditions)
    }
}

impl From<Vec<Condition>> for ConditionSet {
    fn from(conditions: Vec<Condition>) -> Self {
        let mut set = ConditionSet::new();
        for condition in conditions {
            set.push(condition);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cond(field: &str, operator: Operator, value: &str) -> Condition {
        Condition {
            field: field.to_string(),
            operator,
            value: value.to_string(),
            group_number: GroupNumber::default(),
            group_operator: GroupOperator::default(),
        }
    }

    #[test]
    fn push_replaces_same_field_and_operator_in_place() {
        let mut set = ConditionSet::new();
        set.push(cond("age", Operator::Gt, "18"));
        set.push(cond("status", Operator::Eq, "active"));
        set.push(cond("age", Operator::Gt, "21"));

        assert_eq!(set.len(), 2);
        let entries: Vec<&Condition> = set.iter().collect();
        assert_eq!(entries[0].field, "age");
        assert_eq!(entries[0].value, "21");
        assert_eq!(entries[1].field, "status");
    }

    #[test]
    fn push_keeps_same_field_with_different_operator() {
        let mut set = ConditionSet::new();
        set.push(cond("age", Operator::Gt, "18"));
        set.push(cond("age", Operator::Lt, "65"));

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn condition_deserializes_from_dollar_spellings() {
        let json = r#"{
            "field": "status",
            "operator": "$eq",
            "value": "active",
            "groupNumber": "2",
            "groupOperator": "$or"
        }"#;

        let condition: Condition = serde_json::from_str(json).unwrap();
        assert_eq!(condition.operator, Operator::Eq);
        assert_eq!(condition.group_number, GroupNumber::Two);
        assert_eq!(condition.group_operator, GroupOperator::Or);
    }

    #[test]
    fn condition_defaults_to_ungrouped() {
        let json = r#"{"field": "status", "operator": "$ne", "value": "archived"}"#;

        let condition: Condition = serde_json::from_str(json).unwrap();
        assert_eq!(condition.group_operator, GroupOperator::None);
        assert_eq!(condition.group_number, GroupNumber::One);
    }
}
