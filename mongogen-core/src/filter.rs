//! Filter compilation: per-condition fragments and the grouping merge.
//!
//! Each condition contributes one single-key fragment document. Fragments
//! are then combined into a single MongoDB filter document according to
//! their group assignments:
//!
//! - ungrouped fragments merge flat, unless two of them constrain the same
//!   field, in which case the whole set is promoted to an `$and` list so no
//!   constraint is silently dropped;
//! - grouped fragments collect into per-label buckets and are wrapped in
//!   their group operator, with single-member groups eliding the wrapper;
//! - groups sharing an operator at the top level splice into one list.
//!
//! Compilation is a pure function over the condition list and never fails.

use std::collections::{BTreeMap, HashSet};

use bson::{Bson, Document, doc};

use crate::condition::{Condition, GroupNumber, GroupOperator, Operator};
use crate::value::parse_value;

/// Builds the single-key filter fragment for one condition.
///
/// Equality uses the bare `{field: value}` shorthand; list operators wrap a
/// stray scalar parse into a one-element list; `$exists` re-derives its
/// boolean from the raw value text, which the caller constrains to the
/// literal strings `true`/`false`.
pub fn fragment(condition: &Condition) -> Document {
    let field = condition.field.as_str();
    let parsed = parse_value(&condition.value, condition.operator);

    match condition.operator {
        Operator::Eq => doc! { field: parsed },
        Operator::In | Operator::Nin | Operator::All => {
            let values = match parsed {
                Bson::Array(items) => items,
                single => vec![single],
            };
            let operator = condition.operator.as_str();
            doc! { field: { operator: values } }
        }
        Operator::Exists => {
            let present = condition.value.trim().eq_ignore_ascii_case("true");
            doc! { field: { "$exists": present } }
        }
        other => {
            let operator = other.as_str();
            doc! { field: { operator: parsed } }
        }
    }
}

#[derive(Default)]
struct GroupBucket {
    operator: GroupOperator,
    fragments: Vec<Document>,
}

/// Compiles an ordered condition list into one filter document.
pub fn compile(conditions: &[Condition]) -> Document {
    let mut ungrouped: Vec<Document> = Vec::new();
    let mut groups: BTreeMap<GroupNumber, GroupBucket> = BTreeMap::new();

    for condition in conditions {
        let frag = fragment(condition);
        match condition.group_operator {
            GroupOperator::None => ungrouped.push(frag),
            operator => {
                let bucket = groups.entry(condition.group_number).or_default();
                // Last declared operator wins for the label.
                bucket.operator = operator;
                bucket.fragments.push(frag);
            }
        }
    }

    if groups.is_empty() {
        if ungrouped.is_empty() {
            return Document::new();
        }
        return merge_flat(ungrouped);
    }

    if groups.len() == 1 && ungrouped.is_empty() {
        let bucket = groups
            .into_values()
            .next()
            .expect("length checked above");
        return group_expression(bucket);
    }

    let mut result = Document::new();
    for bucket in groups.into_values() {
        let key = bucket.operator.as_str();
        let expr = group_expression(bucket);
        merge_group(&mut result, key, expr);
    }
    fold_ungrouped(&mut result, ungrouped);
    result
}

/// The expression for one group: a bare fragment for single-member groups,
/// otherwise the fragments listed under the group operator.
fn group_expression(bucket: GroupBucket) -> Document {
    let GroupBucket { operator, mut fragments } = bucket;
    if fragments.len() == 1 {
        return fragments.remove(0);
    }

    let key = operator.as_str();
    let members: Vec<Bson> = fragments.into_iter().map(Bson::Document).collect();
    doc! { key: members }
}

/// Merges one group expression into the top-level result under `key`.
///
/// A group expression wrapped in the same operator key splices its member
/// list into any list already present (or becomes that list); anything else
/// is appended as a single list element.
fn merge_group(result: &mut Document, key: &str, mut expr: Document) {
    let wrapped = expr.len() == 1 && expr.contains_key(key);

    if let Some(Bson::Array(members)) = result.get_mut(key) {
        if wrapped {
            if let Some(Bson::Array(inner)) = expr.remove(key) {
                members.extend(inner);
            }
        } else {
            members.push(Bson::Document(expr));
        }
        return;
    }

    if wrapped {
        if let Some(inner) = expr.remove(key) {
            result.insert(key, inner);
        }
    } else {
        result.insert(key, Bson::Array(vec![Bson::Document(expr)]));
    }
}

/// Folds ungrouped fragments into an existing top-level result.
///
/// Colliding fragments contribute one `$and` list (flattened into an
/// existing `$and` entry when a group already created one); non-colliding
/// fragments merge flat, overwriting same-named keys last-write-wins.
fn fold_ungrouped(result: &mut Document, fragments: Vec<Document>) {
    if fragments.is_empty() {
        return;
    }

    if has_field_collision(&fragments) {
        let members: Vec<Bson> = fragments.into_iter().map(Bson::Document).collect();
        if let Some(Bson::Array(existing)) = result.get_mut("$and") {
            existing.extend(members);
            return;
        }
        result.insert("$and", Bson::Array(members));
        return;
    }

    for frag in fragments {
        for (key, value) in frag {
            result.insert(key, value);
        }
    }
}

/// Merges fragments into a flat document, promoting to `$and` on field
/// collision so no constraint is lost.
fn merge_flat(fragments: Vec<Document>) -> Document {
    if has_field_collision(&fragments) {
        let members: Vec<Bson> = fragments.into_iter().map(Bson::Document).collect();
        return doc! { "$and": members };
    }

    let mut result = Document::new();
    for frag in fragments {
        for (key, value) in frag {
            result.insert(key, value);
        }
    }
    result
}

fn has_field_collision(fragments: &[Document]) -> bool {
    let mut seen = HashSet::new();
    for frag in fragments {
        for key in frag.keys() {
            if !seen.insert(key.as_str()) {
                return true;
            }
        }
    }
    false
}
