//! End-to-end script generation: conditions in, shell script out.

use mongogen_core::{
    Condition, ConditionSet, GroupNumber, GroupOperator, Operation, Operator, ScriptRequest,
    UpdateOperator, generate, render,
};

fn condition(
    field: &str,
    operator: Operator,
    value: &str,
    group_number: GroupNumber,
    group_operator: GroupOperator,
) -> Condition {
    Condition {
        field: field.to_string(),
        operator,
        value: value.to_string(),
        group_number,
        group_operator,
    }
}

#[test]
fn conditions_flow_through_to_an_update_script() {
    let mut set = ConditionSet::new();
    set.push(condition(
        "bpc",
        Operator::Eq,
        "70022487",
        GroupNumber::One,
        GroupOperator::None,
    ));
    set.push(condition(
        "documentCode",
        Operator::In,
        r#"["uuid-1", "uuid-2"]"#,
        GroupNumber::One,
        GroupOperator::None,
    ));

    let request = ScriptRequest {
        database: "shop".to_string(),
        collection: "orders".to_string(),
        operation: Operation::UpdateMany,
        filter_text: render::render_at(&set.compile(), 1),
        document_text: Some("{ timelinesPostponedOn: new Date() }".to_string()),
        update_operator: UpdateOperator::Set,
    };

    let script = generate(&request).unwrap();
    assert_eq!(
        script,
        concat!(
            "let databaseName = \"shop\";\n",
            "db = db.getSiblingDB(databaseName);\n",
            "\n",
            "let result1 = db.orders.updateMany(\n",
            "    {\n",
            "        \"bpc\": 70022487,\n",
            "        \"documentCode\": {\n",
            "            \"$in\": [\n",
            "                \"uuid-1\",\n",
            "                \"uuid-2\"\n",
            "            ]\n",
            "        }\n",
            "    },\n",
            "    { $set: { timelinesPostponedOn: new Date() } }\n",
            ")\n",
            "\n",
            "printjson({ result: result1 })"
        )
    );
}

#[test]
fn grouped_conditions_flow_through_to_a_find_script() {
    let conditions = vec![
        condition("status", Operator::Eq, "active", GroupNumber::One, GroupOperator::Or),
        condition("status", Operator::Eq, "pending", GroupNumber::One, GroupOperator::Or),
    ];

    let request = ScriptRequest {
        database: "shop".to_string(),
        collection: "orders".to_string(),
        operation: Operation::Find,
        filter_text: render::render_at(&mongogen_core::compile(&conditions), 1),
        document_text: None,
        update_operator: UpdateOperator::default(),
    };

    let script = generate(&request).unwrap();
    assert_eq!(
        script,
        concat!(
            "let databaseName = \"shop\";\n",
            "db = db.getSiblingDB(databaseName);\n",
            "\n",
            "let result1 = db.orders.find(\n",
            "    {\n",
            "        \"$or\": [\n",
            "            {\n",
            "                \"status\": \"active\"\n",
            "            },\n",
            "            {\n",
            "                \"status\": \"pending\"\n",
            "            }\n",
            "        ]\n",
            "    }\n",
            ").toArray()\n",
            "\n",
            "printjson({ result: result1, count: result1.length })"
        )
    );
}

#[test]
fn empty_condition_set_renders_an_empty_filter() {
    let set = ConditionSet::new();

    let request = ScriptRequest {
        database: "shop".to_string(),
        collection: "orders".to_string(),
        operation: Operation::DeleteOne,
        filter_text: render::render_at(&set.compile(), 1),
        document_text: None,
        update_operator: UpdateOperator::default(),
    };

    let script = generate(&request).unwrap();
    assert!(script.contains("var result = db.orders.deleteOne(\n    {}\n);"));
}
