//! Shell-script assembly around a rendered filter.
//!
//! Wraps filter and document text into the `db.<collection>.<operation>`
//! statement shapes the MongoDB shell expects, including the
//! `getSiblingDB` preamble and a `printjson` result dump. Filter and
//! document text are embedded as given; the filter usually comes from
//! [`crate::render::render_at`] at base level 1 so its continuation lines
//! align with the call's argument column.

use serde::{Deserialize, Serialize};

use crate::error::{GeneratorError, GeneratorResult};

/// Collection operations the generator can script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    #[serde(rename = "find")]
    Find,
    #[serde(rename = "insertOne")]
    InsertOne,
    #[serde(rename = "insertMany")]
    InsertMany,
    #[serde(rename = "updateOne")]
    UpdateOne,
    #[serde(rename = "updateMany")]
    UpdateMany,
    #[serde(rename = "deleteOne")]
    DeleteOne,
    #[serde(rename = "deleteMany")]
    DeleteMany,
}

impl Operation {
    /// The shell spelling of this operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Find => "find",
            Operation::InsertOne => "insertOne",
            Operation::InsertMany => "insertMany",
            Operation::UpdateOne => "updateOne",
            Operation::UpdateMany => "updateMany",
            Operation::DeleteOne => "deleteOne",
            Operation::DeleteMany => "deleteMany",
        }
    }

    /// Whether this operation requires a document body.
    pub fn needs_document(&self) -> bool {
        matches!(
            self,
            Operation::InsertOne
                | Operation::InsertMany
                | Operation::UpdateOne
                | Operation::UpdateMany
        )
    }

    /// Whether this operation takes a filter argument.
    pub fn takes_filter(&self) -> bool {
        !matches!(self, Operation::InsertOne | Operation::InsertMany)
    }
}

/// Update operators usable in the update-document wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UpdateOperator {
    #[default]
    #[serde(rename = "$set")]
    Set,
    #[serde(rename = "$unset")]
    Unset,
    #[serde(rename = "$inc")]
    Inc,
    #[serde(rename = "$mul")]
    Mul,
    #[serde(rename = "$push")]
    Push,
    #[serde(rename = "$pull")]
    Pull,
}

impl UpdateOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateOperator::Set => "$set",
            UpdateOperator::Unset => "$unset",
            UpdateOperator::Inc => "$inc",
            UpdateOperator::Mul => "$mul",
            UpdateOperator::Push => "$push",
            UpdateOperator::Pull => "$pull",
        }
    }
}

/// Everything needed to assemble one shell script.
#[derive(Debug, Clone)]
pub struct ScriptRequest {
    pub database: String,
    pub collection: String,
    pub operation: Operation,
    /// Rendered or free-form filter text, embedded as given.
    pub filter_text: String,
    /// Free-form document body for insert/update operations. Embedded
    /// verbatim; it may contain shell constructs like `new Date()`.
    pub document_text: Option<String>,
    /// Wrapper operator for update documents.
    pub update_operator: UpdateOperator,
}

/// Assembles the shell script for `request`.
pub fn generate(request: &ScriptRequest) -> GeneratorResult<String> {
    let database = request.database.trim();
    let collection = request.collection.trim();
    if database.is_empty() {
        return Err(GeneratorError::MissingDatabase);
    }
    if collection.is_empty() {
        return Err(GeneratorError::MissingCollection);
    }

    let operation = request.operation.as_str();
    let mut script = format!("let databaseName = \"{database}\";\n");
    script.push_str("db = db.getSiblingDB(databaseName);\n\n");

    match request.operation {
        Operation::UpdateOne | Operation::UpdateMany => {
            let document = required_document(request)?;
            let update = request.update_operator.as_str();
            script.push_str(&format!("let result1 = db.{collection}.{operation}(\n"));
            script.push_str(&format!("    {},\n", request.filter_text));
            script.push_str(&format!("    {{ {update}: {document} }}\n"));
            script.push_str(")\n\n");
            script.push_str("printjson({ result: result1 })");
        }
        Operation::Find => {
            script.push_str(&format!("let result1 = db.{collection}.find(\n"));
            script.push_str(&format!("    {}\n", request.filter_text));
            script.push_str(").toArray()\n\n");
            script.push_str("printjson({ result: result1, count: result1.length })");
        }
        Operation::InsertOne | Operation::InsertMany => {
            let document = required_document(request)?;
            script.push_str(&format!("let result1 = db.{collection}.{operation}(\n"));
            script.push_str(&format!("    {document}\n"));
            script.push_str(")\n\n");
            script.push_str("printjson({ result: result1 })");
        }
        Operation::DeleteOne | Operation::DeleteMany => {
            script.push_str(&format!("var result = db.{collection}.{operation}(\n"));
            script.push_str(&format!("    {}\n", request.filter_text));
            script.push_str(");\n\n");
            script.push_str("printjson({ result: result });");
        }
    }

    Ok(script)
}

fn required_document(request: &ScriptRequest) -> GeneratorResult<&str> {
    match request.document_text.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(GeneratorError::MissingDocument(
            request.operation.as_str().to_string(),
        )),
    }
}
