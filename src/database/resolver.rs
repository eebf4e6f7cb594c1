//! Partial-update resolution shared by both stores.
//!
//! A patch is turned into a [`FieldSet`]: an ordered list of `(field, value)`
//! pairs drawn from an entity's field enum. Unset values never enter the set,
//! so an empty set means "nothing to write". Column and key names come only
//! from the enum, never from caller input.

use mongodb::bson::{Bson, Document};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::QueryAs;
use sqlx::{FromRow, Postgres};
use std::fmt::Debug;

/// The mutable fields of one entity, with their name in each store
pub trait Field: Copy + Debug + Send + Sync + 'static {
    /// Relational column name
    fn column(self) -> &'static str;

    /// Document key name
    fn key(self) -> &'static str;
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
    Int(i32),
    Decimal(Decimal),
    Float(f64),
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Int(v)
    }
}

impl From<Decimal> for FieldValue {
    fn from(v: Decimal) -> Self {
        FieldValue::Decimal(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl FieldValue {
    pub fn to_bson(&self) -> Bson {
        match self {
            FieldValue::Text(s) => Bson::String(s.clone()),
            FieldValue::Bool(b) => Bson::Boolean(*b),
            FieldValue::Int(i) => Bson::Int32(*i),
            FieldValue::Decimal(d) => Bson::Double(decimal_to_f64(*d)),
            FieldValue::Float(f) => Bson::Double(*f),
        }
    }
}

pub fn decimal_to_f64(d: Decimal) -> f64 {
    d.to_f64().unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSet<F> {
    entries: Vec<(F, FieldValue)>,
}

impl<F> Default for FieldSet<F> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<F: Field> FieldSet<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `field` when `value` is present; `None` means "leave unchanged"
    pub fn set<V: Into<FieldValue>>(mut self, field: F, value: Option<V>) -> Self {
        if let Some(v) = value {
            self.entries.push((field, v.into()));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = F> + '_ {
        self.entries.iter().map(|(f, _)| *f)
    }

    pub fn get(&self, field: F) -> Option<&FieldValue>
    where
        F: PartialEq,
    {
        self.entries.iter().find(|(f, _)| *f == field).map(|(_, v)| v)
    }

    /// `UPDATE "table" SET "a" = $1, ... WHERE "key" = $n RETURNING ...`.
    ///
    /// The key is bound last, after every value. Returns `None` for an empty set.
    pub fn update_statement(&self, table: &str, key_column: &str, returning: &str) -> Option<String> {
        if self.is_empty() {
            return None;
        }

        let assignments: Vec<String> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, (field, _))| format!("\"{}\" = ${}", field.column(), i + 1))
            .collect();

        Some(format!(
            "UPDATE \"{}\" SET {} WHERE \"{}\" = ${} RETURNING {}",
            table,
            assignments.join(", "),
            key_column,
            self.entries.len() + 1,
            returning
        ))
    }

    /// Bind every value, in order, onto a statement built by [`FieldSet::update_statement`]
    pub fn bind<'q, O>(
        &self,
        mut q: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments>
    where
        O: for<'r> FromRow<'r, PgRow>,
    {
        for (_, value) in &self.entries {
            q = bind_value(q, value);
        }
        q
    }

    /// `{"$set": {...}}`, or `None` for an empty set
    pub fn set_document(&self) -> Option<Document> {
        if self.is_empty() {
            return None;
        }
        let mut set = Document::new();
        set.insert("$set", self.to_document());
        Some(set)
    }

    /// Equality filter over every entry
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        for (field, value) in &self.entries {
            doc.insert(field.key(), value.to_bson());
        }
        doc
    }
}

fn bind_value<'q, O>(
    q: QueryAs<'q, Postgres, O, PgArguments>,
    v: &FieldValue,
) -> QueryAs<'q, Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, PgRow>,
{
    match v {
        FieldValue::Text(s) => q.bind(s.clone()),
        FieldValue::Bool(b) => q.bind(*b),
        FieldValue::Int(i) => q.bind(*i),
        FieldValue::Decimal(d) => q.bind(*d),
        FieldValue::Float(f) => q.bind(*f),
    }
}
