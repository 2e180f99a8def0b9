//! Builds parameterized UPDATE and filtered SELECT statements for MySQL.
//!
//! Identifiers always come from `&'static str` column lists in the models;
//! request data only ever reaches the statement as a bound parameter.

use crate::sql::BindValue;

/// Quote an identifier for MySQL.
pub fn quoted(s: &str) -> String {
    format!("`{}`", s.replace('`', "``"))
}

#[derive(Debug, PartialEq)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

/// `UPDATE <table> SET a = ?, b = ? WHERE <key> = ?` from the fields a
/// partial-update DTO actually carries.
#[derive(Debug)]
pub struct UpdateBuilder {
    table: &'static str,
    key: &'static str,
    sets: Vec<(&'static str, BindValue)>,
}

impl UpdateBuilder {
    pub fn new(table: &'static str, key: &'static str) -> Self {
        UpdateBuilder {
            table,
            key,
            sets: Vec::new(),
        }
    }

    pub fn set(mut self, column: &'static str, value: impl Into<BindValue>) -> Self {
        self.sets.push((column, value.into()));
        self
    }

    /// Add the assignment only when the field was supplied.
    pub fn set_opt<T: Into<BindValue>>(self, column: &'static str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.set(column, v),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.sets.iter().map(|(c, _)| *c)
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    /// None when no column was set.
    pub fn build(self, id: impl Into<BindValue>) -> Option<QueryBuf> {
        if self.sets.is_empty() {
            return None;
        }
        let assignments = self
            .sets
            .iter()
            .map(|(c, _)| format!("{} = ?", quoted(c)))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ?",
            quoted(self.table),
            assignments,
            quoted(self.key)
        );
        let mut params: Vec<BindValue> = self.sets.into_iter().map(|(_, v)| v).collect();
        params.push(id.into());
        Some(QueryBuf { sql, params })
    }
}

/// `INSERT INTO <table> (a, b) VALUES (?, ?)`. Columns given as `None` are
/// left out so the table default applies.
#[derive(Debug)]
pub struct InsertBuilder {
    table: &'static str,
    values: Vec<(&'static str, BindValue)>,
}

impl InsertBuilder {
    pub fn new(table: &'static str) -> Self {
        InsertBuilder {
            table,
            values: Vec::new(),
        }
    }

    pub fn value(mut self, column: &'static str, value: impl Into<BindValue>) -> Self {
        self.values.push((column, value.into()));
        self
    }

    pub fn value_opt<T: Into<BindValue>>(self, column: &'static str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.value(column, v),
            None => self,
        }
    }

    pub fn build(self) -> QueryBuf {
        let columns = self
            .values
            .iter()
            .map(|(c, _)| quoted(c))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = vec!["?"; self.values.len()].join(", ");
        QueryBuf {
            sql: format!(
                "INSERT INTO {} ({}) VALUES ({})",
                quoted(self.table),
                columns,
                placeholders
            ),
            params: self.values.into_iter().map(|(_, v)| v).collect(),
        }
    }
}

/// `SELECT ... [WHERE c1 AND c2 ...] [ORDER BY ...]`.
#[derive(Debug)]
pub struct SelectBuilder {
    base: String,
    conditions: Vec<String>,
    params: Vec<BindValue>,
    order_by: Option<&'static str>,
}

impl SelectBuilder {
    pub fn new(base: impl Into<String>) -> Self {
        SelectBuilder {
            base: base.into(),
            conditions: Vec::new(),
            params: Vec::new(),
            order_by: None,
        }
    }

    /// Add a condition whose `?` placeholders are filled by `values` in order.
    pub fn and_where(mut self, condition: &str, values: Vec<BindValue>) -> Self {
        debug_assert_eq!(
            condition.matches('?').count(),
            values.len(),
            "placeholder count mismatch in '{}'",
            condition
        );
        self.conditions.push(format!("({})", condition));
        self.params.extend(values);
        self
    }

    pub fn and_where_opt<T: Into<BindValue>>(self, condition: &str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.and_where(condition, vec![v.into()]),
            None => self,
        }
    }

    /// Exact match on a column when the filter is present.
    pub fn filter_eq<T: Into<BindValue>>(self, column: &'static str, value: Option<T>) -> Self {
        let condition = format!("{} = ?", quoted(column));
        self.and_where_opt(&condition, value)
    }

    pub fn order_by(mut self, clause: &'static str) -> Self {
        self.order_by = Some(clause);
        self
    }

    pub fn build(self) -> QueryBuf {
        let mut sql = self.base;
        if !self.conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.conditions.join(" AND "));
        }
        if let Some(order) = self.order_by {
            sql.push_str(" ORDER BY ");
            sql.push_str(order);
        }
        QueryBuf {
            sql,
            params: self.params,
        }
    }
}
