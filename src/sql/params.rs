//! Owned values that a built query binds in order.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use sqlx::mysql::{MySql, MySqlArguments};
use sqlx::query::{Query, QueryAs, QueryScalar};

#[derive(Clone, Debug, PartialEq)]
pub enum BindValue {
    Null,
    Int(i64),
    Decimal(Decimal),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl BindValue {
    pub fn bind<'q>(self, q: Query<'q, MySql, MySqlArguments>) -> Query<'q, MySql, MySqlArguments> {
        match self {
            BindValue::Null => q.bind(None::<String>),
            BindValue::Int(n) => q.bind(n),
            BindValue::Decimal(d) => q.bind(d),
            BindValue::Text(s) => q.bind(s),
            BindValue::Date(d) => q.bind(d),
            BindValue::DateTime(d) => q.bind(d),
        }
    }

    pub fn bind_as<'q, O>(
        self,
        q: QueryAs<'q, MySql, O, MySqlArguments>,
    ) -> QueryAs<'q, MySql, O, MySqlArguments> {
        match self {
            BindValue::Null => q.bind(None::<String>),
            BindValue::Int(n) => q.bind(n),
            BindValue::Decimal(d) => q.bind(d),
            BindValue::Text(s) => q.bind(s),
            BindValue::Date(d) => q.bind(d),
            BindValue::DateTime(d) => q.bind(d),
        }
    }

    pub fn bind_scalar<'q, O>(
        self,
        q: QueryScalar<'q, MySql, O, MySqlArguments>,
    ) -> QueryScalar<'q, MySql, O, MySqlArguments> {
        match self {
            BindValue::Null => q.bind(None::<String>),
            BindValue::Int(n) => q.bind(n),
            BindValue::Decimal(d) => q.bind(d),
            BindValue::Text(s) => q.bind(s),
            BindValue::Date(d) => q.bind(d),
            BindValue::DateTime(d) => q.bind(d),
        }
    }
}

impl From<i32> for BindValue {
    fn from(v: i32) -> Self {
        BindValue::Int(v as i64)
    }
}

impl From<i64> for BindValue {
    fn from(v: i64) -> Self {
        BindValue::Int(v)
    }
}

impl From<Decimal> for BindValue {
    fn from(v: Decimal) -> Self {
        BindValue::Decimal(v)
    }
}

impl From<String> for BindValue {
    fn from(v: String) -> Self {
        BindValue::Text(v)
    }
}

impl From<&str> for BindValue {
    fn from(v: &str) -> Self {
        BindValue::Text(v.to_string())
    }
}

impl From<NaiveDate> for BindValue {
    fn from(v: NaiveDate) -> Self {
        BindValue::Date(v)
    }
}

impl From<NaiveDateTime> for BindValue {
    fn from(v: NaiveDateTime) -> Self {
        BindValue::DateTime(v)
    }
}

impl<T: Into<BindValue>> From<Option<T>> for BindValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(BindValue::Null)
    }
}
