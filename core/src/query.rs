//! Query-string parameters with tri-state filtering.

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

use crate::maybe::Maybe;

/// Formats a value the way the server expects it in a query string.
pub trait QueryValue {
    fn to_query(&self) -> String;
}

impl QueryValue for String {
    fn to_query(&self) -> String {
        self.clone()
    }
}

impl QueryValue for &str {
    fn to_query(&self) -> String {
        (*self).to_string()
    }
}

impl QueryValue for bool {
    fn to_query(&self) -> String {
        self.to_string()
    }
}

impl QueryValue for i32 {
    fn to_query(&self) -> String {
        self.to_string()
    }
}

impl QueryValue for i64 {
    fn to_query(&self) -> String {
        self.to_string()
    }
}

impl QueryValue for DateTime<Utc> {
    fn to_query(&self) -> String {
        self.to_rfc3339_opts(SecondsFormat::AutoSi, false)
    }
}

impl QueryValue for Uuid {
    fn to_query(&self) -> String {
        self.hyphenated().to_string()
    }
}

/// Ordered query parameters. Only `Maybe::Set` values are ever recorded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name` if `value` is set; `Unset` and `Null` are dropped.
    pub fn push<T: QueryValue>(&mut self, name: &str, value: &Maybe<T>) -> &mut Self {
        if let Maybe::Set(value) = value {
            self.pairs.push((name.to_string(), value.to_query()));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn unset_and_null_are_dropped() {
        let mut params = QueryParams::new();
        params
            .push("created_by", &Maybe::<String>::Unset)
            .push("parent_job", &Maybe::<Uuid>::Null)
            .push("success", &Maybe::Set(false));
        assert_eq!(
            params.into_pairs(),
            vec![("success".to_string(), "false".to_string())]
        );
    }

    #[test]
    fn empty_strings_are_still_sent_when_set() {
        let mut params = QueryParams::new();
        params.push("created_by", &Maybe::Set(String::new()));
        assert_eq!(params.into_pairs(), vec![("created_by".to_string(), String::new())]);
    }

    #[test]
    fn values_are_formatted() {
        let at = Utc.with_ymd_and_hms(2023, 1, 11, 2, 0, 0).unwrap();
        assert_eq!(at.to_query(), "2023-01-11T02:00:00+00:00");
        assert_eq!(true.to_query(), "true");
        assert_eq!(25i64.to_query(), "25");
        assert_eq!(
            Uuid::nil().to_query(),
            "00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn order_is_preserved() {
        let mut params = QueryParams::new();
        params
            .push("page", &Maybe::Set(2i32))
            .push("per_page", &Maybe::Set(50i32));
        let names: Vec<String> = params.into_pairs().into_iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["page", "per_page"]);
    }
}
