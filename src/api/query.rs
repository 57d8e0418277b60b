//! PostgREST query strings.

use std::fmt::Write as _;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

/// One table read: equality filters, at most one ordering and a limit.
#[derive(Clone, Debug, PartialEq)]
pub struct Query {
    table: String,
    filters: Vec<(String, String)>,
    order: Option<(String, Order)>,
    limit: Option<usize>,
}

impl Query {
    pub fn table(table: &str) -> Self {
        Self {
            table: table.to_string(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters.push((column.to_string(), value.to_string()));
        self
    }

    /// `eq` only when a value is given.
    pub fn eq_opt(self, column: &str, value: Option<&str>) -> Self {
        match value.filter(|v| !v.is_empty()) {
            Some(v) => self.eq(column, v),
            None => self,
        }
    }

    pub fn order(mut self, column: &str, order: Order) -> Self {
        self.order = Some((column.to_string(), order));
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// Filters only, for PATCH and DELETE targets.
    pub fn filter_string(&self) -> String {
        self.filters
            .iter()
            .map(|(col, v)| format!("{col}=eq.{}", urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Path relative to `rest/v1`, e.g. `mock_tests?select=*&order=created_at.desc`.
    pub fn to_path(&self) -> String {
        let mut out = format!("{}?select=*", self.table);
        let filters = self.filter_string();
        if !filters.is_empty() {
            out.push('&');
            out.push_str(&filters);
        }
        if let Some((col, order)) = &self.order {
            let dir = match order {
                Order::Asc => "asc",
                Order::Desc => "desc",
            };
            let _ = write!(out, "&order={col}.{dir}");
        }
        if let Some(n) = self.limit {
            let _ = write!(out, "&limit={n}");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_select() {
        assert_eq!(Query::table("mock_tests").to_path(), "mock_tests?select=*");
    }

    #[test]
    fn test_parts_render_in_order() {
        let q = Query::table("subject_resources")
            .limit(6)
            .order("rating", Order::Desc)
            .eq("is_featured", true);
        assert_eq!(
            q.to_path(),
            "subject_resources?select=*&is_featured=eq.true&order=rating.desc&limit=6"
        );
    }

    #[test]
    fn test_values_are_encoded() {
        let q = Query::table("speed_tests").eq("subject", "Data Structures & Algorithms");
        assert_eq!(
            q.to_path(),
            "speed_tests?select=*&subject=eq.Data%20Structures%20%26%20Algorithms"
        );
    }

    #[test]
    fn test_optional_filters_skip_empty() {
        let q = Query::table("study_plans")
            .eq_opt("branch", None)
            .eq_opt("subject", Some(""))
            .eq_opt("type", Some("crash"));
        assert_eq!(q.filter_string(), "type=eq.crash");
    }
}
