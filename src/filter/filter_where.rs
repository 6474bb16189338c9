use super::types::{FilterOp, FilterWhereInfo, SqlParam};

/// Collects predicates and renders them as a WHERE clause with positional
/// parameters. Predicates are rendered in the order they were added.
#[derive(Debug, Default)]
pub struct FilterWhere {
    conditions: Vec<FilterWhereInfo>,
}

impl FilterWhere {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(mut self, column: &'static str, value: Option<&str>) -> Self {
        if let Some(v) = value {
            self.conditions.push(FilterWhereInfo {
                column,
                operator: FilterOp::Contains,
                data: Some(SqlParam::text(format!("%{}%", escape_like(v)))),
            });
        }
        self
    }

    pub fn eq(mut self, column: &'static str, value: Option<SqlParam>) -> Self {
        if let Some(v) = value {
            self.conditions.push(FilterWhereInfo { column, operator: FilterOp::Eq, data: Some(v) });
        }
        self
    }

    pub fn gte(mut self, column: &'static str, value: Option<SqlParam>) -> Self {
        if let Some(v) = value {
            self.conditions.push(FilterWhereInfo { column, operator: FilterOp::Gte, data: Some(v) });
        }
        self
    }

    pub fn lte(mut self, column: &'static str, value: Option<SqlParam>) -> Self {
        if let Some(v) = value {
            self.conditions.push(FilterWhereInfo { column, operator: FilterOp::Lte, data: Some(v) });
        }
        self
    }

    pub fn positive_if(mut self, column: &'static str, enabled: bool) -> Self {
        if enabled {
            self.conditions.push(FilterWhereInfo { column, operator: FilterOp::Positive, data: None });
        }
        self
    }

    /// Returns `("WHERE ...", params)`, or an empty clause when nothing matched.
    pub fn build(self) -> (String, Vec<SqlParam>) {
        if self.conditions.is_empty() {
            return (String::new(), vec![]);
        }

        let mut params = Vec::new();
        let clauses: Vec<String> = self
            .conditions
            .into_iter()
            .map(|condition| {
                let quoted_column = format!("\"{}\"", condition.column);
                let mut placeholder = |data: Option<SqlParam>| {
                    params.extend(data);
                    format!("${}", params.len())
                };
                match condition.operator {
                    FilterOp::Contains => {
                        format!(
                            "lower({}) LIKE lower({}) ESCAPE '\\'",
                            quoted_column,
                            placeholder(condition.data)
                        )
                    }
                    FilterOp::Eq => format!("{} = {}", quoted_column, placeholder(condition.data)),
                    FilterOp::Gte => format!("{} >= {}", quoted_column, placeholder(condition.data)),
                    FilterOp::Lte => format!("{} <= {}", quoted_column, placeholder(condition.data)),
                    FilterOp::Positive => format!("{} > 0", quoted_column),
                }
            })
            .collect();

        (format!("WHERE {}", clauses.join(" AND ")), params)
    }
}

/// LIKE wildcards in user input match literally
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
