//! List-endpoint filters parsed from the query string.
//!
//! Unknown keys are ignored so clients can send parameters this version does
//! not understand. Empty values count as absent; anything else present is a
//! real filter, including `0`.

use std::collections::HashMap;

use super::error::FilterError;
use super::filter_where::FilterWhere;
use super::types::SqlParam;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanySearch {
    pub name: Option<String>,
    pub min_employees: Option<i32>,
    pub max_employees: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobSearch {
    pub title: Option<String>,
    pub min_salary: Option<i32>,
    pub has_equity: bool,
    pub company_handle: Option<String>,
    /// Accepted for parity with company search; only range-checked.
    pub min_employees: Option<i32>,
    pub max_employees: Option<i32>,
}

impl CompanySearch {
    pub fn from_query(query: &HashMap<String, String>) -> Result<Self, FilterError> {
        Ok(Self {
            name: text_param(query, "name"),
            min_employees: int_param(query, "minEmployees")?,
            max_employees: int_param(query, "maxEmployees")?,
        })
    }

    pub fn to_where(&self) -> Result<(String, Vec<SqlParam>), FilterError> {
        check_employee_range(self.min_employees, self.max_employees)?;

        Ok(FilterWhere::new()
            .contains("name", self.name.as_deref())
            .gte("num_employees", self.min_employees.map(SqlParam::int))
            .lte("num_employees", self.max_employees.map(SqlParam::int))
            .build())
    }
}

impl JobSearch {
    pub fn from_query(query: &HashMap<String, String>) -> Result<Self, FilterError> {
        Ok(Self {
            title: text_param(query, "title"),
            min_salary: int_param(query, "minSalary")?,
            has_equity: query.get("hasEquity").map(|v| v == "true").unwrap_or(false),
            company_handle: text_param(query, "company_handle"),
            min_employees: int_param(query, "minEmployees")?,
            max_employees: int_param(query, "maxEmployees")?,
        })
    }

    pub fn to_where(&self) -> Result<(String, Vec<SqlParam>), FilterError> {
        check_employee_range(self.min_employees, self.max_employees)?;

        Ok(FilterWhere::new()
            .contains("title", self.title.as_deref())
            .gte("salary", self.min_salary.map(SqlParam::int))
            .positive_if("equity", self.has_equity)
            .eq("company_handle", self.company_handle.clone().map(SqlParam::text))
            .build())
    }
}

fn check_employee_range(min: Option<i32>, max: Option<i32>) -> Result<(), FilterError> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => Err(FilterError::InvalidRange),
        _ => Ok(()),
    }
}

fn text_param(query: &HashMap<String, String>, name: &str) -> Option<String> {
    query.get(name).filter(|v| !v.is_empty()).cloned()
}

fn int_param(query: &HashMap<String, String>, name: &str) -> Result<Option<i32>, FilterError> {
    match query.get(name).map(|v| v.trim()).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => raw.parse::<i32>().map(Some).map_err(|_| FilterError::InvalidParameter {
            name: name.to_string(),
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn company_all_filters() {
        let search = CompanySearch::from_query(&query(&[
            ("name", "net"),
            ("minEmployees", "10"),
            ("maxEmployees", "300"),
        ]))
        .unwrap();
        let (clause, params) = search.to_where().unwrap();

        assert_eq!(
            clause,
            "WHERE lower(\"name\") LIKE lower($1) ESCAPE '\\' AND \"num_employees\" >= $2 AND \"num_employees\" <= $3"
        );
        assert_eq!(params, vec![SqlParam::text("%net%"), SqlParam::int(10), SqlParam::int(300)]);
    }

    #[test]
    fn company_no_filters() {
        let (clause, params) = CompanySearch::default().to_where().unwrap();
        assert_eq!(clause, "");
        assert!(params.is_empty());
    }

    #[test]
    fn company_min_greater_than_max() {
        let search = CompanySearch::from_query(&query(&[("minEmployees", "500"), ("maxEmployees", "5")])).unwrap();
        assert_eq!(search.to_where().unwrap_err(), FilterError::InvalidRange);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let search = CompanySearch::from_query(&query(&[("color", "blue"), ("maxEmployees", "7")])).unwrap();
        let (clause, params) = search.to_where().unwrap();
        assert_eq!(clause, "WHERE \"num_employees\" <= $1");
        assert_eq!(params, vec![SqlParam::int(7)]);
    }

    #[test]
    fn non_integer_filter_is_rejected() {
        let err = JobSearch::from_query(&query(&[("minSalary", "lots")])).unwrap_err();
        assert_eq!(
            err,
            FilterError::InvalidParameter { name: "minSalary".into(), value: "lots".into() }
        );
    }

    #[test]
    fn zero_is_a_present_filter() {
        let search = JobSearch::from_query(&query(&[("minSalary", "0")])).unwrap();
        let (clause, params) = search.to_where().unwrap();
        assert_eq!(clause, "WHERE \"salary\" >= $1");
        assert_eq!(params, vec![SqlParam::int(0)]);
    }

    #[test]
    fn job_has_equity_false_adds_nothing() {
        let search = JobSearch::from_query(&query(&[
            ("title", "test"),
            ("minSalary", "60000"),
            ("hasEquity", "false"),
        ]))
        .unwrap();
        let (clause, params) = search.to_where().unwrap();
        assert_eq!(clause, "WHERE lower(\"title\") LIKE lower($1) ESCAPE '\\' AND \"salary\" >= $2");
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn job_all_filters_in_fixed_order() {
        let search = JobSearch::from_query(&query(&[
            ("company_handle", "c1"),
            ("hasEquity", "true"),
            ("title", "j"),
            ("minSalary", "1"),
        ]))
        .unwrap();
        let (clause, params) = search.to_where().unwrap();
        assert_eq!(
            clause,
            "WHERE lower(\"title\") LIKE lower($1) ESCAPE '\\' AND \"salary\" >= $2 AND \"equity\" > 0 AND \"company_handle\" = $3"
        );
        assert_eq!(params, vec![SqlParam::text("%j%"), SqlParam::int(1), SqlParam::text("c1")]);
    }

    #[test]
    fn job_employee_range_is_checked() {
        let search = JobSearch::from_query(&query(&[("minEmployees", "3"), ("maxEmployees", "2")])).unwrap();
        assert_eq!(search.to_where().unwrap_err(), FilterError::InvalidRange);

        let search = JobSearch::from_query(&query(&[("minEmployees", "2"), ("maxEmployees", "3")])).unwrap();
        let (clause, _) = search.to_where().unwrap();
        assert_eq!(clause, "");
    }
}
