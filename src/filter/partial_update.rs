use super::error::FilterError;
use super::types::SqlParam;

/// Sparse field -> value list, in the order the caller supplied the fields.
pub type FieldValues = Vec<(String, SqlParam)>;

/// SET fragment for a single-row UPDATE plus its aligned parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialUpdate {
    pub set_cols: String,
    pub values: Vec<SqlParam>,
}

impl PartialUpdate {
    /// Position of the first parameter after the SET values, for the row key.
    pub fn next_param_index(&self) -> usize {
        self.values.len() + 1
    }
}

/// Builds `"col1"=$1, "col2"=$2` from the supplied fields.
///
/// `columns` maps logical field names to physical column names; fields not
/// listed keep their own name. An explicit null is a value to write, but an
/// empty field list is an error.
pub fn sql_for_partial_update(
    data: FieldValues,
    columns: &[(&str, &str)],
) -> Result<PartialUpdate, FilterError> {
    if data.is_empty() {
        return Err(FilterError::NoData);
    }

    let (assignments, values): (Vec<String>, Vec<SqlParam>) = data
        .into_iter()
        .enumerate()
        .map(|(idx, (field, value))| {
            let column = columns
                .iter()
                .find(|(logical, _)| *logical == field)
                .map(|(_, physical)| *physical)
                .unwrap_or(field.as_str());
            (format!("\"{}\"=${}", column, idx + 1), value)
        })
        .unzip();

    Ok(PartialUpdate {
        set_cols: assignments.join(", "),
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPANY_COLUMNS: &[(&str, &str)] = &[("numEmployees", "num_employees"), ("logoUrl", "logo_url")];

    #[test]
    fn single_field() {
        let update = sql_for_partial_update(vec![("name".into(), SqlParam::text("New"))], &[]).unwrap();
        assert_eq!(update.set_cols, "\"name\"=$1");
        assert_eq!(update.values, vec![SqlParam::text("New")]);
        assert_eq!(update.next_param_index(), 2);
    }

    #[test]
    fn translates_columns_and_keeps_order() {
        let update = sql_for_partial_update(
            vec![
                ("numEmployees".into(), SqlParam::int(10)),
                ("name".into(), SqlParam::text("Acme")),
                ("logoUrl".into(), SqlParam::Text(None)),
            ],
            COMPANY_COLUMNS,
        )
        .unwrap();

        assert_eq!(update.set_cols, "\"num_employees\"=$1, \"name\"=$2, \"logo_url\"=$3");
        assert_eq!(
            update.values,
            vec![SqlParam::int(10), SqlParam::text("Acme"), SqlParam::Text(None)]
        );
    }

    #[test]
    fn explicit_null_is_written() {
        let update = sql_for_partial_update(vec![("salary".into(), SqlParam::Int(None))], &[]).unwrap();
        assert_eq!(update.set_cols, "\"salary\"=$1");
        assert!(update.values[0].is_null());
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = sql_for_partial_update(vec![], COMPANY_COLUMNS).unwrap_err();
        assert_eq!(err, FilterError::NoData);
        assert_eq!(err.to_string(), "No data");
    }
}
