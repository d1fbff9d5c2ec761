/// Driver-agnostic raw result from a statement.
/// All values are converted to strings by the driver.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawQueryResult {
    /// Column names in order
    pub columns: Vec<String>,
    /// Rows, where each row is a vector of string values in column order
    pub rows: Vec<Vec<String>>,
}

impl RawQueryResult {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the number of rows in this result.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the statement produced no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First value of the first row, if any.
    pub fn scalar(&self) -> Option<&str> {
        self.rows
            .first()
            .and_then(|row| row.first())
            .map(|s| s.as_str())
    }

    /// All values of the named column, in row order.
    /// Returns `None` when the column is not part of the result.
    pub fn column(&self, name: &str) -> Option<Vec<String>> {
        let index = self
            .columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))?;
        Some(
            self.rows
                .iter()
                .filter_map(|row| row.get(index).cloned())
                .collect(),
        )
    }

    /// Consumes the result and returns the first value of every row.
    pub fn into_first_column(self) -> Vec<String> {
        self.rows
            .into_iter()
            .filter_map(|row| row.into_iter().next())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RawQueryResult {
        RawQueryResult::new(
            vec!["seq".to_string(), "name".to_string()],
            vec![
                vec!["0".to_string(), "main".to_string()],
                vec!["2".to_string(), "aux".to_string()],
            ],
        )
    }

    #[test]
    fn test_scalar() {
        assert_eq!(sample().scalar(), Some("0"));
        assert_eq!(RawQueryResult::empty().scalar(), None);
    }

    #[test]
    fn test_column_by_name() {
        let result = sample();
        assert_eq!(
            result.column("NAME").unwrap(),
            vec!["main".to_string(), "aux".to_string()]
        );
        assert!(result.column("file").is_none());
    }

    #[test]
    fn test_into_first_column_keeps_row_order() {
        assert_eq!(
            sample().into_first_column(),
            vec!["0".to_string(), "2".to_string()]
        );
    }
}
