/// A bound statement parameter.
///
/// Lookup queries only ever bind database names, so a parameter is either a
/// piece of text or SQL `NULL`. Names always travel this way rather than
/// spliced into the SQL text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Null,
    Text(String),
}

impl SqlValue {
    /// The bound text, `None` for `NULL`. Drivers bind this directly.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SqlValue::Null => None,
            SqlValue::Text(text) => Some(text),
        }
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(SqlValue::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_maps_none_to_null() {
        assert_eq!(SqlValue::from(None::<&str>), SqlValue::Null);
        assert_eq!(
            SqlValue::from(Some("demo")),
            SqlValue::Text("demo".to_string())
        );
    }

    #[test]
    fn test_as_text() {
        assert_eq!(SqlValue::from("demo").as_text(), Some("demo"));
        assert_eq!(SqlValue::Null.as_text(), None);
    }
}
