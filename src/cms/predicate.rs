//! Query predicates and options for the search API

/// A content-source query filter.
///
/// Only the `at` form is needed here, e.g.
/// `Predicate::at("document.type", "publications")`.
#[derive(Debug, Clone)]
pub struct Predicate {
    path: String,
    value: String,
}

impl Predicate {
    pub fn at(path: &str, value: &str) -> Self {
        Self {
            path: path.to_string(),
            value: value.to_string(),
        }
    }

    /// Render to the repository's `q` parameter syntax.
    pub fn to_query(&self) -> String {
        format!("[[at({}, \"{}\")]]", self.path, self.value)
    }
}

/// Sortable document fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    FirstPublicationDate,
    LastPublicationDate,
}

impl SortKey {
    fn as_field(&self) -> &'static str {
        match self {
            SortKey::FirstPublicationDate => "document.first_publication_date",
            SortKey::LastPublicationDate => "document.last_publication_date",
        }
    }
}

/// Sort direction. Ascending is the repository default and renders without
/// a suffix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// A single sort clause for the `orderings` parameter.
#[derive(Debug, Clone, Copy)]
pub struct Ordering {
    pub key: SortKey,
    pub order: SortOrder,
}

impl Ordering {
    pub fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }

    pub fn to_query(&self) -> String {
        match self.order {
            SortOrder::Asc => format!("[{}]", self.key.as_field()),
            SortOrder::Desc => format!("[{} desc]", self.key.as_field()),
        }
    }
}

/// Options for a paged query.
#[derive(Debug, Clone)]
pub struct QueryOptions {
    /// Results per page.
    pub page_size: u32,
    pub orderings: Option<Ordering>,
    /// Document id to anchor the result set after, in the chosen ordering.
    pub after: Option<String>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            page_size: 20,
            orderings: None,
            after: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicate_query_form() {
        let predicate = Predicate::at("document.type", "publications");
        assert_eq!(
            predicate.to_query(),
            r#"[[at(document.type, "publications")]]"#
        );
    }

    #[test]
    fn test_ordering_query_form() {
        let asc = Ordering::new(SortKey::FirstPublicationDate, SortOrder::Asc);
        assert_eq!(asc.to_query(), "[document.first_publication_date]");

        let desc = Ordering::new(SortKey::LastPublicationDate, SortOrder::Desc);
        assert_eq!(desc.to_query(), "[document.last_publication_date desc]");
    }
}
