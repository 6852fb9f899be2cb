use crate::record::Record;

/// Text filter over a record's search fields.
///
/// An empty (or all-whitespace) needle matches every record. Otherwise a
/// record matches when any of its [`search_fields`](Record::search_fields)
/// contains the needle, ignoring case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    needle: Option<String>,
}

impl Filter {
    /// Matches everything.
    pub fn all() -> Self {
        Self::default()
    }

    /// Case-insensitive substring match on search fields.
    pub fn text(needle: impl AsRef<str>) -> Self {
        let needle = needle.as_ref().trim().to_lowercase();
        Self {
            needle: if needle.is_empty() { None } else { Some(needle) },
        }
    }

    /// The normalised needle, if any.
    pub fn needle(&self) -> Option<&str> {
        self.needle.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_none()
    }

    pub fn matches<R: Record>(&self, record: &R) -> bool {
        match &self.needle {
            None => true,
            Some(needle) => record
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(needle.as_str())),
        }
    }
}
