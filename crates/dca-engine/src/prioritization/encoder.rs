use crate::error::ScoringError;
use std::collections::BTreeMap;

/// Fixed category → integer mapping captured when the classifier was fitted.
///
/// Codes follow label-encoder semantics: classes sorted lexically, numbered from zero.
/// Lookups are exact; an unseen value is an error rather than a silent default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEncoder {
    field: String,
    codes: BTreeMap<String, u32>,
}

impl CategoryEncoder {
    /// Encoder whose codes are the positions of `classes` as given.
    pub fn from_classes<I, S>(field: impl Into<String>, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut codes = BTreeMap::new();
        for class in classes {
            let next = codes.len() as u32;
            codes.entry(class.into()).or_insert(next);
        }

        Self {
            field: field.into(),
            codes,
        }
    }

    /// Encoder fitted on observed values: unique, sorted, then numbered.
    pub fn fit<I, S>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut classes: Vec<String> = values.into_iter().map(Into::into).collect();
        classes.sort();
        classes.dedup();
        Self::from_classes(field, classes)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn encode(&self, value: &str) -> Result<u32, ScoringError> {
        self.codes
            .get(value)
            .copied()
            .ok_or_else(|| ScoringError::UnknownCategory {
                field: self.field.clone(),
                value: value.to_string(),
            })
    }
}
