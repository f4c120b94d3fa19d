//! Tuple values: ordered, uniquely named field sets.

use super::ExprValue;
use crate::error::{PplxError, PplxResult};
use ahash::AHashSet;
use std::fmt;

static MISSING: ExprValue = ExprValue::Missing;

/// Named field set of a row.
///
/// Field order is kept for output (column order is stable), but equality is
/// order-insensitive: two tuples are equal when they hold the same names with
/// equal values.
#[derive(Debug, Clone, Default)]
pub struct ExprTuple {
    fields: Vec<(String, ExprValue)>,
}

impl ExprTuple {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Build a tuple, rejecting empty or duplicate field names.
    pub fn try_from_fields(
        fields: impl IntoIterator<Item = (String, ExprValue)>,
    ) -> PplxResult<Self> {
        let fields: Vec<(String, ExprValue)> = fields.into_iter().collect();
        let mut seen = AHashSet::with_capacity(fields.len());
        for (name, _) in &fields {
            if name.is_empty() {
                return Err(PplxError::RowReconstruction(
                    "tuple field name cannot be empty".to_string(),
                ));
            }
            if !seen.insert(name.as_str()) {
                return Err(PplxError::RowReconstruction(format!(
                    "duplicate field '{name}' in tuple"
                )));
            }
        }
        Ok(Self { fields })
    }

    /// Value of `name`, or `Missing` when the tuple has no such field.
    ///
    /// Lookup is case-sensitive and exact.
    pub fn get(&self, name: &str) -> &ExprValue {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
            .unwrap_or(&MISSING)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == name)
    }

    /// Copy of this tuple with the entry for `name` replaced by `value`.
    ///
    /// Every other entry is kept as-is, including `Null` and `Missing`
    /// values. If `name` is absent it is appended. The result goes through
    /// the same validation as [`ExprTuple::try_from_fields`].
    pub fn with_field(&self, name: &str, value: ExprValue) -> PplxResult<Self> {
        let mut value = Some(value);
        let mut fields = Vec::with_capacity(self.fields.len() + 1);
        for (k, v) in &self.fields {
            if k == name {
                if let Some(replacement) = value.take() {
                    fields.push((k.clone(), replacement));
                    continue;
                }
            }
            fields.push((k.clone(), v.clone()));
        }
        if let Some(appended) = value {
            fields.push((name.to_string(), appended));
        }
        Self::try_from_fields(fields)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExprValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }
}

/// Collects fields without validation. Rows built this way may carry
/// duplicate names; operators that rebuild them will reject the row.
impl FromIterator<(String, ExprValue)> for ExprTuple {
    fn from_iter<I: IntoIterator<Item = (String, ExprValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl ExprTuple {
    /// Every entry of `self` has an equal entry, same name and value, in `other`.
    fn entries_in(&self, other: &Self) -> bool {
        self.fields
            .iter()
            .all(|(k, v)| other.fields.iter().any(|(ok, ov)| ok == k && ov == v))
    }
}

impl PartialEq for ExprTuple {
    fn eq(&self, other: &Self) -> bool {
        self.fields.len() == other.fields.len() && self.entries_in(other) && other.entries_in(self)
    }
}

impl fmt::Display for ExprTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{k}:{v}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, ExprValue)]) -> Vec<(String, ExprValue)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn get_absent_field_is_missing() {
        let t = ExprTuple::try_from_fields(fields(&[("id", ExprValue::long(1))])).unwrap();
        assert_eq!(t.get("id"), &ExprValue::long(1));
        assert_eq!(t.get("ID"), &ExprValue::Missing);
        assert_eq!(t.get("tags"), &ExprValue::Missing);
    }

    #[test]
    fn equality_ignores_order() {
        let a = ExprTuple::try_from_fields(fields(&[
            ("id", ExprValue::long(1)),
            ("name", ExprValue::string("a")),
        ]))
        .unwrap();
        let b = ExprTuple::try_from_fields(fields(&[
            ("name", ExprValue::string("a")),
            ("id", ExprValue::long(1)),
        ]))
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn with_field_keeps_null_and_missing_siblings() {
        let t = ExprTuple::try_from_fields(fields(&[
            ("id", ExprValue::long(5)),
            ("tags", ExprValue::array([ExprValue::string("a")])),
            ("note", ExprValue::Null),
            ("ghost", ExprValue::Missing),
        ]))
        .unwrap();
        let out = t.with_field("tags", ExprValue::string("a")).unwrap();
        assert_eq!(out.len(), 4);
        assert_eq!(out.get("tags"), &ExprValue::string("a"));
        assert_eq!(out.get("note"), &ExprValue::Null);
        assert!(out.contains("ghost"));
        assert_eq!(
            out.field_names().collect::<Vec<_>>(),
            vec!["id", "tags", "note", "ghost"]
        );
    }

    #[test]
    fn with_field_appends_absent_name() {
        let t = ExprTuple::try_from_fields(fields(&[("id", ExprValue::long(1))])).unwrap();
        let out = t.with_field("extra", ExprValue::boolean(true)).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out.get("extra"), &ExprValue::boolean(true));
    }

    #[test]
    fn with_field_rejects_duplicate_names() {
        let t: ExprTuple = fields(&[("id", ExprValue::long(1)), ("id", ExprValue::long(2))])
            .into_iter()
            .collect();
        let err = t.with_field("tags", ExprValue::string("x")).unwrap_err();
        assert!(matches!(err, PplxError::RowReconstruction(_)));
    }

    #[test]
    fn equality_is_symmetric_with_duplicate_names() {
        let dup: ExprTuple = fields(&[("a", ExprValue::long(1)), ("a", ExprValue::long(1))])
            .into_iter()
            .collect();
        let distinct: ExprTuple = fields(&[("a", ExprValue::long(1)), ("b", ExprValue::long(2))])
            .into_iter()
            .collect();
        assert_eq!(dup == distinct, distinct == dup);
        assert_ne!(dup, distinct);
        assert_ne!(distinct, dup);
        assert_eq!(dup, dup.clone());
    }

    #[test]
    fn empty_name_rejected() {
        assert!(ExprTuple::try_from_fields(fields(&[("", ExprValue::Null)])).is_err());
    }
}
