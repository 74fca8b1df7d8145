//! Maturity labels and per-class containers.

use std::{
    fmt,
    ops::{Index, IndexMut},
};

use serde::{Deserialize, Serialize, ser::SerializeMap};

/// Value every blank or "not available" label collapses to before lookup.
const NO_LABEL: &str = "none";

/// Canonical maturity label of a record.
///
/// After normalization every record carries exactly one of these four values;
/// no other string survives past [`MaturityLabel::canonicalize`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum MaturityLabel {
    Emerging,
    Mature,
    Legacy,
    None,
}

impl MaturityLabel {
    /// Canonicalizes a raw label cell.
    ///
    /// Matching ignores case and surrounding whitespace. Blank cells, `"na"`
    /// and `"nan"` mean "no label"; those and any unrecognized string map to
    /// [`MaturityLabel::None`].
    ///
    /// # Examples
    ///
    /// ```
    /// use maturity_table::label::MaturityLabel;
    ///
    /// assert_eq!(MaturityLabel::canonicalize(" MATURE "), MaturityLabel::Mature);
    /// assert_eq!(MaturityLabel::canonicalize("NaN"), MaturityLabel::None);
    /// assert_eq!(MaturityLabel::canonicalize("beta"), MaturityLabel::None);
    /// ```
    #[must_use]
    pub fn canonicalize(raw: &str) -> Self {
        let key = raw.trim().to_lowercase();
        let key = match key.as_str() {
            "" | "na" | "nan" => NO_LABEL,
            other => other,
        };
        match key {
            "emerging" => Self::Emerging,
            "mature" => Self::Mature,
            "legacy" => Self::Legacy,
            _ => Self::None,
        }
    }

    /// The class this label belongs to, or `None` for [`MaturityLabel::None`].
    #[must_use]
    pub const fn class(self) -> Option<MaturityClass> {
        match self {
            Self::Emerging => Some(MaturityClass::Emerging),
            Self::Mature => Some(MaturityClass::Mature),
            Self::Legacy => Some(MaturityClass::Legacy),
            Self::None => None,
        }
    }
}

/// One of the three labels a classifier can predict.
///
/// The declaration order is the fixed display order used by every report
/// axis: `Emerging`, `Mature`, `Legacy`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum MaturityClass {
    Emerging,
    Mature,
    Legacy,
}

impl MaturityClass {
    pub const COUNT: usize = 3;

    /// All classes in display order.
    pub const ALL: [Self; Self::COUNT] = [Self::Emerging, Self::Mature, Self::Legacy];

    /// Position of this class on report axes.
    #[must_use]
    pub const fn ordinal(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn from_ordinal(ordinal: usize) -> Option<Self> {
        match ordinal {
            0 => Some(Self::Emerging),
            1 => Some(Self::Mature),
            2 => Some(Self::Legacy),
            _ => None,
        }
    }

    #[must_use]
    pub const fn label(self) -> MaturityLabel {
        match self {
            Self::Emerging => MaturityLabel::Emerging,
            Self::Mature => MaturityLabel::Mature,
            Self::Legacy => MaturityLabel::Legacy,
        }
    }
}

/// A value for each [`MaturityClass`], indexed by class.
///
/// Serializes as a map keyed by class name in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PerClass<T>(pub [T; MaturityClass::COUNT]);

impl<T> PerClass<T> {
    /// Builds a container by evaluating `f` for each class in display order.
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(MaturityClass) -> T,
    {
        Self(MaturityClass::ALL.map(&mut f))
    }

    /// Iterates `(class, value)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (MaturityClass, &T)> {
        MaturityClass::ALL.into_iter().zip(&self.0)
    }

    #[must_use]
    pub fn map<U, F>(&self, mut f: F) -> PerClass<U>
    where
        F: FnMut(MaturityClass, &T) -> U,
    {
        PerClass::from_fn(|class| f(class, &self[class]))
    }
}

impl PerClass<usize> {
    /// Counts occurrences of each class.
    pub fn count<I>(classes: I) -> Self
    where
        I: IntoIterator<Item = MaturityClass>,
    {
        let mut counts = Self::default();
        for class in classes {
            counts[class] += 1;
        }
        counts
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }
}

impl<T> Index<MaturityClass> for PerClass<T> {
    type Output = T;

    fn index(&self, class: MaturityClass) -> &Self::Output {
        &self.0[class.ordinal()]
    }
}

impl<T> IndexMut<MaturityClass> for PerClass<T> {
    fn index_mut(&mut self, class: MaturityClass) -> &mut Self::Output {
        &mut self.0[class.ordinal()]
    }
}

impl<T> Serialize for PerClass<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(MaturityClass::COUNT))?;
        for (class, value) in self.iter() {
            map.serialize_entry(&class, value)?;
        }
        map.end()
    }
}

impl<T> fmt::Display for PerClass<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (class, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{class}: {value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_mature_variants() {
        for raw in ["Mature", " mature ", "MATURE", "\tmature\n"] {
            assert_eq!(MaturityLabel::canonicalize(raw), MaturityLabel::Mature, "{raw:?}");
        }
    }

    #[test]
    fn test_canonicalize_no_label() {
        for raw in ["", "   ", "na", "NA", "NaN", "nan", "none", "None", "stable", "emerging-ish"] {
            assert_eq!(MaturityLabel::canonicalize(raw), MaturityLabel::None, "{raw:?}");
        }
    }

    #[test]
    fn test_canonicalize_other_classes() {
        assert_eq!(MaturityLabel::canonicalize("Emerging"), MaturityLabel::Emerging);
        assert_eq!(MaturityLabel::canonicalize(" LEGACY"), MaturityLabel::Legacy);
    }

    #[test]
    fn test_class_ordinals_follow_display_order() {
        for (i, class) in MaturityClass::ALL.into_iter().enumerate() {
            assert_eq!(class.ordinal(), i);
            assert_eq!(MaturityClass::from_ordinal(i), Some(class));
            assert_eq!(class.label().class(), Some(class));
        }
        assert_eq!(MaturityClass::from_ordinal(3), None);
        assert_eq!(MaturityLabel::None.class(), None);
    }

    #[test]
    fn test_per_class_count_and_serialize() {
        let counts = PerClass::count([
            MaturityClass::Legacy,
            MaturityClass::Emerging,
            MaturityClass::Legacy,
        ]);
        assert_eq!(counts.0, [1, 0, 2]);
        assert_eq!(counts.total(), 3);
        let json = serde_json::to_string(&counts).unwrap();
        assert_eq!(json, r#"{"Emerging":1,"Mature":0,"Legacy":2}"#);
        assert_eq!(counts.to_string(), "Emerging: 1, Mature: 0, Legacy: 2");
    }
}
