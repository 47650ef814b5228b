//! Declarative effect parameters and the validated store built from them.
//!
//! Descriptors are `const` data attached to each effect's metadata. A [`ParamSet`] binds a
//! descriptor table to concrete values; writes are validated, reads always succeed by falling
//! back to the declared default.

use crate::foundation::error::{FxError, FxResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Wire representation of a parameter value (`number | string | boolean`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Slider value.
    Number(f64),
    /// Enum option.
    Text(String),
    /// Toggle value.
    Bool(bool),
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

/// Serializable parameter map, keyed by parameter id.
pub type ParamMap = BTreeMap<String, ParamValue>;

/// Shape of a parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamKind {
    /// Numeric range.
    Slider {
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
        /// Editor step.
        step: f64,
        /// Display unit, possibly empty.
        unit: &'static str,
    },
    /// One of a fixed set of options.
    Enum {
        /// Allowed values.
        options: &'static [&'static str],
    },
    /// On/off switch.
    Toggle,
}

/// Default value of a descriptor, kept `const`-constructible.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamDefault {
    /// Slider default.
    Number(f64),
    /// Enum default.
    Choice(&'static str),
    /// Toggle default.
    Flag(bool),
}

impl ParamDefault {
    fn to_value(self) -> ParamValue {
        match self {
            Self::Number(v) => ParamValue::Number(v),
            Self::Choice(v) => ParamValue::Text(v.to_owned()),
            Self::Flag(v) => ParamValue::Bool(v),
        }
    }
}

/// Declarative parameter descriptor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamDef {
    /// Wire id (camelCase).
    pub id: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Parameter shape.
    pub kind: ParamKind,
    /// Default value.
    pub default: ParamDefault,
}

impl ParamDef {
    /// Numeric slider descriptor.
    pub const fn slider(
        id: &'static str,
        label: &'static str,
        default: f64,
        min: f64,
        max: f64,
        step: f64,
        unit: &'static str,
    ) -> Self {
        Self {
            id,
            label,
            kind: ParamKind::Slider {
                min,
                max,
                step,
                unit,
            },
            default: ParamDefault::Number(default),
        }
    }

    /// Enum descriptor.
    pub const fn choice(
        id: &'static str,
        label: &'static str,
        default: &'static str,
        options: &'static [&'static str],
    ) -> Self {
        Self {
            id,
            label,
            kind: ParamKind::Enum { options },
            default: ParamDefault::Choice(default),
        }
    }

    /// Toggle descriptor.
    pub const fn toggle(id: &'static str, label: &'static str, default: bool) -> Self {
        Self {
            id,
            label,
            kind: ParamKind::Toggle,
            default: ParamDefault::Flag(default),
        }
    }

    /// Default as a wire value.
    pub fn default_value(&self) -> ParamValue {
        self.default.to_value()
    }

    /// Validate and normalize `value` against this descriptor.
    ///
    /// Slider values are clamped to `[min, max]`; everything else must match exactly.
    pub fn validate(&self, value: ParamValue) -> FxResult<ParamValue> {
        match (self.kind, value) {
            (ParamKind::Slider { min, max, .. }, ParamValue::Number(v)) => {
                if !v.is_finite() {
                    return Err(FxError::validation(format!(
                        "parameter '{}' must be finite",
                        self.id
                    )));
                }
                Ok(ParamValue::Number(v.clamp(min, max)))
            }
            (ParamKind::Enum { options }, ParamValue::Text(s)) => {
                if options.contains(&s.as_str()) {
                    Ok(ParamValue::Text(s))
                } else {
                    Err(FxError::validation(format!(
                        "parameter '{}' has no option '{s}'",
                        self.id
                    )))
                }
            }
            (ParamKind::Toggle, ParamValue::Bool(b)) => Ok(ParamValue::Bool(b)),
            (_, other) => Err(FxError::validation(format!(
                "parameter '{}' does not accept {other:?}",
                self.id
            ))),
        }
    }
}

/// One entry per declared parameter, each set to its default.
pub fn default_values(defs: &[ParamDef]) -> ParamMap {
    defs.iter()
        .map(|d| (d.id.to_owned(), d.default_value()))
        .collect()
}

/// Validated parameter values bound to a descriptor table.
#[derive(Clone, Debug)]
pub struct ParamSet {
    defs: &'static [ParamDef],
    values: BTreeMap<&'static str, ParamValue>,
}

impl ParamSet {
    /// Empty set; reads fall back to defaults until [`ParamSet::seed_defaults`] runs.
    pub fn new(defs: &'static [ParamDef]) -> Self {
        Self {
            defs,
            values: BTreeMap::new(),
        }
    }

    /// Set seeded with every default.
    pub fn with_defaults(defs: &'static [ParamDef]) -> Self {
        let mut s = Self::new(defs);
        s.seed_defaults();
        s
    }

    /// Overwrite every value with its declared default.
    pub fn seed_defaults(&mut self) {
        self.values = self
            .defs
            .iter()
            .map(|d| (d.id, d.default_value()))
            .collect();
    }

    /// Descriptor table.
    pub fn defs(&self) -> &'static [ParamDef] {
        self.defs
    }

    /// Descriptor for `id`.
    pub fn def(&self, id: &str) -> Option<&'static ParamDef> {
        self.defs.iter().find(|d| d.id == id)
    }

    /// Validate and store a value.
    pub fn set(&mut self, id: &str, value: ParamValue) -> FxResult<()> {
        let def = self
            .def(id)
            .ok_or_else(|| FxError::validation(format!("unknown parameter '{id}'")))?;
        let v = def.validate(value)?;
        self.values.insert(def.id, v);
        Ok(())
    }

    /// Apply every override, returning the ones that were rejected.
    pub fn apply(&mut self, overrides: &ParamMap) -> Vec<FxError> {
        overrides
            .iter()
            .filter_map(|(k, v)| self.set(k, v.clone()).err())
            .collect()
    }

    /// Stored value, if any.
    pub fn get(&self, id: &str) -> Option<&ParamValue> {
        self.values.get(id)
    }

    /// Numeric value, falling back to the declared default, then `0.0`.
    pub fn number(&self, id: &str) -> f64 {
        match self.values.get(id) {
            Some(ParamValue::Number(v)) => *v,
            _ => match self.def(id).map(|d| d.default) {
                Some(ParamDefault::Number(v)) => v,
                _ => 0.0,
            },
        }
    }

    /// Enum value, falling back to the declared default, then `""`.
    pub fn choice(&self, id: &str) -> &str {
        match self.values.get(id) {
            Some(ParamValue::Text(v)) => v.as_str(),
            _ => match self.def(id).map(|d| d.default) {
                Some(ParamDefault::Choice(v)) => v,
                _ => "",
            },
        }
    }

    /// Toggle value, falling back to the declared default, then `false`.
    pub fn flag(&self, id: &str) -> bool {
        match self.values.get(id) {
            Some(ParamValue::Bool(v)) => *v,
            _ => matches!(
                self.def(id).map(|d| d.default),
                Some(ParamDefault::Flag(true))
            ),
        }
    }

    /// Snapshot as a wire map (defaults filled in for unset ids).
    pub fn to_map(&self) -> ParamMap {
        self.defs
            .iter()
            .map(|d| {
                let v = self
                    .values
                    .get(d.id)
                    .cloned()
                    .unwrap_or_else(|| d.default_value());
                (d.id.to_owned(), v)
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/params/params.rs"]
mod tests;
