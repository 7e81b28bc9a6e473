//! Lithology descriptions and the named lithology catalogue.

use std::fmt;

use indexmap::IndexMap;

use crate::error::ModelError;

/// Porosity model used for a layer.
///
/// Code `0` is the two end-member sand/shale mixture (Revil); codes
/// `1..=4` are fixed empirical porosity-depth curves that ignore the
/// end-member state entirely.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LithologyModel {
    /// Sand/shale mixture driven by end-member porosities (code 0).
    Revil,
    /// Exponential shale curve (code 1).
    Shale,
    /// Exponential sandstone curve (code 2).
    Sandstone,
    /// Exponential chalk curve (code 3).
    Chalk,
    /// Exponential shaly-sandstone curve (code 4).
    ShalySandstone,
}

impl LithologyModel {
    /// All models in code order.
    pub const ALL: [LithologyModel; 5] = [
        Self::Revil,
        Self::Shale,
        Self::Sandstone,
        Self::Chalk,
        Self::ShalySandstone,
    ];

    /// Parse a numeric model code.
    ///
    /// Returns [`ModelError::UnsupportedModelType`] for codes outside `0..=4`.
    pub fn from_code(code: u8) -> Result<Self, ModelError> {
        match code {
            0 => Ok(Self::Revil),
            1 => Ok(Self::Shale),
            2 => Ok(Self::Sandstone),
            3 => Ok(Self::Chalk),
            4 => Ok(Self::ShalySandstone),
            _ => Err(ModelError::UnsupportedModelType { code }),
        }
    }

    /// The numeric code of this model.
    pub fn code(self) -> u8 {
        match self {
            Self::Revil => 0,
            Self::Shale => 1,
            Self::Sandstone => 2,
            Self::Chalk => 3,
            Self::ShalySandstone => 4,
        }
    }

    /// Surface porosity `A` and decay constant `k` (1/m) of the
    /// exponential curve `phi = A * exp(-k * z)`, or `None` for Revil.
    pub fn exponential_coefficients(self) -> Option<(f64, f64)> {
        match self {
            Self::Revil => None,
            Self::Shale => Some((0.63, 0.51e-3)),
            Self::Sandstone => Some((0.49, 0.27e-3)),
            Self::Chalk => Some((0.70, 0.71e-3)),
            Self::ShalySandstone => Some((0.56, 0.39e-3)),
        }
    }
}

impl TryFrom<u8> for LithologyModel {
    type Error = ModelError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl fmt::Display for LithologyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Revil => "revil",
            Self::Shale => "shale",
            Self::Sandstone => "sandstone",
            Self::Chalk => "chalk",
            Self::ShalySandstone => "shaly_sandstone",
        };
        f.write_str(name)
    }
}

/// Critical porosity of both end-members in the built-in presets.
pub const DEFAULT_CRITICAL_POROSITY: f64 = 0.45;

/// Compaction parameters of one stratigraphic layer.
///
/// `clay_fraction` is the mixing variable of the Revil model: the
/// volume fraction of shale in the rock. It is not a stress, even though
/// upstream grids sometimes carry it under a stress-like name.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerLithology {
    /// Porosity model.
    pub model: LithologyModel,
    /// Critical (high-stress) porosity of the sand end-member.
    pub phic_sd: f64,
    /// Critical (high-stress) porosity of the shale end-member.
    pub phic_sh: f64,
    /// Shale volume fraction in `[0, 1]`.
    pub clay_fraction: f64,
}

impl LayerLithology {
    /// A Revil sand/shale mixture.
    pub fn revil(phic_sd: f64, phic_sh: f64, clay_fraction: f64) -> Self {
        Self {
            model: LithologyModel::Revil,
            phic_sd,
            phic_sh,
            clay_fraction,
        }
    }

    /// A layer following one of the fixed exponential curves, with both
    /// critical porosities at [`DEFAULT_CRITICAL_POROSITY`].
    ///
    /// The curve alone sets this layer's bulk porosity, but the critical
    /// porosities still drive the sand and shale end-member relaxation
    /// while marching through it, and layers below inherit that state.
    /// Use [`with_critical_porosities`](Self::with_critical_porosities)
    /// to change them.
    pub fn exponential(model: LithologyModel) -> Self {
        Self {
            model,
            phic_sd: DEFAULT_CRITICAL_POROSITY,
            phic_sh: DEFAULT_CRITICAL_POROSITY,
            clay_fraction: 0.0,
        }
    }

    /// Replace both critical porosities.
    pub fn with_critical_porosities(mut self, phic_sd: f64, phic_sh: f64) -> Self {
        self.phic_sd = phic_sd;
        self.phic_sh = phic_sh;
        self
    }

    /// Check that porosities and the clay fraction are finite and in range.
    pub fn validate(&self) -> Result<(), ModelError> {
        for (name, v) in [
            ("phic_sd", self.phic_sd),
            ("phic_sh", self.phic_sh),
            ("clay_fraction", self.clay_fraction),
        ] {
            if !v.is_finite() {
                return Err(ModelError::NonFinite { what: name, value: v });
            }
        }
        if !(0.0..1.0).contains(&self.phic_sd) || !(0.0..1.0).contains(&self.phic_sh) {
            return Err(ModelError::InvalidLithology {
                reason: format!(
                    "critical porosities must lie in [0, 1), got sand {} shale {}",
                    self.phic_sd, self.phic_sh
                ),
            });
        }
        if !(0.0..=1.0).contains(&self.clay_fraction) {
            return Err(ModelError::InvalidLithology {
                reason: format!("clay_fraction must lie in [0, 1], got {}", self.clay_fraction),
            });
        }
        Ok(())
    }
}

/// Ordered table of named lithologies.
///
/// Raw layers reference lithologies by name; the catalogue resolves
/// them. Insertion order is kept so listings are stable.
#[derive(Clone, Debug, Default)]
pub struct LithologyCatalog {
    entries: IndexMap<String, LayerLithology>,
}

impl LithologyCatalog {
    /// An empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalogue holding the built-in presets: `revil_mix`, `shale`,
    /// `sandstone`, `chalk` and `shaly_sandstone`.
    pub fn with_presets() -> Self {
        let mut cat = Self::new();
        cat.insert(
            "revil_mix",
            LayerLithology::revil(DEFAULT_CRITICAL_POROSITY, DEFAULT_CRITICAL_POROSITY, 0.3),
        );
        for model in &LithologyModel::ALL[1..] {
            cat.insert(model.to_string(), LayerLithology::exponential(*model));
        }
        cat
    }

    /// Insert or replace a lithology, returning the previous entry.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        lithology: LayerLithology,
    ) -> Option<LayerLithology> {
        self.entries.insert(name.into(), lithology)
    }

    /// Look up a lithology by name.
    pub fn get(&self, name: &str) -> Option<&LayerLithology> {
        self.entries.get(name)
    }

    /// Whether `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalogue is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a list of names into lithologies, returning the first
    /// unknown name on failure.
    pub fn resolve_all<'a, I>(&self, names: I) -> Result<Vec<LayerLithology>, String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names
            .into_iter()
            .map(|n| self.get(n).copied().ok_or_else(|| n.to_string()))
            .collect()
    }
}
