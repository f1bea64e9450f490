use crate::core::utils::identifiers::{DEFAULT_SOLVENT_RESN, default_hbond_backbone_atoms};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{parameter}': {reason}")]
    Invalid {
        parameter: &'static str,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid configuration in '{path}': {source}")]
    Invalid { path: String, source: ConfigError },
}

/// Settings for hydrogen-bond stratification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StratifyConfig {
    /// Token matched as a substring of the residue name to recognize water.
    pub solvent_resn: String,
    /// Atom names counted as backbone when binning residue hydrogen bonds.
    pub backbone_atoms: Vec<String>,
}

impl StratifyConfig {
    pub fn for_solvent(solvent_resn: &str) -> Result<Self, ConfigError> {
        StratifyConfigBuilder::new()
            .solvent_resn(solvent_resn)
            .build()
    }

    pub fn is_backbone_atom(&self, atom_name: &str) -> bool {
        let name = atom_name.trim();
        self.backbone_atoms.iter().any(|b| b == name)
    }
}

impl Default for StratifyConfig {
    fn default() -> Self {
        Self {
            solvent_resn: DEFAULT_SOLVENT_RESN.to_string(),
            backbone_atoms: default_hbond_backbone_atoms(),
        }
    }
}

#[derive(Default)]
pub struct StratifyConfigBuilder {
    solvent_resn: Option<String>,
    backbone_atoms: Option<Vec<String>>,
}

impl StratifyConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn solvent_resn(mut self, resn: &str) -> Self {
        self.solvent_resn = Some(resn.to_string());
        self
    }
    pub fn backbone_atoms(mut self, names: &[&str]) -> Self {
        self.backbone_atoms = Some(names.iter().map(|n| n.to_string()).collect());
        self
    }

    pub fn build(self) -> Result<StratifyConfig, ConfigError> {
        let defaults = StratifyConfig::default();
        let solvent_resn = self.solvent_resn.unwrap_or(defaults.solvent_resn);
        if solvent_resn.trim().is_empty() {
            // An empty token would match every residue name.
            return Err(ConfigError::Invalid {
                parameter: "solvent_resn",
                reason: "must not be empty".to_string(),
            });
        }
        let mut backbone_atoms: Vec<String> = self
            .backbone_atoms
            .unwrap_or(defaults.backbone_atoms)
            .into_iter()
            .map(|n| n.trim().to_string())
            .collect();
        if let Some(empty) = backbone_atoms.iter().position(|n| n.is_empty()) {
            return Err(ConfigError::Invalid {
                parameter: "backbone_atoms",
                reason: format!("entry {} is empty", empty),
            });
        }
        backbone_atoms.sort();
        backbone_atoms.dedup();
        Ok(StratifyConfig {
            solvent_resn,
            backbone_atoms,
        })
    }
}

/// Cutoffs for face-to-face aromatic stacking.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct PiStackingCriteria {
    pub max_centroid_distance: f64,
    pub max_normal_angle: f64,
    pub max_psi_angle: f64,
}

impl Default for PiStackingCriteria {
    fn default() -> Self {
        Self {
            max_centroid_distance: 7.0,
            max_normal_angle: 30.0,
            max_psi_angle: 45.0,
        }
    }
}

/// Cutoffs for edge-to-face (T-shaped) aromatic stacking.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct TStackingCriteria {
    pub max_centroid_distance: f64,
    pub min_normal_angle: f64,
    pub max_psi_angle: f64,
}

impl Default for TStackingCriteria {
    fn default() -> Self {
        Self {
            max_centroid_distance: 5.0,
            min_normal_angle: 60.0,
            max_psi_angle: 45.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct PiCationCriteria {
    pub max_distance: f64,
    pub max_psi_angle: f64,
}

impl Default for PiCationCriteria {
    fn default() -> Self {
        Self {
            max_distance: 6.0,
            max_psi_angle: 60.0,
        }
    }
}

/// Geometric policy for aromatic interactions. All angles are in degrees and
/// distances in Angstroms.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct GeometryCriteria {
    pub pi_stacking: PiStackingCriteria,
    pub t_stacking: TStackingCriteria,
    pub pi_cation: PiCationCriteria,
}

impl GeometryCriteria {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks: [(&'static str, f64, f64); 8] = [
            (
                "pi-stacking.max-centroid-distance",
                self.pi_stacking.max_centroid_distance,
                f64::INFINITY,
            ),
            ("pi-stacking.max-normal-angle", self.pi_stacking.max_normal_angle, 90.0),
            ("pi-stacking.max-psi-angle", self.pi_stacking.max_psi_angle, 90.0),
            (
                "t-stacking.max-centroid-distance",
                self.t_stacking.max_centroid_distance,
                f64::INFINITY,
            ),
            ("t-stacking.min-normal-angle", self.t_stacking.min_normal_angle, 90.0),
            ("t-stacking.max-psi-angle", self.t_stacking.max_psi_angle, 90.0),
            ("pi-cation.max-distance", self.pi_cation.max_distance, f64::INFINITY),
            ("pi-cation.max-psi-angle", self.pi_cation.max_psi_angle, 90.0),
        ];
        for (parameter, value, upper) in checks {
            if !(value.is_finite() && (0.0..=upper).contains(&value)) {
                return Err(ConfigError::Invalid {
                    parameter,
                    reason: format!("{} is outside [0, {}]", value, upper),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContactsConfig {
    pub stratify: StratifyConfig,
    pub geometry: GeometryCriteria,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialStratifyConfig {
    solvent_resn: Option<String>,
    backbone_atoms: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialContactsConfig {
    #[serde(default)]
    stratify: PartialStratifyConfig,
    #[serde(default)]
    geometry: GeometryCriteria,
}

impl ContactsConfig {
    /// Loads a TOML configuration. Every key is optional and falls back to
    /// its default.
    ///
    /// ```toml
    /// [stratify]
    /// solvent-resn = "TIP3"
    /// backbone-atoms = ["N", "O"]
    ///
    /// [geometry.pi-cation]
    /// max-distance = 6.0
    /// ```
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let path_str = path.to_string_lossy().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io {
            path: path_str.clone(),
            source: e,
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            ConfigLoadError::Toml { source, .. } => ConfigLoadError::Toml {
                path: path_str,
                source,
            },
            ConfigLoadError::Invalid { source, .. } => ConfigLoadError::Invalid {
                path: path_str,
                source,
            },
            other => other,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigLoadError> {
        let partial: PartialContactsConfig =
            toml::from_str(content).map_err(|e| ConfigLoadError::Toml {
                path: "<string>".to_string(),
                source: e,
            })?;
        let invalid = |e: ConfigError| ConfigLoadError::Invalid {
            path: "<string>".to_string(),
            source: e,
        };

        let mut builder = StratifyConfigBuilder::new();
        if let Some(resn) = partial.stratify.solvent_resn.as_deref() {
            builder = builder.solvent_resn(resn);
        }
        if let Some(names) = partial.stratify.backbone_atoms.as_ref() {
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            builder = builder.backbone_atoms(&names);
        }
        let stratify = builder.build().map_err(invalid)?;
        partial.geometry.validate().map_err(invalid)?;

        Ok(Self {
            stratify,
            geometry: partial.geometry,
        })
    }
}
