//! Backend selection.
//!
//! The backend can be chosen with the `LPFORM_SOLVER` environment variable
//! (`simplex`, `cbc`, `highs`), and the `cbc` executable with
//! `LPFORM_CBC_PATH`. Without configuration the built-in simplex is used.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::backend::LpSolver;
use crate::cbc::CbcCommand;
use crate::simplex::Simplex;

#[cfg(feature = "highs")]
use crate::highs::HighsSolver;

pub const SOLVER_ENV: &str = "LPFORM_SOLVER";
pub const CBC_PATH_ENV: &str = "LPFORM_CBC_PATH";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Unknown solver '{0}'. Valid options: {1}")]
    UnknownSolver(String, String),
    #[error("Solver '{0}' requested but the '{0}' feature is not enabled")]
    FeatureDisabled(String),
}

/// Available solver backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverKind {
    #[default]
    Simplex,
    Cbc,
    #[cfg(feature = "highs")]
    Highs,
}

impl SolverKind {
    pub fn names() -> &'static [&'static str] {
        #[cfg(feature = "highs")]
        return &["simplex", "cbc", "highs"];
        #[cfg(not(feature = "highs"))]
        return &["simplex", "cbc"];
    }
}

impl FromStr for SolverKind {
    type Err = ConfigError;

    /// Parse solver name (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simplex" => Ok(SolverKind::Simplex),
            "cbc" | "coin_cbc" | "coin-cbc" => Ok(SolverKind::Cbc),
            #[cfg(feature = "highs")]
            "highs" => Ok(SolverKind::Highs),
            #[cfg(not(feature = "highs"))]
            "highs" => Err(ConfigError::FeatureDisabled("highs".to_string())),
            _ => Err(ConfigError::UnknownSolver(s.to_string(), SolverKind::names().join(", "))),
        }
    }
}

/// Which backend to build and how
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SolverConfig {
    pub kind: SolverKind,
    /// Overrides the `cbc` executable looked up on `PATH`
    pub cbc_path: Option<PathBuf>,
}

impl SolverConfig {
    /// Read `LPFORM_SOLVER` and `LPFORM_CBC_PATH`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let kind = match lookup(SOLVER_ENV) {
            Some(name) if !name.trim().is_empty() => name.parse()?,
            _ => SolverKind::default(),
        };
        let cbc_path = lookup(CBC_PATH_ENV).filter(|p| !p.is_empty()).map(PathBuf::from);
        Ok(Self { kind, cbc_path })
    }

    pub fn with_kind(mut self, kind: SolverKind) -> Self {
        self.kind = kind;
        self
    }
}

/// Create a solver instance for the configuration
pub fn create_solver(config: &SolverConfig) -> Box<dyn LpSolver> {
    match config.kind {
        SolverKind::Simplex => Box::new(Simplex::new()),
        SolverKind::Cbc => {
            let cbc = match &config.cbc_path {
                Some(path) => CbcCommand::new().with_executable(path),
                None => CbcCommand::new(),
            };
            Box::new(cbc)
        }
        #[cfg(feature = "highs")]
        SolverKind::Highs => Box::new(HighsSolver::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_solver_kind_from_str() {
        assert_eq!("simplex".parse::<SolverKind>(), Ok(SolverKind::Simplex));
        assert_eq!("SIMPLEX".parse::<SolverKind>(), Ok(SolverKind::Simplex));
        assert_eq!("cbc".parse::<SolverKind>(), Ok(SolverKind::Cbc));
        assert_eq!("coin_cbc".parse::<SolverKind>(), Ok(SolverKind::Cbc));
        #[cfg(feature = "highs")]
        assert_eq!("HiGHS".parse::<SolverKind>(), Ok(SolverKind::Highs));
        #[cfg(not(feature = "highs"))]
        assert_eq!("highs".parse::<SolverKind>(), Err(ConfigError::FeatureDisabled("highs".to_string())));
        assert!(matches!("gurobi".parse::<SolverKind>(), Err(ConfigError::UnknownSolver(_, _))));
    }

    #[test]
    fn test_config_defaults() {
        let config = SolverConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, SolverConfig::default());
        assert_eq!(config.kind, SolverKind::Simplex);
    }

    #[test]
    fn test_config_from_environment() {
        let config = SolverConfig::from_lookup(lookup(&[(SOLVER_ENV, "cbc"), (CBC_PATH_ENV, "/opt/cbc/bin/cbc")])).unwrap();
        assert_eq!(config.kind, SolverKind::Cbc);
        assert_eq!(config.cbc_path, Some(PathBuf::from("/opt/cbc/bin/cbc")));
    }

    #[test]
    fn test_config_rejects_unknown_solver() {
        let result = SolverConfig::from_lookup(lookup(&[(SOLVER_ENV, "cplex")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_create_solver() {
        assert_eq!(create_solver(&SolverConfig::default()).name(), "simplex");
        let cbc = SolverConfig::default().with_kind(SolverKind::Cbc);
        assert_eq!(create_solver(&cbc).name(), "cbc");
    }
}
