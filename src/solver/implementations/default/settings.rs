use crate::algebra::*;
use crate::solver::core::{linsolvers::check_linear_solver_name, ConfigError};
use derive_builder::Builder;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Settings for the [`LinIpmSolver`](crate::solver::LinIpmSolver)
///
/// Construct with [`LinIpmSettingsBuilder`] or take the defaults and
/// override individual fields.
#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LinIpmSettings<T: FloatT> {
    ///maximum number of iterations
    #[builder(default = "50")]
    pub max_iter: u32,

    ///relative duality gap tolerance
    #[builder(default = "(1e-8).as_T()")]
    pub tol: T,

    ///verbose printing
    #[builder(default = "false")]
    pub verbose: bool,

    ///maximum interior point step length, as a fraction of the step to the boundary
    #[builder(default = "(0.99).as_T()")]
    pub max_step_fraction: T,

    ///also require small primal and dual residuals for convergence
    #[builder(default = "false")]
    pub check_feasibility: bool,

    ///feasibility tolerance (primal and dual), used with `check_feasibility`
    #[builder(default = "(1e-8).as_T()")]
    pub tol_feas: T,

    ///linear solver for the Newton system ("auto", "sparselu" or "dense")
    #[builder(default = r#""auto".to_string()"#)]
    pub direct_solve_method: String,

    ///relative pivot threshold for the sparse LU
    #[builder(default = "(0.1).as_T()")]
    pub lu_pivot_tolerance: T,
}

impl<T> Default for LinIpmSettings<T>
where
    T: FloatT,
{
    fn default() -> LinIpmSettings<T> {
        LinIpmSettingsBuilder::<T>::default().build().unwrap()
    }
}

impl<T> LinIpmSettings<T>
where
    T: FloatT,
{
    /// Checks that the settings are valid
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_positive("tol", self.tol)?;
        validate_positive("tol_feas", self.tol_feas)?;
        validate_fraction("max_step_fraction", self.max_step_fraction)?;
        validate_fraction("lu_pivot_tolerance", self.lu_pivot_tolerance)?;
        check_linear_solver_name(&self.direct_solve_method)?;
        Ok(())
    }

    /// Apply `(name, value)` options on top of the current settings.
    ///
    /// Recognized names are `nmaxit` (iteration limit, a nonnegative
    /// integer) and `tol` (relative gap tolerance, positive).  Other
    /// names are ignored.
    pub fn apply_params(&mut self, params: &[(&str, f64)]) -> Result<(), ConfigError> {
        for &(name, value) in params {
            let bad_value = || ConfigError::BadOptionValue {
                name: name.to_string(),
                value: value.to_string(),
            };
            match name {
                "nmaxit" => {
                    if !(value >= 0.0 && value <= u32::MAX as f64 && value.fract() == 0.0) {
                        return Err(bad_value());
                    }
                    self.max_iter = value as u32;
                }
                "tol" => {
                    self.tol = T::from_f64(value)
                        .filter(|&tol| tol > T::zero() && tol.is_finite())
                        .ok_or_else(bad_value)?;
                }
                _ => {}
            }
        }
        Ok(())
    }
}

// pre build checker (for auto-validation when using the builder)

impl From<ConfigError> for LinIpmSettingsBuilderError {
    fn from(e: ConfigError) -> Self {
        LinIpmSettingsBuilderError::ValidationError(e.to_string())
    }
}

/// Automatic pre-build settings validation
impl<T> LinIpmSettingsBuilder<T>
where
    T: FloatT,
{
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(tol) = self.tol {
            validate_positive("tol", tol)?;
        }
        if let Some(tol_feas) = self.tol_feas {
            validate_positive("tol_feas", tol_feas)?;
        }
        if let Some(frac) = self.max_step_fraction {
            validate_fraction("max_step_fraction", frac)?;
        }
        if let Some(pivtol) = self.lu_pivot_tolerance {
            validate_fraction("lu_pivot_tolerance", pivtol)?;
        }
        if let Some(ref method) = self.direct_solve_method {
            check_linear_solver_name(method)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------
// individual validation functions go here
// ---------------------------------------------------------

fn validate_positive<T: FloatT>(name: &'static str, v: T) -> Result<(), ConfigError> {
    if v > T::zero() && v.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::BadFieldValue(name))
    }
}

// values in (0,1]
fn validate_fraction<T: FloatT>(name: &'static str, v: T) -> Result<(), ConfigError> {
    if v > T::zero() && v <= T::one() {
        Ok(())
    } else {
        Err(ConfigError::BadFieldValue(name))
    }
}
