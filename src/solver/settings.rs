use crate::algebra::*;
use derive_builder::Builder;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Error type returned by settings validation
pub enum SettingsError {
    /// A field holds a value that is not one of its valid options
    #[error("Bad value for field \"{0}\"")]
    BadFieldValue(&'static str),
}

/// Settings for the KKT based least squares solver.
///
/// ```
/// use eqkkt::solver::LsSettingsBuilder;
///
/// let settings = LsSettingsBuilder::<f64>::default()
///     .verbose(true)
///     .iterative_refinement_max_iter(20)
///     .build()
///     .unwrap();
/// assert_eq!(settings.direct_solve_method, "faer");
/// ```

#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LsSettings<T: FloatT> {
    ///verbose printing
    #[builder(default = "false")]
    pub verbose: bool,

    ///direct linear solver method ("faer")
    #[builder(default = r#""faer".to_string()"#)]
    pub direct_solve_method: String,

    ///explicitly drop structural zeros from extracted data, so that
    ///empty rows and columns of the KKT system are detected
    #[builder(default = "true")]
    pub input_sparse_dropzeros: bool,

    ///KKT direct solve with iterative refinement
    #[builder(default = "true")]
    pub iterative_refinement_enable: bool,

    ///iterative refinement relative tolerance
    #[builder(default = "(1e-13).as_T()")]
    pub iterative_refinement_reltol: T,

    ///iterative refinement absolute tolerance
    #[builder(default = "(1e-12).as_T()")]
    pub iterative_refinement_abstol: T,

    ///iterative refinement maximum iterations
    #[builder(default = "10")]
    pub iterative_refinement_max_iter: u32,

    ///iterative refinement stalling tolerance
    #[builder(default = "(5.0).as_T()")]
    pub iterative_refinement_stop_ratio: T,

    ///relative residual tolerance for accepting a KKT solution
    #[builder(default = "(1e-8).as_T()")]
    pub kkt_residual_reltol: T,

    ///absolute residual tolerance for accepting a KKT solution
    #[builder(default = "(1e-10).as_T()")]
    pub kkt_residual_abstol: T,
}

impl<T> Default for LsSettings<T>
where
    T: FloatT,
{
    fn default() -> LsSettings<T> {
        LsSettingsBuilder::<T>::default().build().unwrap()
    }
}

impl<T> LsSettings<T>
where
    T: FloatT,
{
    /// Checks that the settings are valid.  This only ensures that fields specified
    /// by strings contain valid options.   It does not sanity check numerical values
    pub fn validate(&self) -> Result<(), SettingsError> {
        validate_direct_solve_method(&self.direct_solve_method)
    }
}

// pre build checker (for auto-validation when using the builder)

impl From<SettingsError> for LsSettingsBuilderError {
    fn from(e: SettingsError) -> Self {
        LsSettingsBuilderError::ValidationError(e.to_string())
    }
}

/// Automatic pre-build settings validation
impl<T> LsSettingsBuilder<T>
where
    T: FloatT,
{
    /// check that the specified direct_solve_method is valid
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let Some(ref direct_solve_method) = self.direct_solve_method {
            validate_direct_solve_method(direct_solve_method)?;
        }
        Ok(())
    }
}

fn validate_direct_solve_method(direct_solve_method: &str) -> Result<(), SettingsError> {
    match direct_solve_method {
        "faer" => Ok(()),
        _ => Err(SettingsError::BadFieldValue("direct_solve_method")),
    }
}

#[test]
fn test_settings_validate() {
    // all standard settings
    let settings = LsSettingsBuilder::<f64>::default().build().unwrap();
    assert!(!settings.verbose);
    assert_eq!(settings.kkt_residual_abstol, 1e-10);

    // fail on unknown direct solve method
    assert!(LsSettingsBuilder::<f64>::default()
        .direct_solve_method("qdldl".to_string())
        .build()
        .is_err());

    // directly construct a bad LsSettings and manually check
    let settings = LsSettings::<f64> {
        direct_solve_method: "foo".to_string(),
        ..LsSettings::default()
    };
    assert!(settings.validate().is_err());
}
