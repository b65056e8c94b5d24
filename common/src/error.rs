use std::{error::Error, fmt::Display};

/// This type gets used to be our catch all error.
/// We implement conversions for all Library errors to ease error management.
#[derive(Debug)]
pub enum CcError {
    /// Allows a generic Error message.
    StringCcError(String),
    /// Anticipated errors, may be rethrown with an additional error message
    RethrowCcError(String, Box<dyn Error>),
    /// All other library Errors get converted to this error.
    OtherCcError(Box<dyn Error>),
}

/// This type is our goto Result, as it allows us to convert between many different errors.
pub type CcResult<O> = Result<O, CcError>;

impl Display for CcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CcError::StringCcError(str) => str.fmt(f),
            CcError::RethrowCcError(str, err) => {
                str.fmt(f)?;
                " with: ".fmt(f)?;
                err.fmt(f)?;
                Ok(())
            }
            CcError::OtherCcError(err) => err.fmt(f),
        }
    }
}
impl Error for CcError {}

impl CcError {
    /// Allows to annotate a CcError with a message to better detect the origin of errors.
    /// # Usage
    /// ```
    /// # use common::{CcError, CcResult};
    /// # fn fallible_function() -> CcResult<()> {
    /// # Err(CcError::StringCcError("".into()))
    /// # }
    /// # fn container_function() -> CcResult<()> {
    /// fallible_function().map_err(CcError::rethrow_with("function failed"))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn rethrow_with(str: &'static str) -> impl Fn(CcError) -> CcError {
        move |err| CcError::RethrowCcError(str.to_string(), Box::new(err))
    }
}

macro_rules! implement_from {
    ($type:ty) => {
        impl From<$type> for CcError {
            fn from(other: $type) -> Self {
                CcError::OtherCcError(Box::from(other))
            }
        }
    };
}
implement_from!(std::io::Error);
implement_from!(serde_json::Error);
implement_from!(std::num::ParseIntError);

impl<'a> From<&'a str> for CcError {
    fn from(other: &'a str) -> Self {
        CcError::StringCcError(other.to_string())
    }
}
impl From<String> for CcError {
    fn from(other: String) -> Self {
        CcError::StringCcError(other)
    }
}
