//! Shared helpers for working with `figment::Jail` in tests.
//!
//! Layer sources read files relative to the working directory and variables
//! from the process environment. The jail isolates both, and [`with_jail`]
//! propagates the closure's return value as an `anyhow::Result`.

use anyhow::{Result, anyhow};

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// The jail is torn down automatically once the closure completes, even when
/// the closure returns an error.
///
/// # Errors
///
/// Returns an error if the jail initialisation fails or the closure returns a
/// [`figment::error::Error`].
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|j| {
        output = Some(f(j)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Converts any error implementing [`ToString`] into a [`figment::Error`].
///
/// Lets a jail closure bubble up a [`strata::StrataError`] with `?`.
#[expect(
    clippy::needless_pass_by_value,
    reason = "used with map_err, which hands over the error by value"
)]
pub fn figment_error<E: ToString>(err: E) -> figment::Error {
    figment::Error::from(err.to_string())
}
