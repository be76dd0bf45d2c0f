//! Building layers from [`figment`] providers.
//!
//! ```no_run
//! use camino::Utf8Path;
//! use serde::Deserialize;
//! use strata::{Scope, source};
//!
//! #[derive(Deserialize)]
//! struct Settings {
//!     enabled: Option<bool>,
//! }
//!
//! let tenant = source::layer_from_toml_file::<Settings>(
//!     Scope::new("tenant", 200),
//!     Utf8Path::new("config/tenant.toml"),
//! )?;
//! let user = source::layer_from_env::<Settings>(Scope::new("user", 500), "APP_")?;
//! # Ok::<(), strata::StrataError>(())
//! ```

use camino::Utf8Path;
use figment::{Figment, Provider};
use figment::providers::Env;
use serde::de::DeserializeOwned;

use crate::error::{StrataError, StrataResult};
use crate::layer::Layer;
use crate::scope::Scope;

/// Extract a snapshot for `scope` from `provider`.
///
/// # Errors
///
/// Returns [`StrataError::Source`] when the provider fails or its data does
/// not deserialise into `T`.
pub fn layer_from_provider<T, P>(scope: Scope, provider: P) -> StrataResult<Layer<T>>
where
    T: DeserializeOwned,
    P: Provider,
{
    let snapshot = Figment::from(provider)
        .extract()
        .map_err(|err| StrataError::from_provider(scope.name(), err))?;
    tracing::debug!(scope = scope.name(), "extracted layer from provider");
    Ok(Layer::new(scope, snapshot))
}

/// Load a snapshot for `scope` from the TOML file at `path`.
///
/// The file path becomes the layer's snapshot identifier.
///
/// # Errors
///
/// Returns [`StrataError::Source`] when the file cannot be read or parsed.
/// A missing file is an error rather than an empty layer.
#[cfg(feature = "toml")]
pub fn layer_from_toml_file<T>(scope: Scope, path: &Utf8Path) -> StrataResult<Layer<T>>
where
    T: DeserializeOwned,
{
    use figment::providers::{Format, Toml};

    let provider = Toml::file_exact(path.as_std_path());
    Ok(layer_from_provider(scope, provider)?.with_snapshot_id(path.as_str()))
}

/// Load a snapshot for `scope` from environment variables starting with
/// `prefix`.
///
/// Keys are lower-cased and `__` separates nested keys, so
/// `APP_LIMITS__DAILY=5` populates `limits.daily`.
///
/// # Errors
///
/// Returns [`StrataError::Source`] when the variables do not deserialise
/// into `T`.
pub fn layer_from_env<T>(scope: Scope, prefix: &str) -> StrataResult<Layer<T>>
where
    T: DeserializeOwned,
{
    layer_from_provider(scope, Env::prefixed(prefix).split("__"))
}
