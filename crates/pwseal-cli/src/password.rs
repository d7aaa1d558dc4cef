//! Password input: environment variable or interactive no-echo prompt.

use anyhow::{bail, Context, Result};
use secrecy::SecretString;
use zeroize::Zeroize;

/// Read the password from `env_var` if given, otherwise prompt on the TTY.
///
/// With `confirm`, the prompt is repeated and both entries must match.
pub(crate) fn read_password(env_var: Option<&str>, confirm: bool) -> Result<SecretString> {
    if let Some(var) = env_var {
        let value = std::env::var(var)
            .with_context(|| format!("password environment variable {var} is not set"))?;
        tracing::debug!(var, "password read from environment");
        return Ok(SecretString::from(value));
    }

    let mut first = rpassword::prompt_password("Password: ").context("reading password")?;
    if confirm {
        let mut second =
            rpassword::prompt_password("Confirm password: ").context("reading password")?;
        let matches = first == second;
        second.zeroize();
        if !matches {
            first.zeroize();
            bail!("passwords do not match");
        }
    }
    Ok(SecretString::from(first))
}
