//! Context parameter loading
//!
//! Raw parameters come from CLI flags with `ECSPLAN_*` environment
//! fallbacks; validation itself belongs to the topology crate. The
//! bootstrap flag travels through the environment as a bool-valued string
//! (`ECSPLAN_USE_PUBLIC_BOOTSTRAP_IMAGE`, default `"true"`).

use anyhow::{bail, Context, Result};
use ecsplan_models::RawParameters;

use crate::cli::ParameterArgs;

const DEFAULT_CONTAINER_PORT: i64 = 8080;
const DEFAULT_DESIRED_COUNT: i64 = 1;
const DEFAULT_CPU: i64 = 512;
const DEFAULT_MEMORY_MIB: i64 = 1024;

/// Load raw parameters from flags and the process environment.
pub fn load_parameters(args: &ParameterArgs) -> Result<RawParameters> {
    from_sources(args, |key| std::env::var(key).ok())
}

/// Same as [`load_parameters`], with the environment injected for tests.
pub fn from_sources(
    args: &ParameterArgs,
    env: impl Fn(&str) -> Option<String>,
) -> Result<RawParameters> {
    let app_name = match &args.app_name {
        Some(name) => name.clone(),
        None => env("ECSPLAN_APP_NAME")
            .context("app name missing: pass --app-name or set ECSPLAN_APP_NAME")?,
    };

    let container_port = int_param(
        args.container_port,
        env("ECSPLAN_CONTAINER_PORT"),
        "ECSPLAN_CONTAINER_PORT",
        DEFAULT_CONTAINER_PORT,
    )?;
    let desired_count = int_param(
        args.desired_count,
        env("ECSPLAN_DESIRED_COUNT"),
        "ECSPLAN_DESIRED_COUNT",
        DEFAULT_DESIRED_COUNT,
    )?;
    let cpu = int_param(args.cpu, env("ECSPLAN_CPU"), "ECSPLAN_CPU", DEFAULT_CPU)?;
    let memory_mib = int_param(
        args.memory_mib,
        env("ECSPLAN_MEMORY_MIB"),
        "ECSPLAN_MEMORY_MIB",
        DEFAULT_MEMORY_MIB,
    )?;

    let bootstrap_mode = if args.no_bootstrap {
        Some(false)
    } else {
        bootstrap_from_env(env("ECSPLAN_USE_PUBLIC_BOOTSTRAP_IMAGE"))?
    };

    Ok(RawParameters {
        app_name,
        container_port,
        desired_count,
        cpu,
        memory_mib,
        bootstrap_mode,
    })
}

fn int_param(flag: Option<i64>, env_value: Option<String>, var: &str, default: i64) -> Result<i64> {
    if let Some(value) = flag {
        return Ok(value);
    }
    match env_value {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be an integer, got {:?}", var, raw)),
        None => Ok(default),
    }
}

fn bootstrap_from_env(raw: Option<String>) -> Result<Option<bool>> {
    match raw.as_deref().map(str::trim) {
        None => Ok(None),
        Some("true") => Ok(Some(true)),
        Some("false") => Ok(Some(false)),
        Some(other) => bail!(
            "ECSPLAN_USE_PUBLIC_BOOTSTRAP_IMAGE must be \"true\" or \"false\", got {:?}",
            other
        ),
    }
}
