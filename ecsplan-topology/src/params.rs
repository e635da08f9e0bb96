//! Parameter resolution and validation
//!
//! Pure gate in front of the derivation: either every constraint holds and
//! a validated [`Parameters`] comes out, or the first violation aborts with
//! [`TopologyError::InvalidParameter`]. No partial results, and no
//! defaulting anywhere downstream: `bootstrap_mode` is defaulted here and
//! nowhere else.

use ecsplan_models::{Parameters, RawParameters};

use crate::error::TopologyError;

/// Fargate CPU/memory combinations accepted by the target runtime,
/// `(cpu, min_memory_mib, max_memory_mib)` with 1024 MiB stepping above the
/// smallest tier.
const FARGATE_SIZES: &[(u32, u32, u32)] = &[
    (256, 512, 2048),
    (512, 1024, 4096),
    (1024, 2048, 8192),
    (2048, 4096, 16384),
    (4096, 8192, 30720),
];

/// Validate raw context values into an immutable [`Parameters`].
pub fn resolve(raw: &RawParameters) -> Result<Parameters, TopologyError> {
    let app_name = resolve_app_name(&raw.app_name)?;

    if raw.container_port < 1 || raw.container_port > 65535 {
        return Err(TopologyError::invalid_parameter(
            "container_port",
            format!("must be 1-65535, got {}", raw.container_port),
        ));
    }
    let container_port = raw.container_port as u16;

    if raw.desired_count < 0 {
        return Err(TopologyError::invalid_parameter(
            "desired_count",
            format!("must be >= 0, got {}", raw.desired_count),
        ));
    }
    let desired_count = u32::try_from(raw.desired_count).map_err(|_| {
        TopologyError::invalid_parameter(
            "desired_count",
            format!("out of range: {}", raw.desired_count),
        )
    })?;

    let (cpu, memory_mib) = resolve_sizing(raw.cpu, raw.memory_mib)?;

    Ok(Parameters {
        app_name,
        container_port,
        desired_count,
        cpu,
        memory_mib,
        // Absent means bootstrap: the topology must be verifiable before
        // any application image has been pushed.
        bootstrap_mode: raw.bootstrap_mode.unwrap_or(true),
    })
}

fn resolve_app_name(app_name: &str) -> Result<String, TopologyError> {
    if app_name.is_empty() {
        return Err(TopologyError::invalid_parameter(
            "app_name",
            "must not be empty",
        ));
    }
    if app_name.len() > 32 {
        return Err(TopologyError::invalid_parameter(
            "app_name",
            format!("must be at most 32 characters, got {}", app_name.len()),
        ));
    }
    // Seeds DNS-visible names (ALB, target group), so the DNS label charset
    // is the common denominator.
    let valid_chars = app_name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !valid_chars || app_name.starts_with('-') || app_name.ends_with('-') {
        return Err(TopologyError::invalid_parameter(
            "app_name",
            format!(
                "must be lowercase alphanumeric with interior hyphens, got {:?}",
                app_name
            ),
        ));
    }
    Ok(app_name.to_string())
}

fn resolve_sizing(cpu: i64, memory_mib: i64) -> Result<(u32, u32), TopologyError> {
    if cpu <= 0 {
        return Err(TopologyError::invalid_parameter(
            "cpu",
            format!("must be positive, got {}", cpu),
        ));
    }
    if memory_mib <= 0 {
        return Err(TopologyError::invalid_parameter(
            "memory_mib",
            format!("must be positive, got {}", memory_mib),
        ));
    }

    let cpu = u32::try_from(cpu).map_err(|_| {
        TopologyError::invalid_parameter("cpu", format!("out of range: {}", cpu))
    })?;
    let memory_mib = u32::try_from(memory_mib).map_err(|_| {
        TopologyError::invalid_parameter("memory_mib", format!("out of range: {}", memory_mib))
    })?;
    let tier = FARGATE_SIZES
        .iter()
        .find(|(c, _, _)| *c == cpu)
        .ok_or_else(|| {
            TopologyError::invalid_parameter(
                "cpu",
                format!("not a supported Fargate CPU allocation: {}", cpu),
            )
        })?;

    let (_, min_mem, max_mem) = *tier;
    let stepped = memory_mib == min_mem || (memory_mib % 1024 == 0 && memory_mib >= min_mem);
    if memory_mib < min_mem || memory_mib > max_mem || !stepped {
        return Err(TopologyError::invalid_parameter(
            "memory_mib",
            format!(
                "{} MiB is not valid for {} CPU units (allowed: {}-{} MiB)",
                memory_mib, cpu, min_mem, max_mem
            ),
        ));
    }

    Ok((cpu, memory_mib))
}
