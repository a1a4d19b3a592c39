//! Turning raw item parameters into a validated [`SynthesisRequest`].

use ttsbro_core::{
    DefaultsConfig, ItemParams, OutputFormat, SynthesisRequest, ValidationError, Voice,
    MAX_SPEED, MIN_SPEED,
};

/// Validate `params`, filling unset fields from `defaults`.
///
/// Text is passed through untrimmed; only a missing or all-whitespace text is
/// rejected.
pub fn resolve_request(
    params: &ItemParams,
    defaults: &DefaultsConfig,
) -> Result<SynthesisRequest, ValidationError> {
    let text = match params.text.as_deref() {
        Some(t) if !t.trim().is_empty() => t.to_string(),
        _ => return Err(ValidationError::MissingText),
    };

    let voice = match params.voice {
        Some(ref v) => v.resolve()?,
        None => Voice::from_id(i64::from(defaults.voice))?,
    };

    let speed = params.speed.unwrap_or(defaults.speed);
    if !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
        return Err(ValidationError::SpeedOutOfRange(speed));
    }

    let format = match params.format.as_deref() {
        Some(f) => f.parse::<OutputFormat>()?,
        None => defaults.format,
    };

    let binary_property = params
        .binary_property
        .clone()
        .unwrap_or_else(|| defaults.binary_property.clone());
    if binary_property.trim().is_empty() {
        return Err(ValidationError::MissingBinaryProperty);
    }

    Ok(SynthesisRequest {
        text,
        voice,
        speed,
        format,
        binary_property,
    })
}
