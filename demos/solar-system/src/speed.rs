/// Speed editing: the global multiplier and per-planet orbital speeds.
///
/// Values are clamped into range and rounded to the precision the UI shows.
/// Text that does not parse is rejected so the caller can revert the display.

/// Why a typed speed was rejected. Carries the text as entered.
#[derive(Debug, Clone, PartialEq)]
pub enum SpeedInputError {
    NotANumber(String),
    NotFinite(String),
}

#[derive(Debug, Clone, Copy)]
pub struct SpeedLimits {
    pub global_min: f32,
    pub global_max: f32,
    pub global_step: f32,
    /// Decimal places kept for the global multiplier.
    pub global_decimals: i32,
    pub body_min: f32,
    pub body_max: f32,
    pub body_step: f32,
    pub body_decimals: i32,
}

impl Default for SpeedLimits {
    fn default() -> Self {
        Self {
            global_min: 0.1,
            global_max: 5.0,
            global_step: 0.1,
            global_decimals: 2,
            body_min: 0.0001,
            body_max: 0.05,
            body_step: 0.001,
            body_decimals: 4,
        }
    }
}

pub const DEFAULT_GLOBAL_MULTIPLIER: f32 = 1.0;

impl SpeedLimits {
    pub fn clamp_global(&self, value: f32) -> f32 {
        round_to(value.clamp(self.global_min, self.global_max), self.global_decimals)
    }

    pub fn clamp_body(&self, value: f32) -> f32 {
        round_to(value.clamp(self.body_min, self.body_max), self.body_decimals)
    }

    /// Move the multiplier by `steps` increments (negative slows down).
    pub fn step_global(&self, current: f32, steps: i32) -> f32 {
        self.clamp_global(current + steps as f32 * self.global_step)
    }

    pub fn step_body(&self, current: f32, steps: i32) -> f32 {
        self.clamp_body(current + steps as f32 * self.body_step)
    }

    /// Parse the multiplier field. A trailing `x` ("1.5x") is accepted.
    pub fn parse_global(&self, text: &str) -> Result<f32, SpeedInputError> {
        let trimmed = text.trim();
        let number = trimmed
            .strip_suffix(['x', 'X'])
            .unwrap_or(trimmed)
            .trim_end();
        parse_finite(number, text).map(|v| self.clamp_global(v))
    }

    pub fn parse_body(&self, text: &str) -> Result<f32, SpeedInputError> {
        parse_finite(text.trim(), text).map(|v| self.clamp_body(v))
    }
}

fn parse_finite(number: &str, original: &str) -> Result<f32, SpeedInputError> {
    let value: f32 = number
        .parse()
        .map_err(|_| SpeedInputError::NotANumber(original.to_string()))?;
    if !value.is_finite() {
        return Err(SpeedInputError::NotFinite(original.to_string()));
    }
    Ok(value)
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f32, decimals: i32) -> f32 {
    let scale = 10f64.powi(decimals);
    ((value as f64 * scale).round() / scale) as f32
}
