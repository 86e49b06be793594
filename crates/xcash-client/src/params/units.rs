use crate::error::ParamError;

/// Atomic units per display unit (6 decimal places).
pub const ATOMIC_SCALE: u64 = 1_000_000;

/// Largest gap below an integer that [`to_atomic`] treats as float error.
const MAX_SNAP: f64 = 0.125;

/// `floor(display * 10^6)`.
///
/// A product that falls short of the next integer by at most two ULPs
/// (never more than 1/8 of an atomic unit) is snapped up to it, so a value
/// produced by [`to_display`] converts back to the exact atomic amount it
/// came from for every atomic amount below 2^49. Above that the float
/// error of the round trip can exceed the snap band and the result floors,
/// possibly one unit short. Inside the band a caller-supplied fraction
/// cannot be told apart from that error and is rounded up; everything
/// else floors.
pub fn to_atomic(display: f64) -> Result<u64, ParamError> {
    if !display.is_finite() || display < 0.0 {
        return Err(ParamError::InvalidArgument(format!(
            "amount must be a non-negative finite number, got {display}"
        )));
    }

    let scaled = display * ATOMIC_SCALE as f64;
    let ceil = scaled.ceil();
    let snap = (ceil * 2.0 * f64::EPSILON).min(MAX_SNAP);
    let atomic = if ceil > scaled && ceil - scaled <= snap {
        ceil
    } else {
        scaled.floor()
    };

    if atomic >= u64::MAX as f64 {
        return Err(ParamError::InvalidArgument(format!(
            "amount {display} exceeds the atomic range"
        )));
    }
    Ok(atomic as u64)
}

/// `atomic / 10^6`.
pub fn to_display(atomic: u64) -> f64 {
    atomic as f64 / ATOMIC_SCALE as f64
}
