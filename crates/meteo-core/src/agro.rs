//! Agronomic calculations over canonical readings and daily summaries
//!
//! Pure functions; every one returns `Option<f64>` and yields `None` when
//! an input is missing or non-finite, so NaN never leaks into aggregates
//! or rendered series.

use std::f64::consts::PI;

/// Solar constant, MJ/m²/min (FAO-56)
pub const SOLAR_CONSTANT: f64 = 0.0820;

fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

/// Saturation vapor pressure (kPa) at air temperature `t_c` (°C),
/// Tetens form: es = 0.6108 * exp(17.27*T / (T + 237.3))
pub fn saturation_vapor_pressure(t_c: f64) -> Option<f64> {
    if !t_c.is_finite() {
        return None;
    }
    finite(0.6108 * (17.27 * t_c / (t_c + 237.3)).exp())
}

/// Vapor pressure deficit (kPa); relative humidity clamped to [0, 100]
pub fn vapor_pressure_deficit(t_c: f64, rh_pct: f64) -> Option<f64> {
    if !rh_pct.is_finite() {
        return None;
    }
    let es = saturation_vapor_pressure(t_c)?;
    let rh = rh_pct.clamp(0.0, 100.0);
    finite(es * (1.0 - rh / 100.0))
}

/// Dew point (°C) by inverting the Magnus formula. RH above 100 clamps
/// to 100; RH at or below zero has no defined dew point (log of zero).
pub fn dew_point(t_c: f64, rh_pct: f64) -> Option<f64> {
    if !t_c.is_finite() || !rh_pct.is_finite() || rh_pct <= 0.0 {
        return None;
    }
    let rh = rh_pct.min(100.0);
    let alpha = (17.27 * t_c) / (237.3 + t_c) + (rh / 100.0).ln();
    finite(237.3 * alpha / (17.27 - alpha))
}

/// Extraterrestrial radiation Ra (MJ/m²/day) for a day of year and
/// latitude (degrees), FAO-56 equation 21.
pub fn extraterrestrial_radiation(day_of_year: u32, latitude_deg: f64) -> Option<f64> {
    if !latitude_deg.is_finite() || !(1..=366).contains(&day_of_year) {
        return None;
    }

    let j = day_of_year as f64;
    let phi = latitude_deg.to_radians();
    // inverse relative earth-sun distance and solar declination
    let dr = 1.0 + 0.033 * (2.0 * PI / 365.0 * j).cos();
    let delta = 0.409 * (2.0 * PI / 365.0 * j - 1.39).sin();
    // sunset hour angle; argument clamped for polar day/night
    let ws = (-phi.tan() * delta.tan()).clamp(-1.0, 1.0).acos();

    let ra = 24.0 * 60.0 / PI
        * SOLAR_CONSTANT
        * dr
        * (ws * phi.sin() * delta.sin() + phi.cos() * delta.cos() * ws.sin());
    finite(ra.max(0.0))
}

/// Hargreaves reference evapotranspiration (mm/day):
/// ET0 = 0.0023 * Ra * (Tmean + 17.8) * sqrt(max(0, Tmax - Tmin))
pub fn et0_hargreaves(ra: f64, t_mean: f64, t_max: f64, t_min: f64) -> Option<f64> {
    if !ra.is_finite() || !t_mean.is_finite() || !t_max.is_finite() || !t_min.is_finite() {
        return None;
    }
    finite(0.0023 * ra * (t_mean + 17.8) * (t_max - t_min).max(0.0).sqrt())
}

/// Growing degree days for one day: max(0, (Tmax + Tmin)/2 - base)
pub fn growing_degree_days(t_max: f64, t_min: f64, base_c: f64) -> Option<f64> {
    if !t_max.is_finite() || !t_min.is_finite() || !base_c.is_finite() {
        return None;
    }
    Some(((t_max + t_min) / 2.0 - base_c).max(0.0))
}
