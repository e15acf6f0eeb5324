use anyhow::{Result, ensure};
use itertools::Itertools;
use log::debug;
use polyplan::entities::{PlanConfig, Strategy};
use polyplan::util::FPA;

/// Maximum declination of the sun (degrees)
pub const MAX_SOLAR_DECLINATION: f64 = 23.5;

/// Angular step between two consecutive orientations of a sweep (degrees)
pub const ORIENTATION_STEP: f64 = 10.0;

/// Below this absolute latitude every orientation receives enough sun
pub const EQUATORIAL_LATITUDE: f64 = 1.0;

/// Rotations (degrees) for which the gutters of a structure receive direct sun.
/// Rotations are symmetric under a half turn, so everything is expressed within `[0, 180)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SolarBand {
    /// Every rotation is allowed
    Unrestricted,
    /// Only the north-south gable alignment (90°) is allowed
    Fixed,
    /// Rotations within `[90 - deviation, 90 + deviation]` are allowed
    Band { deviation: f64 },
}

impl SolarBand {
    pub fn from_latitude(latitude: f64, deviation_override: Option<f64>) -> Result<Self> {
        ensure!(
            latitude.is_finite() && (-90.0..=90.0).contains(&latitude),
            "latitude must lie in [-90, 90], got {latitude}"
        );
        if let Some(deviation) = deviation_override {
            return Ok(Self::from_deviation(deviation));
        }
        if latitude.abs() < EQUATORIAL_LATITUDE {
            return Ok(SolarBand::Unrestricted);
        }
        let cos_dev = MAX_SOLAR_DECLINATION.to_radians().sin() / latitude.to_radians().cos();
        match cos_dev.is_finite() && cos_dev.abs() <= 1.0 {
            true => Ok(Self::from_deviation(cos_dev.acos().to_degrees())),
            false => Ok(SolarBand::Fixed),
        }
    }

    fn from_deviation(deviation: f64) -> Self {
        if deviation >= 90.0 {
            SolarBand::Unrestricted
        } else if deviation <= 0.0 {
            SolarBand::Fixed
        } else {
            SolarBand::Band { deviation }
        }
    }

    /// Lower and upper boundary angle of the band
    pub fn bounds(&self) -> (f64, f64) {
        match self {
            SolarBand::Unrestricted => (0.0, 180.0),
            SolarBand::Fixed => (90.0, 90.0),
            SolarBand::Band { deviation } => (90.0 - deviation, 90.0 + deviation),
        }
    }
}

/// Rotations (degrees) the placement search is allowed to try at a certain latitude.
/// Optimized and disabled-solar sweeps are sorted ascending, for `varied` the 90° alignment comes first.
pub fn permitted_orientations(latitude: f64, config: &PlanConfig) -> Result<Vec<f64>> {
    let band = SolarBand::from_latitude(latitude, config.solar_deviation_override)?;

    let orientations = match (config.solar_orientation, band, config.strategy) {
        (false, _, _) => full_sweep(),
        (true, SolarBand::Fixed, _) | (true, _, Strategy::Uniform) => vec![90.0],
        (true, band, Strategy::Varied) => vec![90.0, band.bounds().0],
        (true, SolarBand::Unrestricted, Strategy::Optimized) => full_sweep(),
        (true, band @ SolarBand::Band { .. }, Strategy::Optimized) => {
            let (lower, upper) = band.bounds();
            band_sweep(lower, upper)
        }
    };

    debug!(
        "[ORIENT] latitude {latitude:.4}°, {band:?}, strategy {:?}: {} orientation(s) {:?}",
        config.strategy,
        orientations.len(),
        orientations
    );

    Ok(orientations)
}

/// Every step over `[0, 180)`
fn full_sweep() -> Vec<f64> {
    let n_steps = (180.0 / ORIENTATION_STEP).round() as usize;
    (0..n_steps).map(|i| i as f64 * ORIENTATION_STEP).collect()
}

/// Every step within `[lower, upper]` plus both exact boundaries
fn band_sweep(lower: f64, upper: f64) -> Vec<f64> {
    let first = (lower / ORIENTATION_STEP).ceil() as i64;
    let last = (upper / ORIENTATION_STEP).floor() as i64;

    (first..=last)
        .map(|i| i as f64 * ORIENTATION_STEP)
        .chain([lower, upper])
        .sorted_by(|a, b| a.total_cmp(b))
        .dedup_by(|a, b| FPA(*a) == FPA(*b))
        .collect()
}
