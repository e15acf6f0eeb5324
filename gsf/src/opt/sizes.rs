use itertools::Itertools;
use log::debug;
use polyplan::entities::{CandidateSize, PlanConfig};

/// Tolerance on side length and area limits, absorbs the rounding of module multiples
const LIMIT_TOLERANCE: f64 = 1e-9;

/// True if a size respects all side length, area and block count limits of the configuration.
/// Module alignment is not checked here, sizes are always built from whole bays.
pub fn size_within_limits(size: &CandidateSize, config: &PlanConfig) -> bool {
    let min_side = config.min_side_length - LIMIT_TOLERANCE;
    let max_side = config.max_side_length + LIMIT_TOLERANCE;
    let sides_ok = [size.gable, size.gutter]
        .iter()
        .all(|s| (min_side..=max_side).contains(s));
    let area_ok = size.area() <= config.max_structure_area + LIMIT_TOLERANCE;
    let blocks_ok = config
        .min_blocks_per_structure
        .is_none_or(|min| size.n_blocks(config.block_width, config.block_height) >= min);

    sides_ok && area_ok && blocks_ok
}

/// All module-aligned sizes within the limits of the configuration, largest area first.
/// Sizes with equal area are ordered by descending gable length.
/// Only bay counts that can satisfy the side and area limits are enumerated, so the work is bounded
/// by the area cap rather than by the maximum side length.
pub fn candidate_sizes(config: &PlanConfig) -> Vec<CandidateSize> {
    let (bw, bh) = (config.block_width, config.block_height);
    let min_bays = |module: f64| {
        ((config.min_side_length - LIMIT_TOLERANCE) / module)
            .ceil()
            .max(1.0) as usize
    };
    let max_bays = |module: f64| (config.max_side_length / module + LIMIT_TOLERANCE).floor() as usize;
    //largest number of bays of `module` that fits the area cap next to a side of `other_side` meters
    let max_bays_in_area = |module: f64, other_side: f64| {
        ((config.max_structure_area + LIMIT_TOLERANCE) / (module * other_side) + LIMIT_TOLERANCE)
            .floor() as usize
    };

    let min_gutter_bays = min_bays(bh);
    let max_gable_bays = max_bays(bw).min(max_bays_in_area(bw, min_gutter_bays as f64 * bh));

    let sizes = (min_bays(bw)..=max_gable_bays)
        .flat_map(|n_gable| {
            let gable = n_gable as f64 * bw;
            let max_gutter_bays = max_bays(bh).min(max_bays_in_area(bh, gable));
            (min_gutter_bays..=max_gutter_bays)
                .map(move |n_gutter| CandidateSize::new(gable, n_gutter as f64 * bh))
        })
        .filter(|s| size_within_limits(s, config))
        .sorted_by(|a, b| {
            b.area()
                .total_cmp(&a.area())
                .then(b.gable.total_cmp(&a.gable))
        })
        .collect_vec();

    debug!(
        "[SIZES] {} candidate sizes, largest: {:?}, smallest: {:?}",
        sizes.len(),
        sizes.first(),
        sizes.last()
    );

    sizes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimum_blocks_filters_small_sizes() {
        let config = PlanConfig {
            min_blocks_per_structure: Some(4),
            ..PlanConfig::default()
        };
        let sizes = candidate_sizes(&config);
        assert!(sizes.iter().all(|s| s.n_blocks(8.0, 4.0) >= 4));
        assert!(!sizes.contains(&CandidateSize::new(8.0, 12.0)));
        assert!(sizes.contains(&CandidateSize::new(16.0, 8.0)));
    }

    #[test]
    fn module_larger_than_max_side_yields_nothing() {
        let config = PlanConfig {
            block_width: 120.0,
            ..PlanConfig::default()
        };
        assert!(candidate_sizes(&config).is_empty());
    }

    #[test]
    fn enumeration_matches_full_product() {
        let config = PlanConfig {
            min_side_length: 12.0,
            ..PlanConfig::default()
        };
        let (bw, bh) = (config.block_width, config.block_height);
        let reference = (1..=20)
            .cartesian_product(1..=40)
            .map(|(g, u)| CandidateSize::new(g as f64 * bw, u as f64 * bh))
            .filter(|s| size_within_limits(s, &config))
            .sorted_by(|a, b| b.area().total_cmp(&a.area()).then(b.gable.total_cmp(&a.gable)))
            .collect_vec();
        assert!(!reference.is_empty());
        assert_eq!(candidate_sizes(&config), reference);
    }

    #[test]
    fn huge_side_limit_stays_bounded_by_area() {
        let config = PlanConfig {
            max_side_length: 200_000.0,
            ..PlanConfig::default()
        };
        let start = std::time::Instant::now();
        let sizes = candidate_sizes(&config);
        assert!(start.elapsed().as_secs_f64() < 1.0);
        assert!(!sizes.is_empty());
        assert!(sizes.iter().all(|s| size_within_limits(s, &config)));
        //a single row of blocks is the longest structure the area cap allows
        let longest = sizes.iter().map(|s| s.gable).fold(0.0, f64::max);
        assert_eq!(longest, (10_000.0_f64 / 4.0 / 8.0).floor() * 8.0);
    }
}
