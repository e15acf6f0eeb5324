#[cfg(test)]
mod tests {
    use std::path::Path;

    use gsf::config::GSFConfig;
    use gsf::gsf_optimizer::GSFOptimizer;
    use gsf::io;
    use gsf::opt::budget::SearchBudget;
    use gsf::opt::orientation::permitted_orientations;
    use gsf::opt::sizes::candidate_sizes;
    use itertools::Itertools;
    use polyplan::entities::{PlanConfig, PlanSolution, PlanWarning, Strategy};
    use polyplan::geometry::GeometryAdapter;
    use polyplan::geometry::PlanarGeometry;
    use polyplan::geometry::geo_traits::DistanceTo;
    use polyplan::io::ext_repr::ExtPlanRequest;
    use polyplan::util::assertions;
    use test_case::test_case;

    const SEPARATION_TOLERANCE: f64 = 1e-6;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn solve(path: &str, config: GSFConfig) -> (GSFOptimizer, PlanSolution) {
        init_logger();
        let request = io::read_request(Path::new(path)).unwrap();
        let mut optimizer = GSFOptimizer::from_request(&request, config).unwrap();
        let solution = optimizer.solve().unwrap();
        (optimizer, solution)
    }

    fn assert_plan_is_feasible(optimizer: &GSFOptimizer, solution: &PlanSolution) {
        let layout = &optimizer.layout;
        let plan = &optimizer.config.plan;
        let geometry = PlanarGeometry;

        for s in solution.structures.iter() {
            assert!(
                geometry.within(&s.footprint, &layout.buildable),
                "{} exceeds the land",
                s.label
            );
            assert!(assertions::blocks_match_parent(
                s,
                (plan.block_width, plan.block_height)
            ));
            assert!(
                layout
                    .exclusions
                    .iter()
                    .all(|ez| !geometry.overlaps(&s.footprint, &ez.shape)),
                "{} intersects an exclusion zone",
                s.label
            );
        }

        for (s1, s2) in solution.structures.iter().tuple_combinations() {
            assert!(
                !geometry.overlaps(&s1.footprint, &s2.footprint),
                "{} and {} overlap",
                s1.label,
                s2.label
            );
            if plan.corridor_gap > 0.0 {
                let separation = s1.footprint.distance_to(&s2.footprint);
                assert!(
                    separation >= plan.corridor_gap - SEPARATION_TOLERANCE,
                    "{} and {} are only {separation:.3} m apart",
                    s1.label,
                    s2.label
                );
                let radius = |area: f64| (area / std::f64::consts::PI).sqrt();
                let required = (radius(s1.footprint_area) + radius(s2.footprint_area) + plan.corridor_gap)
                    * optimizer.config.corridor_tolerance;
                assert!(geometry.distance(&s1.center, &s2.center) >= required - SEPARATION_TOLERANCE);
            }
        }

        let footprint_sum: f64 = solution.structures.iter().map(|s| s.footprint_area).sum();
        assert!((solution.coverage - footprint_sum / layout.land.area).abs() < 1e-9);
        assert!(solution.coverage <= 1.0);
    }

    #[test_case("../assets/square_1ha.json"; "square_1ha")]
    #[test_case("../assets/l_shape.json"; "l_shape")]
    #[test_case("../assets/farm_with_well.json"; "farm_with_well")]
    #[test_case("../assets/equatorial_strip.json"; "equatorial_strip")]
    #[test_case("../assets/tiny_plot.json"; "tiny_plot")]
    fn plans_are_feasible(path: &str) {
        let (optimizer, solution) = solve(path, GSFConfig::default());
        assert_plan_is_feasible(&optimizer, &solution);
    }

    #[test_case(Strategy::Uniform; "uniform")]
    #[test_case(Strategy::Varied; "varied")]
    #[test_case(Strategy::Optimized; "optimized")]
    fn every_strategy_yields_a_feasible_plan(strategy: Strategy) {
        let mut config = GSFConfig::default();
        config.plan.strategy = strategy;
        let (optimizer, solution) = solve("../assets/l_shape.json", config);
        assert!(!solution.structures.is_empty());
        assert_plan_is_feasible(&optimizer, &solution);
    }

    #[test]
    fn square_hectare_gets_covered() {
        let (optimizer, solution) = solve("../assets/square_1ha.json", GSFConfig::default());
        assert!(!solution.structures.is_empty());
        assert!(solution.coverage > 0.0);
        assert!(solution.n_evaluations > 0);
        assert_eq!(solution.structures[0].label, "P1");
        assert_plan_is_feasible(&optimizer, &solution);
    }

    #[test]
    fn plot_smaller_than_a_module_stays_empty() {
        let (_, solution) = solve("../assets/tiny_plot.json", GSFConfig::default());
        assert!(solution.structures.is_empty());
        assert_eq!(solution.coverage, 0.0);
        assert_eq!(solution.warnings, vec![PlanWarning::NothingPlaced]);
    }

    #[test]
    fn two_structures_keep_the_corridor_gap() {
        let mut config = GSFConfig::default();
        config.plan.corridor_gap = 2.0;
        config.plan.max_structures = Some(2);
        config.plan.max_side_length = 40.0;
        let (optimizer, solution) = solve("../assets/equatorial_strip.json", config);

        assert_eq!(solution.structures.len(), 2);
        let (s1, s2) = (&solution.structures[0], &solution.structures[1]);
        assert!(s1.footprint.distance_to(&s2.footprint) >= 2.0 - SEPARATION_TOLERANCE);
        assert_plan_is_feasible(&optimizer, &solution);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let request = io::read_request(Path::new("../assets/farm_with_well.json")).unwrap();
        let mut optimizer = GSFOptimizer::from_request(&request, GSFConfig::default()).unwrap();
        let first = optimizer.solve().unwrap();
        let second = optimizer.solve().unwrap();

        let mut other = GSFOptimizer::from_request(&request, GSFConfig::default()).unwrap();
        let third = other.solve().unwrap();

        for sol in [&second, &third] {
            assert_eq!(first.structures.len(), sol.structures.len());
            for (a, b) in first.structures.iter().zip(sol.structures.iter()) {
                assert_eq!(a.candidate(), b.candidate());
                assert_eq!(a.label, b.label);
                assert_eq!(a.color, b.color);
            }
            assert_eq!(first.coverage, sol.coverage);
        }
    }

    #[test]
    fn expansion_never_shrinks_structures() {
        let mut config = GSFConfig::default();
        config.expansion.enabled = false;
        let (_, before) = solve("../assets/l_shape.json", config.clone());

        config.expansion.enabled = true;
        config.expansion.rounds = 3;
        let (optimizer, after) = solve("../assets/l_shape.json", config);

        assert_eq!(before.structures.len(), after.structures.len());
        for (b, a) in before.structures.iter().zip(after.structures.iter()) {
            assert_eq!(b.center, a.center);
            assert_eq!(b.rotation, a.rotation);
            assert!(a.inner_area >= b.inner_area);
        }
        assert!(after.total_inner_area >= before.total_inner_area);
        assert_plan_is_feasible(&optimizer, &after);
    }

    #[test]
    fn exhausted_budget_returns_partial_plan() {
        let mut config = GSFConfig::default();
        config.budget = SearchBudget {
            max_evaluations: Some(10),
            time_limit_secs: None,
        };
        let (optimizer, solution) = solve("../assets/square_1ha.json", config);
        assert!(solution.n_evaluations <= 10);
        assert_plan_is_feasible(&optimizer, &solution);
    }

    #[test]
    fn boundary_setback_is_respected() {
        let mut config = GSFConfig::default();
        config.plan.boundary_setback = 6.0;
        let (optimizer, solution) = solve("../assets/square_1ha.json", config);
        assert!(!solution.structures.is_empty());
        for s in solution.structures.iter() {
            let clearance = optimizer
                .layout
                .land
                .shape
                .edge_iter()
                .flat_map(|e| s.footprint.vertices.iter().map(move |v| e.distance_to(v)))
                .fold(f64::INFINITY, f64::min);
            assert!(clearance >= 6.0 - 1e-6, "{} is {clearance:.3} m from the boundary", s.label);
        }
    }

    #[test]
    fn embedded_request_config_replaces_default() {
        init_logger();
        let mut request: ExtPlanRequest =
            io::read_request(Path::new("../assets/square_1ha.json")).unwrap();
        request.config = Some(PlanConfig {
            strategy: Strategy::Uniform,
            max_structures: Some(1),
            ..PlanConfig::default()
        });
        let mut optimizer = GSFOptimizer::from_request(&request, GSFConfig::default()).unwrap();
        let solution = optimizer.solve().unwrap();
        assert_eq!(solution.structures.len(), 1);
        assert_eq!(solution.structures[0].rotation, 90.0);
    }

    #[test_case(0; "no fillers")]
    #[test_case(3; "three fillers")]
    fn two_pass_places_large_structures_first(max_gap_fillers: usize) {
        let mut config = GSFConfig::default();
        config.plan.max_structure_area = 400.0;
        config.plan.max_side_length = 40.0;
        config.expansion.enabled = false;
        config.two_pass.max_gap_fillers = max_gap_fillers;
        let largest = candidate_sizes(&config.plan)[0].area();
        let threshold = config.two_pass.large_size_fraction * largest;
        let (optimizer, solution) = solve("../assets/square_1ha.json", config);

        //the hectare holds many times the largest footprint, so both passes run
        let (first_pass, fillers) = solution
            .structures
            .iter()
            .partition::<Vec<_>, _>(|s| s.inner_area >= threshold - 1e-9);
        assert!(first_pass.len() > 1);
        assert!(fillers.len() <= max_gap_fillers);
        assert!(
            solution.structures[..first_pass.len()]
                .iter()
                .all(|s| s.inner_area >= threshold - 1e-9),
            "a gap filler was placed before a large structure"
        );
        assert_plan_is_feasible(&optimizer, &solution);
    }

    #[test]
    fn expansion_stops_at_the_evaluation_budget() {
        let mut config = GSFConfig::default();
        config.expansion.enabled = false;
        config.budget.time_limit_secs = None;
        let (_, searched) = solve("../assets/square_1ha.json", config.clone());

        let max_evaluations = searched.n_evaluations + 3;
        config.expansion.enabled = true;
        config.budget.max_evaluations = Some(max_evaluations);
        let (optimizer, solution) = solve("../assets/square_1ha.json", config);

        assert_eq!(solution.structures.len(), searched.structures.len());
        assert!(solution.n_evaluations <= max_evaluations);
        assert_plan_is_feasible(&optimizer, &solution);
    }

    #[test_case(0.0, 18; "equator")]
    #[test_case(0.5, 18; "near equator")]
    #[test_case(90.0, 1; "north pole")]
    #[test_case(-90.0, 1; "south pole")]
    #[test_case(80.0, 1; "arctic")]
    fn orientation_count_follows_latitude(latitude: f64, expected: usize) {
        let orientations = permitted_orientations(latitude, &PlanConfig::default()).unwrap();
        assert_eq!(orientations.len(), expected);
        if expected == 1 {
            assert_eq!(orientations, vec![90.0]);
        }
    }

    #[test]
    fn orientations_lie_within_solar_band() {
        let latitude: f64 = 12.97;
        let orientations = permitted_orientations(latitude, &PlanConfig::default()).unwrap();
        let cos_dev = 23.5_f64.to_radians().sin() / latitude.to_radians().cos();
        let deviation = cos_dev.acos().to_degrees();

        assert!(orientations.windows(2).all(|w| w[0] < w[1]));
        assert!((orientations[0] - (90.0 - deviation)).abs() < 1e-9);
        assert!((orientations.last().unwrap() - (90.0 + deviation)).abs() < 1e-9);
        assert!(orientations.contains(&90.0));
    }

    #[test]
    fn orientation_strategies() {
        let mut config = PlanConfig {
            strategy: Strategy::Uniform,
            ..PlanConfig::default()
        };
        assert_eq!(permitted_orientations(30.0, &config).unwrap(), vec![90.0]);

        config.strategy = Strategy::Varied;
        let varied = permitted_orientations(30.0, &config).unwrap();
        assert_eq!(varied.len(), 2);
        assert_eq!(varied[0], 90.0);
        assert!(varied[1] < 90.0);

        config.solar_orientation = false;
        let sweep = permitted_orientations(30.0, &config).unwrap();
        assert_eq!(sweep, (0..18).map(|i| i as f64 * 10.0).collect_vec());

        assert!(permitted_orientations(91.0, &config).is_err());
        assert!(permitted_orientations(f64::NAN, &config).is_err());
    }

    #[test_case(PlanConfig::default(); "default")]
    #[test_case(PlanConfig { max_structure_area: 500.0, ..PlanConfig::default() }; "small area cap")]
    #[test_case(PlanConfig { block_width: 6.0, block_height: 3.0, max_side_length: 30.0, ..PlanConfig::default() }; "custom modules")]
    #[test_case(PlanConfig { min_side_length: 20.0, ..PlanConfig::default() }; "minimum side")]
    fn candidate_sizes_respect_limits(config: PlanConfig) {
        let sizes = candidate_sizes(&config);
        assert!(!sizes.is_empty());
        for s in sizes.iter() {
            assert_eq!(s.gable % config.block_width, 0.0);
            assert_eq!(s.gutter % config.block_height, 0.0);
            assert!(s.area() <= config.max_structure_area);
            assert!(s.gable <= config.max_side_length && s.gutter <= config.max_side_length);
            assert!(s.gable >= config.min_side_length && s.gutter >= config.min_side_length);
        }
        assert!(sizes.windows(2).all(|w| w[0].area() >= w[1].area()));
    }
}
