use compute::{
    ConfigurationError, ExceptionParameters, GayBerneParameters, NonbondedMethod,
    ParticleParameters, System, Vec3,
};
use forces::validate;

fn conforming(n: usize) -> GayBerneParameters {
    GayBerneParameters {
        particles: vec![ParticleParameters::spherical(0.3, 1.0); n],
        ..GayBerneParameters::default()
    }
}

fn exception(a: usize, b: usize) -> ExceptionParameters {
    ExceptionParameters {
        particle_a: a,
        particle_b: b,
        sigma: 0.3,
        epsilon: 1.0,
    }
}

#[test]
fn conforming_sets_validate_for_any_particle_count() {
    for n in [0, 1, 2, 17] {
        let result = validate(&conforming(n), &System::new(n));
        assert!(result.is_ok(), "N={n} should validate, got {result:?}");
    }
}

#[test]
fn particle_count_mismatch_is_rejected() {
    let result = validate(&conforming(3), &System::new(2));
    assert_eq!(
        result,
        Err(ConfigurationError::ParticleCountMismatch {
            declared: 3,
            system: 2
        })
    );
}

#[test]
fn negative_sigma_names_the_particle() {
    let mut params = conforming(4);
    params.particles[2].sigma = -0.1;
    let err = validate(&params, &System::new(4)).unwrap_err();
    assert_eq!(err, ConfigurationError::NegativeSigma { particle: 2 });
    let msg = err.to_string();
    assert!(msg.contains("sigma") && msg.contains('2'), "message was: {msg}");
}

#[test]
fn negative_epsilon_names_the_particle() {
    let mut params = conforming(2);
    params.particles[1].epsilon = -1.0;
    assert_eq!(
        validate(&params, &System::new(2)),
        Err(ConfigurationError::NegativeEpsilon { particle: 1 })
    );
}

#[test]
fn non_positive_radii_and_scale_factors_are_rejected() {
    let mut params = conforming(1);
    params.particles[0].ry = 0.0;
    assert_eq!(
        validate(&params, &System::new(1)),
        Err(ConfigurationError::NonPositiveRadii { particle: 0 })
    );

    let mut params = conforming(1);
    params.particles[0].ez = -2.0;
    assert_eq!(
        validate(&params, &System::new(1)),
        Err(ConfigurationError::NonPositiveScaleFactors { particle: 0 })
    );
}

#[test]
fn axis_particle_references_must_be_in_range() {
    let mut params = conforming(3);
    params.particles[0].x_particle = Some(3);
    assert_eq!(
        validate(&params, &System::new(3)),
        Err(ConfigurationError::IllegalAxisParticle {
            particle: 0,
            axis: "x",
            index: 3
        })
    );

    let mut params = conforming(3);
    params.particles[1].x_particle = Some(0);
    params.particles[1].y_particle = Some(7);
    assert_eq!(
        validate(&params, &System::new(3)),
        Err(ConfigurationError::IllegalAxisParticle {
            particle: 1,
            axis: "y",
            index: 7
        })
    );
}

#[test]
fn unset_axis_references_are_accepted() {
    let mut params = conforming(2);
    params.particles[0].x_particle = Some(1);
    params.particles[0].y_particle = None;
    assert!(validate(&params, &System::new(2)).is_ok());
}

#[test]
fn duplicate_exception_is_rejected_in_either_order() {
    let mut params = conforming(6);
    params.exceptions = vec![exception(2, 5), exception(5, 2)];
    let err = validate(&params, &System::new(6)).unwrap_err();
    assert_eq!(
        err,
        ConfigurationError::DuplicateException {
            particle_a: 5,
            particle_b: 2
        }
    );
    let msg = err.to_string();
    assert!(msg.contains('2') && msg.contains('5'), "message was: {msg}");

    let mut params = conforming(6);
    params.exceptions = vec![exception(2, 5), exception(2, 5)];
    assert!(matches!(
        validate(&params, &System::new(6)),
        Err(ConfigurationError::DuplicateException { .. })
    ));
}

#[test]
fn distinct_exception_pairs_are_accepted() {
    let mut params = conforming(4);
    params.exceptions = vec![exception(0, 1), exception(0, 2), exception(1, 2)];
    assert!(validate(&params, &System::new(4)).is_ok());
}

#[test]
fn exception_indices_must_be_in_range() {
    let mut params = conforming(2);
    params.exceptions = vec![exception(0, 2)];
    assert_eq!(
        validate(&params, &System::new(2)),
        Err(ConfigurationError::IllegalExceptionParticle {
            exception: 0,
            index: 2
        })
    );
}

#[test]
fn exception_parameter_ranges_are_checked() {
    let mut params = conforming(2);
    params.exceptions = vec![ExceptionParameters {
        sigma: -0.3,
        ..exception(0, 1)
    }];
    assert_eq!(
        validate(&params, &System::new(2)),
        Err(ConfigurationError::NegativeExceptionSigma { exception: 0 })
    );

    let mut params = conforming(2);
    params.exceptions = vec![ExceptionParameters {
        epsilon: -1.0,
        ..exception(0, 1)
    }];
    assert_eq!(
        validate(&params, &System::new(2)),
        Err(ConfigurationError::NegativeExceptionEpsilon { exception: 0 })
    );
}

#[test]
fn switching_window_is_checked_only_when_enabled() {
    let mut params = conforming(1);
    params.cutoff_distance = 1.0;
    params.switching_distance = 5.0;
    assert!(validate(&params, &System::new(1)).is_ok());

    params.use_switching_function = true;
    assert_eq!(
        validate(&params, &System::new(1)),
        Err(ConfigurationError::InvalidSwitchingDistance {
            switching: 5.0,
            cutoff: 1.0
        })
    );

    params.switching_distance = -0.1;
    assert!(matches!(
        validate(&params, &System::new(1)),
        Err(ConfigurationError::InvalidSwitchingDistance { .. })
    ));

    params.switching_distance = 0.8;
    assert!(validate(&params, &System::new(1)).is_ok());
}

fn periodic_system(edges: [f64; 3]) -> System {
    let mut system = System::new(1);
    system.set_default_periodic_box_vectors([
        Vec3::new(edges[0], 0.0, 0.0),
        Vec3::new(0.0, edges[1], 0.0),
        Vec3::new(0.0, 0.0, edges[2]),
    ]);
    system
}

#[test]
fn periodic_cutoff_at_exactly_half_the_box_is_accepted() {
    let mut params = conforming(1);
    params.method = NonbondedMethod::CutoffPeriodic;
    params.cutoff_distance = 1.0;
    let system = periodic_system([2.0, 3.0, 4.0]);
    assert!(validate(&params, &system).is_ok());
}

#[test]
fn periodic_cutoff_is_checked_against_each_axis_independently() {
    let mut params = conforming(1);
    params.method = NonbondedMethod::CutoffPeriodic;
    params.cutoff_distance = 1.0 + 1e-9;
    for edges in [[2.0, 4.0, 4.0], [4.0, 2.0, 4.0], [4.0, 4.0, 2.0]] {
        let system = periodic_system(edges);
        let result = validate(&params, &system);
        assert_eq!(
            result,
            Err(ConfigurationError::CutoffTooLarge {
                cutoff: params.cutoff_distance,
                half_box: 1.0
            }),
            "edges {edges:?} should reject the cutoff"
        );
    }
}

#[test]
fn non_periodic_methods_ignore_the_box() {
    let mut params = conforming(1);
    params.method = NonbondedMethod::CutoffNonPeriodic;
    params.cutoff_distance = 100.0;
    let system = periodic_system([2.0, 2.0, 2.0]);
    assert!(validate(&params, &system).is_ok());
}
