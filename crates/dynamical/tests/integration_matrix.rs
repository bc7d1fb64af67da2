use ndarray::array;
use primo_dynamical::{
    DynamicalSystem, ExponentialSystem, FunctionApproximatorRBFN, ModelParametersRBFN,
    SpringDamperSystem,
};

#[test]
fn exponential_system_converges_to_attractor() {
    let system = ExponentialSystem::new(1.0, array![0.0, 1.0], array![1.0, 0.0], 6.0);

    let (mut x, _) = system.integrate_start();
    let dt = 0.01;
    for _ in 0..1000 {
        let (x_updated, _) = system.integrate_step_euler(dt, &x);
        x = x_updated;
    }

    for (value, target) in x.iter().zip(system.attractor_state().iter()) {
        assert!((value - target).abs() < 1e-3, "{value} != {target}");
    }
}

#[test]
fn runge_kutta_matches_the_analytical_solution() {
    let system = ExponentialSystem::new(0.6, array![0.5], array![1.5], 5.0);

    let dt = 0.001;
    let (mut x, _) = system.integrate_start();
    for _ in 0..1000 {
        let (x_updated, _) = system.integrate_step_runge_kutta(dt, &x);
        x = x_updated;
    }

    let (xs, xds) = system.analytical_solution(&array![1.0]);
    assert!((x[0] - xs[[0, 0]]).abs() < 1e-9);

    // Rates agree too: xd at t=1 equals the differential equation there.
    let xd = system.differential_equation(&x);
    assert!((xd[0] - xds[[0, 0]]).abs() < 1e-6);
}

#[test]
fn analytical_solution_starts_at_the_initial_state() {
    let system = ExponentialSystem::new(0.6, array![0.5, 1.0], array![1.5, 0.0], 5.0);
    let (xs, _) = system.analytical_solution(&array![0.0, 1.0, 2.0]);
    assert_eq!(xs.nrows(), 3);
    assert_eq!(xs.row(0), array![0.5, 1.0]);
}

#[test]
fn spring_damper_starts_with_zero_velocity() {
    let system = SpringDamperSystem::critically_damped(1.0, array![0.3], array![1.0], 10.0, 1.0);
    let (x, _) = system.integrate_start();
    // [y z]: position from the initial state, velocity padded with zero.
    assert_eq!(x, array![0.3, 0.0]);
}

#[test]
fn critically_damped_spring_settles_on_the_attractor() {
    let system = SpringDamperSystem::critically_damped(1.0, array![0.0], array![1.0], 10.0, 1.0);
    assert_eq!(system.spring_constant(), 25.0);

    let (mut x, _) = system.integrate_start();
    let dt = 0.005;
    for _ in 0..2000 {
        let (x_updated, _) = system.integrate_step_runge_kutta(dt, &x);
        x = x_updated;
    }

    assert!((x[0] - 1.0).abs() < 1e-4, "y = {}", x[0]);
    assert!(x[1].abs() < 1e-4, "z = {}", x[1]);
}

#[test]
fn rbfn_predicts_the_weight_at_a_kernel_center() {
    let approximator = FunctionApproximatorRBFN::new(ModelParametersRBFN::new(
        array![[0.0]],
        array![[0.1]],
        array![2.0],
    ));

    let at_center = approximator.predict(&array![[0.0]]);
    assert!((at_center[0] - 2.0).abs() < 1e-12);

    let far_away = approximator.predict(&array![[100.0]]);
    assert!(far_away[0].abs() < 1e-12);
}

#[test]
fn rbfn_activations_have_one_column_per_kernel() {
    let params = ModelParametersRBFN::new(
        array![[0.0, 0.0], [1.0, 1.0], [2.0, 0.0]],
        array![[0.5, 0.5], [0.5, 0.5], [0.5, 0.5]],
        array![1.0, 1.0, 1.0],
    );

    let inputs = array![[0.0, 0.0], [1.0, 1.0]];
    let activations = params.kernel_activations(&inputs);
    assert_eq!(activations.dim(), (2, 3));

    // Each input sits on one of the centers, so that kernel fires at 1.
    assert!((activations[[0, 0]] - 1.0).abs() < 1e-12);
    assert!((activations[[1, 1]] - 1.0).abs() < 1e-12);
}
