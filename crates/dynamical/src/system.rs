//! [`DynamicalSystem`] — the shared contract for time-evolving systems.
//!
//! A system is defined by its differential equation; numerical integration
//! (Euler and 4th-order Runge-Kutta) is provided on top of it. The state
//! vector may be larger than the initial state (the spring-damper system
//! tracks `[y z]`), in which case integration starts from the initial state
//! padded with zeros.

use ndarray::{s, Array1};

use primo_object_json::{DecodeError, ObjectNode};

use crate::exponential::ExponentialSystem;
use crate::spring_damper::SpringDamperSystem;

pub trait DynamicalSystem {
    /// Time constant; larger values slow the system down.
    fn tau(&self) -> f64;

    /// Dimensionality of the full state vector.
    fn dim(&self) -> usize;

    fn initial_state(&self) -> &Array1<f64>;

    fn attractor_state(&self) -> &Array1<f64>;

    /// Rate of change `xd` at state `x`.
    fn differential_equation(&self, x: &Array1<f64>) -> Array1<f64>;

    /// Starting state and its rate of change.
    ///
    /// The initial state only covers the leading segment of the state
    /// vector; the rest starts at zero.
    fn integrate_start(&self) -> (Array1<f64>, Array1<f64>) {
        let mut x = Array1::zeros(self.dim());
        let init = self.initial_state();
        x.slice_mut(s![..init.len()]).assign(init);
        let xd = self.differential_equation(&x);
        (x, xd)
    }

    fn integrate_step_euler(&self, dt: f64, x: &Array1<f64>) -> (Array1<f64>, Array1<f64>) {
        let xd = self.differential_equation(x);
        let x_updated = x + &(&xd * dt);
        (x_updated, xd)
    }

    /// 4th-order Runge-Kutta for a 1st-order system.
    fn integrate_step_runge_kutta(
        &self,
        dt: f64,
        x: &Array1<f64>,
    ) -> (Array1<f64>, Array1<f64>) {
        let k1 = self.differential_equation(x);
        let k2 = self.differential_equation(&(x + &(&k1 * (0.5 * dt))));
        let k3 = self.differential_equation(&(x + &(&k2 * (0.5 * dt))));
        let k4 = self.differential_equation(&(x + &(&k3 * dt)));

        let combined = k1 + (k2 + k3) * 2.0 + k4;
        let x_updated = x + &(combined * (dt / 6.0));
        let xd_updated = self.differential_equation(&x_updated);
        (x_updated, xd_updated)
    }
}

/// Revive a boxed system from a decoded node, dispatching on the class tag.
pub fn dynamical_system_from_node(
    node: &ObjectNode,
) -> Result<Box<dyn DynamicalSystem>, DecodeError> {
    use primo_object_json::FromObject;

    match node.class() {
        "ExponentialSystem" => Ok(Box::new(ExponentialSystem::from_node(node)?)),
        "SpringDamperSystem" => Ok(Box::new(SpringDamperSystem::from_node(node)?)),
        other => Err(DecodeError::UnknownClass(other.to_owned())),
    }
}
