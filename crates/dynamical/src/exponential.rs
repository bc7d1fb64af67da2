//! Exponential decay towards an attractor: `xd = -alpha (x - x_attr) / tau`.

use ndarray::{Array1, Array2};

use primo_object_json::{DecodeError, FromObject, ObjectNode, ObjectValue, ToObject};

use crate::system::DynamicalSystem;

#[derive(Debug, Clone, PartialEq)]
pub struct ExponentialSystem {
    tau: f64,
    initial_state: Array1<f64>,
    attractor_state: Array1<f64>,
    alpha: f64,
}

impl ExponentialSystem {
    pub fn new(
        tau: f64,
        initial_state: Array1<f64>,
        attractor_state: Array1<f64>,
        alpha: f64,
    ) -> Self {
        assert_eq!(initial_state.len(), attractor_state.len());
        Self {
            tau,
            initial_state,
            attractor_state,
            alpha,
        }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Closed-form states and rates at the given times.
    ///
    /// Returns `(xs, xds)`, both of shape `ts.len() × dim`.
    pub fn analytical_solution(&self, ts: &Array1<f64>) -> (Array2<f64>, Array2<f64>) {
        let dim = self.initial_state.len();
        let mut xs = Array2::zeros((ts.len(), dim));
        let mut xds = Array2::zeros((ts.len(), dim));

        let val_range = &self.initial_state - &self.attractor_state;
        for (i, &t) in ts.iter().enumerate() {
            let exp_term = (-self.alpha * t / self.tau).exp();
            let pos = &self.attractor_state + &(&val_range * exp_term);
            let vel = &val_range * (-(self.alpha / self.tau) * exp_term);
            xs.row_mut(i).assign(&pos);
            xds.row_mut(i).assign(&vel);
        }
        (xs, xds)
    }
}

impl DynamicalSystem for ExponentialSystem {
    fn tau(&self) -> f64 {
        self.tau
    }

    fn dim(&self) -> usize {
        self.initial_state.len()
    }

    fn initial_state(&self) -> &Array1<f64> {
        &self.initial_state
    }

    fn attractor_state(&self) -> &Array1<f64> {
        &self.attractor_state
    }

    fn differential_equation(&self, x: &Array1<f64>) -> Array1<f64> {
        (&self.attractor_state - x) * (self.alpha / self.tau)
    }
}

impl ToObject for ExponentialSystem {
    fn class_name(&self) -> &'static str {
        "ExponentialSystem"
    }

    fn fields(&self) -> Vec<(&'static str, ObjectValue)> {
        vec![
            ("tau", self.tau.into()),
            ("initial_state", self.initial_state.clone().into()),
            ("attractor_state", self.attractor_state.clone().into()),
            ("alpha", self.alpha.into()),
        ]
    }
}

impl FromObject for ExponentialSystem {
    fn from_node(node: &ObjectNode) -> Result<Self, DecodeError> {
        node.expect_class("ExponentialSystem")?;
        Ok(Self::new(
            node.float_field("tau")?,
            node.array1_field("initial_state")?,
            node.array1_field("attractor_state")?,
            node.float_field("alpha")?,
        ))
    }
}
