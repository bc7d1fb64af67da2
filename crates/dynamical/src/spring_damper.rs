//! Spring-damper system: `m y_dd = -k (y - y_attr) - c y_d`.
//!
//! The state vector is `[y z]` with `z = y_d * tau`, so `dim()` is twice the
//! dimensionality of the initial state.

use ndarray::{s, Array1};

use primo_object_json::{DecodeError, FromObject, ObjectNode, ObjectValue, ToObject};

use crate::system::DynamicalSystem;

#[derive(Debug, Clone, PartialEq)]
pub struct SpringDamperSystem {
    tau: f64,
    initial_state: Array1<f64>,
    attractor_state: Array1<f64>,
    damping_coefficient: f64,
    spring_constant: f64,
    mass: f64,
}

impl SpringDamperSystem {
    pub fn new(
        tau: f64,
        initial_state: Array1<f64>,
        attractor_state: Array1<f64>,
        damping_coefficient: f64,
        spring_constant: f64,
        mass: f64,
    ) -> Self {
        assert_eq!(initial_state.len(), attractor_state.len());
        Self {
            tau,
            initial_state,
            attractor_state,
            damping_coefficient,
            spring_constant,
            mass,
        }
    }

    /// Spring constant chosen as `c^2 / 4m` so the system does not
    /// oscillate around the attractor.
    pub fn critically_damped(
        tau: f64,
        initial_state: Array1<f64>,
        attractor_state: Array1<f64>,
        damping_coefficient: f64,
        mass: f64,
    ) -> Self {
        let spring_constant = damping_coefficient * damping_coefficient / (4.0 * mass);
        Self::new(
            tau,
            initial_state,
            attractor_state,
            damping_coefficient,
            spring_constant,
            mass,
        )
    }

    pub fn damping_coefficient(&self) -> f64 {
        self.damping_coefficient
    }

    pub fn spring_constant(&self) -> f64 {
        self.spring_constant
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }
}

impl DynamicalSystem for SpringDamperSystem {
    fn tau(&self) -> f64 {
        self.tau
    }

    fn dim(&self) -> usize {
        2 * self.initial_state.len()
    }

    fn initial_state(&self) -> &Array1<f64> {
        &self.initial_state
    }

    fn attractor_state(&self) -> &Array1<f64> {
        &self.attractor_state
    }

    fn differential_equation(&self, x: &Array1<f64>) -> Array1<f64> {
        let d = self.initial_state.len();
        let y = x.slice(s![..d]).to_owned();
        let z = x.slice(s![d..]).to_owned();

        let yd = &z / self.tau;
        let zd = ((&y - &self.attractor_state) * (-self.spring_constant)
            - &z * self.damping_coefficient)
            / (self.mass * self.tau);

        let mut xd = Array1::zeros(2 * d);
        xd.slice_mut(s![..d]).assign(&yd);
        xd.slice_mut(s![d..]).assign(&zd);
        xd
    }
}

impl ToObject for SpringDamperSystem {
    fn class_name(&self) -> &'static str {
        "SpringDamperSystem"
    }

    fn fields(&self) -> Vec<(&'static str, ObjectValue)> {
        vec![
            ("tau", self.tau.into()),
            ("initial_state", self.initial_state.clone().into()),
            ("attractor_state", self.attractor_state.clone().into()),
            ("damping_coefficient", self.damping_coefficient.into()),
            ("spring_constant", self.spring_constant.into()),
            ("mass", self.mass.into()),
        ]
    }
}

impl FromObject for SpringDamperSystem {
    fn from_node(node: &ObjectNode) -> Result<Self, DecodeError> {
        node.expect_class("SpringDamperSystem")?;
        Ok(Self::new(
            node.float_field("tau")?,
            node.array1_field("initial_state")?,
            node.array1_field("attractor_state")?,
            node.float_field("damping_coefficient")?,
            node.float_field("spring_constant")?,
            node.float_field("mass")?,
        ))
    }
}
