//! Radial basis function network: Gaussian kernels, weighted sum readout.

use ndarray::{Array1, Array2};

use primo_object_json::{DecodeError, FromObject, ObjectNode, ObjectValue, ToObject};

/// Parameters of an RBFN: one kernel per row of `centers`/`widths`, one
/// readout weight per kernel.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelParametersRBFN {
    centers: Array2<f64>,
    widths: Array2<f64>,
    weights: Array1<f64>,
}

impl ModelParametersRBFN {
    pub fn new(centers: Array2<f64>, widths: Array2<f64>, weights: Array1<f64>) -> Self {
        assert_eq!(centers.dim(), widths.dim());
        assert_eq!(centers.nrows(), weights.len());
        Self {
            centers,
            widths,
            weights,
        }
    }

    pub fn n_kernels(&self) -> usize {
        self.centers.nrows()
    }

    pub fn n_dims(&self) -> usize {
        self.centers.ncols()
    }

    pub fn weights(&self) -> &Array1<f64> {
        &self.weights
    }

    /// Unnormalized Gaussian activations, `inputs.nrows() × n_kernels()`.
    pub fn kernel_activations(&self, inputs: &Array2<f64>) -> Array2<f64> {
        assert_eq!(inputs.ncols(), self.n_dims());
        Array2::from_shape_fn((inputs.nrows(), self.n_kernels()), |(i, k)| {
            let mut sq_dist = 0.0;
            for d in 0..self.n_dims() {
                let z = (inputs[[i, d]] - self.centers[[k, d]]) / self.widths[[k, d]];
                sq_dist += z * z;
            }
            (-0.5 * sq_dist).exp()
        })
    }
}

/// Function approximator wrapping trained [`ModelParametersRBFN`].
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionApproximatorRBFN {
    model_params: ModelParametersRBFN,
}

impl FunctionApproximatorRBFN {
    pub fn new(model_params: ModelParametersRBFN) -> Self {
        Self { model_params }
    }

    pub fn model_params(&self) -> &ModelParametersRBFN {
        &self.model_params
    }

    /// Predicted output for each input row: activations · weights.
    pub fn predict(&self, inputs: &Array2<f64>) -> Array1<f64> {
        self.model_params
            .kernel_activations(inputs)
            .dot(self.model_params.weights())
    }
}

impl ToObject for ModelParametersRBFN {
    fn class_name(&self) -> &'static str {
        "ModelParametersRBFN"
    }

    fn fields(&self) -> Vec<(&'static str, ObjectValue)> {
        vec![
            ("centers", self.centers.clone().into()),
            ("widths", self.widths.clone().into()),
            ("weights", self.weights.clone().into()),
        ]
    }
}

impl FromObject for ModelParametersRBFN {
    fn from_node(node: &ObjectNode) -> Result<Self, DecodeError> {
        node.expect_class("ModelParametersRBFN")?;
        Ok(Self::new(
            node.array2_field("centers")?,
            node.array2_field("widths")?,
            node.array1_field("weights")?,
        ))
    }
}

impl ToObject for FunctionApproximatorRBFN {
    fn class_name(&self) -> &'static str {
        "FunctionApproximatorRBFN"
    }

    fn fields(&self) -> Vec<(&'static str, ObjectValue)> {
        vec![("model_params", self.model_params.to_object())]
    }
}

impl FromObject for FunctionApproximatorRBFN {
    fn from_node(node: &ObjectNode) -> Result<Self, DecodeError> {
        node.expect_class("FunctionApproximatorRBFN")?;
        let params = node.object_field("model_params")?;
        Ok(Self::new(ModelParametersRBFN::from_node(params)?))
    }
}
