//! PyO3 bindings for Python integration

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::error::TransformError;

mod transform_bindings;
mod window_bindings;

impl From<TransformError> for PyErr {
    fn from(err: TransformError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

/// Python module definition
#[pymodule]
fn wavefft(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<transform_bindings::PyWaveFft>()?;
    m.add_class::<transform_bindings::PySpectrogram>()?;

    m.add_class::<window_bindings::PyWindowType>()?;
    m.add_function(wrap_pyfunction!(window_bindings::hann, m)?)?;
    m.add_function(wrap_pyfunction!(window_bindings::hamming, m)?)?;
    m.add_function(wrap_pyfunction!(window_bindings::blackman, m)?)?;

    Ok(())
}
