//! Python bindings for window functions

use numpy::PyArray1;
use pyo3::prelude::*;

use crate::windows::{generate_window, WindowType};

/// Window type enum exposed to Python
#[pyclass(name = "WindowType")]
#[derive(Clone)]
pub enum PyWindowType {
    Hann,
    Hamming,
    Blackman,
    Rectangular,
}

impl From<PyWindowType> for WindowType {
    fn from(py_win: PyWindowType) -> Self {
        match py_win {
            PyWindowType::Hann => WindowType::Hann,
            PyWindowType::Hamming => WindowType::Hamming,
            PyWindowType::Blackman => WindowType::Blackman,
            PyWindowType::Rectangular => WindowType::Rectangular,
        }
    }
}

/// Hann window of the given length
#[pyfunction]
pub fn hann<'py>(py: Python<'py>, length: usize) -> &'py PyArray1<f32> {
    PyArray1::from_vec(py, generate_window(WindowType::Hann, length))
}

/// Hamming window of the given length
#[pyfunction]
pub fn hamming<'py>(py: Python<'py>, length: usize) -> &'py PyArray1<f32> {
    PyArray1::from_vec(py, generate_window(WindowType::Hamming, length))
}

/// Blackman window of the given length
#[pyfunction]
pub fn blackman<'py>(py: Python<'py>, length: usize) -> &'py PyArray1<f32> {
    PyArray1::from_vec(py, generate_window(WindowType::Blackman, length))
}
