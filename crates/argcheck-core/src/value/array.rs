//! Minimal n-dimensional array container
//!
//! The pipeline only reads an array's dtype, shape and rank; the element
//! data is carried along untouched for the wrapped function to use.
//!
//! Copyright (c) 2025 Argcheck Team
//! Licensed under the Apache-2.0 license

use super::dtype::DType;
use super::Value;
use crate::error::{Error, Result};

/// Row-major n-dimensional array
#[derive(Debug, Clone, PartialEq)]
pub struct NdArray {
    dtype: DType,
    shape: Vec<usize>,
    data: Vec<Value>,
}

impl NdArray {
    /// Create an array, checking that `data` fills `shape` exactly
    pub fn new(dtype: DType, shape: Vec<usize>, data: Vec<Value>) -> Result<Self> {
        let expected: usize = shape.iter().product();
        if expected != data.len() {
            return Err(Error::InvalidArray {
                message: format!(
                    "cannot fit {} elements into shape {:?}",
                    data.len(),
                    shape
                ),
            });
        }
        Ok(Self { dtype, shape, data })
    }

    /// One-dimensional array from a list of values
    pub fn from_vec<I, V>(dtype: DType, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let data: Vec<Value> = values.into_iter().map(Into::into).collect();
        Self {
            dtype,
            shape: vec![data.len()],
            data,
        }
    }

    /// Two-dimensional array from equal-length rows
    pub fn from_rows<R, V>(dtype: DType, rows: Vec<R>) -> Result<Self>
    where
        R: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let n_rows = rows.len();
        let mut n_cols = None;
        let mut data = Vec::new();
        for row in rows {
            let row: Vec<Value> = row.into_iter().map(Into::into).collect();
            match n_cols {
                Some(n) if n != row.len() => {
                    return Err(Error::InvalidArray {
                        message: format!("ragged rows of length {} and {}", n, row.len()),
                    });
                }
                _ => n_cols = Some(row.len()),
            }
            data.extend(row);
        }
        Self::new(dtype, vec![n_rows, n_cols.unwrap_or(0)], data)
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements
    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn data(&self) -> &[Value] {
        &self.data
    }

    /// Element at a full multi-dimensional index
    pub fn get(&self, index: &[usize]) -> Option<&Value> {
        if index.len() != self.shape.len() {
            return None;
        }
        let mut offset = 0;
        for (&i, &dim) in index.iter().zip(&self.shape) {
            if i >= dim {
                return None;
            }
            offset = offset * dim + i;
        }
        self.data.get(offset)
    }
}
