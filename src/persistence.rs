//! Result serialization and persistence
//!
//! Kernel matrices and Nyström factorizations are saved as JSON records so the
//! CLI can write them and inspect them later. Every file carries a `record`
//! tag naming its kind.

use crate::core::{KernelError, Orientation, Result};
use crate::kernel::Kernel;
use crate::nystrom::NystromFactorization;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Metadata attached to every saved record
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RecordMetadata {
    /// Library version used to create the record
    pub library_version: String,
    /// Display form of the kernel
    pub kernel: String,
    /// Orientation of the input observations
    pub orientation: Orientation,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
}

impl RecordMetadata {
    pub fn new(kernel: &impl fmt::Display, orientation: Orientation) -> Self {
        Self {
            library_version: env!("CARGO_PKG_VERSION").to_string(),
            kernel: kernel.to_string(),
            orientation,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Saved Gram or cross kernel matrix
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct KernelMatrixRecord {
    pub matrix: Array2<f64>,
    /// Whether the matrix was double-centered
    pub centered: bool,
    /// Whether the matrix is a cross kernel matrix of two datasets
    pub cross: bool,
    pub metadata: RecordMetadata,
}

/// Saved Nyström factorization
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NystromRecord {
    /// Landmark indices
    pub samples: Vec<usize>,
    pub eigenvalues: Array1<f64>,
    pub eigenvectors: Array2<f64>,
    /// `C V Λ^(-1/2)`, one row per observation
    pub embedding: Array2<f64>,
    pub tolerance: f64,
    pub metadata: RecordMetadata,
}

/// Any saved record, as read back from disk
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "record", rename_all = "snake_case")]
pub enum Record {
    KernelMatrix(KernelMatrixRecord),
    Nystrom(NystromRecord),
}

#[derive(Serialize)]
#[serde(tag = "record", rename_all = "snake_case")]
enum RecordRef<'a> {
    KernelMatrix(&'a KernelMatrixRecord),
    Nystrom(&'a NystromRecord),
}

fn save_json<P: AsRef<Path>>(record: RecordRef, path: P) -> Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &record)
        .map_err(|e| KernelError::SerializationError(e.to_string()))?;
    Ok(())
}

impl Record {
    /// Load a record of any kind
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let record = serde_json::from_reader(reader)
            .map_err(|e| KernelError::SerializationError(e.to_string()))?;
        Ok(record)
    }

    pub fn metadata(&self) -> &RecordMetadata {
        match self {
            Record::KernelMatrix(r) => &r.metadata,
            Record::Nystrom(r) => &r.metadata,
        }
    }

    pub fn print_summary(&self) {
        match self {
            Record::KernelMatrix(r) => r.print_summary(),
            Record::Nystrom(r) => r.print_summary(),
        }
    }
}

impl KernelMatrixRecord {
    pub fn new(
        matrix: Array2<f64>,
        kernel: &impl fmt::Display,
        orientation: Orientation,
        centered: bool,
        cross: bool,
    ) -> Self {
        Self {
            matrix,
            centered,
            cross,
            metadata: RecordMetadata::new(kernel, orientation),
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        save_json(RecordRef::KernelMatrix(self), path)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        match Record::load_from_file(path)? {
            Record::KernelMatrix(r) => Ok(r),
            Record::Nystrom(_) => Err(KernelError::SerializationError(
                "expected a kernel matrix record, found a Nystrom record".to_string(),
            )),
        }
    }

    pub fn print_summary(&self) {
        let (rows, cols) = self.matrix.dim();
        println!("=== Kernel Matrix ===");
        println!("Kernel: {}", self.metadata.kernel);
        println!("Shape: {rows}x{cols}");
        println!("Cross: {}", self.cross);
        println!("Centered: {}", self.centered);
        println!("Orientation: {}", self.metadata.orientation);
        if rows > 0 && rows == cols {
            println!("Trace: {:.6}", self.matrix.diag().sum());
        }
        println!("Library Version: {}", self.metadata.library_version);
        println!("Created: {}", self.metadata.created_at);
    }
}

impl NystromRecord {
    pub fn from_factorization<K: Kernel<f64>>(factorization: &NystromFactorization<f64, K>) -> Self {
        Self {
            samples: factorization.samples().to_vec(),
            eigenvalues: factorization.eigenvalues().clone(),
            eigenvectors: factorization.eigenvectors().clone(),
            embedding: factorization.embedding(),
            tolerance: factorization.tolerance(),
            metadata: RecordMetadata::new(factorization.kernel(), factorization.orientation()),
        }
    }

    /// Approximate Gram matrix `E Eᵀ` from the saved embedding
    pub fn approximate(&self) -> Array2<f64> {
        self.embedding.dot(&self.embedding.t())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        save_json(RecordRef::Nystrom(self), path)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        match Record::load_from_file(path)? {
            Record::Nystrom(r) => Ok(r),
            Record::KernelMatrix(_) => Err(KernelError::SerializationError(
                "expected a Nystrom record, found a kernel matrix record".to_string(),
            )),
        }
    }

    pub fn print_summary(&self) {
        println!("=== Nystrom Approximation ===");
        println!("Kernel: {}", self.metadata.kernel);
        println!("Observations: {}", self.embedding.nrows());
        println!("Landmarks: {}", self.samples.len());
        println!("Rank: {}", self.eigenvalues.len());
        println!("Tolerance: {:e}", self.tolerance);
        let largest = self.eigenvalues.iter().next();
        if let (Some(first), Some(last)) = (largest, self.eigenvalues.iter().last()) {
            println!("Eigenvalues: {first:.6} .. {last:.6}");
        }
        println!("Orientation: {}", self.metadata.orientation);
        println!("Library Version: {}", self.metadata.library_version);
        println!("Created: {}", self.metadata.created_at);
    }
}
