//! CSV table loading for patoweb
//!
//! The dashboard's two sources (cash-flow table, parameters table) are
//! plain CSV files with a header row. This crate owns reading them; the
//! meaning of the columns lives in patoweb-core.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

pub mod error;
pub mod reader;
pub mod records;

pub use error::LoadError;
pub use reader::{parse_flow, parse_parameters};
pub use records::{FlowRecord, ParameterRecord};

/// Loader reference type
pub type LoaderRef = Arc<dyn TableLoader>;

/// Trait for table loaders
///
/// The CSV-file implementation below is the only one shipped; the trait is
/// the seam where a remote source (e.g. a published spreadsheet URL) would
/// plug in.
#[async_trait]
pub trait TableLoader: Send + Sync {
    /// Load the cash-flow table
    async fn load_flow(&self, path: PathBuf) -> Result<Vec<FlowRecord>, LoadError>;

    /// Load the parameters table
    async fn load_parameters(&self, path: PathBuf) -> Result<Vec<ParameterRecord>, LoadError>;
}

/// Default loader: reads CSV files from the local filesystem
#[derive(Debug, Default)]
pub struct CsvTableLoader;

#[async_trait]
impl TableLoader for CsvTableLoader {
    async fn load_flow(&self, path: PathBuf) -> Result<Vec<FlowRecord>, LoadError> {
        let content = tokio::fs::read_to_string(&path).await?;
        parse_flow(&content)
    }

    async fn load_parameters(&self, path: PathBuf) -> Result<Vec<ParameterRecord>, LoadError> {
        let content = tokio::fs::read_to_string(&path).await?;
        parse_parameters(&content)
    }
}
