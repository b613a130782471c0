//! Error types for patoweb-loader

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Table error in {table}: {message}")]
    TableError { table: String, message: String },

    #[error("IO error")]
    IoError(#[from] io::Error),
}
