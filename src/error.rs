//! Error types for folder conversion.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    /// The folder holds no spreadsheet files; nothing is written.
    #[error("no spreadsheet files found in {}", folder.display())]
    NoInputFiles { folder: PathBuf },

    /// One workbook could not be read or converted.
    #[error("failed to process file {file_name}")]
    FileProcessing {
        file_name: String,
        #[source]
        source: anyhow::Error,
    },

    /// Listing the folder or writing the script failed.
    #[error("io error at {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConvertError {
    pub fn file_processing(file_name: impl Into<String>, source: anyhow::Error) -> Self {
        Self::FileProcessing {
            file_name: file_name.into(),
            source,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type ConvertResult<T> = Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(err: ConvertError) -> String {
        format!("{:#}", anyhow::Error::from(err))
    }

    #[test]
    fn file_processing_message_names_the_file_and_cause_once() {
        let err = ConvertError::file_processing(
            "Клиенты.xlsx",
            anyhow::anyhow!("corrupt archive").context("failed to open workbook"),
        );

        assert_eq!(err.to_string(), "failed to process file Клиенты.xlsx");
        assert_eq!(
            chain(err),
            "failed to process file Клиенты.xlsx: failed to open workbook: corrupt archive"
        );
    }

    #[test]
    fn io_message_prints_cause_once() {
        let err = ConvertError::io("/x", std::io::Error::other("disk full"));

        assert_eq!(chain(err), "io error at /x: disk full");
    }
}
