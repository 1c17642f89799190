use channel_insights_dataset::DatasetError;
use std::{
    io,
    path::PathBuf,
};

#[derive(thiserror::Error, Debug)]
pub enum ReporterError {
    #[error("no dataset found at {}, run `channel-insights collect` first", .0.display())]
    MissingInput(PathBuf),
    #[error(transparent)]
    Dataset(DatasetError),
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: io::Error,
    },
}

impl From<DatasetError> for ReporterError {
    fn from(err: DatasetError) -> Self {
        match err {
            DatasetError::NotFound(path) => Self::MissingInput(path),
            other => Self::Dataset(other),
        }
    }
}
