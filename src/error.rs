use thiserror::Error;

use crate::fetch::FetchError;
use crate::reduce::DecodeError;
use crate::store::StorageError;

#[derive(Debug, Error)]
pub enum SampleError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
