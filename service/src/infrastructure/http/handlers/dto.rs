use serde::Serialize;

use crate::domain::Sourced;

// Generic response envelopes shared by the list/detail handlers.

#[derive(Debug, Clone, Serialize)]
pub struct MetadataResponse {
    pub total: usize,
}

/// A merged static+dynamic feed of one content kind.
#[derive(Debug, Clone, Serialize)]
pub struct FeedResponse<T: Serialize> {
    pub data: Vec<Sourced<T>>,
    pub meta: MetadataResponse,
}

impl<T: Serialize> From<Vec<Sourced<T>>> for FeedResponse<T> {
    fn from(data: Vec<Sourced<T>>) -> Self {
        let total = data.len();
        Self {
            data,
            meta: MetadataResponse { total },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ManyResponse<T: Serialize> {
    pub data: Vec<T>,
    pub meta: MetadataResponse,
}

impl<T: Serialize> From<Vec<T>> for ManyResponse<T> {
    fn from(data: Vec<T>) -> Self {
        let total = data.len();
        Self {
            data,
            meta: MetadataResponse { total },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OneResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> From<T> for OneResponse<T> {
    fn from(data: T) -> Self {
        Self { data }
    }
}
