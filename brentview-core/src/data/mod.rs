//! Dataset retrieval from the dashboard API.

pub mod fetcher;
pub mod http;

pub use fetcher::{DatasetFetcher, Endpoint, FetchError};
pub use http::{
    HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient, StaticHttpClient,
};
