//! Concrete `HttpClient` implementations.

pub mod reqwest_client;

pub use reqwest_client::{ClientConfig, ReqwestClient};
