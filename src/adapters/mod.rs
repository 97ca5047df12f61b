pub mod reqwest_transport;

/// Re-export commonly used types from adapters
pub use reqwest_transport::ReqwestTransport;
