pub mod transport;

pub use transport::{DispatchOutcome, Transport, TransportError, TransportResult};
