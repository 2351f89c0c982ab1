// Backend communication
// HTTP plumbing; cached data lives in the stores

pub mod api_client;
pub mod transport;

pub use api_client::ApiClient;
pub use transport::{HttpTransport, ReqwestTransport};
