pub mod backoff;
pub mod block;
pub mod classify;
pub mod coordinator;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod recovery;
pub mod session;
pub mod settings;

pub use backoff::RetryPolicy;
pub use block::is_blocked;
pub use classify::{classify, is_operator_name, OPERATOR_NAME};
pub use coordinator::Resolver;
pub use error::ScraperError;
pub use extract::{extract, extract_merchant_info};
pub use fetch::{safe_get, FetchOutcome};
pub use recovery::resolve_one;
pub use session::{Session, SessionProvider};
pub use settings::ResolverConfig;
