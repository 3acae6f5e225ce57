//! Infrastructure layer for configuration, transport, parsing and decoding
//!
//! Everything that touches the outside world (HTTP, files, logging setup) or
//! the site's markup lives here; services in `application` compose it.

pub mod config; // Configuration constants and persistence
pub mod http_client; // reqwest-backed transport
pub mod logging; // Logging infrastructure
pub mod parsing; // Field extraction and entity assembly
pub mod parsing_error; // Error taxonomy shared by parsing and transport
pub mod stream_decoder; // Player payload deobfuscation
pub mod transport; // Transport boundary

// Re-export commonly used items
pub use config::{AppConfig, ConfigManager, LoggingConfig, SiteConfig};
pub use http_client::{HttpClient, HttpClientConfig};
pub use logging::{get_log_directory, init_logging, init_logging_with_config};
pub use parsing::{ParseContext, ParsingConfig, ParsingError, ParsingResult};
pub use parsing_error::{StreamDecodeError, TransportError};
pub use transport::{Method, Transport, TransportRequest, TransportResponse};
