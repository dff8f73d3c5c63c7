//! matter.online Metadata Extractor Library
//!
//! This library turns matter.online pages (tracks, albums, playlists, artist
//! profiles and the logged-in user's library) into flat metadata records that a
//! generic media downloader can consume. The platform answers with JSON:API
//! style documents; the extractor rebuilds tracks from the side-loaded
//! resources of each response and orders playlists by their tracklist
//! positions.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration, credentials and environment variables
//! - `error` - The `MatterError` type
//! - `matter` - matter.online API client and extractors
//! - `types` - Raw API resources and extracted records
//! - `utils` - Date normalization helpers
//!
//! # Example
//!
//! ```
//! use matterdl::{config, matter};
//!
//! #[tokio::main]
//! async fn main() -> matterdl::Res<()> {
//!     config::load_env().await?;
//!     let session = matter::Session::login(
//!         matter::HttpFetcher::new()?,
//!         &config::EnvCredentials,
//!         config::Endpoints::from_env(),
//!     )
//!     .await?;
//!     let record = matter::extract(&session, "https://app.matter.online/tracks/3079").await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod matter;
pub mod types;
pub mod utils;

pub use error::MatterError;

/// A convenient Result type alias for operations that may fail.
///
/// Every fallible operation of the extractor reports a [`MatterError`], so
/// callers can tell a missing login apart from a failed request or a broken
/// response.
///
/// # Example
///
/// ```
/// use matterdl::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, MatterError>;

/// Prints an informational message with a blue bullet point.
///
/// Output goes to stderr so that extracted JSON on stdout stays clean.
///
/// # Example
///
/// ```
/// info!("Logging in");
/// info!("{}: Downloading info JSON", track_id);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Logged in as {}", email);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only used by the binary for fatal errors; library code returns
/// [`MatterError`] instead.
///
/// # Example
///
/// ```
/// error!("Extraction failed: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("No .env file found, using process environment only");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
