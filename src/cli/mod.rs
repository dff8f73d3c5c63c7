//! # CLI Module
//!
//! Command implementations for the `matterdl` binary. Each command logs in
//! through [`crate::matter::Session`], runs one extraction and reports the
//! outcome with the crate's logging macros.
//!
//! ## Commands
//!
//! - [`extract`] - Extracts a track, album, playlist, artist or library URL and
//!   prints the record as JSON or as a table of entries
//! - [`login`] - Checks that the configured account can log in
//!
//! ## Credentials
//!
//! Credentials given on the command line win over `MATTER_EMAIL` and
//! `MATTER_PASSWORD` from the environment or the `.env` file. Without either,
//! commands stop before any request is made.
//!
//! ## Usage Patterns
//!
//! ```bash
//! matterdl login
//! matterdl extract https://app.matter.online/tracks/3079
//! matterdl extract https://app.matter.online/albums/296 --table
//! matterdl extract https://app.matter.online/artists/@acounta/albums
//! ```

mod extract;
mod login;

pub use extract::extract;
pub use login::login;

use crate::{
    Res,
    config::{self, Credentials, EnvCredentials},
    matter::{HttpFetcher, Session},
};

/// Logs in with the explicit account if given, otherwise with the environment.
pub(crate) async fn open_session(credentials: Option<Credentials>) -> Res<Session<HttpFetcher>> {
    let fetcher = HttpFetcher::new()?;
    let endpoints = config::Endpoints::from_env();

    match credentials {
        Some(_) => Session::login(fetcher, &credentials, endpoints).await,
        None => Session::login(fetcher, &EnvCredentials, endpoints).await,
    }
}
