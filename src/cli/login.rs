use crate::{config::Credentials, error, success};

use super::open_session;

pub async fn login(credentials: Option<Credentials>) {
    match open_session(credentials).await {
        Ok(session) => success!(
            "Session ready for {}",
            session.endpoints().api_base.trim_end_matches('/')
        ),
        Err(e) => error!("{}", e),
    }
}
