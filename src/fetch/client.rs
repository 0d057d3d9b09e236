use crate::error::Result;
use reqwest::{redirect, Client};

pub(crate) const HTTPS_PREFIX: &str = "https://";

/// Which underlying transport a URL is dispatched to.
///
/// Selection is a literal prefix check against `https://` and nothing
/// more: no URL parsing, no well-formedness validation. `HTTP://`,
/// `HTTPS://` (any casing other than exact lowercase), scheme-less
/// strings and foreign schemes all go down the insecure path, and
/// whatever the client then makes of them surfaces as a transport error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Transport {
    Secure,
    Insecure,
}

impl Transport {
    pub(crate) fn for_url(url: &str) -> Self {
        if url.starts_with(HTTPS_PREFIX) {
            Transport::Secure
        } else {
            Transport::Insecure
        }
    }
}

/// Build a reqwest client for the given transport.
///
/// Redirects are not followed and no overall timeout is set; both are the
/// caller's problem.
pub(crate) fn build_client_for_transport(transport: Transport) -> Result<Client> {
    let builder = Client::builder().redirect(redirect::Policy::none());

    let builder = match transport {
        Transport::Secure => builder.use_rustls_tls().https_only(true),
        Transport::Insecure => builder,
    };

    Ok(builder.build()?)
}
