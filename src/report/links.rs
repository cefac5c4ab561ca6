use std::time::Duration;

use url::Url;

use crate::app_config::LinkConfig;
use crate::errors::AppError;

// @module: Hyperlink targets for dictionary lookups and player jumps

/// Builds the two kinds of links a report row carries
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    dictionary_url: String,
    player_base: Url,
}

impl LinkBuilder {
    pub fn new(config: &LinkConfig) -> Result<Self, AppError> {
        let player_base = player_base_url(&config.player_host, config.player_port).map_err(|e| {
            AppError::Config(format!("Invalid player address {:?}: {}", config.player_host, e))
        })?;

        Ok(Self {
            dictionary_url: config.dictionary_url.clone(),
            player_base,
        })
    }

    /// Dictionary lookup for the inflected form as it appeared in the sentence
    pub fn dictionary_url(&self, surface_form: &str) -> String {
        format!("{}{}", self.dictionary_url, encode_query_value(surface_form))
    }

    /// Local player URL seeking to `timestamp` (seconds, millisecond precision)
    pub fn player_url(&self, timestamp: Duration) -> String {
        let mut url = self.player_base.clone();
        url.query_pairs_mut()
            .append_pair("time", &format!("{:.3}", timestamp.as_secs_f64()));
        url.to_string()
    }
}

/// `http://<host>:<port>/`; bare IPv6 addresses get their brackets added
pub fn player_base_url(host: &str, port: u16) -> Result<Url, url::ParseError> {
    let host = host.trim();
    let mut url = Url::parse("http://localhost/")?;

    if host.contains(':') && !host.starts_with('[') {
        url.set_host(Some(&format!("[{}]", host)))?;
    } else {
        url.set_host(Some(host))?;
    }
    url.set_port(Some(port)).map_err(|_| url::ParseError::InvalidPort)?;

    Ok(url)
}

/// Form-urlencode a query value (spaces become `+`, umlauts are percent-encoded)
pub fn encode_query_value(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
