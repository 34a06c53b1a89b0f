//! HTTP client for the timeanddate.com Services API.

use std::time::Duration;

use url::Url;

use crate::{
    auth::Authentication,
    parse,
    query::{DstListOptions, DstListQuery, Query},
    types::DstEntry,
    validate, Error,
};

/// User agent sent with every request.
const USER_AGENT: &str = concat!("timeanddate-api-rs/", env!("CARGO_PKG_VERSION"));

/// Client for the timeanddate.com Services API, specialized for the
/// `dstlist` endpoint.
///
/// The listing toggles can be changed between calls; they apply to every
/// subsequent retrieval. Each request builds a fresh `reqwest::Client` with
/// a 30-second timeout, so the connection lives and dies within one call.
pub struct Client {
    /// Base URL for the API. Defaults to `https://api.xmltime.com`.
    base_api_url: String,
    auth: Authentication,
    options: DstListOptions,
}

impl Client {
    /// Creates a new client pointing at the production service endpoint.
    pub fn new(auth: Authentication) -> Self {
        Self::with_base_url("https://api.xmltime.com", auth)
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, auth: Authentication) -> Self {
        Self {
            base_api_url: base_url.to_string(),
            auth,
            options: DstListOptions::default(),
        }
    }

    /// Toggles the time-change event listing for subsequent calls.
    /// Defaults to off.
    pub fn set_include_time_changes(&mut self, include: bool) {
        self.options.include_time_changes = include;
    }

    /// Toggles suppression of entries that do not observe DST for
    /// subsequent calls. Defaults to on.
    pub fn set_include_only_dst_countries(&mut self, include: bool) {
        self.options.include_only_dst_countries = include;
    }

    /// Toggles the per-entry place listing for subsequent calls.
    /// Defaults to on.
    pub fn set_include_places(&mut self, include: bool) {
        self.options.include_places = include;
    }

    /// Fetches DST information for all countries for the current year.
    pub async fn get_daylight_saving_time(&self) -> Result<Vec<DstEntry>, Error> {
        self.retrieve_dst_list(self.base_query()).await
    }

    /// Fetches DST information for one country (ISO-3166-1 alpha-2 code).
    ///
    /// Forces the only-DST-countries filter off for this call, so the answer
    /// is explicit even when the country does not observe DST.
    pub async fn get_daylight_saving_time_for_country(
        &self,
        country_code: &str,
    ) -> Result<Vec<DstEntry>, Error> {
        if country_code.is_empty() {
            return Err(Error::InvalidArgument(
                "country code must not be empty".to_string(),
            ));
        }
        let mut query = self.base_query().with_country(country_code);
        query.options.include_only_dst_countries = false;
        self.retrieve_dst_list(query).await
    }

    /// Fetches DST information for all countries for the given year.
    ///
    /// The only-DST-countries filter keeps its configured value here; only
    /// the country-filtering calls force it off.
    pub async fn get_daylight_saving_time_for_year(
        &self,
        year: i32,
    ) -> Result<Vec<DstEntry>, Error> {
        if year <= 0 {
            return Err(Error::InvalidArgument(format!(
                "year must be positive, got {year}"
            )));
        }
        self.retrieve_dst_list(self.base_query().with_year(year))
            .await
    }

    /// Fetches DST information for one country and year. A partial filter
    /// is accepted; the call is rejected only when both parts are
    /// missing/invalid. Forces the only-DST-countries filter off.
    pub async fn get_daylight_saving_time_for_country_and_year(
        &self,
        country_code: &str,
        year: i32,
    ) -> Result<Vec<DstEntry>, Error> {
        if country_code.is_empty() && year <= 0 {
            return Err(Error::InvalidArgument(
                "either a country code or a positive year is required".to_string(),
            ));
        }
        let mut query = self.base_query();
        if !country_code.is_empty() {
            query = query.with_country(country_code);
        }
        if year > 0 {
            query = query.with_year(year);
        }
        query.options.include_only_dst_countries = false;
        self.retrieve_dst_list(query).await
    }

    fn base_query(&self) -> DstListQuery {
        DstListQuery {
            options: self.options,
            ..DstListQuery::default()
        }
    }

    fn get_url(&self, path: &str, query: &DstListQuery) -> Result<Url, Error> {
        let url = Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })?;
        Ok(query.add_to_url(&url, &self.auth))
    }

    async fn retrieve_dst_list(&self, query: DstListQuery) -> Result<Vec<DstEntry>, Error> {
        let url = self.get_url("/dstlist", &query)?;
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        let resp = client
            .get(url)
            .header("accept", "text/xml, application/xml")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to reach service: {}", e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        if let Err(e) = validate::check_for_errors(&body) {
            tracing::error!("Service reported an error: {}", e);
            return Err(e);
        }

        parse::parse_dst_list(&body).map_err(|e| {
            tracing::error!("Failed to parse response: {} | body: {}", e, truncate_body(&body));
            e
        })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        return body.to_string();
    }
    // Back off to a char boundary so the slice cannot split a multibyte
    // character.
    let mut cut = MAX;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...[truncated]", &body[..cut])
}
