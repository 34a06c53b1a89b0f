//! Shared query infrastructure: the [`Query`] trait, the [`QueryCommon`]
//! service settings, and [`OutputFormat`].

use indexmap::IndexMap;
use url::Url;

use crate::auth::Authentication;

/// Trait implemented by all query builders. Provides argument assembly, URL
/// serialization, and shared builder methods for the ambient service
/// settings every endpoint inherits.
pub trait Query {
    /// Assembles the full ordered argument map for this query, credentials
    /// first. Re-inserting a key overwrites its value in place, so the map
    /// never carries a duplicate.
    fn assemble(&self, auth: &Authentication) -> IndexMap<String, String>;

    /// Returns a mutable reference to the common service settings.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Appends the assembled arguments to the given URL, returning the
    /// modified URL.
    fn add_to_url(&self, url: &Url, auth: &Authentication) -> Url {
        let mut url = url.clone();
        for (key, value) in self.assemble(auth) {
            url.query_pairs_mut().append_pair(&key, &value);
        }
        url
    }

    /// Sets the language for textual fields in the response.
    fn with_language(mut self, language: &str) -> Self
    where
        Self: Sized,
    {
        self.get_common().language = language.to_string();
        self
    }

    /// Sets the protocol version sent with every request.
    fn with_version(mut self, version: u32) -> Self
    where
        Self: Sized,
    {
        self.get_common().version = version;
        self
    }

    /// Sets the payload format requested from the service.
    fn with_output_format(mut self, output_format: OutputFormat) -> Self
    where
        Self: Sized,
    {
        self.get_common().output_format = output_format;
        self
    }
}

/// Payload format requested from the service.
#[derive(Clone, Copy, Default)]
pub enum OutputFormat {
    /// XML payload. This is the default and the only format the mapper reads.
    #[default]
    Xml,
    /// JSON payload.
    Json,
}
impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                OutputFormat::Xml => "xml",
                OutputFormat::Json => "json",
            }
        )?;
        Ok(())
    }
}
/// Service settings shared by every endpoint query: language, protocol
/// version, payload format, and time verbosity.
#[derive(Clone)]
pub struct QueryCommon {
    /// Language for textual fields. Defaults to "en".
    pub language: String,
    /// Protocol version sent with every request.
    pub version: u32,
    /// Payload format requested from the service.
    pub output_format: OutputFormat,
    /// Ask the service for fully spelled-out timestamps.
    pub verbose_time: bool,
}

impl Default for QueryCommon {
    fn default() -> QueryCommon {
        QueryCommon {
            language: "en".to_string(),
            version: 3,
            output_format: OutputFormat::Xml,
            verbose_time: true,
        }
    }
}

impl QueryCommon {
    /// Inserts the common service parameters into the argument map.
    pub fn add_args(&self, args: &mut IndexMap<String, String>) {
        args.insert("lang".to_string(), self.language.clone());
        args.insert("version".to_string(), self.version.to_string());
        args.insert("out".to_string(), self.output_format.to_string());
        args.insert("verbosetime".to_string(), flag(self.verbose_time).to_string());
    }
}

/// Wire encoding for boolean flags. The service takes "0"/"1"; the model
/// stays boolean-typed and the conversion lives here only.
pub(crate) fn flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}
