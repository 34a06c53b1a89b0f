use indexmap::IndexMap;

use crate::auth::Authentication;

use super::common::{flag, Query, QueryCommon};

/// The three listing toggles for the `dstlist` service.
#[derive(Clone, Copy)]
pub struct DstListOptions {
    /// Include the individual time-change events within the year.
    /// Defaults to off.
    pub include_time_changes: bool,
    /// Suppress entries for locations that do not observe DST in the
    /// queried year. Defaults to on.
    pub include_only_dst_countries: bool,
    /// Include the list of places sharing each entry's DST status.
    /// Defaults to on.
    pub include_places: bool,
}

impl Default for DstListOptions {
    fn default() -> DstListOptions {
        DstListOptions {
            include_time_changes: false,
            include_only_dst_countries: true,
            include_places: true,
        }
    }
}

/// Query builder for the `dstlist` service: the listing toggles plus the
/// optional country and year filters.
#[derive(Clone, Default)]
pub struct DstListQuery {
    pub common: QueryCommon,
    pub options: DstListOptions,
    pub country: Option<String>,
    pub year: Option<i32>,
}

impl Query for DstListQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn assemble(&self, auth: &Authentication) -> IndexMap<String, String> {
        let mut args = IndexMap::new();
        for (key, value) in auth.query_pairs() {
            args.insert(key.to_string(), value.to_string());
        }
        self.common.add_args(&mut args);
        args.insert(
            "timechanges".to_string(),
            flag(self.options.include_time_changes).to_string(),
        );
        args.insert(
            "onlydst".to_string(),
            flag(self.options.include_only_dst_countries).to_string(),
        );
        args.insert(
            "listplaces".to_string(),
            flag(self.options.include_places).to_string(),
        );
        if let Some(country) = &self.country {
            args.insert("country".to_string(), country.clone());
        }
        if let Some(year) = self.year {
            args.insert("year".to_string(), year.to_string());
        }
        args
    }
}

impl DstListQuery {
    /// Restricts the query to one country (ISO-3166-1 alpha-2 code).
    pub fn with_country(mut self, country: &str) -> Self {
        self.country = Some(country.to_string());
        self
    }

    /// Restricts the query to one year.
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Toggles the time-change event listing.
    pub fn with_time_changes(mut self, include: bool) -> Self {
        self.options.include_time_changes = include;
        self
    }

    /// Toggles suppression of entries that do not observe DST.
    pub fn with_only_dst_countries(mut self, include: bool) -> Self {
        self.options.include_only_dst_countries = include;
        self
    }

    /// Toggles the per-entry place listing.
    pub fn with_places(mut self, include: bool) -> Self {
        self.options.include_places = include;
        self
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use crate::{
        query::{DstListQuery, Query},
        Authentication,
    };

    fn auth() -> Authentication {
        Authentication::new("key", "secret")
    }

    #[test]
    fn test_dstlist_defaults() {
        let args = DstListQuery::default().assemble(&auth());
        assert_eq!(args.get("accesskey").unwrap(), "key");
        assert_eq!(args.get("secretkey").unwrap(), "secret");
        assert_eq!(args.get("lang").unwrap(), "en");
        assert_eq!(args.get("version").unwrap(), "3");
        assert_eq!(args.get("out").unwrap(), "xml");
        assert_eq!(args.get("verbosetime").unwrap(), "1");
        assert_eq!(args.get("timechanges").unwrap(), "0");
        assert_eq!(args.get("onlydst").unwrap(), "1");
        assert_eq!(args.get("listplaces").unwrap(), "1");
        assert!(!args.contains_key("country"));
        assert!(!args.contains_key("year"));
    }

    #[test]
    fn test_dstlist_flags_are_numeric_strings() {
        for time_changes in [false, true] {
            for only_dst in [false, true] {
                for places in [false, true] {
                    let args = DstListQuery::default()
                        .with_time_changes(time_changes)
                        .with_only_dst_countries(only_dst)
                        .with_places(places)
                        .assemble(&auth());
                    for key in ["timechanges", "onlydst", "listplaces", "verbosetime"] {
                        let value = args.get(key).unwrap();
                        assert!(value == "0" || value == "1", "{key}={value}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_dstlist_filters() {
        let args = DstListQuery::default()
            .with_country("no")
            .with_year(2024)
            .assemble(&auth());
        assert_eq!(args.get("country").unwrap(), "no");
        assert_eq!(args.get("year").unwrap(), "2024");
    }

    #[test]
    fn test_dstlist_no_duplicate_keys_in_url() {
        let url = Url::parse("https://example.com/dstlist").unwrap();
        let url = DstListQuery::default()
            .with_country("de")
            .with_year(2024)
            .with_language("de")
            .add_to_url(&url, &auth());
        let mut seen = std::collections::HashSet::new();
        for (key, _) in url.query_pairs() {
            assert!(seen.insert(key.to_string()), "duplicate key {key}");
        }
    }

    #[test]
    fn test_dstlist_reinsert_overrides() {
        // Builder applied twice keeps a single entry with the later value.
        let args = DstListQuery::default()
            .with_language("en")
            .with_language("de")
            .assemble(&auth());
        assert_eq!(args.get("lang").unwrap(), "de");
        assert_eq!(args.iter().filter(|(k, _)| *k == "lang").count(), 1);
    }
}
