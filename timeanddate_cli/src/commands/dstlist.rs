use anyhow::Result;
use clap::Args;
use timeanddate_api::Client;

use crate::output::{print_dst_entries, OutputFormat};

#[derive(Args)]
pub struct DstlistArgs {
    /// Filter by ISO-3166-1 alpha-2 country code (e.g. no, de, us)
    #[arg(long)]
    pub country: Option<String>,

    /// Filter by year (defaults to the current year)
    #[arg(long)]
    pub year: Option<i32>,

    /// Include the individual time-change events within the year
    #[arg(long)]
    pub time_changes: bool,

    /// Also list countries that do not observe DST
    #[arg(long)]
    pub all_countries: bool,

    /// Skip the per-entry place listing
    #[arg(long)]
    pub no_places: bool,
}

pub async fn run(args: &DstlistArgs, mut client: Client, format: &OutputFormat) -> Result<()> {
    client.set_include_time_changes(args.time_changes);
    client.set_include_only_dst_countries(!args.all_countries);
    client.set_include_places(!args.no_places);

    let entries = match (&args.country, args.year) {
        (Some(country), Some(year)) => {
            client
                .get_daylight_saving_time_for_country_and_year(country, year)
                .await?
        }
        (Some(country), None) => client.get_daylight_saving_time_for_country(country).await?,
        (None, Some(year)) => client.get_daylight_saving_time_for_year(year).await?,
        (None, None) => client.get_daylight_saving_time().await?,
    };

    print_dst_entries(&entries, format)
}
