//! Retrieves the historical weather for a short track near Boulder, CO.
//!
//! Needs a NOAA API token in `NOAA_TOKEN`.

use chrono::NaiveDate;
use track_climate::{
    HistoricalRetriever, NoaaClient, RetrievalStage, Track, TrackClimateError, TrackPoint,
    WeatherRecord,
};

#[tokio::main]
async fn main() -> Result<(), TrackClimateError> {
    // --- Setup ---
    let client = NoaaClient::from_env()?;
    let retriever = HistoricalRetriever::new(client);

    let start_time = NaiveDate::from_ymd_opt(2023, 7, 14)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap();
    let track = Track::new(
        vec![
            TrackPoint::new(40.0150, -105.2705),
            TrackPoint::new(40.0583, -105.2100),
            TrackPoint::new(40.1672, -105.1019),
        ],
        start_time,
    );

    // --- Retrieval ---
    let on_progress = |stage: RetrievalStage| println!("[{:>3}%] {}", stage.percent(), stage);
    let weather = retriever
        .retrieve()
        .track(&track)
        .on_progress(&on_progress)
        .call()
        .await?;

    // --- Output ---
    match &weather.summaries_station {
        Some(station) => {
            println!(
                "\nDaily summaries from {} ({}), {} km from the start:",
                station.name, station.id, station.distance_from_start
            );
            for record in &weather.past_daily_summaries {
                print_record(record);
            }
        }
        None => println!("\nNo daily summaries found."),
    }

    match (&weather.normals_station, &weather.normals_daily) {
        (Some(station), Some(daily)) => {
            println!(
                "\nNormals from {} ({}), {} km from the start:",
                station.name, station.id, station.distance_from_start
            );
            print_record(daily);
            if let Some(monthly) = &weather.normals_monthly {
                print_record(monthly);
            }
        }
        _ => println!("\nNo climate normals found."),
    }

    Ok(())
}

fn print_record(record: &WeatherRecord) {
    let show = |value: &Option<String>| value.as_deref().unwrap_or("-").to_string();
    println!(
        "  {:<10}  max {:>5} °C  min {:>5} °C  avg {:>5} °C  prcp {:>5} mm",
        record
            .date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "normal".to_string()),
        show(&record.temperature_max),
        show(&record.temperature_min),
        show(&record.temperature_average),
        show(&record.precipitation),
    );
}
