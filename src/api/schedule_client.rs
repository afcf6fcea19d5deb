use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::{error, info, warn};
use serde_json::Value;

use crate::cache::Cache;
use crate::config::AppConfig;
use crate::domain::{FetchProgress, GameOutcome, ScheduleEntry, SeasonMonth, SeasonWindow};
use crate::http::RateLimitedClient;

const SEASON_CACHE_KEY: &str = "season-schedule";

/// Months re-fetched by a daily update: the running one and the one before,
/// which may still be receiving late results after a month rolls over
const RECENT_MONTHS: usize = 2;

/// Client for the monthly schedule feed.
///
/// A month is served from the raw cache only once it is settled (over for
/// `SETTLE_DAYS`); recent months are always fetched again and never cached.
/// A failed fetch yields no games rather than an error.
pub struct ScheduleClient {
    client: RateLimitedClient,
    url_template: String,
    cache: Cache,
}

impl ScheduleClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            client: RateLimitedClient::from_settings(&config.source)?,
            url_template: config.source.schedule_url_template.clone(),
            cache: Cache::new(&config.storage.cache_dir)?,
        })
    }

    /// All games of the season from its first month through `today`'s month
    pub async fn fetch_season(
        &mut self,
        window: &SeasonWindow,
        today: NaiveDate,
    ) -> Vec<GameOutcome> {
        let months = window.months_through(today);
        info!("Fetching schedule for {} months", months.len());

        let games = self.fetch_months(&months, window, today).await;

        if let Err(e) = self.cache.save_parsed(SEASON_CACHE_KEY, &games) {
            warn!("Failed to cache season schedule: {:?}", e);
        }

        games
    }

    /// Games of `today`'s month and the month before it
    pub async fn fetch_recent(
        &mut self,
        window: &SeasonWindow,
        today: NaiveDate,
    ) -> Vec<GameOutcome> {
        let months = window.months_through(today);
        let recent = &months[months.len().saturating_sub(RECENT_MONTHS)..];
        self.fetch_months(recent, window, today).await
    }

    /// Season schedule saved by the last full fetch
    pub fn cached_season(&self) -> Result<Option<Vec<GameOutcome>>> {
        self.cache.load_parsed(SEASON_CACHE_KEY)
    }

    async fn fetch_months(
        &mut self,
        months: &[SeasonMonth],
        window: &SeasonWindow,
        today: NaiveDate,
    ) -> Vec<GameOutcome> {
        let mut progress = FetchProgress::new(months.len());
        let mut games = Vec::new();

        for month in months {
            let (entries, was_cached) = self.fetch_month(*month, today).await;
            let month_games = entries_to_games(&entries, window);
            progress.record(was_cached, month_games.len());
            games.extend(month_games);
        }

        games
    }

    async fn fetch_month(
        &mut self,
        month: SeasonMonth,
        today: NaiveDate,
    ) -> (Vec<ScheduleEntry>, bool) {
        let key = month.cache_key();
        let settled = month.is_settled(today);

        if settled {
            match self.cache.load_raw(&key) {
                Ok(Some(value)) => match parse_feed(value) {
                    Ok(entries) => return (entries, true),
                    Err(e) => warn!("Ignoring unreadable cached feed {}: {:?}", key, e),
                },
                Ok(None) => {}
                Err(e) => warn!("Failed to read cached feed {}: {:?}", key, e),
            }
        }

        let url = build_month_url(&self.url_template, month);
        info!("Fetching {} {} from {}", month.name(), month.year, url);

        let value: Value = match self.client.get_json(&url).await {
            Ok(value) => value,
            Err(e) => {
                error!("Error fetching schedule for {} {}: {:?}", month.name(), month.year, e);
                return (Vec::new(), false);
            }
        };

        let entries = match parse_feed(value.clone()) {
            Ok(entries) => entries,
            Err(e) => {
                error!(
                    "Unexpected schedule feed shape for {} {}: {:?}",
                    month.name(),
                    month.year,
                    e
                );
                return (Vec::new(), false);
            }
        };

        if settled {
            if let Err(e) = self.cache.save_raw(&key, &value) {
                warn!("Failed to save feed {} to cache: {:?}", key, e);
            }
        }

        (entries, false)
    }
}

pub fn build_month_url(template: &str, month: SeasonMonth) -> String {
    template
        .replace("{year}", &month.year.to_string())
        .replace("{month}", month.name())
}

/// Accept either a bare array of rows or an object with a `games` array
fn parse_feed(value: Value) -> Result<Vec<ScheduleEntry>> {
    let rows = match value {
        Value::Object(mut map) => map
            .remove("games")
            .context("Schedule feed object has no `games` field")?,
        other => other,
    };

    serde_json::from_value(rows).context("Failed to map schedule feed rows")
}

/// Rows with unparseable dates or dates outside the season are dropped
pub fn entries_to_games(entries: &[ScheduleEntry], window: &SeasonWindow) -> Vec<GameOutcome> {
    entries
        .iter()
        .filter_map(ScheduleEntry::to_outcome)
        .filter(|game| window.contains(game.date))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_feed::TestFeed;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn result(date: &str, home: &str, home_pts: u32, visitor: &str, visitor_pts: u32) -> Value {
        json!({"date": date, "home_team": home, "home_pts": home_pts,
               "visitor_team": visitor, "visitor_pts": visitor_pts})
    }

    fn completed(games: &[GameOutcome]) -> usize {
        games.iter().filter(|g| g.is_completed()).count()
    }

    fn window() -> SeasonWindow {
        SeasonWindow::new(
            NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 9, 30).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_month_url_substitution() {
        let url = build_month_url(
            "https://feed.test/{year}/games-{month}.json",
            SeasonMonth { year: 2024, month: 11 },
        );
        assert_eq!(url, "https://feed.test/2024/games-november.json");
    }

    #[test]
    fn test_parse_feed_accepts_both_shapes() {
        let row = json!({"date": "2024-10-22", "visitor_team": "Knicks", "visitor_pts": 109,
                          "home_team": "Celtics", "home_pts": 132});

        assert_eq!(parse_feed(json!([row.clone()])).unwrap().len(), 1);
        assert_eq!(parse_feed(json!({"games": [row]})).unwrap().len(), 1);
        assert!(parse_feed(json!({"rows": []})).is_err());
    }

    #[test]
    fn test_entries_outside_season_or_undated_are_dropped() {
        let entries: Vec<ScheduleEntry> = serde_json::from_value(json!([
            {"date": "Tue, Oct 22, 2024", "visitor_team": "Knicks", "visitor_pts": 109,
             "home_team": "Celtics", "home_pts": 132},
            {"date": "Date", "visitor_team": "Visitor/Neutral", "home_team": "Home/Neutral"},
            {"date": "2024-09-30", "visitor_team": "Heat", "visitor_pts": 90,
             "home_team": "Magic", "home_pts": 95},
            {"date": "2024-10-23", "visitor_team": "Heat", "home_team": "Magic"}
        ]))
        .unwrap();

        let games = entries_to_games(&entries, &window());

        assert_eq!(games.len(), 2);
        assert!(games[0].is_completed());
        assert!(!games[1].is_completed());
    }

    #[tokio::test]
    async fn test_month_is_cached_only_once_settled() {
        let feed = TestFeed::start().await;
        let config = feed.config("client_settled");
        let window = config.season.window().unwrap();
        let october = SeasonMonth { year: 2024, month: 10 };
        let opener = result("2024-10-22", "Boston Celtics", 132, "New York Knicks", 109);

        feed.set_month(
            2024,
            "october",
            json!([opener.clone(), {"date": "2024-10-31", "home_team": "Utah Jazz",
                                    "visitor_team": "Sacramento Kings"}]),
        );
        let mut client = ScheduleClient::new(&config).unwrap();

        let games = client.fetch_season(&window, date(2024, 10, 31)).await;
        assert_eq!(games.len(), 2);
        assert_eq!(completed(&games), 1);
        assert!(client.cache.load_raw(&october.cache_key()).unwrap().is_none());

        // the last game of the month is posted after the month rolled over
        let closer = result("2024-10-31", "Utah Jazz", 100, "Sacramento Kings", 90);
        feed.set_month(2024, "october", json!([opener.clone(), closer]));

        let games = client.fetch_recent(&window, date(2024, 11, 1)).await;
        assert_eq!(completed(&games), 2);
        assert!(client.cache.load_raw(&october.cache_key()).unwrap().is_none());

        let games = client.fetch_season(&window, date(2024, 11, 5)).await;
        assert_eq!(completed(&games), 2);
        assert!(client.cache.load_raw(&october.cache_key()).unwrap().is_some());

        // settled months no longer hit the feed
        feed.set_month(2024, "october", json!([]));
        let games = client.fetch_season(&window, date(2024, 11, 6)).await;
        assert_eq!(completed(&games), 2);
    }

    #[tokio::test]
    async fn test_recent_covers_running_and_previous_month() {
        let feed = TestFeed::start().await;
        let config = feed.config("client_recent");
        let window = config.season.window().unwrap();

        let october = result("2024-10-22", "Boston Celtics", 132, "New York Knicks", 109);
        let november = result("2024-11-02", "Utah Jazz", 100, "Sacramento Kings", 90);
        let december = result("2024-12-01", "Utah Jazz", 101, "Boston Celtics", 99);
        feed.set_month(2024, "october", json!([october]));
        feed.set_month(2024, "november", json!([november]));
        feed.set_month(2024, "december", json!([december]));
        let mut client = ScheduleClient::new(&config).unwrap();

        let games = client.fetch_recent(&window, date(2024, 12, 1)).await;

        let dates: Vec<NaiveDate> = games.iter().map(|g| g.date).collect();
        assert_eq!(dates, vec![date(2024, 11, 2), date(2024, 12, 1)]);
    }
}
