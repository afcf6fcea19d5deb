use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension};

use super::connection::DbConn;
use super::models::GameChange;
use crate::domain::GameOutcome;

const GAME_COLUMNS: &str = "date, home_team, visitor_team, home_score, visitor_score";

/// Insert a game or fill in / correct its score. Games are keyed by
/// (date, home team, visitor team).
pub fn upsert_game(conn: &mut DbConn, game: &GameOutcome) -> Result<GameChange> {
    let Some(existing) = find_game(conn, game.date, &game.home_team, &game.visitor_team)? else {
        insert_game(conn, game)?;
        return Ok(GameChange::Inserted);
    };

    if !game.is_completed() || same_scores(&existing, game) {
        return Ok(GameChange::Unchanged);
    }

    update_scores(conn, game)?;

    if existing.is_completed() {
        log::warn!(
            "Score corrected for {} at {} on {}",
            game.visitor_team, game.home_team, game.date
        );
        Ok(GameChange::Corrected)
    } else {
        Ok(GameChange::Completed)
    }
}

fn same_scores(a: &GameOutcome, b: &GameOutcome) -> bool {
    a.home_score == b.home_score && a.visitor_score == b.visitor_score
}

fn find_game(
    conn: &mut DbConn,
    date: NaiveDate,
    home_team: &str,
    visitor_team: &str,
) -> Result<Option<GameOutcome>> {
    let sql = format!(
        "SELECT {} FROM games WHERE date = ?1 AND home_team = ?2 AND visitor_team = ?3",
        GAME_COLUMNS
    );

    conn.query_row(&sql, params![date, home_team, visitor_team], parse_game_row)
        .optional()
        .context("Failed to query game")
}

fn insert_game(conn: &mut DbConn, game: &GameOutcome) -> Result<()> {
    let sql = format!("INSERT INTO games ({}) VALUES (?1, ?2, ?3, ?4, ?5)", GAME_COLUMNS);

    conn.execute(
        &sql,
        params![
            game.date,
            game.home_team,
            game.visitor_team,
            game.home_score,
            game.visitor_score
        ],
    )
    .context("Failed to insert game")
    .map(|_| ())
}

fn update_scores(conn: &mut DbConn, game: &GameOutcome) -> Result<()> {
    let sql = "UPDATE games SET home_score = ?1, visitor_score = ?2 \
               WHERE date = ?3 AND home_team = ?4 AND visitor_team = ?5";

    conn.execute(
        sql,
        params![
            game.home_score,
            game.visitor_score,
            game.date,
            game.home_team,
            game.visitor_team
        ],
    )
    .context("Failed to update game score")
    .map(|_| ())
}

fn parse_game_row(row: &rusqlite::Row) -> rusqlite::Result<GameOutcome> {
    Ok(GameOutcome {
        date: row.get(0)?,
        home_team: row.get(1)?,
        visitor_team: row.get(2)?,
        home_score: row.get(3)?,
        visitor_score: row.get(4)?,
    })
}

pub fn list_all(conn: &mut DbConn) -> Result<Vec<GameOutcome>> {
    let sql = format!("SELECT {} FROM games ORDER BY date, id", GAME_COLUMNS);
    query_games(conn, &sql)
}

pub fn list_completed(conn: &mut DbConn) -> Result<Vec<GameOutcome>> {
    let sql = format!(
        "SELECT {} FROM games \
         WHERE home_score IS NOT NULL AND visitor_score IS NOT NULL \
         ORDER BY date, id",
        GAME_COLUMNS
    );
    query_games(conn, &sql)
}

fn query_games(conn: &mut DbConn, sql: &str) -> Result<Vec<GameOutcome>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_game_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to read games")?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support::temp_connection;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, d).unwrap()
    }

    #[test]
    fn test_upsert_is_idempotent() {
        let mut conn = temp_connection("games_idempotent");
        let game = GameOutcome::played(day(1), "Kings", 120, "Jazz", 111);

        assert_eq!(upsert_game(&mut conn, &game).unwrap(), GameChange::Inserted);
        assert_eq!(upsert_game(&mut conn, &game).unwrap(), GameChange::Unchanged);
        assert_eq!(list_all(&mut conn).unwrap(), vec![game]);
    }

    #[test]
    fn test_scheduled_game_gets_completed() {
        let mut conn = temp_connection("games_completed");
        let scheduled = GameOutcome::scheduled(day(2), "Kings", "Jazz");
        let played = GameOutcome::played(day(2), "Kings", 98, "Jazz", 101);

        upsert_game(&mut conn, &scheduled).unwrap();
        assert!(list_completed(&mut conn).unwrap().is_empty());

        assert_eq!(upsert_game(&mut conn, &played).unwrap(), GameChange::Completed);
        assert_eq!(list_completed(&mut conn).unwrap(), vec![played]);
    }

    #[test]
    fn test_unplayed_feed_row_never_erases_score() {
        let mut conn = temp_connection("games_no_erase");
        let played = GameOutcome::played(day(3), "Kings", 98, "Jazz", 101);

        upsert_game(&mut conn, &played).unwrap();
        let unplayed = GameOutcome::scheduled(day(3), "Kings", "Jazz");
        let change = upsert_game(&mut conn, &unplayed).unwrap();

        assert_eq!(change, GameChange::Unchanged);
        assert_eq!(list_completed(&mut conn).unwrap(), vec![played]);
    }

    #[test]
    fn test_score_correction() {
        let mut conn = temp_connection("games_corrected");
        upsert_game(&mut conn, &GameOutcome::played(day(4), "Kings", 98, "Jazz", 101)).unwrap();

        let fixed = GameOutcome::played(day(4), "Kings", 108, "Jazz", 101);
        assert_eq!(upsert_game(&mut conn, &fixed).unwrap(), GameChange::Corrected);
        assert_eq!(list_completed(&mut conn).unwrap(), vec![fixed]);
    }

    #[test]
    fn test_new_result_classification() {
        assert!(GameChange::Inserted.is_new_result(true));
        assert!(!GameChange::Inserted.is_new_result(false));
        assert!(GameChange::Completed.is_new_result(true));
        assert!(!GameChange::Corrected.is_new_result(true));
        assert!(!GameChange::Unchanged.is_new_result(true));
    }
}
