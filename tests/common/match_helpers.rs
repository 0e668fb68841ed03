use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use scoreboard_admin::models::matches::{Match, MatchStatus, MatchWithTeams, Team};

pub fn team(name: &str, country: &str) -> Team {
    Team {
        id: Uuid::new_v4(),
        name: name.to_string(),
        country: country.to_string(),
        logo_url: Some(format!("https://cdn.example.com/logos/{}.png", name.to_lowercase().replace(' ', "-"))),
    }
}

pub fn fixture(
    home_team: &Team,
    away_team: &Team,
    date: &str,
    time: &str,
    status: MatchStatus,
    scores: (Option<i32>, Option<i32>),
) -> MatchWithTeams {
    let created_at = Utc::now() - Duration::days(30);
    MatchWithTeams {
        fixture: Match {
            id: Uuid::new_v4(),
            group_id: Uuid::new_v4(),
            home_team_id: home_team.id,
            away_team_id: away_team.id,
            match_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("Invalid fixture date"),
            match_time: NaiveTime::parse_from_str(time, "%H:%M:%S").expect("Invalid fixture time"),
            status,
            home_score: scores.0,
            away_score: scores.1,
            created_at,
            updated_at: created_at,
        },
        home_team: home_team.clone(),
        away_team: away_team.clone(),
    }
}

/// A small group-stage schedule, deliberately stored out of order.
pub fn club_world_cup_fixtures() -> Vec<MatchWithTeams> {
    let palmeiras = team("Palmeiras", "Brazil");
    let porto = team("Porto", "Portugal");
    let al_ahly = team("Al Ahly", "Egypt");
    let inter_miami = team("Inter Miami", "United States");
    let chelsea = team("Chelsea", "England");
    let flamengo = team("Flamengo", "Brazil");

    vec![
        fixture(&chelsea, &flamengo, "2025-06-20", "14:00:00", MatchStatus::Upcoming, (None, None)),
        fixture(&al_ahly, &inter_miami, "2025-06-14", "20:00:00", MatchStatus::Finished, (Some(0), Some(0))),
        fixture(&palmeiras, &porto, "2025-06-15", "18:00:00", MatchStatus::Live, (Some(1), None)),
        fixture(&porto, &al_ahly, "2025-06-15", "13:00:00", MatchStatus::Finished, (Some(2), Some(1))),
        fixture(&inter_miami, &palmeiras, "2025-06-15", "18:00:00", MatchStatus::Upcoming, (None, None)),
    ]
}
