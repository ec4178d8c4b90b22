use infra::models::{GameRow, GameStatus, MemberRow};

use crate::skill;

/// One member's record for today.
#[derive(Debug, Clone)]
pub struct TodayMemberStats {
    pub member: MemberRow,
    pub games_played: i64,
    pub games_won: i64,
}

impl TodayMemberStats {
    pub fn win_rate(&self) -> u32 {
        skill::win_rate(self.games_won, self.games_played)
    }
}

/// Per-member results over today's completed games, in name order. Guests
/// play but have no member record, so they never appear here.
pub fn today_performance(members: &[MemberRow], today_games: &[GameRow]) -> Vec<TodayMemberStats> {
    let mut by_member: std::collections::HashMap<uuid::Uuid, TodayMemberStats> =
        std::collections::HashMap::new();
    for game in today_games
        .iter()
        .filter(|game| game.status == GameStatus::Completed)
    {
        for player_id in &game.players {
            let Some(member) = members.iter().find(|m| m.id == *player_id) else {
                continue;
            };
            let entry = by_member
                .entry(member.id)
                .or_insert_with(|| TodayMemberStats {
                    member: member.clone(),
                    games_played: 0,
                    games_won: 0,
                });
            entry.games_played += 1;
            if game.winners.contains(player_id) {
                entry.games_won += 1;
            }
        }
    }
    let mut stats: Vec<TodayMemberStats> = by_member.into_values().collect();
    stats.sort_by(|a, b| a.member.name.cmp(&b.member.name));
    stats
}
