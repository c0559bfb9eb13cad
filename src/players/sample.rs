// Built-in sample data used when every upstream provider is unreachable,
// so the API stays usable offline.

use crate::players::record::AdpEntry;
use crate::providers::RosterEntry;
use std::collections::HashMap;

/// A handful of roster entries in the shape the roster feed would return.
pub fn sample_roster() -> HashMap<String, RosterEntry> {
    let players = [
        ("1", "Ja'Marr", "Chase", "CIN", "WR"),
        ("2", "Bijan", "Robinson", "ATL", "RB"),
        ("3", "Saquon", "Barkley", "PHI", "RB"),
        ("4", "Justin", "Jefferson", "MIN", "WR"),
    ];

    players
        .into_iter()
        .map(|(id, first, last, team, position)| {
            (
                id.to_string(),
                RosterEntry {
                    first_name: first.to_string(),
                    last_name: last.to_string(),
                    team: Some(team.to_string()),
                    position: Some(position.to_string()),
                    active: Some(true),
                },
            )
        })
        .collect()
}

/// Standalone ADP rows served when both ADP providers fail.
pub fn sample_adp() -> Vec<AdpEntry> {
    vec![
        AdpEntry {
            player_id: "1".into(),
            adp: 1.5,
            position: "WR".into(),
            team: "CIN".into(),
            name: "Ja'Marr Chase".into(),
        },
        AdpEntry {
            player_id: "2".into(),
            adp: 2.2,
            position: "RB".into(),
            team: "ATL".into(),
            name: "Bijan Robinson".into(),
        },
        AdpEntry {
            player_id: "3".into(),
            adp: 2.5,
            position: "RB".into(),
            team: "PHI".into(),
            name: "Saquon Barkley".into(),
        },
    ]
}
