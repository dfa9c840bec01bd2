use std::fmt::Write as _;

use matchzy_core::core_api::{
    CvarSet, MatchConfig, MatchSettings, PlayerList, Roster, SpectatorBlock,
};
use serde_json::{Map as JsonMap, Value as JsonValue};

const LABEL_WIDTH: usize = 18;
const NICK_WIDTH: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextRenderOptions {
    pub show_cvars: bool,
}

/// Match config as a JSON value with the plugin's key order.
pub fn render_match_json(config: &MatchConfig) -> JsonValue {
    JsonValue::Object(match_json(config))
}

pub fn render_roster_json(roster: &Roster) -> JsonValue {
    JsonValue::Object(roster_json(roster))
}

pub fn render_players_json(players: &PlayerList) -> JsonValue {
    players_to_json(players)
}

/// Numbered listing of a roster, one `"<nick> (<steamid>)"` line per player.
pub fn render_roster_text(roster: &Roster) -> String {
    let mut out = String::new();
    let title = if roster.name.trim().is_empty() {
        "(unnamed team)"
    } else {
        roster.name.as_str()
    };
    writeln!(&mut out, "{title}").expect("writing to String cannot fail");
    write_player_lines(&mut out, &roster.players);
    out
}

pub fn render_spectators_text(players: &PlayerList) -> String {
    let mut out = String::new();
    writeln!(&mut out, "Spectators").expect("writing to String cannot fail");
    write_player_lines(&mut out, players);
    out
}

pub fn render_match_summary(config: &MatchConfig, settings: Option<&MatchSettings>) -> String {
    render_match_summary_with_options(config, settings, TextRenderOptions::default())
}

pub fn render_match_summary_with_options(
    config: &MatchConfig,
    settings: Option<&MatchSettings>,
    options: TextRenderOptions,
) -> String {
    let mut out = String::new();

    write_field(&mut out, "Match ID", &config.matchid.to_string());
    if let Some(settings) = settings {
        write_field(&mut out, "Tournament", &settings.tournament_name);
        if !settings.stage_name.trim().is_empty() {
            write_field(&mut out, "Stage", &settings.stage_name);
        }
        write_field(&mut out, "Match Type", settings.match_type.as_str());
    }
    write_field(
        &mut out,
        "Teams",
        &format!("{} vs {}", config.team1.name, config.team2.name),
    );
    write_field(&mut out, "Maps", &config.num_maps.to_string());
    write_field(
        &mut out,
        "Players Per Team",
        &config.players_per_team.to_string(),
    );
    writeln!(&mut out).expect("writing to String cannot fail");

    for (index, (map, side)) in config
        .maplist
        .iter()
        .zip(config.map_sides.iter())
        .enumerate()
    {
        let marker = if (index as u32) < config.num_maps {
            ""
        } else {
            " (unused)"
        };
        writeln!(
            &mut out,
            "Map {}: {:<14}{}{}",
            index + 1,
            map.as_str(),
            side.as_str(),
            marker
        )
        .expect("writing to String cannot fail");
    }
    writeln!(&mut out).expect("writing to String cannot fail");

    out.push_str(&render_roster_text(&config.team1));
    writeln!(&mut out).expect("writing to String cannot fail");
    out.push_str(&render_roster_text(&config.team2));

    if !config.spectators.players.is_empty() {
        writeln!(&mut out).expect("writing to String cannot fail");
        out.push_str(&render_spectators_text(&config.spectators.players));
    }

    if options.show_cvars {
        writeln!(&mut out).expect("writing to String cannot fail");
        for (key, value) in config.cvars.iter() {
            writeln!(&mut out, "{key} = {value:?}").expect("writing to String cannot fail");
        }
    }

    out
}

fn match_json(config: &MatchConfig) -> JsonMap<String, JsonValue> {
    let mut out = JsonMap::new();

    out.insert("matchid".to_string(), JsonValue::from(config.matchid));
    out.insert(
        "team1".to_string(),
        JsonValue::Object(roster_json(&config.team1)),
    );
    out.insert(
        "team2".to_string(),
        JsonValue::Object(roster_json(&config.team2)),
    );
    out.insert("num_maps".to_string(), JsonValue::from(config.num_maps));
    out.insert(
        "maplist".to_string(),
        JsonValue::Array(
            config
                .maplist
                .iter()
                .map(|m| JsonValue::String(m.as_str().to_string()))
                .collect(),
        ),
    );
    out.insert(
        "map_sides".to_string(),
        JsonValue::Array(
            config
                .map_sides
                .iter()
                .map(|s| JsonValue::String(s.as_str().to_string()))
                .collect(),
        ),
    );
    out.insert(
        "spectators".to_string(),
        spectators_to_json(&config.spectators),
    );
    out.insert(
        "clinch_series".to_string(),
        JsonValue::Bool(config.clinch_series),
    );
    out.insert(
        "players_per_team".to_string(),
        JsonValue::from(config.players_per_team),
    );
    out.insert("cvars".to_string(), cvars_to_json(&config.cvars));

    out
}

fn roster_json(roster: &Roster) -> JsonMap<String, JsonValue> {
    let mut out = JsonMap::new();
    out.insert("name".to_string(), JsonValue::String(roster.name.clone()));
    out.insert("players".to_string(), players_to_json(&roster.players));
    out
}

fn spectators_to_json(block: &SpectatorBlock) -> JsonValue {
    let mut out = JsonMap::new();
    out.insert("players".to_string(), players_to_json(&block.players));
    JsonValue::Object(out)
}

fn players_to_json(players: &PlayerList) -> JsonValue {
    JsonValue::Object(
        players
            .iter()
            .map(|(id, name)| (id.to_string(), JsonValue::String(name.to_string())))
            .collect(),
    )
}

fn cvars_to_json(cvars: &CvarSet) -> JsonValue {
    JsonValue::Object(
        cvars
            .iter()
            .map(|(k, v)| (k.to_string(), JsonValue::String(v.to_string())))
            .collect(),
    )
}

fn write_field(out: &mut String, label: &str, value: &str) {
    writeln!(out, "{:<LABEL_WIDTH$}{value}", format!("{label}:"))
        .expect("writing to String cannot fail");
}

fn write_player_lines(out: &mut String, players: &PlayerList) {
    if players.is_empty() {
        writeln!(out, "  (no players)").expect("writing to String cannot fail");
        return;
    }
    for (index, (id, name)) in players.iter().enumerate() {
        writeln!(out, "  {:>2}. {} ({id})", index, fit_column(name, NICK_WIDTH))
            .expect("writing to String cannot fail");
    }
}

fn fit_column(value: &str, width: usize) -> String {
    let len = value.chars().count();
    if len > width {
        let mut clipped: String = value.chars().take(width.saturating_sub(1)).collect();
        clipped.push('~');
        clipped
    } else {
        value.to_string()
    }
}
