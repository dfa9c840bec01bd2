use std::fs;
use std::path::Path;
use std::process::Command;

use pretty_assertions::assert_eq;
use serde_json::Value;
use tempfile::TempDir;

const ALICE: &str = "76561198000000001";
const BOB: &str = "76561198000000002";
const CAROL: &str = "76561198000000003";

fn run_cli(dir: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_matchzy-cfg"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("failed to run matchzy-cfg CLI")
}

fn read_json(path: &Path) -> Value {
    let text = fs::read_to_string(path).unwrap_or_else(|e| panic!("failed to read {path:?}: {e}"));
    serde_json::from_str(&text).expect("file should be valid JSON")
}

fn seed_teams(dir: &Path) {
    let players = [
        ("Red", "alice", ALICE),
        ("Red", "bob", BOB),
        ("Blue", "carol", CAROL),
    ];
    for (team, nick, id) in players {
        let output = run_cli(dir, &["team", "add", team, nick, id]);
        assert!(output.status.success(), "{output:?}");
    }
}

#[test]
fn team_add_creates_team_file() {
    let dir = TempDir::new().expect("create tempdir");
    seed_teams(dir.path());

    let json = read_json(&dir.path().join("teams/Red.json"));
    assert_eq!(json["name"], "Red");
    let ids: Vec<&str> = json["players"]
        .as_object()
        .expect("players should be an object")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(ids, vec![ALICE, BOB]);
}

#[test]
fn team_add_rejects_bad_and_duplicate_ids() {
    let dir = TempDir::new().expect("create tempdir");
    seed_teams(dir.path());

    let bad = run_cli(dir.path(), &["team", "add", "Red", "eve", "1234"]);
    assert_eq!(bad.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&bad.stderr).contains("17-digit"));

    let dup = run_cli(dir.path(), &["team", "add", "Red", "imposter", ALICE]);
    assert_eq!(dup.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&dup.stderr).contains("already exists"));

    let json = read_json(&dir.path().join("teams/Red.json"));
    assert_eq!(json["players"][ALICE], "alice");
    assert_eq!(json["players"].as_object().unwrap().len(), 2);
}

#[test]
fn team_remove_uses_listing_index() {
    let dir = TempDir::new().expect("create tempdir");
    seed_teams(dir.path());

    let output = run_cli(dir.path(), &["team", "remove", "Red", "0"]);
    assert!(output.status.success(), "{output:?}");

    let show = run_cli(dir.path(), &["team", "show", "Red"]);
    let stdout = String::from_utf8_lossy(&show.stdout);
    assert_eq!(stdout, format!("Red\n   0. bob ({BOB})\n"));

    let missing = run_cli(dir.path(), &["team", "remove", "Red", "5"]);
    assert_eq!(missing.status.code(), Some(1));
}

#[test]
fn team_show_missing_team_fails() {
    let dir = TempDir::new().expect("create tempdir");
    let output = run_cli(dir.path(), &["team", "show", "Nobody"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn team_rename_moves_file() {
    let dir = TempDir::new().expect("create tempdir");
    seed_teams(dir.path());

    let output = run_cli(dir.path(), &["team", "rename", "Blue", "Blue Squad"]);
    assert!(output.status.success(), "{output:?}");

    assert!(!dir.path().join("teams/Blue.json").exists());
    let json = read_json(&dir.path().join("teams/Blue_Squad.json"));
    assert_eq!(json["name"], "Blue Squad");
    assert_eq!(json["players"][CAROL], "carol");
}

#[test]
fn team_rename_changing_only_case_keeps_roster() {
    let dir = TempDir::new().expect("create tempdir");
    seed_teams(dir.path());

    let output = run_cli(dir.path(), &["team", "rename", "Blue", "blue"]);
    assert!(output.status.success(), "{output:?}");

    let json = read_json(&dir.path().join("teams/blue.json"));
    assert_eq!(json["name"], "blue");
    assert_eq!(json["players"][CAROL], "carol");

    let show = run_cli(dir.path(), &["team", "show", "blue"]);
    assert!(show.status.success(), "{show:?}");
    assert_eq!(
        String::from_utf8_lossy(&show.stdout),
        format!("blue\n   0. carol ({CAROL})\n")
    );
}

#[test]
fn team_rename_to_same_file_keeps_roster() {
    let dir = TempDir::new().expect("create tempdir");
    seed_teams(dir.path());

    let output = run_cli(dir.path(), &["team", "rename", "Red", "  Red  "]);
    assert!(output.status.success(), "{output:?}");

    let json = read_json(&dir.path().join("teams/Red.json"));
    assert_eq!(json["name"], "Red");
    assert_eq!(json["players"].as_object().unwrap().len(), 2);
}

#[test]
fn team_rename_to_blank_name_is_rejected() {
    let dir = TempDir::new().expect("create tempdir");
    seed_teams(dir.path());

    let output = run_cli(dir.path(), &["team", "rename", "Red", "   "]);
    assert_eq!(output.status.code(), Some(1));

    let json = read_json(&dir.path().join("teams/Red.json"));
    assert_eq!(json["players"][ALICE], "alice");
}

#[test]
fn spectators_show_reports_missing_file_without_failing() {
    let dir = TempDir::new().expect("create tempdir");
    let output = run_cli(dir.path(), &["spectators", "show", "--json"]);

    assert!(output.status.success(), "{output:?}");
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found"));
    let json: Value = serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(json, serde_json::json!({}));
}

#[test]
fn spectators_add_and_remove_round_trip() {
    let dir = TempDir::new().expect("create tempdir");
    assert!(run_cli(dir.path(), &["spectators", "add", "caster", ALICE]).status.success());
    assert!(run_cli(dir.path(), &["spectators", "add", "admin", BOB]).status.success());
    assert!(run_cli(dir.path(), &["spectators", "remove", "0"]).status.success());

    let json = read_json(&dir.path().join("spectators.json"));
    assert_eq!(json, serde_json::json!({ BOB: "admin" }));
}

#[test]
fn generate_writes_default_filename() {
    let dir = TempDir::new().expect("create tempdir");
    seed_teams(dir.path());
    let spectator = run_cli(
        dir.path(),
        &["spectators", "add", "caster", "76561198000000009"],
    );
    assert!(spectator.status.success(), "{spectator:?}");

    let output = run_cli(
        dir.path(),
        &[
            "generate",
            "--team1",
            "Red",
            "--team2",
            "Blue",
            "--match-id",
            "5",
            "--tournament",
            "Cup",
            "--map",
            "de_ancient:team1_ct",
        ],
    );
    assert!(output.status.success(), "{output:?}");

    let json = read_json(&dir.path().join("UA1_Match_5-Red_VS_Blue.json"));
    assert_eq!(json["matchid"], 5);
    assert_eq!(json["num_maps"], 1);
    assert_eq!(json["players_per_team"], 2);
    assert_eq!(json["clinch_series"], true);
    assert_eq!(
        json["maplist"],
        serde_json::json!(["de_ancient", "de_mirage", "de_nuke"])
    );
    assert_eq!(json["cvars"]["hostname"], "Cup | 5 | Red vs Blue");
    assert_eq!(json["spectators"]["players"]["76561198000000009"], "caster");
}

#[test]
fn generate_dry_run_prints_json_and_writes_nothing() {
    let dir = TempDir::new().expect("create tempdir");
    seed_teams(dir.path());

    let output = run_cli(
        dir.path(),
        &[
            "generate",
            "--team1",
            "teams/Blue.json",
            "--team2",
            "Red",
            "--type",
            "bo3",
            "--cvar",
            "hostname=Finals Server",
            "--no-spectators",
            "--dry-run",
            "--summary",
        ],
    );
    assert!(output.status.success(), "{output:?}");

    let json: Value = serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(json["num_maps"], 3);
    assert_eq!(json["team1"]["name"], "Blue");
    assert_eq!(json["players_per_team"], 1);
    assert_eq!(json["cvars"]["hostname"], "Finals Server");
    assert!(String::from_utf8_lossy(&output.stderr).contains("Teams:"));

    let written: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
        .collect();
    assert!(written.is_empty(), "dry run wrote {written:?}");
}

#[test]
fn generate_rejects_unknown_cvar_and_map() {
    let dir = TempDir::new().expect("create tempdir");
    seed_teams(dir.path());

    let cvar = run_cli(
        dir.path(),
        &["generate", "--team1", "Red", "--team2", "Blue", "--cvar", "sv_cheats=1", "--dry-run"],
    );
    assert_eq!(cvar.status.code(), Some(1));

    let map = run_cli(
        dir.path(),
        &["generate", "--team1", "Red", "--team2", "Blue", "--map", "de_cache:knife"],
    );
    assert_eq!(map.status.code(), Some(2));
}

#[test]
fn generate_with_explicit_output_path() {
    let dir = TempDir::new().expect("create tempdir");
    seed_teams(dir.path());

    let output = run_cli(
        dir.path(),
        &["generate", "--team1", "Red", "--team2", "Blue", "--output", "configs/final"],
    );
    assert!(output.status.success(), "{output:?}");
    assert!(String::from_utf8_lossy(&output.stdout).contains("configs/final.json"));
    assert!(dir.path().join("configs/final.json").exists());
}
