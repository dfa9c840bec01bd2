use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use matchzy_core::config::{DEFAULT_SPECTATOR_FILE, DEFAULT_TEAM_DIR};
use matchzy_core::core_api::{
    AddOutcome, CoreError, CoreErrorCode, EditorConfig, Engine, MapName, MatchType, Session,
    SideChoice, TeamSlot,
};
use matchzy_core::match_config::MAP_SLOTS;
use matchzy_render::{
    TextRenderOptions, render_match_json, render_match_summary_with_options, render_players_json,
    render_roster_json, render_roster_text, render_spectators_text,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Directory holding one <TEAM>.json file per roster
    #[arg(long, value_name = "DIR", default_value = DEFAULT_TEAM_DIR, global = true)]
    team_dir: PathBuf,
    /// Spectator list shared by every match
    #[arg(long, value_name = "FILE", default_value = DEFAULT_SPECTATOR_FILE, global = true)]
    spectator_file: PathBuf,
    /// Log every edit to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Edit a saved team roster
    Team {
        #[command(subcommand)]
        action: TeamAction,
    },
    /// Edit the spectator list
    Spectators {
        #[command(subcommand)]
        action: SpectatorAction,
    },
    /// Assemble and write a match config
    Generate(GenerateArgs),
}

#[derive(Debug, Subcommand)]
enum TeamAction {
    /// Add a player, creating the team file if needed
    Add {
        team: String,
        nickname: String,
        steamid: String,
    },
    /// Remove the player at INDEX as listed by `team show`
    Remove { team: String, index: usize },
    /// List a team's players
    Show {
        team: String,
        #[arg(long)]
        json: bool,
    },
    /// Save a team under a new name
    Rename { team: String, new_name: String },
}

#[derive(Debug, Subcommand)]
enum SpectatorAction {
    Add { nickname: String, steamid: String },
    /// Remove the spectator at INDEX as listed by `spectators show`
    Remove { index: usize },
    Show {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum MatchTypeArg {
    Bo1,
    Bo3,
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Team name inside --team-dir, or a path to a .json team file
    #[arg(long, value_name = "TEAM")]
    team1: String,
    #[arg(long, value_name = "TEAM")]
    team2: String,
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    match_id: i64,
    #[arg(long, default_value = "")]
    tournament: String,
    #[arg(long, default_value = "")]
    stage: String,
    #[arg(long = "type", value_enum, default_value_t = MatchTypeArg::Bo1)]
    match_type: MatchTypeArg,
    /// Map row as MAP:SIDE, e.g. de_mirage:team1_ct; repeat for rows 2 and 3
    #[arg(long = "map", value_name = "MAP:SIDE", value_parser = parse_map_pick)]
    maps: Vec<(MapName, SideChoice)>,
    /// Server cvar as KEY=VALUE
    #[arg(long = "cvar", value_name = "KEY=VALUE", value_parser = parse_cvar)]
    cvars: Vec<(String, String)>,
    /// Leave the spectator file out of the config
    #[arg(long)]
    no_spectators: bool,
    /// Output path; defaults to the generated UA1_Match_... filename
    #[arg(long, short, conflicts_with = "dry_run")]
    output: Option<PathBuf>,
    /// Print the config to stdout instead of writing a file
    #[arg(long)]
    dry_run: bool,
    /// Print a human-readable summary after writing
    #[arg(long)]
    summary: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e.message);
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), CoreError> {
    let engine = Engine::new(EditorConfig::new(cli.team_dir, cli.spectator_file));
    let mut session = engine.open();

    match cli.command {
        Command::Team { action } => run_team(&mut session, action),
        Command::Spectators { action } => run_spectators(&mut session, action),
        Command::Generate(args) => run_generate(&mut session, args),
    }
}

// ---------------------------------------------------------------------------
// team
// ---------------------------------------------------------------------------

fn run_team(session: &mut Session, action: TeamAction) -> Result<(), CoreError> {
    const SLOT: TeamSlot = TeamSlot::Team1;

    match action {
        TeamAction::Add {
            team,
            nickname,
            steamid,
        } => {
            open_or_create_team(session, SLOT, &team)?;
            match session.team_mut(SLOT).add_player(&nickname, &steamid)? {
                AddOutcome::Added => {
                    let path = save_team(session, SLOT)?;
                    println!(
                        "Added {} ({}) to {}",
                        nickname.trim(),
                        steamid.trim(),
                        path.display()
                    );
                }
                AddOutcome::Ignored => {
                    eprintln!("Nothing added: nickname and SteamID are required")
                }
            }
            Ok(())
        }
        TeamAction::Remove { team, index } => {
            session.load_team_named(SLOT, &team)?;
            let removed = session
                .team_mut(SLOT)
                .remove_player(Some(index))
                .ok_or_else(|| {
                    CoreError::new(
                        CoreErrorCode::Validation,
                        format!("team {team:?} has no player at index {index}"),
                    )
                })?;
            save_team(session, SLOT)?;
            println!("Removed {}", removed.listing_line());
            Ok(())
        }
        TeamAction::Show { team, json } => {
            session.load_team_named(SLOT, &team)?;
            let roster = session.team(SLOT).roster();
            if json {
                print_json(&render_roster_json(roster))?;
            } else {
                print!("{}", render_roster_text(roster));
            }
            Ok(())
        }
        TeamAction::Rename { team, new_name } => {
            if new_name.trim().is_empty() {
                return Err(CoreError::new(CoreErrorCode::Validation, "new team name is blank"));
            }
            let old_path = session.config().team_path(&team);
            let new_path = session.config().team_path(&new_name);
            session.load_team_named(SLOT, &team)?;
            session.team_mut(SLOT).set_name(new_name);

            // Move before saving: on case-insensitive volumes both paths can
            // name the same file, so the old one is never deleted separately.
            if new_path != old_path {
                fs::rename(&old_path, &new_path)
                    .map_err(|e| CoreError::from_io(e, "rename", &old_path))?;
            }
            let saved = save_team(session, SLOT)?;
            println!("Renamed {} -> {}", old_path.display(), saved.display());
            Ok(())
        }
    }
}

fn open_or_create_team(session: &mut Session, slot: TeamSlot, team: &str) -> Result<(), CoreError> {
    match session.load_team_named(slot, team) {
        Err(e) if e.code == CoreErrorCode::NotFound => {
            tracing::debug!(team, "starting new team");
            session.team_mut(slot).set_name(team);
            Ok(())
        }
        other => other,
    }
}

fn save_team(session: &Session, slot: TeamSlot) -> Result<PathBuf, CoreError> {
    session.save_team(slot)?.ok_or_else(|| {
        CoreError::new(
            CoreErrorCode::Validation,
            "team name is blank; nothing was saved",
        )
    })
}

// ---------------------------------------------------------------------------
// spectators
// ---------------------------------------------------------------------------

fn run_spectators(session: &mut Session, action: SpectatorAction) -> Result<(), CoreError> {
    load_spectators_or_notice(session)?;

    match action {
        SpectatorAction::Add { nickname, steamid } => {
            match session.spectators_mut().add_spectator(&nickname, &steamid)? {
                AddOutcome::Added => {
                    session.save_spectators()?;
                    println!(
                        "Added spectator {} ({}) to {}",
                        nickname.trim(),
                        steamid.trim(),
                        session.config().spectator_file.display()
                    );
                }
                AddOutcome::Ignored => {
                    eprintln!("Nothing added: nickname and SteamID are required")
                }
            }
            Ok(())
        }
        SpectatorAction::Remove { index } => {
            let removed = session
                .spectators_mut()
                .remove_spectator(Some(index))
                .ok_or_else(|| {
                    CoreError::new(
                        CoreErrorCode::Validation,
                        format!("no spectator at index {index}"),
                    )
                })?;
            session.save_spectators()?;
            println!("Removed spectator {}", removed.listing_line());
            Ok(())
        }
        SpectatorAction::Show { json } => {
            let players = session.spectators().players();
            if json {
                print_json(&render_players_json(players))?;
            } else {
                print!("{}", render_spectators_text(players));
            }
            Ok(())
        }
    }
}

/// A missing spectator file is a notice, not a failure.
fn load_spectators_or_notice(session: &mut Session) -> Result<(), CoreError> {
    match session.load_spectators() {
        Ok(_) => Ok(()),
        Err(e) if e.code == CoreErrorCode::NotFound => {
            eprintln!(
                "Notice: {} not found",
                session.config().spectator_file.display()
            );
            Ok(())
        }
        Err(e) => Err(e),
    }
}

// ---------------------------------------------------------------------------
// generate
// ---------------------------------------------------------------------------

fn run_generate(session: &mut Session, args: GenerateArgs) -> Result<(), CoreError> {
    if args.maps.len() > MAP_SLOTS {
        return Err(CoreError::new(
            CoreErrorCode::Validation,
            format!("at most {MAP_SLOTS} --map rows can be given"),
        ));
    }

    load_team_ref(session, TeamSlot::Team1, &args.team1)?;
    load_team_ref(session, TeamSlot::Team2, &args.team2)?;
    if !args.no_spectators {
        load_spectators_or_notice(session)?;
    }

    let settings = session.settings_mut();
    settings.match_id = args.match_id;
    settings.tournament_name = args.tournament;
    settings.stage_name = args.stage;
    settings.match_type = to_core_match_type(args.match_type);

    for (slot, (map, side)) in args.maps.into_iter().enumerate() {
        session.set_map(slot, map, side)?;
    }
    for (key, value) in args.cvars {
        session.set_cvar(&key, value)?;
    }

    let assembled = session.assemble();

    if args.dry_run {
        print_json(&render_match_json(&assembled.config))?;
    } else {
        let target = args
            .output
            .unwrap_or_else(|| PathBuf::from(&assembled.default_filename));
        if let Some(path) = session.write_config(&assembled, Some(&target))? {
            println!("Match config saved to {}", path.display());
        }
    }

    if args.summary {
        let summary = render_match_summary_with_options(
            &assembled.config,
            Some(session.settings()),
            TextRenderOptions { show_cvars: true },
        );
        // Keep stdout parseable in dry-run mode.
        if args.dry_run {
            eprint!("{summary}");
        } else {
            print!("{summary}");
        }
    }

    Ok(())
}

/// `.json` values are paths, anything else is a team name in the team dir.
fn load_team_ref(session: &mut Session, slot: TeamSlot, team: &str) -> Result<(), CoreError> {
    let as_path = Path::new(team);
    if as_path.extension().is_some_and(|ext| ext == "json") {
        session.load_team(slot, as_path)
    } else {
        session.load_team_named(slot, team)
    }
}

fn parse_map_pick(value: &str) -> Result<(MapName, SideChoice), String> {
    let (map, side) = value
        .split_once(':')
        .ok_or_else(|| format!("expected MAP:SIDE, got {value:?}"))?;
    let map = map.parse::<MapName>().map_err(|e| e.message)?;
    let side = side.parse::<SideChoice>().map_err(|e| e.message)?;
    Ok((map, side))
}

fn parse_cvar(value: &str) -> Result<(String, String), String> {
    let (key, val) = value
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {value:?}"))?;
    Ok((key.trim().to_string(), val.to_string()))
}

fn to_core_match_type(match_type: MatchTypeArg) -> MatchType {
    match match_type {
        MatchTypeArg::Bo1 => MatchType::Bo1,
        MatchTypeArg::Bo3 => MatchType::Bo3,
    }
}

fn print_json(value: &serde_json::Value) -> Result<(), CoreError> {
    let rendered = serde_json::to_string_pretty(value).map_err(|e| {
        CoreError::new(
            CoreErrorCode::Io,
            format!("failed to render JSON output: {e}"),
        )
    })?;
    println!("{rendered}");
    Ok(())
}
