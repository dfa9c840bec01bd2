use std::sync::LazyLock;

use regex::Regex;

static UNSAFE_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\-]").expect("filename pattern is valid"));

/// Trims `name` and replaces every character other than a word character or
/// `-` with `_`, one underscore per replaced character.
pub fn sanitize_filename(name: &str) -> String {
    UNSAFE_FILENAME_CHARS
        .replace_all(name.trim(), "_")
        .into_owned()
}

/// `UA1_Match_<id>-<team1>_VS_<team2>.json`
pub fn match_config_filename(match_id: i64, team1: &str, team2: &str) -> String {
    format!(
        "UA1_Match_{match_id}-{}_VS_{}.json",
        sanitize_filename(team1),
        sanitize_filename(team2)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_each_unsafe_character() {
        assert_eq!(sanitize_filename("Team Alpha!"), "Team_Alpha_");
        assert_eq!(sanitize_filename("  a  b  "), "a__b");
        assert_eq!(sanitize_filename("x/y\\z"), "x_y_z");
        assert_eq!(sanitize_filename("keep-this_one"), "keep-this_one");
    }

    #[test]
    fn sanitize_keeps_unicode_letters() {
        assert_eq!(sanitize_filename("Ñandú Gaming"), "Ñandú_Gaming");
    }

    #[test]
    fn match_filename_uses_sanitized_team_names() {
        assert_eq!(
            match_config_filename(12, "Red Team", "Blue.Team"),
            "UA1_Match_12-Red_Team_VS_Blue_Team.json"
        );
    }
}
