//! Small helpers for the launcher surface.

use strsim::levenshtein;

/// Suggest a similar command name using Levenshtein distance.
/// Returns Some(suggestion) if a close match is found (distance <= 2).
pub(crate) fn suggest_similar_command<'a>(
    input: &str,
    candidates: impl IntoIterator<Item = &'a str>,
) -> Option<&'a str> {
    let input_lower = input.to_lowercase();
    let mut best_match: Option<(&str, usize)> = None;

    for cmd in candidates {
        let distance = levenshtein(&input_lower, cmd);
        if distance > 2 {
            continue;
        }
        match best_match {
            Some((_, best_dist)) if distance >= best_dist => {}
            _ => best_match = Some((cmd, distance)),
        }
    }

    best_match.map(|(cmd, _)| cmd)
}

/// Flags the host itself answers before dispatch.
pub(crate) fn is_help_flag(arg: &str) -> bool {
    matches!(arg, "--help" | "-h")
}

pub(crate) fn is_version_flag(arg: &str) -> bool {
    matches!(arg, "--version" | "-V")
}
