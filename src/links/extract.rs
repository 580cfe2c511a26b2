//! Recovering planning ids embedded in Beads titles.

/// Builds the canonical title for a Beads counterpart of a planning task.
///
/// [`extract_planning_id`] recovers `id` from the result.
#[must_use]
pub fn planning_title(id: u64, title: &str) -> String {
    format!("A-{id}: {title}")
}

/// Finds a planning id embedded in a Beads issue title.
///
/// Conventions are tried in priority order and the first match wins:
/// 1. `A-<n>: ` at the start
/// 2. `[A-<n>]` at the start
/// 3. `(A-<n>)` anywhere
/// 4. `a:<n>` at the start, case-insensitive
#[must_use]
pub fn extract_planning_id(title: &str) -> Option<u64> {
    colon_prefix(title)
        .or_else(|| bracket_prefix(title))
        .or_else(|| paren_anywhere(title))
        .or_else(|| namespaced_prefix(title))
}

/// Parses a user-supplied planning id: `7`, `a:7`, `a-7`, or `A-7`.
#[must_use]
pub fn parse_planning_id(input: &str) -> Option<u64> {
    let input = input.trim();
    let digits = input
        .strip_prefix("a:")
        .or_else(|| input.strip_prefix("a-"))
        .or_else(|| input.strip_prefix("A:"))
        .or_else(|| input.strip_prefix("A-"))
        .unwrap_or(input);
    all_digits(digits)
}

fn colon_prefix(title: &str) -> Option<u64> {
    let (id, rest) = leading_number(title.strip_prefix("A-")?)?;
    let after_colon = rest.strip_prefix(':')?;
    after_colon.starts_with(char::is_whitespace).then_some(id)
}

fn bracket_prefix(title: &str) -> Option<u64> {
    let (id, rest) = leading_number(title.strip_prefix("[A-")?)?;
    rest.starts_with(']').then_some(id)
}

fn paren_anywhere(title: &str) -> Option<u64> {
    title.match_indices("(A-").find_map(|(start, marker)| {
        let (id, rest) = leading_number(&title[start + marker.len()..])?;
        rest.starts_with(')').then_some(id)
    })
}

fn namespaced_prefix(title: &str) -> Option<u64> {
    let head = title.get(..2)?;
    if !head.eq_ignore_ascii_case("a:") {
        return None;
    }
    leading_number(&title[2..]).map(|(id, _)| id)
}

/// Splits off a run of ASCII digits and parses it.
fn leading_number(s: &str) -> Option<(u64, &str)> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let id = s[..end].parse().ok()?;
    Some((id, &s[end..]))
}

fn all_digits(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
