//! URL state
//!
//! Mirrors the query state into shareable query parameters
//! (`search`, `sort`, `status`) and restores it from them.

use crate::api::Status;
use crate::model::QueryState;
use crate::SortKey;

/// Encode the query state. Default values are left out.
///
/// # Examples
/// ```
/// use rmcat::api::Status;
/// use rmcat::logic::url_state::to_query_string;
/// use rmcat::model::QueryState;
/// use rmcat::SortKey;
///
/// let state = QueryState {
///     search: "Evil Morty".to_string(),
///     status: Some(Status::Dead),
///     sort: SortKey::NameAsc,
/// };
/// assert_eq!(to_query_string(&state), "search=Evil%20Morty&sort=name-asc&status=dead");
/// assert_eq!(to_query_string(&QueryState::default()), "");
/// ```
pub fn to_query_string(state: &QueryState) -> String {
    let mut parts = Vec::new();

    let search = state.search.trim();
    if !search.is_empty() {
        parts.push(format!("search={}", urlencoding::encode(search)));
    }
    if state.sort != SortKey::None {
        parts.push(format!("sort={}", state.sort.as_str()));
    }
    if let Some(status) = state.status {
        parts.push(format!("status={}", status.as_str()));
    }

    parts.join("&")
}

/// Decode query parameters into a query state
///
/// Accepts a bare query (`search=rick`), a leading `?`, or a full URL.
/// Absent, empty or unrecognized parameters fall back to defaults.
pub fn parse_query_string(input: &str) -> QueryState {
    let query = match input.split_once('?') {
        Some((_, q)) => q,
        None => input,
    };
    let query = query.split('#').next().unwrap_or_default();

    let mut state = QueryState::default();
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, raw) = pair.split_once('=').unwrap_or((pair, ""));
        let value = decode_component(raw);

        match key {
            "search" => state.search = value.trim().to_string(),
            "sort" => state.sort = SortKey::parse(&value),
            "status" => state.status = Status::parse(&value),
            _ => {}
        }
    }

    state
}

/// Shareable location for the characters view
pub fn share_path(state: &QueryState) -> String {
    let query = to_query_string(state);
    if query.is_empty() {
        "/characters".to_string()
    } else {
        format!("/characters?{}", query)
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|v| v.into_owned())
        .unwrap_or(spaced)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_url() {
        let state = parse_query_string("https://example.test/characters?search=Morty&status=DEAD&sort=species-asc");
        assert_eq!(state.search, "Morty");
        assert_eq!(state.status, Some(Status::Dead));
        assert_eq!(state.sort, SortKey::SpeciesAsc);
    }

    #[test]
    fn test_parse_absent_params_are_defaults() {
        assert_eq!(parse_query_string(""), QueryState::default());
        assert_eq!(parse_query_string("?"), QueryState::default());
        assert_eq!(parse_query_string("status=&sort="), QueryState::default());
    }

    #[test]
    fn test_parse_unrecognized_values() {
        let state = parse_query_string("?sort=age&status=zombie&page=4");
        assert_eq!(state, QueryState::default());
    }

    #[test]
    fn test_parse_decodes_plus_and_percent() {
        assert_eq!(parse_query_string("search=Evil+Morty").search, "Evil Morty");
        assert_eq!(parse_query_string("search=Mr.%20Poopybutthole").search, "Mr. Poopybutthole");
    }

    #[test]
    fn test_share_path() {
        assert_eq!(share_path(&QueryState::default()), "/characters");
        let state = QueryState {
            status: Some(Status::Alive),
            ..QueryState::default()
        };
        assert_eq!(share_path(&state), "/characters?status=alive");
    }

    #[test]
    fn test_encoded_state_restores() {
        let state = QueryState {
            search: "Rick & Morty".to_string(),
            status: Some(Status::Unknown),
            sort: SortKey::NameDesc,
        };
        assert_eq!(parse_query_string(&to_query_string(&state)), state);
    }
}
