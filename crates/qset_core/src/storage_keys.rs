pub const META_PREFIX: &str = "meta/";
pub const CARDS_ROOT: &str = "q_cards";
pub const ANSWERS_ROOT: &str = "answers";

const JSON_EXTENSION: &str = ".json";

pub fn meta_object_key(set_name: &str) -> String {
    format!("{META_PREFIX}{set_name}{JSON_EXTENSION}")
}

pub fn cards_prefix(set_name: &str) -> String {
    format!("{CARDS_ROOT}/{set_name}/")
}

pub fn card_object_key(set_name: &str, card_key: &str) -> String {
    format!("{}{card_key}", cards_prefix(set_name))
}

/// Prefix covering every round a user has answered in a set.
pub fn answers_prefix(set_name: &str, user: &str) -> String {
    format!("{ANSWERS_ROOT}/{set_name}/{user}/")
}

/// `.json` is appended only when the card name does not already carry it, so
/// the trailing segment matches the card's own key suffix either way.
pub fn answer_object_key(set_name: &str, user: &str, a_round: u32, card_name: &str) -> String {
    let file_name = if card_name.ends_with(JSON_EXTENSION) {
        card_name.to_string()
    } else {
        format!("{card_name}{JSON_EXTENSION}")
    };
    format!("{}{a_round}/{file_name}", answers_prefix(set_name, user))
}

/// Trailing path segment of an object key.
pub fn key_suffix(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}

/// Set name for a metadata key: the trailing segment without its final extension.
pub fn set_name_from_meta_key(key: &str) -> &str {
    let file_name = key_suffix(key);
    match file_name.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => file_name,
    }
}

/// Listing filter shared by card and answer traversal.
pub fn is_json_key(key: &str) -> bool {
    key.contains("json")
}
