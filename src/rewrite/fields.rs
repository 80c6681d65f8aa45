//! `#[field(offset = ..)]` attributes on `raw_struct` fields.
//!
//! The struct and field names are resolved to a table key through
//! [`FIELD_MAP`]; only the literal inside the attribute is rewritten.

use super::lines::{next_non_blank, split_lines};
use crate::edit::{apply_edits, Edit, EditError};
use crate::literal;
use crate::table::OffsetTable;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// (struct, field) pairs and the table key that holds their offset.
pub const FIELD_MAP: &[(&str, &str, &str)] = &[
    ("UWorld", "u_level", "CurrentLevel"),
    ("UWorld", "game_instance", "GameInstance"),
    ("ULevel", "actors", "Actors"),
    ("GameInstance", "local_player", "LocalPlayers"),
    ("ULocalPlayer", "player_controller", "PlayerController"),
    ("AActor", "root_component", "RootComponent"),
    ("AActor", "id", "offset"),
    ("APlayerController", "player_camera_manager", "PlayerCameraManager"),
    ("APawn", "last_team_num", "LastTeamNum"),
    ("ACharacter", "health_flag", "Health0"),
    ("ACharacter", "health", "Health"),
    ("ACharacter", "health1", "Health1"),
    ("ACharacter", "health2", "Health2"),
    ("ACharacter", "health3", "Health3"),
    ("ACharacter", "health5", "Health5"),
    ("ACharacter", "health6", "Health6"),
    ("ACharacter", "mesh", "Mesh"),
    ("USkeletalMeshComponent", "always_create_physics_state", "bAlwaysCreatePhysicsState"),
    ("APlayerCameraManager", "camera_rot", "CameraRot"),
    ("APlayerCameraManager", "camera_pos", "CameraPos"),
    ("USceneComponent", "relative_location", "ComponentLocation"),
];

type FieldKeys = HashMap<&'static str, HashMap<&'static str, &'static str>>;

static FIELD_KEYS: Lazy<FieldKeys> = Lazy::new(|| {
    let mut keys = FieldKeys::new();
    for &(owner, field, key) in FIELD_MAP {
        keys.entry(owner).or_default().insert(field, key);
    }
    keys
});

pub(crate) static STRUCT_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:pub(?:\([^)]*\))?\s+)?struct\s+([A-Za-z0-9_]+)")
        .expect("struct pattern is valid")
});

pub(crate) static OFFSET_ATTR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"#\[field\(offset\s*=\s*(0[xX][0-9A-Fa-f]+|\d+)\)\]")
        .expect("offset attribute pattern is valid")
});

static FIELD_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"pub\s+([A-Za-z0-9_]+)\s*:").expect("field pattern is valid")
});

/// Table key for `field` of `owner`, if the pair is mapped.
pub fn field_key(owner: &str, field: &str) -> Option<&'static str> {
    FIELD_KEYS.get(owner)?.get(field).copied()
}

/// Plan offset-attribute rewrites for every mapped field whose key is in `table`.
pub fn plan_field_offsets(text: &str, table: &OffsetTable) -> Vec<Edit> {
    let lines = split_lines(text);
    let mut edits = Vec::new();
    let mut current_struct: Option<&str> = None;

    for (index, line) in lines.iter().enumerate() {
        if let Some(caps) = STRUCT_DECL.captures(line.text) {
            current_struct = caps.get(1).map(|m| m.as_str());
        }

        let Some(literal_match) = OFFSET_ATTR.captures(line.text).and_then(|c| c.get(1)) else {
            continue;
        };
        let Some(owner) = current_struct else {
            continue;
        };
        let Some(field_line) = next_non_blank(&lines, index) else {
            continue;
        };
        let Some(field) = FIELD_DECL
            .captures(lines[field_line].text)
            .and_then(|c| c.get(1))
        else {
            continue;
        };
        let Some(key) = field_key(owner, field.as_str()) else {
            continue;
        };
        let Some(value) = table.get(key) else {
            continue;
        };

        let old = literal_match.as_str();
        if let Some(new_text) = literal::replacement(old, value) {
            tracing::debug!(owner, field = field.as_str(), key, old, new = %new_text, "field offset");
            let start = line.start + literal_match.start();
            edits.push(Edit::new(start, start + old.len(), new_text, old));
        }
    }

    edits
}

/// Rewrite mapped field offsets in `text` from `table`.
pub fn rewrite_field_offsets(text: &str, table: &OffsetTable) -> Result<String, EditError> {
    apply_edits(text, plan_field_offsets(text, table))
}
