use crate::{input::data::GameAction, KeyMap};
use bevy::input::ButtonInput;
use bevy::prelude::*;
use ron::{from_str, ser::PrettyConfig};
use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::Write,
    path::Path,
};

fn write_keybindings_to_path(key_map: &KeyMap, binds_path: &Path) -> Result<(), std::io::Error> {
    let pretty_config = PrettyConfig::new()
        .with_depth_limit(3)
        .with_separate_tuple_members(true)
        .with_enumerate_arrays(true);

    let serialized = ron::ser::to_string_pretty(key_map, pretty_config)
        .map_err(|_| std::io::Error::new(std::io::ErrorKind::Other, "serialization failed"))?;
    if let Some(parent) = binds_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(binds_path)?;
    file.write_all(serialized.as_bytes())
}

pub fn is_action_just_pressed(
    action: GameAction,
    keyboard_input: &ButtonInput<KeyCode>,
    key_map: &KeyMap,
) -> bool {
    key_map
        .map
        .get(&action)
        .is_some_and(|keys| keyboard_input.any_just_pressed(keys.iter().copied()))
}

pub(crate) fn default_key_map() -> BTreeMap<GameAction, Vec<KeyCode>> {
    let mut map = BTreeMap::new();
    map.insert(GameAction::SpawnBody, vec![KeyCode::KeyG]);
    map.insert(GameAction::ClearBodies, vec![KeyCode::KeyC]);
    map.insert(GameAction::ClearWaves, vec![KeyCode::KeyR]);
    map.insert(GameAction::ResetCamera, vec![KeyCode::Home]);
    map.insert(GameAction::Escape, vec![KeyCode::Escape]);
    map
}

/// Reads bindings from `binds_path`, writing the defaults there when the file
/// is missing or unreadable.
pub fn get_bindings(binds_path: &Path) -> KeyMap {
    if let Ok(content) = fs::read_to_string(binds_path) {
        match from_str::<KeyMap>(&content) {
            Ok(key_map) => return key_map,
            Err(e) => warn!("Ignoring malformed keybindings in {:?}: {}", binds_path, e),
        }
    }

    let key_map = KeyMap::default();
    if let Err(e) = write_keybindings_to_path(&key_map, binds_path) {
        error!(
            "Failed to create default keybindings file at {:?}: {}",
            binds_path, e
        );
    }
    key_map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings_cover_every_action() {
        let map = default_key_map();
        for action in [
            GameAction::SpawnBody,
            GameAction::ClearBodies,
            GameAction::ClearWaves,
            GameAction::ResetCamera,
            GameAction::Escape,
        ] {
            assert!(map.get(&action).is_some_and(|keys| !keys.is_empty()));
        }
        assert_eq!(map[&GameAction::SpawnBody], vec![KeyCode::KeyG]);
    }

    #[test]
    fn test_action_lookup() {
        let key_map = KeyMap::default();
        let mut input = ButtonInput::<KeyCode>::default();
        input.press(KeyCode::KeyG);

        assert!(is_action_just_pressed(GameAction::SpawnBody, &input, &key_map));
        assert!(!is_action_just_pressed(GameAction::ClearWaves, &input, &key_map));

        input.clear();
        assert!(!is_action_just_pressed(GameAction::SpawnBody, &input, &key_map));
    }

    #[test]
    fn test_missing_bindings_file_is_created() {
        let path = std::env::temp_dir().join(format!("ripple_keys_{}.ron", std::process::id()));
        let _ = fs::remove_file(&path);

        let key_map = get_bindings(&path);
        assert_eq!(key_map.map, default_key_map());
        assert!(path.exists());

        let reloaded = get_bindings(&path);
        let _ = fs::remove_file(&path);
        assert_eq!(reloaded.map, key_map.map);
    }
}
