use crate::builder::MsgpackObjectBuilder;
use crate::model::{DndMode, NotificationOverride};

const SOUND: &str = "sound";
const DND: &str = "dnd";
const MODE: &str = "mode";
const UNTIL: &str = "until";
const MENTION_ONLY: &str = "mentionOnly";

/// `{sound{mode}, dnd{mode, until?, mentionOnly?}}`.
///
/// `mentionOnly` is only meaningful for groups while do-not-disturb is active.
pub fn convert(settings: &NotificationOverride, is_group: bool) -> MsgpackObjectBuilder {
    let sound = MsgpackObjectBuilder::new().put(
        MODE,
        if settings.sound_muted { "muted" } else { "default" },
    );
    let (mode, until) = match settings.dnd {
        DndMode::Off => ("off", None),
        DndMode::On => ("on", None),
        DndMode::Until(until) => ("until", Some(until)),
    };
    let mention_only = (is_group && settings.dnd != DndMode::Off).then_some(settings.mention_only);
    let dnd = MsgpackObjectBuilder::new()
        .put(MODE, mode)
        .maybe_put(UNTIL, until)
        .maybe_put(MENTION_ONLY, mention_only);
    MsgpackObjectBuilder::new().put(SOUND, sound).put(DND, dnd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use webclient_msgpack::{decode, PackValue};

    #[test]
    fn defaults_only_carry_modes() {
        let value = decode(&convert(&NotificationOverride::default(), true).consume()).unwrap();
        assert_eq!(value.path("sound.mode").and_then(PackValue::as_str), Some("default"));
        assert_eq!(value.path("dnd.mode").and_then(PackValue::as_str), Some("off"));
        assert_eq!(value.get("dnd").map(|dnd| dnd.keys().len()), Some(1));
    }

    #[test]
    fn timed_group_dnd() {
        let settings = NotificationOverride {
            sound_muted: true,
            dnd: DndMode::Until(1_700_000_000_000),
            mention_only: true,
        };
        let value = decode(&convert(&settings, true).consume()).unwrap();
        assert_eq!(value.path("sound.mode").and_then(PackValue::as_str), Some("muted"));
        assert_eq!(value.path("dnd.mode").and_then(PackValue::as_str), Some("until"));
        assert_eq!(value.path("dnd.until").and_then(PackValue::as_i64), Some(1_700_000_000_000));
        assert_eq!(value.path("dnd.mentionOnly").and_then(PackValue::as_bool), Some(true));

        let value = decode(&convert(&settings, false).consume()).unwrap();
        assert!(value.path("dnd.mentionOnly").is_none());
    }
}
