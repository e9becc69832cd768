use padmux::{LayoutProfile, MultiKeypad, TickMs, VirtualPad};

const PROFILE: &str = r#"
name = "stream desk"
description = "4-key pad on the left, 8-key pad on the right"

[[bindings]]
key_number = 0
action = "mic:mute"

[[bindings]]
key_number = 0
action = "mic:unmute"
on_release = true

[[bindings]]
key_number = 4
action = "scene:gameplay"

[[bindings]]
key_number = 11
action = "scene:brb"
"#;

fn main() {
    env_logger::init();

    let profile = match LayoutProfile::from_toml(PROFILE) {
        Ok(profile) => profile,
        Err(err) => {
            eprintln!("bad profile: {err}");
            return;
        }
    };

    let mut left = VirtualPad::new(4);
    let mut right = VirtualPad::new(8);
    left.press(0, TickMs(10)); // unified key 0 -> mic:mute
    right.press(0, TickMs(25)); // unified key 4 -> scene:gameplay
    left.release(0, TickMs(90)); // unified key 0 -> mic:unmute
    right.press(7, TickMs(130)); // unified key 11 -> scene:brb
    right.release(7, TickMs(170)); // no release binding

    let mut pads = MultiKeypad::new(vec![Box::new(left), Box::new(right)]);

    // Catch bindings that point past the actual deck before going live.
    if let Err(err) = profile.validate(pads.key_count()) {
        eprintln!("profile does not fit this deck: {err}");
        return;
    }

    println!("profile '{}' on a {}-key deck", profile.name, pads.key_count());
    while let Some(event) = pads.events.get() {
        match profile.resolve(&event) {
            Some(action) => println!("  {} -> {}", event, action),
            None => println!("  {} -> (unbound)", event),
        }
    }
}
