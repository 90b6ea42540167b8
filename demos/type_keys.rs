//! Virtual keyboard example.
//!
//! Run with: cargo run --example type_keys
//!
//! WARNING: This will actually type into the focused window!

use std::thread::sleep;
use std::time::Duration;
use vkbd::codes::{KEY_ENTER, KEY_H, KEY_I, KEY_LEFTSHIFT};
use vkbd::{DeviceConfig, VirtualKeyboard};

fn main() {
    println!("vkbd typing example");
    println!("===================\n");
    println!("WARNING: This will type \"Hi\" and Enter into the focused window!\n");

    let config = DeviceConfig::from_env().with_name("vkbd example keyboard");
    let keys = [KEY_LEFTSHIFT, KEY_H, KEY_I, KEY_ENTER];

    let mut kbd = match VirtualKeyboard::with_config(config, &keys) {
        Ok(kbd) => kbd,
        Err(e) => {
            eprintln!("Error: {}", e);
            if e.is_permission_denied() {
                eprintln!("Add yourself to the group owning /dev/uinput, or run as root.");
            }
            std::process::exit(1);
        }
    };
    if let Some(path) = kbd.opened_path() {
        println!("Using {}", path.display());
    }

    println!("Starting in 3 seconds... (Press Ctrl+C to cancel)\n");
    sleep(Duration::from_secs(3));

    let result = type_hi(&mut kbd);

    match result {
        Ok(()) => println!("Done!"),
        Err(e) => eprintln!("Error: {}", e),
    }
}

fn type_hi(kbd: &mut VirtualKeyboard) -> vkbd::Result<()> {
    kbd.press(KEY_LEFTSHIFT)?;
    kbd.press(KEY_H)?;
    kbd.release(KEY_H)?;
    kbd.release(KEY_LEFTSHIFT)?;
    for key in [KEY_I, KEY_ENTER] {
        kbd.press(key)?;
        sleep(Duration::from_millis(20));
        kbd.release(key)?;
    }
    Ok(())
}
