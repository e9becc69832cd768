use padmux::{MultiKeypad, TickMs, VirtualPad};

fn main() {
    env_logger::init();

    // Script two pads with interleaved timestamps, as if both were being
    // typed on at once.
    let mut left = VirtualPad::new(6);
    let mut right = VirtualPad::new(4);

    left.press(0, TickMs(100));
    right.press(2, TickMs(104));
    left.release(0, TickMs(180));
    right.press(3, TickMs(180)); // same tick: the left pad wins the tie
    right.release(2, TickMs(215));
    right.release(3, TickMs(260));

    let mut pads = MultiKeypad::new(vec![Box::new(left), Box::new(right)]);
    println!(
        "{} pads, {} keys total, {} event(s) queued",
        pads.pad_count(),
        pads.key_count(),
        pads.events.len()
    );

    // Drain the merged stream: one timeline, unified key numbers.
    while let Some(event) = pads.events.get() {
        println!("  {} (pad-local key {})", event, event.raw.key_number);
    }

    if pads.events.overflowed() {
        println!("overflow: some transitions were dropped");
    } else {
        println!("done, nothing dropped");
    }
}
