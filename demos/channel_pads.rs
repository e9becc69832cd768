use std::thread;
use std::time::Duration;

use padmux::{ChannelPad, EventMultiQueue, KeyNumbering, Scanner, TickClock, TickMs, VirtualPad};

fn main() {
    env_logger::init();

    let clock = TickClock::start();

    // Pad 0 is an ordinary scripted pad; pad 1 is fed from another thread
    // through its sender handle.
    let mut local = VirtualPad::new(4);
    let (remote, sender) = ChannelPad::new(12);

    local.press(1, TickMs(0));
    local.release(1, TickMs(45));

    let producer = {
        let clock = clock.clone();
        thread::spawn(move || {
            for key in [0u16, 5, 11] {
                sender.press(key, clock.now());
                thread::sleep(Duration::from_millis(20));
                sender.release(key, clock.now());
            }
        })
    };

    let pads: Vec<Box<dyn Scanner>> = vec![Box::new(local), Box::new(remote)];
    let mut queue = EventMultiQueue::new(pads, KeyNumbering::Unified);

    // Poll while the producer runs, like a firmware main loop would.
    loop {
        while let Some(event) = queue.get() {
            println!("  {}", event);
        }
        if producer.is_finished() {
            break;
        }
        thread::sleep(Duration::from_millis(5));
    }
    let _ = producer.join();

    // Sweep up anything still in flight when the producer exited.
    while let Some(event) = queue.get() {
        println!("  {}", event);
    }

    println!("drained after {}", clock.now());
}
