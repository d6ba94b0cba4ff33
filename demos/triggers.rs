// Example: back-to-top button, infinite loading, and a parallax header built
// from the derived-observer constructors.
use std::sync::{Arc, Mutex};

use scrollwatch::{
    Axis, CoordinatorOptions, Crossing, DeliveryPolicy, ScrollCoordinator, SurfaceGeometry,
    SurfaceId, WatchOptions, on_parallax, on_remaining, on_threshold,
};

fn main() {
    let surface = SurfaceId(0);
    let geometry = Arc::new(Mutex::new(Some(SurfaceGeometry {
        content_height: 10_000,
        viewport_height: 1_000,
        ..SurfaceGeometry::default()
    })));

    let provider = Arc::clone(&geometry);
    let mut coordinator =
        ScrollCoordinator::new(CoordinatorOptions::new(move |_| *provider.lock().unwrap()));

    coordinator
        .register(WatchOptions::from_observer(
            surface,
            DeliveryPolicy::FrameCoalesced,
            on_threshold(Axis::Y, 600, |crossing, sample| match crossing {
                Crossing::Enter => println!("y={:>5}: show back-to-top", sample.offset_y()),
                Crossing::Exit => println!("y={:>5}: hide back-to-top", sample.offset_y()),
            }),
        ))
        .unwrap();

    coordinator
        .register(WatchOptions::from_observer(
            surface,
            DeliveryPolicy::FrameCoalesced,
            on_remaining(Axis::Y, 1_500, |crossing, sample| {
                if crossing == Crossing::Enter {
                    println!(
                        "y={:>5}: near the end ({} left), load next page",
                        sample.offset_y(),
                        sample.remaining(Axis::Y)
                    );
                }
            }),
        ))
        .unwrap();

    coordinator
        .register(WatchOptions::from_observer(
            surface,
            DeliveryPolicy::FrameCoalesced,
            on_parallax(Axis::Y, 0.3, |translated, sample| {
                println!("y={:>5}: header translate {translated}", sample.offset_y());
            }),
        ))
        .unwrap();

    for (frame, y) in [0u64, 700, 3_000, 8_200, 9_000, 200].into_iter().enumerate() {
        let now = frame as u64 * 16;
        if let Some(g) = geometry.lock().unwrap().as_mut() {
            g.offset_y = y;
        }
        coordinator.notify_scroll(surface, now);
        coordinator.on_frame(now);
    }
}
