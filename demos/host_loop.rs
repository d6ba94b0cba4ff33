// Example: drive a coordinator from a simulated host event loop.
use std::sync::{Arc, Mutex};

use scrollwatch::{
    Axis, CoordinatorOptions, DeliveryPolicy, ScrollCoordinator, SurfaceGeometry, SurfaceId,
    WatchEvent, WatchOptions,
};

fn main() {
    let surface = SurfaceId(0);
    let geometry = Arc::new(Mutex::new(Some(SurfaceGeometry {
        content_height: 4000,
        viewport_height: 800,
        ..SurfaceGeometry::default()
    })));

    let provider = Arc::clone(&geometry);
    let mut coordinator =
        ScrollCoordinator::new(CoordinatorOptions::new(move |_| *provider.lock().unwrap()));

    coordinator
        .register(WatchOptions::new(
            surface,
            DeliveryPolicy::FrameCoalesced,
            |event: &WatchEvent| {
                if let WatchEvent::Sample { sample, direction } = event {
                    println!(
                        "frame {:>4}ms  y={:>4}  {:?}  progress={:.2}",
                        sample.timestamp_ms,
                        sample.offset_y(),
                        direction,
                        sample.progress(Axis::Y)
                    );
                }
            },
        ))
        .unwrap();

    // Each frame the "user" scrolls a few times; only the latest position
    // reaches the observer.
    let mut now = 0u64;
    for target in [0u64, 120, 480, 900, 900, 400] {
        for jitter in [0, 7, 11] {
            if let Some(g) = geometry.lock().unwrap().as_mut() {
                g.offset_y = target + jitter;
            }
            coordinator.notify_scroll(surface, now + jitter);
        }
        now += 16;
        if coordinator.needs_frame() {
            coordinator.on_frame(now);
        }
    }
}
