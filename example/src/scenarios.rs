//! Scripted walkthroughs of the carousel engine against the simulated
//! container.

use std::{sync::Arc, time::Instant};

use parking_lot::Mutex;
use tracing::info;
use zoetrope::{
    CarouselArgs, CarouselEngine, Extrapolate, GestureSample, ItemWidth, interpolate,
};

use crate::sim::SimulatedContainer;

const FRAME: f32 = 1.0 / 60.0;

fn drag(dx: f32, vx: f32) -> GestureSample {
    GestureSample {
        dx,
        vx,
        ..GestureSample::default()
    }
}

/// Pump simulated frames into the engine until the container settles.
fn settle(engine: &mut CarouselEngine<SimulatedContainer>) {
    engine.tick(Instant::now());
    loop {
        let offset = engine.container_mut().step(FRAME);
        engine.report_offset(offset);
        if engine.container().is_settled() {
            break;
        }
    }
}

/// Drag through a strip of fixed-width centered items, rendering scale and
/// opacity from the progress signal after every move.
pub fn planet_strip() {
    let planets = [
        "Mercury", "Venus", "Earth", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune",
    ];
    let viewport = 320.0;
    let item_width = 120.0;
    let args = CarouselArgs::default()
        .item_width(ItemWidth::Fixed(item_width))
        .content_offset((viewport - item_width) / 2.0)
        .threshold(item_width / 4.0)
        .data_length(planets.len())
        .on_index_change(|index| info!(index, "planet focused"));
    let mut engine =
        CarouselEngine::new(args, SimulatedContainer::new(viewport)).expect("valid args");

    info!("-- planet strip: drag item by item --");
    for dx in [-70.0, -70.0, -70.0] {
        let sample = drag(dx, 0.0);
        engine.gesture_start(sample);
        engine.gesture_move(sample);
        let offset = engine.container_mut().step(FRAME);
        engine.report_offset(offset);
        engine.gesture_release(sample);
        settle(&mut engine);

        let progress = engine.progress();
        for (index, name) in planets.iter().enumerate() {
            let around = [index as f32 - 1.0, index as f32, index as f32 + 1.0];
            let scale = interpolate(progress, &around, &[0.8, 1.0, 0.8], Extrapolate::Clamp);
            let opacity = interpolate(progress, &around, &[0.5, 1.0, 0.5], Extrapolate::Clamp);
            if scale > 0.8 {
                info!(name, scale, opacity, "visible planet");
            }
        }
    }
}

/// Flick through a deck with release velocity advancing extra indices.
pub fn fling_deck() {
    let args = CarouselArgs::default()
        .item_width(ItemWidth::Fixed(300.0))
        .data_length(12)
        .on_index_change(|index| info!(index, "card landed"));
    let mut engine =
        CarouselEngine::new(args, SimulatedContainer::new(320.0)).expect("valid args");

    info!("-- fling deck: velocity skips cards --");
    for (dx, vx) in [(-160.0, -0.4), (-160.0, -2.3), (-40.0, -3.8)] {
        let sample = drag(dx, vx);
        engine.gesture_start(sample);
        engine.gesture_move(sample);
        engine.gesture_release(sample);
        settle(&mut engine);
        info!(
            dx,
            vx,
            index = engine.current_index(),
            progress = engine.progress(),
            "fling settled"
        );
    }
}

/// Drive the index from outside and watch the deferred jump fire, plus the
/// end-reached notification near the tail of the dataset.
pub fn remote_control() {
    let reached = Arc::new(Mutex::new(false));
    let sink = reached.clone();
    let args = CarouselArgs::default()
        .item_width(ItemWidth::Fixed(100.0))
        .data_length(10)
        .on_end_reached(move || {
            *sink.lock() = true;
        });
    let mut engine =
        CarouselEngine::new(args, SimulatedContainer::new(320.0)).expect("valid args");

    info!("-- remote control: external index jumps --");
    for index in [4, 9] {
        engine.set_index(index);
        settle(&mut engine);
        info!(
            index = engine.current_index(),
            progress = engine.progress(),
            end_reached = *reached.lock(),
            "external jump settled"
        );
    }
}
