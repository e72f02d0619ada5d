//! Gesture orchestration over the sync controller and the container.

use std::time::Instant;

use tracing::{debug, warn};

use crate::{
    callback::{Callback, CallbackWith},
    config::{CarouselArgs, CarouselConfig},
    container::ScrollContainer,
    error::CarouselError,
    gesture::{GestureClassifier, GestureSample},
    item::RenderInfo,
    signal::ProgressSignal,
    sync::{JumpRequest, ScrollSyncController},
};

enum GesturePhase {
    Idle,
    Dragging { last_sample: GestureSample },
}

struct DeferredJump {
    index: usize,
    scheduled_at: Instant,
}

struct EngineCallbacks {
    on_index_change: CallbackWith<usize>,
    on_gesture_start: CallbackWith<GestureSample>,
    on_gesture_release: CallbackWith<GestureSample>,
    on_end_reached: Callback,
}

impl EngineCallbacks {
    fn from_args(args: &CarouselArgs) -> Self {
        Self {
            on_index_change: args.on_index_change.clone(),
            on_gesture_start: args.on_gesture_start.clone(),
            on_gesture_release: args.on_gesture_release.clone(),
            on_end_reached: args.on_end_reached.clone(),
        }
    }
}

/// The carousel engine: routes gesture lifecycle events and external prop
/// changes into the sync controller, drives the injected
/// [`ScrollContainer`], and fires notifications.
///
/// One gesture at a time: **Idle** until a candidate move passes the capture
/// predicate, **Dragging** until release or a granted termination request.
/// Release resolves the target index and fires an animated jump without
/// waiting for it; the engine is immediately ready for the next gesture.
///
/// External index changes do not jump immediately: they are held as a
/// cancellable deferred jump fired by the next [`tick`](Self::tick), giving
/// pending layout a beat to settle. A newer `set_index`, an intervening
/// release, or disposal cancels the pending jump.
pub struct CarouselEngine<C: ScrollContainer> {
    container: C,
    config: CarouselConfig,
    classifier: GestureClassifier,
    callbacks: EngineCallbacks,
    controller: ScrollSyncController,
    phase: GesturePhase,
    deferred: Option<DeferredJump>,
    prop_index: usize,
    end_reached_threshold: f32,
    end_reached_armed: bool,
}

impl<C: ScrollContainer> CarouselEngine<C> {
    /// Validate `args` against the container and mount the engine.
    pub fn new(args: CarouselArgs, container: C) -> Result<Self, CarouselError> {
        let config = CarouselConfig::resolve(&args, container.viewport_width())?;
        let controller = ScrollSyncController::new(args.index, &config);
        Ok(Self {
            container,
            config,
            classifier: GestureClassifier::new(
                args.should_capture.clone(),
                args.should_release.clone(),
            ),
            callbacks: EngineCallbacks::from_args(&args),
            controller,
            phase: GesturePhase::Idle,
            deferred: None,
            prop_index: args.index,
            end_reached_threshold: args.on_end_reached_threshold,
            end_reached_armed: true,
        })
    }

    /// A candidate gesture started; returns whether the carousel claimed it.
    pub fn gesture_start(&mut self, sample: GestureSample) -> bool {
        if !self.classifier.should_capture(sample) {
            return false;
        }
        if self.config.data_length == 0 {
            warn!("gesture ignored: dataset is empty");
            return false;
        }
        debug!(dx = sample.dx, "gesture captured");
        self.phase = GesturePhase::Dragging {
            last_sample: sample,
        };
        self.callbacks.on_gesture_start.call(sample);
        true
    }

    /// The captured gesture moved; tracks the finger 1:1.
    pub fn gesture_move(&mut self, sample: GestureSample) {
        let GesturePhase::Dragging { last_sample } = &mut self.phase else {
            return;
        };
        *last_sample = sample;
        match self.controller.gesture_move(sample, &self.config) {
            Ok(jump) => self.apply_jump(jump),
            Err(err) => warn!(%err, "gesture move dropped"),
        }
    }

    /// The captured gesture ended; resolves the target index, fires an
    /// animated jump toward it, and notifies `on_index_change` (repeat
    /// indices included; consumers treat duplicates as no-ops).
    pub fn gesture_release(&mut self, sample: GestureSample) {
        if !matches!(self.phase, GesturePhase::Dragging { .. }) {
            return;
        }
        self.phase = GesturePhase::Idle;
        // A release outranks any still-pending external jump.
        self.deferred = None;
        match self.controller.gesture_release(sample, &self.config) {
            Ok((index, jump)) => {
                self.apply_jump(jump);
                self.callbacks.on_index_change.call(index);
                self.callbacks.on_gesture_release.call(sample);
            }
            Err(err) => warn!(%err, "gesture release dropped"),
        }
    }

    /// An ancestor asked to take over the gesture. Consults the release
    /// predicate; when granted, the gesture ends exactly as a release with
    /// this last known sample, so the scroll position is never left
    /// mid-drag. Returns whether the capture was ceded.
    pub fn termination_request(&mut self, sample: GestureSample) -> bool {
        if !matches!(self.phase, GesturePhase::Dragging { .. }) {
            return false;
        }
        if !self.classifier.should_release(sample) {
            return false;
        }
        debug!("capture ceded to ancestor");
        self.gesture_release(sample);
        true
    }

    /// The container's visible position changed. Feeds the sync controller
    /// (which publishes progress) and the end-reached watch.
    pub fn report_offset(&mut self, offset: f32) {
        self.controller.report_offset(offset, &self.config);
        self.watch_end_reached(offset);
    }

    /// Externally controlled index change: schedule a deferred animated jump
    /// to `index`, superseding any previously pending one. The jump fires on
    /// the next [`tick`](Self::tick); `on_index_change` is not invoked for
    /// this path since the change originated with the caller.
    pub fn set_index(&mut self, index: usize) {
        if self.config.data_length == 0 {
            warn!(index, "external index ignored: dataset is empty");
            return;
        }
        let clamped = self.config.clamp_index(index);
        if clamped != index {
            warn!(index, clamped, "external index out of range");
        }
        if clamped == self.controller.current_index() {
            return;
        }
        debug!(index = clamped, "external jump scheduled");
        self.deferred = Some(DeferredJump {
            index: clamped,
            scheduled_at: Instant::now(),
        });
    }

    /// Advance the engine clock: fires a due deferred jump, if any.
    pub fn tick(&mut self, now: Instant) {
        let Some(deferred) = self.deferred.take() else {
            return;
        };
        debug!(
            index = deferred.index,
            deferred_for = ?now.saturating_duration_since(deferred.scheduled_at),
            "external jump firing"
        );
        match self
            .controller
            .apply_external_index(deferred.index, &self.config)
        {
            Ok(jump) => self.apply_jump(jump),
            Err(err) => warn!(%err, "external jump dropped"),
        }
    }

    /// Re-validate and adopt a new configuration.
    ///
    /// Width changes re-anchor the scroll position so progress does not
    /// jump; dataset changes clamp the index back into range; an `index`
    /// prop that changed since the last update schedules a deferred jump,
    /// mirroring [`set_index`](Self::set_index).
    pub fn update_args(&mut self, args: CarouselArgs) -> Result<(), CarouselError> {
        let new_config = CarouselConfig::resolve(&args, self.container.viewport_width())?;
        if new_config.item_width != self.config.item_width {
            self.controller.rescale_item_width(new_config.item_width);
        }
        let data_length_changed = new_config.data_length != self.config.data_length;
        self.config = new_config;
        self.classifier =
            GestureClassifier::new(args.should_capture.clone(), args.should_release.clone());
        self.callbacks = EngineCallbacks::from_args(&args);
        self.end_reached_threshold = args.on_end_reached_threshold;

        if data_length_changed {
            if let Some(jump) = self.controller.reconcile_data_length(&self.config) {
                self.apply_jump(jump);
            }
        }
        if args.index != self.prop_index {
            self.prop_index = args.index;
            self.set_index(args.index);
        }
        Ok(())
    }

    /// Cancel pending deferred work. Dropping the engine does the same; the
    /// explicit form exists for embeddings that unmount before dropping.
    pub fn dispose(&mut self) {
        if self.deferred.take().is_some() {
            debug!("pending external jump cancelled");
        }
        self.phase = GesturePhase::Idle;
    }

    /// Resolved page index.
    pub fn current_index(&self) -> usize {
        self.controller.current_index()
    }

    /// Latest published progress value.
    pub fn progress(&self) -> f32 {
        self.controller.progress()
    }

    /// A read handle on the progress signal for item renderers.
    pub fn progress_signal(&self) -> ProgressSignal {
        self.controller.signal()
    }

    /// The active validated configuration.
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Whether a gesture currently holds the capture.
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, GesturePhase::Dragging { .. })
    }

    /// Shared access to the injected container.
    pub fn container(&self) -> &C {
        &self.container
    }

    /// Exclusive access to the injected container.
    pub fn container_mut(&mut self) -> &mut C {
        &mut self.container
    }

    /// Build the per-item exposure for `items[item_index]`.
    pub fn render_info<'a, T>(&self, items: &'a [T], item_index: usize) -> Option<RenderInfo<'a, T>> {
        Some(RenderInfo {
            item: items.get(item_index)?,
            item_index,
            current_index: self.current_index(),
            item_count: items.len(),
            progress: self.progress(),
        })
    }

    fn apply_jump(&mut self, jump: JumpRequest) {
        self.container
            .jump_to(jump.offset + self.config.content_offset, jump.animated);
    }

    fn watch_end_reached(&mut self, container_offset: f32) {
        if self.config.data_length == 0 {
            return;
        }
        let viewport = self.container.viewport_width();
        let content_length =
            self.config.data_length as f32 * self.config.item_width + 2.0 * self.config.content_offset;
        let distance_from_end = content_length - (container_offset + viewport);
        if distance_from_end < self.end_reached_threshold * viewport {
            if self.end_reached_armed {
                self.end_reached_armed = false;
                debug!(distance_from_end, "end reached");
                self.callbacks.on_end_reached.call();
            }
        } else {
            self.end_reached_armed = true;
        }
    }
}

impl<C: ScrollContainer> Drop for CarouselEngine<C> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };
    use std::time::{Duration, Instant};

    use parking_lot::Mutex;

    use super::*;
    use crate::config::ItemWidth;

    /// Test double: records every jump request verbatim.
    struct RecordingContainer {
        viewport: f32,
        jumps: Vec<(f32, bool)>,
    }

    impl RecordingContainer {
        fn new(viewport: f32) -> Self {
            Self {
                viewport,
                jumps: Vec::new(),
            }
        }
    }

    impl ScrollContainer for RecordingContainer {
        fn viewport_width(&self) -> f32 {
            self.viewport
        }

        fn jump_to(&mut self, offset: f32, animated: bool) {
            self.jumps.push((offset, animated));
        }
    }

    fn args(item_width: f32, data_length: usize) -> CarouselArgs {
        CarouselArgs::default()
            .item_width(ItemWidth::Fixed(item_width))
            .data_length(data_length)
    }

    fn engine(args: CarouselArgs) -> CarouselEngine<RecordingContainer> {
        CarouselEngine::new(args, RecordingContainer::new(320.0)).expect("valid args")
    }

    fn drag(dx: f32) -> GestureSample {
        GestureSample {
            dx,
            ..GestureSample::default()
        }
    }

    #[test]
    fn capture_follows_the_classifier_and_dataset() {
        let mut full = engine(args(100.0, 5));
        assert!(!full.gesture_start(drag(0.5)));
        assert!(full.gesture_start(drag(-30.0)));
        assert!(full.is_dragging());

        let mut empty = engine(args(100.0, 0));
        assert!(!empty.gesture_start(drag(-30.0)));
    }

    #[test]
    fn moves_jump_without_animation_and_track_the_finger() {
        let mut engine = engine(args(100.0, 5).index(2));
        engine.gesture_start(drag(-10.0));
        engine.gesture_move(drag(-10.0));
        engine.gesture_move(drag(-55.0));
        assert_eq!(
            engine.container().jumps,
            vec![(210.0, false), (255.0, false)]
        );
        // Progress only moves once the container reports back.
        assert_eq!(engine.progress(), 2.0);
        engine.report_offset(255.0);
        assert_eq!(engine.progress(), 2.55);
    }

    #[test]
    fn moves_without_a_capture_are_ignored() {
        let mut engine = engine(args(100.0, 5));
        engine.gesture_move(drag(-50.0));
        assert!(engine.container().jumps.is_empty());
    }

    #[test]
    fn release_resolves_animates_and_always_notifies() {
        let notified = Arc::new(Mutex::new(Vec::new()));
        let sink = notified.clone();
        let mut engine = engine(
            args(100.0, 10)
                .index(2)
                .on_index_change(move |index| sink.lock().push(index)),
        );

        engine.gesture_start(drag(-150.0));
        engine.gesture_release(drag(-150.0));
        assert!(!engine.is_dragging());
        assert_eq!(engine.current_index(), 4);
        assert_eq!(engine.container().jumps.last(), Some(&(400.0, true)));

        // A wiggle that resolves back to the same index still notifies;
        // consumers treat the repeat as a no-op.
        engine.gesture_start(drag(-10.0));
        engine.gesture_release(drag(-10.0));
        assert_eq!(*notified.lock(), vec![4, 4]);
    }

    #[test]
    fn gesture_lifecycle_callbacks_fire() {
        let starts = Arc::new(AtomicUsize::new(0));
        let releases = Arc::new(AtomicUsize::new(0));
        let s = starts.clone();
        let r = releases.clone();
        let mut engine = engine(
            args(100.0, 5)
                .on_gesture_start(move |_| {
                    s.fetch_add(1, Ordering::SeqCst);
                })
                .on_gesture_release(move |_| {
                    r.fetch_add(1, Ordering::SeqCst);
                }),
        );
        engine.gesture_start(drag(-20.0));
        engine.gesture_move(drag(-40.0));
        engine.gesture_release(drag(-40.0));
        assert_eq!(starts.load(Ordering::SeqCst), 1);
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn granted_termination_behaves_like_a_release() {
        let mut engine = CarouselEngine::new(
            args(100.0, 10)
                .index(1)
                .should_release(|_| true),
            RecordingContainer::new(320.0),
        )
        .expect("valid args");

        engine.gesture_start(drag(-80.0));
        assert!(engine.termination_request(drag(-80.0)));
        assert!(!engine.is_dragging());
        assert_eq!(engine.current_index(), 2);
        assert_eq!(engine.container().jumps.last(), Some(&(200.0, true)));
    }

    #[test]
    fn default_policy_refuses_termination() {
        let mut engine = engine(args(100.0, 10));
        engine.gesture_start(drag(-80.0));
        assert!(!engine.termination_request(drag(-80.0)));
        assert!(engine.is_dragging());
    }

    #[test]
    fn external_index_change_defers_one_tick_and_stays_silent() {
        let notified = Arc::new(AtomicUsize::new(0));
        let sink = notified.clone();
        let mut engine = engine(
            args(100.0, 10)
                .index(2)
                .content_offset(25.0)
                .on_index_change(move |_| {
                    sink.fetch_add(1, Ordering::SeqCst);
                }),
        );

        engine.set_index(4);
        // Nothing happens until the clock advances.
        assert!(engine.container().jumps.is_empty());
        assert_eq!(engine.current_index(), 2);

        engine.tick(Instant::now());
        assert_eq!(engine.current_index(), 4);
        assert_eq!(engine.container().jumps, vec![(425.0, true)]);
        assert_eq!(notified.load(Ordering::SeqCst), 0);

        // One jump per schedule: the next tick is a no-op.
        engine.tick(Instant::now());
        assert_eq!(engine.container().jumps.len(), 1);
    }

    #[test]
    fn newer_set_index_supersedes_the_pending_jump() {
        let mut engine = engine(args(100.0, 10));
        engine.set_index(4);
        engine.set_index(7);
        engine.tick(Instant::now());
        assert_eq!(engine.container().jumps, vec![(700.0, true)]);
    }

    #[test]
    fn release_cancels_the_pending_external_jump() {
        let mut engine = engine(args(100.0, 10).index(2));
        engine.set_index(8);
        engine.gesture_start(drag(-150.0));
        engine.gesture_release(drag(-150.0));
        engine.tick(Instant::now());
        // Only the release jump: the scheduled jump to 8 never fires.
        assert_eq!(engine.container().jumps, vec![(400.0, true)]);
        assert_eq!(engine.current_index(), 4);
    }

    #[test]
    fn dispose_cancels_the_pending_external_jump() {
        let mut engine = engine(args(100.0, 10));
        engine.set_index(4);
        engine.dispose();
        engine.tick(Instant::now());
        assert!(engine.container().jumps.is_empty());
        assert_eq!(engine.current_index(), 0);
    }

    #[test]
    fn set_index_to_the_current_index_schedules_nothing() {
        let mut engine = engine(args(100.0, 10).index(3));
        engine.set_index(3);
        engine.tick(Instant::now());
        assert!(engine.container().jumps.is_empty());
    }

    #[test]
    fn set_index_clamps_out_of_range_targets() {
        let mut engine = engine(args(100.0, 5));
        engine.set_index(42);
        engine.tick(Instant::now());
        assert_eq!(engine.current_index(), 4);
        assert_eq!(engine.container().jumps, vec![(400.0, true)]);
    }

    #[test]
    fn index_prop_change_through_update_args_defers_a_jump() {
        let mut engine = engine(args(100.0, 10));
        engine
            .update_args(args(100.0, 10).index(4))
            .expect("valid args");
        assert_eq!(engine.current_index(), 0);
        engine.tick(Instant::now());
        assert_eq!(engine.current_index(), 4);

        // Same prop value again: no new schedule.
        engine
            .update_args(args(100.0, 10).index(4))
            .expect("valid args");
        engine.tick(Instant::now());
        assert_eq!(engine.container().jumps.len(), 1);
    }

    #[test]
    fn width_change_preserves_progress_through_a_round_trip() {
        let mut engine = engine(args(100.0, 10).index(2));
        engine.report_offset(235.0);
        let before = engine.progress();

        engine
            .update_args(args(140.0, 10).index(2))
            .expect("valid args");
        assert_eq!(engine.progress(), before);

        engine
            .update_args(args(100.0, 10).index(2))
            .expect("valid args");
        assert_eq!(engine.progress(), before);
    }

    #[test]
    fn invalid_reconfiguration_is_rejected_and_keeps_the_old_config() {
        let mut engine = engine(args(100.0, 10));
        let result = engine.update_args(args(0.0, 10));
        assert!(matches!(
            result,
            Err(CarouselError::InvalidConfiguration { .. })
        ));
        assert_eq!(engine.config().item_width, 100.0);
    }

    #[test]
    fn dataset_shrink_clamps_the_current_index() {
        let mut engine = engine(args(100.0, 10).index(8));
        engine.update_args(args(100.0, 4).index(8)).expect("valid args");
        assert_eq!(engine.current_index(), 3);
        assert_eq!(engine.container().jumps.last(), Some(&(300.0, false)));
    }

    #[test]
    fn emptied_dataset_disables_gestures_until_data_returns() {
        let mut engine = engine(args(100.0, 10).index(2));
        engine.update_args(args(100.0, 0)).expect("valid args");
        assert_eq!(engine.progress(), 0.0);
        assert!(!engine.gesture_start(drag(-50.0)));
        engine.set_index(3);
        engine.tick(Instant::now());
        assert!(engine.container().jumps.is_empty());

        engine.update_args(args(100.0, 6)).expect("valid args");
        assert!(engine.gesture_start(drag(-60.0)));
        engine.gesture_release(drag(-60.0));
        assert_eq!(engine.current_index(), 1);
    }

    #[test]
    fn end_reached_fires_once_then_rearms() {
        let reached = Arc::new(AtomicUsize::new(0));
        let sink = reached.clone();
        let mut engine = engine(
            args(100.0, 10)
                .on_end_reached_threshold(0.5)
                .on_end_reached(move || {
                    sink.fetch_add(1, Ordering::SeqCst);
                }),
        );

        // Content is 1000px, viewport 320: the trigger line sits at
        // offset > 1000 - 320 - 160 = 520.
        engine.report_offset(300.0);
        assert_eq!(reached.load(Ordering::SeqCst), 0);
        engine.report_offset(600.0);
        assert_eq!(reached.load(Ordering::SeqCst), 1);
        engine.report_offset(650.0);
        assert_eq!(reached.load(Ordering::SeqCst), 1);

        // Receding past the line re-arms the watch.
        engine.report_offset(100.0);
        engine.report_offset(680.0);
        assert_eq!(reached.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn render_info_exposes_the_live_progress() {
        let items = ["a", "b", "c"];
        let mut engine = engine(args(100.0, 3).index(1));
        engine.report_offset(130.0);

        let info = engine.render_info(&items, 2).expect("in range");
        assert_eq!(*info.item, "c");
        assert_eq!(info.item_index, 2);
        assert_eq!(info.current_index, 1);
        assert_eq!(info.item_count, 3);
        assert_eq!(info.progress, 1.3);
        assert!(engine.render_info(&items, 3).is_none());
    }

    #[test]
    fn deferred_jump_records_its_schedule_time() {
        // The tick clock only consumes `now` for diagnostics; a tick long
        // after scheduling still fires exactly once.
        let mut engine = engine(args(100.0, 10));
        engine.set_index(2);
        engine.tick(Instant::now() + Duration::from_millis(200));
        assert_eq!(engine.current_index(), 2);
    }
}
