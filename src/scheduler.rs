//! Frame scheduling
//!
//! One simulation step per display refresh. The loop reschedules itself
//! after every step while the match is playing; pausing or finishing simply
//! stops the rescheduling, and quitting cancels the pending frame outright.
//! At most one frame is ever pending, so a quick pause/resume cannot start
//! a second loop.

use crate::sim::{GameState, Table, TickInput, tick};

/// Handle returned by the platform for a requested frame
pub type FrameId = i32;

/// Something that can call us back on the next display refresh
pub trait FrameSource {
    /// Request a callback. None if the platform refused.
    fn request_frame(&mut self) -> Option<FrameId>;

    /// Cancel a previously requested callback
    fn cancel_frame(&mut self, id: FrameId);
}

/// Drives `tick` from frame callbacks
#[derive(Debug, Default)]
pub struct FrameScheduler {
    pending: Option<FrameId>,
    steps: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a frame callback is outstanding
    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    /// Steps run since creation
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Request the next frame if the match is playing and none is pending
    pub fn schedule(&mut self, state: &GameState, source: &mut impl FrameSource) {
        if self.pending.is_none() && state.is_active() {
            self.pending = source.request_frame();
            if self.pending.is_none() {
                log::warn!("Frame request refused");
            }
        }
    }

    /// Drop the pending frame, if any
    pub fn cancel(&mut self, source: &mut impl FrameSource) {
        if let Some(id) = self.pending.take() {
            source.cancel_frame(id);
        }
    }

    /// Frame callback. Runs one step and reschedules while still playing.
    /// Returns false (and schedules nothing) when paused or not running.
    pub fn on_frame(
        &mut self,
        state: &mut GameState,
        input: &TickInput,
        table: &Table,
        source: &mut impl FrameSource,
    ) -> bool {
        self.pending = None;
        if !state.is_active() {
            return false;
        }

        tick(state, input, table);
        self.steps += 1;

        self.schedule(state, source);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HighScore;
    use crate::settings::MatchConfig;

    /// Hands out sequential ids and records cancellations
    #[derive(Default)]
    struct FakeFrames {
        next: FrameId,
        requested: u32,
        cancelled: Vec<FrameId>,
    }

    impl FrameSource for FakeFrames {
        fn request_frame(&mut self) -> Option<FrameId> {
            self.next += 1;
            self.requested += 1;
            Some(self.next)
        }

        fn cancel_frame(&mut self, id: FrameId) {
            self.cancelled.push(id);
        }
    }

    fn table() -> Table {
        Table::new(800.0, 500.0)
    }

    fn started() -> GameState {
        let mut state = GameState::new(3, HighScore::default());
        state.start_match(MatchConfig::default(), &table());
        state
    }

    #[test]
    fn test_idle_state_never_schedules() {
        let state = GameState::new(3, HighScore::default());
        let mut frames = FakeFrames::default();
        let mut scheduler = FrameScheduler::new();
        scheduler.schedule(&state, &mut frames);
        assert!(!scheduler.is_scheduled());
        assert_eq!(frames.requested, 0);
    }

    #[test]
    fn test_loop_reschedules_while_playing() {
        let mut state = started();
        let mut frames = FakeFrames::default();
        let mut scheduler = FrameScheduler::new();

        scheduler.schedule(&state, &mut frames);
        for _ in 0..5 {
            assert!(scheduler.is_scheduled());
            assert!(scheduler.on_frame(&mut state, &TickInput::default(), &table(), &mut frames));
        }
        assert_eq!(scheduler.steps(), 5);
        assert_eq!(frames.requested, 6);
    }

    #[test]
    fn test_pause_stops_loop_until_resume() {
        let table = table();
        let mut state = started();
        let mut frames = FakeFrames::default();
        let mut scheduler = FrameScheduler::new();
        scheduler.schedule(&state, &mut frames);

        state.pause();
        let before = state.snapshot();
        assert!(!scheduler.on_frame(&mut state, &TickInput::default(), &table, &mut frames));
        assert!(!scheduler.is_scheduled());
        assert_eq!(state.snapshot(), before);

        state.resume();
        scheduler.schedule(&state, &mut frames);
        assert!(scheduler.on_frame(&mut state, &TickInput::default(), &table, &mut frames));
        assert_ne!(state.snapshot(), before);
    }

    #[test]
    fn test_quick_pause_resume_keeps_one_loop() {
        let mut state = started();
        let mut frames = FakeFrames::default();
        let mut scheduler = FrameScheduler::new();
        scheduler.schedule(&state, &mut frames);

        state.pause();
        state.resume();
        scheduler.schedule(&state, &mut frames);
        assert_eq!(frames.requested, 1);
    }

    #[test]
    fn test_quit_cancels_pending_frame() {
        let mut state = started();
        let mut frames = FakeFrames::default();
        let mut scheduler = FrameScheduler::new();
        scheduler.schedule(&state, &mut frames);

        state.quit_to_menu();
        scheduler.cancel(&mut frames);
        assert_eq!(frames.cancelled, vec![1]);
        assert!(!scheduler.is_scheduled());
    }
}
