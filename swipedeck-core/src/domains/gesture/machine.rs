//! Gesture state machine for the front-most card
//!
//! `Idle -> Pressing -> {LongPressFired | Dragging} -> release -> Idle`
//!
//! A press that stays put for the long-press delay fires the long-press and
//! can no longer commit a swipe. A drag-start before that cancels the timer.
//! A committed swipe leaves the machine inert until [`GestureMachine::reset`]
//! installs the next card.
//!
//! The machine never sleeps or spawns. Arming the long-press timer is
//! requested through [`GestureOutcome::ArmLongPress`]; the owner schedules it
//! and hands the [`TaskHandle`] back so cancellation stays with the session.

use std::time::{Duration, Instant};

use log::{debug, trace};

use super::feedback::DragFeedback;
use super::messages::SwipeDirection;
use crate::infra::config::DeckConfig;
use crate::infra::constants::gesture as cfg;
use crate::infra::scheduler::TaskHandle;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureThresholds {
    pub long_press: Duration,
    /// Strict: the offset must exceed this to commit
    pub swipe_offset_px: f32,
    /// Strict: the velocity must exceed this to commit
    pub swipe_velocity_px_s: f32,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            long_press: Duration::from_millis(cfg::LONG_PRESS_MS),
            swipe_offset_px: cfg::SWIPE_OFFSET_PX,
            swipe_velocity_px_s: cfg::SWIPE_VELOCITY_PX_S,
        }
    }
}

impl From<&DeckConfig> for GestureThresholds {
    fn from(config: &DeckConfig) -> Self {
        Self {
            long_press: config.long_press_delay(),
            swipe_offset_px: config.swipe_offset_px,
            swipe_velocity_px_s: config.swipe_velocity_px_s,
        }
    }
}

/// Identifies one pointer session; stale timer deliveries carry an old token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    Pressing,
    LongPressFired,
    Dragging,
    /// Swipe committed; the card ignores input until reset
    Committed(SwipeDirection),
}

/// State for one pointer interaction with the front card.
#[derive(Debug)]
pub struct GestureSession {
    token: SessionToken,
    started_at: Instant,
    long_press_fired: bool,
    dragging: bool,
    drag_offset_x: f32,
    drag_velocity_x: f32,
    long_press_timer: Option<TaskHandle>,
}

impl GestureSession {
    fn new(token: SessionToken, started_at: Instant) -> Self {
        Self {
            token,
            started_at,
            long_press_fired: false,
            dragging: false,
            drag_offset_x: 0.0,
            drag_velocity_x: 0.0,
            long_press_timer: None,
        }
    }

    pub fn token(&self) -> SessionToken {
        self.token
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    pub fn long_press_fired(&self) -> bool {
        self.long_press_fired
    }

    pub fn drag_offset_x(&self) -> f32 {
        self.drag_offset_x
    }

    pub fn drag_velocity_x(&self) -> f32 {
        self.drag_velocity_x
    }

    pub fn has_pending_timer(&self) -> bool {
        self.long_press_timer.is_some()
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.long_press_timer.take() {
            timer.cancel();
        }
    }
}

/// Commit decision for a drag release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    Swipe(SwipeDirection),
    /// Below both thresholds, or suppressed by a long-press
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GestureOutcome {
    /// Input did not apply in the current phase
    Ignored,
    /// A session started; schedule the long-press timer for `token`
    ArmLongPress {
        token: SessionToken,
        delay: Duration,
    },
    LongPress,
    Tap,
    Drag(DragFeedback),
    Release(Release),
    /// The session closed without a further decision
    Ended,
}

#[derive(Debug)]
pub struct GestureMachine {
    thresholds: GestureThresholds,
    phase: GesturePhase,
    session: Option<GestureSession>,
    next_token: u64,
}

impl Default for GestureMachine {
    fn default() -> Self {
        Self::new(GestureThresholds::default())
    }
}

impl GestureMachine {
    pub fn new(thresholds: GestureThresholds) -> Self {
        Self {
            thresholds,
            phase: GesturePhase::Idle,
            session: None,
            next_token: 0,
        }
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    pub fn thresholds(&self) -> GestureThresholds {
        self.thresholds
    }

    pub fn is_inert(&self) -> bool {
        matches!(self.phase, GesturePhase::Committed(_))
    }

    /// Classify a release by offset first-right, then left. Thresholds are
    /// strict, so exactly 100 px or 800 px/s does not commit.
    pub fn classify(&self, offset_x: f32, velocity_x: f32) -> Release {
        let t = &self.thresholds;
        if offset_x > t.swipe_offset_px || velocity_x > t.swipe_velocity_px_s {
            Release::Swipe(SwipeDirection::Right)
        } else if offset_x < -t.swipe_offset_px
            || velocity_x < -t.swipe_velocity_px_s
        {
            Release::Swipe(SwipeDirection::Left)
        } else {
            Release::Cancelled
        }
    }

    pub fn pointer_down(&mut self, now: Instant) -> GestureOutcome {
        if self.phase != GesturePhase::Idle {
            return GestureOutcome::Ignored;
        }
        self.next_token += 1;
        let token = SessionToken(self.next_token);
        self.session = Some(GestureSession::new(token, now));
        self.phase = GesturePhase::Pressing;
        trace!("[Gesture] Session {:?} pressing", token);
        GestureOutcome::ArmLongPress {
            token,
            delay: self.thresholds.long_press,
        }
    }

    /// Hand over the scheduled long-press timer. A timer for a session that
    /// has already moved on is cancelled immediately.
    pub fn attach_long_press_timer(
        &mut self,
        token: SessionToken,
        timer: TaskHandle,
    ) {
        match self.session.as_mut() {
            Some(session)
                if session.token == token
                    && self.phase == GesturePhase::Pressing =>
            {
                session.cancel_timer();
                session.long_press_timer = Some(timer);
            }
            _ => timer.cancel(),
        }
    }

    pub fn long_press_elapsed(&mut self, token: SessionToken) -> GestureOutcome {
        if self.phase != GesturePhase::Pressing {
            return GestureOutcome::Ignored;
        }
        let Some(session) = self.session.as_mut() else {
            return GestureOutcome::Ignored;
        };
        if session.token != token {
            trace!("[Gesture] Ignoring stale long-press for {:?}", token);
            return GestureOutcome::Ignored;
        }
        session.long_press_timer = None;
        session.long_press_fired = true;
        self.phase = GesturePhase::LongPressFired;
        debug!("[Gesture] Long-press fired for {:?}", token);
        GestureOutcome::LongPress
    }

    pub fn drag_start(&mut self) -> GestureOutcome {
        let Some(session) = self.session.as_mut() else {
            return GestureOutcome::Ignored;
        };
        match self.phase {
            GesturePhase::Pressing => {
                session.cancel_timer();
                session.dragging = true;
                self.phase = GesturePhase::Dragging;
                GestureOutcome::Drag(DragFeedback::neutral())
            }
            GesturePhase::LongPressFired => {
                // Tracked so the release still closes the session, but it
                // can only ever cancel.
                session.dragging = true;
                GestureOutcome::Ignored
            }
            _ => GestureOutcome::Ignored,
        }
    }

    pub fn drag_move(&mut self, offset_x: f32, velocity_x: f32) -> GestureOutcome {
        let Some(session) = self.session.as_mut() else {
            return GestureOutcome::Ignored;
        };
        if !session.dragging {
            return GestureOutcome::Ignored;
        }
        session.drag_offset_x = offset_x;
        session.drag_velocity_x = velocity_x;
        if self.phase == GesturePhase::Dragging {
            GestureOutcome::Drag(DragFeedback::at(offset_x, velocity_x))
        } else {
            GestureOutcome::Ignored
        }
    }

    pub fn drag_end(&mut self, offset_x: f32, velocity_x: f32) -> GestureOutcome {
        let dragging = self.session.as_ref().is_some_and(|s| s.dragging);
        if !dragging {
            return GestureOutcome::Ignored;
        }
        let Some(mut session) = self.session.take() else {
            return GestureOutcome::Ignored;
        };
        session.cancel_timer();

        let release = if session.long_press_fired {
            Release::Cancelled
        } else {
            self.classify(offset_x, velocity_x)
        };
        self.phase = match release {
            Release::Swipe(direction) => GesturePhase::Committed(direction),
            Release::Cancelled => GesturePhase::Idle,
        };
        debug!(
            "[Gesture] Session {:?} released at offset={} velocity={} -> {:?}",
            session.token, offset_x, velocity_x, release
        );
        GestureOutcome::Release(release)
    }

    /// Pointer lifted. Ends a press as a tap; while dragging, the session
    /// stays open until the drag ends.
    pub fn pointer_up(&mut self) -> GestureOutcome {
        self.lift(true)
    }

    /// Pointer left the card; same as lifting, except a press is not a tap.
    pub fn pointer_leave(&mut self) -> GestureOutcome {
        self.lift(false)
    }

    fn lift(&mut self, is_up: bool) -> GestureOutcome {
        let Some(session) = self.session.as_mut() else {
            return GestureOutcome::Ignored;
        };
        session.cancel_timer();
        if session.dragging {
            return GestureOutcome::Ignored;
        }

        let outcome = match self.phase {
            GesturePhase::Pressing if is_up => GestureOutcome::Tap,
            _ => GestureOutcome::Ended,
        };
        self.session = None;
        self.phase = GesturePhase::Idle;
        outcome
    }

    /// Return to `Idle` for a new front card, dropping any open session.
    pub fn reset(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.cancel_timer();
        }
        self.phase = GesturePhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pressed() -> (GestureMachine, SessionToken) {
        let mut machine = GestureMachine::default();
        match machine.pointer_down(Instant::now()) {
            GestureOutcome::ArmLongPress { token, delay } => {
                assert_eq!(delay, Duration::from_millis(500));
                (machine, token)
            }
            other => panic!("expected ArmLongPress, got {:?}", other),
        }
    }

    fn dragged_release(offset_x: f32, velocity_x: f32) -> GestureOutcome {
        let (mut machine, _) = pressed();
        machine.drag_start();
        machine.drag_move(offset_x, velocity_x);
        machine.drag_end(offset_x, velocity_x)
    }

    #[test]
    fn thresholds_are_strict() {
        let machine = GestureMachine::default();
        assert_eq!(machine.classify(100.0, 0.0), Release::Cancelled);
        assert_eq!(machine.classify(-100.0, 0.0), Release::Cancelled);
        assert_eq!(machine.classify(0.0, 800.0), Release::Cancelled);
        assert_eq!(machine.classify(0.0, -800.0), Release::Cancelled);
        assert_eq!(
            machine.classify(100.5, 0.0),
            Release::Swipe(SwipeDirection::Right)
        );
        assert_eq!(
            machine.classify(0.0, -800.5),
            Release::Swipe(SwipeDirection::Left)
        );
    }

    #[test]
    fn sub_threshold_releases_cancel() {
        for offset in [-100.0_f32, -55.0, 0.0, 42.0, 100.0] {
            for velocity in [-800.0_f32, -10.0, 0.0, 799.0, 800.0] {
                assert_eq!(
                    dragged_release(offset, velocity),
                    GestureOutcome::Release(Release::Cancelled),
                    "offset={offset} velocity={velocity}"
                );
            }
        }
    }

    #[test]
    fn right_wins_when_offset_and_velocity_disagree() {
        assert_eq!(
            dragged_release(150.0, -900.0),
            GestureOutcome::Release(Release::Swipe(SwipeDirection::Right))
        );
    }

    #[test]
    fn fast_flick_commits_without_distance() {
        assert_eq!(
            dragged_release(10.0, -1200.0),
            GestureOutcome::Release(Release::Swipe(SwipeDirection::Left))
        );
    }

    #[test]
    fn committed_swipe_makes_card_inert_until_reset() {
        let (mut machine, _) = pressed();
        machine.drag_start();
        assert_eq!(
            machine.drag_end(150.0, 0.0),
            GestureOutcome::Release(Release::Swipe(SwipeDirection::Right))
        );
        assert!(machine.is_inert());
        assert_eq!(machine.pointer_down(Instant::now()), GestureOutcome::Ignored);
        assert_eq!(machine.drag_start(), GestureOutcome::Ignored);
        assert_eq!(machine.drag_end(-300.0, 0.0), GestureOutcome::Ignored);

        machine.reset();
        assert_eq!(machine.phase(), GesturePhase::Idle);
        assert!(matches!(
            machine.pointer_down(Instant::now()),
            GestureOutcome::ArmLongPress { .. }
        ));
    }

    #[test]
    fn long_press_suppresses_a_later_swipe() {
        let (mut machine, token) = pressed();
        assert_eq!(machine.long_press_elapsed(token), GestureOutcome::LongPress);
        machine.drag_start();
        machine.drag_move(400.0, 2000.0);
        assert_eq!(
            machine.drag_end(400.0, 2000.0),
            GestureOutcome::Release(Release::Cancelled)
        );
        assert_eq!(machine.phase(), GesturePhase::Idle);
    }

    #[test]
    fn drag_start_blocks_the_long_press() {
        let (mut machine, token) = pressed();
        machine.drag_start();
        assert_eq!(machine.long_press_elapsed(token), GestureOutcome::Ignored);
        assert_eq!(machine.phase(), GesturePhase::Dragging);
    }

    #[test]
    fn stale_token_is_ignored() {
        let (mut machine, old) = pressed();
        assert_eq!(machine.pointer_up(), GestureOutcome::Tap);
        machine.pointer_down(Instant::now());
        assert_eq!(machine.long_press_elapsed(old), GestureOutcome::Ignored);
        assert_eq!(machine.phase(), GesturePhase::Pressing);
    }

    #[test]
    fn release_after_long_press_ends_without_tap() {
        let (mut machine, token) = pressed();
        machine.long_press_elapsed(token);
        assert_eq!(machine.pointer_up(), GestureOutcome::Ended);
        assert!(machine.session().is_none());
    }

    #[test]
    fn leave_during_press_is_not_a_tap() {
        let (mut machine, token) = pressed();
        assert_eq!(machine.pointer_leave(), GestureOutcome::Ended);
        assert_eq!(machine.long_press_elapsed(token), GestureOutcome::Ignored);
    }

    #[test]
    fn pointer_up_mid_drag_keeps_session_until_drag_end() {
        let (mut machine, _) = pressed();
        machine.drag_start();
        machine.drag_move(-130.0, -200.0);
        assert_eq!(machine.pointer_up(), GestureOutcome::Ignored);
        assert_eq!(machine.phase(), GesturePhase::Dragging);
        assert_eq!(
            machine.drag_end(-130.0, -200.0),
            GestureOutcome::Release(Release::Swipe(SwipeDirection::Left))
        );
    }

    #[test]
    fn drag_without_press_is_ignored() {
        let mut machine = GestureMachine::default();
        assert_eq!(machine.drag_start(), GestureOutcome::Ignored);
        assert_eq!(machine.drag_move(50.0, 0.0), GestureOutcome::Ignored);
        assert_eq!(machine.drag_end(500.0, 0.0), GestureOutcome::Ignored);
    }

    #[test]
    fn drag_moves_report_feedback() {
        let (mut machine, _) = pressed();
        machine.drag_start();
        match machine.drag_move(100.0, 300.0) {
            GestureOutcome::Drag(feedback) => {
                assert_eq!(feedback.offset_x, 100.0);
                assert!((feedback.rotation_deg - 7.5).abs() < 1e-4);
                assert!((feedback.commit_right_opacity - 1.0).abs() < 1e-4);
            }
            other => panic!("expected Drag, got {:?}", other),
        }
        let session = machine.session().unwrap();
        assert_eq!(session.drag_offset_x(), 100.0);
        assert_eq!(session.drag_velocity_x(), 300.0);
    }

    #[test]
    fn nan_release_cancels() {
        assert_eq!(
            dragged_release(f32::NAN, f32::NAN),
            GestureOutcome::Release(Release::Cancelled)
        );
    }
}
