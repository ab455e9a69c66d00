use super::interpolation;
use crate::math::Vec3;

/// A discrete playback control, decoupled from whatever input toolkit
/// produced it. The demo app maps keys and the fixed tick to these.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackCommand {
    /// Flip between playing and paused.
    TogglePlay,
    /// Manually step time backward by the playback delta (clamped at 0).
    StepBack,
    /// Manually step time forward by the playback delta (clamped at 1).
    StepForward,
    /// One fixed-interval tick of the playback clock.
    Tick,
}

/// The positions along each interpolation curve at one instant,
/// recomputed every frame.
#[derive(Clone, Copy, Debug)]
pub struct Sample {
    pub linear: Vec3,
    pub trig: Vec3,
    pub cubic: Vec3,
}

/// Advances a normalized time parameter and samples three interpolation
/// curves between a fixed pair of endpoints.
///
/// Time always stays in `[0, 1]`: ticking wraps past the end (looping
/// playback), manual seeking clamps at the boundaries.
pub struct Animator {
    time: f32,
    animating: bool,
    playback_delta: f32,
    start: Vec3,
    end: Vec3,
}

impl Animator {
    pub fn new(start: Vec3, end: Vec3, playback_delta: f32) -> Self {
        Self {
            time: 0.0,
            animating: true,
            playback_delta,
            start,
            end,
        }
    }

    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Step time forward by the playback delta if currently animating,
    /// wrapping back to 0 when the end of the span is reached.
    pub fn advance(&mut self) {
        if !self.animating {
            return;
        }
        self.time += self.playback_delta;
        if self.time >= 1.0 {
            self.time = 0.0;
        }
    }

    /// Offset time by `delta`, clamped to `[0, 1]`. Used for manual stepping;
    /// unlike [`advance`][Self::advance] this never wraps.
    pub fn seek(&mut self, delta: f32) {
        self.time = (self.time + delta).clamp(0.0, 1.0);
    }

    /// Flip the playing/paused flag.
    pub fn toggle_animating(&mut self) {
        self.animating = !self.animating;
    }

    /// Compute the three interpolated positions for the current time.
    pub fn sample(&self) -> Sample {
        Sample {
            linear: interpolation::lerp(self.start, self.end, self.time),
            trig: interpolation::trig_interp(self.start, self.end, self.time),
            cubic: interpolation::cubic(self.start, self.end, self.time),
        }
    }

    /// Dispatch a playback command to the operation it controls.
    pub fn handle(&mut self, command: PlaybackCommand) {
        match command {
            PlaybackCommand::TogglePlay => self.toggle_animating(),
            PlaybackCommand::StepBack => self.seek(-self.playback_delta),
            PlaybackCommand::StepForward => self.seek(self.playback_delta),
            PlaybackCommand::Tick => self.advance(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn animator() -> Animator {
        Animator::new(
            Vec3::new(-8.0, -5.0, 0.0),
            Vec3::new(8.0, 5.0, 0.0),
            0.01,
        )
    }

    #[test]
    fn advance_wraps_instead_of_clamping() {
        let mut anim = animator();
        anim.seek(0.99);
        assert!((anim.time() - 0.99).abs() < EPS);
        anim.advance();
        assert!(anim.time().abs() < EPS, "time was {}", anim.time());
        // and keeps going from the start afterwards
        anim.advance();
        assert!((anim.time() - 0.01).abs() < EPS);
    }

    #[test]
    fn seek_clamps_at_both_ends() {
        let mut anim = animator();
        anim.seek(0.2);
        anim.seek(-0.5);
        assert_eq!(anim.time(), 0.0);

        anim.seek(0.9);
        anim.seek(5.0);
        assert_eq!(anim.time(), 1.0);
    }

    #[test]
    fn toggle_is_an_involution_and_pauses_advance() {
        let mut anim = animator();
        assert!(anim.is_animating());
        anim.toggle_animating();
        assert!(!anim.is_animating());

        let before = anim.time();
        anim.advance();
        assert_eq!(anim.time(), before);

        anim.toggle_animating();
        assert!(anim.is_animating());
    }

    #[test]
    fn midpoint_sample_is_at_origin() {
        let mut anim = animator();
        anim.seek(0.5);
        let sample = anim.sample();
        assert!(sample.linear.mag() < EPS);
        // the smoothstep weight is exactly 1/2 at t = 1/2
        assert!(sample.cubic.mag() < EPS);
        assert!(sample.trig.mag() < EPS);
    }

    #[test]
    fn commands_map_to_operations() {
        let mut anim = animator();
        anim.handle(PlaybackCommand::TogglePlay);
        assert!(!anim.is_animating());

        anim.handle(PlaybackCommand::StepForward);
        assert!((anim.time() - 0.01).abs() < EPS);
        anim.handle(PlaybackCommand::StepBack);
        assert!(anim.time().abs() < EPS);

        // tick is a no-op while paused
        anim.handle(PlaybackCommand::Tick);
        assert!(anim.time().abs() < EPS);

        anim.handle(PlaybackCommand::TogglePlay);
        anim.handle(PlaybackCommand::Tick);
        assert!((anim.time() - 0.01).abs() < EPS);
    }
}
