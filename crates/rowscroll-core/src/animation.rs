//! Animation system: easing, spring physics, declarative transitions and
//! mount/unmount presence.
//!
//! Widgets describe *what* should animate with a [`Timing`] and drive the
//! values with [`AnimatedValue::update`] once per frame. Every timing can be
//! collapsed to zero duration for users who prefer reduced motion.

use serde::{Deserialize, Serialize};

// =============================================================================
// Easing
// =============================================================================

/// Easing curves for tweens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    /// Linear interpolation (no easing)
    Linear,
    /// Slow start
    EaseIn,
    /// Slow end
    EaseOut,
    /// Slow start and end
    #[default]
    EaseInOut,
    /// Cubic slow end
    CubicOut,
}

impl Easing {
    /// Apply the curve to a normalized time in [0, 1].
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => (1.0 - t).mul_add(-(1.0 - t), 1.0),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0f64).mul_add(t, 2.0).powi(2) / 2.0
                }
            }
            Self::CubicOut => 1.0 - (1.0 - t).powi(3),
        }
    }
}

// =============================================================================
// Spring physics
// =============================================================================

/// Spring physics parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    /// Mass of the object (affects inertia)
    pub mass: f64,
    /// Stiffness of the spring (affects speed)
    pub stiffness: f64,
    /// Damping coefficient (affects bounciness)
    pub damping: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::ROW_HEIGHT
    }
}

impl SpringConfig {
    /// Row height spring: quick, with a small overshoot.
    pub const ROW_HEIGHT: Self = Self::custom(1.0, 180.0, 22.0);

    /// Create a custom spring config.
    #[must_use]
    pub const fn custom(mass: f64, stiffness: f64, damping: f64) -> Self {
        Self {
            mass,
            stiffness,
            damping,
        }
    }

    /// Damping ratio; below 1.0 the spring oscillates.
    #[must_use]
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.mass * self.stiffness).sqrt())
    }
}

/// A spring-animated scalar.
#[derive(Debug, Clone, PartialEq)]
pub struct Spring {
    /// Current value
    pub value: f64,
    /// Target value
    pub target: f64,
    /// Current velocity (units per second)
    pub velocity: f64,
    /// Spring configuration
    pub config: SpringConfig,
    /// Whether the spring has settled
    pub at_rest: bool,
    /// Settling threshold for both displacement and velocity
    pub precision: f64,
}

impl Spring {
    /// A spring resting at `initial`.
    #[must_use]
    pub fn new(initial: f64) -> Self {
        Self {
            value: initial,
            target: initial,
            velocity: 0.0,
            config: SpringConfig::default(),
            at_rest: true,
            precision: 0.01,
        }
    }

    /// Set spring configuration.
    #[must_use]
    pub const fn with_config(mut self, config: SpringConfig) -> Self {
        self.config = config;
        self
    }

    /// Retarget. Velocity is kept so a retarget mid-flight stays smooth.
    pub fn set_target(&mut self, target: f64) {
        if (self.target - target).abs() > f64::EPSILON {
            self.target = target;
            self.at_rest = false;
        }
    }

    /// Advance by `dt` seconds (semi-implicit Euler).
    pub fn update(&mut self, dt: f64) {
        if self.at_rest || dt <= 0.0 {
            return;
        }

        let displacement = self.value - self.target;
        let spring_force = -self.config.stiffness * displacement;
        let damping_force = -self.config.damping * self.velocity;
        let acceleration = (spring_force + damping_force) / self.config.mass;

        self.velocity += acceleration * dt;
        self.value += self.velocity * dt;

        if (self.value - self.target).abs() < self.precision && self.velocity.abs() < self.precision
        {
            self.set_immediate(self.target);
        }
    }

    /// Jump to `value` and stop.
    pub fn set_immediate(&mut self, value: f64) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
        self.at_rest = true;
    }
}

/// A tween from `from` to `to` over `duration` seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct EasedValue {
    /// Start value
    pub from: f64,
    /// End value
    pub to: f64,
    /// Total duration in seconds
    pub duration: f64,
    /// Elapsed time in seconds
    pub elapsed: f64,
    /// Easing curve
    pub easing: Easing,
}

impl EasedValue {
    /// Create a new tween.
    #[must_use]
    pub fn new(from: f64, to: f64, duration: f64) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
            easing: Easing::default(),
        }
    }

    /// Set easing curve.
    #[must_use]
    pub const fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Progress in [0, 1]; zero-duration tweens are always finished.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> f64 {
        (self.to - self.from).mul_add(self.easing.apply(self.progress()), self.from)
    }

    /// Whether the tween has finished.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advance by `dt` seconds.
    pub fn update(&mut self, dt: f64) {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
    }
}

// =============================================================================
// Declarative transitions
// =============================================================================

/// How a value travels to its target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Timing {
    /// Fixed-duration tween
    Tween {
        /// Duration in seconds
        duration: f64,
        /// Easing curve
        easing: Easing,
    },
    /// Spring physics; duration emerges from the parameters
    Spring(SpringConfig),
}

impl Timing {
    /// Zero-duration timing: values jump straight to their targets.
    pub const INSTANT: Self = Self::Tween {
        duration: 0.0,
        easing: Easing::Linear,
    };

    /// Tween with the default easing.
    #[must_use]
    pub const fn tween(duration: f64) -> Self {
        Self::Tween {
            duration,
            easing: Easing::EaseInOut,
        }
    }

    /// Resolve against the user's motion preference.
    #[must_use]
    pub const fn for_motion(self, motion: MotionPreference) -> Self {
        match motion {
            MotionPreference::Full => self,
            MotionPreference::Reduced => Self::INSTANT,
        }
    }

    /// Whether this timing finishes without any frames.
    #[must_use]
    pub fn is_instant(&self) -> bool {
        matches!(self, Self::Tween { duration, .. } if *duration <= 0.0)
    }
}

/// The user's animation preference (`prefers-reduced-motion`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MotionPreference {
    /// Animate normally
    #[default]
    Full,
    /// Collapse every transition to zero duration
    Reduced,
}

impl MotionPreference {
    /// From the result of a `prefers-reduced-motion: reduce` media query.
    #[must_use]
    pub const fn from_reduce_query(matches: bool) -> Self {
        if matches {
            Self::Reduced
        } else {
            Self::Full
        }
    }
}

/// Declarative description of one transition, as handed to an animation
/// collaborator: start value, end value and timing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionSpec {
    /// Start value
    pub from: f64,
    /// End value
    pub to: f64,
    /// Timing
    pub timing: Timing,
}

impl TransitionSpec {
    /// Create a transition descriptor.
    #[must_use]
    pub const fn new(from: f64, to: f64, timing: Timing) -> Self {
        Self { from, to, timing }
    }

    /// Same transition with the motion preference applied.
    #[must_use]
    pub const fn for_motion(self, motion: MotionPreference) -> Self {
        Self::new(self.from, self.to, self.timing.for_motion(motion))
    }

    /// Build a live value running this transition.
    #[must_use]
    pub fn start(&self) -> AnimatedValue {
        let mut value = AnimatedValue::at(self.from);
        value.animate_to(self.to, self.timing);
        value
    }
}

/// Timings for every animated property of the row list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transitions {
    /// Row height between base, hover and expanded
    pub row_height: Timing,
    /// Hover overlay opacity
    pub overlay_fade: Timing,
    /// Compact layer opacity while the overlay shows
    pub compact_fade: Timing,
    /// Expansion panel height and opacity
    pub expansion: Timing,
    /// Preview panel mount (opacity 0 → 1, scale 0.9 → 1)
    pub preview_enter: Timing,
    /// Preview panel unmount (opacity → 0)
    pub preview_exit: Timing,
}

impl Default for Transitions {
    fn default() -> Self {
        Self {
            row_height: Timing::Spring(SpringConfig::ROW_HEIGHT),
            overlay_fade: Timing::tween(0.15),
            compact_fade: Timing::tween(0.15),
            expansion: Timing::tween(0.3),
            preview_enter: Timing::tween(0.2),
            preview_exit: Timing::tween(0.2),
        }
    }
}

impl Transitions {
    /// Preview panel scale at the start of its enter transition.
    pub const PREVIEW_INITIAL_SCALE: f32 = 0.9;

    /// Every timing resolved against the motion preference.
    #[must_use]
    pub const fn for_motion(self, motion: MotionPreference) -> Self {
        Self {
            row_height: self.row_height.for_motion(motion),
            overlay_fade: self.overlay_fade.for_motion(motion),
            compact_fade: self.compact_fade.for_motion(motion),
            expansion: self.expansion.for_motion(motion),
            preview_enter: self.preview_enter.for_motion(motion),
            preview_exit: self.preview_exit.for_motion(motion),
        }
    }
}

// =============================================================================
// AnimatedValue
// =============================================================================

/// A scalar driven by either a tween or a spring.
#[derive(Debug, Clone, PartialEq)]
pub enum AnimatedValue {
    /// Easing-based animation
    Eased(EasedValue),
    /// Spring physics animation
    Spring(Spring),
}

impl AnimatedValue {
    /// A value resting at `value`.
    #[must_use]
    pub fn at(value: f64) -> Self {
        Self::Eased(EasedValue::new(value, value, 0.0))
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> f64 {
        match self {
            Self::Eased(e) => e.value(),
            Self::Spring(s) => s.value,
        }
    }

    /// Where the value is heading.
    #[must_use]
    pub const fn target(&self) -> f64 {
        match self {
            Self::Eased(e) => e.to,
            Self::Spring(s) => s.target,
        }
    }

    /// Whether the value has reached its target.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        match self {
            Self::Eased(e) => e.is_complete(),
            Self::Spring(s) => s.at_rest,
        }
    }

    /// Advance by `dt` seconds.
    pub fn update(&mut self, dt: f64) {
        match self {
            Self::Eased(e) => e.update(dt),
            Self::Spring(s) => s.update(dt),
        }
    }

    /// Head for `target`. Calling again with the same target is a no-op, so
    /// widgets can re-sync every frame without restarting tweens.
    pub fn animate_to(&mut self, target: f64, timing: Timing) {
        let current = self.value();
        match timing {
            _ if timing.is_instant() => {
                *self = Self::at(target);
            }
            Timing::Tween { duration, easing } => {
                if (self.target() - target).abs() <= f64::EPSILON {
                    return;
                }
                *self = Self::Eased(EasedValue::new(current, target, duration).with_easing(easing));
            }
            Timing::Spring(config) => match self {
                Self::Spring(s) => {
                    s.config = config;
                    s.set_target(target);
                }
                Self::Eased(_) => {
                    if (current - target).abs() <= f64::EPSILON {
                        return;
                    }
                    let mut s = Spring::new(current).with_config(config);
                    s.set_target(target);
                    *self = Self::Spring(s);
                }
            },
        }
    }
}

// =============================================================================
// Presence - mount/unmount with enter and exit transitions
// =============================================================================

/// Lifecycle phase of a [`Presence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PresencePhase {
    /// Not mounted
    #[default]
    Absent,
    /// Mounted, enter transition running
    Entering,
    /// Mounted and settled
    Present,
    /// Still mounted while the exit transition runs
    Exiting,
}

/// Keeps an element mounted through its exit transition.
///
/// `progress` runs 0 → 1 on enter and back to 0 on exit; the element is
/// unmounted once the exit reaches 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Presence {
    phase: PresencePhase,
    progress: AnimatedValue,
    enter: Timing,
    exit: Timing,
}

impl Presence {
    /// An absent element with the given enter and exit timings.
    #[must_use]
    pub fn new(enter: Timing, exit: Timing) -> Self {
        Self {
            phase: PresencePhase::Absent,
            progress: AnimatedValue::at(0.0),
            enter,
            exit,
        }
    }

    /// Replace the timings (e.g. when the motion preference changes).
    pub fn set_timings(&mut self, enter: Timing, exit: Timing) {
        self.enter = enter;
        self.exit = exit;
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> PresencePhase {
        self.phase
    }

    /// Transition progress in [0, 1].
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.progress.value().clamp(0.0, 1.0) as f32
    }

    /// Whether the element should be in the tree.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        !matches!(self.phase, PresencePhase::Absent)
    }

    /// Whether an enter or exit transition is running.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        matches!(self.phase, PresencePhase::Entering | PresencePhase::Exiting)
    }

    /// Mount (or cancel a running exit).
    pub fn show(&mut self) {
        if matches!(self.phase, PresencePhase::Entering | PresencePhase::Present) {
            return;
        }
        self.phase = PresencePhase::Entering;
        self.progress.animate_to(1.0, self.enter);
        self.settle();
    }

    /// Start the exit transition.
    pub fn hide(&mut self) {
        if matches!(self.phase, PresencePhase::Absent | PresencePhase::Exiting) {
            return;
        }
        self.phase = PresencePhase::Exiting;
        self.progress.animate_to(0.0, self.exit);
        self.settle();
    }

    /// Advance by `dt` seconds.
    pub fn update(&mut self, dt: f64) {
        if self.is_animating() {
            self.progress.update(dt);
            self.settle();
        }
    }

    fn settle(&mut self) {
        if !self.progress.is_complete() {
            return;
        }
        self.phase = match self.phase {
            PresencePhase::Entering => PresencePhase::Present,
            PresencePhase::Exiting => PresencePhase::Absent,
            other => other,
        };
    }
}
