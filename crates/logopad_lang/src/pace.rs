use std::time::Duration;

use logopad::Turtle;

/// Called after every step (move or turn) of the turtle, so that front ends can animate.
pub trait Pacer {
    fn step(&mut self, turtle: &Turtle);
}

/// Runs the script as fast as possible.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPacing;

impl Pacer for NoPacing {
    fn step(&mut self, _turtle: &Turtle) {}
}

/// Waits a little after every step.
///
/// By default the wait is the turtle's speed (in milliseconds), which goes back to its default
/// whenever the script says `home`. A fixed delay ignores the turtle's speed altogether.
#[derive(Clone, Copy, Debug, Default)]
pub struct SleepPacing {
    fixed_ms: Option<f64>,
}

impl SleepPacing {
    pub fn fixed(ms: f64) -> SleepPacing {
        SleepPacing { fixed_ms: Some(ms) }
    }

    /// How long to wait after a step, if at all.
    pub fn delay(&self, turtle: &Turtle) -> Option<Duration> {
        let ms = self.fixed_ms.unwrap_or_else(|| turtle.speed());
        (ms > 0.0 && ms.is_finite()).then(|| Duration::from_secs_f64(ms / 1000.0))
    }
}

impl Pacer for SleepPacing {
    fn step(&mut self, turtle: &Turtle) {
        if let Some(delay) = self.delay(turtle) {
            std::thread::sleep(delay);
        }
    }
}

impl<F: FnMut(&Turtle)> Pacer for F {
    fn step(&mut self, turtle: &Turtle) {
        self(turtle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_the_turtle() {
        let mut t = Turtle::default();
        let pacing = SleepPacing::default();
        assert_eq!(pacing.delay(&t), Some(Duration::from_millis(1)));

        t.set_speed(0.0);
        assert_eq!(pacing.delay(&t), None);
        t.set_speed(f64::NAN);
        assert_eq!(pacing.delay(&t), None);
    }

    #[test]
    fn fixed_delay_survives_home() {
        let mut t = Turtle::default();
        t.set_speed(50.0);
        t.reset();
        assert_eq!(t.speed(), logopad::turtle::DEFAULT_SPEED);

        let pacing = SleepPacing::fixed(50.0);
        assert_eq!(pacing.delay(&t), Some(Duration::from_millis(50)));
        assert_eq!(SleepPacing::fixed(-1.0).delay(&t), None);
    }
}
