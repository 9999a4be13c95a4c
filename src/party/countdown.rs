/// Whole-second round timer driven by fixed-step milliseconds.
#[derive(Clone, Debug, PartialEq)]
pub struct Countdown {
    remaining_secs: u32,
    carry_ms: f64,
}

/// What a tick did to the countdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountdownTick {
    Running,
    /// One or more seconds elapsed; carries the new remaining value.
    Second(u32),
    /// Reached zero on this tick. Reported once.
    Expired,
}

impl Countdown {
    pub fn new(secs: u32) -> Self {
        Self { remaining_secs: secs, carry_ms: 0.0 }
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_secs == 0
    }

    pub fn tick(&mut self, dt_ms: f64) -> CountdownTick {
        if self.is_expired() {
            return CountdownTick::Running;
        }
        self.carry_ms += dt_ms.max(0.0);
        let mut ticked = false;
        while self.carry_ms >= 1000.0 && self.remaining_secs > 0 {
            self.carry_ms -= 1000.0;
            self.remaining_secs -= 1;
            ticked = true;
        }
        match (ticked, self.remaining_secs) {
            (true, 0) => CountdownTick::Expired,
            (true, n) => CountdownTick::Second(n),
            (false, _) => CountdownTick::Running,
        }
    }
}
