//! Post-request pause between lookups.

use std::thread;
use std::time::Duration;

/// Scope guard that sleeps for a fixed delay when dropped.
///
/// Created at the top of a lookup, it pauses on every way out of the
/// function: normal return, early return, `?` and unwinding.
#[must_use = "the pause happens when the guard is dropped"]
pub struct Cooldown {
    delay: Duration,
}

impl Cooldown {
    pub fn start(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Drop for Cooldown {
    fn drop(&mut self) {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn early_exit(delay: Duration, fail: bool) -> Result<(), &'static str> {
        let _cooldown = Cooldown::start(delay);
        if fail {
            return Err("failed");
        }
        Ok(())
    }

    #[test]
    fn test_sleeps_on_success_and_error() {
        let delay = Duration::from_millis(30);

        let start = Instant::now();
        assert!(early_exit(delay, false).is_ok());
        assert!(start.elapsed() >= delay);

        let start = Instant::now();
        assert!(early_exit(delay, true).is_err());
        assert!(start.elapsed() >= delay);
    }

    #[test]
    fn test_sleeps_while_unwinding() {
        let delay = Duration::from_millis(30);
        let start = Instant::now();
        let outcome = std::panic::catch_unwind(|| {
            let _cooldown = Cooldown::start(delay);
            panic!("parse blew up");
        });
        assert!(outcome.is_err());
        assert!(start.elapsed() >= delay);
    }
}
