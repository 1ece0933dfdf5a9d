use std::time::Duration;

use anyhow::{Result, bail, ensure};
use tracing::{info, trace};

/// Performs (or reports) primitive actions on behalf of the interpreter.
///
/// One method per action kind; the interpreter calls exactly one of them per
/// dispatched node and propagates whatever error it returns. A real backend
/// would inject pointer/keyboard input here.
pub trait Effector {
    /// Static human-readable identifier (used in logs).
    fn name(&self) -> &'static str;

    /// A loop is about to run its body `repeat_count` times.
    fn begin_loop(&mut self, repeat_count: u64) -> Result<()> {
        let _ = repeat_count;
        Ok(())
    }

    fn do_wait(&mut self, value: i64, magnitude: &str) -> Result<()>;
    fn do_move(&mut self, value: i64, direction: &str) -> Result<()>;
    fn do_press(&mut self, button: &str) -> Result<()>;
    fn do_click(&mut self, button: &str) -> Result<()>;
    fn do_key(&mut self, key: &str) -> Result<()>;
}

impl<E: Effector + ?Sized> Effector for &mut E {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn begin_loop(&mut self, repeat_count: u64) -> Result<()> {
        (**self).begin_loop(repeat_count)
    }

    fn do_wait(&mut self, value: i64, magnitude: &str) -> Result<()> {
        (**self).do_wait(value, magnitude)
    }

    fn do_move(&mut self, value: i64, direction: &str) -> Result<()> {
        (**self).do_move(value, direction)
    }

    fn do_press(&mut self, button: &str) -> Result<()> {
        (**self).do_press(button)
    }

    fn do_click(&mut self, button: &str) -> Result<()> {
        (**self).do_click(button)
    }

    fn do_key(&mut self, key: &str) -> Result<()> {
        (**self).do_key(key)
    }
}

/// Valid pointer axes for `MOVE` in strict mode.
pub const DIRECTIONS: [&str; 2] = ["x", "y"];

/// Valid buttons for `CLICK` in strict mode.
pub const BUTTONS: [&str; 3] = ["left", "middle", "right"];

/// Resolve a `WAIT` into a duration. Magnitudes: `s`, `ms`, `cs` (1/100 s), `ds` (1/10 s).
pub fn wait_duration(value: i64, magnitude: &str) -> Result<Duration> {
    let Ok(value) = u64::try_from(value) else {
        bail!("Invalid wait value {value}: must not be negative");
    };
    let millis_per_unit = match magnitude {
        "s" => 1000,
        "ds" => 100,
        "cs" => 10,
        "ms" => 1,
        other => bail!("Invalid time magnitude '{other}' (valid: s, ds, cs, ms)"),
    };
    Ok(Duration::from_millis(value.saturating_mul(millis_per_unit)))
}

/// Strip surrounding quotes and lowercase a button/key label.
pub fn normalize_label(label: &str) -> String {
    label.replace(['"', '\''], "").trim().to_lowercase()
}

/// Effector that performs nothing and reports each action as a log event.
///
/// In strict mode it also rejects labels a real backend could not act on.
#[derive(Debug, Clone, Default)]
pub struct ReportingEffector {
    strict: bool,
}

impl ReportingEffector {
    /// Create a new reporting effector.
    /// - strict: when true, invalid magnitudes/directions/buttons are errors.
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// In strict mode, reject labels that are empty once normalized.
    /// The label itself is reported unchanged.
    fn check_label(&self, what: &str, label: &str) -> Result<()> {
        if self.strict {
            ensure!(
                !normalize_label(label).is_empty(),
                "Empty {what} label '{label}'"
            );
        }
        Ok(())
    }
}

impl Effector for ReportingEffector {
    fn name(&self) -> &'static str {
        "reporting"
    }

    fn begin_loop(&mut self, repeat_count: u64) -> Result<()> {
        info!(target: "corel::actions", repeat_count, "LOOP");
        Ok(())
    }

    fn do_wait(&mut self, value: i64, magnitude: &str) -> Result<()> {
        if self.strict {
            let duration = wait_duration(value, magnitude)?;
            info!(
                target: "corel::actions",
                value, %magnitude, duration_ms = duration.as_millis() as u64,
                "WAIT"
            );
        } else {
            info!(target: "corel::actions", value, %magnitude, "WAIT");
        }
        Ok(())
    }

    fn do_move(&mut self, value: i64, direction: &str) -> Result<()> {
        if self.strict && !DIRECTIONS.contains(&direction) {
            bail!("Invalid direction '{direction}' (valid: x, y)");
        }
        info!(target: "corel::actions", value, %direction, "MOVE");
        Ok(())
    }

    fn do_press(&mut self, button: &str) -> Result<()> {
        self.check_label("button", button)?;
        info!(target: "corel::actions", %button, "PRESS");
        Ok(())
    }

    fn do_click(&mut self, button: &str) -> Result<()> {
        if self.strict {
            let normalized = normalize_label(button);
            if !BUTTONS.contains(&normalized.as_str()) {
                bail!("Invalid button '{button}' (valid: left, middle, right)");
            }
            trace!(target: "corel::actions", %button, %normalized, "Click label accepted");
        }
        info!(target: "corel::actions", %button, "CLICK");
        Ok(())
    }

    fn do_key(&mut self, key: &str) -> Result<()> {
        self.check_label("key", key)?;
        info!(target: "corel::actions", %key, "KEY");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::io;
    use std::sync::{Arc, Mutex};

    use tracing_subscriber::fmt::MakeWriter;

    use super::*;

    /// In-memory log sink for asserting on emitted events.
    #[derive(Debug, Clone, Default)]
    pub(crate) struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        pub(crate) fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// Run `f` with a plain-text subscriber at trace level and return what it logged.
    pub(crate) fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .without_time()
            .with_max_level(tracing::Level::TRACE)
            .finish();
        let out = tracing::subscriber::with_default(subscriber, f);
        (out, logs.contents())
    }

    /// Lines emitted under the `corel::actions` target.
    pub(crate) fn action_reports(logs: &str) -> Vec<&str> {
        logs.lines()
            .filter(|line| line.contains("corel::actions:"))
            .collect()
    }

    /// Records every call as a short line (`"KEY A"`, `"LOOP 3"`), optionally
    /// failing when a given line is about to be recorded.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingEffector {
        pub(crate) calls: Vec<String>,
        pub(crate) fail_on: Option<String>,
    }

    impl RecordingEffector {
        pub(crate) fn failing_on(line: &str) -> Self {
            Self {
                calls: Vec::new(),
                fail_on: Some(line.to_string()),
            }
        }

        fn record(&mut self, line: String) -> Result<()> {
            if self.fail_on.as_deref() == Some(line.as_str()) {
                bail!("refused {line}");
            }
            self.calls.push(line);
            Ok(())
        }
    }

    impl Effector for RecordingEffector {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn begin_loop(&mut self, repeat_count: u64) -> Result<()> {
            self.record(format!("LOOP {repeat_count}"))
        }

        fn do_wait(&mut self, value: i64, magnitude: &str) -> Result<()> {
            self.record(format!("WAIT {value} {magnitude}"))
        }

        fn do_move(&mut self, value: i64, direction: &str) -> Result<()> {
            self.record(format!("MOVE {value} {direction}"))
        }

        fn do_press(&mut self, button: &str) -> Result<()> {
            self.record(format!("PRESS {button}"))
        }

        fn do_click(&mut self, button: &str) -> Result<()> {
            self.record(format!("CLICK {button}"))
        }

        fn do_key(&mut self, key: &str) -> Result<()> {
            self.record(format!("KEY {key}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wait_duration_magnitudes() {
        assert_eq!(wait_duration(2, "s").unwrap(), Duration::from_secs(2));
        assert_eq!(wait_duration(3, "ds").unwrap(), Duration::from_millis(300));
        assert_eq!(wait_duration(7, "cs").unwrap(), Duration::from_millis(70));
        assert_eq!(wait_duration(250, "ms").unwrap(), Duration::from_millis(250));
        assert!(wait_duration(1, "min").is_err());
        assert!(wait_duration(-1, "s").is_err());
    }

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label("\"Left\""), "left");
        assert_eq!(normalize_label("'ENTER'"), "enter");
    }

    #[test]
    fn test_lenient_reporting_accepts_anything() {
        let mut fx = ReportingEffector::new(false);
        fx.do_wait(5, "fortnights").unwrap();
        fx.do_move(10, "sideways").unwrap();
        fx.do_click("thumb").unwrap();
        fx.do_key("").unwrap();
        fx.begin_loop(0).unwrap();
    }

    #[test]
    fn test_reports_carry_labels_unchanged() {
        let ((), logs) = testing::capture_logs(|| {
            let mut fx = ReportingEffector::new(false);
            fx.do_key("A").unwrap();
            fx.do_click("\"Left\"").unwrap();
            fx.do_press("Shift").unwrap();
            fx.do_wait(5, "s").unwrap();
            fx.do_move(-3, "y").unwrap();
            fx.begin_loop(2).unwrap();
        });
        let reports = testing::action_reports(&logs);
        assert_eq!(reports.len(), 6, "{logs}");
        assert!(reports[0].ends_with("KEY key=A"), "{logs}");
        assert!(reports[1].contains(r#"CLICK button="Left""#), "{logs}");
        assert!(reports[2].ends_with("PRESS button=Shift"), "{logs}");
        assert!(reports[3].ends_with("WAIT value=5 magnitude=s"), "{logs}");
        assert!(reports[4].ends_with("MOVE value=-3 direction=y"), "{logs}");
        assert!(reports[5].ends_with("LOOP repeat_count=2"), "{logs}");
    }

    #[test]
    fn test_strict_mode_checks_normalized_but_reports_raw() {
        let ((), logs) = testing::capture_logs(|| {
            let mut fx = ReportingEffector::new(true);
            fx.do_click("RIGHT").unwrap();
            fx.do_key("Enter").unwrap();
        });
        let reports: Vec<_> = testing::action_reports(&logs)
            .into_iter()
            .filter(|line| line.contains(" INFO "))
            .collect();
        assert_eq!(reports.len(), 2, "{logs}");
        assert!(reports[0].ends_with("CLICK button=RIGHT"), "{logs}");
        assert!(reports[1].ends_with("KEY key=Enter"), "{logs}");
    }

    #[test]
    fn test_strict_reporting_validates_labels() {
        let mut fx = ReportingEffector::new(true);
        assert!(fx.is_strict());
        fx.do_wait(5, "s").unwrap();
        fx.do_move(-3, "y").unwrap();
        fx.do_click("\"Right\"").unwrap();
        fx.do_press("shift").unwrap();
        fx.do_key("a").unwrap();

        assert!(fx.do_wait(5, "h").is_err());
        assert!(fx.do_move(1, "z").is_err());
        assert!(fx.do_click("thumb").is_err());
        assert!(fx.do_key("''").is_err());
    }
}
