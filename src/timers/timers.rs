use indexmap::IndexMap;
use std::io::Write;
use std::ops::{Deref, DerefMut};
use std::time::{Duration, Instant};

#[derive(Debug, Default, Clone)]
struct InnerTimer {
    start: Option<Instant>,
    elapsed: Duration,
    subtimers: SubTimersMap,
}

impl InnerTimer {
    fn start(&mut self) {
        self.start = Some(Instant::now());
    }

    fn stop(&mut self) {
        if let Some(instant) = self.start.take() {
            self.elapsed += instant.elapsed();
        }
    }

    fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

// insertion ordered, so reports list timers in the order they ran
#[derive(Debug, Default, Clone)]
struct SubTimersMap(IndexMap<&'static str, InnerTimer>);

impl Deref for SubTimersMap {
    type Target = IndexMap<&'static str, InnerTimer>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl DerefMut for SubTimersMap {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl SubTimersMap {
    fn start_subtimer(&mut self, key: &'static str) {
        let t = self.entry(key).or_default();
        t.start();
    }

    fn total_time(&self) -> Duration {
        self.values()
            .fold(Duration::ZERO, |acc, t| acc + t.elapsed())
    }

    fn print(&self, out: &mut dyn Write, depth: usize) -> std::io::Result<()> {
        for (key, val) in self.iter() {
            let tabs = format!("{: <1$}", "", 4 * depth);
            writeln!(out, "{}{:} : {:?}", tabs, *key, val.elapsed)?;
            val.subtimers.print(out, depth + 1)?;
        }
        Ok(())
    }
}

/// A collection of named, possibly nested, timers.
///
/// Timers are started and stopped in stack order, usually through
/// the crate internal `timeit!` macro.  A timer started while another
/// is running becomes its child.
#[derive(Default, Debug, Clone)]
pub struct Timers {
    stack: Vec<&'static str>,
    subtimers: SubTimersMap,
}

impl Timers {
    fn mut_active_timer(&mut self) -> Option<&mut InnerTimer> {
        let (first, rest) = self.stack.split_first()?;

        //first one gets special treatment since self is not
        //an InnerTimer and a common trait would be overkill
        let mut active_timer = self.subtimers.get_mut(first)?;

        for key in rest {
            active_timer = active_timer.subtimers.get_mut(key)?;
        }
        Some(active_timer)
    }

    pub fn start_as_current(&mut self, key: &'static str) {
        //starts a timer with name "key" as the current timer
        if let Some(active) = self.mut_active_timer() {
            // child of current active timer
            active.subtimers.start_subtimer(key);
        } else {
            // nothing active, create one at root
            self.subtimers.start_subtimer(key);
        }

        //append to timer call stack
        self.stack.push(key);
    }

    pub fn stop_current(&mut self) {
        if let Some(active) = self.mut_active_timer() {
            active.stop();
        }
        //remove from timer call stack
        self.stack.pop();
    }

    /// Total time recorded by all root level timers
    pub fn total_time(&self) -> Duration {
        self.subtimers.total_time()
    }

    /// Elapsed time of a timer, given as a path from the root,
    /// e.g. `&["solve", "factor"]`.  Returns None for unknown timers.
    pub fn elapsed(&self, path: &[&'static str]) -> Option<Duration> {
        let (first, rest) = path.split_first()?;
        let mut timer = self.subtimers.get(first)?;
        for key in rest {
            timer = timer.subtimers.get(key)?;
        }
        Some(timer.elapsed())
    }

    /// Writes an indented report of all timers
    pub fn print(&self, out: &mut dyn Write) -> std::io::Result<()> {
        self.subtimers.print(out, 0)
    }
}

macro_rules! timeit {
    ($timer:ident => $key:literal; $($tt:tt)+) => {

        $timer.start_as_current($key);
        $(
            $tt
        )+
        $timer.stop_current();
    }
}
pub(crate) use timeit;

#[test]
fn test_nested_timers() {
    let mut timers = Timers::default();

    timeit! {timers => "outer";
        timeit! {timers => "inner";
            let x = (0..100).sum::<usize>();
        }
    }
    assert_eq!(x, 4950);

    assert!(timers.elapsed(&["outer"]).is_some());
    assert!(timers.elapsed(&["outer", "inner"]).is_some());
    assert!(timers.elapsed(&["inner"]).is_none());
    assert!(timers.elapsed(&["outer"]).unwrap() >= timers.elapsed(&["outer", "inner"]).unwrap());
    assert_eq!(timers.total_time(), timers.elapsed(&["outer"]).unwrap());

    let mut out = Vec::new();
    timers.print(&mut out).unwrap();
    let report = String::from_utf8(out).unwrap();
    assert!(report.starts_with("outer : "));
    assert!(report.contains("\n    inner : "));
}
