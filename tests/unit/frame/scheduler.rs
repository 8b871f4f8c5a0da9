use super::*;
use std::cell::RefCell;
use std::rc::Rc;

type Log = Rc<RefCell<Vec<(String, f64, f64)>>>;

struct Recording {
    name: String,
    log: Log,
}

impl EffectHandle for Recording {
    fn name(&self) -> &str {
        &self.name
    }

    fn update(&mut self, delta_secs: f64, progress: f64) -> Result<(), EffectError> {
        self.log
            .borrow_mut()
            .push((self.name.clone(), delta_secs, progress));
        Ok(())
    }
}

struct Failing;

impl EffectHandle for Failing {
    fn name(&self) -> &str {
        "failing"
    }

    fn update(&mut self, _: f64, _: f64) -> Result<(), EffectError> {
        Err(EffectError::new("failing", "texture not ready"))
    }
}

struct Panicking;

impl EffectHandle for Panicking {
    fn name(&self) -> &str {
        "panicking"
    }

    fn update(&mut self, _: f64, _: f64) -> Result<(), EffectError> {
        panic!("uniform buffer overflow");
    }
}

fn recording(name: &str, log: &Log) -> Box<dyn EffectHandle> {
    Box::new(Recording {
        name: name.to_string(),
        log: Rc::clone(log),
    })
}

fn run(s: &mut FrameScheduler, now_ms: f64, progress: f64) -> FrameStats {
    let clock = s.begin_frame(now_ms);
    let d = s.dispatch(&clock, progress);
    s.finish_frame(clock, d)
}

#[test]
fn first_frame_has_zero_delta_and_later_deltas_are_capped() {
    let mut s = FrameScheduler::new(SchedulerConfig::default());
    s.start();
    assert_eq!(s.begin_frame(1_000.0).delta_secs, 0.0);
    let d = s.begin_frame(1_016.0).delta_secs;
    assert!((d - 0.016).abs() < 1e-12);
    assert!((s.begin_frame(31_016.0).delta_secs - 0.1).abs() < 1e-12);
    assert_eq!(s.begin_frame(30_000.0).delta_secs, 0.0);
    assert_eq!(s.begin_frame(f64::NAN).delta_secs, 0.0);
}

#[test]
fn every_registered_handle_sees_delta_and_progress() {
    let log: Log = Rc::default();
    let mut s = FrameScheduler::new(SchedulerConfig::default());
    s.start();
    s.register(Some(0), recording("stars", &log));
    s.register(None, recording("aurora", &log));

    run(&mut s, 0.0, 0.1);
    let stats = run(&mut s, 20.0, 0.2);
    assert_eq!(stats.dispatch.updated, 2);

    let log = log.borrow();
    assert_eq!(log.len(), 4);
    assert_eq!(log[2].0, "stars");
    assert!((log[2].1 - 0.02).abs() < 1e-12);
    assert_eq!(log[3].2, 0.2);
}

#[test]
fn failing_and_panicking_handles_do_not_halt_the_loop() {
    let log: Log = Rc::default();
    let mut s = FrameScheduler::new(SchedulerConfig::default());
    s.start();
    s.register(Some(1), Box::new(Failing));
    s.register(Some(1), Box::new(Panicking));
    s.register(Some(2), recording("nebula", &log));

    let first = run(&mut s, 0.0, 0.5);
    assert_eq!(
        first.dispatch,
        DispatchStats {
            updated: 1,
            failed: 1,
            disabled: 1,
            skipped: 0
        }
    );

    let second = run(&mut s, 16.0, 0.6);
    assert_eq!(
        second.dispatch,
        DispatchStats {
            updated: 1,
            failed: 1,
            disabled: 0,
            skipped: 1
        }
    );
    assert_eq!(log.borrow().len(), 2);
    assert_eq!(s.effect_count(), 3);
}

#[test]
fn release_scene_drops_only_that_scenes_handles() {
    let log: Log = Rc::default();
    let mut s = FrameScheduler::new(SchedulerConfig::default());
    s.register(Some(0), recording("a", &log));
    s.register(Some(0), recording("b", &log));
    let keep = s.register(Some(1), recording("c", &log));
    s.register(None, recording("global", &log));

    assert_eq!(s.effects_owned_by(0), 2);
    assert_eq!(s.release_scene(0), 2);
    assert_eq!(s.release_scene(0), 0);
    assert_eq!(s.effect_count(), 2);

    assert!(s.unregister(keep));
    assert!(!s.unregister(keep));
    s.clear();
    assert_eq!(s.effect_count(), 0);
}

#[test]
fn start_and_stop_reset_frame_timing() {
    let mut s = FrameScheduler::new(SchedulerConfig::default());
    assert!(!s.is_running());
    s.start();
    s.begin_frame(10.0);
    s.stop();
    assert!(!s.is_running());
    s.start();
    assert_eq!(s.begin_frame(50.0).delta_secs, 0.0);
}

#[test]
fn tiny_budget_flags_overrun() {
    let mut s = FrameScheduler::new(SchedulerConfig {
        frame_budget_ms: 1e-9,
        ..SchedulerConfig::default()
    });
    s.start();
    let clock = s.begin_frame(0.0);
    std::thread::sleep(Duration::from_millis(1));
    let stats = s.finish_frame(clock, DispatchStats::default());
    assert!(stats.over_budget);
}
