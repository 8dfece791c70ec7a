mod tests {
    use embassy_time::{Duration, Instant};
    use quad_dimmer::{OneShotTask, TickResult};

    #[test]
    fn test_fires_once() {
        let mut task = OneShotTask::new();
        assert!(!task.poll(Instant::from_millis(0)));
        task.start(Instant::from_millis(0), Duration::from_millis(100));
        assert!(!task.poll(Instant::from_millis(99)));
        assert!(task.poll(Instant::from_millis(100)));
        assert!(!task.poll(Instant::from_millis(200)));
        assert!(!task.is_armed());
    }

    #[test]
    fn test_rearm_and_cancel() {
        let mut task = OneShotTask::new();
        task.start(Instant::from_millis(0), Duration::from_millis(50));
        task.start(Instant::from_millis(10), Duration::from_millis(50));
        assert_eq!(task.deadline(), Some(Instant::from_millis(60)));
        assert!(!task.poll(Instant::from_millis(55)));
        assert!(task.cancel());
        assert!(!task.cancel());
        assert!(!task.poll(Instant::from_millis(1000)));
    }

    #[test]
    fn test_tick_result_sleep() {
        let result = TickResult::until(Instant::from_millis(150), Instant::from_millis(100));
        assert_eq!(result.sleep_duration, Duration::from_millis(50));
        let late = TickResult::until(Instant::from_millis(150), Instant::from_millis(200));
        assert_eq!(late.sleep_duration, Duration::from_millis(0));
    }

    #[test]
    fn test_periodic_rearms_from_deadline() {
        let period = Duration::from_millis(100);
        let mut task = OneShotTask::new();
        assert!(!task.poll_periodic(Instant::from_millis(0), period));
        task.start(Instant::from_millis(0), period);
        assert!(!task.poll_periodic(Instant::from_millis(99), period));
        assert!(task.poll_periodic(Instant::from_millis(130), period));
        assert_eq!(task.deadline(), Some(Instant::from_millis(200)));
        assert!(task.poll_periodic(Instant::from_millis(260), period));
        assert_eq!(task.deadline(), Some(Instant::from_millis(300)));
        assert!(!task.poll_periodic(Instant::from_millis(299), period));
    }

    #[test]
    fn test_periodic_skips_backlog() {
        let period = Duration::from_millis(100);
        let mut task = OneShotTask::new();
        task.start(Instant::from_millis(0), period);
        // More than two periods late: restart from now
        assert!(task.poll_periodic(Instant::from_millis(350), period));
        assert_eq!(task.deadline(), Some(Instant::from_millis(450)));
    }
}
