mod tests {
    use std::convert::Infallible;

    use quad_dimmer::{
        BusPolarity, BusWriter, ChannelBank, ChannelIndex, DimmerError, Intensity, MemoryStore,
        ParamStore,
    };

    #[derive(Default)]
    struct RecordingBus {
        writes: Vec<(u8, u8)>,
    }

    impl BusWriter for RecordingBus {
        type Error = Infallible;

        fn commit(&mut self, channel: ChannelIndex, level: u8) -> Result<(), Infallible> {
            self.writes.push((channel.index(), level));
            Ok(())
        }
    }

    /// Bus that rejects writes to one channel a given number of times
    #[derive(Default)]
    struct FlakyBus {
        writes: Vec<(u8, u8)>,
        failing_channel: u8,
        failures_left: u32,
    }

    impl BusWriter for FlakyBus {
        type Error = ();

        fn commit(&mut self, channel: ChannelIndex, level: u8) -> Result<(), ()> {
            if channel.index() == self.failing_channel && self.failures_left > 0 {
                self.failures_left -= 1;
                return Err(());
            }
            self.writes.push((channel.index(), level));
            Ok(())
        }
    }

    fn ch(index: u8) -> ChannelIndex {
        ChannelIndex::new(index).unwrap()
    }

    #[test]
    fn test_set_then_flush_commits_once() {
        let mut bank = ChannelBank::new();
        let mut bus = RecordingBus::default();
        for value in [0, 1, 37, 99, 100] {
            bank.set_channel(ch(2), value).unwrap();
            bank.flush(&mut bus, BusPolarity::Direct);
            assert!(!bank.is_dirty(ch(2)));
        }
        // Setting 0 on a fresh bank is not a change
        assert_eq!(bus.writes, vec![(2, 1), (2, 37), (2, 99), (2, 100)]);
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        let mut bank = ChannelBank::new();
        bank.set_channel(ch(1), 40).unwrap();
        let mut bus = RecordingBus::default();
        bank.flush(&mut bus, BusPolarity::Direct);

        assert_eq!(bank.set_channel(ch(1), 101), Err(DimmerError::OutOfRange(101)));
        assert_eq!(bank.set_channel(ch(1), -1), Err(DimmerError::OutOfRange(-1)));
        assert_eq!(bank.set_channel(ch(1), 1000), Err(DimmerError::OutOfRange(1000)));
        assert_eq!(bank.value(ch(1)).value(), 40);
        assert!(!bank.is_dirty(ch(1)));
    }

    #[test]
    fn test_repeated_set_is_idempotent() {
        let mut bank = ChannelBank::new();
        let mut bus = RecordingBus::default();
        assert_eq!(bank.set_channel(ch(0), 55), Ok(true));
        assert_eq!(bank.set_channel(ch(0), 55), Ok(false));
        assert_eq!(bank.flush(&mut bus, BusPolarity::Direct), 1);
        assert_eq!(bank.set_channel(ch(0), 55), Ok(false));
        assert_eq!(bank.flush(&mut bus, BusPolarity::Direct), 0);
        assert_eq!(bus.writes, vec![(0, 55)]);
    }

    #[test]
    fn test_flush_order_is_ascending() {
        let mut bank = ChannelBank::new();
        let mut bus = RecordingBus::default();
        bank.set_channel(ch(3), 30).unwrap();
        bank.set_channel(ch(0), 10).unwrap();
        bank.set_channel(ch(2), 20).unwrap();
        assert_eq!(bank.flush(&mut bus, BusPolarity::Direct), 3);
        assert_eq!(bus.writes, vec![(0, 10), (2, 20), (3, 30)]);
        assert!(!bank.has_pending());
    }

    #[test]
    fn test_intermediate_values_collapse() {
        let mut bank = ChannelBank::new();
        let mut bus = RecordingBus::default();
        bank.set_channel(ch(1), 10).unwrap();
        bank.set_channel(ch(1), 20).unwrap();
        bank.set_channel(ch(1), 30).unwrap();
        bank.flush(&mut bus, BusPolarity::Direct);
        assert_eq!(bus.writes, vec![(1, 30)]);
    }

    #[test]
    fn test_inverted_polarity() {
        let mut bank = ChannelBank::new();
        let mut bus = RecordingBus::default();
        bank.set_channel(ch(0), 30).unwrap();
        bank.set_channel(ch(1), 100).unwrap();
        bank.flush(&mut bus, BusPolarity::Inverted);
        assert_eq!(bus.writes, vec![(0, 70), (1, 0)]);
    }

    #[test]
    fn test_set_all() {
        let mut bank = ChannelBank::new();
        bank.set_all(64).unwrap();
        for channel in ChannelIndex::ALL {
            assert_eq!(bank.value(channel).value(), 64);
            assert!(bank.is_dirty(channel));
        }
        assert_eq!(bank.set_all(200), Err(DimmerError::OutOfRange(200)));
        assert_eq!(bank.value(ch(3)).value(), 64);
    }

    #[test]
    fn test_save_then_restore() {
        let mut bank = ChannelBank::new();
        let mut store = MemoryStore::new();
        let mut bus = RecordingBus::default();
        bank.set_channel(ch(0), 5).unwrap();
        bank.set_channel(ch(1), 50).unwrap();
        bank.set_channel(ch(3), 100).unwrap();
        bank.save_all(&mut store);
        // Saving does not touch dirty flags
        assert!(bank.is_dirty(ch(0)));
        bank.flush(&mut bus, BusPolarity::Direct);

        bank.set_all(0).unwrap();
        bank.restore_all(&store).unwrap();
        let restored: Vec<u8> = bank.values().iter().map(|v| v.value()).collect();
        assert_eq!(restored, vec![5, 50, 0, 100]);
        for channel in ChannelIndex::ALL {
            assert!(bank.is_dirty(channel));
        }
    }

    #[test]
    fn test_restore_marks_unchanged_channels_dirty() {
        let mut bank = ChannelBank::new();
        let store = MemoryStore::new();
        let mut bus = RecordingBus::default();
        bank.restore_all(&store).unwrap();
        assert_eq!(bank.flush(&mut bus, BusPolarity::Direct), 4);
        assert_eq!(bus.writes, vec![(0, 0), (1, 0), (2, 0), (3, 0)]);
    }

    #[test]
    fn test_restore_skips_invalid_stored_values() {
        let mut bank = ChannelBank::new();
        bank.set_channel(ch(1), 12).unwrap();
        let store = MemoryStore::with_values([10, 250, 30, 255]);
        assert_eq!(bank.restore_all(&store), Err(DimmerError::OutOfRange(250)));
        let values: Vec<u8> = bank.values().iter().map(|v| v.value()).collect();
        assert_eq!(values, vec![10, 12, 30, 0]);
        assert!(bank.is_dirty(ch(3)));
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        store.store(ch(2), Intensity::FULL);
        assert_eq!(store.load(ch(2)), 100);
        assert_eq!(store.values(), [0, 0, 100, 0]);
    }

    #[test]
    fn test_failed_commit_is_retried() {
        let mut bank = ChannelBank::new();
        let mut bus = FlakyBus {
            failing_channel: 1,
            failures_left: 2,
            ..FlakyBus::default()
        };
        bank.set_channel(ch(0), 42).unwrap();
        bank.set_channel(ch(1), 17).unwrap();

        assert_eq!(bank.flush(&mut bus, BusPolarity::Direct), 1);
        assert!(!bank.is_dirty(ch(0)));
        assert!(bank.is_dirty(ch(1)));

        assert_eq!(bank.flush(&mut bus, BusPolarity::Direct), 0);
        assert!(bank.is_dirty(ch(1)));

        assert_eq!(bank.flush(&mut bus, BusPolarity::Direct), 1);
        assert_eq!(bank.flush(&mut bus, BusPolarity::Direct), 0);
        assert!(!bank.has_pending());
        assert_eq!(bus.writes, vec![(0, 42), (1, 17)]);
    }
}
