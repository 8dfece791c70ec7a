mod tests {
    use quad_dimmer::{ChannelIndex, ChannelSelection, DimmerError, Intensity};

    #[test]
    fn test_channel_index_bounds() {
        assert_eq!(ChannelIndex::new(3).map(ChannelIndex::index), Some(3));
        assert_eq!(ChannelIndex::new(4), None);
        assert_eq!(ChannelIndex::try_from(9u8), Err(DimmerError::InvalidChannel(9)));
    }

    #[test]
    fn test_intensity_bounds() {
        assert_eq!(Intensity::try_from(0i32), Ok(Intensity::OFF));
        assert_eq!(Intensity::try_from(100i32), Ok(Intensity::FULL));
        assert_eq!(Intensity::try_from(101i32), Err(DimmerError::OutOfRange(101)));
        assert_eq!(Intensity::try_from(-5i32), Err(DimmerError::OutOfRange(-5)));
        assert_eq!(Intensity::new(30).unwrap().inverted().value(), 70);
    }

    #[test]
    fn test_selection_from_raw_sentinels() {
        let selection = ChannelSelection::from_raw([2, 0xFF, 0, 7]);
        let channels: Vec<u8> = selection.iter().map(ChannelIndex::index).collect();
        assert_eq!(channels, vec![2, 0]);
        assert!(!selection.is_empty());
        assert_eq!(selection.slots()[1], None);
    }

    #[test]
    fn test_selection_empty() {
        assert!(ChannelSelection::none().is_empty());
        assert!(ChannelSelection::from_raw([0xFF; 4]).is_empty());
        assert!(!ChannelSelection::all().is_empty());
        assert_eq!(ChannelSelection::all().iter().count(), 4);
    }
}
