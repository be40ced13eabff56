use super::*;

#[test]
fn store_unit_truncates_and_clamps() {
    assert_eq!(store_unit(0.0), 0);
    assert_eq!(store_unit(1.0), 255);
    assert_eq!(store_unit(0.999), 254);
    assert_eq!(store_unit(1.7), 255);
    assert_eq!(store_unit(-0.2), 0);
    assert_eq!(store_unit(f32::NAN), 0);
}

#[test]
fn scale_u8_truncates() {
    assert_eq!(scale_u8(255, 0.9), 229);
    assert_eq!(scale_u8(242, 0.8), 193);
    assert_eq!(scale_u8(10, 1.0), 10);
}

#[test]
fn unpremultiply_restores_straight_channels() {
    let mut px = [64u8, 128, 0, 128, 1, 2, 3, 0, 9, 8, 7, 255];
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[0..4], &[128, 255, 0, 128]);
    assert_eq!(&px[4..8], &[0, 0, 0, 0]);
    assert_eq!(&px[8..12], &[9, 8, 7, 255]);
}

#[test]
fn unit_round_trips_every_channel_value() {
    for v in 0..=255u8 {
        assert_eq!(store_unit(unit(v)), v);
    }
}
