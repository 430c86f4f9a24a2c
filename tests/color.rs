#![allow(missing_docs)]
//! Host-level tests for color construction, packing, and blending.

use embedded_graphics::pixelcolor::Rgb888;
use pixel_matrix::{Color, Error, RGB8, ToRgb8, ToRgb888, colors};

/// Lowercase, leading `#`, opaque alpha pair dropped.
fn normalize_hex(hex: &str) -> String {
    let digits = hex.trim_start_matches('#').to_ascii_lowercase();
    match digits.strip_suffix("ff") {
        Some(rgb) if digits.len() == 8 => format!("#{rgb}"),
        _ => format!("#{digits}"),
    }
}

#[test]
fn hex_round_trips_up_to_normalization() {
    for hex in [
        "#000000",
        "#ffffff",
        "FF8000",
        "#12aBcD",
        "#12abcd80",
        "00000000",
        "#ABCDEFFF",
        "abcdefff",
        "#fe01ff7f",
    ] {
        let color = Color::from_hex(hex).expect("valid hex must parse");
        assert_eq!(color.to_hex(), normalize_hex(hex), "{hex}");
    }
}

#[test]
fn hex_without_alpha_is_opaque() {
    let color = Color::from_hex("#0a0B0c").expect("valid hex must parse");
    assert_eq!(color.rgba(), [10, 11, 12, 255]);
}

#[test]
fn hex_with_alpha_keeps_it() {
    let color: Color = "#0a0b0c40".parse().expect("valid hex must parse");
    assert_eq!(color.rgba(), [10, 11, 12, 64]);
    assert!(!color.is_opaque());
}

#[test]
fn malformed_hex_is_an_error() {
    for hex in [
        "", "#", "#fff", "#fffff", "#fffffff", "#fffffffff", "##ffffff", "#gg0000", "#ff 000",
        "+f+f+f", "ff0000 ", "#ff00éé",
    ] {
        assert_eq!(
            Color::from_hex(hex),
            Err(Error::InvalidHexColor {
                input: String::from(hex)
            }),
            "{hex:?}"
        );
    }
}

#[test]
fn malformed_hex_message_names_the_input() {
    let err = Color::from_hex("#12").expect_err("too short");
    assert_eq!(
        err.to_string(),
        "invalid hex color \"#12\": expected #RRGGBB or #RRGGBBAA"
    );
}

#[test]
fn packing_is_rrggbb() {
    assert_eq!(Color::new(0x12, 0x34, 0x56).to_u32(), 0x0012_3456);
    assert_eq!(Color::from_rgba(0x12, 0x34, 0x56, 0).to_u32(), 0x0012_3456);
    assert_eq!(Color::from_u32(0x0012_3456).rgba(), [0x12, 0x34, 0x56, 255]);
    // The top byte is not a channel.
    assert_eq!(Color::from_u32(0xff12_3456), Color::new(0x12, 0x34, 0x56));
}

#[test]
fn hsv_primaries_and_secondaries() {
    let cases = [
        (0.0, Color::RED),
        (1.0 / 6.0, Color::new(255, 255, 0)),
        (2.0 / 6.0, Color::GREEN),
        (3.0 / 6.0, Color::new(0, 255, 255)),
        (4.0 / 6.0, Color::BLUE),
        (5.0 / 6.0, Color::new(255, 0, 255)),
        (1.0, Color::RED),
    ];
    for (hue, expected) in cases {
        assert_eq!(Color::from_hsv(hue, 1.0, 1.0), expected, "hue {hue}");
    }
}

#[test]
fn hsv_saturation_and_value() {
    assert_eq!(Color::from_hsv(0.3, 0.0, 1.0), Color::WHITE);
    assert_eq!(Color::from_hsv(0.7, 1.0, 0.0), Color::BLACK);
    assert_eq!(Color::from_hsv(0.0, 0.5, 1.0).rgb(), [255, 128, 128]);
    assert_eq!(Color::from_hsv(1.0 / 12.0, 1.0, 1.0).rgb(), [255, 128, 0]);
    assert_eq!(Color::from_hsva(0.0, 1.0, 1.0, 7).a, 7);
}

#[test]
fn hsv_half_levels_round_up() {
    // p = 0.25 * 0.4 * 255 = 25.5 exactly.
    assert_eq!(Color::from_hsv(0.0, 0.6, 0.25).rgb(), [64, 26, 26]);
    // v = 0.5 * 255 = 127.5, p = 0.5 * 0.5 * 255 = 63.75.
    assert_eq!(Color::from_hsv(0.0, 0.5, 0.5).rgb(), [128, 64, 64]);
}

#[test]
fn hsv_out_of_range_saturates() {
    assert_eq!(Color::from_hsv(0.0, 1.0, 2.0), Color::RED);
    assert_eq!(Color::from_hsv(-1.0 / 6.0, 1.0, 1.0), Color::new(255, 0, 255));
    assert_eq!(Color::from_hsv(0.0, 2.0, 1.0), Color::RED);
}

#[test]
fn opaque_over_anything_is_the_overlay() {
    for under in [Color::BLACK, Color::WHITE, Color::new(12, 200, 99)] {
        for over in [Color::RED, Color::new(1, 2, 3), Color::WHITE] {
            assert_eq!(Color::blend(under, over), over);
        }
    }
}

#[test]
fn transparent_over_anything_is_a_no_op() {
    for under in [Color::BLACK, Color::WHITE, Color::new(12, 200, 99)] {
        let blended = Color::blend(under, Color::RED.with_alpha(0));
        assert_eq!(blended.rgb(), under.rgb());
        assert!(blended.is_opaque());
    }
}

#[test]
fn blend_result_is_opaque() {
    let blended = Color::blend(Color::from_rgba(10, 10, 10, 0), Color::from_rgba(0, 0, 0, 3));
    assert!(blended.is_opaque());
}

#[test]
fn blend_weights_by_overlay_alpha() {
    let blended = Color::blend(Color::BLACK, Color::WHITE.with_alpha(51));
    assert_eq!(blended.rgb(), [51, 51, 51]);
    let blended = Color::blend(Color::new(100, 0, 200), Color::new(0, 100, 0).with_alpha(128));
    assert_eq!(blended.rgb(), [50, 50, 100]);
}

#[test]
fn ratio_dims_and_keeps_alpha() {
    let color = Color::from_rgba(200, 100, 3, 9).with_ratio(0.5);
    assert_eq!(color.rgba(), [100, 50, 2, 9]);
    assert_eq!(Color::WHITE.with_ratio(2.0), Color::WHITE);
    assert_eq!(Color::WHITE.with_ratio(-1.0), Color::BLACK);
}

#[test]
fn display_matches_hex() {
    assert_eq!(Color::new(1, 2, 255).to_string(), "#0102ff");
    assert_eq!(Color::from_rgba(1, 2, 255, 16).to_string(), "#0102ff10");
}

#[test]
fn default_is_opaque_black() {
    assert_eq!(Color::default(), Color::BLACK);
}

#[test]
fn converts_to_and_from_led_colors() {
    let color = Color::from_rgba(16, 32, 48, 100);

    let rgb8 = color.to_rgb8();
    assert_eq!(rgb8, RGB8::new(16, 32, 48));
    assert_eq!(RGB8::from(color), rgb8);
    assert_eq!(Color::from(rgb8), Color::new(16, 32, 48));

    let rgb888 = color.to_rgb888();
    assert_eq!(rgb888, Rgb888::new(16, 32, 48));
    assert_eq!(Rgb888::from(color), rgb888);
    assert_eq!(Color::from(rgb888), Color::new(16, 32, 48));

    assert_eq!(rgb888.to_rgb8(), rgb8);
    assert_eq!(rgb8.to_rgb888(), rgb888);
    assert_eq!(rgb8.to_rgb8(), rgb8);
    assert_eq!(rgb888.to_rgb888(), rgb888);
}

#[test]
fn named_colors_match_smart_leds() {
    assert_eq!(Color::RED.to_rgb8(), colors::RED);
    assert_eq!(Color::WHITE.to_rgb8(), colors::WHITE);
    assert_eq!(Color::BLACK.to_rgb8(), colors::BLACK);
    assert_eq!(Color::BLUE.to_rgb8(), colors::BLUE);
    assert_eq!(Color::from(colors::LIME), Color::GREEN);
}
