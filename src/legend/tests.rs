use super::*;
use crate::draw::{BLUE, Color, RED, Shape};
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 5)
        .unwrap()
        .and_hms_opt(hour, minute, second)
        .unwrap()
}

fn write_logo(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("logo.png");
    image::RgbaImage::from_pixel(200, 100, image::Rgba([40, 160, 90, 255]))
        .save(&path)
        .unwrap();
    path
}

fn spec(dir: &TempDir, labels: &[&str], colors: Vec<Color>) -> LegendSpec {
    LegendSpec::new(
        labels.iter().map(|l| l.to_string()).collect(),
        colors,
        "Central",
        BoundingBox::new(0.0, 0.0, 10.0, 10.0),
        write_logo(dir),
        dir.path().join("legend.png"),
    )
}

fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// First row containing an exact `rgba` pixel.
fn first_row_with(image: &image::RgbaImage, rgba: [u8; 4]) -> Option<u32> {
    image
        .enumerate_pixels()
        .find(|(_, _, p)| p.0 == rgba)
        .map(|(_, y, _)| y)
}

#[test]
fn bounding_box_text_uses_values_as_given() {
    let dir = TempDir::new().unwrap();
    let mut spec = spec(&dir, &["Roads"], vec![RED]);
    spec.bounding_box = BoundingBox::new(10.0, 20.0, 80.0, 90.0);

    let frame = LegendRenderer::default().compose(&spec, at(12, 0, 0)).unwrap();
    let texts: Vec<&str> = frame.texts().collect();

    assert!(texts.contains(&"Bounding Box Coordinates: 10, 20, 80, 90"));
    assert!(texts.iter().any(|t| t.contains("10, 20, 80, 90")));
}

#[test]
fn text_lines_follow_the_fixed_format() {
    let dir = TempDir::new().unwrap();
    let spec = spec(&dir, &["Roads", "Wire"], vec![RED, BLUE]);

    let frame = LegendRenderer::default().compose(&spec, at(7, 8, 9)).unwrap();
    let texts: Vec<&str> = frame.texts().collect();

    assert_eq!(
        texts,
        vec![
            "Roads",
            "Wire",
            "Region: Central",
            "Bounding Box Coordinates: 0, 0, 10, 10",
            "Generated on: 2024-03-05 07:08:09",
        ]
    );
}

#[test]
fn markers_keep_entry_order() {
    let dir = TempDir::new().unwrap();
    let green: Color = "green".parse().unwrap();
    let spec = spec(&dir, &["Roads", "Wire", "Meters"], vec![RED, BLUE, green]);

    let frame = LegendRenderer::default().compose(&spec, at(12, 0, 0)).unwrap();

    let colors: Vec<Color> = frame.marker_colors().collect();
    assert_eq!(colors, vec![RED, BLUE, green]);

    let marker_ys: Vec<f64> = frame
        .shapes
        .iter()
        .filter_map(|shape| match shape {
            Shape::Marker { cy, .. } => Some(*cy),
            _ => None,
        })
        .collect();
    assert!(marker_ys.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn logo_hangs_from_its_anchor_at_scaled_size() {
    let dir = TempDir::new().unwrap();
    let spec = spec(&dir, &["Roads"], vec![RED]).with_logo_scale(0.25);

    let frame = LegendRenderer::default().compose(&spec, at(12, 0, 0)).unwrap();

    match &frame.shapes[0] {
        Shape::Image { x, y, image } => {
            assert!((x - 120.0).abs() < 1e-9);
            assert!((y - 150.0).abs() < 1e-9);
            assert_eq!(image.dimensions(), (50, 25));
        }
        other => panic!("expected logo first, got {other:?}"),
    }
}

#[test]
fn different_times_change_only_the_timestamp() {
    let dir = TempDir::new().unwrap();
    let spec = spec(&dir, &["Roads", "Wire"], vec![RED, BLUE]);
    let renderer = LegendRenderer::default();

    let morning = renderer.compose(&spec, at(8, 0, 0)).unwrap();
    let evening = renderer.compose(&spec, at(20, 30, 15)).unwrap();

    assert_eq!(morning.shapes.len(), evening.shapes.len());
    let differing: Vec<usize> = morning
        .shapes
        .iter()
        .zip(&evening.shapes)
        .enumerate()
        .filter(|(_, (a, b))| a != b)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(differing, vec![morning.shapes.len() - 1]);

    let last = evening.texts().last().unwrap();
    assert_eq!(last, "Generated on: 2024-03-05 20:30:15");
}

#[test]
fn render_writes_red_then_blue_markers() {
    let dir = TempDir::new().unwrap();
    let spec = spec(&dir, &["Roads", "Wire"], vec![RED, BLUE]);

    let report = LegendRenderer::default()
        .render_and_save_at(&spec, at(9, 15, 0))
        .unwrap();

    assert_eq!(report.path, spec.output_path);
    assert_eq!(report.timestamp, "2024-03-05 09:15:00");
    assert!(report.bytes_written > 0);
    assert_eq!(
        fs::metadata(&spec.output_path).unwrap().len(),
        report.bytes_written
    );

    let image = image::open(&spec.output_path).unwrap().into_rgba8();
    assert_eq!(image.dimensions(), (report.width, report.height));

    let red_row = first_row_with(&image, [255, 0, 0, 255]).expect("red marker present");
    let blue_row = first_row_with(&image, [0, 0, 255, 255]).expect("blue marker present");
    assert!(red_row < blue_row);
}

#[test]
fn render_crops_to_ink_with_padding() {
    let dir = TempDir::new().unwrap();
    let spec = spec(&dir, &["Roads"], vec![RED]);

    let report = LegendRenderer::default()
        .render_and_save_at(&spec, at(9, 15, 0))
        .unwrap();
    let image = image::open(&spec.output_path).unwrap().into_rgba8();

    // The 0.1 inch pad is fully transparent on every side.
    let pad = LayoutConfig::default().pad_px() as u32;
    let (width, height) = image.dimensions();
    assert!(width > 2 * pad && height > 2 * pad);
    for (x, y, pixel) in image.enumerate_pixels() {
        if x < pad || y < pad || x >= width - pad || y >= height - pad {
            assert_eq!(pixel.0[3], 0, "ink inside the pad at ({x}, {y})");
        }
    }
    assert!(report.height < 1500 + 2 * pad);
}

#[test]
fn empty_labels_fail_validation_without_output() {
    let dir = TempDir::new().unwrap();
    let spec = spec(&dir, &[], vec![]);

    let err = LegendRenderer::default().render_and_save(&spec).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(!spec.output_path.exists());
}

#[test]
fn mismatched_colors_fail_validation_without_output() {
    let dir = TempDir::new().unwrap();
    let spec = spec(&dir, &["Roads", "Wire"], vec![RED]);

    let err = LegendRenderer::default().render_and_save(&spec).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(!spec.output_path.exists());
}

#[test]
fn missing_logo_fails_to_load_without_output() {
    let dir = TempDir::new().unwrap();
    let mut spec = spec(&dir, &["Roads"], vec![RED]);
    spec.logo_path = dir.path().join("absent.png");

    let err = LegendRenderer::default().render_and_save(&spec).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Load);
    assert_eq!(dir_entries(dir.path()), vec!["logo.png".to_string()]);
}

#[test]
fn unsupported_extension_fails_before_loading() {
    let dir = TempDir::new().unwrap();
    let mut spec = spec(&dir, &["Roads"], vec![RED]);
    spec.logo_path = dir.path().join("absent.png");
    spec.output_path = dir.path().join("legend.svg");

    let err = LegendRenderer::default().render_and_save(&spec).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Export);
    assert!(!spec.output_path.exists());
}

#[test]
fn export_failure_leaves_no_partial_file() {
    let dir = TempDir::new().unwrap();
    let mut spec = spec(&dir, &["Roads"], vec![RED]);
    spec.output_path = dir.path().join("no-such-dir").join("legend.png");

    let err = LegendRenderer::default().render_and_save(&spec).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Export);
    assert!(!spec.output_path.exists());
    assert_eq!(dir_entries(dir.path()), vec!["logo.png".to_string()]);
}

#[test]
fn failed_move_into_place_leaves_no_temporary_file() {
    let dir = TempDir::new().unwrap();
    let spec = spec(&dir, &["Roads"], vec![RED]);
    fs::create_dir(&spec.output_path).unwrap();

    let err = LegendRenderer::default().render_and_save(&spec).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Export);
    assert!(spec.output_path.is_dir());
    assert_eq!(
        dir_entries(dir.path()),
        vec!["legend.png".to_string(), "logo.png".to_string()]
    );
}

#[test]
fn custom_layout_and_font_drive_the_output() {
    let dir = TempDir::new().unwrap();
    let spec = spec(&dir, &["Roads"], vec![RED]);
    let font = FontDescriptor::new("Serif", "bold", "italic");
    let renderer = LegendRenderer::new(LayoutConfig {
        dpi: 100.0,
        ..LayoutConfig::default()
    })
    .with_font(font.clone());
    assert_eq!(renderer.layout_config().canvas_size(), (400, 500));

    let frame = renderer.compose(&spec, at(12, 0, 0)).unwrap();
    assert!(frame.shapes.iter().all(|shape| match shape {
        Shape::Text {
            font_descriptor, ..
        } => *font_descriptor == font,
        _ => true,
    }));

    let report = renderer.render_and_save_at(&spec, at(12, 0, 0)).unwrap();
    assert!(report.width < 400 && report.height < 500);
}

#[test]
fn renderer_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<LegendRenderer>();

    let renderer = &LegendRenderer::default();
    let dirs: Vec<TempDir> = (0..3).map(|_| TempDir::new().unwrap()).collect();
    let specs: Vec<LegendSpec> = dirs
        .iter()
        .map(|dir| spec(dir, &["Roads", "Wire"], vec![RED, BLUE]))
        .collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = specs
            .iter()
            .map(|spec| scope.spawn(move || renderer.render_and_save(spec)))
            .collect();
        for handle in handles {
            let report = handle.join().unwrap().unwrap();
            assert!(report.bytes_written > 0);
        }
    });
}
