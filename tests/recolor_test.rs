use std::path::PathBuf;

use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use recolor::color_spec::parse_target_color;
use recolor::config::{FileConfig, Overrides, RecolorConfig};
use recolor::cst::rgb_to_hsv;
use recolor::image::Image;
use recolor::pipeline::{run_batch, FileOutcome};
use recolor::prompt::ScriptedConfirm;
use recolor::{transform, RecolorError};

#[test]
fn solid_red_becomes_green() {
    let source = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([255, 0, 0])));
    let image = Image::from_dynamic(&source).unwrap();
    let target = parse_target_color("#00FF00").unwrap();

    let result = transform(image, target, 1.0).unwrap().to_dynamic(true).to_rgb8();

    assert_eq!(result.dimensions(), (8, 8));
    assert!(result.pixels().all(|p| *p == Rgb([0, 255, 0])));
}

#[test]
fn logo_on_white_keeps_background_and_shading() {
    let mut source = RgbaImage::from_pixel(3, 1, Rgba([255, 255, 255, 0]));
    source.put_pixel(1, 0, Rgba([200, 0, 0, 255]));
    source.put_pixel(2, 0, Rgba([100, 0, 0, 255]));
    let image = Image::from_dynamic(&DynamicImage::ImageRgba8(source)).unwrap();

    let result = transform(image, [0.0, 0.0, 1.0], 0.0).unwrap();
    let out = result.to_dynamic(true).to_rgba8();

    assert_eq!(*out.get_pixel(0, 0), Rgba([255, 255, 255, 0]));
    assert_eq!(*out.get_pixel(1, 0), Rgba([0, 0, 200, 255]));
    assert_eq!(*out.get_pixel(2, 0), Rgba([0, 0, 100, 255]));

    let shaded = rgb_to_hsv(result.data[2]);
    assert!((shaded[0] - 2.0 / 3.0).abs() < 1e-4);
}

#[test]
fn gray_image_is_rejected() {
    let source = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, Rgb([128, 128, 128])));
    let image = Image::from_dynamic(&source).unwrap();
    let err = transform(image, [1.0, 0.0, 0.0], 1.0).unwrap_err();
    assert!(matches!(err, RecolorError::DegenerateSaturation));
}

#[test]
fn batch_from_resolved_config() {
    let dir = tempfile::tempdir().unwrap();
    let inputs: Vec<PathBuf> = ["a.png", "b.png"].iter().map(|n| dir.path().join(n)).collect();
    for input in &inputs {
        RgbImage::from_pixel(2, 2, Rgb([0, 0, 255])).save(input).unwrap();
    }

    let overrides = Overrides {
        color: Some("rgb(255, 0, 0)".to_string()),
        outdir: Some(dir.path().join("out")),
        ..Default::default()
    };
    let config = RecolorConfig::resolve(overrides, FileConfig::default(), inputs.len()).unwrap();
    let reports = run_batch(&config, &inputs, &mut ScriptedConfirm::default());

    for (report, name) in reports.iter().zip(["a.png", "b.png"]) {
        let expected = dir.path().join("out").join(name);
        assert_eq!(report.result.as_ref().unwrap(), &FileOutcome::Written(expected.clone()));
        let written = image::open(&expected).unwrap().to_rgb8();
        assert!(written.pixels().all(|p| *p == Rgb([255, 0, 0])));
    }
}
