use birdseye_bev::{
    transform::ground_row, BevError, BevProcessor, BevSettings, CameraModel, Orientation,
};
use birdseye_image::{Image, ImageSize};
use birdseye_imgproc::interpolation::InterpolationMode;

const SIZE: ImageSize = ImageSize {
    width: 640,
    height: 480,
};
const PITCH_DEG: f64 = -55.0;
const CAMERA_HEIGHT_M: f64 = 1.5;
const LOOK_AHEAD_M: f64 = 12.0;

/// Render what the camera sees of a ground plane tiled with 1 m x 1 m black and white
/// cells. Pixels above the horizon are grey.
fn render_ground_checkerboard(camera: &CameraModel) -> Result<Image<u8, 3>, BevError> {
    let f = camera.focal_length_px(SIZE.height as f64);
    let theta = camera.optical_axis_pitch_rad(PITCH_DEG);
    let (cx, cy) = (SIZE.width as f64 / 2.0, SIZE.height as f64 / 2.0);

    let image = Image::from_fn(SIZE, |x, y| {
        let xc = (x as f64 - cx) / f;
        let yc = (y as f64 - cy) / f;
        let down = theta.sin() + yc * theta.cos();
        let forward = theta.cos() - yc * theta.sin();
        if down <= 0.0 {
            return [128; 3];
        }
        let distance = CAMERA_HEIGHT_M * forward / down;
        let lateral = CAMERA_HEIGHT_M * xc / down;
        let cell = distance.floor() as i64 + lateral.floor() as i64;
        if cell.rem_euclid(2) == 0 {
            [255; 3]
        } else {
            [0; 3]
        }
    })?;
    Ok(image)
}

fn cell_color(cell: i64) -> u8 {
    if cell.rem_euclid(2) == 0 {
        255
    } else {
        0
    }
}

fn run(interpolation: InterpolationMode) -> Result<(), BevError> {
    let camera = CameraModel::default();
    let frame = render_ground_checkerboard(&camera)?;

    let processor = BevProcessor::new(camera, interpolation)?;
    let settings = BevSettings::new(CAMERA_HEIGHT_M, LOOK_AHEAD_M);
    let out = processor.process(&frame, &Orientation::new(0.0, PITCH_DEG, 0.0), &settings)?;

    let top_row = out.transform.top_row;
    let stretch = SIZE.height as f64 / (SIZE.height as f64 - top_row);
    let to_output_row = |distance_m: f64| -> Result<usize, BevError> {
        let row = ground_row(&camera, SIZE.height, PITCH_DEG, CAMERA_HEIGHT_M, distance_m)?;
        Ok(((row - top_row) * stretch).round() as usize)
    };

    // boundaries between depth cells along a column just right of the center
    let column = 330;
    for k in 5..=10 {
        let row = to_output_row(k as f64)?;
        for offset in [2, 3] {
            assert_eq!(
                out.image.pixel(column, row - offset)?,
                &[cell_color(k); 3],
                "beyond {k} m"
            );
            assert_eq!(
                out.image.pixel(column, row + offset)?,
                &[cell_color(k - 1); 3],
                "before {k} m"
            );
        }
    }

    // lateral boundary one meter right of the optical axis, 7.5 m ahead
    let row = to_output_row(7.5)?;
    let src_row = row as f64 / stretch + top_row;
    let f = out.transform.focal_length_px;
    let theta = camera.optical_axis_pitch_rad(PITCH_DEG);
    let down = theta.sin() + (src_row - SIZE.height as f64 / 2.0) / f * theta.cos();
    let boundary = (SIZE.width as f64 / 2.0 + f * down / CAMERA_HEIGHT_M).round() as usize;
    for offset in [2, 3] {
        assert_eq!(out.image.pixel(boundary - offset, row)?, &[cell_color(7); 3]);
        assert_eq!(out.image.pixel(boundary + offset, row)?, &[cell_color(8); 3]);
    }

    assert_eq!(out.footprint.visible_length_m, LOOK_AHEAD_M);
    Ok(())
}

#[test]
fn checkerboard_cells_land_where_the_ground_geometry_says_bilinear() -> Result<(), BevError> {
    run(InterpolationMode::Bilinear)
}

#[test]
fn checkerboard_cells_land_where_the_ground_geometry_says_nearest() -> Result<(), BevError> {
    run(InterpolationMode::Nearest)
}

#[test]
fn process_is_deterministic() -> Result<(), BevError> {
    let camera = CameraModel::default();
    let frame = render_ground_checkerboard(&camera)?;
    let processor = BevProcessor::new(camera, InterpolationMode::Bilinear)?;
    let settings = BevSettings::new(CAMERA_HEIGHT_M, LOOK_AHEAD_M);
    let orientation = Orientation::new(0.0, PITCH_DEG, 0.0);

    let a = processor.process(&frame, &orientation, &settings)?;
    let b = processor.process(&frame, &orientation, &settings)?;
    assert_eq!(a.transform, b.transform);
    assert_eq!(a.image, b.image);
    Ok(())
}
