use std::f64::consts::PI;
use std::time::{Duration, Instant};

use anyhow::Result;
use meshwire_core::math::{rotation_matrix, translation_matrix, DVec3};
use meshwire_core::MeshwireConfig;
use meshwire_ir::{Animation, Geometry, Material, SetAnimation, Visualizer};
use serde_json::json;

/// Spinning box: one `set_object`, a background color, then `frames`
/// rotations about z.
pub fn spinning_box(vis: &mut Visualizer<'_>, frames: u32, interval: Duration) -> Result<()> {
    vis.set_object(Geometry::cuboid([0.5, 0.5, 0.5]), None)?;
    vis.at("/Background")?
        .set_property("top_color", json!([1, 0, 0]))?;

    let mut draw_time = Duration::ZERO;
    for i in 0..frames {
        let theta = f64::from(i + 1) / 100.0 * 2.0 * PI;
        let now = Instant::now();
        vis.set_transform(rotation_matrix(theta, DVec3::Z))?;
        draw_time += now.elapsed();
        if !interval.is_zero() {
            std::thread::sleep(interval);
        }
    }

    if frames > 0 {
        tracing::info!(
            "average set_transform time: {:?}",
            draw_time / frames
        );
    }
    Ok(())
}

/// Deterministic point cloud filling the unit cube, colored by position.
pub fn point_cloud(vis: &mut Visualizer<'_>, count: usize) -> Result<()> {
    // R3 low-discrepancy sequence: inverse powers of the root of x^4 = x + 1
    const A: [f64; 3] = [0.819_172_513_396_164_4, 0.671_043_606_703_789_2, 0.549_700_477_901_970_7];
    let positions: Vec<[f32; 3]> = (0..count)
        .map(|i| {
            let n = i as f64 + 0.5;
            [
                (n * A[0]).fract() as f32,
                (n * A[1]).fract() as f32,
                (n * A[2]).fract() as f32,
            ]
        })
        .collect();
    let colors = positions.clone();

    vis.set_object(
        Geometry::points(positions, Some(colors)),
        Some(Material::points(0.01, 0xffffff)),
    )?;
    Ok(())
}

/// Records a quarter turn of `box` between frames 0 and 30 and publishes it.
pub fn keyframed_box(vis: &mut Visualizer<'_>, config: &MeshwireConfig) -> Result<()> {
    let mut box_vis = vis.at("box")?;
    box_vis.set_object(Geometry::cuboid([0.5, 0.5, 0.5]), None)?;
    let box_path = box_vis.path().clone();

    let mut anim = Animation::from_config(&config.animation);
    anim.at_frame(&box_path, 0.0)
        .set_transform(&rotation_matrix(0.0, DVec3::Z));
    anim.at_frame(&box_path, 30.0)
        .set_transform(
            &(translation_matrix(DVec3::new(0.0, 0.0, 0.5)) * rotation_matrix(PI / 2.0, DVec3::Z)),
        );

    vis.send(SetAnimation::from_config(&anim, &config.playback))
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshwire_ir::RecordingTransport;

    #[test]
    fn test_spinning_box_emits_one_transform_per_frame() {
        let mut transport = RecordingTransport::new();
        {
            let mut vis = Visualizer::new(&mut transport);
            spinning_box(&mut vis, 5, Duration::ZERO).unwrap();
        }
        assert_eq!(transport.sent.len(), 7);
        assert_eq!(transport.kinds()[..2], ["set_object", "set_property"]);
    }

    #[test]
    fn test_point_cloud_is_points_object() {
        let mut transport = RecordingTransport::new();
        {
            let mut vis = Visualizer::new(&mut transport);
            point_cloud(&mut vis, 100).unwrap();
        }
        let object = &transport.sent[0]["object"];
        assert_eq!(object["object"]["type"], "Points");
        let array = object["geometries"][0]["data"]["attributes"]["position"]["array"]
            .as_array()
            .unwrap();
        assert_eq!(array.len(), 300);
        assert!(array.iter().all(|v| (0.0..=1.0).contains(&v.as_f64().unwrap())));
    }

    #[test]
    fn test_keyframed_box_publishes_animation() {
        let mut transport = RecordingTransport::new();
        {
            let mut vis = Visualizer::new(&mut transport);
            keyframed_box(&mut vis, &MeshwireConfig::default()).unwrap();
        }
        assert_eq!(transport.kinds(), vec!["set_object", "set_animation"]);
        let anim = &transport.sent[1];
        assert_eq!(anim["animations"][0]["path"], "box");
        assert_eq!(
            anim["animations"][0]["clip"]["tracks"][0]["keys"]
                .as_array()
                .unwrap()
                .len(),
            2
        );
    }
}
