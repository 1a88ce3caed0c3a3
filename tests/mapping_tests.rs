mod support;

use approx::assert_relative_eq;
use nalgebra::Point3;
use roverwheel::{
    float_types::{PI, Real},
    polar,
    traits::CoordinateTransform,
    wheel::{ContourProfile, ContourSettings, WheelParams, WheelSpace},
};
use support::{distance, reference_space};

fn spaces() -> Vec<WheelSpace> {
    let mut spaces = vec![reference_space()];
    for (hub_ratio, round_ratio) in [(0.4, 0.5), (0.9, 0.9), (0.7, 0.55)] {
        spaces.push(
            WheelSpace::from_profile(
                WheelParams::new(45.0, 90.0, 80.0).unwrap(),
                &ContourProfile {
                    hub_ratio,
                    round_ratio,
                },
                &ContourSettings::default(),
            )
            .unwrap(),
        );
    }
    spaces
}

#[test]
fn edges_of_the_design_square_land_on_the_spines() {
    for space in spaces() {
        let s = space.spines();
        for i in 0..=20 {
            let t = i as Real / 20.0;
            assert_relative_eq!(space.inner_point(t, 0.0), s.inner_radius.point_at(t), epsilon = 1e-9);
            assert_relative_eq!(space.inner_point(t, 1.0), s.outer_radius.point_at(t), epsilon = 1e-9);
            assert_relative_eq!(space.inner_point(0.0, t), s.lower_height.point_at(t), epsilon = 1e-9);
            assert_relative_eq!(space.inner_point(1.0, t), s.upper_height.point_at(t), epsilon = 1e-9);
        }
    }
}

#[test]
fn rotation_about_the_axis_commutes_with_the_mapping() {
    let space = reference_space();
    let params = *space.params();
    for &(r, z) in &[(30.0, 0.0), (55.0, 12.0), (100.0, 60.0), (120.0, 31.0)] {
        let p = polar::cyl_point(r, 0.3, z);
        let mapped = space.transform(p);
        for phi in [-2.5, -PI / 3.0, 0.1, 1.0, 2.9] {
            let rotated_then_mapped = space.transform(polar::rotate_z(&p, phi));
            let mapped_then_rotated = polar::rotate_z(&mapped, phi);
            assert!(
                distance(&rotated_then_mapped, &mapped_then_rotated) < 1e-9,
                "r {r}, z {z}, phi {phi} in a wheel of {params:?}"
            );
        }
    }
}

#[test]
fn mapped_wheel_stays_inside_its_contour() {
    let space = reference_space();
    for i in 0..=10 {
        for j in 0..=10 {
            let l = i as Real / 10.0;
            let h = j as Real / 10.0;
            let p = space.inner_point(h, l);
            assert!(p.x >= 30.0 - 1e-6 && p.x <= 120.0 + 1e-6, "radius {} at ({h}, {l})", p.x);
            assert!(p.z.abs() <= 60.0 + 1e-6);
        }
    }
}

#[test]
fn spines_have_monotone_arc_length() {
    for space in spaces() {
        let s = space.spines();
        for spine in [&s.upper_height, &s.lower_height, &s.inner_radius, &s.outer_radius] {
            assert!(spine.arc_lengths().windows(2).all(|w| w[0] <= w[1]));
            let mut previous: Option<Point3<Real>> = None;
            for i in 0..=200 {
                let p = spine.point_at(i as Real / 200.0);
                if let Some(q) = previous {
                    // neighbouring samples are close: no jumps
                    assert!(distance(&p, &q) <= spine.total_length() / 200.0 * 1.5 + 1e-9);
                }
                previous = Some(p);
            }
        }
    }
}
