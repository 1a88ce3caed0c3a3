mod support;

use roverwheel::{
    float_types::{Real, TAU},
    polar,
    traits::SolidOps,
    voxels::Voxels,
    wheel::{
        WheelElements, WheelLayer,
        elements::{EgyptianStruts, RectHoles, RosettaStruts, SpiralStruts, TubeStruts},
        layer::layer_solid,
    },
};
use support::{coarse, reference_params, reference_space};

/// `[min r, max r, min z, max z, mean angle]` over the voxel centres.
fn cylindrical_extents(solid: &Voxels) -> [Real; 5] {
    let vs = solid.voxel_size();
    let mut e = [Real::MAX, Real::MIN, Real::MAX, Real::MIN, 0.0];
    let (mut sin, mut cos): (Real, Real) = (0.0, 0.0);
    for &idx in solid.cells() {
        let p = Voxels::centre(vs, idx);
        let r = polar::radius(&p);
        e[0] = e[0].min(r);
        e[1] = e[1].max(r);
        e[2] = e[2].min(p.z);
        e[3] = e[3].max(p.z);
        let phi = polar::phi(&p);
        sin += phi.sin();
        cos += phi.cos();
    }
    e[4] = sin.atan2(cos);
    e
}

fn angle_between(a: Real, b: Real) -> Real {
    let d = (a - b).rem_euclid(TAU);
    d.min(TAU - d)
}

fn assert_congruent_copies(elements: &dyn WheelElements) {
    let space = reference_space();
    let res = coarse();
    let n = elements.symmetry();
    let first = cylindrical_extents(&elements.copy(0, &space, &res));
    // a handful of copies spread around the wheel
    for i in [1, n / 3, n / 2, n - 1] {
        let copy = elements.copy(i, &space, &res);
        assert!(!copy.is_empty());
        let e = cylindrical_extents(&copy);
        for k in 0..4 {
            assert!(
                (e[k] - first[k]).abs() <= 2.0 * res.voxel_size,
                "copy {i} of {n}: extent {k} is {} against {}",
                e[k],
                first[k]
            );
        }
        let expected = first[4] + TAU * i as Real / n as Real;
        assert!(
            angle_between(e[4], expected) < 0.03,
            "copy {i} of {n} centred at {} instead of {expected}",
            e[4]
        );
    }
}

fn layer(start: Real, end: Real) -> WheelLayer {
    WheelLayer::new(reference_params(), start, end).unwrap()
}

#[test]
fn rect_holes_are_congruent_under_rotation() {
    assert_congruent_copies(&RectHoles::new(layer(0.2, 0.6), 20, 4.0).unwrap());
}

#[test]
fn spiral_struts_are_congruent_under_rotation() {
    assert_congruent_copies(&SpiralStruts::new(layer(0.05, 0.2), 16, 2.5).unwrap());
}

#[test]
fn tube_struts_are_congruent_under_rotation() {
    assert_congruent_copies(&TubeStruts::new(layer(0.6, 0.8), 36, 2.0).unwrap());
}

#[test]
fn rosetta_struts_are_congruent_under_rotation() {
    assert_congruent_copies(&RosettaStruts::new(layer(0.2, 0.6), 10, 4.0).unwrap());
}

#[test]
fn egyptian_struts_are_congruent_under_rotation() {
    assert_congruent_copies(&EgyptianStruts::new(layer(0.5, 0.85), 20, 4.0).unwrap());
}

#[test]
fn rect_holes_through_the_whole_wheel() {
    // hub 30, outer 120, width 60, one layer [0, 1] with 20 holes and 4 mm walls
    let space = reference_space();
    let res = coarse();
    let band = layer(0.0, 1.0);
    let holes = RectHoles::new(band, 20, 4.0).unwrap();
    let solid = holes.construct(&space, &res);
    let full = layer_solid(&space, &band, &res);
    let volume = solid.volume();
    assert!(volume > 0.0);
    assert!(volume < full.volume(), "{volume} vs {}", full.volume());
}

