mod support;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use roverwheel::{
    WheelError,
    wheel::{ElementSpec, LayerSpec, Preset, RandomWheel, RandomWheelConfig, WheelRecipe},
};

#[test]
fn presets_survive_a_toml_round_trip() {
    for preset in Preset::ALL {
        let recipe = preset.recipe();
        let text = recipe.to_toml_string().unwrap();
        let parsed = WheelRecipe::from_toml_str(&text).unwrap();
        assert_eq!(parsed, recipe, "{preset:?}:\n{text}");
    }
}

#[test]
fn random_recipes_survive_a_toml_round_trip() {
    let planner = RandomWheel::default();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    for _ in 0..10 {
        let recipe = planner.plan(&mut rng).unwrap();
        let parsed = WheelRecipe::from_toml_str(&recipe.to_toml_string().unwrap()).unwrap();
        assert_eq!(parsed, recipe);
    }
}

#[test]
fn recipe_with_crowded_walls_fails_validation() {
    let mut recipe = Preset::Rosetta.recipe();
    recipe.layers[1] = LayerSpec::new(
        0.02,
        0.2,
        ElementSpec::RectHoles {
            symmetry: 200,
            wall_thickness: 4.0,
        },
    );
    let text = recipe.to_toml_string().unwrap();
    assert!(matches!(
        WheelRecipe::from_toml_str(&text),
        Err(WheelError::InsufficientClearance { symmetry: 200, .. })
    ));
}

#[test]
fn same_stream_same_plan() {
    let planner = RandomWheel::default();
    let rng = ChaCha8Rng::seed_from_u64(0xC0FFEE);
    let a = planner.plan(&mut rng.clone()).unwrap();
    let b = planner.plan(&mut rng.clone()).unwrap();
    let bounds = |r: &WheelRecipe| -> Vec<_> { r.layers.iter().map(|l| (l.start, l.end)).collect() };
    let elements = |r: &WheelRecipe| -> Vec<_> { r.layers.iter().map(|l| l.element).collect() };
    assert_eq!(bounds(&a), bounds(&b));
    assert_eq!(elements(&a), elements(&b));
    assert_eq!(a, b);
}

#[test]
fn random_layers_cover_the_margins_exactly() {
    let config = RandomWheelConfig::default();
    let planner = RandomWheel::new(config).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(17);
    for _ in 0..100 {
        let recipe = planner.plan(&mut rng).unwrap();
        let inner: Vec<_> = recipe.layers[1..recipe.layers.len() - 1].to_vec();
        assert_eq!(inner[0].start, config.inner_margin);
        assert_eq!(inner[inner.len() - 1].end, config.outer_margin);
        for pair in inner.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert!(inner.iter().all(|l| l.end > l.start));
    }
}
